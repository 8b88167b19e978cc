pub mod config;
pub mod controller;
pub mod dataset;
pub mod filter;
pub mod http_client;
pub mod render;
pub mod state;
