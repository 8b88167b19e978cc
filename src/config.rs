use std::env;

use crate::state::{DEFAULT_LEAGUE, ViewMode};

pub const DEFAULT_SOURCE: &str = "assets/json/transfers.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: String,
    pub default_league: String,
    pub default_view: ViewMode,
    pub http_timeout_secs: u64,
    /// Problems found while reading the environment, surfaced on the console.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            default_league: DEFAULT_LEAGUE.to_string(),
            default_view: ViewMode::Timeline,
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads `.env.local` then `.env` (neither is required) and reads the process env.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = AppConfig::default();

        if let Some(source) = non_empty(lookup("TRANSFERS_SOURCE")) {
            cfg.source = source;
        }
        if let Some(league) = non_empty(lookup("TRANSFERS_DEFAULT_LEAGUE")) {
            cfg.default_league = league;
        }
        if let Some(raw) = non_empty(lookup("TRANSFERS_DEFAULT_VIEW")) {
            match ViewMode::parse(&raw.to_ascii_lowercase()) {
                Some(view) => cfg.default_view = view,
                None => cfg
                    .warnings
                    .push(format!("[WARN] Unknown TRANSFERS_DEFAULT_VIEW `{raw}`, using timeline")),
            }
        }
        cfg.http_timeout_secs = lookup("TRANSFERS_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);

        cfg
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
