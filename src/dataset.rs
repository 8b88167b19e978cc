use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::http_client;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Completed,
    Pending,
    Rumored,
}

impl TransferStatus {
    pub const ALL: [TransferStatus; 3] = [
        TransferStatus::Completed,
        TransferStatus::Pending,
        TransferStatus::Rumored,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "completed" => Some(TransferStatus::Completed),
            "pending" => Some(TransferStatus::Pending),
            "rumored" => Some(TransferStatus::Rumored),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Permanent,
    Loan,
}

impl TransferType {
    pub const ALL: [TransferType; 2] = [TransferType::Permanent, TransferType::Loan];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "permanent" => Some(TransferType::Permanent),
            "loan" => Some(TransferType::Loan),
            _ => None,
        }
    }
}

/// A record's status or type as written in the document. Values outside the known set
/// keep their raw text, never match a specific filter and render with a generic badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coded<T> {
    Known(T),
    Other(String),
}

impl<T: Copy> Coded<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(value) => Some(*value),
            Coded::Other(_) => None,
        }
    }
}

impl<T> From<T> for Coded<T> {
    fn from(value: T) -> Self {
        Coded::Known(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub from_team: String,
    #[serde(default)]
    pub to_team: String,
    #[serde(default)]
    pub fee: String,
    #[serde(default)]
    pub date: String,
    pub status: Coded<TransferStatus>,
    #[serde(rename = "type")]
    pub kind: Coded<TransferType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub name: String,
}

/// The whole document as served: leagues in display order plus per-league transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub transfers: HashMap<String, Vec<TransferRecord>>,
}

impl Dataset {
    pub fn league(&self, id: &str) -> Option<&League> {
        self.leagues.iter().find(|l| l.id == id)
    }

    pub fn league_at(&self, index: usize) -> Option<&League> {
        self.leagues.get(index)
    }

    pub fn league_position(&self, id: &str) -> Option<usize> {
        self.leagues.iter().position(|l| l.id == id)
    }

    /// Records for a league in source order; empty when the key has no entry.
    pub fn records(&self, league_id: &str) -> &[TransferRecord] {
        self.transfers
            .get(league_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed fetching {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("invalid transfers document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_dataset_json(raw: &str) -> Result<Dataset, LoadError> {
    // A literal `null` body is treated as an empty document.
    let parsed = serde_json::from_str::<Option<Dataset>>(raw)?;
    Ok(parsed.unwrap_or_default())
}

pub fn is_remote_source(source: &str) -> bool {
    let lower = source.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub fn load_dataset(source: &str, timeout_secs: u64) -> Result<Dataset, LoadError> {
    let source = source.trim();
    let raw = if is_remote_source(source) {
        fetch_remote(source, timeout_secs)?
    } else {
        read_local(Path::new(source))?
    };
    parse_dataset_json(&raw)
}

fn read_local(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn fetch_remote(url: &str, timeout_secs: u64) -> Result<String, LoadError> {
    let fetch_err = |message: String| LoadError::Fetch {
        url: url.to_string(),
        message,
    };
    let client = http_client(timeout_secs).map_err(|err| fetch_err(format!("{err:#}")))?;
    let resp = client
        .get(url)
        .send()
        .map_err(|err| fetch_err(err.to_string()))?;
    let status = resp.status();
    let body = resp.text().map_err(|err| fetch_err(err.to_string()))?;
    if !status.is_success() {
        return Err(fetch_err(format!("http {status}")));
    }
    Ok(body)
}
