use serde::Serialize;
use thiserror::Error;

use crate::dataset::{TransferRecord, TransferStatus, TransferType};

pub const DEFAULT_LEAGUE: &str = "epl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TransferStatus),
}

impl StatusFilter {
    pub fn matches(self, record: &TransferRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.status.known() == Some(status),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim() == "all" {
            return Some(StatusFilter::All);
        }
        TransferStatus::parse(raw).map(StatusFilter::Only)
    }

    fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(TransferStatus::Completed),
            StatusFilter::Only(TransferStatus::Completed) => {
                StatusFilter::Only(TransferStatus::Pending)
            }
            StatusFilter::Only(TransferStatus::Pending) => {
                StatusFilter::Only(TransferStatus::Rumored)
            }
            StatusFilter::Only(TransferStatus::Rumored) => StatusFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransferType),
}

impl TypeFilter {
    pub fn matches(self, record: &TransferRecord) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => record.kind.known() == Some(kind),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim() == "all" {
            return Some(TypeFilter::All);
        }
        TransferType::parse(raw).map(TypeFilter::Only)
    }

    fn next(self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Only(TransferType::Permanent),
            TypeFilter::Only(TransferType::Permanent) => TypeFilter::Only(TransferType::Loan),
            TypeFilter::Only(TransferType::Loan) => TypeFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Timeline,
    Scoreboard,
}

impl ViewMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "timeline" => Some(ViewMode::Timeline),
            "scoreboard" => Some(ViewMode::Scoreboard),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            ViewMode::Timeline => ViewMode::Scoreboard,
            ViewMode::Scoreboard => ViewMode::Timeline,
        }
    }
}

/// The four user-controlled scalars. Each change is followed by a full re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub league: String,
    pub status: StatusFilter,
    pub kind: TypeFilter,
    pub view: ViewMode,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_LEAGUE, ViewMode::Timeline)
    }
}

impl Selection {
    pub fn new(league: impl Into<String>, view: ViewMode) -> Self {
        Self {
            league: league.into(),
            status: StatusFilter::All,
            kind: TypeFilter::All,
            view,
        }
    }
}

/// Which control a data-attribute value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlGroup {
    League,
    Status,
    Type,
    View,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    SelectLeague(String),
    SetStatus(StatusFilter),
    SetType(TypeFilter),
    SetView(ViewMode),
    CycleStatus,
    CycleType,
    ToggleView,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty league id")]
    EmptyLeague,
    #[error("unknown status filter `{0}` (expected all, completed, pending or rumored)")]
    UnknownStatus(String),
    #[error("unknown type filter `{0}` (expected all, permanent or loan)")]
    UnknownType(String),
    #[error("unknown view `{0}` (expected timeline or scoreboard)")]
    UnknownView(String),
}

impl SelectionEvent {
    /// Parses the value a control carries. Unknown values are rejected here so the
    /// reducer only ever sees closed enums.
    pub fn from_control(group: ControlGroup, value: &str) -> Result<Self, InputError> {
        match group {
            ControlGroup::League => {
                let id = value.trim();
                if id.is_empty() {
                    return Err(InputError::EmptyLeague);
                }
                Ok(SelectionEvent::SelectLeague(id.to_string()))
            }
            ControlGroup::Status => StatusFilter::parse(value)
                .map(SelectionEvent::SetStatus)
                .ok_or_else(|| InputError::UnknownStatus(value.to_string())),
            ControlGroup::Type => TypeFilter::parse(value)
                .map(SelectionEvent::SetType)
                .ok_or_else(|| InputError::UnknownType(value.to_string())),
            ControlGroup::View => ViewMode::parse(value)
                .map(SelectionEvent::SetView)
                .ok_or_else(|| InputError::UnknownView(value.to_string())),
        }
    }
}

pub fn reduce(selection: Selection, event: &SelectionEvent) -> Selection {
    let mut next = selection;
    match event {
        SelectionEvent::SelectLeague(id) => next.league = id.clone(),
        SelectionEvent::SetStatus(status) => next.status = *status,
        SelectionEvent::SetType(kind) => next.kind = *kind,
        SelectionEvent::SetView(view) => next.view = *view,
        SelectionEvent::CycleStatus => next.status = next.status.next(),
        SelectionEvent::CycleType => next.kind = next.kind.next(),
        SelectionEvent::ToggleView => next.view = next.view.toggled(),
    }
    next
}

pub fn status_label(status: TransferStatus) -> &'static str {
    match status {
        TransferStatus::Completed => "COMPLETED",
        TransferStatus::Pending => "PENDING",
        TransferStatus::Rumored => "RUMORED",
    }
}

pub fn type_label(kind: TransferType) -> &'static str {
    match kind {
        TransferType::Permanent => "PERMANENT",
        TransferType::Loan => "LOAN",
    }
}

pub fn status_filter_label(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::All => "ALL",
        StatusFilter::Only(status) => status_label(status),
    }
}

pub fn type_filter_label(filter: TypeFilter) -> &'static str {
    match filter {
        TypeFilter::All => "ALL",
        TypeFilter::Only(kind) => type_label(kind),
    }
}

pub fn view_label(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Timeline => "TIMELINE",
        ViewMode::Scoreboard => "SCOREBOARD",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_cycle_visits_every_value_once() {
        let mut filter = StatusFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(seen.last(), Some(&StatusFilter::All));
        assert_eq!(seen.len(), 4);
        assert!(seen.contains(&StatusFilter::Only(TransferStatus::Rumored)));
    }

    #[test]
    fn type_cycle_wraps_to_all() {
        let filter = TypeFilter::All.next().next().next();
        assert_eq!(filter, TypeFilter::All);
    }
}
