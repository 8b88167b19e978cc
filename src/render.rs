use serde::Serialize;

use crate::dataset::{Coded, Dataset, TransferRecord, TransferStatus, TransferType};
use crate::state::{
    Selection, StatusFilter, TypeFilter, ViewMode, status_filter_label, status_label,
    type_filter_label, type_label,
};

const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Done,
    Waiting,
    Speculative,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub icon: &'static str,
    pub tone: BadgeTone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineCard {
    pub player_name: String,
    /// `POSITION • AGEY • NATIONALITY`
    pub details: String,
    pub from_team: String,
    pub to_team: String,
    pub fee: String,
    pub date: String,
    pub status: Badge,
    pub kind: Badge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardRow {
    pub player: String,
    pub from: String,
    pub to: String,
    pub fee: String,
    pub status: String,
    pub kind: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePanel {
    pub icon: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum ViewBody {
    NoResults(MessagePanel),
    Timeline(Vec<TimelineCard>),
    Scoreboard(Vec<ScoreboardRow>),
}

impl ViewBody {
    pub fn item_count(&self) -> usize {
        match self {
            ViewBody::NoResults(_) => 0,
            ViewBody::Timeline(cards) => cards.len(),
            ViewBody::Scoreboard(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueButton {
    pub id: String,
    pub short_name: String,
    pub country: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    /// Value carried by the control, as accepted by `SelectionEvent::from_control`.
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedScreen {
    pub count_label: String,
    pub league_label: String,
    pub leagues: Vec<LeagueButton>,
    pub status_filters: Vec<FilterButton>,
    pub type_filters: Vec<FilterButton>,
    pub view: ViewMode,
    pub body: ViewBody,
}

pub fn no_results_panel() -> MessagePanel {
    MessagePanel {
        icon: "search_off",
        title: "NO TRANSFERS FOUND",
        subtitle: "TRY ADJUSTING YOUR FILTERS",
    }
}

pub fn load_error_panel() -> MessagePanel {
    MessagePanel {
        icon: "error",
        title: "ERROR LOADING DATA",
        subtitle: "PLEASE REFRESH",
    }
}

pub fn status_badge(status: &Coded<TransferStatus>) -> Badge {
    let (icon, tone) = match status {
        Coded::Known(TransferStatus::Completed) => ("check_circle", BadgeTone::Done),
        Coded::Known(TransferStatus::Pending) => ("schedule", BadgeTone::Waiting),
        Coded::Known(TransferStatus::Rumored) => ("help", BadgeTone::Speculative),
        Coded::Other(_) => ("info", BadgeTone::Done),
    };
    Badge {
        label: coded_label(status, status_label),
        icon,
        tone,
    }
}

pub fn type_badge(kind: &Coded<TransferType>) -> Badge {
    let (icon, tone) = match kind {
        Coded::Known(TransferType::Permanent) => ("home", BadgeTone::Primary),
        Coded::Known(TransferType::Loan) => ("swap_horiz", BadgeTone::Secondary),
        Coded::Other(_) => ("info", BadgeTone::Primary),
    };
    Badge {
        label: coded_label(kind, type_label),
        icon,
        tone,
    }
}

/// Upper-cased label; unrecognised values show their raw text upper-cased.
fn coded_label<T: Copy>(value: &Coded<T>, label: fn(T) -> &'static str) -> String {
    match value {
        Coded::Known(known) => label(*known).to_string(),
        Coded::Other(raw) => raw.to_uppercase(),
    }
}

/// Reshapes already-filtered records into one of the two layouts. Never drops or
/// reorders records.
pub fn render_view(records: &[&TransferRecord], view: ViewMode) -> ViewBody {
    if records.is_empty() {
        return ViewBody::NoResults(no_results_panel());
    }
    match view {
        ViewMode::Timeline => {
            ViewBody::Timeline(records.iter().map(|t| timeline_card(t)).collect())
        }
        ViewMode::Scoreboard => {
            ViewBody::Scoreboard(records.iter().map(|t| scoreboard_row(t)).collect())
        }
    }
}

pub fn render_screen(
    dataset: &Dataset,
    selection: &Selection,
    records: &[&TransferRecord],
) -> RenderedScreen {
    RenderedScreen {
        count_label: count_label(records.len()),
        league_label: league_label(dataset, &selection.league),
        leagues: league_buttons(dataset, &selection.league),
        status_filters: status_filter_buttons(selection.status),
        type_filters: type_filter_buttons(selection.kind),
        view: selection.view,
        body: render_view(records, selection.view),
    }
}

pub fn count_label(count: usize) -> String {
    format!("SHOWING {count} TRANSFERS")
}

/// Upper-cased league name, or empty when the id is unknown.
pub fn league_label(dataset: &Dataset, league_id: &str) -> String {
    dataset
        .league(league_id)
        .map(|l| l.name.to_uppercase())
        .unwrap_or_default()
}

pub fn league_buttons(dataset: &Dataset, active: &str) -> Vec<LeagueButton> {
    dataset
        .leagues
        .iter()
        .map(|l| LeagueButton {
            id: l.id.clone(),
            short_name: or_missing(&l.short_name),
            country: or_missing(&l.country),
            active: l.id == active,
        })
        .collect()
}

pub fn status_filter_buttons(active: StatusFilter) -> Vec<FilterButton> {
    [
        ("all", StatusFilter::All),
        ("completed", StatusFilter::Only(TransferStatus::Completed)),
        ("pending", StatusFilter::Only(TransferStatus::Pending)),
        ("rumored", StatusFilter::Only(TransferStatus::Rumored)),
    ]
    .into_iter()
    .map(|(value, filter)| FilterButton {
        value,
        label: status_filter_label(filter),
        active: filter == active,
    })
    .collect()
}

pub fn type_filter_buttons(active: TypeFilter) -> Vec<FilterButton> {
    [
        ("all", TypeFilter::All),
        ("permanent", TypeFilter::Only(TransferType::Permanent)),
        ("loan", TypeFilter::Only(TransferType::Loan)),
    ]
    .into_iter()
    .map(|(value, filter)| FilterButton {
        value,
        label: type_filter_label(filter),
        active: filter == active,
    })
    .collect()
}

fn timeline_card(t: &TransferRecord) -> TimelineCard {
    let age = t
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "?".to_string());
    TimelineCard {
        player_name: or_missing(&t.player_name),
        details: format!(
            "{} • {age}Y • {}",
            or_missing(&t.position),
            or_missing(&t.nationality)
        ),
        from_team: or_missing(&t.from_team),
        to_team: or_missing(&t.to_team),
        fee: or_missing(&t.fee),
        date: or_missing(&t.date),
        status: status_badge(&t.status),
        kind: type_badge(&t.kind),
    }
}

fn scoreboard_row(t: &TransferRecord) -> ScoreboardRow {
    ScoreboardRow {
        player: or_missing(&t.player_name),
        from: or_missing(&t.from_team),
        to: or_missing(&t.to_team),
        fee: or_missing(&t.fee),
        status: coded_label(&t.status, status_label),
        kind: coded_label(&t.kind, type_label),
        date: or_missing(&t.date),
    }
}

fn or_missing(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        MISSING.to_string()
    } else {
        trimmed.to_string()
    }
}
