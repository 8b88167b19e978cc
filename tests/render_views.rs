use std::fs;
use std::path::PathBuf;

use transfer_window::dataset::{Dataset, TransferStatus, parse_dataset_json};
use transfer_window::filter::filter_for_selection;
use transfer_window::render::{BadgeTone, ViewBody, render_screen, render_view};
use transfer_window::state::{Selection, StatusFilter, TypeFilter, ViewMode};

fn fixture_dataset() -> Dataset {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures/transfers.json");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    parse_dataset_json(&raw).expect("fixture should parse")
}

#[test]
fn completed_epl_scenario() {
    let dataset = fixture_dataset();
    let mut selection = Selection::new("epl", ViewMode::Timeline);
    selection.status = StatusFilter::Only(TransferStatus::Completed);

    let records = filter_for_selection(&dataset, &selection);
    let screen = render_screen(&dataset, &selection, &records);

    assert_eq!(screen.count_label, "SHOWING 2 TRANSFERS");
    assert_eq!(screen.league_label, "PREMIER LEAGUE");
    let ViewBody::Timeline(cards) = &screen.body else {
        panic!("expected timeline body, got {:?}", screen.body);
    };
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].player_name, "Marcus Hale");
    assert_eq!(cards[1].player_name, "Jonas Lindqvist");
    assert!(cards.iter().all(|c| c.status.label == "COMPLETED"));
    assert!(cards.iter().all(|c| c.kind.label == "PERMANENT"));
}

#[test]
fn timeline_card_shows_every_field() {
    let dataset = fixture_dataset();
    let selection = Selection::new("epl", ViewMode::Timeline);
    let records = filter_for_selection(&dataset, &selection);
    let ViewBody::Timeline(cards) = render_view(&records, ViewMode::Timeline) else {
        panic!("expected timeline body");
    };

    let loan = &cards[2];
    assert_eq!(loan.player_name, "Tomás Ribeiro");
    assert_eq!(loan.details, "CM • 20Y • Portugal");
    assert_eq!(loan.from_team, "Chelsea");
    assert_eq!(loan.to_team, "Everton");
    assert_eq!(loan.fee, "LOAN");
    assert_eq!(loan.date, "JUL 15, 2025");
    assert_eq!(loan.status.label, "PENDING");
    assert_eq!(loan.status.icon, "schedule");
    assert_eq!(loan.status.tone, BadgeTone::Waiting);
    assert_eq!(loan.kind.icon, "swap_horiz");
}

#[test]
fn missing_age_renders_placeholder() {
    let dataset = fixture_dataset();
    let selection = Selection::new("laliga", ViewMode::Timeline);
    let records = filter_for_selection(&dataset, &selection);
    let ViewBody::Timeline(cards) = render_view(&records, ViewMode::Timeline) else {
        panic!("expected timeline body");
    };
    assert_eq!(cards[1].details, "RB • ?Y • Ghana");
}

#[test]
fn scoreboard_rows_use_upper_case_labels() {
    let dataset = fixture_dataset();
    let selection = Selection::new("laliga", ViewMode::Scoreboard);
    let records = filter_for_selection(&dataset, &selection);
    let ViewBody::Scoreboard(rows) = render_view(&records, ViewMode::Scoreboard) else {
        panic!("expected scoreboard body");
    };
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].player, "Iker Salazar");
    assert_eq!(rows[0].from, "Real Sociedad");
    assert_eq!(rows[0].to, "Atlético Madrid");
    assert_eq!(rows[0].status, "RUMORED");
    assert_eq!(rows[0].kind, "PERMANENT");
    assert_eq!(rows[1].kind, "LOAN");
    assert_eq!(rows[2].date, "JUL 05, 2025");
}

#[test]
fn switching_view_keeps_the_same_records_in_order() {
    let dataset = fixture_dataset();
    let selection = Selection::new("epl", ViewMode::Timeline);
    let records = filter_for_selection(&dataset, &selection);

    let ViewBody::Timeline(cards) = render_view(&records, ViewMode::Timeline) else {
        panic!("expected timeline body");
    };
    let ViewBody::Scoreboard(rows) = render_view(&records, ViewMode::Scoreboard) else {
        panic!("expected scoreboard body");
    };
    let card_names: Vec<&str> = cards.iter().map(|c| c.player_name.as_str()).collect();
    let row_names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(card_names, row_names);
    assert_eq!(card_names.len(), records.len());
}

#[test]
fn league_without_entries_shows_no_results() {
    let dataset = fixture_dataset();
    for view in [ViewMode::Timeline, ViewMode::Scoreboard] {
        let selection = Selection::new("seriea", view);
        let records = filter_for_selection(&dataset, &selection);
        let screen = render_screen(&dataset, &selection, &records);
        assert_eq!(screen.count_label, "SHOWING 0 TRANSFERS");
        assert_eq!(screen.league_label, "SERIE A");
        let ViewBody::NoResults(panel) = &screen.body else {
            panic!("expected no-results body, got {:?}", screen.body);
        };
        assert_eq!(panel.title, "NO TRANSFERS FOUND");
        assert_eq!(screen.body.item_count(), 0);
    }
}

#[test]
fn unknown_league_has_blank_label() {
    let dataset = fixture_dataset();
    let selection = Selection::new("mls", ViewMode::Scoreboard);
    let records = filter_for_selection(&dataset, &selection);
    let screen = render_screen(&dataset, &selection, &records);
    assert_eq!(screen.league_label, "");
    assert_eq!(screen.count_label, "SHOWING 1 TRANSFERS");
    assert!(screen.leagues.iter().all(|l| !l.active));
}

#[test]
fn buttons_flag_the_active_selection() {
    let dataset = fixture_dataset();
    let mut selection = Selection::new("laliga", ViewMode::Timeline);
    selection.kind = TypeFilter::All;
    selection.status = StatusFilter::Only(TransferStatus::Rumored);
    let records = filter_for_selection(&dataset, &selection);
    let screen = render_screen(&dataset, &selection, &records);

    let active_leagues: Vec<&str> = screen
        .leagues
        .iter()
        .filter(|l| l.active)
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(active_leagues, ["laliga"]);
    assert_eq!(screen.leagues[1].short_name, "LALIGA");
    assert_eq!(screen.leagues[1].country, "Spain");

    let active_status: Vec<&str> = screen
        .status_filters
        .iter()
        .filter(|b| b.active)
        .map(|b| b.label)
        .collect();
    assert_eq!(active_status, ["RUMORED"]);
    assert!(screen.type_filters[0].active);
}

#[test]
fn render_output_serializes_with_layout_tag() {
    let dataset = fixture_dataset();
    let selection = Selection::new("epl", ViewMode::Scoreboard);
    let records = filter_for_selection(&dataset, &selection);
    let screen = render_screen(&dataset, &selection, &records);
    let json = serde_json::to_value(&screen).expect("render output should serialize");
    assert_eq!(json["view"], "scoreboard");
    assert_eq!(json["body"]["layout"], "scoreboard");
    assert_eq!(json["body"]["items"].as_array().map(Vec::len), Some(3));
}

#[test]
fn unrecognised_codes_render_generic_badges() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures/unknown_codes.json");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    let dataset = parse_dataset_json(&raw).expect("fixture should parse");
    let selection = Selection::new("laliga", ViewMode::Timeline);
    let records = filter_for_selection(&dataset, &selection);

    let ViewBody::Timeline(cards) = render_view(&records, ViewMode::Timeline) else {
        panic!("expected timeline body");
    };
    assert_eq!(cards[0].status.label, "CONFIRMED");
    assert_eq!(cards[0].status.icon, "info");
    assert_eq!(cards[0].status.tone, BadgeTone::Done);
    assert_eq!(cards[0].kind.label, "FREE AGENT");
    assert_eq!(cards[0].kind.icon, "info");
    assert_eq!(cards[0].kind.tone, BadgeTone::Primary);
    assert_eq!(cards[1].status.label, "PENDING");

    let ViewBody::Scoreboard(rows) = render_view(&records, ViewMode::Scoreboard) else {
        panic!("expected scoreboard body");
    };
    assert_eq!(rows[0].status, "CONFIRMED");
    assert_eq!(rows[0].kind, "FREE AGENT");
}
