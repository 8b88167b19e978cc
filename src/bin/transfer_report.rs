use anyhow::{Context, Result, anyhow};

use transfer_window::config::AppConfig;
use transfer_window::dataset::load_dataset;
use transfer_window::filter::filter_for_selection;
use transfer_window::render::{RenderedScreen, ViewBody, load_error_panel, render_screen};
use transfer_window::state::{
    ControlGroup, Selection, SelectionEvent, reduce, status_filter_label, type_filter_label,
};

struct Args {
    source: Option<String>,
    events: Vec<SelectionEvent>,
    json: bool,
}

fn main() -> Result<()> {
    let cfg = AppConfig::from_env();
    for warning in &cfg.warnings {
        eprintln!("{warning}");
    }
    let args = parse_args(std::env::args().skip(1))?;

    let source = args.source.unwrap_or_else(|| cfg.source.clone());
    let dataset = match load_dataset(&source, cfg.http_timeout_secs) {
        Ok(dataset) => dataset,
        Err(err) => {
            let panel = load_error_panel();
            eprintln!("{}: {}", panel.title, panel.subtitle);
            return Err(err).with_context(|| format!("loading transfers from {source}"));
        }
    };

    let selection = args.events.iter().fold(
        Selection::new(cfg.default_league.clone(), cfg.default_view),
        reduce,
    );
    let records = filter_for_selection(&dataset, &selection);
    let screen = render_screen(&dataset, &selection, &records);

    if args.json {
        let json = serde_json::to_string_pretty(&screen).context("serialize render output")?;
        println!("{json}");
    } else {
        print_screen(&screen, &selection);
    }
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        source: None,
        events: Vec::new(),
        json: false,
    };
    for arg in args {
        if arg == "--json" {
            parsed.json = true;
            continue;
        }
        let Some((flag, value)) = arg.split_once('=') else {
            return Err(anyhow!("unrecognised argument `{arg}` (expected --flag=value)"));
        };
        let group = match flag {
            "--source" => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    parsed.source = Some(trimmed.to_string());
                }
                continue;
            }
            "--league" => ControlGroup::League,
            "--status" => ControlGroup::Status,
            "--type" => ControlGroup::Type,
            "--view" => ControlGroup::View,
            other => return Err(anyhow!("unknown flag `{other}`")),
        };
        // League ids are case-sensitive keys; the other values are closed sets.
        let value = match group {
            ControlGroup::League => value.to_string(),
            _ => value.to_ascii_lowercase(),
        };
        let event = SelectionEvent::from_control(group, &value)
            .with_context(|| format!("invalid {flag}"))?;
        parsed.events.push(event);
    }
    Ok(parsed)
}

fn print_screen(screen: &RenderedScreen, selection: &Selection) {
    println!("{}", screen.league_label);
    println!(
        "{} (status: {}, type: {})",
        screen.count_label,
        status_filter_label(selection.status),
        type_filter_label(selection.kind)
    );
    println!();

    match &screen.body {
        ViewBody::NoResults(panel) => {
            println!("{}", panel.title);
            println!("{}", panel.subtitle);
        }
        ViewBody::Timeline(cards) => {
            for card in cards {
                println!(
                    "{} [{}] [{}]",
                    card.player_name, card.status.label, card.kind.label
                );
                println!("  {}", card.details);
                println!("  FROM {} -> TO {}", card.from_team, card.to_team);
                println!("  FEE {}  DATE {}", card.fee, card.date);
                println!();
            }
        }
        ViewBody::Scoreboard(rows) => {
            println!(
                "{:<24} {:<18} {:<18} {:<10} {:<10} {:<10} {}",
                "PLAYER", "FROM", "TO", "FEE", "STATUS", "TYPE", "DATE"
            );
            for r in rows {
                println!(
                    "{:<24} {:<18} {:<18} {:<10} {:<10} {:<10} {}",
                    r.player, r.from, r.to, r.fee, r.status, r.kind, r.date
                );
            }
        }
    }
}
