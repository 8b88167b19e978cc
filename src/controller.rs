use std::collections::VecDeque;

use crate::config::AppConfig;
use crate::dataset::{Dataset, LoadError, load_dataset};
use crate::filter::filter_for_selection;
use crate::render::{MessagePanel, RenderedScreen, load_error_panel, render_screen};
use crate::state::{Selection, SelectionEvent, reduce};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub enum LoadState {
    Loaded(Dataset),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Ready(RenderedScreen),
    LoadFailed(MessagePanel),
}

/// Single owner of the dataset, the selection and the console. Every accepted event
/// is reduced into a new selection and followed by a full re-render.
#[derive(Debug, Clone)]
pub struct Controller {
    load: LoadState,
    selection: Selection,
    screen: Screen,
    source: Option<String>,
    http_timeout_secs: u64,
    pub logs: VecDeque<String>,
}

impl Controller {
    pub fn new(cfg: &AppConfig) -> Self {
        let result = load_dataset(&cfg.source, cfg.http_timeout_secs);
        let mut controller = Self::from_load_result(
            result,
            Selection::new(cfg.default_league.clone(), cfg.default_view),
        );
        controller.source = Some(cfg.source.clone());
        controller.http_timeout_secs = cfg.http_timeout_secs;
        for warning in &cfg.warnings {
            controller.push_log(warning.clone());
        }
        controller
    }

    pub fn from_load_result(result: Result<Dataset, LoadError>, selection: Selection) -> Self {
        let mut controller = Self {
            load: LoadState::Failed,
            selection,
            screen: Screen::LoadFailed(load_error_panel()),
            source: None,
            http_timeout_secs: AppConfig::default().http_timeout_secs,
            logs: VecDeque::with_capacity(MAX_LOGS),
        };
        controller.accept_load(result);
        controller
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.load {
            LoadState::Loaded(dataset) => Some(dataset),
            LoadState::Failed => None,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn view(&self) -> &Screen {
        &self.screen
    }

    pub fn dispatch(&mut self, event: SelectionEvent) {
        let previous_league = self.selection.league.clone();
        self.selection = reduce(std::mem::take(&mut self.selection), &event);
        if self.selection.league != previous_league {
            let name = self
                .dataset()
                .and_then(|d| d.league(&self.selection.league))
                .map(|l| l.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.selection.league.clone());
            self.push_log(format!("[INFO] League: {name}"));
        }
        self.rerender();
    }

    /// 1-based shortcut to the n-th league in display order. Out of range is ignored.
    pub fn select_league_at(&mut self, shortcut: usize) {
        let Some(index) = shortcut.checked_sub(1) else {
            return;
        };
        let Some(id) = self
            .dataset()
            .and_then(|d| d.league_at(index))
            .map(|l| l.id.clone())
        else {
            return;
        };
        self.dispatch(SelectionEvent::SelectLeague(id));
    }

    pub fn select_next_league(&mut self) {
        self.step_league(true);
    }

    pub fn select_prev_league(&mut self) {
        self.step_league(false);
    }

    fn step_league(&mut self, forward: bool) {
        let Some(dataset) = self.dataset() else {
            return;
        };
        let total = dataset.leagues.len();
        if total == 0 {
            return;
        }
        let next = match dataset.league_position(&self.selection.league) {
            Some(pos) if forward => (pos + 1) % total,
            Some(0) => total - 1,
            Some(pos) => pos - 1,
            None => 0,
        };
        let id = dataset.leagues[next].id.clone();
        self.dispatch(SelectionEvent::SelectLeague(id));
    }

    /// User-requested reload from the configured source. Never called automatically.
    /// A controller built from an already-loaded result has no source and keeps its data.
    pub fn reload(&mut self) {
        let Some(source) = self.source.clone() else {
            self.push_log("[WARN] Reload skipped: no source configured");
            return;
        };
        self.push_log(format!("[INFO] Reloading {source}"));
        let result = load_dataset(&source, self.http_timeout_secs);
        self.accept_load(result);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn accept_load(&mut self, result: Result<Dataset, LoadError>) {
        match result {
            Ok(dataset) => {
                self.push_log(format!(
                    "[INFO] Loaded {} leagues, {} transfers",
                    dataset.leagues.len(),
                    dataset.transfer_count()
                ));
                self.load = LoadState::Loaded(dataset);
            }
            Err(err) => {
                self.push_log(format!("[ERROR] Error loading transfers data: {err}"));
                self.load = LoadState::Failed;
            }
        }
        self.rerender();
    }

    fn rerender(&mut self) {
        self.screen = match &self.load {
            LoadState::Loaded(dataset) => {
                let records = filter_for_selection(dataset, &self.selection);
                Screen::Ready(render_screen(dataset, &self.selection, &records))
            }
            LoadState::Failed => Screen::LoadFailed(load_error_panel()),
        };
    }
}
