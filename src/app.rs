//! Application state and logic.
//!
//! [`App`] owns every piece of UI state and is the only thing that mutates
//! it. Remote work goes through the [`Dispatcher`]; its results are applied
//! in [`App::tick`], which the event loop calls once per frame.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;

use crate::data::GrantQuery;
use crate::detail::DetailState;
use crate::export::{self, EmailGate};
use crate::filters::FilterPanel;
use crate::prefs::PreferenceStore;
use crate::remote::{Dispatcher, RemoteEvent};
use crate::results::{LoadOutcome, PagerConfig, ResultState};
use crate::results::ui::CARD_HEIGHT;
use crate::search::{SearchInput, EMPTY_TERM_MESSAGE};
use crate::ui::Theme;

/// Which main view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Search prompt before any results.
    Initial,
    /// Result cards.
    Results,
}

/// Settings the application needs at runtime.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Pagination settings.
    pub pager: PagerConfig,
    /// Maximum records per search.
    pub result_cap: usize,
    /// Where exports are written.
    pub export_dir: PathBuf,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Runtime settings.
    pub settings: AppSettings,
    /// Remote call runner.
    pub dispatcher: Dispatcher,
    /// Search input.
    pub search: SearchInput,
    /// Current results and pagination.
    pub results: ResultState,
    /// Filter panel.
    pub filters: FilterPanel,
    /// Record detail overlay.
    pub detail: DetailState,
    /// Email gate in front of exports.
    pub gate: EmailGate,
    /// Persisted preferences.
    pub prefs: PreferenceStore,
    /// Current theme.
    pub theme: Theme,
    /// Main view.
    pub view: View,
    /// Term of the last query issued, blank included.
    pub active_term: String,
    /// Status message.
    pub status: String,
}

impl App {
    /// Create a new application instance.
    pub fn new(settings: AppSettings, dispatcher: Dispatcher, prefs: PreferenceStore) -> Self {
        let theme = Theme::from_dark_mode(prefs.dark_mode());
        Self {
            results: ResultState::new(settings.pager),
            settings,
            dispatcher,
            search: SearchInput::new(),
            filters: FilterPanel::new(),
            detail: DetailState::new(),
            gate: EmailGate::new(),
            prefs,
            theme,
            view: View::Initial,
            active_term: String::new(),
            status: "Ready".to_string(),
        }
    }

    /// Kick off startup work: populate filter options.
    pub fn start(&mut self) {
        self.filters.loading = true;
        self.dispatcher.load_filter_options();
        tracing::info!("Grantview initialized");
    }

    /// Whether a search or a batch is in progress.
    pub fn is_busy(&self) -> bool {
        self.dispatcher.search_pending() || self.results.is_loading()
    }

    /// Search with the term in the input and the current filters.
    ///
    /// A blank term is refused before anything is sent. Returns whether a
    /// search was issued.
    pub fn submit_search(&mut self) -> bool {
        let Some(term) = self.search.submit() else {
            self.status = EMPTY_TERM_MESSAGE.to_string();
            return false;
        };
        self.run_query(&term);
        true
    }

    /// Apply the filter panel with whatever term is in the input, blank included.
    pub fn apply_filters(&mut self) {
        let term = self.search.term().to_string();
        self.filters.close();
        self.run_query(&term);
    }

    fn run_query(&mut self, term: &str) {
        let query =
            GrantQuery::new(term, self.filters.selection()).with_cap(self.settings.result_cap);
        let id = self.dispatcher.search(query);
        tracing::debug!("Issued search {} for {:?}", id, term);

        self.active_term = term.trim().to_string();
        self.view = View::Results;
        self.status = "Searching...".to_string();
    }

    /// Open the filter panel and refresh its options.
    pub fn open_filters(&mut self) {
        self.filters.open();
        self.dispatcher.load_filter_options();
    }

    /// Apply finished remote calls and reveal due batches.
    pub fn tick(&mut self, now: Instant) {
        while let Some(event) = self.dispatcher.try_next() {
            self.handle_event(event, now);
        }

        if self.results.tick(now) {
            self.status = self.results.summary();
        }
    }

    /// Apply one finished remote call.
    pub fn handle_event(&mut self, event: RemoteEvent, now: Instant) {
        match event {
            RemoteEvent::Search { records, .. } => {
                match self.results.replace(records, now) {
                    LoadOutcome::NoResults => {
                        self.status = self.results.summary();
                    },
                    _ => {
                        self.status = "Loading...".to_string();
                    },
                }
            },
            RemoteEvent::FilterOptions {
                years, programs, ..
            } => {
                self.filters.set_options(years, programs);
            },
        }
    }

    /// Explicitly reveal the next batch.
    pub fn load_more(&mut self, now: Instant) {
        match self.results.load_batch(now) {
            LoadOutcome::Exhausted => self.status = self.results.summary(),
            LoadOutcome::Scheduled { .. } => self.status = "Loading more...".to_string(),
            LoadOutcome::Busy | LoadOutcome::NoResults => {},
        }
    }

    /// React to a scroll of the results view.
    pub fn on_scroll(&mut self, now: Instant) {
        let visible = usize::from(self.results.viewport_rows / CARD_HEIGHT);
        self.results.adjust_scroll(visible);

        if self.results.should_load_more(self.results.scroll_position(CARD_HEIGHT)) {
            self.load_more(now);
        }
    }

    /// Move the result selection down.
    pub fn select_next(&mut self, now: Instant) {
        self.results.select_next();
        self.on_scroll(now);
    }

    /// Move the result selection up.
    pub fn select_prev(&mut self, now: Instant) {
        self.results.select_prev();
        self.on_scroll(now);
    }

    /// Move the result selection down by a screen.
    pub fn page_down(&mut self, now: Instant) {
        let visible = usize::from(self.results.viewport_rows / CARD_HEIGHT);
        self.results.select_page_down(visible);
        self.on_scroll(now);
    }

    /// Move the result selection up by a screen.
    pub fn page_up(&mut self, now: Instant) {
        let visible = usize::from(self.results.viewport_rows / CARD_HEIGHT);
        self.results.select_page_up(visible);
        self.on_scroll(now);
    }

    /// Show the selected record in the detail overlay.
    pub fn open_detail(&mut self) {
        if let Some(record) = self.results.selected_record() {
            self.detail.open(record.clone());
        }
    }

    /// Begin an export of the complete result set.
    pub fn start_export(&mut self) {
        if self.results.is_empty() {
            self.status = "No grants to export. Please perform a search first.".to_string();
            return;
        }
        self.gate.open();
    }

    /// Submit the email gate and, if accepted, write the export.
    ///
    /// Returns the written file. The captured address is persisted in the
    /// background and its outcome never affects the export.
    pub fn submit_email(&mut self, today: NaiveDate) -> Option<PathBuf> {
        let email = match self.gate.submit() {
            Ok(email) => email,
            Err(rejection) => {
                self.status = rejection.message().to_string();
                return None;
            },
        };

        self.dispatcher.save_email(email);

        match export::write_export(&self.settings.export_dir, today, self.results.full_set()) {
            Ok(path) => {
                self.status = format!(
                    "Exported {} grants to {}",
                    self.results.full_set().len(),
                    path.display()
                );
                self.gate.close();
                Some(path)
            },
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.status = format!("Export failed: {}", e);
                None
            },
        }
    }

    /// Flip dark mode and persist it.
    pub fn toggle_dark_mode(&mut self) {
        let dark = self.prefs.toggle_dark_mode();
        self.theme = Theme::from_dark_mode(dark);
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Go back to the search prompt, clearing the input and filters.
    pub fn return_to_search(&mut self) {
        self.search.clear();
        self.filters.clear();
        self.view = View::Initial;
        self.status = "Ready".to_string();
    }

    /// Close the top-most overlay. Returns false when none was open.
    pub fn close_overlay(&mut self) -> bool {
        if self.gate.is_open() {
            self.gate.close();
        } else if self.filters.visible {
            self.filters.close();
        } else if self.detail.is_open() {
            self.detail.close();
        } else {
            return false;
        }
        true
    }
}
