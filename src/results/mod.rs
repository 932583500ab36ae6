//! Result state and lazy pagination.
//!
//! The full result set of the latest query is held here together with the
//! prefix of it that has been revealed. Batches of `page_size` records are
//! revealed on demand. Revealing a batch is paced: `load_batch` only
//! schedules the batch, and the next [`ResultState::tick`] at or after its
//! due time appends it. While a batch is scheduled further `load_batch`
//! calls are no-ops.
//!
//! The revealed prefix is stored as a length into the full set, so it is a
//! prefix of the full set by construction.

pub mod ui;

use std::time::{Duration, Instant};

use crate::data::GrantRecord;

/// Records revealed per batch.
pub const PAGE_SIZE: usize = 6;

/// Display pacing delay between scheduling and revealing a batch.
pub const BATCH_DELAY: Duration = Duration::from_millis(300);

/// Pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    /// Records revealed per batch.
    pub page_size: usize,
    /// Delay before a scheduled batch is revealed.
    pub batch_delay: Duration,
    /// Rows from the bottom of the content at which scrolling triggers a batch.
    pub scroll_threshold: u16,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            batch_delay: BATCH_DELAY,
            scroll_threshold: 4,
        }
    }
}

/// A batch waiting for its display delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingBatch {
    end: usize,
    due: Instant,
}

/// Outcome of a `load_batch` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A batch covering `start..end` was scheduled.
    Scheduled {
        /// First record of the batch.
        start: usize,
        /// One past the last record of the batch.
        end: usize,
    },
    /// A batch is already scheduled; nothing changed.
    Busy,
    /// Every record is already revealed; nothing changed.
    Exhausted,
    /// The result set is empty.
    NoResults,
}

/// Scroll geometry reported by the results view, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    /// Rows scrolled past the top of the content.
    pub offset: u16,
    /// Height of the visible area.
    pub viewport: u16,
    /// Total height of the rendered content.
    pub content: u16,
}

impl ScrollPosition {
    /// Check whether the viewport's bottom edge is within `threshold` rows of
    /// the content's bottom edge.
    pub fn near_bottom(&self, threshold: u16) -> bool {
        self.offset.saturating_add(self.viewport) >= self.content.saturating_sub(threshold)
    }
}

/// Current result set, revealed prefix and pagination cursor.
#[derive(Debug)]
pub struct ResultState {
    config: PagerConfig,
    full_set: Vec<GrantRecord>,
    rendered: usize,
    page_cursor: usize,
    pending: Option<PendingBatch>,
    /// Selected card (index into the revealed prefix).
    pub selected: usize,
    /// First visible card.
    pub scroll: usize,
    /// Rows available to the card list at the last draw.
    pub viewport_rows: u16,
}

impl ResultState {
    /// Create an empty result state.
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config,
            full_set: Vec::new(),
            rendered: 0,
            page_cursor: 0,
            pending: None,
            selected: 0,
            scroll: 0,
            viewport_rows: 0,
        }
    }

    /// Pagination settings.
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Replace the result set with a new query's records and reveal the first batch.
    ///
    /// Any scheduled batch for the previous set is dropped.
    pub fn replace(&mut self, records: Vec<GrantRecord>, now: Instant) -> LoadOutcome {
        self.full_set = records;
        self.rendered = 0;
        self.page_cursor = 0;
        self.pending = None;
        self.selected = 0;
        self.scroll = 0;

        if self.full_set.is_empty() {
            return LoadOutcome::NoResults;
        }
        self.load_batch(now)
    }

    /// Drop all results.
    pub fn clear(&mut self) {
        self.full_set.clear();
        self.rendered = 0;
        self.page_cursor = 0;
        self.pending = None;
        self.selected = 0;
        self.scroll = 0;
    }

    /// Schedule the next batch.
    pub fn load_batch(&mut self, now: Instant) -> LoadOutcome {
        if self.pending.is_some() {
            return LoadOutcome::Busy;
        }

        let start = self.page_cursor * self.config.page_size;
        if start >= self.full_set.len() {
            return if self.full_set.is_empty() {
                LoadOutcome::NoResults
            } else {
                LoadOutcome::Exhausted
            };
        }
        let end = (start + self.config.page_size).min(self.full_set.len());

        self.pending = Some(PendingBatch {
            end,
            due: now + self.config.batch_delay,
        });
        tracing::debug!("Scheduled batch {}..{}", start, end);

        LoadOutcome::Scheduled { start, end }
    }

    /// Reveal the scheduled batch if its delay has elapsed.
    ///
    /// Returns true when a batch was appended.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(batch) if batch.due <= now => {
                self.rendered = batch.end;
                self.page_cursor += 1;
                self.pending = None;
                true
            },
            _ => false,
        }
    }

    /// Check whether scrolling to `position` should reveal another batch.
    pub fn should_load_more(&self, position: ScrollPosition) -> bool {
        !self.is_loading()
            && !self.all_rendered()
            && position.near_bottom(self.config.scroll_threshold)
    }

    /// Whether a batch is scheduled.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of batches revealed.
    pub fn page_cursor(&self) -> usize {
        self.page_cursor
    }

    /// The complete result set.
    pub fn full_set(&self) -> &[GrantRecord] {
        &self.full_set
    }

    /// The revealed prefix of the result set.
    pub fn rendered(&self) -> &[GrantRecord] {
        &self.full_set[..self.rendered]
    }

    /// Whether the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.full_set.is_empty()
    }

    /// Whether every record has been revealed.
    pub fn all_rendered(&self) -> bool {
        self.rendered >= self.full_set.len()
    }

    /// The selected record, if any.
    pub fn selected_record(&self) -> Option<&GrantRecord> {
        self.rendered().get(self.selected)
    }

    /// Move the selection up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the selection down within the revealed prefix.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rendered {
            self.selected += 1;
        }
    }

    /// Move the selection by a page of visible cards.
    pub fn select_page_down(&mut self, cards: usize) {
        for _ in 0..cards.max(1) {
            self.select_next();
        }
    }

    /// Move the selection back by a page of visible cards.
    pub fn select_page_up(&mut self, cards: usize) {
        self.selected = self.selected.saturating_sub(cards.max(1));
    }

    /// Adjust scroll to keep the selected card visible.
    pub fn adjust_scroll(&mut self, visible_cards: usize) {
        if visible_cards == 0 {
            return;
        }

        if self.selected < self.scroll {
            self.scroll = self.selected;
        }

        if self.selected >= self.scroll + visible_cards {
            self.scroll = self.selected.saturating_sub(visible_cards - 1);
        }
    }

    /// Scroll geometry for cards of `card_height` rows.
    pub fn scroll_position(&self, card_height: u16) -> ScrollPosition {
        let rows = |cards: usize| u16::try_from(cards).unwrap_or(u16::MAX).saturating_mul(card_height);
        ScrollPosition {
            offset: rows(self.scroll),
            viewport: self.viewport_rows,
            content: rows(self.rendered),
        }
    }

    /// Results count line.
    pub fn summary(&self) -> String {
        let total = self.full_set.len();
        let plural = if total == 1 { "" } else { "s" };

        if total == 0 {
            "No grants found".to_string()
        } else if self.rendered >= total {
            format!("{} grant{} found", total, plural)
        } else {
            format!("Showing {} of {} grant{}", self.rendered, total, plural)
        }
    }
}

impl Default for ResultState {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_record;

    fn records(n: usize) -> Vec<GrantRecord> {
        (0..n)
            .map(|i| {
                test_record(
                    &format!("Sponsor {}", i),
                    "Program",
                    2024 - i as i32,
                    1000.0,
                    "desc",
                    &format!("ID-{}", i),
                )
            })
            .collect()
    }

    fn assert_prefix(state: &ResultState) {
        let n = state.rendered().len();
        assert!(n <= state.full_set().len());
        assert_eq!(state.rendered(), &state.full_set()[..n]);
    }

    #[test]
    fn test_replace_schedules_first_batch() {
        let now = Instant::now();
        let mut state = ResultState::default();

        assert_eq!(
            state.replace(records(14), now),
            LoadOutcome::Scheduled { start: 0, end: 6 }
        );
        assert!(state.is_loading());
        assert!(state.rendered().is_empty());

        // not yet due
        assert!(!state.tick(now + Duration::from_millis(299)));
        assert!(state.rendered().is_empty());

        assert!(state.tick(now + BATCH_DELAY));
        assert_eq!(state.rendered().len(), 6);
        assert_eq!(state.page_cursor(), 1);
        assert!(!state.is_loading());
        assert_eq!(state.summary(), "Showing 6 of 14 grants");
    }

    #[test]
    fn test_batches_until_exhausted() {
        let mut now = Instant::now();
        let mut state = ResultState::default();
        state.replace(records(14), now);

        let mut sizes = Vec::new();
        loop {
            now += BATCH_DELAY;
            let before = state.rendered().len();
            state.tick(now);
            sizes.push(state.rendered().len() - before);
            assert_prefix(&state);
            if state.load_batch(now) == LoadOutcome::Exhausted {
                break;
            }
        }

        assert_eq!(sizes, vec![6, 6, 2]);
        assert!(state.all_rendered());
        assert_eq!(state.page_cursor(), 3);
        assert_eq!(state.summary(), "14 grants found");
    }

    #[test]
    fn test_exhausted_load_is_idempotent() {
        let now = Instant::now();
        let mut state = ResultState::default();
        state.replace(records(3), now);
        state.tick(now + BATCH_DELAY);

        assert_eq!(state.rendered().len(), 3);
        assert_eq!(state.load_batch(now), LoadOutcome::Exhausted);
        assert!(!state.is_loading());
        assert_eq!(state.page_cursor(), 1);
        assert_eq!(state.rendered().len(), 3);
        assert_eq!(state.summary(), "3 grants found");
    }

    #[test]
    fn test_reentrant_load_appends_once() {
        let now = Instant::now();
        let mut state = ResultState::default();
        state.replace(records(20), now);
        state.tick(now + BATCH_DELAY);

        assert_eq!(
            state.load_batch(now),
            LoadOutcome::Scheduled { start: 6, end: 12 }
        );
        assert_eq!(state.load_batch(now), LoadOutcome::Busy);
        assert_eq!(state.load_batch(now), LoadOutcome::Busy);

        assert!(state.tick(now + BATCH_DELAY));
        assert!(!state.tick(now + BATCH_DELAY * 2));
        assert_eq!(state.rendered().len(), 12);
        assert_eq!(state.page_cursor(), 2);
    }

    #[test]
    fn test_empty_results_report_no_results() {
        let now = Instant::now();
        let mut state = ResultState::default();

        assert_eq!(state.replace(Vec::new(), now), LoadOutcome::NoResults);
        assert!(!state.is_loading());
        assert_eq!(state.load_batch(now), LoadOutcome::NoResults);
        assert_eq!(state.summary(), "No grants found");
    }

    #[test]
    fn test_replace_drops_pending_batch() {
        let now = Instant::now();
        let mut state = ResultState::default();
        state.replace(records(20), now);
        state.tick(now + BATCH_DELAY);
        state.load_batch(now + BATCH_DELAY);
        state.selected = 4;

        assert_eq!(
            state.replace(records(2), now),
            LoadOutcome::Scheduled { start: 0, end: 2 }
        );
        assert_eq!(state.page_cursor(), 0);
        assert_eq!(state.selected, 0);
        assert!(state.rendered().is_empty());

        state.tick(now + BATCH_DELAY);
        assert_eq!(state.rendered().len(), 2);
        assert_eq!(state.summary(), "2 grants found");
    }

    #[test]
    fn test_single_result_summary() {
        let now = Instant::now();
        let mut state = ResultState::default();
        state.replace(records(1), now);
        state.tick(now + BATCH_DELAY);
        assert_eq!(state.summary(), "1 grant found");
    }

    #[test]
    fn test_scroll_trigger() {
        let now = Instant::now();
        let mut state = ResultState::default();
        state.replace(records(20), now);
        state.tick(now + BATCH_DELAY);
        state.viewport_rows = 24;

        // 6 cards of 6 rows, viewing the first 24 rows
        assert!(!state.should_load_more(state.scroll_position(6)));

        state.scroll = 2;
        assert!(state.should_load_more(state.scroll_position(6)));

        state.load_batch(now);
        assert!(!state.should_load_more(state.scroll_position(6)));
    }

    #[test]
    fn test_near_bottom() {
        let pos = ScrollPosition {
            offset: 10,
            viewport: 20,
            content: 40,
        };
        assert!(!pos.near_bottom(5));
        assert!(pos.near_bottom(10));
        assert!(ScrollPosition::default().near_bottom(0));
    }

    #[test]
    fn test_selection_stays_in_rendered_prefix() {
        let now = Instant::now();
        let mut state = ResultState::default();
        state.replace(records(10), now);
        state.tick(now + BATCH_DELAY);

        state.select_page_down(100);
        assert_eq!(state.selected, 5);
        assert_eq!(state.selected_record().unwrap().opportunity_id, "ID-5");

        state.adjust_scroll(4);
        assert_eq!(state.scroll, 2);

        state.select_page_up(4);
        assert_eq!(state.selected, 1);
        state.adjust_scroll(4);
        assert_eq!(state.scroll, 1);
    }
}
