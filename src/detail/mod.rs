//! Record detail overlay.

pub mod ui;

use crate::data::GrantRecord;

/// Detail overlay state.
#[derive(Debug, Default)]
pub struct DetailState {
    record: Option<GrantRecord>,
    /// Scroll offset of the description.
    pub scroll: u16,
}

impl DetailState {
    /// Create a closed overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a record.
    pub fn open(&mut self, record: GrantRecord) {
        self.record = Some(record);
        self.scroll = 0;
    }

    /// Hide the overlay.
    pub fn close(&mut self) {
        self.record = None;
    }

    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }

    /// The record on display.
    pub fn record(&self) -> Option<&GrantRecord> {
        self.record.as_ref()
    }

    /// Scroll down.
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Scroll up.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
