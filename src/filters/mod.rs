//! Filter panel - selectable options and funding bounds.
//!
//! Options are fetched from the remote store each time the panel opens and
//! replace whatever was shown before. Each option is a tagged
//! [`FilterOption`], so a selected pill carries its own value type.

pub mod ui;

use crate::data::{parse_funding_bound, FilterOption, FilterSelection};

/// A selectable option and whether it is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPill {
    /// The option value.
    pub option: FilterOption,
    /// Whether the pill is active.
    pub selected: bool,
}

impl FilterPill {
    fn new(option: FilterOption) -> Self {
        Self {
            option,
            selected: false,
        }
    }
}

/// Control with keyboard focus in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterFocus {
    /// Fiscal year pills.
    #[default]
    Years,
    /// Program pills.
    Programs,
    /// Minimum funding input.
    FundingMin,
    /// Maximum funding input.
    FundingMax,
}

impl FilterFocus {
    /// Get the next control in the cycle.
    pub fn next(self) -> Self {
        match self {
            FilterFocus::Years => FilterFocus::Programs,
            FilterFocus::Programs => FilterFocus::FundingMin,
            FilterFocus::FundingMin => FilterFocus::FundingMax,
            FilterFocus::FundingMax => FilterFocus::Years,
        }
    }
}

/// Filter panel state.
#[derive(Debug, Default)]
pub struct FilterPanel {
    /// Whether the panel is open.
    pub visible: bool,
    /// Whether options are being fetched.
    pub loading: bool,
    /// Focused control.
    pub focus: FilterFocus,
    years: Vec<FilterPill>,
    programs: Vec<FilterPill>,
    year_cursor: usize,
    program_cursor: usize,
    /// Minimum funding input text.
    pub funding_min: String,
    /// Maximum funding input text.
    pub funding_max: String,
}

impl FilterPanel {
    /// Create an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the panel and mark options as loading.
    pub fn open(&mut self) {
        self.visible = true;
        self.loading = true;
    }

    /// Close the panel, keeping selections.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Replace all options with freshly fetched ones.
    pub fn set_options(&mut self, years: Vec<i32>, programs: Vec<String>) {
        self.years = years
            .into_iter()
            .map(|y| FilterPill::new(FilterOption::Year(y)))
            .collect();
        self.programs = programs
            .into_iter()
            .map(|p| FilterPill::new(FilterOption::Program(p)))
            .collect();
        self.year_cursor = 0;
        self.program_cursor = 0;
        self.loading = false;
    }

    /// Year pills.
    pub fn years(&self) -> &[FilterPill] {
        &self.years
    }

    /// Program pills.
    pub fn programs(&self) -> &[FilterPill] {
        &self.programs
    }

    /// Index of the highlighted pill in the focused list.
    pub fn cursor(&self) -> usize {
        match self.focus {
            FilterFocus::Programs => self.program_cursor,
            _ => self.year_cursor,
        }
    }

    /// Highlighted year pill index.
    pub fn year_cursor(&self) -> usize {
        self.year_cursor
    }

    /// Highlighted program pill index.
    pub fn program_cursor(&self) -> usize {
        self.program_cursor
    }

    fn focused_list(&mut self) -> Option<(&mut Vec<FilterPill>, &mut usize)> {
        match self.focus {
            FilterFocus::Years => Some((&mut self.years, &mut self.year_cursor)),
            FilterFocus::Programs => Some((&mut self.programs, &mut self.program_cursor)),
            FilterFocus::FundingMin | FilterFocus::FundingMax => None,
        }
    }

    /// Move focus to the next control.
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Highlight the previous pill in the focused list.
    pub fn cursor_prev(&mut self) {
        if let Some((_, cursor)) = self.focused_list() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Highlight the next pill in the focused list.
    pub fn cursor_next(&mut self) {
        if let Some((pills, cursor)) = self.focused_list() {
            if *cursor + 1 < pills.len() {
                *cursor += 1;
            }
        }
    }

    /// Toggle the highlighted pill.
    pub fn toggle_current(&mut self) {
        if let Some((pills, cursor)) = self.focused_list() {
            if let Some(pill) = pills.get_mut(*cursor) {
                pill.selected = !pill.selected;
            }
        }
    }

    /// Type into the focused funding input. Only digits and a decimal point are accepted.
    pub fn input(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        match self.focus {
            FilterFocus::FundingMin => self.funding_min.push(c),
            FilterFocus::FundingMax => self.funding_max.push(c),
            _ => {},
        }
    }

    /// Delete from the focused funding input.
    pub fn backspace(&mut self) {
        match self.focus {
            FilterFocus::FundingMin => {
                self.funding_min.pop();
            },
            FilterFocus::FundingMax => {
                self.funding_max.pop();
            },
            _ => {},
        }
    }

    /// Whether a funding input has focus.
    pub fn editing_funding(&self) -> bool {
        matches!(self.focus, FilterFocus::FundingMin | FilterFocus::FundingMax)
    }

    /// Deselect every pill and empty the funding inputs.
    pub fn clear(&mut self) {
        for pill in self.years.iter_mut().chain(self.programs.iter_mut()) {
            pill.selected = false;
        }
        self.funding_min.clear();
        self.funding_max.clear();
    }

    /// Build the filter criteria from the current control state.
    pub fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection {
            funding_min: parse_funding_bound(&self.funding_min),
            funding_max: parse_funding_bound(&self.funding_max),
            ..FilterSelection::default()
        };

        for pill in self.years.iter().chain(&self.programs) {
            if !pill.selected {
                continue;
            }
            match &pill.option {
                FilterOption::Year(year) => {
                    selection.years.insert(*year);
                },
                FilterOption::Program(name) => {
                    selection.programs.insert(name.clone());
                },
            }
        }

        selection
    }
}
