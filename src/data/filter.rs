//! Structured filter criteria.

use std::collections::BTreeSet;
use std::fmt;

/// The user's structured filter criteria.
///
/// Built fresh from the filter panel on each query and never persisted.
/// Empty sets and absent bounds impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    /// Fiscal years a record must belong to.
    pub years: BTreeSet<i32>,
    /// Program names a record must belong to.
    pub programs: BTreeSet<String>,
    /// Inclusive lower funding bound.
    pub funding_min: Option<f64>,
    /// Inclusive upper funding bound.
    pub funding_max: Option<f64>,
}

impl FilterSelection {
    /// Check whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.programs.is_empty()
            && self.funding_min.is_none()
            && self.funding_max.is_none()
    }

    /// Number of active criteria, counting each selected value.
    pub fn active_count(&self) -> usize {
        self.years.len()
            + self.programs.len()
            + usize::from(self.funding_min.is_some())
            + usize::from(self.funding_max.is_some())
    }
}

/// A selectable filter value, tagged by the column it constrains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterOption {
    /// A fiscal year.
    Year(i32),
    /// A grant program name.
    Program(String),
}

impl FilterOption {
    /// Short label for the option kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterOption::Year(_) => "year",
            FilterOption::Program(_) => "program",
        }
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOption::Year(year) => write!(f, "{}", year),
            FilterOption::Program(name) => f.write_str(name),
        }
    }
}

/// Parse a funding bound typed by the user.
///
/// Empty or non-numeric input means "no bound".
pub fn parse_funding_bound(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
