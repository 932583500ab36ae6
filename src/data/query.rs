//! Query builder.
//!
//! A [`GrantQuery`] is the request description handed to a remote store. It
//! combines an optional free-text term with a [`FilterSelection`]: the term is
//! matched case-insensitively as a substring of any of the four text fields,
//! and every other criterion is combined conjunctively. Results are ordered by
//! fiscal year, newest first, and capped.

use super::{FilterSelection, GrantRecord};

/// Default maximum number of records returned by one query.
pub const DEFAULT_RESULT_CAP: usize = 1000;

/// A search request for the remote store.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantQuery {
    term: Option<String>,
    filters: FilterSelection,
    cap: usize,
}

impl GrantQuery {
    /// Build a query from a raw term and filter selection.
    ///
    /// The term is trimmed; a blank term imposes no text predicate.
    pub fn new(term: &str, filters: FilterSelection) -> Self {
        let trimmed = term.trim();
        Self {
            term: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            filters,
            cap: DEFAULT_RESULT_CAP,
        }
    }

    /// Override the result cap.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// The trimmed search term, if any.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// The structured filter criteria.
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Maximum number of records to return.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Check whether the query imposes any predicate at all.
    pub fn is_unfiltered(&self) -> bool {
        self.term.is_none() && self.filters.is_empty()
    }

    /// Evaluate the query's predicate against a single record.
    pub fn matches(&self, record: &GrantRecord) -> bool {
        if let Some(ref term) = self.term {
            let needle = term.to_lowercase();
            let hit = record
                .text_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        let filters = &self.filters;

        if !filters.years.is_empty() && !filters.years.contains(&record.fiscal_year) {
            return false;
        }

        if !filters.programs.is_empty() && !filters.programs.contains(&record.program) {
            return false;
        }

        if let Some(min) = filters.funding_min {
            if record.funding < min {
                return false;
            }
        }

        if let Some(max) = filters.funding_max {
            if record.funding > max {
                return false;
            }
        }

        true
    }

    /// Apply the query to an in-memory collection.
    ///
    /// Matching records are stably sorted by fiscal year descending and
    /// truncated to the cap.
    pub fn apply<'a, I>(&self, records: I) -> Vec<GrantRecord>
    where
        I: IntoIterator<Item = &'a GrantRecord>,
    {
        let mut hits: Vec<GrantRecord> = records
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.fiscal_year.cmp(&a.fiscal_year));
        hits.truncate(self.cap);
        hits
    }
}
