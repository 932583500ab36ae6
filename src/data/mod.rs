//! Grant data model and query building.
//!
//! This module holds the record shape returned by the remote store, the
//! user's filter criteria, and the query builder that combines them.

mod filter;
mod query;
mod record;

pub use filter::{parse_funding_bound, FilterOption, FilterSelection};
pub use query::{GrantQuery, DEFAULT_RESULT_CAP};
pub use record::GrantRecord;

#[cfg(test)]
pub(crate) fn test_record(
    sponsor: &str,
    program: &str,
    fiscal_year: i32,
    funding: f64,
    description: &str,
    opportunity_id: &str,
) -> GrantRecord {
    GrantRecord {
        sponsor: sponsor.to_string(),
        program: program.to_string(),
        fiscal_year,
        funding,
        description: description.to_string(),
        opportunity_id: opportunity_id.to_string(),
    }
}
