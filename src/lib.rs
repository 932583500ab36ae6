//! Grantview - A fast, terminal-based search and export client for FTA grant records.
//!
//! Grantview queries a hosted database of Federal Transit Administration
//! grant awards and presents the matches as cards that are revealed in
//! batches while you scroll. Results can be narrowed with fiscal year,
//! program and funding filters, and the complete result set can be exported
//! to CSV once an email address has been captured.
//!
//! # Features
//!
//! - Case-insensitive search over sponsor, program, description and opportunity ID
//! - Year, program and funding range filters fetched from the store
//! - Batched, scroll-triggered rendering of results
//! - Email-gated CSV export of the full result set
//! - Persisted light/dark theme
//!
//! # Example
//!
//! ```ignore
//! use grantview::data::{FilterSelection, GrantQuery};
//! use grantview::remote::{GrantSource, MemoryStore};
//! use std::path::Path;
//!
//! let store = MemoryStore::from_file(Path::new("grants.json"))?;
//! let query = GrantQuery::new("bus", FilterSelection::default());
//! let records = store.search(&query).await?;
//! println!("{} grants found", records.len());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod data;
pub mod detail;
pub mod error;
pub mod export;
pub mod filters;
pub mod prefs;
pub mod remote;
pub mod results;
pub mod search;
pub mod ui;

pub use error::{GrantviewError, Result};
