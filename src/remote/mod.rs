//! Remote store collaborators.
//!
//! Grant records, distinct filter values and captured email addresses all
//! live in a remote managed database. This module defines the seams the
//! application talks through ([`GrantSource`], [`EmailSink`]), a REST
//! implementation for a PostgREST endpoint, an in-process implementation
//! used for offline data files and tests, and the dispatcher that runs calls
//! as background tasks and reports back to the UI loop.

mod dispatch;
mod memory;
mod rest;

pub use dispatch::{Dispatcher, RemoteEvent, RequestId};
pub use memory::MemoryStore;
pub use rest::RestClient;

use async_trait::async_trait;

use crate::data::{GrantQuery, GrantRecord};
use crate::error::Result;

/// Read access to grant records.
#[async_trait]
pub trait GrantSource: Send + Sync {
    /// Run a search and return matching records in store order.
    async fn search(&self, query: &GrantQuery) -> Result<Vec<GrantRecord>>;

    /// Every distinct fiscal year in the store.
    async fn distinct_years(&self) -> Result<Vec<i32>>;

    /// Every distinct program name in the store.
    async fn distinct_programs(&self) -> Result<Vec<String>>;
}

/// Append-only store of captured email addresses.
#[async_trait]
pub trait EmailSink: Send + Sync {
    /// Persist one address.
    async fn save_email(&self, email: &str) -> Result<()>;
}

/// A backend that provides both seams.
pub trait Backend: GrantSource + EmailSink {}

impl<T: GrantSource + EmailSink> Backend for T {}
