//! Background execution of remote calls.
//!
//! The UI loop is the only owner of application state. Remote calls run as
//! tokio tasks and report back through a channel the loop drains once per
//! tick. Each search and each filter-option fetch is tagged with a
//! monotonically increasing [`RequestId`]; when a response arrives for a
//! request that is no longer the latest of its kind it is dropped, so the
//! last request issued wins regardless of arrival order.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::{Backend, EmailSink, GrantSource};
use crate::data::{GrantQuery, GrantRecord};

/// Monotonic tag attached to an outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completed remote call, with failures already degraded to fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteEvent {
    /// Search results; empty when the call failed.
    Search {
        /// Request this answers.
        id: RequestId,
        /// Matching records in store order.
        records: Vec<GrantRecord>,
    },
    /// Distinct filter values; both empty when either call failed.
    FilterOptions {
        /// Request this answers.
        id: RequestId,
        /// Distinct fiscal years.
        years: Vec<i32>,
        /// Distinct program names.
        programs: Vec<String>,
    },
}

impl RemoteEvent {
    /// Request this event answers.
    pub fn id(&self) -> RequestId {
        match self {
            RemoteEvent::Search { id, .. } | RemoteEvent::FilterOptions { id, .. } => *id,
        }
    }
}

/// Runs remote calls on a tokio runtime and collects their results.
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    handle: Handle,
    tx: UnboundedSender<RemoteEvent>,
    rx: UnboundedReceiver<RemoteEvent>,
    next_id: u64,
    latest_search: Option<RequestId>,
    latest_options: Option<RequestId>,
    saves: Vec<JoinHandle<()>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("next_id", &self.next_id)
            .field("latest_search", &self.latest_search)
            .field("latest_options", &self.latest_options)
            .field("saves", &self.saves.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher spawning onto the runtime behind `handle`.
    pub fn new(backend: Arc<dyn Backend>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend,
            handle,
            tx,
            rx,
            next_id: 0,
            latest_search: None,
            latest_options: None,
            saves: Vec::new(),
        }
    }

    fn issue(&mut self) -> RequestId {
        self.next_id += 1;
        RequestId(self.next_id)
    }

    /// Start a search. Any earlier outstanding search becomes stale.
    pub fn search(&mut self, query: GrantQuery) -> RequestId {
        let id = self.issue();
        self.latest_search = Some(id);

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            tracing::info!("Searching grants {}", id);
            let records = match backend.search(&query).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("Error loading grants: {}", e);
                    Vec::new()
                },
            };
            let _ = tx.send(RemoteEvent::Search { id, records });
        });

        id
    }

    /// Start fetching the distinct years and programs.
    pub fn load_filter_options(&mut self) -> RequestId {
        let id = self.issue();
        self.latest_options = Some(id);

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let (years, programs) =
                tokio::join!(backend.distinct_years(), backend.distinct_programs());
            let (years, programs) = match (years, programs) {
                (Ok(years), Ok(programs)) => {
                    tracing::info!(
                        "Loaded {} years and {} programs for filters",
                        years.len(),
                        programs.len()
                    );
                    (years, programs)
                },
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Error loading filter options: {}", e);
                    (Vec::new(), Vec::new())
                },
            };
            let _ = tx.send(RemoteEvent::FilterOptions {
                id,
                years,
                programs,
            });
        });

        id
    }

    /// Persist a captured address without waiting for the outcome.
    ///
    /// The save is tracked until it finishes so [`Dispatcher::flush_saves`]
    /// can let it complete before shutdown. Failures are only logged.
    pub fn save_email(&mut self, email: String) {
        let backend = Arc::clone(&self.backend);
        let handle = self.handle.spawn(async move {
            match backend.save_email(&email).await {
                Ok(()) => tracing::info!("Email saved successfully: {}", email),
                Err(e) => tracing::error!("Error saving email: {}", e),
            }
        });

        self.saves.retain(|save| !save.is_finished());
        self.saves.push(handle);
    }

    /// Number of email saves that have not finished.
    pub fn pending_saves(&self) -> usize {
        self.saves.iter().filter(|save| !save.is_finished()).count()
    }

    /// Wait up to `limit` for outstanding email saves.
    ///
    /// Saves still running at the deadline are logged and abandoned.
    pub async fn flush_saves(&mut self, limit: Duration) {
        let deadline = tokio::time::Instant::now() + limit;
        for save in self.saves.drain(..) {
            match tokio::time::timeout_at(deadline, save).await {
                Ok(Ok(())) => {},
                Ok(Err(e)) => tracing::error!("Email save task failed: {}", e),
                Err(_) => tracing::warn!("Email save still pending at shutdown, abandoning it"),
            }
        }
    }

    /// Check whether a search is still awaiting its response.
    pub fn search_pending(&self) -> bool {
        self.latest_search.is_some()
    }

    /// Take the next fresh event, if one has arrived.
    pub fn try_next(&mut self) -> Option<RemoteEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if let Some(event) = self.accept(event) {
                        return Some(event);
                    }
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Wait for the next fresh event.
    pub async fn next(&mut self) -> Option<RemoteEvent> {
        while let Some(event) = self.rx.recv().await {
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
        None
    }

    fn accept(&mut self, event: RemoteEvent) -> Option<RemoteEvent> {
        let latest = match event {
            RemoteEvent::Search { .. } => &mut self.latest_search,
            RemoteEvent::FilterOptions { .. } => &mut self.latest_options,
        };

        if *latest != Some(event.id()) {
            tracing::debug!("Discarding stale response {}", event.id());
            return None;
        }

        *latest = None;
        Some(event)
    }
}
