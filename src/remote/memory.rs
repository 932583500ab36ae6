//! In-process store backed by a vector of records.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{EmailSink, GrantSource};
use crate::data::{GrantQuery, GrantRecord};
use crate::error::{GrantviewError, Result};

/// A store that evaluates queries directly against records held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<GrantRecord>,
    emails: Mutex<Vec<String>>,
    offline: bool,
}

impl MemoryStore {
    /// Create a store over the given records.
    pub fn new(records: Vec<GrantRecord>) -> Self {
        Self {
            records,
            emails: Mutex::new(Vec::new()),
            offline: false,
        }
    }

    /// Load records from a JSON array file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| GrantviewError::data_file(path.to_path_buf(), e))?;
        let records: Vec<GrantRecord> = serde_json::from_str(&text)
            .map_err(|e| GrantviewError::data_file(path.to_path_buf(), e))?;

        tracing::info!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    /// Make every call fail, simulating an unreachable store.
    #[cfg(test)]
    pub(crate) fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Addresses captured so far.
    pub fn emails(&self) -> Vec<String> {
        self.emails
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(GrantviewError::remote_status(503, "store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl GrantSource for MemoryStore {
    async fn search(&self, query: &GrantQuery) -> Result<Vec<GrantRecord>> {
        self.check_online()?;
        Ok(query.apply(&self.records))
    }

    async fn distinct_years(&self) -> Result<Vec<i32>> {
        self.check_online()?;
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.fiscal_year).collect();
        Ok(years.into_iter().rev().collect())
    }

    async fn distinct_programs(&self) -> Result<Vec<String>> {
        self.check_online()?;
        let programs: BTreeSet<&str> = self.records.iter().map(|r| r.program.as_str()).collect();
        Ok(programs.into_iter().map(str::to_string).collect())
    }
}

#[async_trait]
impl EmailSink for MemoryStore {
    async fn save_email(&self, email: &str) -> Result<()> {
        self.check_online()?;
        let mut list = self
            .emails
            .lock()
            .map_err(|_| GrantviewError::state("email list lock poisoned"))?;
        list.push(email.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{test_record, FilterSelection};
    use std::io::Write;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            test_record("Metro", "Bus Program", 2022, 10.0, "buses", "A"),
            test_record("Harbor", "Ferry Grant", 2024, 20.0, "dock", "B"),
            test_record("Omaha", "Bus Program", 2024, 30.0, "depot", "C"),
        ])
    }

    #[tokio::test]
    async fn test_distinct_values() {
        let store = store();
        assert_eq!(store.distinct_years().await.unwrap(), vec![2024, 2022]);
        assert_eq!(
            store.distinct_programs().await.unwrap(),
            vec!["Bus Program".to_string(), "Ferry Grant".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_orders_newest_first() {
        let store = store();
        let query = GrantQuery::new("", FilterSelection::default());
        let ids: Vec<String> = store
            .search(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.opportunity_id)
            .collect();
        assert_eq!(ids, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = store().offline();
        let query = GrantQuery::new("bus", FilterSelection::default());
        assert!(store.search(&query).await.is_err());
        assert!(store.distinct_years().await.is_err());
        assert!(store.save_email("a@b.co").await.is_err());
        assert!(store.emails().is_empty());
    }

    #[tokio::test]
    async fn test_save_email_appends() {
        let store = store();
        store.save_email("one@example.com").await.unwrap();
        store.save_email("two@example.com").await.unwrap();
        assert_eq!(store.emails(), vec!["one@example.com", "two@example.com"]);
    }

    #[tokio::test]
    async fn test_poisoned_email_list_is_a_state_error() {
        let store = std::sync::Arc::new(store());
        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.emails.lock().unwrap();
            panic!("poison the email list");
        })
        .join();

        let err = store.save_email("a@b.co").await.unwrap_err();
        assert!(matches!(err, GrantviewError::State(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"project_sponsor": "Metro", "grant_program": "Bus", "fiscal_year": 2020,
                "funding": "15.5", "project_description": "d", "opportunity_id": "Z"}}]"#
        )
        .unwrap();

        let store = MemoryStore::from_file(file.path()).unwrap();
        assert_eq!(store.records.len(), 1);
        assert_eq!(store.records[0].funding, 15.5);
    }

    #[test]
    fn test_from_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = MemoryStore::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GrantviewError::DataFile { .. }));
    }
}
