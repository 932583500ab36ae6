//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::data::DEFAULT_RESULT_CAP;
use crate::error::{GrantviewError, Result};
use crate::prefs::default_prefs_path;
use crate::results::{PagerConfig, BATCH_DELAY, PAGE_SIZE};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "grantview")]
#[command(about = "A terminal-based search and export client for FTA grant records", long_about = None)]
pub struct Config {
    /// Base URL of the hosted database project
    #[arg(long, env = "GRANTVIEW_URL")]
    pub url: Option<String>,

    /// API key for the hosted database project
    #[arg(long, env = "GRANTVIEW_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Browse a local JSON file of grant records instead of the hosted database
    #[arg(long, conflicts_with_all = ["url", "key"])]
    pub data: Option<PathBuf>,

    /// Directory exported CSV files are written to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Preferences file (defaults to the user config directory)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Records revealed per batch
    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: usize,

    /// Display delay before a batch is revealed, in milliseconds
    #[arg(long, default_value_t = BATCH_DELAY.as_millis() as u64)]
    pub batch_delay_ms: u64,

    /// Maximum number of records returned by one search
    #[arg(long, default_value_t = DEFAULT_RESULT_CAP)]
    pub result_cap: usize,

    /// Rows from the bottom of the results at which scrolling loads more
    #[arg(long, default_value_t = 4)]
    pub scroll_threshold: u16,
}

/// Where grant records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A hosted PostgREST endpoint.
    Remote {
        /// Project base URL.
        url: String,
        /// API key.
        key: String,
    },
    /// A local JSON file.
    File(PathBuf),
}

impl Config {
    /// Resolve the data source, requiring either a data file or both URL and key.
    pub fn source(&self) -> Result<DataSource> {
        if let Some(ref path) = self.data {
            return Ok(DataSource::File(path.clone()));
        }

        match (&self.url, &self.key) {
            (Some(url), Some(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
                Ok(DataSource::Remote {
                    url: url.trim().to_string(),
                    key: key.trim().to_string(),
                })
            },
            (Some(_), _) => Err(GrantviewError::config(
                "missing API key (use --key or GRANTVIEW_KEY)",
            )),
            (None, Some(_)) => Err(GrantviewError::config(
                "missing database URL (use --url or GRANTVIEW_URL)",
            )),
            (None, None) => Err(GrantviewError::config(
                "no data source: pass --data <FILE> or --url and --key",
            )),
        }
    }

    /// Validate settings that clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GrantviewError::config("--page-size must be at least 1"));
        }
        if self.result_cap == 0 {
            return Err(GrantviewError::config("--result-cap must be at least 1"));
        }
        if !self.export_dir.is_dir() {
            return Err(GrantviewError::config(format!(
                "export directory not found: {}",
                self.export_dir.display()
            )));
        }
        Ok(())
    }

    /// Pagination settings.
    pub fn pager(&self) -> PagerConfig {
        PagerConfig {
            page_size: self.page_size,
            batch_delay: Duration::from_millis(self.batch_delay_ms),
            scroll_threshold: self.scroll_threshold,
        }
    }

    /// Preferences file location.
    pub fn prefs_path(&self) -> Option<PathBuf> {
        self.prefs.clone().or_else(default_prefs_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["grantview"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--data", "grants.json"]);
        assert_eq!(config.pager(), PagerConfig::default());
        assert_eq!(config.result_cap, 1000);
        assert_eq!(config.source().unwrap(), DataSource::File("grants.json".into()));
    }

    #[test]
    fn test_remote_source() {
        let config = parse(&["--url", "https://x.supabase.co", "--key", "k"]);
        assert_eq!(
            config.source().unwrap(),
            DataSource::Remote {
                url: "https://x.supabase.co".to_string(),
                key: "k".to_string()
            }
        );
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let config = Config {
            key: None,
            ..parse(&["--url", "https://x.supabase.co", "--key", "k"])
        };
        assert!(config.source().is_err());
    }

    #[test]
    fn test_data_conflicts_with_url() {
        assert!(Config::try_parse_from(["grantview", "--data", "a.json", "--url", "u"]).is_err());
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();

        let config = parse(&["--data", "a.json", "--export-dir", dir_arg]);
        assert!(config.validate().is_ok());

        let config = parse(&["--data", "a.json", "--export-dir", dir_arg, "--page-size", "0"]);
        assert!(config.validate().is_err());

        let missing = dir.path().join("missing");
        let config = parse(&["--data", "a.json", "--export-dir", missing.to_str().unwrap()]);
        assert!(config.validate().is_err());
    }
}
