//! Cookie consent flag.
//!
//! The only persisted state: whether the visitor accepted, and when. A
//! missing or unreadable file means "not accepted".

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub accepted: bool,
    #[serde(default)]
    pub accepted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ConsentStore {
    path: PathBuf,
}

impl ConsentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.consent_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record, if any
    pub fn record(&self) -> Result<Option<ConsentRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Whether the banner should stay hidden
    pub fn is_accepted(&self) -> bool {
        match self.record() {
            Ok(record) => record.is_some_and(|r| r.accepted),
            Err(e) => {
                debug!("Ignoring unreadable consent file {}: {}", self.path.display(), e);
                false
            }
        }
    }

    pub fn accept(&self) -> Result<ConsentRecord> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = ConsentRecord {
            accepted: true,
            accepted_at: Some(Utc::now()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        info!("Consent recorded at {}", self.path.display());

        Ok(record)
    }

    /// Forget the stored decision. Returns whether anything was removed.
    pub fn reset(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_not_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConsentStore::new(dir.path().join("consent.json"));

        assert!(!store.is_accepted());
        assert_eq!(store.record().unwrap(), None);
    }

    #[test]
    fn test_accept_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("consent.json");
        let store = ConsentStore::new(&path);

        let record = store.accept().unwrap();
        assert!(record.accepted);
        assert!(record.accepted_at.is_some());

        let reopened = ConsentStore::new(&path);
        assert!(reopened.is_accepted());
        assert_eq!(reopened.record().unwrap(), Some(record));
    }

    #[test]
    fn test_reset() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConsentStore::new(dir.path().join("consent.json"));

        assert!(!store.reset().unwrap());
        store.accept().unwrap();
        assert!(store.reset().unwrap());
        assert!(!store.is_accepted());
    }

    #[test]
    fn test_corrupt_file_reads_as_not_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consent.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = ConsentStore::new(&path);
        assert!(store.record().is_err());
        assert!(!store.is_accepted());
    }

    #[test]
    fn test_legacy_record_without_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consent.json");
        std::fs::write(&path, r#"{"accepted": true}"#).unwrap();

        assert!(ConsentStore::new(&path).is_accepted());
    }
}
