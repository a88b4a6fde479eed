use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use shared_config::AppConfig;

/// Application config pointing at a throwaway storage directory.
///
/// The appointments directory itself is not created up front, so tests also
/// cover the recorder creating it on first write.
pub struct TestConfig {
    root: TempDir,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temporary test directory"),
        }
    }
}

impl TestConfig {
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn appointments_dir(&self) -> PathBuf {
        self.root.path().join("appointments")
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            appointments_dir: self.appointments_dir(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }

    /// JSON files currently in the appointments directory, sorted by name.
    pub fn stored_records(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.appointments_dir()) else {
            return Vec::new();
        };

        let mut records: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        records.sort();
        records
    }

    pub fn read_record(path: &Path) -> Value {
        let content = fs::read_to_string(path).expect("read stored record");
        serde_json::from_str(&content).expect("stored record is valid JSON")
    }
}
