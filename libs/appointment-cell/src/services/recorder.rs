// libs/appointment-cell/src/services/recorder.rs
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use shared_config::AppConfig;

use crate::models::{AcceptedAppointment, AppointmentRecord, RecordId, StorageError};

const RECORD_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Build the record file name `<last>_<first>_<YYYYMMDDHHMMSS>.json`.
///
/// Two submissions by the same person within one second map to the same
/// name, and the later one replaces the earlier file.
pub fn record_file_name(last_name: &str, first_name: &str, at: NaiveDateTime) -> RecordId {
    RecordId::new(format!(
        "{}_{}_{}.json",
        file_name_component(last_name),
        file_name_component(first_name),
        at.format(RECORD_TIMESTAMP_FORMAT)
    ))
}

// Names must stay inside the storage directory
fn file_name_component(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Writes accepted appointments as pretty-printed JSON files, one per booking.
#[derive(Debug, Clone)]
pub struct AppointmentRecorder {
    storage_dir: PathBuf,
}

impl AppointmentRecorder {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.appointments_dir.clone())
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn record_path(&self, record_id: &RecordId) -> PathBuf {
        self.storage_dir.join(record_id.as_str())
    }

    pub fn record(&self, accepted: &AcceptedAppointment) -> Result<RecordId, StorageError> {
        self.record_at(accepted, Local::now().naive_local())
    }

    /// Persist `accepted` stamped with `now`.
    ///
    /// The JSON is written to a temporary file in the storage directory and
    /// renamed over the final path, so a failed write never leaves a partial
    /// record behind.
    #[instrument(skip(self, accepted))]
    pub fn record_at(
        &self,
        accepted: &AcceptedAppointment,
        now: NaiveDateTime,
    ) -> Result<RecordId, StorageError> {
        fs::create_dir_all(&self.storage_dir).map_err(|source| StorageError::CreateDirectory {
            path: self.storage_dir.clone(),
            source,
        })?;

        let record_id = record_file_name(accepted.last_name(), accepted.first_name(), now);
        let path = self.record_path(&record_id);

        let record = AppointmentRecord::new(accepted, now);
        let contents = serde_json::to_vec_pretty(&record)?;

        let write_error = |source: io::Error| StorageError::Write {
            path: path.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(&self.storage_dir).map_err(write_error)?;
        file.write_all(&contents).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(&path).map_err(|e| write_error(e.error))?;

        debug!("Stored appointment record {}", path.display());
        Ok(record_id)
    }
}
