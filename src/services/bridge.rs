//! Outbound tabular records for the host data application.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::types::Result;

use super::daylength::DayLengthRecord;
use super::search::Location;

/// Location plus its date-indexed rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub location: Location,
    pub rows: Vec<DayLengthRecord>,
}

/// Host reply to a publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub rows_accepted: usize,
}

/// Host-plugin data bridge.
pub trait DataBridge {
    fn publish(&mut self, records: &RecordSet) -> Result<Acknowledgement>;
}

/// Publish through `bridge`, logging and swallowing failures.
pub fn publish_records(bridge: &mut dyn DataBridge, records: &RecordSet) -> Option<Acknowledgement> {
    match bridge.publish(records) {
        Ok(ack) => {
            log::info!("Published {} rows for {}", ack.rows_accepted, records.location.name);
            Some(ack)
        }
        Err(e) => {
            log::warn!("Publishing records for {} failed: {}", records.location.name, e);
            None
        }
    }
}

/// Writes each record set as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBridge {
    path: PathBuf,
}

impl JsonFileBridge {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataBridge for JsonFileBridge {
    fn publish(&mut self, records: &RecordSet) -> Result<Acknowledgement> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(Acknowledgement { rows_accepted: records.rows.len() })
    }
}
