//! Interaction logging sink.
//!
//! Every user-initiated control interaction (slider release, checkbox toggle,
//! button press, drag completion) produces one [`InteractionRecord`].

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Parameters of one logged interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionParams {
    pub value: serde_json::Value,
    pub previous_value: serde_json::Value,
    pub duration_seconds: f64,
}

/// One logged interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub action: String,
    pub params: InteractionParams,
}

/// Destination for interaction records.
pub trait InteractionLog {
    fn log_action(&mut self, action: &str, params: InteractionParams);
}

/// Writes records through the `log` facade.
#[derive(Debug, Default)]
pub struct LogFacadeSink;

impl InteractionLog for LogFacadeSink {
    fn log_action(&mut self, action: &str, params: InteractionParams) {
        match serde_json::to_string(&params) {
            Ok(json) => log::info!("[interaction] {} {}", action, json),
            Err(e) => log::warn!("[interaction] {} (unserializable params: {})", action, e),
        }
    }
}

/// Keeps records in memory; clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Rc<RefCell<Vec<InteractionRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<InteractionRecord> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl InteractionLog for MemorySink {
    fn log_action(&mut self, action: &str, params: InteractionParams) {
        self.records.borrow_mut().push(InteractionRecord {
            action: action.to_string(),
            params,
        });
    }
}
