//! Place-name lookup through an external geocoder.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::core::types::Result;

use super::sequencer::RequestSequencer;

/// A named point on the globe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f32,
    pub longitude: f32,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f32, longitude: f32) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}

/// Geocoding collaborator.
pub trait Geocoder: Send + Sync + 'static {
    /// Candidates matching a partial place name.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Location>>> + Send;
}

/// Outcome of one [`LocationSearch::search`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Newest completed request; the candidate list may be empty.
    Candidates(Vec<Location>),
    /// A newer search finished first; this result was dropped.
    Superseded,
}

/// Location search with failure tolerance and stale-response discard.
///
/// Several searches may be in flight at once (one per keystroke); only a
/// completion newer than the last applied one updates [`current`](Self::current).
pub struct LocationSearch<G: Geocoder> {
    geocoder: Arc<G>,
    sequencer: Mutex<RequestSequencer>,
    current: Mutex<Vec<Location>>,
}

impl<G: Geocoder> LocationSearch<G> {
    pub fn new(geocoder: Arc<G>) -> Self {
        Self {
            geocoder,
            sequencer: Mutex::new(RequestSequencer::new()),
            current: Mutex::new(Vec::new()),
        }
    }

    pub async fn search(&self, query: &str) -> SearchOutcome {
        let id = self.sequencer.lock().await.begin();
        let query = query.trim();
        let candidates = if query.is_empty() {
            Vec::new()
        } else {
            match self.geocoder.search(query).await {
                Ok(found) => found,
                Err(e) => {
                    log::warn!("Location search for {:?} failed: {}", query, e);
                    Vec::new()
                }
            }
        };

        if !self.sequencer.lock().await.accept(id) {
            log::debug!("Discarding stale search result for {:?}", query);
            return SearchOutcome::Superseded;
        }
        *self.current.lock().await = candidates.clone();
        SearchOutcome::Candidates(candidates)
    }

    /// Candidates of the newest applied search.
    pub async fn current(&self) -> Vec<Location> {
        self.current.lock().await.clone()
    }
}
