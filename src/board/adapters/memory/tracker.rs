//! In-memory tracker source serving a preset batch.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::TrackerCandidate,
    ports::{TrackerError, TrackerSource},
};

/// Tracker source that returns whatever batch or failure it was given.
#[derive(Debug, Clone)]
pub struct InMemoryTrackerSource {
    response: Arc<RwLock<Result<Vec<TrackerCandidate>, TrackerError>>>,
}

impl Default for InMemoryTrackerSource {
    fn default() -> Self {
        Self {
            response: Arc::new(RwLock::new(Ok(Vec::new()))),
        }
    }
}

impl InMemoryTrackerSource {
    /// Creates a source serving the given batch.
    #[must_use]
    pub fn new(candidates: Vec<TrackerCandidate>) -> Self {
        Self {
            response: Arc::new(RwLock::new(Ok(candidates))),
        }
    }

    /// Replaces the batch served by later fetches.
    pub fn set_candidates(&self, candidates: Vec<TrackerCandidate>) {
        self.set_response(Ok(candidates));
    }

    /// Makes later fetches fail with `error`.
    pub fn fail_with(&self, error: TrackerError) {
        self.set_response(Err(error));
    }

    fn set_response(&self, response: Result<Vec<TrackerCandidate>, TrackerError>) {
        match self.response.write() {
            Ok(mut guard) => *guard = response,
            Err(poisoned) => *poisoned.into_inner() = response,
        }
    }
}

#[async_trait]
impl TrackerSource for InMemoryTrackerSource {
    async fn fetch_candidates(&self) -> Result<Vec<TrackerCandidate>, TrackerError> {
        let response = self
            .response
            .read()
            .map_err(|err| TrackerError::Unavailable(err.to_string()))?;
        response.clone()
    }
}
