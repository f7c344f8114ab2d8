//! Port for the external issue tracker collaborator.
//!
//! The tracker client owns fetching, authentication, caching and rate
//! limiting. The board only consumes the finished batch of candidates.

use crate::board::domain::TrackerCandidate;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Source of tracker candidates for a sync round.
#[async_trait]
pub trait TrackerSource: Send + Sync {
    /// Fetches the current batch of issues and pull requests.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the tracker cannot be reached. The board
    /// treats any failure as "no candidates this round".
    async fn fetch_candidates(&self) -> Result<Vec<TrackerCandidate>, TrackerError>;
}

/// Errors reported by tracker sources.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The tracker is unreachable or refused the request.
    #[error("tracker unavailable: {0}")]
    Unavailable(String),

    /// Any other client failure.
    #[error("tracker client error: {0}")]
    Client(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerError {
    /// Wraps a client error.
    pub fn client(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Client(Arc::new(err))
    }
}
