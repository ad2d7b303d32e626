//! Unified error handling for feed resolution and reconciliation.

/// Error type covering request validation, feed resolution, and remote
/// store failures.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The requested feed id or name does not resolve to a feed.
    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    /// More than one feed shares the requested name.
    #[error("More than one feed named '{0}'")]
    AmbiguousName(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure reported by the remote store; never retried internally.
    #[error("Remote store error: {0}")]
    Remote(#[from] anyhow::Error),

    /// The target feed cannot take the input without exceeding its report
    /// capacity. Raised only under [`OverflowPolicy::Reject`].
    ///
    /// [`OverflowPolicy::Reject`]: crate::config::OverflowPolicy::Reject
    #[error("Feed capacity exceeded: {0}")]
    CapacityExceeded(String),
}

impl ImportError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FeedNotFound(_))
    }

    /// Check if this error represents a capacity overflow.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded(_))
    }
}
