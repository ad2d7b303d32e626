//! Narrow contract over the remote feed store.
//!
//! The engine only ever resolves feeds, creates them, and swaps their
//! report collections. Transport, authentication, timeouts, and retry
//! policy all belong to the implementation behind this trait.

use async_trait::async_trait;

use crate::errors::ImportError;
use crate::models::feed::{Feed, NewFeed};
use crate::models::report::Report;

pub mod memory;

pub use memory::InMemoryFeedStore;

/// CRUD surface the reconciliation engine needs from the remote store.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Fetch a feed by its store-assigned id.
    ///
    /// Fails with [`ImportError::FeedNotFound`] when the id does not
    /// resolve.
    async fn get_by_id(&self, id: &str) -> Result<Feed, ImportError>;

    /// Fetch a feed by exact name.
    ///
    /// Fails with [`ImportError::FeedNotFound`] when no feed carries the
    /// name, and with [`ImportError::AmbiguousName`] when more than one
    /// does.
    async fn get_by_name(&self, name: &str) -> Result<Feed, ImportError>;

    /// Create a feed with no reports, returning it with its assigned id.
    async fn create(&self, feed: NewFeed) -> Result<Feed, ImportError>;

    /// Atomically replace the full report collection of a feed.
    ///
    /// There is no partial-update API: either the new set is applied as a
    /// whole or the call fails and the previous set is observable.
    async fn replace_reports(
        &self,
        feed_id: &str,
        reports: Vec<Report>,
    ) -> Result<(), ImportError>;
}
