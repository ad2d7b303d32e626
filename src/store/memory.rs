//! In-process [`FeedStore`] backed by a `Vec`, used by the test suite.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::ImportError;
use crate::models::feed::{Feed, NewFeed};
use crate::models::report::Report;

use super::FeedStore;

/// In-memory feed store.
///
/// Duplicate names are representable on purpose: `get_by_name` has to be
/// able to report an ambiguous name, so `seed` performs no uniqueness
/// check.
#[derive(Debug, Default)]
pub struct InMemoryFeedStore {
    feeds: Mutex<Vec<Feed>>,
    next_id: Mutex<u64>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a feed as-is, keeping its caller-supplied id and reports.
    pub fn seed(&self, feed: Feed) {
        self.feeds.lock().unwrap().push(feed);
    }

    /// Number of feeds currently held.
    pub fn len(&self) -> usize {
        self.feeds.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn get_by_id(&self, id: &str) -> Result<Feed, ImportError> {
        self.feeds
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| ImportError::FeedNotFound(id.to_string()))
    }

    async fn get_by_name(&self, name: &str) -> Result<Feed, ImportError> {
        let feeds = self.feeds.lock().unwrap();
        let mut matches = feeds.iter().filter(|f| f.name == name);
        let first = matches
            .next()
            .ok_or_else(|| ImportError::FeedNotFound(name.to_string()))?;
        if matches.next().is_some() {
            return Err(ImportError::AmbiguousName(name.to_string()));
        }
        Ok(first.clone())
    }

    async fn create(&self, new: NewFeed) -> Result<Feed, ImportError> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };
        let feed = Feed {
            id: format!("feed-{id}"),
            name: new.name,
            provider_url: new.provider_url,
            summary: new.summary,
            category: new.category,
            reports: Vec::new(),
        };
        self.feeds.lock().unwrap().push(feed.clone());
        Ok(feed)
    }

    async fn replace_reports(
        &self,
        feed_id: &str,
        reports: Vec<Report>,
    ) -> Result<(), ImportError> {
        let mut feeds = self.feeds.lock().unwrap();
        let feed = feeds
            .iter_mut()
            .find(|f| f.id == feed_id)
            .ok_or_else(|| ImportError::FeedNotFound(feed_id.to_string()))?;
        feed.reports = reports;
        Ok(())
    }
}
