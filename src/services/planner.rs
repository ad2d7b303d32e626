//! Multi-feed planning for imports too large for a single feed.
//!
//! A feed holds at most `reports_batch_size` reports of at most
//! `ioc_batch_size` IOCs each. When an import window's IOC volume exceeds
//! that, the input is split across deterministically named "Part N" feeds,
//! each reconciled independently.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::config::EngineConfig;
use crate::errors::ImportError;
use crate::models::ioc::Ioc;
use crate::services::naming;
use crate::services::reconciler::{self, FeedTarget, ReconcileOutcome, ReconcileRequest};
use crate::store::FeedStore;

/// Parameters for the create-one-or-more-feeds entry point.
#[derive(Debug, Clone, Validate)]
pub struct ImportRequest {
    pub iocs: Vec<Ioc>,
    /// Base name; the import window and part ordinal are appended.
    pub feed_base_name: String,
    /// STIX content version the IOCs were parsed from, e.g. "2.1".
    pub stix_version: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(url)]
    pub provider_url: String,
    pub summary: String,
    pub category: String,
    /// Severity applied to every created report, 1-10.
    #[validate(range(min = 1, max = 10))]
    pub severity: u8,
    /// Reconcile into this existing feed instead of resolving by name.
    pub feed_id: Option<String>,
}

/// The slice of an import destined for one feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPlan {
    /// 1-indexed ordinal used in the feed's name.
    pub part: usize,
    pub iocs: Vec<Ioc>,
}

/// Partition `iocs` across as many feeds as the capacities require.
///
/// Each plan takes up to `report_capacity * feed_capacity` IOCs in input
/// order. Empty input yields no plans, and an input landing exactly on a
/// multiple of the per-feed volume does not produce a trailing empty plan.
pub fn plan(iocs: Vec<Ioc>, report_capacity: usize, feed_capacity: usize) -> Vec<FeedPlan> {
    let per_feed = report_capacity * feed_capacity;
    let mut plans = Vec::with_capacity(iocs.len().div_ceil(per_feed.max(1)));
    let mut remaining = iocs.into_iter();
    let mut part = 1;

    loop {
        let slice: Vec<Ioc> = remaining.by_ref().take(per_feed).collect();
        if slice.is_empty() {
            break;
        }
        plans.push(FeedPlan { part, iocs: slice });
        part += 1;
    }

    plans
}

/// Import an IOC batch, fanning out across feeds when the volume exceeds
/// one feed's capacity.
///
/// Feeds are resolved or created under deterministic part names, so
/// re-running the same window replaces that window's reports instead of
/// duplicating feeds. With `feed_id` set, planning is bypassed and the
/// batch is append-reconciled into that single feed. Returns one outcome
/// per affected feed, in part order.
pub async fn import_iocs<S: FeedStore + ?Sized>(
    store: &S,
    config: &EngineConfig,
    request: ImportRequest,
) -> Result<Vec<ReconcileOutcome>, ImportError> {
    let mut request = request;
    request.provider_url = naming::normalize_provider_url(&request.provider_url);
    request
        .validate()
        .map_err(|e| ImportError::Validation(e.to_string()))?;

    if let Some(feed_id) = request.feed_id.take() {
        let outcome = reconciler::reconcile(
            store,
            config,
            ReconcileRequest {
                iocs: request.iocs,
                severity: request.severity,
                replace: false,
                target: FeedTarget::ById(feed_id),
            },
        )
        .await?;
        return Ok(vec![outcome]);
    }

    let mut plans = plan(
        request.iocs,
        config.ioc_batch_size,
        config.reports_batch_size,
    );
    // An empty window still materializes its first feed.
    if plans.is_empty() {
        plans.push(FeedPlan {
            part: 1,
            iocs: Vec::new(),
        });
    }

    let total_feeds = plans.len();
    let mut outcomes = Vec::with_capacity(total_feeds);
    for feed_plan in plans {
        let name = naming::feed_name(
            &request.feed_base_name,
            &request.stix_version,
            request.start_date,
            request.end_date,
            feed_plan.part,
        );
        let outcome = reconciler::reconcile(
            store,
            config,
            ReconcileRequest {
                iocs: feed_plan.iocs,
                severity: request.severity,
                replace: true,
                target: FeedTarget::ByName {
                    name,
                    provider_url: request.provider_url.clone(),
                    summary: request.summary.clone(),
                    category: request.category.clone(),
                },
            },
        )
        .await?;
        outcomes.push(outcome);
    }

    tracing::info!(feeds = total_feeds, "Import complete");
    Ok(outcomes)
}
