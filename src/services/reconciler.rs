//! Feed reconciliation: resolve the target feed and fold an IOC batch
//! into its report set.
//!
//! Two strategies. Replace discards the feed's existing reports and
//! rebuilds the set from the input alone. Append preserves existing
//! reports, topping up under-capacity ones before packing the remainder
//! into new reports. Either way the final set goes to the store as a
//! single atomic `replace_reports` call.

use std::collections::VecDeque;

use serde::Serialize;
use validator::Validate;

use crate::config::{EngineConfig, OverflowPolicy};
use crate::errors::ImportError;
use crate::models::feed::{Feed, NewFeed};
use crate::models::ioc::Ioc;
use crate::models::report::Report;
use crate::services::{naming, packer};
use crate::store::FeedStore;

/// Target of a reconciliation: an existing feed by id, or a feed resolved
/// by name and created when absent.
#[derive(Debug, Clone)]
pub enum FeedTarget {
    ById(String),
    ByName {
        name: String,
        provider_url: String,
        summary: String,
        category: String,
    },
}

/// Parameters for one reconciliation run.
#[derive(Debug, Clone, Validate)]
pub struct ReconcileRequest {
    pub iocs: Vec<Ioc>,
    /// Severity applied to newly built reports, 1-10.
    #[validate(range(min = 1, max = 10))]
    pub severity: u8,
    /// Discard the feed's existing reports instead of topping them up.
    pub replace: bool,
    pub target: FeedTarget,
}

/// Summary of a reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    pub feed_id: String,
    pub feed_name: String,
    pub reports_submitted: usize,
    pub iocs_placed: usize,
    /// IOCs dropped because the feed hit its report capacity.
    pub iocs_dropped: usize,
}

/// Resolve the target feed.
///
/// A missing feed id is fatal; only the by-name path creates feeds.
pub async fn resolve_feed<S: FeedStore + ?Sized>(
    store: &S,
    target: &FeedTarget,
) -> Result<Feed, ImportError> {
    match target {
        FeedTarget::ById(id) => store.get_by_id(id).await,
        FeedTarget::ByName {
            name,
            provider_url,
            summary,
            category,
        } => match store.get_by_name(name).await {
            Ok(feed) => Ok(feed),
            Err(e) if e.is_not_found() => {
                tracing::info!(feed_name = %name, "Feed not found, creating");
                store
                    .create(NewFeed {
                        name: name.clone(),
                        provider_url: naming::normalize_provider_url(provider_url),
                        summary: summary.clone(),
                        category: category.clone(),
                    })
                    .await
            }
            Err(e) => Err(e),
        },
    }
}

/// Reconcile an IOC batch into its target feed and submit the final
/// report set.
pub async fn reconcile<S: FeedStore + ?Sized>(
    store: &S,
    config: &EngineConfig,
    request: ReconcileRequest,
) -> Result<ReconcileOutcome, ImportError> {
    request
        .validate()
        .map_err(|e| ImportError::Validation(e.to_string()))?;

    let feed = resolve_feed(store, &request.target).await?;
    let title_prefix = naming::report_title_prefix(&feed.name);
    let total_input = request.iocs.len();

    let (reports, dropped) = if request.replace {
        build_replace(&feed, &title_prefix, request.iocs, request.severity, config)?
    } else {
        build_append(&feed, &title_prefix, request.iocs, request.severity, config)?
    };

    let reports_submitted = reports.len();
    store.replace_reports(&feed.id, reports).await?;

    let outcome = ReconcileOutcome {
        feed_id: feed.id,
        feed_name: feed.name,
        reports_submitted,
        iocs_placed: total_input - dropped,
        iocs_dropped: dropped,
    };
    tracing::info!(
        feed_id = %outcome.feed_id,
        reports = outcome.reports_submitted,
        iocs = outcome.iocs_placed,
        "Reconciled feed"
    );
    Ok(outcome)
}

/// Build the replace-mode report set: the packed input, nothing else.
///
/// Returns the reports plus the number of IOCs dropped to stay within the
/// feed's report capacity.
fn build_replace(
    feed: &Feed,
    title_prefix: &str,
    iocs: Vec<Ioc>,
    severity: u8,
    config: &EngineConfig,
) -> Result<(Vec<Report>, usize), ImportError> {
    let mut reports = packer::pack(
        iocs,
        config.ioc_batch_size,
        title_prefix,
        &feed.summary,
        severity,
    );
    let dropped = enforce_feed_capacity(&mut reports, config.reports_batch_size, config, feed)?;
    Ok((reports, dropped))
}

/// Build the append-mode report set: unchanged full reports, topped-up
/// under-full reports, then new reports, in that order.
fn build_append(
    feed: &Feed,
    title_prefix: &str,
    iocs: Vec<Ioc>,
    severity: u8,
    config: &EngineConfig,
) -> Result<(Vec<Report>, usize), ImportError> {
    let capacity = config.ioc_batch_size;
    let mut pending: VecDeque<Ioc> = iocs.into();

    let (full, mut under_full): (Vec<Report>, Vec<Report>) = feed
        .reports
        .iter()
        .cloned()
        .partition(|r| r.is_full(capacity));

    // Top up under-full reports in store order from the front of the
    // pending queue. Existing IOCs stay put, new ones land after them.
    for report in under_full.iter_mut() {
        if pending.is_empty() {
            break;
        }
        let take = report.room(capacity).min(pending.len());
        report.iocs.extend(pending.drain(..take));
    }

    // Remaining input becomes new reports, numbered after the existing
    // ones.
    let existing_count = feed.reports.len();
    let mut new_reports = packer::pack_from(
        pending.into(),
        capacity,
        title_prefix,
        &feed.summary,
        severity,
        existing_count + 1,
    );

    // Only new reports are subject to truncation; an append never sheds
    // reports the feed already holds.
    let allowed_new = config.reports_batch_size.saturating_sub(existing_count);
    let dropped =
        enforce_feed_capacity(&mut new_reports, allowed_new, config, feed)?;

    let mut reports = full;
    reports.append(&mut under_full);
    reports.append(&mut new_reports);
    Ok((reports, dropped))
}

/// Apply the overflow policy when `reports` exceeds `allowed`.
///
/// Truncate keeps the first `allowed` reports and returns the dropped IOC
/// count; Reject fails without submitting anything.
fn enforce_feed_capacity(
    reports: &mut Vec<Report>,
    allowed: usize,
    config: &EngineConfig,
    feed: &Feed,
) -> Result<usize, ImportError> {
    if reports.len() <= allowed {
        return Ok(0);
    }
    match config.overflow_policy {
        OverflowPolicy::Reject => Err(ImportError::CapacityExceeded(format!(
            "feed '{}' cannot take {} more reports, limit is {}",
            feed.name,
            reports.len(),
            allowed
        ))),
        OverflowPolicy::Truncate => {
            let dropped: usize = reports[allowed..].iter().map(|r| r.iocs.len()).sum();
            reports.truncate(allowed);
            tracing::warn!(
                feed_name = %feed.name,
                dropped_iocs = dropped,
                reports_limit = config.reports_batch_size,
                "Feed is at report capacity, dropping overflow IOCs"
            );
            Ok(dropped)
        }
    }
}
