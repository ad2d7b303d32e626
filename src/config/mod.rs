//! Engine configuration: batch capacities and overflow policy.

use std::env;

/// Default maximum number of IOCs per report.
pub const DEFAULT_IOC_BATCH_SIZE: usize = 1000;
/// Default maximum number of reports per feed.
pub const DEFAULT_REPORTS_BATCH_SIZE: usize = 10_000;

/// What to do when an input batch would push a feed past its report
/// capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep the reports that fit, log a warning, and drop the remainder.
    #[default]
    Truncate,
    /// Fail the reconciliation without submitting anything.
    Reject,
}

/// Capacity limits injected into the packing and reconciliation services.
///
/// Tests construct this with small values instead of relying on the
/// production defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of IOCs a single report may hold. Always >= 1.
    pub ioc_batch_size: usize,
    /// Maximum number of reports a single feed may hold. Always >= 1.
    pub reports_batch_size: usize,
    pub overflow_policy: OverflowPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ioc_batch_size: DEFAULT_IOC_BATCH_SIZE,
            reports_batch_size: DEFAULT_REPORTS_BATCH_SIZE,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load capacities from the environment, falling back to defaults for
    /// unset or unparseable values.
    pub fn from_env() -> Self {
        let ioc_batch_size = env::var("IOC_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_IOC_BATCH_SIZE)
            .max(1);
        let reports_batch_size = env::var("REPORTS_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REPORTS_BATCH_SIZE)
            .max(1);
        let overflow_policy = match env::var("FEED_OVERFLOW_POLICY").as_deref() {
            Ok("reject") => OverflowPolicy::Reject,
            _ => OverflowPolicy::Truncate,
        };

        Self {
            ioc_batch_size,
            reports_batch_size,
            overflow_policy,
        }
    }
}
