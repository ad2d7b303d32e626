//! Report packing: partition an IOC sequence into capacity-bounded
//! reports.

use crate::models::ioc::Ioc;
use crate::models::report::Report;

/// Split `iocs` into consecutive reports holding at most `capacity` IOCs
/// each, preserving input order.
///
/// Report `k` (1-indexed) is titled `"{title_prefix}-{k}"` and carries the
/// given description and severity. Empty input yields no reports, and an
/// input landing exactly on a multiple of `capacity` does not produce a
/// trailing empty report. `capacity` must be non-zero.
pub fn pack(
    iocs: Vec<Ioc>,
    capacity: usize,
    title_prefix: &str,
    description: &str,
    severity: u8,
) -> Vec<Report> {
    pack_from(iocs, capacity, title_prefix, description, severity, 1)
}

/// Like [`pack`], but report numbering starts at `first_seq`, so new
/// reports can continue after a feed's existing ones.
pub fn pack_from(
    iocs: Vec<Ioc>,
    capacity: usize,
    title_prefix: &str,
    description: &str,
    severity: u8,
    first_seq: usize,
) -> Vec<Report> {
    let mut reports = Vec::with_capacity(iocs.len().div_ceil(capacity.max(1)));
    let mut remaining = iocs.into_iter();
    let mut seq = first_seq;

    loop {
        let chunk: Vec<Ioc> = remaining.by_ref().take(capacity).collect();
        if chunk.is_empty() {
            break;
        }
        reports.push(Report::new(
            format!("{title_prefix}-{seq}"),
            description,
            severity,
            chunk,
        ));
        seq += 1;
    }

    reports
}
