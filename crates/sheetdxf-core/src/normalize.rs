use crate::model::Segment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPolicy {
    pub drop_zero_length: bool,
    pub drop_duplicates: bool,
}

impl Default for SegmentPolicy {
    fn default() -> Self {
        Self {
            drop_zero_length: true,
            drop_duplicates: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    pub dropped_zero_length: usize,
    pub dropped_duplicates: usize,
}

/// Filters `segments` according to `policy`, keeping input order.
///
/// A duplicate is a segment whose endpoints match an earlier kept segment in
/// either orientation; the first occurrence wins.
pub fn normalize_segments(
    segments: &[Segment],
    eps: f64,
    policy: &SegmentPolicy,
) -> (Vec<Segment>, NormalizeStats) {
    let mut stats = NormalizeStats::default();
    let mut kept: Vec<Segment> = Vec::with_capacity(segments.len());

    for seg in segments {
        if policy.drop_zero_length && seg.is_degenerate(eps) {
            stats.dropped_zero_length += 1;
            continue;
        }
        if policy.drop_duplicates && kept.iter().any(|k| k.same_endpoints(seg, eps)) {
            stats.dropped_duplicates += 1;
            continue;
        }
        kept.push(*seg);
    }

    (kept, stats)
}
