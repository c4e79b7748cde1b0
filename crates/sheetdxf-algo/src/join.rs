use serde::{Deserialize, Serialize};
use sheetdxf_core::config::JoinSettings;
use sheetdxf_core::geom::Vec2;
use sheetdxf_core::model::{Polyline, Segment};
use sheetdxf_core::normalize::{normalize_segments, SegmentPolicy};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinConfig {
    pub tolerance: f64,
    pub policy: SegmentPolicy,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            policy: SegmentPolicy::default(),
        }
    }
}

impl JoinConfig {
    pub fn from_settings(settings: &JoinSettings) -> Self {
        Self {
            tolerance: settings.tolerance,
            policy: settings.policy(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    pub input_segments: usize,
    pub dropped_zero_length: usize,
    pub dropped_duplicates: usize,
    pub closed: usize,
    pub open: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub polylines: Vec<Polyline>,
    pub stats: JoinStats,
    pub tolerance: f64,
}

impl JoinOutcome {
    /// Chains whose ends never met.
    pub fn open_polylines(&self) -> impl Iterator<Item = &Polyline> + '_ {
        self.polylines
            .iter()
            .filter(move |p| !p.is_closed(self.tolerance))
    }
}

#[derive(Debug, Clone, Copy)]
enum Splice {
    Append(Vec2),
    Prepend(Vec2),
}

/// Chains segments that share endpoints into polylines.
///
/// Works over the normalized input by index: a segment seeds a chain, then the
/// first unconsumed segment (in input order) touching either free end is
/// spliced in until none does. Orientations are tried as end->start,
/// end->end (reversed), start->end, start->start (reversed).
pub fn join_segments(segments: &[Segment], cfg: &JoinConfig) -> JoinOutcome {
    let eps = cfg.tolerance;
    let (work, norm) = normalize_segments(segments, eps, &cfg.policy);

    let mut consumed = vec![false; work.len()];
    let mut polylines = Vec::new();

    for seed in 0..work.len() {
        if consumed[seed] {
            continue;
        }
        consumed[seed] = true;
        let mut chain = VecDeque::from([work[seed].start, work[seed].end]);

        while let Some((idx, splice)) = next_splice(&work, &consumed, &chain, eps) {
            consumed[idx] = true;
            match splice {
                Splice::Append(p) => chain.push_back(p),
                Splice::Prepend(p) => chain.push_front(p),
            }
        }

        polylines.push(Polyline::new(chain.into_iter().collect()));
    }

    let closed = polylines.iter().filter(|p| p.is_closed(eps)).count();
    let stats = JoinStats {
        input_segments: segments.len(),
        dropped_zero_length: norm.dropped_zero_length,
        dropped_duplicates: norm.dropped_duplicates,
        closed,
        open: polylines.len() - closed,
    };

    JoinOutcome {
        polylines,
        stats,
        tolerance: eps,
    }
}

fn next_splice(
    work: &[Segment],
    consumed: &[bool],
    chain: &VecDeque<Vec2>,
    eps: f64,
) -> Option<(usize, Splice)> {
    let (head, tail) = match (chain.front(), chain.back()) {
        (Some(h), Some(t)) => (*h, *t),
        _ => return None,
    };

    work.iter()
        .enumerate()
        .filter(|(i, _)| !consumed[*i])
        .find_map(|(i, seg)| {
            let splice = if tail.approx_eq(seg.start, eps) {
                Splice::Append(seg.end)
            } else if tail.approx_eq(seg.end, eps) {
                Splice::Append(seg.start)
            } else if head.approx_eq(seg.end, eps) {
                Splice::Prepend(seg.start)
            } else if head.approx_eq(seg.start, eps) {
                Splice::Prepend(seg.end)
            } else {
                return None;
            };
            Some((i, splice))
        })
}
