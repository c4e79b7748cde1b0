use itertools::Itertools;
use sheetdxf_core::geom::Vec2;
use sheetdxf_core::model::{Loop, LoopRole};

/// Signed shoelace area; counter-clockwise rings are positive.
pub fn shoelace_area(points: &[Vec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice * 0.5
}

/// Drops repeated consecutive vertices and any closing vertices that repeat
/// the first one, leaving the ring's distinct corners.
pub fn distinct_ring(points: &[Vec2], eps: f64) -> Vec<Vec2> {
    let mut ring: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        if ring.last().map_or(true, |last| !last.approx_eq(*p, eps)) {
            ring.push(*p);
        }
    }
    while ring.len() > 1 && ring[0].approx_eq(ring[ring.len() - 1], eps) {
        ring.pop();
    }
    ring
}

/// Tags the ring with the largest absolute area as outer and every other ring
/// as inner. Ties go to the earlier ring. Output order matches input order.
pub fn classify_loops<R: AsRef<[Vec2]>>(rings: &[R]) -> Vec<Loop> {
    let areas: Vec<f64> = rings.iter().map(|r| shoelace_area(r.as_ref())).collect();

    let mut order: Vec<usize> = (0..rings.len()).collect();
    // Stable: equal weights keep input order.
    order.sort_by(|&a, &b| areas[b].abs().total_cmp(&areas[a].abs()));
    let outer = order.first().copied();

    rings
        .iter()
        .zip(areas)
        .enumerate()
        .map(|(i, (ring, signed_area))| Loop {
            points: ring.as_ref().to_vec(),
            signed_area,
            role: if Some(i) == outer {
                LoopRole::Outer
            } else {
                LoopRole::Inner
            },
        })
        .collect()
}

pub fn outer_index(loops: &[Loop]) -> Option<usize> {
    loops.iter().position(Loop::is_outer)
}
