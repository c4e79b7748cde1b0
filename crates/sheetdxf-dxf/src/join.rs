use crate::error::DrawingError;
use crate::read::{self, line_segments};
use dxf::entities::{Entity, EntityType, LwPolyline};
use dxf::{Drawing, LwPolylineVertex};
use sheetdxf_algo::{join_segments, JoinConfig, JoinOutcome};
use sheetdxf_core::geom::BBox2;
use sheetdxf_core::model::{Polyline, Segment};
use sheetdxf_core::report::{
    FileReport, JoinStatsReport, Warning, DROPPED_SEGMENTS, UNRESOLVED_SEGMENT,
};
use std::path::Path;

/// Replaces every model-space LINE with the polylines they chain into.
pub fn join_drawing(drawing: &mut Drawing, cfg: &JoinConfig) -> JoinOutcome {
    let lines = line_segments(drawing);
    let segments: Vec<Segment> = lines.iter().map(|(_, s)| *s).collect();
    let outcome = join_segments(&segments, cfg);

    // Highest index first so earlier indices stay valid.
    for (idx, _) in lines.iter().rev() {
        drawing.remove_entity(*idx);
    }
    for poly in &outcome.polylines {
        drawing.add_entity(Entity::new(EntityType::LwPolyline(to_lwpolyline(
            poly,
            cfg.tolerance,
        ))));
    }

    outcome
}

fn to_lwpolyline(poly: &Polyline, eps: f64) -> LwPolyline {
    let closed = poly.is_closed(eps);
    // The closing vertex is implied by the closed flag.
    let count = if closed {
        poly.points.len() - 1
    } else {
        poly.points.len()
    };
    let mut lw = LwPolyline {
        vertices: poly.points[..count]
            .iter()
            .map(|p| LwPolylineVertex {
                x: p.x,
                y: p.y,
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    lw.set_is_closed(closed);
    lw
}

pub fn join_file(input: &Path, output: &Path, cfg: &JoinConfig) -> Result<FileReport, DrawingError> {
    tracing::info!(input = %input.display(), tolerance = cfg.tolerance, "joining line segments");
    let mut drawing = read::load(input)?;
    let outcome = join_drawing(&mut drawing, cfg);

    let stats = outcome.stats;
    let mut warnings = Vec::new();
    if stats.dropped_zero_length + stats.dropped_duplicates > 0 {
        warnings.push(Warning::new(
            DROPPED_SEGMENTS,
            format!(
                "dropped {} zero-length and {} duplicate segments",
                stats.dropped_zero_length, stats.dropped_duplicates
            ),
        ));
    }
    for poly in outcome.open_polylines() {
        let (first, last) = match (poly.points.first(), poly.points.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => continue,
        };
        warnings.push(Warning::new(
            UNRESOLVED_SEGMENT,
            format!(
                "open chain of {} points from ({}, {}) to ({}, {})",
                poly.points.len(),
                first.x,
                first.y,
                last.x,
                last.y
            ),
        ));
    }
    for w in &warnings {
        tracing::warn!(input = %input.display(), code = %w.code, "{}", w.message);
    }

    read::save(&mut drawing, output)?;
    tracing::info!(
        output = %output.display(),
        segments = stats.input_segments,
        closed = stats.closed,
        open = stats.open,
        "wrote joined drawing"
    );

    let extents = outcome
        .polylines
        .iter()
        .fold(BBox2::empty(), |acc, p| acc.union(&p.bbox()));

    let mut report = FileReport::processed(input.to_path_buf(), output.to_path_buf());
    report.join = Some(JoinStatsReport {
        segments: stats.input_segments,
        dropped_zero_length: stats.dropped_zero_length,
        dropped_duplicates: stats.dropped_duplicates,
        polylines_closed: stats.closed,
        polylines_open: stats.open,
    });
    report.extents = if extents.is_empty() { None } else { Some(extents) };
    report.warnings = warnings;
    Ok(report)
}
