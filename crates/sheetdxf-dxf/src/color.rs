use crate::error::DrawingError;
use crate::read::{self, closed_rings, in_model_space};
use dxf::entities::EntityType;
use dxf::tables::Layer;
use dxf::{Color, Drawing};
use sheetdxf_algo::{classify_loops, distinct_ring};
use sheetdxf_core::config::ColorSettings;
use sheetdxf_core::geom::BBox2;
use sheetdxf_core::model::{LayerSpec, LoopRole};
use sheetdxf_core::report::{
    ColorStats, FileReport, Warning, DEGENERATE_LOOP, NO_CLOSED_LOOPS,
};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorConfig {
    pub outer: LayerSpec,
    pub inner: LayerSpec,
    /// Vertices closer than this on both axes count as one corner.
    pub tolerance: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            outer: LayerSpec::outer(),
            inner: LayerSpec::inner(),
            tolerance: ColorSettings::default().tolerance,
        }
    }
}

impl ColorConfig {
    pub fn from_settings(settings: &ColorSettings) -> Self {
        Self {
            outer: settings.outer(),
            inner: settings.inner(),
            tolerance: settings.tolerance,
        }
    }

    fn layer(&self, role: LoopRole) -> &LayerSpec {
        LayerSpec::for_role(role, &self.outer, &self.inner)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorOutcome {
    pub stats: ColorStats,
    pub extents: Option<BBox2>,
    pub warnings: Vec<Warning>,
}

/// Adds the layer to the layer table unless a layer with that name exists.
/// Existing layers keep their color.
pub fn ensure_layer(drawing: &mut Drawing, spec: &LayerSpec) -> bool {
    if drawing
        .layers()
        .any(|l| l.name.eq_ignore_ascii_case(&spec.name))
    {
        return false;
    }
    drawing.add_layer(Layer {
        name: spec.name.clone(),
        color: Color::from_index(spec.color_index),
        ..Default::default()
    });
    true
}

/// Moves the largest closed polyline to the outer layer, every other closed
/// polyline to the inner layer, and every circle and arc to the inner layer.
///
/// Circles and arcs are not tested for containment.
pub fn color_drawing(drawing: &mut Drawing, cfg: &ColorConfig) -> ColorOutcome {
    ensure_layer(drawing, &cfg.outer);
    ensure_layer(drawing, &cfg.inner);

    let mut warnings = Vec::new();
    let (rings, degenerate): (Vec<_>, Vec<_>) = closed_rings(drawing)
        .into_iter()
        .map(|mut ring| {
            ring.points = distinct_ring(&ring.points, cfg.tolerance);
            ring
        })
        .partition(|r| r.points.len() >= 3);
    for ring in &degenerate {
        warnings.push(Warning::new(
            DEGENERATE_LOOP,
            format!(
                "closed polyline #{} has {} distinct vertices; left on its layer",
                ring.entity_index,
                ring.points.len()
            ),
        ));
    }

    let point_sets: Vec<_> = rings.iter().map(|r| r.points.as_slice()).collect();
    let loops = classify_loops(&point_sets);

    let mut roles: HashMap<usize, LoopRole> = HashMap::with_capacity(rings.len());
    let mut extents = BBox2::empty();
    let mut outer_area = None;
    for (ring, lp) in rings.iter().zip(&loops) {
        roles.insert(ring.entity_index, lp.role);
        for p in &lp.points {
            extents.include_point(*p);
        }
        if lp.is_outer() {
            outer_area = Some(lp.abs_area());
        }
    }

    if loops.is_empty() {
        warnings.push(Warning::new(
            NO_CLOSED_LOOPS,
            "no closed polyline loops found; only circles and arcs were assigned",
        ));
    }

    let mut stats = ColorStats {
        loops: loops.len(),
        outer_area,
        ..ColorStats::default()
    };

    for (idx, ent) in drawing.entities_mut().enumerate() {
        if !in_model_space(ent) {
            continue;
        }
        let role = match &ent.specific {
            EntityType::Circle(_) => {
                stats.circles += 1;
                LoopRole::Inner
            }
            EntityType::Arc(_) => {
                stats.arcs += 1;
                LoopRole::Inner
            }
            _ => match roles.get(&idx) {
                Some(role) => *role,
                None => continue,
            },
        };
        ent.common.layer = cfg.layer(role).name.clone();
    }

    ColorOutcome {
        stats,
        extents: if extents.is_empty() { None } else { Some(extents) },
        warnings,
    }
}

pub fn color_file(input: &Path, output: &Path, cfg: &ColorConfig) -> Result<FileReport, DrawingError> {
    tracing::info!(input = %input.display(), "coloring loops");
    let mut drawing = read::load(input)?;
    let outcome = color_drawing(&mut drawing, cfg);

    for w in &outcome.warnings {
        tracing::warn!(input = %input.display(), code = %w.code, "{}", w.message);
    }

    read::save(&mut drawing, output)?;
    tracing::info!(
        output = %output.display(),
        loops = outcome.stats.loops,
        circles = outcome.stats.circles,
        arcs = outcome.stats.arcs,
        "wrote colored drawing"
    );

    let mut report = FileReport::processed(input.to_path_buf(), output.to_path_buf());
    report.color = Some(outcome.stats);
    report.extents = outcome.extents;
    report.warnings = outcome.warnings;
    Ok(report)
}
