use crate::error::DrawingError;
use dxf::entities::{Entity, EntityType};
use dxf::enums::AcadVersion;
use dxf::Drawing;
use sheetdxf_core::geom::Vec2;
use sheetdxf_core::model::Segment;
use std::fs;
use std::path::Path;

pub fn load(path: &Path) -> Result<Drawing, DrawingError> {
    Drawing::load_file(path).map_err(|source| DrawingError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves `drawing`, creating the parent directory when missing.
///
/// Files older than R2000 are upgraded first; the writer silently omits
/// LWPOLYLINE entities for R12 output.
pub fn save(drawing: &mut Drawing, path: &Path) -> Result<(), DrawingError> {
    if drawing.header.version < AcadVersion::R2000 {
        tracing::debug!(from = ?drawing.header.version, "upgrading drawing version to R2000");
        drawing.header.version = AcadVersion::R2000;
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| DrawingError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    drawing.save_file(path).map_err(|source| DrawingError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn in_model_space(ent: &Entity) -> bool {
    !ent.common.is_in_paper_space
}

/// Model-space LINE entities as segments, paired with their entity index.
pub fn line_segments(drawing: &Drawing) -> Vec<(usize, Segment)> {
    drawing
        .entities()
        .enumerate()
        .filter(|(_, ent)| in_model_space(ent))
        .filter_map(|(idx, ent)| match &ent.specific {
            EntityType::Line(line) => Some((
                idx,
                Segment::new(
                    Vec2::new(line.p1.x, line.p1.y),
                    Vec2::new(line.p2.x, line.p2.y),
                ),
            )),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedRing {
    pub entity_index: usize,
    pub points: Vec<Vec2>,
}

/// Closed LWPOLYLINE and POLYLINE entities in model space. Bulges are ignored.
pub fn closed_rings(drawing: &Drawing) -> Vec<ClosedRing> {
    drawing
        .entities()
        .enumerate()
        .filter(|(_, ent)| in_model_space(ent))
        .filter_map(|(idx, ent)| {
            let points = match &ent.specific {
                EntityType::LwPolyline(poly) if poly.is_closed() => poly
                    .vertices
                    .iter()
                    .map(|v| Vec2::new(v.x, v.y))
                    .collect(),
                EntityType::Polyline(poly) if poly.is_closed() => poly
                    .vertices()
                    .map(|v| Vec2::new(v.location.x, v.location.y))
                    .collect(),
                _ => return None,
            };
            Some(ClosedRing {
                entity_index: idx,
                points,
            })
        })
        .collect()
}
