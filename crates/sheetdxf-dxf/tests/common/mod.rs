#![allow(dead_code)]

use dxf::entities::{Arc, Circle, Entity, EntityType, Line, LwPolyline, Polyline, Vertex};
use dxf::enums::AcadVersion;
use dxf::{Drawing, LwPolylineVertex, Point};
use std::path::Path;

pub fn new_drawing() -> Drawing {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2010;
    drawing
}

pub fn add_line(drawing: &mut Drawing, a: (f64, f64), b: (f64, f64)) {
    let line = Line::new(Point::new(a.0, a.1, 0.0), Point::new(b.0, b.1, 0.0));
    drawing.add_entity(Entity::new(EntityType::Line(line)));
}

pub fn add_ring(drawing: &mut Drawing, pts: &[(f64, f64)], closed: bool) {
    let mut poly = LwPolyline {
        vertices: pts
            .iter()
            .map(|&(x, y)| LwPolylineVertex {
                x,
                y,
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    poly.set_is_closed(closed);
    drawing.add_entity(Entity::new(EntityType::LwPolyline(poly)));
}

/// Old-style POLYLINE with separate VERTEX entities.
pub fn add_closed_polyline(drawing: &mut Drawing, pts: &[(f64, f64)]) {
    let mut poly = Polyline::default();
    poly.set_is_closed(true);
    for &(x, y) in pts {
        poly.add_vertex(drawing, Vertex::new(Point::new(x, y, 0.0)));
    }
    drawing.add_entity(Entity::new(EntityType::Polyline(poly)));
}

pub fn in_paper_space(drawing: &mut Drawing, index: usize) {
    if let Some(ent) = drawing.entities_mut().nth(index) {
        ent.common.is_in_paper_space = true;
    }
}

pub fn add_rect(drawing: &mut Drawing, x0: f64, y0: f64, w: f64, h: f64) {
    add_ring(
        drawing,
        &[(x0, y0), (x0 + w, y0), (x0 + w, y0 + h), (x0, y0 + h)],
        true,
    );
}

pub fn add_circle(drawing: &mut Drawing, c: (f64, f64), r: f64) {
    let circle = Circle::new(Point::new(c.0, c.1, 0.0), r);
    drawing.add_entity(Entity::new(EntityType::Circle(circle)));
}

pub fn add_arc(drawing: &mut Drawing, c: (f64, f64), r: f64, start: f64, end: f64) {
    let arc = Arc::new(Point::new(c.0, c.1, 0.0), r, start, end);
    drawing.add_entity(Entity::new(EntityType::Arc(arc)));
}

pub fn save(drawing: &mut Drawing, path: &Path) {
    drawing.save_file(path).expect("save fixture");
}

pub fn load(path: &Path) -> Drawing {
    Drawing::load_file(path).expect("load output")
}

pub fn first_vertex(ent: &Entity) -> Option<(f64, f64)> {
    match &ent.specific {
        EntityType::LwPolyline(p) => p.vertices.first().map(|v| (v.x, v.y)),
        _ => None,
    }
}

pub fn layer_color(drawing: &Drawing, name: &str) -> Option<u8> {
    drawing
        .layers()
        .find(|l| l.name == name)
        .and_then(|l| l.color.index())
}
