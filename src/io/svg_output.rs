use geo::{Coord, LineString, Polygon};
use svg::{node::element, Document};

use crate::{map::{SceneMap, ShapeStyle}, overlay::Overlay};

pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ViewBox {
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Non-finite coordinates are skipped.
    pub fn include(&mut self, (x, y): (f64, f64)) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn add_margin(&mut self, margin: f64) {
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
    }

    pub fn get(&self) -> (f64, f64, f64, f64) {
        if self.is_empty() {
            return (0.0, 0.0, 1.0, 1.0);
        }

        (self.min_x, self.min_y, self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

/// Equirectangular: x grows east, y grows south.
fn project(c: &Coord) -> (f64, f64) {
    (c.x, -c.y)
}

/// `None` for an empty ring or one with a non-finite point.
fn make_svg_ring(line: &LineString, closed: bool, view_box: &mut ViewBox) -> Option<element::Path> {
    if !line.coords().all(|c| c.x.is_finite() && c.y.is_finite()) {
        return None;
    }

    let mut points = line.coords().map(project);
    let p0 = points.next()?;

    let mut data = element::path::Data::new();
    data = data.move_to(p0);
    view_box.include(p0);

    for p in points {
        data = data.line_to(p);
        view_box.include(p);
    }

    if closed {
        data = data.close();
    }

    Some(element::Path::new()
        .set("d", data)
        .set("vector-effect", "non-scaling-stroke"))
}

fn make_svg_overlay(overlay: &Overlay, style: &ShapeStyle, marker_radius: f64, view_box: &mut ViewBox) -> Option<element::Group> {
    let decoration = overlay.decoration();

    let mut g = element::Group::new()
        .set("fill", style.fill_for(overlay))
        .set("stroke", style.stroke_for(overlay))
        .set("opacity", style.alpha_for(overlay));

    if let Some(user_data) = &decoration.user_data {
        g = g.set("data-user", user_data.as_str());
    }

    match overlay {
        Overlay::Polyline { ring, closed, .. } => {
            // The ring already repeats its first point, so only polygons need an explicit close
            let path = if *closed {
                let polygon = Polygon::from(ring.clone());
                make_svg_ring(polygon.exterior(), true, view_box)?
            } else {
                make_svg_ring(&LineString::from(ring.clone()), false, view_box)?
            };
            g = g.set("stroke-width", decoration.stroke_width).add(path);
        },
        Overlay::Marker { position, .. } => {
            let (cx, cy) = project(&Coord::from(*position));
            view_box.include((cx, cy));

            let r = if decoration.selected { marker_radius * 1.5 } else { marker_radius };

            g = g.set("stroke-width", decoration.stroke_width)
                .add(element::Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", r)
                    .set("vector-effect", "non-scaling-stroke"));

            if let Some(icon) = &decoration.icon {
                g = g.add(element::Image::new()
                    .set("href", icon.display().to_string())
                    .set("x", cx - r)
                    .set("y", cy - r)
                    .set("width", r * 2.0)
                    .set("height", r * 2.0));
            }
        },
    }

    Some(g)
}

pub fn make_svg(map: &SceneMap, style: &ShapeStyle, marker_radius: f64) -> Document {
    let mut view_box = ViewBox::new();

    let mut doc = Document::new();

    for (_, overlay) in map.overlays() {
        if let Some(g) = make_svg_overlay(overlay, style, marker_radius, &mut view_box) {
            doc = doc.add(g);
        }
    }

    if !view_box.is_empty() {
        let (_, _, w, h) = view_box.get();
        view_box.add_margin((w.max(h) * 0.1).max(marker_radius * 2.0));
    }

    doc.set("viewBox", view_box.get())
}
