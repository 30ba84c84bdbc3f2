use super::Extent;
pub use geo::MultiPolygon;
use geo::{Area, BoundingRect, Geometry, Polygon};

pub trait MapMultiPolygon {
    /// drops every part with an area at or below `min_area`,
    /// returns None if nothing is left
    fn into_polygonal(self, min_area: f64) -> Option<MultiPolygon>;

    fn extent(&self) -> Option<Extent>;
}

impl MapMultiPolygon for MultiPolygon {
    fn into_polygonal(self, min_area: f64) -> Option<MultiPolygon> {
        let parts: Vec<Polygon> = self
            .0
            .into_iter()
            .filter(|p| p.unsigned_area() > min_area)
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(MultiPolygon::new(parts))
        }
    }

    fn extent(&self) -> Option<Extent> {
        self.bounding_rect().map(Extent::from)
    }
}

/// the polygonal content of a geometry, lines and points have none
pub fn as_multi_polygon(geometry: &Geometry) -> Option<MultiPolygon> {
    let polygons = match geometry {
        Geometry::Polygon(p) => vec![p.clone()],
        Geometry::MultiPolygon(mp) => mp.0.clone(),
        Geometry::Rect(r) => vec![r.to_polygon()],
        Geometry::Triangle(t) => vec![t.to_polygon()],
        Geometry::GeometryCollection(gc) => gc
            .iter()
            .filter_map(as_multi_polygon)
            .flat_map(|mp| mp.0)
            .collect(),
        _ => vec![],
    };

    if polygons.is_empty() {
        None
    } else {
        Some(MultiPolygon::new(polygons))
    }
}
