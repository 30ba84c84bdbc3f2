use super::{Extent, LinearUnit, MapMultiPolygon, SpatialReference};
use crate::{Error, Result};

use geo::algorithm::Buffer;
use geo::{unary_union, BooleanOps, Geometry, MultiPolygon};

/// The polygon operations the overlay is built on.
///
/// `Ok(None)` means the operation produced no polygonal geometry
/// (empty, collapsed to lines or points, or below the area tolerance).
/// Callers treat that as "no geometry", never as a failure.
pub trait GeometryOps {
    fn intersect(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<Option<MultiPolygon>>;

    fn intersect_many(&self, list: &[MultiPolygon], b: &MultiPolygon) -> Result<Vec<MultiPolygon>> {
        let mut out = Vec::with_capacity(list.len());
        for a in list {
            if let Some(i) = self.intersect(a, b)? {
                out.push(i);
            }
        }
        Ok(out)
    }

    fn difference(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<Option<MultiPolygon>>;

    fn union(&self, list: &[MultiPolygon]) -> Result<Option<MultiPolygon>>;

    /// buffers any geometry outwards, `distance` is given in `unit`
    /// and converted to the units of `spatial_reference`
    fn buffer(
        &self,
        geometry: &Geometry,
        distance: f64,
        unit: LinearUnit,
        spatial_reference: SpatialReference,
    ) -> Result<Option<MultiPolygon>>;

    fn extent(&self, geometry: &MultiPolygon) -> Option<Extent> {
        geometry.extent()
    }
}

/// Planar operations backed by the `geo` crate
#[derive(Debug, Clone, Copy)]
pub struct GeoOps {
    min_area: f64,
}

impl GeoOps {
    pub fn new(min_area: f64) -> GeoOps {
        GeoOps { min_area }
    }
}

impl Default for GeoOps {
    fn default() -> Self {
        GeoOps::new(crate::DEFAULT_AREA_TOLERANCE)
    }
}

impl GeometryOps for GeoOps {
    fn intersect(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<Option<MultiPolygon>> {
        Ok(a.intersection(b).into_polygonal(self.min_area))
    }

    fn difference(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<Option<MultiPolygon>> {
        Ok(a.difference(b).into_polygonal(self.min_area))
    }

    fn union(&self, list: &[MultiPolygon]) -> Result<Option<MultiPolygon>> {
        Ok(unary_union(list).into_polygonal(self.min_area))
    }

    fn buffer(
        &self,
        geometry: &Geometry,
        distance: f64,
        unit: LinearUnit,
        spatial_reference: SpatialReference,
    ) -> Result<Option<MultiPolygon>> {
        if !(distance > 0.) {
            return Err(Error::NonPositiveBufferDistance(distance));
        }
        let map_distance = spatial_reference.to_map_units(distance, unit)?;
        if !map_distance.is_finite() {
            return Err(Error::GeometryOperation(format!(
                "buffer distance {distance} {unit} is not finite in {spatial_reference}"
            )));
        }

        Ok(geometry.buffer(map_distance).into_polygonal(self.min_area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, Area, Rect};

    fn rect(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> MultiPolygon {
        MultiPolygon::new(vec![Rect::new((xmin, ymin), (xmax, ymax)).to_polygon()])
    }

    fn utm() -> SpatialReference {
        SpatialReference::new(25833).unwrap()
    }

    #[test]
    fn test_intersect_and_difference() {
        let ops = GeoOps::default();
        let a = rect(0., 0., 5., 10.);
        let b = rect(3., 0., 10., 10.);

        let i = ops.intersect(&a, &b).unwrap().unwrap();
        assert!((i.unsigned_area() - 20.).abs() < 1e-9);

        let d = ops.difference(&a, &b).unwrap().unwrap();
        assert!((d.unsigned_area() - 30.).abs() < 1e-9);
    }

    #[test]
    fn test_touching_intersection_is_empty() {
        let ops = GeoOps::default();
        let a = rect(0., 0., 5., 10.);
        let b = rect(5., 0., 10., 10.);

        assert!(ops.intersect(&a, &b).unwrap().is_none());
        assert!(ops.difference(&a, &a).unwrap().is_none());
    }

    #[test]
    fn test_intersect_many_skips_empty() {
        let ops = GeoOps::default();
        let base = rect(0., 0., 10., 10.);
        let list = vec![rect(-5., -5., 1., 1.), rect(20., 20., 30., 30.), rect(9., 9., 11., 11.)];

        let clipped = ops.intersect_many(&list, &base).unwrap();
        assert_eq!(clipped.len(), 2);
    }

    #[test]
    fn test_union() {
        let ops = GeoOps::default();
        let u = ops
            .union(&[rect(0., 0., 3., 10.), rect(3., 0., 5., 10.)])
            .unwrap()
            .unwrap();
        assert!((u.unsigned_area() - 50.).abs() < 1e-9);
        assert!(ops.union(&[]).unwrap().is_none());
    }

    #[test]
    fn test_buffer_point() {
        let ops = GeoOps::default();
        let p = Geometry::Point(point!(x: 0., y: 0.));

        let b = ops.buffer(&p, 1., LinearUnit::Meters, utm()).unwrap().unwrap();
        assert!((b.unsigned_area() - std::f64::consts::PI).abs() < 0.1);
    }

    #[test]
    fn test_buffer_rejects_non_positive() {
        let ops = GeoOps::default();
        let p = Geometry::Point(point!(x: 0., y: 0.));

        assert!(matches!(
            ops.buffer(&p, 0., LinearUnit::Meters, utm()),
            Err(Error::NonPositiveBufferDistance(_))
        ));
        assert!(ops.buffer(&p, -3., LinearUnit::Meters, utm()).is_err());
        assert!(ops.buffer(&p, f64::NAN, LinearUnit::Meters, utm()).is_err());
    }
}
