pub mod multi_polygon;
pub mod ops;
pub mod rectangle;
pub mod spatial_reference;

pub use self::multi_polygon::{as_multi_polygon, MapMultiPolygon};
pub use self::ops::{GeoOps, GeometryOps};
pub use self::rectangle::Extent;
pub use self::spatial_reference::{LinearUnit, MapUnit, SpatialReference};

pub use geo::{Geometry, MultiPolygon, Polygon};
