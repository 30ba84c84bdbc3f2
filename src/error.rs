use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// crate specific Error enum
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("EPSG:{0} is not a known spatial reference")]
    UnknownSpatialReference(u16),
    #[error("Spatial reference mismatch, expected EPSG:{expected} but found EPSG:{found}")]
    SpatialReferenceMismatch { expected: u16, found: u16 },
    #[error("The base geometry is missing or not a polygon")]
    NonPolygonalBase,
    #[error("Buffer distance must be positive, got {0}")]
    NonPositiveBufferDistance(f64),
    #[error("Cannot buffer by a linear distance in a geographic spatial reference")]
    UnsupportedBufferUnit,
    #[error("No reference layer with id {0:?}")]
    UnknownLayer(String),
    #[error("Layer {layer:?} has no feature with object id {object_id}")]
    MissingBaseFeature { layer: String, object_id: u64 },
    #[error("Geometry operation failed: {0}")]
    GeometryOperation(String),
}
