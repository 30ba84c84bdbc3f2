pub mod feature;
pub mod source;

pub use self::feature::{AttributeValue, Feature, GeometryKind, ReferenceLayer};
pub use self::source::{FeatureSource, InMemoryFeatureSource, LayerInfo};
