use crate::geometry::{Extent, SpatialReference};

use geo::{BoundingRect, Geometry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single attribute value as delivered by a feature store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// stringified form, used where values are compared or joined
    pub fn as_key(&self) -> String {
        self.to_string()
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(s) => s.trim().parse().ok(),
            AttributeValue::Bool(_) | AttributeValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => Ok(()),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub object_id: u64,
    pub geometry: Geometry,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Feature {
    pub fn new(object_id: u64, geometry: impl Into<Geometry>) -> Feature {
        Feature {
            object_id,
            geometry: geometry.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, field: &str, value: impl Into<AttributeValue>) -> Feature {
        self.attributes.insert(field.to_string(), value.into());
        self
    }

    pub fn attribute(&self, field: &str) -> Option<&AttributeValue> {
        self.attributes.get(field)
    }

    pub fn extent(&self) -> Option<Extent> {
        self.geometry.bounding_rect().map(Extent::from)
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        GeometryKind::of(&self.geometry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Polygon,
    Point,
    Line,
    Mixed,
    Empty,
}

impl GeometryKind {
    fn of(geometry: &Geometry) -> GeometryKind {
        match geometry {
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => GeometryKind::Polygon,
            Geometry::Point(_) | Geometry::MultiPoint(_) => GeometryKind::Point,
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                GeometryKind::Line
            }
            Geometry::GeometryCollection(gc) => gc
                .iter()
                .map(GeometryKind::of)
                .fold(GeometryKind::Empty, GeometryKind::merge),
        }
    }

    fn merge(self, other: GeometryKind) -> GeometryKind {
        match (self, other) {
            (GeometryKind::Empty, k) | (k, GeometryKind::Empty) => k,
            (a, b) if a == b => a,
            _ => GeometryKind::Mixed,
        }
    }
}

/// A layer of features sharing one spatial reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLayer {
    pub id: String,
    pub title: String,
    pub spatial_reference: SpatialReference,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl ReferenceLayer {
    pub fn new(id: &str, title: &str, spatial_reference: SpatialReference) -> ReferenceLayer {
        ReferenceLayer {
            id: id.to_string(),
            title: title.to_string(),
            spatial_reference,
            features: vec![],
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> ReferenceLayer {
        self.features.push(feature);
        self
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        self.features
            .iter()
            .map(Feature::geometry_kind)
            .fold(GeometryKind::Empty, GeometryKind::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon, GeometryCollection};

    #[test]
    fn test_attribute_keys() {
        assert_eq!(AttributeValue::Number(3.).as_key(), "3");
        assert_eq!(AttributeValue::Number(2.5).as_key(), "2.5");
        assert_eq!(AttributeValue::from("X").as_key(), "X");
        assert_eq!(AttributeValue::Null.as_key(), "");
        assert_eq!(AttributeValue::from(" 7 ").as_f64(), Some(7.));
        assert_eq!(AttributeValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_untagged_attributes() {
        let attrs: BTreeMap<String, AttributeValue> =
            serde_json::from_str(r#"{"a": 1.5, "b": "x", "c": null, "d": false}"#).unwrap();

        assert_eq!(attrs["a"], AttributeValue::Number(1.5));
        assert_eq!(attrs["b"], AttributeValue::from("x"));
        assert!(attrs["c"].is_null());
        assert_eq!(attrs["d"], AttributeValue::Bool(false));
    }

    #[test]
    fn test_layer_geometry_kind() {
        let sr = SpatialReference::new(25833).unwrap();
        let square = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.)];

        let empty = ReferenceLayer::new("e", "Empty", sr);
        assert_eq!(empty.geometry_kind(), GeometryKind::Empty);

        let points = ReferenceLayer::new("p", "Points", sr)
            .with_feature(Feature::new(1, point!(x: 0., y: 0.)))
            .with_feature(Feature::new(2, point!(x: 1., y: 0.)));
        assert_eq!(points.geometry_kind(), GeometryKind::Point);

        let mixed = points.with_feature(Feature::new(3, square.clone()));
        assert_eq!(mixed.geometry_kind(), GeometryKind::Mixed);

        let collection = Feature::new(
            4,
            Geometry::GeometryCollection(GeometryCollection::new_from(vec![square.into()])),
        );
        assert_eq!(collection.geometry_kind(), GeometryKind::Polygon);
    }
}
