use crate::features::AttributeValue;
use crate::geometry::{LinearUnit, MultiPolygon};

use serde::Serialize;

/// A buffer distance with its unit resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BufferConfig {
    pub distance: f64,
    pub unit: LinearUnit,
}

/// How a fragment was cut out of its reference feature
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FragmentKind {
    /// a polygon feature intersected with the analysis area
    PolygonClip,
    /// a feature buffered before it was intersected with the analysis area
    Buffered { buffer: BufferConfig },
    /// the band between two buffer zones around a feature
    BufferRing {
        buffer: BufferConfig,
        inner_distance: f64,
    },
}

/// Everything known about the origin of a fragment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentLabel {
    pub layer_id: String,
    pub layer_title: String,
    pub object_id: u64,
    pub value_field: Option<String>,
    /// None when no value field was asked for, all fragments of the layer then look alike
    pub value: Option<AttributeValue>,
    pub weight: Option<f64>,
    pub kind: FragmentKind,
}

impl FragmentLabel {
    pub fn buffer(&self) -> Option<BufferConfig> {
        match &self.kind {
            FragmentKind::PolygonClip => None,
            FragmentKind::Buffered { buffer } | FragmentKind::BufferRing { buffer, .. } => {
                Some(*buffer)
            }
        }
    }

    /// the value as used in signatures, with a sentinel for "no value"
    pub fn value_key(&self) -> String {
        match &self.value {
            Some(v) => v.as_key(),
            None => crate::NO_VALUE.to_string(),
        }
    }

    /// the value as shown to a user, empty for "no value"
    pub fn display_value(&self) -> String {
        self.value.as_ref().map(|v| v.to_string()).unwrap_or_default()
    }
}

/// A labelled polygon, one per reference feature intersecting the analysis area
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub geometry: MultiPolygon,
    pub label: FragmentLabel,
}

impl Fragment {
    pub fn new(geometry: MultiPolygon, label: FragmentLabel) -> Fragment {
        Fragment { geometry, label }
    }
}
