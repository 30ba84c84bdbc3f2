use crate::geometry::{LinearUnit, MultiPolygon};

use serde::Serialize;

/// One distinct buffer configuration seen among the members of a region
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferSummary {
    pub layer_id: String,
    pub distance: f64,
    pub unit: LinearUnit,
    pub weight: Option<f64>,
}

/// Attributes of one merged output region.
///
/// The `layer_*` vectors hold one entry per distinct layer (the grouped view),
/// the `member_*` vectors one entry per contributing fragment (the raw view).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputAttributes {
    pub signature: String,
    pub layer_ids: Vec<String>,
    pub layer_titles: Vec<String>,
    pub layer_values: Vec<String>,
    pub layer_weights: Vec<Option<f64>>,

    pub member_layer_ids: Vec<String>,
    pub member_layer_titles: Vec<String>,
    pub member_layer_values: Vec<String>,
    pub member_layer_weights: Vec<Option<f64>>,

    pub buffers: Vec<BufferSummary>,
    // only set when exactly one buffer configuration covers the region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_unit: Option<LinearUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    pub summary_csv: String,
    pub summary_html: String,
    pub area: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputGraphic {
    pub geometry: MultiPolygon,
    pub attributes: OutputAttributes,
}
