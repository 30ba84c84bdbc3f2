use crate::geometry::LinearUnit;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParameters {
    // results with an area at or below this are not polygons
    pub area_tolerance: f64,
    // used by buffers configured without a unit
    pub default_buffer_unit: LinearUnit,
    // value field for layers that do not name their own
    pub value_field: Option<String>,
    // compute the total weight of every output region
    pub profile_mode: bool,
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        Self {
            area_tolerance: crate::DEFAULT_AREA_TOLERANCE,
            default_buffer_unit: LinearUnit::Meters,
            value_field: None,
            profile_mode: false,
        }
    }
}
