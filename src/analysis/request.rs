use super::{AnalysisArea, LayerSettings};
use crate::features::{FeatureSource, InMemoryFeatureSource};
use crate::geometry::SpatialReference;
use crate::parameters::AnalysisParameters;
use crate::Result;

use geo::Geometry;
use serde::{Deserialize, Serialize};

/// Where the area of interest comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AreaSpec {
    Inline {
        geometry: Geometry,
        spatial_reference: SpatialReference,
    },
    Feature {
        layer: String,
        object_id: u64,
    },
}

impl AreaSpec {
    pub fn resolve(&self, source: &impl FeatureSource) -> Result<AnalysisArea> {
        match self {
            AreaSpec::Inline {
                geometry,
                spatial_reference,
            } => AnalysisArea::new(geometry, *spatial_reference),
            AreaSpec::Feature { layer, object_id } => {
                AnalysisArea::from_feature(source, layer, *object_id)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub area: AreaSpec,
    pub layers: Vec<LayerSettings>,
    #[serde(default)]
    pub parameters: AnalysisParameters,
}

/// A request bundled with the reference layers it runs against
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisDocument {
    pub reference_layers: InMemoryFeatureSource,
    pub area: AreaSpec,
    pub layers: Vec<LayerSettings>,
    #[serde(default)]
    pub parameters: AnalysisParameters,
}

impl AnalysisDocument {
    pub fn from_json(json: &str) -> Result<AnalysisDocument> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_parts(self) -> (InMemoryFeatureSource, AnalysisRequest) {
        (
            self.reference_layers,
            AnalysisRequest {
                area: self.area,
                layers: self.layers,
                parameters: self.parameters,
            },
        )
    }
}
