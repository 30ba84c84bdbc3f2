use super::{Feature, GeometryKind, ReferenceLayer};
use crate::geometry::{MapMultiPolygon, SpatialReference};
use crate::{Error, Result};

use geo::{Intersects, MultiPolygon};
use serde::{Deserialize, Serialize};

/// What the analysis needs to know about a layer before querying it
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInfo {
    pub id: String,
    pub title: String,
    pub spatial_reference: SpatialReference,
    pub geometry_kind: GeometryKind,
}

/// Read access to the features of the reference layers.
///
/// Queries of different layers are independent and may run concurrently.
pub trait FeatureSource: Sync {
    fn layer_info(&self, layer_id: &str) -> Result<LayerInfo>;

    /// every feature of the layer intersecting `polygon`,
    /// with its attributes restricted to `fields` unless `fields` is empty
    fn query_intersecting(
        &self,
        layer_id: &str,
        polygon: &MultiPolygon,
        fields: &[String],
    ) -> Result<Vec<Feature>>;

    fn fetch_by_object_id(&self, layer_id: &str, object_id: u64) -> Result<Option<Feature>>;
}

/// Feature source over layers held in memory, filtered client side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryFeatureSource {
    layers: Vec<ReferenceLayer>,
}

impl InMemoryFeatureSource {
    pub fn new(layers: Vec<ReferenceLayer>) -> InMemoryFeatureSource {
        InMemoryFeatureSource { layers }
    }

    pub fn layers(&self) -> &[ReferenceLayer] {
        &self.layers
    }

    fn layer(&self, layer_id: &str) -> Result<&ReferenceLayer> {
        self.layers
            .iter()
            .find(|l| l.id == layer_id)
            .ok_or_else(|| Error::UnknownLayer(layer_id.to_string()))
    }
}

impl FeatureSource for InMemoryFeatureSource {
    fn layer_info(&self, layer_id: &str) -> Result<LayerInfo> {
        let layer = self.layer(layer_id)?;
        Ok(LayerInfo {
            id: layer.id.clone(),
            title: layer.title.clone(),
            spatial_reference: layer.spatial_reference,
            geometry_kind: layer.geometry_kind(),
        })
    }

    fn query_intersecting(
        &self,
        layer_id: &str,
        polygon: &MultiPolygon,
        fields: &[String],
    ) -> Result<Vec<Feature>> {
        let layer = self.layer(layer_id)?;
        let Some(extent) = polygon.extent() else {
            return Ok(vec![]);
        };

        let features = layer
            .features
            .iter()
            .filter(|f| f.extent().is_some_and(|e| e.touches(&extent)))
            .filter(|f| f.geometry.intersects(polygon))
            .map(|f| restrict_fields(f, fields))
            .collect::<Vec<_>>();

        log::debug!(
            "Layer {layer_id}: {} of {} features intersect the query polygon",
            features.len(),
            layer.features.len()
        );
        Ok(features)
    }

    fn fetch_by_object_id(&self, layer_id: &str, object_id: u64) -> Result<Option<Feature>> {
        let layer = self.layer(layer_id)?;
        Ok(layer
            .features
            .iter()
            .find(|f| f.object_id == object_id)
            .cloned())
    }
}

fn restrict_fields(feature: &Feature, fields: &[String]) -> Feature {
    if fields.is_empty() {
        return feature.clone();
    }
    Feature {
        object_id: feature.object_id,
        geometry: feature.geometry.clone(),
        attributes: feature
            .attributes
            .iter()
            .filter(|(k, _)| fields.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}
