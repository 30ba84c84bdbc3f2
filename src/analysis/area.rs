use crate::features::FeatureSource;
use crate::geometry::{as_multi_polygon, MapMultiPolygon, SpatialReference};
use crate::{Error, Result};

use geo::{Area, Geometry, MultiPolygon};

/// The validated polygon every reference layer is clipped against
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisArea {
    polygon: MultiPolygon,
    spatial_reference: SpatialReference,
}

impl AnalysisArea {
    pub fn new(geometry: &Geometry, spatial_reference: SpatialReference) -> Result<AnalysisArea> {
        let polygon = as_multi_polygon(geometry)
            .and_then(|mp| mp.into_polygonal(0.))
            .ok_or(Error::NonPolygonalBase)?;

        Ok(AnalysisArea {
            polygon,
            spatial_reference,
        })
    }

    /// looks up the area by object id in one of the layers of `source`
    pub fn from_feature(
        source: &impl FeatureSource,
        layer_id: &str,
        object_id: u64,
    ) -> Result<AnalysisArea> {
        let info = source.layer_info(layer_id)?;
        let feature = source
            .fetch_by_object_id(layer_id, object_id)?
            .ok_or_else(|| Error::MissingBaseFeature {
                layer: layer_id.to_string(),
                object_id,
            })?;

        AnalysisArea::new(&feature.geometry, info.spatial_reference)
    }

    pub fn polygon(&self) -> &MultiPolygon {
        &self.polygon
    }

    pub fn spatial_reference(&self) -> SpatialReference {
        self.spatial_reference
    }

    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }
}
