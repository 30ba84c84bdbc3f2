use crate::analysis::{
    AnalysisArea, BufferConfig, BufferZone, Fragment, FragmentKind, FragmentLabel, LayerSettings,
};
use crate::features::{AttributeValue, Feature, FeatureSource, GeometryKind, LayerInfo};
use crate::geometry::{as_multi_polygon, GeometryOps};
use crate::parameters::AnalysisParameters;
use crate::Result;

use geo::{Geometry, MultiPolygon};

/// The features of one layer that may contribute to the analysis area
#[derive(Debug, Clone)]
pub struct LayerCandidates {
    pub info: LayerInfo,
    pub features: Vec<Feature>,
}

/// Clips every configured layer against the analysis area.
///
/// Layers are queried concurrently, clipping happens afterwards in layer order.
/// A layer that cannot be queried contributes nothing.
pub fn clip_layers<O, S>(
    ops: &O,
    source: &S,
    area: &AnalysisArea,
    layers: &[LayerSettings],
    params: &AnalysisParameters,
) -> Vec<Fragment>
where
    O: GeometryOps + Sync,
    S: FeatureSource,
{
    let candidates = fetch_candidates(ops, source, area, layers, params);

    let mut fragments = vec![];
    for (settings, candidates) in layers.iter().zip(candidates) {
        let Some(candidates) = candidates else {
            continue;
        };
        let layer_fragments = clip_layer(ops, area, &candidates, settings, params);
        log::debug!(
            "Layer {}: {} fragments from {} candidate features",
            settings.layer_id,
            layer_fragments.len(),
            candidates.features.len()
        );
        fragments.extend(layer_fragments);
    }
    fragments
}

/// queries all layers at once, one entry per layer in the order given
pub fn fetch_candidates<O, S>(
    ops: &O,
    source: &S,
    area: &AnalysisArea,
    layers: &[LayerSettings],
    params: &AnalysisParameters,
) -> Vec<Option<LayerCandidates>>
where
    O: GeometryOps + Sync,
    S: FeatureSource,
{
    std::thread::scope(|s| {
        let handles: Vec<_> = layers
            .iter()
            .map(|settings| s.spawn(move || fetch_layer(ops, source, area, settings, params)))
            .collect();

        handles
            .into_iter()
            .zip(layers)
            .map(|(handle, settings)| match handle.join() {
                Ok(Ok(candidates)) => Some(candidates),
                Ok(Err(e)) => {
                    log::warn!("Layer {} is left out of the analysis: {e}", settings.layer_id);
                    None
                }
                Err(_) => {
                    log::error!("Query of layer {} panicked", settings.layer_id);
                    None
                }
            })
            .collect()
    })
}

fn fetch_layer<O: GeometryOps, S: FeatureSource>(
    ops: &O,
    source: &S,
    area: &AnalysisArea,
    settings: &LayerSettings,
    params: &AnalysisParameters,
) -> Result<LayerCandidates> {
    let info = source.layer_info(&settings.layer_id)?;
    area.spatial_reference()
        .ensure_matches(&info.spatial_reference)?;

    let fields: Vec<String> = value_field(settings, params)
        .map(|f| vec![f.to_string()])
        .unwrap_or_default();

    // buffered features reach into the area from outside it
    let features = match buffer_reach(area, settings, params)? {
        Some(reach) => {
            let query = ops
                .buffer(
                    &Geometry::MultiPolygon(area.polygon().clone()),
                    reach.distance,
                    reach.unit,
                    area.spatial_reference(),
                )?
                .unwrap_or_else(|| area.polygon().clone());
            source.query_intersecting(&settings.layer_id, &query, &fields)?
        }
        None => source.query_intersecting(&settings.layer_id, area.polygon(), &fields)?,
    };

    Ok(LayerCandidates { info, features })
}

/// the largest buffer distance configured for the layer
fn buffer_reach(
    area: &AnalysisArea,
    settings: &LayerSettings,
    params: &AnalysisParameters,
) -> Result<Option<BufferConfig>> {
    let sr = area.spatial_reference();
    let mut reach: Option<(f64, BufferConfig)> = None;

    let configured = settings
        .buffer
        .map(|b| (b.distance, b.unit))
        .into_iter()
        .chain(settings.buffer_zones().into_iter().map(|z| (z.distance, z.unit)));

    for (distance, unit) in configured {
        let buffer = BufferConfig {
            distance,
            unit: unit.unwrap_or(params.default_buffer_unit),
        };
        let map_distance = sr.to_map_units(buffer.distance, buffer.unit)?;
        if reach.map_or(true, |(d, _)| map_distance > d) {
            reach = Some((map_distance, buffer));
        }
    }
    Ok(reach.map(|(_, buffer)| buffer))
}

fn value_field<'a>(settings: &'a LayerSettings, params: &'a AnalysisParameters) -> Option<&'a str> {
    settings
        .value_field
        .as_deref()
        .or(params.value_field.as_deref())
}

/// Clips the candidate features of one layer, skipping features that fail
pub fn clip_layer<O: GeometryOps>(
    ops: &O,
    area: &AnalysisArea,
    candidates: &LayerCandidates,
    settings: &LayerSettings,
    params: &AnalysisParameters,
) -> Vec<Fragment> {
    let info = &candidates.info;
    if let Err(e) = area.spatial_reference().ensure_matches(&info.spatial_reference) {
        log::warn!("Layer {} is left out of the analysis: {e}", info.id);
        return vec![];
    }

    let clipper = LayerClipper {
        ops,
        area,
        info,
        settings,
        value_field: value_field(settings, params),
        buffer: settings.buffer.map(|b| BufferConfig {
            distance: b.distance,
            unit: b.unit.unwrap_or(params.default_buffer_unit),
        }),
        zones: settings
            .buffer_zones()
            .into_iter()
            .map(|z| {
                (
                    BufferConfig {
                        distance: z.distance,
                        unit: z.unit.unwrap_or(params.default_buffer_unit),
                    },
                    z,
                )
            })
            .collect(),
    };

    if clipper.buffer.is_some() && !clipper.zones.is_empty() {
        log::warn!(
            "Layer {} has both a buffer and buffer zones, the buffer is ignored",
            info.id
        );
    }
    if clipper.buffer.is_none()
        && clipper.zones.is_empty()
        && !matches!(info.geometry_kind, GeometryKind::Polygon | GeometryKind::Empty)
    {
        log::error!(
            "Layer {} has {:?} geometries but no buffer, only its polygons take part",
            info.id,
            info.geometry_kind
        );
    }

    let mut fragments = vec![];
    for feature in &candidates.features {
        let result = if clipper.zones.is_empty() {
            clipper.clip_feature(feature).map(|f| f.into_iter().collect::<Vec<_>>())
        } else {
            clipper.clip_feature_zones(feature)
        };

        match result {
            Ok(clipped) => fragments.extend(clipped),
            Err(e) => log::warn!(
                "Skipping feature {} of layer {}: {e}",
                feature.object_id,
                info.id
            ),
        }
    }
    fragments
}

struct LayerClipper<'a, O> {
    ops: &'a O,
    area: &'a AnalysisArea,
    info: &'a LayerInfo,
    settings: &'a LayerSettings,
    value_field: Option<&'a str>,
    buffer: Option<BufferConfig>,
    zones: Vec<(BufferConfig, BufferZone)>,
}

impl<O: GeometryOps> LayerClipper<'_, O> {
    fn value(&self, feature: &Feature) -> Option<AttributeValue> {
        self.value_field
            .map(|field| feature.attribute(field).cloned().unwrap_or_default())
    }

    fn fragment(
        &self,
        geometry: MultiPolygon,
        feature: &Feature,
        weight: Option<f64>,
        kind: FragmentKind,
    ) -> Fragment {
        Fragment::new(
            geometry,
            FragmentLabel {
                layer_id: self.info.id.clone(),
                layer_title: self.info.title.clone(),
                object_id: feature.object_id,
                value_field: self.value_field.map(str::to_string),
                value: self.value(feature),
                weight,
                kind,
            },
        )
    }

    fn buffer(&self, feature: &Feature, buffer: BufferConfig) -> Result<Option<MultiPolygon>> {
        self.ops.buffer(
            &feature.geometry,
            buffer.distance,
            buffer.unit,
            self.area.spatial_reference(),
        )
    }

    fn clip(&self, geometry: &MultiPolygon) -> Result<Option<MultiPolygon>> {
        self.ops.intersect(geometry, self.area.polygon())
    }

    /// at most one fragment, buffering (if any) happens before clipping
    fn clip_feature(&self, feature: &Feature) -> Result<Option<Fragment>> {
        let (geometry, kind) = match self.buffer {
            Some(buffer) => match self.buffer(feature, buffer)? {
                Some(buffered) => (buffered, FragmentKind::Buffered { buffer }),
                None => return Ok(None),
            },
            None => match as_multi_polygon(&feature.geometry) {
                Some(polygon) => (polygon, FragmentKind::PolygonClip),
                None => return Ok(None),
            },
        };

        let Some(clipped) = self.clip(&geometry)? else {
            return Ok(None);
        };
        let weight = self.settings.weight_for(self.value(feature).as_ref());
        Ok(Some(self.fragment(clipped, feature, weight, kind)))
    }

    /// the feature itself and one ring per buffer zone around it
    fn clip_feature_zones(&self, feature: &Feature) -> Result<Vec<Fragment>> {
        let mut fragments = vec![];
        let mut inner = as_multi_polygon(&feature.geometry);
        let mut inner_distance = 0.;

        if let Some(own) = &inner {
            if let Some(clipped) = self.clip(own)? {
                let weight = self.settings.weight_for(self.value(feature).as_ref());
                fragments.push(self.fragment(clipped, feature, weight, FragmentKind::PolygonClip));
            }
        }

        for (buffer, zone) in &self.zones {
            let Some(outer) = self.buffer(feature, *buffer)? else {
                continue;
            };
            let ring = match &inner {
                Some(inner) => self.ops.difference(&outer, inner)?,
                None => Some(outer.clone()),
            };

            if let Some(clipped) = ring.map(|r| self.clip(&r)).transpose()?.flatten() {
                fragments.push(self.fragment(
                    clipped,
                    feature,
                    Some(zone.weight),
                    FragmentKind::BufferRing {
                        buffer: *buffer,
                        inner_distance,
                    },
                ));
            }

            inner = Some(outer);
            inner_distance = buffer.distance;
        }
        Ok(fragments)
    }
}
