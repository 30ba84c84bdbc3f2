use crate::analysis::{AnalysisArea, AnalysisRequest, AreaSpec, LayerSettings, OutputGraphic};
use crate::features::FeatureSource;
use crate::geometry::{GeoOps, GeometryOps};
use crate::parameters::AnalysisParameters;
use crate::steps;
use crate::Result;

/// Runs the clip, overlay, grouping and aggregation steps for one area of interest.
///
/// Nothing is kept between runs, every call starts again from the clip step.
pub struct Analysis<'a, S, O = GeoOps> {
    source: &'a S,
    ops: O,
    params: AnalysisParameters,
}

impl<'a, S: FeatureSource> Analysis<'a, S, GeoOps> {
    pub fn new(source: &'a S, params: AnalysisParameters) -> Self {
        let ops = GeoOps::new(params.area_tolerance);
        Analysis {
            source,
            ops,
            params,
        }
    }
}

impl<'a, S: FeatureSource, O: GeometryOps + Sync> Analysis<'a, S, O> {
    pub fn with_ops(source: &'a S, ops: O, params: AnalysisParameters) -> Self {
        Analysis {
            source,
            ops,
            params,
        }
    }

    pub fn resolve_area(&self, spec: &AreaSpec) -> Result<AnalysisArea> {
        spec.resolve(self.source)
    }

    pub fn run(&self, area: &AnalysisArea, layers: &[LayerSettings]) -> Vec<OutputGraphic> {
        let fragments = steps::clip_layers(&self.ops, self.source, area, layers, &self.params);
        if fragments.is_empty() {
            log::info!("No reference layer covers the analysis area");
            return vec![];
        }

        let pieces = steps::subdivide(&self.ops, &fragments);
        let num_pieces = pieces.len();
        let groups = steps::group_pieces(pieces);
        let mut graphics = steps::union_groups(&self.ops, groups);

        if self.params.profile_mode {
            steps::apply_total_weights(&mut graphics);
        }

        log::info!(
            "{} fragments, {} pieces, {} output regions",
            fragments.len(),
            num_pieces,
            graphics.len()
        );
        graphics
    }
}

/// Resolves the area of a request and runs it against `source`
pub fn run_request<S: FeatureSource>(
    source: &S,
    request: &AnalysisRequest,
) -> Result<Vec<OutputGraphic>> {
    let analysis = Analysis::new(source, request.parameters.clone());
    let area = analysis.resolve_area(&request.area)?;
    Ok(analysis.run(&area, &request.layers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SettingsKind;
    use crate::features::{Feature, InMemoryFeatureSource, ReferenceLayer};
    use crate::geometry::SpatialReference;
    use geo::Rect;

    fn sr() -> SpatialReference {
        SpatialReference::new(25833).unwrap()
    }

    fn square_layer(id: &str, title: &str) -> ReferenceLayer {
        ReferenceLayer::new(id, title, sr())
            .with_feature(Feature::new(1, Rect::new((0., 0.), (10., 10.)).to_polygon()))
    }

    fn weighted(id: &str, weight: f64) -> LayerSettings {
        LayerSettings::new(
            id,
            SettingsKind::Weighted {
                weight,
                zones: vec![],
            },
        )
    }

    fn source() -> InMemoryFeatureSource {
        let mut parcels = square_layer("parcels", "Parcels");
        parcels.features[0].object_id = 42;
        InMemoryFeatureSource::new(vec![
            parcels,
            square_layer("a", "A"),
            square_layer("b", "B"),
            square_layer("c", "C"),
        ])
    }

    fn request(profile_mode: bool) -> AnalysisRequest {
        AnalysisRequest {
            area: AreaSpec::Feature {
                layer: "parcels".to_string(),
                object_id: 42,
            },
            layers: vec![weighted("a", 2.), weighted("b", -1.), weighted("c", 3.)],
            parameters: AnalysisParameters {
                profile_mode,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_veto_in_profile_mode() {
        let graphics = run_request(&source(), &request(true)).unwrap();

        assert_eq!(graphics.len(), 1);
        assert_eq!(graphics[0].attributes.layer_ids, vec!["a", "b", "c"]);
        assert_eq!(graphics[0].attributes.total_weight, Some(-1.));
    }

    #[test]
    fn test_total_weight_only_in_profile_mode() {
        let graphics = run_request(&source(), &request(false)).unwrap();
        assert_eq!(graphics[0].attributes.total_weight, None);
    }

    #[test]
    fn test_unresolvable_area_is_an_error() {
        let mut req = request(false);
        req.area = AreaSpec::Feature {
            layer: "parcels".to_string(),
            object_id: 1,
        };
        assert!(run_request(&source(), &req).is_err());
    }

    #[test]
    fn test_no_layers_no_output() {
        let src = source();
        let analysis = Analysis::new(&src, AnalysisParameters::default());
        let area = analysis.resolve_area(&request(false).area).unwrap();

        assert!(analysis.run(&area, &[]).is_empty());
        assert!(analysis.run(&area, &[weighted("missing", 1.)]).is_empty());
    }
}
