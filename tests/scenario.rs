use overlay_analysis::analysis::{
    AnalysisDocument, AnalysisRequest, AreaSpec, LayerSettings, OutputGraphic, SettingsKind,
};
use overlay_analysis::features::{Feature, InMemoryFeatureSource, ReferenceLayer};
use overlay_analysis::geometry::{LinearUnit, SpatialReference};
use overlay_analysis::{run_request, AnalysisParameters};

use geo::{point, Rect};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::f64::consts::PI;

fn utm() -> SpatialReference {
    SpatialReference::new(25833).unwrap()
}

fn rect(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> geo::Polygon {
    Rect::new((xmin, ymin), (xmax, ymax)).to_polygon()
}

fn inline_area() -> AreaSpec {
    AreaSpec::Inline {
        geometry: rect(0., 0., 10., 10.).into(),
        spatial_reference: utm(),
    }
}

fn enum_layer(id: &str, weights: &[(&str, f64)]) -> LayerSettings {
    LayerSettings::new(
        id,
        SettingsKind::Enum {
            weights: weights
                .iter()
                .map(|(k, w)| (k.to_string(), *w))
                .collect::<BTreeMap<_, _>>(),
        },
    )
    .with_value_field("class")
}

fn areas(graphics: &[OutputGraphic]) -> Vec<f64> {
    graphics
        .iter()
        .map(|g| (g.attributes.area * 1e6).round() / 1e6)
        .collect()
}

#[test]
fn two_overlapping_layers() {
    let source = InMemoryFeatureSource::new(vec![
        ReferenceLayer::new("a", "Layer A", utm())
            .with_feature(Feature::new(1, rect(0., 0., 5., 10.)).with_attribute("class", "X")),
        ReferenceLayer::new("b", "Layer B", utm())
            .with_feature(Feature::new(7, rect(3., 0., 10., 10.)).with_attribute("class", "Y")),
    ]);
    let request = AnalysisRequest {
        area: inline_area(),
        layers: vec![
            enum_layer("a", &[("X", 1.)]),
            enum_layer("b", &[("Y", 4.)]),
        ],
        parameters: AnalysisParameters {
            profile_mode: true,
            ..Default::default()
        },
    };

    let graphics = run_request(&source, &request).unwrap();

    assert_eq!(areas(&graphics), vec![30., 20., 50.]);
    assert_eq!(graphics[0].attributes.layer_ids, vec!["a"]);
    assert_eq!(graphics[0].attributes.layer_values, vec!["X"]);
    assert_eq!(graphics[1].attributes.layer_ids, vec!["a", "b"]);
    assert_eq!(graphics[1].attributes.layer_titles, vec!["Layer A", "Layer B"]);
    assert_eq!(graphics[1].attributes.layer_values, vec!["X", "Y"]);
    assert_eq!(graphics[2].attributes.layer_ids, vec!["b"]);
    assert_eq!(graphics[2].attributes.layer_values, vec!["Y"]);

    let totals: Vec<Option<f64>> = graphics.iter().map(|g| g.attributes.total_weight).collect();
    assert_eq!(totals, vec![Some(1.), Some(5.), Some(4.)]);
}

#[test]
fn buffered_point_vetoes_its_surroundings() {
    let source = InMemoryFeatureSource::new(vec![
        ReferenceLayer::new("soil", "Soil", utm())
            .with_feature(Feature::new(1, rect(0., 0., 10., 10.)).with_attribute("class", "clay")),
        ReferenceLayer::new("wells", "Wells", utm())
            .with_feature(Feature::new(2, point!(x: 5., y: 5.))),
    ]);
    let request = AnalysisRequest {
        area: inline_area(),
        layers: vec![
            enum_layer("soil", &[("clay", 2.)]),
            LayerSettings::new(
                "wells",
                SettingsKind::Weighted {
                    weight: -1.,
                    zones: vec![],
                },
            )
            .with_buffer(2., Some(LinearUnit::Meters)),
        ],
        parameters: AnalysisParameters {
            profile_mode: true,
            ..Default::default()
        },
    };

    let graphics = run_request(&source, &request).unwrap();
    assert_eq!(graphics.len(), 2);

    let (outside, inside) = (&graphics[0].attributes, &graphics[1].attributes);
    assert_eq!(outside.layer_ids, vec!["soil"]);
    assert_eq!(outside.total_weight, Some(2.));
    assert_eq!(outside.buffer_distance, None);

    assert_eq!(inside.layer_ids, vec!["soil", "wells"]);
    assert_eq!(inside.total_weight, Some(-1.));
    assert_eq!(inside.buffer_distance, Some(2.));
    assert_eq!(inside.buffer_unit, Some(LinearUnit::Meters));
    assert_eq!(inside.weight, Some(-1.));

    assert!((inside.area - 4. * PI).abs() < 0.2);
    assert!((outside.area + inside.area - 100.).abs() < 1e-6);
}

#[test]
fn document_round_trip_through_json() {
    let json = r#"{
        "reference_layers": [
            {
                "id": "parcels",
                "title": "Parcels",
                "spatial_reference": 25833,
                "features": [
                    {
                        "object_id": 12,
                        "geometry": { "Rect": { "min": { "x": 0.0, "y": 0.0 }, "max": { "x": 10.0, "y": 10.0 } } }
                    }
                ]
            },
            {
                "id": "slope",
                "title": "Slope",
                "spatial_reference": 25833,
                "features": [
                    {
                        "object_id": 1,
                        "geometry": { "Rect": { "min": { "x": 0.0, "y": 0.0 }, "max": { "x": 4.0, "y": 10.0 } } },
                        "attributes": { "deg": 12.5 }
                    },
                    {
                        "object_id": 2,
                        "geometry": { "Rect": { "min": { "x": 4.0, "y": 0.0 }, "max": { "x": 20.0, "y": 10.0 } } },
                        "attributes": { "deg": 40 }
                    }
                ]
            }
        ],
        "area": { "layer": "parcels", "object_id": 12 },
        "layers": [
            {
                "layer_id": "slope",
                "value_field": "deg",
                "kind": "numeric",
                "classes": [{ "max": 30, "weight": 1 }, { "min": 30, "weight": -1 }]
            }
        ]
    }"#;

    let (source, request) = AnalysisDocument::from_json(json).unwrap().into_parts();
    let graphics = run_request(&source, &request).unwrap();

    assert_eq!(areas(&graphics), vec![40., 60.]);
    assert_eq!(graphics[0].attributes.layer_weights, vec![Some(1.)]);
    assert_eq!(graphics[1].attributes.layer_weights, vec![Some(-1.)]);
    assert_eq!(graphics[1].attributes.total_weight, None);

    let out = serde_json::to_value(&graphics[1]).unwrap();
    assert_eq!(out["attributes"]["layerValues"][0], "40");
    assert_eq!(out["attributes"]["signature"], "slope:40::");
}
