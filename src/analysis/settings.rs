use crate::features::AttributeValue;
use crate::geometry::LinearUnit;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A buffer as configured, the unit falls back to the analysis default
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferSpec {
    pub distance: f64,
    #[serde(default)]
    pub unit: Option<LinearUnit>,
}

/// One graduated zone around the features of a weighted layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferZone {
    pub distance: f64,
    #[serde(default)]
    pub unit: Option<LinearUnit>,
    pub weight: f64,
}

/// Half open numeric range `[min, max)` with a weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericClass {
    #[serde(default = "f64_neg_infinity")]
    pub min: f64,
    #[serde(default = "f64_infinity")]
    pub max: f64,
    pub weight: f64,
}

fn f64_neg_infinity() -> f64 {
    f64::NEG_INFINITY
}

fn f64_infinity() -> f64 {
    f64::INFINITY
}

impl NumericClass {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SettingsKind {
    /// weights looked up by the exact attribute value
    Enum {
        #[serde(default)]
        weights: BTreeMap<String, f64>,
    },
    /// weights looked up by the class the numeric attribute value falls in
    Numeric {
        #[serde(default)]
        classes: Vec<NumericClass>,
    },
    /// one weight for the whole layer, optionally with buffer zones around its features
    Weighted {
        weight: f64,
        #[serde(default)]
        zones: Vec<BufferZone>,
    },
}

/// How one reference layer takes part in an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSettings {
    pub layer_id: String,
    #[serde(default)]
    pub value_field: Option<String>,
    /// required for point and line layers, optional for polygon layers
    #[serde(default)]
    pub buffer: Option<BufferSpec>,
    #[serde(flatten)]
    pub kind: SettingsKind,
}

impl LayerSettings {
    pub fn new(layer_id: &str, kind: SettingsKind) -> LayerSettings {
        LayerSettings {
            layer_id: layer_id.to_string(),
            value_field: None,
            buffer: None,
            kind,
        }
    }

    pub fn with_value_field(mut self, field: &str) -> LayerSettings {
        self.value_field = Some(field.to_string());
        self
    }

    pub fn with_buffer(mut self, distance: f64, unit: Option<LinearUnit>) -> LayerSettings {
        self.buffer = Some(BufferSpec { distance, unit });
        self
    }

    pub fn weight_for(&self, value: Option<&AttributeValue>) -> Option<f64> {
        match &self.kind {
            SettingsKind::Enum { weights } => value.and_then(|v| weights.get(&v.as_key()).copied()),
            SettingsKind::Numeric { classes } => {
                let v = value.and_then(AttributeValue::as_f64)?;
                classes.iter().find(|c| c.contains(v)).map(|c| c.weight)
            }
            SettingsKind::Weighted { weight, .. } => Some(*weight),
        }
    }

    /// zones sorted from the innermost outwards
    pub fn buffer_zones(&self) -> Vec<BufferZone> {
        match &self.kind {
            SettingsKind::Enum { .. } | SettingsKind::Numeric { .. } => vec![],
            SettingsKind::Weighted { zones, .. } => {
                let mut zones = zones.clone();
                zones.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                zones
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_weights() {
        let settings = LayerSettings::new(
            "soil",
            SettingsKind::Enum {
                weights: BTreeMap::from([("clay".to_string(), 2.), ("7".to_string(), -1.)]),
            },
        );

        assert_eq!(settings.weight_for(Some(&AttributeValue::from("clay"))), Some(2.));
        assert_eq!(settings.weight_for(Some(&AttributeValue::Number(7.))), Some(-1.));
        assert_eq!(settings.weight_for(Some(&AttributeValue::from("sand"))), None);
        assert_eq!(settings.weight_for(None), None);
    }

    #[test]
    fn test_numeric_classes() {
        let settings = LayerSettings::new(
            "slope",
            SettingsKind::Numeric {
                classes: vec![
                    NumericClass {
                        min: f64::NEG_INFINITY,
                        max: 10.,
                        weight: 3.,
                    },
                    NumericClass {
                        min: 10.,
                        max: 30.,
                        weight: 1.,
                    },
                ],
            },
        );

        assert_eq!(settings.weight_for(Some(&AttributeValue::Number(9.99))), Some(3.));
        assert_eq!(settings.weight_for(Some(&AttributeValue::Number(10.))), Some(1.));
        assert_eq!(settings.weight_for(Some(&AttributeValue::from("12"))), Some(1.));
        assert_eq!(settings.weight_for(Some(&AttributeValue::Number(30.))), None);
        assert_eq!(settings.weight_for(Some(&AttributeValue::Null)), None);
    }

    #[test]
    fn test_weighted_zones_sorted() {
        let zone = |distance, weight| BufferZone {
            distance,
            unit: None,
            weight,
        };
        let settings = LayerSettings::new(
            "wells",
            SettingsKind::Weighted {
                weight: -1.,
                zones: vec![zone(100., 1.), zone(50., -1.)],
            },
        );

        assert_eq!(settings.weight_for(None), Some(-1.));
        let distances: Vec<f64> = settings.buffer_zones().iter().map(|z| z.distance).collect();
        assert_eq!(distances, vec![50., 100.]);
    }

    #[test]
    fn test_deserialize_tagged_settings() {
        let settings: LayerSettings = serde_json::from_str(
            r#"{
                "layer_id": "wells",
                "buffer": { "distance": 50 },
                "kind": "weighted",
                "weight": 2
            }"#,
        )
        .unwrap();

        assert_eq!(
            settings.kind,
            SettingsKind::Weighted {
                weight: 2.,
                zones: vec![]
            }
        );
        assert_eq!(
            settings.buffer,
            Some(BufferSpec {
                distance: 50.,
                unit: None
            })
        );

        let numeric: LayerSettings = serde_json::from_str(
            r#"{ "layer_id": "slope", "value_field": "deg", "kind": "numeric",
                 "classes": [{ "max": 10, "weight": 1 }] }"#,
        )
        .unwrap();
        assert_eq!(numeric.weight_for(Some(&AttributeValue::Number(-4.))), Some(1.));
    }
}
