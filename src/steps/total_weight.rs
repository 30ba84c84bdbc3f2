use crate::analysis::{OutputAttributes, OutputGraphic};

use std::collections::BTreeMap;

/// A minimum weight at or below this vetoes the whole region
pub const VETO_WEIGHT: f64 = -1.;

/// Sums the lowest weight of every contributing layer title.
///
/// Uses the raw per member arrays so that several buffer rings of one layer
/// count once. Any per title minimum at or below `VETO_WEIGHT` forces the
/// total to exactly `VETO_WEIGHT`. None if no member carries a weight.
pub fn total_weight(attributes: &OutputAttributes) -> Option<f64> {
    let mut per_title: BTreeMap<&str, f64> = BTreeMap::new();

    for (title, weight) in attributes
        .member_layer_titles
        .iter()
        .zip(&attributes.member_layer_weights)
    {
        let Some(weight) = *weight else {
            continue;
        };
        per_title
            .entry(title.as_str())
            .and_modify(|w| *w = w.min(weight))
            .or_insert(weight);
    }

    if per_title.is_empty() {
        return None;
    }
    if per_title.values().any(|w| *w <= VETO_WEIGHT) {
        return Some(VETO_WEIGHT);
    }
    Some(per_title.values().sum())
}

pub fn apply_total_weights(graphics: &mut [OutputGraphic]) {
    for graphic in graphics {
        graphic.attributes.total_weight = total_weight(&graphic.attributes);
    }
}
