use super::Group;
use crate::analysis::{BufferSummary, FragmentLabel, OutputAttributes};

// one entry of the grouped per layer view
struct LayerEntry {
    id: String,
    titles: Vec<String>,
    values: Vec<String>,
    weight: Option<f64>,
}

/// Summarizes the members of a group, `area` is left for the caller to fill in.
///
/// Per layer the lowest weight wins when several members disagree.
pub fn aggregate(group: &Group) -> OutputAttributes {
    let members = &group.members;
    let layers = group_by_layer(members);
    let buffers = distinct_buffers(members);

    let single_buffer = match buffers.as_slice() {
        [only] => Some(only.clone()),
        _ => None,
    };

    let pairs: Vec<(String, String)> = layers
        .iter()
        .map(|l| (l.titles.join(", "), l.values.join(", ")))
        .collect();

    OutputAttributes {
        signature: group.signature.to_string(),
        layer_ids: layers.iter().map(|l| l.id.clone()).collect(),
        layer_titles: pairs.iter().map(|(t, _)| t.clone()).collect(),
        layer_values: pairs.iter().map(|(_, v)| v.clone()).collect(),
        layer_weights: layers.iter().map(|l| l.weight).collect(),

        member_layer_ids: members.iter().map(|m| m.layer_id.clone()).collect(),
        member_layer_titles: members.iter().map(|m| m.layer_title.clone()).collect(),
        member_layer_values: members.iter().map(FragmentLabel::display_value).collect(),
        member_layer_weights: members.iter().map(|m| m.weight).collect(),

        buffer_distance: single_buffer.as_ref().map(|b| b.distance),
        buffer_unit: single_buffer.as_ref().map(|b| b.unit),
        weight: single_buffer.and_then(|b| b.weight),
        buffers,

        summary_csv: summary_csv(&pairs),
        summary_html: summary_html(&pairs),
        area: 0.,
        total_weight: None,
    }
}

fn group_by_layer(members: &[FragmentLabel]) -> Vec<LayerEntry> {
    let mut layers: Vec<LayerEntry> = vec![];

    for member in members {
        let i = match layers.iter().position(|l| l.id == member.layer_id) {
            Some(i) => i,
            None => {
                layers.push(LayerEntry {
                    id: member.layer_id.clone(),
                    titles: vec![],
                    values: vec![],
                    weight: None,
                });
                layers.len() - 1
            }
        };
        let entry = &mut layers[i];

        push_unique(&mut entry.titles, member.layer_title.clone());
        let value = member.display_value();
        if !value.is_empty() {
            push_unique(&mut entry.values, value);
        }
        entry.weight = min_weight(entry.weight, member.weight);
    }
    layers
}

fn distinct_buffers(members: &[FragmentLabel]) -> Vec<BufferSummary> {
    let mut buffers: Vec<BufferSummary> = vec![];
    for member in members {
        let Some(buffer) = member.buffer() else {
            continue;
        };
        let summary = BufferSummary {
            layer_id: member.layer_id.clone(),
            distance: buffer.distance,
            unit: buffer.unit,
            weight: member.weight,
        };
        if !buffers.contains(&summary) {
            buffers.push(summary);
        }
    }
    buffers
}

fn push_unique(list: &mut Vec<String>, s: String) {
    if !list.contains(&s) {
        list.push(s);
    }
}

fn min_weight(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn summary_csv(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(title, value)| csv_field(&pair_text(title, value)))
        .collect::<Vec<_>>()
        .join(",")
}

fn summary_html(pairs: &[(String, String)]) -> String {
    let mut html = String::from("<ul>");
    for (title, value) in pairs {
        html.push_str("<li><b>");
        html.push_str(&escape_html(title));
        html.push_str("</b>");
        if !value.is_empty() {
            html.push_str(": ");
            html.push_str(&escape_html(value));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

fn pair_text(title: &str, value: &str) -> String {
    if value.is_empty() {
        title.to_string()
    } else {
        format!("{title}: {value}")
    }
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
