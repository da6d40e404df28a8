use crate::{
    config::Style,
    core::{Category, Rgba8},
    trace::{Trace, VisualizationEvent},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LegendEntry {
    pub color: Rgba8,
    pub label: String,
}

/// Legend wording for the Active/Resolved categories. The default traversal
/// terms fit BFS/DFS; adapters with their own vocabulary override via
/// `TraceSource::category_labels`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryLabels {
    pub active: &'static str,
    pub resolved: &'static str,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            active: "Current",
            resolved: "Visited",
        }
    }
}

/// Fixed color legend derived once, before playback: one marker + label per
/// category actually used by the trace, in first-use order. Unvisited leads
/// because every scene starts blank.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn for_trace(trace: &Trace, style: &Style, labels: CategoryLabels) -> Self {
        let mut seen = vec![Category::Unvisited];
        for event in trace.events() {
            let category = match event {
                VisualizationEvent::SetVertexState { category, .. } => *category,
                VisualizationEvent::SetEdgeState { category, .. } => *category,
                _ => continue,
            };
            if !seen.contains(&category) {
                seen.push(category);
            }
        }

        let entries = seen
            .into_iter()
            .map(|category| LegendEntry {
                color: style.vertex_color(category),
                label: label_for(category, labels),
            })
            .collect();
        Self { entries }
    }
}

fn label_for(category: Category, labels: CategoryLabels) -> String {
    match category {
        Category::Unvisited => "Unvisited".to_string(),
        Category::Active => labels.active.to_string(),
        Category::Resolved => labels.resolved.to_string(),
        Category::Color(i) => format!("Color {i}"),
    }
}
