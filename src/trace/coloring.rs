use std::collections::{BTreeMap, BTreeSet};

use crate::{
    core::Category,
    error::GraphanimResult,
    graph::Graph,
    trace::{Scope, Trace, TraceSource, TraceStep, VisualizationEvent, require_vertex, vertex_keyed},
};

/// Greedy coloring result artifact: color index per vertex. Vertices replay
/// in increasing vertex-id order; the color index carries through to the
/// palette via `Category::Color`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ColoringArtifact {
    pub coloring: BTreeMap<String, u32>,
}

impl TraceSource for ColoringArtifact {
    fn algorithm(&self) -> &'static str {
        "Greedy Graph Coloring"
    }

    #[tracing::instrument(skip_all)]
    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace> {
        let coloring = vertex_keyed(self.coloring.clone(), "coloring")?;

        let mut trace = Trace::default();
        let mut used = BTreeSet::new();
        for (&vertex, &color) in &coloring {
            require_vertex(graph, vertex, "coloring")?;
            used.insert(color);
            trace.push(TraceStep::new(vec![
                VisualizationEvent::SetVertexState {
                    vertex,
                    category: Category::Color(color),
                    label: None,
                },
                VisualizationEvent::Annotate {
                    scope: Scope::Global,
                    text: format!("Coloring vertex {vertex} with color {color}"),
                },
            ]));
        }

        trace.push(TraceStep::single(VisualizationEvent::Annotate {
            scope: Scope::Global,
            text: format!("Graph colored using {} colors!", used.len()),
        }));
        Ok(trace)
    }
}
