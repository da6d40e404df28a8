use std::collections::BTreeSet;

use crate::{
    core::{Category, EdgeRef, VertexId},
    error::{GraphanimError, GraphanimResult},
    graph::Graph,
    trace::{Scope, Trace, TraceSource, TraceStep, VisualizationEvent, require_vertex},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Component {
    pub vertices: Vec<VertexId>,
}

/// Connected components result artifact. Components replay in array order;
/// component `i` gets palette color `i`, applied to all member vertices and
/// all internal edges in one batched step.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ComponentsArtifact {
    pub components_count: usize,
    pub components: Vec<Component>,
}

impl TraceSource for ComponentsArtifact {
    fn algorithm(&self) -> &'static str {
        "Connected Components"
    }

    #[tracing::instrument(skip_all)]
    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace> {
        if self.components_count != self.components.len() {
            return Err(GraphanimError::malformed_artifact(format!(
                "components: components_count is {} but {} components are listed",
                self.components_count,
                self.components.len()
            )));
        }

        let mut trace = Trace::default();
        for (index, component) in self.components.iter().enumerate() {
            let members: BTreeSet<VertexId> = component.vertices.iter().copied().collect();
            let color = Category::Color(index as u32);

            let mut events = Vec::new();
            for &vertex in &component.vertices {
                require_vertex(graph, vertex, "components")?;
                events.push(VisualizationEvent::SetVertexState {
                    vertex,
                    category: color,
                    label: None,
                });
            }
            for edge in &graph.edges {
                if members.contains(&edge.from) && members.contains(&edge.to) {
                    events.push(VisualizationEvent::SetEdgeState {
                        edge: EdgeRef::new(edge.from, edge.to),
                        category: color,
                        stroke_weight: None,
                    });
                }
            }
            events.push(VisualizationEvent::Annotate {
                scope: Scope::Global,
                text: format!("Component {}: {:?}", index + 1, component.vertices),
            });
            trace.push(TraceStep::new(events));
        }

        trace.push(TraceStep::single(VisualizationEvent::Annotate {
            scope: Scope::Global,
            text: format!("Found {} components!", self.components_count),
        }));
        Ok(trace)
    }
}
