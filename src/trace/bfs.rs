use std::collections::VecDeque;

use crate::{
    core::{Category, EdgeRef, VertexId},
    error::GraphanimResult,
    graph::Graph,
    trace::{Scope, Trace, TraceSource, TraceStep, VisualizationEvent, require_vertex},
};

/// BFS result artifact: the engine only records the start vertex; the
/// level-order visitation is replayed from the graph with edge-list-order
/// neighbors.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct BfsArtifact {
    pub start_vertex: VertexId,
}

impl TraceSource for BfsArtifact {
    fn algorithm(&self) -> &'static str {
        "Breadth-First Search"
    }

    #[tracing::instrument(skip(graph))]
    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace> {
        require_vertex(graph, self.start_vertex, "BFS start_vertex")?;

        let mut trace = Trace::default();
        let mut visited = vec![false; graph.vertex_count as usize];
        let mut queue = VecDeque::new();

        visited[self.start_vertex as usize] = true;
        queue.push_back(self.start_vertex);
        trace.push(TraceStep::single(VisualizationEvent::SetVertexState {
            vertex: self.start_vertex,
            category: Category::Active,
            label: None,
        }));

        while let Some(current) = queue.pop_front() {
            for next in graph.neighbors(current) {
                if visited[next as usize] {
                    continue;
                }
                visited[next as usize] = true;
                queue.push_back(next);
                trace.push(TraceStep::new(vec![
                    VisualizationEvent::SetEdgeState {
                        edge: EdgeRef::new(current, next),
                        category: Category::Active,
                        stroke_weight: None,
                    },
                    VisualizationEvent::SetVertexState {
                        vertex: next,
                        category: Category::Active,
                        label: None,
                    },
                    VisualizationEvent::Annotate {
                        scope: Scope::Global,
                        text: format!("Exploring vertex {next}"),
                    },
                ]));
            }
            // All tree edges out of `current` have been emitted.
            trace.push(TraceStep::single(VisualizationEvent::SetVertexState {
                vertex: current,
                category: Category::Resolved,
                label: None,
            }));
        }

        trace.push(TraceStep::single(VisualizationEvent::Annotate {
            scope: Scope::Global,
            text: "BFS Complete!".to_string(),
        }));
        Ok(trace)
    }
}
