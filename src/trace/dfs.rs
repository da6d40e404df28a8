use crate::{
    core::{Category, EdgeRef, VertexId},
    error::GraphanimResult,
    graph::Graph,
    trace::{Scope, Trace, TraceSource, TraceStep, VisualizationEvent, require_vertex},
};

/// DFS result artifact. Like BFS, the walk is replayed from the graph:
/// preorder tree edges with edge-list-order neighbors. A vertex resolves the
/// first time it is encountered (visited-on-discovery), not on backtrack.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct DfsArtifact {
    pub start_vertex: VertexId,
}

impl TraceSource for DfsArtifact {
    fn algorithm(&self) -> &'static str {
        "Depth-First Search"
    }

    #[tracing::instrument(skip(graph))]
    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace> {
        require_vertex(graph, self.start_vertex, "DFS start_vertex")?;

        let mut trace = Trace::default();
        let mut visited = vec![false; graph.vertex_count as usize];
        let mut step = 0usize;

        let mut visit = |trace: &mut Trace, vertex: VertexId, step: usize| {
            trace.push(TraceStep::new(vec![
                VisualizationEvent::SetVertexState {
                    vertex,
                    category: Category::Resolved,
                    label: None,
                },
                VisualizationEvent::Annotate {
                    scope: Scope::Global,
                    text: format!("Step {step}: Visit vertex {vertex}"),
                },
            ]));
        };

        // Stack of (vertex, next neighbor offset) gives the same preorder
        // tree-edge sequence as a recursive walk.
        let mut stack = vec![(self.start_vertex, 0usize)];
        visited[self.start_vertex as usize] = true;
        step += 1;
        visit(&mut trace, self.start_vertex, step);

        while let Some((current, offset)) = stack.pop() {
            let neighbors = graph.neighbors(current);
            if let Some(&next) = neighbors.get(offset) {
                stack.push((current, offset + 1));
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    step += 1;
                    trace.push(TraceStep::single(VisualizationEvent::SetEdgeState {
                        edge: EdgeRef::new(current, next),
                        category: Category::Active,
                        stroke_weight: None,
                    }));
                    visit(&mut trace, next, step);
                    stack.push((next, 0));
                }
            }
        }

        trace.push(TraceStep::single(VisualizationEvent::Annotate {
            scope: Scope::Global,
            text: "DFS Complete!".to_string(),
        }));
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        // 0-1, 0-2, 1-3, 2-3: DFS from 0 goes deep through 1 before 2.
        Graph::from_json_str(
            r#"{"vertex_count":4,"edges":[
                {"from":0,"to":1},{"from":0,"to":2},
                {"from":1,"to":3},{"from":2,"to":3}]}"#,
        )
        .unwrap()
    }

    fn visits(trace: &Trace) -> Vec<VertexId> {
        trace
            .events()
            .filter_map(|e| match e {
                VisualizationEvent::SetVertexState { vertex, .. } => Some(*vertex),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn preorder_discovery() {
        let trace = DfsArtifact { start_vertex: 0 }.trace(&diamond()).unwrap();
        // 0 -> 1 -> 3 -> (backtrack to 3's neighbor 2) -> 2
        assert_eq!(visits(&trace), vec![0, 1, 3, 2]);
    }

    #[test]
    fn vertices_resolve_on_discovery() {
        let trace = DfsArtifact { start_vertex: 0 }.trace(&diamond()).unwrap();
        for e in trace.events() {
            if let VisualizationEvent::SetVertexState { category, .. } = e {
                assert_eq!(*category, Category::Resolved);
            }
        }
    }

    #[test]
    fn tree_edges_precede_their_target_visit() {
        let trace = DfsArtifact { start_vertex: 0 }.trace(&diamond()).unwrap();
        let edges: Vec<EdgeRef> = trace
            .events()
            .filter_map(|e| match e {
                VisualizationEvent::SetEdgeState { edge, .. } => Some(*edge),
                _ => None,
            })
            .collect();
        assert_eq!(
            edges,
            vec![
                EdgeRef::new(0, 1),
                EdgeRef::new(1, 3),
                EdgeRef::new(3, 2),
            ]
        );
    }

    #[test]
    fn captions_number_the_steps() {
        let trace = DfsArtifact { start_vertex: 0 }.trace(&diamond()).unwrap();
        let captions: Vec<&str> = trace
            .events()
            .filter_map(|e| match e {
                VisualizationEvent::Annotate { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(captions[0], "Step 1: Visit vertex 0");
        assert_eq!(captions[1], "Step 2: Visit vertex 1");
        assert_eq!(*captions.last().unwrap(), "DFS Complete!");
    }

    #[test]
    fn isolated_start_still_visits_itself() {
        let g = Graph::from_json_str(r#"{"vertex_count":1,"edges":[]}"#).unwrap();
        let trace = DfsArtifact { start_vertex: 0 }.trace(&g).unwrap();
        assert_eq!(visits(&trace), vec![0]);
    }
}
