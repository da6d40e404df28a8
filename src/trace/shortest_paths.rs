use std::collections::BTreeMap;

use crate::{
    core::{Category, EdgeRef, VertexId},
    error::{GraphanimError, GraphanimResult},
    graph::Graph,
    legend::CategoryLabels,
    trace::{
        Scope, Trace, TraceSource, TraceStep, VisualizationEvent, require_edge, require_vertex,
        vertex_keyed,
    },
};

/// Unweighted shortest paths result artifact: BFS-tree path and hop count
/// per reachable target. Targets replay in increasing vertex-id order; each
/// path lights up Active, is captioned with its distance, then demotes to
/// Resolved before the next target.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShortestPathsArtifact {
    pub paths: BTreeMap<String, Vec<VertexId>>,
    pub distances: BTreeMap<String, f64>,
}

impl TraceSource for ShortestPathsArtifact {
    fn algorithm(&self) -> &'static str {
        "Unweighted Shortest Paths"
    }

    fn category_labels(&self) -> CategoryLabels {
        CategoryLabels {
            active: "Current Path",
            resolved: "Shortest Path",
        }
    }

    #[tracing::instrument(skip_all)]
    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace> {
        let paths = vertex_keyed(self.paths.clone(), "shortest-paths paths")?;
        let distances = vertex_keyed(self.distances.clone(), "shortest-paths distances")?;

        let mut trace = Trace::default();
        for (&target, path) in &paths {
            require_vertex(graph, target, "shortest-paths paths")?;
            for &vertex in path {
                require_vertex(graph, vertex, "shortest-paths paths")?;
            }
            if path.is_empty() {
                // Unreachable target; the engine writes an empty path.
                continue;
            }
            let distance = distances.get(&target).ok_or_else(|| {
                GraphanimError::malformed_artifact(format!(
                    "shortest-paths distances: no distance recorded for vertex {target}"
                ))
            })?;

            let mut highlight = Vec::new();
            let mut demote = Vec::new();
            for &vertex in path {
                highlight.push(VisualizationEvent::SetVertexState {
                    vertex,
                    category: Category::Active,
                    label: None,
                });
                demote.push(VisualizationEvent::SetVertexState {
                    vertex,
                    category: Category::Resolved,
                    label: None,
                });
            }
            for pair in path.windows(2) {
                let edge =
                    require_edge(graph, EdgeRef::new(pair[0], pair[1]), "shortest-paths paths")?;
                highlight.push(VisualizationEvent::SetEdgeState {
                    edge,
                    category: Category::Active,
                    stroke_weight: Some(4.0),
                });
                demote.push(VisualizationEvent::SetEdgeState {
                    edge,
                    category: Category::Resolved,
                    stroke_weight: Some(2.0),
                });
            }
            highlight.push(VisualizationEvent::Annotate {
                scope: Scope::Global,
                text: format!("d({target}) = {distance}"),
            });

            trace.push(TraceStep::new(highlight));
            trace.push(TraceStep::new(demote));
        }
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain3() -> Graph {
        Graph::from_json_str(
            r#"{"vertex_count":3,"edges":[{"from":0,"to":1},{"from":1,"to":2}]}"#,
        )
        .unwrap()
    }

    fn artifact(json: &str) -> ShortestPathsArtifact {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn highlights_then_demotes_each_path() {
        let a = artifact(
            r#"{"paths":{"2":[0,1,2]},"distances":{"2":2}}"#,
        );
        let trace = a.trace(&chain3()).unwrap();
        assert_eq!(trace.steps.len(), 2);

        let highlight = &trace.steps[0].events;
        assert!(highlight.contains(&VisualizationEvent::SetVertexState {
            vertex: 1,
            category: Category::Active,
            label: None,
        }));
        assert!(highlight.contains(&VisualizationEvent::Annotate {
            scope: Scope::Global,
            text: "d(2) = 2".to_string(),
        }));

        let demote = &trace.steps[1].events;
        assert!(demote.contains(&VisualizationEvent::SetEdgeState {
            edge: EdgeRef::new(0, 1),
            category: Category::Resolved,
            stroke_weight: Some(2.0),
        }));
    }

    #[test]
    fn empty_paths_are_skipped() {
        let a = artifact(r#"{"paths":{"1":[],"2":[0,1,2]},"distances":{"2":2}}"#);
        let trace = a.trace(&chain3()).unwrap();
        assert_eq!(trace.steps.len(), 2); // only target 2 produced steps
    }

    #[test]
    fn broken_path_is_malformed() {
        let a = artifact(r#"{"paths":{"2":[0,2]},"distances":{"2":1}}"#);
        assert!(a.trace(&chain3()).is_err());
    }

    #[test]
    fn missing_distance_is_malformed() {
        let a = artifact(r#"{"paths":{"2":[0,1,2]},"distances":{}}"#);
        assert!(a.trace(&chain3()).is_err());
    }

    #[test]
    fn single_vertex_path_needs_no_edges() {
        let a = artifact(r#"{"paths":{"0":[0]},"distances":{"0":0}}"#);
        let trace = a.trace(&chain3()).unwrap();
        assert_eq!(trace.steps.len(), 2);
    }

    #[test]
    fn single_element_path_out_of_range_is_malformed() {
        // No consecutive pairs exist, so edge validation alone never sees
        // the bogus vertex.
        let a = artifact(r#"{"paths":{"9":[9]},"distances":{"9":0}}"#);
        let err = a.trace(&chain3()).unwrap_err();
        assert!(matches!(err, GraphanimError::MalformedArtifact(_)));
    }

    #[test]
    fn target_key_out_of_range_is_malformed() {
        let a = artifact(r#"{"paths":{"9":[0,1]},"distances":{"9":1}}"#);
        let err = a.trace(&chain3()).unwrap_err();
        assert!(matches!(err, GraphanimError::MalformedArtifact(_)));
    }
}
