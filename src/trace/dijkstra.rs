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

/// A tentative or final distance: a number, or "∞" for unreachable vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    Finite(f64),
    Infinite,
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(d) if d.fract() == 0.0 => write!(f, "{}", *d as i64),
            Self::Finite(d) => write!(f, "{d}"),
            Self::Infinite => write!(f, "∞"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Distance {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(de)? {
            Raw::Number(d) => Ok(Self::Finite(d)),
            Raw::Text(s) if s == "∞" || s == "inf" => Ok(Self::Infinite),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "distance must be a number or \"∞\", got '{s}'"
            ))),
        }
    }
}

impl serde::Serialize for Distance {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(d) => ser.serialize_f64(*d),
            Self::Infinite => ser.serialize_str("∞"),
        }
    }
}

/// Dijkstra result artifact: the recorded distance and shortest-path-tree
/// path per finalized vertex, keyed by vertex id. Targets replay in
/// increasing vertex-id order (the engine finalizes ids in that order).
///
/// Captions use the full path string ("0 → 2 → 4 (d=7)") rather than bare
/// distance labels; per-vertex `d=` labels are updated alongside.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DijkstraArtifact {
    pub start_vertex: VertexId,
    pub distances: BTreeMap<String, Distance>,
    pub paths: BTreeMap<String, Vec<VertexId>>,
}

impl TraceSource for DijkstraArtifact {
    fn algorithm(&self) -> &'static str {
        "Dijkstra's Algorithm"
    }

    fn category_labels(&self) -> CategoryLabels {
        CategoryLabels {
            active: "Processing",
            resolved: "Processed",
        }
    }

    #[tracing::instrument(skip_all)]
    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace> {
        require_vertex(graph, self.start_vertex, "Dijkstra start_vertex")?;
        let distances = vertex_keyed(self.distances.clone(), "Dijkstra distances")?;
        let paths = vertex_keyed(self.paths.clone(), "Dijkstra paths")?;

        let mut trace = Trace::default();

        // The source is active at time zero; every vertex carries its
        // tentative distance label (∞ until recorded otherwise).
        let mut init = vec![VisualizationEvent::SetVertexState {
            vertex: self.start_vertex,
            category: Category::Active,
            label: None,
        }];
        for v in 0..graph.vertex_count {
            let d = distances.get(&v).copied().unwrap_or(Distance::Infinite);
            init.push(VisualizationEvent::Annotate {
                scope: Scope::Vertex(v),
                text: format!("d={d}"),
            });
        }
        trace.push(TraceStep::new(init));

        for (&target, path) in &paths {
            require_vertex(graph, target, "Dijkstra paths")?;
            for &vertex in path {
                require_vertex(graph, vertex, "Dijkstra paths")?;
            }
            if path.is_empty() {
                return Err(GraphanimError::malformed_artifact(format!(
                    "Dijkstra paths: path for vertex {target} is empty"
                )));
            }
            if path.len() < 2 {
                continue;
            }

            let distance = distances.get(&target).ok_or_else(|| {
                GraphanimError::malformed_artifact(format!(
                    "Dijkstra distances: no distance recorded for vertex {target}"
                ))
            })?;

            let mut events = Vec::new();
            for pair in path.windows(2) {
                let edge = require_edge(graph, EdgeRef::new(pair[0], pair[1]), "Dijkstra paths")?;
                events.push(VisualizationEvent::SetEdgeState {
                    edge,
                    category: Category::Active,
                    stroke_weight: None,
                });
            }
            events.push(VisualizationEvent::SetVertexState {
                vertex: target,
                category: Category::Resolved,
                label: None,
            });
            events.push(VisualizationEvent::Annotate {
                scope: Scope::Vertex(target),
                text: format!("d={distance}"),
            });
            events.push(VisualizationEvent::Annotate {
                scope: Scope::Global,
                text: format!("{} (d={distance})", path_string(path)),
            });
            trace.push(TraceStep::new(events));
        }

        trace.push(TraceStep::single(VisualizationEvent::Annotate {
            scope: Scope::Global,
            text: "Shortest paths found!".to_string(),
        }));
        Ok(trace)
    }
}

fn path_string(path: &[VertexId]) -> String {
    path.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}
