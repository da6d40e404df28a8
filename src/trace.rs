use std::path::Path;

use crate::{
    core::{Category, EdgeRef, VertexId},
    error::{GraphanimError, GraphanimResult},
    graph::Graph,
    legend::CategoryLabels,
};

pub mod bfs;
pub mod coloring;
pub mod components;
pub mod dfs;
pub mod dijkstra;
pub mod rawlog;
pub mod shortest_paths;

/// What an `Annotate` event applies to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Scope {
    Vertex(VertexId),
    Edge(EdgeRef),
    Global,
}

/// Normalized unit emitted by every trace source adapter. Replay is strictly
/// sequential and single direction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VisualizationEvent {
    SetVertexState {
        vertex: VertexId,
        category: Category,
        label: Option<String>,
    },
    SetEdgeState {
        edge: EdgeRef,
        category: Category,
        stroke_weight: Option<f64>,
    },
    Annotate {
        scope: Scope,
        text: String,
    },
    /// Ends one logical phase and resets the visualization to blank.
    SectionBreak,
}

/// A non-empty group of events applied atomically: the timeline derives one
/// state per step, and the driver renders one transition per step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraceStep {
    pub events: Vec<VisualizationEvent>,
}

impl TraceStep {
    pub fn new(events: Vec<VisualizationEvent>) -> Self {
        Self { events }
    }

    pub fn single(event: VisualizationEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    /// All events in replay order, ignoring step grouping.
    pub fn events(&self) -> impl Iterator<Item = &VisualizationEvent> {
        self.steps.iter().flat_map(|s| s.events.iter())
    }
}

/// One adapter per algorithm family. `trace` derives the full event sequence
/// up front; any inconsistency between artifact and graph fails the whole
/// parse rather than emitting partial events.
pub trait TraceSource: std::fmt::Debug {
    /// Human-readable algorithm name, used for titles and logging.
    fn algorithm(&self) -> &'static str;

    /// Legend wording for Active/Resolved in this algorithm's vocabulary.
    fn category_labels(&self) -> CategoryLabels {
        CategoryLabels::default()
    }

    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Dijkstra,
    Coloring,
    Components,
    ShortestPaths,
    RawLog,
}

/// Reads an artifact file and constructs the matching adapter. The file is
/// read once, synchronously; a missing or unreadable artifact is fatal.
pub fn load_artifact(
    kind: AlgorithmKind,
    path: &Path,
) -> GraphanimResult<Box<dyn TraceSource>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        GraphanimError::missing_file(format!("artifact '{}': {e}", path.display()))
    })?;

    fn from_json<T: serde::de::DeserializeOwned>(text: &str, what: &str) -> GraphanimResult<T> {
        serde_json::from_str(text).map_err(|e| {
            GraphanimError::malformed_artifact(format!("{what} artifact: invalid JSON: {e}"))
        })
    }

    Ok(match kind {
        AlgorithmKind::Bfs => Box::new(from_json::<bfs::BfsArtifact>(&text, "BFS")?),
        AlgorithmKind::Dfs => Box::new(from_json::<dfs::DfsArtifact>(&text, "DFS")?),
        AlgorithmKind::Dijkstra => {
            Box::new(from_json::<dijkstra::DijkstraArtifact>(&text, "Dijkstra")?)
        }
        AlgorithmKind::Coloring => {
            Box::new(from_json::<coloring::ColoringArtifact>(&text, "coloring")?)
        }
        AlgorithmKind::Components => Box::new(from_json::<components::ComponentsArtifact>(
            &text,
            "components",
        )?),
        AlgorithmKind::ShortestPaths => Box::new(from_json::<
            shortest_paths::ShortestPathsArtifact,
        >(&text, "shortest-paths")?),
        AlgorithmKind::RawLog => Box::new(rawlog::RawLogArtifact::parse(&text)?),
    })
}

/// Parses the string-keyed vertex maps the engine writes (`"3": ...`) into
/// ascending vertex-id order.
pub(crate) fn vertex_keyed<T>(
    map: std::collections::BTreeMap<String, T>,
    what: &str,
) -> GraphanimResult<std::collections::BTreeMap<VertexId, T>> {
    let mut out = std::collections::BTreeMap::new();
    for (key, value) in map {
        let vertex: VertexId = key.parse().map_err(|_| {
            GraphanimError::malformed_artifact(format!(
                "{what}: key '{key}' is not a vertex id"
            ))
        })?;
        out.insert(vertex, value);
    }
    Ok(out)
}

pub(crate) fn require_vertex(
    graph: &Graph,
    vertex: VertexId,
    what: &str,
) -> GraphanimResult<()> {
    if !graph.contains_vertex(vertex) {
        return Err(GraphanimError::malformed_artifact(format!(
            "{what}: vertex {vertex} is out of range (vertex_count is {})",
            graph.vertex_count
        )));
    }
    Ok(())
}

/// Resolves `(a, b)` to an existing graph edge or fails the parse.
pub(crate) fn require_edge(
    graph: &Graph,
    edge: EdgeRef,
    what: &str,
) -> GraphanimResult<EdgeRef> {
    require_vertex(graph, edge.from, what)?;
    require_vertex(graph, edge.to, what)?;
    if graph.edge_index(edge).is_none() {
        return Err(GraphanimError::malformed_artifact(format!(
            "{what}: edge {edge} does not exist in the graph"
        )));
    }
    Ok(edge)
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

    #[test]
    fn vertex_keyed_sorts_numerically() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("10".to_string(), 'a');
        map.insert("2".to_string(), 'b');
        let keyed = vertex_keyed(map, "test").unwrap();
        assert_eq!(keyed.keys().copied().collect::<Vec<_>>(), vec![2, 10]);
    }

    #[test]
    fn vertex_keyed_rejects_non_numeric_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("x".to_string(), 0);
        assert!(vertex_keyed(map, "test").is_err());
    }

    #[test]
    fn require_edge_checks_range_and_existence() {
        let g = chain3();
        assert!(require_edge(&g, EdgeRef::new(0, 1), "t").is_ok());
        assert!(require_edge(&g, EdgeRef::new(2, 1), "t").is_ok());
        assert!(require_edge(&g, EdgeRef::new(0, 2), "t").is_err());
        assert!(require_edge(&g, EdgeRef::new(0, 5), "t").is_err());
    }
}
