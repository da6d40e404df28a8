use std::path::Path;

use crate::{
    core::{EdgeRef, VertexId},
    error::{GraphanimError, GraphanimResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Static graph description produced by the algorithm engine. Loaded once
/// per animation run and immutable thereafter.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Graph {
    pub vertex_count: u32,
    #[serde(default)]
    pub directed: bool,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Reads and validates a graph description file.
    pub fn load(path: &Path) -> GraphanimResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GraphanimError::missing_file(format!("graph '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> GraphanimResult<Self> {
        let graph: Graph = serde_json::from_str(text)
            .map_err(|e| GraphanimError::malformed_graph(format!("invalid JSON: {e}")))?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn validate(&self) -> GraphanimResult<()> {
        for (idx, edge) in self.edges.iter().enumerate() {
            for endpoint in [edge.from, edge.to] {
                if endpoint >= self.vertex_count {
                    return Err(GraphanimError::malformed_graph(format!(
                        "edge #{idx} references vertex {endpoint}, but vertex_count is {}",
                        self.vertex_count
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v < self.vertex_count
    }

    /// Resolves an edge reference to its index in `edges`. Undirected graphs
    /// match both orientations; directed graphs match `(from, to)` only.
    pub fn edge_index(&self, edge: EdgeRef) -> Option<usize> {
        self.edges.iter().position(|e| {
            (e.from == edge.from && e.to == edge.to)
                || (!self.directed && e.from == edge.to && e.to == edge.from)
        })
    }

    /// Neighbors of `v` in edge-list order. This ordering is the documented
    /// deterministic tie-break used when replaying BFS/DFS traversals.
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        let mut out = Vec::new();
        for e in &self.edges {
            if e.from == v {
                out.push(e.to);
            } else if !self.directed && e.to == v {
                out.push(e.from);
            }
        }
        out
    }

    pub fn has_weights(&self) -> bool {
        self.edges.iter().any(|e| e.weight.is_some())
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

    #[test]
    fn loads_minimal_graph() {
        let g = chain3();
        assert_eq!(g.vertex_count, 3);
        assert_eq!(g.edges.len(), 2);
        assert!(!g.directed);
        assert!(!g.has_weights());
    }

    #[test]
    fn rejects_out_of_range_edge() {
        let err = Graph::from_json_str(r#"{"vertex_count":2,"edges":[{"from":0,"to":5}]}"#)
            .unwrap_err();
        assert!(matches!(err, GraphanimError::MalformedGraph(_)));
    }

    #[test]
    fn rejects_missing_vertex_count() {
        let err = Graph::from_json_str(r#"{"edges":[]}"#).unwrap_err();
        assert!(matches!(err, GraphanimError::MalformedGraph(_)));
    }

    #[test]
    fn undirected_edge_lookup_matches_both_orientations() {
        let g = chain3();
        assert_eq!(g.edge_index(EdgeRef::new(0, 1)), Some(0));
        assert_eq!(g.edge_index(EdgeRef::new(1, 0)), Some(0));
        assert_eq!(g.edge_index(EdgeRef::new(0, 2)), None);
    }

    #[test]
    fn directed_edge_lookup_is_one_way() {
        let g = Graph::from_json_str(
            r#"{"vertex_count":2,"directed":true,"edges":[{"from":0,"to":1}]}"#,
        )
        .unwrap();
        assert_eq!(g.edge_index(EdgeRef::new(0, 1)), Some(0));
        assert_eq!(g.edge_index(EdgeRef::new(1, 0)), None);
    }

    #[test]
    fn neighbors_follow_edge_list_order() {
        let g = Graph::from_json_str(
            r#"{"vertex_count":4,"edges":[
                {"from":1,"to":3},{"from":0,"to":1},{"from":1,"to":2}]}"#,
        )
        .unwrap();
        assert_eq!(g.neighbors(1), vec![3, 0, 2]);
    }
}
