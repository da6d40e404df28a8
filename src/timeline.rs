use crate::{
    core::{Category, VertexId},
    error::{GraphanimError, GraphanimResult},
    graph::Graph,
    trace::{Scope, Trace, VisualizationEvent},
};

pub const DEFAULT_STROKE: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VertexVisual {
    pub category: Category,
    pub label: Option<String>,
}

impl Default for VertexVisual {
    fn default() -> Self {
        Self {
            category: Category::Unvisited,
            label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeVisual {
    pub category: Category,
    pub stroke: f64,
    pub label: Option<String>,
}

impl Default for EdgeVisual {
    fn default() -> Self {
        Self {
            category: Category::Unvisited,
            stroke: DEFAULT_STROKE,
            label: None,
        }
    }
}

/// A derived snapshot of the whole scene: one visual per vertex (indexed by
/// vertex id) and per edge (indexed by position in `Graph::edges`), plus the
/// single live caption. States are computed incrementally; only the current
/// and previous ones are ever materialized by the driver.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualizationState {
    pub vertices: Vec<VertexVisual>,
    pub edges: Vec<EdgeVisual>,
    pub caption: Option<String>,
}

impl VisualizationState {
    /// The blank state: everything Unvisited, no labels, no caption.
    pub fn initial(graph: &Graph) -> Self {
        Self {
            vertices: vec![VertexVisual::default(); graph.vertex_count as usize],
            edges: vec![EdgeVisual::default(); graph.edges.len()],
            caption: None,
        }
    }

    /// Applies one event in place. Category re-assignment is idempotent:
    /// re-applying an event yields an identical state.
    pub fn apply(&mut self, graph: &Graph, event: &VisualizationEvent) -> GraphanimResult<()> {
        match event {
            VisualizationEvent::SetVertexState {
                vertex,
                category,
                label,
            } => {
                let visual = self.vertex_mut(*vertex)?;
                visual.category = *category;
                if let Some(label) = label {
                    visual.label = Some(label.clone());
                }
            }
            VisualizationEvent::SetEdgeState {
                edge,
                category,
                stroke_weight,
            } => {
                let index = graph.edge_index(*edge).ok_or_else(|| {
                    GraphanimError::malformed_artifact(format!(
                        "timeline: edge {edge} does not exist in the graph"
                    ))
                })?;
                let visual = &mut self.edges[index];
                visual.category = *category;
                if let Some(stroke) = stroke_weight {
                    visual.stroke = *stroke;
                }
            }
            VisualizationEvent::Annotate { scope, text } => match scope {
                Scope::Global => self.caption = Some(text.clone()),
                Scope::Vertex(v) => self.vertex_mut(*v)?.label = Some(text.clone()),
                Scope::Edge(edge) => {
                    let index = graph.edge_index(*edge).ok_or_else(|| {
                        GraphanimError::malformed_artifact(format!(
                            "timeline: edge {edge} does not exist in the graph"
                        ))
                    })?;
                    self.edges[index].label = Some(text.clone());
                }
            },
            VisualizationEvent::SectionBreak => {
                for v in &mut self.vertices {
                    *v = VertexVisual::default();
                }
                for e in &mut self.edges {
                    *e = EdgeVisual::default();
                }
                self.caption = None;
            }
        }
        Ok(())
    }

    fn vertex_mut(&mut self, v: VertexId) -> GraphanimResult<&mut VertexVisual> {
        let count = self.vertices.len();
        self.vertices.get_mut(v as usize).ok_or_else(|| {
            GraphanimError::malformed_artifact(format!(
                "timeline: vertex {v} is out of range (vertex_count is {count})"
            ))
        })
    }
}

/// Everything a transition must repaint: vertices and edges whose visual
/// changed between two consecutive states, and the caption if it changed.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StateDiff {
    pub vertices: Vec<(VertexId, VertexVisual)>,
    pub edges: Vec<(usize, EdgeVisual)>,
    pub caption: Option<Option<String>>,
}

impl StateDiff {
    pub fn between(prev: &VisualizationState, next: &VisualizationState) -> Self {
        let vertices = prev
            .vertices
            .iter()
            .zip(&next.vertices)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, (_, b))| (i as VertexId, b.clone()))
            .collect();
        let edges = prev
            .edges
            .iter()
            .zip(&next.edges)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, (_, b))| (i, b.clone()))
            .collect();
        let caption = (prev.caption != next.caption).then(|| next.caption.clone());
        Self {
            vertices,
            edges,
            caption,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.caption.is_none()
    }
}

/// The ordered state sequence: one state per trace step, each derived from
/// the previous by applying the step's events in order.
#[derive(Clone, Debug)]
pub struct Timeline {
    pub initial: VisualizationState,
    pub states: Vec<VisualizationState>,
}

impl Timeline {
    #[tracing::instrument(skip_all, fields(steps = trace.steps.len()))]
    pub fn fold(graph: &Graph, trace: &Trace) -> GraphanimResult<Self> {
        let initial = VisualizationState::initial(graph);
        let mut states = Vec::with_capacity(trace.steps.len());
        let mut current = initial.clone();
        for step in &trace.steps {
            for event in &step.events {
                current.apply(graph, event)?;
            }
            states.push(current.clone());
        }
        tracing::debug!(states = states.len(), "timeline folded");
        Ok(Self { initial, states })
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::EdgeRef,
        trace::{TraceStep, TraceSource},
    };

    fn chain3() -> Graph {
        Graph::from_json_str(
            r#"{"vertex_count":3,"edges":[{"from":0,"to":1},{"from":1,"to":2}]}"#,
        )
        .unwrap()
    }

    fn set_vertex(vertex: VertexId, category: Category) -> VisualizationEvent {
        VisualizationEvent::SetVertexState {
            vertex,
            category,
            label: None,
        }
    }

    #[test]
    fn fold_produces_one_state_per_step() {
        let g = chain3();
        let trace = crate::trace::bfs::BfsArtifact { start_vertex: 0 }
            .trace(&g)
            .unwrap();
        let timeline = Timeline::fold(&g, &trace).unwrap();
        assert_eq!(timeline.len(), trace.steps.len());
    }

    #[test]
    fn applying_an_event_twice_is_idempotent() {
        let g = chain3();
        let mut once = VisualizationState::initial(&g);
        let event = set_vertex(1, Category::Active);
        once.apply(&g, &event).unwrap();
        let mut twice = once.clone();
        twice.apply(&g, &event).unwrap();
        assert_eq!(once, twice);

        let edge_event = VisualizationEvent::SetEdgeState {
            edge: EdgeRef::new(1, 0),
            category: Category::Active,
            stroke_weight: Some(4.0),
        };
        once.apply(&g, &edge_event).unwrap();
        let mut again = once.clone();
        again.apply(&g, &edge_event).unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn section_break_resets_everything() {
        let g = chain3();
        let mut state = VisualizationState::initial(&g);
        state.apply(&g, &set_vertex(0, Category::Active)).unwrap();
        state
            .apply(
                &g,
                &VisualizationEvent::SetEdgeState {
                    edge: EdgeRef::new(0, 1),
                    category: Category::Resolved,
                    stroke_weight: Some(4.0),
                },
            )
            .unwrap();
        state
            .apply(
                &g,
                &VisualizationEvent::Annotate {
                    scope: Scope::Global,
                    text: "caption".to_string(),
                },
            )
            .unwrap();

        state.apply(&g, &VisualizationEvent::SectionBreak).unwrap();
        assert_eq!(state, VisualizationState::initial(&g));
    }

    #[test]
    fn global_caption_is_replaced_not_accumulated() {
        let g = chain3();
        let mut state = VisualizationState::initial(&g);
        for text in ["first", "second"] {
            state
                .apply(
                    &g,
                    &VisualizationEvent::Annotate {
                        scope: Scope::Global,
                        text: text.to_string(),
                    },
                )
                .unwrap();
        }
        assert_eq!(state.caption.as_deref(), Some("second"));
    }

    #[test]
    fn diff_lists_only_changes() {
        let g = chain3();
        let prev = VisualizationState::initial(&g);
        let mut next = prev.clone();
        next.apply(&g, &set_vertex(2, Category::Active)).unwrap();

        let diff = StateDiff::between(&prev, &next);
        assert_eq!(diff.vertices.len(), 1);
        assert_eq!(diff.vertices[0].0, 2);
        assert!(diff.edges.is_empty());
        assert!(diff.caption.is_none());

        assert!(StateDiff::between(&prev, &prev).is_empty());
    }

    #[test]
    fn unknown_edge_in_event_fails_fold() {
        let g = chain3();
        let trace = Trace {
            steps: vec![TraceStep::single(VisualizationEvent::SetEdgeState {
                edge: EdgeRef::new(0, 2),
                category: Category::Active,
                stroke_weight: None,
            })],
        };
        assert!(Timeline::fold(&g, &trace).is_err());
    }
}
