use crate::{
    core::{Category, EdgeRef, VertexId},
    error::{GraphanimError, GraphanimResult},
    graph::Graph,
    trace::{Scope, Trace, TraceSource, TraceStep, VisualizationEvent, require_edge, require_vertex},
};

const SECTION_SEPARATOR: &str = "----------------------------------------";

/// One section of the engine's line-oriented log: a named phase with the
/// adjacency it observed at that point.
#[derive(Clone, Debug, PartialEq)]
struct Section {
    step_name: String,
    vertex_count: Option<u32>,
    directed: Option<bool>,
    adjacency: Vec<(VertexId, Vec<(VertexId, f64)>)>,
}

/// Raw log artifact: a multi-run, line-oriented trace with markers
/// `Step: <name>`, `Vertex Count: <n>`, `Directed: <bool>`,
/// `Vertex <v> -> (to,weight) ...` and a 40-dash separator closing each
/// section. Parsed with an explicit line grammar; tuple syntax is never
/// handed to an expression evaluator. Each separator becomes a
/// `SectionBreak` so independent runs replay from a blank state.
#[derive(Clone, Debug)]
pub struct RawLogArtifact {
    sections: Vec<Section>,
}

impl RawLogArtifact {
    pub fn parse(text: &str) -> GraphanimResult<Self> {
        let mut sections = Vec::new();
        let mut current: Option<Section> = None;

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            let fail = |msg: String| {
                GraphanimError::malformed_artifact(format!("raw log line {}: {msg}", lineno + 1))
            };

            if line.is_empty() {
                continue;
            }
            if let Some(name) = line.strip_prefix("Step: ") {
                if current.is_some() {
                    return Err(fail("'Step:' inside an unterminated section".to_string()));
                }
                current = Some(Section {
                    step_name: name.trim().to_string(),
                    vertex_count: None,
                    directed: None,
                    adjacency: Vec::new(),
                });
            } else if let Some(rest) = line.strip_prefix("Vertex Count: ") {
                let section = current
                    .as_mut()
                    .ok_or_else(|| fail("'Vertex Count:' outside a section".to_string()))?;
                section.vertex_count = Some(
                    rest.trim()
                        .parse()
                        .map_err(|_| fail(format!("invalid vertex count '{}'", rest.trim())))?,
                );
            } else if let Some(rest) = line.strip_prefix("Directed: ") {
                let section = current
                    .as_mut()
                    .ok_or_else(|| fail("'Directed:' outside a section".to_string()))?;
                section.directed = Some(match rest.trim() {
                    "true" | "1" => true,
                    "false" | "0" => false,
                    other => return Err(fail(format!("invalid directed flag '{other}'"))),
                });
            } else if let Some(rest) = line.strip_prefix("Vertex ") {
                let section = current
                    .as_mut()
                    .ok_or_else(|| fail("'Vertex' line outside a section".to_string()))?;
                let (vertex_str, tuples) = rest
                    .split_once(" -> ")
                    .ok_or_else(|| fail("expected 'Vertex <v> -> ...'".to_string()))?;
                let vertex: VertexId = vertex_str
                    .trim()
                    .parse()
                    .map_err(|_| fail(format!("invalid vertex id '{}'", vertex_str.trim())))?;
                let mut neighbors = Vec::new();
                for tuple in tuples.split_whitespace() {
                    neighbors.push(parse_tuple(tuple).map_err(&fail)?);
                }
                section.adjacency.push((vertex, neighbors));
            } else if line == SECTION_SEPARATOR {
                let section = current
                    .take()
                    .ok_or_else(|| fail("separator without an open section".to_string()))?;
                sections.push(section);
            } else {
                return Err(fail(format!("unrecognized line '{line}'")));
            }
        }

        if current.is_some() {
            return Err(GraphanimError::malformed_artifact(
                "raw log: final section is missing its separator line",
            ));
        }
        Ok(Self { sections })
    }
}

/// Parses `(to,weight)` without evaluating it as an expression.
fn parse_tuple(tuple: &str) -> Result<(VertexId, f64), String> {
    let inner = tuple
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| format!("expected '(to,weight)', got '{tuple}'"))?;
    let (to_str, weight_str) = inner
        .split_once(',')
        .ok_or_else(|| format!("expected '(to,weight)', got '{tuple}'"))?;
    let to = to_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid vertex id in tuple '{tuple}'"))?;
    let weight = weight_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight in tuple '{tuple}'"))?;
    Ok((to, weight))
}

impl TraceSource for RawLogArtifact {
    fn algorithm(&self) -> &'static str {
        "Algorithm Log"
    }

    #[tracing::instrument(skip_all)]
    fn trace(&self, graph: &Graph) -> GraphanimResult<Trace> {
        let mut trace = Trace::default();
        for section in &self.sections {
            if let Some(count) = section.vertex_count {
                if count > graph.vertex_count {
                    return Err(GraphanimError::malformed_artifact(format!(
                        "raw log section '{}': vertex count {count} exceeds graph vertex_count {}",
                        section.step_name, graph.vertex_count
                    )));
                }
            }

            trace.push(TraceStep::single(VisualizationEvent::Annotate {
                scope: Scope::Global,
                text: section.step_name.clone(),
            }));

            for (vertex, neighbors) in &section.adjacency {
                require_vertex(graph, *vertex, "raw log")?;
                let mut events = vec![VisualizationEvent::SetVertexState {
                    vertex: *vertex,
                    category: Category::Active,
                    label: None,
                }];
                for &(to, _weight) in neighbors {
                    let edge = require_edge(graph, EdgeRef::new(*vertex, to), "raw log")?;
                    events.push(VisualizationEvent::SetEdgeState {
                        edge,
                        category: Category::Active,
                        stroke_weight: None,
                    });
                }
                trace.push(TraceStep::new(events));
            }

            trace.push(TraceStep::single(VisualizationEvent::SectionBreak));
        }
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
Step: BFS - level order
Vertex Count: 3
Directed: false
Vertex 0 -> (1,1) (2,1)
Vertex 1 -> (0,1)
----------------------------------------
Step: DFS - preorder
Vertex Count: 3
Directed: false
Vertex 2 -> (0,1)
----------------------------------------
";

    fn graph() -> Graph {
        Graph::from_json_str(
            r#"{"vertex_count":3,"edges":[
                {"from":0,"to":1},{"from":0,"to":2},{"from":1,"to":2}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_two_sections() {
        let log = RawLogArtifact::parse(LOG).unwrap();
        assert_eq!(log.sections.len(), 2);
        assert_eq!(log.sections[0].step_name, "BFS - level order");
        assert_eq!(log.sections[0].vertex_count, Some(3));
        assert_eq!(log.sections[0].directed, Some(false));
        assert_eq!(log.sections[0].adjacency[0].1, vec![(1, 1.0), (2, 1.0)]);
    }

    #[test]
    fn each_section_ends_in_a_section_break() {
        let trace = RawLogArtifact::parse(LOG).unwrap().trace(&graph()).unwrap();
        let breaks = trace
            .events()
            .filter(|e| matches!(e, VisualizationEvent::SectionBreak))
            .count();
        assert_eq!(breaks, 2);
        assert_eq!(
            trace.steps.last().unwrap().events,
            vec![VisualizationEvent::SectionBreak]
        );
    }

    #[test]
    fn section_annotates_its_step_name() {
        let trace = RawLogArtifact::parse(LOG).unwrap().trace(&graph()).unwrap();
        assert_eq!(
            trace.steps[0].events,
            vec![VisualizationEvent::Annotate {
                scope: Scope::Global,
                text: "BFS - level order".to_string(),
            }]
        );
    }

    #[test]
    fn tuple_syntax_errors_are_rejected() {
        assert!(RawLogArtifact::parse("Step: x\nVertex 0 -> (1;2)\n").is_err());
        assert!(RawLogArtifact::parse("Step: x\nVertex 0 -> 1,2\n").is_err());
    }

    #[test]
    fn unterminated_section_is_rejected() {
        assert!(RawLogArtifact::parse("Step: x\nVertex Count: 3\n").is_err());
    }

    #[test]
    fn unknown_marker_is_rejected() {
        assert!(RawLogArtifact::parse("Step: x\nWeird: 1\n").is_err());
    }

    #[test]
    fn edge_absent_from_graph_is_malformed() {
        let log = "Step: x\nVertex 0 -> (1,1)\n----------------------------------------\n";
        let sparse = Graph::from_json_str(r#"{"vertex_count":2,"edges":[]}"#).unwrap();
        let err = RawLogArtifact::parse(log).unwrap().trace(&sparse).unwrap_err();
        assert!(matches!(err, GraphanimError::MalformedArtifact(_)));
    }
}
