use kurbo::Point;

use crate::{
    config::{Style, Timing},
    error::GraphanimResult,
    graph::Graph,
    legend::Legend,
    surface::{
        CaptionUpdate, EdgeSpec, EdgeUpdate, RenderSurface, SceneSpec, TransitionBatch,
        VertexSpec, VertexUpdate,
    },
    timeline::{StateDiff, Timeline},
};

/// Walks a timeline and drives a rendering surface through it: one `init`
/// for the blank scene, then one batched transition per state change, each
/// blocking until the surface reports completion. Ordering is the sole
/// source of visual meaning, so nothing here is concurrent.
pub struct Driver<'a> {
    graph: &'a Graph,
    positions: &'a [Point],
    style: &'a Style,
    timing: Timing,
}

impl<'a> Driver<'a> {
    pub fn new(
        graph: &'a Graph,
        positions: &'a [Point],
        style: &'a Style,
        timing: Timing,
    ) -> GraphanimResult<Self> {
        if positions.len() != graph.vertex_count as usize {
            return Err(anyhow::anyhow!(
                "layout has {} positions for {} vertices",
                positions.len(),
                graph.vertex_count
            )
            .into());
        }
        style.validate()?;
        Ok(Self {
            graph,
            positions,
            style,
            timing,
        })
    }

    #[tracing::instrument(skip_all, fields(states = timeline.len()))]
    pub fn play(
        &self,
        title: &str,
        timeline: &Timeline,
        legend: &Legend,
        surface: &mut dyn RenderSurface,
    ) -> GraphanimResult<()> {
        surface.init(&self.scene(title, legend))?;

        let mut prev = &timeline.initial;
        for (step, state) in timeline.states.iter().enumerate() {
            let diff = StateDiff::between(prev, state);
            if diff.is_empty() {
                // Idempotent step: the timeline advances, the screen does not.
                tracing::debug!(step, "skipping visually empty transition");
                prev = state;
                continue;
            }
            surface.transition(&self.batch(step, &diff))?;
            prev = state;
        }

        surface.finish(self.timing.hold_secs)?;
        tracing::info!("playback complete");
        Ok(())
    }

    fn scene(&self, title: &str, legend: &Legend) -> SceneSpec {
        let vertices = self
            .positions
            .iter()
            .enumerate()
            .map(|(id, p)| VertexSpec {
                id: id as u32,
                x: p.x,
                y: p.y,
                radius: self.style.vertex_radius,
                fill: self.style.unvisited,
                label: id.to_string(),
            })
            .collect();
        let edges = self
            .graph
            .edges
            .iter()
            .map(|e| EdgeSpec {
                from: e.from,
                to: e.to,
                color: self.style.edge_unvisited,
                stroke: self.style.stroke_base,
                weight_label: e.weight.map(format_weight),
            })
            .collect();
        SceneSpec {
            title: title.to_string(),
            canvas_width: self.style.canvas_width,
            canvas_height: self.style.canvas_height,
            background: self.style.background,
            vertices,
            edges,
            legend: legend.entries.clone(),
        }
    }

    fn batch(&self, step: usize, diff: &StateDiff) -> TransitionBatch {
        let vertices = diff
            .vertices
            .iter()
            .map(|(id, visual)| VertexUpdate {
                id: *id,
                fill: self.style.vertex_color(visual.category),
                label: visual.label.clone(),
            })
            .collect();
        let edges = diff
            .edges
            .iter()
            .map(|(index, visual)| {
                let edge = &self.graph.edges[*index];
                EdgeUpdate {
                    from: edge.from,
                    to: edge.to,
                    color: self.style.edge_color(visual.category),
                    stroke: visual.stroke,
                }
            })
            .collect();
        TransitionBatch {
            step,
            duration_secs: self.timing.step_secs,
            vertices,
            edges,
            caption: diff
                .caption
                .as_ref()
                .map(|text| CaptionUpdate { text: text.clone() }),
        }
    }
}

fn format_weight(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{}", w as i64)
    } else {
        format!("{w}")
    }
}
