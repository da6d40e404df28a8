use crate::{core::Rgba8, error::GraphanimResult, legend::LegendEntry};

pub mod raster;
pub mod script;

/// The initial scene: full geometry plus the blank (all-Unvisited) visual
/// state, the legend and an empty caption. Issued exactly once, before any
/// transition.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneSpec {
    pub title: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Rgba8,
    pub vertices: Vec<VertexSpec>,
    pub edges: Vec<EdgeSpec>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct VertexSpec {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: Rgba8,
    /// The vertex id rendered inside the circle.
    pub label: String,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EdgeSpec {
    pub from: u32,
    pub to: u32,
    pub color: Rgba8,
    pub stroke: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_label: Option<String>,
}

/// One batched repaint: every vertex/edge whose visual changed since the
/// previous state, plus the caption when it changed. The surface owns the
/// easing; the driver owns ordering and duration.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TransitionBatch {
    pub step: usize,
    pub duration_secs: f64,
    pub vertices: Vec<VertexUpdate>,
    pub edges: Vec<EdgeUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<CaptionUpdate>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct VertexUpdate {
    pub id: u32,
    pub fill: Rgba8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EdgeUpdate {
    pub from: u32,
    pub to: u32,
    pub color: Rgba8,
    pub stroke: f64,
}

/// `text: None` clears the caption (section break); absence of the whole
/// update means the caption is unchanged.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CaptionUpdate {
    pub text: Option<String>,
}

/// The rendering runtime's interface. Implementations paint shapes and run
/// transitions; each call returns only once the work is visually complete,
/// which is what lets the driver stay strictly sequential.
pub trait RenderSurface {
    fn init(&mut self, scene: &SceneSpec) -> GraphanimResult<()>;

    /// Runs one batched transition over `batch.duration_secs`. No two
    /// transitions ever overlap.
    fn transition(&mut self, batch: &TransitionBatch) -> GraphanimResult<()>;

    /// Holds the final state on screen and releases resources.
    fn finish(&mut self, hold_secs: f64) -> GraphanimResult<()>;
}
