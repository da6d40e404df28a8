#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod graph;
pub mod layout;
pub mod legend;
pub mod surface;
pub mod timeline;
pub mod trace;

pub use config::{Config, Quality, Style, Timing};
pub use core::{Category, EdgeRef, Rgba8, VertexId};
pub use driver::Driver;
pub use error::{GraphanimError, GraphanimResult};
pub use graph::Graph;
pub use layout::{LayoutConfig, layout};
pub use legend::{CategoryLabels, Legend};
pub use surface::{RenderSurface, raster::RasterSurface, script::ScriptSurface};
pub use timeline::{Timeline, VisualizationState};
pub use trace::{AlgorithmKind, Trace, TraceSource, VisualizationEvent, load_artifact};
