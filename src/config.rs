use std::path::Path;

use crate::{
    core::{Category, Rgba8},
    error::{GraphanimError, GraphanimResult},
    layout::LayoutConfig,
};

/// Visual styling: category colors, the algorithm color palette, stroke
/// widths and canvas geometry. Defaults reproduce the engine's reference
/// visualizations.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    pub unvisited: Rgba8,
    pub active: Rgba8,
    pub resolved: Rgba8,
    pub edge_unvisited: Rgba8,
    pub background: Rgba8,
    /// Ordered palette for `Category::Color(i)`; indices wrap modularly.
    pub palette: Vec<Rgba8>,
    pub stroke_base: f64,
    pub stroke_emphasis: f64,
    pub vertex_radius: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            unvisited: Rgba8::rgb(0x40, 0xE0, 0xD0),
            active: Rgba8::rgb(0xFF, 0x69, 0xB4),
            resolved: Rgba8::rgb(0x41, 0x69, 0xE1),
            edge_unvisited: Rgba8::rgb(0xB0, 0xC4, 0xDE),
            background: Rgba8::rgb(0x12, 0x14, 0x1C),
            palette: vec![
                Rgba8::rgb(0xFF, 0x6B, 0x6B),
                Rgba8::rgb(0x4E, 0xCD, 0xC4),
                Rgba8::rgb(0x45, 0xB7, 0xD1),
                Rgba8::rgb(0x96, 0xCE, 0xB4),
                Rgba8::rgb(0xFF, 0xEE, 0xAD),
                Rgba8::rgb(0xD4, 0xA5, 0xA5),
                Rgba8::rgb(0x9B, 0x59, 0xB6),
                Rgba8::rgb(0x34, 0x98, 0xDB),
                Rgba8::rgb(0xF1, 0xC4, 0x0F),
                Rgba8::rgb(0x1A, 0xBC, 0x9C),
            ],
            stroke_base: 2.0,
            stroke_emphasis: 4.0,
            vertex_radius: 0.3,
            canvas_width: 1280,
            canvas_height: 720,
        }
    }
}

impl Style {
    /// Fill color for a vertex in the given category.
    pub fn vertex_color(&self, category: Category) -> Rgba8 {
        match category {
            Category::Unvisited => self.unvisited,
            Category::Active => self.active,
            Category::Resolved => self.resolved,
            Category::Color(i) => self.palette_color(i),
        }
    }

    /// Stroke color for an edge in the given category. Unvisited edges use
    /// their own (dimmer) color so vertices stay readable on top of them.
    pub fn edge_color(&self, category: Category) -> Rgba8 {
        match category {
            Category::Unvisited => self.edge_unvisited,
            other => self.vertex_color(other),
        }
    }

    /// Modular lookup into the palette. The wraparound rule is part of the
    /// contract: index `i` maps to `palette[i % palette.len()]`.
    pub fn palette_color(&self, index: u32) -> Rgba8 {
        let len = self.palette.len().max(1) as u32;
        self.palette
            .get((index % len) as usize)
            .copied()
            .unwrap_or(self.unvisited)
    }

    pub fn validate(&self) -> GraphanimResult<()> {
        if self.palette.is_empty() {
            return Err(GraphanimError::serde("style palette must be non-empty"));
        }
        if self.vertex_radius <= 0.0 {
            return Err(GraphanimError::serde("vertex_radius must be > 0"));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(GraphanimError::serde("canvas width/height must be > 0"));
        }
        Ok(())
    }
}

/// Per-step pacing. The driver declares `step_secs` for every transition
/// and `hold_secs` after the final state.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timing {
    pub step_secs: f64,
    pub hold_secs: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_secs: 0.8,
            hold_secs: 3.0,
        }
    }
}

/// Output quality preset. Only affects sampling density (frames per second
/// of the raster surface); timings and ordering are quality-independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    pub fn fps(self) -> f64 {
        match self {
            Self::Low => 15.0,
            Self::Medium => 30.0,
            Self::High => 60.0,
        }
    }
}

/// Top-level run configuration, optionally loaded from a JSON file.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub style: Style,
    pub timing: Timing,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn load(path: &Path) -> GraphanimResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GraphanimError::missing_file(format!("config '{}': {e}", path.display()))
        })?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|e| GraphanimError::serde(format!("invalid config JSON: {e}")))?;
        config.style.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_colors_match_reference_scheme() {
        let style = Style::default();
        assert_eq!(style.unvisited.to_hex(), "#40E0D0");
        assert_eq!(style.active.to_hex(), "#FF69B4");
        assert_eq!(style.resolved.to_hex(), "#4169E1");
        assert_eq!(style.edge_unvisited.to_hex(), "#B0C4DE");
        assert_eq!(style.palette.len(), 10);
    }

    #[test]
    fn palette_wraps_modularly() {
        let style = Style::default();
        assert_eq!(style.palette_color(0), style.palette[0]);
        assert_eq!(style.palette_color(10), style.palette[0]);
        assert_eq!(style.palette_color(13), style.palette[3]);
    }

    #[test]
    fn category_color_mapping() {
        let style = Style::default();
        assert_eq!(style.vertex_color(Category::Active), style.active);
        assert_eq!(style.edge_color(Category::Unvisited), style.edge_unvisited);
        assert_eq!(style.edge_color(Category::Resolved), style.resolved);
        assert_eq!(style.vertex_color(Category::Color(1)), style.palette[1]);
    }

    #[test]
    fn config_roundtrips_and_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timing.step_secs, 0.8);

        let s = serde_json::to_string(&Config::default()).unwrap();
        let de: Config = serde_json::from_str(&s).unwrap();
        assert_eq!(de.style.palette.len(), 10);
    }

    #[test]
    fn empty_palette_rejected() {
        let style = Style {
            palette: vec![],
            ..Style::default()
        };
        assert!(style.validate().is_err());
    }
}
