use std::path::{Path, PathBuf};

use crate::{
    core::Rgba8,
    error::{GraphanimError, GraphanimResult},
    surface::{RenderSurface, SceneSpec, TransitionBatch},
};

/// A small CPU rasterizer: renders every animation frame as a PNG
/// (`frame_00000.png`, `frame_00001.png`, ...) under an output directory.
/// Shapes only (vertices, edges, legend markers); captions and labels are
/// text and belong to the script surface, which a full renderer consumes.
pub struct RasterSurface {
    dir: PathBuf,
    fps: f64,
    width: u32,
    height: u32,
    background: Rgba8,
    stroke_scale: f64,
    vertices: Vec<VertexPx>,
    edges: Vec<EdgePx>,
    legend: Vec<Rgba8>,
    frame: u64,
}

#[derive(Clone, Copy)]
struct VertexPx {
    x: f64,
    y: f64,
    radius: f64,
    fill: Rgba8,
}

#[derive(Clone, Copy)]
struct EdgePx {
    from: u32,
    to: u32,
    color: Rgba8,
    stroke: f64,
}

const MARGIN_PX: f64 = 60.0;

impl RasterSurface {
    pub fn new(dir: &Path, fps: f64) -> GraphanimResult<Self> {
        if fps <= 0.0 {
            return Err(GraphanimError::surface("raster fps must be > 0"));
        }
        std::fs::create_dir_all(dir).map_err(|e| {
            GraphanimError::surface(format!("create output dir '{}': {e}", dir.display()))
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            fps,
            width: 0,
            height: 0,
            background: Rgba8::rgb(0, 0, 0),
            stroke_scale: 1.0,
            vertices: Vec::new(),
            edges: Vec::new(),
            legend: Vec::new(),
            frame: 0,
        })
    }

    pub fn frames_written(&self) -> u64 {
        self.frame
    }

    fn frames_for(&self, secs: f64) -> u64 {
        ((secs * self.fps).round() as u64).max(1)
    }

    fn write_frame(&mut self) -> GraphanimResult<()> {
        let mut buf = vec![0u8; (self.width * self.height * 4) as usize];
        for px in buf.chunks_exact_mut(4) {
            px.copy_from_slice(&[
                self.background.r,
                self.background.g,
                self.background.b,
                255,
            ]);
        }

        // Edges under vertices, vertices under the legend.
        for edge in &self.edges {
            let a = self.vertices[edge.from as usize];
            let b = self.vertices[edge.to as usize];
            draw_segment(
                &mut buf,
                self.width,
                self.height,
                (a.x, a.y),
                (b.x, b.y),
                edge.stroke * self.stroke_scale,
                edge.color,
            );
        }
        for v in &self.vertices {
            fill_circle(&mut buf, self.width, self.height, v.x, v.y, v.radius, v.fill);
        }
        for (i, color) in self.legend.iter().enumerate() {
            let x = f64::from(self.width) - MARGIN_PX / 2.0;
            let y = f64::from(self.height) - MARGIN_PX / 2.0 - (i as f64) * 20.0;
            fill_circle(&mut buf, self.width, self.height, x, y, 7.0, *color);
        }

        let path = self.dir.join(format!("frame_{:05}.png", self.frame));
        image::save_buffer_with_format(
            &path,
            &buf,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| GraphanimError::surface(format!("write png '{}': {e}", path.display())))?;
        self.frame += 1;
        Ok(())
    }
}

impl RenderSurface for RasterSurface {
    fn init(&mut self, scene: &SceneSpec) -> GraphanimResult<()> {
        self.width = scene.canvas_width;
        self.height = scene.canvas_height;
        self.background = scene.background;
        self.stroke_scale = f64::from(self.width.min(self.height)) / 360.0;

        // Fit layout coordinates into the canvas, margin included, aspect
        // ratio preserved.
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in &scene.vertices {
            min_x = min_x.min(v.x);
            max_x = max_x.max(v.x);
            min_y = min_y.min(v.y);
            max_y = max_y.max(v.y);
        }
        let extent_x = (max_x - min_x).max(1e-9);
        let extent_y = (max_y - min_y).max(1e-9);
        let scale = ((f64::from(self.width) - 2.0 * MARGIN_PX) / extent_x)
            .min((f64::from(self.height) - 2.0 * MARGIN_PX) / extent_y)
            .max(1e-9);
        let cx = (min_x + max_x) / 2.0;
        let cy = (min_y + max_y) / 2.0;

        self.vertices = scene
            .vertices
            .iter()
            .map(|v| VertexPx {
                x: f64::from(self.width) / 2.0 + (v.x - cx) * scale,
                // Screen y grows downward; layout y grows upward.
                y: f64::from(self.height) / 2.0 - (v.y - cy) * scale,
                radius: (v.radius * scale)
                    .clamp(4.0, f64::from(self.width.min(self.height)) / 8.0),
                fill: v.fill,
            })
            .collect();
        self.edges = scene
            .edges
            .iter()
            .map(|e| EdgePx {
                from: e.from,
                to: e.to,
                color: e.color,
                stroke: e.stroke,
            })
            .collect();
        self.legend = scene.legend.iter().map(|entry| entry.color).collect();

        self.write_frame()
    }

    fn transition(&mut self, batch: &TransitionBatch) -> GraphanimResult<()> {
        struct VertexTween {
            index: usize,
            from: Rgba8,
            to: Rgba8,
        }
        struct EdgeTween {
            index: usize,
            from: (Rgba8, f64),
            to: (Rgba8, f64),
        }

        let mut vertex_tweens = Vec::with_capacity(batch.vertices.len());
        for update in &batch.vertices {
            let index = update.id as usize;
            let Some(v) = self.vertices.get(index) else {
                return Err(GraphanimError::surface(format!(
                    "transition references unknown vertex {}",
                    update.id
                )));
            };
            vertex_tweens.push(VertexTween {
                index,
                from: v.fill,
                to: update.fill,
            });
        }
        let mut edge_tweens = Vec::with_capacity(batch.edges.len());
        for update in &batch.edges {
            let index = self
                .edges
                .iter()
                .position(|e| e.from == update.from && e.to == update.to)
                .ok_or_else(|| {
                    GraphanimError::surface(format!(
                        "transition references unknown edge {}-{}",
                        update.from, update.to
                    ))
                })?;
            edge_tweens.push(EdgeTween {
                index,
                from: (self.edges[index].color, self.edges[index].stroke),
                to: (update.color, update.stroke),
            });
        }

        let frames = self.frames_for(batch.duration_secs);
        for f in 1..=frames {
            let t = f as f64 / frames as f64;
            for tw in &vertex_tweens {
                self.vertices[tw.index].fill = Rgba8::lerp(tw.from, tw.to, t);
            }
            for tw in &edge_tweens {
                self.edges[tw.index].color = Rgba8::lerp(tw.from.0, tw.to.0, t);
                self.edges[tw.index].stroke = tw.from.1 + (tw.to.1 - tw.from.1) * t;
            }
            self.write_frame()?;
        }
        Ok(())
    }

    fn finish(&mut self, hold_secs: f64) -> GraphanimResult<()> {
        for _ in 0..self.frames_for(hold_secs) {
            self.write_frame()?;
        }
        Ok(())
    }
}

fn put_pixel(buf: &mut [u8], width: u32, x: i64, y: i64, color: Rgba8) {
    let i = ((y as u32 * width + x as u32) * 4) as usize;
    buf[i] = color.r;
    buf[i + 1] = color.g;
    buf[i + 2] = color.b;
    buf[i + 3] = 255;
}

fn fill_circle(buf: &mut [u8], width: u32, height: u32, cx: f64, cy: f64, r: f64, color: Rgba8) {
    let x0 = ((cx - r).floor() as i64).max(0);
    let x1 = ((cx + r).ceil() as i64).min(i64::from(width) - 1);
    let y0 = ((cy - r).floor() as i64).max(0);
    let y1 = ((cy + r).ceil() as i64).min(i64::from(height) - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                put_pixel(buf, width, x, y, color);
            }
        }
    }
}

fn draw_segment(
    buf: &mut [u8],
    width: u32,
    height: u32,
    a: (f64, f64),
    b: (f64, f64),
    stroke: f64,
    color: Rgba8,
) {
    let half = (stroke / 2.0).max(0.5);
    let x0 = ((a.0.min(b.0) - half).floor() as i64).max(0);
    let x1 = ((a.0.max(b.0) + half).ceil() as i64).min(i64::from(width) - 1);
    let y0 = ((a.1.min(b.1) - half).floor() as i64).max(0);
    let y1 = ((a.1.max(b.1) + half).ceil() as i64).min(i64::from(height) - 1);

    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = (dx * dx + dy * dy).max(1e-12);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            let t = (((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0);
            let (nx, ny) = (a.0 + t * dx, a.1 + t * dy);
            let dist_sq = (px - nx) * (px - nx) + (py - ny) * (py - ny);
            if dist_sq <= half * half {
                put_pixel(buf, width, x, y, color);
            }
        }
    }
}
