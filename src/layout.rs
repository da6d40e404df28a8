use kurbo::Point;

use crate::{error::GraphanimResult, graph::Graph};

/// Layout policy. Graphs at or below `spring_threshold` vertices go on a
/// circle (stable, snapshot-friendly); larger graphs get a seeded
/// force-directed layout. Both are deterministic for a given graph + config.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub circle_radius: f64,
    pub spring_threshold: u32,
    pub spring: SpringConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            circle_radius: 2.5,
            spring_threshold: 12,
            spring: SpringConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub iterations: u32,
    /// Ideal edge length (the `k` of Fruchterman-Reingold).
    pub optimal_distance: f64,
    /// Final positions are rescaled into `[-scale, scale]` on both axes.
    pub scale: f64,
    pub seed: u64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            optimal_distance: 1.0,
            scale: 3.0,
            seed: 42,
        }
    }
}

/// Assigns a stable 2D position to every vertex. Computed once per run and
/// consumed read-only by all later stages.
#[tracing::instrument(skip(graph), fields(vertex_count = graph.vertex_count))]
pub fn layout(graph: &Graph, config: &LayoutConfig) -> GraphanimResult<Vec<Point>> {
    let n = graph.vertex_count;
    if n == 0 {
        return Ok(Vec::new());
    }
    if n <= config.spring_threshold {
        Ok(circle_layout(n, config.circle_radius))
    } else {
        Ok(spring_layout(graph, &config.spring))
    }
}

fn circle_layout(n: u32, radius: f64) -> Vec<Point> {
    let angle = 2.0 * std::f64::consts::PI / f64::from(n);
    (0..n)
        .map(|i| {
            let a = angle * f64::from(i);
            Point::new(radius * a.cos(), radius * a.sin())
        })
        .collect()
}

fn spring_layout(graph: &Graph, config: &SpringConfig) -> Vec<Point> {
    let n = graph.vertex_count as usize;
    let k = config.optimal_distance.max(1e-6);

    let mut rng = config.seed;
    let mut positions: Vec<Point> = (0..n)
        .map(|_| {
            let x = unit(splitmix64(&mut rng)) * 2.0 - 1.0;
            let y = unit(splitmix64(&mut rng)) * 2.0 - 1.0;
            Point::new(x, y)
        })
        .collect();

    let mut displacement = vec![kurbo::Vec2::ZERO; n];
    for iter in 0..config.iterations {
        for d in &mut displacement {
            *d = kurbo::Vec2::ZERO;
        }

        // Pairwise repulsion.
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[i] - positions[j];
                let dist = delta.hypot().max(1e-9);
                let force = (k * k) / dist;
                let dir = delta / dist;
                displacement[i] += dir * force;
                displacement[j] -= dir * force;
            }
        }

        // Attraction along edges.
        for edge in &graph.edges {
            let (a, b) = (edge.from as usize, edge.to as usize);
            if a == b {
                continue;
            }
            let delta = positions[a] - positions[b];
            let dist = delta.hypot().max(1e-9);
            let force = (dist * dist) / k;
            let dir = delta / dist;
            displacement[a] -= dir * force;
            displacement[b] += dir * force;
        }

        // Linear cooling caps how far a vertex may move this iteration.
        let temperature = 0.1 * (1.0 - f64::from(iter) / f64::from(config.iterations.max(1)));
        for i in 0..n {
            let d = displacement[i];
            let len = d.hypot();
            if len > 1e-12 {
                positions[i] += d * (len.min(temperature) / len);
            }
        }
    }

    rescale(&mut positions, config.scale);
    positions
}

/// Uniformly rescales positions so the larger axis extent spans
/// `[-scale, scale]`, keeping the aspect ratio.
fn rescale(positions: &mut [Point], scale: f64) {
    if positions.is_empty() {
        return;
    }
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in positions.iter() {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let extent = (max_x - min_x).max(max_y - min_y).max(1e-9);
    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;
    let factor = (2.0 * scale) / extent;
    for p in positions.iter_mut() {
        p.x = (p.x - cx) * factor;
        p.y = (p.y - cy) * factor;
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn unit(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: u32) -> Graph {
        let mut edges = Vec::new();
        for i in 0..n.saturating_sub(1) {
            edges.push(format!(r#"{{"from":{},"to":{}}}"#, i, i + 1));
        }
        Graph::from_json_str(&format!(
            r#"{{"vertex_count":{n},"edges":[{}]}}"#,
            edges.join(",")
        ))
        .unwrap()
    }

    #[test]
    fn small_graphs_sit_on_a_circle() {
        let positions = layout(&grid(4), &LayoutConfig::default()).unwrap();
        assert_eq!(positions.len(), 4);
        for p in &positions {
            assert!((p.to_vec2().hypot() - 2.5).abs() < 1e-9);
        }
        assert!((positions[0].x - 2.5).abs() < 1e-9);
        assert!((positions[1].y - 2.5).abs() < 1e-9);
    }

    #[test]
    fn layout_is_deterministic() {
        let g = grid(20); // above the spring threshold
        let config = LayoutConfig::default();
        let a = layout(&g, &config).unwrap();
        let b = layout(&g, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn spring_layout_fits_scale_bounds() {
        let g = grid(20);
        let config = LayoutConfig::default();
        let positions = layout(&g, &config).unwrap();
        for p in &positions {
            assert!(p.x.abs() <= config.spring.scale + 1e-9);
            assert!(p.y.abs() <= config.spring.scale + 1e-9);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let g = grid(20);
        let a = layout(&g, &LayoutConfig::default()).unwrap();
        let mut config = LayoutConfig::default();
        config.spring.seed = 7;
        let b = layout(&g, &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_graph_has_empty_layout() {
        let g = Graph::from_json_str(r#"{"vertex_count":0,"edges":[]}"#).unwrap();
        assert!(layout(&g, &LayoutConfig::default()).unwrap().is_empty());
    }
}
