use crate::error::{GraphanimError, GraphanimResult};

pub use kurbo::Point;

/// Index into `Graph::vertex_count`, dense and zero-based.
pub type VertexId = u32;

/// An edge named by its endpoints as the artifact spelled them. For
/// undirected graphs `(from, to)` and `(to, from)` resolve to the same
/// underlying edge.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EdgeRef {
    pub from: VertexId,
    pub to: VertexId,
}

impl EdgeRef {
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Highlight state of a vertex or edge. `Color(i)` is the algorithm-specific
/// extension used by greedy coloring and connected components; `i` indexes
/// the configured palette with modular wraparound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Unvisited,
    Active,
    Resolved,
    Color(u32),
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> GraphanimResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| GraphanimError::serde(format!("color '{s}' must start with '#'")))?;
        let byte = |i: usize| -> GraphanimResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GraphanimError::serde(format!("color '{s}' has invalid hex digits")))
        };
        match hex.len() {
            6 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: 255,
            }),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(GraphanimError::serde(format!(
                "color '{s}' must be #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = GraphanimError;

    fn try_from(s: String) -> GraphanimResult<Self> {
        Self::from_hex(&s)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_hex()
    }
}
