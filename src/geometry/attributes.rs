//! Semantic identities of vertex data streams.

use std::fmt;
use std::str::FromStr;

use crate::errors::*;

/// The possible pre-defined kinds of vertex attribute streams, describing
/// what a stream is used for. A generator may expose several streams of
/// the same kind (e.g. two wrap-coordinate sets); `VertexAttrib` carries
/// the disambiguating sub-index.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum VertexAttribKind {
    Position,
    Normal,
    Tangent,
    Bitangent,
    Color,
    Weight,
    BoxCoord,
    VertexCoord,
    FaceCoord,
    WrapCoord,
    Pivot,
    VertexPivot,
    Roughness,
    Occlusion,
    InnerPosition,
}

impl VertexAttribKind {
    /// The canonical name, matching the spelling shaders are expected to
    /// declare their inputs with.
    pub fn name(self) -> &'static str {
        match self {
            VertexAttribKind::Position => "Position",
            VertexAttribKind::Normal => "Normal",
            VertexAttribKind::Tangent => "Tangent",
            VertexAttribKind::Bitangent => "Bitangent",
            VertexAttribKind::Color => "Color",
            VertexAttribKind::Weight => "Weight",
            VertexAttribKind::BoxCoord => "BoxCoord",
            VertexAttribKind::VertexCoord => "VertexCoord",
            VertexAttribKind::FaceCoord => "FaceCoord",
            VertexAttribKind::WrapCoord => "WrapCoord",
            VertexAttribKind::Pivot => "Pivot",
            VertexAttribKind::VertexPivot => "VertexPivot",
            VertexAttribKind::Roughness => "Roughness",
            VertexAttribKind::Occlusion => "Occlusion",
            VertexAttribKind::InnerPosition => "InnerPosition",
        }
    }
}

impl FromStr for VertexAttribKind {
    type Err = ::failure::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Position" => Ok(VertexAttribKind::Position),
            "Normal" => Ok(VertexAttribKind::Normal),
            "Tangent" => Ok(VertexAttribKind::Tangent),
            "Bitangent" => Ok(VertexAttribKind::Bitangent),
            "Color" => Ok(VertexAttribKind::Color),
            "Weight" => Ok(VertexAttribKind::Weight),
            "BoxCoord" => Ok(VertexAttribKind::BoxCoord),
            "VertexCoord" => Ok(VertexAttribKind::VertexCoord),
            "FaceCoord" => Ok(VertexAttribKind::FaceCoord),
            "WrapCoord" => Ok(VertexAttribKind::WrapCoord),
            "Pivot" => Ok(VertexAttribKind::Pivot),
            "VertexPivot" => Ok(VertexAttribKind::VertexPivot),
            "Roughness" => Ok(VertexAttribKind::Roughness),
            "Occlusion" => Ok(VertexAttribKind::Occlusion),
            "InnerPosition" => Ok(VertexAttribKind::InnerPosition),
            _ => bail!("Attribute kind ({:?}) is undefined.", s),
        }
    }
}

/// Identifies one semantic attribute stream by kind plus sub-index.
/// Immutable value type; two variants are the same stream exactly when
/// both fields match.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct VertexAttrib {
    pub kind: VertexAttribKind,
    pub index: u16,
}

impl VertexAttrib {
    pub fn new(kind: VertexAttribKind, index: u16) -> Self {
        VertexAttrib { kind, index }
    }
}

impl From<VertexAttribKind> for VertexAttrib {
    fn from(kind: VertexAttribKind) -> Self {
        VertexAttrib { kind, index: 0 }
    }
}

impl fmt::Display for VertexAttrib {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.index == 0 {
            write!(f, "{}", self.kind.name())
        } else {
            write!(f, "{}{}", self.kind.name(), self.index)
        }
    }
}

impl FromStr for VertexAttrib {
    type Err = ::failure::Error;

    /// Parses a shader-style stream name: a kind name with an optional
    /// trailing sub-index, e.g. `"WrapCoord"` or `"WrapCoord1"`.
    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .rfind(|c: char| !c.is_ascii_digit())
            .map(|i| i + 1)
            .unwrap_or(0);

        let (name, digits) = s.split_at(split);
        let kind = name.parse()?;
        let index = if digits.is_empty() {
            0
        } else {
            digits
                .parse()
                .map_err(|_| format_err!("Attribute sub-index ({:?}) is out of range.", digits))?
        };

        Ok(VertexAttrib { kind, index })
    }
}

/// A constant fallback value for an attribute variant that is not backed
/// by per-vertex buffer data.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AttribValue {
    Absent,
    F32(f32),
    I32(i32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
    Vector2i([i32; 2]),
    Vector3i([i32; 3]),
    Vector4i([i32; 4]),
}

impl AttribValue {
    pub fn is_absent(&self) -> bool {
        *self == AttribValue::Absent
    }
}

impl Default for AttribValue {
    fn default() -> Self {
        AttribValue::Absent
    }
}
