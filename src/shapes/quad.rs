//! A screen-covering quad. The generator prefers a triangle strip, falls
//! back to a fan, and finally to two explicit triangles when the
//! negotiated capabilities allow neither.

use cgmath::Point3;

use crate::geometry::attributes::{VertexAttrib, VertexAttribKind};

use super::{
    DrawVariant, GeneratorCapabilities, ShapeAttribType, ShapeDrawOperation, ShapeGenerator,
    ShapeIndexType, ShapePrimitive, Sphere,
};

const STRIP: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
const FAN: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const TRIANGLES: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// A quad spanning [-1, 1] x [-1, 1] in the z = 0 plane, drawn without an
/// index buffer.
#[derive(Debug)]
pub struct Quad {
    caps: GeneratorCapabilities,
}

impl Quad {
    pub fn new() -> Self {
        Quad {
            caps: GeneratorCapabilities::all(),
        }
    }

    fn mode(&self) -> ShapePrimitive {
        if self.caps.triangle_strips {
            ShapePrimitive::TriangleStrip
        } else if self.caps.triangle_fans {
            ShapePrimitive::TriangleFan
        } else {
            ShapePrimitive::Triangles
        }
    }

    fn corners(&self) -> &'static [[f32; 2]] {
        match self.mode() {
            ShapePrimitive::TriangleStrip => &STRIP,
            ShapePrimitive::TriangleFan => &FAN,
            _ => &TRIANGLES,
        }
    }
}

impl Default for Quad {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeGenerator for Quad {
    fn enabled_caps(&self) -> GeneratorCapabilities {
        self.caps
    }

    fn enable_caps(&mut self, caps: GeneratorCapabilities) {
        self.caps = caps;
    }

    fn for_each_attrib(&self, visit: &mut dyn FnMut(VertexAttrib)) {
        visit(VertexAttribKind::Position.into());
        visit(VertexAttribKind::WrapCoord.into());
    }

    fn vertex_count(&self) -> u32 {
        self.corners().len() as u32
    }

    fn values_per_vertex(&self, _: VertexAttrib) -> u32 {
        2
    }

    fn attrib_type(&self, attrib: VertexAttrib) -> ShapeAttribType {
        if self.supports_attrib(attrib) {
            ShapeAttribType::F32
        } else {
            ShapeAttribType::None
        }
    }

    fn attrib_values(&self, attrib: VertexAttrib, out: &mut Vec<f32>) {
        for corner in self.corners() {
            match attrib.kind {
                VertexAttribKind::Position => out.extend_from_slice(corner),
                VertexAttribKind::WrapCoord => {
                    out.push((corner[0] + 1.0) * 0.5);
                    out.push((corner[1] + 1.0) * 0.5);
                }
                _ => (),
            }
        }
    }

    fn index_type(&self, _: DrawVariant) -> ShapeIndexType {
        ShapeIndexType::None
    }

    fn index_count(&self, _: DrawVariant) -> u32 {
        0
    }

    fn index_values(&self, _: DrawVariant, _: &mut Vec<u32>) {}

    fn operation_count(&self, _: DrawVariant) -> u32 {
        1
    }

    fn operations(&self, _: DrawVariant, out: &mut Vec<ShapeDrawOperation>) {
        out.push(ShapeDrawOperation {
            mode: self.mode(),
            idx_type: ShapeIndexType::None,
            first: 0,
            count: self.vertex_count(),
            ..Default::default()
        });
    }

    fn bounding_sphere(&self) -> Sphere {
        Sphere {
            center: Point3::new(0.0, 0.0, 0.0),
            radius: 2f32.sqrt(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strip_by_default() {
        let quad = Quad::new();
        assert_eq!(quad.vertex_count(), 4);

        let mut ops = Vec::new();
        quad.operations(DrawVariant::default(), &mut ops);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].mode, ShapePrimitive::TriangleStrip);
        assert_eq!(ops[0].count, 4);
    }

    #[test]
    fn falls_back_without_strips() {
        let mut quad = Quad::new();

        let mut caps = GeneratorCapabilities::all();
        caps.triangle_strips = false;
        quad.enable_caps(caps);
        assert_eq!(quad.vertex_count(), 4);

        let mut ops = Vec::new();
        quad.operations(DrawVariant::default(), &mut ops);
        assert_eq!(ops[0].mode, ShapePrimitive::TriangleFan);

        caps.triangle_fans = false;
        quad.enable_caps(caps);
        assert_eq!(quad.vertex_count(), 6);

        ops.clear();
        quad.operations(DrawVariant::default(), &mut ops);
        assert_eq!(ops[0].mode, ShapePrimitive::Triangles);
        assert_eq!(ops[0].count, 6);
    }

    #[test]
    fn wrap_coords_cover_unit_square() {
        let quad = Quad::new();

        let mut values = Vec::new();
        quad.attrib_values(VertexAttribKind::WrapCoord.into(), &mut values);
        assert_eq!(values.len(), 8);
        assert!(values.iter().all(|v| *v >= 0.0 && *v <= 1.0));
    }
}
