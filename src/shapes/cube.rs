//! A unit cube generator: six faces, four vertices each, indexed
//! triangles.

use cgmath::Point3;

use crate::geometry::attributes::{VertexAttrib, VertexAttribKind};

use super::{
    DrawVariant, GeneratorCapabilities, Ray, ShapeAttribType, ShapeDrawOperation, ShapeGenerator,
    ShapeIndexType, ShapePrimitive, Sphere,
};

// Per face: outward normal, then the two in-face axes, chosen so that
// u x v equals the normal and the emitted triangles wind counter
// clockwise when viewed from outside.
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
];

const CORNERS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];

const ATTRIBS: [VertexAttribKind; 4] = [
    VertexAttribKind::Position,
    VertexAttribKind::Normal,
    VertexAttribKind::BoxCoord,
    VertexAttribKind::FaceCoord,
];

/// A cube with unit edge length, centered at the origin.
#[derive(Debug, Default)]
pub struct Cube {
    caps: GeneratorCapabilities,
}

impl Cube {
    pub fn new() -> Self {
        Cube {
            caps: GeneratorCapabilities::none(),
        }
    }

    fn position(face: usize, corner: usize) -> [f32; 3] {
        let (n, u, v) = (FACES[face].0, FACES[face].1, FACES[face].2);
        let (s, t) = CORNERS[corner];

        let mut p = [0.0; 3];
        for i in 0..3 {
            p[i] = n[i] * 0.5 + u[i] * (s - 0.5) + v[i] * (t - 0.5);
        }
        p
    }
}

impl ShapeGenerator for Cube {
    fn enabled_caps(&self) -> GeneratorCapabilities {
        self.caps
    }

    fn enable_caps(&mut self, caps: GeneratorCapabilities) {
        self.caps = caps;
    }

    fn for_each_attrib(&self, visit: &mut dyn FnMut(VertexAttrib)) {
        for kind in &ATTRIBS {
            visit(VertexAttrib::from(*kind));
        }
    }

    fn vertex_count(&self) -> u32 {
        24
    }

    fn values_per_vertex(&self, attrib: VertexAttrib) -> u32 {
        match attrib.kind {
            VertexAttribKind::FaceCoord => 2,
            _ => 3,
        }
    }

    fn attrib_type(&self, attrib: VertexAttrib) -> ShapeAttribType {
        if self.supports_attrib(attrib) {
            ShapeAttribType::F32
        } else {
            ShapeAttribType::None
        }
    }

    fn attrib_values(&self, attrib: VertexAttrib, out: &mut Vec<f32>) {
        for face in 0..6 {
            for corner in 0..4 {
                let p = Self::position(face, corner);
                match attrib.kind {
                    VertexAttribKind::Position => out.extend_from_slice(&p),
                    VertexAttribKind::Normal => out.extend_from_slice(&FACES[face].0),
                    VertexAttribKind::BoxCoord => {
                        out.extend(p.iter().map(|v| v + 0.5));
                    }
                    VertexAttribKind::FaceCoord => {
                        let (s, t) = CORNERS[corner];
                        out.push(s);
                        out.push(t);
                    }
                    _ => (),
                }
            }
        }
    }

    fn index_type(&self, _: DrawVariant) -> ShapeIndexType {
        ShapeIndexType::U8
    }

    fn index_count(&self, _: DrawVariant) -> u32 {
        36
    }

    fn index_values(&self, _: DrawVariant, out: &mut Vec<u32>) {
        for face in 0..6u32 {
            let base = face * 4;
            out.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
        }
    }

    fn operation_count(&self, _: DrawVariant) -> u32 {
        1
    }

    fn operations(&self, variant: DrawVariant, out: &mut Vec<ShapeDrawOperation>) {
        out.push(ShapeDrawOperation {
            mode: ShapePrimitive::Triangles,
            idx_type: self.index_type(variant),
            first: 0,
            count: self.index_count(variant),
            ..Default::default()
        });
    }

    fn bounding_sphere(&self) -> Sphere {
        Sphere {
            center: Point3::new(0.0, 0.0, 0.0),
            radius: 3f32.sqrt() * 0.5,
        }
    }

    fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        // Slab test against the axis-aligned box [-0.5, 0.5]^3.
        let origin: [f32; 3] = ray.origin.into();
        let direction: [f32; 3] = ray.direction.into();

        let mut t_min = ::std::f32::NEG_INFINITY;
        let mut t_max = ::std::f32::INFINITY;

        for i in 0..3 {
            if direction[i] == 0.0 {
                if origin[i] < -0.5 || origin[i] > 0.5 {
                    return None;
                }
            } else {
                let mut t1 = (-0.5 - origin[i]) / direction[i];
                let mut t2 = (0.5 - origin[i]) / direction[i];
                if t1 > t2 {
                    ::std::mem::swap(&mut t1, &mut t2);
                }

                t_min = t_min.max(t1);
                t_max = t_max.min(t2);
            }
        }

        if t_max < t_min || t_max < 0.0 {
            None
        } else if t_min >= 0.0 {
            Some(t_min)
        } else {
            Some(t_max)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn attribs() {
        let cube = Cube::new();

        let mut attribs = Vec::new();
        cube.for_each_attrib(&mut |a| attribs.push(a));
        assert_eq!(attribs.len(), 4);
        assert!(cube.supports_attrib(VertexAttribKind::Position.into()));
        assert!(!cube.supports_attrib(VertexAttribKind::Color.into()));

        assert_eq!(
            cube.attrib_type(VertexAttribKind::Normal.into()),
            ShapeAttribType::F32
        );
        assert_eq!(
            cube.attrib_type(VertexAttribKind::Color.into()),
            ShapeAttribType::None
        );
    }

    #[test]
    fn payload_sizes() {
        let cube = Cube::new();

        let mut values = Vec::new();
        cube.attrib_values(VertexAttribKind::Position.into(), &mut values);
        assert_eq!(values.len(), 24 * 3);

        values.clear();
        cube.attrib_values(VertexAttribKind::FaceCoord.into(), &mut values);
        assert_eq!(values.len(), 24 * 2);

        let mut indices = Vec::new();
        cube.index_values(DrawVariant::default(), &mut indices);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| i < 24));
    }

    #[test]
    fn ray_hits_front_face() {
        let cube = Cube::new();
        let ray = Ray {
            origin: Point3::new(0.0, 0.0, 2.0),
            direction: cgmath::Vector3::new(0.0, 0.0, -1.0),
        };

        assert_eq!(cube.ray_intersection(&ray), Some(1.5));
    }

    #[test]
    fn ray_misses() {
        let cube = Cube::new();
        let ray = Ray {
            origin: Point3::new(2.0, 2.0, 2.0),
            direction: cgmath::Vector3::new(0.0, 0.0, -1.0),
        };

        assert_eq!(cube.ray_intersection(&ray), None);
    }
}
