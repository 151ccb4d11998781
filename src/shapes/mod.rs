//! Procedural shape generators: the data source for vertex payloads,
//! index buffers and draw operations. Generators speak their own type
//! vocabulary; `geometry::adapter` translates it into the driver's.

pub mod cube;
pub mod quad;

use cgmath::prelude::*;
use cgmath::{Point3, Vector3};

use crate::device::DeviceCapabilities;
use crate::geometry::attributes::VertexAttrib;

pub use self::cube::Cube;
pub use self::quad::Quad;

/// Selects one of the draw-call groupings a generator exposes for the
/// same geometry, e.g. different level-of-detail or per-material subsets.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct DrawVariant(pub u32);

/// How a generator assembles its vertices into primitives.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShapePrimitive {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Patches,
}

/// Element type a generator declares for one attribute stream. `None`
/// marks an attribute the generator does not supply.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShapeAttribType {
    None,
    U8,
    I16,
    I32,
    U16,
    U32,
    F32,
}

impl ShapeAttribType {
    /// Size of a single element in bytes; zero for `None`.
    pub fn size(self) -> usize {
        match self {
            ShapeAttribType::None => 0,
            ShapeAttribType::U8 => 1,
            ShapeAttribType::I16 | ShapeAttribType::U16 => 2,
            ShapeAttribType::I32 | ShapeAttribType::U32 | ShapeAttribType::F32 => 4,
        }
    }
}

/// Element type a generator declares for a drawing variant's index data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShapeIndexType {
    None,
    U8,
    U16,
    U32,
}

impl ShapeIndexType {
    /// Size of a single index in bytes; zero for `None`.
    pub fn size(self) -> usize {
        match self {
            ShapeIndexType::None => 0,
            ShapeIndexType::U8 => 1,
            ShapeIndexType::U16 => 2,
            ShapeIndexType::U32 => 4,
        }
    }
}

/// One abstract draw batch as emitted by a generator, before translation
/// into the driver vocabulary. `first` counts logical elements here, not
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDrawOperation {
    pub mode: ShapePrimitive,
    pub idx_type: ShapeIndexType,
    pub first: u32,
    pub count: u32,
    /// Instancing phase: which intrinsic instance this batch belongs to.
    pub phase: u32,
    pub primitive_restart_index: u32,
    pub patch_vertices: u16,
    pub primitive_restart: bool,
    pub cw_face_winding: bool,
}

impl Default for ShapeDrawOperation {
    fn default() -> Self {
        ShapeDrawOperation {
            mode: ShapePrimitive::Points,
            idx_type: ShapeIndexType::None,
            first: 0,
            count: 0,
            phase: 0,
            primitive_restart_index: 0,
            patch_vertices: 3,
            primitive_restart: false,
            cw_face_winding: false,
        }
    }
}

/// The generator-side capabilities subject to negotiation against a
/// device. A generator asked to run without one of these falls back to a
/// supported equivalent, e.g. explicit triangles instead of a fan; that
/// fallback logic lives in the generator itself.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct GeneratorCapabilities {
    pub triangle_fans: bool,
    pub triangle_strips: bool,
    pub primitive_restart: bool,
    pub attrib_divisors: bool,
}

impl GeneratorCapabilities {
    pub fn none() -> Self {
        Default::default()
    }

    pub fn all() -> Self {
        GeneratorCapabilities {
            triangle_fans: true,
            triangle_strips: true,
            primitive_restart: true,
            attrib_divisors: true,
        }
    }

    pub fn intersect(self, other: Self) -> Self {
        GeneratorCapabilities {
            triangle_fans: self.triangle_fans && other.triangle_fans,
            triangle_strips: self.triangle_strips && other.triangle_strips,
            primitive_restart: self.primitive_restart && other.primitive_restart,
            attrib_divisors: self.attrib_divisors && other.attrib_divisors,
        }
    }

    /// Masks this set down to what the device can actually do.
    pub fn negotiate(self, device: &DeviceCapabilities) -> Self {
        self.intersect(GeneratorCapabilities {
            triangle_fans: device.triangle_fans,
            triangle_strips: device.triangle_strips,
            primitive_restart: device.primitive_restart,
            attrib_divisors: device.attrib_divisors,
        })
    }
}

/// A bounding sphere in the generator's model space.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

/// A ray in the generator's model space. The direction need not be
/// normalized; intersection distances are reported in units of its
/// length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Sphere {
    /// The nearest non-negative intersection distance, if any.
    pub fn intersection(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrt = discriminant.sqrt();
        let near = (-b - sqrt) / (2.0 * a);
        if near >= 0.0 {
            return Some(near);
        }

        let far = (-b + sqrt) / (2.0 * a);
        if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// An abstract procedural shape generator.
///
/// The `*_values` and `operations` queries append to their destination
/// vector without clearing it; callers own the clearing so they can reuse
/// one staging vector across many queries.
pub trait ShapeGenerator {
    /// The capability subset this generator is currently emitting for.
    fn enabled_caps(&self) -> GeneratorCapabilities;

    /// Restricts the generator to `caps`; it falls back to supported
    /// equivalents for everything masked out.
    fn enable_caps(&mut self, _caps: GeneratorCapabilities) {}

    /// Enumerates every attribute variant this generator supplies, in a
    /// stable order.
    fn for_each_attrib(&self, visit: &mut dyn FnMut(VertexAttrib));

    fn supports_attrib(&self, attrib: VertexAttrib) -> bool {
        let mut found = false;
        self.for_each_attrib(&mut |a| found |= a == attrib);
        found
    }

    fn vertex_count(&self) -> u32;

    /// How many times this shape is intrinsically instanced; one for
    /// plain shapes.
    fn instance_count(&self) -> u32 {
        1
    }

    fn values_per_vertex(&self, attrib: VertexAttrib) -> u32;

    /// `ShapeAttribType::None` for attributes this generator does not
    /// supply.
    fn attrib_type(&self, attrib: VertexAttrib) -> ShapeAttribType;

    fn is_attrib_integral(&self, attrib: VertexAttrib) -> bool {
        match self.attrib_type(attrib) {
            ShapeAttribType::None | ShapeAttribType::F32 => false,
            _ => true,
        }
    }

    fn is_attrib_normalized(&self, _attrib: VertexAttrib) -> bool {
        false
    }

    /// Instancing divisor for `attrib`; zero means one value per vertex.
    fn attrib_divisor(&self, _attrib: VertexAttrib) -> u32 {
        0
    }

    /// Appends the attribute's values in its native interleaving, in the
    /// numeric range of the declared element type.
    fn attrib_values(&self, attrib: VertexAttrib, out: &mut Vec<f32>);

    fn draw_variant_count(&self) -> u32 {
        1
    }

    fn index_type(&self, variant: DrawVariant) -> ShapeIndexType;

    fn index_count(&self, variant: DrawVariant) -> u32;

    /// Appends the variant's index values; each must fit the declared
    /// index type.
    fn index_values(&self, variant: DrawVariant, out: &mut Vec<u32>);

    fn operation_count(&self, variant: DrawVariant) -> u32;

    /// Appends the variant's draw operations, `operation_count` of them.
    fn operations(&self, variant: DrawVariant, out: &mut Vec<ShapeDrawOperation>);

    fn bounding_sphere(&self) -> Sphere;

    fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        self.bounding_sphere().intersection(ray)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sphere_intersection() {
        let sphere = Sphere {
            center: Point3::new(0.0, 0.0, 0.0),
            radius: 1.0,
        };

        let hit = Ray {
            origin: Point3::new(0.0, 0.0, -5.0),
            direction: Vector3::new(0.0, 0.0, 1.0),
        };
        assert_eq!(sphere.intersection(&hit), Some(4.0));

        let miss = Ray {
            origin: Point3::new(0.0, 2.0, -5.0),
            direction: Vector3::new(0.0, 0.0, 1.0),
        };
        assert_eq!(sphere.intersection(&miss), None);

        // Origin inside the sphere reports the exit distance.
        let inside = Ray {
            origin: Point3::new(0.0, 0.0, 0.0),
            direction: Vector3::new(0.0, 0.0, 1.0),
        };
        assert_eq!(sphere.intersection(&inside), Some(1.0));
    }

    #[test]
    fn capability_negotiation() {
        let mut device = DeviceCapabilities::default();
        device.primitive_restart = false;
        device.triangle_fans = false;

        let caps = GeneratorCapabilities::all().negotiate(&device);
        assert!(!caps.primitive_restart);
        assert!(!caps.triangle_fans);
        assert!(caps.triangle_strips);
        assert!(caps.attrib_divisors);

        assert_eq!(
            GeneratorCapabilities::none().negotiate(&DeviceCapabilities::default()),
            GeneratorCapabilities::none()
        );
    }
}
