//! Decides, once per geometry object, which integer slot each semantic
//! attribute variant occupies.

use std::rc::Rc;

use crate::geometry::attributes::{AttribValue, VertexAttrib, VertexAttribKind};
use crate::shapes::ShapeGenerator;

#[derive(Debug, Default)]
struct Inner {
    attribs: Vec<(VertexAttrib, AttribValue)>,
}

/// An immutable assignment of attribute variants to binding slots.
///
/// Slots are assigned densely in construction order: the first variant
/// gets slot 0 and so on. A variant may instead carry a constant fallback
/// value, in which case it takes part in `location_and_value` lookups but
/// is still slot-addressed like the rest.
///
/// Bindings are shared through a reference-counted handle, so one binding
/// object can serve many geometry objects built from different drawing
/// variants of the same generator. Cloning is cheap. The pipeline is
/// single threaded by design, hence `Rc` rather than `Arc`.
#[derive(Debug, Clone, Default)]
pub struct VertexAttribBindings {
    inner: Rc<Inner>,
}

impl VertexAttribBindings {
    /// Binds every attribute the generator advertises, in the generator's
    /// enumeration order.
    pub fn from_generator<G>(generator: &G) -> Self
    where
        G: ShapeGenerator + ?Sized,
    {
        let mut attribs = Vec::new();
        generator.for_each_attrib(&mut |attrib| attribs.push((attrib, AttribValue::Absent)));

        VertexAttribBindings {
            inner: Rc::new(Inner { attribs }),
        }
    }

    /// Binds exactly the given variants, in list order. Use this to force
    /// attributes into the slots a shader expects.
    pub fn from_variants(variants: &[VertexAttrib]) -> Self {
        let attribs = variants
            .iter()
            .map(|v| (*v, AttribValue::Absent))
            .collect();

        VertexAttribBindings {
            inner: Rc::new(Inner { attribs }),
        }
    }

    /// Like `from_variants`, additionally caching a constant fallback
    /// value per variant. A variant with a non-absent value is not backed
    /// by per-vertex buffer data.
    pub fn from_variants_and_values(variants: &[(VertexAttrib, AttribValue)]) -> Self {
        VertexAttribBindings {
            inner: Rc::new(Inner {
                attribs: variants.to_vec(),
            }),
        }
    }

    pub fn attrib_count(&self) -> usize {
        self.inner.attribs.len()
    }

    /// The variant bound to slot `index`, or `None` past the end.
    pub fn attrib_variant(&self, index: usize) -> Option<VertexAttrib> {
        self.inner.attribs.get(index).map(|v| v.0)
    }

    /// Iterates the bound variants in slot order.
    pub fn attribs(&self) -> impl Iterator<Item = VertexAttrib> + '_ {
        self.inner.attribs.iter().map(|v| v.0)
    }

    /// The binding slot of `attrib`, or `None` when it is not part of
    /// this binding set.
    pub fn location(&self, attrib: VertexAttrib) -> Option<u32> {
        self.inner
            .attribs
            .iter()
            .position(|v| v.0 == attrib)
            .map(|i| i as u32)
    }

    /// The binding slot together with the cached constant value, for
    /// attributes fed from a constant rather than a buffer.
    pub fn location_and_value(&self, attrib: VertexAttrib) -> (Option<u32>, AttribValue) {
        match self.inner.attribs.iter().position(|v| v.0 == attrib) {
            Some(i) => (Some(i as u32), self.inner.attribs[i].1),
            None => (None, AttribValue::Absent),
        }
    }

    /// The slot of the `index`-th stream of `kind`.
    pub fn kind_loc(&self, kind: VertexAttribKind, index: u16) -> Option<u32> {
        self.location(VertexAttrib::new(kind, index))
    }

    pub fn position_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Position, 0)
    }

    pub fn normal_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Normal, 0)
    }

    pub fn tangent_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Tangent, 0)
    }

    pub fn bitangent_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Bitangent, 0)
    }

    pub fn color_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Color, 0)
    }

    pub fn weight_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Weight, 0)
    }

    pub fn box_coord_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::BoxCoord, 0)
    }

    pub fn face_coord_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::FaceCoord, 0)
    }

    pub fn wrap_coord_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::WrapCoord, 0)
    }

    pub fn occlusion_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Occlusion, 0)
    }

    pub fn roughness_loc(&self) -> Option<u32> {
        self.kind_loc(VertexAttribKind::Roughness, 0)
    }
}
