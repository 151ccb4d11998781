//! The facade over a procedural shape generator: uniform typed queries
//! for sizing and data, translation of the generator's type vocabulary
//! into the driver's, and construction of replayable instruction streams.

use std::cell::RefCell;

use crate::device::{
    AttribDataType, BufferHint, BufferId, BufferTarget, Device, DeviceCapabilities,
    FrontFaceOrder, IndexType, PrimitiveType, VertexArrayId,
};
use crate::errors::*;
use crate::geometry::attributes::VertexAttrib;
use crate::geometry::instructions::{DrawOperation, DrawSubset};
use crate::shapes::{
    DrawVariant, GeneratorCapabilities, Ray, ShapeAttribType, ShapeDrawOperation, ShapeGenerator,
    ShapeIndexType, ShapePrimitive, Sphere,
};
use crate::utils::scratch;

/// Translates a generator primitive into the driver vocabulary.
pub fn translate_primitive(primitive: ShapePrimitive) -> PrimitiveType {
    match primitive {
        ShapePrimitive::Points => PrimitiveType::Points,
        ShapePrimitive::Lines => PrimitiveType::Lines,
        ShapePrimitive::LineStrip => PrimitiveType::LineStrip,
        ShapePrimitive::LineLoop => PrimitiveType::LineLoop,
        ShapePrimitive::Triangles => PrimitiveType::Triangles,
        ShapePrimitive::TriangleStrip => PrimitiveType::TriangleStrip,
        ShapePrimitive::TriangleFan => PrimitiveType::TriangleFan,
        ShapePrimitive::Patches => PrimitiveType::Patches,
    }
}

/// Translates a generator attribute type. The generator is trusted not to
/// request unsupported combinations, so the undeclared case maps to the
/// float default instead of failing; an undeclared type reaching buffer
/// population is caught by a debug assertion in `attrib_data`.
pub fn translate_attrib_type(tp: ShapeAttribType) -> AttribDataType {
    match tp {
        ShapeAttribType::U8 => AttribDataType::UnsignedByte,
        ShapeAttribType::I16 => AttribDataType::Int16,
        ShapeAttribType::I32 => AttribDataType::Int32,
        ShapeAttribType::U16 => AttribDataType::UnsignedInt16,
        ShapeAttribType::U32 => AttribDataType::UnsignedInt32,
        ShapeAttribType::F32 | ShapeAttribType::None => AttribDataType::Float,
    }
}

/// Translates a generator index type.
pub fn translate_index_type(tp: ShapeIndexType) -> IndexType {
    match tp {
        ShapeIndexType::None => IndexType::None,
        ShapeIndexType::U8 => IndexType::U8,
        ShapeIndexType::U16 => IndexType::U16,
        ShapeIndexType::U32 => IndexType::U32,
    }
}

/// Translates one abstract draw operation into its driver-ready record.
/// For indexed operations `first` is converted from a logical element
/// offset into a byte offset here, once, so replay needs no further
/// interpretation.
pub fn translate_operation(op: &ShapeDrawOperation) -> DrawOperation {
    let idx_type = translate_index_type(op.idx_type);
    let first = if idx_type == IndexType::None {
        op.first
    } else {
        op.first * idx_type.size() as u32
    };

    DrawOperation {
        mode: translate_primitive(op.mode),
        idx_type,
        first,
        count: op.count,
        phase: op.phase,
        primitive_restart_index: op.primitive_restart_index,
        patch_vertices: op.patch_vertices,
        primitive_restart: op.primitive_restart,
        front_face: if op.cw_face_winding {
            FrontFaceOrder::Clockwise
        } else {
            FrontFaceOrder::CounterClockwise
        },
    }
}

fn write_attrib_value(tp: ShapeAttribType, value: f32, dest: &mut [u8]) {
    match tp {
        ShapeAttribType::None => unreachable!(),
        ShapeAttribType::U8 => dest[0] = value as u8,
        ShapeAttribType::I16 => dest.copy_from_slice(&(value as i16).to_ne_bytes()),
        ShapeAttribType::I32 => dest.copy_from_slice(&(value as i32).to_ne_bytes()),
        ShapeAttribType::U16 => dest.copy_from_slice(&(value as u16).to_ne_bytes()),
        ShapeAttribType::U32 => dest.copy_from_slice(&(value as u32).to_ne_bytes()),
        ShapeAttribType::F32 => dest.copy_from_slice(&value.to_bits().to_ne_bytes()),
    }
}

fn write_index_value(tp: ShapeIndexType, value: u32, dest: &mut [u8]) {
    match tp {
        ShapeIndexType::None => unreachable!(),
        ShapeIndexType::U8 => {
            debug_assert!(value <= u32::from(u8::max_value()));
            dest[0] = value as u8;
        }
        ShapeIndexType::U16 => {
            debug_assert!(value <= u32::from(u16::max_value()));
            dest.copy_from_slice(&(value as u16).to_ne_bytes());
        }
        ShapeIndexType::U32 => dest.copy_from_slice(&value.to_ne_bytes()),
    }
}

/// Wraps a shape generator and exposes it to the geometry pipeline in the
/// driver's type system.
///
/// Construction negotiates the generator's capabilities against the
/// device's; the generator falls back to supported equivalents for
/// whatever gets masked out. The adapter keeps small staging vectors for
/// generator payloads so repeated queries do not allocate; the pipeline
/// is single threaded, so plain `RefCell`s guard them.
pub struct ShapeAdapter<G> {
    generator: G,
    caps: GeneratorCapabilities,
    values: RefCell<Vec<f32>>,
    indices: RefCell<Vec<u32>>,
    ops: RefCell<Vec<ShapeDrawOperation>>,
}

impl<G> ShapeAdapter<G>
where
    G: ShapeGenerator,
{
    pub fn new(mut generator: G, device_caps: &DeviceCapabilities) -> Self {
        let caps = generator.enabled_caps().negotiate(device_caps);
        generator.enable_caps(caps);

        ShapeAdapter {
            generator,
            caps,
            values: RefCell::new(Vec::new()),
            indices: RefCell::new(Vec::new()),
            ops: RefCell::new(Vec::new()),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The capability subset that survived negotiation.
    pub fn enabled_caps(&self) -> GeneratorCapabilities {
        self.caps
    }

    /// Whether the named drawing variant uses an index buffer.
    pub fn indexed_drawing(&self, variant: DrawVariant) -> bool {
        self.generator.index_type(variant) != ShapeIndexType::None
    }

    /// Whether instancing divisors survived negotiation.
    pub fn attrib_divisors(&self) -> bool {
        self.caps.attrib_divisors
    }

    /// The generator-declared divisor for `attrib`; zero means one value
    /// per vertex.
    pub fn attrib_divisor(&self, attrib: VertexAttrib) -> u32 {
        self.generator.attrib_divisor(attrib)
    }

    /// Resolves a shader-style stream name (e.g. `"WrapCoord1"`) to the
    /// variant the generator supplies under that name, if any.
    pub fn find_variant(&self, name: &str) -> Option<VertexAttrib> {
        name.parse::<VertexAttrib>()
            .ok()
            .filter(|attrib| self.generator.supports_attrib(*attrib))
    }

    pub fn for_each_attrib(&self, visit: &mut dyn FnMut(VertexAttrib)) {
        self.generator.for_each_attrib(visit);
    }

    pub fn vertex_count(&self) -> u32 {
        self.generator.vertex_count()
    }

    pub fn instance_count(&self) -> u32 {
        self.generator.instance_count()
    }

    pub fn draw_variant_count(&self) -> u32 {
        self.generator.draw_variant_count()
    }

    pub fn values_per_vertex(&self, attrib: VertexAttrib) -> u32 {
        self.generator.values_per_vertex(attrib)
    }

    /// The attribute's element type in the driver vocabulary.
    pub fn attrib_type(&self, attrib: VertexAttrib) -> AttribDataType {
        translate_attrib_type(self.generator.attrib_type(attrib))
    }

    pub fn is_attrib_integral(&self, attrib: VertexAttrib) -> bool {
        self.generator.is_attrib_integral(attrib)
    }

    pub fn is_attrib_normalized(&self, attrib: VertexAttrib) -> bool {
        self.generator.is_attrib_normalized(attrib)
    }

    /// Size of one element of `attrib` in bytes; zero for attributes the
    /// generator does not supply.
    pub fn attrib_type_size(&self, attrib: VertexAttrib) -> usize {
        self.generator.attrib_type(attrib).size()
    }

    /// Exact byte size of the attribute's buffer: vertex count times
    /// values per vertex times element size.
    pub fn attrib_data_block_size(&self, attrib: VertexAttrib) -> usize {
        self.vertex_count() as usize
            * self.values_per_vertex(attrib) as usize
            * self.attrib_type_size(attrib)
    }

    /// Fills `dest` with exactly `attrib_data_block_size(attrib)` bytes
    /// of tightly packed values, converted to the declared element type.
    pub fn attrib_data(&self, attrib: VertexAttrib, dest: &mut [u8]) {
        let tp = self.generator.attrib_type(attrib);
        debug_assert!(
            tp != ShapeAttribType::None,
            "buffer population for {} which the generator does not supply",
            attrib
        );
        debug_assert_eq!(dest.len(), self.attrib_data_block_size(attrib));

        let mut staging = self.values.borrow_mut();
        staging.clear();
        self.generator.attrib_values(attrib, &mut staging);

        let size = tp.size();
        debug_assert_eq!(staging.len() * size, dest.len());

        for (value, span) in staging.iter().zip(dest.chunks_mut(size)) {
            write_attrib_value(tp, *value, span);
        }
    }

    pub fn index_count(&self, variant: DrawVariant) -> u32 {
        self.generator.index_count(variant)
    }

    /// The variant's index type in the driver vocabulary.
    pub fn index_type(&self, variant: DrawVariant) -> IndexType {
        translate_index_type(self.generator.index_type(variant))
    }

    /// Size of one index in bytes; zero for non-indexed variants.
    pub fn index_type_size(&self, variant: DrawVariant) -> usize {
        self.generator.index_type(variant).size()
    }

    /// Exact byte size of the variant's index buffer.
    pub fn index_data_block_size(&self, variant: DrawVariant) -> usize {
        self.index_count(variant) as usize * self.index_type_size(variant)
    }

    /// Combined byte size of the index buffers of several variants laid
    /// out back to back.
    pub fn total_index_data_block_size(&self, variants: &[DrawVariant]) -> usize {
        variants
            .iter()
            .map(|v| self.index_data_block_size(*v))
            .sum()
    }

    /// Fills `dest` with exactly `index_data_block_size(variant)` bytes
    /// of index values narrowed to the declared index type.
    pub fn index_data(&self, variant: DrawVariant, dest: &mut [u8]) {
        let tp = self.generator.index_type(variant);
        debug_assert!(tp != ShapeIndexType::None);
        debug_assert_eq!(dest.len(), self.index_data_block_size(variant));

        let mut staging = self.indices.borrow_mut();
        staging.clear();
        self.generator.index_values(variant, &mut staging);

        let size = tp.size();
        debug_assert_eq!(staging.len() * size, dest.len());

        for (value, span) in staging.iter().zip(dest.chunks_mut(size)) {
            write_index_value(tp, *value, span);
        }
    }

    pub fn operation_count(&self, variant: DrawVariant) -> u32 {
        self.generator.operation_count(variant)
    }

    /// Summed operation count across `variants`, sizing the destination
    /// of `concat_instructions`.
    pub fn total_operation_count(&self, variants: &[DrawVariant]) -> u32 {
        variants.iter().map(|v| self.operation_count(*v)).sum()
    }

    /// Fills `dest` with exactly `operation_count(variant)` driver-ready
    /// records. The destination length not matching is a caller error.
    pub fn instructions(&self, variant: DrawVariant, dest: &mut [DrawOperation]) {
        assert_eq!(
            dest.len(),
            self.operation_count(variant) as usize,
            "instruction destination span does not match the operation count"
        );

        let mut raw = self.ops.borrow_mut();
        raw.clear();
        self.generator.operations(variant, &mut raw);
        debug_assert_eq!(raw.len(), dest.len());

        for (dst, op) in dest.iter_mut().zip(raw.iter()) {
            *dst = translate_operation(op);
        }
    }

    /// Builds one instruction stream covering several drawing variants
    /// whose index data shares a single combined buffer.
    ///
    /// Each variant's operations land after the previous variant's, with
    /// indexed operations shifted by the bytes of index data accumulated
    /// so far; `subsets[i]` records where variant `i`'s operations sit in
    /// `dest`. Destination spans that are too small are caller errors.
    pub fn concat_instructions(
        &self,
        variants: &[DrawVariant],
        subsets: &mut [DrawSubset],
        dest: &mut [DrawOperation],
    ) {
        assert_eq!(
            subsets.len(),
            variants.len(),
            "subset destination span does not match the variant count"
        );

        let mut total = 0;
        let mut byte_offset = 0u32;
        let mut raw = self.ops.borrow_mut();

        for (subset, &variant) in subsets.iter_mut().zip(variants) {
            let count = self.operation_count(variant) as usize;
            assert!(
                total + count <= dest.len(),
                "instruction destination span is too small"
            );

            raw.clear();
            self.generator.operations(variant, &mut raw);
            debug_assert_eq!(raw.len(), count);

            for (dst, op) in dest[total..total + count].iter_mut().zip(raw.iter()) {
                let mut translated = translate_operation(op);
                translated.offset_first(byte_offset);
                *dst = translated;
            }

            *subset = DrawSubset {
                first: total as u32,
                count: count as u32,
            };

            total += count;
            byte_offset += self.index_data_block_size(variant) as u32;
        }
    }

    pub fn bounding_sphere(&self) -> Sphere {
        self.generator.bounding_sphere()
    }

    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        self.generator.ray_intersection(ray)
    }

    /// Stages one attribute's data through `temp`, uploads it into
    /// `buffer` and wires the vertex array state for `location`. The
    /// array buffer binding is left pointing at `buffer`.
    pub(crate) unsafe fn attrib_setup(
        &self,
        device: &mut dyn Device,
        vao: VertexArrayId,
        buffer: BufferId,
        location: u32,
        attrib: VertexAttrib,
        temp: &mut Vec<u8>,
    ) -> Result<()> {
        let size = self.attrib_data_block_size(attrib);
        self.attrib_data(attrib, scratch::ensure_len(temp, size));

        device.bind_buffer(BufferTarget::Array, buffer)?;
        device.buffer_data(BufferTarget::Array, &temp[..size], BufferHint::Immutable)?;

        let tp = self.attrib_type(attrib);
        let per_vertex = self.values_per_vertex(attrib);
        let normalized = self.is_attrib_normalized(attrib);

        if self.is_attrib_integral(attrib) && !normalized {
            device.vertex_attrib_i_pointer(location, per_vertex, tp, 0, 0)?;
        } else {
            device.vertex_attrib_pointer(location, per_vertex, tp, normalized, 0, 0)?;
        }

        if device.capabilities().attrib_divisors {
            let divisor = if self.attrib_divisors() {
                self.attrib_divisor(attrib)
            } else {
                0
            };
            device.vertex_attrib_divisor(location, divisor)?;
        }

        if device.capabilities().vertex_array_attrib_enable {
            device.enable_vertex_array_attrib(vao, location)?;
        } else {
            device.enable_vertex_attrib_array(location)?;
        }

        Ok(())
    }

    /// Stages one variant's index data through `temp` and uploads it into
    /// `buffer`.
    pub(crate) unsafe fn index_setup(
        &self,
        device: &mut dyn Device,
        buffer: BufferId,
        variant: DrawVariant,
        temp: &mut Vec<u8>,
    ) -> Result<()> {
        self.index_setup_concat(device, buffer, &[variant], temp)
    }

    /// Uploads the index data of several variants back to back into one
    /// combined buffer, matching the offsets `concat_instructions` bakes
    /// into the instruction stream.
    pub(crate) unsafe fn index_setup_concat(
        &self,
        device: &mut dyn Device,
        buffer: BufferId,
        variants: &[DrawVariant],
        temp: &mut Vec<u8>,
    ) -> Result<()> {
        let total = self.total_index_data_block_size(variants);

        {
            let dest = scratch::ensure_len(temp, total);
            let mut offset = 0;
            for &variant in variants {
                let size = self.index_data_block_size(variant);
                if size > 0 {
                    self.index_data(variant, &mut dest[offset..offset + size]);
                }
                offset += size;
            }
        }

        device.bind_buffer(BufferTarget::ElementArray, buffer)?;
        device.buffer_data(BufferTarget::ElementArray, &temp[..total], BufferHint::Immutable)
    }
}
