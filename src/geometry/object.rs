//! GPU-side geometry objects: one vertex-array state plus the buffers
//! behind it, populated once and replayed every frame.

use smallvec::SmallVec;

use crate::device::{BufferId, Device, VertexArrayId};
use crate::errors::*;
use crate::geometry::adapter::ShapeAdapter;
use crate::geometry::bindings::VertexAttribBindings;
use crate::geometry::instructions::{self, DrawOperation, DrawSubset};
use crate::shapes::{DrawVariant, ShapeGenerator};

/// Owns the driver resources for one shape + bindings + drawing-variant
/// combination: one vertex-array handle and one buffer per bound
/// attribute, plus an index buffer when the variant is indexed.
///
/// Geometry is move-only; the handles it owns must be released through
/// `clean_up` with the device they were created on. Dropping a live
/// geometry cannot reach the device and therefore leaks, which is
/// reported through the log.
pub struct Geometry {
    vao: VertexArrayId,
    buffers: SmallVec<[BufferId; 8]>,
    ops: Vec<DrawOperation>,
    /// How many times the shape is intrinsically instanced. Multiplied
    /// into every requested instance count at the call site; never
    /// mutated after construction.
    intrinsic_instance_count: u32,
}

impl Geometry {
    /// Builds geometry for one drawing variant.
    ///
    /// Buffer uploads and attribute configuration happen in binding-slot
    /// order against the freshly bound vertex-array state; `temp` stages
    /// each attribute's bytes and is only grown, never shrunk, so one
    /// buffer serves many constructions. The default vertex array is
    /// rebound before returning so the new state cannot leak into caller
    /// code.
    pub fn new<G>(
        device: &mut dyn Device,
        shape: &ShapeAdapter<G>,
        bindings: &VertexAttribBindings,
        variant: DrawVariant,
        temp: &mut Vec<u8>,
    ) -> Result<Geometry>
    where
        G: ShapeGenerator,
    {
        let indexed = shape.indexed_drawing(variant);

        unsafe {
            let vao = device.create_vertex_array()?;
            let attrib_count = bindings.attrib_count();
            let buffers = device.create_buffers(attrib_count + indexed as usize)?;

            device.bind_vertex_array(vao)?;

            for (i, attrib) in bindings.attribs().enumerate() {
                shape.attrib_setup(device, vao, buffers[i], i as u32, attrib, temp)?;
            }

            if indexed {
                shape.index_setup(device, buffers[attrib_count], variant, temp)?;
            }

            let mut ops = vec![DrawOperation::default(); shape.operation_count(variant) as usize];
            shape.instructions(variant, &mut ops);

            device.bind_vertex_array(0)?;

            Ok(Geometry {
                vao,
                buffers,
                ops,
                intrinsic_instance_count: shape.instance_count(),
            })
        }
    }

    /// Builds geometry covering several drawing variants in one combined
    /// buffer set, returning per-variant subsets into the instruction
    /// stream for `draw_subset`.
    pub fn with_variants<G>(
        device: &mut dyn Device,
        shape: &ShapeAdapter<G>,
        bindings: &VertexAttribBindings,
        variants: &[DrawVariant],
        temp: &mut Vec<u8>,
    ) -> Result<(Geometry, Vec<DrawSubset>)>
    where
        G: ShapeGenerator,
    {
        let indexed = variants.iter().any(|v| shape.indexed_drawing(*v));

        unsafe {
            let vao = device.create_vertex_array()?;
            let attrib_count = bindings.attrib_count();
            let buffers = device.create_buffers(attrib_count + indexed as usize)?;

            device.bind_vertex_array(vao)?;

            for (i, attrib) in bindings.attribs().enumerate() {
                shape.attrib_setup(device, vao, buffers[i], i as u32, attrib, temp)?;
            }

            if indexed {
                shape.index_setup_concat(device, buffers[attrib_count], variants, temp)?;
            }

            let total = shape.total_operation_count(variants) as usize;
            let mut ops = vec![DrawOperation::default(); total];
            let mut subsets = vec![DrawSubset::default(); variants.len()];
            shape.concat_instructions(variants, &mut subsets, &mut ops);

            device.bind_vertex_array(0)?;

            Ok((
                Geometry {
                    vao,
                    buffers,
                    ops,
                    intrinsic_instance_count: shape.instance_count(),
                },
                subsets,
            ))
        }
    }

    pub fn vertex_array(&self) -> VertexArrayId {
        self.vao
    }

    pub fn buffers(&self) -> &[BufferId] {
        &self.buffers
    }

    pub fn operations(&self) -> &[DrawOperation] {
        &self.ops
    }

    pub fn instance_count(&self) -> u32 {
        self.intrinsic_instance_count
    }

    /// Binds this geometry's vertex-array state as current.
    pub fn bind(&self, device: &mut dyn Device) -> Result<()> {
        unsafe { device.bind_vertex_array(self.vao) }
    }

    /// Replays the instruction stream once per intrinsic instance.
    pub fn draw(&self, device: &mut dyn Device) -> Result<()> {
        instructions::draw_ops(device, &self.ops, self.intrinsic_instance_count)
    }

    /// Replays the instruction stream `instances` times. A compound shape
    /// that is itself instanced multiplies, so the device sees
    /// `instances * instance_count()`; the product is computed here, per
    /// call, from the two separately kept counts.
    pub fn draw_instanced(&self, device: &mut dyn Device, instances: u32) -> Result<()> {
        instructions::draw_ops(device, &self.ops, instances * self.intrinsic_instance_count)
    }

    /// Replays a contiguous range of the instruction stream, as recorded
    /// by `with_variants`.
    pub fn draw_subset(&self, device: &mut dyn Device, subset: DrawSubset) -> Result<()> {
        let first = subset.first as usize;
        let end = first + subset.count as usize;
        assert!(end <= self.ops.len(), "draw subset is out of bounds");

        instructions::draw_ops(device, &self.ops[first..end], self.intrinsic_instance_count)
    }

    /// Releases every owned handle. Safe to call more than once; handles
    /// already released are skipped.
    pub fn clean_up(&mut self, device: &mut dyn Device) -> Result<()> {
        unsafe {
            if !self.buffers.is_empty() {
                device.delete_buffers(&self.buffers)?;
                self.buffers.clear();
            }

            if self.vao != 0 {
                device.delete_vertex_array(self.vao)?;
                self.vao = 0;
            }
        }

        Ok(())
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        if self.vao != 0 || !self.buffers.is_empty() {
            warn!(
                "Geometry dropped without clean_up; leaking vertex array {} and {} buffer(s).",
                self.vao,
                self.buffers.len()
            );
        }
    }
}

/// A bindings object and the geometry built against it, owned together so
/// the common case is a single call from a generator.
pub struct GeometryAndBindings {
    bindings: VertexAttribBindings,
    geometry: Geometry,
}

impl GeometryAndBindings {
    /// Default-binds every attribute the generator advertises and builds
    /// geometry for the first drawing variant.
    pub fn new<G>(
        device: &mut dyn Device,
        shape: &ShapeAdapter<G>,
        temp: &mut Vec<u8>,
    ) -> Result<Self>
    where
        G: ShapeGenerator,
    {
        Self::with_variant(device, shape, DrawVariant::default(), temp)
    }

    pub fn with_variant<G>(
        device: &mut dyn Device,
        shape: &ShapeAdapter<G>,
        variant: DrawVariant,
        temp: &mut Vec<u8>,
    ) -> Result<Self>
    where
        G: ShapeGenerator,
    {
        let bindings = VertexAttribBindings::from_generator(shape.generator());
        let geometry = Geometry::new(device, shape, &bindings, variant, temp)?;

        Ok(GeometryAndBindings { bindings, geometry })
    }

    pub fn bindings(&self) -> &VertexAttribBindings {
        &self.bindings
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn bind(&self, device: &mut dyn Device) -> Result<()> {
        self.geometry.bind(device)
    }

    pub fn draw(&self, device: &mut dyn Device) -> Result<()> {
        self.geometry.draw(device)
    }

    pub fn draw_instanced(&self, device: &mut dyn Device, instances: u32) -> Result<()> {
        self.geometry.draw_instanced(device, instances)
    }

    pub fn clean_up(&mut self, device: &mut dyn Device) -> Result<()> {
        self.geometry.clean_up(device)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::headless::HeadlessDevice;
    use crate::device::DeviceCapabilities;
    use crate::shapes::{Cube, Quad};

    #[test]
    fn cube_on_headless_device() {
        let mut device = HeadlessDevice::new();
        let shape = ShapeAdapter::new(Cube::new(), &DeviceCapabilities::default());
        let bindings = VertexAttribBindings::from_generator(shape.generator());
        let mut temp = Vec::new();

        let mut geometry = Geometry::new(
            &mut device,
            &shape,
            &bindings,
            DrawVariant::default(),
            &mut temp,
        )
        .unwrap();

        // Four attribute buffers plus the index buffer.
        assert_eq!(geometry.buffers().len(), 5);
        assert_eq!(geometry.operations().len(), 1);

        geometry.bind(&mut device).unwrap();
        geometry.draw(&mut device).unwrap();
        geometry.clean_up(&mut device).unwrap();
    }

    #[test]
    fn quad_composite() {
        let mut device = HeadlessDevice::new();
        let shape = ShapeAdapter::new(Quad::new(), &DeviceCapabilities::default());
        let mut temp = Vec::new();

        let mut quad = GeometryAndBindings::new(&mut device, &shape, &mut temp).unwrap();

        assert_eq!(quad.bindings().attrib_count(), 2);
        // Non-indexed: one buffer per attribute, none for indices.
        assert_eq!(quad.geometry().buffers().len(), 2);

        quad.draw(&mut device).unwrap();
        quad.clean_up(&mut device).unwrap();
    }
}
