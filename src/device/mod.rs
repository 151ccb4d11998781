//! The seam between the geometry pipeline and the OpenGL driver. The
//! `Device` trait exposes exactly the entry points geometry construction
//! and replay need; everything above it is backend agnostic.

pub mod headless;

#[cfg(not(target_arch = "wasm32"))]
pub mod gl;

use smallvec::SmallVec;

use crate::errors::*;

/// Buffer handles as handed out by the driver. Zero is the null handle and
/// is always safe to release.
pub type BufferId = u32;

/// Vertex-array-state handles. Zero is the null handle.
pub type VertexArrayId = u32;

/// How the input vertex stream is assembled into primitives.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrimitiveType {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Patches,
}

/// The element type of buffer-backed vertex attribute data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AttribDataType {
    UnsignedByte,
    Int16,
    Int32,
    UnsignedInt16,
    UnsignedInt32,
    Float,
}

impl AttribDataType {
    /// Size of a single element in bytes.
    pub fn size(self) -> usize {
        match self {
            AttribDataType::UnsignedByte => 1,
            AttribDataType::Int16 | AttribDataType::UnsignedInt16 => 2,
            AttribDataType::Int32 | AttribDataType::UnsignedInt32 | AttribDataType::Float => 4,
        }
    }
}

/// The element type of an index buffer. `None` marks a non-indexed draw,
/// which addresses logical vertex indices instead of a bound index buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IndexType {
    None,
    U8,
    U16,
    U32,
}

impl IndexType {
    /// Size of a single index in bytes; zero for the non-indexed case.
    pub fn size(self) -> usize {
        match self {
            IndexType::None => 0,
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Define front- and back-facing polygons.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrontFaceOrder {
    Clockwise,
    CounterClockwise,
}

/// Hint abouts the intended update strategy of buffer data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BufferHint {
    /// The buffer is filled once and drawn many times.
    Immutable,
    /// The buffer is rewritten by the CPU every frame.
    Stream,
    /// The buffer is rewritten occasionally.
    Dynamic,
}

/// The two buffer bind points the pipeline touches.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// What the underlying context can do. Parsed once per context; the
/// geometry code branches on these exactly once per call site instead of
/// probing individual driver entry points.
#[derive(Debug, Clone, Copy)]
pub struct DeviceCapabilities {
    /// `EnableVertexArrayAttrib`-style enables that name the vertex array
    /// directly instead of going through the global binding.
    pub vertex_array_attrib_enable: bool,
    /// Per-attribute instancing divisors.
    pub attrib_divisors: bool,
    /// Primitive restart with a configurable sentinel index.
    pub primitive_restart: bool,
    /// Tessellation patches and the patch-vertex-count state.
    pub patches: bool,
    /// Triangle fan primitives.
    pub triangle_fans: bool,
    /// Triangle strip primitives.
    pub triangle_strips: bool,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        DeviceCapabilities {
            vertex_array_attrib_enable: true,
            attrib_divisors: true,
            primitive_restart: true,
            patches: true,
            triangle_fans: true,
            triangle_strips: true,
        }
    }
}

/// The driver call surface used by geometry construction and replay.
///
/// Every method maps onto one driver entry point and returns the driver's
/// verdict untouched; this layer never swallows or retries. The methods
/// are `unsafe` because the real backend requires a current OpenGL context
/// on the calling thread.
pub trait Device {
    fn capabilities(&self) -> &DeviceCapabilities;

    unsafe fn create_vertex_array(&mut self) -> Result<VertexArrayId>;

    /// Releases a vertex array. Passing the null handle is a no-op.
    unsafe fn delete_vertex_array(&mut self, id: VertexArrayId) -> Result<()>;

    unsafe fn bind_vertex_array(&mut self, id: VertexArrayId) -> Result<()>;

    /// Allocates `count` buffer handles in one batch call.
    unsafe fn create_buffers(&mut self, count: usize) -> Result<SmallVec<[BufferId; 8]>>;

    /// Releases buffer handles. Null handles in the slice are no-ops.
    unsafe fn delete_buffers(&mut self, ids: &[BufferId]) -> Result<()>;

    unsafe fn bind_buffer(&mut self, target: BufferTarget, id: BufferId) -> Result<()>;

    /// Copies `bytes` into the driver-owned storage of the buffer bound to
    /// `target`. The source span is not referenced after this returns.
    unsafe fn buffer_data(
        &mut self,
        target: BufferTarget,
        bytes: &[u8],
        hint: BufferHint,
    ) -> Result<()>;

    /// Configures a floating point or normalized attribute pointer for the
    /// buffer currently bound to the array target.
    unsafe fn vertex_attrib_pointer(
        &mut self,
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
        normalized: bool,
        stride: u32,
        offset: usize,
    ) -> Result<()>;

    /// Configures an integral (non-normalized) attribute pointer.
    unsafe fn vertex_attrib_i_pointer(
        &mut self,
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
        stride: u32,
        offset: usize,
    ) -> Result<()>;

    unsafe fn vertex_attrib_divisor(&mut self, location: u32, divisor: u32) -> Result<()>;

    /// Enables an attribute slot through the global vertex array binding.
    unsafe fn enable_vertex_attrib_array(&mut self, location: u32) -> Result<()>;

    /// Enables an attribute slot on a named vertex array. Only valid when
    /// `capabilities().vertex_array_attrib_enable` holds.
    unsafe fn enable_vertex_array_attrib(
        &mut self,
        vao: VertexArrayId,
        location: u32,
    ) -> Result<()>;

    unsafe fn front_face(&mut self, order: FrontFaceOrder) -> Result<()>;

    unsafe fn enable_primitive_restart(&mut self, index: u32) -> Result<()>;

    unsafe fn disable_primitive_restart(&mut self) -> Result<()>;

    unsafe fn patch_vertices(&mut self, count: u32) -> Result<()>;

    unsafe fn draw_arrays(&mut self, mode: PrimitiveType, first: u32, count: u32) -> Result<()>;

    unsafe fn draw_arrays_instanced(
        &mut self,
        mode: PrimitiveType,
        first: u32,
        count: u32,
        instances: u32,
    ) -> Result<()>;

    /// Issues an indexed draw; `byte_offset` addresses into the bound
    /// index buffer.
    unsafe fn draw_elements(
        &mut self,
        mode: PrimitiveType,
        count: u32,
        idx_type: IndexType,
        byte_offset: u32,
    ) -> Result<()>;

    unsafe fn draw_elements_instanced(
        &mut self,
        mode: PrimitiveType,
        count: u32,
        idx_type: IndexType,
        byte_offset: u32,
        instances: u32,
    ) -> Result<()>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn element_sizes() {
        assert_eq!(AttribDataType::UnsignedByte.size(), 1);
        assert_eq!(AttribDataType::Int16.size(), 2);
        assert_eq!(AttribDataType::UnsignedInt16.size(), 2);
        assert_eq!(AttribDataType::Int32.size(), 4);
        assert_eq!(AttribDataType::UnsignedInt32.size(), 4);
        assert_eq!(AttribDataType::Float.size(), 4);

        assert_eq!(IndexType::None.size(), 0);
        assert_eq!(IndexType::U8.size(), 1);
        assert_eq!(IndexType::U16.size(), 2);
        assert_eq!(IndexType::U32.size(), 4);
    }
}
