//! A no-op device that accepts everything and draws nothing. Useful for
//! running the pipeline on machines without a GL context, e.g. in CI.

use smallvec::SmallVec;

use crate::errors::*;

use super::{
    AttribDataType, BufferHint, BufferId, BufferTarget, Device, DeviceCapabilities,
    FrontFaceOrder, IndexType, PrimitiveType, VertexArrayId,
};

pub struct HeadlessDevice {
    capabilities: DeviceCapabilities,
    next_name: u32,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        HeadlessDevice {
            capabilities: DeviceCapabilities::default(),
            next_name: 1,
        }
    }

    fn name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for HeadlessDevice {
    fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    unsafe fn create_vertex_array(&mut self) -> Result<VertexArrayId> {
        Ok(self.name())
    }

    unsafe fn delete_vertex_array(&mut self, _: VertexArrayId) -> Result<()> {
        Ok(())
    }

    unsafe fn bind_vertex_array(&mut self, _: VertexArrayId) -> Result<()> {
        Ok(())
    }

    unsafe fn create_buffers(&mut self, count: usize) -> Result<SmallVec<[BufferId; 8]>> {
        let mut ids = SmallVec::new();
        for _ in 0..count {
            let name = self.name();
            ids.push(name);
        }
        Ok(ids)
    }

    unsafe fn delete_buffers(&mut self, _: &[BufferId]) -> Result<()> {
        Ok(())
    }

    unsafe fn bind_buffer(&mut self, _: BufferTarget, _: BufferId) -> Result<()> {
        Ok(())
    }

    unsafe fn buffer_data(&mut self, _: BufferTarget, _: &[u8], _: BufferHint) -> Result<()> {
        Ok(())
    }

    unsafe fn vertex_attrib_pointer(
        &mut self,
        _: u32,
        _: u32,
        _: AttribDataType,
        _: bool,
        _: u32,
        _: usize,
    ) -> Result<()> {
        Ok(())
    }

    unsafe fn vertex_attrib_i_pointer(
        &mut self,
        _: u32,
        _: u32,
        _: AttribDataType,
        _: u32,
        _: usize,
    ) -> Result<()> {
        Ok(())
    }

    unsafe fn vertex_attrib_divisor(&mut self, _: u32, _: u32) -> Result<()> {
        Ok(())
    }

    unsafe fn enable_vertex_attrib_array(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    unsafe fn enable_vertex_array_attrib(&mut self, _: VertexArrayId, _: u32) -> Result<()> {
        Ok(())
    }

    unsafe fn front_face(&mut self, _: FrontFaceOrder) -> Result<()> {
        Ok(())
    }

    unsafe fn enable_primitive_restart(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    unsafe fn disable_primitive_restart(&mut self) -> Result<()> {
        Ok(())
    }

    unsafe fn patch_vertices(&mut self, _: u32) -> Result<()> {
        Ok(())
    }

    unsafe fn draw_arrays(&mut self, _: PrimitiveType, _: u32, _: u32) -> Result<()> {
        Ok(())
    }

    unsafe fn draw_arrays_instanced(
        &mut self,
        _: PrimitiveType,
        _: u32,
        _: u32,
        _: u32,
    ) -> Result<()> {
        Ok(())
    }

    unsafe fn draw_elements(&mut self, _: PrimitiveType, _: u32, _: IndexType, _: u32) -> Result<()> {
        Ok(())
    }

    unsafe fn draw_elements_instanced(
        &mut self,
        _: PrimitiveType,
        _: u32,
        _: IndexType,
        _: u32,
        _: u32,
    ) -> Result<()> {
        Ok(())
    }
}
