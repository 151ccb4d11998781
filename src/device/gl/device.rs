use gl;
use gl::types::*;
use smallvec::SmallVec;

use crate::errors::*;

use super::super::{
    AttribDataType, BufferHint, BufferId, BufferTarget, Device, DeviceCapabilities,
    FrontFaceOrder, IndexType, PrimitiveType, VertexArrayId,
};
use super::capabilities::{device_capabilities, Extensions, Version};

/// `Device` backed by the `gl` crate. Every call is forwarded verbatim and
/// checked with `glGetError`; failures bubble up untranslated.
pub struct GlDevice {
    capabilities: DeviceCapabilities,
    version: Version,
}

impl GlDevice {
    /// Parses the current context's capabilities and wraps it.
    ///
    /// # Unsafe
    ///
    /// The context must be current on the calling thread and its function
    /// pointers must already be loaded.
    pub unsafe fn new() -> Result<Self> {
        let version = Version::parse()?;
        let extensions = Extensions::parse(version)?;
        let capabilities = device_capabilities(version, &extensions);
        info!("GlDevice {:?} {:#?}", version, capabilities);

        Ok(GlDevice {
            capabilities,
            version,
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }
}

impl Device for GlDevice {
    fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    unsafe fn create_vertex_array(&mut self) -> Result<VertexArrayId> {
        let mut id = 0;
        gl::GenVertexArrays(1, &mut id);
        check()?;
        assert!(id != 0);
        Ok(id)
    }

    unsafe fn delete_vertex_array(&mut self, id: VertexArrayId) -> Result<()> {
        if id != 0 {
            gl::DeleteVertexArrays(1, &id);
            check()?;
        }

        Ok(())
    }

    unsafe fn bind_vertex_array(&mut self, id: VertexArrayId) -> Result<()> {
        gl::BindVertexArray(id);
        check()
    }

    unsafe fn create_buffers(&mut self, count: usize) -> Result<SmallVec<[BufferId; 8]>> {
        let mut ids: SmallVec<[BufferId; 8]> = SmallVec::new();
        if count > 0 {
            ids.resize(count, 0);
            gl::GenBuffers(count as GLsizei, ids.as_mut_ptr());
            check()?;
        }

        Ok(ids)
    }

    unsafe fn delete_buffers(&mut self, ids: &[BufferId]) -> Result<()> {
        if !ids.is_empty() {
            gl::DeleteBuffers(ids.len() as GLsizei, ids.as_ptr());
            check()?;
        }

        Ok(())
    }

    unsafe fn bind_buffer(&mut self, target: BufferTarget, id: BufferId) -> Result<()> {
        gl::BindBuffer(target.into(), id);
        check()
    }

    unsafe fn buffer_data(
        &mut self,
        target: BufferTarget,
        bytes: &[u8],
        hint: BufferHint,
    ) -> Result<()> {
        let ptr = if bytes.is_empty() {
            ::std::ptr::null()
        } else {
            bytes.as_ptr() as *const ::std::os::raw::c_void
        };

        gl::BufferData(target.into(), bytes.len() as GLsizeiptr, ptr, hint.into());
        check()
    }

    unsafe fn vertex_attrib_pointer(
        &mut self,
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
        normalized: bool,
        stride: u32,
        offset: usize,
    ) -> Result<()> {
        gl::VertexAttribPointer(
            location,
            values_per_vertex as GLint,
            tp.into(),
            normalized as u8,
            stride as GLsizei,
            offset as *const ::std::os::raw::c_void,
        );
        check()
    }

    unsafe fn vertex_attrib_i_pointer(
        &mut self,
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
        stride: u32,
        offset: usize,
    ) -> Result<()> {
        gl::VertexAttribIPointer(
            location,
            values_per_vertex as GLint,
            tp.into(),
            stride as GLsizei,
            offset as *const ::std::os::raw::c_void,
        );
        check()
    }

    unsafe fn vertex_attrib_divisor(&mut self, location: u32, divisor: u32) -> Result<()> {
        gl::VertexAttribDivisor(location, divisor);
        check()
    }

    unsafe fn enable_vertex_attrib_array(&mut self, location: u32) -> Result<()> {
        gl::EnableVertexAttribArray(location);
        check()
    }

    unsafe fn enable_vertex_array_attrib(
        &mut self,
        vao: VertexArrayId,
        location: u32,
    ) -> Result<()> {
        gl::EnableVertexArrayAttrib(vao, location);
        check()
    }

    unsafe fn front_face(&mut self, order: FrontFaceOrder) -> Result<()> {
        gl::FrontFace(order.into());
        check()
    }

    unsafe fn enable_primitive_restart(&mut self, index: u32) -> Result<()> {
        gl::Enable(gl::PRIMITIVE_RESTART);
        gl::PrimitiveRestartIndex(index);
        check()
    }

    unsafe fn disable_primitive_restart(&mut self) -> Result<()> {
        gl::Disable(gl::PRIMITIVE_RESTART);
        check()
    }

    unsafe fn patch_vertices(&mut self, count: u32) -> Result<()> {
        gl::PatchParameteri(gl::PATCH_VERTICES, count as GLint);
        check()
    }

    unsafe fn draw_arrays(&mut self, mode: PrimitiveType, first: u32, count: u32) -> Result<()> {
        gl::DrawArrays(mode.into(), first as GLint, count as GLsizei);
        check()
    }

    unsafe fn draw_arrays_instanced(
        &mut self,
        mode: PrimitiveType,
        first: u32,
        count: u32,
        instances: u32,
    ) -> Result<()> {
        gl::DrawArraysInstanced(
            mode.into(),
            first as GLint,
            count as GLsizei,
            instances as GLsizei,
        );
        check()
    }

    unsafe fn draw_elements(
        &mut self,
        mode: PrimitiveType,
        count: u32,
        idx_type: IndexType,
        byte_offset: u32,
    ) -> Result<()> {
        gl::DrawElements(
            mode.into(),
            count as GLsizei,
            idx_type.into(),
            byte_offset as usize as *const ::std::os::raw::c_void,
        );
        check()
    }

    unsafe fn draw_elements_instanced(
        &mut self,
        mode: PrimitiveType,
        count: u32,
        idx_type: IndexType,
        byte_offset: u32,
        instances: u32,
    ) -> Result<()> {
        gl::DrawElementsInstanced(
            mode.into(),
            count as GLsizei,
            idx_type.into(),
            byte_offset as usize as *const ::std::os::raw::c_void,
            instances as GLsizei,
        );
        check()
    }
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => {
            bail!("[GL] An unacceptable value is specified for an enumerated argument.")
        }

        gl::INVALID_VALUE => bail!("[GL] A numeric argument is out of range."),

        gl::INVALID_OPERATION => {
            bail!("[GL] The specified operation is not allowed in the current state.")
        }

        gl::OUT_OF_MEMORY => bail!("[GL] There is not enough memory left to execute the command."),

        _ => bail!("[GL] Oops, Unknown OpenGL error."),
    }
}
