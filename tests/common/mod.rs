//! Test doubles: a device that records every driver call and a shape
//! generator with scriptable attributes, variants and operations.
#![allow(dead_code)]

use smallvec::SmallVec;

use lathe::errors::Result;
use lathe::prelude::*;
use lathe::shapes::{ShapeAttribType, ShapeDrawOperation, ShapeIndexType};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    BindVertexArray(u32),
    BindBuffer(BufferTarget, u32),
    BufferData(BufferTarget, usize),
    AttribPointer {
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
        normalized: bool,
    },
    AttribIPointer {
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
    },
    AttribDivisor {
        location: u32,
        divisor: u32,
    },
    EnableAttrib(u32),
    EnableVertexArrayAttrib(u32, u32),
    FrontFace(FrontFaceOrder),
    EnableRestart(u32),
    DisableRestart,
    PatchVertices(u32),
    DrawArrays {
        mode: PrimitiveType,
        first: u32,
        count: u32,
        instances: u32,
    },
    DrawElements {
        mode: PrimitiveType,
        count: u32,
        idx_type: IndexType,
        byte_offset: u32,
        instances: u32,
    },
}

pub struct RecordingDevice {
    capabilities: DeviceCapabilities,
    pub calls: Vec<Call>,
    pub vaos_created: u32,
    pub vaos_deleted: u32,
    pub buffers_created: u32,
    pub buffers_deleted: u32,
    next_name: u32,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::with_capabilities(DeviceCapabilities::default())
    }

    pub fn with_capabilities(capabilities: DeviceCapabilities) -> Self {
        RecordingDevice {
            capabilities,
            calls: Vec::new(),
            vaos_created: 0,
            vaos_deleted: 0,
            buffers_created: 0,
            buffers_deleted: 0,
            next_name: 1,
        }
    }

    fn name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    /// Handles created minus handles released, across both handle kinds.
    pub fn live_handles(&self) -> i64 {
        i64::from(self.vaos_created) + i64::from(self.buffers_created)
            - i64::from(self.vaos_deleted)
            - i64::from(self.buffers_deleted)
    }

    pub fn draw_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| match c {
                Call::DrawArrays { .. } | Call::DrawElements { .. } => true,
                _ => false,
            })
            .collect()
    }
}

impl Device for RecordingDevice {
    fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    unsafe fn create_vertex_array(&mut self) -> Result<u32> {
        self.vaos_created += 1;
        Ok(self.name())
    }

    unsafe fn delete_vertex_array(&mut self, id: u32) -> Result<()> {
        if id != 0 {
            self.vaos_deleted += 1;
        }
        Ok(())
    }

    unsafe fn bind_vertex_array(&mut self, id: u32) -> Result<()> {
        self.calls.push(Call::BindVertexArray(id));
        Ok(())
    }

    unsafe fn create_buffers(&mut self, count: usize) -> Result<SmallVec<[u32; 8]>> {
        let mut ids = SmallVec::new();
        for _ in 0..count {
            self.buffers_created += 1;
            let name = self.name();
            ids.push(name);
        }
        Ok(ids)
    }

    unsafe fn delete_buffers(&mut self, ids: &[u32]) -> Result<()> {
        self.buffers_deleted += ids.iter().filter(|&&id| id != 0).count() as u32;
        Ok(())
    }

    unsafe fn bind_buffer(&mut self, target: BufferTarget, id: u32) -> Result<()> {
        self.calls.push(Call::BindBuffer(target, id));
        Ok(())
    }

    unsafe fn buffer_data(
        &mut self,
        target: BufferTarget,
        bytes: &[u8],
        _: BufferHint,
    ) -> Result<()> {
        self.calls.push(Call::BufferData(target, bytes.len()));
        Ok(())
    }

    unsafe fn vertex_attrib_pointer(
        &mut self,
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
        normalized: bool,
        _: u32,
        _: usize,
    ) -> Result<()> {
        self.calls.push(Call::AttribPointer {
            location,
            values_per_vertex,
            tp,
            normalized,
        });
        Ok(())
    }

    unsafe fn vertex_attrib_i_pointer(
        &mut self,
        location: u32,
        values_per_vertex: u32,
        tp: AttribDataType,
        _: u32,
        _: usize,
    ) -> Result<()> {
        self.calls.push(Call::AttribIPointer {
            location,
            values_per_vertex,
            tp,
        });
        Ok(())
    }

    unsafe fn vertex_attrib_divisor(&mut self, location: u32, divisor: u32) -> Result<()> {
        self.calls.push(Call::AttribDivisor { location, divisor });
        Ok(())
    }

    unsafe fn enable_vertex_attrib_array(&mut self, location: u32) -> Result<()> {
        self.calls.push(Call::EnableAttrib(location));
        Ok(())
    }

    unsafe fn enable_vertex_array_attrib(&mut self, vao: u32, location: u32) -> Result<()> {
        self.calls.push(Call::EnableVertexArrayAttrib(vao, location));
        Ok(())
    }

    unsafe fn front_face(&mut self, order: FrontFaceOrder) -> Result<()> {
        self.calls.push(Call::FrontFace(order));
        Ok(())
    }

    unsafe fn enable_primitive_restart(&mut self, index: u32) -> Result<()> {
        self.calls.push(Call::EnableRestart(index));
        Ok(())
    }

    unsafe fn disable_primitive_restart(&mut self) -> Result<()> {
        self.calls.push(Call::DisableRestart);
        Ok(())
    }

    unsafe fn patch_vertices(&mut self, count: u32) -> Result<()> {
        self.calls.push(Call::PatchVertices(count));
        Ok(())
    }

    unsafe fn draw_arrays(&mut self, mode: PrimitiveType, first: u32, count: u32) -> Result<()> {
        self.calls.push(Call::DrawArrays {
            mode,
            first,
            count,
            instances: 1,
        });
        Ok(())
    }

    unsafe fn draw_arrays_instanced(
        &mut self,
        mode: PrimitiveType,
        first: u32,
        count: u32,
        instances: u32,
    ) -> Result<()> {
        self.calls.push(Call::DrawArrays {
            mode,
            first,
            count,
            instances,
        });
        Ok(())
    }

    unsafe fn draw_elements(
        &mut self,
        mode: PrimitiveType,
        count: u32,
        idx_type: IndexType,
        byte_offset: u32,
    ) -> Result<()> {
        self.calls.push(Call::DrawElements {
            mode,
            count,
            idx_type,
            byte_offset,
            instances: 1,
        });
        Ok(())
    }

    unsafe fn draw_elements_instanced(
        &mut self,
        mode: PrimitiveType,
        count: u32,
        idx_type: IndexType,
        byte_offset: u32,
        instances: u32,
    ) -> Result<()> {
        self.calls.push(Call::DrawElements {
            mode,
            count,
            idx_type,
            byte_offset,
            instances,
        });
        Ok(())
    }
}

/// One scripted attribute stream of a `TestShape`.
pub struct TestAttrib {
    pub attrib: VertexAttrib,
    pub tp: ShapeAttribType,
    pub values_per_vertex: u32,
    pub divisor: u32,
}

/// One scripted drawing variant of a `TestShape`.
pub struct TestVariant {
    pub idx_type: ShapeIndexType,
    pub indices: Vec<u32>,
    pub ops: Vec<ShapeDrawOperation>,
}

/// A generator whose answers are scripted by the test.
pub struct TestShape {
    pub caps: GeneratorCapabilities,
    pub vertices: u32,
    pub instances: u32,
    pub attribs: Vec<TestAttrib>,
    pub variants: Vec<TestVariant>,
}

impl TestShape {
    pub fn new() -> Self {
        TestShape {
            caps: GeneratorCapabilities::all(),
            vertices: 4,
            instances: 1,
            attribs: Vec::new(),
            variants: Vec::new(),
        }
    }

    fn find(&self, attrib: VertexAttrib) -> Option<&TestAttrib> {
        self.attribs.iter().find(|a| a.attrib == attrib)
    }

    fn variant(&self, variant: DrawVariant) -> &TestVariant {
        &self.variants[variant.0 as usize]
    }
}

impl ShapeGenerator for TestShape {
    fn enabled_caps(&self) -> GeneratorCapabilities {
        self.caps
    }

    fn enable_caps(&mut self, caps: GeneratorCapabilities) {
        self.caps = caps;
    }

    fn for_each_attrib(&self, visit: &mut dyn FnMut(VertexAttrib)) {
        for a in &self.attribs {
            visit(a.attrib);
        }
    }

    fn vertex_count(&self) -> u32 {
        self.vertices
    }

    fn instance_count(&self) -> u32 {
        self.instances
    }

    fn values_per_vertex(&self, attrib: VertexAttrib) -> u32 {
        self.find(attrib).map(|a| a.values_per_vertex).unwrap_or(0)
    }

    fn attrib_type(&self, attrib: VertexAttrib) -> ShapeAttribType {
        self.find(attrib)
            .map(|a| a.tp)
            .unwrap_or(ShapeAttribType::None)
    }

    fn attrib_divisor(&self, attrib: VertexAttrib) -> u32 {
        self.find(attrib).map(|a| a.divisor).unwrap_or(0)
    }

    fn attrib_values(&self, attrib: VertexAttrib, out: &mut Vec<f32>) {
        let count = self.vertices * self.values_per_vertex(attrib);
        out.extend((0..count).map(|i| (i % 100) as f32));
    }

    fn draw_variant_count(&self) -> u32 {
        self.variants.len() as u32
    }

    fn index_type(&self, variant: DrawVariant) -> ShapeIndexType {
        self.variant(variant).idx_type
    }

    fn index_count(&self, variant: DrawVariant) -> u32 {
        self.variant(variant).indices.len() as u32
    }

    fn index_values(&self, variant: DrawVariant, out: &mut Vec<u32>) {
        out.extend_from_slice(&self.variant(variant).indices);
    }

    fn operation_count(&self, variant: DrawVariant) -> u32 {
        self.variant(variant).ops.len() as u32
    }

    fn operations(&self, variant: DrawVariant, out: &mut Vec<ShapeDrawOperation>) {
        out.extend_from_slice(&self.variant(variant).ops);
    }

    fn bounding_sphere(&self) -> Sphere {
        Sphere {
            center: cgmath::Point3::new(0.0, 0.0, 0.0),
            radius: 1.0,
        }
    }
}
