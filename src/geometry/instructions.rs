//! Flat, replayable draw instruction records. All unit and type
//! conversions happen when a record is built, so replay is a plain loop
//! over driver calls.

use crate::device::{Device, FrontFaceOrder, IndexType, PrimitiveType};
use crate::errors::*;

/// One driver-ready record fully describing a single draw call.
///
/// For indexed operations `first` is a byte offset into the bound index
/// buffer; for non-indexed operations it is a logical vertex index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOperation {
    pub mode: PrimitiveType,
    pub idx_type: IndexType,
    pub first: u32,
    pub count: u32,
    /// Which intrinsic instance of a compound shape this batch belongs
    /// to.
    pub phase: u32,
    pub primitive_restart_index: u32,
    pub patch_vertices: u16,
    pub primitive_restart: bool,
    pub front_face: FrontFaceOrder,
}

impl Default for DrawOperation {
    fn default() -> Self {
        DrawOperation {
            mode: PrimitiveType::Points,
            idx_type: IndexType::None,
            first: 0,
            count: 0,
            phase: 0,
            primitive_restart_index: 0,
            patch_vertices: 3,
            primitive_restart: false,
            front_face: FrontFaceOrder::CounterClockwise,
        }
    }
}

impl DrawOperation {
    pub fn is_indexed(&self) -> bool {
        self.idx_type != IndexType::None
    }

    /// Shifts this operation into a combined index buffer that begins
    /// `byte_offset` bytes after the one it was emitted for.
    ///
    /// Non-indexed operations address logical vertex indices, not bytes
    /// of a bound index buffer, and must stay untouched when index data
    /// is concatenated around them.
    pub fn offset_first(&mut self, byte_offset: u32) {
        if self.is_indexed() {
            self.first += byte_offset;
        }
    }
}

/// A contiguous range into a flattened `DrawOperation` array, recorded
/// per drawing variant when several variants share one instruction
/// stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawSubset {
    pub first: u32,
    pub count: u32,
}

/// Replays `ops` in order, issuing `instances` copies of each. The
/// winding, restart and patch states are reissued per operation rather
/// than diffed against the previous one; callers wanting change detection
/// can layer it on without changing what is observable here.
///
/// Nothing fails at this layer; whatever the device reports bubbles up
/// through `?` untouched.
pub fn draw_ops(device: &mut dyn Device, ops: &[DrawOperation], instances: u32) -> Result<()> {
    let caps = *device.capabilities();

    unsafe {
        for op in ops {
            device.front_face(op.front_face)?;

            if caps.primitive_restart {
                if op.primitive_restart {
                    device.enable_primitive_restart(op.primitive_restart_index)?;
                } else {
                    device.disable_primitive_restart()?;
                }
            }

            if op.mode == PrimitiveType::Patches && caps.patches {
                device.patch_vertices(u32::from(op.patch_vertices))?;
            }

            if op.is_indexed() {
                if instances > 1 {
                    device.draw_elements_instanced(
                        op.mode, op.count, op.idx_type, op.first, instances,
                    )?;
                } else {
                    device.draw_elements(op.mode, op.count, op.idx_type, op.first)?;
                }
            } else if instances > 1 {
                device.draw_arrays_instanced(op.mode, op.first, op.count, instances)?;
            } else {
                device.draw_arrays(op.mode, op.first, op.count)?;
            }
        }
    }

    Ok(())
}
