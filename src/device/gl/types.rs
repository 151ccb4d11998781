use gl;
use gl::types::*;

use super::super::{
    AttribDataType, BufferHint, BufferTarget, FrontFaceOrder, IndexType, PrimitiveType,
};

impl From<PrimitiveType> for GLenum {
    fn from(primitive: PrimitiveType) -> Self {
        match primitive {
            PrimitiveType::Points => gl::POINTS,
            PrimitiveType::Lines => gl::LINES,
            PrimitiveType::LineStrip => gl::LINE_STRIP,
            PrimitiveType::LineLoop => gl::LINE_LOOP,
            PrimitiveType::Triangles => gl::TRIANGLES,
            PrimitiveType::TriangleStrip => gl::TRIANGLE_STRIP,
            PrimitiveType::TriangleFan => gl::TRIANGLE_FAN,
            PrimitiveType::Patches => gl::PATCHES,
        }
    }
}

impl From<AttribDataType> for GLenum {
    fn from(tp: AttribDataType) -> Self {
        match tp {
            AttribDataType::UnsignedByte => gl::UNSIGNED_BYTE,
            AttribDataType::Int16 => gl::SHORT,
            AttribDataType::Int32 => gl::INT,
            AttribDataType::UnsignedInt16 => gl::UNSIGNED_SHORT,
            AttribDataType::UnsignedInt32 => gl::UNSIGNED_INT,
            AttribDataType::Float => gl::FLOAT,
        }
    }
}

impl From<IndexType> for GLenum {
    fn from(tp: IndexType) -> Self {
        match tp {
            // Non-indexed operations take the `DrawArrays` path and never
            // reach a type translation.
            IndexType::None => unreachable!(),
            IndexType::U8 => gl::UNSIGNED_BYTE,
            IndexType::U16 => gl::UNSIGNED_SHORT,
            IndexType::U32 => gl::UNSIGNED_INT,
        }
    }
}

impl From<FrontFaceOrder> for GLenum {
    fn from(order: FrontFaceOrder) -> Self {
        match order {
            FrontFaceOrder::Clockwise => gl::CW,
            FrontFaceOrder::CounterClockwise => gl::CCW,
        }
    }
}

impl From<BufferTarget> for GLenum {
    fn from(target: BufferTarget) -> Self {
        match target {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl From<BufferHint> for GLenum {
    fn from(hint: BufferHint) -> Self {
        match hint {
            BufferHint::Immutable => gl::STATIC_DRAW,
            BufferHint::Stream => gl::STREAM_DRAW,
            BufferHint::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}
