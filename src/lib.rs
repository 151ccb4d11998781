//! # Lathe
//!
//! Lathe takes abstract procedural shape descriptions and turns them into
//! ready-to-draw OpenGL geometry. A `ShapeGenerator` answers queries about
//! vertex attributes, index buffers and draw operations; the geometry
//! pipeline negotiates attribute bindings against it, packs the data into
//! buffer objects with the right element types, and replays a flat stream
//! of pre-translated draw instructions every frame.
//!
//! The OpenGL context itself stays behind the `Device` trait, so everything
//! above it can run against the real `GlDevice`, the no-op
//! `HeadlessDevice`, or a recording mock in tests.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate cgmath;
extern crate gl;
extern crate smallvec;

pub mod errors;
pub mod utils;
pub mod device;
pub mod geometry;
pub mod shapes;

pub mod prelude {
    pub use crate::device::{
        AttribDataType, BufferHint, BufferTarget, Device, DeviceCapabilities, FrontFaceOrder,
        IndexType, PrimitiveType,
    };
    pub use crate::errors::Result;
    pub use crate::geometry::attributes::{AttribValue, VertexAttrib, VertexAttribKind};
    pub use crate::geometry::bindings::VertexAttribBindings;
    pub use crate::geometry::instructions::{DrawOperation, DrawSubset};
    pub use crate::geometry::{Geometry, GeometryAndBindings, ShapeAdapter};
    pub use crate::shapes::{
        DrawVariant, GeneratorCapabilities, Ray, ShapeGenerator, Sphere,
    };
}
