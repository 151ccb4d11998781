//! The shape-generator-to-GPU-geometry pipeline: attribute bindings,
//! typed buffer population and replayable draw instruction streams.

pub mod adapter;
pub mod attributes;
pub mod bindings;
pub mod instructions;
pub mod object;

pub use self::adapter::ShapeAdapter;
pub use self::bindings::VertexAttribBindings;
pub use self::object::{Geometry, GeometryAndBindings};
