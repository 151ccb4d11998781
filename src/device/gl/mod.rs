//! The real OpenGL backend. Requires a current context whose function
//! pointers have already been loaded; context and window management live
//! with the caller.

pub mod capabilities;
pub mod device;
mod types;

pub use self::device::GlDevice;
