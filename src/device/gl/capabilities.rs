use gl;
use std::cmp;
use std::ffi;

use crate::errors::*;

use super::super::DeviceCapabilities;

/// Describes a context version.
///
/// A version can only be compared to another version if they belong to the
/// same API; `Version::GL(3, 3) >= Version::ES(3, 0)` is neither true nor
/// false.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Obtains the version of the current context using the loaded
    /// functions.
    ///
    /// # Unsafe
    ///
    /// The functions must belong to the current context of the calling
    /// thread.
    pub unsafe fn parse() -> Result<Version> {
        let desc = gl::GetString(gl::VERSION);
        if desc.is_null() {
            bail!("[GL] Version string is null.");
        }

        let desc = String::from_utf8(ffi::CStr::from_ptr(desc as *const _).to_bytes().to_vec())
            .map_err(|_| format_err!("[GL] Version string is unformaled."))?;

        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            (true, &desc[13..])
        } else {
            (false, &desc[..])
        };

        let desc = desc
            .split(' ')
            .next()
            .ok_or_else(|| format_err!("[GL] Version string is unformaled."))?;

        let mut iter = desc.split(move |c: char| c == '.');
        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| format_err!("[GL] Version string is unformaled."))?;
        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| format_err!("[GL] Version string is unformaled."))?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

/// The extensions this crate cares about, out of the hundreds a context
/// may advertise.
#[derive(Debug, Default, Clone, Copy)]
pub struct Extensions {
    pub arb_direct_state_access: bool,
    pub arb_instanced_arrays: bool,
    pub arb_tessellation_shader: bool,
}

impl Extensions {
    pub unsafe fn parse(version: Version) -> Result<Extensions> {
        let strings: Vec<String> =
            if version >= Version::GL(3, 0) || version >= Version::ES(3, 0) {
                let mut num_extensions = 0;
                gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);
                (0..num_extensions)
                    .map(|i| {
                        let ext = gl::GetStringi(gl::EXTENSIONS, i as gl::types::GLuint);
                        String::from_utf8(
                            ffi::CStr::from_ptr(ext as *const _).to_bytes().to_vec(),
                        )
                        .unwrap_or_default()
                    })
                    .collect()
            } else {
                let list = gl::GetString(gl::EXTENSIONS);
                if list.is_null() {
                    bail!("[GL] Extension string is null.");
                }

                let list =
                    String::from_utf8(ffi::CStr::from_ptr(list as *const _).to_bytes().to_vec())
                        .map_err(|_| format_err!("[GL] Extension string is unformaled."))?;
                list.split(' ').map(|e| e.to_owned()).collect()
            };

        let mut extensions = Extensions::default();
        for extension in strings {
            match &extension[..] {
                "GL_ARB_direct_state_access" => extensions.arb_direct_state_access = true,
                "GL_ARB_instanced_arrays" => extensions.arb_instanced_arrays = true,
                "GL_ARB_tessellation_shader" => extensions.arb_tessellation_shader = true,
                _ => (),
            }
        }

        Ok(extensions)
    }
}

/// Derives the capability set the geometry code branches on from the
/// context version and extension list.
pub fn device_capabilities(version: Version, exts: &Extensions) -> DeviceCapabilities {
    DeviceCapabilities {
        vertex_array_attrib_enable: version >= Version::GL(4, 5) || exts.arb_direct_state_access,
        attrib_divisors: version >= Version::GL(3, 3)
            || version >= Version::ES(3, 0)
            || exts.arb_instanced_arrays,
        primitive_restart: version >= Version::GL(3, 1) || version >= Version::ES(3, 0),
        patches: version >= Version::GL(4, 0)
            || version >= Version::ES(3, 2)
            || exts.arb_tessellation_shader,
        // Fans and strips have been part of every GL and ES profile this
        // crate can be loaded against.
        triangle_fans: true,
        triangle_strips: true,
    }
}
