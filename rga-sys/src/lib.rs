// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Low-level bindings for the C-exported subset of the Rockchip RGA `im2d`
//! API. The library is opened at runtime so that binaries built against
//! these bindings still start on boards without `librga.so`.

#![allow(non_camel_case_types, non_upper_case_globals, non_snake_case)]

use libc::{c_char, c_double, c_int, c_void};
use libloading::Library;
use std::{
    ffi::{CStr, OsStr},
    fmt,
    ptr::null_mut,
};

pub type rga_buffer_handle_t = c_int;
pub type IM_STATUS = c_int;

pub const IM_STATUS_NOERROR: IM_STATUS = 2;
pub const IM_STATUS_SUCCESS: IM_STATUS = 1;
pub const IM_STATUS_FAILED: IM_STATUS = 0;
pub const IM_STATUS_NOT_SUPPORTED: IM_STATUS = -1;
pub const IM_STATUS_OUT_OF_MEMORY: IM_STATUS = -2;
pub const IM_STATUS_INVALID_PARAM: IM_STATUS = -3;
pub const IM_STATUS_ILLEGAL_PARAM: IM_STATUS = -4;
pub const IM_STATUS_ERROR_VERSION: IM_STATUS = -5;
pub const IM_STATUS_NO_SESSION: IM_STATUS = -6;

// IM_INFORMATION
pub const RGA_VENDOR: c_int = 0;
pub const RGA_VERSION: c_int = 1;
pub const RGA_MAX_INPUT: c_int = 2;
pub const RGA_MAX_OUTPUT: c_int = 3;
pub const RGA_BYTE_STRIDE: c_int = 4;
pub const RGA_SCALE_LIMIT: c_int = 5;
pub const RGA_INPUT_FORMAT: c_int = 6;
pub const RGA_OUTPUT_FORMAT: c_int = 7;
pub const RGA_FEATURE: c_int = 8;
pub const RGA_EXPECTED: c_int = 9;
pub const RGA_ALL: c_int = 10;

pub const RK_FORMAT_RGBA_8888: c_int = 0x0 << 8;
pub const RK_FORMAT_RGBX_8888: c_int = 0x1 << 8;
pub const RK_FORMAT_RGB_888: c_int = 0x2 << 8;
pub const RK_FORMAT_BGRA_8888: c_int = 0x3 << 8;
pub const RK_FORMAT_BGR_888: c_int = 0x7 << 8;

pub const IM_INTERP_DEFAULT: c_int = 0;

#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct im_nn_t {
    pub scale_r: c_int,
    pub scale_g: c_int,
    pub scale_b: c_int,
    pub offset_r: c_int,
    pub offset_g: c_int,
    pub offset_b: c_int,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct im_colorkey_range {
    pub max: c_int,
    pub min: c_int,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct im_handle_param_t {
    pub width: u32,
    pub height: u32,
    pub format: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct rga_buffer_t {
    pub vir_addr: *mut c_void,
    pub phy_addr: *mut c_void,
    pub fd: c_int,
    pub width: c_int,
    pub height: c_int,
    pub wstride: c_int,
    pub hstride: c_int,
    pub format: c_int,
    pub color_space_mode: c_int,
    pub global_alpha: c_int,
    pub rd_mode: c_int,
    pub color: c_int,
    pub colorkey_range: im_colorkey_range,
    pub nn: im_nn_t,
    pub rop_code: c_int,
    pub handle: rga_buffer_handle_t,
}

impl Default for rga_buffer_t {
    fn default() -> Self {
        Self {
            vir_addr: null_mut(),
            phy_addr: null_mut(),
            fd: 0,
            width: 0,
            height: 0,
            wstride: 0,
            hstride: 0,
            format: 0,
            color_space_mode: 0,
            global_alpha: 0,
            rd_mode: 0,
            color: 0,
            colorkey_range: im_colorkey_range::default(),
            nn: im_nn_t::default(),
            rop_code: 0,
            handle: 0,
        }
    }
}

type querystring_fn = unsafe extern "C" fn(name: c_int) -> *const c_char;
type importbuffer_virtualaddr_fn =
    unsafe extern "C" fn(va: *mut c_void, param: *mut im_handle_param_t) -> rga_buffer_handle_t;
type releasebuffer_handle_fn = unsafe extern "C" fn(handle: rga_buffer_handle_t) -> IM_STATUS;
type imresize_fn = unsafe extern "C" fn(
    src: rga_buffer_t,
    dst: rga_buffer_t,
    fx: c_double,
    fy: c_double,
    interpolation: c_int,
    sync: c_int,
) -> IM_STATUS;
type imStrError_fn = unsafe extern "C" fn(status: IM_STATUS) -> *const c_char;

pub struct rga {
    __library: Library,
    querystring: querystring_fn,
    importbuffer_virtualaddr_t: importbuffer_virtualaddr_fn,
    releasebuffer_handle: releasebuffer_handle_fn,
    imresize_t: imresize_fn,
    imStrError_t: imStrError_fn,
}

impl rga {
    /// Opens the RGA library at `path` and resolves every entry point.
    ///
    /// # Safety
    ///
    /// Loading a shared library runs its initialisers. The caller must
    /// ensure `path` names a genuine `librga` build whose ABI matches the
    /// layouts declared in this crate.
    pub unsafe fn new<P: AsRef<OsStr>>(path: P) -> Result<Self, libloading::Error> {
        let library = Library::new(path)?;
        Self::from_library(library)
    }

    /// # Safety
    ///
    /// See [`rga::new`].
    pub unsafe fn from_library<L: Into<Library>>(library: L) -> Result<Self, libloading::Error> {
        let __library = library.into();
        let querystring: querystring_fn = *__library.get(b"querystring\0")?;
        let importbuffer_virtualaddr_t: importbuffer_virtualaddr_fn =
            *__library.get(b"importbuffer_virtualaddr_t\0")?;
        let releasebuffer_handle: releasebuffer_handle_fn =
            *__library.get(b"releasebuffer_handle\0")?;
        let imresize_t: imresize_fn = *__library.get(b"imresize_t\0")?;
        let imStrError_t: imStrError_fn = *__library.get(b"imStrError_t\0")?;
        Ok(Self {
            __library,
            querystring,
            importbuffer_virtualaddr_t,
            releasebuffer_handle,
            imresize_t,
            imStrError_t,
        })
    }

    /// # Safety
    ///
    /// The returned pointer is owned by the library and must not be freed.
    pub unsafe fn querystring(&self, name: c_int) -> *const c_char {
        (self.querystring)(name)
    }

    /// # Safety
    ///
    /// `va` must point to at least `width * height * bpp(format)` bytes that
    /// stay valid until the handle is released.
    pub unsafe fn importbuffer_virtualaddr_t(
        &self,
        va: *mut c_void,
        param: *mut im_handle_param_t,
    ) -> rga_buffer_handle_t {
        (self.importbuffer_virtualaddr_t)(va, param)
    }

    /// # Safety
    ///
    /// `handle` must have been returned by an import call and not released.
    pub unsafe fn releasebuffer_handle(&self, handle: rga_buffer_handle_t) -> IM_STATUS {
        (self.releasebuffer_handle)(handle)
    }

    /// # Safety
    ///
    /// Both buffers must reference live imported handles.
    pub unsafe fn imresize_t(
        &self,
        src: rga_buffer_t,
        dst: rga_buffer_t,
        fx: c_double,
        fy: c_double,
        interpolation: c_int,
        sync: c_int,
    ) -> IM_STATUS {
        (self.imresize_t)(src, dst, fx, fy, interpolation, sync)
    }

    /// # Safety
    ///
    /// The returned pointer is owned by the library and must not be freed.
    pub unsafe fn imStrError_t(&self, status: IM_STATUS) -> *const c_char {
        (self.imStrError_t)(status)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Extracts the first `vMAJOR.MINOR.PATCH` token from an RGA version report
/// such as `"RGA_api version       : v1.10.1_[0]"`.
pub fn parse_version(report: &str) -> Option<Version> {
    let bytes = report.as_bytes();
    let start = (0..bytes.len().saturating_sub(1))
        .find(|&i| bytes[i] == b'v' && bytes[i + 1].is_ascii_digit())?;

    let mut parts = report[start + 1..].splitn(3, '.').map(|part| {
        let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
        digits.parse::<u32>().ok()
    });

    Some(Version {
        major: parts.next()??,
        minor: parts.next()??,
        patch: parts.next()??,
    })
}

/// Returns the library's string for `name`, or an empty string if the
/// library reports nothing.
pub fn query_string(lib: &rga, name: c_int) -> String {
    let ptr = unsafe { lib.querystring(name) };
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

pub fn guess_version(lib: &rga) -> Option<Version> {
    parse_version(&query_string(lib, RGA_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_from_api_report() {
        let v = parse_version("RGA_api version       : v1.10.1_[0]\n").unwrap();
        assert_eq!(
            v,
            Version {
                major: 1,
                minor: 10,
                patch: 1
            }
        );
        assert_eq!(v.to_string(), "1.10.1");
    }

    #[test]
    fn version_skips_leading_text() {
        let v = parse_version("vendor: rockchip, version v2.0.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (2, 0, 3));
    }

    #[test]
    fn version_rejects_garbage() {
        assert!(parse_version("").is_none());
        assert!(parse_version("no version here").is_none());
        assert!(parse_version("v1.2").is_none());
    }

    #[test]
    fn version_ordering() {
        let old = parse_version("v1.3.2").unwrap();
        let new = parse_version("v1.10.0").unwrap();
        assert!(old < new);
    }

    #[test]
    fn formats_are_distinct() {
        assert_eq!(RK_FORMAT_RGB_888, 0x200);
        assert_eq!(RK_FORMAT_BGR_888, 0x700);
    }
}
