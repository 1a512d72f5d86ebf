// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    accel::{Accelerator, PixelFormat, Status, Surface},
    error::Result,
    image::HostBuffer,
};
use rga_sys::{
    guess_version, im_handle_param_t, query_string, rga as rga_library, rga_buffer_t,
    IM_INTERP_DEFAULT, IM_STATUS_SUCCESS, RGA_VERSION,
};
use std::ffi::{CStr, OsStr};
use tracing::{debug, info, warn};

/// Default shared object name of the Rockchip RGA library
pub const RGA_LIBRARY: &str = "librga.so";

/// Rockchip RGA 2D raster accelerator.
///
/// Wraps a runtime-loaded `librga` and implements [`Accelerator`] on top of
/// its `im2d` handle API.
///
/// # Thread Safety
///
/// `Rga` is **not** thread-safe. Handles registered through one instance
/// must be released through the same instance.
///
/// # Example
///
/// ```no_run
/// use rga_resize::{
///     accel::{Accelerator, BufferHandle, PixelFormat},
///     image::HostBuffer,
///     rga::{Rga, RGA_LIBRARY},
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rga = Rga::new(RGA_LIBRARY)?;
/// let mut src_buf = HostBuffer::new(1280, 720)?;
/// let mut dst_buf = HostBuffer::new(640, 360)?;
/// let src = BufferHandle::import(&rga, &mut src_buf, PixelFormat::Rgb888)?;
/// let dst = BufferHandle::import(&rga, &mut dst_buf, PixelFormat::Rgb888)?;
/// let status = rga.resize(&src.surface(1280, 720), &dst.surface(640, 360));
/// println!("{}", rga.describe(status));
/// # Ok(())
/// # }
/// ```
pub struct Rga {
    lib: rga_library,
    version: Option<rga_sys::Version>,
}

impl Rga {
    /// Loads the RGA library.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AcceleratorUnavailable`](crate::error::Error) if the
    /// library cannot be opened or lacks one of the required entry points.
    pub fn new(library: impl AsRef<OsStr>) -> Result<Self> {
        let lib = unsafe { rga_library::new(library.as_ref()) }?;
        let version = guess_version(&lib);
        match version {
            Some(v) => info!("RGA driver version {}", v),
            None => warn!("unable to determine RGA driver version"),
        }
        Ok(Self { lib, version })
    }

    /// Parsed driver version, if the version report was understood.
    pub fn version_number(&self) -> Option<rga_sys::Version> {
        self.version
    }
}

impl From<&Surface> for rga_buffer_t {
    fn from(surface: &Surface) -> Self {
        Self {
            width: surface.width as i32,
            height: surface.height as i32,
            wstride: surface.wstride as i32,
            hstride: surface.hstride as i32,
            format: surface.format.rk_format(),
            handle: surface.handle,
            ..Default::default()
        }
    }
}

impl Accelerator for Rga {
    fn version(&self) -> String {
        query_string(&self.lib, RGA_VERSION).trim().to_string()
    }

    fn import(
        &self,
        buffer: &mut HostBuffer,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> i32 {
        let mut param = im_handle_param_t {
            width,
            height,
            format: format.rk_format() as u32,
        };
        unsafe {
            self.lib
                .importbuffer_virtualaddr_t(buffer.as_mut_ptr().cast(), &mut param)
        }
    }

    fn release(&self, handle: i32) {
        let status = unsafe { self.lib.releasebuffer_handle(handle) };
        if status != IM_STATUS_SUCCESS {
            warn!(
                "releasebuffer_handle({}) failed: {}",
                handle,
                self.describe(Status(status))
            );
        }
    }

    fn resize(&self, src: &Surface, dst: &Surface) -> Status {
        debug!(
            "imresize {}x{} (stride {}) -> {}x{} (stride {})",
            src.width, src.height, src.wstride, dst.width, dst.height, dst.wstride
        );
        // fx/fy of zero lets the driver derive the scale from the surfaces
        let status = unsafe {
            self.lib.imresize_t(
                src.into(),
                dst.into(),
                0.0,
                0.0,
                IM_INTERP_DEFAULT,
                1,
            )
        };
        Status(status)
    }

    fn describe(&self, status: Status) -> String {
        let ptr = unsafe { self.lib.imStrError_t(status.0) };
        if ptr.is_null() {
            return format!("unknown status {}", status);
        }
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_from_surface() {
        let surface = Surface {
            handle: 7,
            width: 1270,
            height: 714,
            wstride: 1280,
            hstride: 714,
            format: PixelFormat::Rgb888,
        };
        let buf: rga_buffer_t = (&surface).into();
        assert_eq!(buf.handle, 7);
        assert_eq!((buf.width, buf.height), (1270, 714));
        assert_eq!((buf.wstride, buf.hstride), (1280, 714));
        assert_eq!(buf.format, rga_sys::RK_FORMAT_RGB_888);
        assert!(buf.vir_addr.is_null());
        assert_eq!(buf.fd, 0);
    }

    #[test]
    fn missing_library_is_unavailable() {
        let err = Rga::new("librga-does-not-exist.so").err();
        assert!(matches!(
            err,
            Some(crate::error::Error::AcceleratorUnavailable(_))
        ));
    }
}
