// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    error::{Error, Result},
    image::HostBuffer,
};
use core::fmt;
use rga_sys::RK_FORMAT_RGB_888;
use tracing::{debug, warn};

/// Pixel layouts the resize path hands to the accelerator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24-bit interleaved R, G, B
    Rgb888,
}

impl PixelFormat {
    /// The driver's `RK_FORMAT_*` code.
    pub fn rk_format(&self) -> i32 {
        match self {
            PixelFormat::Rgb888 => RK_FORMAT_RGB_888,
        }
    }
}

/// Status code returned by an accelerator operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status(pub i32);

impl Status {
    pub const SUCCESS: Status = Status(rga_sys::IM_STATUS_SUCCESS);

    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Describes the region an accelerator operation reads or writes.
///
/// `width` and `height` select the rectangle to operate on while
/// `wstride` and `hstride` give the true layout of the backing memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub handle: i32,
    pub width: u32,
    pub height: u32,
    pub wstride: u32,
    pub hstride: u32,
    pub format: PixelFormat,
}

/// A 2D raster accelerator able to resize registered host buffers.
///
/// Handles returned by [`Accelerator::import`] are raw driver values; a
/// non-positive value means the driver rejected the region. Prefer
/// [`BufferHandle::import`], which validates the handle and releases it on
/// drop.
pub trait Accelerator {
    /// Human readable driver version report.
    fn version(&self) -> String;

    /// Registers `buffer` as a `width`x`height` surface of `format`.
    fn import(
        &self,
        buffer: &mut HostBuffer,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> i32;

    /// Deregisters a handle previously returned by [`Accelerator::import`].
    fn release(&self, handle: i32);

    /// Scales `src` into `dst`, blocking until the hardware finishes.
    fn resize(&self, src: &Surface, dst: &Surface) -> Status;

    /// Driver description of `status`.
    fn describe(&self, status: Status) -> String;
}

/// Registration of a [`HostBuffer`] with an [`Accelerator`].
///
/// The buffer stays mutably borrowed for the lifetime of the handle so it
/// cannot be moved or freed while the hardware may access it. The handle is
/// released exactly once when dropped.
pub struct BufferHandle<'a, A: Accelerator + ?Sized> {
    raw: i32,
    format: PixelFormat,
    buffer: &'a mut HostBuffer,
    accel: &'a A,
}

impl<'a, A: Accelerator + ?Sized> BufferHandle<'a, A> {
    /// Registers the whole of `buffer` with `accel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferImport`] if the driver yields a non-positive
    /// handle. Nothing is released in that case.
    pub fn import(accel: &'a A, buffer: &'a mut HostBuffer, format: PixelFormat) -> Result<Self> {
        let (width, height) = (buffer.width(), buffer.height());
        let raw = accel.import(buffer, width, height, format);
        if raw <= 0 {
            warn!("import of {} rejected with handle {}", buffer, raw);
            return Err(Error::BufferImport {
                width,
                height,
                handle: raw,
            });
        }
        debug!("imported {} as handle {}", buffer, raw);
        Ok(Self {
            raw,
            format,
            buffer,
            accel,
        })
    }

    pub fn raw(&self) -> i32 {
        self.raw
    }

    pub fn buffer(&self) -> &HostBuffer {
        self.buffer
    }

    /// Surface covering the logical `width`x`height` rectangle of this
    /// buffer, with the buffer's own dimensions as the stride.
    pub fn surface(&self, width: u32, height: u32) -> Surface {
        Surface {
            handle: self.raw,
            width,
            height,
            wstride: self.buffer.width(),
            hstride: self.buffer.height(),
            format: self.format,
        }
    }
}

impl<A: Accelerator + ?Sized> Drop for BufferHandle<'_, A> {
    fn drop(&mut self) {
        self.accel.release(self.raw);
        debug!("released handle {}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        next: RefCell<i32>,
        released: RefCell<Vec<i32>>,
    }

    impl Accelerator for Recorder {
        fn version(&self) -> String {
            "recorder".to_string()
        }

        fn import(&self, _: &mut HostBuffer, _: u32, _: u32, _: PixelFormat) -> i32 {
            let mut next = self.next.borrow_mut();
            *next += 1;
            *next
        }

        fn release(&self, handle: i32) {
            self.released.borrow_mut().push(handle);
        }

        fn resize(&self, _: &Surface, _: &Surface) -> Status {
            Status::SUCCESS
        }

        fn describe(&self, status: Status) -> String {
            format!("status {status}")
        }
    }

    #[test]
    fn surface_carries_stride() {
        let accel = Recorder::default();
        let mut buf = HostBuffer::new(112, 50).unwrap();
        let handle = BufferHandle::import(&accel, &mut buf, PixelFormat::Rgb888).unwrap();
        let surface = handle.surface(100, 50);
        assert_eq!(handle.raw(), 1);
        assert_eq!(
            surface,
            Surface {
                handle: 1,
                width: 100,
                height: 50,
                wstride: 112,
                hstride: 50,
                format: PixelFormat::Rgb888,
            }
        );
    }

    #[test]
    fn released_once_on_drop() {
        let accel = Recorder::default();
        let mut a = HostBuffer::new(16, 2).unwrap();
        let mut b = HostBuffer::new(16, 2).unwrap();
        {
            let _ha = BufferHandle::import(&accel, &mut a, PixelFormat::Rgb888).unwrap();
            let _hb = BufferHandle::import(&accel, &mut b, PixelFormat::Rgb888).unwrap();
        }
        // reverse declaration order
        assert_eq!(*accel.released.borrow(), vec![2, 1]);
    }

    #[test]
    fn status_success() {
        assert!(Status(1).is_success());
        assert!(!Status(2).is_success());
        assert!(!Status(-3).is_success());
    }
}
