// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{Error, Result};
use core::fmt;
use fast_image_resize as fr;
use image::RgbImage;
use std::{fs, path::Path};
use tracing::{debug, instrument};
use turbojpeg::OwnedBuf;

/// Row pitch granularity, in pixels, required by the RGA memory interface
pub const STRIDE_ALIGN: u32 = 16;

/// Bytes per pixel of the interleaved 24-bit colour format
pub const RGB_BYTES: usize = 3;

/// Rounds `width` up to the next multiple of [`STRIDE_ALIGN`].
///
/// `width` must not exceed `u32::MAX - 15`; `ResizeConfig::validate`
/// rejects configurations that would.
pub const fn align_width(width: u32) -> u32 {
    (width + STRIDE_ALIGN - 1) & !(STRIDE_ALIGN - 1)
}

pub const fn image_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * RGB_BYTES
}

/// Decodes the image at `path` into packed RGB.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.into_rgb8())
}

/// Area-averaging resize of `img` to `width`x`height`.
///
/// Uses a box convolution whose support grows with the downscale factor, so
/// every destination pixel averages all source pixels that map into it.
#[instrument(skip(img), fields(src_width = img.width(), src_height = img.height()))]
pub fn resize_area(img: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    let src = fr::images::ImageRef::new(
        img.width(),
        img.height(),
        img.as_raw(),
        fr::PixelType::U8x3,
    )?;
    let mut dst = fr::images::Image::new(width, height, fr::PixelType::U8x3);

    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Box));
    fr::Resizer::new().resize(&src, &mut dst, &options)?;

    RgbImage::from_raw(width, height, dst.into_vec())
        .ok_or(Error::ImageBuffer(fr::ImageBufferError::InvalidBufferSize))
}

/// Extends `img` on the right with black columns out to `width`.
///
/// Returns a copy of `img` if it is already at least `width` wide.
pub fn pad_right(img: &RgbImage, width: u32) -> Result<RgbImage> {
    if width <= img.width() {
        return Ok(img.clone());
    }

    let src_pitch = img.width() as usize * RGB_BYTES;
    let dst_pitch = width as usize * RGB_BYTES;
    let mut padded = vec![0u8; image_size(width, img.height())];
    let raw = img.as_raw();
    for y in 0..img.height() as usize {
        let src_row = &raw[y * src_pitch..][..src_pitch];
        padded[y * dst_pitch..][..src_pitch].copy_from_slice(src_row);
    }

    debug!(
        "padded {}x{} to {}x{}",
        img.width(),
        img.height(),
        width,
        img.height()
    );
    RgbImage::from_raw(width, img.height(), padded)
        .ok_or(Error::ImageBuffer(fr::ImageBufferError::InvalidBufferSize))
}

/// Wraps a strided RGB region as an image of `width`x`height`, discarding
/// the padding columns between `width` and `stride_width`.
pub fn crop_strided(data: &[u8], stride_width: u32, width: u32, height: u32) -> Result<RgbImage> {
    if stride_width == 0 || width > stride_width || data.len() < image_size(stride_width, height) {
        return Err(Error::ImageBuffer(fr::ImageBufferError::InvalidBufferSize));
    }

    let pitch = stride_width as usize * RGB_BYTES;
    let row_len = width as usize * RGB_BYTES;
    let mut cropped = Vec::with_capacity(image_size(width, height));
    for row in data.chunks_exact(pitch).take(height as usize) {
        cropped.extend_from_slice(&row[..row_len]);
    }

    RgbImage::from_raw(width, height, cropped)
        .ok_or(Error::ImageBuffer(fr::ImageBufferError::InvalidBufferSize))
}

/// Encodes packed RGB pixels to JPEG using turbojpeg.
///
/// # Errors
///
/// Returns an error if turbojpeg rejects the quality or the pixel layout.
///
/// # Example
///
/// ```no_run
/// use image::RgbImage;
/// use rga_resize::image::encode_jpeg;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = RgbImage::new(640, 360);
/// let jpeg = encode_jpeg(&img, 95)?;
/// println!("Compressed to {} bytes", jpeg.len());
/// # Ok(())
/// # }
/// ```
pub fn encode_jpeg(img: &RgbImage, quality: i32) -> Result<OwnedBuf> {
    let pixels = turbojpeg::Image {
        pixels: img.as_raw().as_slice(),
        width: img.width() as usize,
        pitch: img.width() as usize * RGB_BYTES,
        height: img.height() as usize,
        format: turbojpeg::PixelFormat::RGB,
    };
    Ok(turbojpeg::compress(pixels, quality, turbojpeg::Subsamp::Sub2x2)?)
}

/// Writes `img` to `path`. JPEG paths go through turbojpeg at `quality`,
/// anything else is encoded by the `image` crate based on the extension.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn save(img: &RgbImage, path: &Path, quality: i32) -> Result<()> {
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        let jpeg = encode_jpeg(img, quality)?;
        fs::write(path, &jpeg)?;
    } else {
        img.save(path).map_err(|source| Error::Save {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Host memory region handed to the accelerator.
///
/// Holds `width * height` packed RGB pixels where `width` is the row pitch
/// in pixels. The region is released when the buffer is dropped.
pub struct HostBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl HostBuffer {
    /// Allocates a zeroed region of `width * height * 3` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the allocator cannot satisfy the
    /// request.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let size = image_size(width, height);
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|source| Error::Allocation { size, source })?;
        data.resize(size, 0);
        debug!("host buffer alloc'd {}x{} {} bytes", width, height, size);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocates a region matching `img` and copies its pixels in.
    pub fn from_image(img: &RgbImage) -> Result<Self> {
        let mut buf = Self::new(img.width(), img.height())?;
        buf.as_slice_mut().copy_from_slice(img.as_raw());
        Ok(buf)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr()
    }
}

impl Drop for HostBuffer {
    fn drop(&mut self) {
        debug!("host buffer freed {}x{}", self.width, self.height)
    }
}

impl fmt::Display for HostBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{} RGB {} bytes", self.width, self.height, self.size())
    }
}
