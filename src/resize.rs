// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    accel::{Accelerator, BufferHandle, PixelFormat},
    config::ResizeConfig,
    error::{Error, Result},
    image::{align_width, crop_strided, load, pad_right, resize_area, save, HostBuffer},
};
use image::RgbImage;
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, info, info_span, warn};

/// How a resize run produced its output.
#[derive(Debug)]
pub enum Outcome {
    /// The accelerator result was written to `path`.
    Hardware { path: PathBuf },
    /// The software result was written to `path` because the accelerator was
    /// unavailable or failed with `reason`.
    Fallback { path: PathBuf, reason: Error },
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Outcome::Hardware { path } => path,
            Outcome::Fallback { path, .. } => path,
        }
    }
}

/// Intermediate size for the software pre-scale.
///
/// Scales `src` uniformly to fit inside `working`, truncating to whole
/// pixels, then raises each axis to at least `output` so the accelerator is
/// never asked to upscale in the second stage.
pub fn prescale_dimensions(src: (u32, u32), working: (u32, u32), output: (u32, u32)) -> (u32, u32) {
    let scale = f64::min(
        working.0 as f64 / src.0 as f64,
        working.1 as f64 / src.1 as f64,
    );
    if scale > 1.0 {
        warn!(
            "source {}x{} is smaller than working bound {}x{}, pre-scale will upscale",
            src.0, src.1, working.0, working.1
        );
    }

    let width = (src.0 as f64 * scale) as u32;
    let height = (src.1 as f64 * scale) as u32;
    (width.max(output.0), height.max(output.1))
}

/// Result of a single accelerator attempt.
enum Attempt {
    Done(RgbImage),
    Failed(Error),
}

/// Resizes `config.input` to the configured output size.
///
/// Prefers `accel` and falls back to a direct software resize of the
/// original image when `accel` is `None` or its resize call fails. Every
/// registered handle and host buffer is released before this returns, on
/// every path.
///
/// # Errors
///
/// Load, allocation, buffer registration, software resize and write
/// failures abort the run. Accelerator resize failures do not; they are
/// reported through [`Outcome::Fallback`].
pub fn run<A: Accelerator + ?Sized>(config: &ResizeConfig, accel: Option<&A>) -> Result<Outcome> {
    config.validate()?;

    let src = load(&config.input)?;
    info!(
        "loaded {} {}x{}",
        config.input.display(),
        src.width(),
        src.height()
    );

    let accel = match accel {
        Some(accel) => accel,
        None => {
            let reason = Error::AcceleratorUnavailable("no accelerator configured".to_string());
            warn!("{}, using software resize", reason);
            return fallback(config, &src, reason);
        }
    };
    info!("accelerator version: {}", accel.version());

    match accelerate(config, accel, &src)? {
        Attempt::Done(resized) => {
            save(&resized, &config.hardware_output, config.jpeg_quality)?;
            info!(
                "hardware resize {}x{} saved to {}",
                resized.width(),
                resized.height(),
                config.hardware_output.display()
            );
            Ok(Outcome::Hardware {
                path: config.hardware_output.clone(),
            })
        }
        Attempt::Failed(reason) => {
            info!("using software resize");
            fallback(config, &src, reason)
        }
    }
}

/// Pre-scales `src` in software, then runs the accelerator resize on stride
/// aligned host buffers. Both handles and buffers are dropped on return.
fn accelerate<A: Accelerator + ?Sized>(
    config: &ResizeConfig,
    accel: &A,
    src: &RgbImage,
) -> Result<Attempt> {
    let _span = info_span!("accelerate").entered();
    let (out_width, out_height) = (config.output_width, config.output_height);

    let (mid_width, mid_height) = prescale_dimensions(
        src.dimensions(),
        (config.working_width, config.working_height),
        (out_width, out_height),
    );
    info!("software pre-scale to {}x{}", mid_width, mid_height);
    let now = Instant::now();
    let mid = resize_area(src, mid_width, mid_height)?;
    debug!("pre-scale: {:?}", now.elapsed());

    let aligned_mid_width = align_width(mid_width);
    let aligned_out_width = align_width(out_width);
    info!(
        "aligned widths: intermediate {} output {}",
        aligned_mid_width, aligned_out_width
    );
    let mid = pad_right(&mid, aligned_mid_width)?;

    let mut src_buf = HostBuffer::from_image(&mid)?;
    let mut dst_buf = HostBuffer::new(aligned_out_width, out_height)?;

    let src_handle = BufferHandle::import(accel, &mut src_buf, PixelFormat::Rgb888)?;
    let dst_handle = BufferHandle::import(accel, &mut dst_buf, PixelFormat::Rgb888)?;

    let src_surface = src_handle.surface(mid_width, mid_height);
    let dst_surface = dst_handle.surface(out_width, out_height);

    let now = Instant::now();
    let status = accel.resize(&src_surface, &dst_surface);
    debug!("accelerator resize: {:?} status {}", now.elapsed(), status);

    if !status.is_success() {
        let message = accel.describe(status);
        warn!("accelerator resize failed, status {}: {}", status, message);
        return Ok(Attempt::Failed(Error::AcceleratorOperation {
            status: status.0,
            message,
        }));
    }

    info!("accelerator resize succeeded");
    let resized = crop_strided(
        dst_handle.buffer().as_slice(),
        aligned_out_width,
        out_width,
        out_height,
    )?;
    Ok(Attempt::Done(resized))
}

/// Software resize of the original image straight to the output size.
fn fallback(config: &ResizeConfig, src: &RgbImage, reason: Error) -> Result<Outcome> {
    let _span = info_span!("fallback").entered();
    let resized = resize_area(src, config.output_width, config.output_height)?;
    save(&resized, &config.fallback_output, config.jpeg_quality)?;
    info!(
        "software resize {}x{} saved to {}",
        resized.width(),
        resized.height(),
        config.fallback_output.display()
    );
    Ok(Outcome::Fallback {
        path: config.fallback_output.clone(),
        reason,
    })
}
