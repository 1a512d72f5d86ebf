// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::{collections::TryReserveError, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of a resize run.
///
/// `AcceleratorOperation` and `AcceleratorUnavailable` are recovered by the
/// software fallback and only surface as the reason in
/// [`Outcome::Fallback`](crate::resize::Outcome::Fallback). Every other
/// variant aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to allocate {size} bytes: {source}")]
    Allocation {
        size: usize,
        source: TryReserveError,
    },

    #[error("accelerator rejected {width}x{height} buffer (handle {handle})")]
    BufferImport {
        width: u32,
        height: u32,
        handle: i32,
    },

    #[error("accelerator resize failed with status {status}: {message}")]
    AcceleratorOperation { status: i32, message: String },

    #[error("accelerator unavailable: {0}")]
    AcceleratorUnavailable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("resize error: {0}")]
    Resize(#[from] fast_image_resize::ResizeError),

    #[error("image buffer error: {0}")]
    ImageBuffer(#[from] fast_image_resize::ImageBufferError),

    #[error("jpeg encode error: {0}")]
    Encode(#[from] turbojpeg::Error),

    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<libloading::Error> for Error {
    fn from(err: libloading::Error) -> Self {
        Error::AcceleratorUnavailable(err.to_string())
    }
}
