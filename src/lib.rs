// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # RGA Resize Library
//!
//! Hardware-accelerated image resizing for Rockchip SoCs with a 2D raster
//! graphics accelerator (RGA), with a software path for boards where the
//! accelerator is missing or fails.
//!
//! ## Features
//!
//! - **Two-stage resize**: an area-averaging software pre-scale brings the
//!   source close to the output size while preserving aspect ratio, then the
//!   RGA produces the exact output box.
//! - **Stride alignment**: host buffers are padded to the 16 pixel row pitch
//!   the RGA requires and the padding is cropped from the result.
//! - **Scoped registration**: buffers registered with the accelerator are
//!   released on every exit path.
//! - **Fallback**: a failed accelerator call is recovered by resizing the
//!   original image in software.
//!
//! ## Example
//!
//! ```no_run
//! use rga_resize::{
//!     config::ResizeConfig,
//!     resize::{run, Outcome},
//!     rga::{Rga, RGA_LIBRARY},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResizeConfig::default();
//! let rga = Rga::new(RGA_LIBRARY).ok();
//!
//! match run(&config, rga.as_ref())? {
//!     Outcome::Hardware { path } => println!("hardware: {}", path.display()),
//!     Outcome::Fallback { path, reason } => {
//!         println!("software: {} ({})", path.display(), reason)
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Safety
//!
//! This library uses `unsafe` code for FFI interactions with `librga`. All
//! unsafe operations are isolated to the `rga` module and wrapped with safe
//! APIs.

pub mod accel;
pub mod config;
pub mod error;
pub mod image;
pub mod resize;
pub mod rga;
