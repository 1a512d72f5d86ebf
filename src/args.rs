// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use rga_resize::{config::ResizeConfig, error::Error, rga::RGA_LIBRARY};
use std::path::PathBuf;

/// Command-line arguments for the RGA resize tool.
///
/// Every option has a default, so running without arguments resizes
/// `../static/demo.jpg` to 640x360. Arguments can be specified via command
/// line or environment variables.
///
/// # Example
///
/// ```bash
/// # Via command line
/// rga-resize --input photo.jpg --output-size 320 240
///
/// # Via environment variables
/// export INPUT=photo.jpg
/// export NO_ACCEL=true
/// rga-resize
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source image path (format inferred from content and extension)
    #[arg(short, long, env = "INPUT", default_value = "../static/demo.jpg")]
    pub input: PathBuf,

    /// Working bound for the software pre-scale in pixels (width height)
    #[arg(
        long,
        env = "WORKING_SIZE",
        default_value = "1280 720",
        value_delimiter = ' ',
        num_args = 2
    )]
    pub working_size: Vec<u32>,

    /// Final output resolution in pixels (width height)
    #[arg(
        short,
        long,
        env = "OUTPUT_SIZE",
        default_value = "640 360",
        value_delimiter = ' ',
        num_args = 2
    )]
    pub output_size: Vec<u32>,

    /// Output written when the accelerator succeeds
    #[arg(long, env = "HARDWARE_OUTPUT", default_value = "resized_rga.jpg")]
    pub hardware_output: PathBuf,

    /// Output written by the software fallback
    #[arg(long, env = "FALLBACK_OUTPUT", default_value = "resized_opencv.jpg")]
    pub fallback_output: PathBuf,

    /// JPEG quality for JPEG outputs (1-100)
    #[arg(long, env = "JPEG_QUALITY", default_value = "95")]
    pub jpeg_quality: i32,

    /// RGA shared library to load
    #[arg(long, env = "RGA_LIBRARY", default_value = RGA_LIBRARY)]
    pub library: String,

    /// Skip the accelerator and resize in software only
    #[arg(long, env = "NO_ACCEL")]
    pub no_accel: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable Tracy profiler for performance analysis
    #[arg(long, env = "TRACY")]
    pub tracy: bool,
}

/// Splits a `width height` pair. Values read from the environment bypass
/// clap's `num_args` check, so the count is verified here.
fn size_pair(name: &str, values: &[u32]) -> Result<(u32, u32), Error> {
    match values {
        [width, height] => Ok((*width, *height)),
        _ => Err(Error::InvalidConfig(format!(
            "{name} expects width and height, got {} value(s)",
            values.len()
        ))),
    }
}

impl TryFrom<Args> for ResizeConfig {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let (working_width, working_height) = size_pair("working size", &args.working_size)?;
        let (output_width, output_height) = size_pair("output size", &args.output_size)?;
        Ok(Self {
            input: args.input,
            working_width,
            working_height,
            output_width,
            output_height,
            hardware_output: args.hardware_output,
            fallback_output: args.fallback_output,
            jpeg_quality: args.jpeg_quality,
        })
    }
}
