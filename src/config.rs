// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    error::{Error, Result},
    image::STRIDE_ALIGN,
};
use std::path::PathBuf;

/// Parameters of a single resize run.
///
/// The defaults reproduce the fixed demo setup: a 1080p-class JPEG is
/// shrunk in software towards 1280x720 and then by the accelerator to
/// 640x360.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeConfig {
    /// Source image, format inferred from content and extension
    pub input: PathBuf,
    /// Working bound width for the software pre-scale
    pub working_width: u32,
    /// Working bound height for the software pre-scale
    pub working_height: u32,
    /// Final output width
    pub output_width: u32,
    /// Final output height
    pub output_height: u32,
    /// Written when the accelerator succeeds
    pub hardware_output: PathBuf,
    /// Written when the software fallback runs
    pub fallback_output: PathBuf,
    /// Quality used for JPEG outputs (1-100)
    pub jpeg_quality: i32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("../static/demo.jpg"),
            working_width: 1280,
            working_height: 720,
            output_width: 640,
            output_height: 360,
            hardware_output: PathBuf::from("resized_rga.jpg"),
            fallback_output: PathBuf::from("resized_opencv.jpg"),
            jpeg_quality: 95,
        }
    }
}

impl ResizeConfig {
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("working width", self.working_width),
            ("working height", self.working_height),
            ("output width", self.output_width),
            ("output height", self.output_height),
        ];
        for (name, value) in dims {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be positive")));
            }
        }

        // both widths are rounded up to the accelerator stride
        let widths = [
            ("working width", self.working_width),
            ("output width", self.output_width),
        ];
        for (name, value) in widths {
            if value.checked_next_multiple_of(STRIDE_ALIGN).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "{name} {value} cannot be aligned to {STRIDE_ALIGN} pixels"
                )));
            }
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidConfig(format!(
                "jpeg quality {} outside 1-100",
                self.jpeg_quality
            )));
        }

        if self.hardware_output == self.fallback_output {
            return Err(Error::InvalidConfig(
                "hardware and fallback outputs must differ".to_string(),
            ));
        }

        Ok(())
    }
}
