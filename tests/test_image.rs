// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use image::{Rgb, RgbImage};
use rga_resize::{
    accel::{Accelerator, BufferHandle, PixelFormat},
    config::ResizeConfig,
    image::{align_width, load, save, HostBuffer},
    resize::{run, Outcome},
    rga::{Rga, RGA_LIBRARY},
};
use serial_test::serial;
use std::{error::Error, time::Instant};
use tempfile::TempDir;

#[test]
fn test_sizes() -> Result<(), Box<dyn Error>> {
    let buf = HostBuffer::new(align_width(1920), 1080)?;
    println!("{}", buf);
    assert_eq!(buf.size(), 6220800);

    let buf = HostBuffer::new(align_width(1270), 714)?;
    println!("{}", buf);
    assert_eq!(buf.width(), 1280);
    assert_eq!(buf.size(), 2741760);

    let buf = HostBuffer::new(align_width(100), 60)?;
    println!("{}", buf);
    assert_eq!(buf.size(), 112 * 60 * 3);

    Ok(())
}

/// Host buffers are released when dropped. If they were not, 100 4K buffers
/// would hold ~2.5GB.
#[test]
fn test_cleanup() -> Result<(), Box<dyn Error>> {
    for _ in 0..100 {
        let buf = HostBuffer::new(3840, 2160)?;
        assert_eq!(buf.size(), 24883200);
    }

    Ok(())
}

#[test]
fn test_save_load() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let img = RgbImage::from_fn(64, 32, |x, y| Rgb([x as u8 * 4, y as u8 * 8, 77]));

    let png = dir.path().join("out.png");
    save(&img, &png, 95)?;
    assert_eq!(load(&png)?, img);

    let jpeg = dir.path().join("out.JPEG");
    save(&img, &jpeg, 95)?;
    assert_eq!(load(&jpeg)?.dimensions(), (64, 32));

    Ok(())
}

#[test]
#[serial]
#[ignore = "RGA test is disabled by default (run with --include-ignored on Rockchip hardware)"]
fn test_resize() -> Result<(), Box<dyn Error>> {
    let rga = Rga::new(RGA_LIBRARY)?;
    println!("{}", rga.version());

    let mut from = HostBuffer::new(1280, 720)?;
    let mut to = HostBuffer::new(640, 360)?;
    let src = BufferHandle::import(&rga, &mut from, PixelFormat::Rgb888)?;
    let dst = BufferHandle::import(&rga, &mut to, PixelFormat::Rgb888)?;

    let now = Instant::now();
    let status = rga.resize(&src.surface(1280, 720), &dst.surface(640, 360));
    println!("imresize {} elapsed: {:.2?}", status, now.elapsed());
    assert!(status.is_success(), "{}", rga.describe(status));

    Ok(())
}

#[test]
#[serial]
#[ignore = "RGA test is disabled by default (run with --include-ignored on Rockchip hardware)"]
fn test_run() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("demo.png");
    RgbImage::from_pixel(1920, 1080, Rgb([30, 60, 90])).save(&input)?;

    let config = ResizeConfig {
        input,
        hardware_output: dir.path().join("resized_rga.png"),
        fallback_output: dir.path().join("resized_opencv.png"),
        ..Default::default()
    };
    let rga = Rga::new(RGA_LIBRARY)?;

    let now = Instant::now();
    let outcome = run(&config, Some(&rga))?;
    println!("{:?} elapsed: {:.2?}", outcome, now.elapsed());
    assert!(matches!(outcome, Outcome::Hardware { .. }));
    assert_eq!(load(outcome.path())?.dimensions(), (640, 360));

    Ok(())
}
