// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use args::Args;
use clap::Parser;
use rga_resize::{
    config::ResizeConfig,
    resize::{run, Outcome},
    rga::Rga,
};
use std::{error::Error, process::ExitCode};
use tracing::{error, info, warn};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, Layer, Registry};

mod args;

fn init_tracing(args: &Args) -> Result<(), Box<dyn Error>> {
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let stdout_log = tracing_subscriber::fmt::layer().with_filter(level);

    let journald = match tracing_journald::layer() {
        Ok(journald) => Some(journald.with_filter(level)),
        Err(_) => None,
    };

    let tracy = if args.tracy {
        tracy_client::Client::start();
        Some(tracing_tracy::TracyLayer::default().with_filter(level))
    } else {
        None
    };

    let subscriber = Registry::default()
        .with(stdout_log)
        .with(journald)
        .with(tracy);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(())
}

/// Process exit status for a finished run. Either outcome succeeds, any
/// error exits with 255 (-1).
fn exit_status(result: &rga_resize::error::Result<Outcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 255,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_tracing(&args) {
        eprintln!("failed to initialise logging: {e}");
    }

    info!("RGA resize");

    let rga = if args.no_accel {
        info!("accelerator disabled");
        None
    } else {
        match Rga::new(&args.library) {
            Ok(rga) => Some(rga),
            Err(e) => {
                warn!("{}: {}", args.library, e);
                None
            }
        }
    };

    let result = ResizeConfig::try_from(args).and_then(|config| run(&config, rga.as_ref()));
    match &result {
        Ok(Outcome::Hardware { path }) => info!("saved {}", path.display()),
        Ok(Outcome::Fallback { path, reason }) => {
            info!("saved {} after fallback ({})", path.display(), reason)
        }
        Err(e) => error!("{}", e),
    }
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rga_resize::error::Error as ResizeError;
    use std::path::PathBuf;

    #[test]
    fn hardware_exits_zero() {
        let result = Ok(Outcome::Hardware {
            path: PathBuf::from("resized_rga.jpg"),
        });
        assert_eq!(exit_status(&result), 0);
    }

    #[test]
    fn fallback_exits_zero() {
        let result = Ok(Outcome::Fallback {
            path: PathBuf::from("resized_opencv.jpg"),
            reason: ResizeError::AcceleratorOperation {
                status: -3,
                message: "invalid param".to_string(),
            },
        });
        assert_eq!(exit_status(&result), 0);

        let result = Ok(Outcome::Fallback {
            path: PathBuf::from("resized_opencv.jpg"),
            reason: ResizeError::AcceleratorUnavailable("librga.so".to_string()),
        });
        assert_eq!(exit_status(&result), 0);
    }

    #[test]
    fn errors_exit_255() {
        let result = Err(ResizeError::InvalidConfig("working size".to_string()));
        assert_eq!(exit_status(&result), 255);

        let result = Err(ResizeError::BufferImport {
            width: 1280,
            height: 720,
            handle: -1,
        });
        assert_eq!(exit_status(&result), 255);
    }
}
