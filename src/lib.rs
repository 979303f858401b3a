//! Real-time hand landmark visualization.
//!
//! This crate implements the glue around a pluggable hand landmark detector: frames are pulled
//! from a [`FrameSource`], converted to the detector's color space, the reported normalized
//! landmarks are mapped into pixel coordinates, keypoint markers and the skeletal connection
//! topology are drawn onto the frame, and an instantaneous FPS value is overlaid. The detector
//! itself (typically a pretrained neural network) is *not* part of this crate – it is plugged in
//! through the [`HandDetector`] trait.
//!
//! # Environment Variables
//!
//! * `HANDMARK_WEBCAM_NAME`: Forces the device to use for [`Webcam`]s created without an explicit
//!   device name. If unset, the first device that supports a compatible image format will be used.
//!
//! [`FrameSource`]: video::FrameSource
//! [`HandDetector`]: hand::HandDetector
//! [`Webcam`]: video::webcam::Webcam

use log::LevelFilter;

pub mod display;
pub mod hand;
pub mod image;
pub mod iter;
pub mod landmark;
pub mod processor;
pub mod session;
pub mod timer;
pub mod video;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .filter(Some("linuxvideo"), LevelFilter::Warn)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and this library will log at *debug* level, `linuxvideo` at *warn* level.
/// `RUST_LOG` overrides these defaults.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
