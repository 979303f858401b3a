//! The hand detector seam and its configuration.
//!
//! Landmark inference is delegated to a pretrained model wrapped in a [`HandDetector`]
//! implementation. This crate only provides the seam; actual model backends live outside of it.

use crate::image::{Image, Resolution};
use crate::landmark::Landmarks;

/// A frame converted to the tightly packed 8-bit RGB layout that hand landmark models consume.
///
/// Camera frames are RGBA [`Image`]s internally; [`RgbFrame::from_image`] strips the alpha channel
/// and produces the canonical detector input. The conversion is a pure transform of the pixel
/// data.
pub struct RgbFrame {
    data: Vec<u8>,
    resolution: Resolution,
}

impl RgbFrame {
    /// Converts an [`Image`] into detector input.
    pub fn from_image(image: &Image) -> Self {
        let mut data =
            Vec::with_capacity(image.width() as usize * image.height() as usize * 3);
        for px in image.data().chunks_exact(4) {
            data.extend_from_slice(&px[..3]);
        }

        Self {
            data,
            resolution: image.resolution(),
        }
    }

    /// Creates detector input from a raw RGB buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size does not match `resolution`.
    pub fn from_raw(resolution: Resolution, data: Vec<u8>) -> Self {
        let expected_size = resolution.width() as usize * resolution.height() as usize * 3;
        assert_eq!(
            expected_size,
            data.len(),
            "incorrect buffer size {} for {} detector input (expected {} bytes)",
            data.len(),
            resolution,
            expected_size,
        );

        Self { data, resolution }
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.resolution.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.resolution.height()
    }

    /// Returns the tightly packed RGB pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Trait implemented by hand landmark detectors.
///
/// A detector reports zero or more normalized landmark sets per frame, one per detected hand,
/// each containing [`NUM_LANDMARKS`][super::NUM_LANDMARKS] entries. Detecting no hands is a
/// normal outcome and yields an empty list; an `Err` indicates a detector malfunction, not an
/// empty frame.
pub trait HandDetector {
    fn detect(&mut self, frame: &RgbFrame) -> anyhow::Result<Vec<Landmarks>>;
}

/// Selects how a detector treats consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DetectorMode {
    /// Every frame is treated as an unrelated still image and runs the full detection stage.
    StaticImage,
    /// Frames form a video stream; hands found once are followed across frames by the cheaper
    /// tracking stage until tracking confidence drops.
    VideoStream,
}

impl Default for DetectorMode {
    #[inline]
    fn default() -> Self {
        Self::VideoStream
    }
}

/// Detector configuration.
///
/// All values are validated when they are set, so a constructed configuration is always valid.
/// Confidence thresholds are fractions in `0.0..=1.0`, *not* percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    pub(crate) mode: DetectorMode,
    pub(crate) max_hands: usize,
    pub(crate) detection_confidence: f32,
    pub(crate) tracking_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            mode: DetectorMode::default(),
            max_hands: Self::DEFAULT_MAX_HANDS,
            detection_confidence: Self::DEFAULT_CONFIDENCE,
            tracking_confidence: Self::DEFAULT_CONFIDENCE,
        }
    }
}

impl DetectorConfig {
    /// The default confidence threshold for both detection and tracking.
    pub const DEFAULT_CONFIDENCE: f32 = 0.5;

    /// The default maximum number of hands reported per frame.
    pub const DEFAULT_MAX_HANDS: usize = 2;

    /// Sets the frame handling mode.
    #[inline]
    pub fn mode(mut self, mode: DetectorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the maximum number of hands reported per frame.
    ///
    /// # Panics
    ///
    /// Panics when `max_hands` is 0.
    #[inline]
    pub fn max_hands(mut self, max_hands: usize) -> Self {
        assert!(max_hands >= 1, "max_hands must be at least 1");
        self.max_hands = max_hands;
        self
    }

    /// Sets the confidence threshold above which a new hand is reported.
    ///
    /// # Panics
    ///
    /// Panics when `confidence` is not a fraction in `0.0..=1.0`.
    #[inline]
    pub fn detection_confidence(mut self, confidence: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&confidence),
            "detection confidence must be a fraction in 0.0..=1.0, got {confidence}",
        );
        self.detection_confidence = confidence;
        self
    }

    /// Sets the confidence threshold above which an already-tracked hand keeps being followed.
    ///
    /// # Panics
    ///
    /// Panics when `confidence` is not a fraction in `0.0..=1.0`.
    #[inline]
    pub fn tracking_confidence(mut self, confidence: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&confidence),
            "tracking confidence must be a fraction in 0.0..=1.0, got {confidence}",
        );
        self.tracking_confidence = confidence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Color;

    #[test]
    fn defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.mode, DetectorMode::VideoStream);
        assert_eq!(config.max_hands, 2);
        assert_eq!(config.detection_confidence, 0.5);
        assert_eq!(config.tracking_confidence, 0.5);
    }

    #[test]
    #[should_panic(expected = "fraction")]
    fn rejects_percentage_confidence() {
        DetectorConfig::default().detection_confidence(50.0);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn rejects_zero_max_hands() {
        DetectorConfig::default().max_hands(0);
    }

    #[test]
    fn rgb_conversion_strips_alpha() {
        let mut image = Image::new(2, 2);
        image.clear(Color::from_rgba8(10, 20, 30, 40));

        let rgb = RgbFrame::from_image(&image);
        assert_eq!(rgb.resolution(), Resolution::new(2, 2));
        assert_eq!(rgb.data(), [10u8, 20, 30].repeat(4));
    }
}
