//! Per-frame landmark extraction and annotation.

use anyhow::bail;

use crate::hand::{DetectorConfig, HandDetector, HandObservation, RgbFrame};
use crate::image::Image;
use crate::timer::Timer;

/// Extracts hand landmarks from frames and optionally annotates them.
///
/// The processor owns a [`HandDetector`] and drives it once per frame: the frame is converted to
/// the detector's color space, the detector's normalized landmarks are mapped into the frame's
/// pixel coordinate system (using the frame's *actual* dimensions, read fresh per call – frames
/// may vary in size across calls), and the result is returned as a list of
/// [`HandObservation`]s.
///
/// The processor itself is stateless across frames; the detector implementation may keep
/// tracking state of its own, depending on its [`DetectorMode`][crate::hand::DetectorMode].
pub struct FrameLandmarkProcessor {
    detector: Box<dyn HandDetector>,
    config: DetectorConfig,
    t_convert: Timer,
    t_detect: Timer,
}

impl FrameLandmarkProcessor {
    /// Creates a processor driving `detector`, configured by `config`.
    pub fn new<D: HandDetector + 'static>(detector: D, config: DetectorConfig) -> Self {
        Self {
            detector: Box::new(detector),
            config,
            t_convert: Timer::new("convert"),
            t_detect: Timer::new("detect"),
        }
    }

    /// Returns the detector configuration this processor was created with.
    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns profiling timers for the color conversion and detection stages.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_convert, &self.t_detect].into_iter()
    }

    /// Runs hand detection on `frame` and returns the observations, annotating the frame in place
    /// when `draw` is `true`.
    ///
    /// When no hands are detected, the frame is left untouched and an empty list is returned;
    /// this is a normal outcome, not an error. An empty (zero-sized) frame is rejected with an
    /// error for either value of `draw`.
    pub fn detect_hands(
        &mut self,
        frame: &mut Image,
        draw: bool,
    ) -> anyhow::Result<Vec<HandObservation>> {
        let observations = self.process(frame)?;
        if draw {
            for obs in &observations {
                obs.draw(frame);
            }
        }

        Ok(observations)
    }

    /// Runs hand detection on `frame` and returns the observations without drawing anything.
    ///
    /// This is the operation to use when only the landmark positions are of interest (gesture
    /// logic, distance measurements, …) and the frame should stay untouched.
    pub fn hand_observations(&mut self, frame: &Image) -> anyhow::Result<Vec<HandObservation>> {
        self.process(frame)
    }

    fn process(&mut self, frame: &Image) -> anyhow::Result<Vec<HandObservation>> {
        if frame.is_empty() {
            bail!(
                "cannot run hand detection on an empty {}x{} frame",
                frame.width(),
                frame.height(),
            );
        }

        let rgb = self.t_convert.time(|| RgbFrame::from_image(frame));
        let detector = &mut self.detector;
        let sets = self.t_detect.time(|| detector.detect(&rgb))?;

        // The frame's dimensions are read per call; a source may switch resolutions mid-run.
        let res = frame.resolution();
        let mut observations = Vec::with_capacity(sets.len().min(self.config.max_hands));
        for landmarks in sets.iter().take(self.config.max_hands) {
            match HandObservation::from_normalized(landmarks, res) {
                Ok(obs) => {
                    for lm in obs.iter() {
                        log::trace!("landmark {}: ({}, {})", lm.index(), lm.x(), lm.y());
                    }
                    observations.push(obs);
                }
                Err(e) => {
                    // A malformed hand is dropped rather than taking down the pipeline; the next
                    // frame supersedes it.
                    log::warn!("skipping malformed detection result: {e}");
                }
            }
        }

        log::debug!(
            "{} hand(s) in {} frame",
            observations.len(),
            frame.resolution(),
        );
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::NUM_LANDMARKS;
    use crate::landmark::Landmarks;

    /// Returns a fixed set of landmark sets on every call.
    struct StubDetector {
        hands: Vec<Landmarks>,
    }

    impl StubDetector {
        fn with_hands(count: usize) -> Self {
            let mut landmarks = Landmarks::new(NUM_LANDMARKS);
            landmarks
                .set_positions(&std::array::from_fn::<_, NUM_LANDMARKS, _>(|i| {
                    [0.1 + i as f32 * 0.02, 0.5, 0.0]
                }));
            Self {
                hands: vec![landmarks; count],
            }
        }
    }

    impl HandDetector for StubDetector {
        fn detect(&mut self, _frame: &RgbFrame) -> anyhow::Result<Vec<Landmarks>> {
            Ok(self.hands.clone())
        }
    }

    struct FailingDetector;

    impl HandDetector for FailingDetector {
        fn detect(&mut self, _frame: &RgbFrame) -> anyhow::Result<Vec<Landmarks>> {
            anyhow::bail!("inference backend exploded")
        }
    }

    #[test]
    fn empty_frame_is_rejected() {
        let mut processor =
            FrameLandmarkProcessor::new(StubDetector::with_hands(1), DetectorConfig::default());

        let mut empty = Image::new(0, 0);
        assert!(processor.detect_hands(&mut empty, false).is_err());
        assert!(processor.detect_hands(&mut empty, true).is_err());
        assert!(processor.hand_observations(&empty).is_err());
    }

    #[test]
    fn zero_hands_leaves_frame_untouched() {
        let mut processor =
            FrameLandmarkProcessor::new(StubDetector::with_hands(0), DetectorConfig::default());

        let mut frame = Image::new(32, 32);
        let orig = frame.clone();

        let observations = processor.detect_hands(&mut frame, false).unwrap();
        assert!(observations.is_empty());
        assert_eq!(frame, orig);

        // Even with drawing enabled there is nothing to draw.
        let observations = processor.detect_hands(&mut frame, true).unwrap();
        assert!(observations.is_empty());
        assert_eq!(frame, orig);
    }

    #[test]
    fn detections_are_capped_at_max_hands() {
        let mut processor = FrameLandmarkProcessor::new(
            StubDetector::with_hands(5),
            DetectorConfig::default().max_hands(2),
        );

        let mut frame = Image::new(64, 64);
        let observations = processor.detect_hands(&mut frame, false).unwrap();
        assert_eq!(observations.len(), 2);
    }

    #[test]
    fn malformed_hand_is_skipped() {
        struct ShortHandDetector;

        impl HandDetector for ShortHandDetector {
            fn detect(&mut self, _frame: &RgbFrame) -> anyhow::Result<Vec<Landmarks>> {
                Ok(vec![Landmarks::new(5), Landmarks::new(NUM_LANDMARKS)])
            }
        }

        let mut processor =
            FrameLandmarkProcessor::new(ShortHandDetector, DetectorConfig::default());

        let mut frame = Image::new(64, 64);
        let observations = processor.detect_hands(&mut frame, false).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].landmarks().len(), NUM_LANDMARKS);
    }

    #[test]
    fn detector_failure_does_not_poison_processor() {
        struct FlakyDetector {
            calls: usize,
        }

        impl HandDetector for FlakyDetector {
            fn detect(&mut self, _frame: &RgbFrame) -> anyhow::Result<Vec<Landmarks>> {
                self.calls += 1;
                if self.calls == 1 {
                    anyhow::bail!("transient failure")
                }
                Ok(Vec::new())
            }
        }

        let mut processor =
            FrameLandmarkProcessor::new(FlakyDetector { calls: 0 }, DetectorConfig::default());

        let mut frame = Image::new(16, 16);
        assert!(processor.detect_hands(&mut frame, false).is_err());
        assert!(processor.detect_hands(&mut frame, false).is_ok());
    }

    #[test]
    fn detector_error_is_propagated() {
        let mut processor = FrameLandmarkProcessor::new(FailingDetector, DetectorConfig::default());

        let mut frame = Image::new(16, 16);
        let err = processor.detect_hands(&mut frame, true).unwrap_err();
        assert!(err.to_string().contains("exploded"));
    }

    #[test]
    fn hand_observations_matches_detect_hands() {
        let mut processor =
            FrameLandmarkProcessor::new(StubDetector::with_hands(2), DetectorConfig::default());

        let mut frame = Image::new(64, 64);
        let drawn = processor.detect_hands(&mut frame, false).unwrap();
        let plain = processor.hand_observations(&frame).unwrap();
        assert_eq!(drawn, plain);
    }
}
