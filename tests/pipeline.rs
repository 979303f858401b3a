//! End-to-end pipeline tests against the public API, using a stub detector in place of a real
//! model backend.

use handmark::display::NullDisplay;
use handmark::hand::{DetectorConfig, HandDetector, RgbFrame, NUM_LANDMARKS};
use handmark::image::{Color, Image};
use handmark::landmark::Landmarks;
use handmark::processor::FrameLandmarkProcessor;
use handmark::session::{Session, SessionOptions};
use handmark::video::FrameSequence;

/// Builds a plausible normalized hand: 21 landmarks fanned out from `offset_x`.
fn hand(offset_x: f32) -> Landmarks {
    let mut landmarks = Landmarks::new(NUM_LANDMARKS);
    landmarks.set_positions(&std::array::from_fn::<_, NUM_LANDMARKS, _>(|i| {
        [offset_x + i as f32 * 0.01, 0.3 + i as f32 * 0.015, 0.0]
    }));
    landmarks
}

/// Reports the same two hands on every frame.
struct TwoHands;

impl HandDetector for TwoHands {
    fn detect(&mut self, _frame: &RgbFrame) -> anyhow::Result<Vec<Landmarks>> {
        Ok(vec![hand(0.2), hand(0.6)])
    }
}

fn frame() -> Image {
    let mut frame = Image::new(128, 128);
    frame.clear(Color::from_rgb8(40, 40, 40));
    frame
}

#[test]
fn two_hands_end_to_end() {
    let mut processor = FrameLandmarkProcessor::new(TwoHands, DetectorConfig::default());

    let unannotated = frame();
    let mut annotated = unannotated.clone();
    let observations = processor.detect_hands(&mut annotated, true).unwrap();

    assert_eq!(observations.len(), 2);
    for obs in &observations {
        assert_eq!(obs.landmarks().len(), NUM_LANDMARKS);
        for (i, lm) in obs.iter().enumerate() {
            assert_eq!(lm.index(), i);
        }
    }
    // The two hands are returned in detector order.
    assert!(observations[0].landmarks()[0].x() < observations[1].landmarks()[0].x());

    // Annotation must have touched the frame at every marker position.
    assert_ne!(annotated, unannotated);
    for obs in &observations {
        for lm in obs.iter() {
            assert_ne!(
                annotated.get(lm.x() as u32, lm.y() as u32),
                unannotated.get(lm.x() as u32, lm.y() as u32),
                "pixel unchanged at landmark {} ({}, {})",
                lm.index(),
                lm.x(),
                lm.y(),
            );
        }
    }
}

#[test]
fn repeated_detection_is_deterministic() {
    let mut processor = FrameLandmarkProcessor::new(TwoHands, DetectorConfig::default());

    let mut first = frame();
    let mut second = frame();
    let obs_first = processor.detect_hands(&mut first, true).unwrap();
    let obs_second = processor.detect_hands(&mut second, true).unwrap();

    assert_eq!(obs_first, obs_second);
    assert_eq!(first, second);
}

#[test]
fn annotations_can_be_disabled() {
    let mut processor = FrameLandmarkProcessor::new(TwoHands, DetectorConfig::default());

    let unannotated = frame();
    let mut shown = unannotated.clone();
    let observations = processor.detect_hands(&mut shown, false).unwrap();

    assert_eq!(observations.len(), 2);
    assert_eq!(shown, unannotated);
}

#[test]
fn session_processes_canned_sequence() {
    let source = FrameSequence::new((0..4).map(|_| frame()));
    let processor = FrameLandmarkProcessor::new(TwoHands, DetectorConfig::default());
    let session = Session::new(source, NullDisplay, processor, SessionOptions::default());

    assert_eq!(session.run().unwrap(), 4);
}
