//! Runs the full pipeline against generated frames and a scripted detector, writing the
//! annotated output to `synthetic-out/` as numbered PNGs.
//!
//! This exercises everything except a real model backend and a real camera, and is useful for
//! eyeballing marker/skeleton rendering and the FPS overlay.

use handmark::display::PngDump;
use handmark::hand::{DetectorConfig, HandDetector, RgbFrame, NUM_LANDMARKS};
use handmark::image::{Color, Image};
use handmark::landmark::Landmarks;
use handmark::processor::FrameLandmarkProcessor;
use handmark::session::{Session, SessionOptions};
use handmark::video::FrameSequence;

const FRAMES: u32 = 60;

/// Finger direction angles in radians, clockwise from "straight up": thumb, index, middle, ring,
/// pinky.
const FINGER_ANGLES: [f32; 5] = [-0.9, -0.25, 0.0, 0.25, 0.55];

/// Generates a stylized upright hand centered at `center_x`, in normalized coordinates.
fn scripted_hand(center_x: f32) -> Landmarks {
    let wrist = [center_x, 0.85];

    let mut positions = [[0.0; 3]; NUM_LANDMARKS];
    positions[0] = [wrist[0], wrist[1], 0.0];
    for (finger, angle) in FINGER_ANGLES.into_iter().enumerate() {
        for joint in 0..4 {
            let r = 0.12 + 0.08 * joint as f32;
            positions[1 + finger * 4 + joint] = [
                wrist[0] + angle.sin() * r,
                wrist[1] - angle.cos() * r * 1.2,
                0.0,
            ];
        }
    }

    let mut landmarks = Landmarks::new(NUM_LANDMARKS);
    landmarks.set_positions(&positions);
    landmarks
}

/// A scripted detector that sways a single hand from side to side over time.
struct WavingHand {
    frame_no: u32,
}

impl HandDetector for WavingHand {
    fn detect(&mut self, _frame: &RgbFrame) -> anyhow::Result<Vec<Landmarks>> {
        let sway = (self.frame_no as f32 * 0.15).sin() * 0.2;
        self.frame_no += 1;
        Ok(vec![scripted_hand(0.5 + sway)])
    }
}

fn main() -> anyhow::Result<()> {
    handmark::init_logger!();

    let frames = (0..FRAMES).map(|_| {
        let mut frame = Image::new(640, 480);
        frame.clear(Color::from_rgb8(24, 24, 32));
        frame
    });

    let processor = FrameLandmarkProcessor::new(
        WavingHand { frame_no: 0 },
        DetectorConfig::default().max_hands(1),
    );
    let session = Session::new(
        FrameSequence::new(frames),
        PngDump::new("synthetic-out")?,
        processor,
        SessionOptions::default(),
    );

    let shown = session.run()?;
    println!("wrote {shown} annotated frames to synthetic-out/");
    Ok(())
}
