//! Captures a couple of seconds of webcam frames, overlays the FPS value, and dumps them to
//! `webcam-out/`. No detector involved; this checks camera access and frame decoding.

use handmark::display::{Display, PngDump};
use handmark::image::{draw, Color};
use handmark::timer::FpsEstimator;
use handmark::video::webcam::{Webcam, WebcamOptions};
use handmark::video::FrameSource;

fn main() -> anyhow::Result<()> {
    handmark::init_logger!();

    let mut webcam = Webcam::open(WebcamOptions::default())?;
    let mut dump = PngDump::new("webcam-out")?;
    let mut fps = FpsEstimator::new();

    for _ in 0..120 {
        let Some(mut frame) = webcam.read()? else {
            break;
        };

        if let Some(fps) = fps.tick() {
            draw::text(&mut frame, 10, 70, &format!("FPS: {}", fps as u32))
                .color(Color::MAGENTA)
                .align_left();
        }

        dump.show(&frame)?;
    }

    Ok(())
}
