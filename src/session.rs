//! The capture → detect → annotate → display loop.

use itertools::Itertools;

use crate::display::Display;
use crate::image::{draw, Color};
use crate::processor::FrameLandmarkProcessor;
use crate::timer::FpsEstimator;
use crate::video::FrameSource;

/// How many frames pass between two profiling log lines.
const TIMER_LOG_INTERVAL: u64 = 120;

/// Options controlling a [`Session`]'s loop behavior.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    annotate: bool,
    stop_key: char,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            annotate: true,
            stop_key: 'q',
        }
    }
}

impl SessionOptions {
    /// Sets whether landmark markers and the skeleton are drawn onto each frame.
    ///
    /// Defaults to `true`.
    #[inline]
    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Sets the key that stops the session.
    ///
    /// Defaults to `q`.
    #[inline]
    pub fn stop_key(mut self, stop_key: char) -> Self {
        self.stop_key = stop_key;
        self
    }
}

/// A running visualization session.
///
/// The session is the exclusive owner of the frame source, the display sink, and the processor;
/// there is no shared or global state. All resources are released when the session is dropped,
/// which happens on *every* exit path of [`Session::run`] – normal exhaustion, the stop key, and
/// errors alike.
pub struct Session<S, D> {
    source: S,
    display: D,
    processor: FrameLandmarkProcessor,
    fps: FpsEstimator,
    options: SessionOptions,
    frames: u64,
}

impl<S: FrameSource, D: Display> Session<S, D> {
    pub fn new(
        source: S,
        display: D,
        processor: FrameLandmarkProcessor,
        options: SessionOptions,
    ) -> Self {
        Self {
            source,
            display,
            processor,
            fps: FpsEstimator::new(),
            options,
            frames: 0,
        }
    }

    /// Runs the blocking capture → detect → annotate → display loop until the frame source is
    /// exhausted, the stop key is pressed, or an error occurs.
    ///
    /// Each iteration processes exactly one frame; nothing runs concurrently. Returns the number
    /// of frames shown.
    pub fn run(mut self) -> anyhow::Result<u64> {
        loop {
            let Some(mut frame) = self.source.read()? else {
                log::info!("frame source exhausted after {} frame(s)", self.frames);
                break;
            };

            self.processor
                .detect_hands(&mut frame, self.options.annotate)?;

            // No overlay on the first frame; there is no previous timestamp to derive a rate
            // from yet.
            if let Some(fps) = self.fps.tick() {
                draw::text(&mut frame, 10, 70, &format!("FPS: {}", fps as u32))
                    .color(Color::MAGENTA)
                    .align_left();
            }

            self.display.show(&frame)?;
            self.frames += 1;

            if self.frames % TIMER_LOG_INTERVAL == 0 {
                log::debug!("{}", self.processor.timers().format(", "));
            }

            match self.display.poll_key() {
                Some(key) if key == self.options.stop_key => {
                    log::info!("stop key pressed, ending session");
                    break;
                }
                _ => {}
            }
        }

        Ok(self.frames)
    }
}
