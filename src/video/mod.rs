//! Frame acquisition.

pub mod webcam;

use std::collections::VecDeque;

use crate::image::Image;

/// A source of video frames driving the pipeline.
///
/// Reading yields `Ok(Some(frame))` until the source is exhausted, then `Ok(None)`. Both
/// exhaustion and an `Err` (acquisition failure) are terminal for the current run; neither is
/// retried – for a live source, the run is simply over.
pub trait FrameSource {
    fn read(&mut self) -> anyhow::Result<Option<Image>>;
}

/// A canned, in-memory frame source.
///
/// Yields the given frames in order, then reports exhaustion. Useful for tests and for replaying
/// recorded sequences.
pub struct FrameSequence {
    frames: VecDeque<Image>,
}

impl FrameSequence {
    pub fn new<I: IntoIterator<Item = Image>>(frames: I) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Returns the number of frames left in the sequence.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for FrameSequence {
    fn read(&mut self) -> anyhow::Result<Option<Image>> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_exhausts() {
        let mut source = FrameSequence::new([Image::new(2, 2), Image::new(4, 4)]);
        assert_eq!(source.remaining(), 2);

        assert_eq!(source.read().unwrap().unwrap().width(), 2);
        assert_eq!(source.read().unwrap().unwrap().width(), 4);
        assert!(source.read().unwrap().is_none());
        // Exhaustion is stable across reads.
        assert!(source.read().unwrap().is_none());
    }
}
