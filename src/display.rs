//! Display sinks consuming the annotated frames.

use std::path::PathBuf;

use crate::image::Image;

/// A sink that annotated frames are pushed into, one per loop iteration.
///
/// Besides showing frames, the sink is the pipeline's only input channel: [`Display::poll_key`]
/// is polled once per frame and is what allows the user to stop a run.
pub trait Display {
    /// Presents a frame.
    fn show(&mut self, frame: &Image) -> anyhow::Result<()>;

    /// Polls for a pressed key without blocking.
    ///
    /// Sinks without an input channel (file dumps, benchmarks) use the default implementation,
    /// which never reports a key.
    fn poll_key(&mut self) -> Option<char> {
        None
    }
}

/// A headless [`Display`] that writes every frame to a numbered PNG file.
pub struct PngDump {
    dir: PathBuf,
    frame_no: u64,
}

impl PngDump {
    /// Creates the target directory and a sink writing `frame00000.png`, `frame00001.png`, …
    /// into it.
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, frame_no: 0 })
    }
}

impl Display for PngDump {
    fn show(&mut self, frame: &Image) -> anyhow::Result<()> {
        let path = self.dir.join(format!("frame{:05}.png", self.frame_no));
        frame.save(&path)?;
        self.frame_no += 1;
        Ok(())
    }
}

/// A [`Display`] that discards all frames.
pub struct NullDisplay;

impl Display for NullDisplay {
    fn show(&mut self, _frame: &Image) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_dump_numbers_frames() {
        let dir = std::env::temp_dir().join("handmark-png-dump-test");
        let _ = std::fs::remove_dir_all(&dir);

        let mut dump = PngDump::new(&dir).unwrap();
        dump.show(&Image::new(4, 4)).unwrap();
        dump.show(&Image::new(4, 4)).unwrap();

        assert!(dir.join("frame00000.png").exists());
        assert!(dir.join("frame00001.png").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
