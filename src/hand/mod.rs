//! Hand landmark modelling and visualization.

pub mod detector;

pub use detector::{DetectorConfig, DetectorMode, HandDetector, RgbFrame};

use anyhow::bail;

use crate::image::{draw, Color, Image, Resolution};
use crate::landmark::{Landmarks, PixelLandmark};

/// The number of landmarks the hand model reports per detected hand.
pub const NUM_LANDMARKS: usize = 21;

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// The model-defined skeletal connection topology, as landmark index pairs.
///
/// Each pair is drawn as a line connecting the two landmarks to depict hand structure.
pub const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
        // Thumb:
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// The pixel-space landmarks of one detected hand.
///
/// Always contains exactly [`NUM_LANDMARKS`] landmarks, ordered by their anatomical index (see
/// [`LandmarkIdx`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandObservation {
    landmarks: [PixelLandmark; NUM_LANDMARKS],
}

impl HandObservation {
    /// Maps a detector's normalized landmark set into the pixel coordinate system of a frame of
    /// size `res`.
    ///
    /// Fails if `landmarks` does not contain exactly [`NUM_LANDMARKS`] entries (the hand model
    /// contract).
    pub fn from_normalized(landmarks: &Landmarks, res: Resolution) -> anyhow::Result<Self> {
        if landmarks.len() != NUM_LANDMARKS {
            bail!(
                "expected {} hand landmarks, detector reported {}",
                NUM_LANDMARKS,
                landmarks.len(),
            );
        }

        Ok(Self {
            landmarks: std::array::from_fn(|i| landmarks.get(i).to_pixel(i, res)),
        })
    }

    /// Returns the pixel position of a landmark.
    #[inline]
    pub fn get(&self, idx: LandmarkIdx) -> PixelLandmark {
        self.landmarks[idx as usize]
    }

    /// Returns all landmark positions, ordered by their anatomical index.
    #[inline]
    pub fn landmarks(&self) -> &[PixelLandmark] {
        &self.landmarks
    }

    /// Returns an iterator over all landmark positions, ordered by their anatomical index.
    pub fn iter(&self) -> impl Iterator<Item = PixelLandmark> + '_ {
        self.landmarks.iter().copied()
    }

    /// Draws the skeletal connections and a circular marker for every landmark onto `image`.
    ///
    /// Landmarks outside of the image bounds are clipped by the drawing code.
    pub fn draw(&self, image: &mut Image) {
        for (a, b) in CONNECTIVITY {
            let a = self.get(*a);
            let b = self.get(*b);

            draw::line(image, a.x(), a.y(), b.x(), b.y()).color(Color::GREEN);
        }
        for lm in self.iter() {
            draw::marker(image, lm.x(), lm.y());
        }
    }
}
