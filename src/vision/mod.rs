//! Colour-based plant health check.
//!
//! Frames arrive as 8-bit BGR, the layout most camera stacks hand out.
//! The classifier converts each pixel to HSV and counts those inside the
//! configured green band.

pub mod classifier;
pub mod hsv;

pub use classifier::{HealthResult, PlantHealthClassifier};

/// A captured image, 8-bit BGR, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Uniform frame of one BGR colour.
    pub fn filled(width: usize, height: usize, bgr: [u8; 3]) -> Self {
        let data = bgr.repeat(width * height);
        Self::new(width, height, data)
    }

    /// `None` when the declared dimensions overflow `usize`.
    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Buffer length matches the declared dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixel_count()
            .and_then(|n| n.checked_mul(3))
            .is_some_and(|len| len == self.data.len())
    }

    /// BGR triples in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}
