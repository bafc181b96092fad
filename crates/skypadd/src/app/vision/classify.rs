use std::fmt;

use super::labels::Labels;
use super::VisionError;

/// Side of the square network input.
pub const INPUT_SIZE: usize = 224;

/// One decoded bgr24 frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self { width, height, data }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.len() < self.width * self.height * 3
    }

    /// Resize to `size`x`size` (nearest neighbour), swap to RGB and lay out
    /// as NCHW floats with scale 1.0 and no mean subtraction.
    pub fn to_blob(&self, size: usize) -> Vec<f32> {
        let plane = size * size;
        let mut blob = vec![0.0f32; 3 * plane];
        for y in 0..size {
            let src_y = y * self.height / size;
            for x in 0..size {
                let src_x = x * self.width / size;
                let px = (src_y * self.width + src_x) * 3;
                let (b, g, r) = (self.data[px], self.data[px + 1], self.data[px + 2]);
                let dst = y * size + x;
                blob[dst] = f32::from(r);
                blob[plane + dst] = f32::from(g);
                blob[2 * plane + dst] = f32::from(b);
            }
        }
        blob
    }
}

/// Image classifier producing one score per class.
pub trait Classifier: Send {
    fn classify(&mut self, frame: &Frame) -> Result<Vec<f32>, VisionError>;
}

/// Most probable class of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub index: usize,
    pub score: f32,
    pub description: String,
}

impl Classification {
    /// Pick the highest score. `None` for an empty score list.
    pub fn best(scores: &[f32], labels: &Labels) -> Option<Self> {
        let (index, score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((i, s)),
            })?;
        Some(Self {
            index,
            score,
            description: labels.describe(index).to_string(),
        })
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "description: {}, maxVal: {}", self.description, self.score)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn labels() -> Labels {
        Labels::from_reader(Cursor::new("cat\ndog\nbird\n")).unwrap()
    }

    #[test]
    fn best_picks_highest_score() {
        let best = Classification::best(&[0.1, 0.7, 0.2], &labels()).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.description, "dog");
        assert_eq!(best.to_string(), "description: dog, maxVal: 0.7");
    }

    #[test]
    fn best_keeps_first_on_ties() {
        let best = Classification::best(&[0.5, 0.5], &labels()).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn best_of_nothing_is_none() {
        assert!(Classification::best(&[], &labels()).is_none());
    }

    #[test]
    fn index_without_label_is_unknown() {
        let best = Classification::best(&[0.0, 0.0, 0.0, 0.9], &labels()).unwrap();
        assert_eq!(best.description, "Unknown");
    }

    #[test]
    fn blob_swaps_to_rgb_planes() {
        // 2x1 frame: a blue pixel then a red pixel (bgr order)
        let frame = Frame::new(2, 1, vec![255, 0, 0, 0, 0, 255]);
        let blob = frame.to_blob(2);
        let plane = 4;
        // top-left samples the blue source pixel
        assert_eq!(blob[0], 0.0);
        assert_eq!(blob[2 * plane], 255.0);
        // top-right samples the red source pixel
        assert_eq!(blob[1], 255.0);
        assert_eq!(blob[2 * plane + 1], 0.0);
        assert_eq!(blob.len(), 3 * plane);
    }

    #[test]
    fn short_buffer_is_empty_frame() {
        assert!(Frame::new(4, 4, vec![0; 10]).is_empty());
        assert!(!Frame::new(1, 1, vec![0; 3]).is_empty());
    }
}
