/// The largest centered square sub-region of a `width x height` source frame.
///
/// Live sources are rarely square; `SquareCrop` picks the square that preserves the
/// frame's center line, whether the source is wider or taller than square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SquareCrop {
    /// Crop origin x in source pixels.
    pub sx: u32,
    /// Crop origin y in source pixels.
    pub sy: u32,
    /// Side length of the square, `min(width, height)`.
    pub dim: u32,
}

impl SquareCrop {
    /// Computes the centered crop, or `None` while the source still reports a zero
    /// dimension (media that has not buffered enough to know its size).
    pub fn of(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let offset = (i64::from(width) - i64::from(height)) / 2;
        Some(Self {
            sx: offset.max(0) as u32,
            sy: (-offset).max(0) as u32,
            dim: width.min(height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_crops_left_and_right() {
        let crop = SquareCrop::of(640, 480).unwrap();
        assert_eq!(crop, SquareCrop { sx: 80, sy: 0, dim: 480 });
    }

    #[test]
    fn portrait_crops_top_and_bottom() {
        let crop = SquareCrop::of(320, 480).unwrap();
        assert_eq!(crop, SquareCrop { sx: 0, sy: 80, dim: 320 });
    }

    #[test]
    fn square_source_is_identity() {
        let crop = SquareCrop::of(500, 500).unwrap();
        assert_eq!(crop, SquareCrop { sx: 0, sy: 0, dim: 500 });
    }

    #[test]
    fn zero_dimension_means_not_ready() {
        assert_eq!(SquareCrop::of(0, 0), None);
        assert_eq!(SquareCrop::of(640, 0), None);
        assert_eq!(SquareCrop::of(0, 480), None);
    }

    #[test]
    fn crop_stays_inside_source_bounds() {
        for (w, h) in [(1, 1), (2, 1), (1, 2), (641, 480), (480, 641), (1920, 1080)] {
            let crop = SquareCrop::of(w, h).unwrap();
            assert_eq!(crop.dim, w.min(h));
            assert!(crop.sx + crop.dim <= w);
            assert!(crop.sy + crop.dim <= h);
            assert!(crop.sx == 0 || crop.sy == 0);
        }
    }
}
