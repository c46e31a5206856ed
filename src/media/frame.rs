use std::sync::Arc;

use crate::foundation::error::{PersonaeError, PersonaeResult};

/// A single decoded pixel frame, premultiplied RGBA8.
///
/// Frames are cheap to clone: the pixel bytes are shared. Both live video frames and
/// decoded still images use this representation, so every paint path downstream deals
/// with exactly one pixel format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl FrameRgba {
    /// Wraps a premultiplied RGBA8 buffer, checking it matches `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PersonaeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| PersonaeError::validation("frame size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(PersonaeError::validation(format!(
                "frame buffer is {} bytes, expected {expected} for {width}x{height} rgba8",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// A uniformly colored frame. Test and placeholder helper.
    pub fn solid(width: u32, height: u32, rgba8_premul: [u8; 4]) -> PersonaeResult<Self> {
        let px = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| PersonaeError::validation("frame size overflow"))?;
        let mut data = Vec::with_capacity(px * 4);
        for _ in 0..px {
            data.extend_from_slice(&rgba8_premul);
        }
        Self::new(width, height, data)
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}
