use kurbo::{Affine, Point, Rect};

use crate::media::frame::FrameRgba;
use crate::surface::{DrawSurface, blend};

/// CPU implementation of [`DrawSurface`]: a premultiplied RGBA8 buffer plus an affine
/// transform stack.
///
/// Blits inverse-map each device pixel through the current transform into the
/// destination rectangle, then nearest-sample the source region. An axis-aligned
/// 1:1 blit therefore copies pixels exactly, and the mirror transform
/// `translate(dim, 0); scale(-1, 1)` lands each source column on its flipped
/// destination column with no filtering.
pub struct RasterSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    transform: Affine,
    saved: Vec<Affine>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
            transform: Affine::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// The full premultiplied RGBA8 buffer, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// The transform currently in effect.
    pub fn current_transform(&self) -> Affine {
        self.transform
    }

    /// Depth of the save stack.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Device-space pixel range covered by `rect` under the current transform,
    /// clamped to the surface. Empty ranges fall out naturally.
    fn device_bounds(&self, rect: Rect) -> (u32, u32, u32, u32) {
        let bbox = self.transform.transform_rect_bbox(rect);
        let x0 = bbox.x0.floor().clamp(0.0, f64::from(self.width)) as u32;
        let x1 = bbox.x1.ceil().clamp(0.0, f64::from(self.width)) as u32;
        let y0 = bbox.y0.floor().clamp(0.0, f64::from(self.height)) as u32;
        let y1 = bbox.y1.ceil().clamp(0.0, f64::from(self.height)) as u32;
        (x0, x1, y0, y1)
    }

    fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let d = &mut self.data[i..i + 4];
        let out = blend::over([d[0], d[1], d[2], d[3]], src, 1.0);
        d.copy_from_slice(&out);
    }
}

impl DrawSurface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![0; width as usize * height as usize * 4];
        self.transform = Affine::IDENTITY;
        self.saved.clear();
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform * Affine::translate((dx, dy));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform * Affine::scale_non_uniform(sx, sy);
    }

    fn draw_frame(&mut self, frame: &FrameRgba, src: Rect, dst: Rect) {
        if src.width() <= 0.0 || src.height() <= 0.0 || dst.width() <= 0.0 || dst.height() <= 0.0
        {
            tracing::trace!(?src, ?dst, "skipping degenerate frame blit");
            return;
        }
        if self.transform.determinant().abs() < 1e-12 {
            return;
        }
        let inv = self.transform.inverse();
        let (x0, x1, y0, y1) = self.device_bounds(dst);

        for y in y0..y1 {
            for x in x0..x1 {
                let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if p.x < dst.x0 || p.x >= dst.x1 || p.y < dst.y0 || p.y >= dst.y1 {
                    continue;
                }
                let u = src.x0 + (p.x - dst.x0) / dst.width() * src.width();
                let v = src.y0 + (p.y - dst.y0) / dst.height() * src.height();
                if u < 0.0 || v < 0.0 {
                    continue;
                }
                let Some(px) = frame.pixel(u.floor() as u32, v.floor() as u32) else {
                    continue;
                };
                self.blend_pixel(x, y, px);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, rgba8_premul: [u8; 4]) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        if self.transform.determinant().abs() < 1e-12 {
            return;
        }
        let inv = self.transform.inverse();
        let (x0, x1, y0, y1) = self.device_bounds(rect);

        for y in y0..y1 {
            for x in x0..x1 {
                let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if p.x < rect.x0 || p.x >= rect.x1 || p.y < rect.y0 || p.y >= rect.y1 {
                    continue;
                }
                self.blend_pixel(x, y, rgba8_premul);
            }
        }
    }
}
