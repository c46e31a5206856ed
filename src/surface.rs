use kurbo::Rect;

use crate::media::frame::FrameRgba;

pub mod blend;
pub mod raster;

/// The 2D destination an avatar paints into, owned by the render loop.
///
/// The contract follows the per-frame draw path's "never fail" rule: every paint
/// operation is infallible, and degenerate inputs (empty rectangles, a zero-sized
/// surface, a non-invertible transform) are silent no-ops rather than errors.
///
/// Transform discipline is part of the contract: any caller applying `translate`/`scale`
/// must bracket them between `save` and `restore`, because one surface is shared by
/// every avatar drawn in a frame.
pub trait DrawSurface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Reallocates the surface at the given size, discarding prior content and
    /// resetting the transform stack.
    fn resize(&mut self, width: u32, height: u32);

    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops to the most recently saved transform; no-op when nothing was saved.
    fn restore(&mut self);

    /// Translates the drawing origin in the current coordinate space.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Scales the current coordinate space, possibly non-uniformly; negative factors
    /// mirror.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Paints the `src` sub-region of `frame` scaled into the `dst` rectangle, through
    /// the current transform.
    fn draw_frame(&mut self, frame: &FrameRgba, src: Rect, dst: Rect);

    /// Fills `rect` with a premultiplied RGBA8 color, through the current transform.
    fn fill_rect(&mut self, rect: Rect, rgba8_premul: [u8; 4]);
}
