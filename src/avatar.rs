use kurbo::Rect;

use crate::surface::DrawSurface;

pub mod image;
pub mod video;

/// Pointer ring appearance, premultiplied RGBA8.
const POINTER_RING_RGBA: [u8; 4] = [255, 215, 0, 255];

/// The drawing contract every avatar variant fulfills.
///
/// The render loop holds one `dyn Avatar` per participant and calls [`draw`](Self::draw)
/// once per frame; dispatch is through this trait, never through type inspection, so new
/// variants slot in without touching the loop.
pub trait Avatar {
    /// Whether the shared pointer ring is composited after the variant's content.
    /// Fixed at construction.
    fn pointer_visible(&self) -> bool;

    /// Paints this avatar into `surface` at the requested `width x height` box.
    ///
    /// `is_self` is true exactly when the avatar represents the local viewer. The call
    /// never fails: unready media and zero dimensions skip paints silently, because the
    /// render loop invokes this unconditionally every frame.
    ///
    /// Note on coordinate spaces: a variant may resize the surface to its own content
    /// dimensions (the video variant uses its square crop side), while the overlay pass
    /// always paints at the requested `width x height`. The two coincide only when the
    /// caller requests a square box matching the crop.
    fn draw(&self, surface: &mut dyn DrawSurface, width: u32, height: u32, is_self: bool);

    /// Shared post-content pass: composites the pointer ring on top, in the caller's
    /// requested coordinate space. Every variant's [`draw`](Self::draw) ends with this.
    /// A zero `width` or `height` is a no-op.
    fn finish_draw(&self, surface: &mut dyn DrawSurface, width: u32, height: u32) {
        if !self.pointer_visible() || width == 0 || height == 0 {
            return;
        }
        draw_pointer_ring(surface, width, height);
    }
}

/// Hollow ring (four edge strips) around the requested box.
fn draw_pointer_ring(surface: &mut dyn DrawSurface, width: u32, height: u32) {
    let w = f64::from(width);
    let h = f64::from(height);
    let t = f64::from((width.min(height) / 16).max(1)).min(w).min(h);

    surface.fill_rect(Rect::new(0.0, 0.0, w, t), POINTER_RING_RGBA);
    surface.fill_rect(Rect::new(0.0, h - t, w, h), POINTER_RING_RGBA);
    surface.fill_rect(Rect::new(0.0, t, t, h - t), POINTER_RING_RGBA);
    surface.fill_rect(Rect::new(w - t, t, w, h - t), POINTER_RING_RGBA);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::raster::RasterSurface;

    struct BareAvatar {
        pointer_visible: bool,
    }

    impl Avatar for BareAvatar {
        fn pointer_visible(&self) -> bool {
            self.pointer_visible
        }

        fn draw(&self, surface: &mut dyn DrawSurface, width: u32, height: u32, _is_self: bool) {
            self.finish_draw(surface, width, height);
        }
    }

    #[test]
    fn pointer_ring_frames_the_requested_box() {
        let avatar = BareAvatar { pointer_visible: true };
        let mut surface = RasterSurface::new(32, 32);
        avatar.draw(&mut surface, 32, 32, false);

        assert_eq!(surface.pixel(0, 0), Some(POINTER_RING_RGBA));
        assert_eq!(surface.pixel(31, 31), Some(POINTER_RING_RGBA));
        assert_eq!(surface.pixel(0, 16), Some(POINTER_RING_RGBA));
        // Interior stays untouched.
        assert_eq!(surface.pixel(16, 16), Some([0, 0, 0, 0]));
    }

    #[test]
    fn hidden_pointer_draws_nothing() {
        let avatar = BareAvatar { pointer_visible: false };
        let mut surface = RasterSurface::new(8, 8);
        avatar.draw(&mut surface, 8, 8, false);
        assert!(surface.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_size_overlay_is_a_noop() {
        let avatar = BareAvatar { pointer_visible: true };
        let mut surface = RasterSurface::new(8, 8);
        avatar.draw(&mut surface, 0, 8, false);
        avatar.draw(&mut surface, 8, 0, false);
        assert!(surface.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn avatars_dispatch_as_trait_objects() {
        let avatars: Vec<Box<dyn Avatar>> = vec![
            Box::new(BareAvatar { pointer_visible: true }),
            Box::new(BareAvatar { pointer_visible: false }),
        ];
        let mut surface = RasterSurface::new(8, 8);
        for avatar in &avatars {
            avatar.draw(&mut surface, 8, 8, false);
        }
        assert_eq!(surface.pixel(0, 0), Some(POINTER_RING_RGBA));
    }
}
