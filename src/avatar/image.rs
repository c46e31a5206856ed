use kurbo::Rect;

use crate::avatar::Avatar;
use crate::config::AvatarConfig;
use crate::foundation::error::PersonaeResult;
use crate::foundation::geom::SquareCrop;
use crate::media::decode::decode_image;
use crate::media::frame::FrameRgba;
use crate::surface::DrawSurface;

/// An avatar backed by a still image (a profile photo, say).
///
/// Shares the video variant's centered-square-crop path but never mirrors: mirroring
/// exists so a live self-view behaves like a mirror, and a photograph is not one.
pub struct ImageAvatar {
    pointer_visible: bool,
    image: FrameRgba,
}

impl ImageAvatar {
    /// Decodes compressed image bytes (PNG, JPEG, ...) into an avatar.
    pub fn from_bytes(bytes: &[u8], config: &AvatarConfig) -> PersonaeResult<Self> {
        Ok(Self::from_frame(decode_image(bytes)?, config))
    }

    /// Wraps an already-decoded frame.
    pub fn from_frame(image: FrameRgba, config: &AvatarConfig) -> Self {
        Self {
            pointer_visible: config.pointer_visible,
            image,
        }
    }
}

impl Avatar for ImageAvatar {
    fn pointer_visible(&self) -> bool {
        self.pointer_visible
    }

    fn draw(&self, surface: &mut dyn DrawSurface, width: u32, height: u32, _is_self: bool) {
        if let Some(crop) = SquareCrop::of(self.image.width, self.image.height) {
            let dim = f64::from(crop.dim);
            surface.resize(crop.dim, crop.dim);
            surface.draw_frame(
                &self.image,
                Rect::new(
                    f64::from(crop.sx),
                    f64::from(crop.sy),
                    f64::from(crop.sx + crop.dim),
                    f64::from(crop.sy + crop.dim),
                ),
                Rect::new(0.0, 0.0, dim, dim),
            );
        }

        self.finish_draw(surface, width, height);
    }
}
