use kurbo::Rect;

use crate::avatar::Avatar;
use crate::config::{AutoplayPolicy, AvatarConfig};
use crate::foundation::error::{PersonaeError, PersonaeResult};
use crate::foundation::geom::SquareCrop;
use crate::media::element::{ReadySubscription, VideoElement};
use crate::media::provider::MediaProvider;
use crate::surface::DrawSurface;

/// An avatar backed by a live video element.
///
/// Owns its element exclusively: adopted from the provider when one already exists, or
/// created fresh (muted, zero-volume, autoplay, inline) around a live stream. Per frame
/// it samples the element's current frame, squares it off with a centered crop, and
/// mirrors horizontally when drawing the local viewer's own avatar, so self-view behaves
/// like a mirror rather than a camera feed.
pub struct VideoAvatar {
    pointer_visible: bool,
    video: VideoElement,
    // Held so the one-shot playback retry is cancelled when the avatar goes away.
    _ready: Option<ReadySubscription>,
}

impl VideoAvatar {
    /// Builds the avatar from whatever visual source the call system has.
    ///
    /// Fails with [`PersonaeError::InvalidSourceKind`] when the provider carries neither
    /// an element nor a stream; there is no avatar without pixels. Under
    /// [`AutoplayPolicy::Scripted`] playback is kicked off immediately and retried once
    /// when the media becomes ready; both attempts are fire-and-forget, since playback
    /// may legitimately need a later user gesture and the draw path tolerates a
    /// not-yet-playing source.
    #[tracing::instrument(skip(provider))]
    pub fn new(provider: MediaProvider, config: &AvatarConfig) -> PersonaeResult<Self> {
        let video = match provider {
            MediaProvider::Element(element) => element,
            MediaProvider::Stream(stream) => VideoElement::new()
                .autoplay(true)
                .plays_inline(true)
                .muted(true)
                .volume(0.0)
                .src(stream),
            MediaProvider::None => return Err(PersonaeError::InvalidSourceKind),
        };

        let ready = match config.autoplay {
            AutoplayPolicy::GestureRequired => None,
            AutoplayPolicy::Scripted => {
                if let Err(err) = video.play() {
                    tracing::debug!(%err, "initial avatar playback deferred");
                }
                Some(video.once_can_play(|element| {
                    if let Err(err) = element.play() {
                        tracing::debug!(%err, "avatar playback retry rejected");
                    }
                }))
            }
        };

        Ok(Self {
            pointer_visible: config.pointer_visible,
            video,
            _ready: ready,
        })
    }

    /// The owned playback element.
    pub fn video(&self) -> &VideoElement {
        &self.video
    }
}

impl std::fmt::Debug for VideoAvatar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoAvatar")
            .field("pointer_visible", &self.pointer_visible)
            .field("video", &self.video)
            .finish()
    }
}

impl Avatar for VideoAvatar {
    fn pointer_visible(&self) -> bool {
        self.pointer_visible
    }

    fn draw(&self, surface: &mut dyn DrawSurface, width: u32, height: u32, is_self: bool) {
        let (nat_w, nat_h) = self.video.natural_size();
        if let Some(crop) = SquareCrop::of(nat_w, nat_h)
            && let Some(frame) = self.video.current_frame()
        {
            let dim = f64::from(crop.dim);
            surface.resize(crop.dim, crop.dim);
            surface.save();
            if is_self {
                surface.translate(dim, 0.0);
                surface.scale(-1.0, 1.0);
            }
            surface.draw_frame(
                &frame,
                Rect::new(
                    f64::from(crop.sx),
                    f64::from(crop.sy),
                    f64::from(crop.sx + crop.dim),
                    f64::from(crop.sy + crop.dim),
                ),
                Rect::new(0.0, 0.0, dim, dim),
            );
            surface.restore();
        }

        self.finish_draw(surface, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::frame::FrameRgba;
    use crate::media::stream::MediaStream;
    use crate::surface::raster::RasterSurface;

    fn scripted() -> AvatarConfig {
        AvatarConfig::default()
    }

    #[test]
    fn stream_provider_wraps_a_muted_inline_element() {
        let stream = MediaStream::new();
        let avatar =
            VideoAvatar::new(MediaProvider::Stream(stream.clone()), &scripted()).unwrap();

        let video = avatar.video();
        assert!(video.is_muted());
        assert_eq!(video.volume_level(), 0.0);
        assert!(video.is_autoplay());
        assert!(video.is_plays_inline());
        assert!(video.source().unwrap().same(&stream));
    }

    #[test]
    fn element_provider_is_adopted_without_rewrapping() {
        let element = VideoElement::new().src(MediaStream::new());
        let avatar =
            VideoAvatar::new(MediaProvider::Element(element.clone()), &scripted()).unwrap();
        assert!(avatar.video().same(&element));
        // Adoption leaves the caller's attributes alone.
        assert!(!avatar.video().is_muted());
    }

    #[test]
    fn no_source_fails_with_invalid_source_kind() {
        let err = VideoAvatar::new(MediaProvider::None, &scripted()).unwrap_err();
        assert!(matches!(err, PersonaeError::InvalidSourceKind));
    }

    #[test]
    fn gesture_policy_defers_playback_entirely() {
        let element = VideoElement::new().src(MediaStream::new());
        let config = AvatarConfig {
            autoplay: AutoplayPolicy::GestureRequired,
            ..AvatarConfig::default()
        };
        let avatar = VideoAvatar::new(MediaProvider::Element(element.clone()), &config).unwrap();

        assert!(!avatar.video().is_playing());
        // No retry was registered either.
        element.fire_can_play();
        assert!(!avatar.video().is_playing());
    }

    #[test]
    fn scripted_policy_retries_once_media_is_ready() {
        let element = VideoElement::new().src(MediaStream::new());
        let avatar = VideoAvatar::new(MediaProvider::Element(element.clone()), &scripted()).unwrap();

        // Initial play was rejected (not ready) and swallowed.
        assert!(!avatar.video().is_playing());
        element.fire_can_play();
        assert!(avatar.video().is_playing());
    }

    #[test]
    fn dropping_the_avatar_cancels_the_retry() {
        let element = VideoElement::new().src(MediaStream::new());
        let avatar = VideoAvatar::new(MediaProvider::Element(element.clone()), &scripted()).unwrap();
        drop(avatar);

        element.fire_can_play();
        assert!(!element.is_playing());
    }

    #[test]
    fn draw_without_frames_paints_nothing_but_still_overlays() {
        let config = AvatarConfig {
            pointer_visible: true,
            ..AvatarConfig::default()
        };
        let avatar = VideoAvatar::new(MediaProvider::Stream(MediaStream::new()), &config).unwrap();

        let mut surface = RasterSurface::new(8, 8);
        avatar.draw(&mut surface, 8, 8, false);

        // No resize happened, and the only paint is the pointer ring.
        assert_eq!(surface.size(), (8, 8));
        assert_eq!(surface.pixel(0, 0), Some([255, 215, 0, 255]));
        assert_eq!(surface.pixel(4, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn draw_resizes_to_the_centered_square_crop() {
        let stream = MediaStream::new();
        let mut data = Vec::new();
        for y in 0..4u32 {
            for x in 0..6u32 {
                data.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        stream.push_frame(FrameRgba::new(6, 4, data).unwrap());

        let avatar = VideoAvatar::new(MediaProvider::Stream(stream), &scripted()).unwrap();
        let mut surface = RasterSurface::new(2, 2);
        avatar.draw(&mut surface, 6, 4, false);

        // dim = 4, sx = 1, sy = 0: column c of the surface holds source column c + 1.
        assert_eq!(surface.size(), (4, 4));
        for y in 0..4 {
            for x in 0..4u32 {
                assert_eq!(surface.pixel(x, y), Some([(x + 1) as u8, y as u8, 0, 255]));
            }
        }
    }

    #[test]
    fn self_view_is_mirrored_and_remote_is_not() {
        let stream = MediaStream::new();
        let mut data = Vec::new();
        for y in 0..3u32 {
            for x in 0..3u32 {
                data.extend_from_slice(&[x as u8 * 10, y as u8 * 10, 0, 255]);
            }
        }
        stream.push_frame(FrameRgba::new(3, 3, data).unwrap());
        let avatar = VideoAvatar::new(MediaProvider::Stream(stream), &scripted()).unwrap();

        let mut remote = RasterSurface::new(3, 3);
        avatar.draw(&mut remote, 3, 3, false);
        let mut own = RasterSurface::new(3, 3);
        avatar.draw(&mut own, 3, 3, true);

        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(remote.pixel(x, y), Some([x as u8 * 10, y as u8 * 10, 0, 255]));
                assert_eq!(own.pixel(x, y), remote.pixel(2 - x, y));
            }
        }
    }

    #[test]
    fn mirror_transform_never_leaks() {
        let stream = MediaStream::new();
        stream.push_frame(FrameRgba::solid(3, 3, [50, 60, 70, 255]).unwrap());
        let avatar = VideoAvatar::new(MediaProvider::Stream(stream), &scripted()).unwrap();

        let mut surface = RasterSurface::new(3, 3);
        avatar.draw(&mut surface, 3, 3, true);
        let after_self = (surface.current_transform(), surface.save_depth());

        avatar.draw(&mut surface, 3, 3, false);
        let after_remote = (surface.current_transform(), surface.save_depth());

        assert_eq!(after_self, after_remote);
        assert_eq!(after_self.1, 0);
    }
}
