use crate::media::element::VideoElement;
use crate::media::stream::MediaStream;

/// What the surrounding call system can hand an avatar as its visual source.
#[derive(Clone, Debug, Default)]
pub enum MediaProvider {
    /// A ready-made element, adopted as-is (no rewrapping, attributes untouched).
    Element(VideoElement),
    /// A live stream; the avatar wraps it in a fresh muted, inline, autoplay element.
    Stream(MediaStream),
    /// No drawable video: an audio-only capture, or nothing attached yet. Avatars that
    /// need pixels refuse this at construction.
    #[default]
    None,
}
