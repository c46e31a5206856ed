use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::foundation::error::{PersonaeError, PersonaeResult};
use crate::media::frame::FrameRgba;
use crate::media::stream::MediaStream;

type ReadyCallback = Box<dyn FnOnce(&VideoElement)>;

/// A video playback element, the one mutable media collaborator an avatar owns.
///
/// Mirrors the semantics the surrounding call system provides: attribute configuration
/// happens through a consuming builder, playback may legitimately be refused until the
/// bound source has buffered, and interested parties can register a one-shot "became
/// ready to play" callback. Handles are cheap clones onto the same element; all of it
/// lives on the single cooperative rendering thread.
#[derive(Clone)]
pub struct VideoElement {
    inner: Rc<RefCell<ElementInner>>,
}

struct ElementInner {
    muted: bool,
    volume: f64,
    autoplay: bool,
    plays_inline: bool,
    playing: bool,
    can_play: bool,
    source: Option<MediaStream>,
    ready_listeners: Vec<(u64, ReadyCallback)>,
    next_listener: u64,
}

impl Default for ElementInner {
    fn default() -> Self {
        Self {
            muted: false,
            volume: 1.0,
            autoplay: false,
            plays_inline: false,
            playing: false,
            can_play: false,
            source: None,
            ready_listeners: Vec::new(),
            next_listener: 1,
        }
    }
}

impl VideoElement {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementInner::default())),
        }
    }

    // Attribute builder, applied at element creation.

    pub fn muted(self, muted: bool) -> Self {
        self.inner.borrow_mut().muted = muted;
        self
    }

    pub fn volume(self, volume: f64) -> Self {
        self.inner.borrow_mut().volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn autoplay(self, autoplay: bool) -> Self {
        self.inner.borrow_mut().autoplay = autoplay;
        self
    }

    pub fn plays_inline(self, plays_inline: bool) -> Self {
        self.inner.borrow_mut().plays_inline = plays_inline;
        self
    }

    pub fn src(self, stream: MediaStream) -> Self {
        self.inner.borrow_mut().source = Some(stream);
        self
    }

    // Playback.

    /// Starts playback. Fails (recoverably) while no source is bound or the source has
    /// not buffered enough to play; callers on the per-frame path swallow this and try
    /// again via [`once_can_play`](Self::once_can_play).
    pub fn play(&self) -> PersonaeResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.source.is_none() {
            return Err(PersonaeError::media("play rejected: no media source bound"));
        }
        if !inner.can_play {
            return Err(PersonaeError::media("play rejected: media is not ready"));
        }
        inner.playing = true;
        Ok(())
    }

    pub fn pause(&self) {
        self.inner.borrow_mut().playing = false;
    }

    /// Marks the element ready to play and fires pending one-shot listeners, in
    /// registration order. Called by the media pipeline once enough is buffered.
    pub fn fire_can_play(&self) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.can_play = true;
            std::mem::take(&mut inner.ready_listeners)
        };
        for (_, callback) in listeners {
            callback(self);
        }
    }

    /// Registers a single-fire readiness callback. If the element is already ready the
    /// callback runs immediately. The returned subscription unregisters on drop;
    /// unregistering after the callback fired is a no-op.
    pub fn once_can_play(
        &self,
        callback: impl FnOnce(&VideoElement) + 'static,
    ) -> ReadySubscription {
        let already_ready = self.inner.borrow().can_play;
        if already_ready {
            callback(self);
            return ReadySubscription {
                id: 0,
                element: Weak::new(),
            };
        }

        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.ready_listeners.push((id, Box::new(callback)));
        ReadySubscription {
            id,
            element: Rc::downgrade(&self.inner),
        }
    }

    // Introspection.

    pub fn is_muted(&self) -> bool {
        self.inner.borrow().muted
    }

    pub fn volume_level(&self) -> f64 {
        self.inner.borrow().volume
    }

    pub fn is_autoplay(&self) -> bool {
        self.inner.borrow().autoplay
    }

    pub fn is_plays_inline(&self) -> bool {
        self.inner.borrow().plays_inline
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().playing
    }

    pub fn is_ready(&self) -> bool {
        self.inner.borrow().can_play
    }

    pub fn source(&self) -> Option<MediaStream> {
        self.inner.borrow().source.clone()
    }

    /// The frame currently presented by the bound source, if any.
    pub fn current_frame(&self) -> Option<FrameRgba> {
        self.inner
            .borrow()
            .source
            .as_ref()
            .and_then(MediaStream::current_frame)
    }

    /// Natural media dimensions; `(0, 0)` until the source has produced a frame.
    pub fn natural_size(&self) -> (u32, u32) {
        self.inner
            .borrow()
            .source
            .as_ref()
            .map_or((0, 0), MediaStream::natural_size)
    }

    /// True when `other` is a handle to this same element.
    pub fn same(&self, other: &VideoElement) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for VideoElement {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VideoElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("VideoElement")
            .field("muted", &inner.muted)
            .field("volume", &inner.volume)
            .field("autoplay", &inner.autoplay)
            .field("plays_inline", &inner.plays_inline)
            .field("playing", &inner.playing)
            .field("can_play", &inner.can_play)
            .finish()
    }
}

/// Handle to a pending [`VideoElement::once_can_play`] registration.
///
/// Dropping it unregisters the callback if it has not fired. Listener closures may hold
/// an element handle; unregistering releases that closure, so a subscription abandoned
/// before readiness cannot keep the element alive through its own listener list.
pub struct ReadySubscription {
    id: u64,
    element: Weak<RefCell<ElementInner>>,
}

impl ReadySubscription {
    /// Explicit cancellation; equivalent to dropping the subscription.
    pub fn cancel(self) {}
}

impl Drop for ReadySubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.element.upgrade() {
            inner
                .borrow_mut()
                .ready_listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
