use std::cell::RefCell;
use std::rc::Rc;

use crate::media::frame::FrameRgba;

/// A live video frame producer.
///
/// The capture pipeline pushes decoded frames through one handle while consumers (a
/// [`VideoElement`](crate::media::element::VideoElement)) sample the latest frame through
/// another. Handles are cheap clones of the same underlying stream; everything runs on
/// the one cooperative rendering thread, so there are no locks.
#[derive(Clone, Default)]
pub struct MediaStream {
    inner: Rc<RefCell<StreamInner>>,
}

#[derive(Default)]
struct StreamInner {
    frame: Option<FrameRgba>,
}

impl MediaStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the next frame. The stream keeps only the most recent one; consumers
    /// sample whatever is current at call time, there is no internal buffering.
    /// Buffer shape was already validated by [`FrameRgba::new`].
    pub fn push_frame(&self, frame: FrameRgba) {
        self.inner.borrow_mut().frame = Some(frame);
    }

    /// The most recently pushed frame, if any has arrived yet.
    pub fn current_frame(&self) -> Option<FrameRgba> {
        self.inner.borrow().frame.clone()
    }

    /// Natural size of the current frame, `(0, 0)` until one has arrived.
    pub fn natural_size(&self) -> (u32, u32) {
        self.inner
            .borrow()
            .frame
            .as_ref()
            .map_or((0, 0), |f| (f.width, f.height))
    }

    /// True when `other` is a handle to this same stream.
    pub fn same(&self, other: &MediaStream) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.natural_size();
        f.debug_struct("MediaStream")
            .field("natural_size", &(w, h))
            .finish()
    }
}
