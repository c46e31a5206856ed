//! Personae renders participant avatars for a shared virtual space.
//!
//! Every participant owns one avatar, a [`dyn Avatar`](Avatar) the scene renderer
//! draws once per frame. The live-video variant squares off whatever the camera
//! produces with a centered crop and mirrors the local viewer's own feed, so self-view
//! behaves like a mirror rather than a camera.
//!
//! # Draw path
//!
//! 1. **Sample**: [`VideoAvatar`] pulls the current frame from its [`VideoElement`]
//!    at call time; there is no internal buffering.
//! 2. **Crop**: [`SquareCrop`] selects the largest centered square of the frame.
//! 3. **Composite**: the frame is blitted into the [`DrawSurface`] (mirrored for the
//!    local viewer, inside a save/restore scope), then the shared pointer ring is
//!    drawn on top at the caller's requested size.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **`draw` never fails**: unready media and degenerate sizes are silent no-ops;
//!   the render loop calls `draw` unconditionally every frame.
//! - **Single-threaded, cooperative**: media handles are cheap clones on one event
//!   loop; `draw` performs only synchronous geometry and paint work.
//! - **Premultiplied RGBA8** end-to-end, live frames and decoded images alike.
#![forbid(unsafe_code)]

pub mod avatar;
pub mod config;
pub mod foundation;
pub mod media;
pub mod surface;

pub use avatar::Avatar;
pub use avatar::image::ImageAvatar;
pub use avatar::video::VideoAvatar;
pub use config::{AutoplayPolicy, AvatarConfig};
pub use foundation::error::{PersonaeError, PersonaeResult};
pub use foundation::geom::SquareCrop;
pub use media::decode::decode_image;
pub use media::element::{ReadySubscription, VideoElement};
pub use media::frame::FrameRgba;
pub use media::provider::MediaProvider;
pub use media::stream::MediaStream;
pub use surface::DrawSurface;
pub use surface::raster::RasterSurface;
