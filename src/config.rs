use crate::foundation::error::{PersonaeError, PersonaeResult};

/// Whether the platform allows scripted media playback without a user gesture.
///
/// Consulted once at avatar construction. Modeled as injected configuration rather than
/// an ambient global so construction behavior is deterministic under test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayPolicy {
    /// Script-initiated playback may start as soon as the media has buffered.
    #[default]
    Scripted,
    /// The platform rejects unsolicited playback; defer until a user gesture starts it.
    GestureRequired,
}

/// Per-avatar construction settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvatarConfig {
    /// Draw the shared pointer ring on top of the avatar content.
    #[serde(default)]
    pub pointer_visible: bool,
    /// Platform autoplay policy, see [`AutoplayPolicy`].
    #[serde(default)]
    pub autoplay: AutoplayPolicy,
}

impl AvatarConfig {
    pub fn from_json(json: &str) -> PersonaeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PersonaeError::serde(format!("avatar config parse failed: {e}")))
    }
}
