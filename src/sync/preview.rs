//! Edit-time preview surface synchronisation.
//!
//! The preview is an embedded page that renders the profile being edited. Layout-affecting
//! settings are not observable from inside it, so a change to any of them remounts the surface
//! under a new [`PreviewSyncKey`]. Pure container resizes only adjust the surface size.
//!
//! Events queue up during an event-loop turn and [`PreviewSync::flush`] collapses them into at
//! most one [`PreviewSignal`]; a settings change takes precedence over any resize in the same
//! batch.

use std::fmt;

use crate::{
    config::engine::PreviewConfig,
    foundation::{
        core::PixelSize,
        error::{BioframeError, BioframeResult},
        math::StableHasher,
    },
    settings::model::LayoutSettings,
};

/// Remount key derived from [`LayoutSettings`]. Equal settings always give equal keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(into = "String")]
pub struct PreviewSyncKey(u64);

impl PreviewSyncKey {
    /// Hash the layout fields in a fixed order.
    pub fn derive(layout: &LayoutSettings) -> Self {
        let mut h = StableHasher::new();
        h.write_u32(layout.head_to_picture_padding);
        h.write_u32(layout.picture_to_name_padding);
        h.write_u32(layout.between_cards_padding);
        h.write_u32(layout.link_card_height);
        h.write_u32(layout.profile_image_size);
        h.write_str(layout.profile_frame_type.as_str());
        h.write_str(layout.view_mode.as_str());
        Self(h.finish())
    }
}

impl fmt::Display for PreviewSyncKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview-{:016x}", self.0)
    }
}

impl From<PreviewSyncKey> for String {
    fn from(value: PreviewSyncKey) -> Self {
        value.to_string()
    }
}

/// Why the surface is being signalled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalReason {
    /// Remount under a new key.
    SettingsChanged,
    /// Adjust size in place, same key.
    Resize,
}

/// Typed message from the editor to the preview surface.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSignal {
    /// Strictly increasing per [`PreviewSync`]; receivers drop anything not newer than the last
    /// applied signal.
    pub seq: u64,
    /// Remount or resize.
    pub reason: SignalReason,
    /// Key the surface should be mounted under.
    pub key: PreviewSyncKey,
    /// Preview page URL.
    pub src: String,
    /// Latest container size, once one has been reported.
    pub size: Option<PixelSize>,
}

/// Input observed by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewEvent {
    /// Settings were edited; carries the new layout projection.
    SettingsChanged(LayoutSettings),
    /// The preview container changed size.
    ContainerResized(PixelSize),
}

/// Where the synchroniser is within a turn, or what the last flush decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewPhase {
    /// Nothing queued.
    Idle,
    /// A settings change is queued.
    SettingsChanged,
    /// Only a resize is queued.
    ContainerResized,
    /// Flush remounted the surface.
    Remount,
    /// Flush resized the surface in place.
    ResizeOnly,
}

/// Editor-side driver of the preview surface.
#[derive(Clone, Debug)]
pub struct PreviewSync {
    src: String,
    layout: LayoutSettings,
    key: PreviewSyncKey,
    size: Option<PixelSize>,
    phase: PreviewPhase,
    /// `Remount`, `ResizeOnly` or `Idle` (nothing to do) for the most recent flush.
    last_outcome: PreviewPhase,
    pending_layout: Option<LayoutSettings>,
    pending_size: Option<PixelSize>,
    seq: u64,
}

impl PreviewSync {
    /// Synchroniser for `username`'s preview, mounted with `layout`.
    pub fn new(username: &str, layout: LayoutSettings, cfg: &PreviewConfig) -> BioframeResult<Self> {
        let src = preview_url(&cfg.base_url, username)?;
        Ok(Self {
            src,
            key: PreviewSyncKey::derive(&layout),
            layout,
            size: None,
            phase: PreviewPhase::Idle,
            last_outcome: PreviewPhase::Idle,
            pending_layout: None,
            pending_size: None,
            seq: 0,
        })
    }

    /// Preview page URL.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Layout the surface is currently mounted with.
    pub fn layout(&self) -> LayoutSettings {
        self.layout
    }

    /// Key the surface is currently mounted under.
    pub fn key(&self) -> PreviewSyncKey {
        self.key
    }

    /// Last accepted container size.
    pub fn size(&self) -> Option<PixelSize> {
        self.size
    }

    /// Phase within the current turn.
    pub fn phase(&self) -> PreviewPhase {
        self.phase
    }

    /// `Remount`, `ResizeOnly` or `Idle` for the most recent flush.
    pub fn last_outcome(&self) -> PreviewPhase {
        self.last_outcome
    }

    /// Queue an event for the current turn.
    pub fn push(&mut self, event: PreviewEvent) {
        match event {
            PreviewEvent::SettingsChanged(layout) => {
                self.pending_layout = Some(layout);
                self.phase = PreviewPhase::SettingsChanged;
            }
            PreviewEvent::ContainerResized(size) => {
                self.pending_size = Some(size);
                if self.phase == PreviewPhase::Idle {
                    self.phase = PreviewPhase::ContainerResized;
                }
            }
        }
    }

    /// Collapse queued events into at most one signal and return to idle.
    pub fn flush(&mut self) -> Option<PreviewSignal> {
        let layout = self.pending_layout.take();
        let size = self.pending_size.take();

        let remount = layout.is_some_and(|l| PreviewSyncKey::derive(&l) != self.key);
        let resized = size.is_some_and(|s| Some(s) != self.size);

        if let Some(s) = size {
            self.size = Some(s);
        }

        let signal = if remount {
            if let Some(l) = layout {
                self.layout = l;
                self.key = PreviewSyncKey::derive(&l);
            }
            self.last_outcome = PreviewPhase::Remount;
            tracing::debug!(key = %self.key, "layout settings changed, remounting preview");
            Some(self.signal(SignalReason::SettingsChanged))
        } else if resized {
            self.last_outcome = PreviewPhase::ResizeOnly;
            Some(self.signal(SignalReason::Resize))
        } else {
            self.last_outcome = PreviewPhase::Idle;
            None
        };

        self.phase = PreviewPhase::Idle;
        signal
    }

    /// Push one event and flush immediately.
    pub fn handle(&mut self, event: PreviewEvent) -> Option<PreviewSignal> {
        self.push(event);
        self.flush()
    }

    fn signal(&mut self, reason: SignalReason) -> PreviewSignal {
        self.seq += 1;
        PreviewSignal {
            seq: self.seq,
            reason,
            key: self.key,
            src: self.src.clone(),
            size: self.size,
        }
    }
}

/// Receiver side: applies signals in order and ignores stale or duplicate ones.
#[derive(Clone, Debug, Default)]
pub struct PreviewSurface {
    last_seq: u64,
    mounted_key: Option<PreviewSyncKey>,
    mounts: u32,
    size: Option<PixelSize>,
}

impl PreviewSurface {
    /// A surface already mounted with the sync's current key.
    pub fn mounted(sync: &PreviewSync) -> Self {
        Self {
            last_seq: 0,
            mounted_key: Some(sync.key()),
            mounts: 1,
            size: sync.size(),
        }
    }

    /// Returns `false` when the signal is stale and was ignored.
    pub fn apply(&mut self, signal: &PreviewSignal) -> bool {
        if signal.seq <= self.last_seq {
            return false;
        }
        self.last_seq = signal.seq;
        if self.mounted_key != Some(signal.key) {
            self.mounted_key = Some(signal.key);
            self.mounts += 1;
        }
        if signal.size.is_some() {
            self.size = signal.size;
        }
        true
    }

    /// Number of times the surface has been mounted, including the first.
    pub fn mounts(&self) -> u32 {
        self.mounts
    }

    /// Key of the current mount.
    pub fn mounted_key(&self) -> Option<PreviewSyncKey> {
        self.mounted_key
    }

    /// Size last applied.
    pub fn size(&self) -> Option<PixelSize> {
        self.size
    }
}

/// `{base}/{username}?isIframe=true`, with the username percent-encoded as a path segment.
pub fn preview_url(base_url: &str, username: &str) -> BioframeResult<String> {
    let username = username.trim();
    if username.is_empty() {
        return Err(BioframeError::validation("preview needs a non-empty username"));
    }
    Ok(format!(
        "{}/{}?isIframe=true",
        base_url.trim_end_matches('/'),
        encode_path_segment(username)
    ))
}

fn encode_path_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/sync/preview.rs"]
mod tests;
