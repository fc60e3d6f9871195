//! Two-tier icon source resolution with bounded retries.
//!
//! An icon first loads from the vector icon service. After `max_svg_attempts` failures it
//! switches, once and for good, to the favicon service at the configured size, then walks the
//! size ladder down on each further failure until the floor size is reached.
//!
//! [`resolve_icon_src`] and [`RetryState::on_failure`] are pure. [`IconLoader`] drives one icon
//! instance through time with an explicit clock.
//!
//! # Invariants
//!
//! - The tier only ever moves `Svg -> GoogleFavicon`.
//! - `current_size` never increases.
//! - One instance issues at most `max_svg_attempts + max_google_attempts` requests.

use std::time::{Duration, Instant};

use crate::{
    config::engine::IconFallbackConfig,
    foundation::math::stable_hash_str,
    frame::spec::HexColor,
    icon::endpoints::{domain_of, favicon_url, icon_name_for, svg_icon_url},
};

/// Icon service currently in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IconTier {
    /// Vector icon CDN, tinted with the frame colour.
    Svg,
    /// Favicon service, walking the size ladder down.
    GoogleFavicon,
}

/// Per-instance retry bookkeeping. Owned by exactly one icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryState {
    /// Active tier.
    pub tier: IconTier,
    /// Failed vector icon loads so far.
    pub svg_attempts: u8,
    /// Failed favicon loads so far.
    pub google_attempts: u8,
    /// Favicon size requested next.
    pub current_size: u32,
    /// Favicon size the chain starts from.
    pub configured_size: u32,
}

impl RetryState {
    /// Fresh state on the vector tier.
    pub fn new(configured_size: u32) -> Self {
        Self {
            tier: IconTier::Svg,
            svg_attempts: 0,
            google_attempts: 0,
            current_size: configured_size,
            configured_size,
        }
    }

    /// True once the favicon tier has used up its attempts.
    pub fn is_terminal(&self, cfg: &IconFallbackConfig) -> bool {
        self.tier == IconTier::GoogleFavicon && self.google_attempts >= cfg.max_google_attempts
    }

    /// State after the currently loading source failed.
    pub fn on_failure(&self, cfg: &IconFallbackConfig) -> IconTransition {
        if self.is_terminal(cfg) {
            return IconTransition::Exhausted;
        }
        let mut next = *self;
        match self.tier {
            IconTier::Svg => {
                next.svg_attempts = self.svg_attempts.saturating_add(1);
                if next.svg_attempts < cfg.max_svg_attempts {
                    IconTransition::Retry {
                        next,
                        delay: cfg_backoff(cfg),
                    }
                } else {
                    next.tier = IconTier::GoogleFavicon;
                    next.google_attempts = 0;
                    next.current_size = self.configured_size;
                    IconTransition::Retry {
                        next,
                        delay: Duration::ZERO,
                    }
                }
            }
            IconTier::GoogleFavicon => {
                next.google_attempts = self.google_attempts.saturating_add(1);
                if next.google_attempts < cfg.max_google_attempts {
                    next.current_size = step_down(self.current_size, cfg);
                    IconTransition::Retry {
                        next,
                        delay: cfg_backoff(cfg),
                    }
                } else {
                    next.current_size = cfg.floor_size().min(self.current_size);
                    IconTransition::GiveUp { next }
                }
            }
        }
    }
}

/// What happens when the current source fails to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconTransition {
    /// Load the source for `next` after `delay` (before per-icon jitter).
    Retry {
        /// State whose source loads next.
        next: RetryState,
        /// Wait before loading it.
        delay: Duration,
    },
    /// Record `next` and stop loading.
    GiveUp {
        /// Final state.
        next: RetryState,
    },
    /// Already terminal; nothing changes.
    Exhausted,
}

/// Resolved source for one retry state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconSource {
    /// URL to load.
    pub src: String,
    /// Transition to apply if `src` fails.
    pub on_error: IconTransition,
}

/// Source to load for `state`, plus the transition to apply if it fails.
pub fn resolve_icon_src(
    state: &RetryState,
    url: &str,
    color: &HexColor,
    cfg: &IconFallbackConfig,
) -> IconSource {
    IconSource {
        src: src_for(state, url, color, cfg),
        on_error: state.on_failure(cfg),
    }
}

fn src_for(state: &RetryState, url: &str, color: &HexColor, cfg: &IconFallbackConfig) -> String {
    match state.tier {
        IconTier::Svg => {
            let name = icon_name_for(url).unwrap_or_default();
            svg_icon_url(cfg, &name, color)
        }
        IconTier::GoogleFavicon => {
            let domain = domain_of(url).unwrap_or_default();
            favicon_url(cfg, &domain, state.current_size)
        }
    }
}

/// Next ladder entry strictly below `size`, or the floor.
fn step_down(size: u32, cfg: &IconFallbackConfig) -> u32 {
    cfg.size_ladder
        .iter()
        .copied()
        .find(|&s| s < size)
        .unwrap_or_else(|| cfg.floor_size().min(size))
}

fn cfg_backoff(cfg: &IconFallbackConfig) -> Duration {
    Duration::from_millis(cfg.backoff_ms)
}

/// Extra delay in `[0, jitter_ms]` derived from the link URL, so icons sharing a page spread
/// their retries without any randomness.
pub fn jitter_for(url: &str, cfg: &IconFallbackConfig) -> Duration {
    if cfg.jitter_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(stable_hash_str(url) % (cfg.jitter_ms + 1))
}

/// Result of reporting a load failure to an [`IconLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconStep {
    /// Next source becomes available from [`IconLoader::poll`] at `at`.
    RetryAt {
        /// When the retry is due.
        at: Instant,
    },
    /// Chain exhausted; the last source stays.
    GaveUp,
    /// Ignored: a retry is already pending, the chain is exhausted or the loader is torn down.
    Ignored,
}

#[derive(Clone, Debug)]
struct PendingRetry {
    next: RetryState,
    at: Instant,
}

/// Drives one icon instance: failures schedule retries, `poll` releases them when due.
#[derive(Clone, Debug)]
pub struct IconLoader {
    url: String,
    color: HexColor,
    cfg: IconFallbackConfig,
    jitter: Duration,
    state: RetryState,
    src: String,
    pending: Option<PendingRetry>,
    requests: u32,
    torn_down: bool,
}

impl IconLoader {
    /// Loader for the icon of `url`, starting on the vector tier.
    pub fn new(url: &str, color: HexColor, configured_size: u32, cfg: &IconFallbackConfig) -> Self {
        let state = RetryState::new(configured_size);
        let src = src_for(&state, url, &color, cfg);
        Self {
            url: url.to_string(),
            jitter: jitter_for(url, cfg),
            color,
            cfg: cfg.clone(),
            state,
            src,
            pending: None,
            requests: 1,
            torn_down: false,
        }
    }

    /// Source currently loading or displayed.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Current retry bookkeeping.
    pub fn state(&self) -> RetryState {
        self.state
    }

    /// Number of sources handed out so far, including the initial one.
    pub fn requests(&self) -> u32 {
        self.requests
    }

    /// True once the chain is exhausted.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal(&self.cfg)
    }

    /// Report that the current source failed to load at `now`.
    pub fn on_error(&mut self, now: Instant) -> IconStep {
        if self.torn_down || self.pending.is_some() {
            return IconStep::Ignored;
        }
        match self.state.on_failure(&self.cfg) {
            IconTransition::Retry { next, delay } => {
                let delay = if delay.is_zero() {
                    delay
                } else {
                    delay + self.jitter
                };
                let at = now + delay;
                tracing::debug!(url = %self.url, tier = ?next.tier, size = next.current_size, "icon retry scheduled");
                self.pending = Some(PendingRetry { next, at });
                IconStep::RetryAt { at }
            }
            IconTransition::GiveUp { next } => {
                tracing::debug!(url = %self.url, "icon fallback chain exhausted");
                self.state = next;
                IconStep::GaveUp
            }
            IconTransition::Exhausted => IconStep::Ignored,
        }
    }

    /// When the pending retry becomes due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.at)
    }

    /// Release a due retry and return the new source to load.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        if self.torn_down {
            return None;
        }
        let due = self.pending.as_ref().is_some_and(|p| now >= p.at);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        self.state = pending.next;
        self.src = src_for(&self.state, &self.url, &self.color, &self.cfg);
        self.requests += 1;
        Some(&self.src)
    }

    /// Cancel any pending retry. The loader ignores everything afterwards.
    pub fn teardown(&mut self) {
        self.pending = None;
        self.torn_down = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/icon/fallback.rs"]
mod tests;
