//! Debounced, jitter-filtered container size publisher.
//!
//! Time is explicit: the host event loop reports sizes through [`ResizeSynchronizer::on_resize`]
//! and drives the debounce with [`ResizeSynchronizer::poll`], using
//! [`ResizeSynchronizer::next_deadline`] to know when to wake up.
//!
//! # Invariants
//!
//! - Reports within `jitter_px` of the last accepted size on both axes are dropped.
//! - Only the latest accepted size in a debounce window is published (latest wins).
//! - Nothing is published after [`ResizeSynchronizer::teardown`].

use std::time::{Duration, Instant};

use crate::{config::engine::ResizeConfig, foundation::core::PixelSize};

/// Whether the runtime offers a size observation primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserverSupport {
    /// Sizes will be reported.
    Available,
    /// Nothing will be reported.
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ObserverState {
    Observing,
    /// No observation primitive; every call is a no-op.
    Inert,
    TornDown,
}

/// Outcome of a single size report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeDecision {
    /// Accepted; will publish at `deadline` unless superseded.
    Scheduled {
        /// When the size publishes.
        deadline: Instant,
    },
    /// Within the jitter tolerance of the last accepted size.
    Jitter,
    /// Synchronizer is inert or torn down.
    Inactive,
}

#[derive(Clone, Copy, Debug)]
struct PendingResize {
    size: PixelSize,
    deadline: Instant,
}

/// Debounces container size reports and publishes settled sizes through a callback.
pub struct ResizeSynchronizer<F>
where
    F: FnMut(PixelSize),
{
    debounce: Duration,
    jitter_px: u32,
    state: ObserverState,
    last_accepted: Option<PixelSize>,
    last_published: Option<PixelSize>,
    pending: Option<PendingResize>,
    publish: F,
}

impl<F> ResizeSynchronizer<F>
where
    F: FnMut(PixelSize),
{
    /// Start observing. With [`ObserverSupport::Unavailable`] the synchronizer is inert.
    pub fn observe(support: ObserverSupport, cfg: &ResizeConfig, publish: F) -> Self {
        let state = match support {
            ObserverSupport::Available => ObserverState::Observing,
            ObserverSupport::Unavailable => {
                tracing::warn!("resize observation unavailable, container sync disabled");
                ObserverState::Inert
            }
        };
        Self {
            debounce: cfg.debounce(),
            jitter_px: cfg.jitter_px,
            state,
            last_accepted: None,
            last_published: None,
            pending: None,
            publish,
        }
    }

    /// False when inert or torn down.
    pub fn is_observing(&self) -> bool {
        self.state == ObserverState::Observing
    }

    /// Most recent size handed to the callback.
    pub fn last_published(&self) -> Option<PixelSize> {
        self.last_published
    }

    /// Report a content-box size.
    pub fn on_resize(&mut self, width: f64, height: f64, now: Instant) -> ResizeDecision {
        if self.state != ObserverState::Observing {
            return ResizeDecision::Inactive;
        }
        let size = PixelSize::from_f64(width, height);
        if let Some(prev) = self.last_accepted
            && size.within(prev, self.jitter_px)
        {
            tracing::trace!(?size, ?prev, "resize within jitter tolerance");
            return ResizeDecision::Jitter;
        }
        self.last_accepted = Some(size);
        let deadline = now + self.debounce;
        self.pending = Some(PendingResize { size, deadline });
        ResizeDecision::Scheduled { deadline }
    }

    /// When the host should call [`Self::poll`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Publish the pending size if its debounce window has elapsed. Returns what was published.
    pub fn poll(&mut self, now: Instant) -> Option<PixelSize> {
        if self.state != ObserverState::Observing {
            return None;
        }
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        if self.last_published == Some(pending.size) {
            return None;
        }
        self.last_published = Some(pending.size);
        tracing::debug!(
            width = pending.size.width,
            height = pending.size.height,
            "publishing container size"
        );
        (self.publish)(pending.size);
        Some(pending.size)
    }

    /// Stop observing and drop the pending debounce. Idempotent.
    pub fn teardown(&mut self) {
        self.pending = None;
        if self.state == ObserverState::Observing {
            self.state = ObserverState::TornDown;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/resize.rs"]
mod tests;
