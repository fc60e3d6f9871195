//! Failure isolation for one rendered section.
//!
//! A [`RenderBoundary`] runs a render closure. A returned error or a panic is captured and the
//! boundary serves its fallback view until [`RenderBoundary::retry`] is called. Sibling sections
//! keep rendering.

use std::{
    fmt::Display,
    panic::{AssertUnwindSafe, catch_unwind},
};

/// A render failure and the section it happened in.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedError {
    /// Section name given to the boundary.
    pub section: &'static str,
    /// Error text or panic payload.
    pub message: String,
}

/// Whether a boundary renders its content or its fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BoundaryState {
    /// Content renders normally.
    #[default]
    Healthy,
    /// Fallback is served until retry.
    Failed(CapturedError),
}

/// Isolates failures of one section behind a fallback view.
#[derive(Clone, Debug)]
pub struct RenderBoundary<V> {
    section: &'static str,
    fallback: V,
    state: BoundaryState,
}

impl<V: Clone> RenderBoundary<V> {
    /// Healthy boundary for `section` that serves `fallback` after a failure.
    pub fn new(section: &'static str, fallback: V) -> Self {
        Self {
            section,
            fallback,
            state: BoundaryState::Healthy,
        }
    }

    /// Section name used in logs and captured errors.
    pub fn section(&self) -> &'static str {
        self.section
    }

    /// Current state.
    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    /// Captured error while failed.
    pub fn error(&self) -> Option<&CapturedError> {
        match &self.state {
            BoundaryState::Healthy => None,
            BoundaryState::Failed(e) => Some(e),
        }
    }

    /// True while the fallback is being served.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, BoundaryState::Failed(_))
    }

    /// Render through `f`, or serve the fallback while a captured error is pending.
    pub fn render<E, F>(&mut self, f: F) -> V
    where
        E: Display,
        F: FnOnce() -> Result<V, E>,
    {
        if self.is_failed() {
            return self.fallback.clone();
        }
        let message = match catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(view)) => return view,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        tracing::warn!(section = self.section, error = %message, "render failed; serving fallback");
        self.state = BoundaryState::Failed(CapturedError {
            section: self.section,
            message,
        });
        self.fallback.clone()
    }

    /// Clear the captured error so the next [`RenderBoundary::render`] runs the closure again.
    pub fn retry(&mut self) {
        self.state = BoundaryState::Healthy;
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/boundary.rs"]
mod tests;
