//! Observable progress reporting.
//!
//! The hosting UI renders a progress bar while the engine loads and a status
//! label afterwards. The adapter is the sole writer; readers either poll
//! `get` or hold a `watch` subscription.

use tokio::sync::watch;

// ============================================================================
// Progress
// ============================================================================

/// Fractional completion plus a short label.
///
/// Lifecycle over one adapter instance:
/// `(0, initialising)` → `(0, loading files)` → `(0.5, loading compiler)`
/// → `(1, ready)`, then `(0, rebuilding)` / `(1, ready)` for every compile
/// turn that runs after the first ready transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub value: f32,
    pub text: &'static str,
}

impl Progress {
    pub const fn new(value: f32, text: &'static str) -> Self {
        Self { value, text }
    }

    pub fn is_ready(&self) -> bool {
        self.text == "ready"
    }
}

// ============================================================================
// ProgressCell
// ============================================================================

/// Single-writer observable progress value.
pub struct ProgressCell {
    tx: watch::Sender<Progress>,
}

impl ProgressCell {
    /// Starts at `(0, initialising)`.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Progress::new(0.0, "initialising"));
        Self { tx }
    }

    /// Publish a new progress value.
    ///
    /// Stored even when nobody is subscribed, so polling `get` always sees
    /// the latest value.
    pub fn set(&self, value: f32, text: &'static str) {
        self.tx.send_replace(Progress::new(value, text));
    }

    /// Current value.
    pub fn get(&self) -> Progress {
        self.tx.borrow().clone()
    }

    /// Subscribe for change notifications.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.tx.subscribe()
    }
}

impl Default for ProgressCell {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
