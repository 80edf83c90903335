//! Error types for the coordinator.

use thiserror::Error;

// ============================================================================
// BundleError
// ============================================================================

/// Errors surfaced to callers of `reset`/`update`.
///
/// A failed compile is reported only to the caller whose turn triggered it;
/// the snapshot mutation for that turn has already been applied and persists.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The bundling engine rejected the submitted file set.
    ///
    /// Carries the engine's message verbatim. Never retried by the
    /// coordinator; resubmission policy belongs to the caller.
    #[error("bundle failed: {0}")]
    Compile(String),

    /// The adapter was destroyed while this request was queued or in flight.
    #[error("adapter is shut down")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BundleError::Compile("unexpected token in App.svelte".into());
        assert_eq!(
            format!("{err}"),
            "bundle failed: unexpected token in App.svelte"
        );

        let err = BundleError::Closed;
        assert_eq!(format!("{err}"), "adapter is shut down");
    }
}
