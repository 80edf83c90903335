//! Contract for the external bundling engine.
//!
//! The engine is a black box with unspecified latency: it takes an ordered
//! list of project-relative sources and either produces a runnable artifact
//! or fails. It also exposes a status channel the adapter observes once at
//! construction to detect the first idle transition.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::BundleError;

// ============================================================================
// Wire types
// ============================================================================

/// A single file handed to the engine, path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Result of a successful compile, opaque to the coordinator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildArtifact {
    /// Bundled module code, ready for the playground iframe.
    pub code: String,
    pub source_map: Option<String>,
    pub warnings: Vec<String>,
}

/// Engine status notification: `Some(label)` while working (fetching
/// packages, initialising workers), `None` once idle.
pub type EnginePhase = Option<String>;

// ============================================================================
// Bundler
// ============================================================================

/// The external bundling engine.
///
/// Futures are `Send` so turns can run on the adapter's queue worker.
pub trait Bundler: Send + Sync + 'static {
    /// Bundle the given sources into an artifact.
    ///
    /// Invoked at most once at a time per adapter; the queue guarantees no
    /// concurrent calls.
    fn bundle(
        &self,
        sources: Vec<SourceFile>,
    ) -> impl Future<Output = Result<BuildArtifact, BundleError>> + Send;

    /// Status channel; yields `None` whenever the engine goes idle.
    fn status(&self) -> watch::Receiver<EnginePhase>;

    /// Release engine resources.
    ///
    /// Called exactly once, after the adapter's queue has drained and before
    /// any replacement instance is considered live.
    fn destroy(&self) -> impl Future<Output = ()> + Send;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_json_shape() {
        let file = SourceFile::new("/App.svelte", "<h1>hi</h1>");
        let json = serde_json::to_string(&file).unwrap();
        assert_eq!(json, r#"{"path":"/App.svelte","contents":"<h1>hi</h1>"}"#);
    }

    #[test]
    fn test_artifact_default_is_empty() {
        let artifact = BuildArtifact::default();
        assert!(artifact.code.is_empty());
        assert!(artifact.source_map.is_none());
        assert!(artifact.warnings.is_empty());
    }
}
