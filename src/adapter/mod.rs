//! Incremental Rebuild Coordinator.
//!
//! Owns the mutable file snapshot, a progress observable and the last-good
//! build artifact. The two mutation entry points (`reset`, `update`) are
//! serialized behind a single-worker queue together with the compile each
//! one triggers, so no two compiles ever run concurrently and every compile
//! observes the snapshot exactly as of its own turn.
//!
//! # Module Structure
//!
//! - `filter` - source-subtree selection and prefix stripping
//! - `tests` - coordinator tests against an instrumented engine

mod filter;


use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::bundler::{BuildArtifact, Bundler};
use crate::error::BundleError;
use crate::progress::{Progress, ProgressCell};
use crate::queue::TaskQueue;
use crate::stub::{FileStub, StubMap};

// ============================================================================
// AdapterOptions
// ============================================================================

/// Coordinator configuration.
///
/// Engine-specific knobs (package registry URL, compiler version) belong to
/// the concrete [`Bundler`], not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    /// Virtual subtree whose files are forwarded to the engine. Everything
    /// outside it (routes, configs, structural entries) is editor-only.
    pub source_root: String,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            source_root: "/src/lib".into(),
        }
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// State shared between the adapter handle and its queue turns.
struct Shared<B> {
    bundler: B,
    snapshot: Mutex<StubMap>,
    artifact: ArcSwapOption<BuildArtifact>,
    progress: ProgressCell,
    /// Set once, by the ready observer.
    ready: AtomicBool,
    options: AdapterOptions,
}

/// The coordinator: serializes file-tree mutations and compiles.
///
/// Exactly one adapter should be live per playground session; pass the
/// previous instance to [`Adapter::create`] so its teardown is awaited
/// before the replacement accepts requests.
pub struct Adapter<B: Bundler> {
    shared: Arc<Shared<B>>,
    queue: TaskQueue,
    ready_observer: JoinHandle<()>,
}

impl<B: Bundler> Adapter<B> {
    /// Create an adapter with default options.
    pub async fn create(bundler: B, previous: Option<Self>) -> Self {
        Self::create_with_options(bundler, AdapterOptions::default(), previous).await
    }

    /// Create an adapter, tearing down `previous` first.
    ///
    /// The previous instance's admitted turns all settle and its engine is
    /// released before the new instance is considered live.
    pub async fn create_with_options(
        bundler: B,
        options: AdapterOptions,
        previous: Option<Self>,
    ) -> Self {
        if let Some(previous) = previous {
            previous.destroy().await;
        }

        let progress = ProgressCell::new();
        progress.set(0.0, "loading files");

        let shared = Arc::new(Shared {
            bundler,
            snapshot: Mutex::new(StubMap::new()),
            artifact: ArcSwapOption::empty(),
            progress,
            ready: AtomicBool::new(false),
            options,
        });

        shared.progress.set(0.5, "loading compiler");
        let ready_observer = tokio::spawn(watch_ready(Arc::clone(&shared)));

        crate::debug!("adapter"; "created, source root {}", shared.options.source_root);

        Self {
            shared,
            queue: TaskQueue::new(),
            ready_observer,
        }
    }

    /// Replace the whole snapshot, then compile.
    ///
    /// Full file-set semantics: entries absent from `stubs` are dropped.
    /// The request is admitted to the queue at call time; the returned
    /// future resolves `Ok(false)` once this request's compile has settled
    /// (the boolean carries no success signal), or the compile error.
    pub fn reset(
        &self,
        stubs: Vec<FileStub>,
    ) -> impl Future<Output = Result<bool, BundleError>> + use<B> {
        let shared = Arc::clone(&self.shared);
        let turn = self.queue.push(async move {
            *shared.snapshot.lock() = StubMap::from_stubs(stubs);
            shared.compile().await
        });
        async move { turn.await? }
    }

    /// Upsert a single entry, then compile.
    ///
    /// Same queue and settlement contract as [`Adapter::reset`].
    pub fn update(
        &self,
        stub: FileStub,
    ) -> impl Future<Output = Result<bool, BundleError>> + use<B> {
        let shared = Arc::clone(&self.shared);
        let turn = self.queue.push(async move {
            shared.snapshot.lock().insert(stub);
            shared.compile().await
        });
        async move { turn.await? }
    }

    /// Last published artifact, if any compile has succeeded yet.
    pub fn artifact(&self) -> Option<Arc<BuildArtifact>> {
        self.shared.artifact.load_full()
    }

    /// Current progress value.
    pub fn progress(&self) -> Progress {
        self.shared.progress.get()
    }

    /// Subscribe to progress changes.
    pub fn subscribe_progress(&self) -> watch::Receiver<Progress> {
        self.shared.progress.subscribe()
    }

    /// Ordered copy of the current snapshot, for editor trees.
    pub fn stubs(&self) -> Vec<FileStub> {
        self.shared.snapshot.lock().iter().cloned().collect()
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.shared.options
    }

    /// Drain admitted turns, then release the engine.
    pub async fn destroy(self) {
        crate::debug!("adapter"; "shutting down");
        self.queue.shutdown().await;
        self.ready_observer.abort();
        self.shared.bundler.destroy().await;
    }
}

// ============================================================================
// Compile turn
// ============================================================================

impl<B: Bundler> Shared<B> {
    /// One compile against the snapshot as of the current queue turn.
    async fn compile(&self) -> Result<bool, BundleError> {
        let sources = {
            let snapshot = self.snapshot.lock();
            filter::sources_for(&snapshot, &self.options.source_root)
        };

        // After the initial ready transition, every turn reports itself;
        // the label returns to ready on settlement whether the compile
        // succeeded or not, since the last-good artifact keeps serving.
        if self.ready.load(Ordering::SeqCst) {
            self.progress.set(0.0, "rebuilding");
        }

        crate::debug!("bundle"; "compiling {} sources", sources.len());
        let result = self.bundler.bundle(sources).await;

        if self.ready.load(Ordering::SeqCst) {
            self.progress.set(1.0, "ready");
        }

        match result {
            Ok(artifact) => {
                self.artifact.store(Some(Arc::new(artifact)));
                Ok(false)
            }
            Err(err) => {
                crate::debug!("bundle"; "failed: {}", err);
                Err(err)
            }
        }
    }
}

/// One-time ready observer: the first idle signal from the engine flips
/// progress to `(1, ready)`, then the observer exits, so later idle signals
/// cannot re-fire the transition.
async fn watch_ready<B: Bundler>(shared: Arc<Shared<B>>) {
    let mut status = shared.bundler.status();
    loop {
        if status.borrow_and_update().is_none() {
            shared.ready.store(true, Ordering::SeqCst);
            shared.progress.set(1.0, "ready");
            crate::debug!("adapter"; "engine ready");
            return;
        }
        if status.changed().await.is_err() {
            return;
        }
    }
}
