//! Incremental bundling coordinator for the in-browser tutorial playground.
//!
//! The playground keeps a virtual file tree per tutorial step and needs a
//! runnable bundle after every edit. This crate serializes those edits:
//!
//! ```text
//! caller --reset/update--> Adapter --queue(1)--> Bundler engine
//!                         (snapshot)             (bundle)
//! ```
//!
//! Every mutation and the compile it triggers run inside one queue turn, so
//! compiles observe a strictly ordered sequence of file sets and the
//! published artifact always belongs to the most recently settled turn.
//!
//! # Module Structure
//!
//! - `adapter` - the coordinator: snapshot ownership, turn scheduling
//! - `bundler` - contract for the external bundling engine
//! - `stub` - virtual file tree model and ordered snapshot map
//! - `queue` - single-worker FIFO task queue
//! - `progress` - observable progress reporting
//! - `error` - error taxonomy
//! - `logger` - colored log macros

pub mod adapter;
pub mod bundler;
pub mod error;
pub mod logger;
pub mod progress;
pub mod queue;
pub mod stub;

pub use adapter::{Adapter, AdapterOptions};
pub use bundler::{BuildArtifact, Bundler, EnginePhase, SourceFile};
pub use error::BundleError;
pub use progress::{Progress, ProgressCell};
pub use queue::TaskQueue;
pub use stub::{FileStub, StubMap};
