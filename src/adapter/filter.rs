//! Source-subtree filtering.
//!
//! The engine expects project-root-relative paths; the snapshot stores
//! editor paths spanning the whole virtual tree.

use crate::bundler::SourceFile;
use crate::stub::{FileStub, StubMap};

/// Select the file stubs under `source_root` and rewrite their paths
/// engine-relative, preserving snapshot order.
///
/// `/src/lib/App.svelte` with root `/src/lib` forwards as `/App.svelte`.
/// Directory entries and files outside the subtree are dropped.
pub(super) fn sources_for(snapshot: &StubMap, source_root: &str) -> Vec<SourceFile> {
    let root = source_root.trim_end_matches('/');
    snapshot
        .iter()
        .filter_map(|stub| match stub {
            FileStub::File { path, contents } => {
                let rest = path.strip_prefix(root)?;
                rest.starts_with('/')
                    .then(|| SourceFile::new(rest, contents.clone()))
            }
            FileStub::Directory { .. } => None,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
