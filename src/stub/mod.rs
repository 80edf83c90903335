//! Virtual file tree model.
//!
//! Tutorial content arrives from the playground's content server as a flat
//! JSON list of file and directory stubs. Directories carry no contents and
//! exist only so the editor can render the tree.

mod map;

pub use map::StubMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// FileStub
// ============================================================================

/// One entry of the virtual project tree.
///
/// `path` is the unique key within the tree; re-inserting an existing path
/// replaces the entry, never duplicates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileStub {
    /// A real file with editable contents.
    File { path: String, contents: String },
    /// A structural entry, never forwarded to the engine.
    Directory { path: String },
}

impl FileStub {
    /// Create a file stub.
    pub fn file(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Create a directory stub.
    pub fn directory(path: impl Into<String>) -> Self {
        Self::Directory { path: path.into() }
    }

    /// Unique key within the tree.
    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Directory { path } => path,
        }
    }

    /// Final path segment, as shown in the editor tree.
    pub fn basename(&self) -> &str {
        self.path().rsplit('/').next().unwrap_or_default()
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// Parse a JSON stub list as emitted by the content server.
pub fn parse_stubs(json: &str) -> Result<Vec<FileStub>, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        let stub = FileStub::file("/src/lib/App.svelte", "");
        assert_eq!(stub.basename(), "App.svelte");

        let dir = FileStub::directory("/src/lib");
        assert_eq!(dir.basename(), "lib");
    }

    #[test]
    fn test_parse_stubs() {
        let json = r#"[
            { "type": "directory", "path": "/src/lib" },
            { "type": "file", "path": "/src/lib/App.svelte", "contents": "<h1>hi</h1>" }
        ]"#;

        let stubs = parse_stubs(json).unwrap();
        assert_eq!(stubs.len(), 2);
        assert!(!stubs[0].is_file());
        assert_eq!(stubs[1].path(), "/src/lib/App.svelte");
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let json = r#"[{ "type": "symlink", "path": "/x" }]"#;
        assert!(parse_stubs(json).is_err());
    }
}
