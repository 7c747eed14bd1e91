//! Source text access.
//!
//! The resolver never touches the filesystem directly; it asks a
//! [`SourceReader`] for the decoded text of a URI. Path validation and
//! containment are the reader's (or its caller's) concern.

use crate::error::{LocusError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

/// Supplies the full text of a source file given its URI.
pub trait SourceReader {
    /// Read the decoded text for `uri`.
    fn read_source(&self, uri: &str) -> impl Future<Output = io::Result<String>> + Send;
}

/// Read the text for `uri`, reporting failures as `FileAccess`.
///
/// # Errors
/// - `FileAccess` - the reader failed; kept apart from resolution failures
pub async fn read_text<R>(reader: &R, uri: &str) -> Result<String>
where
    R: SourceReader + ?Sized,
{
    reader
        .read_source(uri)
        .await
        .map_err(|source| LocusError::FileAccess {
            uri: uri.to_string(),
            source,
        })
}

/// Reads files from disk with tokio.
///
/// Accepts `file://` URIs and plain paths. Relative paths are joined to
/// `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FsSourceReader {
    root: Option<PathBuf>,
}

impl FsSourceReader {
    /// Reader resolving paths relative to the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader resolving relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        FsSourceReader {
            root: Some(root.into()),
        }
    }

    /// Map a URI to the path that would be read.
    pub fn path_for(&self, uri: &str) -> PathBuf {
        let raw = uri.strip_prefix("file://").unwrap_or(uri);
        let path = Path::new(raw);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl SourceReader for FsSourceReader {
    fn read_source(&self, uri: &str) -> impl Future<Output = io::Result<String>> + Send {
        let path = self.path_for(uri);
        async move { tokio::fs::read_to_string(path).await }
    }
}

/// In-memory sources keyed by URI.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    /// Empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the text for `uri`.
    pub fn insert(&mut self, uri: impl Into<String>, content: impl Into<String>) {
        self.files.insert(uri.into(), content.into());
    }
}

impl SourceReader for MemorySource {
    fn read_source(&self, uri: &str) -> impl Future<Output = io::Result<String>> + Send {
        let result = self.files.get(uri).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no source for {}", uri))
        });
        async move { result }
    }
}
