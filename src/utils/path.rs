//! Path utilities for manifest and output handling

use std::path::Path;

/// Path utilities shared by the manifest builder and filesystem adapter
pub struct PathUtils;

impl PathUtils {
    /// Normalize path separators to forward slashes
    pub fn to_forward_slashes(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }

    /// Quote a path for a concat-demuxer `file` directive.
    ///
    /// Embedded single quotes close the quoted string, emit an escaped quote and reopen it.
    pub fn concat_quote(path: &str) -> String {
        format!("'{}'", path.replace('\'', r"'\''"))
    }
}
