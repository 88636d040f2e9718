//! Concat manifest generation
//!
//! Feeds a directory of stills to the engine's concat demuxer as if it were a
//! video stream. Line order is playback order, so listing must be deterministic.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::model::ExtractionMode;
use crate::ports::FsPort;
use crate::utils::path::PathUtils;

/// A rendered concat manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Normalized paths in playback order
    pub entries: Vec<String>,
    /// File content, one `file '<path>'` line per entry
    pub text: String,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds concat manifests from a directory listing
pub struct PathManifestBuilder;

impl PathManifestBuilder {
    /// Render a manifest for `files`, keeping their order
    pub fn render(files: &[PathBuf]) -> Manifest {
        let entries: Vec<String> = files
            .iter()
            .map(|file| PathUtils::to_forward_slashes(file))
            .collect();

        let text = entries
            .iter()
            .map(|entry| format!("file {}\n", PathUtils::concat_quote(entry)))
            .collect();

        Manifest { entries, text }
    }

    /// List `input_dir` in sorted order and write its manifest to `manifest_path`,
    /// replacing any previous content
    pub async fn write(
        fs: &dyn FsPort,
        input_dir: &Path,
        manifest_path: &Path,
    ) -> Result<Manifest, DomainError> {
        let files = fs.list_files_sorted(input_dir).await?;
        let manifest = Self::render(&files);

        fs.write_text(manifest_path, &manifest.text).await?;

        debug!(
            input = %input_dir.display(),
            manifest = %manifest_path.display(),
            entries = manifest.len(),
            "Wrote concat manifest"
        );

        Ok(manifest)
    }

    /// Manifest location unique to one call of `mode`
    pub fn unique_path(data_dir: &Path, mode: &ExtractionMode) -> PathBuf {
        data_dir.join(format!("{}-concat-{}.ini", mode.tag(), Uuid::new_v4()))
    }
}
