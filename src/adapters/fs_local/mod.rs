// Local filesystem adapter - Directory listing and file operations

use crate::domain::errors::*;
use crate::ports::*;
use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }

    fn require_directory(dir: &Path) -> Result<(), DomainError> {
        if dir.is_dir() {
            Ok(())
        } else {
            Err(DomainError::DirectoryUnavailable(format!(
                "Directory does not exist: {}",
                dir.display()
            )))
        }
    }

    /// Case-insensitive file name pattern, `None` matching everything
    fn name_pattern(pattern: Option<&str>) -> Result<Option<Pattern>, DomainError> {
        pattern
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| {
                    DomainError::BadArgs(format!("Invalid file pattern {}: {}", pattern, e))
                })
            })
            .transpose()
    }

    fn walk(dir: &Path, recursive: bool) -> WalkDir {
        let walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
        if recursive {
            walker
        } else {
            walker.max_depth(1)
        }
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn list_files_sorted(&self, dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
        Self::require_directory(dir)?;

        // Listed paths outlive the caller's working directory, e.g. in a concat manifest
        let dir = std::path::absolute(dir).map_err(|e| {
            DomainError::DirectoryUnavailable(format!(
                "Failed to resolve {}: {}",
                dir.display(),
                e
            ))
        })?;

        Self::walk(&dir, false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(DomainError::DirectoryUnavailable(format!(
                    "Failed to list {}: {}",
                    dir.display(),
                    e
                )))),
            })
            .collect()
    }

    async fn count_files(
        &self,
        dir: &Path,
        recursive: bool,
        pattern: Option<&str>,
    ) -> Result<usize, DomainError> {
        Self::require_directory(dir)?;
        let pattern = Self::name_pattern(pattern)?;
        let options = MatchOptions {
            case_sensitive: false,
            ..Default::default()
        };

        let count = Self::walk(dir, recursive)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| match &pattern {
                Some(pattern) => {
                    pattern.matches_with(&entry.file_name().to_string_lossy(), options)
                }
                None => true,
            })
            .count();

        Ok(count)
    }

    async fn path_exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(path.exists())
    }

    async fn is_directory(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(path.is_dir())
    }

    async fn create_directory(&self, dir: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir).await.map_err(|e| {
            DomainError::DirectoryUnavailable(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.create_directory(parent).await?;
        }

        fs::write(path, content).await.map_err(|e| {
            DomainError::DirectoryUnavailable(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            ))
        })
    }

    async fn delete_path(&self, path: &Path) -> Result<(), DomainError> {
        let result = if path.is_dir() {
            fs::remove_dir_all(path).await
        } else {
            fs::remove_file(path).await
        };

        result.map_err(|e| {
            DomainError::InternalError(format!("Failed to delete {}: {}", path.display(), e))
        })
    }
}
