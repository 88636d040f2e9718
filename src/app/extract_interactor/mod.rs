// Extract interactor - Orchestrates one extraction call end to end

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::builder::{EngineInput, ExtractionArgumentBuilder};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::manifest::PathManifestBuilder;
use crate::ports::*;
use crate::utils::time::TimeParser;
use crate::utils::Utils;

/// File written when a last-frame request points at a directory
pub const LAST_FRAME_FILE_NAME: &str = "last.png";

/// Interactor for every extraction mode
pub struct ExtractInteractor {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    config_port: Arc<dyn ConfigPort>,
    log_port: Arc<dyn LogPort>,
}

/// Engine input resolved for one call, plus the manifest to clean up afterwards
struct PreparedInput {
    input: EngineInput,
    manifest_path: Option<PathBuf>,
    input_count: usize,
}

impl ExtractInteractor {
    /// Create new extract interactor with injected ports
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        config_port: Arc<dyn ConfigPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            execute_port,
            fs_port,
            config_port,
            log_port,
        }
    }

    /// Run one extraction and report what it produced
    pub async fn run(&self, request: ExtractionRequest) -> Result<OutputReport, DomainError> {
        let started = Instant::now();
        let settings = ExtractionSettings::load(self.config_port.as_ref()).await?;

        if ExtractionArgumentBuilder::is_suppressed(&request) {
            self.log_port
                .debug("Skipping last-frame extraction because trimming is enabled")
                .await;
            return Ok(OutputReport::skipped(request.mode, request.output_path));
        }

        let mut request = request;
        request.output_path = self.resolve_output_path(&request).await?;

        self.log_port
            .info(&format!(
                "Starting {} extraction: {} -> {}",
                request.mode.tag(),
                request.input_path.display(),
                request.output_path.display()
            ))
            .await;

        if request.trim.enabled {
            let end = match request.trim.duration_seconds() {
                Some(_) => TimeParser::format_hms(request.trim.end_seconds),
                None => "end".to_string(),
            };
            self.log_port
                .info(&format!(
                    "Trimming {} to {}",
                    TimeParser::format_hms(request.trim.start_seconds),
                    end
                ))
                .await;
        }

        self.ensure_input(&request).await?;
        self.ensure_output_location(&request).await?;

        let prepared = self.prepare_input(&request, &settings).await?;
        let outcome = self.invoke(&request, &settings, &prepared).await;

        if let Some(manifest_path) = &prepared.manifest_path {
            if let Err(e) = self.fs_port.delete_path(manifest_path).await {
                self.log_port
                    .warn(&format!("Failed to remove concat manifest: {}", e))
                    .await;
            }
        }

        let exit = outcome?;
        let produced_count = self.count_outputs(&request).await?;

        self.log_port
            .info(&OutputSummary::describe(&request.mode, produced_count))
            .await;

        if request.delete_source && exit.success {
            self.fs_port.delete_path(&request.input_path).await?;
            self.log_port
                .info(&format!("Deleted source {}", request.input_path.display()))
                .await;
        }

        self.log_port
            .debug(&format!(
                "{} finished in {}",
                request.mode.tag(),
                Utils::format_duration(started.elapsed())
            ))
            .await;

        Ok(OutputReport {
            mode: request.mode,
            produced_count,
            invoked: true,
            output_path: request.output_path,
        })
    }

    /// A last-frame request aimed at a directory writes `last.png` inside it
    async fn resolve_output_path(&self, request: &ExtractionRequest) -> Result<PathBuf, DomainError> {
        if matches!(request.mode, ExtractionMode::LastFrame)
            && self.fs_port.is_directory(&request.output_path).await?
        {
            return Ok(request.output_path.join(LAST_FRAME_FILE_NAME));
        }
        Ok(request.output_path.clone())
    }

    async fn ensure_input(&self, request: &ExtractionRequest) -> Result<(), DomainError> {
        let available = if request.mode.uses_manifest() {
            self.fs_port.is_directory(&request.input_path).await?
        } else {
            self.fs_port.path_exists(&request.input_path).await?
        };

        if !available {
            return Err(DomainError::DirectoryUnavailable(format!(
                "Input does not exist: {}",
                request.input_path.display()
            )));
        }
        Ok(())
    }

    async fn ensure_output_location(&self, request: &ExtractionRequest) -> Result<(), DomainError> {
        if request.mode.writes_sequence() {
            return self.fs_port.create_directory(&request.output_path).await;
        }

        match request.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.fs_port.create_directory(parent).await
            }
            _ => Ok(()),
        }
    }

    async fn prepare_input(
        &self,
        request: &ExtractionRequest,
        settings: &ExtractionSettings,
    ) -> Result<PreparedInput, DomainError> {
        if !request.mode.uses_manifest() {
            return Ok(PreparedInput {
                input: EngineInput::File(request.input_path.clone()),
                manifest_path: None,
                input_count: request.expected_input_frames.unwrap_or(0),
            });
        }

        let manifest_path = PathManifestBuilder::unique_path(&settings.data_dir, &request.mode);
        let manifest =
            PathManifestBuilder::write(self.fs_port.as_ref(), &request.input_path, &manifest_path)
                .await?;

        self.log_port
            .debug(&format!(
                "Concat manifest {} lists {} files",
                manifest_path.display(),
                manifest.len()
            ))
            .await;

        Ok(PreparedInput {
            input: EngineInput::Concat(manifest_path.clone()),
            manifest_path: Some(manifest_path),
            input_count: manifest.len(),
        })
    }

    async fn invoke(
        &self,
        request: &ExtractionRequest,
        settings: &ExtractionSettings,
        prepared: &PreparedInput,
    ) -> Result<EngineExit, DomainError> {
        let args = ExtractionArgumentBuilder::new(settings)
            .build(request, &prepared.input)
            .ok_or_else(|| {
                DomainError::InternalError(format!(
                    "No engine arguments for {} request",
                    request.mode.tag()
                ))
            })?;

        let invocation = Invocation {
            args,
            log_mode: LogVerbosityPolicy::for_input_count(prepared.input_count),
            log_level: EngineSeverityPolicy::for_mode(&request.mode),
            task: request.mode,
            allow_nonzero_exit: request.tolerate_engine_errors,
        };

        self.log_port
            .debug(&format!("ffmpeg {}", invocation.command_line()))
            .await;

        self.execute_port.run(&invocation).await
    }

    async fn count_outputs(&self, request: &ExtractionRequest) -> Result<usize, DomainError> {
        if request.mode.writes_sequence() {
            return self
                .fs_port
                .count_files(&request.output_path, false, Some("*.png"))
                .await;
        }

        Ok(usize::from(self.single_output_exists(&request.output_path).await?))
    }

    async fn single_output_exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(self.fs_port.path_exists(path).await? && !self.fs_port.is_directory(path).await?)
    }
}
