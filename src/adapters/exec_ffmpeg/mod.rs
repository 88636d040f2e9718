//! FFmpeg execution adapter
//!
//! Spawns the engine binary for one invocation and relays its stderr through
//! tracing according to the invocation's log mode.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Runs the `ffmpeg` binary as a child process
pub struct FfmpegProcessAdapter {
    binary: PathBuf,
}

impl FfmpegProcessAdapter {
    /// Create an adapter for the binary at `binary` (a bare name is looked up on `PATH`)
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Create an adapter for the binary named by the `ffmpeg_path` setting
    pub async fn from_config(config: &dyn ConfigPort) -> Result<Self, DomainError> {
        let binary = config.get_config_or_default(keys::FFMPEG_PATH, "ffmpeg").await?;
        Ok(Self::new(binary))
    }

    /// Arguments placed ahead of the invocation's own
    fn base_args(level: EngineLogLevel) -> [String; 4] {
        [
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            level.as_arg().to_string(),
            "-y".to_string(),
        ]
    }
}

#[async_trait]
impl ExecutePort for FfmpegProcessAdapter {
    async fn run(&self, invocation: &Invocation) -> Result<EngineExit, DomainError> {
        let task = invocation.task.tag();
        debug!(task, command = %invocation.command_line(), "Starting engine");

        let mut child = Command::new(&self.binary)
            .args(Self::base_args(invocation.log_level))
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::ExternalProcessFailure(format!(
                    "Failed to start {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        let mut last_line = None;
        if let Some(stderr) = child.stderr.take() {
            // Drain to EOF; a closed pipe would kill the engine on its next write
            let mut reader = BufReader::new(stderr);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!(task, "Failed to read engine output: {}", e);
                        break;
                    }
                }

                let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                if line.is_empty() {
                    continue;
                }
                if invocation.log_mode == LogMode::OnlyLastLine {
                    debug!(task, "{}", line);
                }
                last_line = Some(line);
            }
        }

        let status = child.wait().await.map_err(|e| {
            DomainError::ExternalProcessFailure(format!("Failed to wait for engine: {}", e))
        })?;

        if let (LogMode::OnlyLastLine, Some(line)) = (invocation.log_mode, &last_line) {
            info!(task, "{}", line);
        }

        let exit = EngineExit {
            code: status.code(),
            success: status.success(),
            last_line,
        };

        if !exit.success {
            let detail = exit.last_line.as_deref().unwrap_or("no output");
            if !invocation.allow_nonzero_exit {
                return Err(DomainError::ExternalProcessFailure(format!(
                    "{} exited with code {:?}: {}",
                    task, exit.code, detail
                )));
            }
            warn!(task, code = ?exit.code, "Engine exited non-zero: {}", detail);
        }

        Ok(exit)
    }
}
