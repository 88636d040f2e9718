// Domain models - Core types and data structures

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Zero-padding width of numbered output frames (`%08d.png`)
pub const PADDING_INPUT_FRAMES: usize = 8;

/// Trims starting after this many seconds use a coarse input-side seek
pub const FAST_SEEK_THRESHOLD_SECS: i64 = 180;

/// Scene detection only needs a thumbnail-sized picture
pub const SCENE_DETECT_SIZE: FrameSize = FrameSize {
    width: 256,
    height: 144,
};

/// Trim window in whole seconds, snapshotted per extraction call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TrimWindow {
    pub enabled: bool,
    pub start_seconds: i64,
    pub end_seconds: i64,
    pub has_end: bool,
}

impl TrimWindow {
    /// Create a validated trim window
    pub fn new(
        enabled: bool,
        start_seconds: i64,
        end_seconds: Option<i64>,
    ) -> Result<Self, DomainError> {
        if start_seconds < 0 {
            return Err(DomainError::InvalidWindow(format!(
                "start ({}s) cannot be negative",
                start_seconds
            )));
        }

        if let Some(end) = end_seconds {
            if end < start_seconds {
                return Err(DomainError::InvalidWindow(format!(
                    "end ({}s) is before start ({}s)",
                    end, start_seconds
                )));
            }
        }

        Ok(Self {
            enabled,
            start_seconds,
            end_seconds: end_seconds.unwrap_or(0),
            has_end: end_seconds.is_some(),
        })
    }

    /// Trimming switched off
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Length of the window, if it is bounded
    pub fn duration_seconds(&self) -> Option<i64> {
        self.has_end.then(|| self.end_seconds - self.start_seconds)
    }
}

/// Output frame dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of 0 or 1 mean "keep the source size"
    pub fn is_specified(&self) -> bool {
        self.width > 1 && self.height > 1
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for FrameSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .trim()
            .split_once(&['x', 'X'][..])
            .ok_or_else(|| DomainError::BadArgs(format!("Invalid frame size: {}", s)))?;

        let width = width
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid frame width: {}", width)))?;
        let height = height
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid frame height: {}", height)))?;

        Ok(Self { width, height })
    }
}

/// mpdecimate preset used when deduplication is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupeMode {
    #[default]
    Default,
    Aggressive,
}

impl DedupeMode {
    /// Map the integer selector stored in configuration
    pub fn from_selector(selector: i64) -> Self {
        match selector {
            0 => DedupeMode::Default,
            _ => DedupeMode::Aggressive,
        }
    }

    pub fn filter(&self) -> &'static str {
        match self {
            DedupeMode::Default => "mpdecimate",
            DedupeMode::Aggressive => "mpdecimate=hi=64*32:lo=64*32:frac=0.1",
        }
    }
}

/// Configuration snapshot read once at the start of every extraction call
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    /// Scene score above which a frame counts as a cut (0.0 - 1.0)
    pub scene_sensitivity: f32,
    pub dedupe_mode: DedupeMode,
    /// Output dimensions are padded up to a multiple of this value
    pub pad_multiple: u32,
    /// PNG compression level
    pub compression_level: u8,
    /// Directory that receives the per-call concat manifests
    pub data_dir: PathBuf,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            scene_sensitivity: 0.2,
            dedupe_mode: DedupeMode::Default,
            pad_multiple: 2,
            compression_level: 3,
            data_dir: std::env::temp_dir().join("framex"),
        }
    }
}

impl ExtractionSettings {
    /// Pad filter rounding both dimensions up to `pad_multiple`, if padding is enabled
    pub fn pad_filter(&self) -> Option<String> {
        if self.pad_multiple <= 1 {
            return None;
        }
        let m = self.pad_multiple;
        Some(format!(
            "pad=width=ceil(iw/{m})*{m}:height=ceil(ih/{m})*{m}:color=black@0"
        ))
    }
}

/// What an extraction call produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Every frame of a video into a numbered PNG sequence
    FramesFromVideo,
    /// Only frames that start a new scene
    SceneChanges { input_is_frames: bool },
    /// A directory of images re-encoded into a numbered PNG sequence
    ImageImport,
    /// One image converted to another format
    SingleImage,
    /// Frame `frame_number` of a video
    SingleFrame { frame_number: u64 },
    /// The final frame of a video
    LastFrame,
}

impl ExtractionMode {
    /// Short name used for manifest files and log fields
    pub fn tag(&self) -> &'static str {
        match self {
            ExtractionMode::FramesFromVideo => "frames",
            ExtractionMode::SceneChanges { .. } => "scndetect",
            ExtractionMode::ImageImport => "import",
            ExtractionMode::SingleImage => "image",
            ExtractionMode::SingleFrame { .. } => "frame",
            ExtractionMode::LastFrame => "last-frame",
        }
    }

    /// Modes that read a directory of stills through a concat manifest
    pub fn uses_manifest(&self) -> bool {
        matches!(
            self,
            ExtractionMode::ImageImport | ExtractionMode::SceneChanges { input_is_frames: true }
        )
    }

    /// Modes that write a numbered sequence into an output directory
    pub fn writes_sequence(&self) -> bool {
        matches!(
            self,
            ExtractionMode::FramesFromVideo
                | ExtractionMode::SceneChanges { .. }
                | ExtractionMode::ImageImport
        )
    }
}

/// One extraction call
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub mode: ExtractionMode,
    /// Video file, image file, or frames directory depending on the mode
    pub input_path: PathBuf,
    /// Output directory for sequences, output file for single-frame modes
    pub output_path: PathBuf,
    pub frame_rate: Option<f32>,
    pub size: Option<FrameSize>,
    pub alpha: bool,
    pub dedupe: bool,
    pub delete_source: bool,
    pub tolerate_engine_errors: bool,
    /// Caller's estimate of how many frames the input holds
    pub expected_input_frames: Option<usize>,
    pub trim: TrimWindow,
}

impl ExtractionRequest {
    /// Create a request with every modifier switched off
    pub fn new(
        mode: ExtractionMode,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let input_path = input_path.into();
        let output_path = output_path.into();

        if input_path.as_os_str().is_empty() {
            return Err(DomainError::BadArgs("Input path cannot be empty".to_string()));
        }
        if output_path.as_os_str().is_empty() {
            return Err(DomainError::BadArgs("Output path cannot be empty".to_string()));
        }

        Ok(Self {
            mode,
            input_path,
            output_path,
            frame_rate: None,
            size: None,
            alpha: false,
            dedupe: false,
            delete_source: false,
            tolerate_engine_errors: false,
            expected_input_frames: None,
            trim: TrimWindow::disabled(),
        })
    }

    pub fn with_frame_rate(mut self, rate: f32) -> Self {
        self.frame_rate = Some(rate);
        self
    }

    pub fn with_size(mut self, size: FrameSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn with_delete_source(mut self, delete_source: bool) -> Self {
        self.delete_source = delete_source;
        self
    }

    pub fn with_tolerate_engine_errors(mut self, tolerate: bool) -> Self {
        self.tolerate_engine_errors = tolerate;
        self
    }

    pub fn with_expected_input_frames(mut self, frames: usize) -> Self {
        self.expected_input_frames = Some(frames);
        self
    }

    pub fn with_trim(mut self, trim: TrimWindow) -> Self {
        self.trim = trim;
        self
    }

    /// Rate to force on the output, ignoring non-positive values
    pub fn effective_frame_rate(&self) -> Option<f32> {
        self.frame_rate.filter(|rate| *rate > 0.0)
    }

    /// Size to scale to, ignoring placeholder dimensions
    pub fn effective_size(&self) -> Option<FrameSize> {
        self.size.filter(FrameSize::is_specified)
    }
}

/// Still-image encoding picked from an output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StillFormat {
    /// `.png`, lossless RGB
    Png,
    /// Anything else, YUV 4:2:0 full range
    Lossy,
}

impl StillFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_png = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("png"))
            .unwrap_or(false);

        if is_png {
            StillFormat::Png
        } else {
            StillFormat::Lossy
        }
    }
}

/// How much of the engine's live output gets logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogMode {
    /// Progress collapsed to the most recent line
    OnlyLastLine,
    /// Nothing while running, only a final summary
    Hidden,
}

/// Severity filter passed to the engine's `-loglevel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineLogLevel {
    Warning,
    Panic,
}

impl EngineLogLevel {
    pub fn as_arg(&self) -> &'static str {
        match self {
            EngineLogLevel::Warning => "warning",
            EngineLogLevel::Panic => "panic",
        }
    }
}

/// A fully composed engine call
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub log_mode: LogMode,
    pub log_level: EngineLogLevel,
    /// Operation tag attached to log output
    pub task: ExtractionMode,
    /// Treat a non-zero exit as a warning instead of a failure
    pub allow_nonzero_exit: bool,
}

impl Invocation {
    /// Arguments joined with spaces, for logging only
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

/// Result of one engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineExit {
    pub code: Option<i32>,
    pub success: bool,
    /// Last line the engine printed, if any
    pub last_line: Option<String>,
}

/// Outcome of an extraction call, counted after the engine finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputReport {
    pub mode: ExtractionMode,
    pub produced_count: usize,
    /// False when the call was suppressed before reaching the engine
    pub invoked: bool,
    pub output_path: PathBuf,
}

impl OutputReport {
    /// Report for a call that never reached the engine
    pub fn skipped(mode: ExtractionMode, output_path: PathBuf) -> Self {
        Self {
            mode,
            produced_count: 0,
            invoked: false,
            output_path,
        }
    }
}

#[cfg(test)]
mod tests;
