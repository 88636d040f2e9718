// Domain rules - Business logic and policies

use crate::domain::model::*;

/// Inputs above this count get collapsed progress logging
pub const LARGE_INPUT_THRESHOLD: usize = 50;

/// Picks how much engine output to log based on the expected input volume
pub struct LogVerbosityPolicy;

impl LogVerbosityPolicy {
    pub fn for_input_count(input_count: usize) -> LogMode {
        if input_count > LARGE_INPUT_THRESHOLD {
            LogMode::OnlyLastLine
        } else {
            LogMode::Hidden
        }
    }
}

/// Engine `-loglevel` per mode
pub struct EngineSeverityPolicy;

impl EngineSeverityPolicy {
    pub fn for_mode(mode: &ExtractionMode) -> EngineLogLevel {
        match mode {
            // Concat input of mixed stills is noisy below panic
            ExtractionMode::SceneChanges {
                input_is_frames: true,
            }
            | ExtractionMode::ImageImport => EngineLogLevel::Panic,
            ExtractionMode::SceneChanges {
                input_is_frames: false,
            }
            | ExtractionMode::FramesFromVideo => EngineLogLevel::Warning,
            ExtractionMode::SingleImage
            | ExtractionMode::SingleFrame { .. }
            | ExtractionMode::LastFrame => EngineLogLevel::Warning,
        }
    }
}

/// Human-readable summary lines for finished extractions
pub struct OutputSummary;

impl OutputSummary {
    /// Summary for a finished run of `mode` that produced `count` outputs
    pub fn describe(mode: &ExtractionMode, count: usize) -> String {
        match mode {
            ExtractionMode::SceneChanges { .. } => {
                if count == 0 {
                    "Detected no scene changes.".to_string()
                } else {
                    format!(
                        "Detected {} scene {}.",
                        count,
                        Self::plural(count, "change", "changes")
                    )
                }
            }
            ExtractionMode::FramesFromVideo => format!(
                "Extracted {} {} from input.",
                count,
                Self::plural(count, "frame", "frames")
            ),
            ExtractionMode::ImageImport => format!(
                "Imported {} {}.",
                count,
                Self::plural(count, "image", "images")
            ),
            ExtractionMode::SingleImage
            | ExtractionMode::SingleFrame { .. }
            | ExtractionMode::LastFrame => {
                if count == 0 {
                    "No frame was written.".to_string()
                } else {
                    "Wrote 1 frame.".to_string()
                }
            }
        }
    }

    fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
        if count == 1 {
            singular
        } else {
            plural
        }
    }
}
