//! Engine argument composition
//!
//! Every mode is built from the same fragments (rate, trim, size, pixel format,
//! filters and output naming). The per-mode functions below only decide which
//! fragments apply and in what order.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::model::*;
use crate::planner::TrimPlanner;

/// Where the engine reads its input from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineInput {
    /// A single media file
    File(PathBuf),
    /// A concat manifest listing still images
    Concat(PathBuf),
}

impl EngineInput {
    fn args(&self) -> Vec<String> {
        match self {
            EngineInput::File(path) => vec!["-i".to_string(), path_arg(path)],
            EngineInput::Concat(manifest) => vec![
                "-f".to_string(),
                "concat".to_string(),
                "-safe".to_string(),
                "0".to_string(),
                "-i".to_string(),
                path_arg(manifest),
            ],
        }
    }
}

/// Ordered argument list under construction
#[derive(Debug, Default)]
struct ArgList(Vec<String>);

impl ArgList {
    fn flag(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.0.push(name.to_string());
        self.0.push(value.into());
        self
    }

    fn extend(&mut self, fragment: impl IntoIterator<Item = String>) -> &mut Self {
        self.0.extend(fragment);
        self
    }

    fn push(&mut self, arg: impl Into<String>) -> &mut Self {
        self.0.push(arg.into());
        self
    }

    fn finish(self) -> Vec<String> {
        self.0
    }
}

/// Composes engine arguments for every extraction mode
pub struct ExtractionArgumentBuilder<'a> {
    settings: &'a ExtractionSettings,
    planner: TrimPlanner,
}

impl<'a> ExtractionArgumentBuilder<'a> {
    /// Create a builder over one settings snapshot
    pub fn new(settings: &'a ExtractionSettings) -> Self {
        Self {
            settings,
            planner: TrimPlanner::new(),
        }
    }

    pub fn with_planner(mut self, planner: TrimPlanner) -> Self {
        self.planner = planner;
        self
    }

    /// Whether `request` is silently dropped instead of built.
    ///
    /// Grabbing the absolute last frame and trimming are mutually exclusive;
    /// a trimmed last-frame request is a no-op rather than an error.
    pub fn is_suppressed(request: &ExtractionRequest) -> bool {
        matches!(request.mode, ExtractionMode::LastFrame) && request.trim.enabled
    }

    /// Build the engine arguments for `request`, or `None` if the request is suppressed
    pub fn build(&self, request: &ExtractionRequest, input: &EngineInput) -> Option<Vec<String>> {
        if Self::is_suppressed(request) {
            debug!("Last-frame extraction skipped while trimming is enabled");
            return None;
        }

        let args = match request.mode {
            ExtractionMode::FramesFromVideo => self.frames_from_video(request, input),
            ExtractionMode::SceneChanges { .. } => self.scene_changes(request, input),
            ExtractionMode::ImageImport => self.image_import(request, input),
            ExtractionMode::SingleImage => self.single_image(request, input),
            ExtractionMode::SingleFrame { frame_number } => {
                self.single_frame(request, input, frame_number)
            }
            ExtractionMode::LastFrame => self.last_frame(request, input),
        };

        Some(args)
    }

    fn frames_from_video(&self, request: &ExtractionRequest, input: &EngineInput) -> Vec<String> {
        let trim = self.planner.plan(&request.trim);
        let dedupe = request
            .dedupe
            .then(|| self.settings.dedupe_mode.filter().to_string());
        let filters = join_filters([self.settings.pad_filter(), dedupe]);

        let mut args = ArgList::default();
        args.extend(rate_args(request))
            .extend(trim.input_fragment)
            .extend(input.args())
            .extend(self.compression_args())
            .flag("-vsync", "0")
            .flag("-pix_fmt", "rgb24")
            .flag("-frame_pts", "true");
        if let Some(filters) = filters {
            args.flag("-vf", filters);
        }
        args.extend(size_args(request.effective_size()))
            .extend(trim.output_fragment)
            .push(sequence_pattern(&request.output_path));
        args.finish()
    }

    fn scene_changes(&self, request: &ExtractionRequest, input: &EngineInput) -> Vec<String> {
        let trim = self.planner.plan(&request.trim);
        let select = format!("select='gt(scene,{})'", self.settings.scene_sensitivity);

        let mut args = ArgList::default();
        args.extend(rate_args(request))
            .flag("-vsync", "0")
            .extend(trim.input_fragment)
            .extend(input.args())
            .extend(self.compression_args())
            .flag("-vf", select)
            .flag("-frame_pts", "true")
            // Caller-supplied size is ignored
            .extend(size_args(Some(SCENE_DETECT_SIZE)))
            .extend(trim.output_fragment)
            .push(sequence_pattern(&request.output_path));
        args.finish()
    }

    fn image_import(&self, request: &ExtractionRequest, input: &EngineInput) -> Vec<String> {
        let pix_fmt = if request.alpha { "rgba" } else { "rgb24" };

        let mut args = ArgList::default();
        args.extend(input.args())
            .extend(self.compression_args())
            .extend(size_args(request.effective_size()))
            .flag("-pix_fmt", pix_fmt)
            .flag("-vsync", "0");

        if request.alpha {
            args.flag("-filter_complex", self.transparent_palette_graph());
        } else if let Some(pad) = self.settings.pad_filter() {
            args.flag("-vf", pad);
        }

        args.push(sequence_pattern(&request.output_path));
        args.finish()
    }

    fn single_image(&self, request: &ExtractionRequest, input: &EngineInput) -> Vec<String> {
        let mut args = ArgList::default();
        args.extend(input.args())
            .extend(size_args(request.effective_size()))
            .extend(self.still_format_args(&request.output_path));
        if let Some(pad) = self.settings.pad_filter() {
            args.flag("-vf", pad);
        }
        args.push(path_arg(&request.output_path));
        args.finish()
    }

    fn single_frame(
        &self,
        request: &ExtractionRequest,
        input: &EngineInput,
        frame_number: u64,
    ) -> Vec<String> {
        let mut args = ArgList::default();
        args.extend(input.args())
            .flag("-vf", format!(r"select=eq(n\,{})", frame_number))
            .flag("-vframes", "1")
            .extend(self.still_format_args(&request.output_path))
            .push(path_arg(&request.output_path));
        args.finish()
    }

    fn last_frame(&self, request: &ExtractionRequest, input: &EngineInput) -> Vec<String> {
        let mut args = ArgList::default();
        args.flag("-sseof", "-1")
            .extend(input.args())
            .flag("-update", "1")
            .extend(self.still_format_args(&request.output_path))
            .extend(size_args(request.effective_size()))
            .push(path_arg(&request.output_path));
        args.finish()
    }

    /// pad -> split -> palettegen reserving a transparent entry -> paletteuse
    fn transparent_palette_graph(&self) -> String {
        let head = match self.settings.pad_filter() {
            Some(pad) => format!("[0:v]{},split[a][b]", pad),
            None => "[0:v]split[a][b]".to_string(),
        };
        format!(
            "{};[a]palettegen=reserve_transparent=on:transparency_color=ffffff[p];[b][p]paletteuse",
            head
        )
    }

    fn compression_args(&self) -> Vec<String> {
        vec![
            "-compression_level".to_string(),
            self.settings.compression_level.to_string(),
        ]
    }

    /// Lossless RGB for `.png` outputs, full-range YUV otherwise
    fn still_format_args(&self, output: &Path) -> Vec<String> {
        match StillFormat::from_path(output) {
            StillFormat::Png => {
                let mut args = vec!["-pix_fmt".to_string(), "rgb24".to_string()];
                args.extend(self.compression_args());
                args
            }
            StillFormat::Lossy => vec!["-pix_fmt".to_string(), "yuvj420p".to_string()],
        }
    }
}

fn rate_args(request: &ExtractionRequest) -> Vec<String> {
    match request.effective_frame_rate() {
        Some(rate) => vec!["-r".to_string(), rate.to_string()],
        None => Vec::new(),
    }
}

fn size_args(size: Option<FrameSize>) -> Vec<String> {
    match size.filter(FrameSize::is_specified) {
        Some(size) => vec!["-s".to_string(), size.to_string()],
        None => Vec::new(),
    }
}

/// Join the present filters into one comma-separated chain
fn join_filters<const N: usize>(filters: [Option<String>; N]) -> Option<String> {
    let chain: Vec<String> = filters
        .into_iter()
        .flatten()
        .filter(|f| !f.is_empty())
        .collect();
    (!chain.is_empty()).then(|| chain.join(","))
}

/// Numbered PNG sequence inside `dir`
fn sequence_pattern(dir: &Path) -> String {
    path_arg(&dir.join(format!("%0{}d.png", PADDING_INPUT_FRAMES)))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
