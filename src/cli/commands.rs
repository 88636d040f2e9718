//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::app::AppContainer;
use crate::cli::args::CommonArgs;
use crate::cli::{Cli, Commands};
use crate::domain::model::*;
use crate::domain::rules::OutputSummary;
use crate::error::FrameXResult;

/// Trim window from the global `--trim-start`/`--trim-end` flags.
///
/// Either flag enables trimming; a missing start means the beginning of the input.
pub fn trim_window(cli: &Cli) -> FrameXResult<TrimWindow> {
    if cli.trim_start.is_none() && cli.trim_end.is_none() {
        return Ok(TrimWindow::disabled());
    }
    Ok(TrimWindow::new(
        true,
        cli.trim_start.unwrap_or(0),
        cli.trim_end,
    )?)
}

/// Translate the parsed command line into an extraction request
pub fn build_request(cli: &Cli) -> FrameXResult<ExtractionRequest> {
    let trim = trim_window(cli)?;

    let request = match &cli.command {
        Commands::Frames(args) => {
            let mut request = base_request(ExtractionMode::FramesFromVideo, &args.common)?
                .with_dedupe(args.dedupe);
            if let Some(rate) = args.rate {
                request = request.with_frame_rate(rate);
            }
            if let Some(size) = args.size {
                request = request.with_size(size);
            }
            if let Some(frames) = args.expected_frames {
                request = request.with_expected_input_frames(frames);
            }
            request
        }
        Commands::Scenes(args) => {
            let mode = ExtractionMode::SceneChanges {
                input_is_frames: args.from_frames,
            };
            let mut request = base_request(mode, &args.common)?;
            if let Some(rate) = args.rate {
                request = request.with_frame_rate(rate);
            }
            request
        }
        Commands::Import(args) => {
            let mut request =
                base_request(ExtractionMode::ImageImport, &args.common)?.with_alpha(args.alpha);
            if let Some(size) = args.size {
                request = request.with_size(size);
            }
            request
        }
        Commands::Image(args) => {
            let mut request = base_request(ExtractionMode::SingleImage, &args.common)?;
            if let Some(size) = args.size {
                request = request.with_size(size);
            }
            request
        }
        Commands::Frame(args) => base_request(
            ExtractionMode::SingleFrame {
                frame_number: args.number,
            },
            &args.common,
        )?,
        Commands::LastFrame(args) => {
            let mut request = base_request(ExtractionMode::LastFrame, &args.common)?;
            if let Some(size) = args.size {
                request = request.with_size(size);
            }
            request
        }
    };

    Ok(request.with_trim(trim))
}

fn base_request(mode: ExtractionMode, common: &CommonArgs) -> FrameXResult<ExtractionRequest> {
    Ok(
        ExtractionRequest::new(mode, common.input.clone(), common.output.clone())?
            .with_delete_source(common.delete_source)
            .with_tolerate_engine_errors(common.tolerate_engine_errors),
    )
}

/// Execute the parsed command through the extraction interactor
pub async fn execute(cli: &Cli, container: &dyn AppContainer) -> Result<OutputReport> {
    let request = build_request(cli).context("Invalid extraction request")?;
    info!(
        mode = request.mode.tag(),
        input = %request.input_path.display(),
        output = %request.output_path.display(),
        "Executing command"
    );

    let report = container
        .extract_interactor()
        .run(request)
        .await
        .context("Extraction failed")?;

    print_report(&report, cli.json)?;
    Ok(report)
}

/// Print the report as a summary line or as JSON
pub fn print_report(report: &OutputReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", text);
    } else if !report.invoked {
        println!("Nothing to do: last-frame extraction is skipped while trimming.");
    } else {
        println!("{}", OutputSummary::describe(&report.mode, report.produced_count));
        println!("Output: {}", report.output_path.display());
    }
    Ok(())
}
