// Unit tests for domain models

use super::*;
use crate::domain::errors::DomainError;

#[test]
fn test_trim_window_bounded() {
    let window = TrimWindow::new(true, 30, Some(90)).unwrap();
    assert!(window.enabled);
    assert!(window.has_end);
    assert_eq!(window.start_seconds, 30);
    assert_eq!(window.end_seconds, 90);
    assert_eq!(window.duration_seconds(), Some(60));
}

#[test]
fn test_trim_window_open_ended() {
    let window = TrimWindow::new(true, 30, None).unwrap();
    assert!(!window.has_end);
    assert_eq!(window.duration_seconds(), None);
}

#[test]
fn test_trim_window_rejects_end_before_start() {
    let err = TrimWindow::new(true, 100, Some(50)).unwrap_err();
    assert!(matches!(err, DomainError::InvalidWindow(_)));
}

#[test]
fn test_trim_window_rejects_negative_start() {
    assert!(matches!(
        TrimWindow::new(true, -1, None),
        Err(DomainError::InvalidWindow(_))
    ));
}

#[test]
fn test_trim_window_zero_length_is_valid() {
    let window = TrimWindow::new(true, 42, Some(42)).unwrap();
    assert_eq!(window.duration_seconds(), Some(0));
}

#[test]
fn test_frame_size_placeholders_are_unspecified() {
    assert!(FrameSize::new(1920, 1080).is_specified());
    assert!(!FrameSize::new(0, 0).is_specified());
    assert!(!FrameSize::new(1, 1080).is_specified());
    assert!(!FrameSize::new(1920, 1).is_specified());
}

#[test]
fn test_frame_size_parse() {
    assert_eq!("640x480".parse::<FrameSize>().unwrap(), FrameSize::new(640, 480));
    assert_eq!("1280X720".parse::<FrameSize>().unwrap(), FrameSize::new(1280, 720));
    assert!("640".parse::<FrameSize>().is_err());
    assert!("ax480".parse::<FrameSize>().is_err());
    assert_eq!(FrameSize::new(256, 144).to_string(), "256x144");
}

#[test]
fn test_dedupe_mode_selector() {
    assert_eq!(DedupeMode::from_selector(0), DedupeMode::Default);
    assert_eq!(DedupeMode::from_selector(1), DedupeMode::Aggressive);
    assert_eq!(DedupeMode::Default.filter(), "mpdecimate");
    assert_eq!(
        DedupeMode::Aggressive.filter(),
        "mpdecimate=hi=64*32:lo=64*32:frac=0.1"
    );
}

#[test]
fn test_pad_filter() {
    let settings = ExtractionSettings::default();
    assert_eq!(
        settings.pad_filter().as_deref(),
        Some("pad=width=ceil(iw/2)*2:height=ceil(ih/2)*2:color=black@0")
    );

    let no_pad = ExtractionSettings {
        pad_multiple: 1,
        ..ExtractionSettings::default()
    };
    assert_eq!(no_pad.pad_filter(), None);
}

#[test]
fn test_still_format_from_extension() {
    assert_eq!(StillFormat::from_path(Path::new("out/last.png")), StillFormat::Png);
    assert_eq!(StillFormat::from_path(Path::new("out/LAST.PNG")), StillFormat::Png);
    assert_eq!(StillFormat::from_path(Path::new("out/last.jpg")), StillFormat::Lossy);
    assert_eq!(StillFormat::from_path(Path::new("out/last")), StillFormat::Lossy);
}

#[test]
fn test_mode_manifest_usage() {
    assert!(ExtractionMode::ImageImport.uses_manifest());
    assert!(ExtractionMode::SceneChanges { input_is_frames: true }.uses_manifest());
    assert!(!ExtractionMode::SceneChanges { input_is_frames: false }.uses_manifest());
    assert!(!ExtractionMode::FramesFromVideo.uses_manifest());
    assert!(!ExtractionMode::LastFrame.writes_sequence());
}

#[test]
fn test_request_effective_modifiers() {
    let request = ExtractionRequest::new(ExtractionMode::FramesFromVideo, "in.mp4", "frames")
        .unwrap()
        .with_frame_rate(0.0)
        .with_size(FrameSize::new(1, 1));
    assert_eq!(request.effective_frame_rate(), None);
    assert_eq!(request.effective_size(), None);

    let request = request
        .with_frame_rate(23.976)
        .with_size(FrameSize::new(640, 360));
    assert_eq!(request.effective_frame_rate(), Some(23.976));
    assert_eq!(request.effective_size(), Some(FrameSize::new(640, 360)));
}

#[test]
fn test_request_rejects_empty_paths() {
    assert!(ExtractionRequest::new(ExtractionMode::LastFrame, "", "out.png").is_err());
    assert!(ExtractionRequest::new(ExtractionMode::LastFrame, "in.mp4", "").is_err());
}
