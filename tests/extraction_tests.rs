use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use framex_cli::adapters::{FsLocalAdapter, TomlConfigAdapter};
use framex_cli::domain::model::*;
use framex_cli::ports::*;
use framex_cli::*;
use tempfile::TempDir;

/// Test doubles for the engine and log ports
mod test_utils {
    use super::*;

    /// What the fake engine saw for one invocation
    #[derive(Debug, Clone)]
    pub struct Recorded {
        pub invocation: Invocation,
        /// Manifest content at the time of the call, for concat inputs
        pub manifest: Option<String>,
    }

    /// Engine that records invocations and writes placeholder outputs
    pub struct RecordingEngine {
        pub outputs: usize,
        pub exit_code: i32,
        pub calls: Mutex<Vec<Recorded>>,
    }

    impl RecordingEngine {
        pub fn new(outputs: usize) -> Self {
            Self {
                outputs,
                exit_code: 0,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(exit_code: i32) -> Self {
            Self {
                outputs: 0,
                exit_code,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Recorded> {
            self.calls.lock().unwrap().clone()
        }

        fn write_outputs(&self, args: &[String]) {
            let Some(last) = args.last() else { return };
            if let Some(dir) = last.strip_suffix("%08d.png") {
                for n in 1..=self.outputs {
                    std::fs::write(Path::new(dir).join(format!("{:08}.png", n)), b"png").unwrap();
                }
            } else if self.outputs > 0 {
                std::fs::write(last, b"png").unwrap();
            }
        }
    }

    #[async_trait]
    impl ExecutePort for RecordingEngine {
        async fn run(&self, invocation: &Invocation) -> Result<EngineExit, DomainError> {
            let manifest = invocation
                .args
                .windows(2)
                .find(|pair| pair[0] == "-i")
                .map(|pair| PathBuf::from(&pair[1]))
                .filter(|path| path.extension().map_or(false, |ext| ext == "ini"))
                .map(|path| std::fs::read_to_string(path).unwrap());

            self.calls.lock().unwrap().push(Recorded {
                invocation: invocation.clone(),
                manifest,
            });

            let success = self.exit_code == 0;
            if success || invocation.allow_nonzero_exit {
                self.write_outputs(&invocation.args);
            }
            if !success && !invocation.allow_nonzero_exit {
                return Err(DomainError::ExternalProcessFailure(format!(
                    "engine exited with code {}",
                    self.exit_code
                )));
            }

            Ok(EngineExit {
                code: Some(self.exit_code),
                success,
                last_line: None,
            })
        }
    }

    /// Log sink that keeps every message
    #[derive(Default)]
    pub struct RecordingLog {
        pub messages: Mutex<Vec<String>>,
    }

    impl RecordingLog {
        pub fn contains(&self, needle: &str) -> bool {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .any(|m| m.contains(needle))
        }
    }

    #[async_trait]
    impl LogPort for RecordingLog {
        async fn info(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
        async fn warn(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
        async fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
        async fn debug(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    pub struct Harness {
        pub temp: TempDir,
        pub engine: Arc<RecordingEngine>,
        pub log: Arc<RecordingLog>,
        pub interactor: ExtractInteractor,
    }

    impl Harness {
        pub fn new(engine: RecordingEngine) -> Self {
            let temp = TempDir::new().unwrap();
            let config = TomlConfigAdapter::new();
            config
                .set_config(keys::DATA_DIR, &temp.path().join("data").to_string_lossy())
                .unwrap();

            let engine = Arc::new(engine);
            let log = Arc::new(RecordingLog::default());
            let interactor = ExtractInteractor::new(
                engine.clone() as Arc<dyn ExecutePort>,
                Arc::new(FsLocalAdapter::new()) as Arc<dyn FsPort>,
                Arc::new(config) as Arc<dyn ConfigPort>,
                log.clone() as Arc<dyn LogPort>,
            );

            Self {
                temp,
                engine,
                log,
                interactor,
            }
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.temp.path().join(name)
        }

        pub fn stills(&self, names: &[&str]) -> PathBuf {
            let dir = self.path("stills");
            std::fs::create_dir_all(&dir).unwrap();
            for name in names {
                std::fs::write(dir.join(name), b"img").unwrap();
            }
            dir
        }

        pub fn video(&self) -> PathBuf {
            let path = self.path("input.mp4");
            std::fs::write(&path, b"video").unwrap();
            path
        }

        pub fn data_dir_entries(&self) -> usize {
            std::fs::read_dir(self.path("data"))
                .map(|entries| entries.count())
                .unwrap_or(0)
        }
    }
}

use test_utils::*;

#[tokio::test]
async fn test_import_with_alpha_uses_sorted_manifest() {
    let harness = Harness::new(RecordingEngine::new(3));
    let stills = harness.stills(&["img3.png", "img1.png", "img2.png"]);
    let output = harness.path("frames");

    let request = ExtractionRequest::new(ExtractionMode::ImageImport, &stills, &output)
        .unwrap()
        .with_alpha(true);
    let report = harness.interactor.run(request).await.unwrap();

    assert!(report.invoked);
    assert_eq!(report.produced_count, 3);

    let calls = harness.engine.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];

    let manifest = call.manifest.as_deref().unwrap();
    let lines: Vec<&str> = manifest.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("img1.png'"));
    assert!(lines[1].ends_with("img2.png'"));
    assert!(lines[2].ends_with("img3.png'"));
    assert!(lines.iter().all(|line| line.starts_with("file '")));

    let args = &call.invocation.args;
    assert!(args.iter().any(|a| a.contains("palettegen=reserve_transparent=on")));
    assert!(args.contains(&"rgba".to_string()));
    assert_eq!(call.invocation.log_level, EngineLogLevel::Panic);
    assert_eq!(call.invocation.log_mode, LogMode::Hidden);

    // Manifest is removed once the engine has finished
    assert_eq!(harness.data_dir_entries(), 0);
    assert!(harness.log.contains("Imported 3 images."));
}

#[tokio::test]
async fn test_scene_detection_with_no_changes() {
    let harness = Harness::new(RecordingEngine::new(0));
    let input = harness.video();
    let output = harness.path("scenes");

    let request = ExtractionRequest::new(
        ExtractionMode::SceneChanges {
            input_is_frames: false,
        },
        &input,
        &output,
    )
    .unwrap()
    .with_frame_rate(0.0);
    let report = harness.interactor.run(request).await.unwrap();

    assert!(report.invoked);
    assert_eq!(report.produced_count, 0);
    assert!(!harness.engine.calls()[0].invocation.args.contains(&"-r".to_string()));
    assert!(output.is_dir());
    assert!(harness.log.contains("Detected no scene changes."));
}

#[tokio::test]
async fn test_scene_detection_from_frames_directory() {
    let harness = Harness::new(RecordingEngine::new(2));
    let frames: Vec<String> = (1..=60).map(|n| format!("{:08}.png", n)).collect();
    let names: Vec<&str> = frames.iter().map(String::as_str).collect();
    let stills = harness.stills(&names);

    let request = ExtractionRequest::new(
        ExtractionMode::SceneChanges {
            input_is_frames: true,
        },
        &stills,
        harness.path("scenes"),
    )
    .unwrap();
    let report = harness.interactor.run(request).await.unwrap();

    assert_eq!(report.produced_count, 2);
    let call = &harness.engine.calls()[0];
    assert_eq!(call.manifest.as_deref().unwrap().lines().count(), 60);
    assert_eq!(call.invocation.log_mode, LogMode::OnlyLastLine);
    assert_eq!(call.invocation.log_level, EngineLogLevel::Panic);
    assert!(harness.log.contains("Detected 2 scene changes."));
}

#[tokio::test]
async fn test_frames_log_mode_follows_expected_inputs() {
    let harness = Harness::new(RecordingEngine::new(1));
    let input = harness.video();

    let small = ExtractionRequest::new(ExtractionMode::FramesFromVideo, &input, harness.path("a"))
        .unwrap()
        .with_expected_input_frames(50);
    harness.interactor.run(small).await.unwrap();

    let large = ExtractionRequest::new(ExtractionMode::FramesFromVideo, &input, harness.path("b"))
        .unwrap()
        .with_expected_input_frames(51);
    let report = harness.interactor.run(large).await.unwrap();

    let calls = harness.engine.calls();
    assert_eq!(calls[0].invocation.log_mode, LogMode::Hidden);
    assert_eq!(calls[1].invocation.log_mode, LogMode::OnlyLastLine);
    assert_eq!(calls[1].invocation.log_level, EngineLogLevel::Warning);
    assert_eq!(report.produced_count, 1);
    assert!(harness.log.contains("Extracted 1 frame from input."));
}

#[tokio::test]
async fn test_trimmed_frames_use_fast_seek() {
    let harness = Harness::new(RecordingEngine::new(1));
    let input = harness.video();

    let request = ExtractionRequest::new(ExtractionMode::FramesFromVideo, &input, harness.path("f"))
        .unwrap()
        .with_trim(TrimWindow::new(true, 300, Some(330)).unwrap());
    harness.interactor.run(request).await.unwrap();

    let args = &harness.engine.calls()[0].invocation.args;
    let input_at = args.iter().position(|a| a == "-i").unwrap();
    assert_eq!(&args[..input_at], ["-ss", "120"]);
    let n = args.len();
    assert_eq!(&args[n - 5..n - 1], ["-ss", "180", "-to", "210"]);
}

#[tokio::test]
async fn test_last_frame_with_trim_is_skipped() {
    let harness = Harness::new(RecordingEngine::new(1));
    let input = harness.video();
    let output = harness.path("thumbs").join("last.png");

    let request = ExtractionRequest::new(ExtractionMode::LastFrame, &input, &output)
        .unwrap()
        .with_trim(TrimWindow::new(true, 10, Some(20)).unwrap())
        .with_delete_source(true);
    let report = harness.interactor.run(request).await.unwrap();

    assert!(!report.invoked);
    assert_eq!(report.produced_count, 0);
    assert!(harness.engine.calls().is_empty());
    assert!(!harness.path("thumbs").exists());
    assert!(input.exists());
}

#[tokio::test]
async fn test_last_frame_into_directory() {
    let harness = Harness::new(RecordingEngine::new(1));
    let input = harness.video();
    let dir = harness.path("thumbs");
    std::fs::create_dir_all(&dir).unwrap();

    let request = ExtractionRequest::new(ExtractionMode::LastFrame, &input, &dir).unwrap();
    let report = harness.interactor.run(request).await.unwrap();

    assert_eq!(report.output_path, dir.join("last.png"));
    assert_eq!(report.produced_count, 1);
    let args = &harness.engine.calls()[0].invocation.args;
    assert_eq!(&args[..2], ["-sseof", "-1"]);
    assert!(harness.log.contains("Wrote 1 frame."));
}

#[tokio::test]
async fn test_engine_failure_propagates() {
    let harness = Harness::new(RecordingEngine::failing(1));
    let stills = harness.stills(&["a.png"]);

    let request = ExtractionRequest::new(ExtractionMode::ImageImport, &stills, harness.path("out"))
        .unwrap()
        .with_delete_source(true);
    let err = harness.interactor.run(request).await.unwrap_err();

    assert!(matches!(err, DomainError::ExternalProcessFailure(_)));
    // Source kept and manifest cleaned up on failure
    assert!(stills.join("a.png").exists());
    assert_eq!(harness.data_dir_entries(), 0);
}

#[tokio::test]
async fn test_tolerated_failure_still_counts_outputs() {
    let mut engine = RecordingEngine::failing(1);
    engine.outputs = 2;
    let harness = Harness::new(engine);
    let input = harness.video();

    let request = ExtractionRequest::new(ExtractionMode::FramesFromVideo, &input, harness.path("f"))
        .unwrap()
        .with_tolerate_engine_errors(true)
        .with_delete_source(true);
    let report = harness.interactor.run(request).await.unwrap();

    assert!(harness.engine.calls()[0].invocation.allow_nonzero_exit);
    assert_eq!(report.produced_count, 2);
    // Only a clean run deletes the source
    assert!(input.exists());
    // The execution port reports the tolerated exit, not the interactor
    assert!(!harness.log.contains("exited with code"));
}

#[tokio::test]
async fn test_delete_source_after_success() {
    let harness = Harness::new(RecordingEngine::new(4));
    let input = harness.video();

    let request = ExtractionRequest::new(ExtractionMode::FramesFromVideo, &input, harness.path("f"))
        .unwrap()
        .with_delete_source(true);
    let report = harness.interactor.run(request).await.unwrap();

    assert_eq!(report.produced_count, 4);
    assert!(!input.exists());
}

#[tokio::test]
async fn test_missing_input_aborts_before_engine() {
    let harness = Harness::new(RecordingEngine::new(1));

    let request = ExtractionRequest::new(
        ExtractionMode::ImageImport,
        harness.path("absent"),
        harness.path("out"),
    )
    .unwrap();
    let err = harness.interactor.run(request).await.unwrap_err();

    assert!(matches!(err, DomainError::DirectoryUnavailable(_)));
    assert!(harness.engine.calls().is_empty());
}

#[tokio::test]
async fn test_manifest_is_deterministic_and_overwritten() {
    let harness = Harness::new(RecordingEngine::new(0));
    let stills = harness.stills(&["img3.png", "img1.png", "img2.png"]);
    let fs = FsLocalAdapter::new();
    let manifest_path = harness.path("m.ini");

    std::fs::write(&manifest_path, "stale content\n".repeat(10)).unwrap();
    let first = PathManifestBuilder::write(&fs, &stills, &manifest_path)
        .await
        .unwrap();
    let on_disk = std::fs::read_to_string(&manifest_path).unwrap();
    let second = PathManifestBuilder::write(&fs, &stills, &manifest_path)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(on_disk, first.text);
    assert_eq!(std::fs::read_to_string(&manifest_path).unwrap(), on_disk);
    assert!(!on_disk.contains("stale"));
    assert_eq!(first.len(), 3);
    assert!(first.entries[0].ends_with("stills/img1.png"));
}

#[tokio::test]
async fn test_concurrent_imports_use_separate_manifests() {
    let harness = Harness::new(RecordingEngine::new(1));
    let stills = harness.stills(&["a.png", "b.png"]);

    let first = ExtractionRequest::new(ExtractionMode::ImageImport, &stills, harness.path("o1"))
        .unwrap();
    let second = ExtractionRequest::new(ExtractionMode::ImageImport, &stills, harness.path("o2"))
        .unwrap();
    let (a, b) = tokio::join!(
        harness.interactor.run(first),
        harness.interactor.run(second)
    );
    assert!(a.is_ok() && b.is_ok());

    let manifests: Vec<String> = harness
        .engine
        .calls()
        .iter()
        .map(|call| {
            let args = &call.invocation.args;
            let at = args.iter().position(|a| a == "-i").unwrap();
            args[at + 1].clone()
        })
        .collect();
    assert_eq!(manifests.len(), 2);
    assert_ne!(manifests[0], manifests[1]);
}

#[tokio::test]
async fn test_import_from_relative_directory_lists_absolute_paths() {
    let harness = Harness::new(RecordingEngine::new(1));
    let cwd = std::env::current_dir().unwrap();
    let stills = tempfile::Builder::new()
        .prefix("framex-stills-")
        .tempdir_in(&cwd)
        .unwrap();
    std::fs::write(stills.path().join("img1.png"), b"img").unwrap();
    let relative = stills.path().strip_prefix(&cwd).unwrap().to_path_buf();

    let request =
        ExtractionRequest::new(ExtractionMode::ImageImport, &relative, harness.path("out")).unwrap();
    harness.interactor.run(request).await.unwrap();

    // The manifest lives under data_dir, so its entries cannot be relative to the caller
    let calls = harness.engine.calls();
    let manifest = calls[0].manifest.as_deref().unwrap();
    let expected = cwd.join(&relative).join("img1.png");
    assert_eq!(
        manifest,
        format!("file '{}'\n", expected.to_string_lossy().replace('\\', "/"))
    );
}
