// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_local;
pub mod tracing_log;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FfmpegProcessAdapter;
pub use fs_local::FsLocalAdapter;
pub use tracing_log::TracingLogAdapter;
pub use toml_config::TomlConfigAdapter;
