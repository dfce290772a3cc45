// Adapters - External system implementations

pub mod classifier_exec;
pub mod decode_libav;
pub mod exec_ffmpeg;
pub mod toml_config;

// Re-export adapters
pub use classifier_exec::ExecClassifier;
pub use decode_libav::{LibavFrameSource, LibavOpener};
pub use exec_ffmpeg::FfmpegTool;
pub use toml_config::TomlConfigAdapter;
