//! Re-encoding arguments for frame-accurate cuts and robust concatenation

use std::ffi::OsString;
use std::path::Path;

use crate::domain::config::SpliceConfig;
use crate::utils::time::format_seconds;

/// Encoder settings used when stream copy is not viable
#[derive(Debug, Clone, PartialEq)]
pub struct ReencodeSettings {
    video_codec: String,
    audio_codec: String,
    /// Constant rate factor (0-51, lower is higher quality)
    crf: u8,
    preset: String,
}

impl Default for ReencodeSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl ReencodeSettings {
    /// Software x264/AAC at CRF 23, medium preset
    pub fn new() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            crf: 23,
            preset: "medium".to_string(),
        }
    }

    pub fn from_config(config: &SpliceConfig) -> Self {
        Self::new()
            .with_codecs(config.video_codec.clone(), config.audio_codec.clone())
            .with_crf(config.crf)
            .with_preset(config.preset.clone())
    }

    /// Set the encoding preset (ultrafast, fast, medium, slow, veryslow)
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = preset.into();
        self
    }

    /// Set constant rate factor for quality-based encoding
    pub fn with_crf(mut self, crf: u8) -> Self {
        self.crf = crf.min(51);
        self
    }

    pub fn with_codecs(mut self, video: impl Into<String>, audio: impl Into<String>) -> Self {
        self.video_codec = video.into();
        self.audio_codec = audio.into();
        self
    }

    pub fn crf(&self) -> u8 {
        self.crf
    }

    fn encode_args(&self) -> Vec<OsString> {
        vec![
            "-c:v".into(),
            self.video_codec.clone().into(),
            "-preset".into(),
            self.preset.clone().into(),
            "-crf".into(),
            self.crf.to_string().into(),
            "-c:a".into(),
            self.audio_codec.clone().into(),
        ]
    }

    /// Arguments for a frame-accurate cut; seeking after `-i` decodes from
    /// the start so the boundaries are exact
    pub fn cut_args(&self, source: &Path, start: f64, end: f64, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-i".into(),
            source.as_os_str().to_owned(),
            "-ss".into(),
            format_seconds(start).into(),
            "-to".into(),
            format_seconds(end).into(),
        ];
        args.extend(self.encode_args());
        args.push(dest.as_os_str().to_owned());
        args
    }

    /// Arguments for a concatenation that re-encodes every clip
    pub fn concat_args(&self, list: &Path, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            list.as_os_str().to_owned(),
        ];
        args.extend(self.encode_args());
        args.push("-movflags".into());
        args.push("+faststart".into());
        args.push(dest.as_os_str().to_owned());
        args
    }
}
