//! libav frame source adapter
//!
//! Decodes every frame of the best video stream in order, and converts a
//! frame to packed RGB24 only when asked for its pixels.

use std::path::Path;

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{self, context::Input, Pixel},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
    Error as FfmpegError, Packet, Rational,
};
use tracing::debug;

use crate::domain::model::{FrameHeader, FrameImage, VideoMetadata};
use crate::error::{CatClipError, CatClipResult};
use crate::ports::{FrameSource, VideoOpener};

/// Microseconds per second, the unit of container-level durations
const AV_TIME_BASE: f64 = 1_000_000.0;

/// Opens videos with libav
#[derive(Debug, Clone)]
pub struct LibavOpener {
    inference_width: u32,
}

impl LibavOpener {
    pub fn new(inference_width: u32) -> Self {
        Self { inference_width }
    }
}

impl VideoOpener for LibavOpener {
    fn open(&self, path: &Path) -> CatClipResult<Box<dyn FrameSource>> {
        let source = LibavFrameSource::open(path, self.inference_width)?;
        Ok(Box::new(source))
    }
}

/// Sequential decoder over one video stream
pub struct LibavFrameSource {
    input: Input,
    decoder: VideoDecoder,
    scaler: Option<ScalingContext>,
    stream_index: usize,
    time_base: f64,
    /// Stream start time in seconds, subtracted from every timestamp
    start_offset: f64,
    metadata: VideoMetadata,
    target_width: u32,
    target_height: u32,
    decoded: VideoFrame,
    scaled: VideoFrame,
    next_index: u64,
    current: Option<FrameHeader>,
    eof_sent: bool,
}

impl LibavFrameSource {
    pub fn open(path: &Path, inference_width: u32) -> CatClipResult<Self> {
        let video = path.display().to_string();
        let metadata_error = |message: String| CatClipError::Metadata {
            video: video.clone(),
            message,
        };

        ffmpeg_next::init()?;
        let input = format::input(&path).map_err(|e| metadata_error(format!("cannot open: {}", e)))?;

        let container_duration = if input.duration() > 0 {
            input.duration() as f64 / AV_TIME_BASE
        } else {
            0.0
        };

        let stream = input
            .streams()
            .best(Type::Video)
            .ok_or_else(|| metadata_error("no video stream".to_string()))?;
        let stream_index = stream.index();
        let time_base = rational_to_f64(stream.time_base());

        let avg_rate = rational_to_f64(stream.avg_frame_rate());
        let fps = if avg_rate > 0.0 {
            avg_rate
        } else {
            rational_to_f64(stream.rate())
        };

        let duration = if stream.duration() > 0 && time_base > 0.0 {
            stream.duration() as f64 * time_base
        } else {
            container_duration
        };
        let frame_count = estimate_frame_count(stream.frames(), duration, fps);
        // AV_NOPTS_VALUE is i64::MIN
        let start_offset = if stream.start_time() != i64::MIN {
            stream.start_time() as f64 * time_base
        } else {
            0.0
        };

        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        let (target_width, target_height) =
            scaled_dimensions(decoder.width(), decoder.height(), inference_width);
        let metadata = VideoMetadata {
            fps,
            frame_count,
            duration,
            width: decoder.width(),
            height: decoder.height(),
        };
        debug!(
            "Opened {}: {:.3} fps, {} frames, {:.2}s, {}x{} (inference {}x{})",
            video,
            metadata.fps,
            metadata.frame_count,
            metadata.duration,
            metadata.width,
            metadata.height,
            target_width,
            target_height
        );

        Ok(Self {
            input,
            decoder,
            scaler: None,
            stream_index,
            time_base,
            start_offset,
            metadata,
            target_width,
            target_height,
            decoded: VideoFrame::empty(),
            scaled: VideoFrame::empty(),
            next_index: 0,
            current: None,
            eof_sent: false,
        })
    }

    fn header_for_decoded(&mut self) -> FrameHeader {
        let index = self.next_index;
        self.next_index += 1;
        let timestamp = match self.decoded.timestamp() {
            Some(ts) if self.time_base > 0.0 => ts as f64 * self.time_base - self.start_offset,
            _ => index as f64 / self.metadata.fps,
        };
        FrameHeader {
            index,
            timestamp: timestamp.max(0.0),
        }
    }
}

impl FrameSource for LibavFrameSource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> CatClipResult<Option<FrameHeader>> {
        loop {
            if self.decoder.receive_frame(&mut self.decoded).is_ok() {
                let header = self.header_for_decoded();
                self.current = Some(header);
                return Ok(Some(header));
            }

            if self.eof_sent {
                self.current = None;
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input) {
                Ok(()) => {
                    if packet.stream() == self.stream_index {
                        self.decoder.send_packet(&packet)?;
                    }
                }
                Err(FfmpegError::Eof) => {
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
                Err(e) => debug!("Skipping unreadable packet: {}", e),
            }
        }
    }

    fn current_image(&mut self) -> CatClipResult<FrameImage> {
        let header = self
            .current
            .ok_or_else(|| CatClipError::tool("decoder", "no decoded frame to convert"))?;

        if self.scaler.is_none() {
            self.scaler = Some(ScalingContext::get(
                self.decoder.format(),
                self.decoder.width(),
                self.decoder.height(),
                Pixel::RGB24,
                self.target_width,
                self.target_height,
                ScalingFlags::BILINEAR,
            )?);
        }
        if let Some(scaler) = self.scaler.as_mut() {
            scaler.run(&self.decoded, &mut self.scaled)?;
        }

        Ok(FrameImage {
            header,
            width: self.target_width,
            height: self.target_height,
            data: frame_to_rgb_buffer(&self.scaled, self.target_width, self.target_height),
        })
    }
}

fn rational_to_f64(rational: Rational) -> f64 {
    if rational.denominator() != 0 {
        rational.numerator() as f64 / rational.denominator() as f64
    } else {
        0.0
    }
}

/// Frame count from the stream header, else estimated from duration and rate
fn estimate_frame_count(stream_frames: i64, duration: f64, fps: f64) -> i64 {
    if stream_frames > 0 {
        stream_frames
    } else if duration > 0.0 && fps > 0.0 {
        (duration * fps) as i64
    } else {
        0
    }
}

/// Inference size: no wider than `max_width`, aspect kept, even dimensions
fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 || width <= max_width {
        return (width, height);
    }
    let scaled_height = (height as u64 * max_width as u64 / width as u64) as u32;
    let even = |v: u32| (v & !1).max(2);
    (even(max_width), even(scaled_height))
}

/// Copy packed RGB rows out of a frame, dropping any line padding
fn frame_to_rgb_buffer(frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = frame.stride(0);
    let row_len = width as usize * 3;
    let data = frame.data(0);

    if stride == row_len {
        data[..row_len * height as usize].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_len * height as usize);
        for row in 0..height as usize {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_len]);
        }
        buffer
    }
}
