use std::path::Path;

use opencv::{prelude::*, videoio};

use crate::error::PipelineError;
use crate::video::frame::BgrFrame;

/// Ordered frame producer. The driver loop only sees this trait, so a
/// synthetic source can stand in for a real container.
pub trait FrameSource {
    /// Total frame count as reported by the container, read once at
    /// open time. May be approximate for some codecs; the count is
    /// trusted as reported.
    fn frame_count(&self) -> usize;

    /// Next frame in order. Exhaustion before `frame_count` frames,
    /// or a corrupt container, is a decode failure.
    fn read_frame(&mut self) -> Result<BgrFrame, PipelineError>;
}

/// Video container opened for sequential decode.
pub struct VideoFile {
    capture: videoio::VideoCapture,
    frame_count: usize,
    fps: f64,
}

impl VideoFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy();

        // CAP_ANY lets the library pick the best backend per platform.
        let capture = videoio::VideoCapture::from_file(&path_str, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(PipelineError::Decode(format!(
                "failed to open video file: {}",
                path.display()
            )));
        }

        let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)? as usize;
        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        log::info!(
            "Opened {} | {} frames | {:.2} fps",
            path.display(),
            frame_count,
            fps
        );

        Ok(Self { capture, frame_count, fps })
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl FrameSource for VideoFile {
    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn read_frame(&mut self) -> Result<BgrFrame, PipelineError> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Err(PipelineError::Decode(
                "video stream ended before the reported frame count".to_string(),
            ));
        }
        if frame.channels() != 3 {
            return Err(PipelineError::Decode(format!(
                "expected a 3-channel frame, got {} channels",
                frame.channels()
            )));
        }
        if !frame.is_continuous() {
            return Err(PipelineError::Decode(
                "frame data is not continuous".to_string(),
            ));
        }

        let width = frame.cols() as u32;
        let height = frame.rows() as u32;
        let data = frame.data_bytes()?.to_vec();
        BgrFrame::new(data, width, height)
    }
}
