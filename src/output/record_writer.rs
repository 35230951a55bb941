use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::data::{InferenceResult, OutputMode};
use crate::error::PipelineError;

/// Frames are grouped into fixed-size clips for feature-record
/// labeling: `clip = frame_index / FRAMES_PER_CLIP`.
pub const FRAMES_PER_CLIP: usize = 90;

/// Streaming per-frame record sink. Each record is one comma-delimited
/// line, flushed as it is written; a crash mid-run leaves a valid
/// prefix of completed records.
pub struct RecordWriter {
    out: BufWriter<File>,
    records: usize,
}

impl RecordWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let file = File::create(path.as_ref()).map_err(|e| {
            PipelineError::Io(format!(
                "failed to create output file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Ok(Self { out: BufWriter::new(file), records: 0 })
    }

    pub fn write_record(
        &mut self,
        index: usize,
        result: &InferenceResult,
    ) -> Result<(), PipelineError> {
        let mut line = String::new();
        match result {
            InferenceResult::Probabilities(_) => {
                let _ = write!(line, "{},{}", index, result.top_score());
            }
            InferenceResult::Features(values) => {
                let clip = index / FRAMES_PER_CLIP;
                let _ = write!(line, "vid{clip}_frame_{index}");
                for v in values {
                    let _ = write!(line, ",{v}");
                }
            }
        }
        writeln!(self.out, "{line}")?;
        // Per-record flush: durability is bounded by the OS buffer,
        // not by this process.
        self.out.flush()?;
        self.records += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Final flush. Dropping the writer flushes best-effort; failure
    /// paths rely on that scoped release.
    pub fn finish(mut self) -> Result<(), PipelineError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Derive the output path from the video path: same directory, video
/// extension replaced by the mode's suffix.
pub fn derive_output_path(video: &Path, mode: OutputMode) -> PathBuf {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| video.to_string_lossy().into_owned());
    let name = format!("{}{}", stem, mode.output_suffix());
    match video.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
