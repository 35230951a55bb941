//! Sequential per-frame driver loop: decode, preprocess, forward
//! pass, record. One frame is fully processed before the next is
//! read; any failure aborts the run, leaving the records already
//! flushed.

use std::time::Instant;

use crate::data::{InferenceResult, OutputMode};
use crate::error::PipelineError;
use crate::infer_runners::Network;
use crate::output::RecordWriter;
use crate::video::FrameSource;

const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
}

pub fn run_pipeline<S, N>(
    source: &mut S,
    network: &mut N,
    writer: &mut RecordWriter,
    mode: OutputMode,
    feature_layer: &str,
) -> Result<RunSummary, PipelineError>
where
    S: FrameSource,
    N: Network,
{
    let total = source.frame_count();
    let started = Instant::now();
    log::info!("Running {} over {} frames", mode.str(), total);

    for index in 0..total {
        let frame = source.read_frame()?;
        let result = match mode {
            OutputMode::Classify => InferenceResult::Probabilities(network.classify(&frame)?),
            OutputMode::ExtractFeatures => {
                InferenceResult::Features(network.extract_features(&frame, feature_layer)?)
            }
        };
        writer.write_record(index, &result)?;

        let done = index + 1;
        if done % PROGRESS_EVERY == 0 || done == total {
            log::info!("Processed {done}/{total} frames");
        }
    }

    log::info!(
        "Finished {} frames in {:.2?}",
        total,
        started.elapsed()
    );
    Ok(RunSummary { frames: total })
}
