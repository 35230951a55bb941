mod error;
pub mod data;
pub mod infer_runners;
pub mod output;
pub mod pipeline;
pub mod video;

use std::path::{Path, PathBuf};

pub use crate::error::PipelineError;
use crate::data::InferConfig;
use crate::infer_runners::CoolNetOrt;
use crate::output::{derive_output_path, RecordWriter};
use crate::pipeline::{run_pipeline, RunSummary};
use crate::video::VideoFile;

/// Load the network once per run; weights, deploy descriptor, mean
/// profile, and execution device are all fixed on the returned handle.
pub fn load_network(config: &InferConfig) -> Result<CoolNetOrt, PipelineError> {
    log::info!(
        "Loading network {} ({} mode, {} device)",
        config.model_path,
        config.output_mode.str(),
        config.device.str()
    );
    CoolNetOrt::load(config)
}

/// Process a whole video: open the container, derive the output path
/// from the video path, and run the frame loop. Returns the output
/// path and a run summary.
pub fn process_video(
    network: &mut CoolNetOrt,
    config: &InferConfig,
    video_path: &Path,
) -> Result<(PathBuf, RunSummary), PipelineError> {
    let mut source = VideoFile::open(video_path)?;
    let out_path = derive_output_path(video_path, config.output_mode);
    let mut writer = RecordWriter::create(&out_path)?;

    let feature_layer = config
        .feature_layer
        .clone()
        .unwrap_or_else(|| network.deploy().feature_layer.clone());
    let summary = run_pipeline(
        &mut source,
        network,
        &mut writer,
        config.output_mode,
        &feature_layer,
    )?;
    writer.finish()?;
    Ok((out_path, summary))
}
