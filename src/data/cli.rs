use std::path::PathBuf;

use clap::Parser;

/// Per-frame network inference over a video file. Writes one record
/// per frame next to the input video.
#[derive(Debug, Parser)]
#[command(name = "coolnet_video", version, about)]
pub struct DriverCli {
    /// Path to the input video container
    pub video: PathBuf,
    /// Path to the pretrained network weights (.onnx)
    pub weights: PathBuf,
    /// Path to the deploy descriptor (.json)
    pub deploy: PathBuf,
    /// Path to a mean-array file (.json), or `default` for the
    /// built-in per-channel mean
    pub mean: String,
    /// Output mode: `classify` or `features`
    #[arg(long, default_value = "classify")]
    pub mode: String,
    /// Run inference on the GPU; CPU is the default when omitted
    #[arg(long)]
    pub gpu: bool,
    /// Run inference on the CPU (the default)
    #[arg(long, conflicts_with = "gpu")]
    pub cpu: bool,
    /// GPU device id
    #[arg(long, default_value_t = 0)]
    pub device_id: usize,
    /// Feature layer to extract, overriding the deploy descriptor
    #[arg(long)]
    pub layer: Option<String>,
    /// Log per-stage timings
    #[arg(long)]
    pub profile: bool,
}

/// Offline conversion of a binary mean blob to the mean-array file the
/// driver consumes.
#[derive(Debug, Parser)]
#[command(name = "convert_mean", version, about)]
pub struct ConvertMeanCli {
    /// Path to the binary mean blob (.binaryproto)
    pub mean_blob: PathBuf,
}
