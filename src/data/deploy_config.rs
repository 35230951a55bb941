use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Deploy descriptor for a network variant: which input the graph
/// feeds, the crop resolution it was trained at, and the layer names
/// the two output modes read. Shipped next to the weights as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Name of the graph's image input tensor.
    #[serde(default = "default_input_name")]
    pub input_name: String,
    /// Input resolution; the preprocessor resizes every frame to
    /// `crop_size x crop_size`. 224 or 227 depending on the variant.
    pub crop_size: u32,
    #[serde(default = "default_channels")]
    pub channels: u32,
    /// Output layer holding the class-probability distribution.
    #[serde(default = "default_prob_layer")]
    pub prob_layer: String,
    /// Output layer read in feature-extraction mode.
    #[serde(default = "default_feature_layer")]
    pub feature_layer: String,
    /// Expected class count, checked against the graph when present.
    #[serde(default)]
    pub num_classes: Option<usize>,
}

fn default_input_name() -> String {
    "data".to_string()
}

fn default_channels() -> u32 {
    3
}

fn default_prob_layer() -> String {
    "prob".to_string()
}

fn default_feature_layer() -> String {
    "fc7".to_string()
}

impl DeployConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: DeployConfig = serde_json::from_str(&raw).map_err(|e| {
            PipelineError::ModelLoad(format!(
                "failed to parse deploy descriptor {}: {e}",
                path.as_ref().display()
            ))
        })?;
        if config.crop_size == 0 {
            return Err(PipelineError::ModelLoad(
                "deploy descriptor declares a zero crop size".to_string(),
            ));
        }
        if config.channels != 3 {
            return Err(PipelineError::ModelLoad(format!(
                "deploy descriptor declares {} channels, only 3-channel input is supported",
                config.channels
            )));
        }
        Ok(config)
    }
}
