//! Options for loading and running a network.

use crate::data::{InferenceDevice, MeanProfile, OutputMode};

#[derive(Debug, Clone)]
pub struct InferConfig {
    /// Path to the network weights (.onnx).
    pub model_path: String,
    /// Path to the deploy descriptor (.json).
    pub deploy_path: String,
    pub device: InferenceDevice,
    pub mean: MeanProfile,
    pub output_mode: OutputMode,
    /// Overrides the deploy descriptor's feature layer when set.
    pub feature_layer: Option<String>,
    pub profile: bool,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            model_path: String::new(),
            deploy_path: String::new(),
            device: InferenceDevice::CPU,
            mean: MeanProfile::default(),
            output_mode: OutputMode::Classify,
            feature_layer: None,
            profile: false,
        }
    }
}

#[allow(dead_code)]
impl InferConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_model(mut self, model_path: &str) -> Self {
        self.model_path = model_path.to_string();
        self
    }

    pub fn with_deploy(mut self, deploy_path: &str) -> Self {
        self.deploy_path = deploy_path.to_string();
        self
    }

    pub fn with_device(mut self, device: InferenceDevice) -> Self {
        self.device = device;
        self
    }

    pub fn with_mean(mut self, mean: MeanProfile) -> Self {
        self.mean = mean;
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    pub fn with_feature_layer(mut self, layer: &str) -> Self {
        self.feature_layer = Some(layer.to_string());
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }
}
