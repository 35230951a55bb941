use ndarray::{ArrayD, Axis};

use crate::data::{DeployConfig, InferConfig, MeanProfile};
use crate::error::PipelineError;
use crate::infer_runners::network::Network;
use crate::infer_runners::ort_backend::ort_engine::OrtEngine;
use crate::infer_runners::ort_backend::tensor_ops;
use crate::video::BgrFrame;

/// Network handle: session, deploy descriptor, and the preprocessing
/// transform (crop size + mean), all fixed at load time. Switching
/// the execution device requires reloading.
pub struct CoolNetOrt {
    engine: OrtEngine,
    deploy: DeployConfig,
    mean: MeanProfile,
}

impl CoolNetOrt {
    pub fn load(config: &InferConfig) -> Result<Self, PipelineError> {
        let deploy = DeployConfig::from_file(&config.deploy_path)?;
        let engine = OrtEngine::new(config, &deploy)?;
        Ok(Self { engine, deploy, mean: config.mean })
    }

    pub fn deploy(&self) -> &DeployConfig {
        &self.deploy
    }

    pub fn engine(&self) -> &OrtEngine {
        &self.engine
    }

    fn forward(
        &mut self,
        frame: &BgrFrame,
        layer: &str,
    ) -> Result<Vec<f32>, PipelineError> {
        let tensor = tensor_ops::normalize(frame, &self.mean, self.deploy.crop_size)?;
        let y = self.engine.run_fetch(tensor.into_batched(), layer)?;
        let flat = Self::batch_zero(y);
        if flat.is_empty() {
            return Err(PipelineError::Runtime(format!(
                "layer '{layer}' produced an empty tensor"
            )));
        }
        Ok(flat)
    }

    /// Flatten the batch-0 slice of a (1, ..) output; outputs without
    /// a batch axis are flattened whole.
    fn batch_zero(y: ArrayD<f32>) -> Vec<f32> {
        if y.ndim() > 1 {
            y.index_axis(Axis(0), 0).iter().copied().collect()
        } else {
            y.iter().copied().collect()
        }
    }
}

impl Network for CoolNetOrt {
    fn classify(&mut self, frame: &BgrFrame) -> Result<Vec<f32>, PipelineError> {
        let layer = self.deploy.prob_layer.clone();
        self.forward(frame, &layer)
    }

    fn extract_features(
        &mut self,
        frame: &BgrFrame,
        layer: &str,
    ) -> Result<Vec<f32>, PipelineError> {
        self.forward(frame, layer)
    }

    fn input_size(&self) -> u32 {
        self.deploy.crop_size
    }
}
