use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Per-channel baseline subtracted during preprocessing, in the
/// network's channel order and in raw [0,255] scale.
pub const DEFAULT_CHANNEL_MEANS: [f32; 3] = [104.0, 117.0, 124.0];

/// On-disk mean-array file, as written by `convert_mean`. `shape` is
/// either `[3]` (one value per channel) or `[3, height, width]` (a
/// full mean image).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanArray {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl MeanArray {
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }
}

/// Immutable per-run mean baseline. Exactly one source is active per
/// run: the built-in constant triple, or a mean-array file whose
/// spatial dimensions are averaged away per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanProfile {
    means: [f32; 3],
}

impl Default for MeanProfile {
    fn default() -> Self {
        Self { means: DEFAULT_CHANNEL_MEANS }
    }
}

impl MeanProfile {
    pub fn from_channel_means(means: [f32; 3]) -> Self {
        Self { means }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let array: MeanArray = serde_json::from_str(&raw).map_err(|e| {
            PipelineError::ModelLoad(format!(
                "failed to parse mean file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_mean_array(&array)
    }

    pub fn from_mean_array(array: &MeanArray) -> Result<Self, PipelineError> {
        if array.data.len() != array.element_count() {
            return Err(PipelineError::ModelLoad(format!(
                "mean array holds {} values but its shape {:?} implies {}",
                array.data.len(),
                array.shape,
                array.element_count()
            )));
        }
        match array.shape.as_slice() {
            [3] => Ok(Self::from_channel_means([
                array.data[0],
                array.data[1],
                array.data[2],
            ])),
            [3, h, w] if *h > 0 && *w > 0 => {
                // Collapse the mean image to one value per channel.
                let plane = h * w;
                let mut means = [0f32; 3];
                for (c, mean) in means.iter_mut().enumerate() {
                    let sum: f32 = array.data[c * plane..(c + 1) * plane].iter().sum();
                    *mean = sum / plane as f32;
                }
                Ok(Self::from_channel_means(means))
            }
            other => Err(PipelineError::ModelLoad(format!(
                "unsupported mean array shape {other:?}, expected [3] or [3, H, W]"
            ))),
        }
    }

    pub fn channel_means(&self) -> [f32; 3] {
        self.means
    }
}
