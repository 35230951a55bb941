//! Binary mean-blob conversion. The blob is the legacy protobuf
//! format pretrained means ship in; the subset of the schema needed to
//! read one is declared here and decoded with prost.

use std::path::{Path, PathBuf};

use prost::Message;

use crate::data::MeanArray;
use crate::error::PipelineError;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlobShape {
    #[prost(int64, repeated, tag = "1")]
    pub dim: Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlobProto {
    #[prost(message, optional, tag = "7")]
    pub shape: Option<BlobShape>,
    #[prost(float, repeated, tag = "5")]
    pub data: Vec<f32>,
    #[prost(float, repeated, tag = "6")]
    pub diff: Vec<f32>,
    // Legacy 4-D dimension fields, still emitted by older exporters.
    #[prost(int32, optional, tag = "1")]
    pub num: Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub channels: Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub height: Option<i32>,
    #[prost(int32, optional, tag = "4")]
    pub width: Option<i32>,
}

impl BlobProto {
    /// Blob dimensions, preferring the `shape` message over the legacy
    /// num/channels/height/width fields.
    pub fn dims(&self) -> Vec<usize> {
        if let Some(shape) = &self.shape {
            return shape.dim.iter().map(|&d| d.max(0) as usize).collect();
        }
        [self.num, self.channels, self.height, self.width]
            .iter()
            .filter_map(|d| *d)
            .map(|d| d.max(0) as usize)
            .collect()
    }
}

/// Decode a binary mean blob into the mean-array form the pipeline
/// consumes. A leading batch dimension of 1 is dropped.
pub fn blob_to_mean_array(blob: &BlobProto) -> Result<MeanArray, PipelineError> {
    let mut dims = blob.dims();
    if dims.first() == Some(&1) && dims.len() == 4 {
        dims.remove(0);
    }
    let expected: usize = dims.iter().product();
    if dims.is_empty() || expected == 0 {
        return Err(PipelineError::ModelLoad(
            "mean blob carries no shape information".to_string(),
        ));
    }
    if blob.data.len() != expected {
        return Err(PipelineError::ModelLoad(format!(
            "mean blob holds {} values but its shape {:?} implies {}",
            blob.data.len(),
            dims,
            expected
        )));
    }
    Ok(MeanArray { shape: dims, data: blob.data.clone() })
}

/// One-shot offline conversion: read `<name>.binaryproto`, write
/// `<name>.json` next to it. Returns the written path.
pub fn convert_mean_file<P: AsRef<Path>>(path: P) -> Result<PathBuf, PipelineError> {
    let path = path.as_ref();
    let raw = std::fs::read(path)?;
    let blob = BlobProto::decode(raw.as_slice()).map_err(|e| {
        PipelineError::ModelLoad(format!("failed to decode mean blob {}: {e}", path.display()))
    })?;
    let array = blob_to_mean_array(&blob)?;

    let out_path = path.with_extension("json");
    let json = serde_json::to_string(&array).map_err(|e| {
        PipelineError::Io(format!("failed to serialize mean array: {e}"))
    })?;
    std::fs::write(&out_path, json)?;
    Ok(out_path)
}
