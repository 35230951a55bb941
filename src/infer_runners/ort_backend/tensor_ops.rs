//! Frame-to-tensor preprocessing.

use fast_image_resize::{
    images::Image as FirImage, pixels::PixelType, FilterType, ResizeAlg, ResizeOptions, Resizer,
};
use ndarray::{Array3, Array4, Axis};

use crate::data::MeanProfile;
use crate::error::PipelineError;
use crate::video::BgrFrame;

/// Scale factor applied after the [0,1] conversion, matching the
/// raw [0,255] scale the channel means were computed in.
pub const RAW_SCALE: f32 = 255.0;

/// Fixed decoder-order to network-order channel permutation. Swapping
/// the outer channels is its own inverse.
pub const BGR_TO_RGB: [usize; 3] = [2, 1, 0];

/// Apply the fixed channel permutation to one interleaved pixel.
pub fn permute_channels(px: [u8; 3]) -> [u8; 3] {
    [px[BGR_TO_RGB[0]], px[BGR_TO_RGB[1]], px[BGR_TO_RGB[2]]]
}

/// Network input tensor: (channels, size, size) f32, channel order
/// matching the network, mean-subtracted and scale-adjusted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor(Array3<f32>);

impl NormalizedTensor {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn as_array(&self) -> &Array3<f32> {
        &self.0
    }

    /// Prepend the batch axis: (1, channels, size, size).
    pub fn into_batched(self) -> Array4<f32> {
        self.0.insert_axis(Axis(0))
    }
}

/// Convert one decoded frame into the tensor the network expects:
/// scale to [0,1], reorder channels, resize to `target_size`, apply
/// the raw scale, subtract the per-channel mean. Pure function of its
/// inputs.
pub fn normalize(
    frame: &BgrFrame,
    mean: &MeanProfile,
    target_size: u32,
) -> Result<NormalizedTensor, PipelineError> {
    if frame.is_empty() {
        return Err(PipelineError::Decode("empty frame buffer".to_string()));
    }
    if target_size == 0 {
        return Err(PipelineError::ModelLoad("zero target size".to_string()));
    }

    let resized = resize_frame(frame, target_size)?;
    let buf = resized.buffer();
    let size = target_size as usize;
    let hw = size * size;
    let means = mean.channel_means();

    let mut out = vec![0.0f32; 3 * hw];
    for i in 0..hw {
        let px = [buf[3 * i], buf[3 * i + 1], buf[3 * i + 2]];
        let ordered = permute_channels(px);
        for (c, &v) in ordered.iter().enumerate() {
            out[c * hw + i] = (v as f32 / 255.0) * RAW_SCALE - means[c];
        }
    }

    let tensor = Array3::from_shape_vec((3, size, size), out).map_err(|e| {
        PipelineError::Runtime(format!("failed to shape input tensor: {e}"))
    })?;
    Ok(NormalizedTensor(tensor))
}

fn resize_frame<'a>(frame: &BgrFrame, target_size: u32) -> Result<FirImage<'a>, PipelineError> {
    let src = FirImage::from_vec_u8(
        frame.width(),
        frame.height(),
        frame.as_raw().to_vec(),
        PixelType::U8x3,
    )
    .map_err(|e| PipelineError::Decode(format!("invalid frame buffer: {e}")))?;

    let mut dst = FirImage::new(target_size, target_size, PixelType::U8x3);
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    let mut resizer = Resizer::new();
    resizer
        .resize(&src, &mut dst, &options)
        .map_err(|e| PipelineError::Decode(format!("failed to resize frame: {e}")))?;
    Ok(dst)
}
