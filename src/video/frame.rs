use image::RgbImage;

use crate::error::PipelineError;

/// One decoded frame: interleaved 8-bit samples, channel order
/// blue-green-red as the decoder produces them. Lives for a single
/// loop iteration.
#[derive(Debug, Clone, Default)]
pub struct BgrFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl BgrFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, PipelineError> {
        let expected = (width as usize) * (height as usize) * 3;
        if data.len() != expected {
            return Err(PipelineError::Decode(format!(
                "frame buffer holds {} bytes, expected {} for {}x{}x3",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Build a frame from an RGB image, swapping into decoder order.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for px in image.pixels() {
            let [r, g, b] = px.0;
            data.extend_from_slice(&[b, g, r]);
        }
        Self { data, width, height }
    }

    /// Swap back to RGB.
    pub fn to_rgb8(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width, self.height);
        for (i, px) in out.pixels_mut().enumerate() {
            let b = self.data[3 * i];
            let g = self.data[3 * i + 1];
            let r = self.data[3 * i + 2];
            px.0 = [r, g, b];
        }
        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
