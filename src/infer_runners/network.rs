use crate::error::PipelineError;
use crate::video::BgrFrame;

/// A loaded network ready to answer per-frame queries. Calls mutate
/// the single-slot input buffer and run a full forward pass, so the
/// handle is `&mut` and must not be shared across threads.
pub trait Network {
    /// Full class-probability distribution for one frame, in the
    /// network's class-index ordering.
    fn classify(&mut self, frame: &BgrFrame) -> Result<Vec<f32>, PipelineError>;

    /// Flattened activations of the named layer for one frame. The
    /// length depends only on the layer and the network, never on the
    /// image.
    fn extract_features(
        &mut self,
        frame: &BgrFrame,
        layer: &str,
    ) -> Result<Vec<f32>, PipelineError>;

    /// Input resolution frames are resized to before the forward pass.
    fn input_size(&self) -> u32;
}
