pub mod onnx;
mod ort_coolnet;
mod ort_engine;
pub mod tensor_ops;

pub use ort_coolnet::CoolNetOrt;
pub use ort_engine::{OrtEngine, TensorAttr};
pub use tensor_ops::{normalize, permute_channels, NormalizedTensor, BGR_TO_RGB, RAW_SCALE};
