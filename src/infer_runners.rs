pub mod network;
pub mod ort_backend;

pub use network::Network;
pub use ort_backend::*;
