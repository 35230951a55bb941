mod capture;
mod frame;

pub use capture::{FrameSource, VideoFile};
pub use frame::BgrFrame;
