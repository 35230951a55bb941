mod record_writer;

pub use record_writer::{derive_output_path, RecordWriter, FRAMES_PER_CLIP};
