extern crate coolnet_infer;

use std::path::PathBuf;

use coolnet_infer::data::OutputMode;
use coolnet_infer::infer_runners::Network;
use coolnet_infer::output::RecordWriter;
use coolnet_infer::pipeline::run_pipeline;
use coolnet_infer::video::{BgrFrame, FrameSource};
use coolnet_infer::PipelineError;
use image::RgbImage;

/// Synthetic in-memory frame source, optionally failing partway
/// through the reported count.
struct StubSource {
    frames: Vec<BgrFrame>,
    reported: usize,
    fail_at: Option<usize>,
    cursor: usize,
}

impl StubSource {
    fn new(count: usize) -> Self {
        let frames = (0..count)
            .map(|i| {
                let img = RgbImage::from_pixel(8, 8, image::Rgb([i as u8, 0, 255 - i as u8]));
                BgrFrame::from_rgb(&img)
            })
            .collect();
        Self { frames, reported: count, fail_at: None, cursor: 0 }
    }

    fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }
}

impl FrameSource for StubSource {
    fn frame_count(&self) -> usize {
        self.reported
    }

    fn read_frame(&mut self) -> Result<BgrFrame, PipelineError> {
        if self.fail_at == Some(self.cursor) {
            return Err(PipelineError::Decode("simulated decode failure".to_string()));
        }
        let frame = self.frames[self.cursor].clone();
        self.cursor += 1;
        Ok(frame)
    }
}

/// Network stub: a fixed probability vector for every input, features
/// whose length depends only on the requested layer.
struct StubNet {
    probs: Vec<f32>,
}

impl Network for StubNet {
    fn classify(&mut self, _frame: &BgrFrame) -> Result<Vec<f32>, PipelineError> {
        Ok(self.probs.clone())
    }

    fn extract_features(
        &mut self,
        _frame: &BgrFrame,
        layer: &str,
    ) -> Result<Vec<f32>, PipelineError> {
        Ok(vec![0.25; layer.len() * 4])
    }

    fn input_size(&self) -> u32 {
        224
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("coolnet_{}_{}", std::process::id(), name))
}

#[test]
fn classify_run_writes_one_line_per_frame() {
    let path = temp_path("classify.txt");
    let mut source = StubSource::new(3);
    let mut net = StubNet { probs: vec![0.1, 0.9] };
    let mut writer = RecordWriter::create(&path).unwrap();

    let summary =
        run_pipeline(&mut source, &mut net, &mut writer, OutputMode::Classify, "fc7").unwrap();
    writer.finish().unwrap();

    assert_eq!(summary.frames, 3);
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["0,0.9", "1,0.9", "2,0.9"]);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn feature_run_labels_records_by_clip() {
    let path = temp_path("features.csv");
    let mut source = StubSource::new(2);
    let mut net = StubNet { probs: vec![0.5, 0.5] };
    let mut writer = RecordWriter::create(&path).unwrap();

    run_pipeline(&mut source, &mut net, &mut writer, OutputMode::ExtractFeatures, "fc7").unwrap();
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("vid0_frame_0,"));
    assert!(lines[1].starts_with("vid0_frame_1,"));
    // Label plus the layer-determined feature count.
    assert_eq!(lines[0].split(',').count(), 1 + "fc7".len() * 4);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn feature_length_is_invariant_across_frames() {
    let path = temp_path("feature_len.csv");
    let mut source = StubSource::new(4);
    let mut net = StubNet { probs: vec![] };
    let mut writer = RecordWriter::create(&path).unwrap();

    run_pipeline(&mut source, &mut net, &mut writer, OutputMode::ExtractFeatures, "pool5").unwrap();
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let widths: Vec<usize> = contents.lines().map(|l| l.split(',').count()).collect();
    assert_eq!(widths.len(), 4);
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn decode_failure_aborts_after_flushed_prefix() {
    let path = temp_path("aborted.txt");
    let mut source = StubSource::new(5).failing_at(2);
    let mut net = StubNet { probs: vec![0.1, 0.9] };
    let mut writer = RecordWriter::create(&path).unwrap();

    let err =
        run_pipeline(&mut source, &mut net, &mut writer, OutputMode::Classify, "fc7").unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
    assert_eq!(writer.records_written(), 2);
    drop(writer);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["0,0.9", "1,0.9"]);
    std::fs::remove_file(&path).unwrap();
}
