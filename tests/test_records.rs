extern crate coolnet_infer;

use std::path::PathBuf;

use coolnet_infer::data::{InferenceResult, OutputMode};
use coolnet_infer::output::{derive_output_path, RecordWriter, FRAMES_PER_CLIP};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("coolnet_rec_{}_{}", std::process::id(), name))
}

#[test]
fn classification_record_is_index_and_top_score() {
    let path = temp_path("class.txt");
    let mut writer = RecordWriter::create(&path).unwrap();
    writer
        .write_record(0, &InferenceResult::Probabilities(vec![0.1, 0.9]))
        .unwrap();
    writer
        .write_record(1, &InferenceResult::Probabilities(vec![0.7, 0.2, 0.1]))
        .unwrap();
    assert_eq!(writer.records_written(), 2);
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "0,0.9\n1,0.7\n");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn feature_record_joins_values_after_clip_label() {
    let path = temp_path("feat.csv");
    let mut writer = RecordWriter::create(&path).unwrap();
    writer
        .write_record(95, &InferenceResult::Features(vec![1.5, -2.0, 0.0]))
        .unwrap();
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "vid1_frame_95,1.5,-2,0\n");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn clip_id_advances_every_ninety_frames() {
    assert_eq!(FRAMES_PER_CLIP, 90);

    let path = temp_path("clips.csv");
    let mut writer = RecordWriter::create(&path).unwrap();
    for index in [0usize, 89, 90, 180] {
        writer
            .write_record(index, &InferenceResult::Features(vec![0.0]))
            .unwrap();
    }
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let labels: Vec<&str> = contents
        .lines()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["vid0_frame_0", "vid0_frame_89", "vid1_frame_90", "vid2_frame_180"]
    );
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn output_suffix_tracks_mode() {
    let video = PathBuf::from("/data/run/clip.mp4");
    assert_eq!(
        derive_output_path(&video, OutputMode::Classify),
        PathBuf::from("/data/run/clip_class.txt")
    );
    assert_eq!(
        derive_output_path(&video, OutputMode::ExtractFeatures),
        PathBuf::from("/data/run/clip_coolnet_extracted.csv")
    );
}

#[test]
fn top_score_is_vector_maximum() {
    let r = InferenceResult::Probabilities(vec![0.1, 0.9, 0.3]);
    assert_eq!(r.top_score(), 0.9);
    assert_eq!(r.len(), 3);
}
