extern crate coolnet_infer;

use coolnet_infer::data::MeanProfile;
use coolnet_infer::infer_runners::{normalize, permute_channels, BGR_TO_RGB};
use coolnet_infer::video::BgrFrame;
use coolnet_infer::PipelineError;
use image::RgbImage;

fn gradient_frame(width: u32, height: u32) -> BgrFrame {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    BgrFrame::from_rgb(&img)
}

#[test]
fn normalize_shape_and_bounds() {
    let frame = gradient_frame(64, 48);
    let tensor = normalize(&frame, &MeanProfile::default(), 224).unwrap();

    assert_eq!(tensor.shape(), &[3, 224, 224]);
    for &v in tensor.as_array().iter() {
        assert!(v.is_finite());
        // 8-bit input minus the default per-channel mean stays inside
        // [-124, 151].
        assert!((-124.0..=151.0).contains(&v), "value out of range: {v}");
    }
}

#[test]
fn normalize_is_deterministic() {
    let frame = gradient_frame(32, 32);
    let mean = MeanProfile::default();
    let a = normalize(&frame, &mean, 227).unwrap();
    let b = normalize(&frame, &mean, 227).unwrap();
    assert_eq!(a, b);
}

#[test]
fn normalize_applies_mean_in_network_order() {
    // Solid color: b=10, g=20, r=30 everywhere.
    let img = RgbImage::from_pixel(16, 16, image::Rgb([30, 20, 10]));
    let frame = BgrFrame::from_rgb(&img);
    let tensor = normalize(&frame, &MeanProfile::default(), 8).unwrap();

    let arr = tensor.as_array();
    assert!((arr[[0, 4, 4]] - (30.0 - 104.0)).abs() < 1e-3);
    assert!((arr[[1, 4, 4]] - (20.0 - 117.0)).abs() < 1e-3);
    assert!((arr[[2, 4, 4]] - (10.0 - 124.0)).abs() < 1e-3);
}

#[test]
fn channel_permutation_is_involutive() {
    assert_eq!(BGR_TO_RGB, [2, 1, 0]);
    for px in [[0u8, 1, 2], [255, 0, 128], [7, 7, 7]] {
        assert_eq!(permute_channels(permute_channels(px)), px);
    }
}

#[test]
fn frame_channel_roundtrip_restores_image() {
    let img = RgbImage::from_fn(9, 5, |x, y| {
        image::Rgb([(3 * x) as u8, (5 * y) as u8, (x * y) as u8])
    });
    let frame = BgrFrame::from_rgb(&img);
    assert_eq!(frame.to_rgb8(), img);
}

#[test]
fn undersized_frame_buffer_is_a_decode_error() {
    let err = BgrFrame::new(vec![0u8; 10], 4, 4).unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
}

#[test]
fn empty_frame_is_a_decode_error() {
    let frame = BgrFrame::default();
    let err = normalize(&frame, &MeanProfile::default(), 224).unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
}
