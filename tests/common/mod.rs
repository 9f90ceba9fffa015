#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Deterministic high-entropy image; JPEG can't shrink it much at high quality.
pub fn noise_image(width: u32, height: u32) -> DynamicImage {
    let mut state: u32 = 0x2545_F491;
    let buf = RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let b = state.to_le_bytes();
        Rgb([b[0], b[1], b[2]])
    });
    DynamicImage::ImageRgb8(buf)
}

pub fn write_noise_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    noise_image(width, height).save(&path).unwrap();
    path
}

pub fn write_blank_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    DynamicImage::new_rgb8(width, height).save(&path).unwrap();
    path
}
