mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use common::{write_blank_png, write_noise_png};
use facepic::encode_jpeg;
use image::GenericImageView;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;

fn facepic() -> Command {
    let mut cmd = Command::cargo_bin("facepic").unwrap();
    cmd.env_remove("FACEPIC_UPLOAD_URL");
    cmd
}

#[test]
fn test_cli_help() {
    facepic().arg("--help").assert().success();
}

#[test]
fn test_subcommand_help() {
    for sub in ["quality", "thumbnail", "convert", "upload", "info"] {
        facepic().args([sub, "--help"]).assert().success();
    }
}

#[test]
fn test_quality_missing_max_kb() {
    facepic().args(["quality", "in.jpg"]).assert().failure();
}

#[test]
fn test_quality_nonexistent_file() {
    facepic()
        .args(["quality", "nonexistent.jpg", "out.jpg", "--max-kb", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_quality_fake_image_data() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("fake.jpg");
    let mut file = File::create(input.path()).unwrap();
    file.write_all(b"fake image data").unwrap();

    facepic()
        .arg("quality")
        .arg(input.path())
        .arg(temp.child("out.jpg").path())
        .args(["--max-kb", "100"])
        .assert()
        .failure();
}

#[test]
fn test_quality_zero_target() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "face.png", 32, 32);

    facepic()
        .arg("quality")
        .arg(&input)
        .args(["--max-kb", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target"));
}

#[test]
fn test_quality_rejects_png_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "face.png", 32, 32);

    facepic()
        .arg("quality")
        .arg(&input)
        .arg(temp.child("out.png").path())
        .args(["--max-kb", "10"])
        .assert()
        .failure();
}

#[test]
fn test_quality_meets_ceiling() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_noise_png(temp.path(), "noise.png", 640, 480);
    let full = encode_jpeg(&image::open(&input).unwrap(), 100).unwrap();
    let target_kb = full.len() / 1024 / 2;
    let output = temp.child("small.jpg");

    facepic()
        .arg("quality")
        .arg(&input)
        .arg(output.path())
        .args(["--max-kb", &target_kb.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("JPEG quality"));

    output.assert(predicate::path::exists());
    let written = std::fs::metadata(output.path()).unwrap().len() as usize;
    assert!(written <= target_kb * 1024);
    assert!(input.exists());
}

#[test]
fn test_quality_unreachable_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_noise_png(temp.path(), "noise.png", 256, 256);
    let output = temp.child("never.jpg");

    facepic()
        .arg("quality")
        .arg(&input)
        .arg(output.path())
        .args(["--max-kb", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot reach 1 KB"));

    output.assert(predicate::path::missing());
    assert!(input.exists());
}

#[test]
fn test_quality_default_output_and_delete_source() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "face.png", 64, 64);

    facepic()
        .arg("quality")
        .arg(&input)
        .args(["--max-kb", "50", "--delete-source"])
        .assert()
        .success();

    temp.child("face_compressed.jpg")
        .assert(predicate::path::exists());
    assert!(!input.exists());
}

#[test]
fn test_quality_quiet_mode() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "face.png", 16, 16);

    facepic()
        .arg("--quiet")
        .arg("quality")
        .arg(&input)
        .args(["--max-kb", "50"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_thumbnail_downsamples() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "wide.png", 400, 300);
    let output = temp.child("thumb.png");

    facepic()
        .arg("thumbnail")
        .arg(&input)
        .arg(output.path())
        .args(["-w", "100", "-H", "75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample factor: 4"));

    let decoded = image::open(output.path()).unwrap();
    assert_eq!(decoded.dimensions(), (100, 75));
}

#[test]
fn test_thumbnail_full_size_photo() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "photo.png", 4000, 3000);
    let output = temp.child("photo_small.jpg");

    facepic()
        .arg("thumbnail")
        .arg(&input)
        .arg(output.path())
        .args(["-w", "1000", "-H", "750"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample factor: 4"));

    let decoded = image::open(output.path()).unwrap();
    assert_eq!(decoded.dimensions(), (1000, 750));
}

#[test]
fn test_thumbnail_never_upscales() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "small.png", 120, 80);
    let output = temp.child("same.jpg");

    facepic()
        .arg("thumbnail")
        .arg(&input)
        .arg(output.path())
        .args(["-w", "1080", "-H", "1920"])
        .assert()
        .success();

    let decoded = image::open(output.path()).unwrap();
    assert_eq!(decoded.dimensions(), (120, 80));
}

#[test]
fn test_thumbnail_invalid_target() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "face.png", 40, 40);

    facepic()
        .arg("thumbnail")
        .arg(&input)
        .args(["-w", "0", "-H", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target"));
}

#[test]
fn test_convert_to_png() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_noise_png(temp.path(), "noise.png", 30, 30);
    let output = temp.child("copy.png");

    facepic()
        .arg("convert")
        .arg(&input)
        .arg(output.path())
        .args(["--optimize", "1"])
        .assert()
        .success();

    let original = image::open(&input).unwrap();
    let converted = image::open(output.path()).unwrap();
    assert_eq!(original.to_rgb8(), converted.to_rgb8());
}

#[test]
fn test_convert_rejects_jpeg_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "face.png", 30, 30);

    facepic()
        .arg("convert")
        .arg(&input)
        .arg(temp.child("copy.jpg").path())
        .assert()
        .failure();
}

#[test]
fn test_info_reports_thumbnail_plan() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "wide.png", 400, 300);

    facepic()
        .arg("info")
        .arg(&input)
        .args(["-w", "100", "-H", "75", "--max-kb", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("400x300"))
        .stdout(predicate::str::contains("factor 4 -> 100x75"));
}

#[test]
fn test_info_nonexistent_file() {
    facepic().args(["info", "nonexistent.jpg"]).assert().failure();
}

#[test]
fn test_upload_requires_endpoint() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = write_blank_png(temp.path(), "face.png", 16, 16);

    facepic()
        .arg("upload")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no upload endpoint"));
}
