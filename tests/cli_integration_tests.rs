use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

fn setup(test_name: &str) -> (&'static str, PathBuf) {
    let binary = env!("CARGO_BIN_EXE_imgpress");
    let work = Path::new(env!("CARGO_TARGET_TMPDIR")).join(test_name);
    let _ = fs::remove_dir_all(&work);
    fs::create_dir_all(&work).unwrap();
    (binary, work)
}

fn jpeg_fixture(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let mut pixels = RgbImage::new(width, height);
    for (x, y, pixel) in pixels.enumerate_pixels_mut() {
        *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
    }
    let path = dir.join(name);
    DynamicImage::ImageRgb8(pixels).save(&path).unwrap();
    path
}

#[test]
fn test_compress_and_resize_succeeds() {
    let (binary, work) = setup("compress_and_resize");
    let input = jpeg_fixture(&work, "input.jpg", 80, 60);
    let dest = work.join("out");
    fs::create_dir_all(&dest).unwrap();

    let result = Command::new(binary)
        .env("IMGPRESS_HOME", &work)
        .args([
            "-quality",
            "70",
            "-resize",
            "0.5",
            "-output",
            dest.to_str().unwrap(),
            input.to_str().unwrap(),
        ])
        .output()
        .expect("imgpress did not run");

    assert!(result.status.success());
    let exported = dest.join("input.jpg");
    assert!(exported.exists());
    assert_eq!(image::open(exported).unwrap().dimensions(), (40, 30));
    // the chosen export directory is persisted for the next run
    assert!(work.join("settings/export_folder.json").exists());
}

#[test]
fn test_run_without_images_fails() {
    let (binary, work) = setup("run_without_images");
    let dest = work.join("out");
    fs::create_dir_all(&dest).unwrap();

    let result = Command::new(binary)
        .env("IMGPRESS_HOME", &work)
        .args(["-output", dest.to_str().unwrap()])
        .output()
        .expect("imgpress did not run");

    assert!(!result.status.success());
}

#[test]
fn test_unknown_option_fails() {
    let (binary, work) = setup("unknown_option");

    let result = Command::new(binary)
        .env("IMGPRESS_HOME", &work)
        .args(["-frobnicate"])
        .output()
        .expect("imgpress did not run");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("frobnicate"));
}

#[test]
fn test_help_prints_options() {
    let (binary, work) = setup("help");

    let result = Command::new(binary)
        .env("IMGPRESS_HOME", &work)
        .arg("-help")
        .output()
        .expect("imgpress did not run");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("-quality"));
    assert!(stdout.contains("-delete-originals"));
}
