//! Directory batch runs driven from a config file, with the real engine.

mod common;

use common::*;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thumbfit::batch::{ItemError, process_directory};
use thumbfit::config::{StrategyKind, load_config};
use thumbfit::imaging::RustEngine;
use thumbfit::strategy::Strategy;
use thumbfit::StrategyError;

fn write(root: &Path, relative: &str, data: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, data).unwrap();
}

fn strategy_from_toml(dir: &Path, toml: &str) -> Strategy {
    let path = dir.join("thumbfit.toml");
    fs::write(&path, toml).unwrap();
    let config = load_config(&path).unwrap();
    Strategy::from_config(
        &config.strategy,
        RustEngine::with_quality(config.encoding.quality()),
    )
}

#[test]
fn inscribe_batch_from_config() {
    let cfg = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    write(src.path(), "wide.jpg", &jpeg_bytes(400, 300));
    write(src.path(), "albums/tall.PNG", &solid_png_bytes(20, 40, [9, 9, 9, 255]));
    write(src.path(), "albums/notes.txt", b"not an image");

    let strategy = strategy_from_toml(
        cfg.path(),
        r#"
[strategy]
kind = "inscribe"
width = 15
height = 10
background = "none"
"#,
    );
    let report = process_directory(&strategy, src.path(), out.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.total(), 2);

    let wide = fs::read(out.path().join("wide.jpg")).unwrap();
    assert_eq!(format(&wide), ImageFormat::Jpeg);
    assert_eq!(dimensions(&wide), (15, 10));

    let tall = fs::read(out.path().join("albums/tall.PNG")).unwrap();
    assert_eq!(format(&tall), ImageFormat::Png);
    assert_eq!(dimensions(&tall), (15, 10));

    assert!(!out.path().join("albums/notes.txt").exists());
}

#[test]
fn resize_batch_keeps_going_past_bad_files() {
    let cfg = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    write(src.path(), "a.jpg", &jpeg_bytes(400, 300));
    write(src.path(), "b.jpg", b"truncated");
    write(src.path(), "c.png", &solid_png_bytes(300, 600, [0, 0, 0, 255]));

    let strategy = strategy_from_toml(cfg.path(), "[strategy]\nwidth = 15\nheight = 10\n");
    assert_eq!(strategy.name(), "resize");

    let report = process_directory(&strategy, src.path(), out.path()).unwrap();

    let processed: Vec<PathBuf> = report.processed.iter().map(|p| p.source.clone()).collect();
    assert_eq!(processed, vec![PathBuf::from("a.jpg"), PathBuf::from("c.png")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].source, PathBuf::from("b.jpg"));
    assert!(matches!(
        report.failed[0].error,
        ItemError::Strategy(StrategyError::InvalidBinaryImageData(_))
    ));

    assert_eq!(dimensions(&fs::read(out.path().join("a.jpg")).unwrap()), (13, 10));
    assert_eq!(dimensions(&fs::read(out.path().join("c.png")).unwrap()), (5, 10));
}

#[test]
fn config_overrides_reach_strategy() {
    let cfg = TempDir::new().unwrap();
    let path = cfg.path().join("thumbfit.toml");
    fs::write(&path, "[strategy]\nkind = \"inscribe\"\nbackground = \"rgba(0, 0, 0, 0.5)\"\n").unwrap();

    let mut config = load_config(&path).unwrap();
    assert_eq!(config.strategy.kind, StrategyKind::Inscribe);
    config.strategy.width = 4;
    config.strategy.height = 4;

    let strategy = Strategy::from_config(&config.strategy, RustEngine::new());
    let out = strategy_process(&strategy, &solid_png_bytes(8, 2, [255, 255, 255, 255]));
    let pixels = rgba(&out);

    assert_eq!(pixels.dimensions(), (4, 4));
    // 8x2 → 4x1 at y = round(1.5) = 2; row 0 is background
    assert_eq!(pixels.get_pixel(0, 0).0, [0, 0, 0, 128]);
    assert_eq!(pixels.get_pixel(0, 2).0, [255, 255, 255, 255]);
}

fn strategy_process(strategy: &Strategy, data: &[u8]) -> Vec<u8> {
    use thumbfit::ImageProcessingStrategy;
    strategy.process(data).unwrap()
}
