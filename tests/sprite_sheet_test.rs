//! 精靈圖合成與匯出的整合測試（不需要 ffmpeg）

use std::fs;

use frame_sprite_studio::component::FrameSession;
use frame_sprite_studio::component::frame_exporter::{export_frames, save_sprite_sheet};
use frame_sprite_studio::component::frame_extractor::{ExtractedFrame, FrameImage};
use frame_sprite_studio::component::sprite_sheet::{
    Background, CellSize, SpriteGrid, create_sprite_sheet,
};
use frame_sprite_studio::config::ExportFormat;
use frame_sprite_studio::tools::VideoInfo;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::path::PathBuf;

const COLORS: [[u8; 4]; 5] = [
    [255, 0, 0, 255],
    [0, 255, 0, 255],
    [0, 0, 255, 255],
    [255, 255, 0, 255],
    [0, 255, 255, 255],
];

fn solid_frame(timestamp_ms: u64, width: u32, height: u32, color: [u8; 4]) -> ExtractedFrame {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)));
    ExtractedFrame::new(timestamp_ms, FrameImage::from_image(&image).unwrap())
}

fn solid_frames(count: usize, width: u32, height: u32) -> Vec<ExtractedFrame> {
    (0..count)
        .map(|i| solid_frame(i as u64 * 500, width, height, COLORS[i % COLORS.len()]))
        .collect()
}

fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(png, ImageFormat::Png)
        .unwrap()
        .to_rgba8()
}

fn assert_close(actual: &Rgba<u8>, expected: [u8; 4]) {
    for (a, e) in actual.0.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 2, "pixel {actual:?} != {expected:?}");
    }
}

#[test]
fn test_fixed_cell_sprite_sheet_layout() {
    let frames = solid_frames(5, 320, 180);
    let refs: Vec<&ExtractedFrame> = frames.iter().collect();
    let background: Background = "white".parse().unwrap();

    let sheet = create_sprite_sheet(&refs, CellSize::Fixed(64), background)
        .unwrap()
        .expect("sprite sheet");

    assert_eq!(sheet.grid, SpriteGrid { columns: 3, rows: 2 });
    assert_eq!(sheet.frame_count, 5);
    assert_eq!(sheet.dimensions(), (192, 128));

    let canvas = decode(&sheet.png);
    assert_eq!(canvas.dimensions(), (192, 128));

    // 320x180 縮成 64x36，上下各留 14 像素
    assert_close(canvas.get_pixel(32, 32), COLORS[0]);
    assert_close(canvas.get_pixel(96, 32), COLORS[1]);
    assert_close(canvas.get_pixel(32, 96), COLORS[3]);
    assert_eq!(canvas.get_pixel(32, 2), &Rgba([255, 255, 255, 255]));
    assert_eq!(canvas.get_pixel(32, 64 + 60), &Rgba([255, 255, 255, 255]));

    // 第六格沒有影格，只有背景
    assert_eq!(canvas.get_pixel(160, 96), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_native_cell_sprite_sheet_is_transparent_and_uses_row_height() {
    let frames = solid_frames(3, 40, 20);
    let refs: Vec<&ExtractedFrame> = frames.iter().collect();

    let sheet = create_sprite_sheet(&refs, CellSize::Native, Background::Transparent)
        .unwrap()
        .expect("sprite sheet");

    assert_eq!((sheet.cell_width, sheet.cell_height), (40, 20));
    assert_eq!(sheet.dimensions(), (80, 40));

    let canvas = decode(&sheet.png);
    assert_eq!(canvas.get_pixel(0, 0), &Rgba(COLORS[0]));
    assert_eq!(canvas.get_pixel(79, 19), &Rgba(COLORS[1]));
    assert_eq!(canvas.get_pixel(5, 25), &Rgba(COLORS[2]));
    assert_eq!(canvas.get_pixel(60, 30)[3], 0);
}

#[test]
fn test_oversized_canvas_is_rejected() {
    let tiny = FrameImage::from_image(&DynamicImage::new_rgba8(1, 1)).unwrap();
    let huge = FrameImage {
        width: 20_000,
        height: 20_000,
        ..tiny
    };
    let frames = [ExtractedFrame::new(0, huge.clone()), ExtractedFrame::new(500, huge)];
    let refs: Vec<&ExtractedFrame> = frames.iter().collect();

    assert!(create_sprite_sheet(&refs, CellSize::Native, Background::Transparent).is_err());
}

#[test]
fn test_corrupt_frame_rejects_sprite_sheet() {
    let good = solid_frame(0, 4, 4, COLORS[0]);
    let bad = ExtractedFrame::new(
        500,
        FrameImage {
            png: b"broken".to_vec(),
            width: 4,
            height: 4,
        },
    );
    let refs = vec![&good, &bad];

    assert!(create_sprite_sheet(&refs, CellSize::Fixed(8), Background::Transparent).is_err());
}

#[test]
fn test_export_png_and_jpg() {
    let dir = tempfile::tempdir().unwrap();
    let frames = solid_frames(2, 16, 8);
    let refs: Vec<&ExtractedFrame> = frames.iter().collect();

    let png_dir = dir.path().join("png");
    let result = export_frames(&refs, &png_dir, ExportFormat::Png).unwrap();
    assert_eq!(result.count(), 2);
    assert_eq!(
        result.written,
        vec![png_dir.join("frame_0ms.png"), png_dir.join("frame_500ms.png")]
    );
    assert_eq!(fs::read(&result.written[1]).unwrap(), frames[1].image.png);

    let jpg_dir = dir.path().join("jpg");
    let result = export_frames(&refs, &jpg_dir, ExportFormat::Jpg).unwrap();
    let jpg = fs::read(&result.written[0]).unwrap();
    assert_eq!(image::guess_format(&jpg).unwrap(), ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&jpg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 8));
}

#[test]
fn test_save_sprite_sheet_names() {
    let dir = tempfile::tempdir().unwrap();
    let frames = solid_frames(4, 10, 10);
    let refs: Vec<&ExtractedFrame> = frames.iter().collect();

    let fixed = create_sprite_sheet(&refs, CellSize::Fixed(128), Background::Transparent)
        .unwrap()
        .unwrap();
    let path = save_sprite_sheet(&fixed, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("spritesheet_128.png"));
    assert_eq!(decode(&fs::read(&path).unwrap()).dimensions(), (256, 256));

    let native = create_sprite_sheet(&refs, CellSize::Native, Background::Transparent)
        .unwrap()
        .unwrap();
    let path = save_sprite_sheet(&native, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("spritesheet_native.png"));
}

#[test]
fn test_session_selection_drives_sprite_targets() {
    let frames = solid_frames(5, 8, 8);
    let info = VideoInfo {
        duration_seconds: 2.0,
        width: 8,
        height: 8,
        frame_rate: 25.0,
    };
    let mut session = FrameSession::new(PathBuf::from("/v.mp4"), info, 500, frames);

    let all = create_sprite_sheet(&session.sprite_targets(), CellSize::Fixed(8), Background::Transparent)
        .unwrap()
        .unwrap();
    assert_eq!(all.frame_count, 5);

    session.set_selection(&[1, 3]);
    let picked = create_sprite_sheet(&session.sprite_targets(), CellSize::Fixed(8), Background::Transparent)
        .unwrap()
        .unwrap();
    assert_eq!(picked.frame_count, 2);
    assert_eq!(picked.grid, SpriteGrid { columns: 2, rows: 1 });
}
