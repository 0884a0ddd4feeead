use crate::component::frame_extractor::ExtractedFrame;
use crate::component::sprite_sheet::SpriteSheet;
use crate::config::ExportFormat;
use crate::tools::ensure_directory_exists;
use anyhow::{Context, Result};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use log::{debug, info};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const JPEG_QUALITY: u8 = 92;

/// 匯出結果
#[derive(Debug, Default)]
pub struct ExportResult {
    pub written: Vec<PathBuf>,
}

impl ExportResult {
    #[must_use]
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

/// `frame_{timestamp}ms.{ext}`
#[must_use]
pub fn frame_file_name(frame: &ExtractedFrame, format: ExportFormat) -> String {
    format!("frame_{}ms.{}", frame.timestamp_ms, format.extension())
}

/// 將影格逐張寫入資料夾
///
/// PNG 直接寫出原始位元組；JPG 去除 alpha 後重新編碼
pub fn export_frames(
    frames: &[&ExtractedFrame],
    output_dir: &Path,
    format: ExportFormat,
) -> Result<ExportResult> {
    ensure_directory_exists(output_dir)?;

    let mut result = ExportResult::default();

    for frame in frames {
        let path = output_dir.join(frame_file_name(frame, format));

        match format {
            ExportFormat::Png => fs::write(&path, &frame.image.png)
                .with_context(|| format!("無法寫入影格: {}", path.display()))?,
            ExportFormat::Jpg => write_jpeg(&frame.image.decode()?, &path)?,
        }

        debug!("影格已匯出: {}", path.display());
        result.written.push(path);
    }

    info!("已匯出 {} 張影格至 {}", result.count(), output_dir.display());
    Ok(result)
}

fn write_jpeg(image: &DynamicImage, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("無法建立檔案: {}", path.display()))?;
    let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    DynamicImage::ImageRgb8(image.to_rgb8())
        .write_with_encoder(encoder)
        .with_context(|| format!("無法編碼 JPG: {}", path.display()))
}

/// `spritesheet_{cell}.png`，原始尺寸模式為 `spritesheet_native.png`
#[must_use]
pub fn sprite_sheet_file_name(sheet: &SpriteSheet) -> String {
    format!("spritesheet_{}.png", sheet.cell)
}

pub fn save_sprite_sheet(sheet: &SpriteSheet, output_dir: &Path) -> Result<PathBuf> {
    ensure_directory_exists(output_dir)?;

    let path = output_dir.join(sprite_sheet_file_name(sheet));
    fs::write(&path, &sheet.png)
        .with_context(|| format!("無法寫入精靈圖: {}", path.display()))?;

    info!("精靈圖已儲存: {}", path.display());
    Ok(path)
}
