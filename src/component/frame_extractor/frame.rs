use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use uuid::Uuid;

/// 已編碼的單張影格（PNG）及其像素尺寸
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameImage {
    /// 讀取 PNG 標頭取得尺寸，不做完整解碼
    pub fn from_png(png: Vec<u8>) -> Result<Self> {
        let (width, height) = ImageReader::with_format(Cursor::new(&png), ImageFormat::Png)
            .into_dimensions()
            .context("無法讀取 PNG 影格尺寸")?;
        Ok(Self { png, width, height })
    }

    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("無法編碼 PNG 影格")?;
        Ok(Self {
            png,
            width: image.width(),
            height: image.height(),
        })
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .context("無法解碼 PNG 影格")
    }
}

/// 取樣得到的單張影格與其選取狀態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFrame {
    pub id: String,
    /// 距影片開頭的毫秒數
    pub timestamp_ms: u64,
    pub image: FrameImage,
    pub selected: bool,
}

impl ExtractedFrame {
    #[must_use]
    pub fn new(timestamp_ms: u64, image: FrameImage) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp_ms,
            image,
            selected: false,
        }
    }
}
