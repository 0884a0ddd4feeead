use super::background::Background;
use super::grid::SpriteGrid;
use crate::component::frame_extractor::ExtractedFrame;
use anyhow::{Context, Result, bail};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{debug, info};
use rayon::prelude::*;
use std::fmt;
use std::io::Cursor;

/// 畫布像素上限，避免原始尺寸模式配置出數 GB 的畫布
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// 格子邊長上限（像素）
pub const MAX_CELL_SIZE: u32 = 4096;

/// 格子尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSize {
    /// 正方形格子，影格等比縮放置中（contain）；`Fixed(0)` 視同 `Native`
    Fixed(u32),
    /// 使用第一張影格的原始尺寸，影格不縮放
    Native,
}

impl CellSize {
    /// 設定值 0 代表原始尺寸
    #[must_use]
    pub const fn from_setting(size: u32) -> Self {
        if size == 0 { Self::Native } else { Self::Fixed(size) }
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => write!(f, "{size}"),
            Self::Native => f.write_str("native"),
        }
    }
}

/// 影格在格子內的繪製位置（相對於格子左上角）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 等比縮放至格子內並置中，不裁切；來源較小時會放大
#[must_use]
pub fn aspect_fit(src_width: u32, src_height: u32, cell_width: u32, cell_height: u32) -> FitRect {
    let src_width = src_width.max(1);
    let src_height = src_height.max(1);

    let ratio = (f64::from(cell_width) / f64::from(src_width))
        .min(f64::from(cell_height) / f64::from(src_height));

    let width = ((f64::from(src_width) * ratio).round() as u32).clamp(1, cell_width.max(1));
    let height = ((f64::from(src_height) * ratio).round() as u32).clamp(1, cell_height.max(1));

    FitRect {
        x: cell_width.saturating_sub(width) / 2,
        y: cell_height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// 合成後的精靈圖（PNG）與其網格資訊
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub png: Vec<u8>,
    pub grid: SpriteGrid,
    pub cell: CellSize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
}

impl SpriteSheet {
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// 將影格依序合成為一張精靈圖
///
/// 沒有影格時回傳 `Ok(None)`；整張畫布只在最後編碼一次
pub fn create_sprite_sheet(
    frames: &[&ExtractedFrame],
    cell: CellSize,
    background: Background,
) -> Result<Option<SpriteSheet>> {
    let Some(first) = frames.first() else {
        return Ok(None);
    };

    let cell = match cell {
        CellSize::Fixed(0) => CellSize::Native,
        other => other,
    };

    let (cell_width, cell_height) = match cell {
        CellSize::Fixed(size) => (size, size),
        CellSize::Native => (first.image.width, first.image.height),
    };

    let grid = SpriteGrid::for_count(frames.len());
    let Some((canvas_width, canvas_height)) = grid.canvas_size(cell_width, cell_height) else {
        bail!(
            "精靈圖過大: {} 欄 x {cell_width}，{} 列 x {cell_height}",
            grid.columns,
            grid.rows
        );
    };

    if u64::from(canvas_width) * u64::from(canvas_height) > MAX_CANVAS_PIXELS {
        bail!(
            "精靈圖過大: {canvas_width}x{canvas_height}，請縮小格子尺寸或減少影格數量"
        );
    }

    debug!(
        "合成 {} 張影格為 {}x{} 網格，格子 {cell_width}x{cell_height}",
        frames.len(),
        grid.columns,
        grid.rows
    );

    // 平行解碼與縮放，繪製維持原順序
    let tiles = frames
        .par_iter()
        .map(|frame| -> Result<(RgbaImage, u32, u32)> {
            let decoded = frame
                .image
                .decode()
                .with_context(|| format!("無法解碼影格 {}ms", frame.timestamp_ms))?
                .to_rgba8();

            Ok(match cell {
                CellSize::Native => (decoded, 0, 0),
                CellSize::Fixed(_) => {
                    let fit = aspect_fit(decoded.width(), decoded.height(), cell_width, cell_height);
                    let resized =
                        imageops::resize(&decoded, fit.width, fit.height, FilterType::Lanczos3);
                    (resized, fit.x, fit.y)
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut canvas = RgbaImage::from_pixel(canvas_width, canvas_height, background.pixel());

    for (index, (tile, offset_x, offset_y)) in tiles.iter().enumerate() {
        let (x, y) = grid.cell_origin(index, cell_width, cell_height);
        imageops::overlay(
            &mut canvas,
            tile,
            i64::from(x + offset_x),
            i64::from(y + offset_y),
        );
    }

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("無法編碼精靈圖")?;

    info!(
        "精靈圖已合成: {} 張影格, {canvas_width}x{canvas_height}",
        frames.len()
    );

    Ok(Some(SpriteSheet {
        png,
        grid,
        cell,
        cell_width,
        cell_height,
        width: canvas_width,
        height: canvas_height,
        frame_count: frames.len(),
    }))
}
