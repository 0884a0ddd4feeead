use super::frame::{ExtractedFrame, FrameImage};
use crate::tools::{VideoInfo, get_video_info};
use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 單次取樣的影格上限
pub const MAX_FRAMES: usize = 1000;

/// 兩段式 seek 的前置緩衝時間（毫秒）
const SEEK_MARGIN_MS: u64 = 2000;

/// 從 0 開始每隔 `interval_ms` 取一個時間點，直到影片結尾（含）
///
/// 時間點一律為間隔的整數倍，不會累積浮點誤差
#[must_use]
pub fn sample_timestamps(duration_ms: u64, interval_ms: u64, max_frames: usize) -> Vec<u64> {
    if interval_ms == 0 || max_frames == 0 {
        return Vec::new();
    }

    (0..)
        .map(|k: u64| k * interval_ms)
        .take_while(|&t| t <= duration_ms)
        .take(max_frames)
        .collect()
}

/// 建立單張擷取的 ffmpeg 參數
///
/// 兩段式 seek：
/// 1. `-ss` 在 `-i` 前：快速跳轉到最近的關鍵幀
/// 2. `-ss` 在 `-i` 後：精準解碼到目標時間點，避免拿到過時的影格
fn build_frame_args(video_path: &Path, timestamp_ms: u64) -> Vec<String> {
    let t0 = timestamp_ms.saturating_sub(SEEK_MARGIN_MS);
    let delta = timestamp_ms - t0;

    let mut args = vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
    ];

    if t0 > 0 {
        args.push("-ss".to_string());
        args.push(format_seconds(t0));
    }

    args.push("-i".to_string());
    args.push(video_path.to_string_lossy().to_string());

    if delta > 0 {
        args.push("-ss".to_string());
        args.push(format_seconds(delta));
    }

    args.extend(
        [
            "-frames:v",
            "1",
            "-an",
            "-sn",
            "-dn",
            "-threads",
            "1",
            "-f",
            "image2pipe",
            "-vcodec",
            "png",
            "-",
        ]
        .map(String::from),
    );

    args
}

fn format_seconds(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}

/// 擷取單張影格（原始解析度，PNG 編碼）
///
/// 時間點落在最後一個可解碼影格之後時回傳 `Ok(None)`
pub fn extract_frame(video_path: &Path, timestamp_ms: u64) -> Result<Option<FrameImage>> {
    debug!("擷取影格: timestamp={timestamp_ms}ms");

    let output = Command::new("ffmpeg")
        .args(build_frame_args(video_path, timestamp_ms))
        .output()
        .with_context(|| format!("無法執行 ffmpeg 擷取影格: {}", video_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffmpeg 擷取影格失敗 ({timestamp_ms}ms): {}", stderr.trim());
    }

    if output.stdout.is_empty() {
        return Ok(None);
    }

    FrameImage::from_png(output.stdout)
        .with_context(|| format!("影格資料無效 ({timestamp_ms}ms)"))
        .map(Some)
}

/// 依固定間隔取樣整部影片
///
/// 使用 rayon 平行擷取，每個 ffmpeg 程序使用單執行緒；
/// 結果依時間順序排列，任何一張失敗即整體失敗
pub fn extract_frames(
    video_path: &Path,
    interval_ms: u64,
    shutdown_signal: &Arc<AtomicBool>,
    progress: &ProgressBar,
) -> Result<(VideoInfo, Vec<ExtractedFrame>)> {
    if interval_ms == 0 {
        bail!("取樣間隔必須大於 0");
    }

    let video_info = get_video_info(video_path)?;
    if video_info.duration_seconds <= 0.0 {
        bail!("影片太短: {}", video_path.display());
    }

    let timestamps = sample_timestamps(video_info.duration_ms(), interval_ms, MAX_FRAMES);
    if timestamps.len() == MAX_FRAMES {
        warn!("已達影格上限 {MAX_FRAMES}，後段影片不會取樣");
    }

    info!(
        "開始取樣 {}: 間隔 {interval_ms}ms，共 {} 個時間點",
        video_path.display(),
        timestamps.len()
    );

    progress.set_length(timestamps.len() as u64);

    let images = timestamps
        .par_iter()
        .map(|&timestamp_ms| -> Result<(u64, Option<FrameImage>)> {
            if shutdown_signal.load(Ordering::SeqCst) {
                bail!("操作已取消");
            }
            let image = extract_frame(video_path, timestamp_ms)?;
            progress.inc(1);
            Ok((timestamp_ms, image))
        })
        .collect::<Result<Vec<_>>>()?;

    let frames: Vec<ExtractedFrame> = images
        .into_iter()
        .filter_map(|(timestamp_ms, image)| {
            if image.is_none() {
                debug!("時間點 {timestamp_ms}ms 沒有可解碼的影格，略過");
            }
            image.map(|image| ExtractedFrame::new(timestamp_ms, image))
        })
        .collect();

    info!("取樣完成: {} 張影格", frames.len());

    Ok((video_info, frames))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_timestamps_includes_end() {
        assert_eq!(sample_timestamps(2000, 500, MAX_FRAMES), vec![0, 500, 1000, 1500, 2000]);
    }

    #[test]
    fn test_sample_timestamps_uneven_duration() {
        assert_eq!(sample_timestamps(1250, 500, MAX_FRAMES), vec![0, 500, 1000]);
    }

    #[test]
    fn test_sample_timestamps_short_video() {
        assert_eq!(sample_timestamps(0, 500, MAX_FRAMES), vec![0]);
        assert_eq!(sample_timestamps(300, 500, MAX_FRAMES), vec![0]);
    }

    #[test]
    fn test_sample_timestamps_capped() {
        let timestamps = sample_timestamps(3_600_000, 100, MAX_FRAMES);
        assert_eq!(timestamps.len(), MAX_FRAMES);
        assert_eq!(timestamps.last(), Some(&99_900));
    }

    #[test]
    fn test_sample_timestamps_degenerate() {
        assert!(sample_timestamps(1000, 0, MAX_FRAMES).is_empty());
        assert!(sample_timestamps(1000, 100, 0).is_empty());
    }

    #[test]
    fn test_sample_timestamps_are_multiples() {
        let timestamps = sample_timestamps(10_000, 333, MAX_FRAMES);
        assert!(timestamps.iter().all(|t| t % 333 == 0));
        assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_build_frame_args_near_start_skips_fast_seek() {
        let args = build_frame_args(Path::new("/v.mp4"), 1500);
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert!(!args[..input_pos].contains(&"-ss".to_string()));
        assert_eq!(args[input_pos + 2], "-ss");
        assert_eq!(args[input_pos + 3], "1.500");
        assert_eq!(args.last().map(String::as_str), Some("-"));
    }

    #[test]
    fn test_build_frame_args_two_phase_seek() {
        let args = build_frame_args(Path::new("/v.mp4"), 12_345);
        assert_eq!(&args[3..5], ["-ss", "10.345"]);
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[input_pos + 2], "-ss");
        assert_eq!(args[input_pos + 3], "2.000");
    }

    #[test]
    fn test_build_frame_args_at_zero_has_no_seek() {
        let args = build_frame_args(Path::new("/v.mp4"), 0);
        assert!(!args.contains(&"-ss".to_string()));
    }
}
