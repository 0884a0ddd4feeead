use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// 無法解析幀率時使用的預設值
const FALLBACK_FRAME_RATE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

impl VideoInfo {
    /// 影片長度（毫秒，四捨五入）
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        (self.duration_seconds * 1000.0).round().max(0.0) as u64
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub fn get_video_info(path: &Path) -> Result<VideoInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {}", stderr.trim());
    }

    let info = parse_ffprobe_json(&String::from_utf8_lossy(&output.stdout))
        .with_context(|| format!("無法讀取影片資訊: {}", path.display()))?;

    debug!(
        "影片資訊 {}: {:.3}s, {}x{}, {:.2} fps",
        path.display(),
        info.duration_seconds,
        info.width,
        info.height,
        info.frame_rate
    );

    Ok(info)
}

fn parse_ffprobe_json(json: &str) -> Result<VideoInfo> {
    let probe: FfprobeOutput = serde_json::from_str(json).context("無法解析 ffprobe 輸出")?;

    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| anyhow!("找不到視訊串流"))?;

    let width = video_stream
        .width
        .ok_or_else(|| anyhow!("無法取得影片寬度"))?;
    let height = video_stream
        .height
        .ok_or_else(|| anyhow!("無法取得影片高度"))?;

    // 優先從 format 取得長度，其次從 stream
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .or_else(|| {
            video_stream
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok())
        })
        .ok_or_else(|| anyhow!("無法取得影片長度"))?;

    let frame_rate = video_stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .unwrap_or(FALLBACK_FRAME_RATE);

    Ok(VideoInfo {
        duration_seconds,
        width,
        height,
        frame_rate,
    })
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: f64 = num_str.parse().ok()?;
        let den: f64 = den_str.parse().ok()?;
        return (den > 0.0).then(|| num / den);
    }
    rate.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate_fraction() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_frame_rate_invalid() {
        assert!(parse_frame_rate("invalid").is_none());
        assert!(parse_frame_rate("30/0").is_none());
    }

    #[test]
    fn test_parse_ffprobe_json_prefers_format_duration() {
        let json = r#"{
            "streams": [
                {"codec_type": "audio"},
                {"codec_type": "video", "width": 640, "height": 360,
                 "r_frame_rate": "25/1", "duration": "9.9"}
            ],
            "format": {"duration": "10.040000"}
        }"#;
        let info = parse_ffprobe_json(json).unwrap();
        assert_eq!(info.width, 640);
        assert_eq!(info.height, 360);
        assert!((info.frame_rate - 25.0).abs() < 0.01);
        assert_eq!(info.duration_ms(), 10_040);
    }

    #[test]
    fn test_parse_ffprobe_json_stream_duration_fallback() {
        let json = r#"{
            "streams": [{"codec_type": "video", "width": 2, "height": 2, "duration": "1.5"}],
            "format": {}
        }"#;
        let info = parse_ffprobe_json(json).unwrap();
        assert_eq!(info.duration_ms(), 1500);
        assert!((info.frame_rate - FALLBACK_FRAME_RATE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_ffprobe_json_without_video_stream() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {"duration": "3"}}"#;
        assert!(parse_ffprobe_json(json).is_err());
    }
}
