use crate::config::types::{Config, UserSettings, VideoExtensionTable};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

/// 編譯時嵌入的影片副檔名清單（不需要外部檔案）
const VIDEO_EXTENSIONS_JSON: &str = include_str!("../data/video_extensions.json");

pub const SETTINGS_FILE: &str = "settings.json";

impl Config {
    pub fn new() -> Result<Self> {
        let video_extensions = Self::load_embedded_video_extensions()?;
        let settings = match load_settings(Path::new(SETTINGS_FILE)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("設定檔讀取失敗，改用預設值: {e:#}");
                UserSettings::default()
            }
        };

        Ok(Self {
            video_extensions,
            settings,
        })
    }

    /// 從編譯時嵌入的 JSON 載入影片副檔名
    fn load_embedded_video_extensions() -> Result<VideoExtensionTable> {
        let extensions: Vec<String> =
            serde_json::from_str(VIDEO_EXTENSIONS_JSON).context("無法解析嵌入的影片副檔名設定")?;
        Ok(VideoExtensionTable::new(extensions))
    }
}

pub fn load_settings(path: &Path) -> Result<UserSettings> {
    if !path.exists() {
        return Ok(UserSettings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_extensions_contain_mp4() {
        let table = Config::load_embedded_video_extensions().unwrap();
        assert!(table.is_video_file(Path::new("movie.mp4")));
        assert!(table.is_video_file(Path::new("movie.webm")));
    }

    #[test]
    fn test_missing_settings_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn test_broken_settings_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_settings(&path).is_err());
    }
}
