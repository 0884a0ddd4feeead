use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 5;

/// 預設取樣間隔（毫秒）
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// 預設精靈圖格子大小（像素，0 代表原始尺寸）
pub const DEFAULT_CELL_SIZE: u32 = 128;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoExtensionTable {
    extensions: Vec<String>,
}

impl VideoExtensionTable {
    #[must_use]
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    #[must_use]
    pub fn extensions_set(&self) -> HashSet<String> {
        self.extensions
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 單張影格的匯出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpg,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSheetSettings {
    /// 格子邊長，0 代表使用第一張影格的原始尺寸
    pub cell_size: u32,
    /// `transparent`、色名、`#rrggbb` 或 `rgb()/rgba()`
    pub background: String,
}

impl Default for SpriteSheetSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            background: "transparent".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub interval_ms: u64,
    pub sprite_sheet: SpriteSheetSettings,
    pub export_format: ExportFormat,
    pub recent_paths: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
            sprite_sheet: SpriteSheetSettings::default(),
            export_format: ExportFormat::default(),
            recent_paths: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub video_extensions: VideoExtensionTable,
    pub settings: UserSettings,
}
