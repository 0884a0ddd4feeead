use crate::config::VideoExtensionTable;
use anyhow::{Result, bail};
use std::path::Path;

pub fn validate_video_file(path: &Path, extensions: &VideoExtensionTable) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    if !extensions.is_video_file(path) {
        bail!("不支援的影片格式: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
