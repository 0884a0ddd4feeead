/// 常用取樣間隔（毫秒）
pub const INTERVAL_PRESETS_MS: [u64; 6] = [100, 250, 500, 1000, 2000, 5000];

/// 輸入無法解析時使用的取樣間隔
pub const FALLBACK_INTERVAL_MS: u64 = 100;

/// 解析使用者輸入的取樣間隔，無效值或 0 退回 100 ms
#[must_use]
pub fn parse_interval(input: &str) -> u64 {
    input
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|&ms| ms > 0)
        .unwrap_or(FALLBACK_INTERVAL_MS)
}

/// 將秒數格式化為 `m:ss.mmm`
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).floor() as u64;
    let mins = total_ms / 60_000;
    let secs = (total_ms / 1000) % 60;
    let ms = total_ms % 1000;
    format!("{mins}:{secs:02}.{ms:03}")
}
