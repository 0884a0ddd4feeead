//! 影格取樣元件
//!
//! 依固定間隔（毫秒）在影片中取樣，每個時間點以 ffmpeg 擷取一張原始解析度影格

mod extractor;
mod frame;
mod presets;

pub use extractor::{MAX_FRAMES, extract_frame, extract_frames, sample_timestamps};
pub use frame::{ExtractedFrame, FrameImage};
pub use presets::{FALLBACK_INTERVAL_MS, INTERVAL_PRESETS_MS, format_time, parse_interval};
