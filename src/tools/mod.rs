mod ffprobe_info;
mod path_validator;

pub use ffprobe_info::{VideoInfo, get_video_info};
pub use path_validator::{ensure_directory_exists, validate_video_file};
