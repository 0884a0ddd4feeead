pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, DEFAULT_CELL_SIZE, DEFAULT_INTERVAL_MS, ExportFormat, Language, MAX_RECENT_PATHS,
    SpriteSheetSettings, UserSettings, VideoExtensionTable,
};
