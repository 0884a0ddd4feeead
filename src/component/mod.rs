//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod frame_exporter;
pub mod frame_extractor;
pub mod frame_session;
pub mod frame_studio;
pub mod sprite_sheet;

pub use frame_session::FrameSession;
pub use frame_studio::FrameStudio;
