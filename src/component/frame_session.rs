use crate::component::frame_extractor::ExtractedFrame;
use crate::tools::VideoInfo;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 一次取樣的結果與使用者的選取狀態
///
/// 重新取樣或重設時整個 session 直接丟棄
#[derive(Debug, Clone)]
pub struct FrameSession {
    video_path: PathBuf,
    video_info: VideoInfo,
    interval_ms: u64,
    frames: Vec<ExtractedFrame>,
}

impl FrameSession {
    #[must_use]
    pub fn new(
        video_path: PathBuf,
        video_info: VideoInfo,
        interval_ms: u64,
        frames: Vec<ExtractedFrame>,
    ) -> Self {
        Self {
            video_path,
            video_info,
            interval_ms,
            frames,
        }
    }

    #[must_use]
    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    #[must_use]
    pub const fn video_info(&self) -> &VideoInfo {
        &self.video_info
    }

    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[must_use]
    pub fn frames(&self) -> &[ExtractedFrame] {
        &self.frames
    }

    /// 切換指定影格的選取狀態，找不到 id 時回傳 false
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.frames.iter_mut().find(|f| f.id == id) {
            Some(frame) => {
                frame.selected = !frame.selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        self.frames.iter_mut().for_each(|f| f.selected = true);
    }

    pub fn select_none(&mut self) {
        self.frames.iter_mut().for_each(|f| f.selected = false);
    }

    /// 只選取指定索引，其餘取消；超出範圍的索引忽略
    pub fn set_selection(&mut self, indices: &[usize]) {
        let indices: HashSet<usize> = indices.iter().copied().collect();
        for (index, frame) in self.frames.iter_mut().enumerate() {
            frame.selected = indices.contains(&index);
        }
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.frames.iter().filter(|f| f.selected).count()
    }

    #[must_use]
    pub fn selected(&self) -> Vec<&ExtractedFrame> {
        self.frames.iter().filter(|f| f.selected).collect()
    }

    /// 精靈圖的來源：有選取時用選取的影格，否則用全部
    #[must_use]
    pub fn sprite_targets(&self) -> Vec<&ExtractedFrame> {
        let selected = self.selected();
        if selected.is_empty() {
            self.frames.iter().collect()
        } else {
            selected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::frame_extractor::FrameImage;
    use image::DynamicImage;

    fn session(count: usize) -> FrameSession {
        let image = FrameImage::from_image(&DynamicImage::new_rgba8(2, 2)).unwrap();
        let frames = (0..count as u64)
            .map(|i| ExtractedFrame::new(i * 500, image.clone()))
            .collect();
        let info = VideoInfo {
            duration_seconds: 2.0,
            width: 2,
            height: 2,
            frame_rate: 30.0,
        };
        FrameSession::new(PathBuf::from("/v.mp4"), info, 500, frames)
    }

    #[test]
    fn test_toggle() {
        let mut s = session(3);
        let id = s.frames()[1].id.clone();
        assert!(s.toggle(&id));
        assert_eq!(s.selected_count(), 1);
        assert!(s.frames()[1].selected);
        assert!(s.toggle(&id));
        assert_eq!(s.selected_count(), 0);
        assert!(!s.toggle("missing"));
    }

    #[test]
    fn test_select_all_and_none() {
        let mut s = session(4);
        s.select_all();
        assert_eq!(s.selected_count(), 4);
        s.select_none();
        assert_eq!(s.selected_count(), 0);
    }

    #[test]
    fn test_set_selection_ignores_out_of_range() {
        let mut s = session(3);
        s.select_all();
        s.set_selection(&[0, 2, 9]);
        let timestamps: Vec<u64> = s.selected().iter().map(|f| f.timestamp_ms).collect();
        assert_eq!(timestamps, vec![0, 1000]);
    }

    #[test]
    fn test_sprite_targets_fall_back_to_all() {
        let mut s = session(3);
        assert_eq!(s.sprite_targets().len(), 3);
        s.set_selection(&[1]);
        let targets = s.sprite_targets();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].timestamp_ms, 500);
    }
}
