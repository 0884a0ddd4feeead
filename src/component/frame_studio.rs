use crate::component::frame_exporter::{export_frames, save_sprite_sheet};
use crate::component::frame_extractor::{
    FALLBACK_INTERVAL_MS, INTERVAL_PRESETS_MS, extract_frames, format_time, parse_interval,
};
use crate::component::frame_session::FrameSession;
use crate::component::sprite_sheet::{Background, CellSize, create_sprite_sheet};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::validate_video_file;
use anyhow::{Context, Result};
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 影格工作室：取樣、選取、匯出與精靈圖
///
/// 同一時間只保留一個 [`FrameSession`]
pub struct FrameStudio {
    shutdown_signal: Arc<AtomicBool>,
    session: Option<FrameSession>,
}

impl FrameStudio {
    #[must_use]
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            shutdown_signal,
            session: None,
        }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&FrameSession> {
        self.session.as_ref()
    }

    /// 狀態列：目前影片與選取數量
    pub fn print_status(&self) {
        match &self.session {
            Some(session) => println!(
                "{}",
                style(t!(
                    "studio.status",
                    video = session.video_path().display(),
                    duration = format_time(session.video_info().duration_seconds),
                    interval = session.interval_ms(),
                    frames = session.frames().len(),
                    selected = session.selected_count()
                ))
                .dim()
            ),
            None => println!("{}", style(t!("studio.no_session")).dim()),
        }
    }

    /// 清除上一次 Ctrl-C 留下的中斷旗標
    fn clear_cancellation(&self) {
        if self.shutdown_signal.swap(false, Ordering::SeqCst) {
            info!("已清除先前的中斷旗標");
        }
    }

    /// 取得影片路徑與取樣間隔後進行取樣，取代現有 session
    pub fn extract(&mut self, term: &Term, config: &mut Config) -> Result<()> {
        self.clear_cancellation();

        let video_path = prompt_video_path(config)?;
        validate_video_file(&video_path, &config.video_extensions)?;

        let Some(interval_ms) = prompt_interval(term, config.settings.interval_ms)? else {
            return Ok(());
        };

        config.settings.interval_ms = interval_ms;
        add_recent_path(&mut config.settings, &video_path.to_string_lossy());
        if let Err(e) = save_settings(&config.settings) {
            warn!("無法儲存設定: {e:#}");
        }

        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress.set_message(t!("studio.extracting").to_string());

        // 舊的 session 在取樣開始前就丟棄
        self.session = None;

        let (video_info, frames) =
            match extract_frames(&video_path, interval_ms, &self.shutdown_signal, &progress) {
                Ok(result) => result,
                Err(e) => {
                    progress.abandon_with_message(t!("studio.extract_failed").to_string());
                    return Err(e);
                }
            };
        progress.finish_with_message(t!("studio.extract_done", count = frames.len()).to_string());

        info!(
            "取樣完成 {}: {} 張影格",
            video_path.display(),
            frames.len()
        );

        self.session = Some(FrameSession::new(
            video_path,
            video_info,
            interval_ms,
            frames,
        ));
        Ok(())
    }

    pub fn select(&mut self, term: &Term) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            println!("{}", style(t!("studio.no_session")).yellow());
            return Ok(());
        };

        let actions = [
            t!("studio.select.pick").to_string(),
            t!("studio.select.all").to_string(),
            t!("studio.select.none").to_string(),
        ];

        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("studio.select.prompt"))
            .items(&actions)
            .default(0)
            .interact_on_opt(term)?;

        match action {
            Some(0) => {
                let items: Vec<String> = session
                    .frames()
                    .iter()
                    .map(|f| {
                        format!(
                            "{} ({}x{})",
                            format_time(f.timestamp_ms as f64 / 1000.0),
                            f.image.width,
                            f.image.height
                        )
                    })
                    .collect();
                let defaults: Vec<bool> = session.frames().iter().map(|f| f.selected).collect();

                let picked = MultiSelect::with_theme(&ColorfulTheme::default())
                    .with_prompt(t!("studio.select.pick_prompt"))
                    .items(&items)
                    .defaults(&defaults)
                    .interact_on_opt(term)?;

                if let Some(indices) = picked {
                    session.set_selection(&indices);
                }
            }
            Some(1) => session.select_all(),
            Some(2) => session.select_none(),
            _ => {}
        }

        Ok(())
    }

    pub fn export_selected(&self, config: &Config) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            println!("{}", style(t!("studio.no_session")).yellow());
            return Ok(());
        };

        let selected = session.selected();
        if selected.is_empty() {
            println!("{}", style(t!("studio.export.nothing_selected")).yellow());
            return Ok(());
        }

        let output_dir = prompt_output_dir(session.video_path())?;
        let result = export_frames(&selected, &output_dir, config.settings.export_format)
            .context("匯出影格失敗")?;

        println!(
            "{} {}",
            style("✓").green(),
            t!(
                "studio.export.done",
                count = result.count(),
                dir = output_dir.display()
            )
        );
        Ok(())
    }

    pub fn generate_sprite_sheet(&self, config: &Config) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            println!("{}", style(t!("studio.no_session")).yellow());
            return Ok(());
        };

        let targets = session.sprite_targets();
        let cell = CellSize::from_setting(config.settings.sprite_sheet.cell_size);
        let background: Background = config
            .settings
            .sprite_sheet
            .background
            .parse()
            .context("背景色設定無效")?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(t!("studio.sprite.composing", count = targets.len()).to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        let sheet = create_sprite_sheet(&targets, cell, background);
        spinner.finish_and_clear();

        let Some(sheet) = sheet? else {
            println!("{}", style(t!("studio.sprite.empty")).yellow());
            return Ok(());
        };

        let output_dir = prompt_output_dir(session.video_path())?;
        let path = save_sprite_sheet(&sheet, &output_dir)?;
        let (width, height) = sheet.dimensions();

        println!(
            "{} {}",
            style("✓").green(),
            t!(
                "studio.sprite.done",
                path = path.display(),
                columns = sheet.grid.columns,
                rows = sheet.grid.rows,
                width = width,
                height = height
            )
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            info!("已清除目前的影格");
        }
    }
}

fn prompt_video_path(config: &Config) -> Result<PathBuf> {
    let mut input = Input::<String>::new().with_prompt(t!("studio.prompt_video"));
    if let Some(recent) = config.settings.recent_paths.first() {
        input = input.default(recent.clone());
    }
    let path: String = input.interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

/// 選擇預設間隔或自訂；ESC 回傳 `None`
fn prompt_interval(term: &Term, current_ms: u64) -> Result<Option<u64>> {
    let mut items: Vec<String> = INTERVAL_PRESETS_MS
        .iter()
        .map(|ms| format!("{ms} ms"))
        .collect();
    items.push(t!("studio.interval_custom").to_string());

    let default_index = INTERVAL_PRESETS_MS
        .iter()
        .position(|&ms| ms == current_ms)
        .unwrap_or(items.len() - 1);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("studio.interval_prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(None);
    };

    if let Some(&preset) = INTERVAL_PRESETS_MS.get(selection) {
        return Ok(Some(preset));
    }

    let raw: String = Input::new()
        .with_prompt(t!("studio.interval_custom_prompt", ms = FALLBACK_INTERVAL_MS))
        .default(current_ms.to_string())
        .interact_text()?;
    Ok(Some(parse_interval(&raw)))
}

fn prompt_output_dir(video_path: &Path) -> Result<PathBuf> {
    let default_dir = default_output_dir(video_path);
    let path: String = Input::new()
        .with_prompt(t!("studio.prompt_output"))
        .default(default_dir.to_string_lossy().to_string())
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

/// 影片旁的 `{影片名稱}_frames` 資料夾
#[must_use]
pub fn default_output_dir(video_path: &Path) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map_or_else(|| "video".to_string(), |s| s.to_string_lossy().to_string());
    video_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{stem}_frames"))
}
