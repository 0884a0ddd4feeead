use crate::component::FrameStudio;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::error;
use rust_i18n::t;

fn report(result: Result<()>) {
    if let Err(e) = result {
        error!("{e:#}");
        eprintln!("{} {:#}", style(t!("main_menu.error_prefix")).red().bold(), e);
    }
}

pub fn run_extract_frames(term: &Term, studio: &mut FrameStudio, config: &mut Config) -> Result<()> {
    report(studio.extract(term, config));
    pause(term)
}

pub fn run_select_frames(term: &Term, studio: &mut FrameStudio) -> Result<()> {
    report(studio.select(term));
    Ok(())
}

pub fn run_export_selected(term: &Term, studio: &FrameStudio, config: &Config) -> Result<()> {
    report(studio.export_selected(config));
    pause(term)
}

pub fn run_sprite_sheet(term: &Term, studio: &FrameStudio, config: &Config) -> Result<()> {
    report(studio.generate_sprite_sheet(config));
    pause(term)
}
