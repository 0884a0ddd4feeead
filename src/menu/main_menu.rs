use crate::component::FrameStudio;
use crate::config::types::Config;
use crate::menu::handlers::{
    run_export_selected, run_extract_frames, run_select_frames, run_sprite_sheet,
};
use crate::menu::settings_menu::show_settings_menu;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use rust_i18n::t;

pub fn show_main_menu(term: &Term, studio: &mut FrameStudio, config: &mut Config) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());
    studio.print_status();
    println!();

    let options = vec![
        t!("main_menu.opt_extract"),
        t!("main_menu.opt_select"),
        t!("main_menu.opt_export"),
        t!("main_menu.opt_sprite"),
        t!("main_menu.opt_reset"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_extract_frames(term, studio, config)?;
            Ok(true)
        }
        Some(1) => {
            run_select_frames(term, studio)?;
            Ok(true)
        }
        Some(2) => {
            run_export_selected(term, studio, config)?;
            Ok(true)
        }
        Some(3) => {
            run_sprite_sheet(term, studio, config)?;
            Ok(true)
        }
        Some(4) => {
            studio.reset();
            Ok(true)
        }
        Some(5) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(6) | None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}
