use anyhow::Result;
use console::{Term, style};
use frame_sprite_studio::component::FrameStudio;
use frame_sprite_studio::config::types::Config;
use frame_sprite_studio::init;
use frame_sprite_studio::menu::show_main_menu;
use frame_sprite_studio::signal::setup_shutdown_signal;
use log::{info, warn};
use rust_i18n::t;

rust_i18n::i18n!("locales", fallback = "en-US");

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal()?;

    // Load config and set locale
    let mut config = Config::new()?;
    rust_i18n::set_locale(config.settings.language.as_str());

    let mut studio = FrameStudio::new(shutdown_signal);

    loop {
        match show_main_menu(&term, &mut studio, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
