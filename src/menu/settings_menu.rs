use crate::component::frame_extractor::{INTERVAL_PRESETS_MS, parse_interval};
use crate::component::sprite_sheet::{Background, MAX_CELL_SIZE};
use crate::config::save::save_settings;
use crate::config::types::{Config, ExportFormat, Language};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::fmt::Display;

/// 設定選單
pub fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_interval"),
            t!("settings.opt_cell_size"),
            t!("settings.opt_background"),
            t!("settings.opt_export_format"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_interval_menu(term, config)?,
            Some(1) => show_cell_size_menu(term, config)?,
            Some(2) => show_background_menu(term, config)?,
            Some(3) => show_export_format_menu(term, config)?,
            Some(4) => show_language_menu(term, config)?,
            Some(5) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn announce_saved(value: impl Display) {
    println!("\n{} {}", style(t!("settings.saved")).green(), value);
    std::thread::sleep(std::time::Duration::from_secs(1));
}

/// 預設取樣間隔
fn show_interval_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.interval.title")).cyan().bold());
    println!(
        "\n{} {} ms\n",
        style(t!("settings.current")).dim(),
        config.settings.interval_ms
    );

    let mut items: Vec<String> = INTERVAL_PRESETS_MS
        .iter()
        .map(|ms| format!("{ms} ms"))
        .collect();
    items.push(t!("studio.interval_custom").to_string());

    let default_index = INTERVAL_PRESETS_MS
        .iter()
        .position(|&ms| ms == config.settings.interval_ms)
        .unwrap_or(items.len() - 1);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.interval.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let interval_ms = match INTERVAL_PRESETS_MS.get(selection) {
        Some(&preset) => preset,
        None => {
            let raw: String = Input::new()
                .with_prompt(t!("settings.interval.custom_prompt"))
                .default(config.settings.interval_ms.to_string())
                .interact_text()?;
            parse_interval(&raw)
        }
    };

    if interval_ms != config.settings.interval_ms {
        config.settings.interval_ms = interval_ms;
        save_settings(&config.settings)?;
        announce_saved(format!("{interval_ms} ms"));
    }

    Ok(())
}

/// 精靈圖格子尺寸（0 為原始尺寸）
fn show_cell_size_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.cell_size.title")).cyan().bold());
    println!(
        "\n{} {}\n",
        style(t!("settings.current")).dim(),
        config.settings.sprite_sheet.cell_size
    );

    let raw: String = Input::new()
        .with_prompt(t!("settings.cell_size.prompt"))
        .default(config.settings.sprite_sheet.cell_size.to_string())
        .validate_with(|value: &String| -> Result<(), String> {
            parse_cell_size(value)
                .map(|_| ())
                .ok_or_else(|| t!("settings.cell_size.invalid", max = MAX_CELL_SIZE).to_string())
        })
        .interact_text()?;

    let Some(cell_size) = parse_cell_size(&raw) else {
        return Ok(());
    };
    if cell_size != config.settings.sprite_sheet.cell_size {
        config.settings.sprite_sheet.cell_size = cell_size;
        save_settings(&config.settings)?;
        announce_saved(cell_size);
    }

    Ok(())
}

/// 格子邊長輸入，0 到 [`MAX_CELL_SIZE`] 之間
fn parse_cell_size(input: &str) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&size| size <= MAX_CELL_SIZE)
}

/// 精靈圖背景色
fn show_background_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.background.title")).cyan().bold());
    println!(
        "\n{} {}\n",
        style(t!("settings.current")).dim(),
        config.settings.sprite_sheet.background
    );

    let raw: String = Input::new()
        .with_prompt(t!("settings.background.prompt"))
        .default(config.settings.sprite_sheet.background.clone())
        .validate_with(|value: &String| -> Result<(), String> {
            value
                .parse::<Background>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    // 儲存正規化後的寫法
    let background: Background = raw.parse()?;
    let normalized = background.to_string();

    if normalized != config.settings.sprite_sheet.background {
        config.settings.sprite_sheet.background = normalized;
        save_settings(&config.settings)?;
        announce_saved(background);
    }

    Ok(())
}

fn show_export_format_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.export_format.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let formats = [ExportFormat::Png, ExportFormat::Jpg];
    let items: Vec<String> = formats.iter().map(ToString::to_string).collect();

    let default_index = formats
        .iter()
        .position(|&f| f == config.settings.export_format)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.export_format.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_format = formats[selection];

    if selected_format != config.settings.export_format {
        config.settings.export_format = selected_format;
        save_settings(&config.settings)?;
        announce_saved(selected_format);
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];

    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        announce_saved(selected_lang);
    }

    Ok(())
}
