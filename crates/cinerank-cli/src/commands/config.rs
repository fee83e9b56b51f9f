use super::CommandContext;
use crate::output::Output;
use cinerank_config::{Config, PathManager};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, ctx: &CommandContext, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(ctx, output),
        crate::ConfigCommands::Init { force } => init_config(&ctx.paths, force, output),
    }
}

fn show_config(ctx: &CommandContext, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let config_file = ctx.paths.config_file();

    if !output.is_human() {
        output.data(&json!({
            "config_file": config_file,
            "exists": config_file.exists(),
            "snapshot": ctx.snapshot_path,
            "config": config,
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("No configuration file at {}, showing defaults", config_file.display()));
        output.info("Run 'cinerank config init' to write one.");
    }

    let snapshot = &ctx.snapshot_path;
    let limit = config
        .queue
        .limit
        .map(|l| l.to_string())
        .unwrap_or_else(|| "none".to_string());
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr only".to_string());

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);
    table.add_row(vec![Cell::new("Snapshot"), Cell::new(snapshot.display())]);
    table.add_row(vec![Cell::new("Stats period"), Cell::new(config.stats.default_period)]);
    table.add_row(vec![
        Cell::new("UTC offset (min)"),
        Cell::new(config.stats.utc_offset_minutes),
    ]);
    table.add_row(vec![Cell::new("Queue sort"), Cell::new(config.queue.default_sort)]);
    table.add_row(vec![Cell::new("Queue limit"), Cell::new(limit)]);
    table.add_row(vec![Cell::new("History sort"), Cell::new(config.history.default_sort)]);
    table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
    table.add_row(vec![Cell::new("Log file"), Cell::new(log_file)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    println!("\n{}", "Configuration".bright_cyan().bold());
    println!("{}", table);
    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();

    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create cinerank directories: {}", e))?;

    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    output.info(format!(
        "Place your exported movies at {} or pass --snapshot",
        paths.default_snapshot_file().display()
    ));
    Ok(())
}
