use super::{stars, CommandContext};
use crate::output::Output;
use cinerank_core::{history, watched_years, HistoryQuery};
use cinerank_models::HistorySort;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_history(
    ctx: &CommandContext,
    sort: Option<HistorySort>,
    search: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
    output: &Output,
) -> Result<()> {
    let records = ctx.load_records(output)?;

    let query = HistoryQuery {
        sort: sort.unwrap_or(ctx.config.history.default_sort),
        search,
        year,
        month,
    };
    let list = history(&records, &query, &ctx.calendar);
    let years = watched_years(&records, &ctx.calendar);

    if !output.is_human() {
        output.data(&json!({
            "sort": query.sort.as_str(),
            "count": list.len(),
            "years": years,
            "movies": list,
        }));
        return Ok(());
    }

    if list.is_empty() {
        output.info("No watched movies match those filters.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Watched").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Director").add_attribute(Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    for record in &list {
        let watched = record
            .date_watched
            .map(|at| ctx.calendar.date_of(at).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(watched),
            Cell::new(&record.name),
            Cell::new(stars(record.fun)),
            Cell::new(record.director.as_deref().unwrap_or("-")),
        ]);
    }

    println!("\n{} {}", "History".bright_cyan().bold(), format!("({} movies)", list.len()).dimmed());
    println!("{}", table);
    if !years.is_empty() {
        let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        println!("{} {}", "Years:".dimmed(), years.join(", "));
    }
    Ok(())
}
