use super::{stars, CommandContext};
use crate::output::Output;
use cinerank_core::{queued_snapshot, rank_queue, QueueQuery, ScoreBreakdown};
use cinerank_models::SortOption;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_queue(
    ctx: &CommandContext,
    sort: Option<SortOption>,
    search: Option<String>,
    limit: Option<usize>,
    explain: bool,
    output: &Output,
) -> Result<()> {
    let records = ctx.load_records(output)?;
    let queued = queued_snapshot(&records);

    let query = QueueQuery {
        sort: sort.unwrap_or(ctx.config.queue.default_sort),
        search,
        limit: limit.or(ctx.config.queue.limit),
    };
    let ranked = rank_queue(&queued, &query, ctx.now);
    tracing::debug!(queued = queued.len(), shown = ranked.len(), "Queue ranked");

    if !output.is_human() {
        let entries: Vec<serde_json::Value> = ranked
            .iter()
            .map(|entry| {
                let mut value = json!(entry);
                if explain {
                    value["breakdown"] = json!(ScoreBreakdown::compute(entry.record, ctx.now));
                }
                value
            })
            .collect();
        output.data(&json!({
            "sort": query.sort.as_str(),
            "count": entries.len(),
            "movies": entries,
        }));
        return Ok(());
    }

    if ranked.is_empty() {
        output.info("Your queue is empty. Nothing left to watch!");
        return Ok(());
    }

    let mut header = vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Priority").add_attribute(Attribute::Bold),
        Cell::new("Hype").add_attribute(Attribute::Bold),
        Cell::new("Score").add_attribute(Attribute::Bold),
    ];
    if explain {
        for name in ["Release", "Added", "Prio", "Fun"] {
            header.push(Cell::new(name).add_attribute(Attribute::Bold));
        }
    }

    let mut table = Table::new();
    table.set_header(header);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    for (rank, entry) in ranked.iter().enumerate() {
        let record = entry.record;
        let mut row = vec![
            Cell::new(rank + 1),
            Cell::new(&record.name),
            Cell::new(record.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::new(stars(record.priority)),
            Cell::new(stars(record.fun)),
            Cell::new(format!("{:.3}", entry.score)),
        ];
        if explain {
            let breakdown = ScoreBreakdown::compute(record, ctx.now);
            for part in [breakdown.release, breakdown.added, breakdown.priority, breakdown.fun] {
                row.push(Cell::new(format!("{:.2}", part)));
            }
        }
        table.add_row(row);
    }

    println!("\n{} {}", "Up next".bright_cyan().bold(), format!("({})", query.sort).dimmed());
    println!("{}", table);
    Ok(())
}
