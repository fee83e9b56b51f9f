use super::CommandContext;
use crate::output::Output;
use cinerank_core::{watched_snapshot, StatsEngine};
use cinerank_models::{Period, TrendBucket};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

const BAR_WIDTH: usize = 40;

pub fn run_stats(ctx: &CommandContext, period: Option<Period>, output: &Output) -> Result<()> {
    let period = period.unwrap_or(ctx.config.stats.default_period);
    let records = ctx.load_records(output)?;
    let watched = watched_snapshot(&records);

    let engine = StatsEngine::with_calendar(ctx.calendar);
    let stats = engine.compute(&watched, period, ctx.now);

    if !output.is_human() {
        output.data(&json!({
            "period": period,
            "stats": stats,
        }));
        return Ok(());
    }

    let Some(stats) = stats else {
        output.info("No watched movies yet. Mark something as watched to see your stats.");
        return Ok(());
    };

    println!("\n{} {}", "Watch stats".bright_cyan().bold(), format!("({})", period).dimmed());
    println!("  {:<18} {}", "Movies watched", stats.total.bold());
    println!(
        "  {:<18} {:.1}",
        format!("Avg / {}", period.unit_label()),
        stats.average
    );
    println!(
        "  {:<18} {}",
        format!("{} streak", period.streak_label()),
        stats.streak.bold()
    );
    println!();

    for line in trend_lines(&stats.trend) {
        println!("  {}", line);
    }
    println!();
    Ok(())
}

/// One text bar per bucket, scaled to the busiest bucket
fn trend_lines(trend: &[TrendBucket]) -> Vec<String> {
    let max = trend.iter().map(|bucket| bucket.count).max().unwrap_or(0).max(1);
    let label_width = trend.iter().map(|bucket| bucket.label.len()).max().unwrap_or(0);

    trend
        .iter()
        .map(|bucket| {
            let filled = (bucket.count * BAR_WIDTH).div_ceil(max);
            format!(
                "{:>width$} {} {}",
                bucket.label,
                "█".repeat(filled).green(),
                bucket.count,
                width = label_width
            )
        })
        .collect()
}
