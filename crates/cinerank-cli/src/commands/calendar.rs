use super::CommandContext;
use crate::output::Output;
use chrono::{Datelike, NaiveDate};
use cinerank_core::{month_grid, watched_on, MonthGrid};
use cinerank_models::MovieRecord;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_calendar(ctx: &CommandContext, month: Option<String>, output: &Output) -> Result<()> {
    let (year, month) = match month {
        Some(value) => parse_year_month(&value)?,
        None => {
            let today = ctx.calendar.date_of(ctx.now);
            (today.year(), today.month())
        }
    };

    let records = ctx.load_records(output)?;
    let grid = month_grid(&records, year, month, &ctx.calendar)
        .ok_or_else(|| eyre!("Invalid month: {}-{:02}", year, month))?;

    let watched_days: Vec<(NaiveDate, Vec<&MovieRecord>)> = grid
        .days
        .iter()
        .filter(|day| day.in_month && day.count > 0)
        .map(|day| (day.date, watched_on(&records, day.date, &ctx.calendar)))
        .collect();

    if !output.is_human() {
        let days: Vec<serde_json::Value> = watched_days
            .iter()
            .map(|(date, movies)| json!({ "date": date, "movies": movies }))
            .collect();
        output.data(&json!({
            "grid": grid,
            "total": grid.total(),
            "watched": days,
        }));
        return Ok(());
    }

    print_grid(&grid, ctx.calendar.date_of(ctx.now));

    for (date, movies) in &watched_days {
        let names: Vec<&str> = movies.iter().map(|m| m.name.as_str()).collect();
        println!("  {} {}", date.format("%b %-d").to_string().bold(), names.join(", "));
    }
    if watched_days.is_empty() {
        output.info("Nothing watched this month.");
    }
    println!();
    Ok(())
}

/// Parse `YYYY-MM`
pub fn parse_year_month(value: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| eyre!("Invalid month '{}', expected YYYY-MM", value))?;
    Ok((first.year(), first.month()))
}

fn print_grid(grid: &MonthGrid, today: NaiveDate) {
    let title = grid
        .first_day()
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();
    println!("\n{} {}", title.bright_cyan().bold(), format!("({} watched)", grid.total()).dimmed());
    println!(" {}", "Mo  Tu  We  Th  Fr  Sa  Su".dimmed());

    for week in grid.weeks() {
        let cells: Vec<String> = week
            .iter()
            .map(|day| {
                let text = format!("{:>2}", day.date.day());
                if !day.in_month {
                    text.dimmed().to_string()
                } else if day.count > 0 {
                    text.green().bold().to_string()
                } else if day.date == today {
                    text.underline().to_string()
                } else {
                    text
                }
            })
            .collect();
        println!(" {}", cells.join("  "));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2024-06").unwrap(), (2024, 6));
        assert_eq!(parse_year_month(" 1999-12 ").unwrap(), (1999, 12));
        assert!(parse_year_month("2024-13").is_err());
        assert!(parse_year_month("June").is_err());
    }
}
