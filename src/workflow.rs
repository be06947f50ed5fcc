//! Command entry points wiring the pipeline stages together.
use crate::aggregate::group_records;
use crate::cli::{GenerateArgs, PlanArgs};
use crate::model::TreeSummary;
use crate::output::{read_books, write_books, JsonStyle};
use crate::plan::{build_daily_plans, dates_between, format_plans, verses_between};
use crate::records::read_records;
use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::fs;
use std::time::Instant;

/// Read, group, and write. Any failure aborts before the output is created.
pub fn run_generate(args: &GenerateArgs) -> Result<TreeSummary> {
    let start = Instant::now();
    let records = read_records(&args.input)
        .with_context(|| format!("load verse records from {}", args.input.display()))?;
    let books = group_records(&records).context("group verse records")?;
    let summary = TreeSummary::of(&books);

    let style = if args.compact {
        JsonStyle::Compact
    } else {
        JsonStyle::Pretty
    };
    write_books(&args.output, &books, style)
        .with_context(|| format!("write verse tree to {}", args.output.display()))?;

    tracing::info!(
        records = records.len(),
        books = summary.books,
        chapters = summary.chapters,
        verses = summary.verses,
        elapsed_ms = start.elapsed().as_millis(),
        "generate complete"
    );
    Ok(summary)
}

/// Build a reading plan from a generated tree and print or write it.
pub fn run_plan(args: &PlanArgs) -> Result<()> {
    let books = read_books(&args.verses)
        .with_context(|| format!("load verse tree from {}", args.verses.display()))?;

    let start_date = args
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());
    let end_date = match args.end_date {
        Some(end) => end,
        None => year_end(start_date)?,
    };
    let dates = dates_between(start_date, end_date)?;
    let verses = verses_between(&books, args.from.as_ref(), args.to.as_ref())?;
    let plans = build_daily_plans(&verses, &dates);

    let rendered = if args.json {
        let mut text = serde_json::to_string_pretty(&plans).context("serialize plan")?;
        text.push('\n');
        text
    } else {
        format_plans(&plans)
    };

    match &args.out {
        Some(out) => {
            fs::write(out, rendered.as_bytes())
                .with_context(|| format!("write plan to {}", out.display()))?;
            tracing::info!(
                path = %out.display(),
                plans = plans.len(),
                "wrote reading plan"
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn year_end(date: NaiveDate) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), 12, 31)
        .ok_or_else(|| anyhow!("no 31 December in year {}", date.year()))
}
