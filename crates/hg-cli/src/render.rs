use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use hg_client::AssessmentOutcome;
use hg_core::{GateStatus, ReportRow, ReportSource, RowStatus, Statistics};
use serde::Serialize;

const CATEGORY_WIDTH: usize = 16;
const PRACTICE_WIDTH: usize = 44;
const STATUS_WIDTH: usize = 14;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

pub fn print_outcome(outcome: &AssessmentOutcome, filter: Option<&str>) {
    let title = format!("Hard Gate Assessment - {}", outcome.project_name);
    println!("{}", title.bold());
    println!("{}", "=".repeat(title.chars().count()));
    if let Some(date) = &outcome.assessment_date {
        println!("Assessed: {date}");
    }
    println!("Assessment ID: {}", outcome.assessment_id);
    println!();

    print_summary(&outcome.report.statistics);

    if outcome.report.source == ReportSource::Empty {
        println!("{}", "The service returned no gate results.".yellow());
        println!();
    }

    let rows = filter_rows(outcome.report.rows(), filter);
    if rows.is_empty() {
        match filter {
            Some(f) => println!("No rows match '{f}'."),
            None => println!("No rows to display."),
        }
        return;
    }
    print_table(&rows);
}

fn print_summary(stats: &Statistics) {
    println!("{}", "Executive Summary".bold());
    println!("{}", "-".repeat(30));
    println!("{:<16} {}", "Total Gates:", stats.total);
    println!("{:<16} {}", "Implemented:", stats.implemented.to_string().green());
    println!("{:<16} {}", "Partial:", stats.partial.to_string().yellow());
    println!("{:<16} {}", "Missing:", stats.missing.to_string().red());
    println!("{:<16} {}", "Compliance:", format!("{:.1}%", stats.compliance).bold());
    println!();
}

fn print_table(rows: &[ReportRow]) {
    println!(
        "{:<cw$} {:<pw$} {:<sw$}",
        "Category",
        "Practice",
        "Status",
        cw = CATEGORY_WIDTH,
        pw = PRACTICE_WIDTH,
        sw = STATUS_WIDTH,
    );
    println!("{}", "-".repeat(CATEGORY_WIDTH + PRACTICE_WIDTH + STATUS_WIDTH + 2));
    for row in rows {
        println!(
            "{:<cw$} {:<pw$} {}",
            truncate(&row.category, CATEGORY_WIDTH),
            truncate(&row.practice, PRACTICE_WIDTH),
            status_cell(row.status),
            cw = CATEGORY_WIDTH,
            pw = PRACTICE_WIDTH,
        );
        println!("{:indent$}Evidence: {}", "", row.evidence.dimmed(), indent = CATEGORY_WIDTH + 1);
        println!("{:indent$}Recommendation: {}", "", row.recommendation, indent = CATEGORY_WIDTH + 1);
    }
}

pub fn status_label(status: RowStatus) -> String {
    match status {
        RowStatus::Gate(GateStatus::Implemented) => "✓ Implemented".to_string(),
        RowStatus::Gate(GateStatus::Partial) => "⚬ Partial".to_string(),
        RowStatus::Gate(GateStatus::Missing) => "✗ Missing".to_string(),
        RowStatus::Detected => "✓ Detected".to_string(),
    }
}

fn status_cell(status: RowStatus) -> ColoredString {
    let label = format!("{:<width$}", status_label(status), width = STATUS_WIDTH);
    match status {
        RowStatus::Gate(GateStatus::Implemented) => label.green(),
        RowStatus::Gate(GateStatus::Partial) => label.yellow(),
        RowStatus::Gate(GateStatus::Missing) => label.red(),
        RowStatus::Detected => label.cyan(),
    }
}

/// Keep rows whose category, practice, status, evidence or recommendation
/// contains `filter`, ignoring case.
pub fn filter_rows(rows: Vec<ReportRow>, filter: Option<&str>) -> Vec<ReportRow> {
    let needle = match filter.map(str::trim) {
        Some(f) if !f.is_empty() => f.to_lowercase(),
        _ => return rows,
    };
    rows.into_iter()
        .filter(|row| {
            [
                row.category.as_str(),
                row.practice.as_str(),
                &row.status.to_string(),
                row.evidence.as_str(),
                row.recommendation.as_str(),
            ]
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Trim an ISO-8601 timestamp to minutes for tables.
pub fn short_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    match chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
