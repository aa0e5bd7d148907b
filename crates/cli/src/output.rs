//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use nutrion_search::CatalogRecord;
use owo_colors::OwoColorize;
use std::sync::Arc;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Glycemic index band used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiBand {
    /// GI 55 or less
    Low,
    /// GI 56 to 69
    Medium,
    /// GI 70 and above
    High,
}

impl GiBand {
    /// Classify a glycemic index value.
    pub fn of(glycemic_index: f64) -> Self {
        if glycemic_index <= 55.0 {
            GiBand::Low
        } else if glycemic_index < 70.0 {
            GiBand::Medium
        } else {
            GiBand::High
        }
    }
}

/// Format one record as a fixed-width table row (uncolored).
pub fn format_record_row(record: &CatalogRecord) -> String {
    let density = record
        .density_g_per_ml
        .map(|d| format!("{d:.2} g/ml"))
        .unwrap_or_default();

    format!(
        "{:<28} {:>5} {:>8} {:>8}  {}",
        truncate(&record.name, 28),
        format_number(record.glycemic_index),
        format_number(record.carbs_per_100),
        format_number(record.kcal_per_100),
        density
    )
    .trim_end()
    .to_string()
}

/// Print records as a table with a header, GI colored by band.
pub fn print_records(records: &[Arc<CatalogRecord>]) {
    println!(
        "{}",
        format!("{:<28} {:>5} {:>8} {:>8}  {}", "Food", "GI", "Carbs", "Kcal", "Density").bold()
    );

    for record in records {
        let row = format_record_row(record);
        match GiBand::of(record.glycemic_index) {
            GiBand::Low => println!("{}", row.green()),
            GiBand::Medium => println!("{}", row.yellow()),
            GiBand::High => println!("{}", row.red()),
        }
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let micros = duration.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Whole numbers without decimals, others with one.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars - 1).collect();
        out.push('…');
        out
    }
}
