//! Chart command for window statistics and a duration bar chart.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use dozyly_core::stats::{self, WindowStats};
use dozyly_core::{BarColor, ChartData, Quality, SleepEntry};

/// Terminal columns drawn per hour of sleep.
const COLUMNS_PER_HOUR: f64 = 2.0;

#[derive(Debug, Serialize)]
struct ChartReport {
    days: u32,
    stats: Option<WindowStats>,
    chart: ChartData,
}

const fn glyph(color: BarColor) -> char {
    match color {
        BarColor::Green => '█',
        BarColor::Red => '▓',
        BarColor::Yellow => '▒',
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(duration: f64, color: BarColor) -> String {
    let width = (duration * COLUMNS_PER_HOUR).round().max(0.0) as usize;
    std::iter::repeat_n(glyph(color), width).collect()
}

pub fn run<W: Write>(
    writer: &mut W,
    entries: &[SleepEntry],
    days: u32,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let window = stats::window(entries, days, today);
    let report = ChartReport {
        days,
        stats: stats::summarize(&window),
        chart: ChartData::from_window(&window),
    };
    tracing::debug!(days, bars = report.chart.len(), "prepared chart");

    if json {
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(
            writer,
            "No sleep data available. Start logging your sleep to see charts!"
        )?;
        return Ok(());
    }

    writeln!(writer, "Sleep over the last {days} days")?;
    let Some(stats) = report.stats else {
        writeln!(writer, "No entries in this range.")?;
        return Ok(());
    };

    writeln!(writer)?;
    writeln!(writer, "Average sleep: {} hours", stats.average_duration)?;
    writeln!(writer, "Total entries: {}", stats.total_entries)?;
    writeln!(writer, "Most common quality: {}", stats.most_common_quality)?;
    writeln!(writer)?;

    let chart = &report.chart;
    for (index, (label, detail)) in chart.labels.iter().zip(&chart.details).enumerate() {
        let duration = chart.durations[index];
        writeln!(
            writer,
            "{label:<6}  {} {duration}h  {}-{}",
            bar(duration, BarColor::for_quality(detail.quality)),
            detail.sleep_time,
            detail.wake_time
        )?;
    }

    writeln!(writer)?;
    let legend: Vec<String> = Quality::ALL
        .iter()
        .map(|quality| format!("{} {quality}", glyph(BarColor::for_quality(*quality))))
        .collect();
    writeln!(writer, "{}", legend.join("  "))?;

    Ok(())
}
