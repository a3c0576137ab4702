//! Suggest command for tips picked from recent sleep quality.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use dozyly_core::stats::{self, RecentQuality};
use dozyly_core::suggest::{self, HYGIENE_TIPS};
use dozyly_core::{Icon, SleepEntry, Suggestion};

const RECOMMENDED_HEADING: &str = "Recommended for You";
const GENERAL_HEADING: &str = "General Sleep Tips";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestReport<'a> {
    recent_quality: Option<RecentQuality>,
    heading: &'static str,
    suggestions: Vec<&'a Suggestion>,
    hygiene_tips: &'a [&'a str],
}

const fn icon_glyph(icon: Icon) -> char {
    match icon {
        Icon::Clock => '◷',
        Icon::Moon => '☾',
        Icon::Sun => '☀',
        Icon::Coffee => '☕',
        Icon::Smartphone => '▯',
    }
}

fn heading(recent: Option<&RecentQuality>) -> &'static str {
    if recent.is_some_and(|recent| recent.needs_improvement > 0) {
        RECOMMENDED_HEADING
    } else {
        GENERAL_HEADING
    }
}

pub fn run<W: Write>(writer: &mut W, entries: &[SleepEntry], json: bool) -> Result<()> {
    let recent_quality = stats::recent_quality(entries);
    let report = SuggestReport {
        recent_quality,
        heading: heading(recent_quality.as_ref()),
        suggestions: suggest::select(entries),
        hygiene_tips: &HYGIENE_TIPS,
    };

    if json {
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        return Ok(());
    }

    if let Some(recent) = report.recent_quality {
        writeln!(writer, "Your recent sleep quality")?;
        writeln!(writer, "  Good sleep rate: {}%", recent.percentage)?;
        writeln!(writer, "  Good nights: {}", recent.good)?;
        writeln!(writer, "  Needs improvement: {}", recent.needs_improvement)?;
        if recent.needs_improvement > 0 {
            writeln!(writer)?;
            writeln!(
                writer,
                "Based on your recent sleep patterns, these suggestions were picked to help improve your sleep quality."
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", report.heading)?;
    for suggestion in &report.suggestions {
        writeln!(writer)?;
        writeln!(
            writer,
            "{} {} [{}]",
            icon_glyph(suggestion.icon),
            suggestion.title,
            suggestion.category
        )?;
        writeln!(writer, "  {}", suggestion.description)?;
    }

    writeln!(writer)?;
    writeln!(writer, "Additional Sleep Hygiene Tips")?;
    for tip in report.hygiene_tips {
        writeln!(writer, "- {tip}")?;
    }

    Ok(())
}
