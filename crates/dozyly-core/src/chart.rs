//! Bar chart series for a window of entries.
//!
//! This only shapes data: labels, values, and colors in parallel vectors, plus
//! a tooltip lookup. Drawing is left to whichever renderer consumes it.

use serde::Serialize;

use crate::entry::{Quality, SleepEntry};

/// Bar fill for a quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Green,
    Red,
    Yellow,
}

impl BarColor {
    pub const fn for_quality(quality: Quality) -> Self {
        match quality {
            Quality::Good => Self::Green,
            Quality::Bad => Self::Red,
            Quality::Interrupted => Self::Yellow,
        }
    }

    const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Green => (34, 197, 94),
            Self::Red => (239, 68, 68),
            Self::Yellow => (234, 179, 8),
        }
    }

    /// Translucent fill, e.g. `rgba(34, 197, 94, 0.6)`.
    pub fn fill(self) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({r}, {g}, {b}, 0.6)")
    }

    /// Opaque border in the same hue.
    pub fn border(self) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({r}, {g}, {b}, 1)")
    }
}

/// Parallel series for a duration bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Short date labels such as `Oct 18`.
    pub labels: Vec<String>,
    /// Hours slept per bar.
    pub durations: Vec<f64>,
    pub colors: Vec<String>,
    pub border_colors: Vec<String>,
    /// Per-bar details for tooltips, index-aligned with the other series.
    pub details: Vec<BarDetail>,
}

/// What a tooltip shows for one bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDetail {
    pub quality: Quality,
    pub sleep_time: String,
    pub wake_time: String,
}

impl ChartData {
    /// Shapes a window (oldest first) into chart series.
    pub fn from_window(window: &[&SleepEntry]) -> Self {
        let labels = window
            .iter()
            .map(|entry| entry.date.as_naive().format("%b %-d").to_string())
            .collect();
        let durations = window.iter().map(|entry| entry.duration()).collect();
        let bar_colors: Vec<BarColor> = window
            .iter()
            .map(|entry| BarColor::for_quality(entry.quality))
            .collect();
        let details = window
            .iter()
            .map(|entry| BarDetail {
                quality: entry.quality,
                sleep_time: entry.sleep_time.to_string(),
                wake_time: entry.wake_time.to_string(),
            })
            .collect();

        Self {
            labels,
            durations,
            colors: bar_colors.iter().map(|c| c.fill()).collect(),
            border_colors: bar_colors.iter().map(|c| c.border()).collect(),
            details,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Tooltip lines for the bar at `index`.
    pub fn tooltip(&self, index: usize) -> Option<[String; 3]> {
        let detail = self.details.get(index)?;
        Some([
            format!("Quality: {}", detail.quality),
            format!("Sleep: {}", detail.sleep_time),
            format!("Wake: {}", detail.wake_time),
        ])
    }
}
