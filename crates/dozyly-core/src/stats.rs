//! Summary statistics over recent entries.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::entry::{Quality, SleepEntry, round_to_hundredths};

/// Number of most recent entries the quality summary and suggestions look at.
pub const RECENT_ENTRIES: usize = 7;

/// Entries logged within the last `days` days, oldest first.
///
/// An entry is in the window when its date is after `today - days`. The
/// result is additionally capped to the `days` most recent entries.
pub fn window(entries: &[SleepEntry], days: u32, today: NaiveDate) -> Vec<&SleepEntry> {
    let cutoff = today.checked_sub_days(Days::new(u64::from(days)));
    let mut selected: Vec<&SleepEntry> = entries
        .iter()
        .filter(|entry| cutoff.is_none_or(|cutoff| entry.date.as_naive() > cutoff))
        .collect();

    // stable: same-day entries keep their stored order
    selected.sort_by_key(|entry| entry.date);

    let keep = usize::try_from(days).unwrap_or(usize::MAX);
    let excess = selected.len().saturating_sub(keep);
    selected.drain(..excess);
    selected
}

/// Statistics for a non-empty window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    /// Mean duration in hours, rounded to two decimals.
    pub average_duration: f64,
    pub total_entries: usize,
    pub most_common_quality: Quality,
}

/// Summarizes a window; `None` when it holds no entries.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(window: &[&SleepEntry]) -> Option<WindowStats> {
    let most_common_quality = most_common_quality(window)?;
    let total: f64 = window.iter().map(|entry| entry.duration()).sum();

    Some(WindowStats {
        average_duration: round_to_hundredths(total / window.len() as f64),
        total_entries: window.len(),
        most_common_quality,
    })
}

/// The quality seen most often.
///
/// Candidates are considered in order of first appearance; the running best
/// is replaced unless its count is strictly greater, so a tie goes to the
/// quality that first appeared later.
fn most_common_quality(window: &[&SleepEntry]) -> Option<Quality> {
    let mut counts: Vec<(Quality, usize)> = Vec::with_capacity(Quality::ALL.len());
    for entry in window {
        match counts.iter_mut().find(|(quality, _)| *quality == entry.quality) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.quality, 1)),
        }
    }

    counts
        .into_iter()
        .reduce(|best, candidate| if best.1 > candidate.1 { best } else { candidate })
        .map(|(quality, _)| quality)
}

/// Good-sleep rate over the most recent entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentQuality {
    pub total: usize,
    pub good: usize,
    /// Bad plus interrupted nights.
    pub needs_improvement: usize,
    /// Good nights as a whole percentage of `total`.
    pub percentage: u32,
}

/// Rates the [`RECENT_ENTRIES`] newest entries; `None` if there are none.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn recent_quality(entries: &[SleepEntry]) -> Option<RecentQuality> {
    let recent = recent(entries);
    if recent.is_empty() {
        return None;
    }

    let good = recent
        .iter()
        .filter(|entry| entry.quality == Quality::Good)
        .count();
    let needs_improvement = recent
        .iter()
        .filter(|entry| entry.quality.needs_improvement())
        .count();
    let percentage = (good as f64 / recent.len() as f64 * 100.0).round() as u32;

    Some(RecentQuality {
        total: recent.len(),
        good,
        needs_improvement,
        percentage,
    })
}

/// The newest entries by insertion order, not by date.
pub fn recent(entries: &[SleepEntry]) -> &[SleepEntry] {
    &entries[..entries.len().min(RECENT_ENTRIES)]
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::EntryId;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn entry(id: &str, date: NaiveDate, wake: &str, quality: Quality) -> SleepEntry {
        SleepEntry::new(
            EntryId::new(id).unwrap(),
            "23:00".parse().unwrap(),
            wake.parse().unwrap(),
            quality,
            date.into(),
        )
    }

    fn ids(window: &[&SleepEntry]) -> Vec<String> {
        window.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn window_keeps_last_n_days_oldest_first() {
        // newest first, as stored
        let entries = vec![
            entry("d18", day(18), "07:00", Quality::Good),
            entry("d15", day(15), "07:00", Quality::Good),
            entry("d12", day(12), "07:00", Quality::Good),
            entry("d11", day(11), "07:00", Quality::Good),
            entry("d01", day(1), "07:00", Quality::Good),
        ];

        let selected = window(&entries, 7, day(18));
        assert_eq!(ids(&selected), vec!["d12", "d15", "d18"]);
    }

    #[test]
    fn window_caps_to_most_recent_n_entries() {
        let entries = vec![
            entry("c", day(18), "07:00", Quality::Good),
            entry("b", day(18), "07:00", Quality::Bad),
            entry("a", day(17), "07:00", Quality::Good),
        ];

        let selected = window(&entries, 2, day(18));
        assert_eq!(ids(&selected), vec!["c", "b"]);
    }

    #[test]
    fn window_sort_is_stable_for_same_day() {
        let entries = vec![
            entry("second", day(18), "07:00", Quality::Good),
            entry("first", day(18), "07:00", Quality::Good),
            entry("older", day(16), "07:00", Quality::Good),
        ];

        let selected = window(&entries, 7, day(18));
        assert_eq!(ids(&selected), vec!["older", "second", "first"]);
    }

    #[test]
    fn empty_window_has_no_statistics() {
        assert_eq!(summarize(&[]), None);
        assert_eq!(summarize(&window(&[], 7, day(18))), None);
    }

    #[test]
    fn summarize_averages_and_rounds() {
        let entries = vec![
            entry("a", day(18), "07:00", Quality::Good),       // 8.0
            entry("b", day(17), "06:20", Quality::Bad),        // 7.33
            entry("c", day(16), "06:00", Quality::Good),       // 7.0
        ];
        let stats = summarize(&window(&entries, 7, day(18))).unwrap();

        // (8.0 + 7.33 + 7.0) / 3 = 7.4433...
        assert!((stats.average_duration - 7.44).abs() < f64::EPSILON);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.most_common_quality, Quality::Good);
    }

    #[test]
    fn most_common_tie_goes_to_later_first_appearance() {
        let entries = vec![
            entry("a", day(16), "07:00", Quality::Bad),
            entry("b", day(17), "07:00", Quality::Good),
            entry("c", day(18), "07:00", Quality::Bad),
            entry("d", day(18), "07:00", Quality::Good),
        ];
        let refs: Vec<&SleepEntry> = entries.iter().collect();

        assert_eq!(most_common_quality(&refs), Some(Quality::Good));
    }

    #[test]
    fn most_common_prefers_strictly_higher_count() {
        let entries = vec![
            entry("a", day(16), "07:00", Quality::Interrupted),
            entry("b", day(17), "07:00", Quality::Interrupted),
            entry("c", day(18), "07:00", Quality::Good),
        ];
        let refs: Vec<&SleepEntry> = entries.iter().collect();

        assert_eq!(most_common_quality(&refs), Some(Quality::Interrupted));
    }

    #[test]
    fn recent_quality_over_a_mixed_week() {
        let qualities = [
            Quality::Good,
            Quality::Good,
            Quality::Bad,
            Quality::Good,
            Quality::Interrupted,
            Quality::Bad,
            Quality::Good,
        ];
        let entries: Vec<_> = qualities
            .iter()
            .enumerate()
            .map(|(i, q)| entry(&i.to_string(), day(18), "07:00", *q))
            .collect();

        let summary = recent_quality(&entries).unwrap();
        assert_eq!(summary.total, 7);
        assert_eq!(summary.good, 4);
        assert_eq!(summary.percentage, 57);
        assert_eq!(summary.needs_improvement, 3);
    }

    #[test]
    fn recent_quality_only_looks_at_seven_newest() {
        let mut entries: Vec<_> = (0..7)
            .map(|i| entry(&format!("new{i}"), day(18), "07:00", Quality::Good))
            .collect();
        entries.push(entry("old", day(1), "07:00", Quality::Bad));

        let summary = recent_quality(&entries).unwrap();
        assert_eq!(summary.total, 7);
        assert_eq!(summary.percentage, 100);
        assert_eq!(summary.needs_improvement, 0);
    }

    #[test]
    fn recent_quality_of_nothing_is_none() {
        assert_eq!(recent_quality(&[]), None);
    }
}
