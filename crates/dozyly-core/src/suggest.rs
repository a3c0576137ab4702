//! Rule-based sleep suggestions.
//!
//! A fixed table of tips, each triggered by one or more qualities. Tips whose
//! triggers were seen among the recent entries are shown; otherwise a general
//! default set is.

use std::fmt;

use serde::Serialize;

use crate::entry::{Quality, SleepEntry};
use crate::stats::recent;

/// Number of tips shown when nothing in recent history triggers one.
pub const DEFAULT_SUGGESTIONS: usize = 4;

/// Topic a suggestion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Schedule,
    Routine,
    Environment,
    Diet,
    Light,
    Lifestyle,
}

impl Category {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Schedule => "Schedule",
            Self::Routine => "Routine",
            Self::Environment => "Environment",
            Self::Diet => "Diet",
            Self::Light => "Light",
            Self::Lifestyle => "Lifestyle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pictogram shown beside a suggestion. Rendering is up to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Clock,
    Moon,
    Sun,
    Coffee,
    Smartphone,
}

/// A static sleep tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub icon: Icon,
    pub triggers: &'static [Quality],
}

impl Suggestion {
    /// Whether any of `seen` triggers this suggestion.
    pub fn is_triggered_by(&self, seen: &[Quality]) -> bool {
        self.triggers.iter().any(|trigger| seen.contains(trigger))
    }
}

const POOR: &[Quality] = &[Quality::Bad, Quality::Interrupted];

/// Every suggestion, in display order.
pub static SUGGESTIONS: [Suggestion; 8] = [
    Suggestion {
        id: "1",
        title: "Maintain a Consistent Sleep Schedule",
        description: "Go to bed and wake up at the same time every day, even on weekends.",
        category: Category::Schedule,
        icon: Icon::Clock,
        triggers: POOR,
    },
    Suggestion {
        id: "2",
        title: "Create a Relaxing Bedtime Routine",
        description: "Develop a calming pre-sleep routine like reading, gentle stretching, or meditation.",
        category: Category::Routine,
        icon: Icon::Moon,
        triggers: POOR,
    },
    Suggestion {
        id: "3",
        title: "Avoid Screens Before Bed",
        description: "Turn off phones, tablets, and TVs at least 1 hour before bedtime.",
        category: Category::Environment,
        icon: Icon::Smartphone,
        triggers: POOR,
    },
    Suggestion {
        id: "4",
        title: "Limit Caffeine After 6 PM",
        description: "Avoid coffee, tea, and other caffeinated beverages in the evening.",
        category: Category::Diet,
        icon: Icon::Coffee,
        triggers: POOR,
    },
    Suggestion {
        id: "5",
        title: "Try a White Noise Machine",
        description: "Use consistent background noise to mask disruptive sounds.",
        category: Category::Environment,
        icon: Icon::Moon,
        triggers: &[Quality::Interrupted],
    },
    Suggestion {
        id: "6",
        title: "Get Morning Sunlight",
        description: "Expose yourself to bright light in the morning to regulate your circadian rhythm.",
        category: Category::Light,
        icon: Icon::Sun,
        triggers: &[Quality::Bad],
    },
    Suggestion {
        id: "7",
        title: "Keep Your Bedroom Cool",
        description: "Maintain a temperature between 60-67°F (15-19°C) for optimal sleep.",
        category: Category::Environment,
        icon: Icon::Moon,
        triggers: POOR,
    },
    Suggestion {
        id: "8",
        title: "Exercise Regularly",
        description: "Regular physical activity can improve sleep quality, but avoid intense exercise close to bedtime.",
        category: Category::Lifestyle,
        icon: Icon::Sun,
        triggers: &[Quality::Bad],
    },
];

/// General hygiene tips shown regardless of history.
pub const HYGIENE_TIPS: [&str; 8] = [
    "Keep a sleep diary to track patterns",
    "Avoid large meals before bedtime",
    "Use comfortable bedding and pillows",
    "Consider blackout curtains or eye masks",
    "Limit daytime naps to 20-30 minutes",
    "Try relaxation techniques like deep breathing",
    "Keep your bedroom for sleep only",
    "Consult a doctor for persistent sleep issues",
];

/// Picks suggestions for the most recent entries of `entries` (newest first).
pub fn select(entries: &[SleepEntry]) -> Vec<&'static Suggestion> {
    let seen: Vec<Quality> = recent(entries).iter().map(|entry| entry.quality).collect();
    select_for(&seen, &SUGGESTIONS)
}

/// Picks every suggestion in `table` triggered by `seen`, in table order,
/// falling back to the first [`DEFAULT_SUGGESTIONS`] when none match.
pub fn select_for<'a>(seen: &[Quality], table: &'a [Suggestion]) -> Vec<&'a Suggestion> {
    let matched: Vec<&Suggestion> = table
        .iter()
        .filter(|suggestion| suggestion.is_triggered_by(seen))
        .collect();

    if matched.is_empty() {
        table.iter().take(DEFAULT_SUGGESTIONS).collect()
    } else {
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::types::EntryId;

    fn entries(qualities: &[Quality]) -> Vec<SleepEntry> {
        qualities
            .iter()
            .enumerate()
            .map(|(i, quality)| {
                SleepEntry::new(
                    EntryId::new(format!("e{i}")).unwrap(),
                    "23:00".parse().unwrap(),
                    "07:00".parse().unwrap(),
                    *quality,
                    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().into(),
                )
            })
            .collect()
    }

    fn ids(selected: &[&Suggestion]) -> Vec<&'static str> {
        selected.iter().map(|s| s.id).collect()
    }

    #[test]
    fn no_history_falls_back_to_defaults() {
        assert_eq!(ids(&select(&[])), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn all_good_week_falls_back_to_defaults() {
        let week = entries(&[Quality::Good; 7]);
        assert_eq!(ids(&select(&week)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn interrupted_nights_select_interrupted_tips() {
        let week = entries(&[Quality::Good, Quality::Interrupted, Quality::Good]);
        assert_eq!(ids(&select(&week)), vec!["1", "2", "3", "4", "5", "7"]);
    }

    #[test]
    fn bad_nights_select_bad_tips() {
        let week = entries(&[Quality::Bad]);
        assert_eq!(ids(&select(&week)), vec!["1", "2", "3", "4", "6", "7", "8"]);
    }

    #[test]
    fn mixed_history_selects_whole_table_in_order() {
        let week = entries(&[Quality::Bad, Quality::Interrupted]);
        assert_eq!(
            ids(&select(&week)),
            vec!["1", "2", "3", "4", "5", "6", "7", "8"]
        );
    }

    #[test]
    fn only_seven_newest_entries_are_considered() {
        let mut history = vec![Quality::Good; 7];
        history.push(Quality::Bad);
        assert_eq!(ids(&select(&entries(&history))), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn select_for_uses_given_table() {
        let table = [Suggestion {
            id: "x",
            title: "Nap less",
            description: "",
            category: Category::Lifestyle,
            icon: Icon::Sun,
            triggers: &[Quality::Good],
        }];
        assert_eq!(ids(&select_for(&[Quality::Good], &table)), vec!["x"]);
        assert_eq!(ids(&select_for(&[Quality::Bad], &table)), vec!["x"]);
        assert!(select_for(&[], &[]).is_empty());
    }
}
