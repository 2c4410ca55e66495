//! Activity ranking and node coloring
//!
//! Every participant gets an activity value (interaction total + 1). Values
//! are sorted descending and paired position by position with a red-to-blue
//! gradient that has one color per participant.
//!
//! ## Tie behavior
//!
//! The color map is keyed by activity *value*, filled while walking the
//! sorted values from highest to lowest, last write wins. Participants that
//! share a value therefore share a color, and that color is the one at the
//! value's lowest-ranked position. Example with values `[5, 3, 3, 1]`:
//!
//! | rank | value | gradient  | kept |
//! |------|-------|-----------|------|
//! | 0    | 5     | `#ff0000` | yes  |
//! | 1    | 3     | `#c00040` | no   |
//! | 2    | 3     | `#800080` | yes  |
//! | 3    | 1     | `#4000c0` | yes  |
//!
//! Gradient position 1 is never used. This is intentional and reproducible.

use crate::types::{Participant, ParticipantId};
use std::collections::{BTreeMap, HashMap};

/// Generate `n` hex colors running from red to blue.
///
/// Uses a constant step of `256 / n`: position `i` is
/// `(256 - step * i, 0, step * i)` with each channel truncated and clamped
/// into `0..=255`. Returns an empty vector for `n == 0`.
pub fn red_to_blue(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let step = 256.0 / n as f64;
    (0..n)
        .map(|i| {
            let offset = step * i as f64;
            let red = channel(256.0 - offset);
            let blue = channel(offset);
            format!("#{:02x}{:02x}{:02x}", red, 0, blue)
        })
        .collect()
}

fn channel(value: f64) -> u8 {
    (value as i64).clamp(0, 255) as u8
}

/// Activity value for an interaction total: total + 1, or 1 without interactions.
pub fn activity_value(total: Option<u64>) -> u64 {
    total.map_or(1, |t| t + 1)
}

/// Per-participant activity values and colors.
#[derive(Debug, Clone, Default)]
pub struct ActivityRanking {
    /// Activity value per participant, in registry order
    pub values: Vec<u64>,
    /// All activity values sorted descending (duplicates kept)
    pub sorted_values: Vec<u64>,
    /// Gradient generated for this ranking, one color per participant
    pub gradient: Vec<String>,
    /// Color per participant, in registry order
    pub colors: Vec<String>,
    value_colors: BTreeMap<u64, String>,
}

impl ActivityRanking {
    pub fn compute(participants: &[Participant], totals: &HashMap<ParticipantId, u64>) -> Self {
        if participants.is_empty() {
            return Self::default();
        }

        let values: Vec<u64> = participants
            .iter()
            .map(|p| activity_value(totals.get(&p.id).copied()))
            .collect();

        let mut sorted_values = values.clone();
        sorted_values.sort_unstable_by(|a, b| b.cmp(a));

        let gradient = red_to_blue(participants.len());

        let mut value_colors = BTreeMap::new();
        for (value, color) in sorted_values.iter().zip(&gradient) {
            value_colors.insert(*value, color.clone());
        }

        // Every value came from `sorted_values`, so the lookup always hits.
        let colors = values
            .iter()
            .map(|v| value_colors.get(v).cloned().unwrap_or_default())
            .collect();

        tracing::debug!(
            participants = participants.len(),
            distinct_values = value_colors.len(),
            "Computed activity ranking"
        );

        Self {
            values,
            sorted_values,
            gradient,
            colors,
            value_colors,
        }
    }

    /// Color assigned to an activity value, if any participant has it.
    pub fn color_for_value(&self, value: u64) -> Option<&str> {
        self.value_colors.get(&value).map(String::as_str)
    }

    /// Number of distinct activity values.
    pub fn distinct_values(&self) -> usize {
        self.value_colors.len()
    }
}
