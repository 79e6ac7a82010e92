//! Achievement badges derived from completed participation.
//!
//! Badges are a pull-based view over registration history: there is no
//! persisted "awarded" flag that could go stale. [`badges_for`] maps a
//! count of confirmed registrations on completed events to the badge
//! set, cumulatively.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A derived achievement badge.
#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    /// Stable slug identifier (e.g. `"first-step"`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description of the achievement.
    pub description: &'static str,
    /// Icon name for the client to render.
    pub icon: &'static str,
    /// Accent color as a hex string.
    pub color: &'static str,
    /// When the badge was earned: the `joined_at` of the registration
    /// that crossed the threshold, so recomputation is stable.
    pub earned_at: DateTime<Utc>,
}

/// Threshold table: completions required, then static badge fields.
const THRESHOLDS: [(usize, &str, &str, &str, &str, &str); 3] = [
    (
        1,
        "first-step",
        "First Step",
        "Completed your first volunteering event",
        "footprints",
        "#4caf50",
    ),
    (
        3,
        "helping-hand",
        "Helping Hand",
        "Completed three volunteering events",
        "hand-heart",
        "#2196f3",
    ),
    (
        5,
        "super-star",
        "Super Star",
        "Completed five volunteering events",
        "star",
        "#ff9800",
    ),
];

/// Derives the badge set for a list of qualifying participation times.
///
/// `qualifying_joined_at` must hold the `joined_at` timestamps of the
/// user's confirmed registrations on completed events, sorted ascending.
/// Thresholds are cumulative: five completions yield all three badges.
#[must_use]
pub fn badges_for(qualifying_joined_at: &[DateTime<Utc>]) -> Vec<Badge> {
    THRESHOLDS
        .iter()
        .filter_map(|&(threshold, id, name, description, icon, color)| {
            qualifying_joined_at
                .get(threshold - 1)
                .map(|&earned_at| Badge {
                    id,
                    name,
                    description,
                    icon,
                    color,
                    earned_at,
                })
        })
        .collect()
}
