//! Default catalog of streak milestones.
//!
//! The catalog is a fixed, ordered list of thresholds. It is never mutated
//! at runtime; per-badge unlock state lives in `StreakData`.

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default milestone catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn build_default_catalog_internal() -> Catalog {
    Catalog {
        milestones: vec![
            MilestoneSpec {
                id: "streak_7",
                name: "One Week Warrior",
                emoji: "🔥",
                description: "Worked out 7 days in a row",
                threshold: 7,
            },
            MilestoneSpec {
                id: "streak_14",
                name: "Fortnight Fighter",
                emoji: "💪",
                description: "Worked out 14 days in a row",
                threshold: 14,
            },
            MilestoneSpec {
                id: "streak_30",
                name: "Monthly Master",
                emoji: "🏆",
                description: "Worked out 30 days in a row",
                threshold: 30,
            },
            MilestoneSpec {
                id: "streak_60",
                name: "Two Month Titan",
                emoji: "⚡",
                description: "Worked out 60 days in a row",
                threshold: 60,
            },
            MilestoneSpec {
                id: "streak_90",
                name: "Quarter Champion",
                emoji: "🌟",
                description: "Worked out 90 days in a row",
                threshold: 90,
            },
            MilestoneSpec {
                id: "streak_180",
                name: "Half Year Hero",
                emoji: "👑",
                description: "Worked out 180 days in a row",
                threshold: 180,
            },
            MilestoneSpec {
                id: "streak_365",
                name: "Year-Long Legend",
                emoji: "🏅",
                description: "Worked out 365 days in a row",
                threshold: 365,
            },
        ],
    }
}

impl Catalog {
    /// Materialize the all-locked badge list used as the zero-value state
    pub fn locked_badges(&self) -> Vec<MilestoneBadge> {
        self.milestones.iter().map(MilestoneBadge::locked).collect()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.milestones.is_empty() {
            errors.push("Catalog has no milestones".to_string());
        }

        let mut seen_ids = std::collections::HashSet::new();
        for spec in &self.milestones {
            if spec.id.is_empty() {
                errors.push("Milestone has empty ID".to_string());
            }
            if spec.name.is_empty() {
                errors.push(format!("Milestone '{}' has empty name", spec.id));
            }
            if spec.threshold == 0 {
                errors.push(format!("Milestone '{}' has zero threshold", spec.id));
            }
            if !seen_ids.insert(spec.id) {
                errors.push(format!("Duplicate milestone ID '{}'", spec.id));
            }
        }

        // Thresholds must be strictly ascending so badge lists line up
        // with catalog order everywhere
        for pair in self.milestones.windows(2) {
            if pair[0].threshold >= pair[1].threshold {
                errors.push(format!(
                    "Milestone thresholds not ascending: {} then {}",
                    pair[0].threshold, pair[1].threshold
                ));
            }
        }

        errors
    }
}
