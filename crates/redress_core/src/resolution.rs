//! Resolution-time estimation.
//!
//! Deterministic: base hours per category scaled by a priority multiplier,
//! truncated to whole hours, rendered as hours below one day and as whole
//! days otherwise (remainder dropped). Unknown categories use the
//! 48-hour base. Any internal failure degrades to the literal "2-3 days".

use crate::types::{Category, PriorityLevel};

/// Rendered estimate when computation cannot complete.
pub const FALLBACK_ESTIMATE: &str = "2-3 days";

const DEFAULT_BASE_HOURS: f64 = 48.0;

fn base_hours(category: &Category) -> f64 {
    match category {
        Category::Sanitation => 24.0,
        Category::Utilities => 48.0,
        Category::Healthcare => 12.0,
        Category::PublicSafety => 6.0,
        Category::Infrastructure => 72.0,
        Category::Administration => 96.0,
        Category::Other(_) => DEFAULT_BASE_HOURS,
    }
}

fn multiplier(priority: PriorityLevel) -> f64 {
    match priority {
        PriorityLevel::Critical => 0.25,
        PriorityLevel::High => 0.5,
        PriorityLevel::Medium => 1.0,
        PriorityLevel::Low => 1.5,
    }
}

/// Estimate time-to-resolution for a category/priority pair.
pub fn estimate(category: &Category, priority: PriorityLevel) -> String {
    let hours = base_hours(category) * multiplier(priority);
    if !hours.is_finite() {
        return FALLBACK_ESTIMATE.to_string();
    }
    let hours = hours.trunc() as i64;

    if hours < 24 {
        format!("{hours} hours")
    } else {
        format!("{} days", hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_public_safety_truncates_to_one_hour() {
        // 6 * 0.25 = 1.5, truncated to 1.
        assert_eq!(
            estimate(&Category::PublicSafety, PriorityLevel::Critical),
            "1 hours"
        );
    }

    #[test]
    fn low_infrastructure_renders_whole_days() {
        // 72 * 1.5 = 108, 108 / 24 = 4 with remainder dropped.
        assert_eq!(
            estimate(&Category::Infrastructure, PriorityLevel::Low),
            "4 days"
        );
    }

    #[test]
    fn exactly_one_day_renders_as_days() {
        // 24 * 1.0 = 24 boundary case.
        assert_eq!(estimate(&Category::Sanitation, PriorityLevel::Medium), "1 days");
    }

    #[test]
    fn below_one_day_renders_hours() {
        assert_eq!(estimate(&Category::Healthcare, PriorityLevel::Critical), "3 hours");
        assert_eq!(estimate(&Category::Sanitation, PriorityLevel::High), "12 hours");
    }

    #[test]
    fn unknown_category_uses_default_base() {
        let category = Category::Other("General".to_string());
        // 48 * 1.0 = 48 -> 2 days.
        assert_eq!(estimate(&category, PriorityLevel::Medium), "2 days");
    }

    #[test]
    fn low_priority_stretches_estimates() {
        // 96 * 1.5 = 144 -> 6 days.
        assert_eq!(estimate(&Category::Administration, PriorityLevel::Low), "6 days");
    }
}
