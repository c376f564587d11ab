//! Deterministic priority engine.
//!
//! Layered keyword matching over the raw complaint text: the full Critical
//! tier is checked first and any hit short-circuits, then High, then
//! Medium, with Low as the default. Matching is case-insensitive substring
//! containment rather than whole-word, so a keyword embedded in a longer
//! word still triggers. Worst-case urgency wins on any ambiguity.

use crate::types::PriorityLevel;

/// Life-threatening or immediate-danger indicators.
const CRITICAL_KEYWORDS: &[&str] = &[
    "emergency",
    "life threatening",
    "critical",
    "danger",
    "death",
    "fire",
    "collapse",
    "explosion",
    "injury",
    "bleeding",
    "attack",
    "severe",
    "crisis",
    "urgent attention",
    "urgent",
    "suffering",
    "ambulance stuck",
    "fire hazard",
    "fire risk",
    "posing serious danger",
    "critical emergency",
    "life",
    "patient",
];

/// Health/safety risks and major disruptions.
const HIGH_KEYWORDS: &[&str] = &[
    "hospital",
    "broken",
    "damaged",
    "leak",
    "flooding",
    "contaminated",
    "unsafe",
    "risk",
    "hazard",
    "exposed",
    "pollution",
    "very high",
    "very low",
    "industrial",
    "health",
    "medical",
    "stagnant water",
    "sewage",
    "overflow",
    "waterlogging",
    "disrupted",
    "clogged",
    "causing accidents",
    "attacked",
    "menace",
    "causing",
    "affecting",
    "insufficient",
    "lacks",
    "abandoned",
    "creating nuisance",
    "stuck",
    "malfunctioning",
    "outage",
    "tilted dangerously",
    "dilapidated",
    "posing risk",
    "fire safety",
    "open manhole",
    "respiratory problems",
];

/// Service quality and maintenance issues.
const MEDIUM_KEYWORDS: &[&str] = &[
    "problem",
    "issue",
    "concern",
    "need",
    "needs",
    "require",
    "poor",
    "inadequate",
    "delayed",
    "not working",
    "irregular",
    "missing",
    "pending",
    "slow",
    "very poor",
    "not maintained",
    "not available",
    "not functioning",
    "not responding",
    "not clear",
    "difficult",
    "inconvenience",
    "overcrowded",
    "excessive",
    "unclear",
    "rude",
    "improper",
    "limited",
    "complicated",
    "frequently",
    "outdated",
];

/// Classify complaint urgency from keyword tiers.
///
/// Pure function; blank text maps to `Low`.
pub fn classify(text: &str) -> PriorityLevel {
    let text = text.to_lowercase();
    let text = text.trim();
    if text.is_empty() {
        return PriorityLevel::Low;
    }

    if CRITICAL_KEYWORDS.iter().any(|k| text.contains(k)) {
        return PriorityLevel::Critical;
    }
    if HIGH_KEYWORDS.iter().any(|k| text.contains(k)) {
        return PriorityLevel::High;
    }
    if MEDIUM_KEYWORDS.iter().any(|k| text.contains(k)) {
        return PriorityLevel::Medium;
    }

    PriorityLevel::Low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_keyword_wins() {
        assert_eq!(
            classify("There is a fire in the building"),
            PriorityLevel::Critical
        );
        assert_eq!(
            classify("URGENT attention needed immediately"),
            PriorityLevel::Critical
        );
    }

    #[test]
    fn critical_short_circuits_over_other_tiers() {
        // "broken" (High) and "problem" (Medium) both present, but
        // "danger" must win regardless.
        assert_eq!(
            classify("The broken railing is a danger and a problem"),
            PriorityLevel::Critical
        );
    }

    #[test]
    fn high_tier_matches() {
        assert_eq!(
            classify("Sewage overflow on the main road"),
            PriorityLevel::High
        );
        assert_eq!(
            classify("Electricity outage in the whole block"),
            PriorityLevel::High
        );
    }

    #[test]
    fn embedded_critical_keyword_outranks_high_phrase() {
        // "dangerously" matches the Critical substring "danger" even
        // though "tilted dangerously" is a High entry.
        assert_eq!(
            classify("Streetlight pole tilted dangerously near the school"),
            PriorityLevel::Critical
        );
    }

    #[test]
    fn medium_tier_matches() {
        assert_eq!(
            classify("Garbage collection has been delayed this week"),
            PriorityLevel::Medium
        );
    }

    #[test]
    fn default_is_low() {
        assert_eq!(classify("Please plant more trees in the park"), PriorityLevel::Low);
        assert_eq!(classify(""), PriorityLevel::Low);
        assert_eq!(classify("   "), PriorityLevel::Low);
    }

    #[test]
    fn substring_containment_is_intentional() {
        // "lifeguard" contains the Critical keyword "life"; over-triggering
        // in favor of safety is the designed behavior.
        assert_eq!(classify("The lifeguard tower is empty"), PriorityLevel::Critical);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("SEWAGE everywhere"), PriorityLevel::High);
    }

    #[test]
    fn every_result_is_a_known_tier() {
        for text in ["fire", "sewage", "slow", "nothing of note", ""] {
            let level = classify(text);
            assert!(matches!(
                level,
                PriorityLevel::Critical
                    | PriorityLevel::High
                    | PriorityLevel::Medium
                    | PriorityLevel::Low
            ));
        }
    }
}
