//! Ticket identifier generation.
//!
//! Format: `GRV-<14-digit-timestamp>-<4-digit-random>`. The random suffix
//! makes sub-second collisions statistically unlikely but not impossible;
//! that residual risk is an accepted limitation of the scheme, no
//! uniqueness guarantee is made.

use chrono::Local;
use rand::Rng;

/// Generate a ticket id for a new submission.
pub fn generate() -> String {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let suffix: u32 = rand::thread_rng().gen_range(1000..=9999);
    format!("GRV-{timestamp}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn matches_expected_format() {
        let pattern = Regex::new(r"^GRV-\d{14}-\d{4}$").unwrap();
        for _ in 0..50 {
            let id = generate();
            assert!(pattern.is_match(&id), "bad ticket id: {id}");
        }
    }

    #[test]
    fn suffix_stays_in_range() {
        for _ in 0..200 {
            let id = generate();
            let suffix: u32 = id.rsplit('-').next().unwrap().parse().unwrap();
            assert!((1000..=9999).contains(&suffix));
        }
    }

    #[test]
    fn successive_ids_are_statistically_distinct() {
        // Not guaranteed distinct at sub-second granularity; 20 draws
        // colliding entirely would mean a broken RNG.
        let ids: std::collections::HashSet<String> = (0..20).map(|_| generate()).collect();
        assert!(ids.len() > 1);
    }
}
