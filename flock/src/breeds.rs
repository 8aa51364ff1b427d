//! Breed Configuration
//!
//! Static table of per-breed growout constants, keyed by breed name.
//! Unknown breeds fall back to the Cornish Cross defaults.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-breed lifecycle constants, all in days relative to chick arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedConfig {
    /// Growout period from arrival to processing
    pub days_to_processing: i64,
    /// Starter to Grower
    pub days_to_first_feed_transition: i64,
    /// Grower to Finisher
    pub days_to_second_feed_transition: i64,
    /// When birds typically go to pasture
    pub days_to_first_pasture_move: i64,
}

/// A breed known to the tracker: display name, short code used in batch
/// ids, and lifecycle config.
#[derive(Debug, Clone, Copy)]
pub struct BreedProfile {
    pub name: &'static str,
    pub code: &'static str,
    pub config: BreedConfig,
}

pub const CORNISH_CROSS: &str = "Cornish Cross";

const BREED_PROFILES: &[BreedProfile] = &[
    BreedProfile {
        name: CORNISH_CROSS,
        code: "CC",
        config: BreedConfig {
            days_to_processing: 56,
            days_to_first_feed_transition: 14,
            days_to_second_feed_transition: 35,
            days_to_first_pasture_move: 21,
        },
    },
    BreedProfile {
        name: "Red Ranger",
        code: "RR",
        config: BreedConfig {
            days_to_processing: 70,
            days_to_first_feed_transition: 14,
            days_to_second_feed_transition: 42,
            days_to_first_pasture_move: 21,
        },
    },
    BreedProfile {
        name: "Heritage",
        code: "HE",
        config: BreedConfig {
            days_to_processing: 112,
            days_to_first_feed_transition: 21,
            days_to_second_feed_transition: 56,
            days_to_first_pasture_move: 28,
        },
    },
];

static PROFILES_BY_NAME: Lazy<HashMap<&'static str, &'static BreedProfile>> =
    Lazy::new(|| BREED_PROFILES.iter().map(|p| (p.name, p)).collect());

/// Profile for an exactly-matching breed name, if known.
pub fn profile_for(breed: &str) -> Option<&'static BreedProfile> {
    PROFILES_BY_NAME.get(breed).copied()
}

/// Lifecycle config for a breed, falling back to Cornish Cross for
/// unrecognized names. Callers cannot distinguish the fallback from the
/// real thing; that is the tracker's long-standing policy.
pub fn config_for(breed: &str) -> BreedConfig {
    profile_for(breed)
        .map(|p| p.config)
        .unwrap_or_else(default_config)
}

/// Short code used in batch ids; "XX" for unrecognized breeds.
pub fn breed_code(breed: &str) -> &'static str {
    profile_for(breed).map(|p| p.code).unwrap_or("XX")
}

pub fn default_config() -> BreedConfig {
    // First entry is Cornish Cross
    BREED_PROFILES[0].config
}

/// Names of all known breeds, in table order.
pub fn breed_names() -> Vec<&'static str> {
    BREED_PROFILES.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_breed_lookup() {
        let config = config_for("Cornish Cross");
        assert_eq!(config.days_to_processing, 56);
        assert_eq!(config.days_to_first_feed_transition, 14);
        assert_eq!(config.days_to_second_feed_transition, 35);
        assert_eq!(config.days_to_first_pasture_move, 21);

        assert_eq!(breed_code("Red Ranger"), "RR");
        assert_eq!(breed_code("Heritage"), "HE");
    }

    #[test]
    fn test_unknown_breed_falls_back_to_default() {
        assert_eq!(config_for("Jersey Giant"), default_config());
        assert_eq!(breed_code("Jersey Giant"), "XX");
        assert!(profile_for("Jersey Giant").is_none());
    }

    #[test]
    fn test_breed_names() {
        let names = breed_names();
        assert_eq!(names, vec!["Cornish Cross", "Red Ranger", "Heritage"]);
    }
}
