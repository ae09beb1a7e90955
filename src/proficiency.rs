use serde::{Deserialize, Serialize};

// Tier thresholds on the overall percent score, ascending. A score at
// exactly a threshold lands in the higher tier.
const BEGINNER_CEILING: f64 = 35.0;
const INTERMEDIATE_CEILING: f64 = 60.0;
const ADVANCED_CEILING: f64 = 85.0;

/// Discrete mastery label derived from the overall score.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
pub enum Proficiency {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Map an overall percent score to a tier. Pure and total; tiers move up or
/// down freely between updates, with no hysteresis.
pub fn classify(overall_score: f64) -> Proficiency {
    if overall_score < BEGINNER_CEILING {
        Proficiency::Beginner
    } else if overall_score < INTERMEDIATE_CEILING {
        Proficiency::Intermediate
    } else if overall_score < ADVANCED_CEILING {
        Proficiency::Advanced
    } else {
        Proficiency::Expert
    }
}
