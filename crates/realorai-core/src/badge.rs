// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge tiers and the score-to-tier rule.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Badge awarded for a day's play, ordered from lowest to highest.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeTier {
    #[default]
    HumanInTraining,
    JustHuman,
    GoodSamaritan,
    AiDetective,
    AiWhisperer,
}

impl BadgeTier {
    /// Player-facing title.
    pub fn title(self) -> &'static str {
        match self {
            Self::HumanInTraining => "Human in Training",
            Self::JustHuman => "Just Human",
            Self::GoodSamaritan => "Good Samaritan",
            Self::AiDetective => "AI Detective",
            Self::AiWhisperer => "AI Whisperer",
        }
    }

    /// Fewest correct answers that earn this tier.
    pub fn min_correct(self) -> u32 {
        match self {
            Self::HumanInTraining => 0,
            Self::JustHuman => 3,
            Self::GoodSamaritan => 4,
            Self::AiDetective => 5,
            Self::AiWhisperer => 6,
        }
    }
}

/// Map a correct-answer count to its badge tier.
///
/// Total over `f64`: negative, fractional and NaN inputs never panic. Values
/// are compared against the thresholds as-is, so `3.7` is `JustHuman`.
pub fn determine_badge(correct_count: f64) -> BadgeTier {
    if correct_count >= 6.0 {
        BadgeTier::AiWhisperer
    } else if correct_count >= 5.0 {
        BadgeTier::AiDetective
    } else if correct_count >= 4.0 {
        BadgeTier::GoodSamaritan
    } else if correct_count >= 3.0 {
        BadgeTier::JustHuman
    } else {
        BadgeTier::HumanInTraining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn thresholds_at_boundaries() {
        assert_eq!(determine_badge(0.0), BadgeTier::HumanInTraining);
        assert_eq!(determine_badge(2.0), BadgeTier::HumanInTraining);
        assert_eq!(determine_badge(3.0), BadgeTier::JustHuman);
        assert_eq!(determine_badge(4.0), BadgeTier::GoodSamaritan);
        assert_eq!(determine_badge(5.0), BadgeTier::AiDetective);
        assert_eq!(determine_badge(6.0), BadgeTier::AiWhisperer);
        assert_eq!(determine_badge(42.0), BadgeTier::AiWhisperer);
    }

    #[test]
    fn fractional_and_degenerate_inputs() {
        assert_eq!(determine_badge(3.7), BadgeTier::JustHuman);
        assert_eq!(determine_badge(2.999), BadgeTier::HumanInTraining);
        assert_eq!(determine_badge(5.5), BadgeTier::AiDetective);
        assert_eq!(determine_badge(-1.0), BadgeTier::HumanInTraining);
        assert_eq!(determine_badge(f64::NEG_INFINITY), BadgeTier::HumanInTraining);
        assert_eq!(determine_badge(f64::INFINITY), BadgeTier::AiWhisperer);
        assert_eq!(determine_badge(f64::NAN), BadgeTier::HumanInTraining);
    }

    #[test]
    fn wire_names_are_screaming_snake_case() {
        let names: Vec<String> = BadgeTier::iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "HUMAN_IN_TRAINING",
                "JUST_HUMAN",
                "GOOD_SAMARITAN",
                "AI_DETECTIVE",
                "AI_WHISPERER"
            ]
        );
        let json = serde_json::to_string(&BadgeTier::AiDetective).unwrap();
        assert_eq!(json, "\"AI_DETECTIVE\"");
    }

    #[test]
    fn min_correct_agrees_with_rule() {
        for tier in BadgeTier::iter() {
            assert_eq!(determine_badge(f64::from(tier.min_correct())), tier);
        }
    }

    proptest! {
        #[test]
        fn below_three_is_human_in_training(n in -1.0e9f64..3.0) {
            prop_assert_eq!(determine_badge(n), BadgeTier::HumanInTraining);
        }

        #[test]
        fn each_band_maps_to_one_tier(n in 3.0f64..1.0e9) {
            let expected = if n >= 6.0 {
                BadgeTier::AiWhisperer
            } else if n >= 5.0 {
                BadgeTier::AiDetective
            } else if n >= 4.0 {
                BadgeTier::GoodSamaritan
            } else {
                BadgeTier::JustHuman
            };
            prop_assert_eq!(determine_badge(n), expected);
        }

        #[test]
        fn rule_is_monotonic(a in -100.0f64..100.0, b in -100.0f64..100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(determine_badge(lo) <= determine_badge(hi));
        }
    }
}
