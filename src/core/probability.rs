use crate::models::AcceptanceProbability;

/// Cap on the adjusted probability, in percent
const PROBABILITY_CAP: f64 = 95.0;

/// Score at which the base acceptance rate passes through unchanged
const NEUTRAL_SCORE: f64 = 70.0;

/// Adjust a college's base acceptance rate by the match score
///
/// A match score above 70 amplifies the base rate beyond the published
/// number. That amplification is intentional and must stay; the cap
/// keeps the result short of certainty.
#[inline]
pub fn adjusted_probability(match_score: u32, acceptance_rate: f64) -> f64 {
    (acceptance_rate * (f64::from(match_score) / NEUTRAL_SCORE)).min(PROBABILITY_CAP)
}

/// Map the adjusted probability onto a qualitative tier
pub fn acceptance_probability(match_score: u32, acceptance_rate: f64) -> AcceptanceProbability {
    let adjusted = adjusted_probability(match_score, acceptance_rate);

    if adjusted >= 70.0 {
        AcceptanceProbability::High
    } else if adjusted >= 40.0 {
        AcceptanceProbability::Moderate
    } else if adjusted >= 15.0 {
        AcceptanceProbability::Low
    } else {
        AcceptanceProbability::VeryLow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_score_passes_rate_through() {
        assert_eq!(adjusted_probability(70, 50.0), 50.0);
    }

    #[test]
    fn test_high_score_amplifies_rate() {
        let adjusted = adjusted_probability(100, 50.0);
        assert!((adjusted - 71.428571).abs() < 1e-6);
    }

    #[test]
    fn test_cap_at_95() {
        assert_eq!(adjusted_probability(100, 90.0), 95.0);
    }

    #[test]
    fn test_tier_boundaries() {
        // rate 70 at score 70 -> adjusted exactly 70
        assert_eq!(acceptance_probability(70, 70.0), AcceptanceProbability::High);
        assert_eq!(
            acceptance_probability(70, 69.9),
            AcceptanceProbability::Moderate
        );
        assert_eq!(acceptance_probability(70, 40.0), AcceptanceProbability::Moderate);
        assert_eq!(acceptance_probability(70, 39.9), AcceptanceProbability::Low);
        assert_eq!(acceptance_probability(70, 15.0), AcceptanceProbability::Low);
        assert_eq!(acceptance_probability(70, 14.9), AcceptanceProbability::VeryLow);
    }

    #[test]
    fn test_reference_scenario_tier() {
        // acceptance 20%, score 93 -> 26.57 -> Low
        assert_eq!(acceptance_probability(93, 20.0), AcceptanceProbability::Low);
    }

    #[test]
    fn test_zero_rate_is_very_low() {
        assert_eq!(acceptance_probability(100, 0.0), AcceptanceProbability::VeryLow);
    }
}
