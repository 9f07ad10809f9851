use std::cmp::Ordering;
use crate::models::{Destination, ScoreBreakdown, ScoringWeights, UserProfile};
use crate::core::signals::{
    budget_compatibility, climate_match, duration_fit, interest_overlap, popularity_match,
    season_match, traveler_type_match,
};

/// One member's score for one destination
#[derive(Debug, Clone)]
pub struct MemberMatch {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub matched_interests: Vec<String>,
}

/// Calculate a match score (0-100) of a destination for a single traveler
///
/// Scoring formula:
/// score = 100 * sum(w_i * s_i) / sum(w_i)
///
/// over the signals that apply to the traveler. Interests, budget and traveler
/// type always apply; season, duration, climate and popularity only apply when
/// the traveler stated a preference for them.
pub fn calculate_member_score(
    profile: &UserProfile,
    destination: &Destination,
    weights: &ScoringWeights,
) -> MemberMatch {
    let (interests, matched_interests) = interest_overlap(&profile.interests, destination);
    let budget = budget_compatibility(profile.budget, destination.budget_tier());
    let traveler_type = traveler_type_match(profile.traveler_type, destination);

    let season = season_match(&profile.months, destination);
    let duration = duration_fit(profile.duration_days, destination);
    let climate = climate_match(&profile.climates, destination);
    let popularity = popularity_match(profile.popularity, destination);

    let mut weighted = interests * weights.interests
        + budget * weights.budget
        + traveler_type * weights.traveler_type;
    let mut total_weight = weights.interests + weights.budget + weights.traveler_type;

    for (value, weight) in [
        (season, weights.season),
        (duration, weights.duration),
        (climate, weights.climate),
        (popularity, weights.popularity),
    ] {
        if let Some(v) = value {
            weighted += v * weight;
            total_weight += weight;
        }
    }

    let score = if total_weight > 0.0 {
        (weighted / total_weight * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    MemberMatch {
        score,
        breakdown: ScoreBreakdown {
            interests,
            budget,
            traveler_type,
            season,
            duration,
            climate,
            popularity,
        },
        matched_interests,
    }
}

/// Combined score of a destination across group members
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupScore {
    /// Arithmetic mean of member scores
    pub mean: f64,
    /// Lowest member score, used to break ties in favour of consensus
    pub min: f64,
}

/// Aggregate member scores: mean, with the minimum kept for tie-breaking.
///
/// Order-independent and monotonic in every member score.
pub fn aggregate_scores(scores: &[f64]) -> GroupScore {
    if scores.is_empty() {
        return GroupScore { mean: 0.0, min: 0.0 };
    }

    let sum: f64 = scores.iter().sum();
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);

    GroupScore {
        mean: sum / scores.len() as f64,
        min,
    }
}

/// Descending by mean, then by minimum. Equal scores compare `Equal` so a
/// stable sort keeps catalog order.
pub fn compare_group_scores(a: &GroupScore, b: &GroupScore) -> Ordering {
    b.mean
        .partial_cmp(&a.mean)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.min.partial_cmp(&a.min).unwrap_or(Ordering::Equal))
}

/// Mean of each signal across members; optional signals average over the
/// members that supplied them.
pub fn mean_breakdown(breakdowns: &[ScoreBreakdown]) -> ScoreBreakdown {
    if breakdowns.is_empty() {
        return ScoreBreakdown::default();
    }

    let n = breakdowns.len() as f64;
    let optional_mean = |pick: fn(&ScoreBreakdown) -> Option<f64>| -> Option<f64> {
        let values: Vec<f64> = breakdowns.iter().filter_map(pick).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    };

    ScoreBreakdown {
        interests: breakdowns.iter().map(|b| b.interests).sum::<f64>() / n,
        budget: breakdowns.iter().map(|b| b.budget).sum::<f64>() / n,
        traveler_type: breakdowns.iter().map(|b| b.traveler_type).sum::<f64>() / n,
        season: optional_mean(|b| b.season),
        duration: optional_mean(|b| b.duration),
        climate: optional_mean(|b| b.climate),
        popularity: optional_mean(|b| b.popularity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, Popularity, TravelerType};

    fn destination(tags: &[&str], budget: BudgetTier, best_for: &[TravelerType]) -> Destination {
        Destination {
            name: "Test".to_string(),
            region: "Test Region".to_string(),
            climate: Some("Tropical".to_string()),
            popularity: Popularity::Medium,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            best_for: best_for.to_vec(),
            budget: Some(budget),
            avg_cost_per_day: 2500.0,
            trip_duration: None,
            best_months: vec![],
        }
    }

    #[test]
    fn test_perfect_match_scores_100() {
        let d = destination(&["beach", "nightlife"], BudgetTier::Low, &[TravelerType::Friends]);
        let p = UserProfile::new("a", TravelerType::Friends, &["beach", "nightlife"], BudgetTier::Low);

        let m = calculate_member_score(&p, &d, &ScoringWeights::default());

        assert!((m.score - 100.0).abs() < 1e-9);
        assert_eq!(m.matched_interests, vec!["beach", "nightlife"]);
    }

    #[test]
    fn test_core_signals_only_formula() {
        // interests 0.5, budget adjacent 0.5, type miss 0.0
        // (0.5*0.40 + 0.5*0.20 + 0) / 0.75 * 100 = 40
        let d = destination(&["beach"], BudgetTier::Mid, &[TravelerType::Solo]);
        let p = UserProfile::new("a", TravelerType::Family, &["beach", "food"], BudgetTier::Low);

        let m = calculate_member_score(&p, &d, &ScoringWeights::default());

        assert!((m.score - 40.0).abs() < 1e-9, "got {}", m.score);
        assert_eq!(m.breakdown.season, None);
    }

    #[test]
    fn test_optional_signal_joins_denominator() {
        let d = destination(&["beach"], BudgetTier::Low, &[TravelerType::Solo]);
        let mut p = UserProfile::new("a", TravelerType::Solo, &["beach"], BudgetTier::Low);
        p.climates = vec!["alpine".to_string()];

        // 0.75 / 0.80 * 100
        let m = calculate_member_score(&p, &d, &ScoringWeights::default());
        assert!((m.score - 93.75).abs() < 1e-9, "got {}", m.score);
    }

    #[test]
    fn test_aggregate_mean_and_min() {
        let g = aggregate_scores(&[80.0, 20.0]);
        assert_eq!(g.mean, 50.0);
        assert_eq!(g.min, 20.0);
        assert_eq!(aggregate_scores(&[]), GroupScore { mean: 0.0, min: 0.0 });
    }

    #[test]
    fn test_tie_broken_by_minimum() {
        let split = aggregate_scores(&[80.0, 20.0]);
        let consensus = aggregate_scores(&[50.0, 50.0]);

        assert_eq!(compare_group_scores(&consensus, &split), Ordering::Less);
        assert_eq!(compare_group_scores(&split, &consensus), Ordering::Greater);
        assert_eq!(compare_group_scores(&split, &split), Ordering::Equal);
    }

    #[test]
    fn test_mean_breakdown_optional_fields() {
        let a = ScoreBreakdown { interests: 1.0, season: Some(0.5), ..Default::default() };
        let b = ScoreBreakdown { interests: 0.0, ..Default::default() };

        let mean = mean_breakdown(&[a, b]);
        assert_eq!(mean.interests, 0.5);
        assert_eq!(mean.season, Some(0.5));
        assert_eq!(mean.climate, None);
    }
}
