use thiserror::Error;
use crate::models::{Destination, MemberScore, ScoredDestination, ScoringWeights, UserProfile};
use crate::core::scoring::{
    aggregate_scores, calculate_member_score, compare_group_scores, mean_breakdown, GroupScore,
    MemberMatch,
};

/// Errors raised by the scoring engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Destination catalog is empty")]
    EmptyCatalog,
}

/// Result of the ranking process
#[derive(Debug)]
pub struct MatchResult {
    pub results: Vec<ScoredDestination>,
    pub total_candidates: usize,
}

/// Ranks catalog destinations for one traveler or a whole group
///
/// # Pipeline Stages
/// 1. Profile validation
/// 2. Per-member scoring of every destination
/// 3. Group aggregation (mean, minimum as tie-breaker)
/// 4. Floor filter, stable sort and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_score: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, min_score: f64) -> Self {
        Self { weights, min_score }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
            min_score: 0.0,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank destinations for a single traveler
    pub fn recommend(
        &self,
        profile: &UserProfile,
        catalog: &[Destination],
        limit: usize,
    ) -> Result<MatchResult, ScoringError> {
        self.score_catalog(std::slice::from_ref(profile), catalog, limit, false)
    }

    /// Rank destinations for a group of one or more members
    ///
    /// # Arguments
    /// * `profiles` - Non-empty set of member profiles
    /// * `catalog` - Candidate destinations, in catalog order
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Destinations scoring above the floor, best first, each with every
    /// member's score. Equal scores keep catalog order.
    pub fn rank(
        &self,
        profiles: &[UserProfile],
        catalog: &[Destination],
        limit: usize,
    ) -> Result<MatchResult, ScoringError> {
        self.score_catalog(profiles, catalog, limit, true)
    }

    fn score_catalog(
        &self,
        profiles: &[UserProfile],
        catalog: &[Destination],
        limit: usize,
        group_mode: bool,
    ) -> Result<MatchResult, ScoringError> {
        if profiles.is_empty() {
            return Err(ScoringError::InvalidProfile("at least one profile is required".to_string()));
        }
        for profile in profiles {
            profile.check().map_err(ScoringError::InvalidProfile)?;
        }
        if catalog.is_empty() {
            return Err(ScoringError::EmptyCatalog);
        }

        let mut scored: Vec<(GroupScore, ScoredDestination)> = catalog
            .iter()
            .filter_map(|destination| {
                let matches: Vec<_> = profiles
                    .iter()
                    .map(|p| calculate_member_score(p, destination, &self.weights))
                    .collect();

                let member_scores: Vec<f64> = matches.iter().map(|m| m.score).collect();
                let group_score = aggregate_scores(&member_scores);

                if group_score.mean <= self.min_score {
                    return None;
                }

                let breakdowns: Vec<_> = matches.iter().map(|m| m.breakdown).collect();

                Some((
                    group_score,
                    ScoredDestination {
                        name: destination.name.clone(),
                        region: destination.region.clone(),
                        climate: destination.climate.clone(),
                        popularity: destination.popularity,
                        tags: destination.tags.clone(),
                        avg_cost_per_day: destination.avg_cost_per_day,
                        score: group_score.mean,
                        matched_interests: matched_union(destination, &matches),
                        breakdown: mean_breakdown(&breakdowns),
                        member_scores: if group_mode {
                            profiles
                                .iter()
                                .zip(&member_scores)
                                .map(|(p, s)| MemberScore { name: p.name.clone(), score: *s })
                                .collect()
                        } else {
                            Vec::new()
                        },
                    },
                ))
            })
            .collect();

        // Stable sort: ties keep catalog order
        scored.sort_by(|(a, _), (b, _)| compare_group_scores(a, b));

        let mut results: Vec<ScoredDestination> = scored.into_iter().map(|(_, d)| d).collect();
        results.truncate(limit);

        Ok(MatchResult {
            results,
            total_candidates: catalog.len(),
        })
    }
}

/// Every requested interest any member matched, in destination tag order
fn matched_union(destination: &Destination, matches: &[MemberMatch]) -> Vec<String> {
    destination
        .tags
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| matches.iter().any(|m| m.matched_interests.contains(t)))
        .collect()
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
