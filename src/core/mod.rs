// Core algorithm exports
pub mod matcher;
pub mod scoring;
pub mod signals;
pub mod similarity;

pub use matcher::{Matcher, MatchResult, ScoringError};
pub use scoring::{aggregate_scores, calculate_member_score, compare_group_scores, GroupScore, MemberMatch};
pub use similarity::{cosine_similarity, SimilarityIndex};
