use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Daily spend at or below this is a low-budget trip
pub const LOW_BUDGET_MAX_DAILY: f64 = 3000.0;
/// Daily spend at or below this (and above low) is a mid-budget trip
pub const MID_BUDGET_MAX_DAILY: f64 = 8000.0;

/// Who the traveler is going with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelerType {
    Solo,
    Friends,
    Couples,
    Family,
}

impl FromStr for TravelerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solo" => Ok(TravelerType::Solo),
            "friends" => Ok(TravelerType::Friends),
            "couples" => Ok(TravelerType::Couples),
            "family" => Ok(TravelerType::Family),
            other => Err(format!(
                "unknown traveler type '{}', expected one of: solo, friends, couples, family",
                other
            )),
        }
    }
}

impl fmt::Display for TravelerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TravelerType::Solo => "solo",
            TravelerType::Friends => "friends",
            TravelerType::Couples => "couples",
            TravelerType::Family => "family",
        };
        f.write_str(s)
    }
}

/// Budget tier shared by destinations and travelers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Mid,
    High,
}

impl BudgetTier {
    /// Map a daily spend onto a tier
    pub fn from_daily_cost(cost: f64) -> Self {
        if cost <= LOW_BUDGET_MAX_DAILY {
            BudgetTier::Low
        } else if cost <= MID_BUDGET_MAX_DAILY {
            BudgetTier::Mid
        } else {
            BudgetTier::High
        }
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(BudgetTier::Low),
            "mid" | "medium" => Ok(BudgetTier::Mid),
            "high" => Ok(BudgetTier::High),
            other => Err(format!("unknown budget tier '{}', expected low, mid or high", other)),
        }
    }
}

/// How well-known a destination is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Popularity {
    Offbeat,
    #[default]
    Medium,
    High,
    #[serde(alias = "very high")]
    VeryHigh,
}

impl Popularity {
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl FromStr for Popularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "offbeat" => Ok(Popularity::Offbeat),
            "medium" => Ok(Popularity::Medium),
            "high" => Ok(Popularity::High),
            "very_high" => Ok(Popularity::VeryHigh),
            other => Err(format!(
                "unknown popularity '{}', expected offbeat, medium, high or very_high",
                other
            )),
        }
    }
}

/// Recommended trip length in days (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRange {
    pub min_days: u16,
    pub max_days: u16,
}

impl DurationRange {
    pub fn contains(&self, days: u16) -> bool {
        days >= self.min_days && days <= self.max_days
    }
}

/// A catalog entry. Read-only once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub popularity: Popularity,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub best_for: Vec<TravelerType>,
    #[serde(default)]
    pub budget: Option<BudgetTier>,
    #[serde(default)]
    pub avg_cost_per_day: f64,
    #[serde(default)]
    pub trip_duration: Option<DurationRange>,
    #[serde(default)]
    pub best_months: Vec<u8>,
}

impl Destination {
    /// Explicit tier if the catalog gives one, otherwise derived from the daily cost
    pub fn budget_tier(&self) -> BudgetTier {
        self.budget
            .unwrap_or_else(|| BudgetTier::from_daily_cost(self.avg_cost_per_day))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_year_round(&self) -> bool {
        self.best_months.is_empty()
    }
}

/// A traveler's submitted preferences.
///
/// Built from a validated request; `interests` are lower-cased and de-duplicated
/// in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub traveler_type: TravelerType,
    pub interests: Vec<String>,
    pub budget: BudgetTier,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub climates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<Popularity>,
}

impl UserProfile {
    /// Minimal profile: name, type, interests and budget
    pub fn new(
        name: impl Into<String>,
        traveler_type: TravelerType,
        interests: &[&str],
        budget: BudgetTier,
    ) -> Self {
        Self {
            name: name.into(),
            traveler_type,
            interests: normalize_tags(interests.iter().copied()),
            budget,
            months: Vec::new(),
            duration_days: None,
            climates: Vec::new(),
            popularity: None,
        }
    }

    /// Key used to identify a member inside a group
    pub fn member_key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Checks the invariants the scoring engine relies on
    pub fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("display name must not be empty".to_string());
        }
        if self.interests.is_empty() {
            return Err(format!("profile '{}' has no interests", self.name));
        }
        if let Some(m) = self.months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(format!("profile '{}' has invalid month {}", self.name, m));
        }
        if self.duration_days == Some(0) {
            return Err(format!("profile '{}' has a zero-day duration", self.name));
        }
        Ok(())
    }
}

/// Lower-case, trim and de-duplicate tags, keeping first-seen order
pub fn normalize_tags<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let t = tag.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

/// Group lifecycle state. `Generated` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Pending,
    Generated,
}

/// Mean value of each match signal behind a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub interests: f64,
    pub budget: f64,
    pub traveler_type: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

/// One member's contribution to a group score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberScore {
    pub name: String,
    pub score: f64,
}

/// Ranked destination result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDestination {
    pub name: String,
    pub region: String,
    pub climate: Option<String>,
    pub popularity: Popularity,
    pub tags: Vec<String>,
    pub avg_cost_per_day: f64,
    pub score: f64,
    pub matched_interests: Vec<String>,
    pub breakdown: ScoreBreakdown,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_scores: Vec<MemberScore>,
}

/// Destination similar to a queried one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarDestination {
    pub name: String,
    pub region: String,
    pub similarity: f64,
}

/// Relative importance of each match signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub interests: f64,
    pub budget: f64,
    pub traveler_type: f64,
    pub season: f64,
    pub duration: f64,
    pub climate: f64,
    pub popularity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 0.40,
            budget: 0.20,
            traveler_type: 0.15,
            season: 0.10,
            duration: 0.05,
            climate: 0.05,
            popularity: 0.05,
        }
    }
}
