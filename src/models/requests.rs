use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{normalize_tags, BudgetTier, Popularity, TravelerType, UserProfile};

/// Budget as sent by the wizard: a tier name or a daily amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Amount(f64),
    Tier(String),
}

/// Traveler preferences as submitted by a client.
///
/// Required preferences may be absent on the wire; missing or out-of-range
/// values are rejected by the conversion into [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    #[serde(default)]
    pub traveler_type: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget: Option<BudgetInput>,
    #[serde(default)]
    pub months: Vec<i64>,
    #[serde(default)]
    #[validate(range(min = 1, max = 365))]
    pub duration_days: Option<i64>,
    #[serde(default)]
    pub climates: Vec<String>,
    #[serde(default)]
    pub popularity: Option<String>,
}

impl TryFrom<ProfileRequest> for UserProfile {
    type Error = String;

    fn try_from(req: ProfileRequest) -> Result<Self, Self::Error> {
        let traveler_type: TravelerType = req
            .traveler_type
            .as_deref()
            .ok_or_else(|| "travelerType is required".to_string())?
            .parse()?;

        let budget = match req.budget.as_ref().ok_or_else(|| "budget is required".to_string())? {
            BudgetInput::Tier(tier) => tier.parse::<BudgetTier>()?,
            BudgetInput::Amount(amount) if amount.is_finite() && *amount >= 0.0 => {
                BudgetTier::from_daily_cost(*amount)
            }
            BudgetInput::Amount(amount) => {
                return Err(format!("budget must be a non-negative amount, got {}", amount));
            }
        };

        let popularity = req
            .popularity
            .as_deref()
            .map(str::parse::<Popularity>)
            .transpose()?;

        let mut months = req
            .months
            .iter()
            .map(|&m| match u8::try_from(m) {
                Ok(month) if (1..=12).contains(&month) => Ok(month),
                _ => Err(format!("month {} is outside 1..=12", m)),
            })
            .collect::<Result<Vec<u8>, String>>()?;
        months.sort_unstable();
        months.dedup();

        let duration_days = req
            .duration_days
            .map(|d| u16::try_from(d).map_err(|_| format!("durationDays {} is out of range", d)))
            .transpose()?;

        let profile = UserProfile {
            name: req.name.trim().to_string(),
            traveler_type,
            interests: normalize_tags(req.interests.iter().map(String::as_str)),
            budget,
            months,
            duration_days,
            climates: normalize_tags(req.climates.iter().map(String::as_str)),
            popularity,
        };

        profile.check()?;
        Ok(profile)
    }
}

/// Solo recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[validate(nested)]
    pub profile: ProfileRequest,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query for similar destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarQuery {
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Image cache lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImageQuery {
    #[validate(length(min = 1))]
    pub place: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// Image cache store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreImageRequest {
    #[validate(length(min = 1))]
    pub place: String,
    #[serde(default)]
    pub region: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

impl StoreImageRequest {
    /// Only absolute http(s) URLs are cached
    pub fn has_web_url(&self) -> bool {
        let url = self.url.trim();
        url.starts_with("https://") || url.starts_with("http://")
    }
}
