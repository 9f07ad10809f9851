use serde::{Deserialize, Serialize};
use crate::models::domain::{Destination, GroupStatus, ScoredDestination, SimilarDestination, UserProfile};

/// Response for the solo recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub results: Vec<ScoredDestination>,
    pub total_candidates: usize,
}

/// Response for group creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupResponse {
    pub code: String,
    pub status: GroupStatus,
}

/// Response for joining a group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupResponse {
    pub code: String,
    pub member_count: usize,
    pub status: GroupStatus,
}

/// Member entry in a group listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub is_owner: bool,
}

/// Member listing, with results once the group has been generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembersResponse {
    pub code: String,
    pub status: GroupStatus,
    pub owner: Option<String>,
    pub members: Vec<MemberView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ScoredDestination>>,
}

/// Response for a generate call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub code: String,
    pub status: GroupStatus,
    pub already_generated: bool,
    pub results: Vec<ScoredDestination>,
}

/// Poll response; `ready` is false while the group is pending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResultResponse {
    pub code: String,
    pub status: GroupStatus,
    pub ready: bool,
    pub results: Vec<ScoredDestination>,
}

/// Catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationsResponse {
    pub destinations: Vec<Destination>,
    pub total: usize,
}

/// Similar destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarResponse {
    pub name: String,
    pub similar: Vec<SimilarDestination>,
}

/// Image cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub stored: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub destinations: usize,
    pub groups: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
