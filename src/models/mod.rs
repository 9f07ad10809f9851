// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetTier, Destination, DurationRange, GroupStatus, MemberScore, Popularity, ScoreBreakdown,
    ScoredDestination, ScoringWeights, SimilarDestination, TravelerType, UserProfile,
};
pub use requests::{BudgetInput, ImageQuery, ProfileRequest, RecommendRequest, SimilarQuery, StoreImageRequest};
pub use responses::{
    CreateGroupResponse, DestinationsResponse, ErrorResponse, GenerateResponse, GroupMembersResponse,
    GroupResultResponse, HealthResponse, ImageResponse, JoinGroupResponse, MemberView, RecommendResponse,
    SimilarResponse,
};
