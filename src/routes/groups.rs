use actix_web::{web, HttpResponse};
use crate::models::{
    CreateGroupResponse, GenerateResponse, GroupMembersResponse, GroupResultResponse, GroupStatus,
    JoinGroupResponse, MemberView, ProfileRequest,
};
use crate::routes::{parse_profile, ApiError, AppState};

/// Configure group coordination routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/groups", web::post().to(create_group))
        .route("/groups/{code}/members", web::post().to(join_group))
        .route("/groups/{code}/members", web::get().to(list_members))
        .route("/groups/{code}/generate", web::post().to(generate))
        .route("/groups/{code}/result", web::get().to(get_result));
}

/// Create a new group
///
/// POST /api/v1/groups
async fn create_group(state: web::Data<AppState>) -> HttpResponse {
    let code = state.coordinator.create_group().await;

    HttpResponse::Created().json(CreateGroupResponse {
        code,
        status: GroupStatus::Pending,
    })
}

/// Join a group, or update this member's preferences
///
/// POST /api/v1/groups/{code}/members
///
/// Request body:
/// ```json
/// {
///   "name": "Ravi",
///   "travelerType": "friends",
///   "interests": ["mountains", "trekking", "camping"],
///   "budget": 4500
/// }
/// ```
async fn join_group(
    state: web::Data<AppState>,
    code: web::Path<String>,
    req: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let code = code.into_inner();
    let profile = parse_profile(req.into_inner())?;

    let member_count = state.coordinator.join_group(&code, profile).await?;
    let snapshot = state.coordinator.list_members(&code).await?;

    Ok(HttpResponse::Ok().json(JoinGroupResponse {
        code: snapshot.code,
        member_count,
        status: snapshot.status,
    }))
}

/// List members, with results once generated
///
/// GET /api/v1/groups/{code}/members
async fn list_members(
    state: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = state.coordinator.list_members(&code).await?;

    let owner_key = snapshot.owner.as_deref().map(|o| o.trim().to_lowercase());
    let members = snapshot
        .members
        .into_iter()
        .map(|profile| MemberView {
            is_owner: owner_key.as_deref() == Some(profile.member_key().as_str()),
            profile,
        })
        .collect();

    Ok(HttpResponse::Ok().json(GroupMembersResponse {
        code: snapshot.code,
        status: snapshot.status,
        owner: snapshot.owner,
        members,
        results: snapshot.result.map(|r| r.as_ref().clone()),
    }))
}

/// Generate the group's shared recommendation (idempotent)
///
/// POST /api/v1/groups/{code}/generate
async fn generate(
    state: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let outcome = state.coordinator.generate(&code).await?;

    if outcome.already_generated() {
        tracing::debug!("Group {} already generated, returning stored result", code);
    }

    Ok(HttpResponse::Ok().json(GenerateResponse {
        code: crate::services::registry::normalize_code(&code),
        status: GroupStatus::Generated,
        already_generated: outcome.already_generated(),
        results: outcome.result().as_ref().clone(),
    }))
}

/// Poll for the group's result; returns at once while pending
///
/// GET /api/v1/groups/{code}/result
async fn get_result(
    state: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let poll = state.coordinator.poll(&code).await?;

    Ok(HttpResponse::Ok().json(GroupResultResponse {
        code: poll.code,
        ready: poll.result.is_some(),
        status: poll.status,
        results: poll.result.map(|r| r.as_ref().clone()).unwrap_or_default(),
    }))
}
