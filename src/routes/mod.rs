// Route exports
pub mod error;
pub mod groups;
pub mod images;
pub mod recommend;

use actix_web::web;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;
use crate::config::Settings;
use crate::core::{Matcher, ScoringError, SimilarityIndex};
use crate::models::{ProfileRequest, ScoringWeights, UserProfile};
use crate::services::{Catalog, GroupCoordinator, GroupRegistry, ImageCache};

pub use error::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<Catalog>,
    pub similarity: Arc<SimilarityIndex>,
    pub matcher: Matcher,
    pub coordinator: GroupCoordinator,
    pub images: Arc<ImageCache>,
}

impl AppState {
    /// Wire the catalog, registry, matcher and image cache together
    pub fn new(settings: Settings, catalog: Catalog, images: ImageCache) -> Self {
        let weights = ScoringWeights::from(&settings.scoring.weights);
        let matcher = Matcher::new(weights, settings.scoring.min_score);

        let registry = Arc::new(GroupRegistry::new(
            settings.groups.max_members,
            settings.groups.code_length,
            Duration::from_secs(settings.groups.ttl_secs),
        ));

        let catalog = Arc::new(catalog);
        let similarity = Arc::new(SimilarityIndex::build(catalog.destinations()));

        let coordinator = GroupCoordinator::new(
            registry,
            Arc::clone(&catalog),
            matcher.clone(),
            settings.result_limit(None),
        );

        Self {
            settings: Arc::new(settings),
            catalog,
            similarity,
            matcher,
            coordinator,
            images: Arc::new(images),
        }
    }

    pub fn registry(&self) -> &Arc<GroupRegistry> {
        self.coordinator.registry()
    }
}

/// Validate a submitted profile and convert it to the domain type.
/// Any problem with the profile is reported as `InvalidProfile`.
pub(crate) fn parse_profile(req: ProfileRequest) -> Result<UserProfile, ApiError> {
    req.validate()
        .map_err(|e| ScoringError::InvalidProfile(e.to_string()))?;
    let profile = UserProfile::try_from(req).map_err(ScoringError::InvalidProfile)?;
    Ok(profile)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(recommend::configure)
            .configure(groups::configure)
            .configure(images::configure),
    );
}
