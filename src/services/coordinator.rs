use std::sync::Arc;
use crate::core::{Matcher, ScoringError};
use crate::models::{GroupStatus, UserProfile};
use crate::services::catalog::Catalog;
use crate::services::registry::{GenerateOutcome, GroupError, GroupRegistry, GroupResult, GroupSnapshot};

/// Poll view of a group's result
#[derive(Debug, Clone)]
pub struct GroupPoll {
    pub code: String,
    pub status: GroupStatus,
    pub result: Option<GroupResult>,
}

/// Orchestrates the group lifecycle: create, join, list, generate and poll.
///
/// Owns nothing mutable itself; all group state lives in the injected
/// [`GroupRegistry`].
#[derive(Clone)]
pub struct GroupCoordinator {
    registry: Arc<GroupRegistry>,
    catalog: Arc<Catalog>,
    matcher: Matcher,
    result_limit: usize,
}

impl GroupCoordinator {
    pub fn new(
        registry: Arc<GroupRegistry>,
        catalog: Arc<Catalog>,
        matcher: Matcher,
        result_limit: usize,
    ) -> Self {
        Self {
            registry,
            catalog,
            matcher,
            result_limit,
        }
    }

    pub fn registry(&self) -> &Arc<GroupRegistry> {
        &self.registry
    }

    pub async fn create_group(&self) -> String {
        self.registry.create().await
    }

    /// Validate and add (or replace) a member profile
    pub async fn join_group(&self, code: &str, profile: UserProfile) -> Result<usize, GroupError> {
        profile.check().map_err(ScoringError::InvalidProfile)?;
        self.registry.join(code, profile).await
    }

    pub async fn list_members(&self, code: &str) -> Result<GroupSnapshot, GroupError> {
        self.registry.snapshot(code).await
    }

    /// Generate the shared recommendation at most once.
    ///
    /// A group with no members gets an empty result and still moves to
    /// `Generated`. Later calls return the stored result unchanged.
    pub async fn generate(&self, code: &str) -> Result<GenerateOutcome, GroupError> {
        let matcher = &self.matcher;
        let catalog = self.catalog.destinations();
        let limit = self.result_limit;

        self.registry
            .generate_with(code, |members| {
                if members.is_empty() {
                    return Ok(Vec::new());
                }
                matcher.rank(members, catalog, limit).map(|r| r.results)
            })
            .await
    }

    /// Current status and result; returns immediately while pending
    pub async fn poll(&self, code: &str) -> Result<GroupPoll, GroupError> {
        let snapshot = self.registry.snapshot(code).await?;
        Ok(GroupPoll {
            code: snapshot.code,
            status: snapshot.status,
            result: snapshot.result,
        })
    }
}
