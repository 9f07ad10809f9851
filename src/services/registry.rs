use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use crate::core::ScoringError;
use crate::models::{GroupStatus, ScoredDestination, UserProfile};

/// Characters used in group codes (no 0/O or 1/I)
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Errors surfaced by the group registry and coordinator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Group {code} is full ({max} members)")]
    GroupFull { code: String, max: usize },

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Shared, immutable result of a group generation
pub type GroupResult = Arc<Vec<ScoredDestination>>;

/// Outcome of a generate call. `AlreadyGenerated` carries the stored result.
#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    Generated(GroupResult),
    AlreadyGenerated(GroupResult),
}

impl GenerateOutcome {
    pub fn result(&self) -> &GroupResult {
        match self {
            GenerateOutcome::Generated(r) | GenerateOutcome::AlreadyGenerated(r) => r,
        }
    }

    pub fn already_generated(&self) -> bool {
        matches!(self, GenerateOutcome::AlreadyGenerated(_))
    }
}

/// A trip-planning group
#[derive(Debug, Clone)]
pub struct Group {
    pub code: String,
    pub owner: Option<String>,
    pub members: Vec<UserProfile>,
    pub status: GroupStatus,
    pub result: Option<GroupResult>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Group {
    fn new(code: String) -> Self {
        let now = Utc::now();
        Self {
            code,
            owner: None,
            members: Vec::new(),
            status: GroupStatus::Pending,
            result: None,
            created_at: now,
            last_activity: now,
        }
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

/// Read-only view of a group handed to callers
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    pub code: String,
    pub owner: Option<String>,
    pub members: Vec<UserProfile>,
    pub status: GroupStatus,
    pub result: Option<GroupResult>,
}

impl From<&Group> for GroupSnapshot {
    fn from(group: &Group) -> Self {
        Self {
            code: group.code.clone(),
            owner: group.owner.clone(),
            members: group.members.clone(),
            status: group.status,
            result: group.result.clone(),
        }
    }
}

/// In-process store of groups keyed by code
///
/// The map lock is only held to look up, insert or evict entries. Each group
/// sits behind its own mutex, which serializes joins and makes generation
/// exactly-once per group.
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Mutex<Group>>>>,
    max_members: usize,
    code_length: usize,
    ttl: Duration,
}

impl GroupRegistry {
    pub fn new(max_members: usize, code_length: usize, ttl: Duration) -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
            max_members: max_members.max(1),
            code_length: code_length.clamp(4, 16),
            ttl,
        }
    }

    /// Create an empty, pending group and return its code
    pub async fn create(&self) -> String {
        let mut groups = self.groups.write().await;

        let code = loop {
            let candidate = generate_code(self.code_length);
            if !groups.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!("Group code collision on {}, regenerating", candidate);
        };

        groups.insert(code.clone(), Arc::new(Mutex::new(Group::new(code.clone()))));
        tracing::info!("Created group {} ({} active)", code, groups.len());

        code
    }

    async fn slot(&self, code: &str) -> Result<Arc<Mutex<Group>>, GroupError> {
        let key = normalize_code(code);
        self.groups
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or(GroupError::GroupNotFound(key))
    }

    /// Insert a member, or replace the one with the same display name.
    ///
    /// Returns the member count after the join.
    pub async fn join(&self, code: &str, profile: UserProfile) -> Result<usize, GroupError> {
        let slot = self.slot(code).await?;
        let mut group = slot.lock().await;

        let key = profile.member_key();
        match group.members.iter().position(|m| m.member_key() == key) {
            Some(idx) => {
                tracing::debug!("Replacing member {} in group {}", profile.name, group.code);
                group.members[idx] = profile;
            }
            None => {
                if group.members.len() >= self.max_members {
                    return Err(GroupError::GroupFull {
                        code: group.code.clone(),
                        max: self.max_members,
                    });
                }
                if group.owner.is_none() {
                    group.owner = Some(profile.name.clone());
                }
                tracing::info!("Member {} joined group {}", profile.name, group.code);
                group.members.push(profile);
            }
        }

        group.touch();
        Ok(group.members.len())
    }

    pub async fn list_members(&self, code: &str) -> Result<Vec<UserProfile>, GroupError> {
        let slot = self.slot(code).await?;
        let group = slot.lock().await;
        Ok(group.members.clone())
    }

    pub async fn snapshot(&self, code: &str) -> Result<GroupSnapshot, GroupError> {
        let slot = self.slot(code).await?;
        let group = slot.lock().await;
        Ok(GroupSnapshot::from(&*group))
    }

    /// Stored result, or `None` while the group is pending. Never waits for
    /// generation beyond the group lock.
    pub async fn result(&self, code: &str) -> Result<Option<GroupResult>, GroupError> {
        let slot = self.slot(code).await?;
        let group = slot.lock().await;
        Ok(group.result.clone())
    }

    /// Run `compute` over the current members unless a result already exists.
    ///
    /// The group lock is held across the check, the computation and the store,
    /// so concurrent callers run `compute` at most once and all observe the
    /// same `Arc`. On error the group stays pending.
    pub async fn generate_with<F>(&self, code: &str, compute: F) -> Result<GenerateOutcome, GroupError>
    where
        F: FnOnce(&[UserProfile]) -> Result<Vec<ScoredDestination>, ScoringError>,
    {
        let slot = self.slot(code).await?;
        let mut group = slot.lock().await;

        if let Some(existing) = &group.result {
            return Ok(GenerateOutcome::AlreadyGenerated(Arc::clone(existing)));
        }

        let results = Arc::new(compute(&group.members)?);

        group.result = Some(Arc::clone(&results));
        group.status = GroupStatus::Generated;
        group.touch();

        tracing::info!(
            "Generated {} results for group {} ({} members)",
            results.len(),
            group.code,
            group.members.len()
        );

        Ok(GenerateOutcome::Generated(results))
    }

    /// Drop groups idle for longer than the TTL. Groups that are locked, or
    /// whose handle a caller has already taken, are in use and skipped.
    /// Returns the number evicted.
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let ttl = match chrono::Duration::from_std(self.ttl) {
            Ok(ttl) => ttl,
            Err(_) => return 0,
        };

        let mut groups = self.groups.write().await;
        let before = groups.len();

        // Handles are only cloned under the map lock, so the count is stable here
        groups.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(group) => now - group.last_activity <= ttl,
                Err(_) => true,
            }
        });

        let evicted = before - groups.len();
        if evicted > 0 {
            tracing::info!("Evicted {} expired groups ({} remaining)", evicted, groups.len());
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.groups.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.groups.read().await.is_empty()
    }

    pub fn max_members(&self) -> usize {
        self.max_members
    }
}

/// Codes are matched case-insensitively
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Short human-readable code drawn from UUID v4 randomness
fn generate_code(length: usize) -> String {
    let mut code = String::with_capacity(length);
    while code.len() < length {
        for byte in uuid::Uuid::new_v4().as_bytes() {
            if code.len() == length {
                break;
            }
            code.push(CODE_ALPHABET[usize::from(*byte) % CODE_ALPHABET.len()] as char);
        }
    }
    code
}
