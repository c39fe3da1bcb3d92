use crate::core::clock::Clock;
use crate::core::profiles::ProfileDirectory;
use crate::models::{LikeStage, MatchWithUser, ProfileMatch};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while creating or advancing matches
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Match already exists between {user_id} and {candidate_id}")]
    DuplicateMatch { user_id: String, candidate_id: String },

    #[error("Match {0} is already at the maximum like stage")]
    AlreadyMaxStage(String),

    #[error("Match not found: {0}")]
    NotFound(String),

    #[error("Invalid match record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

/// Owns every `ProfileMatch` and the monotonic like-stage rule
///
/// # Lifecycle
/// 1. A like creates a record at stage 1, tracked as pending
/// 2. Each advance raises the stage by exactly one
/// 3. Reaching stage 3 stamps `match_timestamp` and ends the pending phase
///
/// Records are never deleted and stages never go down.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    /// Newest first
    matches: VecDeque<ProfileMatch>,
    pending: HashSet<String>,
    pairs: HashSet<(String, String)>,
    clock: Arc<dyn Clock>,
}

impl MatchEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            matches: VecDeque::new(),
            pending: HashSet::new(),
            pairs: HashSet::new(),
            clock,
        }
    }

    /// Build an engine from injected records, kept in the given order.
    ///
    /// Seeded records are active but not tracked as pending.
    pub fn with_matches(clock: Arc<dyn Clock>, seed: Vec<ProfileMatch>) -> Result<Self, MatchError> {
        let mut engine = Self::new(clock);
        let mut ids = HashSet::new();

        for record in seed {
            validate_record(&record)?;
            if !ids.insert(record.id.clone()) {
                return Err(MatchError::InvalidRecord {
                    id: record.id,
                    reason: "duplicate id".to_string(),
                });
            }
            let pair = (record.user_id.clone(), record.matched_user_id.clone());
            if !engine.pairs.insert(pair) {
                return Err(MatchError::DuplicateMatch {
                    user_id: record.user_id,
                    candidate_id: record.matched_user_id,
                });
            }
            engine.matches.push_back(record);
        }

        tracing::debug!("Seeded match engine with {} records", engine.matches.len());
        Ok(engine)
    }

    /// Record a like from `local_user_id` on `candidate_id`
    ///
    /// At most one record exists per ordered pair.
    pub fn create_pending_match(
        &mut self,
        local_user_id: &str,
        candidate_id: &str,
    ) -> Result<ProfileMatch, MatchError> {
        let pair = (local_user_id.to_string(), candidate_id.to_string());
        if self.pairs.contains(&pair) {
            tracing::warn!("Duplicate like from {} on {}", local_user_id, candidate_id);
            return Err(MatchError::DuplicateMatch {
                user_id: pair.0,
                candidate_id: pair.1,
            });
        }

        let record = ProfileMatch {
            id: format!("match-{}", Uuid::new_v4()),
            user_id: pair.0.clone(),
            matched_user_id: pair.1.clone(),
            like_stage: LikeStage::FIRST,
            match_timestamp: None,
            last_interaction: self.clock.now(),
        };

        self.pairs.insert(pair);
        self.pending.insert(record.id.clone());
        self.matches.push_front(record.clone());

        tracing::info!("Created pending match {} for {} -> {}", record.id, local_user_id, candidate_id);
        Ok(record)
    }

    /// Raise a match's like stage by one.
    ///
    /// At stage 3 this fails and leaves the record untouched.
    pub fn advance_stage(&mut self, match_id: &str) -> Result<ProfileMatch, MatchError> {
        let now = self.clock.now();
        let record = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| MatchError::NotFound(match_id.to_string()))?;

        let Some(next) = record.like_stage.next() else {
            tracing::warn!("Match {} is already at stage {}", match_id, record.like_stage);
            return Err(MatchError::AlreadyMaxStage(match_id.to_string()));
        };

        record.like_stage = next;
        record.last_interaction = now;

        if next.is_matched() {
            record.match_timestamp = Some(now);
            self.pending.remove(match_id);
            tracing::info!("Match {} reached stage {}: full match with {}", match_id, next, record.matched_user_id);
        } else {
            tracing::debug!("Match {} advanced to stage {}", match_id, next);
        }

        Ok(record.clone())
    }

    pub fn get(&self, match_id: &str) -> Option<&ProfileMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    /// Every record regardless of stage, newest first
    pub fn active_matches(&self) -> Vec<ProfileMatch> {
        self.matches.iter().cloned().collect()
    }

    /// Liked records that have not reached stage 3, newest first
    pub fn pending_matches(&self) -> Vec<ProfileMatch> {
        self.matches
            .iter()
            .filter(|m| self.pending.contains(&m.id))
            .cloned()
            .collect()
    }

    /// Matches joined with their profiles, most recent full match first.
    ///
    /// Unmatched records sort last; records without a profile are skipped.
    pub fn matches_with_users(&self, directory: &ProfileDirectory) -> Vec<MatchWithUser> {
        let mut joined: Vec<MatchWithUser> = self
            .matches
            .iter()
            .filter_map(|m| {
                directory.get(&m.matched_user_id).map(|user| MatchWithUser {
                    profile_match: m.clone(),
                    user: user.clone(),
                })
            })
            .collect();

        joined.sort_by(|a, b| {
            match (a.profile_match.match_timestamp, b.profile_match.match_timestamp) {
                (Some(a_at), Some(b_at)) => b_at.cmp(&a_at),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });

        joined
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfileMatch> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

fn validate_record(record: &ProfileMatch) -> Result<(), MatchError> {
    let invalid = |reason: &str| MatchError::InvalidRecord {
        id: record.id.clone(),
        reason: reason.to_string(),
    };

    if record.user_id == record.matched_user_id {
        return Err(invalid("user cannot match themselves"));
    }
    match (record.like_stage.is_matched(), record.match_timestamp.is_some()) {
        (true, false) => Err(invalid("stage 3 requires a match timestamp")),
        (false, true) => Err(invalid("match timestamp set before stage 3")),
        _ => Ok(()),
    }
}
