use crate::core::matcher::{MatchEngine, MatchError};
use crate::core::profiles::ProfileDirectory;
use crate::models::ProfileMatch;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur while acting on the discovery feed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Profile {0} was already viewed")]
    AlreadyViewed(String),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Swipe feed over the profile pool
///
/// Candidates keep the pool's insertion order; there is no ranking.
/// A viewed id never comes back, not even after a refresh.
#[derive(Debug, Clone)]
pub struct DiscoveryFeed {
    local_user_id: String,
    pool: Vec<String>,
    feed: Vec<String>,
    viewed: HashSet<String>,
}

impl DiscoveryFeed {
    pub fn new(local_user_id: impl Into<String>, directory: &ProfileDirectory) -> Self {
        let mut feed = Self {
            local_user_id: local_user_id.into(),
            pool: Vec::new(),
            feed: Vec::new(),
            viewed: HashSet::new(),
        };
        feed.set_profiles(directory);
        feed
    }

    /// Replace the pool and recompute the candidates
    pub fn set_profiles(&mut self, directory: &ProfileDirectory) {
        self.pool = directory
            .ids()
            .filter(|id| *id != self.local_user_id)
            .map(str::to_string)
            .collect();
        self.refresh();
    }

    /// Recompute candidates as every profile not yet viewed
    pub fn refresh(&mut self) -> usize {
        self.feed = self
            .pool
            .iter()
            .filter(|id| !self.viewed.contains(*id))
            .cloned()
            .collect();

        tracing::debug!("Discovery feed refreshed: {} candidates", self.feed.len());
        self.feed.len()
    }

    pub fn next_candidates(&self) -> &[String] {
        &self.feed
    }

    pub fn is_viewed(&self, profile_id: &str) -> bool {
        self.viewed.contains(profile_id)
    }

    pub fn local_user_id(&self) -> &str {
        &self.local_user_id
    }

    /// Idempotent; only pool members can be viewed
    pub fn mark_viewed(&mut self, profile_id: &str) -> Result<(), FeedError> {
        self.ensure_known(profile_id)?;
        self.viewed.insert(profile_id.to_string());
        self.feed.retain(|id| id != profile_id);
        Ok(())
    }

    /// Treat profiles the local user is already matched with as viewed.
    ///
    /// Ids outside the pool are remembered too, so a later pool still hides them.
    pub fn exclude_matched<'a>(&mut self, matches: impl IntoIterator<Item = &'a ProfileMatch>) {
        for record in matches {
            let partner = if record.user_id == self.local_user_id {
                &record.matched_user_id
            } else if record.matched_user_id == self.local_user_id {
                &record.user_id
            } else {
                continue;
            };
            self.viewed.insert(partner.clone());
        }

        let viewed = &self.viewed;
        self.feed.retain(|id| !viewed.contains(id));
    }

    /// Like a candidate: open a pending match, then drop it from the feed.
    ///
    /// If the match cannot be created the feed stays as it was.
    pub fn like(&mut self, profile_id: &str, matches: &mut MatchEngine) -> Result<ProfileMatch, FeedError> {
        self.ensure_unviewed(profile_id)?;
        let record = matches.create_pending_match(&self.local_user_id, profile_id)?;
        self.mark_viewed(profile_id)?;

        tracing::debug!("Liked profile {}", profile_id);
        Ok(record)
    }

    pub fn dislike(&mut self, profile_id: &str) -> Result<(), FeedError> {
        self.ensure_unviewed(profile_id)?;
        self.mark_viewed(profile_id)?;

        tracing::debug!("Passed on profile {}", profile_id);
        Ok(())
    }

    fn ensure_known(&self, profile_id: &str) -> Result<(), FeedError> {
        if self.pool.iter().any(|id| id == profile_id) {
            Ok(())
        } else {
            Err(FeedError::UnknownProfile(profile_id.to_string()))
        }
    }

    fn ensure_unviewed(&self, profile_id: &str) -> Result<(), FeedError> {
        self.ensure_known(profile_id)?;
        if self.viewed.contains(profile_id) {
            tracing::warn!("Profile {} was already viewed", profile_id);
            return Err(FeedError::AlreadyViewed(profile_id.to_string()));
        }
        Ok(())
    }
}
