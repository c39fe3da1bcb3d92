//! Root state container.
//!
//! Every mutation goes through [`Store::dispatch`] as an [`Action`], applied
//! synchronously in dispatch order. A failed action leaves the store as it was.

use crate::config::Settings;
use crate::core::{
    ActivityLog, Clock, DateError, DateNegotiator, DiscoveryFeed, FeedError, MatchEngine, MatchError,
    ProfileDirectory, SafetyContacts, SafetyError, Session, SessionError, SystemClock,
};
use crate::models::{
    MatchEvent, MatchEventType, NewContact, NewProposal, Outcome, PreferencesUpdate, ProfileUpdate,
    ResponseAction, StoreSnapshot, User, WishListUpdate,
};
use crate::services::{MockDataGenerator, SeedCounts, SeedData, SeedError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Safety(#[from] SafetyError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// A state transition requested by the UI layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    MarkViewed { profile_id: String },
    LikeProfile { profile_id: String },
    DislikeProfile { profile_id: String },
    RefreshFeed,
    SetProfiles { profiles: Vec<User> },
    AdvanceMatch { match_id: String },
    ProposeDate(NewProposal),
    RespondToProposal {
        proposal_id: String,
        actor_id: String,
        response: ResponseAction,
    },
    MoveToPast { date_id: String },
    ArchiveElapsed,
    AddContact(NewContact),
    RemoveContact { contact_id: String },
    SignIn { user: User },
    UpdateProfile(ProfileUpdate),
    UpdatePreferences(PreferencesUpdate),
    UpdateWishList(WishListUpdate),
    Logout,
}

/// Aggregate of every engine, owned by one local actor
#[derive(Debug)]
pub struct Store {
    clock: Arc<dyn Clock>,
    directory: ProfileDirectory,
    feed: DiscoveryFeed,
    matches: MatchEngine,
    dates: DateNegotiator,
    contacts: SafetyContacts,
    session: Session,
    activity: ActivityLog,
}

impl Store {
    /// Build a store from injected seed records
    pub fn new(local_user_id: &str, seed: SeedData, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let directory = ProfileDirectory::new(seed.profiles);
        let matches = MatchEngine::with_matches(clock.clone(), seed.matches)?;
        let mut feed = DiscoveryFeed::new(local_user_id, &directory);
        feed.exclude_matched(matches.iter());
        let dates = DateNegotiator::with_proposals(clock.clone(), seed.proposals)?;

        tracing::info!(
            "Store ready for {}: {} profiles, {} matches, {} proposals",
            local_user_id,
            directory.len(),
            matches.len(),
            dates.list_pending().len() + dates.list_upcoming().len()
        );

        Ok(Self {
            clock,
            directory,
            feed,
            matches,
            dates,
            contacts: SafetyContacts::new(seed.emergency_contacts),
            session: Session::new(local_user_id),
            activity: ActivityLog::default(),
        })
    }

    /// Build a store from the configured seed file, or from generated mock data
    pub fn from_settings(settings: &Settings) -> Result<Self, StoreError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let local_user_id = &settings.session.local_user_id;

        let seed = match &settings.seed.file {
            Some(path) => {
                tracing::info!("Loading seed data from {}", path);
                SeedData::from_json_file(path)?
            }
            None => {
                tracing::info!("Generating mock seed data (rng seed {})", settings.seed.rng_seed);
                let counts = SeedCounts {
                    profiles: settings.seed.profile_count,
                    matches: settings.seed.match_count,
                    proposals: settings.seed.proposal_count,
                };
                MockDataGenerator::new(settings.seed.rng_seed, local_user_id.as_str()).generate(counts, clock.now())
            }
        };

        Self::new(local_user_id, seed, clock)
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, StoreError> {
        let now = self.clock.now();
        let local_user_id = self.feed.local_user_id().to_string();

        let outcome = match action {
            Action::MarkViewed { profile_id } => {
                self.feed.mark_viewed(&profile_id)?;
                self.activity.record(&local_user_id, &profile_id, MatchEventType::Viewed, now);
                Outcome::Viewed { profile_id }
            }
            Action::LikeProfile { profile_id } => {
                let record = self.feed.like(&profile_id, &mut self.matches)?;
                self.activity.record(&local_user_id, &profile_id, MatchEventType::Liked, now);
                Outcome::Match(record)
            }
            Action::DislikeProfile { profile_id } => {
                self.feed.dislike(&profile_id)?;
                self.activity.record(&local_user_id, &profile_id, MatchEventType::Passed, now);
                Outcome::Passed { profile_id }
            }
            Action::RefreshFeed => Outcome::FeedRefreshed {
                candidates: self.feed.refresh(),
            },
            Action::SetProfiles { profiles } => {
                self.directory = ProfileDirectory::new(profiles);
                self.feed.set_profiles(&self.directory);
                Outcome::FeedRefreshed {
                    candidates: self.feed.next_candidates().len(),
                }
            }
            Action::AdvanceMatch { match_id } => {
                let record = self.matches.advance_stage(&match_id)?;
                if record.is_matched() {
                    self.activity
                        .record(&record.user_id, &record.matched_user_id, MatchEventType::Matched, now);
                }
                Outcome::Match(record)
            }
            Action::ProposeDate(request) => Outcome::Proposal(self.dates.create_proposal(request)?),
            Action::RespondToProposal {
                proposal_id,
                actor_id,
                response,
            } => Outcome::Proposal(self.dates.respond(&proposal_id, &actor_id, response)?),
            Action::MoveToPast { date_id } => Outcome::Proposal(self.dates.move_to_past(&date_id)?),
            Action::ArchiveElapsed => Outcome::Archived {
                dates: self.dates.archive_elapsed(),
            },
            Action::AddContact(request) => Outcome::Contact(self.contacts.add(request)?),
            Action::RemoveContact { contact_id } => Outcome::Contact(self.contacts.remove(&contact_id)?),
            Action::SignIn { user } => Outcome::User(self.session.sign_in(user)?),
            Action::UpdateProfile(update) => Outcome::User(self.session.update_profile(update)?),
            Action::UpdatePreferences(update) => Outcome::User(self.session.update_preferences(update)?),
            Action::UpdateWishList(update) => Outcome::User(self.session.update_wish_list(update)?),
            Action::Logout => {
                self.session.logout();
                Outcome::SignedOut
            }
        };

        Ok(outcome)
    }

    /// Hand the recorded activity to an external subscriber
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.activity.drain()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            current_user: self.session.current_user().cloned(),
            discovery_feed: self.feed.next_candidates().to_vec(),
            active_matches: self.matches.active_matches(),
            pending_matches: self.matches.pending_matches(),
            date_proposals: self.dates.list_pending(),
            upcoming_dates: self.dates.list_upcoming(),
            past_dates: self.dates.list_past(),
            emergency_contacts: self.contacts.list().to_vec(),
        }
    }

    pub fn directory(&self) -> &ProfileDirectory {
        &self.directory
    }

    pub fn feed(&self) -> &DiscoveryFeed {
        &self.feed
    }

    pub fn matches(&self) -> &MatchEngine {
        &self.matches
    }

    pub fn dates(&self) -> &DateNegotiator {
        &self.dates
    }

    pub fn contacts(&self) -> &SafetyContacts {
        &self.contacts
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}
