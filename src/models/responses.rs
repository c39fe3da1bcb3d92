use serde::{Deserialize, Serialize};
use crate::models::domain::{DateProposal, EmergencyContact, ProfileMatch, User};

/// Result of a dispatched store action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    Viewed { profile_id: String },
    Passed { profile_id: String },
    FeedRefreshed { candidates: usize },
    Match(ProfileMatch),
    Proposal(DateProposal),
    Archived { dates: Vec<DateProposal> },
    Contact(EmergencyContact),
    User(User),
    SignedOut,
}

/// Read-only view of the whole store, for rendering or debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub current_user: Option<User>,
    pub discovery_feed: Vec<String>,
    pub active_matches: Vec<ProfileMatch>,
    pub pending_matches: Vec<ProfileMatch>,
    pub date_proposals: Vec<DateProposal>,
    pub upcoming_dates: Vec<DateProposal>,
    pub past_dates: Vec<DateProposal>,
    pub emergency_contacts: Vec<EmergencyContact>,
}
