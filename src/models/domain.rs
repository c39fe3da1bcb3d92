use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

/// User profile as shown in discovery and match listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 18))]
    pub age: u8,
    pub location: String,
    #[serde(default)]
    pub bio: String,
    /// Display order is significant; the first photo is the primary one.
    #[serde(default)]
    pub photos: Vec<String>,
    pub preferences: Preferences,
    #[serde(default)]
    pub wish_list: WishList,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emergency_contacts: Vec<EmergencyContact>,
    #[serde(default)]
    pub premium: bool,
}

impl User {
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}

/// Who a user wants to be shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub age_range: (u8, u8),
    /// Maximum distance in miles
    pub distance: u16,
    #[serde(default)]
    pub gender: Vec<String>,
    #[serde(default)]
    pub relationship_goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_views: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            age_range: (25, 40),
            distance: 25,
            gender: Vec::new(),
            relationship_goals: Vec::new(),
            political_views: None,
        }
    }
}

/// Trait labels a user looks for in a partner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishList {
    #[serde(default)]
    pub must_haves: BTreeSet<String>,
    #[serde(default)]
    pub nice_to_haves: BTreeSet<String>,
}

/// Person who can be notified of the user's whereabouts during a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// Mutual escalation of interest, 1 through 3. Stage 3 is a full match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikeStage(u8);

impl LikeStage {
    pub const FIRST: LikeStage = LikeStage(1);
    pub const MATCHED: LikeStage = LikeStage(3);

    pub fn new(value: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::MATCHED.0)
            .contains(&value)
            .then_some(LikeStage(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_matched(self) -> bool {
        self == Self::MATCHED
    }

    /// The following stage, or `None` once matched
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }
}

impl TryFrom<u8> for LikeStage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LikeStage::new(value).ok_or_else(|| format!("like stage must be between 1 and 3, got {}", value))
    }
}

impl From<LikeStage> for u8 {
    fn from(stage: LikeStage) -> Self {
        stage.0
    }
}

impl fmt::Display for LikeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Relationship between the local user and one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMatch {
    pub id: String,
    pub user_id: String,
    pub matched_user_id: String,
    pub like_stage: LikeStage,
    /// Present if and only if `like_stage` is 3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_timestamp: Option<DateTime<Utc>>,
    pub last_interaction: DateTime<Utc>,
}

impl ProfileMatch {
    pub fn is_matched(&self) -> bool {
        self.like_stage.is_matched()
    }
}

/// Match joined with the matched user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWithUser {
    #[serde(flatten)]
    pub profile_match: ProfileMatch,
    pub user: User,
}

/// Where, when and what for a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateOffer {
    pub location: String,
    pub date_time: NaiveDateTime,
    pub activity: String,
}

/// Alternative terms offered by the receiver of a proposal.
///
/// Carries no id and cannot itself be countered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterProposal {
    pub proposer_id: String,
    pub receiver_id: String,
    #[serde(flatten)]
    pub offer: DateOffer,
    pub created_at: DateTime<Utc>,
}

/// Negotiation state of a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Countered {
        #[serde(rename = "counterProposal")]
        counter: CounterProposal,
    },
    Declined,
}

impl ProposalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Countered { .. } => "countered",
            ProposalStatus::Declined => "declined",
        }
    }

    pub fn counter(&self) -> Option<&CounterProposal> {
        match self {
            ProposalStatus::Countered { counter } => Some(counter),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalStatus::Accepted | ProposalStatus::Declined)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Offer for an in-person meeting tied to a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateProposal {
    pub id: String,
    /// Lookup reference only; the proposal does not own the match
    pub match_id: String,
    pub proposer_id: String,
    pub receiver_id: String,
    pub location: String,
    pub date_time: NaiveDateTime,
    pub activity: String,
    #[serde(flatten)]
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

impl DateProposal {
    /// The proposal's own terms, ignoring any counter
    pub fn offer(&self) -> DateOffer {
        DateOffer {
            location: self.location.clone(),
            date_time: self.date_time,
            activity: self.activity.clone(),
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.proposer_id == user_id || self.receiver_id == user_id
    }
}

/// Activity fact recorded for an interaction with another profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub user_id: String,
    pub target_user_id: String,
    pub event_type: MatchEventType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchEventType {
    Viewed,
    Liked,
    Passed,
    Matched,
}
