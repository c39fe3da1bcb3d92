use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Request to propose a date
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProposal {
    #[validate(length(min = 1))]
    pub match_id: String,
    #[validate(length(min = 1))]
    pub proposer_id: String,
    #[validate(length(min = 1))]
    pub receiver_id: String,
    #[validate(length(min = 1))]
    pub location: String,
    /// `YYYY-MM-DDTHH:MM:SS`, or RFC 3339 with an offset
    pub date_time: String,
    #[validate(length(min = 1))]
    pub activity: String,
}

/// Replacement terms sent with a counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    #[validate(length(min = 1))]
    pub location: String,
    pub date_time: String,
    #[validate(length(min = 1))]
    pub activity: String,
}

/// How a party answers a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ResponseAction {
    Accept,
    Decline,
    Counter(OfferRequest),
}

impl ResponseAction {
    pub fn label(&self) -> &'static str {
        match self {
            ResponseAction::Accept => "accept",
            ResponseAction::Decline => "decline",
            ResponseAction::Counter(_) => "counter",
        }
    }
}

/// Request to add an emergency contact
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewContact {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "relationship is required"))]
    pub relationship: String,
}

impl NewContact {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            relationship: self.relationship.trim().to_string(),
        }
    }
}

/// Partial update of the signed-in user's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 18))]
    pub age: Option<u8>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub photos: Option<Vec<String>>,
    pub premium: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub age_range: Option<(u8, u8)>,
    pub distance: Option<u16>,
    pub gender: Option<Vec<String>>,
    pub relationship_goals: Option<Vec<String>>,
    pub political_views: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishListUpdate {
    pub must_haves: Option<BTreeSet<String>>,
    pub nice_to_haves: Option<BTreeSet<String>>,
}
