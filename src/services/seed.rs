use crate::models::{
    CounterProposal, DateOffer, DateProposal, EmergencyContact, LikeStage, Preferences, ProfileMatch, ProposalStatus,
    User, WishList,
};
use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Initial entities the store starts from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub profiles: Vec<User>,
    #[serde(default)]
    pub matches: Vec<ProfileMatch>,
    #[serde(default)]
    pub proposals: Vec<DateProposal>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

impl SeedData {
    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }
}

const PHOTO_URLS: &[&str] = &[
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330",
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d",
    "https://images.unsplash.com/photo-1517841905240-472988babdf9",
    "https://images.unsplash.com/photo-1539571696357-5a69c17a67c6",
    "https://images.unsplash.com/photo-1524504388940-b1c1722653e1",
    "https://images.unsplash.com/photo-1534528741775-53994a69daeb",
    "https://images.unsplash.com/photo-1488426862026-3ee34a7d66df",
    "https://images.unsplash.com/photo-1504257432389-52343af06ae3",
];

const CITIES: &[&str] = &["New York", "Los Angeles", "Chicago", "Houston", "Miami", "Seattle", "Boston", "Denver"];
const GENDERS: &[&str] = &["Male", "Female", "Non-binary"];
const RELATIONSHIP_GOALS: &[&str] = &["Casual dating", "Long-term relationship", "Marriage", "Not sure yet"];
const POLITICAL_VIEWS: &[&str] = &["Liberal", "Conservative", "Moderate", "Not political", "Other"];

const MUST_HAVES: &[&str] = &[
    "Ambitious", "Family-oriented", "Outdoorsy", "Intellectual", "Creative",
    "Spiritual", "Funny", "Adventurous", "Career-focused",
];

const NICE_TO_HAVES: &[&str] = &[
    "Athletic", "Artistic", "Loves travel", "Animal lover", "Foodie",
    "Tech-savvy", "Meditates", "Volunteers", "Reads a lot", "Politically active",
];

const BIOS: &[&str] = &[
    "Looking for someone to share adventures with. Hiking, travel and new restaurants.",
    "Coffee enthusiast, dog lover and weekend hiker.",
    "Passionate about photography and exploring new places.",
    "Foodie who loves cooking. Also into outdoor activities and good conversation.",
    "Tech professional by day, amateur chef by night.",
];

const ACTIVITIES: &[&str] = &["Coffee", "Drinks", "Dinner", "Walk in the park", "Museum visit", "Movie"];
const LOCATIONS: &[&str] = &[
    "Central Coffee House", "Harbor Bistro", "City Park", "Downtown Cinema",
    "Art Museum", "Riverside Walk", "The Local Pub", "Harmony Gardens",
];

/// Number of entities of each kind to generate
#[derive(Debug, Clone, Copy)]
pub struct SeedCounts {
    pub profiles: usize,
    pub matches: usize,
    pub proposals: usize,
}

/// Deterministic stand-in for a backend, producing records that respect
/// every engine invariant
pub struct MockDataGenerator {
    rng: StdRng,
    local_user_id: String,
}

impl MockDataGenerator {
    pub fn new(rng_seed: u64, local_user_id: impl Into<String>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(rng_seed),
            local_user_id: local_user_id.into(),
        }
    }

    pub fn generate(&mut self, counts: SeedCounts, now: DateTime<Utc>) -> SeedData {
        SeedData {
            profiles: self.profiles(counts.profiles),
            matches: self.matches(counts.matches, now),
            proposals: self.proposals(counts.proposals, now),
            emergency_contacts: Vec::new(),
        }
    }

    /// Profiles `user-1` through `user-{count}`
    pub fn profiles(&mut self, count: usize) -> Vec<User> {
        (1..=count).map(|i| self.profile(i)).collect()
    }

    /// Match `match-{i}` pairs the local user with `user-{i}`.
    pub fn matches(&mut self, count: usize, now: DateTime<Utc>) -> Vec<ProfileMatch> {
        (1..=count)
            .map(|i| {
                let like_stage = LikeStage::new(self.rng.gen_range(1..=3)).unwrap_or(LikeStage::FIRST);
                let match_timestamp = like_stage
                    .is_matched()
                    .then(|| now - Duration::milliseconds(self.rng.gen_range(0..86_400_000)));

                ProfileMatch {
                    id: format!("match-{}", i),
                    user_id: self.local_user_id.clone(),
                    matched_user_id: format!("user-{}", i),
                    like_stage,
                    match_timestamp,
                    last_interaction: now - Duration::milliseconds(self.rng.gen_range(0..604_800_000)),
                }
            })
            .collect()
    }

    /// Proposal `date-{i}` belongs to `match-{i}`, between the local user and `user-{i}`.
    pub fn proposals(&mut self, count: usize, now: DateTime<Utc>) -> Vec<DateProposal> {
        (1..=count)
            .map(|i| {
                let other = format!("user-{}", i);
                let (proposer_id, receiver_id) = if self.rng.gen_bool(0.5) {
                    (self.local_user_id.clone(), other)
                } else {
                    (other, self.local_user_id.clone())
                };

                let days_ahead = self.rng.gen_range(1..=7);
                let date_time = whole_seconds(now + Duration::days(days_ahead));

                let status = match self.rng.gen_range(0..4) {
                    0 => ProposalStatus::Pending,
                    1 => ProposalStatus::Accepted,
                    2 => ProposalStatus::Countered {
                        counter: CounterProposal {
                            proposer_id: receiver_id.clone(),
                            receiver_id: proposer_id.clone(),
                            offer: DateOffer {
                                location: self.pick(LOCATIONS),
                                date_time: whole_seconds(now + Duration::days(days_ahead + 1)),
                                activity: self.pick(ACTIVITIES),
                            },
                            created_at: now,
                        },
                    },
                    _ => ProposalStatus::Declined,
                };

                DateProposal {
                    id: format!("date-{}", i),
                    match_id: format!("match-{}", i),
                    proposer_id,
                    receiver_id,
                    location: self.pick(LOCATIONS),
                    date_time,
                    activity: self.pick(ACTIVITIES),
                    status,
                    created_at: now - Duration::milliseconds(self.rng.gen_range(0..86_400_000)),
                }
            })
            .collect()
    }

    fn profile(&mut self, i: usize) -> User {
        let photo_count = self.rng.gen_range(3..=7);
        let photos = (0..photo_count)
            .map(|_| format!("{}?w=400&fit=crop&auto=format", self.pick(PHOTO_URLS)))
            .collect();

        let must_have_count = self.rng.gen_range(1..=2);
        let nice_to_have_count = self.rng.gen_range(2..=4);
        let gender_count = self.rng.gen_range(1..=2);

        User {
            id: format!("user-{}", i),
            name: format!("User {}", i),
            age: self.rng.gen_range(25..=44),
            location: self.pick(CITIES),
            bio: self.pick(BIOS),
            photos,
            preferences: Preferences {
                age_range: (25, 40),
                distance: 25,
                gender: self.sample(GENDERS, gender_count),
                relationship_goals: vec![self.pick(RELATIONSHIP_GOALS)],
                political_views: Some(self.pick(POLITICAL_VIEWS)),
            },
            wish_list: WishList {
                must_haves: self.sample(MUST_HAVES, must_have_count).into_iter().collect(),
                nice_to_haves: self.sample(NICE_TO_HAVES, nice_to_have_count).into_iter().collect(),
            },
            emergency_contacts: Vec::new(),
            premium: self.rng.gen_bool(0.3),
        }
    }

    fn pick(&mut self, options: &[&str]) -> String {
        options[self.rng.gen_range(0..options.len())].to_string()
    }

    fn sample(&mut self, options: &[&str], count: usize) -> Vec<String> {
        options
            .choose_multiple(&mut self.rng, count)
            .map(|s| s.to_string())
            .collect()
    }
}

fn whole_seconds(at: DateTime<Utc>) -> NaiveDateTime {
    let naive = at.naive_utc();
    naive.with_nanosecond(0).unwrap_or(naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_same_data() {
        let counts = SeedCounts { profiles: 5, matches: 3, proposals: 3 };
        let a = MockDataGenerator::new(7, "current-user").generate(counts, now());
        let b = MockDataGenerator::new(7, "current-user").generate(counts, now());

        assert_eq!(a.profiles, b.profiles);
        assert_eq!(a.matches, b.matches);
        assert_eq!(a.proposals, b.proposals);
    }

    #[test]
    fn test_generated_matches_respect_timestamp_rule() {
        let mut generator = MockDataGenerator::new(42, "current-user");
        for record in generator.matches(50, now()) {
            assert_eq!(record.match_timestamp.is_some(), record.like_stage.is_matched());
        }
    }

    #[test]
    fn test_generated_proposals_have_distinct_parties() {
        let mut generator = MockDataGenerator::new(42, "current-user");
        for proposal in generator.proposals(50, now()) {
            assert_ne!(proposal.proposer_id, proposal.receiver_id);
            assert!(proposal.involves("current-user"));
        }
    }

    #[test]
    fn test_seed_json_defaults() {
        let seed = SeedData::from_json_str(r#"{"profiles": []}"#).unwrap();
        assert!(seed.matches.is_empty());
        assert!(seed.proposals.is_empty());
    }
}
