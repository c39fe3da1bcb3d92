// Integration tests for Lume Connect

use chrono::{DateTime, Duration, TimeZone, Utc};
use lume_connect::config::Settings;
use lume_connect::core::{Clock, FixedClock};
use lume_connect::models::{
    MatchEventType, NewContact, NewProposal, OfferRequest, Outcome, ProposalStatus, ResponseAction,
};
use lume_connect::services::{MockDataGenerator, SeedCounts, SeedData};
use lume_connect::store::{Action, Store, StoreError};
use std::sync::Arc;

const ME: &str = "current-user";

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
}

fn create_store(clock: &FixedClock) -> Store {
    let mut generator = MockDataGenerator::new(9, ME);
    let seed = SeedData {
        profiles: generator.profiles(6),
        ..Default::default()
    };
    Store::new(ME, seed, Arc::new(clock.clone())).unwrap()
}

fn matched_id(outcome: Outcome) -> String {
    match outcome {
        Outcome::Match(record) => record.id,
        other => panic!("expected a match, got {:?}", other),
    }
}

fn proposal_id(outcome: Outcome) -> String {
    match outcome {
        Outcome::Proposal(proposal) => proposal.id,
        other => panic!("expected a proposal, got {:?}", other),
    }
}

#[test]
fn test_integration_swipe_match_and_date() {
    let clock = FixedClock::new(start());
    let mut store = create_store(&clock);

    // Swipe through the first three candidates
    let match_id = matched_id(
        store
            .dispatch(Action::LikeProfile { profile_id: "user-1".to_string() })
            .unwrap(),
    );
    store
        .dispatch(Action::DislikeProfile { profile_id: "user-2".to_string() })
        .unwrap();
    store
        .dispatch(Action::LikeProfile { profile_id: "user-3".to_string() })
        .unwrap();

    assert_eq!(store.feed().next_candidates(), ["user-4", "user-5", "user-6"]);
    assert_eq!(store.matches().pending_matches().len(), 2);

    // Escalate the first like to a full match
    store.dispatch(Action::AdvanceMatch { match_id: match_id.clone() }).unwrap();
    store.dispatch(Action::AdvanceMatch { match_id: match_id.clone() }).unwrap();
    assert_eq!(store.matches().pending_matches().len(), 1);
    assert!(matches!(
        store.dispatch(Action::AdvanceMatch { match_id: match_id.clone() }),
        Err(StoreError::Match(_))
    ));

    // Negotiate a date on the match
    let proposal = proposal_id(
        store
            .dispatch(Action::ProposeDate(NewProposal {
                match_id: match_id.clone(),
                proposer_id: ME.to_string(),
                receiver_id: "user-1".to_string(),
                location: "Harbor Bistro".to_string(),
                date_time: "2025-05-03T19:00:00".to_string(),
                activity: "Dinner".to_string(),
            }))
            .unwrap(),
    );
    store
        .dispatch(Action::RespondToProposal {
            proposal_id: proposal.clone(),
            actor_id: "user-1".to_string(),
            response: ResponseAction::Counter(OfferRequest {
                location: "City Park".to_string(),
                date_time: "2025-05-04T12:00:00".to_string(),
                activity: "Walk in the park".to_string(),
            }),
        })
        .unwrap();
    store
        .dispatch(Action::RespondToProposal {
            proposal_id: proposal.clone(),
            actor_id: ME.to_string(),
            response: ResponseAction::Accept,
        })
        .unwrap();

    let snapshot = store.snapshot();
    assert!(snapshot.date_proposals.is_empty());
    assert_eq!(snapshot.upcoming_dates.len(), 1);
    assert_eq!(snapshot.upcoming_dates[0].location, "City Park");
    assert_eq!(snapshot.upcoming_dates[0].match_id, match_id);

    // After the date, the sweep archives it
    clock.advance(Duration::days(4));
    let archived = store.dispatch(Action::ArchiveElapsed).unwrap();
    assert!(matches!(archived, Outcome::Archived { ref dates } if dates.len() == 1));
    assert_eq!(store.dates().list_past().len(), 1);

    let kinds: Vec<MatchEventType> = store.drain_events().iter().map(|e| e.event_type).collect();
    assert_eq!(
        kinds,
        vec![
            MatchEventType::Liked,
            MatchEventType::Passed,
            MatchEventType::Liked,
            MatchEventType::Matched,
        ]
    );
}

#[test]
fn test_integration_refresh_keeps_viewed_out() {
    let clock = FixedClock::new(start());
    let mut store = create_store(&clock);

    store
        .dispatch(Action::MarkViewed { profile_id: "user-1".to_string() })
        .unwrap();
    store
        .dispatch(Action::DislikeProfile { profile_id: "user-6".to_string() })
        .unwrap();

    let refreshed = store.dispatch(Action::RefreshFeed).unwrap();

    assert_eq!(refreshed, Outcome::FeedRefreshed { candidates: 4 });
    assert_eq!(store.feed().next_candidates(), ["user-2", "user-3", "user-4", "user-5"]);
}

#[test]
fn test_integration_seeded_store() {
    let clock = FixedClock::new(start());
    let seed = MockDataGenerator::new(3, ME).generate(
        SeedCounts { profiles: 10, matches: 5, proposals: 8 },
        clock.now(),
    );
    let accepted = seed
        .proposals
        .iter()
        .filter(|p| p.status == ProposalStatus::Accepted)
        .count();

    let store = Store::new(ME, seed, Arc::new(clock)).unwrap();

    assert_eq!(store.matches().active_matches().len(), 5);
    assert_eq!(store.dates().list_upcoming().len(), accepted);
    assert_eq!(store.dates().list_pending().len(), 8 - accepted);
    assert!(store
        .dates()
        .list_pending()
        .iter()
        .all(|p| p.status != ProposalStatus::Accepted));
    assert_eq!(store.matches().matches_with_users(store.directory()).len(), 5);
}

#[test]
fn test_integration_seed_from_json() {
    let json = r#"{
        "profiles": [{
            "id": "user-1", "name": "Avery", "age": 29, "location": "Chicago",
            "preferences": {"ageRange": [25, 35], "distance": 25}
        }],
        "matches": [{
            "id": "m1", "userId": "current-user", "matchedUserId": "user-1",
            "likeStage": 3, "matchTimestamp": "2025-04-30T10:00:00Z",
            "lastInteraction": "2025-04-30T10:00:00Z"
        }],
        "proposals": [{
            "id": "p1", "matchId": "m1", "proposerId": "user-1", "receiverId": "current-user",
            "location": "Cafe", "dateTime": "2025-06-01T18:00:00", "activity": "Coffee",
            "status": "pending", "createdAt": "2025-04-30T11:00:00Z"
        }]
    }"#;
    let seed = SeedData::from_json_str(json).unwrap();
    let mut store = Store::new(ME, seed, Arc::new(FixedClock::new(start()))).unwrap();

    let accepted = store
        .dispatch(Action::RespondToProposal {
            proposal_id: "p1".to_string(),
            actor_id: ME.to_string(),
            response: ResponseAction::Accept,
        })
        .unwrap();

    assert!(matches!(accepted, Outcome::Proposal(ref p) if p.status == ProposalStatus::Accepted));
    assert_eq!(store.dates().list_upcoming()[0].id, "p1");
    assert!(store.feed().next_candidates().is_empty());
    assert!(store.feed().is_viewed("user-1"));
}

#[test]
fn test_integration_default_feed_skips_seeded_matches() {
    let mut store = Store::from_settings(&Settings::default()).unwrap();
    let seeded: Vec<String> = store
        .matches()
        .active_matches()
        .into_iter()
        .map(|m| m.matched_user_id)
        .collect();
    assert_eq!(seeded.len(), 5);
    assert!(store
        .feed()
        .next_candidates()
        .iter()
        .all(|id| !seeded.contains(id)));

    let first = store.feed().next_candidates()[0].clone();
    let liked = store
        .dispatch(Action::LikeProfile { profile_id: first.clone() })
        .unwrap();

    assert!(matches!(liked, Outcome::Match(ref m) if m.matched_user_id == first));
    assert_eq!(store.matches().pending_matches().len(), 1);
}

#[test]
fn test_integration_inconsistent_seed_rejected() {
    let json = r#"{
        "matches": [{
            "id": "m1", "userId": "current-user", "matchedUserId": "user-1",
            "likeStage": 2, "matchTimestamp": "2025-04-30T10:00:00Z",
            "lastInteraction": "2025-04-30T10:00:00Z"
        }]
    }"#;
    let seed = SeedData::from_json_str(json).unwrap();

    let result = Store::new(ME, seed, Arc::new(FixedClock::new(start())));

    assert!(matches!(result, Err(StoreError::Match(_))));
}

#[test]
fn test_integration_safety_contacts() {
    let clock = FixedClock::new(start());
    let mut store = create_store(&clock);

    let contact = match store
        .dispatch(Action::AddContact(NewContact {
            name: "Jane Doe".to_string(),
            phone: "(555) 123-4567".to_string(),
            relationship: "Friend".to_string(),
        }))
        .unwrap()
    {
        Outcome::Contact(contact) => contact,
        other => panic!("expected a contact, got {:?}", other),
    };

    assert!(store
        .dispatch(Action::AddContact(NewContact {
            name: "John".to_string(),
            phone: String::new(),
            relationship: "Family".to_string(),
        }))
        .is_err());

    store
        .dispatch(Action::RemoveContact { contact_id: contact.id })
        .unwrap();
    assert!(store.contacts().is_empty());
}
