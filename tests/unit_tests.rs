// Unit tests for Lume Connect

use chrono::{DateTime, Duration, TimeZone, Utc};
use lume_connect::core::{
    dates::parse_date_time, DateError, DateNegotiator, FixedClock, MatchEngine, MatchError,
};
use lume_connect::models::{NewProposal, OfferRequest, ProposalStatus, ResponseAction};
use std::sync::Arc;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
}

fn proposal_request(date_time: &str) -> NewProposal {
    NewProposal {
        match_id: "m1".to_string(),
        proposer_id: "u1".to_string(),
        receiver_id: "u2".to_string(),
        location: "Cafe".to_string(),
        date_time: date_time.to_string(),
        activity: "Coffee".to_string(),
    }
}

#[test]
fn test_like_stage_sequence() {
    let clock = FixedClock::new(start());
    let mut engine = MatchEngine::new(Arc::new(clock.clone()));
    let record = engine.create_pending_match("u1", "u2").unwrap();

    let second = engine.advance_stage(&record.id).unwrap();
    assert_eq!(second.like_stage.value(), 2);
    assert!(second.match_timestamp.is_none());

    clock.advance(Duration::minutes(1));
    let third = engine.advance_stage(&record.id).unwrap();
    assert_eq!(third.like_stage.value(), 3);
    assert_eq!(third.match_timestamp, Some(start() + Duration::minutes(1)));

    clock.advance(Duration::minutes(1));
    let err = engine.advance_stage(&record.id).unwrap_err();
    assert!(matches!(err, MatchError::AlreadyMaxStage(_)));

    let stored = engine.get(&record.id).unwrap();
    assert_eq!(stored.like_stage.value(), 3);
    assert_eq!(stored.last_interaction, third.last_interaction);
    assert_eq!(stored.match_timestamp, third.match_timestamp);
}

#[test]
fn test_stage_never_decreases() {
    let mut engine = MatchEngine::new(Arc::new(FixedClock::new(start())));
    let record = engine.create_pending_match("u1", "u2").unwrap();

    let mut previous = record.like_stage;
    for _ in 0..5 {
        let _ = engine.advance_stage(&record.id);
        let current = engine.get(&record.id).unwrap().like_stage;
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_duplicate_like_keeps_first_record() {
    let mut engine = MatchEngine::new(Arc::new(FixedClock::new(start())));
    let first = engine.create_pending_match("u1", "u2").unwrap();

    assert!(matches!(
        engine.create_pending_match("u1", "u2"),
        Err(MatchError::DuplicateMatch { .. })
    ));
    assert_eq!(engine.active_matches(), vec![first]);
}

#[test]
fn test_counter_scenario() {
    let mut dates = DateNegotiator::new(Arc::new(FixedClock::new(start())));
    let proposal = dates.create_proposal(proposal_request("2025-06-01T18:00:00")).unwrap();

    let countered = dates
        .respond(
            &proposal.id,
            "u2",
            ResponseAction::Counter(OfferRequest {
                location: "Park".to_string(),
                date_time: "2025-06-02T12:00:00".to_string(),
                activity: "Walk".to_string(),
            }),
        )
        .unwrap();
    assert_eq!(countered.status.label(), "countered");
    assert_eq!(countered.status.counter().unwrap().offer.location, "Park");

    let accepted = dates.respond(&proposal.id, "u1", ResponseAction::Accept).unwrap();

    assert!(dates.list_pending().iter().all(|p| p.id != proposal.id));
    let upcoming = dates.list_upcoming();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].location, "Park");
    assert_eq!(upcoming[0].activity, "Walk");
    assert_eq!(upcoming[0].date_time, parse_date_time("2025-06-02T12:00:00").unwrap());
    assert_eq!(accepted.status, ProposalStatus::Accepted);
}

#[test]
fn test_declined_never_upcoming() {
    let mut dates = DateNegotiator::new(Arc::new(FixedClock::new(start())));
    let proposal = dates.create_proposal(proposal_request("2025-06-01T18:00:00")).unwrap();

    dates.respond(&proposal.id, "u1", ResponseAction::Decline).unwrap();

    assert_eq!(dates.list_pending()[0].status, ProposalStatus::Declined);
    assert!(dates.list_upcoming().is_empty());
}

#[test]
fn test_unparseable_date_time() {
    let mut dates = DateNegotiator::new(Arc::new(FixedClock::new(start())));
    let err = dates.create_proposal(proposal_request("June 1st")).unwrap_err();
    assert!(matches!(err, DateError::InvalidTime { .. }));
}
