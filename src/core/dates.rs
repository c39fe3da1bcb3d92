use crate::core::clock::Clock;
use crate::models::{
    CounterProposal, DateOffer, DateProposal, NewProposal, OfferRequest, ProposalStatus, ResponseAction,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Formats accepted for a local date time, most specific first
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Errors that can occur during date negotiation
#[derive(Debug, Error)]
pub enum DateError {
    #[error("Invalid date time '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("User {0} cannot propose a date to themselves")]
    SelfProposal(String),

    #[error("Cannot {action} proposal {proposal_id} as {actor_id} while it is {status}")]
    InvalidTransition {
        proposal_id: String,
        actor_id: String,
        action: &'static str,
        status: String,
    },

    #[error("Date proposal not found: {0}")]
    NotFound(String),

    #[error("Duplicate date proposal id: {0}")]
    DuplicateId(String),

    #[error("Invalid date offer: {0}")]
    InvalidOffer(#[from] ValidationErrors),
}

/// Parse a proposal's date time.
///
/// Offsets are converted to UTC; naive values are taken as UTC.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, DateError> {
    let trimmed = value.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc())
        .map_err(|e| DateError::InvalidTime {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Owns the date proposal lifecycle and the proposal/upcoming/past split
///
/// # States
/// - `pending` -> `accepted` by either party, promoting the record to upcoming
/// - `pending` -> `countered` by the receiver only
/// - `countered` -> `accepted` by the original proposer, on the counter's terms
/// - `pending | countered` -> `declined` by either party, kept for history
///
/// A proposal id lives in exactly one of the three collections.
#[derive(Debug, Clone)]
pub struct DateNegotiator {
    /// Newest first
    proposals: VecDeque<DateProposal>,
    upcoming: VecDeque<DateProposal>,
    past: VecDeque<DateProposal>,
    clock: Arc<dyn Clock>,
}

impl DateNegotiator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            proposals: VecDeque::new(),
            upcoming: VecDeque::new(),
            past: VecDeque::new(),
            clock,
        }
    }

    /// Build from injected proposals. Accepted ones go straight to upcoming.
    pub fn with_proposals(clock: Arc<dyn Clock>, seed: Vec<DateProposal>) -> Result<Self, DateError> {
        let mut negotiator = Self::new(clock);
        let mut ids = HashSet::new();

        for proposal in seed {
            if proposal.proposer_id == proposal.receiver_id {
                return Err(DateError::SelfProposal(proposal.proposer_id));
            }
            if !ids.insert(proposal.id.clone()) {
                return Err(DateError::DuplicateId(proposal.id));
            }
            if proposal.status == ProposalStatus::Accepted {
                negotiator.upcoming.push_back(proposal);
            } else {
                negotiator.proposals.push_back(proposal);
            }
        }

        tracing::debug!(
            "Seeded date negotiator with {} proposals and {} upcoming dates",
            negotiator.proposals.len(),
            negotiator.upcoming.len()
        );
        Ok(negotiator)
    }

    /// Open a negotiation in `pending` status
    pub fn create_proposal(&mut self, request: NewProposal) -> Result<DateProposal, DateError> {
        if request.proposer_id == request.receiver_id {
            tracing::warn!("Rejected self proposal from {}", request.proposer_id);
            return Err(DateError::SelfProposal(request.proposer_id));
        }
        request.validate()?;

        let now = self.clock.now();
        let date_time = parse_future_date_time(&request.date_time, now)?;

        let proposal = DateProposal {
            id: format!("date-{}", Uuid::new_v4()),
            match_id: request.match_id,
            proposer_id: request.proposer_id,
            receiver_id: request.receiver_id,
            location: request.location,
            date_time,
            activity: request.activity,
            status: ProposalStatus::Pending,
            created_at: now,
        };

        tracing::info!(
            "Proposal {} created for match {}: {} at {} on {}",
            proposal.id,
            proposal.match_id,
            proposal.activity,
            proposal.location,
            proposal.date_time
        );
        self.proposals.push_front(proposal.clone());
        Ok(proposal)
    }

    /// Apply `actor_id`'s answer to a proposal still under negotiation
    pub fn respond(
        &mut self,
        proposal_id: &str,
        actor_id: &str,
        action: ResponseAction,
    ) -> Result<DateProposal, DateError> {
        let Some(index) = self.proposals.iter().position(|p| p.id == proposal_id) else {
            return Err(self.missing_proposal(proposal_id, actor_id, &action));
        };

        let proposal = &self.proposals[index];
        let reject = |status: &ProposalStatus| {
            tracing::warn!(
                "Rejected {} on proposal {} by {} in status {}",
                action.label(),
                proposal_id,
                actor_id,
                status
            );
            DateError::InvalidTransition {
                proposal_id: proposal_id.to_string(),
                actor_id: actor_id.to_string(),
                action: action.label(),
                status: status.to_string(),
            }
        };

        if !proposal.involves(actor_id) {
            return Err(reject(&proposal.status));
        }

        match (&proposal.status, &action) {
            (ProposalStatus::Pending, ResponseAction::Accept) => {
                let terms = proposal.offer();
                self.promote(index, terms)
            }
            (ProposalStatus::Countered { counter }, ResponseAction::Accept) if actor_id == proposal.proposer_id => {
                let terms = counter.offer.clone();
                self.promote(index, terms)
            }
            (ProposalStatus::Pending, ResponseAction::Counter(offer)) if actor_id == proposal.receiver_id => {
                let terms = self.validate_offer(offer)?;
                let counter = CounterProposal {
                    proposer_id: proposal.receiver_id.clone(),
                    receiver_id: proposal.proposer_id.clone(),
                    offer: terms,
                    created_at: self.clock.now(),
                };
                let proposal = &mut self.proposals[index];
                proposal.status = ProposalStatus::Countered { counter };
                tracing::info!("Proposal {} countered by {}", proposal_id, actor_id);
                Ok(proposal.clone())
            }
            (ProposalStatus::Pending | ProposalStatus::Countered { .. }, ResponseAction::Decline) => {
                let proposal = &mut self.proposals[index];
                proposal.status = ProposalStatus::Declined;
                tracing::info!("Proposal {} declined by {}", proposal_id, actor_id);
                Ok(proposal.clone())
            }
            (status, _) => Err(reject(status)),
        }
    }

    /// Move one upcoming date into past dates
    pub fn move_to_past(&mut self, date_id: &str) -> Result<DateProposal, DateError> {
        let index = self
            .upcoming
            .iter()
            .position(|d| d.id == date_id)
            .ok_or_else(|| DateError::NotFound(date_id.to_string()))?;

        let date = self
            .upcoming
            .remove(index)
            .ok_or_else(|| DateError::NotFound(date_id.to_string()))?;
        self.past.push_front(date.clone());

        tracing::debug!("Date {} moved to past dates", date_id);
        Ok(date)
    }

    /// Archive every upcoming date whose time has passed
    pub fn archive_elapsed(&mut self) -> Vec<DateProposal> {
        let now = self.clock.now();
        let (elapsed, remaining): (Vec<_>, Vec<_>) = self
            .upcoming
            .drain(..)
            .partition(|d| Utc.from_utc_datetime(&d.date_time) < now);

        self.upcoming = remaining.into();
        for date in elapsed.iter().rev() {
            self.past.push_front(date.clone());
        }

        if !elapsed.is_empty() {
            tracing::info!("Archived {} elapsed dates", elapsed.len());
        }
        elapsed
    }

    /// Look a date up across proposals, upcoming and past dates
    pub fn get(&self, id: &str) -> Option<&DateProposal> {
        self.proposals
            .iter()
            .chain(self.upcoming.iter())
            .chain(self.past.iter())
            .find(|p| p.id == id)
    }

    /// Proposals still in negotiation plus declined history, newest first
    pub fn list_pending(&self) -> Vec<DateProposal> {
        self.proposals.iter().cloned().collect()
    }

    pub fn list_upcoming(&self) -> Vec<DateProposal> {
        self.upcoming.iter().cloned().collect()
    }

    pub fn list_past(&self) -> Vec<DateProposal> {
        self.past.iter().cloned().collect()
    }

    /// Remove the proposal and insert it into upcoming in one step
    fn promote(&mut self, index: usize, terms: DateOffer) -> Result<DateProposal, DateError> {
        let mut date = self
            .proposals
            .remove(index)
            .ok_or_else(|| DateError::NotFound(format!("proposal at position {}", index)))?;
        date.location = terms.location;
        date.date_time = terms.date_time;
        date.activity = terms.activity;
        date.status = ProposalStatus::Accepted;

        tracing::info!("Proposal {} accepted, date set for {} at {}", date.id, date.date_time, date.location);
        self.upcoming.push_front(date.clone());
        Ok(date)
    }

    fn validate_offer(&self, offer: &OfferRequest) -> Result<DateOffer, DateError> {
        offer.validate()?;
        let date_time = parse_future_date_time(&offer.date_time, self.clock.now())?;
        Ok(DateOffer {
            location: offer.location.clone(),
            date_time,
            activity: offer.activity.clone(),
        })
    }

    fn missing_proposal(&self, proposal_id: &str, actor_id: &str, action: &ResponseAction) -> DateError {
        let promoted = self
            .upcoming
            .iter()
            .chain(self.past.iter())
            .any(|d| d.id == proposal_id);

        if promoted {
            tracing::warn!("Proposal {} was already accepted", proposal_id);
            DateError::InvalidTransition {
                proposal_id: proposal_id.to_string(),
                actor_id: actor_id.to_string(),
                action: action.label(),
                status: ProposalStatus::Accepted.to_string(),
            }
        } else {
            DateError::NotFound(proposal_id.to_string())
        }
    }
}

fn parse_future_date_time(value: &str, now: DateTime<Utc>) -> Result<NaiveDateTime, DateError> {
    let date_time = parse_date_time(value)?;
    if Utc.from_utc_datetime(&date_time) < now {
        return Err(DateError::InvalidTime {
            value: value.to_string(),
            reason: "date is in the past".to_string(),
        });
    }
    Ok(date_time)
}
