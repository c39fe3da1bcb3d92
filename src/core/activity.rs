use crate::models::{MatchEvent, MatchEventType};
use chrono::{DateTime, Utc};

/// Append-only log of interaction facts, drained by whoever subscribes
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    events: Vec<MatchEvent>,
}

impl ActivityLog {
    pub fn record(&mut self, user_id: &str, target_user_id: &str, event_type: MatchEventType, at: DateTime<Utc>) {
        tracing::trace!("Activity: {} {:?} {}", user_id, event_type, target_user_id);
        self.events.push(MatchEvent {
            user_id: user_id.to_string(),
            target_user_id: target_user_id.to_string(),
            event_type,
            created_at: at,
        });
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Hand over every event recorded so far, oldest first
    pub fn drain(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}
