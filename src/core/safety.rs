use crate::models::{EmergencyContact, NewContact};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum SafetyError {
    #[error("Invalid emergency contact: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Emergency contact not found: {0}")]
    NotFound(String),
}

/// Emergency contacts who can be told where the user is during a date
#[derive(Debug, Clone, Default)]
pub struct SafetyContacts {
    contacts: Vec<EmergencyContact>,
}

impl SafetyContacts {
    pub fn new(contacts: Vec<EmergencyContact>) -> Self {
        Self { contacts }
    }

    /// Every field is required; surrounding whitespace is dropped.
    pub fn add(&mut self, request: NewContact) -> Result<EmergencyContact, SafetyError> {
        let request = request.trimmed();
        request.validate()?;

        let contact = EmergencyContact {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            phone: request.phone,
            relationship: request.relationship,
        };
        self.contacts.push(contact.clone());

        tracing::info!("Added emergency contact {} ({})", contact.id, contact.relationship);
        Ok(contact)
    }

    pub fn remove(&mut self, contact_id: &str) -> Result<EmergencyContact, SafetyError> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.id == contact_id)
            .ok_or_else(|| SafetyError::NotFound(contact_id.to_string()))?;

        tracing::info!("Removed emergency contact {}", contact_id);
        Ok(self.contacts.remove(index))
    }

    pub fn list(&self) -> &[EmergencyContact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
