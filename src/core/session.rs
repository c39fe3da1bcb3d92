use crate::models::{PreferencesUpdate, ProfileUpdate, User, WishListUpdate};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Cannot sign in as {actual}: this session belongs to {expected}")]
    WrongUser { expected: String, actual: String },

    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),

    #[error("Invalid profile: {0}")]
    Validation(#[from] ValidationErrors),
}

/// The signed-in local user
///
/// Only the user the store acts for can sign in.
#[derive(Debug, Clone)]
pub struct Session {
    local_user_id: String,
    current_user: Option<User>,
}

impl Session {
    pub fn new(local_user_id: impl Into<String>) -> Self {
        Self {
            local_user_id: local_user_id.into(),
            current_user: None,
        }
    }

    pub fn sign_in(&mut self, user: User) -> Result<User, SessionError> {
        if user.id != self.local_user_id {
            tracing::warn!("Rejected sign in as {} for session of {}", user.id, self.local_user_id);
            return Err(SessionError::WrongUser {
                expected: self.local_user_id.clone(),
                actual: user.id,
            });
        }
        user.validate()?;
        tracing::info!("User {} signed in", user.id);
        self.current_user = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            tracing::info!("User {} signed out", user.id);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<User, SessionError> {
        update.validate()?;
        let user = self.user_mut()?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(age) = update.age {
            user.age = age;
        }
        if let Some(location) = update.location {
            user.location = location;
        }
        if let Some(bio) = update.bio {
            user.bio = bio;
        }
        if let Some(photos) = update.photos {
            user.photos = photos;
        }
        if let Some(premium) = update.premium {
            user.premium = premium;
        }

        Ok(user.clone())
    }

    pub fn update_preferences(&mut self, update: PreferencesUpdate) -> Result<User, SessionError> {
        if let Some((min, max)) = update.age_range {
            if min > max {
                return Err(SessionError::InvalidPreferences(format!(
                    "age range minimum {} exceeds maximum {}",
                    min, max
                )));
            }
        }

        let user = self.user_mut()?;
        let preferences = &mut user.preferences;
        if let Some(age_range) = update.age_range {
            preferences.age_range = age_range;
        }
        if let Some(distance) = update.distance {
            preferences.distance = distance;
        }
        if let Some(gender) = update.gender {
            preferences.gender = gender;
        }
        if let Some(goals) = update.relationship_goals {
            preferences.relationship_goals = goals;
        }
        if let Some(views) = update.political_views {
            preferences.political_views = Some(views);
        }

        Ok(user.clone())
    }

    pub fn update_wish_list(&mut self, update: WishListUpdate) -> Result<User, SessionError> {
        let user = self.user_mut()?;
        if let Some(must_haves) = update.must_haves {
            user.wish_list.must_haves = must_haves;
        }
        if let Some(nice_to_haves) = update.nice_to_haves {
            user.wish_list.nice_to_haves = nice_to_haves;
        }
        Ok(user.clone())
    }

    fn user_mut(&mut self) -> Result<&mut User, SessionError> {
        self.current_user.as_mut().ok_or(SessionError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Preferences, WishList};

    fn user() -> User {
        User {
            id: "current-user".to_string(),
            name: "Sam".to_string(),
            age: 31,
            location: "Boston".to_string(),
            bio: String::new(),
            photos: vec![],
            preferences: Preferences::default(),
            wish_list: WishList::default(),
            emergency_contacts: vec![],
            premium: false,
        }
    }

    #[test]
    fn test_updates_require_sign_in() {
        let mut session = Session::new("current-user");
        let err = session.update_profile(ProfileUpdate::default()).unwrap_err();
        assert!(matches!(err, SessionError::NotSignedIn));
    }

    #[test]
    fn test_partial_preference_update() {
        let mut session = Session::new("current-user");
        session.sign_in(user()).unwrap();

        let updated = session
            .update_preferences(PreferencesUpdate {
                distance: Some(10),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.preferences.distance, 10);
        assert_eq!(updated.preferences.age_range, (25, 40));
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let mut session = Session::new("current-user");
        session.sign_in(user()).unwrap();

        let err = session
            .update_preferences(PreferencesUpdate {
                age_range: Some((40, 30)),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidPreferences(_)));
        assert_eq!(session.current_user().map(|u| u.preferences.age_range), Some((25, 40)));
    }

    #[test]
    fn test_underage_sign_in_rejected() {
        let mut session = Session::new("current-user");
        let mut minor = user();
        minor.age = 16;

        assert!(session.sign_in(minor).is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_user() {
        let mut session = Session::new("current-user");
        session.sign_in(user()).unwrap();
        session.logout();
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_sign_in_as_other_user_rejected() {
        let mut session = Session::new("current-user");
        let mut other = user();
        other.id = "user-7".to_string();

        let err = session.sign_in(other).unwrap_err();

        assert!(matches!(err, SessionError::WrongUser { ref actual, .. } if actual == "user-7"));
        assert!(!session.is_authenticated());
    }
}
