use crate::models::User;
use std::collections::HashMap;

/// Profile pool keyed by id, remembering insertion order
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    order: Vec<String>,
    profiles: HashMap<String, User>,
}

impl ProfileDirectory {
    /// A later profile with an already-seen id replaces the earlier one but keeps its position.
    pub fn new(profiles: Vec<User>) -> Self {
        let mut directory = Self::default();
        for profile in profiles {
            directory.insert(profile);
        }
        directory
    }

    pub fn insert(&mut self, profile: User) {
        if !self.profiles.contains_key(&profile.id) {
            self.order.push(profile.id.clone());
        }
        self.profiles.insert(profile.id.clone(), profile);
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.profiles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Profiles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.order.iter().filter_map(|id| self.profiles.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
