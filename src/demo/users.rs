// In-memory user registry
//
// The store is an ordinary value owned by the caller; there is no global
// registry, so each test gets its own.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Email already exists: {0}")]
    EmailExists(String),

    #[error("User not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields to change on an existing user; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Users in insertion order
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<User, UserError> {
        let email = email.into();
        self.check_email(&email, None)?;

        let user = User {
            id: format!("user_{}", Uuid::new_v4().simple()),
            name: name.into(),
            email,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn update(&mut self, id: &str, update: UserUpdate) -> Result<User, UserError> {
        if let Some(email) = &update.email {
            self.check_email(email, Some(id))?;
        }

        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }

        Ok(user.clone())
    }

    /// Remove a user; false when the id was unknown
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Case-insensitive substring match on name or email
    pub fn search(&self, query: &str) -> Vec<&User> {
        let query = query.to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&query) || u.email.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn check_email(&self, email: &str, owner: Option<&str>) -> Result<(), UserError> {
        if !is_valid_email(email) {
            return Err(UserError::InvalidEmail(email.to_string()));
        }
        let taken = self
            .users
            .iter()
            .any(|u| u.email == email && Some(u.id.as_str()) != owner);
        if taken {
            return Err(UserError::EmailExists(email.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("john@example.com"));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email("john doe@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_create_and_get() {
        let mut store = UserStore::new();
        let user = store.create("John Doe", "john@example.com").unwrap();

        assert!(user.id.starts_with("user_"));
        assert_eq!(store.get(&user.id), Some(&user));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_email() {
        let mut store = UserStore::new();
        let err = store.create("John", "not-an-email").unwrap_err();
        assert_eq!(err, UserError::InvalidEmail("not-an-email".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_email() {
        let mut store = UserStore::new();
        store.create("John", "john@example.com").unwrap();
        let err = store.create("Johnny", "john@example.com").unwrap_err();
        assert!(matches!(err, UserError::EmailExists(_)));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = UserStore::new();
        let a = store.create("A", "a@example.com").unwrap();
        let b = store.create("B", "b@example.com").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update() {
        let mut store = UserStore::new();
        let user = store.create("John", "john@example.com").unwrap();

        let updated = store
            .update(
                &user.id,
                UserUpdate {
                    name: Some("Jane".to_string()),
                    ..UserUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Jane");
        assert_eq!(updated.email, "john@example.com");
        assert_eq!(store.get(&user.id).unwrap().name, "Jane");
    }

    #[test]
    fn test_update_keeps_own_email() {
        let mut store = UserStore::new();
        let user = store.create("John", "john@example.com").unwrap();
        let update = UserUpdate {
            email: Some("john@example.com".to_string()),
            ..UserUpdate::default()
        };
        assert!(store.update(&user.id, update).is_ok());
    }

    #[test]
    fn test_update_errors() {
        let mut store = UserStore::new();
        let john = store.create("John", "john@example.com").unwrap();
        store.create("Jane", "jane@example.com").unwrap();

        let taken = UserUpdate {
            email: Some("jane@example.com".to_string()),
            ..UserUpdate::default()
        };
        assert!(matches!(store.update(&john.id, taken), Err(UserError::EmailExists(_))));

        let invalid = UserUpdate {
            email: Some("bad".to_string()),
            ..UserUpdate::default()
        };
        assert!(matches!(store.update(&john.id, invalid), Err(UserError::InvalidEmail(_))));

        assert_eq!(
            store.update("user_missing", UserUpdate::default()),
            Err(UserError::NotFound("user_missing".to_string()))
        );
    }

    #[test]
    fn test_delete() {
        let mut store = UserStore::new();
        let user = store.create("John", "john@example.com").unwrap();

        assert!(store.delete(&user.id));
        assert!(!store.delete(&user.id));
        assert!(store.get(&user.id).is_none());
    }

    #[test]
    fn test_list_and_search() {
        let mut store = UserStore::new();
        store.create("John Doe", "john@example.com").unwrap();
        store.create("Jane Roe", "jane@work.org").unwrap();

        assert_eq!(store.list().len(), 2);
        assert_eq!(store.list()[0].name, "John Doe");

        let by_name = store.search("JOHN");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].email, "john@example.com");

        let by_email = store.search("work.org");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Jane Roe");

        assert_eq!(store.search("roe").len(), 1);
        assert!(store.search("nobody").is_empty());
    }
}
