// src/domain/user.rs
//
// User Entity and Caller Identity
//
// Users exist in the store so enrollments can reference them.
// Authentication (passwords, tokens) is handled outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{validate_display_name, DomainError, DomainResult};

/// A registered account that can subscribe to routines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,

    pub name: String,

    /// Unique, lower-cased
    pub email: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create an unsaved User
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            created_at: Utc::now(),
        }
    }
}

/// The authenticated identity a caller acts as.
///
/// Resolved by the caller's auth layer and passed explicitly into every
/// operation that needs to know who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user_id: i64,
}

impl CurrentUser {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

/// Validates User invariants
pub fn validate_user(user: &User) -> DomainResult<()> {
    validate_display_name("User", &user.name)?;

    let valid_email = match user.email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    };
    if !valid_email {
        return Err(DomainError::InvariantViolation(format!(
            "Invalid email address: {}",
            user.email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let user = User::new("Ana".to_string(), " Ana@Example.COM ".to_string());
        assert_eq!(user.email, "ana@example.com");
        assert!(validate_user(&user).is_ok());
    }

    #[test]
    fn test_email_requires_at_sign() {
        let user = User::new("Ana".to_string(), "ana.example.com".to_string());
        assert!(validate_user(&user).is_err());

        let user = User::new("Ana".to_string(), "@example.com".to_string());
        assert!(validate_user(&user).is_err());
    }
}
