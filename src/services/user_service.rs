// src/services/user_service.rs
//
// Users exist so enrollments have someone to point at.
// Credentials and sessions are not handled here.

use std::sync::Arc;

use log::info;

use crate::domain::{validate_user, User};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserRegistered};
use crate::repositories::UserRepository;

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    event_bus: Arc<EventBus>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            user_repo,
            event_bus,
        }
    }

    /// Register a user; emails are unique (case-insensitive).
    pub fn register_user(&self, request: RegisterUserRequest) -> AppResult<User> {
        let mut user = User::new(request.name, request.email);

        validate_user(&user)?;

        if self.user_repo.find_by_email(&user.email)?.is_some() {
            return Err(email_taken(&user.email));
        }

        user.id = self.user_repo.insert(&user).map_err(|e| {
            if e.is_unique_violation() {
                email_taken(&user.email)
            } else {
                e
            }
        })?;

        info!("Registered user {}", user.id);
        self.event_bus.emit(UserRegistered::new(user.id));

        Ok(user)
    }

    pub fn get_user(&self, user_id: i64) -> AppResult<User> {
        self.user_repo
            .get_by_id(user_id)?
            .ok_or_else(|| AppError::not_found(format!("User {}", user_id)))
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.list_all()
    }
}

fn email_taken(email: &str) -> AppError {
    AppError::conflict(format!("Email already registered: {}", email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    #[test]
    fn test_register_normalizes_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "ana@example.com")
            .returning(|_| Ok(None));
        users.expect_insert().returning(|_| Ok(1));

        let service = UserService::new(Arc::new(users), Arc::new(EventBus::new()));
        let user = service
            .register_user(RegisterUserRequest {
                name: "Ana".to_string(),
                email: "ANA@example.com".to_string(),
            })
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "ana@example.com");
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(User::new("Ana".to_string(), email.to_string()))));
        users.expect_insert().never();

        let service = UserService::new(Arc::new(users), Arc::new(EventBus::new()));
        let err = service
            .register_user(RegisterUserRequest {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_invalid_email_is_validation_error() {
        let service = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(EventBus::new()),
        );

        let err = service
            .register_user(RegisterUserRequest {
                name: "Ana".to_string(),
                email: "not-an-email".to_string(),
            })
            .unwrap_err();

        assert!(err.is_validation());
    }
}
