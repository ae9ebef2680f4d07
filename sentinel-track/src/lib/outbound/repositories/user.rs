use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Process-local user store keyed by username.
///
/// Lookups by username, the login path, are a single map access under a
/// shared read lock. Contents are lost when the process exits.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.username.as_str()) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        if users
            .values()
            .any(|existing| existing.email.as_str().eq_ignore_ascii_case(user.email.as_str()))
        {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        users.insert(user.username.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| &user.id == id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.get(username.as_str()).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Role;

    fn user(name: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role: Role::Viewer,
            enabled: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();
        let alice = user("alice", "alice@sentinel.example");
        let alice_id = alice.id;

        repository.create(alice).await.unwrap();

        let by_name = repository
            .find_by_username(&Username::new("alice".to_string()).unwrap())
            .await
            .unwrap()
            .expect("alice should exist");
        assert_eq!(by_name.id, alice_id);

        let by_id = repository.find_by_id(&alice_id).await.unwrap();
        assert_eq!(by_id.map(|u| u.username), Some(by_name.username));
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let repository = InMemoryUserRepository::new();

        let by_name = repository
            .find_by_username(&Username::new("ghost".to_string()).unwrap())
            .await
            .unwrap();
        assert!(by_name.is_none());
        assert!(repository.find_by_id(&UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive_keys() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("alice", "alice@sentinel.example"))
            .await
            .unwrap();

        let other_case = repository
            .find_by_username(&Username::new("Alice".to_string()).unwrap())
            .await
            .unwrap();
        assert!(other_case.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("alice", "alice@sentinel.example"))
            .await
            .unwrap();

        let result = repository
            .create(user("alice", "other@sentinel.example"))
            .await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("alice", "alice@sentinel.example"))
            .await
            .unwrap();

        let result = repository
            .create(user("alice2", "ALICE@sentinel.example"))
            .await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }
}
