use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
            enabled: true,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            role = %created_user.role,
            "User created"
        );

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        let mut users = self.repository.list_all().await?;
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Role;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
        }
    }

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(name.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@sentinel.example", name)).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role: Role::Operator,
            enabled: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.password_hash.starts_with("$argon2id$")
                    && user.password_hash != "pass_word!"
                    && user.enabled
                    && user.role == Role::Admin
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand::new(
            Username::new("admin".to_string()).unwrap(),
            EmailAddress::new("admin@sentinel.example".to_string()).unwrap(),
            "pass_word!".to_string(),
            Role::Admin,
        );

        let created = service.create_user(command).await.unwrap();
        assert_eq!(created.username.as_str(), "admin");
        assert!(auth::PasswordHasher::new()
            .verify("pass_word!", &created.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::UsernameAlreadyExists(user.username.to_string())));

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@sentinel.example".to_string()).unwrap(),
            "pass_word!".to_string(),
            Role::Operator,
        );

        let result = service.create_user(command).await;
        assert!(matches!(
            result,
            Err(UserError::UsernameAlreadyExists(name)) if name == "alice"
        ));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let expected_user = user("alice");
        let user_id = expected_user.id;
        repository
            .expect_find_by_id()
            .withf(move |id| id == &user_id)
            .times(1)
            .returning(move |_| Ok(Some(expected_user.clone())));

        let service = UserService::new(Arc::new(repository));

        let found = service.get_user(&user_id).await.unwrap();
        assert_eq!(found.id, user_id);
        assert_eq!(found.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_ordered_by_creation() {
        let mut repository = MockTestUserRepository::new();

        let mut older = user("older");
        older.created_at = Utc::now() - Duration::hours(1);
        let newer = user("newer");

        let returned = vec![newer, older];
        repository
            .expect_list_all()
            .times(1)
            .returning(move || Ok(returned.clone()));

        let service = UserService::new(Arc::new(repository));

        let users = service.list_users().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["older", "newer"]);
    }
}
