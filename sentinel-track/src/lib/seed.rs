use crate::config::SeedUser;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;

/// Create configured accounts that do not exist yet.
///
/// Existing usernames are left untouched, so seeding on every start is safe.
///
/// # Returns
/// Number of users created
///
/// # Errors
/// * `UserError` - A seed entry is invalid or storage failed
pub async fn seed_users<S>(user_service: &S, seeds: &[SeedUser]) -> Result<usize, UserError>
where
    S: UserServicePort,
{
    let mut created = 0;

    for seed in seeds {
        let command = CreateUserCommand::new(
            Username::new(seed.username.clone())?,
            EmailAddress::new(seed.email.clone())?,
            seed.password.clone(),
            seed.role.parse::<Role>()?,
        );

        match user_service.create_user(command).await {
            Ok(_) => created += 1,
            Err(UserError::UsernameAlreadyExists(username)) => {
                tracing::debug!(username = %username, "Seed user already present");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(created, total = seeds.len(), "User seeding completed");

    Ok(created)
}
