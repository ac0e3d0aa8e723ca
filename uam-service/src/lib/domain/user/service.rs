use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenSettings;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Authenticator,
    token_settings: TokenSettings,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_settings` - Signing secret and lifetime for issued tokens
    pub fn new(repository: Arc<UR>, token_settings: TokenSettings) -> Self {
        Self {
            repository,
            authenticator: Authenticator::new(),
            token_settings,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                password_hash,
                role: Role::User,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let user = self.repository.find_by_email(&command.email).await?;

        let (stored_hash, subject, email) = match &user {
            Some(user) => (
                Some(user.password_hash.as_str()),
                user.id.to_string(),
                user.email.as_str(),
            ),
            None => (None, String::new(), command.email.as_str()),
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                stored_hash,
                &subject,
                email,
                &self.token_settings,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %subject, error = %err, "Stored password hash is unusable");
                    UserError::InvalidCredentials
                }
                AuthenticationError::TokenError(err) => UserError::Token(err),
            })?;

        let user = user.ok_or(UserError::InvalidCredentials)?;

        tracing::info!(user_id = %user.id, expires_at = %result.expires_at, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }
}
