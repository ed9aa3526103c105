use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::AuthenticatedSession;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::AccountServicePort;
use crate::account::ports::UserRepository;

/// Domain service implementation for account operations.
///
/// Stateless per request: credentials are established at register/login and
/// every later request proves identity with the bearer token alone.
pub struct AccountService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User directory implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `token_ttl` - Validity window for issued tokens
    pub fn new(repository: Arc<R>, authenticator: Arc<Authenticator>, token_ttl: Duration) -> Self {
        Self {
            repository,
            authenticator,
            token_ttl,
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError> {
        if let Some(existing) = self.repository.find_by_email(&command.email).await? {
            return Err(AccountError::EmailAlreadyExists(
                existing.email.to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            user_type: command.user_type,
            role: command.role,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthenticatedSession, AccountError> {
        // Unknown email must be indistinguishable from a wrong password.
        let Some(user) = self.repository.find_by_email(email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        let claims = Claims::for_subject(user.id, self.token_ttl);

        match self
            .authenticator
            .authenticate(password, &user.password_hash, &claims)
        {
            Ok(result) => Ok(AuthenticatedSession {
                token: result.access_token,
                user,
            }),
            Err(AuthenticationError::InvalidCredentials) => Err(AccountError::InvalidCredentials),
            Err(e) => Err(AccountError::Unknown(format!(
                "Authentication failed: {}",
                e
            ))),
        }
    }

    async fn current_user(&self, id: &UserId) -> Result<User, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}
