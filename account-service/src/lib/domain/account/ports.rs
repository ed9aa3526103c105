use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::AuthenticatedSession;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;

/// Port for account service operations consumed by the HTTP layer.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new user with validated fields.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - User directory operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    ///   (deliberately indistinguishable)
    /// * `DatabaseError` - User directory operation failed
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthenticatedSession, AccountError>;

    /// Retrieve the user a verified token's subject refers to.
    ///
    /// Token verification happens in the route gate; this only resolves the
    /// subject against the user directory.
    ///
    /// # Errors
    /// * `NotFound` - Subject no longer exists
    /// * `DatabaseError` - User directory operation failed
    async fn current_user(&self, id: &UserId) -> Result<User, AccountError>;
}

/// Persistence contract of the user directory.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve a user by normalized email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AccountError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;
}
