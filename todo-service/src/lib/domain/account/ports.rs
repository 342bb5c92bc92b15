use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::RegistrationOutcome;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and password
    ///
    /// # Returns
    /// `Created` with the stored account, or `AlreadyExists` when the email
    /// is already registered
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Store rejected a duplicate username
    /// * `EmailAlreadyExists` - Store rejected a duplicate email
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<RegistrationOutcome, AccountError>;

    /// Check an email/password pair.
    ///
    /// # Returns
    /// The matching account
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn verify_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<Account, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
}
