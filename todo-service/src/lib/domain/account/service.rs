use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::RegistrationOutcome;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Owns password hash derivation and credential checks; the repository
/// only ever sees hashes.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: PasswordHasher,
    /// Checked on unknown emails so both login failures cost one bcrypt run.
    dummy_hash: Option<String>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - Hasher configured with the desired cost factor
    pub fn new(repository: Arc<AR>, password_hasher: PasswordHasher) -> Self {
        let dummy_hash = password_hasher
            .hash("dummy-password-never-matches")
            .map_err(|e| tracing::warn!(error = %e, "Failed to derive dummy password hash"))
            .ok();

        Self {
            repository,
            password_hasher,
            dummy_hash,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<RegistrationOutcome, AccountError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            tracing::info!(email = %command.email, "Signup for already registered email");
            return Ok(RegistrationOutcome::AlreadyExists);
        }

        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, username = %created.username, "Account created");

        Ok(RegistrationOutcome::Created(created))
    }

    async fn verify_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<Account, AccountError> {
        let Some(account) = self.repository.find_by_email(email).await? else {
            tracing::debug!(email = %email, "Login for unknown email");
            if let Some(dummy_hash) = &self.dummy_hash {
                let _ = self.password_hasher.verify(password, dummy_hash);
            }
            return Err(AccountError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, &account.password_hash)? {
            tracing::debug!(account_id = %account.id, "Login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }
}
