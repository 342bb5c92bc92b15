use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Salted bcrypt. The salt is generated per hash and embedded in the
/// resulting string together with the cost factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Cost factor used unless configured otherwise.
    pub const DEFAULT_COST: u32 = 10;

    /// Lowest cost bcrypt accepts.
    pub const MIN_COST: u32 = 4;

    /// Highest cost bcrypt accepts.
    pub const MAX_COST: u32 = 31;

    /// Create a new password hasher with the default cost factor.
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost outside the range bcrypt accepts (4..=31)
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt+hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid password hash: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
