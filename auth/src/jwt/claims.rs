use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Discriminates the two classes of bearer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims carried by access and refresh tokens.
///
/// Standard RFC 7519 fields plus a `token_type` discriminator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID, unique per issued token
    pub jti: String,

    /// Which class of token these claims belong to
    pub token_type: TokenType,
}

impl Claims {
    /// Create claims for a user, valid for `ttl` from `issued_at`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `token_type` - Access or refresh
    /// * `issued_at` - Issuance instant (from the authority's clock)
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat, exp, jti and token_type set
    pub fn for_user(
        user_id: impl ToString,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        }
    }

    /// Check if token is expired.
    ///
    /// A token stays valid up to and including its `exp` second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
