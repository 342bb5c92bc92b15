use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenType;

/// Lifetimes and policy applied by the token authority.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Reject a refresh token presented as an access token and vice versa.
    pub enforce_token_type: bool,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::seconds(60),
            refresh_token_ttl: Duration::days(7),
            enforce_token_type: true,
        }
    }
}

/// A signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Access and refresh token issued together at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Token issuance and verification errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenError {
    #[error("No token provided")]
    MissingToken,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Expected {expected} token, got {found} token")]
    WrongTokenType {
        expected: TokenType,
        found: TokenType,
    },

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),
}

/// Issues, signs and verifies access and refresh tokens.
///
/// Holds nothing but the signing secret, a clock and the token settings,
/// so it can be shared freely between requests.
pub struct TokenAuthority {
    jwt_handler: JwtHandler,
    clock: Arc<dyn Clock>,
    settings: TokenSettings,
}

impl TokenAuthority {
    /// Create a token authority backed by the system clock.
    ///
    /// # Arguments
    /// * `secret` - Shared HS256 signing secret
    /// * `settings` - Token lifetimes and type policy
    pub fn new(secret: &[u8], settings: TokenSettings) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            clock: Arc::new(SystemClock),
            settings,
        }
    }

    /// Replace the clock used for issuance and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Issue a short-lived access token for `user_id`.
    ///
    /// # Errors
    /// * `Jwt` - Token encoding failed
    pub fn issue_access_token(&self, user_id: &str) -> Result<IssuedToken, TokenError> {
        self.issue(user_id, TokenType::Access, self.settings.access_token_ttl)
    }

    /// Issue a long-lived refresh token for `user_id`.
    ///
    /// # Errors
    /// * `Jwt` - Token encoding failed
    pub fn issue_refresh_token(&self, user_id: &str) -> Result<IssuedToken, TokenError> {
        self.issue(user_id, TokenType::Refresh, self.settings.refresh_token_ttl)
    }

    /// Issue both tokens for a freshly authenticated user.
    pub fn issue_token_pair(&self, user_id: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue_access_token(user_id)?,
            refresh: self.issue_refresh_token(user_id)?,
        })
    }

    /// Mint a new access token from a refresh token.
    ///
    /// # Errors
    /// * `MissingToken` - No refresh token was presented
    /// * `InvalidToken` - Bad signature or malformed token
    /// * `TokenExpired` - Refresh token is past its expiry
    /// * `WrongTokenType` - An access token was presented (when enforced)
    pub fn renew_access_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = self.verify(refresh_token, TokenType::Refresh)?;
        self.issue_access_token(&claims.sub)
    }

    /// Verify a bearer access token and return the user id it is bound to.
    ///
    /// # Errors
    /// * `MissingToken` - No access token was presented
    /// * `InvalidToken` - Bad signature or malformed token
    /// * `TokenExpired` - Access token is past its expiry
    /// * `WrongTokenType` - A refresh token was presented (when enforced)
    pub fn verify_access_token(&self, access_token: Option<&str>) -> Result<String, TokenError> {
        self.verify(access_token, TokenType::Access)
            .map(|claims| claims.sub)
    }

    fn issue(
        &self,
        user_id: &str,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims::for_user(user_id, token_type, self.clock.now(), ttl);
        let token = self.jwt_handler.encode(&claims)?;

        tracing::debug!(
            token_type = %token_type,
            user_id = %claims.sub,
            exp = claims.exp,
            "Token issued"
        );

        Ok(IssuedToken { token, claims })
    }

    fn verify(&self, token: Option<&str>, expected: TokenType) -> Result<Claims, TokenError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::MissingToken)?;

        let claims: Claims = self
            .jwt_handler
            .decode(token)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        if self.settings.enforce_token_type && claims.token_type != expected {
            return Err(TokenError::WrongTokenType {
                expected,
                found: claims.token_type,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::clock::ManualClock;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn authority_with_clock(settings: TokenSettings) -> (TokenAuthority, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let authority = TokenAuthority::new(SECRET, settings).with_clock(clock.clone());
        (authority, clock)
    }

    #[test]
    fn test_access_token_round_trip() {
        let (authority, _clock) = authority_with_clock(TokenSettings::default());

        let issued = authority.issue_access_token("user123").unwrap();
        assert_eq!(issued.claims.token_type, TokenType::Access);
        assert_eq!(issued.claims.exp - issued.claims.iat, 60);

        let user_id = authority.verify_access_token(Some(&issued.token)).unwrap();
        assert_eq!(user_id, "user123");
    }

    #[test]
    fn test_access_token_expiry_boundary() {
        let (authority, clock) = authority_with_clock(TokenSettings::default());
        let issued = authority.issue_access_token("user123").unwrap();

        clock.set(start() + Duration::seconds(59));
        assert!(authority.verify_access_token(Some(&issued.token)).is_ok());

        clock.set(start() + Duration::seconds(61));
        assert!(matches!(
            authority.verify_access_token(Some(&issued.token)),
            Err(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_refresh_token_lifetime() {
        let (authority, clock) = authority_with_clock(TokenSettings::default());
        let refresh = authority.issue_refresh_token("user123").unwrap();
        assert_eq!(refresh.claims.exp - refresh.claims.iat, 7 * 24 * 60 * 60);

        clock.set(start() + Duration::days(7) - Duration::seconds(1));
        assert!(authority.renew_access_token(Some(&refresh.token)).is_ok());

        clock.set(start() + Duration::days(7) + Duration::seconds(1));
        assert!(matches!(
            authority.renew_access_token(Some(&refresh.token)),
            Err(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_renewed_token_is_independent() {
        let (authority, clock) = authority_with_clock(TokenSettings::default());
        let pair = authority.issue_token_pair("user123").unwrap();

        // Original access token has lapsed by now
        clock.advance(Duration::seconds(120));
        assert!(authority.verify_access_token(Some(&pair.access.token)).is_err());

        let renewed = authority.renew_access_token(Some(&pair.refresh.token)).unwrap();
        assert_ne!(renewed.token, pair.access.token);
        assert_eq!(renewed.claims.sub, "user123");
        assert_eq!(renewed.claims.iat, (start() + Duration::seconds(120)).timestamp());

        let user_id = authority.verify_access_token(Some(&renewed.token)).unwrap();
        assert_eq!(user_id, "user123");
    }

    #[test]
    fn test_missing_token() {
        let (authority, _clock) = authority_with_clock(TokenSettings::default());

        assert!(matches!(
            authority.verify_access_token(None),
            Err(TokenError::MissingToken)
        ));
        assert!(matches!(
            authority.verify_access_token(Some("  ")),
            Err(TokenError::MissingToken)
        ));
        assert!(matches!(
            authority.renew_access_token(None),
            Err(TokenError::MissingToken)
        ));
    }

    #[test]
    fn test_malformed_token() {
        let (authority, _clock) = authority_with_clock(TokenSettings::default());

        assert!(matches!(
            authority.verify_access_token(Some("invalid.token.here")),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(matches!(
            authority.renew_access_token(Some("not-a-jwt")),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let (authority, _clock) = authority_with_clock(TokenSettings::default());
        let other = TokenAuthority::new(b"another_secret_at_least_32_bytes!!", TokenSettings::default())
            .with_clock(Arc::new(ManualClock::new(start())));

        let foreign = other.issue_access_token("user123").unwrap();
        assert!(matches!(
            authority.verify_access_token(Some(&foreign.token)),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_cross_use_rejected_when_enforced() {
        let (authority, _clock) = authority_with_clock(TokenSettings::default());
        let pair = authority.issue_token_pair("user123").unwrap();

        assert!(matches!(
            authority.verify_access_token(Some(&pair.refresh.token)),
            Err(TokenError::WrongTokenType {
                expected: TokenType::Access,
                found: TokenType::Refresh,
            })
        ));
        assert!(matches!(
            authority.renew_access_token(Some(&pair.access.token)),
            Err(TokenError::WrongTokenType {
                expected: TokenType::Refresh,
                found: TokenType::Access,
            })
        ));
    }

    #[test]
    fn test_cross_use_allowed_when_not_enforced() {
        let settings = TokenSettings {
            enforce_token_type: false,
            ..TokenSettings::default()
        };
        let (authority, _clock) = authority_with_clock(settings);
        let pair = authority.issue_token_pair("user123").unwrap();

        assert_eq!(
            authority.verify_access_token(Some(&pair.refresh.token)).unwrap(),
            "user123"
        );
        assert!(authority.renew_access_token(Some(&pair.access.token)).is_ok());
    }
}
