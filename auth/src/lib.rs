//! Authentication utilities library
//!
//! Provides the authentication building blocks of the todo service:
//! - Password hashing (salted bcrypt)
//! - JWT encoding and decoding
//! - The token authority issuing and verifying access/refresh tokens
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access and Refresh Tokens
//! ```
//! use auth::{TokenAuthority, TokenSettings};
//!
//! let authority = TokenAuthority::new(b"secret_key_at_least_32_bytes_long!", TokenSettings::default());
//!
//! // Login: issue both tokens
//! let pair = authority.issue_token_pair("user123").unwrap();
//!
//! // Protected request: verify the access token
//! let user_id = authority.verify_access_token(Some(&pair.access.token)).unwrap();
//! assert_eq!(user_id, "user123");
//!
//! // Later: mint a new access token from the refresh token
//! let renewed = authority.renew_access_token(Some(&pair.refresh.token)).unwrap();
//! assert_eq!(renewed.claims.sub, "user123");
//! ```

pub mod authority;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authority::IssuedToken;
pub use authority::TokenAuthority;
pub use authority::TokenError;
pub use authority::TokenPair;
pub use authority::TokenSettings;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
