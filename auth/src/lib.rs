//! Authentication utilities library
//!
//! Provides the authentication core used by the SentinelTrack API:
//! - Signing configuration, validated once at startup
//! - HS256 token issuance and validation against an injectable clock
//! - Password hashing (Argon2id)
//! - Authentication coordination
//!
//! The service defines its own credential lookup and maps these results onto
//! its HTTP responses; nothing here touches storage or routing.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, IdentityClaims, SigningConfig};
//!
//! let config = SigningConfig::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     "sentinel-track",
//!     "sentinel-track-clients",
//! )
//! .unwrap();
//! let auth = Authenticator::new(config);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let identity = IdentityClaims::new("user123", "alice", Some("operator"));
//! let issued = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&issued.access_token).unwrap();
//! assert_eq!(decoded, identity);
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::ConfigurationError;
pub use jwt::IdentityClaims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::SigningConfig;
pub use jwt::TokenClaims;
pub use jwt::TokenSigner;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
