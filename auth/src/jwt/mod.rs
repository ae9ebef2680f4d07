pub mod claims;
pub mod config;
pub mod errors;
pub mod signer;
pub mod validator;

pub use claims::IdentityClaims;
pub use claims::TokenClaims;
pub use config::SigningConfig;
pub use errors::ConfigurationError;
pub use errors::JwtError;
pub use signer::IssuedToken;
pub use signer::TokenSigner;
pub use validator::TokenValidator;
