use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity facts asserted by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub user_id: String,
    pub username: String,
    pub role: Option<String>,
}

impl IdentityClaims {
    /// Create identity claims for a user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier (written to `sub`)
    /// * `username` - Login name
    /// * `role` - Optional role used for authorization decisions
    pub fn new(
        user_id: impl ToString,
        username: impl Into<String>,
        role: Option<impl Into<String>>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.into(),
            role: role.map(Into::into),
        }
    }
}

/// Wire form of the claim set carried inside a signed token.
///
/// Standard RFC 7519 claims plus `username` and `role`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub sub: String,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl TokenClaims {
    /// Build the full claim set for an identity.
    pub fn new(
        identity: &IdentityClaims,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            sub: identity.user_id.clone(),
            username: identity.username.clone(),
            role: identity.role.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Check whether `timestamp` lies within `[iat - leeway, exp + leeway]`.
    pub fn is_live_at(&self, timestamp: i64, leeway_seconds: i64) -> bool {
        timestamp >= self.iat.saturating_sub(leeway_seconds)
            && timestamp <= self.exp.saturating_add(leeway_seconds)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, timestamp: i64, leeway_seconds: i64) -> bool {
        timestamp > self.exp.saturating_add(leeway_seconds)
    }

    pub fn identity(&self) -> IdentityClaims {
        IdentityClaims {
            user_id: self.sub.clone(),
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}

impl From<TokenClaims> for IdentityClaims {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn sample_claims() -> TokenClaims {
        let identity = IdentityClaims::new("user123", "alice", Some("operator"));
        let issued_at = DateTime::from_timestamp(1_000, 0).unwrap();
        TokenClaims::new(
            &identity,
            issued_at,
            issued_at + Duration::seconds(100),
            "sentinel-track",
            "sentinel-track-clients",
        )
    }

    #[test]
    fn test_new_copies_identity_and_metadata() {
        let claims = sample_claims();

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role.as_deref(), Some("operator"));
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 1_100);
        assert_eq!(claims.iss, "sentinel-track");
        assert_eq!(claims.aud, "sentinel-track-clients");
    }

    #[test]
    fn test_is_live_at_boundaries() {
        let claims = sample_claims();

        assert!(!claims.is_live_at(999, 0)); // Before issuance
        assert!(claims.is_live_at(1_000, 0)); // Exactly at issuance
        assert!(claims.is_live_at(1_100, 0)); // Exactly at expiration
        assert!(!claims.is_live_at(1_101, 0)); // Expired
        assert!(claims.is_live_at(1_105, 5)); // Within leeway
    }

    #[test]
    fn test_is_expired() {
        let claims = sample_claims();

        assert!(!claims.is_expired(1_100, 0));
        assert!(claims.is_expired(1_101, 0));
        assert!(!claims.is_expired(1_101, 1));
    }

    #[test]
    fn test_role_omitted_when_absent() {
        let identity = IdentityClaims::new("user123", "alice", None::<String>);
        let now = Utc::now();
        let claims = TokenClaims::new(&identity, now, now, "iss", "aud");

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("role").is_none());
        assert_eq!(json["sub"], "user123");
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_identity_round_trip() {
        let claims = sample_claims();
        let identity: IdentityClaims = claims.clone().into();

        assert_eq!(identity, claims.identity());
        assert_eq!(identity.user_id, "user123");
        assert_eq!(identity.role.as_deref(), Some("operator"));
    }
}
