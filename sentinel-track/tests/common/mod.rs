use std::sync::Arc;

use auth::Authenticator;
use auth::FixedClock;
use auth::SigningConfig;
use chrono::Duration;
use chrono::Utc;
use sentinel_track::config::SeedUser;
use sentinel_track::domain::authentication::service::AuthService;
use sentinel_track::domain::user::service::UserService;
use sentinel_track::inbound::http::router::create_router;
use sentinel_track::outbound::repositories::InMemoryUserRepository;
use sentinel_track::seed::seed_users;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "sentinel-track";
pub const JWT_AUDIENCE: &str = "sentinel-track-clients";

pub const ADMIN: (&str, &str) = ("admin", "admin-pass");
pub const ALICE: (&str, &str) = ("alice", "operator-pass");
pub const BOB: (&str, &str) = ("bob", "correct-horse");

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<FixedClock>,
}

pub fn signing_config() -> SigningConfig {
    SigningConfig::new(JWT_SECRET, JWT_ISSUER, JWT_AUDIENCE)
        .expect("Invalid test signing config")
        .with_expiry(Duration::hours(1))
        .expect("Invalid test expiry")
}

fn seed(username: &str, password: &str, role: &str) -> SeedUser {
    SeedUser {
        username: username.to_string(),
        email: format!("{}@sentinel.example", username),
        password: password.to_string(),
        role: role.to_string(),
    }
}

impl TestApp {
    /// Spawn the application in a background task with seeded users and a
    /// controllable clock.
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(FixedClock::new(Utc::now()));
        let authenticator = Arc::new(Authenticator::with_clock(
            signing_config(),
            clock.clone(),
        ));

        let repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));
        let auth_service = Arc::new(AuthService::new(repository, authenticator));

        seed_users(
            user_service.as_ref(),
            &[
                seed(ADMIN.0, ADMIN.1, "admin"),
                seed(ALICE.0, ALICE.1, "operator"),
                seed(BOB.0, BOB.1, "viewer"),
            ],
        )
        .await
        .expect("Failed to seed users");

        let router = create_router(user_service, auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Request a token, returning the raw response.
    pub async fn request_token(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/token")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token, panicking on failure.
    pub async fn login(&self, (username, password): (&str, &str)) -> String {
        let response = self.request_token(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Token missing from response")
            .to_string()
    }
}
