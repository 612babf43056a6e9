//! Live adapter for the `AuthClient` port using the Roble auth API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::RobleConfig;
use crate::ports::auth::{AuthClient, AuthFuture, Session};

/// Live auth client that calls the Roble auth endpoints.
pub struct RobleAuthClient {
    client: Client,
    base_url: String,
    contract: String,
}

impl RobleAuthClient {
    /// Creates an auth client for the given backend configuration.
    #[must_use]
    pub fn new(config: &RobleConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            contract: config.contract.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/auth/{}/{action}", self.base_url, self.contract)
    }
}

/// Request body for the login endpoint.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response from the login endpoint.
#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
    user: UserInfo,
}

/// User block inside the login response.
#[derive(Deserialize)]
struct UserInfo {
    email: String,
    name: Option<String>,
}

/// Request body for the direct-signup endpoint.
#[derive(Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

/// Error response from the auth endpoints.
#[derive(Deserialize)]
struct AuthError {
    message: serde_json::Value,
}

async fn fail_on_status(
    response: reqwest::Response,
    action: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let status = response.status();
    let body = response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
        format!("Failed to read Roble {action} response: {e}").into()
    })?;
    if !status.is_success() {
        let msg = serde_json::from_str::<AuthError>(&body)
            .map(|e| match e.message {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or(body);
        return Err(format!("Roble {action} error ({}): {msg}", status.as_u16()).into());
    }
    Ok(body)
}

impl AuthClient for RobleAuthClient {
    fn login(&self, email: &str, password: &str) -> AuthFuture<'_, Session> {
        let email = email.to_string();
        let password = password.to_string();
        Box::pin(async move {
            let body = LoginRequest { email: &email, password: &password };
            let response = self
                .client
                .post(self.endpoint("login"))
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Roble login request failed: {e}").into()
                })?;
            let text = fail_on_status(response, "login").await?;
            let parsed: LoginResponse = serde_json::from_str(&text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse Roble login response: {e}").into()
                },
            )?;
            Ok(Session {
                access_token: parsed.access_token,
                refresh_token: parsed.refresh_token,
                user_email: parsed.user.email,
                user_name: parsed.user.name,
            })
        })
    }

    fn register(&self, name: &str, email: &str, password: &str) -> AuthFuture<'_, ()> {
        let name = name.to_string();
        let email = email.to_string();
        let password = password.to_string();
        Box::pin(async move {
            let body = SignupRequest { email: &email, password: &password, name: &name };
            let response = self
                .client
                .post(self.endpoint("signup-direct"))
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Roble signup request failed: {e}").into()
                })?;
            fail_on_status(response, "signup").await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_contract_and_action() {
        let config = RobleConfig {
            base_url: "https://roble.example.com".into(),
            contract: "campus_abc1".into(),
            access_token: None,
        };
        let auth = RobleAuthClient::new(&config);
        assert_eq!(auth.endpoint("login"), "https://roble.example.com/auth/campus_abc1/login");
    }

    #[test]
    fn login_response_parses_tokens_and_user() {
        let text = r#"{
            "accessToken": "at",
            "refreshToken": "rt",
            "user": { "email": "ana@campus.edu", "name": "Ana" }
        }"#;
        let parsed: LoginResponse = serde_json::from_str(text).unwrap();
        assert_eq!(parsed.access_token, "at");
        assert_eq!(parsed.user.email, "ana@campus.edu");
        assert_eq!(parsed.user.name.as_deref(), Some("Ana"));
    }
}
