//! Access-token verification against the auth provider

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::auth::Session;
use crate::config::RemoteSettings;
use crate::{Result, StokemeetError};

pub struct AuthClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn from_settings(settings: &RemoteSettings) -> Result<Self> {
        if !settings.is_configured() {
            return Err(StokemeetError::Config(
                "Remote store is not configured. Set remote.url and remote.anon_key or STOKEMEET_SUPABASE_URL / STOKEMEET_SUPABASE_ANON_KEY.".to_string(),
            ));
        }

        Ok(Self {
            http: Client::builder().timeout(Duration::from_secs(15)).build()?,
            base_url: settings.url.trim().trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.trim().to_string(),
        })
    }

    /// Resolve an access token to the user it belongs to.
    pub async fn verify(&self, access_token: &str) -> Result<Session> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(StokemeetError::Auth(
                    "Access token was rejected".to_string(),
                ));
            }
            status if !status.is_success() => {
                return Err(StokemeetError::Auth(format!(
                    "Auth provider returned {}",
                    status
                )));
            }
            _ => {}
        }

        let user: AuthUser = response.json().await?;
        Ok(Session {
            user_id: user.id,
            email: user.email,
            access_token: access_token.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}
