//! HTTP access to the live client data API

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::models::{ActivePlayer, AllGameData, PlayerScores};
use crate::constants::LIVE_CLIENT_BASE_URL;
use crate::error::{Error, Result};

const POLL_ATTEMPTS: u32 = 20;
const POLL_DELAY: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct LiveClient {
    http: reqwest::Client,
    base_url: String,
    attempts: u32,
    delay: Duration,
}

impl LiveClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(LIVE_CLIENT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        // The game serves a self-signed certificate on localhost
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::fatal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            attempts: POLL_ATTEMPTS,
            delay: POLL_DELAY,
        })
    }

    #[cfg(test)]
    fn with_polling(mut self, attempts: u32, delay: Duration) -> Self {
        self.attempts = attempts;
        self.delay = delay;
        self
    }

    /// Polls `path` until it answers 200.
    ///
    /// Non-200 answers are retried. Connection failures are retried only
    /// while the game is starting (`startup`); otherwise the game is assumed
    /// to have ended. Gives up after a fixed number of attempts.
    pub async fn wait_until_exists<T: DeserializeOwned>(
        &self,
        path: &str,
        startup: bool,
    ) -> Option<T> {
        let url = format!("{}{}", self.base_url, path);

        for attempt in 1..=self.attempts {
            match self.http.get(&url).send().await {
                Ok(response) if response.status() == StatusCode::OK => {
                    return match response.json::<T>().await {
                        Ok(value) => Some(value),
                        Err(e) => {
                            tracing::warn!("Unexpected response from {}: {}", path, e);
                            None
                        }
                    };
                }
                Ok(response) => {
                    tracing::debug!(
                        "{} answered {} (attempt {}/{})",
                        path,
                        response.status(),
                        attempt,
                        self.attempts
                    );
                }
                Err(e) if startup => {
                    tracing::debug!("Live game API not up yet ({}): {}", path, e);
                }
                Err(e) => {
                    tracing::debug!("Live game API gone ({}): {}", path, e);
                    return None;
                }
            }
            tokio::time::sleep(self.delay).await;
        }

        tracing::warn!("Did not find {} after {} attempts", path, self.attempts);
        None
    }

    pub async fn all_game_data(&self, startup: bool) -> Option<AllGameData> {
        self.wait_until_exists("/liveclientdata/allgamedata", startup)
            .await
    }

    pub async fn active_player(&self) -> Option<ActivePlayer> {
        self.wait_until_exists("/liveclientdata/activeplayer", false)
            .await
    }

    pub async fn player_scores(&self, riot_id: &str) -> Option<PlayerScores> {
        self.wait_until_exists(&scores_path(riot_id), false).await
    }
}

fn scores_path(riot_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(riot_id.as_bytes()).collect();
    format!("/liveclientdata/playerscores?riotId={}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riot_id_is_url_encoded() {
        assert_eq!(
            scores_path("Faker Fan#KR 1"),
            "/liveclientdata/playerscores?riotId=Faker+Fan%23KR+1"
        );
    }

    #[tokio::test]
    async fn unreachable_api_outside_startup_is_absent() {
        let client = LiveClient::with_base_url("https://127.0.0.1:1")
            .unwrap()
            .with_polling(3, Duration::from_millis(1));
        let data: Option<serde_json::Value> = client
            .wait_until_exists("/liveclientdata/allgamedata", false)
            .await;
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn unreachable_api_during_startup_gives_up_after_attempts() {
        let client = LiveClient::with_base_url("https://127.0.0.1:1")
            .unwrap()
            .with_polling(2, Duration::from_millis(1));
        assert!(client.all_game_data(true).await.is_none());
    }
}
