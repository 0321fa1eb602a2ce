//! REST access to the client API

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::credentials::LcuCredentials;
use super::models::QueueInfo;
use crate::error::{Error, Result};
use crate::model::Phase;
use crate::presence::PhaseSource;

pub const CURRENT_SUMMONER: &str = "/lol-summoner/v1/current-summoner";
pub const CHAT_ME: &str = "/lol-chat/v1/me";
pub const TFT_COMPANIONS: &str = "/lol-cosmetics/v1/inventories/tft/companions";
pub const GAMEFLOW_PHASE: &str = "/lol-gameflow/v1/gameflow-phase";
pub const PLAYER_STATUS: &str = "/lol-gameflow/v1/gameflow-metadata/player-status";
pub const LOBBY: &str = "/lol-lobby/v2/lobby";
pub const RANKED_STATS: &str = "/lol-ranked/v1/current-ranked-stats";
pub const APPLICATION_START_TIME: &str = "/telemetry/v1/application-start-time";

fn queue_endpoint(queue_id: i64) -> String {
    format!("/lol-game-queues/v1/queues/{}", queue_id)
}

/// Authenticated client for one running instance of the game client
#[derive(Clone)]
pub struct LcuClient {
    http: reqwest::Client,
    credentials: LcuCredentials,
}

impl LcuClient {
    pub fn new(credentials: LcuCredentials) -> Result<Self> {
        // The client serves a self-signed certificate on localhost
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::fatal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, credentials })
    }

    pub fn credentials(&self) -> &LcuCredentials {
        &self.credentials
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.credentials.base_url(), endpoint);
        tracing::trace!("GET {}", endpoint);

        let response = self
            .http
            .get(&url)
            .basic_auth("riot", Some(&self.credentials.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transient(format!("{} returned {}", endpoint, status)));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn current_phase(&self) -> Result<Phase> {
        let raw: String = self.get_json(GAMEFLOW_PHASE).await?;
        Ok(Phase::parse(&raw))
    }

    pub async fn queue(&self, queue_id: i64) -> Result<QueueInfo> {
        self.get_json(&queue_endpoint(queue_id)).await
    }
}

/// The current client connection, replaced whenever the event bus reconnects
#[derive(Clone, Default)]
pub struct LcuHandle {
    inner: Arc<RwLock<Option<LcuClient>>>,
}

impl LcuHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, client: LcuClient) {
        *self.inner.write().await = Some(client);
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    pub async fn get(&self) -> Option<LcuClient> {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl PhaseSource for LcuHandle {
    async fn current_phase(&self) -> Option<Phase> {
        let client = self.get().await?;
        match client.current_phase().await {
            Ok(phase) => Some(phase),
            Err(e) => {
                tracing::debug!("Failed to poll gameflow phase: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_endpoint_embeds_id() {
        assert_eq!(queue_endpoint(420), "/lol-game-queues/v1/queues/420");
    }

    #[tokio::test]
    async fn empty_handle_reports_no_phase() {
        let handle = LcuHandle::new();
        assert!(handle.current_phase().await.is_none());

        let client = LcuClient::new(LcuCredentials {
            port: 1,
            token: "t".to_string(),
        })
        .unwrap();
        handle.set(client).await;
        assert_eq!(handle.get().await.unwrap().credentials().port, 1);
        handle.clear().await;
        assert!(handle.get().await.is_none());
    }
}
