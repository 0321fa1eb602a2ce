//! Discord Rich Presence integration using discord-sdk

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use discord_sdk::{
    activity::{ActivityBuilder, Assets},
    wheel::{UserState, Wheel},
    Discord, Subscriptions,
};
use tokio::sync::Mutex;

use crate::error::{ConnectError, Error, PushError, Result};
use crate::model::PresenceView;
use crate::presence::PresenceProvider;

/// Timeout for waiting for Discord handshake
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

const STARTUP_ATTEMPTS: u32 = 5;
const STARTUP_RETRY_DELAY: Duration = Duration::from_secs(3);

pub const RECONNECT_ATTEMPTS: u32 = 12;
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// A live IPC connection. The wheel must outlive the client so events keep flowing.
struct Session {
    discord: Discord,
    _wheel: Wheel,
}

pub fn parse_client_id(raw: &str) -> std::result::Result<i64, ConnectError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ConnectError::InvalidClientId(raw.to_string()))
}

/// Opens the IPC socket and waits for Discord to report the logged in user
async fn open_session(app_id: i64) -> std::result::Result<Session, ConnectError> {
    let (wheel, handler) = Wheel::new(Box::new(|err| {
        tracing::warn!("Discord error: {:?}", err);
    }));

    let mut user_spoke = wheel.user();

    let discord = Discord::new(app_id, Subscriptions::ACTIVITY, Box::new(handler))
        .map_err(|e| ConnectError::NotFound(e.to_string()))?;

    tracing::info!("Discord connecting...");

    let handshake = tokio::time::timeout(HANDSHAKE_TIMEOUT, async {
        if user_spoke.0.changed().await.is_err() {
            return Err(ConnectError::PipeClosed);
        }
        match &*user_spoke.0.borrow() {
            UserState::Connected(user) => Ok(user.clone()),
            UserState::Disconnected(err) => {
                tracing::debug!("Discord disconnected during handshake: {:?}", err);
                Err(ConnectError::PipeClosed)
            }
        }
    })
    .await;

    let user = match handshake {
        Ok(Ok(user)) => user,
        Ok(Err(e)) => {
            discord.disconnect().await;
            return Err(e);
        }
        Err(_) => {
            discord.disconnect().await;
            return Err(ConnectError::Ipc("handshake timed out".to_string()));
        }
    };

    tracing::info!(
        "Discord Rich Presence connected as {}#{}",
        user.username,
        user.discriminator.unwrap_or(0)
    );

    Ok(Session {
        discord,
        _wheel: wheel,
    })
}

fn timestamp(epoch_secs: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(u64::try_from(epoch_secs).unwrap_or(0))
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Discord rejects empty strings, so blank fields are left unset
fn build_activity(view: &PresenceView) -> ActivityBuilder {
    let mut assets = Assets::default();
    if let Some(image) = non_empty(&view.large_image) {
        assets = assets.large(image, non_empty(&view.large_text));
    }
    if let Some(image) = non_empty(&view.small_image) {
        assets = assets.small(image, non_empty(&view.small_text));
    }

    let mut activity = ActivityBuilder::new().assets(assets);
    if let Some(details) = non_empty(&view.details) {
        activity = activity.details(details);
    }
    if let Some(state) = non_empty(&view.state) {
        activity = activity.state(state);
    }
    if view.start > 0 {
        activity = activity.start_timestamp(timestamp(view.start));
    }
    activity
}

/// Discord presence provider implementing the generic PresenceProvider trait
pub struct DiscordPresence {
    app_id: i64,
    session: Mutex<Option<Session>>,
    connected: AtomicBool,
}

impl DiscordPresence {
    /// Connects to Discord, retrying while Discord is still starting up
    pub async fn connect(client_id: &str) -> std::result::Result<Self, ConnectError> {
        let app_id = parse_client_id(client_id)?;

        let mut attempt = 1;
        let session = loop {
            match open_session(app_id).await {
                Ok(session) => break session,
                Err(e) if e.is_retryable() && attempt < STARTUP_ATTEMPTS => {
                    tracing::warn!(
                        "Discord connection failed ({}), retrying in {}s ({}/{})",
                        e,
                        STARTUP_RETRY_DELAY.as_secs(),
                        attempt,
                        STARTUP_ATTEMPTS
                    );
                    attempt += 1;
                    tokio::time::sleep(STARTUP_RETRY_DELAY).await;
                }
                Err(e) => return Err(e),
            }
        };

        Ok(Self {
            app_id,
            session: Mutex::new(Some(session)),
            connected: AtomicBool::new(true),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn mark_lost(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            tracing::warn!("Lost connection to Discord");
        }
    }

    /// Replaces the session with a fresh one. Giving up is fatal.
    pub async fn reconnect(&self, attempts: u32, delay: Duration) -> Result<()> {
        let mut session = self.session.lock().await;
        if let Some(old) = session.take() {
            old.discord.disconnect().await;
        }

        for attempt in 1..=attempts {
            match open_session(self.app_id).await {
                Ok(fresh) => {
                    *session = Some(fresh);
                    self.connected.store(true, Ordering::Release);
                    tracing::info!("Reconnected to Discord");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Discord reconnect attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        e
                    );
                    if attempt < attempts {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(Error::fatal_with_guidance(
            format!("Could not reconnect to Discord after {} attempts", attempts),
            ConnectError::PipeClosed.guidance(),
        ))
    }

    pub async fn disconnect(&self) {
        if let Some(old) = self.session.lock().await.take() {
            old.discord.disconnect().await;
            tracing::info!("Discord Rich Presence disconnected");
        }
        self.connected.store(false, Ordering::Release);
    }
}

#[async_trait]
impl PresenceProvider for DiscordPresence {
    fn name(&self) -> &'static str {
        "Discord"
    }

    async fn update_presence(&self, view: &PresenceView) -> std::result::Result<(), PushError> {
        let session = self.session.lock().await;
        let Some(session) = session.as_ref() else {
            return Err(PushError::Disconnected);
        };

        match session.discord.update_activity(build_activity(view)).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.mark_lost();
                Err(PushError::Rejected(e.to_string()))
            }
        }
    }

    async fn clear_presence(&self) -> std::result::Result<(), PushError> {
        let session = self.session.lock().await;
        let Some(session) = session.as_ref() else {
            return Err(PushError::Disconnected);
        };

        session.discord.clear_activity().await.map(|_| ()).map_err(|e| {
            self.mark_lost();
            PushError::Rejected(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_must_be_numeric() {
        assert_eq!(parse_client_id("1194034071588851783"), Ok(1194034071588851783));
        assert_eq!(
            parse_client_id("league"),
            Err(ConnectError::InvalidClientId("league".to_string()))
        );
    }

    #[test]
    fn timestamps_are_epoch_seconds() {
        assert_eq!(
            timestamp(1_700_000_000)
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_secs(),
            1_700_000_000
        );
        assert_eq!(timestamp(-5), UNIX_EPOCH);
    }

    #[test]
    fn blank_fields_are_skipped() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("In Queue"), Some("In Queue"));
    }
}
