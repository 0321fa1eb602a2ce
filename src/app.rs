//! Top-level wiring: process waits, Discord connection, background tasks
//! and the supervision loop

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::discord::{DiscordPresence, RECONNECT_ATTEMPTS, RECONNECT_DELAY};
use crate::error::Result;
use crate::launcher;
use crate::lcu::{run_event_loop, LcuHandle};
use crate::live::LiveGame;
use crate::model::{SharedSnapshot, Snapshot};
use crate::presence::{unix_now, PresenceManager, UpdateScheduler, DEBOUNCE_WINDOW};
use crate::process::{self, ClientState, CLIENT_PROCESS_NAMES, RIOT_CLIENT_PROCESS_NAMES};
use crate::settings::AppSettings;

/// How often the supervision loop looks at the process table
const SUPERVISE_INTERVAL: Duration = Duration::from_secs(10);

/// Why the supervision loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    ClientClosed,
    Interrupted,
}

/// What the supervision loop should do after one look at the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Reconnect,
    Stop(Shutdown),
}

pub fn next_tick(state: ClientState, discord_connected: bool) -> Tick {
    match (state, discord_connected) {
        (ClientState::NotRunning, _) => Tick::Stop(Shutdown::ClientClosed),
        (_, false) => Tick::Reconnect,
        _ => Tick::Continue,
    }
}

async fn wait_for_processes(settings: &AppSettings) -> Result<()> {
    if let Some(path) = &settings.launch_league {
        if process::client_state().await? == ClientState::NotRunning
            && !process::is_running(RIOT_CLIENT_PROCESS_NAMES).await?
        {
            launcher::launch_client(path)?;
        } else {
            tracing::info!("League of Legends is already running, not launching it again");
        }
    }

    process::wait_for(
        "League of Legends",
        CLIENT_PROCESS_NAMES,
        settings.wait_for_league,
        "Start League of Legends first, or pass --wait-for-league to wait longer.",
    )
    .await?;

    let discord_names: Vec<&str> = settings.discord_processes.iter().map(String::as_str).collect();
    process::wait_for(
        "Discord",
        &discord_names,
        settings.wait_for_discord,
        "Start Discord first, pass --wait-for-discord to wait longer, \
         or --add-process if you use a custom Discord client.",
    )
    .await
}

/// Runs `work` unless `interrupt` resolves first. `interrupt` is polled
/// through a pin so one signal listener outlives every step.
pub async fn unless_interrupted<I, F>(interrupt: Pin<&mut I>, work: F) -> Option<F::Output>
where
    I: Future,
    F: Future,
{
    tokio::select! {
        biased;
        _ = interrupt => None,
        out = work => Some(out),
    }
}

/// Resolves on Ctrl-C. Without a signal handler it never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn shutdown(presence: &DiscordPresence, manager: &PresenceManager) {
    if presence.is_connected() {
        if let Err(e) = manager.clear().await {
            tracing::warn!("Failed to clear presence: {}", e);
        }
    }
    presence.disconnect().await;
}

/// Runs until the client closes or the user interrupts
pub async fn run(settings: AppSettings) -> Result<Shutdown> {
    wait_for_processes(&settings).await?;

    let presence = Arc::new(DiscordPresence::connect(&settings.client_id).await?);
    tracing::info!("Connected to Discord");

    let snapshot = SharedSnapshot::new(Snapshot::new(unix_now()));
    let lcu = LcuHandle::new();
    let scheduler = UpdateScheduler::new();
    let live = Arc::new(LiveGame::new()?);

    let manager = Arc::new(PresenceManager::new(
        presence.clone(),
        snapshot.clone(),
        settings.display,
        Arc::new(lcu.clone()),
        live,
    ));

    let events = tokio::spawn(run_event_loop(lcu.clone(), snapshot.clone(), scheduler.clone()));

    let worker = {
        let scheduler = scheduler.clone();
        let manager = manager.clone();
        tokio::spawn(async move {
            scheduler
                .run(DEBOUNCE_WINDOW, || {
                    let manager = manager.clone();
                    async move { manager.reconcile().await }
                })
                .await
        })
    };

    let mut interval = tokio::time::interval(SUPERVISE_INTERVAL);
    let interrupt = ctrl_c();
    tokio::pin!(interrupt);

    let reason = loop {
        if unless_interrupted(interrupt.as_mut(), interval.tick()).await.is_none() {
            break Shutdown::Interrupted;
        }

        let Some(state) = unless_interrupted(interrupt.as_mut(), process::client_state()).await
        else {
            break Shutdown::Interrupted;
        };
        let state = match state {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Could not read the process table: {}", e);
                continue;
            }
        };

        match next_tick(state, presence.is_connected()) {
            Tick::Continue => {}
            Tick::Reconnect => {
                let reconnect = presence.reconnect(RECONNECT_ATTEMPTS, RECONNECT_DELAY);
                match unless_interrupted(interrupt.as_mut(), reconnect).await {
                    None => break Shutdown::Interrupted,
                    Some(Err(e)) => {
                        events.abort();
                        worker.abort();
                        return Err(e);
                    }
                    Some(Ok(())) => {
                        manager.reset().await;
                        scheduler.request_update();
                    }
                }
            }
            Tick::Stop(reason) => {
                tracing::info!("League of Legends closed, shutting down");
                break reason;
            }
        }
    };

    if reason == Shutdown::Interrupted {
        tracing::info!("Interrupted, shutting down");
    }
    events.abort();
    worker.abort();
    shutdown(&presence, &manager).await;
    Ok(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_client_stops_even_when_discord_is_gone() {
        assert_eq!(
            next_tick(ClientState::NotRunning, false),
            Tick::Stop(Shutdown::ClientClosed)
        );
        assert_eq!(
            next_tick(ClientState::NotRunning, true),
            Tick::Stop(Shutdown::ClientClosed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn interrupt_during_a_long_step_is_not_lost() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let interrupt = async move {
            rx.await.ok();
        };
        tokio::pin!(interrupt);

        // First step completes normally and the listener stays armed
        let out = unless_interrupted(interrupt.as_mut(), async { 1 }).await;
        assert_eq!(out, Some(1));

        // Signal arrives while a long step (like a reconnect) is running
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            tx.send(()).ok();
        });
        let step = tokio::time::sleep(Duration::from_secs(60));
        assert!(unless_interrupted(interrupt.as_mut(), step).await.is_none());
    }

    #[tokio::test]
    async fn signal_raised_between_steps_is_seen_by_the_next_step() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let interrupt = async move {
            rx.await.ok();
        };
        tokio::pin!(interrupt);

        assert_eq!(unless_interrupted(interrupt.as_mut(), async {}).await, Some(()));
        tx.send(()).unwrap();
        let out = unless_interrupted(interrupt.as_mut(), std::future::pending::<()>()).await;
        assert!(out.is_none());
    }

    #[test]
    fn lost_discord_triggers_reconnect() {
        assert_eq!(next_tick(ClientState::InLobby, false), Tick::Reconnect);
        assert_eq!(next_tick(ClientState::InGame, false), Tick::Reconnect);
        assert_eq!(next_tick(ClientState::InGame, true), Tick::Continue);
    }
}
