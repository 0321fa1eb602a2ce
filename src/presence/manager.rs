//! Turns the client snapshot into presence pushes

use std::sync::Arc;
use std::time::Duration;

use super::dispatcher::{dispatch, Branch};
use super::gate::{PresenceGate, PushOutcome};
use super::traits::{LiveGameSource, PhaseSource, PresenceProvider};
use super::views;
use crate::error::PushError;
use crate::model::{Phase, PresenceView, SharedSnapshot};
use crate::settings::DisplayOptions;

/// Refresh interval while a match is running
pub const IN_GAME_INTERVAL: Duration = Duration::from_secs(10);

pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Runs reconciliation passes against the shared snapshot
pub struct PresenceManager {
    gate: PresenceGate,
    snapshot: SharedSnapshot,
    options: DisplayOptions,
    phase_source: Arc<dyn PhaseSource>,
    live: Arc<dyn LiveGameSource>,
    /// Elapsed-time anchor when the game clock is unavailable
    started_at: i64,
    in_game_interval: Duration,
}

impl PresenceManager {
    pub fn new(
        provider: Arc<dyn PresenceProvider>,
        snapshot: SharedSnapshot,
        options: DisplayOptions,
        phase_source: Arc<dyn PhaseSource>,
        live: Arc<dyn LiveGameSource>,
    ) -> Self {
        tracing::info!("Presence provider: {}", provider.name());
        Self {
            gate: PresenceGate::new(provider),
            snapshot,
            options,
            phase_source,
            live,
            started_at: unix_now(),
            in_game_interval: IN_GAME_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_in_game_interval(mut self, interval: Duration) -> Self {
        self.in_game_interval = interval;
        self
    }

    /// One reconciliation pass over the snapshot as it is right now
    pub async fn reconcile(&self) {
        let snapshot = self.snapshot.read();
        let branch = dispatch(&snapshot.phase, snapshot.is_custom, snapshot.is_practice);
        tracing::debug!(phase = %snapshot.phase, ?branch, "Reconciling presence");

        let now = unix_now();
        let view = match branch {
            Branch::InGame => {
                self.run_in_game().await;
                self.render_client().await;
                return;
            }
            Branch::Ignore => return,
            Branch::Unhandled => {
                tracing::warn!("Unhandled gameflow phase: {}", snapshot.phase);
                return;
            }
            Branch::Client => views::client_view(&snapshot, &self.options),
            Branch::ChampSelect => views::champ_select_view(&snapshot, &self.options, now),
            Branch::Queue => views::queue_view(&snapshot, &self.options, now),
            Branch::CustomLobby => views::custom_lobby_view(&snapshot),
            Branch::MatchmakingLobby => views::matchmaking_lobby_view(&snapshot, &self.options),
        };
        self.push(view).await;
    }

    /// Refreshes the in-game view until the client leaves `InProgress`
    async fn run_in_game(&self) {
        tracing::info!("Game in progress");
        self.live.reset();
        let mut silent = false;

        loop {
            match self.live.sample(silent).await {
                Some(sample) => {
                    let snapshot = self.snapshot.read();
                    match views::in_game_view(
                        &snapshot,
                        &self.options,
                        &sample,
                        unix_now(),
                        self.started_at,
                    ) {
                        Some(view) => self.push(view).await,
                        None if !silent => {
                            tracing::warn!("Unknown game mode: {}", sample.raw_mode)
                        }
                        None => {}
                    }
                }
                None => tracing::debug!("No live game data this cycle"),
            }
            silent = true;

            tokio::time::sleep(self.in_game_interval).await;

            match self.phase_source.current_phase().await {
                Some(Phase::InProgress) => continue,
                phase => {
                    tracing::info!(
                        "Game ended (phase: {})",
                        phase.map_or_else(|| "unknown".to_string(), |p| p.to_string())
                    );
                    break;
                }
            }
        }
    }

    async fn render_client(&self) {
        let snapshot = self.snapshot.read();
        self.push(views::client_view(&snapshot, &self.options)).await;
    }

    async fn push(&self, view: PresenceView) {
        if let Ok(PushOutcome::Pushed) = self.gate.push(view).await {
            tracing::trace!("Presence pushed");
        }
    }

    pub async fn clear(&self) -> Result<(), PushError> {
        self.gate.clear().await
    }

    /// Drop the remembered view so the next pass pushes unconditionally
    pub async fn reset(&self) {
        self.gate.reset().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InGameMode, LiveGameSample, Snapshot};
    use crate::presence::traits::{MockLiveGameSource, MockPhaseSource, MockPresenceProvider};
    use std::sync::Mutex;

    fn recording_provider() -> (MockPresenceProvider, Arc<Mutex<Vec<PresenceView>>>) {
        let pushed = Arc::new(Mutex::new(Vec::new()));
        let recorded = pushed.clone();
        let mut provider = MockPresenceProvider::new();
        provider.expect_name().return_const("Discord");
        provider.expect_update_presence().returning(move |view| {
            recorded.lock().unwrap().push(view.clone());
            Ok(())
        });
        (provider, pushed)
    }

    fn idle_sources() -> (MockPhaseSource, MockLiveGameSource) {
        let mut phase = MockPhaseSource::new();
        phase.expect_current_phase().never();
        let mut live = MockLiveGameSource::new();
        live.expect_sample().never();
        live.expect_reset().return_const(());
        (phase, live)
    }

    fn manager(
        provider: MockPresenceProvider,
        snapshot: &SharedSnapshot,
        phase: MockPhaseSource,
        live: MockLiveGameSource,
    ) -> PresenceManager {
        PresenceManager::new(
            Arc::new(provider),
            snapshot.clone(),
            DisplayOptions::default(),
            Arc::new(phase),
            Arc::new(live),
        )
    }

    #[tokio::test]
    async fn practice_lobby_round_trip_renders_client_lobby_client() {
        let (provider, pushed) = recording_provider();
        let (phase, live) = idle_sources();
        let snapshot = SharedSnapshot::new(Snapshot::new(1_700_000_000));
        let manager = manager(provider, &snapshot, phase, live);

        manager.reconcile().await;

        snapshot.update(|s| {
            s.phase = Phase::Lobby;
            s.queue_id = -1;
            s.is_practice = true;
            s.set_custom_queue();
        });
        manager.reconcile().await;

        snapshot.update(|s| s.phase = Phase::None);
        manager.reconcile().await;

        let pushed = pushed.lock().unwrap();
        let states: Vec<&str> = pushed.iter().map(|v| v.state.as_str()).collect();
        assert_eq!(states, vec!["In Client", "Custom Lobby", "In Client"]);
        assert_eq!(pushed[1].details, "In Lobby: Practice Tool");
    }

    #[tokio::test]
    async fn ready_check_and_unknown_phases_push_nothing() {
        let (provider, pushed) = recording_provider();
        let (phase, live) = idle_sources();
        let snapshot = SharedSnapshot::new(Snapshot::new(0));
        let manager = manager(provider, &snapshot, phase, live);

        snapshot.update(|s| s.phase = Phase::ReadyCheck);
        manager.reconcile().await;
        snapshot.update(|s| s.phase = Phase::Other("Spectating".to_string()));
        manager.reconcile().await;

        assert!(pushed.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn auto_battler_game_then_back_to_client() {
        let (provider, pushed) = recording_provider();

        let mut phase = MockPhaseSource::new();
        let mut polls = 0;
        phase.expect_current_phase().times(2).returning(move || {
            polls += 1;
            if polls == 1 {
                Some(Phase::InProgress)
            } else {
                Some(Phase::EndOfGame)
            }
        });

        let mut live = MockLiveGameSource::new();
        live.expect_reset().times(1).return_const(());
        let flags = Arc::new(Mutex::new(Vec::new()));
        let recorded_flags = flags.clone();
        live.expect_sample().times(2).returning(move |silent| {
            recorded_flags.lock().unwrap().push(silent);
            Some(LiveGameSample {
                raw_mode: "TFT".to_string(),
                mode: Some(InGameMode::AutoBattler),
                level: 6,
                gold: 0,
                kda: None,
                creep_score: None,
                game_time: None,
                art: None,
            })
        });

        let snapshot = SharedSnapshot::new(Snapshot::new(0));
        snapshot.update(|s| s.phase = Phase::InProgress);
        let manager = manager(provider, &snapshot, phase, live)
            .with_in_game_interval(Duration::from_secs(10));

        manager.reconcile().await;

        assert_eq!(*flags.lock().unwrap(), vec![false, true]);

        // The second sample renders the same view and is suppressed by the gate
        let pushed = pushed.lock().unwrap();
        assert_eq!(pushed.len(), 2);
        assert_eq!(pushed[0].state, "In Game · lvl: 6");
        assert_eq!(pushed[1].state, "In Client");
    }
}
