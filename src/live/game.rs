//! Live game sampling for the in-game view

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::client::LiveClient;
use super::models::{ActivePlayer, AllGameData, PlayerScores};
use super::skins::SkinResolver;
use crate::constants::game_mode_name;
use crate::error::{Error, Result};
use crate::model::{ChampionArt, InGameMode, Kda, LiveGameSample};
use crate::presence::LiveGameSource;
use crate::process;

/// Assembles a sample from the three live endpoints
pub fn build_sample(
    data: &AllGameData,
    active: Option<&ActivePlayer>,
    scores: Option<&PlayerScores>,
    art: Option<ChampionArt>,
) -> LiveGameSample {
    let raw_mode = data.game_data.game_mode.clone();
    LiveGameSample {
        mode: InGameMode::from_raw(&raw_mode),
        raw_mode,
        level: active.map_or(0, |a| a.level),
        gold: active.map_or(0, |a| a.current_gold.max(0.0) as u32),
        kda: scores.map(|s| Kda {
            kills: s.kills,
            deaths: s.deaths,
            assists: s.assists,
        }),
        creep_score: scores.map(|s| s.creep_score),
        game_time: data.game_data.game_time,
        art,
    }
}

/// `LiveGameSource` backed by the local live client data API
pub struct LiveGame {
    client: LiveClient,
    skins: SkinResolver,
    /// Resolved once per match
    art: Mutex<Option<ChampionArt>>,
}

impl LiveGame {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::fatal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client: LiveClient::new()?,
            skins: SkinResolver::new(http),
            art: Mutex::new(None),
        })
    }

    fn cached_art(&self) -> Option<ChampionArt> {
        self.art
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn champion_art(&self, data: &AllGameData, riot_id: &str) -> Option<ChampionArt> {
        if let Some(art) = self.cached_art() {
            return Some(art);
        }

        let Some(player) = data.player(riot_id) else {
            tracing::warn!("Could not find {} in the game's player list", riot_id);
            return None;
        };

        let art = self.skins.resolve(player, &process::game_locale().await).await?;
        *self.art.lock().unwrap_or_else(PoisonError::into_inner) = Some(art.clone());
        Some(art)
    }
}

fn announce(sample: &LiveGameSample) {
    if let Some(art) = &sample.art {
        tracing::info!("Champion detected: {}", art.display_name);
        if let Some(skin) = &art.skin_name {
            tracing::info!("Skin detected: {}", skin);
        }
        if let Some(chroma) = &art.chroma_name {
            tracing::info!("Chroma detected: {}", chroma);
        }
    }
    tracing::info!("Game mode detected: {}", game_mode_name(&sample.raw_mode));
}

#[async_trait]
impl LiveGameSource for LiveGame {
    async fn sample(&self, silent: bool) -> Option<LiveGameSample> {
        // The first sample of a match waits for the game to finish loading
        let data = self.client.all_game_data(!silent).await?;
        let mode = InGameMode::from_raw(&data.game_data.game_mode);

        let active = self.client.active_player().await;
        let riot_id = active.as_ref().map(|a| a.riot_id.clone()).unwrap_or_default();

        let scores = match mode {
            Some(InGameMode::AutoBattler) | None => None,
            Some(_) if riot_id.is_empty() => None,
            Some(_) => self.client.player_scores(&riot_id).await,
        };

        let art = match mode {
            Some(mode) if mode.has_champion() && !riot_id.is_empty() => {
                self.champion_art(&data, &riot_id).await
            }
            _ => None,
        };

        let sample = build_sample(&data, active.as_ref(), scores.as_ref(), art);
        if !silent {
            announce(&sample);
        }
        Some(sample)
    }

    fn reset(&self) {
        *self.art.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
