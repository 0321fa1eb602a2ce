//! Payloads of the live client data API (port 2999)

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameData {
    pub game_mode: String,
    pub game_time: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInfo {
    pub riot_id: String,
    pub champion_name: String,
    pub raw_skin_name: String,
    pub skin_name: Option<String>,
    #[serde(rename = "skinID")]
    pub skin_id: u32,
}

/// `/liveclientdata/allgamedata`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllGameData {
    pub game_data: GameData,
    pub all_players: Vec<PlayerInfo>,
}

impl AllGameData {
    pub fn player(&self, riot_id: &str) -> Option<&PlayerInfo> {
        self.all_players.iter().find(|p| p.riot_id == riot_id)
    }
}

/// `/liveclientdata/activeplayer`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivePlayer {
    pub riot_id: String,
    pub level: u32,
    pub current_gold: f64,
}

/// `/liveclientdata/playerscores?riotId=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerScores {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub creep_score: u32,
}
