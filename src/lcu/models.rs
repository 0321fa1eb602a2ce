//! Payloads returned by the client API

use serde::Deserialize;
use serde_json::Value;

use crate::constants::TFT_COMPANIONS_URL;
use crate::model::Companion;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentSummoner {
    pub profile_icon_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatMe {
    pub availability: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub queue_type: String,
    pub is_ranked: bool,
    pub description: String,
    pub detailed_description: String,
    pub maximum_participant_list_size: u32,
    pub map_id: i64,
    pub game_mode: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub queue_id: i64,
    #[serde(default)]
    pub max_lobby_size: u32,
    #[serde(default)]
    pub map_id: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub is_custom: bool,
}

/// `/lol-lobby/v2/lobby`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lobby {
    #[serde(default)]
    pub party_id: String,
    #[serde(default)]
    pub members: Vec<Value>,
    pub game_config: Option<GameConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyStatus {
    pub queue_id: i64,
    #[serde(default)]
    pub lobby_id: String,
    #[serde(default)]
    pub member_summoner_ids: Vec<Value>,
    #[serde(default)]
    pub is_practice_tool: bool,
    #[serde(default)]
    pub is_custom: bool,
}

/// `/lol-gameflow/v1/gameflow-metadata/player-status`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStatus {
    pub current_lobby_status: Option<LobbyStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadoutItem {
    pub item_id: i64,
    pub loadouts_icon: String,
    pub name: String,
    pub description: String,
}

/// `/lol-cosmetics/v1/inventories/tft/companions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanionInventory {
    pub selected_loadout_item: Option<LoadoutItem>,
}

/// Community Dragon URL for a game asset path like `ASSETS/Loadouts/Companions/Foo.png`
pub fn companion_icon_url(asset_path: &str) -> String {
    let relative = asset_path
        .rsplit_once("ASSETS/")
        .map_or(asset_path, |(_, rest)| rest);
    format!("{}/{}", TFT_COMPANIONS_URL, relative.to_lowercase())
}

impl From<LoadoutItem> for Companion {
    fn from(item: LoadoutItem) -> Self {
        Self {
            item_id: item.item_id,
            icon: companion_icon_url(&item.loadouts_icon),
            name: item.name,
            description: item.description,
        }
    }
}

/// The telemetry endpoint has reported both seconds and milliseconds
pub fn normalize_epoch(raw: i64) -> i64 {
    if raw > 1_000_000_000_000 {
        raw / 1000
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn companion_icon_uses_lowercased_asset_path() {
        let item: LoadoutItem = serde_json::from_value(json!({
            "itemId": 1,
            "loadoutsIcon": "/lol-game-data/assets/ASSETS/Loadouts/Companions/Tooltip_Pengu.png",
            "name": "Pengu",
            "description": "A penguin"
        }))
        .unwrap();
        let companion = Companion::from(item);
        assert_eq!(
            companion.icon,
            format!("{}/loadouts/companions/tooltip_pengu.png", TFT_COMPANIONS_URL)
        );
        assert_eq!(companion.name, "Pengu");
    }

    #[test]
    fn lobby_without_game_config_parses() {
        let lobby: Lobby = serde_json::from_value(json!({"partyId": "p1", "members": []})).unwrap();
        assert!(lobby.game_config.is_none());
    }

    #[test]
    fn epoch_milliseconds_are_converted() {
        assert_eq!(normalize_epoch(1_700_000_000_123), 1_700_000_000);
        assert_eq!(normalize_epoch(1_700_000_000), 1_700_000_000);
    }
}
