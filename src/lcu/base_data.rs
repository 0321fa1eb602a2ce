//! Initial snapshot population right after the client API becomes reachable

use serde_json::Value;

use super::client::{
    LcuClient, APPLICATION_START_TIME, CHAT_ME, CURRENT_SUMMONER, PLAYER_STATUS, RANKED_STATS,
    TFT_COMPANIONS,
};
use super::handlers::{apply_queue_info, apply_ranked_stats};
use super::models::{normalize_epoch, ChatMe, CompanionInventory, CurrentSummoner, PlayerStatus};
use crate::model::{Availability, Companion, SharedSnapshot};

fn log_skip(what: &str, e: crate::error::Error) {
    tracing::warn!("Could not gather {}: {}", what, e);
}

/// Fetches everything the views need. Each request fails independently.
pub async fn gather(client: &LcuClient, snapshot: &SharedSnapshot) {
    tracing::info!("Gathering base data");

    match client.get_json::<i64>(APPLICATION_START_TIME).await {
        Ok(raw) => snapshot.update(|s| s.application_start_time = normalize_epoch(raw)),
        Err(e) => log_skip("application start time", e),
    }

    match client.get_json::<CurrentSummoner>(CURRENT_SUMMONER).await {
        Ok(summoner) => snapshot.update(|s| s.summoner_icon = summoner.profile_icon_id),
        Err(e) => log_skip("summoner", e),
    }

    match client.get_json::<ChatMe>(CHAT_ME).await {
        Ok(chat) => {
            if let Some(availability) = Availability::from_chat_status(&chat.availability) {
                snapshot.update(|s| s.availability = availability);
            }
        }
        Err(e) => log_skip("chat status", e),
    }

    match client.get_json::<CompanionInventory>(TFT_COMPANIONS).await {
        Ok(inventory) => {
            if let Some(item) = inventory.selected_loadout_item {
                snapshot.update(|s| s.companion = Companion::from(item));
            }
        }
        Err(e) => log_skip("TFT companion", e),
    }

    match client.get_json::<Value>(RANKED_STATS).await {
        Ok(ranked) => snapshot.update(|s| apply_ranked_stats(s, &ranked)),
        Err(e) => log_skip("ranked stats", e),
    }

    match client.current_phase().await {
        Ok(phase) => snapshot.update(|s| s.phase = phase),
        Err(e) => log_skip("gameflow phase", e),
    }

    match client.get_json::<PlayerStatus>(PLAYER_STATUS).await {
        Ok(status) => {
            if let Some(lobby) = status.current_lobby_status {
                snapshot.update(|s| {
                    s.queue_id = lobby.queue_id;
                    s.lobby_id = lobby.lobby_id;
                    s.players = lobby.member_summoner_ids.len() as u32;
                    s.is_practice = lobby.is_practice_tool;
                    s.is_custom = lobby.is_custom;
                });
            }
        }
        Err(e) => log_skip("lobby status", e),
    }

    let queue_id = snapshot.read().queue_id;
    if queue_id == -1 {
        snapshot.update(|s| {
            s.game_mode = "PRACTICETOOL".to_string();
            s.map_id = 11;
            if s.is_practice {
                s.max_players = 1;
            }
            s.set_custom_queue();
        });
        return;
    }

    match client.queue(queue_id).await {
        Ok(queue) => snapshot.update(|s| {
            s.max_players = queue.maximum_participant_list_size;
            s.map_id = queue.map_id;
            s.game_mode = queue.game_mode.clone();
            apply_queue_info(s, queue);
        }),
        Err(e) => log_skip("queue metadata", e),
    }
}
