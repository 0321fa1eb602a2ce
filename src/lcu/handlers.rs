//! Applies routed events to the snapshot

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::LcuClient;
use super::events::{route_for, LcuEvent, Route};
use super::models::{ChatMe, CompanionInventory, CurrentSummoner, Lobby, QueueInfo};
use crate::model::{
    Availability, ArenaStat, Companion, Phase, RankedStat, SharedSnapshot, Snapshot, FLEX_QUEUE,
    SOLO_DUO_QUEUE, TFT_QUEUE,
};
use crate::presence::UpdateScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Snapshot changed; a reconciliation pass is needed
    Changed,
    /// Same value as before
    Unchanged,
    /// Lobby fields stored; queue metadata must be fetched for this id
    NeedsQueue(i64),
    /// Payload absent or unusable
    Skipped,
}

fn decode<T: DeserializeOwned>(data: &Value) -> Option<T> {
    match T::deserialize(data) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Unexpected event payload: {}", e);
            None
        }
    }
}

pub fn apply_ranked_stats(snapshot: &mut Snapshot, data: &Value) {
    snapshot.solo_rank = RankedStat::from_ranked_stats(data, SOLO_DUO_QUEUE);
    snapshot.flex_rank = RankedStat::from_ranked_stats(data, FLEX_QUEUE);
    snapshot.tft_rank = RankedStat::from_ranked_stats(data, TFT_QUEUE);
    snapshot.arena_rank = ArenaStat::from_ranked_stats(data);
}

pub fn apply_queue_info(snapshot: &mut Snapshot, queue: QueueInfo) {
    snapshot.queue_name = queue.name;
    snapshot.queue_type = queue.queue_type;
    snapshot.queue_is_ranked = queue.is_ranked;
    snapshot.queue_description = queue.description;
    snapshot.queue_detailed_description = queue.detailed_description;
}

fn apply_lobby(snapshot: &mut Snapshot, data: &Value) -> Applied {
    // Leaving the lobby delivers a DELETE without data
    if data.is_null() {
        return Applied::Skipped;
    }
    let Some(lobby) = decode::<Lobby>(data) else {
        return Applied::Skipped;
    };
    let Some(config) = lobby.game_config else {
        return Applied::Skipped;
    };

    snapshot.queue_id = config.queue_id;
    snapshot.lobby_id = lobby.party_id;
    snapshot.players = lobby.members.len() as u32;
    snapshot.max_players = config.max_lobby_size;
    snapshot.map_id = config.map_id;
    snapshot.is_custom = config.is_custom;
    snapshot.is_practice = config.game_mode == "PRACTICETOOL";
    if snapshot.is_practice {
        snapshot.max_players = 1;
    }
    snapshot.game_mode = config.game_mode;

    if snapshot.queue_id == -1 {
        snapshot.set_custom_queue();
        Applied::Changed
    } else {
        Applied::NeedsQueue(snapshot.queue_id)
    }
}

/// Mutates the snapshot for one routed event. Pure apart from logging.
pub fn apply(route: Route, snapshot: &mut Snapshot, data: &Value) -> Applied {
    match route {
        Route::Summoner => {
            let Some(summoner) = decode::<CurrentSummoner>(data) else {
                return Applied::Skipped;
            };
            if snapshot.summoner_icon == summoner.profile_icon_id {
                return Applied::Unchanged;
            }
            snapshot.summoner_icon = summoner.profile_icon_id;
            Applied::Changed
        }
        Route::ChatStatus => {
            let Some(chat) = decode::<ChatMe>(data) else {
                return Applied::Skipped;
            };
            match Availability::from_chat_status(&chat.availability) {
                Some(availability) => {
                    snapshot.availability = availability;
                    Applied::Changed
                }
                None => {
                    tracing::debug!("Ignoring chat availability: {}", chat.availability);
                    Applied::Skipped
                }
            }
        }
        Route::Companion => {
            let item = decode::<CompanionInventory>(data).and_then(|inv| inv.selected_loadout_item);
            let Some(item) = item else {
                tracing::debug!("No TFT companion selected");
                return Applied::Skipped;
            };
            snapshot.companion = Companion::from(item);
            Applied::Changed
        }
        Route::GameflowPhase => {
            let Some(raw) = data.as_str() else {
                return Applied::Skipped;
            };
            let phase = Phase::parse(raw);
            if snapshot.phase == phase {
                return Applied::Unchanged;
            }
            tracing::info!("Gameflow phase: {}", phase);
            snapshot.phase = phase;
            Applied::Changed
        }
        Route::Lobby => apply_lobby(snapshot, data),
        Route::RankedStats => {
            apply_ranked_stats(snapshot, data);
            Applied::Changed
        }
    }
}

/// Routes an event, fetches queue metadata when needed and requests a pass
pub async fn handle_event(
    event: &LcuEvent,
    client: &LcuClient,
    snapshot: &SharedSnapshot,
    scheduler: &UpdateScheduler,
) {
    let Some(route) = route_for(event) else {
        return;
    };
    tracing::debug!(uri = %event.uri, kind = ?event.kind, "Client event");

    match snapshot.update(|s| apply(route, s, &event.data)) {
        Applied::Changed => {
            scheduler.request_update();
        }
        Applied::NeedsQueue(queue_id) => {
            match client.queue(queue_id).await {
                Ok(queue) => snapshot.update(|s| apply_queue_info(s, queue)),
                Err(e) => tracing::warn!("Failed to fetch queue {}: {}", queue_id, e),
            }
            scheduler.request_update();
        }
        Applied::Unchanged | Applied::Skipped => {}
    }
}
