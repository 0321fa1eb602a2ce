//! WAMP event frames from the client event bus and the table routing them

use serde::Deserialize;
use serde_json::Value;

/// WAMP opcode for a subscription request
const WAMP_SUBSCRIBE: u8 = 5;
/// WAMP opcode for an event delivery
const WAMP_EVENT: u8 = 8;
pub const JSON_API_EVENT: &str = "OnJsonApiEvent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LcuEvent {
    pub uri: String,
    pub kind: EventKind,
    pub data: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventPayload {
    uri: String,
    event_type: EventKind,
    #[serde(default)]
    data: Value,
}

pub fn subscribe_frame() -> String {
    serde_json::json!([WAMP_SUBSCRIBE, JSON_API_EVENT]).to_string()
}

/// Decodes `[8, "OnJsonApiEvent", {uri, eventType, data}]`; anything else is `None`
pub fn parse_frame(text: &str) -> Option<LcuEvent> {
    let frame: (u8, String, Value) = serde_json::from_str(text).ok()?;
    let (opcode, topic, payload) = frame;
    if opcode != WAMP_EVENT || topic != JSON_API_EVENT {
        return None;
    }

    let payload: EventPayload = serde_json::from_value(payload).ok()?;
    Some(LcuEvent {
        uri: payload.uri,
        kind: payload.event_type,
        data: payload.data,
    })
}

/// Snapshot section an event updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Summoner,
    ChatStatus,
    Companion,
    GameflowPhase,
    Lobby,
    RankedStats,
}

const UPDATE: &[EventKind] = &[EventKind::Update];
const ANY: &[EventKind] = &[EventKind::Create, EventKind::Update, EventKind::Delete];

pub static ROUTES: &[(&str, &[EventKind], Route)] = &[
    ("/lol-summoner/v1/current-summoner", UPDATE, Route::Summoner),
    ("/lol-chat/v1/me", UPDATE, Route::ChatStatus),
    (
        "/lol-cosmetics/v1/inventories/tft/companions",
        UPDATE,
        Route::Companion,
    ),
    ("/lol-gameflow/v1/gameflow-phase", UPDATE, Route::GameflowPhase),
    ("/lol-lobby/v2/lobby", ANY, Route::Lobby),
    ("/lol-ranked/v1/current-ranked-stats", UPDATE, Route::RankedStats),
];

pub fn route_for(event: &LcuEvent) -> Option<Route> {
    ROUTES
        .iter()
        .find(|(uri, kinds, _)| *uri == event.uri && kinds.contains(&event.kind))
        .map(|(_, _, route)| *route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_event_frames() {
        let text = json!([
            8,
            "OnJsonApiEvent",
            {"uri": "/lol-gameflow/v1/gameflow-phase", "eventType": "Update", "data": "Lobby"}
        ])
        .to_string();
        let event = parse_frame(&text).unwrap();
        assert_eq!(event.uri, "/lol-gameflow/v1/gameflow-phase");
        assert_eq!(event.kind, EventKind::Update);
        assert_eq!(event.data, json!("Lobby"));
        assert_eq!(route_for(&event), Some(Route::GameflowPhase));
    }

    #[test]
    fn ignores_other_frames() {
        assert!(parse_frame("").is_none());
        assert!(parse_frame(r#"[0, "session", 1, "server"]"#).is_none());
        assert!(parse_frame(r#"[8, "OnServiceProxy", {}]"#).is_none());
        assert_eq!(subscribe_frame(), r#"[5,"OnJsonApiEvent"]"#);
    }

    #[test]
    fn routes_respect_event_kinds() {
        let event = |uri: &str, kind| LcuEvent {
            uri: uri.to_string(),
            kind,
            data: Value::Null,
        };
        assert_eq!(
            route_for(&event("/lol-lobby/v2/lobby", EventKind::Delete)),
            Some(Route::Lobby)
        );
        assert_eq!(route_for(&event("/lol-chat/v1/me", EventKind::Create)), None);
        assert_eq!(route_for(&event("/lol-store/v1/catalog", EventKind::Update)), None);
    }
}
