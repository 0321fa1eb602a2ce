//! In-memory mirror of the client state

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use super::ranked::{ArenaStat, RankedStat};

/// Chat availability as shown in the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Online,
    Away,
}

impl Availability {
    /// Maps the raw `/lol-chat/v1/me` availability. Anything other than
    /// `chat`/`online`/`away` (mobile, dnd, offline) is not mirrored.
    pub fn from_chat_status(raw: &str) -> Option<Self> {
        match raw {
            "chat" | "online" => Some(Self::Online),
            "away" => Some(Self::Away),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Away => "Away",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gameflow phase reported by `/lol-gameflow/v1/gameflow-phase`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    None,
    Lobby,
    Matchmaking,
    CheckedIntoTournament,
    ReadyCheck,
    ChampSelect,
    GameStart,
    FailedToLaunch,
    InProgress,
    Reconnect,
    WaitingForStats,
    PreEndOfGame,
    EndOfGame,
    TerminatedInError,
    /// A phase name this build does not know about
    Other(String),
}

impl Phase {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "None" => Self::None,
            "Lobby" => Self::Lobby,
            "Matchmaking" => Self::Matchmaking,
            "CheckedIntoTournament" => Self::CheckedIntoTournament,
            "ReadyCheck" => Self::ReadyCheck,
            "ChampSelect" => Self::ChampSelect,
            "GameStart" => Self::GameStart,
            "FailedToLaunch" => Self::FailedToLaunch,
            "InProgress" => Self::InProgress,
            "Reconnect" => Self::Reconnect,
            "WaitingForStats" => Self::WaitingForStats,
            "PreEndOfGame" => Self::PreEndOfGame,
            "EndOfGame" => Self::EndOfGame,
            "TerminatedInError" => Self::TerminatedInError,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Lobby => "Lobby",
            Self::Matchmaking => "Matchmaking",
            Self::CheckedIntoTournament => "CheckedIntoTournament",
            Self::ReadyCheck => "ReadyCheck",
            Self::ChampSelect => "ChampSelect",
            Self::GameStart => "GameStart",
            Self::FailedToLaunch => "FailedToLaunch",
            Self::InProgress => "InProgress",
            Self::Reconnect => "Reconnect",
            Self::WaitingForStats => "WaitingForStats",
            Self::PreEndOfGame => "PreEndOfGame",
            Self::EndOfGame => "EndOfGame",
            Self::TerminatedInError => "TerminatedInError",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected TFT companion (little legend)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Companion {
    pub item_id: i64,
    pub icon: String,
    pub name: String,
    pub description: String,
}

/// Last-known state of the game client.
///
/// One instance lives for the whole process. It is mutated in place by
/// client events and read by the reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub availability: Availability,
    pub phase: Phase,
    pub game_mode: String,
    pub is_custom: bool,
    pub is_practice: bool,
    pub lobby_id: String,
    pub map_id: i64,
    pub players: u32,
    pub max_players: u32,
    pub queue_id: i64,
    pub queue_name: String,
    pub queue_type: String,
    pub queue_is_ranked: bool,
    pub queue_description: String,
    pub queue_detailed_description: String,
    pub summoner_icon: i64,
    pub solo_rank: RankedStat,
    pub flex_rank: RankedStat,
    pub tft_rank: RankedStat,
    pub arena_rank: ArenaStat,
    pub companion: Companion,
    /// Epoch seconds at which the client application started
    pub application_start_time: i64,
}

impl Snapshot {
    pub fn new(application_start_time: i64) -> Self {
        Self {
            availability: Availability::Online,
            phase: Phase::None,
            game_mode: String::new(),
            is_custom: false,
            is_practice: false,
            lobby_id: String::new(),
            map_id: 0,
            players: 0,
            max_players: 0,
            queue_id: -1,
            queue_name: String::new(),
            queue_type: String::new(),
            queue_is_ranked: false,
            queue_description: String::new(),
            queue_detailed_description: String::new(),
            summoner_icon: 0,
            solo_rank: RankedStat::default(),
            flex_rank: RankedStat::default(),
            tft_rank: RankedStat::default(),
            arena_rank: ArenaStat::default(),
            companion: Companion::default(),
            application_start_time,
        }
    }

    /// Detailed queue description when the client provides one, otherwise the queue name
    pub fn queue_display_name(&self) -> &str {
        if self.queue_detailed_description.is_empty() {
            &self.queue_name
        } else {
            &self.queue_detailed_description
        }
    }

    /// Resets the queue fields for a lobby without a matchmaking queue
    pub fn set_custom_queue(&mut self) {
        self.queue_detailed_description.clear();
        self.queue_description.clear();
        self.queue_type.clear();
        self.queue_is_ranked = false;
        self.queue_name = if self.is_practice {
            "Practice Tool".to_string()
        } else {
            "Custom Game".to_string()
        };
    }
}

/// Snapshot shared between the event task, the debounce worker and the main loop.
///
/// Writes go through [`SharedSnapshot::update`]; readers take a copy so no
/// lock is held across an await point.
#[derive(Debug, Clone)]
pub struct SharedSnapshot {
    inner: Arc<Mutex<Snapshot>>,
}

impl SharedSnapshot {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub fn read(&self) -> Snapshot {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Snapshot) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_phase_keeps_raw_name() {
        let phase = Phase::parse("Spectating");
        assert_eq!(phase, Phase::Other("Spectating".to_string()));
        assert_eq!(phase.to_string(), "Spectating");
        assert_eq!(Phase::parse("ChampSelect"), Phase::ChampSelect);
    }

    #[test]
    fn queue_display_name_prefers_detailed_description() {
        let mut snapshot = Snapshot::new(0);
        snapshot.queue_name = "RANKED_SOLO_5x5".to_string();
        assert_eq!(snapshot.queue_display_name(), "RANKED_SOLO_5x5");

        snapshot.queue_detailed_description = "Ranked Solo/Duo".to_string();
        assert_eq!(snapshot.queue_display_name(), "Ranked Solo/Duo");
    }

    #[test]
    fn custom_queue_name_depends_on_practice_flag() {
        let mut snapshot = Snapshot::new(0);
        snapshot.queue_detailed_description = "Ranked Flex".to_string();
        snapshot.is_practice = true;
        snapshot.set_custom_queue();
        assert_eq!(snapshot.queue_display_name(), "Practice Tool");

        snapshot.is_practice = false;
        snapshot.set_custom_queue();
        assert_eq!(snapshot.queue_display_name(), "Custom Game");
    }

    #[test]
    fn availability_ignores_other_chat_states() {
        assert_eq!(Availability::from_chat_status("chat"), Some(Availability::Online));
        assert_eq!(Availability::from_chat_status("away"), Some(Availability::Away));
        assert_eq!(Availability::from_chat_status("dnd"), None);
    }

    #[test]
    fn shared_snapshot_update_is_visible_to_readers() {
        let shared = SharedSnapshot::new(Snapshot::new(42));
        let reader = shared.clone();
        shared.update(|s| s.phase = Phase::Lobby);
        assert_eq!(reader.read().phase, Phase::Lobby);
        assert_eq!(reader.read().application_start_time, 42);
    }
}
