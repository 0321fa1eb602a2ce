//! Maps the gameflow phase to the presence view that should be shown

use crate::model::Phase;

/// Which view a reconciliation pass renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Enter the in-game refresh loop
    InGame,
    /// Keep whatever is currently displayed
    Ignore,
    Client,
    ChampSelect,
    Queue,
    CustomLobby,
    MatchmakingLobby,
    /// Phase with no rendering; logged, nothing pushed
    Unhandled,
}

/// Pure phase dispatch. Arm order matters: `ReadyCheck` must never reach the
/// queue arm and `GameStart` shares the champ-select view.
pub fn dispatch(phase: &Phase, is_custom: bool, is_practice: bool) -> Branch {
    match phase {
        Phase::InProgress => Branch::InGame,
        Phase::ReadyCheck => Branch::Ignore,
        Phase::None | Phase::WaitingForStats | Phase::PreEndOfGame | Phase::EndOfGame => {
            Branch::Client
        }
        Phase::ChampSelect | Phase::GameStart => Branch::ChampSelect,
        Phase::Matchmaking | Phase::CheckedIntoTournament => Branch::Queue,
        Phase::Lobby if is_custom || is_practice => Branch::CustomLobby,
        Phase::Lobby => Branch::MatchmakingLobby,
        _ => Branch::Unhandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAGS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

    #[test]
    fn champ_select_and_game_start_always_render_champ_select() {
        for (custom, practice) in FLAGS {
            assert_eq!(dispatch(&Phase::ChampSelect, custom, practice), Branch::ChampSelect);
            assert_eq!(dispatch(&Phase::GameStart, custom, practice), Branch::ChampSelect);
        }
    }

    #[test]
    fn custom_or_practice_lobby_renders_custom_view() {
        assert_eq!(dispatch(&Phase::Lobby, true, false), Branch::CustomLobby);
        assert_eq!(dispatch(&Phase::Lobby, true, true), Branch::CustomLobby);
        assert_eq!(dispatch(&Phase::Lobby, false, true), Branch::CustomLobby);
        assert_eq!(dispatch(&Phase::Lobby, false, false), Branch::MatchmakingLobby);
    }

    #[test]
    fn ready_check_keeps_previous_rendering() {
        assert_eq!(dispatch(&Phase::ReadyCheck, false, false), Branch::Ignore);
    }

    #[test]
    fn post_game_phases_fall_back_to_client() {
        for phase in [
            Phase::None,
            Phase::WaitingForStats,
            Phase::PreEndOfGame,
            Phase::EndOfGame,
        ] {
            assert_eq!(dispatch(&phase, false, false), Branch::Client);
        }
    }

    #[test]
    fn queue_phases_render_queue() {
        assert_eq!(dispatch(&Phase::Matchmaking, false, false), Branch::Queue);
        assert_eq!(dispatch(&Phase::CheckedIntoTournament, false, false), Branch::Queue);
    }

    #[test]
    fn remaining_phases_are_unhandled() {
        for phase in [
            Phase::Reconnect,
            Phase::FailedToLaunch,
            Phase::TerminatedInError,
            Phase::Other("Spectating".to_string()),
        ] {
            assert_eq!(dispatch(&phase, false, false), Branch::Unhandled);
        }
        assert_eq!(dispatch(&Phase::InProgress, false, false), Branch::InGame);
    }
}
