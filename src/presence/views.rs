//! Builds a [`PresenceView`] for each dispatcher branch

use crate::constants::{
    game_mode_name, map_icon_url, profile_icon_url, AUTO_BATTLER_FALLBACK_ART_URL, BRAND_TEXT,
    LEAGUE_LOGO_URL,
};
use crate::model::{Availability, InGameMode, LiveGameSample, Phase, PresenceView, Snapshot};
use crate::settings::DisplayOptions;

/// Ranked replacement for the large text and small image/text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankDisplay {
    pub large_text: String,
    pub small_image: String,
    pub small_text: String,
}

impl RankDisplay {
    fn is_complete(&self) -> bool {
        !self.large_text.is_empty() && !self.small_image.is_empty() && !self.small_text.is_empty()
    }
}

/// Standing for the active queue, keyed by the queue's display name.
/// Unranked players and non-ranked queues produce an empty result.
pub fn rank_display(snapshot: &Snapshot) -> RankDisplay {
    rank_for_queue(snapshot, snapshot.queue_display_name())
}

pub fn rank_for_queue(snapshot: &Snapshot, queue_name: &str) -> RankDisplay {
    let (small_text, small_image) = match queue_name {
        "Ranked Solo/Duo" if snapshot.solo_rank.is_ranked() => {
            (snapshot.solo_rank.display(), snapshot.solo_rank.emblem_url())
        }
        "Ranked Flex" if snapshot.flex_rank.is_ranked() => {
            (snapshot.flex_rank.display(), snapshot.flex_rank.emblem_url())
        }
        "Teamfight Tactics (Ranked)" if snapshot.tft_rank.is_ranked() => {
            (snapshot.tft_rank.display(), snapshot.tft_rank.emblem_url())
        }
        "Arena" if snapshot.arena_rank.is_ranked() => {
            (snapshot.arena_rank.display(), snapshot.arena_rank.emblem_url())
        }
        _ => return RankDisplay::default(),
    };

    RankDisplay {
        large_text: BRAND_TEXT.to_string(),
        small_image,
        small_text,
    }
}

/// All-or-nothing: a partial lookup leaves `view` untouched
pub fn apply_rank(view: &mut PresenceView, rank: RankDisplay) -> bool {
    if !rank.is_complete() {
        return false;
    }
    view.large_text = rank.large_text;
    view.small_image = rank.small_image;
    view.small_text = rank.small_text;
    true
}

pub fn client_view(snapshot: &Snapshot, options: &DisplayOptions) -> PresenceView {
    let details = if options.show_emojis {
        let glyph = match snapshot.availability {
            Availability::Online => "🟢",
            Availability::Away => "🔴",
        };
        format!("{}  {}", glyph, snapshot.availability)
    } else {
        snapshot.availability.to_string()
    };

    PresenceView {
        large_image: profile_icon_url(snapshot.summoner_icon),
        large_text: "In Client".to_string(),
        small_image: LEAGUE_LOGO_URL.to_string(),
        small_text: BRAND_TEXT.to_string(),
        details,
        state: "In Client".to_string(),
        start: snapshot.application_start_time,
    }
}

fn queue_like_view(
    snapshot: &Snapshot,
    options: &DisplayOptions,
    state: &str,
    now: i64,
) -> PresenceView {
    let mut view = PresenceView {
        large_image: map_icon_url(snapshot.map_id),
        large_text: game_mode_name(&snapshot.game_mode).to_string(),
        small_image: profile_icon_url(snapshot.summoner_icon),
        small_text: BRAND_TEXT.to_string(),
        details: snapshot.queue_display_name().to_string(),
        state: state.to_string(),
        start: now,
    };
    if options.show_rank {
        apply_rank(&mut view, rank_display(snapshot));
    }
    view
}

pub fn queue_view(snapshot: &Snapshot, options: &DisplayOptions, now: i64) -> PresenceView {
    let state = if snapshot.phase == Phase::CheckedIntoTournament {
        "In Queue (Clash)"
    } else {
        "In Queue"
    };
    queue_like_view(snapshot, options, state, now)
}

pub fn champ_select_view(snapshot: &Snapshot, options: &DisplayOptions, now: i64) -> PresenceView {
    queue_like_view(snapshot, options, "In Champ Select", now)
}

pub fn matchmaking_lobby_view(snapshot: &Snapshot, options: &DisplayOptions) -> PresenceView {
    let mut view = PresenceView {
        large_image: profile_icon_url(snapshot.summoner_icon),
        large_text: game_mode_name(&snapshot.game_mode).to_string(),
        small_image: map_icon_url(snapshot.map_id),
        small_text: BRAND_TEXT.to_string(),
        details: snapshot.queue_display_name().to_string(),
        state: format!("In Lobby ({}/{})", snapshot.players, snapshot.max_players),
        start: snapshot.application_start_time,
    };
    if options.show_rank {
        apply_rank(&mut view, rank_display(snapshot));
    }
    if snapshot.game_mode == "TFT" && !snapshot.companion.icon.is_empty() {
        view.large_image = snapshot.companion.icon.clone();
        view.large_text = snapshot.companion.name.clone();
    }
    view
}

/// No player count and no rank for custom or practice lobbies
pub fn custom_lobby_view(snapshot: &Snapshot) -> PresenceView {
    PresenceView {
        large_image: profile_icon_url(snapshot.summoner_icon),
        large_text: game_mode_name(&snapshot.game_mode).to_string(),
        small_image: map_icon_url(snapshot.map_id),
        small_text: BRAND_TEXT.to_string(),
        details: format!("In Lobby: {}", snapshot.queue_name),
        state: "Custom Lobby".to_string(),
        start: snapshot.application_start_time,
    }
}

/// Second activity line while a match is running
pub fn in_game_state(mode: InGameMode, sample: &LiveGameSample, show_stats: bool) -> String {
    let mut parts = vec!["In Game".to_string()];
    let kda = sample.kda.map(|kda| kda.to_string());
    let cs = sample.creep_score.map(|cs| format!("{}cs", cs));
    let level = format!("lvl: {}", sample.level);
    let gold = format!("gold: {}", sample.gold);

    match mode {
        InGameMode::AutoBattler => parts.push(level),
        _ if !show_stats => {}
        InGameMode::Arena => parts.extend(kda.into_iter().chain([level, gold])),
        InGameMode::Swarm => parts.extend(cs.into_iter().chain([level, gold])),
        InGameMode::Standard => parts.extend(kda.into_iter().chain(cs)),
    }
    parts.join(" · ")
}

/// `None` when the game mode is not recognised
pub fn in_game_view(
    snapshot: &Snapshot,
    options: &DisplayOptions,
    sample: &LiveGameSample,
    now: i64,
    fallback_start: i64,
) -> Option<PresenceView> {
    let mode = sample.mode?;

    let details = match snapshot.queue_display_name() {
        "" => game_mode_name(&sample.raw_mode).to_string(),
        name => name.to_string(),
    };
    let start = sample
        .game_time
        .map_or(fallback_start, |secs| now - secs as i64);

    let mut view = PresenceView {
        small_image: LEAGUE_LOGO_URL.to_string(),
        small_text: BRAND_TEXT.to_string(),
        details,
        state: in_game_state(mode, sample, options.show_stats),
        start,
        ..Default::default()
    };

    if mode == InGameMode::AutoBattler {
        if snapshot.companion.icon.is_empty() {
            view.large_image = AUTO_BATTLER_FALLBACK_ART_URL.to_string();
            view.large_text = "Teamfight Tactics".to_string();
        } else {
            view.large_image = snapshot.companion.icon.clone();
            view.large_text = snapshot.companion.name.clone();
        }
        return Some(view);
    }

    match &sample.art {
        Some(art) => {
            view.large_image = art.image_url.clone();
            view.large_text = art.label();
        }
        None => {
            view.large_image = LEAGUE_LOGO_URL.to_string();
            view.large_text = game_mode_name(&sample.raw_mode).to_string();
        }
    }

    // The champion art keeps the large text; only the emblem is swapped in
    if options.show_rank {
        // Without lobby data the mode name stands in for the queue
        let rank = rank_for_queue(snapshot, &view.details);
        if !rank.small_image.is_empty() && !rank.small_text.is_empty() {
            view.small_image = rank.small_image;
            view.small_text = rank.small_text;
        }
    }
    Some(view)
}
