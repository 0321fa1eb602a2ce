//! Static URLs and display lookup tables

/// Discord application shown as "League of Legends"
pub const DEFAULT_CLIENT_ID: &str = "1194034071588851783";

pub const DISCORD_PROCESS_NAMES: &[&str] = &["Discord", "DiscordPTB", "DiscordCanary", "electron"];

pub const LEAGUE_LOGO_URL: &str =
    "https://github.com/Its-Haze/league-rpc/blob/master/assets/leagueoflegends.png?raw=true";
pub const BRAND_TEXT: &str = "League of Legends";

pub const PROFILE_ICON_URL: &str =
    "https://raw.communitydragon.org/latest/game/assets/ux/summonericons/profileicon{icon_id}.png";
pub const MAP_ICON_URL: &str = "https://raw.communitydragon.org/latest/plugins/rcp-be-lol-game-data/global/default/content/src/leagueclient/gamemodeassets/{map_name}/img/game-select-icon-hover.png";
pub const TFT_COMPANIONS_URL: &str = "https://raw.communitydragon.org/latest/game/assets";
pub const RANKED_EMBLEM_URL: &str =
    "https://github.com/Its-Haze/league-assets/blob/master/ranked_emblems/{tier}.png?raw=true";
pub const ARENA_RANKED_EMBLEM_URL: &str = "https://github.com/Its-Haze/league-assets/blob/master/cherry_rated_medallions/{tier}.png?raw=true";
pub const AUTO_BATTLER_FALLBACK_ART_URL: &str = "https://wallpapercave.com/wp/wp7413493.jpg";

pub const LIVE_CLIENT_BASE_URL: &str = "https://127.0.0.1:2999";

pub const DDRAGON_VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";
pub const DDRAGON_CHAMPION_URL: &str =
    "https://ddragon.leagueoflegends.com/cdn/{version}/data/{locale}/champion/{name}.json";
pub const SKIN_TILE_BASE_URL: &str = "https://ddragon.leagueoflegends.com/cdn/img/champion/tiles/";
pub const MERAKI_CHAMPIONS_URL: &str =
    "https://cdn.merakianalytics.com/riot/lol/resources/latest/{locale}/champions.json";

/// Icon folder for a map id; unknown maps use Summoner's Rift
pub fn map_icon_name(map_id: i64) -> &'static str {
    match map_id {
        11 => "classic_sru",
        12 => "aram",
        21 => "gamemodex",
        22 => "tft",
        30 => "cherry",
        33 => "strawberry",
        _ => "classic_sru",
    }
}

pub fn map_icon_url(map_id: i64) -> String {
    MAP_ICON_URL.replace("{map_name}", map_icon_name(map_id))
}

pub fn profile_icon_url(icon_id: i64) -> String {
    PROFILE_ICON_URL.replace("{icon_id}", &icon_id.to_string())
}

/// Human readable name for a raw game mode, falling back to the raw value
pub fn game_mode_name(raw: &str) -> &str {
    match raw {
        "PRACTICETOOL" => "Summoner's Rift (Custom)",
        "ARAM" => "Howling Abyss (ARAM)",
        "CLASSIC" => "Summoner's Rift",
        "TUTORIAL" | "TUTORIAL_MODULE_1" | "TUTORIAL_MODULE_2" | "TUTORIAL_MODULE_3" => {
            "Summoner's Rift (Tutorial)"
        }
        "URF" => "Summoner's Rift (URF)",
        "NEXUSBLITZ" => "Nexus Blitz",
        "CHERRY" => "Arena",
        "STRAWBERRY" => "Swarm",
        "ULTBOOK" => "Ultimate Spellbook",
        "SWIFTPLAY" => "Swiftplay",
        "BRAWL" => "Brawl",
        other => other,
    }
}

/// Display name for a Data Dragon champion id
pub fn champion_display_name(id: &str) -> &str {
    match id {
        "AurelionSol" => "Aurelion Sol",
        "Belveth" => "Bel'Veth",
        "Chogath" => "Cho'Gath",
        "DrMundo" => "Dr. Mundo",
        "JarvanIV" => "Jarvan IV",
        "Kaisa" => "Kai'Sa",
        "Khazix" => "Kha'Zix",
        "KogMaw" => "Kog'Maw",
        "KSante" => "K'Sante",
        "LeeSin" => "Lee Sin",
        "MasterYi" => "Master Yi",
        "MissFortune" => "Miss Fortune",
        "Nunu" => "Nunu & Willump",
        "RekSai" => "Rek'Sai",
        "Renata" => "Renata Glasc",
        "TahmKench" => "Tahm Kench",
        "TwistedFate" => "Twisted Fate",
        "Velkoz" => "Vel'Koz",
        "MonkeyKing" => "Wukong",
        "XinZhao" => "Xin Zhao",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_map_falls_back_to_rift_icon() {
        assert!(map_icon_url(12).contains("/aram/"));
        assert!(map_icon_url(999).contains("/classic_sru/"));
    }

    #[test]
    fn lookups_fall_back_to_raw_value() {
        assert_eq!(game_mode_name("CHERRY"), "Arena");
        assert_eq!(game_mode_name("NEWMODE"), "NEWMODE");
        assert_eq!(champion_display_name("MonkeyKing"), "Wukong");
        assert_eq!(champion_display_name("Ahri"), "Ahri");
        assert!(profile_icon_url(29).ends_with("profileicon29.png"));
    }
}
