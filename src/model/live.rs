//! Data sampled from the live game API while a match is running

/// How the in-game activity line is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InGameMode {
    /// Summoner's Rift, ARAM and the other champion modes
    Standard,
    /// Arena (CHERRY)
    Arena,
    /// Swarm (STRAWBERRY)
    Swarm,
    /// Teamfight Tactics
    AutoBattler,
}

impl InGameMode {
    /// Classifies the raw `gameData.gameMode` value. Unknown modes yield `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "TFT" => Some(Self::AutoBattler),
            "CHERRY" => Some(Self::Arena),
            "STRAWBERRY" => Some(Self::Swarm),
            "CLASSIC" | "ARAM" | "URF" | "ARURF" | "PRACTICETOOL" | "TUTORIAL"
            | "TUTORIAL_MODULE_1" | "TUTORIAL_MODULE_2" | "TUTORIAL_MODULE_3" | "NEXUSBLITZ"
            | "ONEFORALL" | "ULTBOOK" | "SWIFTPLAY" | "BRAWL" | "DOOMBOTSTEEMO" => {
                Some(Self::Standard)
            }
            _ => None,
        }
    }

    pub fn has_champion(&self) -> bool {
        !matches!(self, Self::AutoBattler)
    }
}

/// Kills / deaths / assists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kda {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl std::fmt::Display for Kda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.kills, self.deaths, self.assists)
    }
}

/// Resolved art for the champion the player is on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChampionArt {
    pub champion: String,
    pub display_name: String,
    pub skin_name: Option<String>,
    pub chroma_name: Option<String>,
    pub image_url: String,
}

impl ChampionArt {
    /// "{skin} ({chroma})", the skin name, or the champion's display name
    pub fn label(&self) -> String {
        match (&self.skin_name, &self.chroma_name) {
            (Some(skin), Some(chroma)) => format!("{} ({})", skin, chroma),
            (Some(skin), None) => skin.clone(),
            _ => self.display_name.clone(),
        }
    }
}

/// One poll of the live game API
#[derive(Debug, Clone, PartialEq)]
pub struct LiveGameSample {
    /// Raw `gameData.gameMode`
    pub raw_mode: String,
    pub mode: Option<InGameMode>,
    pub level: u32,
    pub gold: u32,
    pub kda: Option<Kda>,
    pub creep_score: Option<u32>,
    /// Seconds since the match started, when the API reported it
    pub game_time: Option<f64>,
    pub art: Option<ChampionArt>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_game_modes() {
        assert_eq!(InGameMode::from_raw("TFT"), Some(InGameMode::AutoBattler));
        assert_eq!(InGameMode::from_raw("CHERRY"), Some(InGameMode::Arena));
        assert_eq!(InGameMode::from_raw("ARAM"), Some(InGameMode::Standard));
        assert_eq!(InGameMode::from_raw("SOMETHING_NEW"), None);
        assert!(!InGameMode::AutoBattler.has_champion());
    }

    #[test]
    fn art_label_prefers_chroma_then_skin() {
        let mut art = ChampionArt {
            champion: "MonkeyKing".to_string(),
            display_name: "Wukong".to_string(),
            ..Default::default()
        };
        assert_eq!(art.label(), "Wukong");

        art.skin_name = Some("Lancer Stratus Wukong".to_string());
        assert_eq!(art.label(), "Lancer Stratus Wukong");

        art.chroma_name = Some("Ruby".to_string());
        assert_eq!(art.label(), "Lancer Stratus Wukong (Ruby)");
    }
}
