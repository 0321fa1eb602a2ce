//! Best-effort champion art lookup (skin tile, skin and chroma names)
//!
//! The parent skin of a chroma is guessed from the Data Dragon catalog: by
//! skin name when the game reports one, otherwise the highest catalog number
//! not above the reported skin id. Riot does not guarantee this relation.

use std::collections::HashMap;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::models::PlayerInfo;
use crate::constants::{
    champion_display_name, DDRAGON_CHAMPION_URL, DDRAGON_VERSIONS_URL, MERAKI_CHAMPIONS_URL,
    SKIN_TILE_BASE_URL,
};
use crate::error::{Error, Result};
use crate::model::ChampionArt;

/// Meraki only publishes chroma names reliably for this locale
const CHROMA_LOCALE: &str = "en-US";

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSkin {
    pub num: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogChampion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skins: Vec<CatalogSkin>,
}

#[derive(Debug, Deserialize)]
struct ChampionFile {
    data: HashMap<String, CatalogChampion>,
}

/// `game_character_skin_displayname_Ahri_2` -> `Ahri`
pub fn champion_from_raw_skin_name(raw: &str) -> Option<&str> {
    let parts: Vec<&str> = raw.split('_').collect();
    parts
        .len()
        .checked_sub(2)
        .and_then(|i| parts.get(i))
        .copied()
        .filter(|name| !name.is_empty())
}

pub fn base_skin_num(skins: &[CatalogSkin], skin_name: Option<&str>, skin_id: u32) -> u32 {
    if let Some(name) = skin_name {
        if let Some(skin) = skins.iter().find(|s| s.name == name) {
            return skin.num;
        }
    }
    skins
        .iter()
        .map(|s| s.num)
        .filter(|num| *num <= skin_id)
        .max()
        .unwrap_or(0)
}

/// Chroma name from a Meraki champion entry. Meraki ids are `champion_key * 1000 + num`.
pub fn chroma_name(meraki_champion: &Value, base_num: u32, skin_id: u32) -> Option<String> {
    let matches_num = |entry: &Value, num: u32| {
        entry
            .get("id")
            .and_then(Value::as_u64)
            .map(|id| id % 1000 == u64::from(num))
            .unwrap_or(false)
    };

    let skin = meraki_champion
        .get("skins")?
        .as_array()?
        .iter()
        .find(|s| matches_num(s, base_num))?;

    skin.get("chromas")?
        .as_array()?
        .iter()
        .find(|c| matches_num(c, skin_id))?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

pub fn tile_url(champion: &str, num: u32) -> String {
    format!("{}{}_{}.jpg", SKIN_TILE_BASE_URL, champion, num)
}

pub struct SkinResolver {
    http: reqwest::Client,
}

impl SkinResolver {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn latest_version(&self) -> Result<String> {
        let versions: Vec<String> = self.http.get(DDRAGON_VERSIONS_URL).send().await?.json().await?;
        versions
            .into_iter()
            .next()
            .ok_or_else(|| Error::Ignorable("Data Dragon returned no versions".to_string()))
    }

    async fn champion(&self, id: &str, locale: &str) -> Result<CatalogChampion> {
        let version = self.latest_version().await?;
        let url = DDRAGON_CHAMPION_URL
            .replace("{version}", &version)
            .replace("{locale}", locale)
            .replace("{name}", id);
        let mut file: ChampionFile = self.http.get(&url).send().await?.json().await?;
        file.data
            .remove(id)
            .ok_or_else(|| Error::Ignorable(format!("{} missing from champion data", id)))
    }

    async fn meraki_champion(&self, id: &str) -> Result<Value> {
        let url = MERAKI_CHAMPIONS_URL.replace("{locale}", CHROMA_LOCALE);
        let mut all: Value = self.http.get(&url).send().await?.json().await?;
        Ok(all.get_mut(id).map(Value::take).unwrap_or(Value::Null))
    }

    async fn tile_exists(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!("HEAD {} failed: {}", url, e);
                false
            }
        }
    }

    /// Steps down from `num` until a tile exists; `_0` always does
    async fn probe_tile(&self, champion: &str, num: u32) -> String {
        for candidate in (1..=num).rev() {
            let url = tile_url(champion, candidate);
            if self.tile_exists(&url).await {
                return url;
            }
        }
        tile_url(champion, 0)
    }

    /// `None` only when the raw skin name is unusable; missing catalog data
    /// degrades to the champion id and the default tile
    pub async fn resolve(&self, player: &PlayerInfo, locale: &str) -> Option<ChampionArt> {
        let raw_champion = champion_from_raw_skin_name(&player.raw_skin_name)?;

        let catalog = match self.champion(raw_champion, locale).await {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                tracing::warn!("Could not load champion data for {}: {}", raw_champion, e);
                None
            }
        };

        let champion = catalog
            .as_ref()
            .map_or(raw_champion.to_string(), |c| c.id.clone());
        let display_name = catalog
            .as_ref()
            .map_or_else(|| champion_display_name(&champion).to_string(), |c| c.name.clone());

        let skin_name = player
            .skin_name
            .clone()
            .filter(|name| !name.is_empty() && *name != "default");
        let base_num = catalog.as_ref().map_or(player.skin_id, |c| {
            base_skin_num(&c.skins, skin_name.as_deref(), player.skin_id)
        });

        let chroma = if player.skin_id != base_num {
            match self.meraki_champion(&champion).await {
                Ok(entry) => chroma_name(&entry, base_num, player.skin_id),
                Err(e) => {
                    tracing::debug!("Could not load chroma data for {}: {}", champion, e);
                    None
                }
            }
        } else {
            None
        };

        let image_url = self.probe_tile(&champion, base_num).await;

        Some(ChampionArt {
            champion,
            display_name,
            skin_name,
            chroma_name: chroma,
            image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ahri_skins() -> Vec<CatalogSkin> {
        [(0, "default"), (1, "Dynasty Ahri"), (5, "Arcade Ahri"), (14, "Star Guardian Ahri")]
            .into_iter()
            .map(|(num, name)| CatalogSkin {
                num,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn champion_is_second_to_last_segment() {
        assert_eq!(
            champion_from_raw_skin_name("game_character_skin_displayname_Ahri_2"),
            Some("Ahri")
        );
        assert_eq!(
            champion_from_raw_skin_name("game_character_skin_displayname_MonkeyKing_0"),
            Some("MonkeyKing")
        );
        assert_eq!(champion_from_raw_skin_name("Ahri"), None);
    }

    #[test]
    fn base_skin_prefers_name_then_highest_lower_num() {
        let skins = ahri_skins();
        assert_eq!(base_skin_num(&skins, Some("Arcade Ahri"), 7), 5);
        assert_eq!(base_skin_num(&skins, None, 7), 5);
        assert_eq!(base_skin_num(&skins, Some("Unknown"), 15), 14);
        assert_eq!(base_skin_num(&skins, None, 0), 0);
    }

    #[test]
    fn chroma_name_matches_by_num_suffix() {
        let meraki = json!({
            "skins": [
                {"id": 103005, "name": "Arcade Ahri", "chromas": [
                    {"id": 103006, "name": "Ruby"},
                    {"id": 103007, "name": "Sapphire"}
                ]}
            ]
        });
        assert_eq!(chroma_name(&meraki, 5, 7).as_deref(), Some("Sapphire"));
        assert_eq!(chroma_name(&meraki, 5, 9), None);
        assert_eq!(chroma_name(&meraki, 1, 6), None);
        assert_eq!(chroma_name(&Value::Null, 5, 6), None);
    }

    #[test]
    fn tile_urls_follow_ddragon_layout() {
        assert_eq!(
            tile_url("Ahri", 14),
            format!("{}Ahri_14.jpg", SKIN_TILE_BASE_URL)
        );
    }
}
