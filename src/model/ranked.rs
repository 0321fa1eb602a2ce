//! Ranked standings parsed from `/lol-ranked/v1/current-ranked-stats`

use serde::Deserialize;
use serde_json::Value;

use crate::constants::{ARENA_RANKED_EMBLEM_URL, RANKED_EMBLEM_URL};

pub const SOLO_DUO_QUEUE: &str = "RANKED_SOLO_5x5";
pub const FLEX_QUEUE: &str = "RANKED_FLEX_SR";
pub const TFT_QUEUE: &str = "RANKED_TFT";
pub const ARENA_QUEUE: &str = "CHERRY";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct QueueEntry {
    tier: String,
    division: String,
    league_points: i64,
    rated_tier: String,
    rated_rating: i64,
}

fn queue_entry(ranked_stats: &Value, queue_type: &str) -> Option<QueueEntry> {
    let entry = ranked_stats.get("queueMap")?.get(queue_type)?;
    QueueEntry::deserialize(entry).ok()
}

fn capitalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Tier standing in a league-point queue (solo/duo, flex, TFT)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankedStat {
    pub tier: String,
    pub division: String,
    pub league_points: i64,
}

impl RankedStat {
    pub fn from_ranked_stats(ranked_stats: &Value, queue_type: &str) -> Self {
        let Some(entry) = queue_entry(ranked_stats, queue_type) else {
            return Self::default();
        };

        // Unranked queues report an empty tier or "NONE"
        let tier = match entry.tier.as_str() {
            "" | "NONE" => String::new(),
            raw => capitalize(raw),
        };

        Self {
            tier,
            division: entry.division,
            league_points: entry.league_points,
        }
    }

    pub fn is_ranked(&self) -> bool {
        !self.tier.is_empty()
    }

    /// "{tier} {division}: {points} LP"; apex tiers carry no division
    pub fn display(&self) -> String {
        if self.division.is_empty() || self.division == "NA" {
            format!("{}: {} LP", self.tier, self.league_points)
        } else {
            format!("{} {}: {} LP", self.tier, self.division, self.league_points)
        }
    }

    pub fn emblem_url(&self) -> String {
        RANKED_EMBLEM_URL.replace("{tier}", &self.tier)
    }
}

/// Arena (CHERRY) rating; the queue is only present while the mode is live
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArenaStat {
    pub rated_tier: String,
    pub tier: String,
    pub rated_rating: i64,
}

impl ArenaStat {
    pub fn from_ranked_stats(ranked_stats: &Value) -> Self {
        let Some(entry) = queue_entry(ranked_stats, ARENA_QUEUE) else {
            return Self::default();
        };

        let tier = match entry.rated_tier.as_str() {
            "GRAY" => "Wood",
            "GREEN" => "Bronze",
            "BLUE" => "Silver",
            "PURPLE" => "Gold",
            "ORANGE" => "Gladiator",
            _ => "",
        };

        Self {
            rated_tier: entry.rated_tier,
            tier: tier.to_string(),
            rated_rating: entry.rated_rating,
        }
    }

    pub fn is_ranked(&self) -> bool {
        !self.tier.is_empty()
    }

    pub fn display(&self) -> String {
        format!("{} • Rating: {}", self.tier, self.rated_rating)
    }

    pub fn emblem_url(&self) -> String {
        ARENA_RANKED_EMBLEM_URL.replace("{tier}", &self.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "queueMap": {
                "RANKED_SOLO_5x5": {"tier": "GOLD", "division": "II", "leaguePoints": 40},
                "RANKED_FLEX_SR": {"tier": "", "division": "NA", "leaguePoints": 0},
                "RANKED_TFT": {"tier": "MASTER", "division": "NA", "leaguePoints": 112},
                "CHERRY": {"ratedTier": "PURPLE", "ratedRating": 1450}
            }
        })
    }

    #[test]
    fn parses_league_point_queues() {
        let solo = RankedStat::from_ranked_stats(&payload(), SOLO_DUO_QUEUE);
        assert_eq!(solo.tier, "Gold");
        assert_eq!(solo.display(), "Gold II: 40 LP");
        assert!(solo.emblem_url().contains("Gold"));

        let flex = RankedStat::from_ranked_stats(&payload(), FLEX_QUEUE);
        assert!(!flex.is_ranked());

        let tft = RankedStat::from_ranked_stats(&payload(), TFT_QUEUE);
        assert_eq!(tft.display(), "Master: 112 LP");
    }

    #[test]
    fn missing_queue_defaults_to_unranked() {
        let stat = RankedStat::from_ranked_stats(&json!({"queueMap": {}}), SOLO_DUO_QUEUE);
        assert_eq!(stat, RankedStat::default());

        let arena = ArenaStat::from_ranked_stats(&json!({}));
        assert!(!arena.is_ranked());
    }

    #[test]
    fn arena_maps_rated_tier_labels() {
        let arena = ArenaStat::from_ranked_stats(&payload());
        assert_eq!(arena.tier, "Gold");
        assert_eq!(arena.display(), "Gold • Rating: 1450");
    }
}
