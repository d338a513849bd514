//! Domain objects decoded from model replies.
//!
//! Wire names are camelCase to match the JSON shape the prompts declare to
//! the model; games and underdogs use `dateTime` for their start time. All
//! of these are plain value objects — their lifetime is the cache entry or
//! the single request that produced them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single upcoming game, decoded from the plain-text games feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub team_a: String,
    pub team_b: String,
    pub sport: String,
    /// Scheduled start, UTC. Decoding drops games already under way.
    #[serde(rename = "dateTime")]
    pub start_time: DateTime<Utc>,
}

/// The day's biggest positive-moneyline underdog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Underdog {
    pub team_name: String,
    /// Human-readable matchup, e.g. "Orlando Magic vs Boston Celtics".
    pub matchup: String,
    /// Highest positive moneyline found, e.g. "+600".
    pub money_line: String,
    #[serde(rename = "dateTime")]
    pub start_time: DateTime<Utc>,
}

/// Model-reported confidence in its predicted winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => f.write_str("High"),
            Self::Medium => f.write_str("Medium"),
            Self::Low => f.write_str("Low"),
        }
    }
}

/// A single betting line: the line value plus optional juice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsLine {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<String>,
}

/// A market quoted per team (spread, moneyline).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedLine {
    #[serde(default)]
    pub team_a: Option<OddsLine>,
    #[serde(default)]
    pub team_b: Option<OddsLine>,
}

/// An over/under market with the model's lean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalLine {
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub odds: Option<String>,
}

/// Individual team-total over/under lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTotalLines {
    #[serde(default)]
    pub team_a: Option<TotalLine>,
    #[serde(default)]
    pub team_b: Option<TotalLine>,
}

/// Averaged odds across the sportsbooks the model consulted.
///
/// Every market is optional: the prompt instructs the model to emit an
/// empty object for any market it found no usable data for, so absence
/// means "no data", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsBundle {
    #[serde(default)]
    pub spread: Option<PairedLine>,
    #[serde(default)]
    pub money_line: Option<PairedLine>,
    #[serde(default)]
    pub over_under: Option<TotalLine>,
    #[serde(default)]
    pub team_totals: Option<TeamTotalLines>,
}

/// Full matchup analysis as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupAnalysis {
    pub team_a: String,
    pub team_b: String,
    pub predicted_winner: String,
    pub confidence: Confidence,
    /// Free-form narrative covering form, head-to-head, injuries and stats.
    #[serde(rename = "analysis")]
    pub narrative: String,
    /// Sportsbooks the model averaged odds across.
    #[serde(default)]
    pub odds_sources: Vec<String>,
    #[serde(default)]
    pub odds: Option<OddsBundle>,
}

/// A web page the model consulted, from grounding metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// Analysis plus its deduplicated grounding sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupReport {
    pub analysis: MatchupAnalysis,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Injury {
    pub player_name: String,
    pub status: String,
    pub details: String,
}

/// One recent game: opponent, final score, and a W/L result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecap {
    pub opponent: String,
    pub score: String,
    pub result: String,
}

/// Win-loss record plus whatever key stats the model chose to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStats {
    pub season: String,
    pub wins: u32,
    pub losses: u32,
    /// Stat names are chosen freely by the model; no fixed schema.
    #[serde(default)]
    pub key_stats: BTreeMap<String, String>,
}

/// Full statistical report for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsRecord {
    pub team_name: String,
    pub current_season: SeasonStats,
    pub last_season: SeasonStats,
    #[serde(default)]
    pub starting_lineup: Vec<Player>,
    #[serde(default)]
    pub full_roster: Vec<Player>,
    #[serde(default)]
    pub injury_report: Vec<Injury>,
    #[serde(default)]
    pub recent_games: Vec<GameRecap>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underdog_wire_format_uses_camel_case_and_date_time() {
        let json = r#"{
            "teamName": "Orlando Magic",
            "matchup": "Orlando Magic vs Boston Celtics",
            "moneyLine": "+600",
            "dateTime": "2099-01-01T00:00:00Z"
        }"#;
        let underdog: Underdog = serde_json::from_str(json).unwrap();
        assert_eq!(underdog.team_name, "Orlando Magic");
        assert_eq!(underdog.money_line, "+600");
        assert_eq!(underdog.start_time.to_rfc3339(), "2099-01-01T00:00:00+00:00");
    }

    #[test]
    fn odds_bundle_tolerates_empty_market_objects() {
        let json = r#"{
            "spread": {},
            "moneyLine": {
                "teamA": { "value": "-210" },
                "teamB": { "value": "+180" }
            },
            "overUnder": {}
        }"#;
        let bundle: OddsBundle = serde_json::from_str(json).unwrap();
        let spread = bundle.spread.unwrap();
        assert!(spread.team_a.is_none() && spread.team_b.is_none());
        let ml = bundle.money_line.unwrap();
        assert_eq!(ml.team_a.unwrap().value.as_deref(), Some("-210"));
        assert!(bundle.team_totals.is_none());
    }

    #[test]
    fn confidence_rejects_unknown_values() {
        assert!(serde_json::from_str::<Confidence>("\"High\"").is_ok());
        assert!(serde_json::from_str::<Confidence>("\"Certain\"").is_err());
    }

    #[test]
    fn team_stats_missing_optional_sections_default_to_empty() {
        let json = r#"{
            "teamName": "Boston Celtics",
            "currentSeason": { "season": "2025-2026", "wins": 10, "losses": 2 },
            "lastSeason": { "season": "2024-2025", "wins": 61, "losses": 21,
                            "keyStats": { "Points Per Game": "120.6" } }
        }"#;
        let stats: TeamStatsRecord = serde_json::from_str(json).unwrap();
        assert!(stats.starting_lineup.is_empty());
        assert!(stats.injury_report.is_empty());
        assert_eq!(
            stats.last_season.key_stats.get("Points Per Game").map(String::as_str),
            Some("120.6")
        );
    }

    #[test]
    fn game_round_trips_through_cache_serialization() {
        let game = Game {
            team_a: "Golden State Warriors".into(),
            team_b: "Boston Celtics".into(),
            sport: "Basketball".into(),
            start_time: "2099-01-01T00:00:00Z".parse().unwrap(),
        };
        let bytes = serde_json::to_vec(&game).unwrap();
        let back: Game = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, game);
    }
}
