//! Defensive decoding of model replies.
//!
//! Model output is treated as an untrusted external format. The pipeline is
//! always the same: strip known wrapping syntax, parse into structured data,
//! validate against the expected shape. Malformed items are dropped (or the
//! whole payload reported as a decode failure) — decoding itself never panics.

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::warn;
use url::Url;

use crate::domain::{Game, Source};
use crate::error::{BetscopeError, Result};
use crate::providers::Citation;

/// `Team A vs Team B (Sport) [timestamp]` — the games feed line format.
static GAME_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) vs (.*) \((.*?)\) \[(.*?)\]").unwrap());

/// Strict gate on the bracketed timestamp before any date parsing happens.
static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap());

/// Strip a wrapping markdown code fence (```json ... ``` or ``` ... ```).
///
/// Models routinely fence JSON payloads despite being told not to; absent
/// fences the input passes through untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Decode the plain-text games feed into upcoming [`Game`]s.
///
/// A line survives only if it matches the declared format, carries a strictly
/// formatted `YYYY-MM-DDTHH:MM:SSZ` timestamp that parses as a real UTC
/// datetime, and starts strictly after `now`. Everything else is dropped
/// silently; an empty result is a valid result.
pub fn decode_games(text: &str, now: DateTime<Utc>) -> Vec<Game> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| decode_game_line(line, now))
        .collect()
}

fn decode_game_line(line: &str, now: DateTime<Utc>) -> Option<Game> {
    let caps = GAME_LINE_RE.captures(line)?;
    let timestamp = caps[4].trim();
    if !TIMESTAMP_RE.is_match(timestamp) {
        return None;
    }
    let start_time = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%SZ")
        .ok()?
        .and_utc();
    if start_time <= now {
        return None;
    }
    Some(Game {
        team_a: caps[1].trim().to_string(),
        team_b: caps[2].trim().to_string(),
        sport: caps[3].trim().to_string(),
        start_time,
    })
}

/// Fence-strip and parse a JSON payload into `T`.
///
/// Failure is a [`BetscopeError::Decode`]; whether that surfaces to the user
/// or degrades to "no result" is the caller's policy, not this function's.
pub fn decode_json_payload<T: DeserializeOwned>(text: &str) -> Result<T> {
    let cleaned = strip_code_fence(text);
    serde_json::from_str(cleaned).map_err(|e| BetscopeError::Decode(e.to_string()))
}

/// Deduplicate grounding citations by URL hostname, first occurrence wins.
///
/// Hostnames are normalized by stripping a leading `www.` so that
/// `www.draftkings.com` and `draftkings.com` collapse into one source.
/// Citations whose URI does not parse are skipped.
pub fn dedup_sources(citations: &[Citation]) -> Vec<Source> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for citation in citations {
        let host = match Url::parse(&citation.uri).ok().and_then(|u| {
            u.host_str()
                .map(|h| h.strip_prefix("www.").unwrap_or(h).to_string())
        }) {
            Some(host) => host,
            None => {
                warn!(uri = %citation.uri, "skipping grounding source with unparseable URI");
                continue;
            }
        };
        if seen.insert(host.clone()) {
            let title = if citation.title.is_empty() {
                host
            } else {
                citation.title.clone()
            };
            sources.push(Source {
                uri: citation.uri.clone(),
                title,
            });
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_past() -> DateTime<Utc> {
        "1990-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn decodes_a_well_formed_game_line() {
        let games = decode_games(
            "Warriors vs Celtics (Basketball) [2099-01-01T00:00:00Z]",
            far_past(),
        );
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].team_a, "Warriors");
        assert_eq!(games[0].team_b, "Celtics");
        assert_eq!(games[0].sport, "Basketball");
        assert_eq!(games[0].start_time.to_rfc3339(), "2099-01-01T00:00:00+00:00");
    }

    #[test]
    fn drops_games_that_already_started() {
        let now: DateTime<Utc> = "2050-01-01T00:00:00Z".parse().unwrap();
        let text = "Warriors vs Celtics (Basketball) [2000-01-01T00:00:00Z]\n\
                    Bruins vs Rangers (Hockey) [2099-01-01T00:00:00Z]";
        let games = decode_games(text, now);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].sport, "Hockey");
    }

    #[test]
    fn drops_lines_missing_the_bracketed_timestamp() {
        let games = decode_games("Warriors vs Celtics (Basketball)", far_past());
        assert!(games.is_empty());
    }

    #[test]
    fn drops_loosely_formatted_timestamps() {
        // Offset form and missing seconds both fail the strict gate.
        let text = "A vs B (Hockey) [2099-01-01T00:00:00+00:00]\n\
                    C vs D (Hockey) [2099-01-01T00:00Z]";
        assert!(decode_games(text, far_past()).is_empty());
    }

    #[test]
    fn drops_timestamps_that_are_not_real_dates() {
        let games = decode_games("A vs B (Hockey) [2099-13-40T00:00:00Z]", far_past());
        assert!(games.is_empty());
    }

    #[test]
    fn ignores_surrounding_chatter_lines() {
        let text = "Here are today's games:\n\
                    Warriors vs Celtics (Basketball) [2099-01-01T00:00:00Z]\n\
                    Enjoy!";
        let games = decode_games(text, far_past());
        assert_eq!(games.len(), 1);
    }

    #[test]
    fn strips_json_code_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn decodes_fenced_json_payload() {
        use crate::domain::Underdog;
        let text = "```json\n{\"teamName\":\"Magic\",\"matchup\":\"Magic vs Celtics\",\
                    \"moneyLine\":\"+600\",\"dateTime\":\"2099-01-01T00:00:00Z\"}\n```";
        let underdog: Underdog = decode_json_payload(text).unwrap();
        assert_eq!(underdog.team_name, "Magic");
        assert_eq!(underdog.money_line, "+600");
    }

    #[test]
    fn malformed_json_payload_is_a_decode_error() {
        use crate::domain::Underdog;
        let err = decode_json_payload::<Underdog>("not json at all").unwrap_err();
        assert!(matches!(err, BetscopeError::Decode(_)));
    }

    #[test]
    fn dedups_sources_by_hostname_first_wins() {
        let citations = vec![
            Citation {
                uri: "https://draftkings.com/a".into(),
                title: "DK odds".into(),
            },
            Citation {
                uri: "https://www.draftkings.com/b".into(),
                title: "DK other page".into(),
            },
            Citation {
                uri: "https://fanduel.com/x".into(),
                title: "FD".into(),
            },
        ];
        let sources = dedup_sources(&citations);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].uri, "https://draftkings.com/a");
        assert_eq!(sources[0].title, "DK odds");
        assert_eq!(sources[1].title, "FD");
    }

    #[test]
    fn empty_citation_title_falls_back_to_hostname() {
        let citations = vec![Citation {
            uri: "https://www.betmgm.com/lines".into(),
            title: String::new(),
        }];
        let sources = dedup_sources(&citations);
        assert_eq!(sources[0].title, "betmgm.com");
    }

    #[test]
    fn unparseable_citation_uri_is_skipped() {
        let citations = vec![Citation {
            uri: "not a url".into(),
            title: "junk".into(),
        }];
        assert!(dedup_sources(&citations).is_empty());
    }
}
