//! The query orchestrator: cache-first reads over the model boundary.
//!
//! Each operation follows the same shape — consult the TTL cache, build a
//! prompt on a miss, hand the raw reply to the decoder, refresh the cache —
//! but the failure policy differs per operation and is deliberate:
//! the underdog feed is a bonus feature that degrades to `None` on any
//! failure, while a team-stats decode failure is a real error the caller
//! must see. Requests are not coalesced and never retried; two rapid
//! identical calls issue two model requests, last write wins.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::cache::{KvStore, TtlCache};
use crate::decode;
use crate::domain::{Game, MatchupReport, TeamStatsRecord, Underdog};
use crate::error::Result;
use crate::prompts::{self, SportFilter};
use crate::providers::{GenerateOptions, LlmProvider};

/// Games list freshness window.
const GAMES_TTL: Duration = Duration::from_secs(60 * 60);
/// Underdog and team-stats freshness window.
const HALF_DAY_TTL: Duration = Duration::from_secs(12 * 60 * 60);

const UNDERDOG_CACHE_KEY: &str = "underdog_of_the_day";

/// Cache-fronted client for the four betscope queries.
pub struct Analyst<S: KvStore> {
    provider: Arc<dyn LlmProvider>,
    cache: TtlCache<S>,
}

impl<S: KvStore> Analyst<S> {
    pub fn new(provider: Arc<dyn LlmProvider>, cache: TtlCache<S>) -> Self {
        Self { provider, cache }
    }

    /// Today's upcoming games for a sport filter.
    ///
    /// Cache hits are re-filtered to games that have not started; a hit
    /// whose games have all gone past triggers a fresh fetch. A transport
    /// failure surfaces as an error and is never cached. Malformed reply
    /// lines are dropped silently — an empty list is a valid answer.
    pub async fn todays_games(&self, filter: SportFilter) -> Result<Vec<Game>> {
        let key = format!("games_{filter}");
        let now = Utc::now();

        if let Some(cached) = self.cache.get::<Vec<Game>>(&key) {
            let upcoming: Vec<Game> =
                cached.into_iter().filter(|g| g.start_time > now).collect();
            if !upcoming.is_empty() {
                return Ok(upcoming);
            }
            debug!(key = %key, "all cached games have started, refetching");
        }

        // Web search stays off here to conserve grounding quota; the model's
        // schedule knowledge is good enough for a same-day feed.
        let reply = self
            .provider
            .generate(&prompts::todays_games(filter), GenerateOptions::default())
            .await?;

        let games = decode::decode_games(&reply.text, now);
        self.cache.set(&key, &games, GAMES_TTL);
        Ok(games)
    }

    /// The day's biggest positive-moneyline underdog.
    ///
    /// Bonus feature: every failure mode degrades to `Ok(None)` so a broken
    /// feed never blocks the rest of the app. A record whose game has
    /// already started is discarded and its cache entry cleared.
    pub async fn underdog_of_the_day(&self) -> Result<Option<Underdog>> {
        let now = Utc::now();

        if let Some(cached) = self.cache.get::<Underdog>(UNDERDOG_CACHE_KEY) {
            if cached.start_time > now {
                return Ok(Some(cached));
            }
        }

        let reply = match self
            .provider
            .generate(
                &prompts::underdog_of_the_day(),
                GenerateOptions::with_web_search(),
            )
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("underdog fetch failed, degrading to no result: {e}");
                return Ok(None);
            }
        };

        let underdog: Underdog = match decode::decode_json_payload(&reply.text) {
            Ok(underdog) => underdog,
            Err(e) => {
                warn!("underdog reply did not decode, degrading to no result: {e}");
                return Ok(None);
            }
        };

        if underdog.start_time <= now {
            warn!("model returned an underdog whose game already started, discarding");
            self.cache.remove(UNDERDOG_CACHE_KEY);
            return Ok(None);
        }

        self.cache.set(UNDERDOG_CACHE_KEY, &underdog, HALF_DAY_TTL);
        Ok(Some(underdog))
    }

    /// Full matchup analysis with grounding sources. Never cached — each
    /// analysis is unique and time-sensitive.
    ///
    /// A transport failure is an error; a reply that does not decode is
    /// `Ok(None)` (no partial object is ever returned).
    pub async fn analyze_matchup(&self, query: &str) -> Result<Option<MatchupReport>> {
        let reply = self
            .provider
            .generate(
                &prompts::matchup_analysis(query),
                GenerateOptions::with_web_search(),
            )
            .await?;

        let analysis = match decode::decode_json_payload(&reply.text) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("matchup analysis did not decode: {e}");
                return Ok(None);
            }
        };

        Ok(Some(MatchupReport {
            analysis,
            sources: decode::dedup_sources(&reply.citations),
        }))
    }

    /// Statistical report for one team, cached per normalized team name.
    ///
    /// Unlike the underdog feed, a decode failure here is surfaced: stats
    /// absence is not an expected steady-state outcome for a team the user
    /// asked about by name.
    pub async fn team_stats(&self, team_name: &str) -> Result<TeamStatsRecord> {
        let key = stats_cache_key(team_name);

        if let Some(cached) = self.cache.get::<TeamStatsRecord>(&key) {
            return Ok(cached);
        }

        let reply = self
            .provider
            .generate(
                &prompts::team_stats(team_name),
                GenerateOptions::with_web_search(),
            )
            .await?;

        let stats: TeamStatsRecord = decode::decode_json_payload(&reply.text)?;
        self.cache.set(&key, &stats, HALF_DAY_TTL);
        Ok(stats)
    }
}

/// `"Boston Celtics"` → `stats_boston_celtics`.
fn stats_cache_key(team_name: &str) -> String {
    let normalized: Vec<&str> = team_name.split_whitespace().collect();
    format!("stats_{}", normalized.join("_").to_lowercase())
}
