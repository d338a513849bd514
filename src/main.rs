//! betscope CLI: matchup analysis, team stats, today's games, underdog pick.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use betscope::analyst::Analyst;
use betscope::cache::{FileStore, TtlCache};
use betscope::config::Config;
use betscope::domain::{MatchupReport, OddsBundle, TeamStatsRecord};
use betscope::prompts::SportFilter;
use betscope::providers::GeminiProvider;

#[derive(Parser)]
#[command(name = "betscope", version, about = "AI-assisted sports matchup analysis")]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze an upcoming matchup and aggregate market odds.
    Analyze {
        /// The matchup, e.g. "Lakers vs Nuggets".
        query: String,
    },
    /// Statistical report for a team (seven major US leagues only).
    Stats {
        /// Team name, e.g. "Boston Celtics".
        team: String,
    },
    /// List today's upcoming games.
    Games {
        /// Restrict the feed to one sport.
        #[arg(long, value_enum, default_value_t = SportFilter::All)]
        sport: SportFilter,
    },
    /// Show the biggest positive-moneyline underdog of the day.
    Underdog,
    /// Print a beginner's guide to common bet types.
    Guide,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "betscope=debug" } else { "betscope=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // The guide is static; don't demand an API key for it.
    if matches!(cli.command, Command::Guide) {
        print_guide();
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let config = Config::from_env().context("betscope cannot start without model credentials")?;

    let provider = Arc::new(GeminiProvider::new(&config.api_key, &config.model));
    let cache = TtlCache::new(FileStore::new(config.cache_dir.clone()));
    let analyst = Analyst::new(provider, cache);

    match cli.command {
        Command::Analyze { query } => {
            match analyst.analyze_matchup(&query).await? {
                Some(report) => print_report(&report),
                None => println!("The model's analysis could not be understood. Try again."),
            }
        }
        Command::Stats { team } => {
            let stats = analyst.team_stats(&team).await?;
            print_stats(&stats);
        }
        Command::Games { sport } => {
            let games = analyst.todays_games(sport).await?;
            if games.is_empty() {
                println!("No upcoming {sport} games found for today.");
            } else {
                println!("Today's upcoming games ({sport}):");
                for game in &games {
                    println!(
                        "  {} vs {} ({}) — {}",
                        game.team_a,
                        game.team_b,
                        game.sport,
                        game.start_time.format("%Y-%m-%d %H:%M UTC")
                    );
                }
            }
        }
        Command::Underdog => match analyst.underdog_of_the_day().await? {
            Some(dog) => {
                println!("Underdog of the day: {} ({})", dog.team_name, dog.money_line);
                println!("  {}", dog.matchup);
                println!("  Starts {}", dog.start_time.format("%Y-%m-%d %H:%M UTC"));
            }
            None => println!("No clear underdog today. Check back later."),
        },
        Command::Guide => unreachable!("handled above"),
    }

    Ok(())
}

fn print_report(report: &MatchupReport) {
    let analysis = &report.analysis;
    println!("{} vs {}", analysis.team_a, analysis.team_b);
    println!(
        "Predicted winner: {} (confidence: {})",
        analysis.predicted_winner, analysis.confidence
    );
    println!();
    println!("{}", analysis.narrative);

    if let Some(odds) = &analysis.odds {
        print_odds(analysis, odds);
    }

    if !analysis.odds_sources.is_empty() {
        println!();
        println!("Odds averaged across: {}", analysis.odds_sources.join(", "));
    }
    if !report.sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &report.sources {
            println!("  {} — {}", source.title, source.uri);
        }
    }
}

fn print_odds(analysis: &betscope::domain::MatchupAnalysis, odds: &OddsBundle) {
    println!();
    println!("Average market odds:");
    let line = |l: &Option<betscope::domain::OddsLine>| -> String {
        match l {
            Some(l) => format!(
                "{}{}",
                l.value.as_deref().unwrap_or("-"),
                l.odds.as_deref().map(|o| format!(" ({o})")).unwrap_or_default()
            ),
            None => "-".to_string(),
        }
    };
    if let Some(spread) = &odds.spread {
        println!(
            "  Spread:     {} {} / {} {}",
            analysis.team_a,
            line(&spread.team_a),
            analysis.team_b,
            line(&spread.team_b)
        );
    }
    if let Some(ml) = &odds.money_line {
        println!(
            "  Moneyline:  {} {} / {} {}",
            analysis.team_a,
            line(&ml.team_a),
            analysis.team_b,
            line(&ml.team_b)
        );
    }
    if let Some(total) = &odds.over_under {
        println!(
            "  Total:      {} {} ({})",
            total.prediction.as_deref().unwrap_or("-"),
            total.value.as_deref().unwrap_or("-"),
            total.odds.as_deref().unwrap_or("-")
        );
    }
    if let Some(totals) = &odds.team_totals {
        for (team, total) in [
            (&analysis.team_a, &totals.team_a),
            (&analysis.team_b, &totals.team_b),
        ] {
            if let Some(t) = total {
                println!(
                    "  Team total: {} {} {} ({})",
                    team,
                    t.prediction.as_deref().unwrap_or("-"),
                    t.value.as_deref().unwrap_or("-"),
                    t.odds.as_deref().unwrap_or("-")
                );
            }
        }
    }
}

fn print_stats(stats: &TeamStatsRecord) {
    println!("{}", stats.team_name);
    for (label, season) in [
        ("Current season", &stats.current_season),
        ("Last season", &stats.last_season),
    ] {
        println!();
        println!("{label} ({}): {}-{}", season.season, season.wins, season.losses);
        for (stat, value) in &season.key_stats {
            println!("  {stat}: {value}");
        }
    }
    if !stats.starting_lineup.is_empty() {
        println!();
        println!("Starting lineup:");
        for player in &stats.starting_lineup {
            println!("  {} ({})", player.name, player.position);
        }
    }
    if !stats.injury_report.is_empty() {
        println!();
        println!("Injury report:");
        for injury in &stats.injury_report {
            println!("  {} — {}: {}", injury.player_name, injury.status, injury.details);
        }
    }
    if !stats.recent_games.is_empty() {
        println!();
        println!("Recent games:");
        for game in &stats.recent_games {
            println!("  {} vs {} ({})", game.result, game.opponent, game.score);
        }
    }
    if !stats.full_roster.is_empty() {
        println!();
        println!("Full roster: {} players", stats.full_roster.len());
    }
}

fn print_guide() {
    println!(
        "\
Beginner's Guide to Sports Betting
==================================

Common bet types:

1. Moneyline
   The simplest bet: pick which team wins outright. A plus sign marks the
   underdog, a minus sign the favorite.
   Example: Team A (-150) vs. Team B (+130)
     -150 favorite: bet $150 to win $100.
     +130 underdog: a $100 bet wins $130.

2. Point Spread
   A bet on the margin of victory. The favorite gives points, the underdog
   gets a head start.
   Example: Team A (-7.5) vs. Team B (+7.5)
     Team A must win by 8 or more; Team B must win outright or lose by 7
     or fewer.

3. Over/Under (Totals)
   A bet on the combined points scored by both teams against a line the
   sportsbook sets.
   Example: Over/Under 210.5 — Over wins at 211+, Under at 210 or less.

Key things for beginners:

  * Manage your bankroll: only bet what you can afford to lose, and never
    chase losses.
  * Do your research: check stats, injuries, and recent form before
    deciding.
  * Bet with your head, not your heart: read the data objectively.
  * Understand the odds: they encode implied probability, not just payout.

Responsible gambling: sports betting should be entertainment. If you or
someone you know has a gambling problem, call the National Problem
Gambling Helpline at 1-800-522-4700."
    );
}
