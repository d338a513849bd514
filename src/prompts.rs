//! Prompt construction for the four query types.
//!
//! The prompts declare an exact output contract to the model (a line format
//! for the games feed, strict JSON shapes everywhere else); the decoder in
//! [`crate::decode`] is the other half of that contract.

use clap::ValueEnum;

/// Sport filter for the games feed. `All` spans the seven supported leagues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SportFilter {
    #[default]
    All,
    Basketball,
    Football,
    Baseball,
    Hockey,
}

impl std::fmt::Display for SportFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Basketball => f.write_str("Basketball"),
            Self::Football => f.write_str("Football"),
            Self::Baseball => f.write_str("Baseball"),
            Self::Hockey => f.write_str("Hockey"),
        }
    }
}

impl SportFilter {
    /// The league clause spliced into the games prompt.
    ///
    /// The filter maps to a fixed league list; the prompt forbids the model
    /// from reaching outside it.
    pub fn league_clause(self) -> &'static str {
        match self {
            Self::All => {
                "from the following major US leagues: NBA, WNBA, NCAA Basketball, NFL, \
                 NCAA Football, MLB, and NHL"
            }
            Self::Basketball => "from the NBA, WNBA, and NCAA",
            Self::Football => "from the NFL and NCAA",
            Self::Baseball => "from the MLB",
            Self::Hockey => "from the NHL",
        }
    }
}

/// Prompt for the plain-text upcoming-games feed.
///
/// Output contract: one game per line, `Team A vs Team B (Sport)
/// [YYYY-MM-DDTHH:MM:SSZ]`, nothing else.
pub fn todays_games(filter: SportFilter) -> String {
    format!(
        "List up to 10 major upcoming games {} scheduled to start today in the United States.\n\
         IMPORTANT: You must strictly adhere to the specified leagues. Exclude all other \
         leagues, including high school, international, or other minor leagues.\n\n\
         Format each game as: \"Team A vs Team B (Sport) [YYYY-MM-DDTHH:MM:SSZ]\".\n\
         For example: \"Golden State Warriors vs Boston Celtics (Basketball) \
         [2024-10-26T23:30:00Z]\".\n\
         The time must be in UTC and formatted as a full ISO 8601 string.\n\
         Each game should be on a new line. Do not include any other text, headers, or \
         explanations.",
        filter.league_clause()
    )
}

/// Prompt for the single biggest positive-moneyline underdog of the day.
pub fn underdog_of_the_day() -> String {
    "You are an expert sports betting analyst. Your task is to find the single biggest \
     moneyline underdog of the day.\n\n\
     1. Search Criteria: Scan all upcoming games for today across all major US leagues \
     (NBA, WNBA, NCAA Basketball, NFL, NCAA Football, MLB, NHL).\n\
     2. Find the Underdog: Identify the team with the highest positive moneyline odds \
     (e.g., +450 is higher than +300). The game MUST NOT have started yet.\n\
     3. Data Source: You must search a minimum of 10 real, verifiable, and publicly \
     accessible sports betting websites. Do NOT use \"simulated\", \"illustrative\", or \
     placeholder data. The credibility of your work depends on using authentic, \
     real-world odds.\n\
     4. JSON Output: Structure your response as a single, valid JSON object. Do not \
     include any markdown or other text. The object must have the following keys:\n\
     - \"teamName\": The name of the underdog team.\n\
     - \"matchup\": A string describing the matchup (e.g., \"Team A vs Team B\").\n\
     - \"moneyLine\": The highest moneyline odds you found for the underdog (e.g., \"+550\").\n\
     - \"dateTime\": The scheduled start time of the game in UTC, formatted as a full \
     ISO 8601 string (e.g., \"2024-10-26T23:30:00Z\").\n\n\
     Example Response:\n\
     {\n\
       \"teamName\": \"Orlando Magic\",\n\
       \"matchup\": \"Orlando Magic vs Boston Celtics\",\n\
       \"moneyLine\": \"+600\",\n\
       \"dateTime\": \"2024-10-27T00:00:00Z\"\n\
     }"
        .to_string()
}

/// Prompt for a full matchup analysis with averaged odds.
///
/// Three parts: comprehensive analysis, odds averaged across at least ten
/// real sportsbooks for four markets, and a strict JSON output shape. Any
/// market the model finds no data for must come back as an empty object,
/// never fabricated numbers.
pub fn matchup_analysis(teams_query: &str) -> String {
    format!(
        "You are an expert sports betting analyst. Your task is to analyze an upcoming \
         matchup and find the average market odds from multiple real sources.\n\n\
         Matchup: \"{teams_query}\"\n\n\
         Part 1: Comprehensive Analysis\n\
         Perform a comprehensive analysis covering:\n\
         1. Recent Form: How have the teams performed in their last 5-10 games?\n\
         2. Head-to-Head: What is the recent history between these two teams?\n\
         3. Key Player Analysis: Any notable injuries or absences?\n\
         4. Statistical Comparison: Compare key team statistics.\n\
         5. Prediction: Based on your analysis, determine which team is more likely to win.\n\n\
         Part 2: Average Betting Odds Aggregation\n\
         Search a minimum of 10 different real, verifiable, and publicly accessible sports \
         betting websites (e.g., DraftKings, FanDuel, BetMGM, Caesars).\n\
         CRITICAL INSTRUCTION: You MUST use real data from actual websites. Do NOT use any \
         \"simulated\", \"illustrative\", \"example\", or placeholder sources. The \
         credibility of this analysis depends entirely on the authenticity of your sources. \
         Only use websites that display odds without requiring a user membership.\n\n\
         For each betting type below, collect the odds from all your sources and calculate \
         the average for each line.\n\n\
         Calculate the average odds for:\n\
         1. Point Spread: The average line for each team.\n\
         2. MoneyLine: The average odds for each team to win outright.\n\
         3. Game Total (Over/Under): The average line and a single prediction ('Over' or 'Under').\n\
         4. Team Totals (Over/Under): The average individual Over/Under line for each team.\n\n\
         Part 3: JSON Formatting\n\
         Structure your entire response as a single, valid JSON object. Do not include any \
         markdown formatting. The object must have the following keys:\n\
         - \"teamA\": A string with the name of the first team.\n\
         - \"teamB\": A string with the name of the second team.\n\
         - \"predictedWinner\": A string with the name of the team you predict will win.\n\
         - \"confidence\": A string indicating your confidence level ('High', 'Medium', or 'Low').\n\
         - \"analysis\": A string containing your detailed analysis from Part 1. Use newline \
         characters for formatting.\n\
         - \"oddsSources\": An array of strings listing the names of the real sportsbooks \
         you used to calculate the averages.\n\
         - \"odds\": An object containing the calculated average odds from Part 2, \
         structured as follows:\n\
         {{\n\
           \"spread\": {{\n\
             \"teamA\": {{ \"value\": \"-5.5\", \"odds\": \"-110\" }},\n\
             \"teamB\": {{ \"value\": \"+5.5\", \"odds\": \"-110\" }}\n\
           }},\n\
           \"moneyLine\": {{\n\
             \"teamA\": {{ \"value\": \"-210\" }},\n\
             \"teamB\": {{ \"value\": \"+180\" }}\n\
           }},\n\
           \"overUnder\": {{\n\
             \"prediction\": \"Over\",\n\
             \"value\": \"221.5\",\n\
             \"odds\": \"-110\"\n\
           }},\n\
           \"teamTotals\": {{\n\
             \"teamA\": {{ \"prediction\": \"Over\", \"value\": \"112.5\", \"odds\": \"-115\" }},\n\
             \"teamB\": {{ \"prediction\": \"Under\", \"value\": \"109.5\", \"odds\": \"-115\" }}\n\
           }}\n\
         }}\n\
         If you cannot find odds for a specific type, return an empty object for it \
         (e.g., \"spread\": {{}})."
    )
}

/// Prompt for a team's statistical report, restricted to the seven major leagues.
pub fn team_stats(team_name: &str) -> String {
    format!(
        "You are an expert sports data analyst. Your task is to provide a detailed \
         statistical report for a specific team.\n\
         Team: \"{team_name}\"\n\n\
         IMPORTANT: The team must be from one of the following major US leagues: NBA, WNBA, \
         NCAA Basketball, NFL, NCAA Football, MLB, or NHL. If the team is not from one of \
         these leagues, do not provide data.\n\n\
         Search the web for real, verifiable data from major sports statistics websites \
         (e.g., ESPN, Fox Sports, CBS Sports, etc.).\n\n\
         Compile a report with the following information:\n\
         1. Team Name: The official name of the team.\n\
         2. Current Season & Last Season Stats: Provide the win-loss record and at least \
         3-4 key team statistics (e.g., Points Per Game, Yards Per Game, ERA, etc., as \
         relevant to the sport) for both the current season and the most recently completed \
         previous season.\n\
         3. Player Information:\n\
         - Starting Lineup: The typical starting lineup for the team.\n\
         - Full Roster: A list of the current active players.\n\
         - Injury Report: Any players currently on the injury list, their status, and \
         details. If none, provide an empty list.\n\
         4. Recent Games: A list of the team's last 5-7 games, including the opponent, the \
         final score, and the result (W or L).\n\n\
         Structure your entire response as a single, valid JSON object. Do not include any \
         markdown formatting or other text. The object must exactly match this structure:\n\
         {{\n\
           \"teamName\": \"Boston Celtics\",\n\
           \"currentSeason\": {{\n\
             \"season\": \"2023-2024\",\n\
             \"wins\": 64,\n\
             \"losses\": 18,\n\
             \"keyStats\": {{\n\
               \"Points Per Game\": \"120.6\",\n\
               \"Rebounds Per Game\": \"46.3\",\n\
               \"Assists Per Game\": \"26.9\"\n\
             }}\n\
           }},\n\
           \"lastSeason\": {{\n\
             \"season\": \"2022-2023\",\n\
             \"wins\": 57,\n\
             \"losses\": 25,\n\
             \"keyStats\": {{\n\
               \"Points Per Game\": \"117.9\",\n\
               \"Rebounds Per Game\": \"45.3\",\n\
               \"Assists Per Game\": \"26.7\"\n\
             }}\n\
           }},\n\
           \"startingLineup\": [\n\
             {{ \"name\": \"Jrue Holiday\", \"position\": \"PG\" }},\n\
             {{ \"name\": \"Jayson Tatum\", \"position\": \"PF\" }}\n\
           ],\n\
           \"fullRoster\": [\n\
             {{ \"name\": \"Jrue Holiday\", \"position\": \"PG\" }},\n\
             {{ \"name\": \"Derrick White\", \"position\": \"SG\" }}\n\
           ],\n\
           \"injuryReport\": [\n\
             {{ \"playerName\": \"Kristaps Porzingis\", \"status\": \"Out\", \"details\": \
         \"Right soleus strain\" }}\n\
           ],\n\
           \"recentGames\": [\n\
             {{ \"opponent\": \"Dallas Mavericks\", \"score\": \"106-88\", \"result\": \"W\" }}\n\
           ]\n\
         }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filter_names_exactly_the_seven_leagues() {
        let prompt = todays_games(SportFilter::All);
        for league in [
            "NBA",
            "WNBA",
            "NCAA Basketball",
            "NFL",
            "NCAA Football",
            "MLB",
            "NHL",
        ] {
            assert!(prompt.contains(league), "missing league {league}");
        }
        assert!(!prompt.contains("Premier League"));
    }

    #[test]
    fn hockey_filter_uses_only_the_nhl_clause() {
        let prompt = todays_games(SportFilter::Hockey);
        assert!(prompt.contains("from the NHL"));
        assert!(!prompt.contains("NBA"));
        assert!(!prompt.contains("MLB"));
        assert!(!prompt.contains("NFL"));
    }

    #[test]
    fn games_prompt_declares_the_line_format() {
        let prompt = todays_games(SportFilter::Basketball);
        assert!(prompt.contains("Team A vs Team B (Sport) [YYYY-MM-DDTHH:MM:SSZ]"));
    }

    #[test]
    fn matchup_prompt_embeds_the_query_and_empty_market_fallback() {
        let prompt = matchup_analysis("Lakers vs Nuggets");
        assert!(prompt.contains("Matchup: \"Lakers vs Nuggets\""));
        assert!(prompt.contains("\"spread\": {}"));
        assert!(prompt.contains("minimum of 10"));
    }

    #[test]
    fn stats_prompt_embeds_the_team_and_restricts_leagues() {
        let prompt = team_stats("Boston Celtics");
        assert!(prompt.contains("Team: \"Boston Celtics\""));
        assert!(prompt.contains("do not provide data"));
        assert!(prompt.contains("\"startingLineup\""));
    }

    #[test]
    fn sport_filter_display_matches_cache_key_expectations() {
        assert_eq!(SportFilter::All.to_string(), "All");
        assert_eq!(SportFilter::Hockey.to_string(), "Hockey");
    }
}
