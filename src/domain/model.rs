use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub type PlayerId = u64;
pub type TeamId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub shots: u32,
    pub games_played: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub abbreviation: String,
}

/// 名單上的一名球員；`rating` 在評分前為 `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub jersey_number: Option<String>,
    pub position: String,
    pub team_id: TeamId,
    pub stats: SeasonStats,
    pub rating: Option<u8>,
    pub fantasy_rank: Option<u32>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, team_id: TeamId) -> Self {
        Self {
            id,
            name: name.into(),
            jersey_number: None,
            position: String::new(),
            team_id,
            stats: SeasonStats::default(),
            rating: None,
            fantasy_rank: None,
        }
    }

    pub fn with_stats(mut self, stats: SeasonStats) -> Self {
        self.stats = stats;
        self
    }
}

/// Player id → external rank (1 is best). Ranks are always ≥ 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalRankings {
    ranks: HashMap<PlayerId, u32>,
}

impl ExternalRankings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 排名 0 不合法，直接忽略
    pub fn insert(&mut self, player_id: PlayerId, rank: u32) -> bool {
        if rank == 0 {
            return false;
        }
        self.ranks.insert(player_id, rank);
        true
    }

    pub fn get(&self, player_id: PlayerId) -> Option<u32> {
        self.ranks.get(&player_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl FromIterator<(PlayerId, u32)> for ExternalRankings {
    fn from_iter<I: IntoIterator<Item = (PlayerId, u32)>>(iter: I) -> Self {
        let mut rankings = ExternalRankings::new();
        for (player_id, rank) in iter {
            rankings.insert(player_id, rank);
        }
        rankings
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TeamFilter {
    #[default]
    All,
    Id(TeamId),
    Abbreviation(String),
}

impl TeamFilter {
    pub fn matches(&self, team: &Team) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Id(id) => team.id == *id,
            TeamFilter::Abbreviation(abbr) => team.abbreviation.eq_ignore_ascii_case(abbr),
        }
    }
}

impl FromStr for TeamFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(TeamFilter::All);
        }
        Ok(match s.parse::<TeamId>() {
            Ok(id) => TeamFilter::Id(id),
            Err(_) => TeamFilter::Abbreviation(s.to_string()),
        })
    }
}

impl fmt::Display for TeamFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamFilter::All => write!(f, "all"),
            TeamFilter::Id(id) => write!(f, "{}", id),
            TeamFilter::Abbreviation(abbr) => write!(f, "{}", abbr),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    pub team_filter: TeamFilter,
    pub rankings_url: Option<String>,
}

impl LoadRequest {
    pub fn new(team_filter: TeamFilter) -> Self {
        Self {
            team_filter,
            rankings_url: None,
        }
    }

    pub fn with_rankings_url(mut self, url: impl Into<String>) -> Self {
        self.rankings_url = Some(url.into());
        self
    }
}

/// Loader 輸出：球員依隊伍順序、再依名單順序排列
#[derive(Debug, Clone, Default)]
pub struct ExtractedRoster {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub skipped_teams: usize,
    pub degraded_stats: usize,
}

/// Result of one complete load. Replaced wholesale by the next load.
#[derive(Debug, Clone, Serialize)]
pub struct RosterLoad {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub ranked_players: usize,
    pub skipped_teams: usize,
    pub degraded_stats: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamRoster {
    pub team: Team,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub roster: RosterLoad,
    pub csv_output: String,
    pub json_output: String,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub roster: RosterLoad,
    pub output_files: Vec<String>,
}
