use crate::core::{Player, RosterLoad, TeamRoster};
use crate::utils::error::{Result, RosterError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt::Write as _;

/// Groups players under their team (load order) and sorts each roster by
/// descending rating, then name.
pub fn group_by_team(roster: &RosterLoad) -> Vec<TeamRoster> {
    roster
        .teams
        .iter()
        .map(|team| {
            let mut players: Vec<Player> = roster
                .players
                .iter()
                .filter(|p| p.team_id == team.id)
                .cloned()
                .collect();
            players.sort_by(|a, b| {
                Reverse(a.rating)
                    .cmp(&Reverse(b.rating))
                    .then_with(|| a.name.cmp(&b.name))
            });
            TeamRoster {
                team: team.clone(),
                players,
            }
        })
        .collect()
}

#[derive(Serialize)]
struct CsvRow<'a> {
    team: &'a str,
    abbreviation: &'a str,
    player_id: u64,
    name: &'a str,
    jersey_number: &'a str,
    position: &'a str,
    goals: u32,
    assists: u32,
    points: u32,
    shots: u32,
    games_played: u32,
    rating: Option<u8>,
    fantasy_rank: Option<u32>,
}

pub fn to_csv(groups: &[TeamRoster]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for group in groups {
        for player in &group.players {
            writer.serialize(CsvRow {
                team: &group.team.name,
                abbreviation: &group.team.abbreviation,
                player_id: player.id,
                name: &player.name,
                jersey_number: player.jersey_number.as_deref().unwrap_or(""),
                position: &player.position,
                goals: player.stats.goals,
                assists: player.stats.assists,
                points: player.stats.points,
                shots: player.stats.shots,
                games_played: player.stats.games_played,
                rating: player.rating,
                fantasy_rank: player.fantasy_rank,
            })?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| RosterError::ProcessingError {
        message: format!("CSV flush failed: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| RosterError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

#[derive(Serialize)]
struct RosterDocument<'a> {
    generated_at: DateTime<Utc>,
    player_count: usize,
    ranked_players: usize,
    skipped_teams: usize,
    degraded_stats: usize,
    teams: &'a [TeamRoster],
}

pub fn to_json(roster: &RosterLoad, groups: &[TeamRoster]) -> Result<String> {
    let document = RosterDocument {
        generated_at: roster.generated_at,
        player_count: roster.players.len(),
        ranked_players: roster.ranked_players,
        skipped_teams: roster.skipped_teams,
        degraded_stats: roster.degraded_stats,
        teams: groups,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// 終端機用的純文字表格
pub fn render_table(groups: &[TeamRoster]) -> String {
    let mut out = String::new();

    for group in groups {
        let _ = writeln!(
            out,
            "\n{} ({}) - {} players",
            group.team.name,
            group.team.abbreviation,
            group.players.len()
        );
        let _ = writeln!(
            out,
            "{:>4}  {:<26} {:>3} {:>4} {:>4} {:>4} {:>5} {:>6} {:>5}",
            "#", "Name", "Pos", "G", "A", "P", "SOG", "Rating", "Rank"
        );

        for player in &group.players {
            let _ = writeln!(
                out,
                "{:>4}  {:<26} {:>3} {:>4} {:>4} {:>4} {:>5} {:>6} {:>5}",
                player.jersey_number.as_deref().unwrap_or("-"),
                player.name,
                player.position,
                player.stats.goals,
                player.stats.assists,
                player.stats.points,
                player.stats.shots,
                player
                    .rating
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                player
                    .fantasy_rank
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
    }

    out
}
