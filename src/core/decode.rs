//! Lenient decoding of league JSON into fully defaulted records.
//!
//! The upstream shapes drift between seasons, so nothing here fails: a
//! missing or mistyped field falls back to its default and entries without
//! a usable id are dropped.

use crate::core::{Player, PlayerId, SeasonStats, Team, TeamId};
use serde_json::Value;

/// 接受數字或數字字串
pub fn lenient_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn lenient_count(value: Option<&Value>) -> u32 {
    value
        .and_then(|v| match v {
            // 統計值偶爾以浮點數出現，取整數部分
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        })
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

/// Either a bare array or an object wrapping the array under `key`.
fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    match value {
        Value::Array(items) => items,
        _ => value
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
    }
}

pub fn decode_teams(value: &Value) -> Vec<Team> {
    list(value, "teams")
        .iter()
        .filter_map(|item| {
            let id: TeamId = item.get("id").and_then(lenient_u64)?;
            let name = string_field(item, "name")
                .or_else(|| string_field(item, "teamName"))
                .unwrap_or("Unknown")
                .to_string();
            let abbreviation = string_field(item, "abbreviation")
                .or_else(|| string_field(item, "triCode"))
                .unwrap_or_default()
                .to_string();
            Some(Team {
                id,
                name,
                abbreviation,
            })
        })
        .collect()
}

pub fn decode_roster(value: &Value, team_id: TeamId) -> Vec<Player> {
    list(value, "roster")
        .iter()
        .filter_map(|entry| {
            // person 可能缺席，改讀外層欄位
            let person = entry.get("person").unwrap_or(entry);
            let id: PlayerId = person.get("id").and_then(lenient_u64)?;
            let name = string_field(person, "fullName")
                .or_else(|| string_field(person, "name"))
                .unwrap_or("Unknown")
                .to_string();

            let jersey_number = entry.get("jerseyNumber").and_then(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });

            let position = entry
                .get("position")
                .and_then(|p| match p {
                    Value::String(code) => Some(code.trim().to_string()),
                    other => string_field(other, "code")
                        .or_else(|| string_field(other, "abbreviation"))
                        .map(str::to_string),
                })
                .unwrap_or_default();

            let mut player = Player::new(id, name, team_id);
            player.jersey_number = jersey_number;
            player.position = position;
            Some(player)
        })
        .collect()
}

pub fn decode_season_stats(value: &Value) -> SeasonStats {
    let stat = value
        .get("stats")
        .and_then(Value::as_array)
        .and_then(|stats| stats.first())
        .and_then(|block| block.get("splits"))
        .and_then(Value::as_array)
        .and_then(|splits| splits.first())
        .and_then(|split| split.get("stat"));

    let Some(stat) = stat else {
        return SeasonStats::default();
    };

    SeasonStats {
        goals: lenient_count(stat.get("goals")),
        assists: lenient_count(stat.get("assists")),
        points: lenient_count(stat.get("points")),
        shots: lenient_count(stat.get("shots")),
        games_played: lenient_count(stat.get("games").or_else(|| stat.get("gamesPlayed"))),
    }
}
