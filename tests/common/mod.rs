#![allow(dead_code)]

use httpmock::prelude::*;
use roster_rating::TomlConfig;
use serde_json::json;

pub const SEASON: &str = "20232024";

/// Two teams: Toronto (three skaters) and Montreal (two skaters).
pub fn mock_league(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/teams");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "teams": [
                    {"id": 10, "name": "Toronto Maple Leafs", "abbreviation": "TOR"},
                    {"id": 8, "name": "Montréal Canadiens", "abbreviation": "MTL"}
                ]
            }));
    });

    mock_roster(
        server,
        10,
        json!([
            [8479318, "Auston Matthews", "34", "C"],
            [8478483, "Mitch Marner", "16", "R"],
            [8477939, "William Nylander", "88", "R"]
        ]),
    );
    mock_roster(
        server,
        8,
        json!([
            [8480018, "Nick Suzuki", "14", "C"],
            [8481540, "Cole Caufield", "22", "R"]
        ]),
    );

    for (id, goals, assists, shots) in [
        (8479318u64, 69u32, 38u32, 368u32),
        (8478483, 26, 59, 195),
        (8477939, 40, 58, 290),
        (8480018, 33, 44, 222),
        (8481540, 28, 37, 285),
    ] {
        mock_stats(server, id, goals, assists, shots);
    }
}

pub fn mock_roster(server: &MockServer, team_id: u64, players: serde_json::Value) {
    let roster: Vec<serde_json::Value> = players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            json!({
                "person": {"id": p[0], "fullName": p[1]},
                "jerseyNumber": p[2],
                "position": {"code": p[3]}
            })
        })
        .collect();

    server.mock(|when, then| {
        when.method(GET).path(format!("/api/v1/teams/{}/roster", team_id));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "roster": roster }));
    });
}

pub fn mock_stats(server: &MockServer, player_id: u64, goals: u32, assists: u32, shots: u32) {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/people/{}/stats", player_id))
            .query_param("stats", "statsSingleSeason")
            .query_param("season", SEASON);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "stats": [{
                    "splits": [{
                        "season": SEASON,
                        "stat": {
                            "goals": goals,
                            "assists": assists,
                            "points": goals + assists,
                            "shots": shots,
                            "games": 82
                        }
                    }]
                }]
            }));
    });
}

pub fn config_for(server: &MockServer, output_path: &str) -> TomlConfig {
    let mut config = TomlConfig::default();
    config.league.base_url = server.url("/api/v1");
    config.league.season = SEASON.to_string();
    config.league.timeout_seconds = 5;
    config.load.output_path = output_path.to_string();
    config
}
