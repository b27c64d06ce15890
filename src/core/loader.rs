use crate::core::{ExtractedRoster, LeagueSource, ProgressSink, Team, TeamFilter};
use crate::utils::error::{Result, RosterError};

/// Walks teams → rosters → per-player stats, one request at a time.
pub struct RosterLoader<'a> {
    source: &'a dyn LeagueSource,
    progress: &'a dyn ProgressSink,
    season: &'a str,
}

impl<'a> RosterLoader<'a> {
    pub fn new(source: &'a dyn LeagueSource, progress: &'a dyn ProgressSink, season: &'a str) -> Self {
        Self {
            source,
            progress,
            season,
        }
    }

    /// 取得隊伍清單失敗時整個載入中止，其餘錯誤皆降級處理
    pub async fn resolve_teams(&self, filter: &TeamFilter) -> Result<Vec<Team>> {
        self.progress.report("Loading teams...");
        let teams = self.source.fetch_teams().await?;
        tracing::debug!("Fetched {} teams", teams.len());

        let selected: Vec<Team> = teams.into_iter().filter(|t| filter.matches(t)).collect();
        if selected.is_empty() && *filter != TeamFilter::All {
            return Err(RosterError::TeamNotFound {
                filter: filter.to_string(),
            });
        }
        Ok(selected)
    }

    pub async fn load(&self, filter: &TeamFilter) -> Result<ExtractedRoster> {
        let teams = self.resolve_teams(filter).await?;
        let mut roster = ExtractedRoster::default();
        let team_count = teams.len();

        for (team_index, team) in teams.into_iter().enumerate() {
            self.progress.report(&format!(
                "Loading roster for {} ({}/{})...",
                team.name,
                team_index + 1,
                team_count
            ));

            let players = match self.source.fetch_roster(&team).await {
                Ok(players) => players,
                Err(e) => {
                    tracing::warn!("⚠️ Skipping team {} ({}): {}", team.name, team.id, e);
                    self.progress
                        .report(&format!("Skipped {}: roster unavailable", team.name));
                    roster.skipped_teams += 1;
                    continue;
                }
            };

            let player_count = players.len();
            for (player_index, mut player) in players.into_iter().enumerate() {
                self.progress.report(&format!(
                    "Loading stats for {} ({}/{})...",
                    player.name,
                    player_index + 1,
                    player_count
                ));

                player.stats = match self.source.fetch_season_stats(player.id, self.season).await {
                    Ok(stats) => stats,
                    Err(e) => {
                        tracing::warn!(
                            "⚠️ Stats unavailable for {} ({}), using zeros: {}",
                            player.name,
                            player.id,
                            e
                        );
                        roster.degraded_stats += 1;
                        Default::default()
                    }
                };
                roster.players.push(player);
            }

            tracing::info!("📥 {}: {} players loaded", team.name, player_count);
            roster.teams.push(team);
        }

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Player, PlayerId, SeasonStats, TeamId};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeLeague {
        teams: Vec<Team>,
        rosters: HashMap<TeamId, Vec<Player>>,
        stats: HashMap<PlayerId, SeasonStats>,
        failing_rosters: HashSet<TeamId>,
        fail_teams: bool,
    }

    fn team(id: TeamId, name: &str, abbreviation: &str) -> Team {
        Team {
            id,
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
        }
    }

    fn unavailable(what: &str) -> RosterError {
        RosterError::HttpStatus {
            url: format!("http://league.test/{}", what),
            status: 503,
        }
    }

    #[async_trait::async_trait]
    impl LeagueSource for FakeLeague {
        async fn fetch_teams(&self) -> Result<Vec<Team>> {
            if self.fail_teams {
                return Err(unavailable("teams"));
            }
            Ok(self.teams.clone())
        }

        async fn fetch_roster(&self, team: &Team) -> Result<Vec<Player>> {
            if self.failing_rosters.contains(&team.id) {
                return Err(unavailable("roster"));
            }
            Ok(self.rosters.get(&team.id).cloned().unwrap_or_default())
        }

        async fn fetch_season_stats(&self, player_id: PlayerId, _season: &str) -> Result<SeasonStats> {
            self.stats
                .get(&player_id)
                .copied()
                .ok_or_else(|| unavailable("stats"))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        lines: Mutex<Vec<String>>,
    }

    impl ProgressSink for RecordingProgress {
        fn report(&self, status: &str) {
            self.lines.lock().unwrap().push(status.to_string());
        }
    }

    fn league() -> FakeLeague {
        let mut league = FakeLeague {
            teams: vec![team(10, "Toronto", "TOR"), team(8, "Montreal", "MTL")],
            ..FakeLeague::default()
        };
        league
            .rosters
            .insert(10, vec![Player::new(1, "A", 10), Player::new(2, "B", 10)]);
        league.rosters.insert(8, vec![Player::new(3, "C", 8)]);
        for (id, points) in [(1, 30), (2, 12), (3, 44)] {
            league.stats.insert(
                id,
                SeasonStats {
                    points,
                    ..SeasonStats::default()
                },
            );
        }
        league
    }

    #[tokio::test]
    async fn test_load_all_teams_in_order() {
        let league = league();
        let progress = RecordingProgress::default();
        let loader = RosterLoader::new(&league, &progress, "20232024");

        let roster = loader.load(&TeamFilter::All).await.unwrap();

        let ids: Vec<_> = roster.players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(roster.teams.len(), 2);
        assert_eq!(roster.players[2].stats.points, 44);
        assert_eq!(roster.skipped_teams, 0);

        let lines = progress.lines.lock().unwrap();
        assert_eq!(lines[0], "Loading teams...");
        assert!(lines.iter().any(|l| l == "Loading roster for Montreal (2/2)..."));
    }

    #[tokio::test]
    async fn test_single_team_filter() {
        let league = league();
        let progress = RecordingProgress::default();
        let loader = RosterLoader::new(&league, &progress, "20232024");

        let roster = loader
            .load(&TeamFilter::Abbreviation("mtl".to_string()))
            .await
            .unwrap();

        assert_eq!(roster.teams.len(), 1);
        assert_eq!(roster.players.len(), 1);
        assert_eq!(roster.players[0].team_id, 8);
    }

    #[tokio::test]
    async fn test_unknown_team_is_an_error() {
        let league = league();
        let progress = RecordingProgress::default();
        let loader = RosterLoader::new(&league, &progress, "20232024");

        let result = loader.load(&TeamFilter::Id(99)).await;

        assert!(matches!(result, Err(RosterError::TeamNotFound { .. })));
    }

    #[tokio::test]
    async fn test_roster_failure_skips_only_that_team() {
        let mut league = league();
        league.failing_rosters.insert(10);
        let progress = RecordingProgress::default();
        let loader = RosterLoader::new(&league, &progress, "20232024");

        let roster = loader.load(&TeamFilter::All).await.unwrap();

        assert_eq!(roster.skipped_teams, 1);
        assert_eq!(roster.teams.len(), 1);
        assert_eq!(roster.players.len(), 1);
        assert_eq!(roster.players[0].id, 3);
    }

    #[tokio::test]
    async fn test_stats_failure_degrades_to_zero() {
        let mut league = league();
        league.stats.remove(&2);
        let progress = RecordingProgress::default();
        let loader = RosterLoader::new(&league, &progress, "20232024");

        let roster = loader.load(&TeamFilter::All).await.unwrap();

        assert_eq!(roster.players.len(), 3);
        assert_eq!(roster.players[1].stats, SeasonStats::default());
        assert_eq!(roster.degraded_stats, 1);
    }

    #[tokio::test]
    async fn test_team_list_failure_aborts() {
        let league = FakeLeague {
            fail_teams: true,
            ..FakeLeague::default()
        };
        let progress = RecordingProgress::default();
        let loader = RosterLoader::new(&league, &progress, "20232024");

        assert!(loader.load(&TeamFilter::All).await.is_err());
    }
}
