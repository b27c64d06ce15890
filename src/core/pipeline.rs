use crate::core::export::{group_by_team, to_csv, to_json};
use crate::core::loader::RosterLoader;
use crate::core::rankings::decode_rankings;
use crate::core::rating::{compute_ratings_with, RatingWeights};
use crate::core::{
    ConfigProvider, ExternalRankings, ExtractedRoster, LeagueSource, LoadRequest, Pipeline,
    ProgressSink, RankingSource, RosterLoad, Storage, TransformResult,
};
use crate::utils::error::Result;
use chrono::Utc;
use std::sync::Arc;

/// Extract = roster loader, transform = rankings + ratings, load = export files.
pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    league: Box<dyn LeagueSource>,
    rankings: Box<dyn RankingSource>,
    progress: Arc<dyn ProgressSink>,
    weights: RatingWeights,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(
        storage: S,
        config: C,
        league: Box<dyn LeagueSource>,
        rankings: Box<dyn RankingSource>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            storage,
            config,
            league,
            rankings,
            progress,
            weights: RatingWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: RatingWeights) -> Self {
        self.weights = weights;
        self
    }

    /// 取得外部排名；任何失敗都視為沒有排名
    async fn resolve_rankings(&self, request: &LoadRequest) -> Option<ExternalRankings> {
        let url = request
            .rankings_url
            .as_deref()
            .or_else(|| self.config.rankings_url())?;

        self.progress.report("Loading external rankings...");
        match self.rankings.fetch_rankings(url).await {
            Ok(payload) => decode_rankings(payload),
            Err(e) => {
                tracing::warn!("⚠️ Rankings unavailable from {}: {}", url, e);
                None
            }
        }
    }

    fn output_file(&self, format: &str) -> String {
        format!("roster.{}", format)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    async fn extract(&self, request: &LoadRequest) -> Result<ExtractedRoster> {
        tracing::debug!(
            "Loading rosters from {} (season {})",
            self.config.league_base_url(),
            self.config.season()
        );
        let loader = RosterLoader::new(
            self.league.as_ref(),
            self.progress.as_ref(),
            self.config.season(),
        );
        loader.load(&request.team_filter).await
    }

    async fn transform(
        &self,
        data: ExtractedRoster,
        request: &LoadRequest,
    ) -> Result<TransformResult> {
        let rankings = self.resolve_rankings(request).await;

        self.progress.report("Computing ratings...");
        let mut players = data.players;
        compute_ratings_with(&mut players, rankings.as_ref(), &self.weights);

        let roster = RosterLoad {
            ranked_players: players.iter().filter(|p| p.fantasy_rank.is_some()).count(),
            teams: data.teams,
            players,
            skipped_teams: data.skipped_teams,
            degraded_stats: data.degraded_stats,
            generated_at: Utc::now(),
        };

        let groups = group_by_team(&roster);
        let csv_output = to_csv(&groups)?;
        let json_output = to_json(&roster, &groups)?;

        Ok(TransformResult {
            roster,
            csv_output,
            json_output,
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for (index, format) in self.config.output_formats().iter().enumerate() {
            // 同一格式只寫一次
            if self.config.output_formats()[..index].contains(format) {
                continue;
            }

            let body = match format.as_str() {
                "csv" => &result.csv_output,
                "json" => &result.json_output,
                other => {
                    tracing::warn!("⚠️ Unknown output format '{}', skipping", other);
                    continue;
                }
            };

            let file_name = self.output_file(format);
            tracing::debug!("Writing {} ({} bytes) to storage", file_name, body.len());
            self.storage.write_file(&file_name, body.as_bytes()).await?;
            written.push(format!("{}/{}", self.config.output_path(), file_name));
        }

        Ok(written)
    }

    fn progress(&self) -> &dyn ProgressSink {
        self.progress.as_ref()
    }
}
