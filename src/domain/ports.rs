use crate::domain::model::{
    ExtractedRoster, LoadRequest, Player, PlayerId, SeasonStats, Team, TransformResult,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn league_base_url(&self) -> &str;
    fn season(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn rankings_url(&self) -> Option<&str>;
}

/// Read-only league data endpoints.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn fetch_teams(&self) -> Result<Vec<Team>>;
    async fn fetch_roster(&self, team: &Team) -> Result<Vec<Player>>;
    async fn fetch_season_stats(&self, player_id: PlayerId, season: &str) -> Result<SeasonStats>;
}

/// 外部排名來源，回傳未經解析的 JSON
#[async_trait]
pub trait RankingSource: Send + Sync {
    async fn fetch_rankings(&self, url: &str) -> Result<serde_json::Value>;
}

/// Receives human-readable status lines while a load runs.
pub trait ProgressSink: Send + Sync {
    fn report(&self, status: &str);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, request: &LoadRequest) -> Result<ExtractedRoster>;
    async fn transform(&self, data: ExtractedRoster, request: &LoadRequest)
        -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<Vec<String>>;
    fn progress(&self) -> &dyn ProgressSink;
}
