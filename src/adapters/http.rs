use crate::config::toml_config::LeagueConfig;
use crate::core::decode::{decode_roster, decode_season_stats, decode_teams};
use crate::domain::model::{Player, PlayerId, SeasonStats, Team};
use crate::domain::ports::{LeagueSource, RankingSource};
use crate::utils::error::{Result, RosterError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("roster-rating/", env!("CARGO_PKG_VERSION"));

fn build_client(timeout_seconds: u64, user_agent: Option<&str>, headers: HeaderMap) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// GET 並解析 JSON；非 2xx 視為錯誤
async fn get_json(client: &Client, url: &str, query: &[(&str, &str)]) -> Result<serde_json::Value> {
    tracing::debug!("📡 GET {}", url);
    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RosterError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.json().await?)
}

/// League endpoints served as JSON under a common base URL.
pub struct HttpLeagueSource {
    base_url: String,
    client: Client,
}

impl HttpLeagueSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&LeagueConfig {
            base_url: base_url.into(),
            ..LeagueConfig::default()
        })
    }

    pub fn from_config(config: &LeagueConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                RosterError::InvalidConfigValueError {
                    field: "league.headers".to_string(),
                    value: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                RosterError::InvalidConfigValueError {
                    field: format!("league.headers.{}", key),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: build_client(config.timeout_seconds, config.user_agent.as_deref(), headers)?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl LeagueSource for HttpLeagueSource {
    async fn fetch_teams(&self) -> Result<Vec<Team>> {
        let body = get_json(&self.client, &self.url("teams"), &[]).await?;
        Ok(decode_teams(&body))
    }

    async fn fetch_roster(&self, team: &Team) -> Result<Vec<Player>> {
        let url = self.url(&format!("teams/{}/roster", team.id));
        let body = get_json(&self.client, &url, &[]).await?;
        Ok(decode_roster(&body, team.id))
    }

    async fn fetch_season_stats(&self, player_id: PlayerId, season: &str) -> Result<SeasonStats> {
        let url = self.url(&format!("people/{}/stats", player_id));
        let body = get_json(
            &self.client,
            &url,
            &[("stats", "statsSingleSeason"), ("season", season)],
        )
        .await?;
        Ok(decode_season_stats(&body))
    }
}

pub struct HttpRankingSource {
    client: Client,
}

impl HttpRankingSource {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds, None, HeaderMap::new())?,
        })
    }
}

#[async_trait]
impl RankingSource for HttpRankingSource {
    async fn fetch_rankings(&self, url: &str) -> Result<serde_json::Value> {
        get_json(&self.client, url, &[]).await
    }
}
