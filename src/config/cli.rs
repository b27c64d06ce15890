use crate::config::toml_config::TomlConfig;
use crate::domain::model::LoadRequest;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "roster-rating")]
#[command(about = "Load league rosters and rate every player on a 0-100 scale")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Team to load: "all", a numeric team id or an abbreviation
    #[arg(short, long, default_value = "all")]
    pub team: String,

    /// URL of an external ranking payload
    #[arg(long)]
    pub rankings_url: Option<String>,

    /// Season identifier, e.g. 20232024
    #[arg(long)]
    pub season: Option<String>,

    /// League API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    /// Export formats (csv, json)
    #[arg(long = "format", value_delimiter = ',')]
    pub formats: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Show the resolved configuration without fetching anything")]
    pub dry_run: bool,
}

impl CliConfig {
    /// 讀取 TOML（若有）再套用命令列覆蓋
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(season) = &self.season {
            config.league.season = season.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.league.base_url = base_url.clone();
        }
        if let Some(url) = &self.rankings_url {
            config.rankings.url = Some(url.clone());
        }
        if let Some(output_path) = &self.output_path {
            config.load.output_path = output_path.clone();
        }
        if !self.formats.is_empty() {
            config.load.output_formats = self.formats.clone();
        }

        Ok(config)
    }

    pub fn load_request(&self, config: &TomlConfig) -> LoadRequest {
        LoadRequest {
            team_filter: self.team.parse().unwrap_or_default(),
            rankings_url: config.rankings.url.clone(),
        }
    }
}
