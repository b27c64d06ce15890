use crate::core::rating::RatingWeights;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{
    validate_allowed_values, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://statsapi.web.nhl.com/api/v1";
pub const DEFAULT_SEASON: &str = "20232024";
pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];
const ENV_VAR_PATTERN: &str = r"\$\{([^}]+)\}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub league: LeagueConfig,
    pub rankings: RankingsConfig,
    pub rating: RatingWeights,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub base_url: String,
    pub season: String,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
    pub headers: HashMap<String, String>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            season: DEFAULT_SEASON.to_string(),
            timeout_seconds: 30,
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingsConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            output_formats: OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEAGUE_API_KEY})，未設定者保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Self::env_var_regex()?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn env_var_regex() -> Result<Regex> {
        Regex::new(ENV_VAR_PATTERN).map_err(|e| RosterError::ConfigError {
            message: e.to_string(),
        })
    }

    /// 替換後仍留有 `${VAR}` 代表環境變數沒有設定
    fn check_env_resolved(field_name: &str, value: &str) -> Result<()> {
        let re = Self::env_var_regex()?;
        match re.captures(value) {
            Some(caps) => Err(RosterError::MissingConfigError {
                field: format!("{} (environment variable {})", field_name, &caps[1]),
            }),
            None => Ok(()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        Self::check_env_resolved("league.base_url", &self.league.base_url)?;
        for (name, value) in &self.league.headers {
            Self::check_env_resolved(&format!("league.headers.{}", name), value)?;
        }
        if let Some(url) = &self.rankings.url {
            Self::check_env_resolved("rankings.url", url)?;
        }

        validate_url("league.base_url", &self.league.base_url)?;
        validate_non_empty_string("league.season", &self.league.season)?;
        validate_positive_number("league.timeout_seconds", self.league.timeout_seconds, 1)?;

        if let Some(url) = &self.rankings.url {
            validate_url("rankings.url", url)?;
        }

        self.rating.validate()?;

        validate_path("load.output_path", &self.load.output_path)?;
        validate_allowed_values("load.output_formats", &self.load.output_formats, &OUTPUT_FORMATS)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn league_base_url(&self) -> &str {
        &self.league.base_url
    }

    fn season(&self) -> &str {
        &self.league.season
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn rankings_url(&self) -> Option<&str> {
        self.rankings.url.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[league]
base_url = "https://league.example.com/api/v1"
season = "20222023"
timeout_seconds = 10

[league.headers]
Accept = "application/json"

[rankings]
url = "https://rankings.example.com/top300.json"

[rating]
fantasy = 0.5
points = 0.3
shots = 0.2

[load]
output_path = "./test-output"
output_formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.league_base_url(), "https://league.example.com/api/v1");
        assert_eq!(config.season(), "20222023");
        assert_eq!(config.league.headers.get("Accept").unwrap(), "application/json");
        assert_eq!(config.rankings_url(), Some("https://rankings.example.com/top300.json"));
        assert_eq!(config.rating.fantasy, 0.5);
        assert_eq!(config.rating.scale, 110.0);
        assert_eq!(config.output_formats(), &["json".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.league_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.season(), DEFAULT_SEASON);
        assert_eq!(config.rankings_url(), None);
        assert_eq!(config.rating, RatingWeights::default());
        assert_eq!(config.output_formats().len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROSTER_TEST_RANKINGS_URL", "https://rank.test/list.json");

        let toml_content = r#"
[rankings]
url = "${ROSTER_TEST_RANKINGS_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.rankings_url(), Some("https://rank.test/list.json"));

        std::env::remove_var("ROSTER_TEST_RANKINGS_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[league]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_format =
            TomlConfig::from_toml_str("[load]\noutput_formats = [\"xlsx\"]\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_weights = TomlConfig::from_toml_str("[rating]\nfantasy = 0.9\n").unwrap();
        assert!(bad_weights.validate().is_err());

        let nan_weight = TomlConfig::from_toml_str("[rating]\nfantasy = nan\n").unwrap();
        assert!(nan_weight.rating.fantasy.is_nan());
        assert!(nan_weight.validate().is_err());

        let nan_scale = TomlConfig::from_toml_str("[rating]\nscale = nan\n").unwrap();
        assert!(nan_scale.validate().is_err());

        let repeated_format =
            TomlConfig::from_toml_str("[load]\noutput_formats = [\"csv\", \"csv\"]\n").unwrap();
        assert!(repeated_format.validate().is_err());
    }

    #[test]
    fn test_unset_env_var_is_missing_config() {
        std::env::remove_var("ROSTER_TEST_UNSET_TOKEN");

        let toml_content = r#"
[league.headers]
Authorization = "Bearer ${ROSTER_TEST_UNSET_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let result = config.validate();

        match result {
            Err(RosterError::MissingConfigError { field }) => {
                assert!(field.contains("league.headers.Authorization"));
                assert!(field.contains("ROSTER_TEST_UNSET_TOKEN"));
            }
            other => panic!("expected MissingConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = TomlConfig::from_toml_str("[league\nseason = ");
        assert!(matches!(
            result,
            Err(RosterError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[league]\nseason = \"20212022\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.season(), "20212022");
    }
}
