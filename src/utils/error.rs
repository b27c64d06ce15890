use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No team matches filter '{filter}'")]
    TeamNotFound { filter: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::Http(_) | RosterError::HttpStatus { .. } => ErrorCategory::Network,
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::MissingConfigError { .. }
            | RosterError::TeamNotFound { .. } => ErrorCategory::Configuration,
            RosterError::CsvError(_)
            | RosterError::SerializationError(_)
            | RosterError::ProcessingError { .. } => ErrorCategory::Data,
            RosterError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤重新執行即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RosterError::Http(_) => {
                "Check network connectivity and the league base_url, then run the load again".to_string()
            }
            RosterError::HttpStatus { status, .. } if *status >= 500 => {
                "The league data source is having trouble; try again later".to_string()
            }
            RosterError::HttpStatus { .. } => {
                "Verify the league base_url and season identifier".to_string()
            }
            RosterError::TeamNotFound { .. } => {
                "Use --team all, a numeric team id or a team abbreviation".to_string()
            }
            RosterError::MissingConfigError { .. } => {
                "Set the referenced environment variable or replace the placeholder in the TOML file".to_string()
            }
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration and command line flags".to_string()
            }
            RosterError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            RosterError::CsvError(_)
            | RosterError::SerializationError(_)
            | RosterError::ProcessingError { .. } => {
                "Run with --verbose to inspect the data that failed to process".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the league data source: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Could not process roster data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
