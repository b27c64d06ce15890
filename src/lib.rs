pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{
    http::{HttpLeagueSource, HttpRankingSource},
    progress::{ChannelProgress, NoopProgress, TracingProgress},
    storage::LocalStorage,
};
pub use crate::core::{
    engine::RosterEngine,
    pipeline::RosterPipeline,
    rating::{compute_ratings, compute_ratings_with, RatingWeights},
};
pub use crate::domain::model::{
    ExternalRankings, LoadRequest, Player, RosterLoad, RunOutput, SeasonStats, Team, TeamFilter,
    TeamRoster,
};
pub use crate::utils::error::{Result, RosterError};
