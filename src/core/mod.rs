pub mod decode;
pub mod engine;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod rankings;
pub mod rating;

pub use crate::domain::model::{
    ExternalRankings, ExtractedRoster, LoadRequest, Player, PlayerId, RosterLoad, RunOutput,
    SeasonStats, Team, TeamFilter, TeamId, TeamRoster, TransformResult,
};
pub use crate::domain::ports::{
    ConfigProvider, LeagueSource, Pipeline, ProgressSink, RankingSource, Storage,
};
pub use crate::utils::error::Result;
