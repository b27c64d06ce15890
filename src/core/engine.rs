use crate::core::{LoadRequest, Pipeline, RunOutput};
use crate::utils::error::Result;
use std::time::Instant;

fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub struct RosterEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RosterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 執行一次完整載入；失敗時送出終止狀態並回傳錯誤
    pub async fn run(&self, request: &LoadRequest) -> Result<RunOutput> {
        let started = Instant::now();
        tracing::info!("🚀 Starting roster load (team filter: {})", request.team_filter);

        match self.execute(request).await {
            Ok(output) => {
                let roster = &output.roster;
                self.pipeline.progress().report(&format!(
                    "Loaded {} from {}",
                    count_label(roster.players.len(), "player"),
                    count_label(roster.teams.len(), "team")
                ));
                tracing::info!(
                    "✅ Rated {} players ({} ranked, {} teams skipped, {} stat lookups degraded) in {:?}",
                    roster.players.len(),
                    roster.ranked_players,
                    roster.skipped_teams,
                    roster.degraded_stats,
                    started.elapsed()
                );
                Ok(output)
            }
            Err(e) => {
                self.pipeline
                    .progress()
                    .report(&format!("Error loading data: {}", e));
                tracing::error!("❌ Roster load failed after {:?}: {}", started.elapsed(), e);
                Err(e)
            }
        }
    }

    async fn execute(&self, request: &LoadRequest) -> Result<RunOutput> {
        // Extract
        let extracted = self.pipeline.extract(request).await?;
        tracing::info!(
            "📥 Extracted {} players from {} teams",
            extracted.players.len(),
            extracted.teams.len()
        );

        // Transform
        let result = self.pipeline.transform(extracted, request).await?;
        tracing::info!("🔄 Computed ratings for {} players", result.roster.players.len());

        // Load
        let output_files = self.pipeline.load(&result).await?;
        for path in &output_files {
            tracing::info!("📁 Output saved to: {}", path);
        }

        Ok(RunOutput {
            roster: result.roster,
            output_files,
        })
    }
}
