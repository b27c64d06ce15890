use clap::Parser;
use roster_rating::core::export::{group_by_team, render_table};
use roster_rating::utils::error::ErrorSeverity;
use roster_rating::utils::{logger, validation::Validate};
use roster_rating::{
    CliConfig, HttpLeagueSource, HttpRankingSource, LocalStorage, RosterEngine, RosterPipeline,
    TomlConfig, TracingProgress,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting roster-rating CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let request = cli.load_request(&config);

    if cli.dry_run {
        display_config_summary(&config, &request);
        tracing::info!("🔍 DRY RUN MODE - nothing fetched");
        return Ok(());
    }

    let league = HttpLeagueSource::from_config(&config.league)?;
    let rankings = HttpRankingSource::new(config.league.timeout_seconds)?;
    let storage = LocalStorage::new(config.load.output_path.clone());
    let weights = config.rating;

    let pipeline = RosterPipeline::new(
        storage,
        config,
        Box::new(league),
        Box::new(rankings),
        Arc::new(TracingProgress),
    )
    .with_weights(weights);
    let engine = RosterEngine::new(pipeline);

    match engine.run(&request).await {
        Ok(output) => {
            println!("{}", render_table(&group_by_team(&output.roster)));
            for path in &output.output_files {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Roster load failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, request: &roster_rating::LoadRequest) {
    println!("League API:    {}", config.league.base_url);
    println!("Season:        {}", config.league.season);
    println!("Team filter:   {}", request.team_filter);
    println!(
        "Rankings:      {}",
        request.rankings_url.as_deref().unwrap_or("(none)")
    );
    println!(
        "Weights:       fantasy {:.2} / points {:.2} / shots {:.2} (x{})",
        config.rating.fantasy, config.rating.points, config.rating.shots, config.rating.scale
    );
    println!(
        "Output:        {} [{}]",
        config.load.output_path,
        config.load.output_formats.join(", ")
    );
}
