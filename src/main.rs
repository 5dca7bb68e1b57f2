use clap::Parser;
use journal_risk::cli::{Cli, Commands};
use journal_risk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _telemetry = journal_risk::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Pnl(args) => args.execute()?,
        Commands::Metrics(args) => args.execute()?,
        Commands::Score(args) => args.execute()?,
        Commands::Insights(args) => args.execute(&config.insights)?,
        Commands::Evaluate(args) => args.execute(&config.policy).await?,
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Logging: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            );
            println!("  Insights: {} day window", config.insights.period_days);
            println!(
                "  Policy: manifests from {}, timeout {}ms, environment {:?}",
                config
                    .policy
                    .manifest_base_url
                    .as_deref()
                    .unwrap_or("<none, default manifest>"),
                config.policy.fetch_timeout_ms,
                config.policy.environment
            );
        }
    }

    Ok(())
}
