/// Chorus - collaborative playlist manager
use chorus_cli::{App, ChorusConfig, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ChorusConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing (stderr keeps stdout for command output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let pool = chorus_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    chorus_storage::run_migrations(&pool).await?;
    tracing::debug!("Database ready");

    let app = App::new(chorus_storage::SqliteStore::new(pool));
    let output = app.run(cli.user.as_deref(), cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
