use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use profile_enricher::{Commands, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "profile-enricher")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON log records for log aggregation
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use the deterministic local embedder as the primary provider
    #[arg(long, global = true)]
    mock_embeddings: bool,

    /// Store profiles in memory instead of Supabase (dry run)
    #[arg(long, global = true)]
    memory_storage: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs)?;

    let config = ContainerConfig::from_env()
        .with_mock_embeddings(cli.mock_embeddings)
        .with_memory_storage(cli.memory_storage);
    debug!(
        "Primary configured: {}, fallback configured: {}",
        config.gemini_api_key.is_some() || config.mock_embeddings,
        config.openai_api_key.is_some()
    );

    let router = Router::new(&config);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn init_tracing(verbose: bool, json: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().flatten_event(true).finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
