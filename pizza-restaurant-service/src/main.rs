use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pizza_restaurant_service::config::{DatabaseConfig, ServeConfig};
use pizza_restaurant_service::{app, db, seed, AppState};

#[derive(Parser)]
#[command(version, about = "Restaurants, pizzas and their prices over HTTP")]
struct Cli {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending migrations and serve the HTTP API
    Serve(ServeConfig),
    /// Run pending migrations and exit
    Migrate,
    /// Replace all rows with the demo data set
    Seed,
}

async fn serve(
    pool: db::DbPool,
    config: &ServeConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = app(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!("Pizza restaurant service listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let pool = db::establish_pool(&cli.database.database_url, cli.database.pool_size)?;
    db::run_migrations(&mut *pool.get()?)?;

    match &cli.command {
        Commands::Serve(config) => serve(pool, config).await,
        Commands::Migrate => Ok(()),
        Commands::Seed => {
            seed::seed(&mut *pool.get()?)?;
            Ok(())
        }
    }
}
