use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;

use gmb_ranker::api::create_router;
use gmb_ranker::app::App;
use gmb_ranker::client::HttpRankingClient;
use gmb_ranker::config::Config;
use gmb_ranker::data_models::Query;
use gmb_ranker::render;
use gmb_ranker::views::View;

#[derive(Parser)]
#[command(name = "gmb-ranker", version, about = "Check a business's local search ranking")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query the scrape backend and report where the business ranks
    Check {
        #[arg(short, long, default_value = "")]
        keyword: String,
        #[arg(short, long, default_value = "")]
        location: String,
        #[arg(short, long, default_value = "")]
        business: String,
    },
    /// Show a panel: dashboard, locations, reports, about or settings
    View { name: View },
    /// List the configured locations
    Locations,
    /// Show the report history
    Reports,
    /// Re-run a report from the history
    Rerun { id: String },
    About,
    /// Show the effective configuration
    Settings,
    /// Serve the dashboard API over HTTP
    Serve {
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    // Also captures records from the `log` facade used by the library.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .init();

    let client = HttpRankingClient::from_config(&config).context("failed to build HTTP client")?;
    let app = App::from_config(client, &config)?;

    match cli.command {
        Command::Check {
            keyword,
            location,
            business,
        } => {
            let snapshot = app.check(&Query::new(keyword, location, business)).await;
            print!("{}", render::render_dashboard(&snapshot));
        }
        Command::View { name } => print!("{}", app.show(name).await),
        Command::Locations => print!("{}", app.show(View::Locations).await),
        Command::Reports => print!("{}", app.show(View::Reports).await),
        Command::Rerun { id } => {
            let snapshot = app.rerun(&id).await?;
            print!("{}", render::render_dashboard(&snapshot));
        }
        Command::About => print!("{}", app.show(View::About).await),
        Command::Settings => print!("{}", app.show(View::Settings).await),
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(config.bind_addr);
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!("dashboard API listening on http://{addr}");
            axum::serve(listener, create_router(app)).await?;
        }
    }
    Ok(())
}
