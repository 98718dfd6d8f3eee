use chrono::Local;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use review_dashboard::adapters::terminal::{
    render_admin_dashboard, render_nav, render_user_dashboard,
};
use review_dashboard::adapters::HttpReviewClient;
use review_dashboard::application::{App, RouteError, SubmissionError};
use review_dashboard::config::{AppConfig, ConfigError};
use review_dashboard::domain::foundation::Rating;
use review_dashboard::ports::ApiError;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a review and print the team's response
    Submit {
        /// Star rating from 1 to 5
        rating: Rating,

        /// Review text
        text: String,
    },
    /// Show the admin analytics dashboard
    Admin {
        /// Only show reviews with this rating
        #[arg(long)]
        rating: Option<Rating>,

        /// Only show reviews containing this text
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build review API client: {0}")]
    Client(#[from] ApiError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    init_tracing(&config.log_level);
    config.validate().map_err(ConfigError::from)?;

    let client = HttpReviewClient::new(config.api.client_config())?;
    info!(base_url = client.base_url(), "using review API");

    let mut app = App::new(Arc::new(client), config.dashboard.settings());

    match args.command {
        Command::Submit { rating, text } => {
            app.navigate("/").await?;
            let Some(dashboard) = app.user_dashboard() else {
                return Ok(());
            };
            dashboard.set_rating(rating).await;
            dashboard.set_review_text(text).await;
            let outcome = dashboard.submit().await;

            print!("{}", render_nav(&app.nav_links()));
            print!("{}", render_user_dashboard(&dashboard.view().await));
            outcome?;
        }
        Command::Admin {
            rating,
            search,
            page,
            watch,
        } => {
            app.navigate("/admin").await?;
            let Some(dashboard) = app.admin_dashboard() else {
                return Ok(());
            };
            if rating.is_some() {
                dashboard.set_rating_filter(rating).await;
            }
            if let Some(term) = search {
                dashboard.set_search_term(term).await;
            }
            if page > 1 {
                dashboard.go_to_page(page).await;
            }

            print!("{}", render_nav(&app.nav_links()));
            print!("{}", render_admin_dashboard(&dashboard.view().await, &Local));

            if watch {
                let interval = config.dashboard.poll_interval();
                loop {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {
                            info!("stopping admin dashboard");
                            break;
                        }
                        _ = tokio::time::sleep(interval) => {
                            // The dashboard's own poller has refreshed the snapshot.
                            print!("{}", render_admin_dashboard(&dashboard.view().await, &Local));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(default_directive: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
