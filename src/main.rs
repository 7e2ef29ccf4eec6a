use clap::Parser;
use smogon_contrib::cms_client::CmsClient;
use smogon_contrib::config::{Config, Overrides};
use smogon_contrib::errors::ScrapeError;
use smogon_contrib::report::{format_samples, format_stats_for_console, write_report};
use smogon_contrib::scraper::ContributionScraper;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Smogon Contribution Scraper
///
/// Downloads a user's analysis credits from the Smogon CMS and saves them as JSON.
#[derive(Debug, Parser)]
#[command(name = "smogon-contrib", version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
  SMOGON_SESSION         Your Smogon session cookie
  USER_ID                Default user ID to fetch

EXAMPLES:
  smogon-contrib --user 641532
  smogon-contrib --user 641532 --session \"your_cookie\" --output data.json
  smogon-contrib --user 641532 --output public/data/contributions.json")]
struct Cli {
    /// Smogon user ID (or set USER_ID)
    #[arg(short, long = "user", value_name = "ID")]
    user: Option<String>,

    /// Session cookie (or set SMOGON_SESSION)
    #[arg(short, long, value_name = "COOKIE")]
    session: Option<String>,

    /// Output file path [default: contributions.json]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Site root to fetch from
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Overrides {
            user_id: cli.user,
            session: cli.session,
            output: cli.output,
            base_url: cli.base_url,
            timeout_secs: cli.timeout,
        }
    }
}

/// Main entry point for the scraper.
///
/// Loads configuration, fetches and parses the CMS page, prints a summary and
/// writes the report. Exits with status 1 on any failure without writing output.
#[tokio::main]
async fn main() {
    // Logs go to stderr; the summary owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smogon_contrib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.into()).await {
        eprintln!("\nError: {:#}", e);
        if e
            .downcast_ref::<ScrapeError>()
            .is_some_and(ScrapeError::is_auth)
        {
            eprintln!("   Log in to Smogon again and refresh SMOGON_SESSION.");
        }
        std::process::exit(1);
    }
}

async fn run(overrides: Overrides) -> anyhow::Result<()> {
    let config = Config::load(overrides)?;
    tracing::info!("Configuration loaded successfully");

    println!("Smogon Contribution Scraper");
    println!("{}", "═".repeat(50));
    println!("Fetching data for user {}...", config.user_id);

    let client = CmsClient::new(
        config.base_url.clone(),
        config.session.clone(),
        config.user_agent.clone(),
        Some(config.timeout()),
    )?;
    let scraper = ContributionScraper::new(client);
    let report = scraper.fetch_contributions(&config.user_id).await?;

    write_report(&config.output, &report)?;

    println!("{}", format_stats_for_console(&report));
    println!("\nData saved to: {}", config.output.display());

    if !report.contributions.is_empty() {
        println!("\nSample Contributions:");
        println!("{}", format_samples(&report, 3));
    }

    Ok(())
}
