use anyhow::Result;
use clap::{CommandFactory, Parser};
use magpie_browser::{LaunchOptions, Session};
use magpie_cli::commands;
use magpie_cli::commands::connect::Pacing;
use magpie_core::{Credentials, Error as ConfigError, VisitedLedger};
use magpie_scrape::ButtonTextPagination;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "magpie")]
#[command(author, version)]
#[command(
    about = "Collects profile links from LinkedIn search results and sends connection requests",
    long_about = "Magpie signs in to LinkedIn with a real browser, walks the search results for \
                  a keyword while appending every profile link it finds to an output file, and \
                  can work through a list of profile URLs sending connection requests, keeping a \
                  ledger of visited profiles so nobody is contacted twice."
)]
struct Cli {
    /// Your LinkedIn login email
    #[arg(long)]
    login: Option<String>,

    /// Your LinkedIn login password
    #[arg(long)]
    password: Option<String>,

    /// File with newline-separated credentials, in the form
    /// "login=your@email.com" then "password=yourSuperSecretPassword"
    #[arg(long, value_name = "FILE")]
    credentials_file: Option<PathBuf>,

    /// Keyword to search for - a job title, for example. Links to the people
    /// found are collected into the output file
    #[arg(long, value_name = "KEYWORD")]
    search: Option<String>,

    /// Number of search pages to collect. The default is high enough to mean
    /// "all the site will serve"
    #[arg(long, default_value_t = 200)]
    search_limit: u32,

    /// File with a newline-separated list of profile URLs to connect with
    #[arg(long, value_name = "FILE")]
    connect: Option<PathBuf>,

    /// File holding the newline-separated list of already-visited profile URLs
    #[arg(long, default_value = "visited.txt", value_name = "FILE")]
    visited_profiles: PathBuf,

    /// Output file the scraped profile links are appended to
    #[arg(long, default_value = "linked-loot.txt", value_name = "FILE")]
    output: PathBuf,

    /// Path to the Chrome/Chromium binary
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Run the browser without a visible window
    #[arg(long)]
    headless: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Credentials resolve before anything touches the network, so a bad
    // configuration exits through the usual argument-error path.
    let credentials = Credentials::resolve(
        cli.login.clone(),
        cli.password.clone(),
        cli.credentials_file.as_deref(),
    )
    .unwrap_or_else(|error| {
        Cli::command()
            .error(config_error_kind(&error), error.to_string())
            .exit()
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(&cli, credentials))
}

async fn run(cli: &Cli, credentials: Credentials) -> Result<()> {
    println!("🚀 Launching Chrome...");
    let session = Session::launch(LaunchOptions {
        chrome_path: cli.chrome_path.clone(),
        headless: cli.headless,
    })
    .await?;

    println!("Logging in");
    session
        .login(&credentials.login, &credentials.password)
        .await?;
    println!("Crawler has logged in");

    if let Some(keyword) = &cli.search {
        commands::search::execute(
            &session,
            &ButtonTextPagination,
            keyword,
            cli.search_limit,
            &cli.output,
        )
        .await?;
    }

    if let Some(candidates) = &cli.connect {
        let ledger = VisitedLedger::new(cli.visited_profiles.clone());
        commands::connect::execute(&session, candidates, &ledger, Pacing::courtesy()).await?;
    }

    session.close().await;
    Ok(())
}

fn config_error_kind(error: &ConfigError) -> clap::error::ErrorKind {
    match error {
        ConfigError::CredentialSourceConflict => clap::error::ErrorKind::ArgumentConflict,
        ConfigError::MissingCredentials => clap::error::ErrorKind::MissingRequiredArgument,
        _ => clap::error::ErrorKind::ValueValidation,
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("magpie=debug,magpie_cli=debug,magpie_core=debug,magpie_scrape=debug,magpie_browser=debug")
    } else {
        EnvFilter::new("magpie=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
