use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chrono::Utc;
use pr_duration::config::{FileConfig, Settings};
use pr_duration::{filter, output, stats};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Day-by-day rolling-window average of time to merge
    Graph {
        /// How many days of history to report
        #[arg(long, default_value_t = stats::DEFAULT_SPAN_DAYS)]
        days: i64,

        /// Size of the trailing window the average is taken over, in days
        #[arg(long, default_value_t = stats::DEFAULT_WINDOW_DAYS)]
        window: i64,

        /// Emit the report as JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "pr-duration")]
#[command(about = "Average and median time-to-merge for a GitHub repository", long_about = None)]
#[command(version)]
struct Cli {
    /// Github repository in <owner>/<repo> format
    #[arg(long)]
    repo: Option<String>,

    /// Github token with repo access (required for private repositories)
    #[arg(long)]
    token: Option<String>,

    /// Maximum age of PRs to include, in days based on merge time [default: 30]
    #[arg(long)]
    max_age: Option<i64>,

    /// Comma separated list of authors to exclude
    #[arg(long)]
    excluded_authors: Option<String>,

    /// Comma separated list of authors to include
    #[arg(long)]
    authors: Option<String>,

    /// Maximum number of PRs to request from Github [default: 500]
    #[arg(long)]
    max_prs: Option<usize>,

    /// Path to config file (defaults to ~/.config/pr-duration/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    let config_path = cli.config.clone().map(PathBuf::from);
    let file_config = match pr_duration::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let flags = FileConfig {
        repo: cli.repo.clone(),
        token: cli.token.clone(),
        max_age: cli.max_age,
        excluded_authors: cli.excluded_authors.clone(),
        authors: cli.authors.clone(),
        max_prs: cli.max_prs,
    };

    let settings = match Settings::resolve(flags, file_config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Repository: {}/{}, max age {} days, cap {} PRs",
            settings.owner, settings.repo, settings.max_age, settings.max_prs
        );
    }

    let client = match pr_duration::github::create_client(settings.token.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let prs = pr_duration::github::fetch_closed_prs(
        &client,
        &settings.owner,
        &settings.repo,
        settings.max_prs,
        cli.verbose,
    )
    .await;

    println!("Collected {} pull requests from Github", prs.len());

    let now = Utc::now();

    let prs = filter::merged_only(prs);
    println!("Filtered to {} that have been merged", prs.len());

    let prs = filter::max_age(prs, settings.max_age, now);
    println!(
        "Filtered to {} that were merged in the last {} days",
        prs.len(),
        settings.max_age
    );

    let prs = if settings.excluded_authors.is_empty() {
        prs
    } else {
        let prs = filter::exclude_authors(prs, &settings.excluded_authors);
        println!(
            "Filtered to {} that were not authored by {}",
            prs.len(),
            settings.excluded_authors
        );
        prs
    };

    let prs = if settings.authors.is_empty() {
        prs
    } else {
        let prs = filter::include_authors(prs, &settings.authors);
        println!(
            "Filtered to {} that were authored by {}",
            prs.len(),
            settings.authors
        );
        prs
    };

    match cli.command {
        None => {
            let summary = stats::summarize(&prs);
            let use_colors = output::should_use_colors();
            println!("{}", output::format_summary(summary.as_ref(), use_colors));
        }
        Some(Commands::Graph { days, window, json }) => {
            if settings.max_age < days {
                eprintln!(
                    "Warning: only PRs merged in the last {} days were kept, so most of the {}-day report will be empty. Raise --max-age to cover the span.",
                    settings.max_age, days
                );
            }

            let trend = stats::rolling_trend(&prs, stats::start_of_tomorrow(now), days, window);

            if json {
                match output::format_trend_json(&trend) {
                    Ok(body) => println!("{}", body),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(EXIT_FAILURE);
                    }
                }
            } else {
                println!("{}", output::format_trend_lines(&trend, output::trend_bar_width()));
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
