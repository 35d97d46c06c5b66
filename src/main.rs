//! Terminal front end for the URL shortener.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! shortener shorten https://example.com/some/long/path
//!
//! # List URLs created in January, most visited first
//! shortener list --from 01/01/2024 --to 31/01/2024 --sort visits --desc --limit 10
//!
//! # Visits and visitors of one URL
//! shortener details 42
//!
//! # Interactive listing with filters
//! shortener browse
//! ```
//!
//! # Environment Variables
//!
//! See [`url_shortener_client::config`]. A `.env` file in the working
//! directory is loaded first.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Select};
use tracing_subscriber::EnvFilter;

use url_shortener_client::config::Config;
use url_shortener_client::prelude::*;
use url_shortener_client::utils::date_format::{format_date, parse_date};

/// Client for the URL shortener service.
#[derive(Parser)]
#[command(name = "shortener")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides SHORTENER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Only print errors, no progress notices
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// URL to shorten; `http://` is assumed when no scheme is given
        url: String,
    },

    /// List shortened URLs
    List(ListArgs),

    /// Show visits and visitors of one URL
    Details {
        /// URL id as shown by `list`
        id: i64,
    },

    /// Interactive listing with filters and details
    Browse,
}

/// Filters of the `list` command.
#[derive(Args)]
struct ListArgs {
    /// Start of the creation date range (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long, value_parser = parse_date_arg, requires = "to", conflicts_with = "date")]
    from: Option<NaiveDate>,

    /// End of the creation date range
    #[arg(long, value_parser = parse_date_arg, requires = "from")]
    to: Option<NaiveDate>,

    /// Single creation date
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Field to order by (e.g. created, visits)
    #[arg(long)]
    sort: Option<String>,

    /// Order descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Maximum number of results
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|_| format!("expected dd/mm/yyyy or yyyy-mm-dd, got '{value}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    let repository = Arc::new(
        HttpUrlRepository::from_config(&config).context("Failed to create backend client")?,
    );
    let notifier = Arc::new(ConsoleNotifier::new().quiet(cli.quiet));

    match cli.command {
        Commands::Shorten { url } => handle_shorten(repository, notifier, &url).await?,
        Commands::List(args) => handle_list(repository, notifier, args).await?,
        Commands::Details { id } => handle_details(repository, id).await,
        Commands::Browse => handle_browse(repository, notifier).await?,
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn handle_shorten(
    repository: Arc<HttpUrlRepository>,
    notifier: Arc<ConsoleNotifier>,
    url: &str,
) -> Result<()> {
    let mut service = ShortenService::new(repository, notifier);
    let shortened = service.shorten(url).await?;

    let label = if shortened.created {
        "Created"
    } else {
        "Already shortened"
    };
    println!("{}: {}", label.green().bold(), shortened.shorten_url.bright_yellow());

    Ok(())
}

async fn handle_list(
    repository: Arc<HttpUrlRepository>,
    notifier: Arc<ConsoleNotifier>,
    args: ListArgs,
) -> Result<()> {
    let mut listing = ListingService::new(repository, notifier);
    let today = Local::now().date_naive();

    let mut valid = true;
    if let (Some(from), Some(to)) = (args.from, args.to) {
        listing.select_date_filter(DateFilterKind::Range, today);
        valid &= listing.set_from_date(Some(from));
        valid &= listing.set_to_date(Some(to));
    } else if let Some(date) = args.date {
        listing.select_date_filter(DateFilterKind::Date, today);
        valid &= listing.set_date(Some(date));
    }

    let order = if args.desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    valid &= listing.set_sort(args.sort.as_deref(), order);
    valid &= listing.set_limit(args.limit);

    if !valid {
        anyhow::bail!("Invalid filter, nothing was requested");
    }

    let urls = listing.apply_query().await?;
    print_urls(urls);

    Ok(())
}

async fn handle_details(repository: Arc<HttpUrlRepository>, id: i64) {
    let details = DetailsService::new(repository).load(id).await;
    print_details(&details);
}

/// Interactive loop over one listing view.
async fn handle_browse(
    repository: Arc<HttpUrlRepository>,
    notifier: Arc<ConsoleNotifier>,
) -> Result<()> {
    const ACTIONS: [&str; 8] = [
        "Filter by date range",
        "Filter by single date",
        "Sort",
        "Limit results",
        "Apply filters",
        "Reset filters",
        "Show details",
        "Quit",
    ];

    let mut listing = ListingService::new(repository, notifier);
    if listing.refresh().await.is_ok() {
        print_urls(listing.urls());
    }

    loop {
        println!();
        print_filter(&listing);

        let choice = Select::new()
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(4)
            .interact()?;
        let today = Local::now().date_naive();

        match choice {
            0 => {
                listing.select_date_filter(DateFilterKind::Range, today);
                if let Some(from) = prompt_date("From", listing.filter().from_date)? {
                    listing.set_from_date(Some(from));
                }
                if let Some(to) = prompt_date("To", listing.filter().to_date)? {
                    listing.set_to_date(Some(to));
                }
            }
            1 => {
                listing.select_date_filter(DateFilterKind::Date, today);
                if let Some(date) = prompt_date("Date", listing.filter().date)? {
                    listing.set_date(Some(date));
                }
            }
            2 => {
                let field: String = Input::new()
                    .with_prompt("Sort by (empty to clear)")
                    .with_initial_text(listing.filter().sort.clone().unwrap_or_default())
                    .allow_empty(true)
                    .interact_text()?;
                let order = match Select::new()
                    .with_prompt("Order")
                    .items(&["ascending", "descending"])
                    .default(0)
                    .interact()?
                {
                    0 => SortOrder::Ascending,
                    _ => SortOrder::Descending,
                };
                listing.set_sort(Some(field.as_str()), order);
            }
            3 => {
                let raw: String = Input::new()
                    .with_prompt("Maximum results (empty to clear)")
                    .allow_empty(true)
                    .interact_text()?;
                match raw.trim() {
                    "" => {
                        listing.set_limit(None);
                    }
                    value => match value.parse::<i64>() {
                        Ok(limit) => {
                            listing.set_limit(Some(limit));
                        }
                        Err(_) => println!("{}", "Not a number".red()),
                    },
                }
            }
            4 => {
                if listing.apply_query().await.is_ok() {
                    print_urls(listing.urls());
                }
            }
            5 => {
                if listing.reset_filters().await.is_ok() {
                    print_urls(listing.urls());
                }
            }
            6 => browse_details(&mut listing).await?,
            _ => break,
        }
    }

    Ok(())
}

async fn browse_details(
    listing: &mut ListingService<HttpUrlRepository, ConsoleNotifier>,
) -> Result<()> {
    if listing.urls().is_empty() {
        println!("{}", "  No URLs to inspect".yellow());
        return Ok(());
    }

    let labels: Vec<String> = listing
        .urls()
        .iter()
        .map(|u| format!("{} {}", u.short_url, u.redirect_url))
        .collect();
    let index = Select::new()
        .with_prompt("URL")
        .items(&labels)
        .default(0)
        .interact()?;
    let id = listing.urls()[index].id;

    let details = listing.open_details(id).await;
    print_details(&details);

    let outcome = match Select::new()
        .with_prompt("Was this useful?")
        .items(&["Yes", "No", "Close", "Cancel"])
        .default(2)
        .interact()?
    {
        0 => DialogOutcome::Answered("useful".to_string()),
        1 => DialogOutcome::Answered("not useful".to_string()),
        2 => DialogOutcome::Hidden,
        _ => DialogOutcome::Cancelled,
    };
    listing.record_dialog_outcome(outcome);
    if let Some(status) = listing.status() {
        println!("{}", status.bright_black());
    }

    Ok(())
}

/// Asks for a date; an empty answer keeps `current`.
fn prompt_date(prompt: &str, current: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let raw: String = Input::new()
        .with_prompt(format!("{prompt} (dd/mm/yyyy)"))
        .with_initial_text(current.map(format_date).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    if raw.trim().is_empty() {
        return Ok(current);
    }
    match parse_date(&raw) {
        Ok(date) => Ok(Some(date)),
        Err(_) => {
            println!("{}", format!("  '{raw}' is not a date").red());
            Ok(current)
        }
    }
}

fn print_filter(listing: &ListingService<HttpUrlRepository, ConsoleNotifier>) {
    let filter = listing.filter();
    let mode = match filter.mode() {
        DateFilterMode::None => "none".to_string(),
        DateFilterMode::Range => format!(
            "{} .. {}",
            filter.from_date.map(format_date).unwrap_or_default(),
            filter.to_date.map(format_date).unwrap_or_default()
        ),
        DateFilterMode::Date => filter.date.map(format_date).unwrap_or_default(),
    };

    println!("  {} {}", "Dates:".bright_white(), mode.cyan());
    println!(
        "  {} {}",
        "Query:".bright_white(),
        display_query(listing.pending_query()).cyan()
    );
    println!(
        "  {} {}",
        "Applied:".bright_white(),
        display_query(listing.committed_query()).bright_black()
    );
}

fn display_query(query: &str) -> &str {
    if query.is_empty() { "(none)" } else { query }
}

/// Prints the URL listing.
///
/// # Output Format
///
/// ```text
///   ID    Short URL                      Created      Visits  Target
///   ──────────────────────────────────────────────────────────────────
///   1     http://sho.rt/url/ab12c        05/01/2024   12      https://example.com
/// ```
fn print_urls(urls: &[UrlRecord]) {
    println!();
    if urls.is_empty() {
        println!("{}", "  No URLs found".yellow());
        return;
    }

    println!(
        "  {:<5} {:<30} {:<12} {:<7} {}",
        "ID".bright_white().bold(),
        "Short URL".bright_white().bold(),
        "Created".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for url in urls {
        println!(
            "  {:<5} {:<30} {:<12} {:<7} {}",
            url.id.to_string().bright_black(),
            url.short_url.cyan(),
            format_date(url.created),
            url.visits.to_string().bright_green(),
            url.redirect_url
        );
    }

    println!();
    println!("  Total: {}", urls.len().to_string().bright_white().bold());
}

fn print_details(details: &UrlDetails) {
    println!();
    println!(
        "{} {}",
        "📊 URL".bright_blue().bold(),
        details.id.to_string().bright_blue().bold()
    );

    println!();
    println!("  {}", "Visits per day".bright_white().bold());
    match &details.visits {
        None => println!("  {}", "unavailable".red()),
        Some(visits) if visits.is_empty() => println!("  {}", "none".yellow()),
        Some(visits) => {
            for visit in visits {
                println!(
                    "  {:<12} {:<6} last from {} at {}",
                    format_date(visit.created),
                    visit.visits.to_string().bright_green(),
                    visit.last_ip.cyan(),
                    visit.last_visit_at.as_deref().unwrap_or("-")
                );
            }
            println!(
                "  Total: {}",
                details.total_visits().to_string().bright_white().bold()
            );
        }
    }

    println!();
    println!("  {}", "Visitors".bright_white().bold());
    match &details.visitors {
        None => println!("  {}", "unavailable".red()),
        Some(visitors) if visitors.is_empty() => println!("  {}", "none".yellow()),
        Some(visitors) => {
            for visitor in visitors {
                println!(
                    "  {:<16} {:<6} first {} last {}  {}",
                    visitor.ip.cyan(),
                    visitor.visits.to_string().bright_green(),
                    visitor.first_visit,
                    visitor.last_visit.as_deref().unwrap_or("-"),
                    visitor.user_agent.bright_black()
                );
            }
        }
    }
    println!();
}
