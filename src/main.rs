use clap::Parser;
use hoa_scraper::config::ScraperConfig;
use hoa_scraper::infra::ReqwestFetcher;
use hoa_scraper::logging;
use hoa_scraper::pipeline::Pipeline;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "hoa_scraper")]
#[command(about = "HOA management company directory scraper")]
#[command(version)]
struct Cli {
    /// Specific states to scrape (e.g. --states Alabama "New York")
    #[arg(long, num_args = 1..)]
    states: Vec<String>,

    /// Scrape all 50 states (takes precedence over --states)
    #[arg(long)]
    all: bool,

    /// Delay between requests in seconds (default: 2)
    #[arg(long)]
    delay: Option<u64>,

    /// TOML config file (defaults to ./hoa_scraper.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the CSV export
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Fetch attempts per state page
    #[arg(long)]
    max_retries: Option<u32>,
}

fn print_usage() {
    println!("No states specified. Use --states or --all flag.");
    println!("Example: hoa_scraper --states Alabama");
    println!("Example: hoa_scraper --all");
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();

    if !cli.all && cli.states.is_empty() {
        print_usage();
        return Ok(());
    }

    let mut config = ScraperConfig::load(cli.config.as_deref())?;
    if let Some(delay) = cli.delay {
        config.delay_seconds = delay;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(max_retries) = cli.max_retries {
        config.max_retries = max_retries;
    }
    config.validate()?;

    let states = if cli.all {
        config.states.clone()
    } else {
        config.resolve_states(&cli.states)
    };
    if states.is_empty() {
        error!("None of the requested states are recognized");
        println!("Scraping failed!");
        return Ok(());
    }
    info!("Starting scraper for states: {}", states.join(", "));

    let fetcher = ReqwestFetcher::new(&config)?;
    let pipeline = Pipeline::new(config, fetcher)?;

    match pipeline.run(&states)? {
        Some(result) => println!("\nSuccess! Data saved to: {}", result.output_file.display()),
        None => println!("Scraping failed!"),
    }
    Ok(())
}
