//! Vacancies CLI
//!
//! Searches hh.ru listings and manages the local vacancy store.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vacancies::{
    error::Result,
    models::{Config, Criteria, Vacancy},
    pipeline,
    services::VacancyFetcher,
    shell::Shell,
    storage::{JsonStorage, VacancyStorage},
    utils::http::ReqwestTransport,
};

/// Vacancies - hh.ru listing fetcher
#[derive(Parser, Debug)]
#[command(name = "vacancies", version, about = "Fetch and store hh.ru vacancies")]
struct Cli {
    /// Directory holding config.toml and the vacancy store
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search vacancies by keyword and store them
    Search {
        keyword: String,
        /// Number of result pages to fetch (default from config)
        #[arg(short, long)]
        pages: Option<u32>,
    },

    /// Show the top N stored vacancies by average salary
    Top {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        n: u32,
    },

    /// Show stored vacancies whose requirements mention a keyword
    Filter { keyword: String },

    /// Show stored records matching all key=value conditions
    Find {
        #[arg(short, long = "where", value_name = "KEY=VALUE")]
        conditions: Vec<String>,
    },

    /// Delete stored records matching all key=value conditions
    Delete {
        #[arg(short, long = "where", value_name = "KEY=VALUE", required = true)]
        conditions: Vec<String>,
    },

    /// Start the interactive menu
    Menu,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_vacancies(list: &[Vacancy]) {
    if list.is_empty() {
        println!("No vacancies found.");
    }
    for vacancy in list {
        println!("\n{vacancy}");
    }
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.data_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", config_path.display());

    if matches!(cli.command, Command::Validate) {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK");
        return Ok(());
    }

    let storage = JsonStorage::new(config.storage_path(&cli.data_dir));

    match cli.command {
        Command::Search { keyword, pages } => {
            let transport = ReqwestTransport::new(&config.api)?;
            let fetcher = VacancyFetcher::from_config(transport, &config.api);
            let pages = pages.unwrap_or(config.api.pages);
            let summary = pipeline::run_search(&fetcher, &storage, &keyword, pages);
            println!(
                "Found {} vacancies, {} added ({} skipped as invalid).",
                summary.mapped, summary.added, summary.rejected
            );
        }

        Command::Top { n } => {
            let top = pipeline::top_by_salary(storage.load(), n as usize);
            print_vacancies(&top);
        }

        Command::Filter { keyword } => {
            let found = pipeline::filter_by_requirement(storage.load(), &keyword);
            print_vacancies(&found);
        }

        Command::Find { conditions } => {
            let criteria = Criteria::parse_pairs(&conditions)?;
            let records = storage.get_by_criteria(&criteria);
            println!("{}", serde_json::to_string_pretty(&records)?);
            log::info!("{} matching record(s)", records.len());
        }

        Command::Delete { conditions } => {
            let criteria = Criteria::parse_pairs(&conditions)?;
            let removed = storage.delete_by_criteria(&criteria);
            println!("Deleted {removed} record(s).");
        }

        Command::Menu => {
            let transport = ReqwestTransport::new(&config.api)?;
            let fetcher = VacancyFetcher::from_config(transport, &config.api);
            let shell = Shell::new(&fetcher, &storage, config.api.pages);
            shell.run(io::stdin().lock(), io::stdout().lock())?;
        }

        Command::Validate => {}
    }

    Ok(())
}
