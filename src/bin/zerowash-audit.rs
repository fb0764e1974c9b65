use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use zerowash::{
    app_state::{AppState, MISSING_API_KEY_MESSAGE},
    config::Config,
    fetcher::Fetcher,
    scrape::scrape,
    telemetry,
};

/// Run the ZeroWash scraper or a full audit from the terminal.
#[derive(Parser, Debug)]
#[command(name = "zerowash-audit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text that would be sent for auditing
    Scrape {
        /// Page to scrape
        url: String,
    },
    /// Scrape the page and print the compliance report
    Audit {
        /// Page to audit
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    telemetry::init(config.log_json());

    match cli.command {
        Command::Scrape { url } => {
            let fetcher = Fetcher::new()?;
            match scrape(&fetcher, &url).await {
                Ok(extracted) => {
                    eprintln!("Text Extracted. Length: {} chars", extracted.char_count);
                    println!("{}", extracted.text);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Audit { url } => {
            let state = AppState::from_config(config)?;
            let Some(auditor) = state.auditor else {
                eprintln!("{MISSING_API_KEY_MESSAGE}");
                return Ok(ExitCode::FAILURE);
            };

            match auditor.audit(&url).await {
                Ok(report) => {
                    eprintln!("Text Extracted. Length: {} chars", report.extracted_chars);
                    println!("{}", report.report);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
