//! Smoke-test CLI for the gig-order management REST API
//!
//! Authenticates against a running backend, exercises every resource module,
//! and exits 0 only when every call in the run passed.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use gigorder_smoke::common::logging;
use gigorder_smoke::{Credentials, Harness, Result};

#[derive(Parser)]
#[command(name = "gigorder-smoke", about = "Smoke-test the gig-order management API")]
#[command(version, long_about = None)]
struct Cli {
    /// Base URL of the API under test
    #[arg(long, default_value = "http://localhost:8080/api/v1")]
    base_url: String,

    /// Directory the JSON report is written into
    #[arg(long, default_value = ".")]
    report_dir: PathBuf,

    /// Login account
    #[arg(long, default_value = "admin")]
    account: String,

    /// Login password
    #[arg(long, default_value = "123456")]
    password: String,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    println!("{}", "gig-order platform API smoke test".bold());
    println!("{}", "=".repeat(50));

    match run(cli).await {
        Ok(true) => {
            println!("\n{}", "All calls passed".green().bold());
        }
        Ok(false) => {
            println!("\n{}", "Some calls failed, see the report".red().bold());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let credentials = Credentials {
        account: cli.account,
        password: cli.password,
    };

    let mut harness = Harness::new(&cli.base_url, credentials)?;

    harness.preflight().await?;

    let outcome = harness.run(&cli.report_dir).await?;
    Ok(outcome.is_green())
}
