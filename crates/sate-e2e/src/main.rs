//! `sate-e2e` entry point: parse flags, set up output, load configuration,
//! run the scenarios, and apply the exit policy.

use clap::Parser;
use miette::Result;
use sate_e2e::{cli, config, error, logger, runner, scenarios, session, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    if args.list {
        for scenario in scenarios::all() {
            println!("{:<18} {}", scenario.slug(), scenario.title());
        }
        return Ok(());
    }

    execute(&args).await.map_err(error::cli_error_to_miette)
}

async fn execute(args: &cli::Cli) -> error::Result<()> {
    let config = config::SuiteConfig::load(args)?;
    let settings = config.session_settings()?;
    let launcher = session::ChromeLauncher::new(config.browser_config(), settings);

    let summary = runner::run(&launcher, &scenarios::all(), &config.only).await;
    summary.exit_status(config.exit_policy)
}
