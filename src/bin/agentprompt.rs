//! agentprompt CLI Binary

use agentprompt::config::ConfigLoader;
use agentprompt::logging::init_logging;
use agentprompt::tooling::cli::{Cli, CliContext};
use anyhow::Context;
use clap::Parser;
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = ConfigLoader::load_with_override(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_logging_overrides(&mut config);
    init_logging(Some(&config.logging)).context("Failed to initialize logging")?;

    let mut context =
        CliContext::new(&config, cli.store.clone()).context("Failed to open settings store")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            let message = format!("{:#}", e);
            if message.starts_with("Error:") {
                eprintln!("{}", message);
            } else {
                eprintln!("Error: {}", message);
            }
            process::exit(1);
        }
    }
}
