pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use storefront_core::config::ConfigOverrides;

use crate::commands::order::OrderArgs;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront terminal client",
    long_about = "Browse the storefront catalog, place orders against a running API, and inspect effective configuration.",
    after_help = "Examples:\n  storefront products\n  storefront order --first-name Ada --last-name Lovelace --address \"12 Analytical Way\" --item 1:2 --item 6\n  storefront config"
)]
pub struct Cli {
    /// Base URL of the storefront API, e.g. http://localhost:3001/api
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the product catalog served by the API")]
    Products,
    #[command(about = "Build a cart from --item entries and place an order")]
    Order(OrderArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let overrides = ConfigOverrides { api_base_url: cli.api_base_url, ..ConfigOverrides::default() };

    let result = match cli.command {
        Command::Products => commands::products::run(overrides),
        Command::Order(args) => commands::order::run(args, overrides),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(overrides) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
