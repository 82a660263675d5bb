mod commands;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use bazar_lib::bazar_api::Client;
use bazar_lib::Config;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "bazar")]
#[command(about = "Search, view and publish products in a Bazar catalog")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page behind a storefront link (/, /items?search=.., /items/<id>, /create)
    Open(commands::open::OpenArgs),
    /// Search the catalog
    Search(commands::search::SearchArgs),
    /// Show one product
    Show(commands::show::ShowArgs),
    /// Publish a new product
    Create(Box<commands::create::CreateArgs>),
    /// Interactive session with history and pagination
    Browse(commands::browse::BrowseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("bazar=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_flag(&cli.output);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            render::print_notifications(&[e.notification()]);
            std::process::exit(2);
        }
    };
    let client = Client::with_base_url(config.api_url())?;

    match &cli.command {
        Commands::Open(args) => commands::open::run(args, client, &format).await?,
        Commands::Search(args) => commands::search::run(args, &client, &format).await?,
        Commands::Show(args) => commands::show::run(args, &client, &format).await?,
        Commands::Create(args) => commands::create::run(args.as_ref(), &client, &format).await?,
        Commands::Browse(args) => commands::browse::run(args, client, &format).await?,
    }

    Ok(())
}
