use anyhow::Result;
use clap::Args;
use bazar_lib::bazar_api::Client;
use bazar_lib::{Location, Shell};

use crate::output::OutputFormat;
use crate::render;

#[derive(Args)]
pub struct OpenArgs {
    /// Storefront link, e.g. "/items?search=mesa&page=2" or "/items/<id>"
    #[arg(default_value = "/")]
    pub href: String,
}

pub async fn run(args: &OpenArgs, client: Client, format: &OutputFormat) -> Result<()> {
    let mut shell = Shell::new(client, Location::parse(&args.href));
    eprintln!("{}", render::nav_bar(shell.location()));

    let spinner = render::spinner("Cargando...");
    let page = shell.load().await;
    spinner.finish_and_clear();
    render::page(&page, format)?;

    render::print_notifications(&shell.drain_notifications());
    Ok(())
}
