use anyhow::{bail, Result};
use clap::Args;
use bazar_lib::bazar_api::Client;
use bazar_lib::detail::{DetailState, DetailView};
use bazar_lib::Notifications;

use crate::output::OutputFormat;
use crate::render;

#[derive(Args)]
pub struct ShowArgs {
    /// Item ID
    pub id: String,
}

pub async fn run(args: &ShowArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut view = DetailView::new();
    let mut notifications = Notifications::new();

    let spinner = render::spinner("Cargando producto...");
    view.load(client, &args.id, &mut notifications).await;
    spinner.finish_and_clear();

    render::print_notifications(&notifications.drain());
    if matches!(view.state(), DetailState::Loading) {
        bail!("could not load item {}", args.id);
    }
    render::detail(view.state(), format)
}
