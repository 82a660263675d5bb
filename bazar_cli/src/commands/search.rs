use anyhow::Result;
use clap::Args;
use bazar_lib::bazar_api::Client;
use bazar_lib::search::SearchView;
use bazar_lib::validation;
use bazar_lib::{Location, PageLimit, PaginationState};

use crate::output::OutputFormat;
use crate::render;

#[derive(Args)]
pub struct SearchArgs {
    /// Search term
    pub query: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page: 5, 10 or 15
    #[arg(long, default_value = "10")]
    pub limit: String,
}

pub async fn run(args: &SearchArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let limit: PageLimit = args.limit.parse()?;
    let query = if args.query.trim().is_empty() {
        String::new()
    } else {
        validation::validate_search(&args.query)?
    };

    let mut location = Location::parse(&Location::search_href(&query));
    location.set_param("page", &args.page.max(1).to_string());
    location.set_param("limit", &limit.to_string());
    let pagination = PaginationState::from_location(&location);

    let mut view = SearchView::new();
    let spinner = render::spinner("Buscando productos...");
    view.refresh(client, &location, &pagination).await;
    spinner.finish_and_clear();

    render::search_results(view.state(), view.controls(pagination.limit()), format)
}
