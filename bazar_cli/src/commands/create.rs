use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use bazar_lib::bazar_api::Client;
use bazar_lib::form::{CreateItemForm, SelectedFile, SubmitError, SubmitOutcome};
use bazar_lib::preview::ObjectUrlStore;
use bazar_lib::Notifications;

use crate::output::{print_json, OutputFormat};
use crate::render;

#[derive(Args)]
pub struct CreateArgs {
    /// Product title (at least 3 characters)
    #[arg(long)]
    pub title: String,

    /// Product description (at least 10 characters)
    #[arg(long)]
    pub description: String,

    /// Unit price, greater than zero
    #[arg(long, default_value = "0")]
    pub price: String,

    /// Brand (at least 2 characters)
    #[arg(long)]
    pub brand: String,

    /// Category: electronics, clothing, home, books, toys, sports, beauty, food
    #[arg(long, default_value = "")]
    pub category: String,

    /// Units in stock
    #[arg(long, default_value = "1")]
    pub stock: String,

    /// Image file (JPEG, PNG or WEBP, up to 5 MB). Repeat for up to 5 images.
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

pub async fn run(args: &CreateArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut form = CreateItemForm::new(ObjectUrlStore::new());
    let draft = form.draft_mut();
    draft.title = args.title.clone();
    draft.description = args.description.clone();
    draft.price = args.price.clone();
    draft.brand = args.brand.clone();
    draft.stock = args.stock.clone();
    form.set_category(&args.category);

    let files = args
        .images
        .iter()
        .map(|path| SelectedFile::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;
    form.select_images(files);
    if *format == OutputFormat::Table {
        render::create_form(&form);
    }
    for index in 0..form.previews().len() {
        form.image_loaded(index);
    }

    let mut notifications = Notifications::new();
    let spinner = render::spinner("Creando...");
    let outcome = form.submit(client, &mut notifications).await;
    spinner.finish_and_clear();
    render::print_notifications(&notifications.drain());

    match outcome {
        Ok(SubmitOutcome::Created { item, redirect }) => {
            match format {
                OutputFormat::Json => print_json(&item),
                _ => println!("{}", render::detail_card(&item)),
            }
            eprintln!("→ {}", redirect);
            Ok(())
        }
        Ok(SubmitOutcome::Failed { message }) => bail!("item not created: {}", message),
        Err(SubmitError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("✖ {}: {}", field.label(), message);
            }
            bail!("the form has {} invalid field(s)", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}
