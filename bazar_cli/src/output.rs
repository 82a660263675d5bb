use anyhow::Result;
use bazar_lib::rating::{render_stars, DEFAULT_MAX_STARS};
use bazar_lib::types::{Category, Item};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown values fall back to a table.
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ItemRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Producto")]
    #[serde(rename = "Producto")]
    title: String,
    #[tabled(rename = "Categoría")]
    #[serde(rename = "Categoría")]
    category: String,
    #[tabled(rename = "Marca")]
    #[serde(rename = "Marca")]
    brand: String,
    #[tabled(rename = "Precio")]
    #[serde(rename = "Precio")]
    price: String,
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: i64,
    #[tabled(rename = "Calificación")]
    #[serde(rename = "Calificación")]
    rating: String,
}

// -- Row builders --

fn build_item_rows(items: &[Item]) -> Vec<ItemRow> {
    items
        .iter()
        .map(|i| ItemRow {
            id: i.id.clone(),
            title: i.title.clone(),
            category: category_label(&i.category),
            brand: i.brand.clone(),
            price: format_price(i.price),
            stock: i.stock,
            rating: format!("{} ({:.1})", render_stars(i.rating, DEFAULT_MAX_STARS), i.rating),
        })
        .collect()
}

/// Spanish label for known category slugs; unknown slugs are shown as sent.
pub fn category_label(slug: &str) -> String {
    slug.parse::<Category>()
        .map(|c| c.label().to_string())
        .unwrap_or_else(|_| slug.to_string())
}

pub fn format_price(price: f64) -> String {
    bazar_lib::detail::format_price(price)
}

// -- Table / Markdown output --

pub fn print_items_table(items: &[Item]) {
    println!("{}", Table::new(build_item_rows(items)));
}

pub fn print_items_markdown(items: &[Item]) {
    let mut table = Table::new(build_item_rows(items));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_items_csv(items: &[Item]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_item_rows(items) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn print_items(items: &[Item], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_items_table(items),
        OutputFormat::Json => print_json(&items),
        OutputFormat::Csv => print_items_csv(items)?,
        OutputFormat::Markdown => print_items_markdown(items),
    }
    Ok(())
}
