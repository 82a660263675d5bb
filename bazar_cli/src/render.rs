//! Terminal rendering of pages, notifications and the loading spinner.

use std::time::Duration;

use anyhow::Result;
use bazar_lib::detail::{self, DetailState, Gallery};
use bazar_lib::form::CreateItemForm;
use bazar_lib::rating::{rating_label, render_stars, DEFAULT_MAX_STARS};
use bazar_lib::routes::{self, NAV_ITEMS};
use bazar_lib::search::{RenderState, SEARCH_PLACEHOLDER};
use bazar_lib::types::{Category, Item};
use bazar_lib::validation::Field;
use bazar_lib::{Level, Location, Notification, Page, PaginationControls};
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{category_label, format_price, print_items, print_json, OutputFormat};

/// Spinner shown on stderr while a page is loading.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_notifications(notifications: &[Notification]) {
    for note in notifications {
        let marker = match note.level {
            Level::Success => "✔",
            Level::Error => "✖",
        };
        eprintln!("{} {}", marker, note);
    }
}

/// `Bazar  [Inicio]  Buscar  Crear producto`, active entry in brackets.
pub fn nav_bar(location: &Location) -> String {
    let entries: Vec<String> = NAV_ITEMS
        .iter()
        .map(|item| {
            if item.is_active(location) {
                format!("[{}]", item.name)
            } else {
                item.name.to_string()
            }
        })
        .collect();
    format!("{}  {}", routes::BRAND, entries.join("  "))
}

pub fn page(page: &Page<'_>, format: &OutputFormat) -> Result<()> {
    match page {
        Page::Home => home(),
        Page::Search {
            state, controls, ..
        } => search_results(state, *controls, format)?,
        Page::Detail(state) => detail(state, format)?,
        Page::Create(form) => create_form(form),
        Page::NotFound(path) => println!("{}: {}", routes::NOT_FOUND_TITLE, path),
    }
    Ok(())
}

fn home() {
    println!("{}", routes::HOME_TITLE);
    println!("{}", routes::HOME_SUBTITLE);
    println!();
    println!("🔍 {}", SEARCH_PLACEHOLDER);
    println!();
    println!("{}", routes::FEATURED_HEADING);
}

pub fn search_results(
    state: &RenderState,
    controls: Option<PaginationControls>,
    format: &OutputFormat,
) -> Result<()> {
    match state {
        RenderState::Results { page, .. } => {
            if let Some(heading) = state.heading() {
                eprintln!("{}", heading);
            }
            print_items(&page.results, format)?;
            if let Some(controls) = controls {
                eprintln!("{}", pagination_line(&controls));
            }
        }
        RenderState::Loading => eprintln!("Cargando..."),
        other => {
            if let Some(message) = other.message() {
                println!("{}", message);
            }
        }
    }
    Ok(())
}

/// `« Anterior | Página 2 de 6 | Siguiente » (10 por página: 5/10/15)`
pub fn pagination_line(controls: &PaginationControls) -> String {
    let previous = if controls.previous().is_some() {
        "« Anterior"
    } else {
        "  "
    };
    let next = if controls.next().is_some() {
        "Siguiente »"
    } else {
        "  "
    };
    let options: Vec<String> = controls
        .limit_options()
        .iter()
        .map(|l| l.to_string())
        .collect();
    format!(
        "{} | {} | {} ({} por página: {})",
        previous,
        controls.label(),
        next,
        controls.limit,
        options.join("/")
    )
}

pub fn detail(state: &DetailState, format: &OutputFormat) -> Result<()> {
    match state {
        DetailState::Loading => eprintln!("Cargando..."),
        DetailState::Loaded(item) => match format {
            OutputFormat::Json => print_json(item),
            OutputFormat::Table => println!("{}", detail_card(item)),
            _ => print_items(std::slice::from_ref(item), format)?,
        },
    }
    Ok(())
}

pub fn detail_card(item: &Item) -> String {
    let gallery = Gallery::for_item(item);
    let mut lines = vec![
        format!("← {} ({})", detail::BACK_LINK, detail::back_href()),
        String::new(),
        category_label(&item.category),
        item.title.clone(),
        format!(
            "{}  {}",
            render_stars(item.rating, DEFAULT_MAX_STARS),
            rating_label(item.rating, DEFAULT_MAX_STARS)
        ),
        String::new(),
        format_price(item.price),
        String::new(),
        "Descripción".to_string(),
        item.description.clone(),
        String::new(),
        format!("Marca: {}", item.brand),
        format!("Stock: {}", detail::format_stock(item.stock)),
        String::new(),
        format!("Imagen: {}", gallery.primary),
    ];
    if !gallery.thumbnails.is_empty() {
        lines.push(format!("Miniaturas: {}", gallery.thumbnails.join(", ")));
    }
    lines.push(String::new());
    lines.push(format!("[{}]", detail::ADD_TO_CART));
    lines.join("\n")
}

pub fn create_form(form: &CreateItemForm) {
    let draft = form.draft();
    println!("Crear producto");
    for field in Field::ALL {
        let value = match field {
            Field::Images => format!("{} seleccionada(s)", form.images().len()),
            Field::Category => draft
                .category
                .parse::<Category>()
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            _ => draft.value(field).to_string(),
        };
        println!("  {}: {}", field.label(), value);
        if let Some(message) = form.errors().get(field) {
            println!("    ✖ {}", message);
        }
    }
    for preview in form.previews().iter() {
        match preview.url() {
            Some(url) => println!("  🖼 {} ({})", preview.file_name(), url),
            None => println!("  🖼 {}", preview.file_name()),
        }
    }
    let categories: Vec<String> = Category::ALL
        .iter()
        .map(|c| format!("{} ({})", c.slug(), c.label()))
        .collect();
    println!("  Categorías: {}", categories.join(", "));
    println!("[{}]", form.submit_label());
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazar_lib::PageLimit;

    fn item() -> Item {
        serde_json::from_str(include_str!("../../bazar_api/tests/fixtures/item.json")).unwrap()
    }

    #[test]
    fn nav_bar_marks_active_entry() {
        assert_eq!(
            nav_bar(&Location::parse("/create")),
            "Bazar  Inicio  Buscar  [Crear producto]"
        );
        assert_eq!(
            nav_bar(&Location::parse("/items?search=mesa")),
            "Bazar  Inicio  [Buscar]  Crear producto"
        );
    }

    #[test]
    fn pagination_line_hides_disabled_links() {
        let first = PaginationControls::new(1, 3, PageLimit::Five);
        assert_eq!(
            pagination_line(&first),
            "   | Página 1 de 3 | Siguiente » (5 por página: 5/10/15)"
        );
        let last = PaginationControls::new(3, 3, PageLimit::Ten);
        let line = pagination_line(&last);
        assert!(line.starts_with("« Anterior | Página 3 de 3 |"));
        assert!(!line.contains("Siguiente"));
    }

    #[test]
    fn detail_card_contents() {
        let card = detail_card(&item());
        assert!(card.contains("Deportes"));
        assert!(card.contains("$59.99"));
        assert!(card.contains("Stock: 25 unidades"));
        assert!(card.contains("Calificación: 4.5 de 5 estrellas"));
        assert!(card.contains("Imagen: https://cdn.example.com/items/zapatillas-1.jpg"));
        assert!(card.contains("zapatillas-3.jpg"));
        assert!(card.contains("Volver a resultados (/items)"));
    }
}
