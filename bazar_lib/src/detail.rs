//! Product detail page: load one item by id and present it.

use bazar_api::types::Item;

use crate::catalog::Catalog;
use crate::error::BazarError;
use crate::location::Location;
use crate::notify::Notifications;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const LOAD_ERROR_TITLE: &str = "Error al cargar el producto";
pub const BACK_LINK: &str = "Volver a resultados";
pub const ADD_TO_CART: &str = "Añadir al carrito";

#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Item),
}

/// Ties a detail fetch to the id and generation that requested it.
#[derive(Clone, Debug)]
pub struct DetailTicket {
    generation: u64,
    id: String,
}

impl DetailTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Detail page state machine. A failed load leaves the view `Loading`; the
/// failure is reported through a notification only.
#[derive(Debug)]
pub struct DetailView {
    state: DetailState,
    id: Option<String>,
    generation: u64,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            state: DetailState::Loading,
            id: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Shows item `id`. Returns a ticket when it must be fetched; asking for
    /// the id already shown (or loading) is a no-op.
    pub fn navigate(&mut self, id: &str) -> Option<DetailTicket> {
        if self.id.as_deref() == Some(id) {
            return None;
        }
        self.generation += 1;
        self.id = Some(id.to_string());
        self.state = DetailState::Loading;
        tracing::debug!("detail generation {}: loading {}", self.generation, id);
        Some(DetailTicket {
            generation: self.generation,
            id: id.to_string(),
        })
    }

    /// Applies a finished fetch. Stale tickets change nothing and return false.
    pub fn complete(
        &mut self,
        ticket: DetailTicket,
        result: Result<Item, BazarError>,
        notifications: &mut Notifications,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!("dropping stale detail response for {}", ticket.id);
            return false;
        }
        match result {
            Ok(item) => self.state = DetailState::Loaded(item),
            Err(err) => {
                tracing::error!("failed to load item {}: {}", ticket.id, err);
                notifications.error(LOAD_ERROR_TITLE, Some(&err.user_message()));
            }
        }
        true
    }

    /// Leaves the page; an in-flight load is discarded and returning refetches.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.id = None;
        self.state = DetailState::Loading;
    }

    /// Navigates to `id` and, if needed, fetches it from `catalog`.
    pub async fn load<C: Catalog>(
        &mut self,
        catalog: &C,
        id: &str,
        notifications: &mut Notifications,
    ) -> &DetailState {
        if let Some(ticket) = self.navigate(id) {
            let result = catalog.item(ticket.id()).await;
            self.complete(ticket, result, notifications);
        }
        &self.state
    }
}

/// Primary image plus a thumbnail strip of the rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gallery {
    pub primary: String,
    pub thumbnails: Vec<String>,
}

impl Gallery {
    pub fn for_item(item: &Item) -> Self {
        let mut images = item
            .images
            .iter()
            .map(|src| image_or_placeholder(src).to_string());
        Self {
            primary: images
                .next()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            thumbnails: images.collect(),
        }
    }
}

fn image_or_placeholder(src: &str) -> &str {
    if src.trim().is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        src
    }
}

/// `$12.50`
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// `8 unidades`
pub fn format_stock(stock: i64) -> String {
    format!("{} unidades", stock)
}

/// Link target of the "back to results" control.
pub fn back_href() -> String {
    Location::parse("/items").href()
}
