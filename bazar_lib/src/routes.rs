//! Route table, navigation bar and static page copy.

use crate::location::Location;

pub const BRAND: &str = "Bazar";
pub const HOME_TITLE: &str = "Bienvenido a nuestro Bazar";
pub const HOME_SUBTITLE: &str = "Encuentra todo tipo de productos para tu hogar, oficina y más.";
pub const FEATURED_HEADING: &str = "Productos destacados";
pub const NOT_FOUND_TITLE: &str = "Página no encontrada";

/// A page of the storefront.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/items`, with the (possibly empty) `search` parameter.
    Search { query: String },
    /// `/items/:id`
    Detail { id: String },
    /// `/create`
    Create,
    /// Any other path.
    NotFound(String),
}

impl Route {
    pub fn resolve(location: &Location) -> Self {
        let segments = location.segments();
        match segments.as_slice() {
            [] => Route::Home,
            [items] if items == "items" => Route::Search {
                query: location.param("search").unwrap_or_default().to_string(),
            },
            [items, id] if items == "items" && !id.is_empty() => Route::Detail { id: id.clone() },
            [create] if create == "create" => Route::Create,
            _ => Route::NotFound(location.path().to_string()),
        }
    }

    /// Title shown in the page header.
    pub fn title(&self) -> String {
        match self {
            Route::Home => HOME_TITLE.to_string(),
            Route::Search { query } if query.trim().is_empty() => "Buscar".to_string(),
            Route::Search { query } => format!("Buscar: {}", query),
            Route::Detail { .. } => "Detalle del producto".to_string(),
            Route::Create => "Crear producto".to_string(),
            Route::NotFound(_) => NOT_FOUND_TITLE.to_string(),
        }
    }
}

/// An entry of the navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub to: &'static str,
}

pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        name: "Inicio",
        to: "/",
    },
    NavItem {
        name: "Buscar",
        to: "/items?search=",
    },
    NavItem {
        name: "Crear producto",
        to: "/create",
    },
];

impl NavItem {
    /// Highlighted when the current path equals the link's path.
    pub fn is_active(&self, location: &Location) -> bool {
        Location::parse(self.to).path() == location.path()
    }
}
