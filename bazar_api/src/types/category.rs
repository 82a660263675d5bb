use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of categories a new item can be filed under.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Books,
    Toys,
    Sports,
    Beauty,
    Food,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Books,
        Category::Toys,
        Category::Sports,
        Category::Beauty,
        Category::Food,
    ];

    /// Wire value sent to the API.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Home => "home",
            Category::Books => "books",
            Category::Toys => "toys",
            Category::Sports => "sports",
            Category::Beauty => "beauty",
            Category::Food => "food",
        }
    }

    /// Human-readable label shown in the category picker.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electrónica",
            Category::Clothing => "Ropa",
            Category::Home => "Hogar",
            Category::Books => "Libros",
            Category::Toys => "Juguetes",
            Category::Sports => "Deportes",
            Category::Beauty => "Belleza",
            Category::Food => "Alimentos",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.slug() == s)
            .copied()
            .ok_or(())
    }
}
