//! Payload for `POST /create`.

use super::Category;

/// A validated new-item submission, ready to be sent as multipart form data.
#[derive(Clone, Debug, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub brand: String,
    pub category: Category,
    pub stock: i64,
    /// One to five images, sent as repeated `images` file parts.
    pub images: Vec<ImageUpload>,
}

/// A single image file attached to a [`NewItem`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl NewItem {
    /// Text fields in the order they are written to the multipart body.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("price", self.price.to_string()),
            ("brand", self.brand.clone()),
            ("category", self.category.slug().to_string()),
            ("stock", self.stock.to_string()),
        ]
    }
}
