//! The create-item form: draft values, image selection with previews, and
//! the validate/submit cycle.

use std::path::Path;
use std::sync::Arc;

use bazar_api::types::{Category, ImageUpload, Item, NewItem};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::error::BazarError;
use crate::location::Location;
use crate::notify::Notifications;
use crate::preview::{ObjectUrlStore, PreviewSet};
use crate::validation::{self, Field, FieldErrors};

/// A file chosen in the image picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, BazarError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(&name, content_type_for(path), bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    fn to_upload(&self) -> ImageUpload {
        ImageUpload {
            file_name: self.name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.to_vec(),
        }
    }
}

/// MIME type for an image path, by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Raw values as typed into the form inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub brand: String,
    pub category: String,
    pub stock: String,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: "0".to_string(),
            brand: String::new(),
            category: String::new(),
            stock: "1".to_string(),
        }
    }
}

impl ItemDraft {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::Brand => &self.brand,
            Field::Category => &self.category,
            Field::Stock => &self.stock,
            Field::Images => "",
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form has errors: {0}")]
    Invalid(FieldErrors),
}

/// Result of a submission that reached the server.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The item was created; the form is reset and the user goes to `redirect`.
    Created { item: Item, redirect: Location },
    /// The server (or network) refused; the draft is left intact for a retry.
    Failed { message: String },
}

pub const SUBMIT_LABEL: &str = "Crear producto";
pub const SUBMITTING_LABEL: &str = "Creando...";

/// Create-item form state.
#[derive(Debug)]
pub struct CreateItemForm {
    draft: ItemDraft,
    images: Vec<SelectedFile>,
    previews: PreviewSet,
    errors: FieldErrors,
    submitting: bool,
    store: ObjectUrlStore,
}

impl CreateItemForm {
    pub fn new(store: ObjectUrlStore) -> Self {
        Self {
            draft: ItemDraft::default(),
            images: Vec::new(),
            previews: PreviewSet::default(),
            errors: FieldErrors::default(),
            submitting: false,
            store,
        }
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ItemDraft {
        &mut self.draft
    }

    /// Picks a category and validates that field right away.
    pub fn set_category(&mut self, value: &str) {
        self.draft.category = value.to_string();
        self.errors.set(
            Field::Category,
            validation::check(validation::CATEGORY_RULES, value),
        );
    }

    pub fn images(&self) -> &[SelectedFile] {
        &self.images
    }

    pub fn previews(&self) -> &PreviewSet {
        &self.previews
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Replaces the selected images wholesale, rebuilds the previews (old
    /// ones are revoked) and re-validates the images field.
    pub fn select_images(&mut self, files: Vec<SelectedFile>) {
        self.previews = PreviewSet::build(&self.store, &files);
        self.images = files;
        self.errors
            .set(Field::Images, validation::check_files(&self.images));
    }

    /// The preview image at `index` finished loading.
    pub fn image_loaded(&mut self, index: usize) -> bool {
        self.previews.mark_loaded(index)
    }

    /// Validates every field, recording the first failure per field.
    pub fn validate(&mut self) -> Result<NewItem, FieldErrors> {
        self.errors.clear();
        for field in Field::ALL {
            let result = match field {
                Field::Images => validation::check_files(&self.images),
                _ => validation::check(validation::rules_for(field), self.draft.value(field)),
            };
            self.errors.set(field, result);
        }
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        self.payload().ok_or_else(|| self.errors.clone())
    }

    fn payload(&self) -> Option<NewItem> {
        let stock = validation::parse_integer(&self.draft.stock)?;
        Some(NewItem {
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            price: self.draft.price.trim().parse::<f64>().ok()?,
            brand: self.draft.brand.clone(),
            category: self.draft.category.parse::<Category>().ok()?,
            stock,
            images: self.images.iter().map(SelectedFile::to_upload).collect(),
        })
    }

    /// Starts a submission: blocks double submits and invalid drafts, and
    /// otherwise marks the form busy and hands back the payload.
    pub fn begin_submit(&mut self) -> Result<NewItem, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        let item = self.validate().map_err(SubmitError::Invalid)?;
        self.submitting = true;
        Ok(item)
    }

    /// Applies the server's answer to a submission started with
    /// [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(
        &mut self,
        result: Result<Item, BazarError>,
        notifications: &mut Notifications,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(item) => {
                tracing::info!("created item {} ({})", item.id, item.title);
                self.reset();
                notifications.success(
                    "Producto creado",
                    Some("El producto se ha creado exitosamente"),
                );
                SubmitOutcome::Created {
                    item,
                    redirect: Location::default(),
                }
            }
            Err(err) => {
                let message = err.user_message();
                notifications.error("Error al crear producto", Some(&message));
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Validates, posts to the catalog, and applies the answer.
    pub async fn submit<C: Catalog>(
        &mut self,
        catalog: &C,
        notifications: &mut Notifications,
    ) -> Result<SubmitOutcome, SubmitError> {
        let item = self.begin_submit()?;
        let result = catalog.create(&item).await;
        Ok(self.finish_submit(result, notifications))
    }

    /// Back to an empty draft with no images or previews.
    pub fn reset(&mut self) {
        self.draft = ItemDraft::default();
        self.images.clear();
        self.previews.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Level;

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", vec![7u8; 32])
    }

    fn filled_form(store: &ObjectUrlStore) -> CreateItemForm {
        let mut form = CreateItemForm::new(store.clone());
        let draft = form.draft_mut();
        draft.title = "Lámpara".to_string();
        draft.description = "Lámpara LED regulable".to_string();
        draft.price = "34.90".to_string();
        draft.brand = "Luz".to_string();
        draft.stock = "0".to_string();
        form.set_category("home");
        form.select_images(vec![png("a.png"), png("b.png")]);
        form
    }

    fn created_item() -> Item {
        Item {
            id: "new-1".to_string(),
            title: "Lámpara".to_string(),
            description: "Lámpara LED regulable".to_string(),
            price: 34.9,
            category: "home".to_string(),
            brand: "Luz".to_string(),
            stock: 0,
            rating: 0.0,
            images: vec![],
        }
    }

    #[test]
    fn valid_form_builds_payload() {
        let store = ObjectUrlStore::new();
        let mut form = filled_form(&store);
        let item = form.validate().unwrap();
        assert_eq!(item.price, 34.9);
        assert_eq!(item.category, Category::Home);
        assert_eq!(item.stock, 0);
        assert_eq!(item.images.len(), 2);
        assert_eq!(item.images[0].content_type, "image/png");
    }

    #[test]
    fn stock_is_sent_exactly_as_typed() {
        let store = ObjectUrlStore::new();
        let mut form = filled_form(&store);
        form.draft_mut().stock = "9007199254740993".to_string();
        assert_eq!(form.validate().unwrap().stock, 9_007_199_254_740_993);

        form.draft_mut().stock = "1e30".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(Field::Stock),
            Some("El stock debe ser un número entero.")
        );
    }

    #[test]
    fn negative_price_blocks_submission() {
        let store = ObjectUrlStore::new();
        let mut form = filled_form(&store);
        form.draft_mut().price = "-1".to_string();

        match form.begin_submit() {
            Err(SubmitError::Invalid(errors)) => assert_eq!(
                errors.get(Field::Price),
                Some("El precio debe ser un número positivo.")
            ),
            other => panic!("expected invalid, got {:?}", other),
        }
        assert!(!form.is_submitting());
    }

    #[test]
    fn sixth_image_blocks_submission() {
        let store = ObjectUrlStore::new();
        let mut form = filled_form(&store);
        form.select_images((0..6).map(|i| png(&format!("{}.png", i))).collect());
        assert_eq!(
            form.errors().get(Field::Images),
            Some("Puedes subir un máximo de 5 imágenes.")
        );
        assert!(matches!(form.begin_submit(), Err(SubmitError::Invalid(_))));
    }

    #[test]
    fn empty_form_reports_every_field() {
        let mut form = CreateItemForm::new(ObjectUrlStore::new());
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(Field::Title), Some(validation::REQUIRED));
        assert_eq!(
            errors.get(Field::Price),
            Some("El precio debe ser un número positivo.")
        );
        assert_eq!(errors.get(Field::Stock), None);
        assert_eq!(errors.get(Field::Category), Some("Selecciona una categoría."));
        assert_eq!(
            errors.get(Field::Images),
            Some("Debes seleccionar al menos una imagen.")
        );
    }

    #[test]
    fn set_category_validates_immediately() {
        let mut form = CreateItemForm::new(ObjectUrlStore::new());
        form.set_category("garden");
        assert!(form.errors().get(Field::Category).is_some());
        form.set_category("toys");
        assert!(form.errors().get(Field::Category).is_none());
    }

    #[test]
    fn selecting_images_replaces_previous_selection() {
        let store = ObjectUrlStore::new();
        let mut form = CreateItemForm::new(store.clone());
        form.select_images(vec![png("a.png"), png("b.png"), png("c.png")]);
        assert_eq!(store.live_count(), 3);

        form.select_images(vec![png("d.png")]);
        assert_eq!(form.images().len(), 1);
        assert_eq!(form.previews().len(), 1);
        assert_eq!(form.previews().get(0).unwrap().file_name(), "d.png");
        assert_eq!(store.live_count(), 1);

        assert!(form.image_loaded(0));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn double_submit_is_blocked() {
        let store = ObjectUrlStore::new();
        let mut form = filled_form(&store);
        assert!(form.begin_submit().is_ok());
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), SUBMITTING_LABEL);
        assert!(matches!(form.begin_submit(), Err(SubmitError::InFlight)));
    }

    #[test]
    fn success_resets_form_and_redirects_home() {
        let store = ObjectUrlStore::new();
        let mut form = filled_form(&store);
        let mut notes = Notifications::new();
        form.begin_submit().unwrap();

        match form.finish_submit(Ok(created_item()), &mut notes) {
            SubmitOutcome::Created { item, redirect } => {
                assert_eq!(item.id, "new-1");
                assert_eq!(redirect.href(), "/");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(form.draft(), &ItemDraft::default());
        assert!(form.images().is_empty());
        assert!(form.previews().is_empty());
        assert_eq!(store.live_count(), 0);
        assert!(!form.is_submitting());

        let drained = notes.drain();
        assert_eq!(drained[0].level, Level::Success);
        assert_eq!(drained[0].title, "Producto creado");
    }

    #[test]
    fn failure_keeps_draft_and_notifies() {
        let store = ObjectUrlStore::new();
        let mut form = filled_form(&store);
        let mut notes = Notifications::new();
        form.begin_submit().unwrap();

        let err = BazarError::from(bazar_api::Error::HttpStatus {
            status: 400,
            message: "El título ya existe".to_string(),
        });
        match form.finish_submit(Err(err), &mut notes) {
            SubmitOutcome::Failed { message } => assert_eq!(message, "El título ya existe"),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(form.draft().title, "Lámpara");
        assert_eq!(form.images().len(), 2);
        assert!(!form.is_submitting());

        let drained = notes.drain();
        assert_eq!(drained[0].level, Level::Error);
        assert_eq!(drained[0].description.as_deref(), Some("El título ya existe"));
    }

    #[test]
    fn dropping_form_releases_previews() {
        let store = ObjectUrlStore::new();
        let form = filled_form(&store);
        assert_eq!(store.live_count(), 2);
        drop(form);
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for(Path::new("a/FOTO.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("b.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("c.gif")), "image/gif");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }
}
