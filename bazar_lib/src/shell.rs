//! The application shell: owns the history and every page's state, and turns
//! the current location into a rendered [`Page`].

use crate::catalog::Catalog;
use crate::detail::{DetailState, DetailView};
use crate::form::{CreateItemForm, SubmitError, SubmitOutcome};
use crate::location::{History, Location};
use crate::notify::{Notification, Notifications};
use crate::pagination::{PageLimit, PaginationControls, PaginationState};
use crate::preview::ObjectUrlStore;
use crate::routes::Route;
use crate::search::{RenderState, SearchForm, SearchView};

/// What the current location renders to.
#[derive(Debug)]
pub enum Page<'a> {
    Home,
    Search {
        query: String,
        state: &'a RenderState,
        controls: Option<PaginationControls>,
    },
    Detail(&'a DetailState),
    Create(&'a CreateItemForm),
    NotFound(String),
}

/// Storefront session against one catalog.
pub struct Shell<C> {
    catalog: C,
    history: History,
    pagination: PaginationState,
    search: SearchView,
    detail: DetailView,
    form: Option<CreateItemForm>,
    notifications: Notifications,
    store: ObjectUrlStore,
}

impl<C: Catalog> Shell<C> {
    pub fn new(catalog: C, initial: Location) -> Self {
        Self {
            catalog,
            pagination: PaginationState::from_location(&initial),
            history: History::new(initial),
            search: SearchView::new(),
            detail: DetailView::new(),
            form: None,
            notifications: Notifications::new(),
            store: ObjectUrlStore::new(),
        }
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn route(&self) -> Route {
        Route::resolve(self.history.current())
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn store(&self) -> &ObjectUrlStore {
        &self.store
    }

    /// Follows a link (new history entry).
    pub fn navigate(&mut self, href: &str) {
        tracing::debug!("navigate to {}", href);
        self.history.push(Location::parse(href));
    }

    /// Submits the search box. Blank terms do nothing.
    pub fn search(&mut self, text: &str) -> bool {
        match SearchForm::new(text).submit() {
            Some(href) => {
                self.navigate(&href);
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    fn controls(&self) -> Option<PaginationControls> {
        self.search.controls(self.pagination.limit())
    }

    /// Moves to the next result page unless already on the last one.
    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.controls().and_then(|c| c.next()))
    }

    /// Moves to the previous result page unless already on the first one.
    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.controls().and_then(|c| c.previous()))
    }

    fn go_to_page(&mut self, page: Option<u32>) -> bool {
        match page {
            Some(page) => {
                self.pagination.set_current_page(page, &mut self.history);
                true
            }
            None => false,
        }
    }

    /// Changes the page size on the search page.
    pub fn set_limit(&mut self, limit: PageLimit) -> bool {
        if !matches!(self.route(), Route::Search { .. }) {
            return false;
        }
        self.pagination.set_limit(limit, &mut self.history);
        true
    }

    /// The create form, while the create page is showing.
    pub fn form_mut(&mut self) -> Option<&mut CreateItemForm> {
        self.form.as_mut()
    }

    /// Submits the create form. On success the shell navigates to the
    /// redirect target. `None` when the create page is not showing.
    pub async fn submit_form(&mut self) -> Option<Result<SubmitOutcome, SubmitError>> {
        let form = self.form.as_mut()?;
        let outcome = form.submit(&self.catalog, &mut self.notifications).await;
        if let Ok(SubmitOutcome::Created { redirect, .. }) = &outcome {
            self.history.push(redirect.clone());
        }
        Some(outcome)
    }

    /// Resolves the current location, leaves pages no longer shown, and runs
    /// whatever fetch the shown page needs.
    pub async fn load(&mut self) -> Page<'_> {
        let route = self.route();
        self.pagination.sync(&self.history);

        if !matches!(route, Route::Search { .. }) {
            self.search.unmount();
        }
        if !matches!(route, Route::Detail { .. }) {
            self.detail.unmount();
        }
        if route != Route::Create && self.form.take().is_some() {
            tracing::debug!("create form dropped");
        }

        match route {
            Route::Home => Page::Home,
            Route::Search { query } => {
                self.search
                    .refresh(&self.catalog, self.history.current(), &self.pagination)
                    .await;
                Page::Search {
                    query,
                    controls: self.search.controls(self.pagination.limit()),
                    state: self.search.state(),
                }
            }
            Route::Detail { id } => {
                self.detail
                    .load(&self.catalog, &id, &mut self.notifications)
                    .await;
                Page::Detail(self.detail.state())
            }
            Route::Create => {
                let store = &self.store;
                Page::Create(
                    self.form
                        .get_or_insert_with(|| CreateItemForm::new(store.clone())),
                )
            }
            Route::NotFound(path) => Page::NotFound(path),
        }
    }

    /// Pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
