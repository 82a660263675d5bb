//! Search results page: query text + pagination + catalog call, resolved into
//! one of five mutually exclusive render states.

use bazar_api::types::SearchResults;
use bazar_api::{ItemQuery, Query};

use crate::catalog::Catalog;
use crate::error::BazarError;
use crate::location::Location;
use crate::pagination::{PageLimit, PaginationControls, PaginationState};
use crate::validation;

/// Shown when a search fails without a usable message.
pub const SEARCH_ERROR_FALLBACK: &str = "Error al buscar productos";

pub const NO_QUERY_MESSAGE: &str = "Ingresa un término de búsqueda para ver resultados";

pub const SEARCH_PLACEHOLDER: &str = "Buscar productos...";

/// What the search page shows.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderState {
    /// No search term yet.
    NoQuery,
    /// A search is in flight.
    Loading,
    /// The search failed.
    Error(String),
    /// The search succeeded with zero results.
    Empty { query: String },
    /// The search succeeded with at least one result.
    Results { query: String, page: SearchResults },
}

impl RenderState {
    /// The one-line message for non-result states.
    pub fn message(&self) -> Option<String> {
        match self {
            RenderState::NoQuery => Some(NO_QUERY_MESSAGE.to_string()),
            RenderState::Loading => None,
            RenderState::Error(message) => Some(message.clone()),
            RenderState::Empty { query } => {
                Some(format!("No se encontraron resultados para \"{}\"", query))
            }
            RenderState::Results { .. } => None,
        }
    }

    /// Heading above the results grid.
    pub fn heading(&self) -> Option<String> {
        match self {
            RenderState::Results { query, page } => Some(format!(
                "Resultados para \"{}\" ({})",
                query,
                page.results.len()
            )),
            _ => None,
        }
    }
}

/// The dependency triple a search is keyed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub limit: PageLimit,
}

impl SearchRequest {
    pub fn to_query(&self) -> ItemQuery {
        ItemQuery::default()
            .with_search(&self.query)
            .with_page(i64::from(self.page))
            .with_limit(i64::from(self.limit.value()))
    }
}

/// Proof that a fetch was started by a particular generation of the view.
#[derive(Clone, Debug)]
pub struct SearchTicket {
    generation: u64,
    request: SearchRequest,
}

impl SearchTicket {
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// Search page state machine.
///
/// Every change of `(query, page, limit)` starts a new generation; only a
/// ticket from the current generation may commit a result. Superseded
/// responses are dropped on arrival, the underlying request is not aborted.
#[derive(Debug)]
pub struct SearchView {
    state: RenderState,
    generation: u64,
    last: Option<SearchRequest>,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            state: RenderState::NoQuery,
            generation: 0,
            last: None,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Recomputes the view for a new dependency triple.
    ///
    /// Returns a ticket when a fetch must be made; the view is then `Loading`.
    /// An empty query resolves to `NoQuery` immediately, and an unchanged
    /// triple is a no-op.
    pub fn update(&mut self, query: &str, page: u32, limit: PageLimit) -> Option<SearchTicket> {
        if query.trim().is_empty() {
            self.generation += 1;
            self.last = None;
            self.state = RenderState::NoQuery;
            return None;
        }

        let request = SearchRequest {
            query: query.to_string(),
            page,
            limit,
        };
        if self.last.as_ref() == Some(&request) {
            return None;
        }

        self.generation += 1;
        self.last = Some(request.clone());
        self.state = RenderState::Loading;
        tracing::debug!(
            "search generation {}: {:?} page {} limit {}",
            self.generation,
            request.query,
            request.page,
            request.limit
        );
        Some(SearchTicket {
            generation: self.generation,
            request,
        })
    }

    /// [`update`](Self::update) with the triple read from the URL and pagination state.
    pub fn update_from(
        &mut self,
        location: &Location,
        pagination: &PaginationState,
    ) -> Option<SearchTicket> {
        let query = location.param("search").unwrap_or_default();
        self.update(query, pagination.current_page(), pagination.limit())
    }

    /// Applies a finished fetch. Returns false (and changes nothing) when the
    /// ticket belongs to a superseded generation.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: Result<SearchResults, BazarError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "dropping stale search response (generation {} < {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(page) if page.is_empty() => RenderState::Empty {
                query: ticket.request.query,
            },
            Ok(page) => RenderState::Results {
                query: ticket.request.query,
                page,
            },
            Err(err) => {
                let message = err.user_message();
                RenderState::Error(if message.trim().is_empty() {
                    SEARCH_ERROR_FALLBACK.to_string()
                } else {
                    message
                })
            }
        };
        true
    }

    /// Leaves the page. Any in-flight result will be discarded, and coming
    /// back fetches again.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.last = None;
        self.state = RenderState::NoQuery;
    }

    /// Runs a whole update/fetch/complete cycle against `catalog`.
    pub async fn refresh<C: Catalog>(
        &mut self,
        catalog: &C,
        location: &Location,
        pagination: &PaginationState,
    ) -> &RenderState {
        if let Some(ticket) = self.update_from(location, pagination) {
            let result = catalog.search(&ticket.request().to_query()).await;
            self.complete(ticket, result);
        }
        &self.state
    }

    /// Pagination controls for the current results, if any.
    pub fn controls(&self, limit: PageLimit) -> Option<PaginationControls> {
        match &self.state {
            RenderState::Results { page, .. } => Some(PaginationControls::new(
                to_page_number(page.current_page).max(1),
                to_page_number(page.total_pages),
                limit,
            )),
            _ => None,
        }
    }
}

fn to_page_number(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// The search box. Submitting a non-blank term yields the results href.
#[derive(Debug, Default)]
pub struct SearchForm {
    pub text: String,
}

impl SearchForm {
    pub fn new(default_value: &str) -> Self {
        Self {
            text: default_value.to_string(),
        }
    }

    /// The href to navigate to, or `None` when the term is blank.
    pub fn submit(&self) -> Option<String> {
        match validation::validate_search(&self.text) {
            Ok(term) => Some(Location::search_href(&term)),
            Err(e) => {
                tracing::debug!("search not submitted: {}", e);
                None
            }
        }
    }
}
