//! Page number and page size, mirrored in the `page`/`limit` URL parameters.

use std::str::FromStr;

use serde::Serialize;

use crate::error::BazarError;
use crate::location::History;

/// Page shown when the URL carries no usable `page` parameter.
pub const DEFAULT_PAGE: u32 = 1;

/// Allowed page sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PageLimit {
    Five,
    #[default]
    Ten,
    Fifteen,
}

impl PageLimit {
    /// Every allowed page size, smallest first.
    pub const ALL: [PageLimit; 3] = [PageLimit::Five, PageLimit::Ten, PageLimit::Fifteen];

    pub fn value(self) -> u32 {
        match self {
            PageLimit::Five => 5,
            PageLimit::Ten => 10,
            PageLimit::Fifteen => 15,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        PageLimit::ALL.into_iter().find(|l| l.value() == value)
    }
}

impl std::fmt::Display for PageLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for PageLimit {
    type Err = BazarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(PageLimit::from_value)
            .ok_or_else(|| {
                BazarError::InvalidInput(format!(
                    "unknown page size '{}'. Valid values: 5, 10, 15",
                    s
                ))
            })
    }
}

/// Current page and page size of a paginated view.
///
/// The URL is the source of truth on load and after external navigation;
/// local setters are the source of truth on user interaction and write back
/// to the URL with replace semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    limit: PageLimit,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: DEFAULT_PAGE,
            limit: PageLimit::default(),
        }
    }
}

impl PaginationState {
    /// Reads `page` and `limit` from the current location, falling back to the
    /// defaults for missing or unusable values.
    pub fn from_location(location: &crate::location::Location) -> Self {
        Self {
            current_page: parse_page(location.param("page")),
            limit: parse_limit(location.param("limit")),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn limit(&self) -> PageLimit {
        self.limit
    }

    /// Moves to `page` (clamped to at least 1) and rewrites only the URL's
    /// `page` parameter.
    pub fn set_current_page(&mut self, page: u32, history: &mut History) {
        self.current_page = page.max(DEFAULT_PAGE);
        let mut location = history.current().clone();
        location.set_param("page", &self.current_page.to_string());
        history.replace(location);
    }

    /// Changes the page size. The old page offset no longer means anything,
    /// so the page resets to 1; both parameters are rewritten.
    pub fn set_limit(&mut self, limit: PageLimit, history: &mut History) {
        self.limit = limit;
        self.current_page = DEFAULT_PAGE;
        let mut location = history.current().clone();
        location.set_param("page", &self.current_page.to_string());
        location.set_param("limit", &self.limit.to_string());
        history.replace(location);
    }

    /// Re-reads state from the URL after an external change (back/forward,
    /// link navigation). Never writes to the history. Returns true if either
    /// value changed.
    pub fn sync(&mut self, history: &History) -> bool {
        let fresh = Self::from_location(history.current());
        if fresh == *self {
            return false;
        }
        tracing::debug!(
            "pagination resynced from URL: page {} -> {}, limit {} -> {}",
            self.current_page,
            fresh.current_page,
            self.limit,
            fresh.limit
        );
        *self = fresh;
        true
    }
}

fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PAGE)
}

fn parse_limit(raw: Option<&str>) -> PageLimit {
    raw.and_then(|l| l.parse::<PageLimit>().ok())
        .unwrap_or_default()
}

/// Previous/next and page-size controls for a result page. Navigation is
/// disabled (returns `None`) at page 1 and at `total_pages`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub limit: PageLimit,
}

impl PaginationControls {
    pub fn new(current_page: u32, total_pages: u32, limit: PageLimit) -> Self {
        Self {
            current_page,
            total_pages,
            limit,
        }
    }

    /// The page before this one, unless already on the first page.
    pub fn previous(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    /// The page after this one, unless already on the last page.
    pub fn next(&self) -> Option<u32> {
        (self.current_page < self.total_pages).then(|| self.current_page + 1)
    }

    pub fn label(&self) -> String {
        format!("Página {} de {}", self.current_page, self.total_pages)
    }

    pub fn limit_options(&self) -> [PageLimit; 3] {
        PageLimit::ALL
    }
}
