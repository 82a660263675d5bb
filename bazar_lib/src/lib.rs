//! Library layer for the Bazar storefront: view state machines driven by the
//! catalog API client.
//!
//! Every page of the storefront (search results, product detail, create form)
//! is modelled as a plain state value that is advanced by location changes and
//! by completed catalog calls. Nothing here renders; the CLI decides how each
//! render state is shown.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod form;
pub mod location;
pub mod notify;
pub mod pagination;
pub mod preview;
pub mod rating;
pub mod routes;
pub mod search;
pub mod shell;
pub mod validation;

pub use bazar_api;
pub use bazar_api::types;
pub use bazar_api::{ItemQuery, Query};

pub use catalog::Catalog;
pub use config::{Config, ConfigError};
pub use error::BazarError;
pub use location::{History, Location};
pub use notify::{Level, Notification, Notifications};
pub use pagination::{PageLimit, PaginationControls, PaginationState};
pub use routes::Route;
pub use shell::{Page, Shell};
