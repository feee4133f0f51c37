//! Open Library catalog: query validation, wire types, cover resolution
//! and the HTTP client.

pub mod api;
pub mod cover;
pub mod query;
pub mod types;

pub use api::{Catalog, OpenLibraryClient};
pub use cover::cover_url;
pub use query::Query;
pub use types::{BookDoc, ResultSet};
