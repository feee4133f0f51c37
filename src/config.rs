//! Runtime configuration
//!
//! Endpoints default to the public Open Library services and can be
//! overridden through environment variables (handy for pointing the app at
//! a mirror or a local mock).

use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://openlibrary.org/search.json";
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org/b";
pub const DEFAULT_SITE_ORIGIN: &str = "https://openlibrary.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Endpoints used to build outbound links on result cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    /// Base of the cover image service, e.g. `https://covers.openlibrary.org/b`
    pub covers_base: String,
    /// Origin prepended to a record key for its detail page
    pub site_origin: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            covers_base: DEFAULT_COVERS_URL.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub search_url: String,
    pub links: Links,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            links: Links::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load from `BOOKFINDER_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_secs = match lookup("BOOKFINDER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        "Ignoring invalid BOOKFINDER_TIMEOUT_SECS={:?}, using {}s",
                        raw,
                        DEFAULT_TIMEOUT_SECS
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            search_url: url("BOOKFINDER_SEARCH_URL", DEFAULT_SEARCH_URL),
            links: Links {
                covers_base: url("BOOKFINDER_COVERS_URL", DEFAULT_COVERS_URL),
                site_origin: url("BOOKFINDER_SITE_ORIGIN", DEFAULT_SITE_ORIGIN),
            },
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
