//! Search controller: owns the results view state
//!
//! `Idle -> Loading -> {Populated | Idle(no results) | Error} -> Loading -> ...`
//!
//! Every submission bumps a generation counter. A search that settles after
//! a newer submission is dropped instead of overwriting the newer view.

use std::future::Future;
use std::sync::Arc;

use crate::catalog::{Catalog, Query, ResultSet};
use crate::error::SearchError;

pub const IDLE_MESSAGE: &str = "No search yet. Enter a keyword and press Search.";
pub const LOADING_MESSAGE: &str = "Searching...";
pub const NO_RESULTS_MESSAGE: &str = "No results found for this query.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error or service problem. Please try again.";

/// What the results area currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle(String),
    Loading,
    Populated(ResultSet),
    Error(String),
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Idle(IDLE_MESSAGE.to_string())
    }
}

impl ViewState {
    /// Line shown above (or instead of) the result list
    pub fn message(&self) -> String {
        match self {
            ViewState::Idle(msg) | ViewState::Error(msg) => msg.clone(),
            ViewState::Loading => LOADING_MESSAGE.to_string(),
            ViewState::Populated(results) => results.summary(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }

    /// Records to render as cards; empty outside `Populated`
    pub fn books(&self) -> &[crate::catalog::BookDoc] {
        match self {
            ViewState::Populated(results) => &results.books,
            _ => &[],
        }
    }
}

/// Outcome of one search, tagged with the submission that started it
#[derive(Debug, Clone)]
pub struct Settled {
    pub generation: u64,
    pub outcome: Result<ResultSet, Arc<SearchError>>,
}

pub struct SearchController<C> {
    catalog: Arc<C>,
    state: ViewState,
    generation: u64,
}

impl<C: Catalog> SearchController<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            state: ViewState::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle a form submission.
    ///
    /// Returns the pending search, or `None` when the input was rejected and
    /// no request should be made. The returned future must be fed back
    /// through [`SearchController::on_settled`].
    pub fn on_submit(&mut self, raw: &str) -> Option<impl Future<Output = Settled> + Send + 'static> {
        self.generation += 1;
        let generation = self.generation;

        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(e) => {
                tracing::warn!("Rejected search input: {}", e);
                self.state = ViewState::Error(e.to_string());
                return None;
            }
        };

        tracing::info!("Search #{} started: {}", generation, query);
        self.state = ViewState::Loading;

        let catalog = Arc::clone(&self.catalog);
        Some(async move {
            let outcome = catalog.search(&query).await.map_err(Arc::new);
            Settled { generation, outcome }
        })
    }

    /// Apply a finished search. Returns `false` if it was superseded.
    pub fn on_settled(&mut self, settled: Settled) -> bool {
        if settled.generation != self.generation {
            tracing::debug!(
                "Dropping stale search #{} (latest is #{})",
                settled.generation,
                self.generation
            );
            return false;
        }

        self.state = match settled.outcome {
            Ok(results) if results.is_empty() => ViewState::Idle(NO_RESULTS_MESSAGE.to_string()),
            Ok(results) => ViewState::Populated(results),
            Err(e) => {
                tracing::error!(status = ?e.status(), "Search #{} failed: {}", settled.generation, e);
                ViewState::Error(NETWORK_ERROR_MESSAGE.to_string())
            }
        };
        true
    }
}
