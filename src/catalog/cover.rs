//! Cover image resolution
//!
//! A record may carry several cover identifiers. They are tried in a fixed
//! order: numeric cover id, then edition key, then the first ISBN.

use super::types::BookDoc;

/// Size suffix requested from the cover service (S, M or L)
const COVER_SIZE: &str = "M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    Id(i64),
    EditionKey(String),
    Isbn(String),
}

impl CoverSource {
    pub fn resolve(doc: &BookDoc) -> Option<Self> {
        if let Some(id) = doc.cover_i.filter(|id| *id > 0) {
            return Some(CoverSource::Id(id));
        }
        if let Some(key) = doc.cover_edition_key.as_deref().filter(|k| !k.is_empty()) {
            return Some(CoverSource::EditionKey(key.to_string()));
        }
        doc.isbn
            .first()
            .filter(|isbn| !isbn.is_empty())
            .map(|isbn| CoverSource::Isbn(isbn.clone()))
    }

    pub fn url(&self, covers_base: &str) -> String {
        match self {
            CoverSource::Id(id) => format!("{covers_base}/id/{id}-{COVER_SIZE}.jpg"),
            CoverSource::EditionKey(key) => format!("{covers_base}/olid/{key}-{COVER_SIZE}.jpg"),
            CoverSource::Isbn(isbn) => format!("{covers_base}/isbn/{isbn}-{COVER_SIZE}.jpg"),
        }
    }
}

/// Cover URL for `doc`, or `None` when the caller should show a placeholder
pub fn cover_url(doc: &BookDoc, covers_base: &str) -> Option<String> {
    CoverSource::resolve(doc).map(|source| source.url(covers_base))
}
