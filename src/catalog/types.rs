//! Wire records returned by the catalog search endpoint

use serde::{Deserialize, Serialize};

/// Maximum number of records requested and shown per search
pub const PAGE_SIZE: usize = 20;

/// One matched record. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDoc {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub publisher: Vec<String>,
    /// Stable path such as `/works/OL45804W`
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub cover_edition_key: Option<String>,
    #[serde(default)]
    pub isbn: Vec<String>,
}

/// Raw response body of `search.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, rename = "numFound", alias = "num_found")]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<BookDoc>,
}

/// Total match count plus the first page of records, in service order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub total: u64,
    pub books: Vec<BookDoc>,
}

impl ResultSet {
    pub fn from_response(response: SearchResponse) -> Self {
        let mut books = response.docs;
        books.truncate(PAGE_SIZE);
        Self {
            total: response.num_found,
            books,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// "Found 150 results. Showing first 20."
    pub fn summary(&self) -> String {
        format!(
            "Found {} results. Showing first {}.",
            self.total,
            self.books.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sparse_doc() {
        let body = r#"{"numFound": 1, "start": 0, "docs": [{"title": "Dune", "ebook_access": "borrowable"}]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.num_found, 1);
        let doc = &response.docs[0];
        assert_eq!(doc.title.as_deref(), Some("Dune"));
        assert!(doc.author_name.is_empty());
        assert!(doc.publisher.is_empty());
        assert!(doc.first_publish_year.is_none());
        assert!(doc.cover_i.is_none());
    }

    #[test]
    fn test_parse_snake_case_total() {
        let response: SearchResponse = serde_json::from_str(r#"{"num_found": 7, "docs": []}"#).unwrap();
        assert_eq!(response.num_found, 7);
    }

    #[test]
    fn test_missing_docs_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        let set = ResultSet::from_response(response);
        assert!(set.is_empty());
        assert_eq!(set.total, 0);
    }

    #[test]
    fn test_truncates_to_page_size() {
        let docs = (0..25)
            .map(|i| BookDoc {
                title: Some(format!("Book {i}")),
                ..Default::default()
            })
            .collect();
        let set = ResultSet::from_response(SearchResponse { num_found: 300, docs });
        assert_eq!(set.len(), PAGE_SIZE);
        assert_eq!(set.books[0].title.as_deref(), Some("Book 0"));
        assert_eq!(set.books[19].title.as_deref(), Some("Book 19"));
        assert_eq!(set.summary(), "Found 300 results. Showing first 20.");
    }
}
