//! Google Books API client
//!
//! Looks books up in the public Google Books catalogue. One unauthenticated
//! GET per search, first page only.
//!
//! API Documentation: https://developers.google.com/books/docs/v1/using

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::SearchConfig;
use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::domain::Book;
use crate::ports::BookSearchProvider;

// =============================================================================
// API Response Models (subset of the volumes resource)
// =============================================================================

/// Response of `GET /volumes`
///
/// Items are kept as raw JSON so one malformed volume does not fail the page.
#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<JsonValue>,
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    authors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    categories: Vec<String>,
    description: Option<String>,
    published_date: Option<String>,
    average_rating: Option<f32>,
    page_count: Option<u32>,
    language: Option<String>,
    image_links: Option<ImageLinks>,
    #[serde(default, deserialize_with = "null_as_default")]
    industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    identifier: String,
}

// =============================================================================
// Google Books HTTP Client
// =============================================================================

/// Default production endpoint
pub const GOOGLE_BOOKS_DEFAULT_URL: &str = "https://www.googleapis.com/books/v1/volumes";

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Google Books API client
#[derive(Debug)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl GoogleBooksClient {
    /// Create a client with a custom endpoint and default timeouts
    pub fn new_with_base_url(base_url: &str) -> Result<Self> {
        Self::from_config(&SearchConfig::default().with_base_url(base_url))
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            anyhow::bail!("Search base URL cannot be empty");
        }

        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    /// Full request URL for a query, form-encoded (spaces become `+`)
    fn request_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}?q={}", self.base_url, encoded)
    }

    /// Search the catalogue. Blank queries return no results without a request.
    pub fn search(&self, query: &str) -> Result<Vec<Book>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.request_url(query);
        debug!(%url, "searching Google Books");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        let body: VolumesResponse = response
            .json()
            .context("Failed to parse Google Books response")?;

        let books = body
            .items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Volume>(item) {
                Ok(volume) => Some(self.map_volume(volume)),
                Err(e) => {
                    warn!("Skipping undecodable Google Books item: {}", e);
                    None
                }
            })
            .collect();

        Ok(books)
    }

    /// Convert a volume into a book, defaulting missing fields
    fn map_volume(&self, volume: Volume) -> Book {
        let info = volume.volume_info;

        let title = info
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let author = if info.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            info.authors.join(", ")
        };
        let id = volume
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let isbn = pick_isbn(&info.industry_identifiers);

        let mut book = Book::with_id(id, title, author).with_categories(info.categories);
        book.description = info.description;
        book.published_year = info.published_date.as_deref().and_then(extract_year);
        book.rating = info.average_rating;
        book.page_count = info.page_count;
        book.language = info.language;
        book.cover_url = info.image_links.and_then(|links| links.thumbnail);
        book.isbn = isbn;
        book
    }

    /// Map reqwest errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            anyhow::anyhow!(
                "Google Books request timed out after {} seconds",
                self.request_timeout.as_secs()
            )
        } else if error.is_connect() {
            anyhow::anyhow!("Unable to connect to Google Books")
        } else {
            anyhow::anyhow!("Google Books request failed: {}", error)
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, response: &reqwest::blocking::Response) -> Result<()> {
        match response.status().as_u16() {
            200 => Ok(()),
            429 => anyhow::bail!("Google Books rate limit exceeded"),
            status => anyhow::bail!("Google Books API error: HTTP {}", status),
        }
    }
}

/// Prefer ISBN_13, fall back to ISBN_10
fn pick_isbn(identifiers: &[IndustryIdentifier]) -> Option<String> {
    ["ISBN_13", "ISBN_10"].iter().find_map(|kind| {
        identifiers
            .iter()
            .find(|id| id.kind == *kind && !id.identifier.is_empty())
            .map(|id| id.identifier.clone())
    })
}

/// Leading four-digit year of a date like "2022", "2022-05" or "2022-05-01"
fn extract_year(date: &str) -> Option<i32> {
    let year = date.get(..4)?;
    if year.chars().all(|c| c.is_ascii_digit()) {
        year.parse().ok()
    } else {
        None
    }
}

// =============================================================================
// GoogleBooksProvider - implements BookSearchProvider
// =============================================================================

/// Google Books search provider
///
/// Builds a blocking client per search, so it must be called off the async
/// runtime (`SearchService` uses the blocking pool).
pub struct GoogleBooksProvider {
    config: SearchConfig,
}

impl GoogleBooksProvider {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl BookSearchProvider for GoogleBooksProvider {
    fn name(&self) -> &str {
        "google_books"
    }

    fn search(&self, query: &str) -> DomainResult<Vec<Book>> {
        let client = GoogleBooksClient::from_config(&self.config)
            .map_err(|e| DomainError::Config(e.to_string()))?;
        client
            .search(query)
            .map_err(|e| DomainError::Search(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(json: JsonValue) -> Volume {
        serde_json::from_value(json).unwrap()
    }

    fn client() -> GoogleBooksClient {
        GoogleBooksClient::new_with_base_url("http://localhost").unwrap()
    }

    #[test]
    fn test_provider_name() {
        let provider = GoogleBooksProvider::new(SearchConfig::default());
        assert_eq!(provider.name(), "google_books");
    }

    #[test]
    fn test_reject_empty_base_url() {
        let result = GoogleBooksClient::new_with_base_url("  ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_query_is_form_encoded() {
        let url = client().request_url("of mice & men");
        assert_eq!(url, "http://localhost?q=of+mice+%26+men");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GoogleBooksClient::new_with_base_url("http://localhost/volumes/").unwrap();
        assert_eq!(client.base_url, "http://localhost/volumes");
    }

    #[test]
    fn test_full_volume_mapping() {
        let book = client().map_volume(volume(serde_json::json!({
            "id": "zyTCAlFPjgYC",
            "volumeInfo": {
                "title": "The Housemaid",
                "authors": ["Freida McFadden"],
                "categories": ["Thriller", "Mystery"],
                "description": "Welcome to the family.",
                "publishedDate": "2022-04-26",
                "averageRating": 4.2,
                "pageCount": 320,
                "language": "en",
                "imageLinks": { "thumbnail": "http://books.google.com/cover.jpg" },
                "industryIdentifiers": [
                    { "type": "ISBN_10", "identifier": "1538742578" },
                    { "type": "ISBN_13", "identifier": "9781538742570" }
                ]
            }
        })));

        assert_eq!(book.id, "zyTCAlFPjgYC");
        assert_eq!(book.title, "The Housemaid");
        assert_eq!(book.author, "Freida McFadden");
        assert_eq!(book.categories, vec!["Thriller", "Mystery"]);
        assert_eq!(book.published_year, Some(2022));
        assert_eq!(book.rating, Some(4.2));
        assert_eq!(book.page_count, Some(320));
        assert_eq!(book.language.as_deref(), Some("en"));
        assert_eq!(book.cover_url.as_deref(), Some("http://books.google.com/cover.jpg"));
        assert_eq!(book.isbn.as_deref(), Some("9781538742570"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let book = client().map_volume(volume(serde_json::json!({ "volumeInfo": {} })));

        assert_eq!(book.title, "Unknown Title");
        assert_eq!(book.author, "Unknown Author");
        assert!(book.categories.is_empty());
        assert!(book.isbn.is_none());
        assert!(Uuid::parse_str(&book.id).is_ok());
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let book = client().map_volume(volume(serde_json::json!({
            "id": "x",
            "volumeInfo": {
                "title": "T",
                "authors": null,
                "categories": null,
                "industryIdentifiers": null,
                "imageLinks": null
            }
        })));
        assert_eq!(book.title, "T");
        assert_eq!(book.author, "Unknown Author");
        assert!(book.categories.is_empty());
        assert!(book.isbn.is_none());
        assert!(book.cover_url.is_none());

        let book = client().map_volume(volume(serde_json::json!({
            "id": "y",
            "volumeInfo": null
        })));
        assert_eq!(book.title, "Unknown Title");

        let ids = volume(serde_json::json!({
            "volumeInfo": {
                "industryIdentifiers": [
                    { "type": "ISBN_13", "identifier": null },
                    { "type": "ISBN_10", "identifier": "0140177396" }
                ]
            }
        }));
        assert_eq!(client().map_volume(ids).isbn.as_deref(), Some("0140177396"));
    }

    #[test]
    fn test_multiple_authors_joined() {
        let book = client().map_volume(volume(serde_json::json!({
            "id": "x",
            "volumeInfo": { "title": "Good Omens", "authors": ["Terry Pratchett", "Neil Gaiman"] }
        })));
        assert_eq!(book.author, "Terry Pratchett, Neil Gaiman");
    }

    #[test]
    fn test_isbn_10_used_without_isbn_13() {
        let ids = vec![
            IndustryIdentifier { kind: "OTHER".into(), identifier: "UOM:39015".into() },
            IndustryIdentifier { kind: "ISBN_10".into(), identifier: "0140177396".into() },
        ];
        assert_eq!(pick_isbn(&ids).as_deref(), Some("0140177396"));
        assert_eq!(pick_isbn(&[]), None);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("1937"), Some(1937));
        assert_eq!(extract_year("1960-07-11"), Some(1960));
        assert_eq!(extract_year("19"), None);
        assert_eq!(extract_year("n.d."), None);
    }

    #[test]
    fn test_blank_query_skips_request() {
        // Unroutable endpoint: a request would fail
        let client = GoogleBooksClient::new_with_base_url("http://127.0.0.1:1").unwrap();
        assert!(client.search("   ").unwrap().is_empty());
    }
}
