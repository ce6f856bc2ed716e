//! Mock Google Books API server for testing
//!
//! Serves `GET /volumes?q=...` with the same response structure as the real
//! catalogue: `{ "kind": "books#volumes", "totalItems": N, "items": [...] }`.
//! Every request is recorded so tests can assert on the query sent.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use serde_json::json;

/// Mock Google Books server for testing
pub struct MockGoogleBooksServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<String>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of volumes to return
    pub num_items: usize,
    /// Omit the `items` key entirely (what the API does for zero hits)
    pub omit_items: bool,
    /// Append one item that cannot be decoded as a volume
    pub include_malformed_item: bool,
    /// Respond with this HTTP status instead of 200
    pub fail_status: Option<u16>,
    /// Respond with a body that is not JSON
    pub invalid_json: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            num_items: 3,
            omit_items: false,
            include_malformed_item: false,
            fail_status: None,
            invalid_json: false,
            delay_ms: 0,
        }
    }
}

impl MockGoogleBooksServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = requests.clone();

        // Non-blocking accept so the loop can observe shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let requests = requests_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &requests);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Endpoint to hand to the client
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/volumes", self.port)
    }

    /// Request targets (path and query) received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockGoogleBooksServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, requests: &Mutex<Vec<String>>) {
    // Accepted sockets inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);
    let mut buffer = [0; 4096];

    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    }
    let (method, target) = (parts[0], parts[1]);
    requests.lock().push(target.to_string());

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, "Error", r#"{"error": {"message": "mock failure"}}"#);
        return;
    }

    let path = target.split('?').next().unwrap_or(target);
    if method != "GET" || path != "/volumes" {
        send_response(&mut stream, 404, "Not Found", r#"{"error": "Endpoint not found"}"#);
        return;
    }

    if config.invalid_json {
        send_response(&mut stream, 200, "OK", "<html>not json</html>");
        return;
    }

    let body = volumes_body(config);
    send_response(&mut stream, 200, "OK", &body.to_string());
}

fn volumes_body(config: &MockConfig) -> serde_json::Value {
    if config.omit_items {
        return json!({ "kind": "books#volumes", "totalItems": 0 });
    }

    let mut items: Vec<serde_json::Value> = generate_volumes(config.num_items);
    if config.include_malformed_item {
        // volumeInfo must be an object
        items.push(json!({ "id": "broken", "volumeInfo": "not an object" }));
    }

    json!({
        "kind": "books#volumes",
        "totalItems": items.len(),
        "items": items,
    })
}

fn generate_volumes(count: usize) -> Vec<serde_json::Value> {
    let titles = [
        ("Of Mice and Men", "John Steinbeck", "Fiction", "1937"),
        ("The Housemaid", "Freida McFadden", "Thriller", "2022-04-26"),
        ("To Kill a Mockingbird", "Harper Lee", "Classics", "1960-07-11"),
        ("Dune", "Frank Herbert", "Science Fiction", "1965-08"),
    ];

    (0..count)
        .map(|i| {
            let (title, author, category, date) = titles[i % titles.len()];
            json!({
                "kind": "books#volume",
                "id": format!("vol{}", i + 1),
                "volumeInfo": {
                    "title": title,
                    "authors": [author],
                    "categories": [category],
                    "publishedDate": date,
                    "averageRating": 4.0,
                    "pageCount": 100 + i * 10,
                    "language": "en",
                    "imageLinks": { "thumbnail": format!("http://books.example.com/vol{}.jpg", i + 1) },
                    "industryIdentifiers": [
                        { "type": "ISBN_13", "identifier": format!("978000000{:04}", i + 1) }
                    ]
                }
            })
        })
        .collect()
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::google_books::{GoogleBooksClient, GoogleBooksProvider};
    use crate::config::SearchConfig;
    use crate::ports::BookSearchProvider;

    #[test]
    fn test_mock_server_volumes() {
        let server = MockGoogleBooksServer::start(MockConfig {
            num_items: 4,
            ..Default::default()
        })
        .unwrap();

        let client = GoogleBooksClient::new_with_base_url(&server.base_url()).unwrap();
        let books = client.search("classic novels").unwrap();

        assert_eq!(books.len(), 4);
        assert_eq!(books[0].id, "vol1");
        assert_eq!(books[0].title, "Of Mice and Men");
        assert_eq!(books[2].published_year, Some(1960));
        assert_eq!(server.requests(), vec!["/volumes?q=classic+novels".to_string()]);
    }

    #[test]
    fn test_zero_items_is_empty() {
        let server = MockGoogleBooksServer::start(MockConfig {
            omit_items: true,
            ..Default::default()
        })
        .unwrap();

        let client = GoogleBooksClient::new_with_base_url(&server.base_url()).unwrap();
        assert!(client.search("zzzzqqq").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_item_skipped() {
        let server = MockGoogleBooksServer::start(MockConfig {
            num_items: 2,
            include_malformed_item: true,
            ..Default::default()
        })
        .unwrap();

        let client = GoogleBooksClient::new_with_base_url(&server.base_url()).unwrap();
        let books = client.search("mice").unwrap();
        assert_eq!(books.len(), 2);
        assert!(books.iter().all(|b| b.id != "broken"));
    }

    #[test]
    fn test_non_200_is_error() {
        let server = MockGoogleBooksServer::start(MockConfig {
            fail_status: Some(503),
            ..Default::default()
        })
        .unwrap();

        let client = GoogleBooksClient::new_with_base_url(&server.base_url()).unwrap();
        let err = client.search("mice").unwrap_err();
        assert!(err.to_string().contains("HTTP 503"), "got: {}", err);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let server = MockGoogleBooksServer::start(MockConfig {
            invalid_json: true,
            ..Default::default()
        })
        .unwrap();

        let client = GoogleBooksClient::new_with_base_url(&server.base_url()).unwrap();
        assert!(client.search("mice").is_err());
    }

    #[test]
    fn test_timeout_is_error() {
        let server = MockGoogleBooksServer::start(MockConfig {
            delay_ms: 2_000,
            ..Default::default()
        })
        .unwrap();

        let config = SearchConfig {
            base_url: server.base_url(),
            connect_timeout_secs: 1,
            request_timeout_secs: 1,
        };
        let client = GoogleBooksClient::from_config(&config).unwrap();
        let err = client.search("mice").unwrap_err();
        assert!(err.to_string().contains("timed out"), "got: {}", err);
    }

    #[test]
    fn test_provider_maps_to_search_error() {
        let server = MockGoogleBooksServer::start(MockConfig {
            fail_status: Some(429),
            ..Default::default()
        })
        .unwrap();

        let provider = GoogleBooksProvider::new(SearchConfig::default().with_base_url(server.base_url()));
        let err = provider.search("mice").unwrap_err();
        assert!(matches!(err, crate::domain::result::Error::Search(_)));
        assert!(err.to_string().contains("rate limit"));
    }
}
