//! Mock Google Sheets API server for testing
//!
//! Serves `GET /{spreadsheetId}/values/{range}?key=...` with the same body
//! shape as the real API: `{ "range": "...", "majorDimension": "ROWS",
//! "values": [[...], ...] }`. Every request line is recorded so tests can
//! check the path and query that were sent.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

/// Mock Sheets server for testing
pub struct MockSheetsServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<String>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// What the mock answers with
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Rows returned in `values`, header included
    pub values: Vec<Vec<JsonValue>>,
    /// Leave `values` out of the body, as the API does for an empty range
    pub omit_values: bool,
    /// Respond with this status and an error body instead of data
    pub fail_status: Option<u16>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            values: sample_values(),
            omit_values: false,
            fail_status: None,
        }
    }
}

/// Header plus three ledger rows, one of them petty cash
pub fn sample_values() -> Vec<Vec<JsonValue>> {
    vec![
        vec![
            json!("Tanggal"),
            json!("Keterangan"),
            json!("Pemasukan"),
            json!("Pengeluaran"),
            json!("Dana"),
        ],
        vec![
            json!("01/06/2024"),
            json!("Infaq Jumat"),
            json!("Rp 1.250.000"),
            json!(""),
            json!("Ummat"),
        ],
        vec![
            json!("03/06/2024"),
            json!("Listrik"),
            json!(""),
            json!("Rp 450.000"),
            json!("Ummat"),
        ],
        vec![
            json!("04/06/2024"),
            json!("Beli sapu"),
            json!(""),
            json!("Rp 35.000"),
            json!("Kas"),
        ],
    ]
}

impl MockSheetsServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = requests.clone();

        // Non-blocking so stop() can end the accept loop
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &log);
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

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Request targets (path and query) seen so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockSheetsServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<String>>) {
    // The accepted socket inherits non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);
    let mut buffer = [0; 4096];

    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", &error_body(400, "Invalid request"));
        return;
    }

    let (method, target) = (parts[0], parts[1]);
    if let Ok(mut seen) = log.lock() {
        seen.push(target.to_string());
    }

    if method != "GET" {
        send_response(
            &mut stream,
            405,
            "Method Not Allowed",
            &error_body(405, "Method not allowed"),
        );
        return;
    }

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, "Error", &error_body(status, "Mock failure"));
        return;
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if !query.split('&').any(|pair| pair.starts_with("key=") && pair.len() > 4) {
        send_response(
            &mut stream,
            403,
            "Forbidden",
            &error_body(403, "The request is missing a valid API key."),
        );
        return;
    }

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    if segments.len() != 3 || segments[1] != "values" {
        send_response(
            &mut stream,
            404,
            "Not Found",
            &error_body(404, "Requested entity was not found."),
        );
        return;
    }

    let mut body = json!({
        "range": segments[2],
        "majorDimension": "ROWS",
    });
    if !config.omit_values {
        body["values"] = JsonValue::from(config.values.clone());
    }
    send_response(&mut stream, 200, "OK", &body.to_string());
}

fn error_body(code: u16, message: &str) -> String {
    json!({ "error": { "code": code, "message": message } }).to_string()
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
    use crate::adapters::google_sheets::GoogleSheetsSource;
    use crate::domain::result::Error as DomainError;
    use crate::ports::RowSource;

    fn source_for(server: &MockSheetsServer) -> GoogleSheetsSource {
        GoogleSheetsSource::new_with_base_url(
            "sheet123",
            "test_key",
            "Dashboard",
            "A:E",
            &server.base_url(),
        )
        .unwrap()
    }

    #[test]
    fn test_mock_server_starts() {
        let server = MockSheetsServer::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
    }

    #[test]
    fn test_fetch_rows_drops_header() {
        let server = MockSheetsServer::start(MockConfig::default()).unwrap();
        let rows = source_for(&server).fetch_rows().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "01/06/2024");
        assert_eq!(rows[0][2], "Rp 1.250.000");
        assert_eq!(rows[2][4], "Kas");
    }

    #[test]
    fn test_request_target() {
        let server = MockSheetsServer::start(MockConfig::default()).unwrap();
        source_for(&server).fetch_rows().unwrap();

        assert_eq!(
            server.requests(),
            vec!["/sheet123/values/Dashboard!A:E?key=test_key".to_string()]
        );
    }

    #[test]
    fn test_ragged_and_typed_cells() {
        let server = MockSheetsServer::start(MockConfig {
            values: vec![
                vec![json!("Tanggal")],
                vec![json!("01/06/2024"), json!("Infaq"), json!(50000)],
                vec![json!("02/06/2024")],
            ],
            ..Default::default()
        })
        .unwrap();

        let rows = source_for(&server).fetch_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["01/06/2024", "Infaq", "50000"]);
        assert_eq!(rows[1], vec!["02/06/2024"]);
    }

    #[test]
    fn test_missing_values_is_empty() {
        let server = MockSheetsServer::start(MockConfig {
            omit_values: true,
            ..Default::default()
        })
        .unwrap();

        assert!(source_for(&server).fetch_rows().unwrap().is_empty());
    }

    #[test]
    fn test_header_only_is_empty() {
        let server = MockSheetsServer::start(MockConfig {
            values: vec![vec![json!("Tanggal"), json!("Keterangan")]],
            ..Default::default()
        })
        .unwrap();

        assert!(source_for(&server).fetch_rows().unwrap().is_empty());
    }

    #[test]
    fn test_status_errors() {
        for (status, needle) in [
            (400, "range"),
            (403, "API key"),
            (404, "not found"),
            (429, "quota"),
            (500, "HTTP 500"),
        ] {
            let server = MockSheetsServer::start(MockConfig {
                fail_status: Some(status),
                ..Default::default()
            })
            .unwrap();

            let err = source_for(&server).fetch_rows().unwrap_err();
            assert!(matches!(err, DomainError::Source(_)));
            assert!(
                err.to_string().contains(needle),
                "status {} gave '{}'",
                status,
                err
            );
        }
    }
}
