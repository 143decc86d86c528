#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use apiwatch_core::diff::ChangeReport;
use apiwatch_core::errors::{ExError, ExErrorKind, Result, WatchError};
use apiwatch_core::notifier::Notifier;
use apiwatch_core::source::DocumentSource;
use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::thread::JoinHandle;

/// Source that always returns the same bytes
pub struct StaticSource {
    pub url: String,
    pub body: Vec<u8>,
}

impl StaticSource {
    pub fn json(value: &Value) -> Self {
        Self::raw(serde_json::to_vec(value).unwrap())
    }

    pub fn raw(body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: "https://api.test/oas/docs".to_string(),
            body: body.into(),
        }
    }
}

impl DocumentSource for StaticSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        Ok(self.body.clone())
    }
}

/// Source that always fails with a non-2xx status
pub struct FailingSource {
    pub status: u16,
}

impl DocumentSource for FailingSource {
    fn location(&self) -> &str {
        "https://api.test/oas/docs"
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        Err(WatchError::FetchStatus {
            url: self.location().to_string(),
            status: self.status,
        }
        .into())
    }
}

/// Notifier that records every report it is handed
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    reports: Mutex<Vec<ChangeReport>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn reports(&self) -> Vec<ChangeReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, report: &ChangeReport) -> Result<()> {
        self.reports.lock().unwrap().push(report.clone());
        if self.fail {
            return Err(ExError::new(ExErrorKind::Notify)
                .with_op("notify")
                .with_status(500)
                .with_message("webhook rejected payload"));
        }
        Ok(())
    }
}

/// Request line, headers and body seen by [`serve_once`]
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Answer exactly one HTTP request on a loopback port.
///
/// Returns the base URL and a handle yielding the captured request.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_string(), v.trim().to_string()));
            }
        }

        let length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);
        let mut request_body = vec![0u8; length];
        reader.read_exact(&mut request_body).unwrap();

        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: request_body,
        }
    });

    (format!("http://{}", addr), handle)
}

/// Client that ignores proxy environment variables
pub fn direct_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
