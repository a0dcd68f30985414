//! Nightscout REST API client

use crate::error::{MonitorError, Result};
use crate::reading::Reading;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("nightscout-monitor/", env!("CARGO_PKG_VERSION"));

/// Source of glucose entries, newest first
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Fetch up to `count` entries from the server at `base_url`
    ///
    /// Zero entries is a successful, empty result.
    async fn fetch(&self, base_url: &str, count: usize) -> Result<Vec<Reading>>;
}

/// Nightscout API client
///
/// Each fetch is a single attempt; failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct NightscoutClient {
    client: Client,
}

/// Entry as delivered on the wire; required fields are checked after decoding
#[derive(Debug, Deserialize)]
struct RawEntry {
    sgv: Option<f64>,
    date: Option<f64>,
    direction: Option<String>,
    device: Option<String>,
    unfiltered: Option<f64>,
    noise: Option<f64>,
    delta: Option<f64>,
}

impl NightscoutClient {
    /// Create a new client with reqwest defaults
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a client with a request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for NightscoutClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntrySource for NightscoutClient {
    async fn fetch(&self, base_url: &str, count: usize) -> Result<Vec<Reading>> {
        let url = entries_url(base_url, count);
        debug!(%url, "Fetching Nightscout entries");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let readings = decode_entries(&body)?;
        debug!(entries = readings.len(), "Decoded Nightscout entries");

        Ok(readings)
    }
}

/// Build the entries endpoint URL
///
/// Trailing slashes on `base_url` are dropped and `count` is at least 1.
pub fn entries_url(base_url: &str, count: usize) -> String {
    format!(
        "{}/api/v1/entries.json?count={}",
        base_url.trim_end_matches('/'),
        count.max(1)
    )
}

/// Decode an entries response body
///
/// An empty body or JSON `null` yields no readings. Every entry must carry
/// `sgv` and `date`; a single bad entry fails the whole batch so a partial
/// series is never shown.
pub fn decode_entries(body: &str) -> Result<Vec<Reading>> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let entries = match serde_json::from_str::<Value>(body)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        other => {
            return Err(MonitorError::MalformedData(format!(
                "expected an array of entries, got {}",
                json_kind(&other)
            )));
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect()
}

fn decode_entry(index: usize, entry: Value) -> Result<Reading> {
    let raw: RawEntry = serde_json::from_value(entry)
        .map_err(|e| MonitorError::MalformedData(format!("entry {index}: {e}")))?;

    let raw_value = raw
        .sgv
        .ok_or_else(|| MonitorError::MalformedData(format!("entry {index} has no `sgv`")))?;
    let date = raw
        .date
        .ok_or_else(|| MonitorError::MalformedData(format!("entry {index} has no `date`")))?;
    let timestamp = DateTime::from_timestamp_millis(date as i64).ok_or_else(|| {
        MonitorError::MalformedData(format!("entry {index} has out-of-range `date` {date}"))
    })?;

    Ok(Reading {
        timestamp,
        raw_value,
        trend_code: raw.direction,
        device_label: raw.device,
        raw_unfiltered: raw.unfiltered,
        noise_level: raw.noise,
        delta: raw.delta,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    async fn respond(socket: &mut TcpStream, status_line: &str, body: &str) -> String {
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        request.lines().next().unwrap_or_default().to_string()
    }

    /// Serve one canned HTTP response and report the request line received
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request_line = respond(&mut socket, status_line, body).await;
            let _ = tx.send(request_line);
        });

        (format!("http://{addr}/"), rx)
    }

    /// Answer every connection with the same response and count them
    async fn serve_counting(status_line: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&connections);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                respond(&mut socket, status_line, "").await;
            }
        });

        (format!("http://{addr}"), connections)
    }

    fn local_client() -> NightscoutClient {
        NightscoutClient::from_client(Client::builder().no_proxy().build().unwrap())
    }

    #[test]
    fn test_entries_url_strips_trailing_slash() {
        assert_eq!(
            entries_url("https://ns.example.org/", 12),
            "https://ns.example.org/api/v1/entries.json?count=12"
        );
        assert_eq!(
            entries_url("https://ns.example.org", 0),
            "https://ns.example.org/api/v1/entries.json?count=1"
        );
    }

    #[test]
    fn test_decode_full_entry() {
        let body = r#"[{
            "_id": "abc", "type": "sgv",
            "sgv": 142, "date": 1700000000000, "direction": "FortyFiveUp",
            "device": "xDrip-DexcomG6", "unfiltered": 151234, "noise": 1, "delta": -3.5
        }]"#;

        let readings = decode_entries(body).unwrap();
        assert_eq!(readings.len(), 1);

        let reading = &readings[0];
        assert_eq!(reading.raw_value, 142.0);
        assert_eq!(reading.epoch_millis(), 1_700_000_000_000);
        assert_eq!(reading.trend_code.as_deref(), Some("FortyFiveUp"));
        assert_eq!(reading.device_label.as_deref(), Some("xDrip-DexcomG6"));
        assert_eq!(reading.raw_unfiltered, Some(151_234.0));
        assert_eq!(reading.noise_level, Some(1.0));
        assert_eq!(reading.delta, Some(-3.5));
    }

    #[test]
    fn test_decode_keeps_upstream_order() {
        let body = r#"[{"sgv": 120, "date": 1700000600000}, {"sgv": 110, "date": 1700000300000}]"#;
        let readings = decode_entries(body).unwrap();
        assert_eq!(readings[0].raw_value, 120.0);
        assert_eq!(readings[1].raw_value, 110.0);
    }

    #[test]
    fn test_decode_empty_outcomes() {
        assert!(decode_entries("").unwrap().is_empty());
        assert!(decode_entries("  \n").unwrap().is_empty());
        assert!(decode_entries("[]").unwrap().is_empty());
        assert!(decode_entries("null").unwrap().is_empty());
    }

    #[test]
    fn test_decode_missing_fields_fails_whole_batch() {
        let body = r#"[{"sgv": 120, "date": 1700000600000}, {"date": 1700000300000}]"#;
        let err = decode_entries(body).unwrap_err();
        assert!(matches!(
            err,
            MonitorError::MalformedData(ref msg) if msg.contains("entry 1") && msg.contains("sgv")
        ));

        let err = decode_entries(r#"[{"sgv": 120}]"#).unwrap_err();
        assert!(matches!(err, MonitorError::MalformedData(ref msg) if msg.contains("date")));
    }

    #[test]
    fn test_decode_wrong_shapes() {
        assert!(matches!(
            decode_entries(r#"{"status": "ok"}"#),
            Err(MonitorError::MalformedData(_))
        ));
        assert!(matches!(
            decode_entries(r#"[{"sgv": "high", "date": 1}]"#),
            Err(MonitorError::MalformedData(_))
        ));
        assert!(matches!(decode_entries("[1, 2"), Err(MonitorError::Json(_))));
    }

    #[tokio::test]
    async fn test_fetch_server_error_carries_status() {
        let (url, _request) = serve_once("500 Internal Server Error", "").await;

        let err = local_client().fetch(&url, 1).await.unwrap_err();
        assert!(matches!(err, MonitorError::Fetch { status: 500 }));
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_retried() {
        let (url, connections) = serve_counting("500 Internal Server Error").await;

        let err = local_client().fetch(&url, 12).await.unwrap_err();
        assert!(matches!(err, MonitorError::Fetch { status: 500 }));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_empty_array_is_not_an_error() {
        let (url, _request) = serve_once("200 OK", "[]").await;

        let readings = local_client().fetch(&url, 1).await.unwrap();
        assert!(readings.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_not_an_error() {
        let (url, _request) = serve_once("200 OK", "").await;

        let readings = local_client().fetch(&url, 1).await.unwrap();
        assert!(readings.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_requests_entries_path() {
        let (url, request) = serve_once(
            "200 OK",
            r#"[{"sgv": 99, "date": 1700000000000, "direction": "Flat"}]"#,
        )
        .await;

        let readings = local_client().fetch(&url, 12).await.unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].trend_code.as_deref(), Some("Flat"));

        let request_line = request.await.unwrap();
        assert!(
            request_line.starts_with("GET /api/v1/entries.json?count=12 "),
            "{request_line}"
        );
    }

    #[tokio::test]
    async fn test_fetch_malformed_entries() {
        let (url, _request) = serve_once("200 OK", r#"[{"direction": "Flat"}]"#).await;

        let err = local_client().fetch(&url, 1).await.unwrap_err();
        assert!(matches!(err, MonitorError::MalformedData(_)));
    }
}
