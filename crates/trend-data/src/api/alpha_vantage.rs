//! Alpha Vantage API client

use crate::api::DailySeriesSource;
use crate::error::{Result, StockError};
use crate::price::{PriceRow, PriceTable};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Top-level key of a `TIME_SERIES_DAILY` response
pub const TIME_SERIES_DAILY_KEY: &str = "Time Series (Daily)";

/// Alpha Vantage API client
///
/// One request per call: no retries, no rate limiting.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different query endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get daily time series data
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn get_daily(&self, symbol: &str) -> Result<PriceTable> {
        let params = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Quote request for {} failed with {}", symbol, status);
            return Err(StockError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let data: serde_json::Value = response.json().await?;
        let table = parse_daily_payload(symbol, data)?;
        info!("Fetched {} daily rows for {}", table.len(), symbol);
        Ok(table)
    }
}

#[async_trait]
impl DailySeriesSource for AlphaVantageClient {
    async fn fetch_daily(&self, symbol: &str) -> Result<PriceTable> {
        self.get_daily(symbol).await
    }
}

/// Parse a `TIME_SERIES_DAILY` response body into an ascending table
///
/// Every OHLCV field must coerce to a number; a bad value fails the whole
/// payload instead of being zeroed.
pub fn parse_daily_payload(symbol: &str, data: serde_json::Value) -> Result<PriceTable> {
    let Some(series) = data.get(TIME_SERIES_DAILY_KEY) else {
        for hint in ["Error Message", "Note", "Information"] {
            if let Some(message) = data.get(hint) {
                debug!("Provider {}: {}", hint, message);
            }
        }
        return Err(StockError::MissingTimeSeries { payload: data });
    };

    let obj = series.as_object().ok_or_else(|| {
        StockError::MalformedPayload(format!("'{TIME_SERIES_DAILY_KEY}' is not an object"))
    })?;

    let mut rows = Vec::with_capacity(obj.len());
    for (date, values) in obj {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| StockError::InvalidDate(date.clone()))?;

        rows.push(PriceRow {
            date: parsed,
            open: numeric_field(date, values, "1. open", "open")?,
            high: numeric_field(date, values, "2. high", "high")?,
            low: numeric_field(date, values, "3. low", "low")?,
            close: numeric_field(date, values, "4. close", "close")?,
            volume: numeric_field(date, values, "5. volume", "volume")?,
        });
    }

    PriceTable::new(symbol, rows)
}

/// Read one string- or number-encoded field of a day's sub-object
fn numeric_field(
    date: &str,
    values: &serde_json::Value,
    key: &str,
    field: &'static str,
) -> Result<f64> {
    let invalid = |value: String| StockError::InvalidField {
        date: date.to_string(),
        field,
        value,
    };

    match values.get(key) {
        Some(serde_json::Value::String(s)) => s.trim().parse().map_err(|_| invalid(s.clone())),
        Some(serde_json::Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(n.to_string())),
        Some(other) => Err(invalid(other.to_string())),
        None => Err(invalid("<missing>".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PriceStore;
    use serde_json::json;
    use std::net::SocketAddr;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    // Answers one HTTP request with a canned response, returns the raw request
    async fn respond_once(status: &'static str, body: String) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_head(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (addr, handle)
    }

    async fn read_head(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn day(open: &str, close: &str, volume: &str) -> serde_json::Value {
        json!({
            "1. open": open,
            "2. high": "250.00",
            "3. low": "240.00",
            "4. close": close,
            "5. volume": volume,
        })
    }

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key");
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.base_url(), BASE_URL);

        let client = client.with_base_url("http://localhost:9000/query");
        assert_eq!(client.base_url(), "http://localhost:9000/query");
    }

    #[test]
    fn test_parse_sorts_and_counts_rows() {
        let payload = json!({
            "Meta Data": { "2. Symbol": "TSLA" },
            "Time Series (Daily)": {
                "2024-01-04": day("245.00", "237.93", "102629283"),
                "2024-01-02": day("250.08", "248.42", "104654163"),
                "2024-01-03": day("244.98", "238.45", "121082599"),
            }
        });

        let table = parse_daily_payload("TSLA", payload).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.rows().windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(table.rows()[0].open, 250.08);
        assert_eq!(table.rows()[2].close, 237.93);
        assert_eq!(table.rows()[1].volume, 121_082_599.0);
    }

    #[test]
    fn test_missing_series_keeps_payload() {
        let payload = json!({ "Note": "Thank you for using Alpha Vantage!" });

        match parse_daily_payload("TSLA", payload) {
            Err(StockError::MissingTimeSeries { payload }) => {
                assert!(payload.get("Note").is_some());
            }
            other => panic!("Expected MissingTimeSeries, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_number_rejected() {
        let payload = json!({
            "Time Series (Daily)": { "2024-01-02": day("abc", "1.0", "10") }
        });

        let err = parse_daily_payload("TSLA", payload).unwrap_err();
        assert!(matches!(err, StockError::InvalidField { field: "open", .. }));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let payload = json!({
            "Time Series (Daily)": { "yesterday": day("1.0", "1.0", "10") }
        });

        let err = parse_daily_payload("TSLA", payload).unwrap_err();
        assert!(matches!(err, StockError::InvalidDate(d) if d == "yesterday"));
    }

    #[test]
    fn test_series_must_be_object() {
        let payload = json!({ "Time Series (Daily)": [] });
        let err = parse_daily_payload("TSLA", payload).unwrap_err();
        assert!(matches!(err, StockError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_get_daily_query_and_parse() {
        let body = json!({
            "Time Series (Daily)": {
                "2024-01-03": day("244.98", "238.45", "121082599"),
                "2024-01-02": day("250.08", "248.42", "104654163"),
            }
        })
        .to_string();
        let (addr, server) = respond_once("200 OK", body).await;

        let client = AlphaVantageClient::new("demo").with_base_url(format!("http://{addr}/query"));
        let table = client.get_daily("TSLA").await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].close, 248.42);

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /query?"));
        assert!(request_line.contains("function=TIME_SERIES_DAILY"));
        assert!(request_line.contains("symbol=TSLA"));
        assert!(request_line.contains("apikey=demo"));
    }

    #[tokio::test]
    async fn test_server_error_status_writes_no_file() {
        let (addr, server) = respond_once("500 Internal Server Error", "{}".to_string()).await;
        let client = AlphaVantageClient::new("demo").with_base_url(format!("http://{addr}/query"));

        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());

        let err = crate::ingest(&client, &store, "TSLA").await.unwrap_err();
        assert!(matches!(err, StockError::HttpStatus { status: 500 }));
        assert!(!store.path_for("TSLA").exists());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_rate_limit_note_writes_no_file() {
        let body = json!({ "Note": "API call frequency exceeded" }).to_string();
        let (addr, server) = respond_once("200 OK", body).await;
        let client = AlphaVantageClient::new("demo").with_base_url(format!("http://{addr}/query"));

        let dir = tempdir().unwrap();
        let store = PriceStore::new(dir.path());

        let err = crate::ingest(&client, &store, "TSLA").await.unwrap_err();
        assert!(matches!(err, StockError::MissingTimeSeries { .. }));
        assert!(!store.path_for("TSLA").exists());
        server.await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_get_daily() {
        let client = AlphaVantageClient::new(std::env::var("ALPHA_API_KEY").unwrap_or_default());
        let table = client.get_daily("TSLA").await.unwrap();
        assert!(!table.is_empty());
    }
}
