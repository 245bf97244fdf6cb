use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;

use crate::feed::ForecastFeed;

use super::ForecastProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// OpenWeather 5-day/3-hour forecast client.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a local stub in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastFeed> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (5-day forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to a char boundary so multi-byte bodies can't panic the slice.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve a single canned HTTP response on a local port.
    fn spawn_stub(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\n\
                     content-type: application/json\r\n\
                     content-length: {}\r\n\
                     connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_forecast_parses_a_stub_endpoint() {
        let base_url = spawn_stub(
            "200 OK",
            r#"{"list": [{"dt": 1714554000,
                          "main": {"temp": 10.0, "humidity": 50, "pressure": 1010.0}}],
                "city": {"name": "London", "country": "GB", "timezone": 0}}"#,
        );
        let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), base_url);

        let feed = provider.fetch_forecast("London").await.unwrap();

        assert_eq!(feed.list.len(), 1);
        assert_eq!(feed.list[0].main.as_ref().unwrap().temp, Some(10.0));
    }

    #[tokio::test]
    async fn fetch_forecast_reports_http_errors_with_body() {
        let base_url = spawn_stub("401 Unauthorized", r#"{"cod":401,"message":"Invalid API key"}"#);
        let provider = OpenWeatherProvider::with_base_url("BAD".to_string(), base_url);

        let err = provider.fetch_forecast("London").await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // 3 bytes per char, so byte 200 falls inside a character.
        let long = "\u{20ac}".repeat(100);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.trim_end_matches("...").len(), 198);
    }
}
