//! Fetch-and-decode over HTTP.
//!
//! Everything that touches the network goes through [`JsonSource`] so the
//! pipeline can run against canned responses in tests.

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Something that can GET a URL and hand back its JSON body.
pub trait JsonSource {
    fn get_json(&self, url: &str) -> Result<Value>;
}

/// Blocking HTTP implementation backed by `reqwest`.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
        })
    }
}

impl JsonSource for HttpSource {
    fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send()?;
        let status = response.status();
        // Redirects are followed by the client, anything left below 400 is accepted.
        if status.is_client_error() || status.is_server_error() {
            bail!("HTTP {} for url: {}", status, url);
        }

        let text = response.text()?;
        tracing::debug!(url, %status, bytes = text.len(), "response received");
        let value: Value =
            serde_json::from_str(&text).with_context(|| format!("invalid JSON from {}", url))?;
        Ok(value)
    }
}

fn http_client(timeout: Option<Duration>) -> Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// GETs `url` and decodes the body into `T`.
pub fn fetch_data<T: DeserializeOwned>(source: &dyn JsonSource, url: &str) -> Result<T> {
    let value = source.get_json(url)?;
    let data = serde_json::from_value(value)
        .with_context(|| format!("unexpected response shape from {}", url))?;
    Ok(data)
}

/// Listing endpoint for all types under `base_url`.
pub fn type_list_url(base_url: &str) -> String {
    format!("{}/type/", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeListResponse;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves a single HTTP response on a random local port and returns its base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_type_list_url_trims_trailing_slash() {
        assert_eq!(
            type_list_url("https://pokeapi.co/api/v2/"),
            "https://pokeapi.co/api/v2/type/"
        );
        assert_eq!(type_list_url(DEFAULT_BASE_URL), "https://pokeapi.co/api/v2/type/");
    }

    #[test]
    fn test_http_source_decodes_success_body() {
        let (base, handle) = serve_once(
            "200 OK",
            r#"{"results":[{"name":"water","url":"http://example/type/11/"}]}"#,
        );
        let source = HttpSource::new(Some(Duration::from_secs(5))).unwrap();

        let list: TypeListResponse = fetch_data(&source, &type_list_url(&base)).unwrap();
        handle.join().unwrap();

        assert_eq!(list.results.len(), 1);
        assert_eq!(list.results[0].url, "http://example/type/11/");
    }

    #[test]
    fn test_http_source_rejects_error_status() {
        let (base, handle) = serve_once("404 Not Found", "{}");
        let source = HttpSource::new(Some(Duration::from_secs(5))).unwrap();

        let err = source.get_json(&type_list_url(&base)).unwrap_err();
        handle.join().unwrap();

        assert!(err.to_string().contains("404"), "unexpected error: {err}");
    }

    #[test]
    fn test_http_source_accepts_unfollowed_redirect_status() {
        // No Location header, so the client hands the 3xx back as-is.
        let (base, handle) = serve_once("300 Multiple Choices", r#"{"results":[]}"#);
        let source = HttpSource::new(Some(Duration::from_secs(5))).unwrap();

        let value = source.get_json(&base).unwrap();
        handle.join().unwrap();

        assert_eq!(value, serde_json::json!({"results": []}));
    }

    #[test]
    fn test_http_source_rejects_server_error() {
        let (base, handle) = serve_once("500 Internal Server Error", "{}");
        let source = HttpSource::new(Some(Duration::from_secs(5))).unwrap();

        let err = source.get_json(&base).unwrap_err();
        handle.join().unwrap();

        assert!(err.to_string().contains("500"), "unexpected error: {err}");
    }

    #[test]
    fn test_http_source_rejects_invalid_json() {
        let (base, handle) = serve_once("200 OK", "not json");
        let source = HttpSource::new(Some(Duration::from_secs(5))).unwrap();

        let err = source.get_json(&base).unwrap_err();
        handle.join().unwrap();

        assert!(err.to_string().contains("invalid JSON"), "unexpected error: {err}");
    }

    #[test]
    fn test_fetch_data_reports_shape_mismatch() {
        struct Fixed(Value);
        impl JsonSource for Fixed {
            fn get_json(&self, _url: &str) -> Result<Value> {
                Ok(self.0.clone())
            }
        }

        let source = Fixed(serde_json::json!({"results": "nope"}));
        let err = fetch_data::<TypeListResponse>(&source, "http://x/type/").unwrap_err();
        assert!(err.to_string().contains("unexpected response shape"));
    }
}
