//! Worksheet CSV retrieval from the backend
//!
//! `GET {backend}/csv/{id}` returns the raw CSV text for a worksheet.
//! A non-2xx response means "no data", surfaced to the user as a status
//! message; it never crashes the app.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}")]
    Status { status: StatusCode },
}

/// Join the backend base URL with a path, tolerating a trailing slash
pub fn backend_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Fetch the raw CSV text for a worksheet id
pub fn fetch_csv(client: &Client, backend: &str, id: &str) -> Result<String, FetchError> {
    let url = backend_url(backend, &format!("csv/{}", id));
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status });
    }

    Ok(response.text()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_backend_url_joins_cleanly() {
        assert_eq!(backend_url("http://b:8080", "csv/1"), "http://b:8080/csv/1");
        assert_eq!(backend_url("http://b:8080/", "csv/1"), "http://b:8080/csv/1");
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/csv/1725815494_6448_log"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Date,Author Name\n"))
            .mount(&server)
            .await;

        let base = server.uri();
        let text = tokio::task::spawn_blocking(move || {
            let client = Client::new();
            fetch_csv(&client, &base, "1725815494_6448_log")
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(text, "Date,Author Name\n");
    }

    #[tokio::test]
    async fn test_fetch_surfaces_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/csv/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base = server.uri();
        let err = tokio::task::spawn_blocking(move || {
            let client = Client::new();
            fetch_csv(&client, &base, "missing")
        })
        .await
        .unwrap()
        .unwrap_err();

        assert!(matches!(
            err,
            FetchError::Status {
                status: StatusCode::NOT_FOUND
            }
        ));
    }
}
