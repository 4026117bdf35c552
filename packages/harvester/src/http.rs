//! HTTP client wrapper for downloading announcement pages.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{HTTP_TIMEOUT_SECS, MAX_ATTEMPTS};
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("dodaward-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download a page as text, retrying transient failures.
///
/// Network errors, timeouts and 5xx responses are retried after a fixed
/// `retry_delay`, up to `MAX_ATTEMPTS` requests in total. 4xx responses
/// fail immediately.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `retry_delay` - Pause before each retry
pub fn download_text(client: &Client, url: &str, retry_delay: Duration) -> Result<String> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_ATTEMPTS {
        if attempt > 0 {
            tracing::debug!(
                url,
                attempt,
                delay_secs = retry_delay.as_secs(),
                "Retrying after delay"
            );
            thread::sleep(retry_delay);
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                if status.is_server_error() {
                    tracing::warn!(
                        url,
                        status = %status,
                        attempt = attempt + 1,
                        max_attempts = MAX_ATTEMPTS,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                // Client errors (4xx) won't succeed on retry
                let response = response.error_for_status()?;
                return Ok(response.text()?);
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        url,
                        error = %e,
                        attempt = attempt + 1,
                        max_attempts = MAX_ATTEMPTS,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                return Err(HarvesterError::Http(e));
            }
        }
    }

    Err(HarvesterError::RetriesExhausted {
        attempts: MAX_ATTEMPTS,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_download_text_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/News/Contracts/");
            then.status(200).body("<html>listing</html>");
        });

        let client = create_client().unwrap();
        let body = download_text(&client, &server.url("/News/Contracts/"), Duration::ZERO).unwrap();

        mock.assert();
        assert_eq!(body, "<html>listing</html>");
    }

    #[test]
    fn test_download_text_client_error_not_retried() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let client = create_client().unwrap();
        let err = download_text(&client, &server.url("/missing"), Duration::ZERO).unwrap_err();

        mock.assert_hits(1);
        assert!(matches!(err, HarvesterError::Http(_)));
    }

    #[test]
    fn test_download_text_server_error_exhausts_retries() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/flaky");
            then.status(503);
        });

        let client = create_client().unwrap();
        let err = download_text(&client, &server.url("/flaky"), Duration::ZERO).unwrap_err();

        mock.assert_hits(MAX_ATTEMPTS as usize);
        assert!(matches!(
            err,
            HarvesterError::RetriesExhausted { attempts: MAX_ATTEMPTS, .. }
        ));
    }
}
