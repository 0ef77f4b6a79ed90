//! HTTP client abstraction for testability

use std::time::Duration;

use reqwest::header::ACCEPT;

use super::SourceError;

/// Trait for HTTP client operations.
///
/// Lets the telemetry source run against a mock in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request expecting a JSON body.
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error. Non-2xx statuses are errors.
    fn get_json(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Blocking HTTP client backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get_json(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| SourceError::Http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| SourceError::Http(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Canned-response client that records requested URLs.
    pub(crate) struct MockHttpClient {
        pub response: Result<Vec<u8>, SourceError>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub(crate) fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.as_bytes().to_vec()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(error: SourceError) -> Self {
            Self {
                response: Err(error),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpClient for MockHttpClient {
        fn get_json(&self, url: &str) -> Result<Vec<u8>, SourceError> {
            self.requests.lock().push(url.to_string());
            self.response.clone()
        }
    }

    #[test]
    fn test_mock_client_records_requests() {
        let mock = MockHttpClient::ok("{}");
        assert_eq!(mock.get_json("http://example.com/a").unwrap(), b"{}".to_vec());
        assert_eq!(mock.requests.lock().as_slice(), ["http://example.com/a"]);
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient::failing(SourceError::Status(503));
        assert_eq!(mock.get_json("http://example.com"), Err(SourceError::Status(503)));
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
