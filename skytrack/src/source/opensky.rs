//! OpenSky Network `states/all` source.

use serde_json::Value;
use tracing::debug;

use super::http::{HttpClient, ReqwestClient};
use super::{FlightSource, SourceConfig, SourceError};
use crate::region::Region;

/// Fetches state vectors from an OpenSky-compatible endpoint.
///
/// The query is limited to the region's bounding box:
///
/// ```text
/// GET {url}?lamin={lat_min}&lomin={lng_min}&lamax={lat_max}&lomax={lng_max}
/// ```
pub struct OpenSkySource<C: HttpClient = ReqwestClient> {
    client: C,
    url: String,
}

impl OpenSkySource<ReqwestClient> {
    /// Build a reqwest-backed source from configuration.
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = ReqwestClient::with_timeout(config.timeout)?;
        Ok(Self::new(client, config.url.clone()))
    }
}

impl<C: HttpClient> OpenSkySource<C> {
    /// Create a source over an arbitrary HTTP client.
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Request URL for a region.
    pub fn query_url(&self, region: &Region) -> String {
        let b = &region.bounds;
        format!(
            "{}?lamin={}&lomin={}&lamax={}&lomax={}",
            self.url, b.lat_min, b.lng_min, b.lat_max, b.lng_max
        )
    }
}

impl<C: HttpClient> FlightSource for OpenSkySource<C> {
    fn fetch_states(&self, region: &Region) -> Result<Value, SourceError> {
        let url = self.query_url(region);
        debug!(url = %url, "Fetching telemetry");

        let body = self.client.get_json(&url)?;
        serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }

    fn name(&self) -> &str {
        "opensky"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionTable;
    use crate::source::http::tests::MockHttpClient;

    fn region(key: &str) -> Region {
        RegionTable::builtin().get(key).unwrap().clone()
    }

    #[test]
    fn test_query_url_uses_region_bounds() {
        let source = OpenSkySource::new(MockHttpClient::ok("{}"), "https://example.test/states");
        assert_eq!(
            source.query_url(&region("india")),
            "https://example.test/states?lamin=6&lomin=68&lamax=37&lomax=97"
        );
        assert_eq!(
            source.query_url(&region("usa")),
            "https://example.test/states?lamin=25&lomin=-125&lamax=50&lomax=-65"
        );
    }

    #[test]
    fn test_fetch_decodes_json() {
        let source = OpenSkySource::new(
            MockHttpClient::ok(r#"{"time": 1, "states": []}"#),
            "https://example.test/states",
        );
        let payload = source.fetch_states(&region("japan")).unwrap();
        assert_eq!(payload["time"], 1);
        assert!(payload["states"].as_array().unwrap().is_empty());

        let requests = source.client.requests.lock();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains("lamin=30"));
    }

    #[test]
    fn test_fetch_rejects_invalid_json() {
        let source = OpenSkySource::new(MockHttpClient::ok("<html>"), "https://example.test");
        assert!(matches!(
            source.fetch_states(&region("uk")),
            Err(SourceError::Decode(_))
        ));
    }

    #[test]
    fn test_fetch_propagates_transport_errors() {
        let source = OpenSkySource::new(
            MockHttpClient::failing(SourceError::Status(429)),
            "https://example.test",
        );
        assert_eq!(
            source.fetch_states(&region("uk")),
            Err(SourceError::Status(429))
        );
    }

    #[test]
    fn test_from_config() {
        let source = OpenSkySource::from_config(&SourceConfig::default()).unwrap();
        assert_eq!(source.name(), "opensky");
        assert!(source
            .query_url(&region("germany"))
            .starts_with("https://opensky-network.org/api/states/all?lamin=47"));
    }
}
