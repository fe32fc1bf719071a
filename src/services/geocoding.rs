use crate::models::Coordinates;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the geocoding API
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Geocoding access token is not configured")]
    MissingToken,

    #[error("No results for: {0}")]
    NoResults(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// First candidate returned by the geocoder
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub coords: Coordinates,
}

/// Location after a lookup; `coords` is `None` when the lookup degraded
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub coords: Option<Coordinates>,
}

impl ResolvedLocation {
    pub fn text_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coords: None,
        }
    }
}

impl From<Place> for ResolvedLocation {
    fn from(place: Place) -> Self {
        Self {
            name: place.name,
            coords: Some(place.coords),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    place_name: String,
    #[serde(default)]
    center: Option<[f64; 2]>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: [f64; 2],
}

/// Mapbox-style forward and reverse geocoding client
///
/// Issues a single request per lookup with no retry. The `resolve*`
/// methods never fail: any error degrades to a text-only location.
pub struct GeocodingClient {
    base_url: String,
    access_token: Option<String>,
    client: Client,
}

impl GeocodingClient {
    /// Create a new geocoding client
    pub fn new(
        base_url: String,
        access_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            access_token: access_token.filter(|t| !t.is_empty()),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }

    /// Look up free text and return the first candidate
    pub async fn lookup(&self, query: &str) -> Result<Place, GeocodeError> {
        let url = format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query.trim())
        );
        self.first_feature(&url, query).await
    }

    /// Look up the place name for a coordinate pair
    pub async fn lookup_reverse(&self, coords: Coordinates) -> Result<Place, GeocodeError> {
        let url = format!(
            "{}/geocoding/v5/mapbox.places/{},{}.json",
            self.base_url.trim_end_matches('/'),
            coords.lng,
            coords.lat
        );
        let mut place = self
            .first_feature(&url, &format!("{},{}", coords.lng, coords.lat))
            .await?;
        // Keep the position we were given rather than the feature centroid
        place.coords = coords;
        Ok(place)
    }

    /// Forward lookup that falls back to the raw text
    pub async fn resolve(&self, query: &str) -> ResolvedLocation {
        if query.trim().is_empty() {
            return ResolvedLocation::text_only("");
        }

        match self.lookup(query).await {
            Ok(place) => place.into(),
            Err(e) => {
                tracing::warn!("Geocoding '{}' failed, using text only: {}", query, e);
                ResolvedLocation::text_only(query)
            }
        }
    }

    /// Reverse lookup that falls back to the formatted coordinates
    pub async fn resolve_reverse(&self, coords: Coordinates) -> ResolvedLocation {
        match self.lookup_reverse(coords).await {
            Ok(place) => place.into(),
            Err(e) => {
                tracing::warn!(
                    "Reverse geocoding {},{} failed: {}",
                    coords.lat,
                    coords.lng,
                    e
                );
                ResolvedLocation {
                    name: format!("{:.5}, {:.5}", coords.lat, coords.lng),
                    coords: Some(coords),
                }
            }
        }
    }

    async fn first_feature(&self, url: &str, query: &str) -> Result<Place, GeocodeError> {
        let token = self.access_token.as_ref().ok_or(GeocodeError::MissingToken)?;

        tracing::debug!("Geocoding request: {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("access_token", token.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Geocoding failed: {}",
                response.status()
            )));
        }

        let body: FeatureCollection = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        let feature = body
            .features
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResults(query.to_string()))?;

        let [lng, lat] = feature
            .center
            .or_else(|| feature.geometry.as_ref().map(|g| g.coordinates))
            .ok_or_else(|| GeocodeError::InvalidResponse("Feature has no coordinates".into()))?;

        let coords = Coordinates::new(lng, lat);
        if !coords.is_valid() {
            return Err(GeocodeError::InvalidResponse(format!(
                "Coordinates out of range: [{}, {}]",
                lng, lat
            )));
        }

        Ok(Place {
            name: feature.place_name,
            coords,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const DURHAM: &str = r#"{
        "features": [
            {"place_name": "Durham, North Carolina, United States",
             "geometry": {"coordinates": [-78.8986, 35.994]}},
            {"place_name": "Durham, England", "center": [-1.57, 54.77]}
        ]
    }"#;

    fn client(url: String, token: Option<&str>) -> GeocodingClient {
        GeocodingClient::new(url, token.map(str::to_string), 5).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_uses_first_feature() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Regex(r"^/geocoding/v5/mapbox.places/Durham\.json".into()))
            .match_query(Matcher::UrlEncoded("access_token".into(), "test-token".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(DURHAM)
            .create_async()
            .await;

        let resolved = client(server.url(), Some("test-token")).resolve("Durham").await;

        mock.assert_async().await;
        assert_eq!(resolved.name, "Durham, North Carolina, United States");
        assert_eq!(resolved.coords, Some(Coordinates::new(-78.8986, 35.994)));
    }

    #[tokio::test]
    async fn test_resolve_degrades_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let resolved = client(server.url(), Some("test-token")).resolve("Cary").await;

        assert_eq!(resolved, ResolvedLocation::text_only("Cary"));
    }

    #[tokio::test]
    async fn test_resolve_degrades_on_empty_features() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"features": []}"#)
            .create_async()
            .await;

        let geocoder = client(server.url(), Some("test-token"));
        assert!(matches!(
            geocoder.lookup("Nowhere").await,
            Err(GeocodeError::NoResults(_))
        ));
        assert_eq!(geocoder.resolve("Nowhere").await.coords, None);
    }

    #[tokio::test]
    async fn test_resolve_degrades_on_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("<html></html>")
            .create_async()
            .await;

        let resolved = client(server.url(), Some("test-token")).resolve("Apex").await;
        assert_eq!(resolved, ResolvedLocation::text_only("Apex"));
    }

    #[tokio::test]
    async fn test_out_of_range_center_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"features": [{"place_name": "Bogus", "center": [512.0, 35.9]}]}"#)
            .create_async()
            .await;

        let geocoder = client(server.url(), Some("test-token"));
        assert!(matches!(
            geocoder.lookup("Bogus").await,
            Err(GeocodeError::InvalidResponse(_))
        ));
        assert_eq!(geocoder.resolve("Bogus").await, ResolvedLocation::text_only("Bogus"));
    }

    #[tokio::test]
    async fn test_missing_token_skips_request() {
        let geocoder = client("http://127.0.0.1:9".to_string(), None);
        assert!(!geocoder.is_configured());
        assert!(matches!(
            geocoder.lookup("Durham").await,
            Err(GeocodeError::MissingToken)
        ));
        assert_eq!(
            geocoder.resolve("Durham").await,
            ResolvedLocation::text_only("Durham")
        );
    }

    #[tokio::test]
    async fn test_blank_query_resolves_empty() {
        let geocoder = client("http://127.0.0.1:9".to_string(), Some("t"));
        assert_eq!(geocoder.resolve("   ").await, ResolvedLocation::text_only(""));
    }

    #[tokio::test]
    async fn test_reverse_keeps_given_coordinates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/geocoding/v5/mapbox.places/-78.9,36".into()))
            .with_status(200)
            .with_body(DURHAM)
            .create_async()
            .await;

        let coords = Coordinates::new(-78.9, 36.0);
        let resolved = client(server.url(), Some("t")).resolve_reverse(coords).await;

        assert_eq!(resolved.name, "Durham, North Carolina, United States");
        assert_eq!(resolved.coords, Some(coords));
    }

    #[tokio::test]
    async fn test_reverse_failure_falls_back_to_coordinates() {
        let geocoder = client("http://127.0.0.1:9".to_string(), None);
        let resolved = geocoder.resolve_reverse(Coordinates::new(-78.9, 36.0)).await;
        assert_eq!(resolved.name, "36.00000, -78.90000");
        assert!(resolved.coords.is_some());
    }
}
