use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const GEOCODER_URL_ENV_VAR: &str = "WAYPOINT_GEOCODER_URL";
pub const USER_AGENT_ENV_VAR: &str = "WAYPOINT_USER_AGENT";
pub const NOMINATIM_REVERSE_PATH: &str = "/reverse";

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No address found for {0}")]
    NoResult(String),
}

/// Resolves a coordinate into a human readable, formatted address.
pub trait ReverseGeocoder {
    fn reverse_geocode(
        &self,
        point: geo_types::Point,
    ) -> impl Future<Output = Result<String, GeocodeError>>;
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoderParams {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
}

impl Default for NominatimGeocoderParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_owned(),
            user_agent: format!("waypoint/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NominatimGeocoderParams {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var(GEOCODER_URL_ENV_VAR).unwrap_or(defaults.base_url),
            user_agent: std::env::var(USER_AGENT_ENV_VAR).unwrap_or(defaults.user_agent),
        }
    }
}

#[derive(Deserialize)]
struct NominatimReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

pub struct NominatimGeocoder {
    params: NominatimGeocoderParams,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    pub fn new(params: NominatimGeocoderParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_address(&self, point: geo_types::Point) -> Result<String, GeocodeError> {
        let url = format!(
            "{}{}",
            self.params.base_url.trim_end_matches('/'),
            NOMINATIM_REVERSE_PATH
        );

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.params.user_agent)
            .query(&[
                ("format", String::from("jsonv2")),
                ("lat", point.y().to_string()),
                ("lon", point.x().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api { status, message });
        }

        let result: NominatimReverseResponse = response.json().await?;

        match (result.display_name, result.error) {
            (Some(address), _) if !address.trim().is_empty() => {
                debug!("NominatimGeocoder: Resolved {:?} to {}", point, address);
                Ok(address)
            }
            (_, Some(error)) => Err(GeocodeError::NoResult(error)),
            _ => Err(GeocodeError::NoResult(format!(
                "{}, {}",
                point.y(),
                point.x()
            ))),
        }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(NominatimGeocoderParams::from_env())
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, point: geo_types::Point) -> Result<String, GeocodeError> {
        self.fetch_address(point).await
    }
}
