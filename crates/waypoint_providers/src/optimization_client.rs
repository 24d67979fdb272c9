use thiserror::Error;
use tracing::{debug, info};

use crate::route_option::{OptimizeRequest, OptimizeResponse, RouteOption};

pub const OPTIMIZE_ROUTE_PATH: &str = "/optimize_route";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const BACKEND_URL_ENV_VAR: &str = "WAYPOINT_BACKEND_URL";

/// The backend needs an origin and at least one destination.
pub const MIN_LOCATIONS: usize = 2;

#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error("At least {required} locations are required, got {actual}")]
    TooFewLocations { required: usize, actual: usize },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("{0}")]
    Application(String),

    #[error("No valid routes found")]
    NoRoutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing was sent.
    Precondition,
    Transport,
    /// The backend answered with an `error` field.
    Application,
    /// The backend answered without usable routes.
    Data,
}

impl OptimizationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            OptimizationError::TooFewLocations { .. } => FailureKind::Precondition,
            OptimizationError::Request(_)
            | OptimizationError::Api { .. }
            | OptimizationError::Deserialize(_) => FailureKind::Transport,
            OptimizationError::Application(_) => FailureKind::Application,
            OptimizationError::NoRoutes => FailureKind::Data,
        }
    }
}

/// Anything that can turn an ordered list of location names into ranked route options.
pub trait RouteOptimizer {
    fn optimize(
        &self,
        request: &OptimizeRequest,
    ) -> impl Future<Output = Result<Vec<RouteOption>, OptimizationError>>;
}

#[derive(Debug, Clone)]
pub struct OptimizationClientParams {
    pub backend_url: String,
}

impl Default for OptimizationClientParams {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
        }
    }
}

impl OptimizationClientParams {
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_URL_ENV_VAR) {
            Ok(backend_url) if !backend_url.trim().is_empty() => Self { backend_url },
            _ => Self::default(),
        }
    }
}

pub struct OptimizationClient {
    params: OptimizationClientParams,
    client: reqwest::Client,
}

impl OptimizationClient {
    pub fn new(params: OptimizationClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.params.backend_url.trim_end_matches('/'),
            OPTIMIZE_ROUTE_PATH
        )
    }

    pub async fn optimize_route(
        &self,
        request: &OptimizeRequest,
    ) -> Result<Vec<RouteOption>, OptimizationError> {
        if request.locations.len() < MIN_LOCATIONS {
            return Err(OptimizationError::TooFewLocations {
                required: MIN_LOCATIONS,
                actual: request.locations.len(),
            });
        }

        info!(
            "OptimizationClient: Sending locations for optimization: {:?}",
            request.locations
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        debug!("OptimizationClient: Received response with status {}", status);

        parse_response(status.as_u16(), &body)
    }
}

impl Default for OptimizationClient {
    fn default() -> Self {
        Self::new(OptimizationClientParams::from_env())
    }
}

impl RouteOptimizer for OptimizationClient {
    async fn optimize(
        &self,
        request: &OptimizeRequest,
    ) -> Result<Vec<RouteOption>, OptimizationError> {
        self.optimize_route(request).await
    }
}

/// An `error` field wins over the status code; a body that is not JSON at all is
/// reported with the status when the status is not a success.
fn parse_response(status: u16, body: &str) -> Result<Vec<RouteOption>, OptimizationError> {
    let is_success = (200..300).contains(&status);

    let response: OptimizeResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !is_success => {
            return Err(OptimizationError::Api {
                status,
                message: body.to_owned(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(message) = response.error_message() {
        return Err(OptimizationError::Application(message));
    }

    if !is_success {
        return Err(OptimizationError::Api {
            status,
            message: body.to_owned(),
        });
    }

    let routes = response.into_routes();
    if routes.is_empty() {
        return Err(OptimizationError::NoRoutes);
    }

    debug!("OptimizationClient: Parsed {} route options", routes.len());

    Ok(routes)
}
