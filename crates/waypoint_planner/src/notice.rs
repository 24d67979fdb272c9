use std::fmt::Display;

use waypoint_providers::optimization_client::{FailureKind, OptimizationError};

pub const SELECT_FROM_DROPDOWN_MESSAGE: &str = "Please select a location from the dropdown.";
pub const LOCATION_UNAVAILABLE_MESSAGE: &str =
    "Unable to get your location. Please enter it manually.";
pub const ADDRESS_UNAVAILABLE_MESSAGE: &str =
    "Unable to find an address for your location. Please enter it manually.";
pub const NO_VALID_MARKERS_MESSAGE: &str = "None of the optimized stops could be shown on the map.";

pub fn too_few_locations_message(required: usize) -> String {
    format!(
        "Please add at least {} locations to optimize the route.",
        required
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Precondition,
    Transport,
    Application,
    Data,
    Geolocation,
}

/// A message the front end must show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&OptimizationError> for Notice {
    fn from(err: &OptimizationError) -> Self {
        match err.kind() {
            FailureKind::Precondition => match err {
                OptimizationError::TooFewLocations { required, .. } => Notice::new(
                    NoticeKind::Precondition,
                    too_few_locations_message(*required),
                ),
                _ => Notice::new(NoticeKind::Precondition, err.to_string()),
            },
            FailureKind::Transport => Notice::new(
                NoticeKind::Transport,
                format!("Error optimizing route: {}", err),
            ),
            FailureKind::Application => Notice::new(
                NoticeKind::Application,
                format!("Error optimizing route: {}", err),
            ),
            FailureKind::Data => Notice::new(NoticeKind::Data, err.to_string()),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
