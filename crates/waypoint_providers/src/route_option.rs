use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

/// Body of `POST /optimize_route`. Names are sent in the current store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub locations: Vec<String>,
}

impl OptimizeRequest {
    pub fn new(locations: Vec<String>) -> Self {
        Self { locations }
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct OptimizeResponse {
    #[serde(default)]
    error: Option<Value>,

    #[serde(default)]
    routes: Option<Value>,
}

impl OptimizeResponse {
    /// The application error message, if the backend reported one. Falsy values
    /// (`null`, `false`, `""`, `0`) count as no error.
    pub(crate) fn error_message(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::String(message)) if message.is_empty() => None,
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => None,
            Some(Value::String(message)) => Some(message.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Route options in the order received. A malformed entry is kept as an empty
    /// option so that the positions of the remaining options do not shift.
    pub(crate) fn into_routes(self) -> Vec<RouteOption> {
        match self.routes {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    serde_json::from_value(item).unwrap_or_else(|err| {
                        warn!("Malformed route option {}: {}", index + 1, err);
                        RouteOption::default()
                    })
                })
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!("Expected a list of routes, got {}", other);
                Vec::new()
            }
        }
    }
}

/// One candidate visiting order returned by the optimization backend.
///
/// Every field is optional on the wire: the backend gives no completeness
/// guarantee, so a field that is missing or has the wrong shape is `None`
/// (or an empty leg list) rather than a parse failure of the whole response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteOption {
    #[serde(default, alias = "startTime", deserialize_with = "lenient")]
    pub start_time: Option<String>,

    #[serde(default, alias = "totalDuration", deserialize_with = "lenient")]
    pub total_duration: Option<String>,

    /// Stop names in visiting order.
    #[serde(default, alias = "route", deserialize_with = "lenient")]
    pub stops: Option<Vec<String>>,

    /// Sparse, indexed by the position of the leg's starting stop.
    #[serde(
        default,
        alias = "leg_details",
        alias = "legDetails",
        deserialize_with = "lenient_legs"
    )]
    pub legs: Vec<Option<LegDetail>>,
}

impl RouteOption {
    pub fn stops(&self) -> Option<&[String]> {
        self.stops.as_deref()
    }

    /// Leg starting at stop `index`, if the backend sent a usable one.
    pub fn leg(&self, index: usize) -> Option<&LegDetail> {
        self.legs.get(index).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegDetail {
    pub duration: String,

    #[serde(alias = "trafficLevel", alias = "traffic_level")]
    pub traffic: TrafficLevel,

    /// Travel time without traffic, used as the comparison baseline.
    #[serde(default, alias = "normalDuration", deserialize_with = "lenient")]
    pub normal_duration: Option<String>,
}

impl LegDetail {
    /// The baseline duration, only when it differs from the traffic-aware one.
    pub fn slower_than_normal(&self) -> Option<&str> {
        self.normal_duration
            .as_deref()
            .filter(|normal| *normal != self.duration)
    }
}

// Legs come either wrapped as `{ from, to, details: {..} }` or flat.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireLeg {
    Nested { details: LegDetail },
    Flat(LegDetail),
}

impl From<WireLeg> for LegDetail {
    fn from(leg: WireLeg) -> Self {
        match leg {
            WireLeg::Nested { details } => details,
            WireLeg::Flat(details) => details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TrafficLevel {
    Light,
    Normal,
    Moderate,
    Heavy,
    /// Free-text states such as "No route found".
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficSeverity {
    Low,
    Medium,
    High,
    Unknown,
}

impl TrafficLevel {
    pub fn severity(&self) -> TrafficSeverity {
        match self {
            TrafficLevel::Light | TrafficLevel::Normal => TrafficSeverity::Low,
            TrafficLevel::Moderate => TrafficSeverity::Medium,
            TrafficLevel::Heavy => TrafficSeverity::High,
            TrafficLevel::Other(_) => TrafficSeverity::Unknown,
        }
    }
}

impl From<String> for TrafficLevel {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => TrafficLevel::Light,
            "normal" => TrafficLevel::Normal,
            "moderate" => TrafficLevel::Moderate,
            "heavy" => TrafficLevel::Heavy,
            _ => TrafficLevel::Other(value),
        }
    }
}

impl From<&str> for TrafficLevel {
    fn from(value: &str) -> Self {
        TrafficLevel::from(value.to_owned())
    }
}

impl Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TrafficLevel::Light => "Light",
                TrafficLevel::Normal => "Normal",
                TrafficLevel::Moderate => "Moderate",
                TrafficLevel::Heavy => "Heavy",
                TrafficLevel::Other(text) => text,
            }
        )
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_legs<'de, D>(deserializer: D) -> Result<Vec<Option<LegDetail>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<WireLeg>(item)
                .ok()
                .map(LegDetail::from)
        })
        .collect())
}
