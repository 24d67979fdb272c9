use std::fmt::Display;

use thiserror::Error;
use tracing::{debug, error, warn};
use waypoint_providers::route_option::{LegDetail, RouteOption, TrafficLevel};

const UNKNOWN_VALUE: &str = "unknown";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("No valid routes found")]
    NoOptions,

    #[error("The primary route option has no stop list")]
    MalformedPrimary,
}

/// Everything the results panel shows, plus the order that drives the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRoutes {
    pub blocks: Vec<RouteBlock>,
    /// Stop names of the first option.
    pub primary_stops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteBlock {
    /// "Option N", 1-based in received order.
    pub title: String,
    pub start_time: String,
    pub total_duration: String,
    pub rows: Vec<StopRow>,
}

impl RouteBlock {
    pub fn header(&self) -> String {
        format!(
            "{}: Start at {} (Total: {})",
            self.title, self.start_time, self.total_duration
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopRow {
    /// 1-based position in the option.
    pub position: usize,
    pub name: String,
    pub detail: StopDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StopDetail {
    NextLeg {
        duration: String,
        traffic: TrafficLevel,
        /// Only set when it differs from `duration`.
        normal_duration: Option<String>,
    },
    Unavailable,
    FinalDestination,
}

impl From<&LegDetail> for StopDetail {
    fn from(leg: &LegDetail) -> Self {
        StopDetail::NextLeg {
            duration: leg.duration.clone(),
            traffic: leg.traffic.clone(),
            normal_duration: leg.slower_than_normal().map(str::to_owned),
        }
    }
}

impl Display for StopDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopDetail::NextLeg {
                duration,
                traffic,
                normal_duration,
            } => {
                write!(f, "→ Next stop: {} ({} traffic)", duration, traffic)?;
                if let Some(normal_duration) = normal_duration {
                    write!(f, " (normally {})", normal_duration)?;
                }
                Ok(())
            }
            StopDetail::Unavailable => write!(f, "Route information unavailable"),
            StopDetail::FinalDestination => write!(f, "Final destination"),
        }
    }
}

/// Renders every option in received order. Fails, producing nothing, when there is
/// no option or the first one has no stop list.
pub fn render_routes(options: &[RouteOption]) -> Result<RenderedRoutes, RenderError> {
    let primary = options.first().ok_or(RenderError::NoOptions)?;
    let primary_stops = primary
        .stops()
        .ok_or(RenderError::MalformedPrimary)?
        .to_vec();

    let blocks = options
        .iter()
        .enumerate()
        .map(|(index, option)| render_option(index, option))
        .collect();

    Ok(RenderedRoutes {
        blocks,
        primary_stops,
    })
}

pub fn render_option(index: usize, option: &RouteOption) -> RouteBlock {
    let rows = match option.stops() {
        Some(stops) => (0..stops.len())
            .map(|position| render_stop(option, stops, position))
            .collect(),
        None => {
            error!("RouteRenderer: option {} has no stop list", index + 1);
            Vec::new()
        }
    };

    RouteBlock {
        title: format!("Option {}", index + 1),
        start_time: option
            .start_time
            .clone()
            .unwrap_or_else(|| UNKNOWN_VALUE.to_owned()),
        total_duration: option
            .total_duration
            .clone()
            .unwrap_or_else(|| UNKNOWN_VALUE.to_owned()),
        rows,
    }
}

fn render_stop(option: &RouteOption, stops: &[String], position: usize) -> StopRow {
    let detail = if position + 1 == stops.len() {
        StopDetail::FinalDestination
    } else {
        match option.leg(position) {
            Some(leg) => StopDetail::from(leg),
            None => {
                warn!("RouteRenderer: missing details for leg {}", position);
                StopDetail::Unavailable
            }
        }
    };

    debug!("RouteRenderer: stop {} {} -> {}", position, stops[position], detail);

    StopRow {
        position: position + 1,
        name: stops[position].clone(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{leg, route_option};

    #[test]
    fn test_renders_durations_traffic_and_comparison() {
        let option = route_option(
            &["A", "B", "C"],
            vec![
                Some(leg("5 min", "Heavy", Some("3 min"))),
                Some(leg("2 min", "Light", Some("2 min"))),
            ],
        );

        let rendered = render_routes(&[option]).unwrap();
        let rows = &rendered.blocks[0].rows;

        assert_eq!(
            rows[0].detail,
            StopDetail::NextLeg {
                duration: String::from("5 min"),
                traffic: TrafficLevel::Heavy,
                normal_duration: Some(String::from("3 min")),
            }
        );
        assert_eq!(
            rows[1].detail,
            StopDetail::NextLeg {
                duration: String::from("2 min"),
                traffic: TrafficLevel::Light,
                normal_duration: None,
            }
        );
        assert_eq!(rows[2].detail, StopDetail::FinalDestination);
        assert_eq!(rendered.primary_stops, ["A", "B", "C"]);
    }

    #[test]
    fn test_missing_leg_renders_unavailable() {
        let option = route_option(&["A", "B", "C"], vec![None, Some(leg("2 min", "Normal", None))]);

        let block = render_option(0, &option);

        assert_eq!(block.rows[0].detail, StopDetail::Unavailable);
        assert!(matches!(block.rows[1].detail, StopDetail::NextLeg { .. }));
        assert_eq!(block.rows[2].detail, StopDetail::FinalDestination);
    }

    #[test]
    fn test_last_stop_is_final_even_with_extra_leg_data() {
        let option = route_option(
            &["A", "B"],
            vec![
                Some(leg("4 min", "Normal", None)),
                Some(leg("9 min", "Heavy", None)),
            ],
        );

        let block = render_option(0, &option);

        assert_eq!(block.rows.len(), 2);
        assert_eq!(block.rows[1].detail, StopDetail::FinalDestination);
    }

    #[test]
    fn test_single_stop_is_final_destination() {
        let block = render_option(0, &route_option(&["A"], Vec::new()));

        assert_eq!(block.rows[0].detail, StopDetail::FinalDestination);
    }

    #[test]
    fn test_blocks_are_titled_in_received_order() {
        let mut first = route_option(&["A", "B"], Vec::new());
        first.start_time = Some(String::from("09:00 AM"));
        first.total_duration = Some(String::from("12 minutes"));
        let second = route_option(&["B", "A"], Vec::new());

        let rendered = render_routes(&[first, second]).unwrap();

        assert_eq!(
            rendered.blocks[0].header(),
            "Option 1: Start at 09:00 AM (Total: 12 minutes)"
        );
        assert_eq!(
            rendered.blocks[1].header(),
            "Option 2: Start at unknown (Total: unknown)"
        );
        assert_eq!(rendered.primary_stops, ["A", "B"]);
    }

    #[test]
    fn test_no_options_is_a_render_failure() {
        assert_eq!(render_routes(&[]), Err(RenderError::NoOptions));
    }

    #[test]
    fn test_primary_without_stops_is_a_render_failure() {
        let secondary = route_option(&["A", "B"], Vec::new());

        let result = render_routes(&[RouteOption::default(), secondary]);

        assert_eq!(result, Err(RenderError::MalformedPrimary));
    }

    #[test]
    fn test_secondary_without_stops_renders_header_only() {
        let rendered =
            render_routes(&[route_option(&["A", "B"], Vec::new()), RouteOption::default()])
                .unwrap();

        assert_eq!(rendered.blocks.len(), 2);
        assert!(rendered.blocks[1].rows.is_empty());
    }

    #[test]
    fn test_detail_text() {
        let detail = StopDetail::from(&leg("5 min", "Heavy", Some("3 min")));
        assert_eq!(
            detail.to_string(),
            "→ Next stop: 5 min (Heavy traffic) (normally 3 min)"
        );
        assert_eq!(
            StopDetail::Unavailable.to_string(),
            "Route information unavailable"
        );
        assert_eq!(StopDetail::FinalDestination.to_string(), "Final destination");
    }
}
