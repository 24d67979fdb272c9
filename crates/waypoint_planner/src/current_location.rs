use thiserror::Error;
use tracing::{debug, info, warn};
use waypoint_providers::reverse_geocoder::ReverseGeocoder;

use crate::{
    location::Location,
    map_surface::MapSurface,
    notice::{ADDRESS_UNAVAILABLE_MESSAGE, LOCATION_UNAVAILABLE_MESSAGE},
    planner::Planner,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Permission to read the device position was denied")]
    PermissionDenied,

    #[error("Device position unavailable: {0}")]
    PositionUnavailable(String),
}

/// The device position source.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<geo::Point, GeolocationError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The position was already requested this session.
    AlreadyRequested,
    Unsupported,
    /// No position. A notice was raised.
    Failed,
    /// The map shows the position but no address was found for it.
    PositionOnly,
    /// The resolved address is now the first location.
    Seeded,
}

/// Seeds the first location from the device position.
pub struct CurrentLocationResolver<G, R> {
    geolocator: G,
    geocoder: R,
}

impl<G, R> CurrentLocationResolver<G, R>
where
    G: Geolocator,
    R: ReverseGeocoder,
{
    pub fn new(geolocator: G, geocoder: R) -> Self {
        Self {
            geolocator,
            geocoder,
        }
    }

    pub async fn seed<M: MapSurface>(&self, planner: &mut Planner<M>) -> SeedOutcome {
        if !planner.request_location_once() {
            debug!("CurrentLocationResolver: position already requested");
            return SeedOutcome::AlreadyRequested;
        }

        let point = match self.geolocator.current_position().await {
            Ok(point) => point,
            Err(GeolocationError::Unsupported) => {
                debug!("CurrentLocationResolver: geolocation unsupported, skipping");
                return SeedOutcome::Unsupported;
            }
            Err(err) => {
                warn!("CurrentLocationResolver: {}", err);
                planner.notify_geolocation(LOCATION_UNAVAILABLE_MESSAGE);
                return SeedOutcome::Failed;
            }
        };

        info!(
            "CurrentLocationResolver: device at {}, {}",
            point.y(),
            point.x()
        );
        planner.show_current_position(point);

        match self.geocoder.reverse_geocode(point).await {
            Ok(address) => {
                if planner.insert_current_location(Location::new(address, point)) {
                    SeedOutcome::Seeded
                } else {
                    SeedOutcome::PositionOnly
                }
            }
            Err(err) => {
                warn!("CurrentLocationResolver: reverse geocoding failed: {}", err);
                planner.notify_geolocation(ADDRESS_UNAVAILABLE_MESSAGE);
                SeedOutcome::PositionOnly
            }
        }
    }
}
