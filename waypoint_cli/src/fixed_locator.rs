use waypoint_planner::current_location::{GeolocationError, Geolocator};

/// Stands in for device geolocation with the position given on the command line.
/// Without one the device is treated as having no geolocation at all.
pub struct FixedLocator(pub Option<geo::Point>);

impl Geolocator for FixedLocator {
    async fn current_position(&self) -> Result<geo::Point, GeolocationError> {
        self.0.ok_or(GeolocationError::Unsupported)
    }
}
