use waypoint_providers::optimization_client::MIN_LOCATIONS;

use crate::map_surface::MapOptions;

#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub map: MapOptions,

    /// Zoom used when centering on the device position.
    pub current_location_zoom: u8,

    pub min_locations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            // Continental US
            map: MapOptions {
                center: geo::Point::new(-95.7129, 37.0902),
                zoom: 4,
                hide_poi_labels: true,
            },
            current_location_zoom: 13,
            min_locations: MIN_LOCATIONS,
        }
    }
}
