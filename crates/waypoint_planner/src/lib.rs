pub mod current_location;
pub mod location;
pub mod location_store;
pub mod map_surface;
pub mod marker_sync;
pub mod notice;
pub mod planner;
pub mod planner_config;
pub mod route_renderer;

#[cfg(test)]
pub(crate) mod test_utils;
