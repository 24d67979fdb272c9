pub mod optimization_client;
pub mod reverse_geocoder;
pub mod route_option;
