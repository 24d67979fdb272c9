use std::{
    cell::{Ref, RefCell},
    collections::{BTreeMap, VecDeque},
};

use waypoint_providers::{
    optimization_client::{OptimizationError, RouteOptimizer},
    reverse_geocoder::{GeocodeError, ReverseGeocoder},
    route_option::{LegDetail, OptimizeRequest, RouteOption, TrafficLevel},
};

use crate::{
    current_location::{GeolocationError, Geolocator},
    location::Location,
    map_surface::{MapOptions, MapSurface, MarkerOptions},
};

pub fn location(name: &str, lat: f64, lng: f64) -> Location {
    Location::from_lat_lng(name, lat, lng)
}

pub fn leg(duration: &str, traffic: &str, normal_duration: Option<&str>) -> LegDetail {
    LegDetail {
        duration: duration.to_owned(),
        traffic: TrafficLevel::from(traffic),
        normal_duration: normal_duration.map(str::to_owned),
    }
}

pub fn route_option(stops: &[&str], legs: Vec<Option<LegDetail>>) -> RouteOption {
    RouteOption {
        start_time: None,
        total_duration: None,
        stops: Some(stops.iter().map(|stop| stop.to_string()).collect()),
        legs,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MarkerId(usize);

/// Map surface keeping everything drawn on it for inspection.
#[derive(Debug, Default)]
pub struct RecordingMap {
    next_id: usize,
    pub configured: Option<MapOptions>,
    pub live: BTreeMap<MarkerId, MarkerOptions>,
    pub fitted: Vec<geo::Rect>,
    pub views: Vec<(geo::Point, u8)>,
}

impl RecordingMap {
    pub fn marker(&self, id: MarkerId) -> Option<&MarkerOptions> {
        self.live.get(&id)
    }

    /// Live markers carrying a label, i.e. not the current-position dot.
    pub fn numbered_markers(&self) -> usize {
        self.live
            .values()
            .filter(|options| options.label.is_some())
            .count()
    }
}

impl MapSurface for RecordingMap {
    type Marker = MarkerId;

    fn configure(&mut self, options: &MapOptions) {
        self.configured = Some(options.clone());
    }

    fn place_marker(&mut self, options: MarkerOptions) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, options);
        id
    }

    fn set_marker_label(&mut self, marker: &MarkerId, label: &str) {
        let options = self.live.get_mut(marker).unwrap();
        options.label = Some(label.to_owned());
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        assert!(self.live.remove(&marker).is_some(), "marker removed twice");
    }

    fn fit_bounds(&mut self, bounds: geo::Rect) {
        self.fitted.push(bounds);
    }

    fn set_view(&mut self, center: geo::Point, zoom: u8) {
        self.views.push((center, zoom));
    }
}

/// Answers with queued results and records every request it receives.
pub struct ScriptedOptimizer {
    responses: RefCell<VecDeque<Result<Vec<RouteOption>, OptimizationError>>>,
    requests: RefCell<Vec<OptimizeRequest>>,
}

impl ScriptedOptimizer {
    pub fn new(responses: Vec<Result<Vec<RouteOption>, OptimizationError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Ref<'_, Vec<OptimizeRequest>> {
        self.requests.borrow()
    }
}

impl RouteOptimizer for ScriptedOptimizer {
    async fn optimize(
        &self,
        request: &OptimizeRequest,
    ) -> Result<Vec<RouteOption>, OptimizationError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(OptimizationError::NoRoutes))
    }
}

pub struct FixedGeolocator(pub Result<geo::Point, GeolocationError>);

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<geo::Point, GeolocationError> {
        self.0.clone()
    }
}

pub struct StaticGeocoder(pub Option<String>);

impl ReverseGeocoder for StaticGeocoder {
    async fn reverse_geocode(&self, point: geo::Point) -> Result<String, GeocodeError> {
        self.0
            .clone()
            .ok_or_else(|| GeocodeError::NoResult(format!("{}, {}", point.y(), point.x())))
    }
}
