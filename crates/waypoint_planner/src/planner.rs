use tracing::{debug, error, info, warn};
use waypoint_providers::{
    optimization_client::{OptimizationError, RouteOptimizer},
    reverse_geocoder::ReverseGeocoder,
    route_option::{OptimizeRequest, RouteOption},
};

use crate::{
    current_location::{CurrentLocationResolver, Geolocator, SeedOutcome},
    location::{Location, PlaceSelection},
    location_store::LocationStore,
    map_surface::MapSurface,
    marker_sync::MarkerSync,
    notice::{
        NO_VALID_MARKERS_MESSAGE, Notice, NoticeKind, SELECT_FROM_DROPDOWN_MESSAGE,
        too_few_locations_message,
    },
    planner_config::PlannerConfig,
    route_renderer::{RouteBlock, render_routes},
};

pub const OPTIMIZE_LABEL: &str = "Optimize Route";
pub const OPTIMIZING_LABEL: &str = "Optimizing...";

/// The optimize trigger. Disabled for as long as a request is in flight.
#[derive(Debug, Default)]
pub struct OptimizeControl {
    in_flight: bool,
}

impl OptimizeControl {
    pub fn is_enabled(&self) -> bool {
        !self.in_flight
    }

    pub fn label(&self) -> &'static str {
        if self.in_flight {
            OPTIMIZING_LABEL
        } else {
            OPTIMIZE_LABEL
        }
    }

    fn start(&mut self) {
        self.in_flight = true;
    }

    fn finish(&mut self) {
        self.in_flight = false;
    }
}

/// Rendered route blocks, visible only after a successful render.
#[derive(Debug, Default)]
pub struct ResultsPanel {
    visible: bool,
    blocks: Vec<RouteBlock>,
}

impl ResultsPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn blocks(&self) -> &[RouteBlock] {
        &self.blocks
    }

    fn show(&mut self, blocks: Vec<RouteBlock>) {
        self.blocks = blocks;
        self.visible = true;
    }

    fn hide(&mut self) {
        self.blocks.clear();
        self.visible = false;
    }
}

/// Application state: every user event goes through one of these methods and
/// runs to completion before the next one.
pub struct Planner<M: MapSurface> {
    config: PlannerConfig,
    store: LocationStore,
    markers: MarkerSync<M>,
    optimize_control: OptimizeControl,
    results: ResultsPanel,
    notices: Vec<Notice>,
    location_requested: bool,
}

impl<M: MapSurface> Planner<M> {
    pub fn new(mut map: M, config: PlannerConfig) -> Self {
        map.configure(&config.map);
        info!(
            "Planner: map ready at {:?}, zoom {}",
            config.map.center, config.map.zoom
        );

        Self {
            config,
            store: LocationStore::new(),
            markers: MarkerSync::new(map),
            optimize_control: OptimizeControl::default(),
            results: ResultsPanel::default(),
            notices: Vec::new(),
            location_requested: false,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    pub fn markers(&self) -> &MarkerSync<M> {
        &self.markers
    }

    pub fn optimize_control(&self) -> &OptimizeControl {
        &self.optimize_control
    }

    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }

    /// Drains the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Adds the place picked from the autocomplete. An incomplete selection raises
    /// a precondition notice and changes nothing.
    pub fn add_place(&mut self, selection: PlaceSelection) -> bool {
        match Location::try_from(selection) {
            Ok(location) => self.add_location(location),
            Err(err) => {
                warn!("Planner: rejected place selection: {}", err);
                self.notify(NoticeKind::Precondition, SELECT_FROM_DROPDOWN_MESSAGE);
                false
            }
        }
    }

    pub fn add_location(&mut self, location: Location) -> bool {
        if !self.store.add(location.clone()) {
            self.notify(NoticeKind::Precondition, SELECT_FROM_DROPDOWN_MESSAGE);
            return false;
        }

        self.markers.append(&location);
        debug!(
            "Planner: added {}, {} locations",
            location.name(),
            self.store.len()
        );
        true
    }

    /// Panics when `index` is not a row of [`Planner::location_rows`].
    pub fn remove_location(&mut self, index: usize) -> Location {
        let removed = self.store.remove_at(index);
        self.markers.remove(index);
        debug!(
            "Planner: removed {}, {} locations",
            removed.name(),
            self.store.len()
        );
        removed
    }

    /// The numbered list mirroring the store, `"1. <name>"` per row.
    pub fn location_rows(&self) -> Vec<String> {
        self.store
            .all()
            .iter()
            .enumerate()
            .map(|(index, location)| format!("{}. {}", index + 1, location.name()))
            .collect()
    }

    /// Checks the preconditions and, when they hold, disables the optimize control
    /// and returns the request to send. Every `Some` must be followed by exactly one
    /// [`Planner::finish_optimization`].
    pub fn begin_optimization(&mut self) -> Option<OptimizeRequest> {
        if !self.optimize_control.is_enabled() {
            debug!("Planner: optimization already in flight");
            return None;
        }

        if self.store.len() < self.config.min_locations {
            self.notify(
                NoticeKind::Precondition,
                too_few_locations_message(self.config.min_locations),
            );
            return None;
        }

        self.optimize_control.start();
        Some(OptimizeRequest::new(self.store.names()))
    }

    /// Applies the backend's answer. Returns whether routes were rendered.
    pub fn finish_optimization(
        &mut self,
        result: Result<Vec<RouteOption>, OptimizationError>,
    ) -> bool {
        self.optimize_control.finish();

        let options = match result {
            Ok(options) => options,
            Err(err) => {
                error!("Planner: optimization failed: {}", err);
                self.results.hide();
                self.notices.push(Notice::from(&err));
                return false;
            }
        };

        let rendered = match render_routes(&options) {
            Ok(rendered) => rendered,
            Err(err) => {
                error!("Planner: could not render routes: {}", err);
                self.results.hide();
                self.notify(NoticeKind::Data, err.to_string());
                return false;
            }
        };

        info!("Planner: rendered {} route options", rendered.blocks.len());
        self.results.show(rendered.blocks);
        self.apply_order(&rendered.primary_stops);
        true
    }

    pub async fn optimize<O: RouteOptimizer>(&mut self, optimizer: &O) -> bool {
        let Some(request) = self.begin_optimization() else {
            return false;
        };

        let result = optimizer.optimize(&request).await;
        self.finish_optimization(result)
    }

    /// Runs the one-shot device position lookup. Later calls do nothing.
    pub async fn seed_current_location<G, R>(
        &mut self,
        resolver: &CurrentLocationResolver<G, R>,
    ) -> SeedOutcome
    where
        G: Geolocator,
        R: ReverseGeocoder,
    {
        resolver.seed(self).await
    }

    /// Reorders the store and markers to follow `stops`. When no stop matches a
    /// stored location nothing is touched and a warning is raised.
    fn apply_order(&mut self, stops: &[String]) {
        if !stops
            .iter()
            .any(|stop| self.store.find_by_name(stop).is_some())
        {
            warn!(
                "Planner: none of the {} optimized stops are in the list",
                stops.len()
            );
            self.notify(NoticeKind::Data, NO_VALID_MARKERS_MESSAGE);
            return;
        }

        let misses = self.store.reorder_by_names(stops);
        if !misses.is_empty() {
            warn!(
                "Planner: {} optimized stops are not in the list: {:?}",
                misses.len(),
                misses
            );
        }

        self.markers.reorder(self.store.all());
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let notice = Notice::new(kind, message);
        debug!("Planner: notice {:?}: {}", notice.kind, notice.message);
        self.notices.push(notice);
    }

    /// Flags the device position as requested. Returns `false` when it already was.
    pub(crate) fn request_location_once(&mut self) -> bool {
        !std::mem::replace(&mut self.location_requested, true)
    }

    pub(crate) fn show_current_position(&mut self, point: geo::Point) {
        self.markers
            .show_current_position(point, self.config.current_location_zoom);
    }

    pub(crate) fn insert_current_location(&mut self, location: Location) -> bool {
        if !self.store.insert_first(location.clone()) {
            return false;
        }

        self.markers.insert_first(&location);
        info!("Planner: starting from {}", location.name());
        true
    }

    pub(crate) fn notify_geolocation(&mut self, message: &str) {
        self.notify(NoticeKind::Geolocation, message);
    }
}
