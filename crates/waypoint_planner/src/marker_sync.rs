use tracing::{debug, warn};

use crate::{
    location::Location,
    map_surface::{CircleSymbol, MapSurface, MarkerIcon, MarkerOptions, bounds_of},
};

pub const CURRENT_LOCATION_TITLE: &str = "Your Location";

/// A marker on the surface together with what it was placed for.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSlot<H> {
    handle: H,
    label: usize,
    position: geo::Point,
    title: String,
}

impl<H> MarkerSlot<H> {
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// 1-based display label.
    pub fn label(&self) -> usize {
        self.label
    }

    pub fn position(&self) -> geo::Point {
        self.position
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Keeps `markers[i]` aligned with `locations[i]` and labelled `i + 1`.
///
/// Every method leaves the marker list in its final shape before returning, so the
/// two sequences are never observed out of step.
pub struct MarkerSync<M: MapSurface> {
    map: M,
    slots: Vec<MarkerSlot<M::Marker>>,
    current_position: Option<M::Marker>,
}

impl<M: MapSurface> MarkerSync<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            slots: Vec::new(),
            current_position: None,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn markers(&self) -> &[MarkerSlot<M::Marker>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_current_position(&self) -> bool {
        self.current_position.is_some()
    }

    pub fn append(&mut self, location: &Location) {
        let slot = self.place(location, self.slots.len() + 1);
        self.slots.push(slot);
        self.fit_to_markers();
    }

    pub fn insert_first(&mut self, location: &Location) {
        let slot = self.place(location, 1);
        self.slots.insert(0, slot);
        self.relabel_from(1);
        self.fit_to_markers();
    }

    /// Disposes the marker at `index` and relabels the ones after it. The viewport
    /// is left where it is.
    pub fn remove(&mut self, index: usize) {
        assert!(
            index < self.slots.len(),
            "marker index {} out of range for {} markers",
            index,
            self.slots.len()
        );

        let slot = self.slots.remove(index);
        self.map.remove_marker(slot.handle);
        self.relabel_from(index);
    }

    /// Replaces every marker with fresh ones for `locations`, in order. Returns the
    /// number of markers placed.
    pub fn reorder(&mut self, locations: &[Location]) -> usize {
        for slot in self.slots.drain(..) {
            self.map.remove_marker(slot.handle);
        }

        for (index, location) in locations.iter().enumerate() {
            let slot = self.place(location, index + 1);
            self.slots.push(slot);
        }

        if self.slots.is_empty() {
            warn!("MarkerSync: no valid markers to display");
        } else {
            debug!("MarkerSync: placed {} markers in new order", self.slots.len());
            self.fit_to_markers();
        }

        self.slots.len()
    }

    /// Centers the map on the device position and marks it with the distinguished
    /// current-location marker, replacing a previous one.
    pub fn show_current_position(&mut self, point: geo::Point, zoom: u8) {
        self.map.set_view(point, zoom);

        if let Some(previous) = self.current_position.take() {
            self.map.remove_marker(previous);
        }

        let marker = self.map.place_marker(MarkerOptions {
            position: point,
            title: CURRENT_LOCATION_TITLE.to_owned(),
            label: None,
            icon: MarkerIcon::Circle(CircleSymbol::current_position()),
        });
        self.current_position = Some(marker);
    }

    fn place(&mut self, location: &Location, label: usize) -> MarkerSlot<M::Marker> {
        let handle = self.map.place_marker(MarkerOptions {
            position: location.point(),
            title: location.name().to_owned(),
            label: Some(label.to_string()),
            icon: MarkerIcon::Pin,
        });

        MarkerSlot {
            handle,
            label,
            position: location.point(),
            title: location.name().to_owned(),
        }
    }

    fn relabel_from(&mut self, start: usize) {
        for (index, slot) in self.slots.iter_mut().enumerate().skip(start) {
            slot.label = index + 1;
            self.map
                .set_marker_label(&slot.handle, &slot.label.to_string());
        }
    }

    fn fit_to_markers(&mut self) {
        if let Some(bounds) = bounds_of(self.slots.iter().map(|slot| slot.position)) {
            self.map.fit_bounds(bounds);
        }
    }
}
