use std::collections::BTreeMap;

use tracing::{debug, warn};
use waypoint_planner::map_surface::{MapOptions, MapSurface, MarkerOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum Viewport {
    Centered { center: geo::Point, zoom: u8 },
    Bounds(geo::Rect),
}

/// Map surface that keeps its state in memory and prints it on demand.
#[derive(Debug, Default)]
pub struct ConsoleMap {
    next_id: usize,
    markers: BTreeMap<usize, MarkerOptions>,
    viewport: Option<Viewport>,
    hide_poi_labels: bool,
}

impl ConsoleMap {
    /// Markers in placement order.
    pub fn markers(&self) -> impl Iterator<Item = &MarkerOptions> {
        self.markers.values()
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn hides_poi_labels(&self) -> bool {
        self.hide_poi_labels
    }
}

impl MapSurface for ConsoleMap {
    type Marker = usize;

    fn configure(&mut self, options: &MapOptions) {
        self.hide_poi_labels = options.hide_poi_labels;
        self.viewport = Some(Viewport::Centered {
            center: options.center,
            zoom: options.zoom,
        });
    }

    fn place_marker(&mut self, options: MarkerOptions) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        debug!(
            "ConsoleMap: marker {} {:?} at {}, {}",
            id,
            options.label,
            options.position.y(),
            options.position.x()
        );
        self.markers.insert(id, options);
        id
    }

    fn set_marker_label(&mut self, marker: &usize, label: &str) {
        match self.markers.get_mut(marker) {
            Some(options) => options.label = Some(label.to_owned()),
            None => warn!("ConsoleMap: cannot relabel unknown marker {}", marker),
        }
    }

    fn remove_marker(&mut self, marker: usize) {
        if self.markers.remove(&marker).is_none() {
            warn!("ConsoleMap: marker {} was already removed", marker);
        }
    }

    fn fit_bounds(&mut self, bounds: geo::Rect) {
        debug!("ConsoleMap: fitting {:?}", bounds);
        self.viewport = Some(Viewport::Bounds(bounds));
    }

    fn set_view(&mut self, center: geo::Point, zoom: u8) {
        self.viewport = Some(Viewport::Centered { center, zoom });
    }
}

#[cfg(test)]
mod tests {
    use waypoint_planner::map_surface::MarkerIcon;

    use super::*;

    fn pin(label: &str) -> MarkerOptions {
        MarkerOptions {
            position: geo::Point::new(2.0, 48.0),
            title: String::from("Stop"),
            label: Some(label.to_owned()),
            icon: MarkerIcon::Pin,
        }
    }

    #[test]
    fn test_markers_are_tracked_until_removed() {
        let mut map = ConsoleMap::default();

        let first = map.place_marker(pin("1"));
        let second = map.place_marker(pin("2"));
        map.remove_marker(first);
        map.set_marker_label(&second, "1");

        let labels: Vec<_> = map.markers().map(|m| m.label.clone()).collect();
        assert_eq!(labels, [Some(String::from("1"))]);
    }

    #[test]
    fn test_viewport_follows_last_operation() {
        let mut map = ConsoleMap::default();
        let bounds = geo::Rect::new(geo::coord! { x: 0.0, y: 0.0 }, geo::coord! { x: 1.0, y: 1.0 });

        map.fit_bounds(bounds);
        assert_eq!(map.viewport(), Some(&Viewport::Bounds(bounds)));

        map.set_view(geo::Point::new(2.0, 48.0), 13);
        assert_eq!(
            map.viewport(),
            Some(&Viewport::Centered {
                center: geo::Point::new(2.0, 48.0),
                zoom: 13
            })
        );
    }
}
