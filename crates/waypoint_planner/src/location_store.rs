use tracing::{debug, warn};

use crate::location::Location;

/// Ordered destinations. Insertion order is the visiting intent until an
/// optimization result overwrites it.
#[derive(Debug, Default)]
pub struct LocationStore {
    locations: Vec<Location>,
}

impl LocationStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends `location`. Returns `false`, without touching the store, when the
    /// location has no usable coordinates.
    pub fn add(&mut self, location: Location) -> bool {
        if !location.has_valid_coordinates() {
            warn!(
                "LocationStore: ignoring {} without resolvable coordinates",
                location.name()
            );
            return false;
        }

        self.locations.push(location);
        true
    }

    pub fn insert_first(&mut self, location: Location) -> bool {
        if !location.has_valid_coordinates() {
            warn!(
                "LocationStore: ignoring {} without resolvable coordinates",
                location.name()
            );
            return false;
        }

        self.locations.insert(0, location);
        true
    }

    /// Panics when `index` is out of range: indices come from a list that mirrors
    /// the store, so a bad one means the two drifted apart.
    pub fn remove_at(&mut self, index: usize) -> Location {
        assert!(
            index < self.locations.len(),
            "location index {} out of range for {} locations",
            index,
            self.locations.len()
        );
        self.locations.remove(index)
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.locations
            .iter()
            .map(|location| location.name().to_owned())
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|location| location.name() == name)
    }

    /// Rearranges the store to follow `names` and returns the names that matched
    /// nothing. Each stored location is consumed at most once, so repeated names
    /// match repeated entries in order. Stored locations that `names` never
    /// mentioned are kept, in their previous relative order, after the matched ones.
    pub fn reorder_by_names(&mut self, names: &[String]) -> Vec<String> {
        let mut remaining: Vec<Option<Location>> = std::mem::take(&mut self.locations)
            .into_iter()
            .map(Some)
            .collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut misses = Vec::new();

        for name in names {
            let matched = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|location| location.name() == name))
                .and_then(Option::take);

            match matched {
                Some(location) => ordered.push(location),
                None => {
                    warn!("LocationStore: location not found: {}", name);
                    misses.push(name.clone());
                }
            }
        }

        let leftovers: Vec<Location> = remaining.into_iter().flatten().collect();
        if !leftovers.is_empty() {
            debug!(
                "LocationStore: {} stored locations were not part of the new order",
                leftovers.len()
            );
        }
        ordered.extend(leftovers);

        self.locations = ordered;
        misses
    }
}
