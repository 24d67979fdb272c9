use thiserror::Error;

/// A named destination. Immutable once stored; the name doubles as the join key
/// with the stop names returned by the optimization backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    point: geo::Point,
}

impl Location {
    pub fn new(name: impl Into<String>, point: geo::Point) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }

    pub fn from_lat_lng(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self::new(name, geo::Point::new(lng, lat))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn point(&self) -> geo::Point {
        self.point
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lng(&self) -> f64 {
        self.point.x()
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.lat().is_finite()
            && self.lng().is_finite()
            && self.lat().abs() <= 90.0
            && self.lng().abs() <= 180.0
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}

impl From<&Location> for geo::Coord<f64> {
    fn from(location: &Location) -> Self {
        location.point.0
    }
}

/// What the places autocomplete hands back when the user picks a suggestion.
/// Either part may be missing when the user confirmed free text instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceSelection {
    pub formatted_address: Option<String>,
    pub point: Option<geo::Point>,
}

impl PlaceSelection {
    pub fn new(formatted_address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            formatted_address: Some(formatted_address.into()),
            point: Some(geo::Point::new(lng, lat)),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSelection {
    #[error("selection has no formatted address")]
    MissingAddress,

    #[error("selection has no resolvable coordinates")]
    MissingGeometry,
}

impl TryFrom<PlaceSelection> for Location {
    type Error = InvalidSelection;

    fn try_from(selection: PlaceSelection) -> Result<Self, Self::Error> {
        let name = selection
            .formatted_address
            .filter(|address| !address.trim().is_empty())
            .ok_or(InvalidSelection::MissingAddress)?;
        let point = selection.point.ok_or(InvalidSelection::MissingGeometry)?;

        let location = Location::new(name, point);
        if !location.has_valid_coordinates() {
            return Err(InvalidSelection::MissingGeometry);
        }

        Ok(location)
    }
}
