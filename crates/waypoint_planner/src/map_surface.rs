use geo::BoundingRect;

/// Initial configuration of the map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: geo::Point,
    pub zoom: u8,
    /// Hide the provider's default point-of-interest labels.
    pub hide_poi_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: geo::Point,
    pub title: String,
    pub label: Option<String>,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MarkerIcon {
    #[default]
    Pin,
    Circle(CircleSymbol),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleSymbol {
    pub scale: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_weight: f64,
}

impl CircleSymbol {
    /// The blue dot used for the device position.
    pub fn current_position() -> Self {
        Self {
            scale: 10.0,
            fill_color: String::from("#4285F4"),
            fill_opacity: 1.0,
            stroke_color: String::from("#ffffff"),
            stroke_weight: 2.0,
        }
    }
}

/// The drawing side of the mapping provider.
pub trait MapSurface {
    type Marker;

    fn configure(&mut self, options: &MapOptions);

    fn place_marker(&mut self, options: MarkerOptions) -> Self::Marker;

    fn set_marker_label(&mut self, marker: &Self::Marker, label: &str);

    /// Detaches the marker from the surface.
    fn remove_marker(&mut self, marker: Self::Marker);

    fn fit_bounds(&mut self, bounds: geo::Rect);

    fn set_view(&mut self, center: geo::Point, zoom: u8);
}

/// Smallest rectangle containing every point, `None` for no points.
pub fn bounds_of<I>(points: I) -> Option<geo::Rect>
where
    I: IntoIterator<Item = geo::Point>,
{
    let points: geo::MultiPoint = points.into_iter().collect();
    points.bounding_rect()
}
