use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use waypoint_planner::{
    map_surface::MarkerIcon,
    notice::Notice,
    route_renderer::{RouteBlock, StopDetail},
};
use waypoint_providers::route_option::{TrafficLevel, TrafficSeverity};

use crate::console_map::{ConsoleMap, Viewport};

pub fn traffic_color(traffic: &TrafficLevel) -> Option<Color> {
    match traffic.severity() {
        TrafficSeverity::High => Some(Color::Red),
        TrafficSeverity::Medium => Some(Color::Yellow),
        TrafficSeverity::Low => Some(Color::Green),
        TrafficSeverity::Unknown => None,
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn route_table(block: &RouteBlock) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Stop", "Next"]);

    for row in &block.rows {
        let detail = Cell::new(row.detail.to_string());
        let detail = match &row.detail {
            StopDetail::NextLeg { traffic, .. } => match traffic_color(traffic) {
                Some(color) => detail.fg(color),
                None => detail,
            },
            StopDetail::Unavailable => detail.fg(Color::DarkGrey),
            StopDetail::FinalDestination => detail,
        };

        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(&row.name),
            detail,
        ]);
    }

    table
}

pub fn map_table(map: &ConsoleMap) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Label", "Title", "Lat", "Lng"]);

    for marker in map.markers() {
        let label = match (&marker.label, &marker.icon) {
            (Some(label), _) => label.clone(),
            (None, MarkerIcon::Circle(_)) => String::from("●"),
            (None, MarkerIcon::Pin) => String::new(),
        };

        table.add_row(vec![
            Cell::new(label),
            Cell::new(&marker.title),
            Cell::new(format!("{:.5}", marker.position.y())),
            Cell::new(format!("{:.5}", marker.position.x())),
        ]);
    }

    table
}

pub fn describe_viewport(viewport: Option<&Viewport>) -> String {
    match viewport {
        Some(Viewport::Centered { center, zoom }) => {
            format!("Centered on {:.5}, {:.5} at zoom {}", center.y(), center.x(), zoom)
        }
        Some(Viewport::Bounds(bounds)) => format!(
            "Fitted to {:.5}, {:.5} .. {:.5}, {:.5}",
            bounds.min().y,
            bounds.min().x,
            bounds.max().y,
            bounds.max().x
        ),
        None => String::from("Not configured"),
    }
}

pub fn print_routes(blocks: &[RouteBlock]) {
    for block in blocks {
        println!("{}", block.header());
        println!("{}", route_table(block));
    }
}

pub fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        eprintln!("! {}", notice);
    }
}
