use waypoint_planner::location::PlaceSelection;

pub fn parse_position(input: &str) -> Result<geo::Point, String> {
    let (lat, lng) = input
        .split_once(',')
        .ok_or_else(|| String::from("Invalid position, expected <lat>,<lng>"))?;

    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid latitude: {}", lat.trim()))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid longitude: {}", lng.trim()))?;

    Ok(geo::Point::new(lng, lat))
}

/// Parses `<lat>,<lng> <address>`. Text without a leading position is kept as a
/// selection without geometry, the way free text typed into a places box is.
pub fn parse_stop(input: &str) -> Result<PlaceSelection, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(String::from("Empty stop"));
    }

    let (head, rest) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""));

    match parse_position(head) {
        Ok(point) => Ok(PlaceSelection {
            formatted_address: Some(rest.trim().to_owned()).filter(|address| !address.is_empty()),
            point: Some(point),
        }),
        Err(_) => Ok(PlaceSelection {
            formatted_address: Some(input.to_owned()),
            point: None,
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Add(PlaceSelection),
    /// 0-based index of the row to remove.
    Remove(usize),
    List,
    Map,
    Optimize,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <lat>,<lng> <address>   add a stop
  remove <n>                  remove stop number n
  list                        show the stops
  map                         show the markers and viewport
  optimize                    request the optimized order
  help                        show this help
  quit                        exit";

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" | "a" => ReplCommand::Add(parse_stop(rest)?),
        "remove" | "rm" => {
            let number = rest
                .parse::<usize>()
                .map_err(|_| format!("Invalid stop number: {}", rest))?;
            if number == 0 {
                return Err(String::from("Stop numbers start at 1"));
            }
            ReplCommand::Remove(number - 1)
        }
        "list" | "ls" => ReplCommand::List,
        "map" => ReplCommand::Map,
        "optimize" | "o" => ReplCommand::Optimize,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => return Err(format!("Unknown command: {}", verb)),
    };

    Ok(Some(command))
}
