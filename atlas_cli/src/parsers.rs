/// Parses `x,y` coordinates given as percentages of the map extent.
pub fn parse_coordinates(input: &str) -> Result<(f64, f64), String> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| String::from("Expected coordinates as \"x,y\""))?;

    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("Invalid x coordinate: {err}"))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("Invalid y coordinate: {err}"))?;

    if !x.is_finite() || !y.is_finite() {
        return Err(String::from("Coordinates must be finite"));
    }

    Ok((x, y))
}
