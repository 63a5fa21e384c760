use super::WeatherRecord;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass direction for a wind bearing.
pub fn compass_point(deg: u16) -> &'static str {
    let idx = ((f64::from(deg % 360) / 22.5).round() as usize) % COMPASS.len();
    COMPASS[idx]
}

/// Render a record as a human-readable text block. The timestamp is taken
/// from the record, so output is fully determined by the input.
pub fn format_weather(w: &WeatherRecord) -> String {
    let t = w.units.temperature_symbol();
    format!(
        "Weather in {city}, {country}:\n\
         Temperature: {temp:.0}{t} (feels like {feels:.0}{t})\n\
         Conditions: {desc}\n\
         Humidity: {humidity}%\n\
         Pressure: {pressure} hPa\n\
         Wind: {speed:.1} {speed_unit} {dir}\n\
         Visibility: {vis:.1} km\n\
         Updated: {ts} UTC",
        city = w.city,
        country = w.country,
        temp = w.temperature,
        feels = w.feels_like,
        desc = w.description,
        humidity = w.humidity,
        pressure = w.pressure,
        speed = w.wind_speed,
        speed_unit = w.units.speed_symbol(),
        dir = compass_point(w.wind_deg),
        vis = f64::from(w.visibility) / 1000.0,
        ts = w.timestamp.format("%Y-%m-%d %H:%M"),
    )
}
