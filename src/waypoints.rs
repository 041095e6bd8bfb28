use std::fs;
use std::path::Path;

use thiserror::Error;

/// One line of the waypoint file: `latitude,longitude,altitude` in decimal
/// degrees / degrees / meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum WaypointParseError {
    #[error("expected 3 comma-separated fields, got {0}")]
    FieldCount(usize),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("non-finite value {0:?}")]
    NonFinite(String),
}

/// Parses a single waypoint line. Exactly three comma-separated tokens, each
/// a finite float.
pub fn parse_line(line: &str) -> Result<Waypoint, WaypointParseError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(WaypointParseError::FieldCount(fields.len()));
    }
    let mut values = [0f64; 3];
    for (i, field) in fields.iter().enumerate() {
        let field = field.trim();
        let v = field
            .parse::<f64>()
            .map_err(|_| WaypointParseError::InvalidNumber(field.to_owned()))?;
        if !v.is_finite() {
            return Err(WaypointParseError::NonFinite(field.to_owned()));
        }
        values[i] = v;
    }
    Ok(Waypoint {
        latitude: values[0],
        longitude: values[1],
        altitude: values[2],
    })
}

/// Reads waypoints from a file, one per line, skipping blank lines.
///
/// Error policy:
/// - a missing or unreadable file logs an error and yields an empty list;
/// - a malformed line logs the detail and stops the read, keeping whatever
///   parsed before it.
pub fn load_waypoints<P: AsRef<Path>>(path: P) -> Vec<Waypoint> {
    let method_name = "load_waypoints";
    let path = path.as_ref();
    let mut waypoints = Vec::new();
    let contents = fs::read_to_string(path);
    if contents.is_err() {
        tracing::error!(
            method_name,
            "{} not found: {}",
            path.display(),
            contents.unwrap_err()
        );
        return waypoints;
    }
    for (lineno, line) in contents.unwrap().lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(wp) => waypoints.push(wp),
            Err(e) => {
                tracing::error!(method_name, lineno = lineno + 1, "error reading waypoints: {e}");
                break;
            }
        }
    }
    tracing::debug!(method_name, count = waypoints.len(), "waypoints loaded");
    waypoints
}
