//! Plain-text centerline formats.
//!
//! - **Script files**: one `x y` pair per line, whitespace separated. Lines
//!   with a different number of fields are ignored; lines whose fields are
//!   not numbers are skipped with a warning.
//! - **Delimited files**: a header line followed by rows whose first two
//!   fields are `x` and `y`. Extra columns are ignored; unparsable rows are
//!   skipped with a warning.

use std::path::Path;

use crate::error::{ImportError, Result};
use crate::math::Point2;

/// Parses a whitespace-separated script.
///
/// # Errors
///
/// Returns `ImportError::Malformed` if fewer than 2 points were read.
pub fn parse_script(text: &str) -> Result<Vec<Point2>> {
    let mut points = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            continue;
        }
        match parse_pair(fields[0], fields[1]) {
            Some(p) => points.push(p),
            None => tracing::warn!(line = index + 1, content = line.trim(), "skipping invalid script line"),
        }
    }
    require_points(points)
}

/// Parses delimited text with a header line.
///
/// # Errors
///
/// Returns `ImportError::Malformed` if the text is empty or fewer than 2
/// points were read.
pub fn parse_delimited(text: &str, delimiter: char) -> Result<Vec<Point2>> {
    let mut lines = text.lines().enumerate();
    if lines.next().is_none() {
        return Err(ImportError::Malformed("file is empty".to_owned()).into());
    }

    let mut points = Vec::new();
    for (index, line) in lines {
        let mut fields = line.trim().split(delimiter);
        let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
            continue;
        };
        match parse_pair(x, y) {
            Some(p) => points.push(p),
            None => tracing::warn!(line = index + 1, content = line.trim(), "skipping invalid row"),
        }
    }
    require_points(points)
}

/// Reads and parses a script file.
///
/// # Errors
///
/// Returns `ImportError::Io` if the file cannot be read, otherwise see
/// [`parse_script`].
pub fn load_script(path: &Path) -> Result<Vec<Point2>> {
    parse_script(&read(path)?)
}

/// Reads and parses a delimited file.
///
/// # Errors
///
/// Returns `ImportError::Io` if the file cannot be read, otherwise see
/// [`parse_delimited`].
pub fn load_delimited(path: &Path, delimiter: char) -> Result<Vec<Point2>> {
    parse_delimited(&read(path)?, delimiter)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| ImportError::Io(format!("{}: {e}", path.display())).into())
}

fn parse_pair(x: &str, y: &str) -> Option<Point2> {
    let x: f64 = x.trim().parse().ok()?;
    let y: f64 = y.trim().parse().ok()?;
    (x.is_finite() && y.is_finite()).then_some(Point2::new(x, y))
}

fn require_points(points: Vec<Point2>) -> Result<Vec<Point2>> {
    if points.len() < 2 {
        return Err(ImportError::Malformed(format!(
            "at least 2 points are required, found {}",
            points.len()
        ))
        .into());
    }
    Ok(points)
}
