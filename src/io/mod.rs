//! Centerline import from plain-text track files.

mod track_file;

pub use track_file::{load_delimited, load_script, parse_delimited, parse_script};
