//! Tools for organizing scanned analog photos.
//!
//! - [`exif`]: stamp camera, lens, film and capture data onto scans via exiftool
//! - [`rename`]: renumber scan files sharing a prefix

pub mod cli;
pub mod exif;
pub mod rename;
