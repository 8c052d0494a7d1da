//! CLI module for filmscan
//!
//! Argument parsing and terminal output for the `photo-exif` and
//! `photo-rename` binaries. The work itself lives in [`crate::exif`] and
//! [`crate::rename`].

pub mod error;
pub mod output;

pub mod exif;
pub mod rename;
