//! Capture timestamps for a batch of scans.
//!
//! Frames on a roll rarely carry a real capture time, so each file in a batch
//! gets the shared date and a time one minute after the previous file. The
//! counter wraps minutes into hours but never touches the date: a roll
//! started at 23:59 continues with `24:00`.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Start time used when a date is given without `--time`.
pub const DEFAULT_START: ClockTime = ClockTime {
    hour: 12,
    minute: 0,
};

/// Rejected `--date` / `--time` values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockParseError {
    #[error("invalid date '{0}': expected YYYY:MM:DD")]
    Date(String),

    #[error("invalid time '{0}': expected HH:MM")]
    Time(String),
}

/// Calendar date of a roll, written in exiftool's `YYYY:MM:DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotDate(NaiveDate);

impl FromStr for ShotDate {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y:%m:%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .map(Self)
            .map_err(|_| ClockParseError::Date(s.to_string()))
    }
}

impl fmt::Display for ShotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y:%m:%d"))
    }
}

/// Time of day as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl Default for ClockTime {
    fn default() -> Self {
        DEFAULT_START
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClockParseError::Time(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(Self { hour, minute })
    }
}

/// Hands out one timestamp per file, advancing a minute each time.
#[derive(Debug, Clone)]
pub struct ShotClock {
    date: ShotDate,
    hour: u32,
    minute: u32,
}

impl ShotClock {
    pub fn new(date: ShotDate, start: ClockTime) -> Self {
        Self {
            date,
            hour: start.hour,
            minute: start.minute,
        }
    }

    /// Current stamp (`YYYY:MM:DD HH:MM:00`), then advance by one minute.
    pub fn next_stamp(&mut self) -> String {
        let stamp = format!("{} {:02}:{:02}:00", self.date, self.hour, self.minute);
        self.minute += 1;
        if self.minute >= 60 {
            self.hour += 1;
            self.minute = 0;
        }
        stamp
    }

    /// Exiftool arguments for the next file.
    pub fn next_args(&mut self) -> [String; 2] {
        let stamp = self.next_stamp();
        [
            format!("-DateTimeOriginal={}", stamp),
            format!("-CreateDate={}", stamp),
        ]
    }
}
