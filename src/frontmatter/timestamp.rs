use std::fmt::Display;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, TimeZone};

use crate::error::{Error, Result};

/// How `created:` and `modified:` values are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `Friday, October 16th 2026, 3:04:05 pm`
    #[default]
    Human,
    /// A chrono strftime pattern.
    Pattern(String),
}

impl TimestampFormat {
    /// Build a custom pattern, rejecting unknown specifiers up front so
    /// rendering can never fail later.
    ///
    /// # Errors
    /// Returns [`Error::TimeFormat`] if the pattern does not parse.
    pub fn pattern(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(Error::TimeFormat(pattern.to_string()));
        }
        Ok(Self::Pattern(pattern.to_string()))
    }

    pub fn render<Tz>(&self, time: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            Self::Human => {
                let day = time.day();
                format!(
                    "{}, {} {day}{} {}",
                    time.format("%A"),
                    time.format("%B"),
                    ordinal_suffix(day),
                    time.format("%Y, %-I:%M:%S %P"),
                )
            }
            Self::Pattern(pattern) => time.format(pattern).to_string(),
        }
    }
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
