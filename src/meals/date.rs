use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::{macros::format_description, Date, Duration, OffsetDateTime};

use crate::error::AppError;

/// Calendar day a meal is logged under, written `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MealDate(Date);

impl MealDate {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Today in the local time zone, or UTC when the local offset is unknown.
    pub fn today() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self(now.date())
    }

    pub fn date(&self) -> Date {
        self.0
    }

    pub fn days_before(&self, days: u32) -> Self {
        Self(self.0.saturating_sub(Duration::days(days.into())))
    }
}

impl From<Date> for MealDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl FromStr for MealDate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The parser accepts some non-padded forms; only the canonical one is a key.
        let date = Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map_err(|_| AppError::InvalidDate(s.to_string()))?;
        let parsed = Self(date);
        if parsed.to_string() != s {
            return Err(AppError::InvalidDate(s.to_string()));
        }
        Ok(parsed)
    }
}

impl fmt::Display for MealDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Serialize for MealDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MealDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
