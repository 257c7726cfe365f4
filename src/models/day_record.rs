//! Day record model and its boundary times.
//!
//! A [`DayRecord`] is one line of the daily log: the date text plus the
//! earliest and latest activity observed that day. Either boundary may be
//! missing, which is modelled by [`BoundaryTime::NoRecord`]. Once one side
//! is missing the day is never calculated, so the other side is kept even
//! when it is not a readable time.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

use crate::error::{EngineError, EngineResult};

/// Text written by the log extractor when no boundary was observed.
pub const NO_RECORD_TEXT: &str = "无记录";

/// Alternate spelling of the sentinel accepted on input.
pub const NO_RECORD_ALIAS: &str = "NO_RECORD";

/// Format of an observed boundary time.
pub const BOUNDARY_FORMAT: &str = "%H:%M:%S";

/// An observed clock-in or clock-out time, or the absence of one.
///
/// # Example
///
/// ```
/// use work_hours::models::BoundaryTime;
///
/// let first: BoundaryTime = "08:50:00".parse().unwrap();
/// assert!(first.is_recorded());
///
/// let missing: BoundaryTime = "无记录".parse().unwrap();
/// assert_eq!(missing, BoundaryTime::NoRecord);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BoundaryTime {
    /// A time observed in the system log.
    Recorded(NaiveTime),
    /// No activity was observed for this boundary.
    NoRecord,
    /// Text that is not a time, kept verbatim next to a missing boundary.
    ///
    /// Only [`DayRecord::from_fields`] produces this variant; parsing a
    /// boundary on its own rejects unreadable text.
    Unreadable(String),
}

/// Returns true if `text` is the no-record sentinel or its alias.
pub fn is_no_record_text(text: &str) -> bool {
    let text = text.trim();
    text == NO_RECORD_TEXT || text == NO_RECORD_ALIAS
}

impl BoundaryTime {
    /// Returns the observed time, if any.
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            BoundaryTime::Recorded(time) => Some(*time),
            BoundaryTime::NoRecord | BoundaryTime::Unreadable(_) => None,
        }
    }

    /// Parses a boundary, keeping unreadable text instead of failing.
    fn parse_lenient(text: &str) -> Self {
        text.parse()
            .unwrap_or_else(|_| BoundaryTime::Unreadable(text.trim().to_string()))
    }

    /// Returns true if a time was observed.
    pub fn is_recorded(&self) -> bool {
        matches!(self, BoundaryTime::Recorded(_))
    }
}

impl FromStr for BoundaryTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if is_no_record_text(s) {
            return Ok(BoundaryTime::NoRecord);
        }

        NaiveTime::parse_from_str(s, BOUNDARY_FORMAT)
            .map(BoundaryTime::Recorded)
            .map_err(|_| EngineError::InvalidTime {
                value: s.to_string(),
                expected: format!("HH:MM:SS or '{}'", NO_RECORD_TEXT),
            })
    }
}

impl fmt::Display for BoundaryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryTime::Recorded(time) => write!(f, "{}", time.format(BOUNDARY_FORMAT)),
            BoundaryTime::NoRecord => f.write_str(NO_RECORD_TEXT),
            BoundaryTime::Unreadable(text) => f.write_str(text),
        }
    }
}

impl TryFrom<String> for BoundaryTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BoundaryTime> for String {
    fn from(boundary: BoundaryTime) -> Self {
        boundary.to_string()
    }
}

impl From<NaiveTime> for BoundaryTime {
    fn from(time: NaiveTime) -> Self {
        BoundaryTime::Recorded(time)
    }
}

/// One day of the daily log.
///
/// Deserialization goes through [`DayRecord::from_fields`], so structured
/// input follows the same rules as log lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    /// The date text as written in the log (`YYYY-MM-DD`).
    pub date: String,
    /// The earliest activity of the day.
    pub first_time: BoundaryTime,
    /// The latest activity of the day.
    pub last_time: BoundaryTime,
}

impl DayRecord {
    /// Creates a record from its parts.
    pub fn new(
        date: impl Into<String>,
        first_time: BoundaryTime,
        last_time: BoundaryTime,
    ) -> Self {
        Self {
            date: date.into(),
            first_time,
            last_time,
        }
    }

    /// Builds a record from the three text fields of a log line.
    ///
    /// When either field is the no-record sentinel the other field is not
    /// required to be a valid time: the day will not be calculated, and
    /// unreadable text is kept as [`BoundaryTime::Unreadable`]. Otherwise
    /// both fields must be `HH:MM:SS`.
    ///
    /// # Example
    ///
    /// ```
    /// use work_hours::models::{BoundaryTime, DayRecord};
    ///
    /// let record = DayRecord::from_fields("2024-03-16", "无记录", "garbage").unwrap();
    /// assert_eq!(record.first_time, BoundaryTime::NoRecord);
    /// assert_eq!(record.last_time, BoundaryTime::Unreadable("garbage".to_string()));
    ///
    /// assert!(DayRecord::from_fields("2024-03-16", "09:00:00", "garbage").is_err());
    /// ```
    pub fn from_fields(date: &str, first_time: &str, last_time: &str) -> EngineResult<Self> {
        let either_missing = is_no_record_text(first_time) || is_no_record_text(last_time);
        let (first_time, last_time) = if either_missing {
            (
                BoundaryTime::parse_lenient(first_time),
                BoundaryTime::parse_lenient(last_time),
            )
        } else {
            (first_time.parse()?, last_time.parse()?)
        };

        Ok(Self {
            date: date.trim().to_string(),
            first_time,
            last_time,
        })
    }

    /// The year part of the date, split literally on `-`.
    ///
    /// No calendar validation is performed.
    pub fn year(&self) -> &str {
        self.date.split('-').next().unwrap_or_default()
    }

    /// The month part of the date, split literally on `-`.
    ///
    /// Returns an empty string when the date has no second part. A month of
    /// `13` is returned as-is.
    ///
    /// # Example
    ///
    /// ```
    /// use work_hours::models::{BoundaryTime, DayRecord};
    ///
    /// let record = DayRecord::new("2024-13-01", BoundaryTime::NoRecord, BoundaryTime::NoRecord);
    /// assert_eq!(record.year(), "2024");
    /// assert_eq!(record.month(), "13");
    /// ```
    pub fn month(&self) -> &str {
        self.date.split('-').nth(1).unwrap_or_default()
    }

    /// Returns both observed times if neither boundary is missing.
    pub fn recorded_times(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((self.first_time.time()?, self.last_time.time()?))
    }
}

/// Wire shape of a [`DayRecord`] before its times are read.
#[derive(Deserialize)]
struct DayRecordFields {
    date: String,
    first_time: String,
    last_time: String,
}

impl<'de> Deserialize<'de> for DayRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = DayRecordFields::deserialize(deserializer)?;
        DayRecord::from_fields(&fields.date, &fields.first_time, &fields.last_time)
            .map_err(D::Error::custom)
    }
}
