use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    sync::OnceLock,
};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::OwnedFormatItem,
    format_description::well_known::Rfc3339,
};

static NAIVE_FORMAT: OnceLock<OwnedFormatItem> = OnceLock::new();
static DATE_FORMAT: OnceLock<OwnedFormatItem> = OnceLock::new();

fn naive_format() -> &'static OwnedFormatItem {
    NAIVE_FORMAT.get_or_init(|| {
        time::format_description::parse_owned::<2>(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]",
        )
        .unwrap()
    })
}

fn date_format() -> &'static OwnedFormatItem {
    DATE_FORMAT
        .get_or_init(|| time::format_description::parse_owned::<2>("[year]-[month]-[day]").unwrap())
}

///
/// DateTime
///
/// Calendar date and time with offset, always rendered as RFC 3339.
/// Input is ISO-8601-ish: full RFC 3339, naive date-times (assumed UTC),
/// and bare `YYYY-MM-DD` dates (UTC midnight) all parse.
///

#[repr(transparent)]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DateTime(OffsetDateTime);

impl DateTime {
    pub const UNIX_EPOCH: Self = Self(OffsetDateTime::UNIX_EPOCH);

    #[must_use]
    pub const fn new(inner: OffsetDateTime) -> Self {
        Self(inner)
    }

    /// Current instant from the system clock.
    #[must_use]
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn from_unix_timestamp(secs: i64) -> Result<Self, time::error::ComponentRange> {
        OffsetDateTime::from_unix_timestamp(secs).map(Self)
    }

    #[must_use]
    pub const fn get(self) -> OffsetDateTime {
        self.0
    }

    #[must_use]
    pub const fn unix_timestamp(self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Parse an ISO-8601-ish string.
    ///
    /// Tries full RFC 3339 first, then a naive date-time assumed UTC, then a
    /// bare calendar date at UTC midnight. The error reported is the RFC 3339
    /// parser's, which is the canonical input form.
    pub fn parse(s: &str) -> Result<Self, time::error::Parse> {
        let rfc3339 = match OffsetDateTime::parse(s, &Rfc3339) {
            Ok(odt) => return Ok(Self(odt)),
            Err(err) => err,
        };

        if let Ok(naive) = PrimitiveDateTime::parse(s, naive_format()) {
            return Ok(Self(naive.assume_utc()));
        }

        if let Ok(date) = time::Date::parse(s, date_format()) {
            return Ok(Self(PrimitiveDateTime::new(date, time::Time::MIDNIGHT).assume_utc()));
        }

        Err(rfc3339)
    }
}

impl Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime({self})")
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(s) => f.write_str(&s),
            // unreachable for in-range offsets; keep Display total
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(inner: OffsetDateTime) -> Self {
        Self(inner)
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(|_| serde::de::Error::custom(format!("invalid date-time: {s}")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = DateTime::parse("2015-06-09T03:34:49+00:00").unwrap();
        assert_eq!(dt.unix_timestamp(), 1_433_820_889);
    }

    #[test]
    fn parses_naive_as_utc() {
        let naive = DateTime::parse("2015-06-09T03:34:49").unwrap();
        let explicit = DateTime::parse("2015-06-09T03:34:49Z").unwrap();
        assert_eq!(naive, explicit);
    }

    #[test]
    fn parses_naive_with_subseconds() {
        let dt = DateTime::parse("2015-06-09T03:34:49.000123").unwrap();
        assert_eq!(dt.get().microsecond(), 123);
    }

    #[test]
    fn parses_bare_date_at_midnight() {
        let dt = DateTime::parse("2024-10-19").unwrap();
        assert_eq!(dt.get().time(), time::Time::MIDNIGHT);
    }

    #[test]
    fn unparseable_input_reports_error() {
        assert!(DateTime::parse("not parseable as a date").is_err());
        assert!(DateTime::parse("2025-13-40").is_err());
    }

    #[test]
    fn display_round_trips() {
        let dt = DateTime::parse("2015-06-08T21:34:56Z").unwrap();
        assert_eq!(DateTime::parse(&dt.to_string()).unwrap(), dt);
    }

    #[test]
    fn ordering_follows_the_timeline() {
        let d1 = DateTime::parse("2020-01-01").unwrap();
        let d2 = DateTime::parse("2021-01-01").unwrap();
        assert!(d1 < d2);
    }
}
