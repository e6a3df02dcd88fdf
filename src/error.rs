use crate::consts::{MAX_YEAR, MIN_YEAR};

/// Error type for all fallible operations in this crate.
///
/// Lookups that are legitimately "not found" (unknown solar-term name, a
/// month or day number outside its table) return `None` instead of one of
/// these variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LunarError {
    /// Year has no lunar calendar data (outside the supported range).
    #[error("year {year} out of supported range ({MIN_YEAR}..={MAX_YEAR})")]
    YearOutOfRange {
        /// The rejected year.
        year: u16,
    },

    /// Not a real Gregorian date.
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component as given.
        year: u16,
        /// Month component as given.
        month: u8,
        /// Day component as given.
        day: u8,
    },

    /// A date string that does not parse as `Y-M-D`.
    #[error("unparseable date string {0:?}")]
    InvalidDateFormat(String),

    /// A lunar month label did not resolve against the naming tables.
    #[error("unrecognized lunar month label {0:?}")]
    InvalidMonthLabel(String),

    /// A lunar day label did not resolve against the naming tables.
    #[error("unrecognized lunar day label {0:?}")]
    InvalidDayLabel(String),

    /// A lunar month number outside 1..=12.
    #[error("invalid lunar month number {0} (must be 1..=12)")]
    InvalidMonthNumber(u8),

    /// A lunar day number outside 1..=30.
    #[error("invalid lunar day number {0} (must be 1..=30)")]
    InvalidDayNumber(u8),

    /// The requested leap month does not exist in that lunar year.
    #[error("lunar year {year} has no leap month {month}")]
    InvalidLeapMonth {
        /// The lunar year the request was made against.
        year: u16,
        /// The month number claimed to be a leap month.
        month: u8,
    },

    /// A timestamp falls outside the representable date range.
    #[error("timestamp {0} out of supported range")]
    TimestampOutOfRange(i64),

    /// The data provider has no record for a year inside the supported range.
    #[error("no lunar data available for year {year}")]
    DataUnavailable {
        /// The year the provider could not supply.
        year: u16,
    },

    /// A fetched year record violates the data-model invariants.
    #[error("malformed year record for {year}: {reason}")]
    MalformedRecord {
        /// The year whose record failed validation.
        year: u16,
        /// What was wrong with the record.
        reason: String,
    },
}
