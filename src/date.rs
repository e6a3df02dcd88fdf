use crate::LunarError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_SOLAR_YEAR, MIN_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JDN,
};
use crate::prelude::*;
use std::str::FromStr;

/// A validated Gregorian calendar date.
///
/// Ordering follows calendar order. `Display` renders ISO style
/// (`2018-04-05`); `FromStr` additionally accepts the unpadded `2018-4-5`
/// form the lunar data source uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct SolarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl SolarDate {
    /// Creates a date, validating that the day exists in the given month
    /// (February has 29 days in Gregorian leap years).
    ///
    /// # Errors
    /// Returns `LunarError::InvalidDate` for anything that is not a real
    /// Gregorian date with year in `1..=9999`.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, LunarError> {
        if year == 0
            || year > MAX_SOLAR_YEAR
            || month == 0
            || month > MAX_MONTH
            || day < MIN_DAY
            || day > days_in_month(year, month)
        {
            return Err(LunarError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Returns the year component
    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Returns the month component
    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Returns the day component
    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Julian day number of this date.
    pub(crate) fn jdn(self) -> i64 {
        let (y, m, d) = (
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        );
        (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
            - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
            + d
            - 32075
    }

    /// Date for a Julian day number, or `None` outside the representable
    /// year range.
    pub(crate) fn from_jdn(jdn: i64) -> Option<Self> {
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        if !(1..=i64::from(MAX_SOLAR_YEAR)).contains(&year) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let date = Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        };
        Some(date)
    }

    /// Signed number of calendar days from `self` to `other` (positive when
    /// `other` is later).
    ///
    /// # Example
    ///
    /// ```
    /// use chinese_lunar::SolarDate;
    ///
    /// let nye = SolarDate::new(2017, 12, 31)?;
    /// let new_year = SolarDate::new(2018, 1, 1)?;
    /// assert_eq!(1, nye.days_until(new_year));
    /// assert_eq!(-1, new_year.days_until(nye));
    /// # Ok::<(), chinese_lunar::LunarError>(())
    /// ```
    pub fn days_until(self, other: Self) -> i64 {
        other.jdn() - self.jdn()
    }

    /// The date `n` days after this one (before, if `n` is negative),
    /// normalized across month and year rollover. `None` if the result
    /// leaves the representable year range.
    ///
    /// # Example
    ///
    /// ```
    /// use chinese_lunar::SolarDate;
    ///
    /// let date = SolarDate::new(2017, 1, 28)?;
    /// assert_eq!(SolarDate::new(2017, 2, 1)?, date.offset_days(4).unwrap());
    /// # Ok::<(), chinese_lunar::LunarError>(())
    /// ```
    pub fn offset_days(self, n: i64) -> Option<Self> {
        Self::from_jdn(self.jdn() + n)
    }

    /// Days since the Unix epoch (1970-01-01), negative for earlier dates.
    pub fn days_since_epoch(self) -> i64 {
        self.jdn() - UNIX_EPOCH_JDN
    }
}

impl FromStr for SolarDate {
    type Err = LunarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(LunarError::InvalidDateFormat(s.to_owned()));
        };
        let year = y
            .parse::<u16>()
            .map_err(|_| LunarError::InvalidDateFormat(s.to_owned()))?;
        let month = m
            .parse::<u8>()
            .map_err(|_| LunarError::InvalidDateFormat(s.to_owned()))?;
        let day = d
            .parse::<u8>()
            .map_err(|_| LunarError::InvalidDateFormat(s.to_owned()))?;
        Self::new(year, month, day)
    }
}

impl serde::Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Day-of-year and week-of-year counters for a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInfo {
    /// 1-based day of the year.
    pub day_of_year: u16,
    /// Ceiling week number, `ceil(day_of_year / 7)`.
    pub week_of_year: u16,
}

/// Determines if `year` is a Gregorian leap year.
///
/// # Example
///
/// ```
/// use chinese_lunar::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// ```
pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in a Gregorian month, with the leap-February adjustment.
///
/// # Example
///
/// ```
/// use chinese_lunar::days_in_month;
///
/// assert_eq!(29, days_in_month(2024, 2));
/// assert_eq!(28, days_in_month(2023, 2));
/// ```
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Day-of-year and week-of-year of a Unix timestamp's UTC date.
///
/// # Errors
/// Returns `LunarError::TimestampOutOfRange` when the timestamp falls outside
/// the representable year range.
///
/// # Example
///
/// ```
/// use chinese_lunar::date_info;
///
/// // 2018-02-15 00:00:00 UTC
/// let info = date_info(1_518_652_800)?;
/// assert_eq!(46, info.day_of_year);
/// assert_eq!(7, info.week_of_year);
/// # Ok::<(), chinese_lunar::LunarError>(())
/// ```
pub fn date_info(timestamp: i64) -> Result<DateInfo, LunarError> {
    let days = timestamp.div_euclid(SECONDS_PER_DAY);
    let date = SolarDate::from_jdn(UNIX_EPOCH_JDN + days)
        .ok_or(LunarError::TimestampOutOfRange(timestamp))?;
    let jan_first = SolarDate::new(date.year(), 1, 1)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let day_of_year = (jan_first.days_until(date) + 1) as u16;
    Ok(DateInfo {
        day_of_year,
        week_of_year: day_of_year.div_ceil(7),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        assert!(SolarDate::new(2017, 1, 28).is_ok());
        assert!(SolarDate::new(2024, 2, 29).is_ok());
        assert!(SolarDate::new(1, 1, 1).is_ok());
        assert!(SolarDate::new(9999, 12, 31).is_ok());
    }

    #[test]
    fn test_new_invalid() {
        assert!(matches!(
            SolarDate::new(2023, 2, 29),
            Err(LunarError::InvalidDate { .. })
        ));
        assert!(SolarDate::new(2017, 0, 1).is_err());
        assert!(SolarDate::new(2017, 13, 1).is_err());
        assert!(SolarDate::new(2017, 4, 31).is_err());
        assert!(SolarDate::new(0, 1, 1).is_err());
        assert!(SolarDate::new(10000, 1, 1).is_err());
    }

    #[test]
    fn test_jdn_fixed_points() {
        assert_eq!(2440588, SolarDate::new(1970, 1, 1).unwrap().jdn());
        assert_eq!(2451545, SolarDate::new(2000, 1, 1).unwrap().jdn());
        assert_eq!(2459466, SolarDate::new(2021, 9, 8).unwrap().jdn());
    }

    #[test]
    fn test_from_jdn_round_trip() {
        for (y, m, d) in [
            (1970, 1, 1),
            (2000, 2, 29),
            (2016, 12, 31),
            (2017, 1, 28),
            (2100, 12, 31),
        ] {
            let date = SolarDate::new(y, m, d).unwrap();
            assert_eq!(Some(date), SolarDate::from_jdn(date.jdn()), "{date}");
        }
    }

    #[test]
    fn test_days_until_across_boundaries() {
        let a = SolarDate::new(2016, 12, 31).unwrap();
        let b = SolarDate::new(2017, 1, 1).unwrap();
        assert_eq!(1, a.days_until(b));
        assert_eq!(-1, b.days_until(a));

        // leap February
        let a = SolarDate::new(2016, 2, 28).unwrap();
        let b = SolarDate::new(2016, 3, 1).unwrap();
        assert_eq!(2, a.days_until(b));

        let a = SolarDate::new(2017, 1, 28).unwrap();
        let b = SolarDate::new(2018, 2, 16).unwrap();
        assert_eq!(384, a.days_until(b));
    }

    #[test]
    fn test_offset_days_rollover() {
        let date = SolarDate::new(2016, 12, 29).unwrap();
        assert_eq!(
            Some(SolarDate::new(2017, 1, 28).unwrap()),
            date.offset_days(30)
        );
        assert_eq!(
            Some(SolarDate::new(2016, 12, 28).unwrap()),
            date.offset_days(-1)
        );
        let date = SolarDate::new(2016, 2, 28).unwrap();
        assert_eq!(
            Some(SolarDate::new(2016, 2, 29).unwrap()),
            date.offset_days(1)
        );
    }

    #[test]
    fn test_offset_days_out_of_range() {
        let date = SolarDate::new(9999, 12, 31).unwrap();
        assert_eq!(None, date.offset_days(1));
        let date = SolarDate::new(1, 1, 1).unwrap();
        assert_eq!(None, date.offset_days(-1));
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(0, SolarDate::new(1970, 1, 1).unwrap().days_since_epoch());
        assert_eq!(
            17167,
            SolarDate::new(2017, 1, 1).unwrap().days_since_epoch()
        );
    }

    #[test]
    fn test_ordering() {
        let a = SolarDate::new(2017, 1, 27).unwrap();
        let b = SolarDate::new(2017, 1, 28).unwrap();
        let c = SolarDate::new(2017, 2, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_display() {
        assert_eq!("2018-04-05", SolarDate::new(2018, 4, 5).unwrap().to_string());
    }

    #[test]
    fn test_parse_unpadded() {
        let date: SolarDate = "2018-4-5".parse().unwrap();
        assert_eq!(SolarDate::new(2018, 4, 5).unwrap(), date);
        let date: SolarDate = "2018-04-05".parse().unwrap();
        assert_eq!(SolarDate::new(2018, 4, 5).unwrap(), date);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            "2018".parse::<SolarDate>(),
            Err(LunarError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            "2018-4-X".parse::<SolarDate>(),
            Err(LunarError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            "2023-2-29".parse::<SolarDate>(),
            Err(LunarError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_serde_string_format() {
        let date = SolarDate::new(2018, 4, 5).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2018-04-05""#);
        let parsed: SolarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);

        // data-source form parses too
        let parsed: SolarDate = serde_json::from_str(r#""2018-4-5""#).unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_is_leap_year_cases() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(expected[month as usize], days_in_month(2023, month));
        }
        assert_eq!(29, days_in_month(2024, 2));
    }

    #[test]
    fn test_date_info() {
        // 2018-01-01 00:00:00 UTC
        let info = date_info(1_514_764_800).unwrap();
        assert_eq!(1, info.day_of_year);
        assert_eq!(1, info.week_of_year);

        // 2018-02-15 00:00:00 UTC
        let info = date_info(1_518_652_800).unwrap();
        assert_eq!(46, info.day_of_year);
        assert_eq!(7, info.week_of_year);

        // pre-epoch timestamps still resolve
        let info = date_info(-1).unwrap();
        assert_eq!(365, info.day_of_year);
    }
}
