//! Conversion between Gregorian dates and the traditional Chinese lunar
//! calendar, with sexagenary (stem-branch) era names, zodiac animals,
//! solar-term dates, and double-hour names.
//!
//! The conversion core does no astronomy of its own: it consumes
//! precomputed per-year metadata ([`YearRecord`]) through an injected
//! [`YearDataProvider`] and performs the date arithmetic on top. Years
//! 1901..=2100 are supported.
//!
//! Naming tables work without any provider:
//!
//! ```
//! use chinese_lunar::{ancient_time, lunar_day_number, lunar_month_name, zodiac};
//!
//! assert_eq!(Some("腊月"), lunar_month_name(12));
//! assert_eq!(Some(22), lunar_day_number("廿二"));
//! assert_eq!(Some("午时"), ancient_time(12));
//! assert_eq!("鸡", zodiac(2017));
//! ```
//!
//! Date conversion goes through a [`Lunar`] built over a provider:
//!
//! ```ignore
//! use chinese_lunar::{Lunar, MemoryProvider};
//!
//! let provider: MemoryProvider = load_records()?.into_iter().collect();
//! let lunar = Lunar::new(provider);
//!
//! let date = lunar.to_lunar_date(2017, 7, 25)?;
//! assert_eq!("2017年闰六月初三", date.to_string());
//! assert_eq!((2017, 6, 3), date.to_numeric());
//!
//! let back = lunar.to_solar_date(date.year, date.month, date.day)?;
//! assert_eq!((2017, 7, 25), (back.year(), back.month(), back.day()));
//! ```

mod consts;
mod date;
mod era;
mod error;
mod names;
mod prelude;
mod provider;

pub use consts::*;
pub use date::{DateInfo, SolarDate, date_info, days_in_month, is_leap_year};
pub use era::{ChineseEra, sexagenary_year, zodiac};
pub use error::LunarError;
pub use names::{
    LunarDay, LunarMonth, ancient_time, lunar_day_name, lunar_day_number, lunar_month_name,
    lunar_month_number,
};
pub use provider::{MemoryProvider, SolarTerm, YearDataProvider, YearRecord};

use era::stem_branch;
use std::fmt;

/// A date in the Chinese lunar calendar.
///
/// `year` is the lunar year, named for the Gregorian year its new year
/// falls in; near each Gregorian new year it differs from the solar date's
/// year. The leap-month flag lives on [`LunarMonth`], so the numeric view
/// loses nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// The lunar year.
    pub year: u16,
    /// The lunar month, with its leap flag.
    pub month: LunarMonth,
    /// The lunar day of month.
    pub day: LunarDay,
}

impl LunarDate {
    /// Numeric view `(year, month, day)`.
    ///
    /// The leap-month flag is not part of the tuple; read it from
    /// `self.month.is_leap()` when round-tripping through a leap month.
    pub fn to_numeric(self) -> (u16, u8, u8) {
        (self.year, self.month.number(), self.day.get())
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}{}", self.year, self.month, self.day)
    }
}

/// Aggregate information about a year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearInfo {
    /// Whether the Gregorian year is a leap year.
    pub is_leap_year: bool,
    /// The year's zodiac animal.
    pub zodiac: &'static str,
    /// The year's 24 solar terms in calendar order.
    pub solar_terms: Vec<SolarTerm>,
}

/// The calendar converter: bidirectional solar↔lunar conversion and era
/// naming over an injected [`YearDataProvider`].
///
/// Every operation is a pure function of its inputs plus the fetched
/// records, so a `Lunar` can be shared freely across threads when its
/// provider can.
#[derive(Debug, Clone)]
pub struct Lunar<P> {
    provider: P,
}

impl<P: YearDataProvider> Lunar<P> {
    /// Creates a converter over a provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetches and validates the record for `year`, rejecting years outside
    /// the supported range before the provider is consulted.
    fn record(&self, year: u16) -> Result<YearRecord, LunarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LunarError::YearOutOfRange { year });
        }
        let record = self.provider.fetch(year)?;
        record.validate()?;
        Ok(record)
    }

    /// Converts a solar date to its lunar calendar date.
    ///
    /// A date that precedes its year's lunar new year belongs to the
    /// previous lunar year and is resolved against that year's record, so
    /// the result's `year` can be one less than the input year.
    ///
    /// # Errors
    /// `InvalidDate` for an impossible Gregorian date, `YearOutOfRange` when
    /// the governing lunar year has no data, and whatever the provider
    /// reports.
    pub fn to_lunar_date(&self, year: u16, month: u8, day: u8) -> Result<LunarDate, LunarError> {
        let solar = SolarDate::new(year, month, day)?;
        let mut lunar_year = year;
        let mut record = self.record(lunar_year)?;
        let mut new_year = record.lunar_new_year()?;
        if solar < new_year {
            lunar_year -= 1;
            record = self.record(lunar_year)?;
            new_year = record.lunar_new_year()?;
        }

        let mut remaining = new_year.days_until(solar);
        let mut index = 0usize;
        let mut month_count = 0u8;
        let mut is_leap = false;
        loop {
            let Some(&len) = record.month_lengths.get(index) else {
                return Err(LunarError::MalformedRecord {
                    year: lunar_year,
                    reason: "month lengths do not cover the lunar year".to_owned(),
                });
            };
            if remaining < i64::from(len) {
                break;
            }
            remaining -= i64::from(len);
            index += 1;
            // the leap month repeats its predecessor's number instead of
            // advancing the month counter
            if record.leap_month > 0 && usize::from(record.leap_month) == index {
                is_leap = true;
            } else {
                is_leap = false;
                month_count += 1;
            }
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let day_number = remaining as u8 + 1;
        Ok(LunarDate {
            year: lunar_year,
            month: LunarMonth::new(month_count + 1, is_leap)?,
            day: LunarDay::new(day_number)?,
        })
    }

    /// Converts a lunar calendar date to its solar date.
    ///
    /// `year` is the lunar year (the year whose new year opens it). Labels
    /// are parsed into [`LunarMonth`] and [`LunarDay`] beforehand, e.g.
    /// `"闰六月".parse()?`.
    ///
    /// # Errors
    /// `InvalidLeapMonth` when the month claims a leap month the year does
    /// not have; otherwise as [`Lunar::to_lunar_date`].
    pub fn to_solar_date(
        &self,
        year: u16,
        month: LunarMonth,
        day: LunarDay,
    ) -> Result<SolarDate, LunarError> {
        let record = self.record(year)?;
        let new_year = record.lunar_new_year()?;

        if month.is_leap() && record.leap_month != month.number() {
            return Err(LunarError::InvalidLeapMonth {
                year,
                month: month.number(),
            });
        }

        // slots of month_lengths preceding the requested month; the leap
        // month occupies a slot without advancing the month number, which
        // mirrors the counting rule of the forward walk
        let mut slots = usize::from(month.number());
        if record.leap_month == 0
            || (record.leap_month == month.number() && !month.is_leap())
            || record.leap_month > month.number()
        {
            slots -= 1;
        }

        let offset = record
            .month_lengths
            .iter()
            .take(slots)
            .map(|&len| i64::from(len))
            .sum::<i64>()
            + i64::from(day.get())
            - 1;
        new_year
            .offset_days(offset)
            .ok_or_else(|| LunarError::MalformedRecord {
                year,
                reason: "lunar date falls outside the representable range".to_owned(),
            })
    }

    /// The sexagenary year, month, and day names for a solar date.
    ///
    /// The month pillar advances when the date is on or after the first
    /// solar term falling in its Gregorian month; the year pillar follows
    /// the Gregorian year as given.
    ///
    /// # Errors
    /// `InvalidDate` for an impossible Gregorian date; otherwise as
    /// [`Lunar::to_lunar_date`].
    pub fn chinese_era(&self, year: u16, month: u8, day: u8) -> Result<ChineseEra, LunarError> {
        SolarDate::new(year, month, day)?;
        let record = self.record(year)?;

        let mut month_index = (i64::from(year) - 1900) * 12 + i64::from(month) + 11;
        for term in &record.solar_terms {
            if term.date.year() == year && term.date.month() == month {
                if day >= term.date.day() {
                    month_index += 1;
                }
                break;
            }
        }

        let first_of_month = SolarDate::new(year, month, 1)?;
        let day_serial =
            first_of_month.days_since_epoch() + DAY_PILLAR_EPOCH_OFFSET + i64::from(day) - 1;

        Ok(ChineseEra {
            year: stem_branch(i64::from(year) - 4),
            month: stem_branch(month_index),
            day: stem_branch(day_serial),
        })
    }

    /// The year's 24 solar terms in calendar order.
    ///
    /// # Errors
    /// As [`Lunar::record`] fetching: `YearOutOfRange`, `DataUnavailable`,
    /// `MalformedRecord`.
    pub fn solar_terms(&self, year: u16) -> Result<Vec<SolarTerm>, LunarError> {
        Ok(self.record(year)?.solar_terms)
    }

    /// The date of one named solar term, or `Ok(None)` when the name is not
    /// among the year's terms (a lookup miss, not an error).
    ///
    /// # Errors
    /// As [`Lunar::solar_terms`].
    pub fn solar_term(&self, year: u16, name: &str) -> Result<Option<SolarDate>, LunarError> {
        let record = self.record(year)?;
        Ok(record
            .solar_terms
            .iter()
            .find(|term| term.name == name)
            .map(|term| term.date))
    }

    /// Leap-year flag, zodiac animal, and solar terms of a year.
    ///
    /// # Errors
    /// As [`Lunar::solar_terms`].
    pub fn year_info(&self, year: u16) -> Result<YearInfo, LunarError> {
        Ok(YearInfo {
            is_leap_year: is_leap_year(year),
            zodiac: zodiac(year),
            solar_terms: self.record(year)?.solar_terms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lunar_date_display() {
        let date = LunarDate {
            year: 2017,
            month: LunarMonth::new(6, true).unwrap(),
            day: LunarDay::new(3).unwrap(),
        };
        assert_eq!("2017年闰六月初三", date.to_string());

        let date = LunarDate {
            year: 2016,
            month: LunarMonth::new(12, false).unwrap(),
            day: LunarDay::new(30).unwrap(),
        };
        assert_eq!("2016年腊月三十", date.to_string());
    }

    #[test]
    fn test_lunar_date_numeric_view_keeps_leap_flag_reachable() {
        let date = LunarDate {
            year: 2017,
            month: LunarMonth::new(6, true).unwrap(),
            day: LunarDay::new(3).unwrap(),
        };
        assert_eq!((2017, 6, 3), date.to_numeric());
        assert!(date.month.is_leap());
    }

    #[test]
    fn test_out_of_range_years_rejected_before_provider() {
        let lunar = Lunar::new(MemoryProvider::new());
        assert_eq!(
            Err(LunarError::YearOutOfRange { year: 1900 }),
            lunar.to_lunar_date(1900, 1, 1)
        );
        assert_eq!(
            Err(LunarError::YearOutOfRange { year: 2101 }),
            lunar.to_lunar_date(2101, 1, 1)
        );
        assert!(matches!(
            lunar.solar_terms(1850),
            Err(LunarError::YearOutOfRange { year: 1850 })
        ));
    }

    #[test]
    fn test_missing_year_is_data_unavailable() {
        let lunar = Lunar::new(MemoryProvider::new());
        assert_eq!(
            Err(LunarError::DataUnavailable { year: 2000 }),
            lunar.to_lunar_date(2000, 5, 5)
        );
        assert_eq!(
            Err(LunarError::DataUnavailable { year: 2018 }),
            lunar.solar_term(2018, "清明").map(|_| ())
        );
    }

    #[test]
    fn test_impossible_date_rejected() {
        let lunar = Lunar::new(MemoryProvider::new());
        assert_eq!(
            Err(LunarError::InvalidDate {
                year: 2017,
                month: 2,
                day: 30
            }),
            lunar.to_lunar_date(2017, 2, 30)
        );
        assert!(matches!(
            lunar.chinese_era(2017, 13, 1),
            Err(LunarError::InvalidDate { .. })
        ));
    }
}
