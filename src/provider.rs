use crate::LunarError;
use crate::consts::{MAX_MONTH, SOLAR_TERM_NAMES};
use crate::date::SolarDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named solar term and the date it falls on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarTerm {
    /// One of the 24 fixed term names (see [`SOLAR_TERM_NAMES`]).
    pub name: String,
    /// The Gregorian date of the term in the record's year.
    pub date: SolarDate,
}

/// One year's lunar calendar metadata, as supplied by a
/// [`YearDataProvider`].
///
/// Immutable once fetched; the conversion core never mutates a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    /// The Gregorian year this record describes.
    pub year: u16,
    /// Gregorian month of this year's lunar new year.
    pub first_lunar_month: u8,
    /// Gregorian day of this year's lunar new year.
    pub first_lunar_day: u8,
    /// Ordered lengths (29 or 30) of every lunar month in the lunar year
    /// starting at the new year, including the leap month's entry if one is
    /// present. 12 entries without a leap month, 13 with.
    pub month_lengths: Vec<u8>,
    /// 0 when the lunar year has no leap month; otherwise the calendar
    /// month number the leap month duplicates. The leap entry occupies slot
    /// `leap_month` (0-based) of `month_lengths`, directly after the common
    /// month of the same number.
    pub leap_month: u8,
    /// The year's 24 solar terms in calendar order.
    pub solar_terms: Vec<SolarTerm>,
}

impl YearRecord {
    /// The solar date of this lunar year's new year (正月初一).
    ///
    /// # Errors
    /// Returns `LunarError::MalformedRecord` when the record's first lunar
    /// day is not a real date.
    pub fn lunar_new_year(&self) -> Result<SolarDate, LunarError> {
        SolarDate::new(self.year, self.first_lunar_month, self.first_lunar_day)
            .map_err(|_| self.malformed("first lunar day is not a real date"))
    }

    /// Checks the record against the data-model invariants: 12 month
    /// lengths (13 with a leap month), each 29 or 30, totalling a plausible
    /// lunar year (354–385 days), a leap month number within 0..=12, and a
    /// full set of 24 known solar terms.
    ///
    /// # Errors
    /// Returns `LunarError::MalformedRecord` naming the violated invariant.
    pub fn validate(&self) -> Result<(), LunarError> {
        if self.leap_month > MAX_MONTH {
            return Err(self.malformed("leap month number out of range"));
        }
        let expected = if self.leap_month == 0 { 12 } else { 13 };
        if self.month_lengths.len() != expected {
            return Err(self.malformed("wrong number of lunar month lengths"));
        }
        if self.month_lengths.iter().any(|&len| len != 29 && len != 30) {
            return Err(self.malformed("lunar month length is not 29 or 30"));
        }
        let total: u32 = self.month_lengths.iter().map(|&len| u32::from(len)).sum();
        if !(354..=385).contains(&total) {
            return Err(self.malformed("lunar month lengths do not sum to a lunar year"));
        }
        if self.solar_terms.len() != SOLAR_TERM_NAMES.len() {
            return Err(self.malformed("expected 24 solar terms"));
        }
        if self
            .solar_terms
            .iter()
            .any(|term| !SOLAR_TERM_NAMES.contains(&term.name.as_str()))
        {
            return Err(self.malformed("unknown solar term name"));
        }
        self.lunar_new_year().map(|_| ())
    }

    fn malformed(&self, reason: &str) -> LunarError {
        LunarError::MalformedRecord {
            year: self.year,
            reason: reason.to_owned(),
        }
    }
}

/// Source of per-year lunar calendar metadata.
///
/// The conversion core injects a provider and never concerns itself with
/// where records live; in-memory, file-backed, and embedded-table
/// implementations are interchangeable. Providers are only consulted for
/// years inside the supported range. Implementations must be safe for
/// concurrent reads; returning immutable per-year records satisfies that
/// trivially.
pub trait YearDataProvider {
    /// Supplies the record for `year`.
    ///
    /// # Errors
    /// Returns `LunarError::DataUnavailable` when no record exists for
    /// `year`.
    fn fetch(&self, year: u16) -> Result<YearRecord, LunarError>;
}

/// An in-memory [`YearDataProvider`] keyed by year.
///
/// File-backed setups deserialize their records and collect them into one
/// of these:
///
/// ```
/// use chinese_lunar::{MemoryProvider, YearRecord};
///
/// let records: Vec<YearRecord> = Vec::new(); // e.g. serde-deserialized
/// let provider: MemoryProvider = records.into_iter().collect();
/// assert!(provider.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: HashMap<u16, YearRecord>,
}

impl MemoryProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, replacing any previous record for the same year.
    pub fn insert(&mut self, record: YearRecord) {
        self.records.insert(record.year, record);
    }

    /// Number of years with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no records are loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<YearRecord> for MemoryProvider {
    fn from_iter<I: IntoIterator<Item = YearRecord>>(iter: I) -> Self {
        let mut provider = Self::new();
        for record in iter {
            provider.insert(record);
        }
        provider
    }
}

impl YearDataProvider for MemoryProvider {
    fn fetch(&self, year: u16) -> Result<YearRecord, LunarError> {
        self.records
            .get(&year)
            .cloned()
            .ok_or(LunarError::DataUnavailable { year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_2018() -> YearRecord {
        YearRecord {
            year: 2018,
            first_lunar_month: 2,
            first_lunar_day: 16,
            month_lengths: vec![29, 30, 29, 30, 29, 29, 30, 29, 30, 29, 30, 30],
            leap_month: 0,
            solar_terms: SOLAR_TERM_NAMES
                .iter()
                .zip([
                    (1, 5),
                    (1, 20),
                    (2, 4),
                    (2, 19),
                    (3, 5),
                    (3, 21),
                    (4, 5),
                    (4, 20),
                    (5, 5),
                    (5, 21),
                    (6, 6),
                    (6, 21),
                    (7, 7),
                    (7, 23),
                    (8, 7),
                    (8, 23),
                    (9, 8),
                    (9, 23),
                    (10, 8),
                    (10, 23),
                    (11, 7),
                    (11, 22),
                    (12, 7),
                    (12, 22),
                ])
                .map(|(&name, (m, d))| SolarTerm {
                    name: name.to_owned(),
                    date: SolarDate::new(2018, m, d).unwrap(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_validate_accepts_real_record() {
        assert_eq!(Ok(()), record_2018().validate());
    }

    #[test]
    fn test_lunar_new_year() {
        let record = record_2018();
        assert_eq!(
            SolarDate::new(2018, 2, 16).unwrap(),
            record.lunar_new_year().unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_wrong_length_count() {
        let mut record = record_2018();
        record.month_lengths.pop();
        assert!(matches!(
            record.validate(),
            Err(LunarError::MalformedRecord { year: 2018, .. })
        ));

        // 13 lengths require a leap month
        let mut record = record_2018();
        record.month_lengths.push(30);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_month_length() {
        let mut record = record_2018();
        record.month_lengths[3] = 28;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_leap_month() {
        let mut record = record_2018();
        record.leap_month = 13;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_terms() {
        let mut record = record_2018();
        record.solar_terms.truncate(23);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_term_name() {
        let mut record = record_2018();
        record.solar_terms[0].name = "元旦".to_owned();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_impossible_new_year() {
        let mut record = record_2018();
        record.first_lunar_day = 31;
        assert!(matches!(
            record.validate(),
            Err(LunarError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_memory_provider_fetch() {
        let provider: MemoryProvider = [record_2018()].into_iter().collect();
        assert_eq!(1, provider.len());
        assert!(!provider.is_empty());
        assert_eq!(Ok(record_2018()), provider.fetch(2018));
        assert_eq!(
            Err(LunarError::DataUnavailable { year: 2019 }),
            provider.fetch(2019)
        );
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = record_2018();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: YearRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
        // term dates travel as strings
        assert!(json.contains(r#""2018-01-05""#));
    }
}
