//! Rate records and their day-over-day comparison

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observation of the tracked pair. Serialized as a `date,rate` CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    pub date: NaiveDate,
    // Kept as text so rows keep their exact digits and scale across rewrites.
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
}

impl RateRecord {
    pub fn new(date: NaiveDate, rate: Decimal) -> Self {
        Self { date, rate }
    }

    /// Percentage change from `previous` to `self`, `None` if `previous` is zero.
    pub fn change_from(&self, previous: &RateRecord) -> Option<Decimal> {
        if previous.rate.is_zero() {
            return None;
        }
        Some((self.rate - previous.rate) / previous.rate * Decimal::ONE_HUNDRED)
    }

    pub fn is_drop_from(&self, previous: &RateRecord) -> bool {
        self.rate < previous.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_is_drop_from() {
        let previous = RateRecord::new(day(8), dec("85.00"));
        let lower = RateRecord::new(day(9), dec("84.50"));
        let same = RateRecord::new(day(9), dec("85.0"));
        let higher = RateRecord::new(day(9), dec("85.01"));

        assert!(lower.is_drop_from(&previous));
        assert!(!same.is_drop_from(&previous));
        assert!(!higher.is_drop_from(&previous));
    }

    #[test]
    fn test_rate_keeps_scale_through_csv() {
        let mut reader = csv::Reader::from_reader("date,rate\n2025-06-08,85.00\n".as_bytes());
        let parsed: RateRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed.rate.to_string(), "85.00");

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(parsed).unwrap();
        let written = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(written, "date,rate\n2025-06-08,85.00\n");
    }

    #[test]
    fn test_change_from() {
        let previous = RateRecord::new(day(8), dec("80"));
        let current = RateRecord::new(day(9), dec("84"));
        assert_eq!(current.change_from(&previous), Some(dec("5")));

        let zero = RateRecord::new(day(8), Decimal::ZERO);
        assert_eq!(current.change_from(&zero), None);
    }
}
