use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Parse a calendar date, accepting "YYYY-MM-DD" or "YYYYMMDD".
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(d);
    }

    if trimmed.len() == 8 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = trimmed[0..4]
            .parse()
            .map_err(|_| Error::InvalidDate(trimmed.to_string()))?;
        let month: u32 = trimmed[4..6]
            .parse()
            .map_err(|_| Error::InvalidDate(trimmed.to_string()))?;
        let day: u32 = trimmed[6..8]
            .parse()
            .map_err(|_| Error::InvalidDate(trimmed.to_string()))?;
        return NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| Error::InvalidDate(trimmed.to_string()));
    }

    Err(Error::InvalidDate(trimmed.to_string()))
}

/// Inclusive range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Every day from start to end, inclusive, in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_date_forms() {
        let expect = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
        assert_eq!(parse_date("2020-01-31").unwrap(), expect);
        assert_eq!(parse_date("20200131").unwrap(), expect);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(parse_date("2020/01/31"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("20201340"), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(matches!(
            DateRange::parse("2020-02-01", "2020-01-01"),
            Err(Error::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn days_are_inclusive_and_ordered() {
        let range = DateRange::parse("2020-02-27", "2020-03-01").unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
        assert_eq!(range.num_days(), 4);
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::parse("2020-06-15", "2020-06-15").unwrap();
        assert_eq!(range.days().count(), 1);
    }
}
