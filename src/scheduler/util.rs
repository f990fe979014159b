use super::types::SchedError;
use chrono::{Days, Local, NaiveDate};

pub(super) fn day_at(start: NaiveDate, offset: usize) -> Result<NaiveDate, SchedError> {
    start
        .checked_add_days(Days::new(offset as u64))
        .ok_or(SchedError::DateOverflow { start, offset })
}

/// Date locale du jour (jour 0 d'une génération).
pub(super) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_at_crosses_month_and_year() {
        let start = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(day_at(start, 1).unwrap(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(day_at(NaiveDate::MAX, 1).is_err());
    }
}
