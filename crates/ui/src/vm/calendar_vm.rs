use chrono::{Datelike, NaiveDate};
use lingua_core::model::MonthId;

/// One calendar row, Monday first; `None` cells pad the leading and
/// trailing days that belong to neighboring months.
pub type Week = [Option<NaiveDate>; 7];

/// Lay a month out as calendar weeks for the tracker grid.
#[must_use]
pub fn month_grid(month: MonthId) -> Vec<Week> {
    let mut weeks = Vec::with_capacity(6);
    let mut week: Week = [None; 7];

    for day in 1..=month.days_in_month() {
        let Some(date) = month.day(day) else { continue };
        let column = date.weekday().num_days_from_monday() as usize;
        week[column] = Some(date);
        if column == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn march_2024_lays_out_correctly() {
        // March 1st 2024 is a Friday.
        let weeks = month_grid(MonthId::new(2024, 3).unwrap());
        assert_eq!(weeks.len(), 5);

        let first = weeks[0];
        assert!(first[0].is_none());
        assert_eq!(first[4].unwrap().day(), 1);
        assert_eq!(first[6].unwrap().day(), 3);

        let last = weeks[4];
        assert_eq!(last[6].unwrap().day(), 31);
    }

    #[test]
    fn every_day_appears_exactly_once() {
        let month = MonthId::new(2024, 2).unwrap();
        let days: Vec<_> = month_grid(month)
            .into_iter()
            .flatten()
            .flatten()
            .collect();
        assert_eq!(days.len(), 29);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }
}
