use chrono::NaiveDate;
use lingua_core::model::MonthId;

/// "March 2024" style heading for month navigation.
#[must_use]
pub fn format_month(month: MonthId) -> String {
    month.first_day().format("%B %Y").to_string()
}

/// Short date for dashboard lines, e.g. "Mar 5".
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Day-of-month cell label.
#[must_use]
pub fn format_day_number(date: NaiveDate) -> String {
    date.format("%-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_heading_spells_out_the_month() {
        let month = MonthId::new(2024, 3).unwrap();
        assert_eq!(format_month(month), "March 2024");
    }

    #[test]
    fn short_date_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "Mar 5");
        assert_eq!(format_day_number(date), "5");
    }
}
