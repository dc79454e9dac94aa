use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

/// One rendered month: leading blanks up to the first weekday, then the
/// numbered days, with workout presence marked per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1, Sunday-based
    pub leading_blanks: u32,
    pub days_in_month: u32,
    /// Days of this month that have at least one logged session
    pub workout_days: HashSet<u32>,
}

impl MonthGrid {
    /// Build the grid for a month, marking days present in `workout_dates`
    /// (ISO YYYY-MM-DD strings, as stored on sessions).
    pub fn build(year: i32, month: u32, workout_dates: &[String]) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let leading_blanks = first.weekday().num_days_from_sunday();
        let days_in_month = days_in_month(year, month)?;

        let prefix = format!("{year:04}-{month:02}-");
        let workout_days = workout_dates
            .iter()
            .filter_map(|date| {
                date.strip_prefix(&prefix)
                    .and_then(|day| day.parse::<u32>().ok())
            })
            .filter(|day| (1..=days_in_month).contains(day))
            .collect();

        Some(Self { year, month, leading_blanks, days_in_month, workout_days })
    }

    /// Cells laid out week by week: leading blanks as None, then Some(day)
    pub fn cells(&self) -> Vec<Option<u32>> {
        let mut cells: Vec<Option<u32>> = Vec::new();
        cells.resize(self.leading_blanks as usize, None);
        cells.extend((1..=self.days_in_month).map(Some));
        cells
    }

    pub fn month_name(&self) -> &'static str {
        match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        }
    }

    /// Render as text, one week per line, workout days marked with '*'
    pub fn render(&self) -> String {
        let mut out = format!("{} {}\n", self.month_name(), self.year);
        out.push_str(" Su  Mo  Tu  We  Th  Fr  Sa\n");

        for (i, cell) in self.cells().iter().enumerate() {
            match cell {
                Some(day) if self.workout_days.contains(day) => {
                    out.push_str(&format!("{day:>3}*"));
                }
                Some(day) => out.push_str(&format!("{day:>3} ")),
                None => out.push_str("    "),
            }
            if i % 7 == 6 {
                out.push('\n');
            }
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Parse a YYYY-MM month argument
pub fn parse_month(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn march_2024_starts_on_friday_with_31_days() {
        let grid = MonthGrid::build(2024, 3, &[]).unwrap();
        assert_eq!(grid.leading_blanks, 5); // 2024-03-01 is a Friday
        assert_eq!(grid.days_in_month, 31);
        let cells = grid.cells();
        assert_eq!(cells.len(), 36);
        assert_eq!(cells[4], None);
        assert_eq!(cells[5], Some(1));
        assert_eq!(cells[35], Some(31));
    }

    #[test]
    fn leap_february_has_29_days() {
        assert_eq!(MonthGrid::build(2024, 2, &[]).unwrap().days_in_month, 29);
        assert_eq!(MonthGrid::build(2023, 2, &[]).unwrap().days_in_month, 28);
    }

    #[test]
    fn workout_dates_mark_only_this_month() {
        let dates = vec![
            "2024-03-01".to_string(),
            "2024-03-15".to_string(),
            "2024-02-15".to_string(),
            "not-a-date".to_string(),
        ];
        let grid = MonthGrid::build(2024, 3, &dates).unwrap();
        assert_eq!(grid.workout_days, HashSet::from([1, 15]));
    }

    #[test]
    fn render_marks_workout_days() {
        let grid = MonthGrid::build(2024, 3, &["2024-03-15".to_string()]).unwrap();
        let rendered = grid.render();
        assert!(rendered.contains(" 15*"));
        assert!(rendered.contains(" 14 "));
        assert!(rendered.starts_with("March 2024\n"));
    }

    #[test]
    fn month_argument_parsing() {
        assert_eq!(parse_month("2024-03"), Some((2024, 3)));
        assert_eq!(parse_month("2024-13"), None);
        assert_eq!(parse_month("March"), None);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(MonthGrid::build(2024, 13, &[]).is_none());
    }
}
