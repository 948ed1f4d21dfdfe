//! Calendar navigation.
//!
//! Pure date arithmetic for the month view: a year/month cursor with
//! forward/backward navigation and day-count queries.

use crate::error::{DaylogError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Direction for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthShift {
    /// Move to the previous month.
    Back,
    /// Move to the next month.
    Forward,
}

/// The currently displayed year/month.
///
/// The cursor is process-local UI state: it is mutated only by explicit
/// navigation and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCursor {
    pub year: i32,
    /// Month in the range 1..=12.
    pub month: u32,
}

impl CalendarCursor {
    /// Creates a cursor pointing at the current local year and month.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Returns the cursor moved one month in the given direction.
    ///
    /// Underflow past January wraps to December of the previous year;
    /// overflow past December wraps to January of the next year.
    pub fn shifted(self, direction: MonthShift) -> Self {
        match direction {
            MonthShift::Back => {
                if self.month == 1 {
                    Self {
                        year: self.year - 1,
                        month: 12,
                    }
                } else {
                    Self {
                        year: self.year,
                        month: self.month - 1,
                    }
                }
            }
            MonthShift::Forward => {
                if self.month == 12 {
                    Self {
                        year: self.year + 1,
                        month: 1,
                    }
                } else {
                    Self {
                        year: self.year,
                        month: self.month + 1,
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match month_name(self.month) {
            Ok(name) => write!(f, "{} {}", name, self.year),
            Err(_) => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

/// Returns the number of days in the given month, honoring leap years.
///
/// # Errors
///
/// Returns `DaylogError::InvalidMonth` if `month` is outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(DaylogError::InvalidMonth(month)),
    };
    Ok(days)
}

/// Returns the English name of the given month.
///
/// # Errors
///
/// Returns `DaylogError::InvalidMonth` if `month` is outside 1..=12.
pub fn month_name(month: u32) -> Result<&'static str> {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES
        .get(month.checked_sub(1).ok_or(DaylogError::InvalidMonth(month))? as usize)
        .copied()
        .ok_or(DaylogError::InvalidMonth(month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_leap_year() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        // Century rule: 1900 is not a leap year, 2000 is
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
    }

    #[test]
    fn test_days_in_month_lengths() {
        assert_eq!(days_in_month(2024, 1).unwrap(), 31);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
    }

    #[test]
    fn test_days_in_month_rejects_bad_month() {
        assert!(matches!(
            days_in_month(2024, 0),
            Err(DaylogError::InvalidMonth(0))
        ));
        assert!(matches!(
            days_in_month(2024, 13),
            Err(DaylogError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_shift_wraps_year() {
        let cursor = CalendarCursor {
            year: 2024,
            month: 1,
        };
        let back = cursor.shifted(MonthShift::Back);
        assert_eq!((back.year, back.month), (2023, 12));

        let cursor = CalendarCursor {
            year: 2024,
            month: 12,
        };
        let forward = cursor.shifted(MonthShift::Forward);
        assert_eq!((forward.year, forward.month), (2025, 1));
    }

    #[test]
    fn test_twelve_shifts_return_to_same_month() {
        for month in 1..=12 {
            let start = CalendarCursor { year: 2024, month };

            let mut forward = start;
            for _ in 0..12 {
                forward = forward.shifted(MonthShift::Forward);
            }
            assert_eq!(forward.month, start.month);
            assert_eq!(forward.year, start.year + 1);

            let mut back = start;
            for _ in 0..12 {
                back = back.shifted(MonthShift::Back);
            }
            assert_eq!(back.month, start.month);
            assert_eq!(back.year, start.year - 1);
        }
    }

    #[test]
    fn test_cursor_display() {
        let cursor = CalendarCursor {
            year: 2024,
            month: 1,
        };
        assert_eq!(cursor.to_string(), "January 2024");
    }
}
