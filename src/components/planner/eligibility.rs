use crate::components::calendar::{DayNumber, WeekWindow};

/// Whether a date may be toggled, given today and the week boundaries.
///
/// Evaluated in order: past dates and the locked current week are rejected;
/// next week stays open only while today is still inside the current week;
/// anything later is always open.
pub fn is_selectable(day: DayNumber, today: DayNumber, week: &WeekWindow) -> bool {
    if day < today {
        return false;
    }

    if week.in_current_week(day) {
        return false;
    }

    if week.in_next_week(day) {
        return today <= week.current_week_end;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_iso_date;

    fn day(iso: &str) -> DayNumber {
        DayNumber::from_date(parse_iso_date(iso).unwrap())
    }

    #[test]
    fn test_monday_scenario() {
        let today = day("2024-06-10");
        let week = WeekWindow::from_today(today);

        assert!(!is_selectable(day("2024-06-12"), today, &week));
        assert!(is_selectable(day("2024-06-18"), today, &week));
        assert!(is_selectable(day("2024-07-01"), today, &week));
    }

    #[test]
    fn test_sunday_scenario() {
        // 2024-06-16 starts a new week, so 06-18 is now in the locked week
        let today = day("2024-06-16");
        let week = WeekWindow::from_today(today);
        assert!(!is_selectable(day("2024-06-18"), today, &week));
        assert!(is_selectable(day("2024-06-23"), today, &week));
    }

    #[test]
    fn test_past_dates_rejected() {
        let today = day("2024-06-10");
        let week = WeekWindow::from_today(today);
        for offset in 1..400 {
            assert!(!is_selectable(today.minus(offset), today, &week));
        }
    }

    #[test]
    fn test_current_week_always_locked() {
        // Every position of today within the week
        let sunday = day("2024-06-09");
        for position in 0..7 {
            let today = sunday.plus(position);
            let week = WeekWindow::from_today(today);
            for offset in 0..7 {
                assert!(!is_selectable(sunday.plus(offset), today, &week));
            }
        }
    }

    #[test]
    fn test_next_week_open_until_saturday() {
        let sunday = day("2024-06-09");
        for position in 0..7 {
            let today = sunday.plus(position);
            let week = WeekWindow::from_today(today);
            assert!(today <= week.current_week_end);
            for offset in 7..14 {
                assert!(is_selectable(sunday.plus(offset), today, &week));
            }
        }
    }

    #[test]
    fn test_next_week_closed_when_today_is_past_current_week() {
        // A stale week window still pointing at last week
        let today = day("2024-06-17");
        let stale = WeekWindow::from_today(day("2024-06-10"));
        assert!(!is_selectable(day("2024-06-18"), today, &stale));
        assert!(!is_selectable(day("2024-06-22"), today, &stale));
        assert!(is_selectable(day("2024-06-23"), today, &stale));
    }

    #[test]
    fn test_two_or_more_weeks_out_always_open() {
        let today = day("2024-06-13");
        let week = WeekWindow::from_today(today);
        for offset in 1..60 {
            assert!(is_selectable(week.next_week_end.plus(offset), today, &week));
        }
    }
}
