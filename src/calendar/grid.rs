use super::util::{iter_days_after, iter_days_before, MarkedDay, Week};
use super::DateMarker;
use std::iter::once;
use time::{Date, Month, Weekday::Sunday};

/// Number of week rows in every month grid.  Six Sunday-first rows are enough
/// for any month; shorter months are padded with empty rows so that all
/// months line up.
pub(crate) const ROWS: u8 = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    first: Date,
    weeks: [Week; ROWS as usize],
}

impl MonthGrid {
    /// Lay out the month containing `date` as a 6×7 Sunday-first matrix,
    /// asking `marker` which days to underline
    pub(crate) fn new<M: DateMarker>(date: Date, marker: &M) -> MonthGrid {
        let first = first_of_month(date);
        let mut weeks = [Week::EMPTY; ROWS as usize];
        let mut row = 0;
        for d in once(first)
            .chain(iter_days_after(first))
            .take_while(|d| d.month() == first.month())
        {
            if d.weekday() == Sunday && d != first {
                row += 1;
            }
            if let Some(week) = weeks.get_mut(row) {
                week.set(MarkedDay {
                    date: d,
                    marked: marker.is_marked(d),
                });
            }
        }
        MonthGrid { first, weeks }
    }

    pub(crate) fn month(&self) -> Month {
        self.first.month()
    }

    pub(crate) fn weeks(&self) -> &[Week; ROWS as usize] {
        &self.weeks
    }

    /// Number of cells holding a day of the month
    pub(crate) fn day_count(&self) -> usize {
        self.weeks.iter().map(Week::len).sum()
    }

    pub(crate) fn marked_days(&self) -> impl Iterator<Item = u8> + '_ {
        self.weeks
            .iter()
            .flat_map(Week::enumerate)
            .filter(|(_, md)| md.marked)
            .map(|(_, md)| md.day())
    }
}

fn first_of_month(date: Date) -> Date {
    iter_days_before(date)
        .take_while(|d| d.month() == date.month())
        .last()
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::util::DAYS_IN_WEEK;
    use time::macros::date;
    use time::Weekday::*;

    struct NullMarker;

    impl DateMarker for NullMarker {
        fn is_marked(&self, _date: Date) -> bool {
            false
        }
    }

    struct Weekends;

    impl DateMarker for Weekends {
        fn is_marked(&self, date: Date) -> bool {
            matches!(date.weekday(), Saturday | Sunday)
        }
    }

    fn month_length(date: Date) -> usize {
        once(date)
            .chain(iter_days_after(date))
            .take_while(|d| d.month() == date.month())
            .count()
    }

    #[test]
    fn test_every_month_fills_six_rows() {
        for m in 1..=12 {
            let first = Date::from_calendar_date(2026, Month::try_from(m).unwrap(), 1).unwrap();
            let grid = MonthGrid::new(first, &NullMarker);
            assert_eq!(grid.weeks().len(), usize::from(ROWS));
            assert_eq!(grid.day_count(), month_length(first), "month {m}");
            assert_eq!(grid.month(), first.month());
        }
    }

    #[test]
    fn test_day_counts_2026() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (m, want) in (1..=12).zip(expected) {
            let first = Date::from_calendar_date(2026, Month::try_from(m).unwrap(), 1).unwrap();
            assert_eq!(MonthGrid::new(first, &NullMarker).day_count(), want);
        }
    }

    #[test]
    fn test_built_from_mid_month_date() {
        let grid = MonthGrid::new(date!(2026 - 11 - 21), &NullMarker);
        assert_eq!(grid.month(), Month::November);
        assert_eq!(grid.weeks()[0].get(Sunday).map(|md| md.day()), Some(1));
    }

    #[test]
    fn test_february_2026_pads_two_rows() {
        // February 2026 starts on a Sunday and has exactly four weeks
        let grid = MonthGrid::new(date!(2026 - 02 - 01), &NullMarker);
        let weeks = grid.weeks();
        for week in &weeks[..4] {
            assert_eq!(week.len(), usize::from(DAYS_IN_WEEK));
        }
        assert_eq!(weeks[4], Week::EMPTY);
        assert_eq!(weeks[5], Week::EMPTY);
        assert_eq!(weeks[0].get(Sunday).map(|md| md.day()), Some(1));
        assert_eq!(weeks[3].get(Saturday).map(|md| md.day()), Some(28));
    }

    #[test]
    fn test_august_2026_uses_all_six_rows() {
        // August 2026 starts on a Saturday
        let grid = MonthGrid::new(date!(2026 - 08 - 01), &NullMarker);
        let weeks = grid.weeks();
        assert_eq!(weeks[0].len(), 1);
        assert_eq!(weeks[0].get(Saturday).map(|md| md.day()), Some(1));
        assert_eq!(weeks[0].get(Friday), None);
        assert_eq!(weeks[1].get(Sunday).map(|md| md.day()), Some(2));
        let mut last = weeks[5].enumerate().map(|(wd, md)| (wd, md.day()));
        assert_eq!(last.next(), Some((Sunday, 30)));
        assert_eq!(last.next(), Some((Monday, 31)));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn test_days_in_weekday_columns() {
        let grid = MonthGrid::new(date!(2026 - 05 - 01), &NullMarker);
        for week in grid.weeks() {
            for (wd, md) in week.enumerate() {
                assert_eq!(md.date.weekday(), wd);
                assert_eq!(md.date.month(), Month::May);
            }
        }
    }

    #[test]
    fn test_marked_days() {
        let grid = MonthGrid::new(date!(2026 - 02 - 01), &Weekends);
        let marked = grid.marked_days().collect::<Vec<_>>();
        assert_eq!(marked, [1, 7, 8, 14, 15, 21, 22, 28]);
    }
}
