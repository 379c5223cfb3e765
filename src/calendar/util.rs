use std::iter::successors;
use time::{Date, Weekday, Weekday::*};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MarkedDay {
    pub(crate) date: Date,
    pub(crate) marked: bool,
}

impl MarkedDay {
    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }
}

/// One Sunday-first row of a month grid.  Cells holding days outside the
/// month are `None`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Week([Option<MarkedDay>; DAYS_IN_WEEK as usize]);

impl Week {
    pub(crate) const EMPTY: Week = Week([None; DAYS_IN_WEEK as usize]);

    pub(super) fn set(&mut self, day: MarkedDay) {
        if let Some(cell) = self.0.get_mut(day.date.weekday().index0()) {
            *cell = Some(day);
        }
    }

    pub(crate) fn get(&self, wd: Weekday) -> Option<MarkedDay> {
        self.0.get(wd.index0()).copied().flatten()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    pub(crate) fn enumerate(&self) -> EnumerateWeek<'_> {
        EnumerateWeek::new(self)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EnumerateWeek<'a> {
    week: &'a Week,
    next_weekday: Option<Weekday>,
}

impl<'a> EnumerateWeek<'a> {
    fn new(week: &'a Week) -> Self {
        EnumerateWeek {
            week,
            next_weekday: Some(Sunday),
        }
    }
}

impl Iterator for EnumerateWeek<'_> {
    type Item = (Weekday, MarkedDay);

    fn next(&mut self) -> Option<(Weekday, MarkedDay)> {
        loop {
            let wd = self.next_weekday?;
            self.next_weekday = match wd.next() {
                Sunday => None,
                wd2 => Some(wd2),
            };
            if let Some(day) = self.week.get(wd) {
                return Some((wd, day));
            }
        }
    }
}

pub(super) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(super) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn unmarked(date: Date) -> MarkedDay {
        MarkedDay {
            date,
            marked: false,
        }
    }

    #[test]
    fn test_enumerate_skips_empty_cells() {
        let mut week = Week::EMPTY;
        week.set(unmarked(date!(2026 - 07 - 30)));
        week.set(unmarked(date!(2026 - 07 - 31)));
        let mut iter = week.enumerate().map(|(wd, md)| (wd, md.date));
        assert_eq!(iter.next(), Some((Thursday, date!(2026 - 07 - 30))));
        assert_eq!(iter.next(), Some((Friday, date!(2026 - 07 - 31))));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_enumerate_full_week() {
        let mut week = Week::EMPTY;
        week.set(unmarked(date!(2026 - 03 - 08)));
        for d in iter_days_after(date!(2026 - 03 - 08)).take(6) {
            week.set(unmarked(d));
        }
        let mut iter = week.enumerate().map(|(wd, md)| (wd, md.day()));
        assert_eq!(iter.next(), Some((Sunday, 8)));
        assert_eq!(iter.next(), Some((Monday, 9)));
        assert_eq!(iter.next(), Some((Tuesday, 10)));
        assert_eq!(iter.next(), Some((Wednesday, 11)));
        assert_eq!(iter.next(), Some((Thursday, 12)));
        assert_eq!(iter.next(), Some((Friday, 13)));
        assert_eq!(iter.next(), Some((Saturday, 14)));
        assert_eq!(iter.next(), None);
        assert_eq!(week.len(), usize::from(DAYS_IN_WEEK));
    }

    #[test]
    fn test_empty_week() {
        assert_eq!(Week::EMPTY.len(), 0);
        assert_eq!(Week::EMPTY.enumerate().next(), None);
        assert_eq!(Week::EMPTY.get(Sunday), None);
    }

    #[test]
    fn test_iter_days_before() {
        let mut iter = iter_days_before(date!(2026 - 03 - 01));
        assert_eq!(iter.next(), Some(date!(2026 - 02 - 28)));
        assert_eq!(iter.next(), Some(date!(2026 - 02 - 27)));
    }
}
