mod grid;
mod util;
pub(crate) use self::grid::{MonthGrid, ROWS};
pub(crate) use self::util::DAYS_IN_WEEK;
use time::Date;

/// Decides which days of a calendar get underlined
pub(crate) trait DateMarker {
    fn is_marked(&self, date: Date) -> bool;
}

impl<T: DateMarker + ?Sized> DateMarker for &T {
    fn is_marked(&self, date: Date) -> bool {
        (**self).is_marked(date)
    }
}
