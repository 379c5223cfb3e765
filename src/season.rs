use crate::calendar::DateMarker;
use std::collections::BTreeSet;
use time::{macros::date, Date, Month};

pub(crate) const YEAR: i32 = 2026;

/// A Grand Prix, identified by the date of the race itself
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Race {
    pub(crate) date: Date,
    pub(crate) name: &'static str,
}

impl Race {
    const fn new(date: Date, name: &'static str) -> Race {
        Race { date, name }
    }

    pub(crate) fn month(&self) -> Month {
        self.date.month()
    }

    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }

    /// ISO 3166 alpha-2 code of the country whose flag is shown next to the
    /// race
    pub(crate) fn country_code(&self) -> Option<&'static str> {
        country_code(self.name)
    }

    /// The race day and the two days before it, in calendar order
    pub(crate) fn weekend(&self) -> impl Iterator<Item = Date> {
        let race_day = self.date;
        [
            race_day.previous_day().and_then(Date::previous_day),
            race_day.previous_day(),
            Some(race_day),
        ]
        .into_iter()
        .flatten()
    }
}

static RACES: &[Race] = &[
    Race::new(date!(2026 - 03 - 08), "AUSTRALIA"),
    Race::new(date!(2026 - 03 - 15), "CHINA"),
    Race::new(date!(2026 - 03 - 29), "JAPAN"),
    Race::new(date!(2026 - 04 - 12), "BAHRAIN"),
    Race::new(date!(2026 - 04 - 19), "SAUDI ARABIA"),
    Race::new(date!(2026 - 05 - 03), "MIAMI"),
    Race::new(date!(2026 - 05 - 24), "CANADA"),
    Race::new(date!(2026 - 06 - 07), "MONACO"),
    Race::new(date!(2026 - 06 - 14), "BARCELONA"),
    Race::new(date!(2026 - 06 - 28), "AUSTRIA"),
    Race::new(date!(2026 - 07 - 05), "GREAT BRITAIN"),
    Race::new(date!(2026 - 07 - 19), "BELGIUM"),
    Race::new(date!(2026 - 07 - 26), "HUNGARY"),
    Race::new(date!(2026 - 08 - 23), "NETHERLANDS"),
    Race::new(date!(2026 - 09 - 06), "ITALY"),
    Race::new(date!(2026 - 09 - 13), "MADRID"),
    // Saturday night race
    Race::new(date!(2026 - 09 - 26), "AZERBAIJAN"),
    Race::new(date!(2026 - 10 - 11), "SINGAPORE"),
    Race::new(date!(2026 - 10 - 25), "AUSTIN"),
    Race::new(date!(2026 - 11 - 01), "MEXICO"),
    Race::new(date!(2026 - 11 - 08), "BRAZIL"),
    // Saturday night race
    Race::new(date!(2026 - 11 - 21), "LAS VEGAS"),
    Race::new(date!(2026 - 11 - 29), "QATAR"),
    Race::new(date!(2026 - 12 - 06), "ABU DHABI"),
];

fn country_code(name: &str) -> Option<&'static str> {
    match name {
        "AUSTRALIA" => Some("au"),
        "CHINA" => Some("cn"),
        "JAPAN" => Some("jp"),
        "BAHRAIN" => Some("bh"),
        "SAUDI ARABIA" => Some("sa"),
        "MIAMI" | "AUSTIN" | "LAS VEGAS" => Some("us"),
        "CANADA" => Some("ca"),
        "MONACO" => Some("mc"),
        "BARCELONA" | "SPAIN (BARCELONA)" | "MADRID" => Some("es"),
        "AUSTRIA" => Some("at"),
        "GREAT BRITAIN" => Some("gb"),
        "BELGIUM" => Some("be"),
        "HUNGARY" => Some("hu"),
        "NETHERLANDS" => Some("nl"),
        "ITALY" => Some("it"),
        "AZERBAIJAN" => Some("az"),
        "SINGAPORE" => Some("sg"),
        "MEXICO" => Some("mx"),
        "BRAZIL" => Some("br"),
        "QATAR" => Some("qa"),
        "ABU DHABI" => Some("ae"),
        _ => None,
    }
}

/// The races of one year
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Season {
    year: i32,
    races: &'static [Race],
}

impl Season {
    pub(crate) fn new(year: i32, races: &'static [Race]) -> Season {
        Season { year, races }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn races(&self) -> &'static [Race] {
        self.races
    }

    pub(crate) fn month_events(&self, month: Month) -> MonthEvents {
        let mut races = self
            .races
            .iter()
            .filter(|r| r.month() == month)
            .copied()
            .collect::<Vec<_>>();
        races.sort_by_key(Race::day);
        let underlined = races
            .iter()
            .flat_map(Race::weekend)
            .filter(|d| d.month() == month)
            .map(Date::day)
            .collect();
        MonthEvents {
            month,
            underlined,
            races,
        }
    }
}

impl Default for Season {
    fn default() -> Season {
        Season::new(YEAR, RACES)
    }
}

/// What one month block shows about the season: the days to underline and
/// the races to list
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthEvents {
    month: Month,
    underlined: BTreeSet<u8>,
    races: Vec<Race>,
}

impl MonthEvents {
    pub(crate) fn underlined(&self) -> &BTreeSet<u8> {
        &self.underlined
    }

    pub(crate) fn is_underlined(&self, day: u8) -> bool {
        self.underlined.contains(&day)
    }

    /// Races of the month in date order
    pub(crate) fn races(&self) -> &[Race] {
        &self.races
    }
}

impl DateMarker for MonthEvents {
    fn is_marked(&self, date: Date) -> bool {
        date.month() == self.month && self.is_underlined(date.day())
    }
}
