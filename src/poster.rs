mod block;
use self::block::draw_month;
use crate::calendar::MonthGrid;
use crate::canvas::{Canvas, Rect};
use crate::flags::{FetchFlag, FlagCache};
use crate::season::Season;
use crate::theme;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month};

const INCH: f32 = 72.0;

/// Page width in points
pub(crate) const PAGE_WIDTH: f32 = 18.0 * INCH;

/// Page height in points
pub(crate) const PAGE_HEIGHT: f32 = 24.0 * INCH;

const MARGIN: f32 = 0.75 * INCH;

/// Distance from the top margin down to the title's baseline
const TITLE_DROP: f32 = 48.0;

/// Distance from the top margin down to the top of the first row of months
const GRID_DROP: f32 = 80.0;

const COLUMNS: u8 = 3;

const ROWS: u8 = 4;

const COLUMN_GAP: f32 = 0.35 * INCH;

const ROW_GAP: f32 = 0.40 * INCH;

/// The fixed partition of the page into a title band and a 3×4 grid of
/// month blocks
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PosterLayout {
    grid_top: f32,
    block_width: f32,
    block_height: f32,
}

impl PosterLayout {
    pub(crate) fn new() -> PosterLayout {
        let grid_top = PAGE_HEIGHT - MARGIN - GRID_DROP;
        let grid_height = grid_top - MARGIN;
        let columns = f32::from(COLUMNS);
        let rows = f32::from(ROWS);
        PosterLayout {
            grid_top,
            block_width: (PAGE_WIDTH - 2.0 * MARGIN - (columns - 1.0) * COLUMN_GAP) / columns,
            block_height: (grid_height - (rows - 1.0) * ROW_GAP) / rows,
        }
    }

    pub(crate) fn page(&self) -> Rect {
        Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT)
    }

    /// Baseline origin of the title
    pub(crate) fn title_origin(&self) -> (f32, f32) {
        (MARGIN, PAGE_HEIGHT - MARGIN - TITLE_DROP)
    }

    fn block(&self, row: u8, col: u8) -> Rect {
        let x = MARGIN + f32::from(col) * (self.block_width + COLUMN_GAP);
        let top = self.grid_top - f32::from(row) * (self.block_height + ROW_GAP);
        Rect::new(x, top - self.block_height, self.block_width, self.block_height)
    }

    /// The twelve month blocks, January first, filling the grid row by row
    pub(crate) fn blocks(&self) -> impl Iterator<Item = (Month, Rect)> + '_ {
        let months = successors(Some(Month::January), |m| Some(m.next()));
        let cells = (0..ROWS).flat_map(|row| (0..COLUMNS).map(move |col| (row, col)));
        months
            .zip(cells)
            .map(|(month, (row, col))| (month, self.block(row, col)))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PosterSummary {
    pub(crate) months: usize,
    pub(crate) race_lines: usize,
}

#[derive(Debug, Error)]
pub(crate) enum PosterError {
    #[error("{month} {year} is not a valid calendar month")]
    BadMonth {
        year: i32,
        month: Month,
        source: time::error::ComponentRange,
    },
}

/// Paint the whole poster for `season` onto `canvas`
pub(crate) fn draw_poster<C: Canvas, F: FetchFlag>(
    canvas: &mut C,
    season: &Season,
    flags: &mut FlagCache<F>,
) -> Result<PosterSummary, PosterError> {
    let layout = PosterLayout::new();
    canvas.fill_rect(layout.page(), theme::PAPER);
    let (title_x, title_y) = layout.title_origin();
    let title = format!("{} FORMULA 1 SEASON", season.year());
    canvas.text(&title, title_x, title_y, theme::TITLE_FONT, theme::INK);

    let mut summary = PosterSummary::default();
    for (month, rect) in layout.blocks() {
        let first = Date::from_calendar_date(season.year(), month, 1).map_err(|source| {
            PosterError::BadMonth {
                year: season.year(),
                month,
                source,
            }
        })?;
        let events = season.month_events(month);
        let grid = MonthGrid::new(first, &events);
        tracing::debug!(
            %month,
            days = grid.day_count(),
            races = events.races().len(),
            underlined = ?events.underlined(),
            marked = grid.marked_days().count(),
            "Drawing month"
        );
        canvas.stroke_rounded_rect(rect, theme::BLOCK_RADIUS, theme::BLOCK_OUTLINE);
        summary.race_lines += draw_month(canvas, rect, &grid, &events, flags);
        summary.months += 1;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::{Op, Recorder};
    use crate::flags::Offline;
    use tempfile::tempdir;

    fn outlines(canvas: &Recorder) -> Vec<(Rect, f32)> {
        canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Outline(r, radius, _) => Some((*r, *radius)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_twelve_blocks_row_major() {
        let layout = PosterLayout::new();
        let blocks = layout.blocks().collect::<Vec<_>>();
        assert_eq!(blocks.len(), 12);
        let (m0, jan) = blocks[0];
        let (m2, mar) = blocks[2];
        let (m3, apr) = blocks[3];
        let (m11, dec) = blocks[11];
        assert_eq!(
            [m0, m2, m3, m11],
            [Month::January, Month::March, Month::April, Month::December]
        );
        assert!(mar.x > jan.x);
        assert!((mar.y - jan.y).abs() < 1e-3);
        assert!((apr.x - jan.x).abs() < 1e-3);
        assert!(apr.top() < jan.y);
        assert!((dec.x - mar.x).abs() < 1e-3);
    }

    #[test]
    fn test_blocks_fill_printable_area() {
        let layout = PosterLayout::new();
        let blocks = layout.blocks().map(|(_, r)| r).collect::<Vec<_>>();
        let (jan, dec) = (blocks[0], blocks[11]);
        assert!((jan.x - MARGIN).abs() < 1e-3);
        assert!((dec.right() - (PAGE_WIDTH - MARGIN)).abs() < 1e-3);
        assert!((dec.y - MARGIN).abs() < 1e-3);
        assert!((jan.top() - (PAGE_HEIGHT - MARGIN - GRID_DROP)).abs() < 1e-3);
        for r in &blocks {
            assert!((r.width - 379.2).abs() < 1e-3, "{r:?}");
            assert!((r.height - 363.4).abs() < 1e-3, "{r:?}");
        }
    }

    #[test]
    fn test_title_above_grid() {
        let layout = PosterLayout::new();
        let (_, title_y) = layout.title_origin();
        let top = layout.blocks().map(|(_, r)| r.top()).fold(0.0, f32::max);
        assert!(title_y > top);
        assert!(title_y < PAGE_HEIGHT - MARGIN);
    }

    #[test]
    fn test_full_poster() {
        let tmp = tempdir().unwrap();
        let mut flags = FlagCache::new(tmp.path(), Offline);
        let mut canvas = Recorder::new();
        let season = Season::default();
        let summary = draw_poster(&mut canvas, &season, &mut flags).unwrap();
        assert_eq!(
            summary,
            PosterSummary {
                months: 12,
                race_lines: 24
            }
        );
        assert_eq!(
            canvas.ops.first(),
            Some(&Op::Fill(PosterLayout::new().page(), theme::PAPER))
        );
        assert_eq!(canvas.texts().next(), Some("2026 FORMULA 1 SEASON"));
        let outlines = outlines(&canvas);
        assert_eq!(
            outlines,
            PosterLayout::new()
                .blocks()
                .map(|(_, r)| (r, theme::BLOCK_RADIUS))
                .collect::<Vec<_>>()
        );
        let race_lines = canvas.texts().filter(|t| t.contains('\u{2013}')).count();
        assert_eq!(race_lines, season.races().len());
        let month_names = [
            "JANUARY",
            "FEBRUARY",
            "MARCH",
            "APRIL",
            "MAY",
            "JUNE",
            "JULY",
            "AUGUST",
            "SEPTEMBER",
            "OCTOBER",
            "NOVEMBER",
            "DECEMBER",
        ];
        for name in month_names {
            assert_eq!(canvas.texts().filter(|&t| t == name).count(), 1, "{name}");
        }
        // Every race weekend day except 30 and 31 October
        assert_eq!(
            canvas.lines_with(theme::UNDERLINE).count(),
            season.races().len() * 3 - 2
        );
    }

    #[test]
    fn test_full_poster_with_flags() {
        let tmp = tempdir().unwrap();
        for code in ["au", "cn", "jp", "us"] {
            image::RgbImage::new(4, 3)
                .save(tmp.path().join(format!("{code}.png")))
                .unwrap();
        }
        let mut flags = FlagCache::new(tmp.path(), Offline);
        let mut canvas = Recorder::new();
        let summary = draw_poster(&mut canvas, &Season::default(), &mut flags).unwrap();
        assert_eq!(summary.race_lines, 24);
        // Australia, China, Japan, Miami, Austin, Las Vegas
        assert_eq!(canvas.images(), 6);
    }
}
