use super::INCH;
use crate::calendar::{MonthGrid, DAYS_IN_WEEK, ROWS};
use crate::canvas::{text_width, Canvas, Rect};
use crate::flags::{FetchFlag, FlagCache};
use crate::season::MonthEvents;
use crate::theme;
use std::iter::zip;

/// Padding between the block's edges and its contents
const PAD: f32 = 0.12 * INCH;

/// Height of the band holding the month name
const HEADER_HEIGHT: f32 = 0.32 * INCH;

/// Height reserved under the grid for the list of races
const LIST_HEIGHT: f32 = 0.72 * INCH;

/// Height of the row of weekday initials above the day cells
const WEEKDAY_BAND: f32 = 0.11 * INCH;

/// Gap between the bottom of the grid and the first race line's baseline
const LIST_GAP: f32 = 0.14 * INCH;

/// Distance from the block's top edge (less `PAD`) down to the baseline of
/// the month name
const MONTH_NAME_DROP: f32 = 10.0;

const WEEKDAY_BASELINE_DROP: f32 = 2.5;

/// Height of a day number's baseline above the bottom of its cell
const DAY_BASELINE_RAISE: f32 = 3.0;

const UNDERLINE_DROP: f32 = 3.0;

const FLAG_WIDTH: f32 = 14.0;

const FLAG_HEIGHT: f32 = 10.0;

/// Space between a flag and its race's text
const FLAG_GAP: f32 = 4.0;

/// Distance from a race line's baseline down to the bottom of its flag
const FLAG_DROP: f32 = 2.0;

const LINE_STEP: f32 = 10.0;

static WEEKDAY_INITIALS: [&str; DAYS_IN_WEEK as usize] = ["S", "M", "T", "W", "T", "F", "S"];

/// Where things go inside one month's rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BlockGeometry {
    rect: Rect,
    grid_left: f32,
    grid_top: f32,
    grid_width: f32,
    row_height: f32,
    column_width: f32,
}

impl BlockGeometry {
    pub(crate) fn new(rect: Rect) -> BlockGeometry {
        let grid_height = rect.height - (PAD + HEADER_HEIGHT + LIST_HEIGHT + PAD);
        let grid_width = rect.width - 2.0 * PAD;
        BlockGeometry {
            rect,
            grid_left: rect.x + PAD,
            grid_top: rect.top() - PAD - HEADER_HEIGHT,
            grid_width,
            row_height: (grid_height - WEEKDAY_BAND) / f32::from(ROWS),
            column_width: grid_width / f32::from(DAYS_IN_WEEK),
        }
    }

    fn grid_right(&self) -> f32 {
        self.grid_left + self.grid_width
    }

    fn grid_bottom(&self) -> f32 {
        self.row_top(ROWS)
    }

    /// Top edge of the given day row; row `ROWS` gives the bottom of the grid
    fn row_top(&self, row: u8) -> f32 {
        self.grid_top - WEEKDAY_BAND - f32::from(row) * self.row_height
    }

    fn column_left(&self, col: u8) -> f32 {
        self.grid_left + f32::from(col) * self.column_width
    }

    fn column_center(&self, col: u8) -> f32 {
        self.column_left(col) + self.column_width / 2.0
    }

    /// Baseline of the `i`-th line of the race list
    fn list_baseline(&self, i: u16) -> f32 {
        self.grid_bottom() - LIST_GAP - f32::from(i) * LINE_STEP
    }

    fn text_indent(&self) -> f32 {
        self.grid_left + FLAG_WIDTH + FLAG_GAP
    }

    /// Number of race lines that fit inside the block, flags included, without
    /// crossing into the bottom padding
    pub(crate) fn list_capacity(&self) -> usize {
        let floor = self.rect.y + PAD;
        (0u16..)
            .map(|i| self.list_baseline(i))
            .take_while(|&y| y - FLAG_DROP >= floor)
            .count()
    }
}

/// Draw one month: its name, the weekday header, the day grid with race
/// weekends underlined, and the list of races below the grid.
///
/// Returns the number of race lines drawn.  Races beyond the list's capacity
/// are still drawn and run past the bottom of the block.
pub(crate) fn draw_month<C: Canvas, F: FetchFlag>(
    canvas: &mut C,
    rect: Rect,
    grid: &MonthGrid,
    events: &MonthEvents,
    flags: &mut FlagCache<F>,
) -> usize {
    let geom = BlockGeometry::new(rect);
    draw_month_name(canvas, &geom, grid);
    draw_weekday_header(canvas, &geom);
    draw_grid_lines(canvas, &geom);
    draw_days(canvas, &geom, grid);
    draw_race_list(canvas, &geom, grid, events, flags)
}

fn draw_month_name<C: Canvas>(canvas: &mut C, geom: &BlockGeometry, grid: &MonthGrid) {
    let name = grid.month().to_string().to_uppercase();
    canvas.text(
        &name,
        geom.rect.x + PAD,
        geom.rect.top() - PAD - MONTH_NAME_DROP,
        theme::MONTH_FONT,
        theme::INK,
    );
}

fn draw_weekday_header<C: Canvas>(canvas: &mut C, geom: &BlockGeometry) {
    let y = geom.grid_top - WEEKDAY_BAND / 2.0 - WEEKDAY_BASELINE_DROP;
    for (col, initial) in zip(0u8.., WEEKDAY_INITIALS) {
        canvas.centered_text(
            initial,
            geom.column_center(col),
            y,
            theme::WEEKDAY_FONT,
            theme::INK_LIGHT,
        );
    }
}

fn draw_grid_lines<C: Canvas>(canvas: &mut C, geom: &BlockGeometry) {
    let (left, right) = (geom.grid_left, geom.grid_right());
    let stroke = theme::GRID_LINE;
    canvas.line((left, geom.grid_top), (right, geom.grid_top), stroke);
    for row in 0..=ROWS {
        let y = geom.row_top(row);
        canvas.line((left, y), (right, y), stroke);
    }
    let bottom = geom.grid_bottom();
    for col in 0..=DAYS_IN_WEEK {
        let x = geom.column_left(col);
        canvas.line((x, geom.grid_top), (x, bottom), stroke);
    }
}

fn draw_days<C: Canvas>(canvas: &mut C, geom: &BlockGeometry, grid: &MonthGrid) {
    for (row, week) in zip(0u8.., grid.weeks()) {
        let baseline = geom.row_top(row + 1) + DAY_BASELINE_RAISE;
        for (wd, day) in week.enumerate() {
            let cx = geom.column_center(wd.number_days_from_sunday());
            let label = day.day().to_string();
            canvas.centered_text(&label, cx, baseline, theme::DAY_FONT, theme::INK);
            if day.marked {
                let half = text_width(&label, theme::DAY_FONT.size) / 2.0;
                let y = baseline - UNDERLINE_DROP;
                canvas.line((cx - half, y), (cx + half, y), theme::UNDERLINE);
            }
        }
    }
}

fn draw_race_list<C: Canvas, F: FetchFlag>(
    canvas: &mut C,
    geom: &BlockGeometry,
    grid: &MonthGrid,
    events: &MonthEvents,
    flags: &mut FlagCache<F>,
) -> usize {
    let races = events.races();
    let capacity = geom.list_capacity();
    if races.len() > capacity {
        tracing::warn!(
            month = %grid.month(),
            races = races.len(),
            capacity,
            "Race list overflows the month block"
        );
    }
    let mut drawn = 0;
    for (i, race) in zip(0u16.., races) {
        let baseline = geom.list_baseline(i);
        if let Some(code) = race.country_code() {
            if let Some(img) = flags.get(code).image() {
                canvas.image(
                    img,
                    Rect::new(geom.grid_left, baseline - FLAG_DROP, FLAG_WIDTH, FLAG_HEIGHT),
                );
            }
        }
        let line = format!("{:02} \u{2013} {}", race.day(), race.name);
        canvas.text(
            &line,
            geom.text_indent(),
            baseline,
            theme::LIST_FONT,
            theme::INK,
        );
        drawn += 1;
    }
    drawn
}
