use crate::canvas::{Colour, Face, Font, Stroke};

pub(crate) const PAPER: Colour = Colour::from_hex(0xE4E2DC);

pub(crate) const INK: Colour = Colour::from_hex(0x1A1A1A);

pub(crate) const INK_LIGHT: Colour = Colour::from_hex(0x5C5A54);

pub(crate) const ACCENT: Colour = Colour::from_hex(0xC1121F);

pub(crate) const GRID: Colour = Colour::from_hex(0xCAC6BE);

pub(crate) const TITLE_FONT: Font = Font::new(Face::Bold, 42.0);

pub(crate) const MONTH_FONT: Font = Font::new(Face::Regular, 14.0);

pub(crate) const WEEKDAY_FONT: Font = Font::new(Face::Regular, 8.0);

pub(crate) const DAY_FONT: Font = Font::new(Face::Regular, 8.0);

pub(crate) const LIST_FONT: Font = Font::new(Face::Regular, 8.0);

pub(crate) const BLOCK_OUTLINE: Stroke = Stroke::new(GRID, 0.6);

/// Corner radius of the month block outlines, in points
pub(crate) const BLOCK_RADIUS: f32 = 10.0;

pub(crate) const GRID_LINE: Stroke = Stroke::new(GRID, 0.3);

pub(crate) const UNDERLINE: Stroke = Stroke::new(ACCENT, 0.8);
