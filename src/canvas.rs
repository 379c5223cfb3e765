mod metrics;
pub(crate) use self::metrics::text_width;
use crate::flags::FlagImage;

/// An sRGB colour with 8 bits per channel
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Colour {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Colour {
    pub(crate) const fn from_hex(hex: u32) -> Colour {
        let [_, r, g, b] = hex.to_be_bytes();
        Colour { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Face {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Font {
    pub(crate) face: Face,
    /// Size in points
    pub(crate) size: f32,
}

impl Font {
    pub(crate) const fn new(face: Face, size: f32) -> Font {
        Font { face, size }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Stroke {
    pub(crate) colour: Colour,
    /// Line width in points
    pub(crate) width: f32,
}

impl Stroke {
    pub(crate) const fn new(colour: Colour, width: f32) -> Stroke {
        Stroke { colour, width }
    }
}

/// An axis-aligned rectangle in points, measured from the bottom-left corner
/// of the page
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rect {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Rect {
    pub(crate) const fn new(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) fn top(&self) -> f32 {
        self.y + self.height
    }

    pub(crate) fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A single page that can be painted on.
///
/// All coordinates are in PDF points with the origin in the bottom-left
/// corner of the page and the y axis pointing up.
pub(crate) trait Canvas {
    fn fill_rect(&mut self, rect: Rect, colour: Colour);

    /// Outline `rect` with corners rounded to `radius` points
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: Stroke);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);

    /// Draw `text` with its baseline starting at `(x, y)`
    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, colour: Colour);

    /// Draw `image` stretched to fill `rect`
    fn image(&mut self, image: &FlagImage, rect: Rect);

    /// Draw `text` with its baseline horizontally centered on `(cx, y)`
    fn centered_text(&mut self, text: &str, cx: f32, y: f32, font: Font, colour: Colour) {
        let width = text_width(text, font.size);
        self.text(text, cx - width / 2.0, y, font, colour);
    }
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        (**self).fill_rect(rect, colour);
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: Stroke) {
        (**self).stroke_rounded_rect(rect, radius, stroke);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        (**self).line(from, to, stroke);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, colour: Colour) {
        (**self).text(text, x, y, font, colour);
    }

    fn image(&mut self, image: &FlagImage, rect: Rect) {
        (**self).image(image, rect);
    }
}
