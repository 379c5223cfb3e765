use crate::canvas::{Canvas, Colour, Face, Font, Rect, Stroke};
use crate::flags::FlagImage;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
    Polygon, Px, Rgb,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

const MM_PER_POINT: f32 = 25.4 / 72.0;

/// Distance of a cubic bezier control point from the end of a quarter circle,
/// as a fraction of the radius
const KAPPA: f32 = 0.552_284_8;

fn mm(points: f32) -> Mm {
    Mm(points * MM_PER_POINT)
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(mm(x), mm(y)), false)
}

/// A point followed by bezier control points rather than a straight segment
fn curve_start(x: f32, y: f32) -> (Point, bool) {
    (Point::new(mm(x), mm(y)), true)
}

/// Outline of `rect` with quarter-circle corners, running anticlockwise from
/// the bottom edge.  Each corner is a curve start, two control points and an
/// end point, as `printpdf::Line` expects.
fn rounded_outline(rect: Rect, radius: f32) -> Vec<(Point, bool)> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (left, bottom, right, top) = (rect.x, rect.y, rect.right(), rect.top());
    if r <= 0.0 {
        return vec![
            point(left, bottom),
            point(right, bottom),
            point(right, top),
            point(left, top),
        ];
    }
    let k = r * KAPPA;
    vec![
        point(left + r, bottom),
        curve_start(right - r, bottom),
        curve_start(right - r + k, bottom),
        point(right, bottom + r - k),
        point(right, bottom + r),
        curve_start(right, top - r),
        curve_start(right, top - r + k),
        point(right - r + k, top),
        point(right - r, top),
        curve_start(left + r, top),
        curve_start(left + r - k, top),
        point(left, top - r + k),
        point(left, top - r),
        curve_start(left, bottom + r),
        curve_start(left, bottom + r - k),
        point(left + r - k, bottom),
        point(left + r, bottom),
    ]
}

fn colour(c: Colour) -> Color {
    let channel = |v: u8| f32::from(v) / 255.0;
    Color::Rgb(Rgb::new(channel(c.r), channel(c.g), channel(c.b), None))
}

#[derive(Debug, Error)]
pub(crate) enum PdfError {
    #[error("failed to load builtin font: {0}")]
    Font(String),
    #[error("failed to create {}", .path.display())]
    Create {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// A single-page PDF document that can be drawn on
pub(crate) struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfCanvas {
    /// Create a document with one page of the given size in points
    pub(crate) fn new(title: &str, width: f32, height: f32) -> Result<PdfCanvas, PdfError> {
        let (doc, page, layer) = PdfDocument::new(title, mm(width), mm(height), "Poster");
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfError::Font(e.to_string()))?;
        Ok(PdfCanvas {
            doc,
            layer,
            regular,
            bold,
        })
    }

    pub(crate) fn save(self, path: &Path) -> Result<(), PdfError> {
        let file = File::create(path).map_err(|source| PdfError::Create {
            path: path.to_owned(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| PdfError::Write(e.to_string()))
    }

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }

    fn set_stroke(&self, stroke: Stroke) {
        self.layer.set_outline_color(colour(stroke.colour));
        self.layer.set_outline_thickness(stroke.width);
    }
}

impl Canvas for PdfCanvas {
    fn fill_rect(&mut self, rect: Rect, c: Colour) {
        self.layer.set_fill_color(colour(c));
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                point(rect.x, rect.y),
                point(rect.right(), rect.y),
                point(rect.right(), rect.top()),
                point(rect.x, rect.top()),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: Stroke) {
        self.set_stroke(stroke);
        self.layer.add_line(Line {
            points: rounded_outline(rect, radius),
            is_closed: true,
        });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        self.set_stroke(stroke);
        self.layer.add_line(Line {
            points: vec![point(from.0, from.1), point(to.0, to.1)],
            is_closed: false,
        });
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, c: Colour) {
        self.layer.set_fill_color(colour(c));
        self.layer
            .use_text(text, font.size, mm(x), mm(y), self.font(font.face));
    }

    fn image(&mut self, image: &FlagImage, rect: Rect) {
        let (Ok(width), Ok(height)) = (u16::try_from(image.width()), u16::try_from(image.height()))
        else {
            tracing::warn!(
                width = image.width(),
                height = image.height(),
                "Flag image too large to embed"
            );
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        let xobject = ImageXObject {
            width: Px(usize::from(width)),
            height: Px(usize::from(height)),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: image.rgb().to_vec(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        };
        // At 72 DPI one pixel is one point, so the scale factors map the
        // image straight onto the requested rectangle.
        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(rect.x)),
                translate_y: Some(mm(rect.y)),
                dpi: Some(72.0),
                scale_x: Some(rect.width / f32::from(width)),
                scale_y: Some(rect.height / f32::from(height)),
                ..ImageTransform::default()
            },
        );
    }
}
