//! PDF report rendering.
//!
//! Draws the report rows as one centred table on a single A4 page: a grey
//! title row with bold white-smoke text, beige body rows, black grid lines.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use hours_core::{MonthlyReport, ReportRow};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
};
use thiserror::Error;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 25.4;

const COLUMN_WIDTHS: [f32; 2] = [40.0, 30.0];
const HEADER_HEIGHT: f32 = 11.0;
const ROW_HEIGHT: f32 = 6.5;

const HEADER_FONT_SIZE: f32 = 14.0;
const BODY_FONT_SIZE: f32 = 10.0;
const GRID_THICKNESS: f32 = 1.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.55;

/// Errors while writing the PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Creating or writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The PDF library rejected the document.
    #[error("failed to build PDF: {0}")]
    Pdf(String),
    /// The table does not fit on one page.
    #[error("{rows} rows do not fit on one page")]
    TooManyRows { rows: usize },
}

type Rgb3 = (f32, f32, f32);

const GREY: Rgb3 = (0.5, 0.5, 0.5);
const WHITE_SMOKE: Rgb3 = (0.96, 0.96, 0.96);
const BEIGE: Rgb3 = (0.96, 0.96, 0.86);
const BLACK: Rgb3 = (0.0, 0.0, 0.0);

fn color((r, g, b): Rgb3) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Total table height for `rows` rows (the first one being the header).
#[allow(clippy::cast_precision_loss)]
pub fn table_height(rows: usize) -> f32 {
    match rows {
        0 => 0.0,
        n => (n - 1) as f32 * ROW_HEIGHT + HEADER_HEIGHT,
    }
}

/// Whether `rows` rows fit between the top and bottom margins.
pub fn fits_on_page(rows: usize) -> bool {
    table_height(rows) <= PAGE_HEIGHT - 2.0 * MARGIN
}

/// Rough text width in mm for a built-in Helvetica face.
#[allow(clippy::cast_precision_loss)]
fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH * PT_TO_MM
}

/// Writes `report` as a one-page PDF at `path`, creating parent directories.
pub fn write_pdf(report: &MonthlyReport, path: &Path) -> Result<(), RenderError> {
    if !fits_on_page(report.rows.len()) {
        return Err(RenderError::TooManyRows {
            rows: report.rows.len(),
        });
    }

    let io_err = |source| RenderError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let title = format!("Working hours {}", report.month);
    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "table");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| RenderError::Pdf(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| RenderError::Pdf(err.to_string()))?;
    let layer = doc.get_page(page).get_layer(layer);

    draw_table(&layer, &report.rows, &regular, &bold);

    let file = File::create(path).map_err(io_err)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|err| RenderError::Pdf(err.to_string()))?;

    tracing::debug!(path = %path.display(), rows = report.rows.len(), "wrote PDF report");
    Ok(())
}

fn draw_table(
    layer: &PdfLayerReference,
    rows: &[ReportRow],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let table_width: f32 = COLUMN_WIDTHS.iter().sum();
    let left = (PAGE_WIDTH - table_width) / 2.0;
    let mut top = PAGE_HEIGHT - MARGIN;

    layer.set_outline_color(color(BLACK));
    layer.set_outline_thickness(GRID_THICKNESS);

    for row in rows {
        let is_header = matches!(row, ReportRow::Header);
        let (height, fill, text_color, font, size) = if is_header {
            (HEADER_HEIGHT, GREY, WHITE_SMOKE, bold, HEADER_FONT_SIZE)
        } else {
            (ROW_HEIGHT, BEIGE, BLACK, regular, BODY_FONT_SIZE)
        };
        let bottom = top - height;

        let mut x = left;
        for (text, width) in row.cells().iter().zip(COLUMN_WIDTHS) {
            layer.set_fill_color(color(fill));
            draw_cell(layer, x, bottom, width, height);

            // The header keeps extra padding below the text.
            let lift = if is_header { 3.5 } else { 2.0 };
            let text_x = x + (width - text_width(text, size)) / 2.0;
            layer.set_fill_color(color(text_color));
            layer.use_text(text.as_str(), size, Mm(text_x), Mm(bottom + lift), font);

            x += width;
        }

        top = bottom;
    }
}

fn draw_cell(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let corners = vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y + height)), false),
        (Point::new(Mm(x), Mm(y + height)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![corners],
        mode: PaintMode::FillStroke,
        winding_order: WindingOrder::NonZero,
    });
}
