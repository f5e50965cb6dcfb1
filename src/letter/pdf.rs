//! PDF rendering of a [`LetterLayout`] on A4 pages.
//!
//! Text is wrapped with an average glyph width estimate, which is close
//! enough for Helvetica-like fonts. Pages break automatically and the
//! footer is repeated on every page.

use std::fs::File;
use std::io::BufReader;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::letter::LetterError;
use crate::letter::layout::{Block, LetterLayout, ResultsTable, Span};
use crate::models::config::FontConfig;

/// Turns a composed letter into document bytes.
pub trait LetterRenderer: Send + Sync {
    fn render(&self, layout: &LetterLayout) -> Result<Vec<u8>, LetterError>;
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 20.0;
const TOP: f32 = 277.0;
/// Lowest baseline for body text; the footer lives below it.
const BOTTOM: f32 = 32.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;
const LIST_INDENT: f32 = 6.0;

const BODY_SIZE: f32 = 11.0;
const HEADING_SIZE: f32 = 14.0;
const SIGNATURE_SIZE: f32 = 18.0;
const FOOTER_SIZE: f32 = 8.0;

const PT_TO_MM: f32 = 0.3528;
const GLYPH_WIDTH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.35;
const PARAGRAPH_GAP: f32 = 3.0;

const TABLE_COLUMNS: [f32; 3] = [0.63, 0.25, 0.12];

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH_EM * PT_TO_MM
}

fn line_height(size: f32) -> f32 {
    size * LINE_SPACING * PT_TO_MM
}

/// Greedy word wrap of plain text into lines no wider than `width`.
pub(crate) fn wrap(text: &str, width: f32, size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) > width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A word placed on a line, with its offset from the left edge.
struct Placed<'a> {
    text: &'a str,
    bold: bool,
    x: f32,
}

/// Wraps mixed-weight spans, keeping each word's weight.
fn wrap_spans(spans: &[Span], width: f32, size: f32) -> Vec<Vec<Placed<'_>>> {
    let space = text_width(" ", size);
    let mut lines = vec![Vec::new()];
    let mut x = 0.0;

    for span in spans {
        for word in span.text.split_whitespace() {
            let word_width = text_width(word, size);
            let mut start = if x > 0.0 { x + space } else { 0.0 };
            if start + word_width > width && x > 0.0 {
                lines.push(Vec::new());
                start = 0.0;
            }
            if let Some(line) = lines.last_mut() {
                line.push(Placed {
                    text: word,
                    bold: span.bold,
                    x: start,
                });
            }
            x = start + word_width;
        }
    }
    lines.retain(|line| !line.is_empty());
    lines
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, bold: bool) -> &IndirectFontRef {
        if bold { &self.bold } else { &self.regular }
    }
}

fn load_font(
    doc: &PdfDocumentReference,
    path: &str,
    fallback: BuiltinFont,
) -> Result<IndirectFontRef, LetterError> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(doc.add_builtin_font(fallback)?);
    }
    let font_error = |message: String| LetterError::Font {
        path: path.to_string(),
        message,
    };
    let file = File::open(path).map_err(|e| font_error(e.to_string()))?;
    doc.add_external_font(BufReader::new(file))
        .map_err(|e| font_error(e.to_string()))
}

/// Cursor over the pages of one document.
struct Pager<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a Fonts,
    footer: &'a str,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> Pager<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        layer: PdfLayerReference,
        fonts: &'a Fonts,
        footer: &'a str,
    ) -> Self {
        let pager = Self {
            doc,
            fonts,
            footer,
            layer,
            y: TOP,
        };
        pager.draw_footer();
        pager
    }

    fn draw_footer(&self) {
        let grey = Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None));
        self.layer.set_fill_color(grey);
        let mut y = 22.0;
        for line in wrap(self.footer, CONTENT_WIDTH, FOOTER_SIZE) {
            let x = MARGIN_X + (CONTENT_WIDTH - text_width(&line, FOOTER_SIZE)).max(0.0) / 2.0;
            self.layer
                .use_text(line, FOOTER_SIZE, Mm(x), Mm(y), &self.fonts.regular);
            y -= line_height(FOOTER_SIZE);
        }
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
        self.draw_footer();
    }

    /// Moves to the next line of `height`, breaking the page when needed.
    fn advance(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            self.new_page();
        }
        self.y -= height;
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        self.layer
            .use_text(text, size, Mm(x), Mm(self.y), self.fonts.pick(bold));
    }

    fn lines(&mut self, text: &str, size: f32, indent: f32, bold: bool) {
        for line in wrap(text, CONTENT_WIDTH - indent, size) {
            self.advance(line_height(size));
            self.text(&line, size, MARGIN_X + indent, bold);
        }
    }

    fn paragraph(&mut self, spans: &[Span]) {
        for line in wrap_spans(spans, CONTENT_WIDTH, BODY_SIZE) {
            self.advance(line_height(BODY_SIZE));
            for word in line {
                self.text(word.text, BODY_SIZE, MARGIN_X + word.x, word.bold);
            }
        }
    }

    fn table(&mut self, table: &ResultsTable) {
        let widths = TABLE_COLUMNS.map(|share| share * CONTENT_WIDTH);
        self.row(&table.headers, &widths, true);
        for row in &table.rows {
            self.row(row, &widths, false);
        }
    }

    fn row(&mut self, cells: &[String; 3], widths: &[f32; 3], bold: bool) {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| wrap(cell, width - 2.0, BODY_SIZE))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for line in 0..height {
            self.advance(line_height(BODY_SIZE));
            let mut x = MARGIN_X;
            for (column, width) in wrapped.iter().zip(widths) {
                if let Some(text) = column.get(line) {
                    self.text(text, BODY_SIZE, x + 1.0, bold);
                }
                x += width;
            }
        }
        self.gap(1.0);
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(text) => {
                self.gap(PARAGRAPH_GAP);
                self.lines(text, HEADING_SIZE, 0.0, true);
            }
            Block::Subtitle(text) => {
                self.gap(PARAGRAPH_GAP);
                self.lines(text, BODY_SIZE, 0.0, true);
            }
            Block::Paragraph(spans) => {
                self.gap(PARAGRAPH_GAP);
                self.paragraph(spans);
            }
            Block::Table(table) => {
                self.gap(PARAGRAPH_GAP);
                self.table(table);
            }
            Block::ListItem(text) => self.lines(text, BODY_SIZE, LIST_INDENT, false),
            Block::Signature(name) => {
                self.gap(PARAGRAPH_GAP * 2.0);
                self.advance(line_height(SIGNATURE_SIZE));
                self.text("Signed", BODY_SIZE, MARGIN_X, false);
                self.text(name, SIGNATURE_SIZE, MARGIN_X + 20.0, false);
            }
        }
    }
}

/// Renders letters with printpdf. Fonts are read on every render so that a
/// replaced font file takes effect without a restart.
#[derive(Clone, Debug, Default)]
pub struct PdfLetterRenderer {
    fonts: FontConfig,
}

impl PdfLetterRenderer {
    pub fn new(fonts: FontConfig) -> Self {
        Self { fonts }
    }
}

impl LetterRenderer for PdfLetterRenderer {
    fn render(&self, layout: &LetterLayout) -> Result<Vec<u8>, LetterError> {
        let (doc, page, layer) =
            PdfDocument::new(&layout.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let fonts = Fonts {
            regular: load_font(&doc, &self.fonts.regular, BuiltinFont::Helvetica)?,
            bold: load_font(&doc, &self.fonts.bold, BuiltinFont::HelveticaBold)?,
        };

        {
            let first_layer = doc.get_page(page).get_layer(layer);
            let mut pager = Pager::new(&doc, first_layer, &fonts, &layout.footer);
            for block in &layout.blocks {
                pager.block(block);
            }
        }

        Ok(doc.save_to_bytes()?)
    }
}
