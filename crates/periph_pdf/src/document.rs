//! Incremental PDF writer implementing the page sink.
//!
//! Each page is a single text object accumulated in memory as the
//! interpreter emits sink calls; the surrounding document structure
//! (catalog, page tree, font resources, xref, trailer) is assembled once at
//! [`PdfDocument::finish`]. The content-stream vocabulary is deliberately
//! small: `TJ` runs of text, `Tz` horizontal scale, `Tf` typeface, `k` fill
//! color, `re f` filled rects, `Ts` rise, `T*` line advance.
//!
//! Graphics pin columns print through the F2 typeface, where the digit
//! glyphs 1-7 draw the seven pin marks and `0` is a blank column; a -100
//! kern between digits overstrikes them in one column.

use std::io::Write;

use periph_parser_core::{PageGeometry, PageSink};

use crate::PdfError;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const FONT_SIZE: f32 = 12.0;

/// A letter-format PDF document driven through the [`PageSink`] calls of a
/// printer interpreter. Pages are buffered in memory; nothing is written
/// until [`finish`](Self::finish), so the sink methods stay infallible.
pub struct PdfDocument {
    /// Finished page content streams.
    pages: Vec<Vec<u8>>,
    /// Content stream of the page being built.
    content: Vec<u8>,
    geometry: PageGeometry,
    /// Pen X offset from the left margin, points.
    pen_x: f32,
    /// Baseline Y in page coordinates (origin bottom-left), points.
    pen_y: f32,
    /// Accumulated text rise, points.
    rise: f32,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            pages: Vec::new(),
            content: Vec::new(),
            geometry: PageGeometry::default(),
            pen_x: 0.0,
            pen_y: 0.0,
            rise: 0.0,
        };
        doc.start_page();
        doc
    }

    /// Pages in the document so far, the one under construction included.
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    fn start_page(&mut self) {
        self.pen_x = 0.0;
        self.pen_y = PAGE_HEIGHT - self.geometry.top_margin;
        self.rise = 0.0;
        self.content.clear();
        let _ = write!(
            self.content,
            "BT\n/F1 {} Tf\n{} TL\n{} {} Td\n [(",
            FONT_SIZE, self.geometry.line_height, self.geometry.left_margin, self.pen_y
        );
    }

    fn finish_page(&mut self) {
        self.content.extend_from_slice(b")]TJ\nET\n");
        let page = std::mem::take(&mut self.content);
        self.pages.push(page);
    }

    /// Close the current line and move the pen to the next one, breaking the
    /// page when the new baseline falls below the bottom margin.
    fn advance_line(&mut self) {
        self.pen_x = 0.0;
        self.pen_y -= self.geometry.line_height;
        if self.pen_y < self.geometry.bottom_margin {
            self.finish_page();
            self.start_page();
        } else {
            self.content.extend_from_slice(b")]TJ T*\n [(");
        }
    }

    fn wrap_if_needed(&mut self) {
        if self.pen_x + self.geometry.char_width > self.geometry.line_length {
            self.advance_line();
        }
    }

    /// Write the document: header, objects, per-page content streams, xref
    /// table and trailer. Consumes the document; the page under construction
    /// is flushed as the final page.
    pub fn finish<W: Write>(mut self, mut out: W) -> Result<(), PdfError> {
        self.finish_page();
        log::debug!("writing pdf document, {} page(s)", self.pages.len());

        let mut buf: Vec<u8> = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n");

        // Objects 1-5 are fixed: catalog, page tree, the two font
        // resources, and the info dictionary. Page and content-stream
        // objects follow pairwise from 6.
        let object_count = 5 + 2 * self.pages.len();
        let mut offsets: Vec<usize> = Vec::with_capacity(object_count);

        offsets.push(buf.len());
        buf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        offsets.push(buf.len());
        let kids: Vec<String> = (0..self.pages.len())
            .map(|i| format!("{} 0 R", 6 + 2 * i))
            .collect();
        let _ = write!(
            buf,
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            self.pages.len()
        );

        offsets.push(buf.len());
        buf.extend_from_slice(
            b"3 0 obj\n<< /Type /Font /Subtype /Type1 /Name /F1 /BaseFont /Courier >>\nendobj\n",
        );
        offsets.push(buf.len());
        buf.extend_from_slice(
            b"4 0 obj\n<< /Type /Font /Subtype /Type1 /Name /F2 /BaseFont /Courier >>\nendobj\n",
        );

        offsets.push(buf.len());
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let _ = write!(buf, "5 0 obj\n<< /CreationDate (D:{}) >>\nendobj\n", stamp);

        for (i, page) in self.pages.iter().enumerate() {
            let page_obj = 6 + 2 * i;
            let stream_obj = page_obj + 1;

            offsets.push(buf.len());
            let _ = write!(
                buf,
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                page_obj, PAGE_WIDTH, PAGE_HEIGHT, stream_obj
            );

            offsets.push(buf.len());
            let _ = write!(buf, "{} 0 obj\n<< /Length {} >>\nstream\n", stream_obj, page.len());
            buf.extend_from_slice(page);
            buf.extend_from_slice(b"endstream\nendobj\n");
        }

        let xref_at = buf.len();
        let _ = write!(buf, "xref\n0 {}\n0000000000 65535 f \n", object_count + 1);
        for offset in &offsets {
            let _ = write!(buf, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            buf,
            "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
            object_count + 1,
            xref_at
        );

        out.write_all(&buf)?;
        out.flush()?;
        Ok(())
    }
}

impl PageSink for PdfDocument {
    fn open_text_run(&mut self) {
        self.content.extend_from_slice(b" [(");
    }

    fn close_text_run(&mut self) {
        self.content.extend_from_slice(b")]TJ\n ");
    }

    fn reset_typeface(&mut self) {
        let _ = write!(self.content, "/F1 {} Tf ", FONT_SIZE);
    }

    fn select_graphics_typeface(&mut self) {
        let _ = write!(self.content, "/F2 {} Tf ", FONT_SIZE);
    }

    fn set_horizontal_scale(&mut self, percent: f32) {
        let _ = write!(self.content, "{} Tz", percent);
    }

    fn set_char_width(&mut self, width: f32) {
        self.geometry.char_width = width;
    }

    fn set_fill_color(&mut self, c: u8, m: u8, y: u8, k: u8) {
        let _ = write!(self.content, " {} {} {} {} k ", c, m, y, k);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let _ = write!(self.content, "{} {} {} {} re f ", x, y, width, height);
    }

    fn put_char(&mut self, byte: u8) {
        self.wrap_if_needed();
        match byte {
            b'(' | b')' | b'\\' => {
                self.content.push(b'\\');
                self.content.push(byte);
            }
            _ => self.content.push(byte),
        }
        self.pen_x += self.geometry.char_width;
    }

    fn put_blank_advance(&mut self) {
        self.wrap_if_needed();
        self.content.push(b'0');
        self.pen_x += self.geometry.char_width;
    }

    fn put_mark(&mut self, offset: i16, pin: u8) {
        // Kern back over the blank column and overstrike the pin glyph.
        let _ = write!(self.content, "){}(", offset);
        self.content.push(b'0' + pin);
    }

    fn add_rise(&mut self, delta: f32) {
        self.rise += delta * self.geometry.line_height;
        let _ = write!(self.content, ")]TJ {} Ts [(", self.rise);
    }

    fn end_line(&mut self) {
        self.advance_line();
    }

    fn new_page(&mut self) {
        self.start_page();
    }

    fn end_page(&mut self) {
        self.finish_page();
    }

    fn set_line_height(&mut self, height: f32) {
        self.geometry.line_height = height;
        let _ = write!(self.content, ")]TJ {} TL [(", height);
    }

    fn set_page_margins(&mut self, top: f32, bottom: f32) {
        self.geometry.top_margin = top;
        self.geometry.bottom_margin = bottom;
    }

    fn set_line_length(&mut self, length: f32) {
        self.geometry.line_length = length;
    }

    fn pen(&self) -> (f32, f32) {
        (self.pen_x, self.pen_y + self.rise)
    }
}
