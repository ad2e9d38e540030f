//! Core interpreter infrastructure: page-output traits and the Okimate 10
//! printer command interpreter.
//!
//! Legacy host computers drive their printers with raw byte streams that
//! interleave printable data, direct control codes and multi-byte ESC
//! sequences. The parsers in this crate consume such a stream one byte at a
//! time and emit page-description operations into a [`PageSink`], which owns
//! the document and page lifecycle. One parser instance corresponds to one
//! print job; no state is shared between instances.

mod errors;
pub use errors::{print_char_value, ErrorLevel, ParseError};

mod font;
pub use font::{FontMode, FontTracker, Pitch};

mod geometry;
pub use geometry::{PageGeometry, LINE_LONG, LINE_SHORT, PERF_SKIP_MARGIN};

mod graphics;

mod okimate;
pub use okimate::{OkimateParser, ATASCII_EOL};

/// Receiver for the page-description operations an interpreter emits.
///
/// The sink owns the document: it tracks the pen position, breaks lines and
/// pages, and serializes everything into its output format. The interpreter
/// only decides *what* to emit and in which order. Ordering is a correctness
/// requirement: color and geometry directives are always emitted between
/// [`close_text_run`](PageSink::close_text_run) and
/// [`open_text_run`](PageSink::open_text_run), never inside an open run.
pub trait PageSink {
    /// Open a run of text tokens at the current pen position.
    fn open_text_run(&mut self);

    /// Close the currently open run of text tokens.
    fn close_text_run(&mut self);

    /// Re-select the regular text typeface.
    fn reset_typeface(&mut self);

    /// Select the graphics typeface whose glyphs are the pin marks.
    fn select_graphics_typeface(&mut self);

    /// Set the horizontal glyph scale in percent (100 = unscaled).
    fn set_horizontal_scale(&mut self, percent: f32);

    /// Tell the sink the advance width of one character cell, in points.
    fn set_char_width(&mut self, width: f32);

    /// Set the fill color as CMYK plane bits (each 0 or 1).
    fn set_fill_color(&mut self, c: u8, m: u8, y: u8, k: u8);

    /// Fill a rectangle, in page coordinates.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Emit one literal character into the open text run.
    fn put_char(&mut self, byte: u8);

    /// Emit the blank column that leads every expanded graphics byte.
    fn put_blank_advance(&mut self);

    /// Emit one positioned graphics mark: shift back by `offset` thousandths
    /// of an em, then place the mark glyph for `pin` (1-based).
    fn put_mark(&mut self, offset: i16, pin: u8);

    /// Shift the text baseline by `delta` lines (negative moves down).
    fn add_rise(&mut self, delta: f32);

    /// Finish the current line and move the pen to the start of the next.
    fn end_line(&mut self);

    /// Start a new page.
    fn new_page(&mut self);

    /// Finish the current page.
    fn end_page(&mut self);

    /// Line height changed (lines-per-inch command).
    fn set_line_height(&mut self, height: f32);

    /// Top/bottom page margins changed (perforation-skip command).
    fn set_page_margins(&mut self, top: f32, bottom: f32);

    /// Printable line width changed (line-length command).
    fn set_line_length(&mut self, length: f32);

    /// Current pen position in page coordinates. Consulted when a character
    /// cell has to be filled for reverse-video text.
    fn pen(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Report a parsing diagnostic. Default implementation does nothing.
    fn report_error(&mut self, _error: ParseError, _level: ErrorLevel) {}
}

/// A printer command interpreter driven by transport frames.
pub trait PrinterParser {
    /// Feed one transport frame through the interpreter.
    ///
    /// `aux1` and `aux2` are the two auxiliary bytes of the enclosing frame
    /// header. Command sets that take secondary arguments from the frame
    /// header read them; the rest ignore them.
    fn parse(&mut self, input: &[u8], aux1: u8, aux2: u8, sink: &mut dyn PageSink);

    /// Flush any buffered state at end of job. Default implementation does
    /// nothing.
    fn flush(&mut self, _sink: &mut dyn PageSink) {}
}
