//! Glue between the transport, the command interpreter and the document.

use std::io::Write;

use periph_parser_core::{OkimateParser, PageSink, PrinterParser, ATASCII_EOL};

use crate::{PdfDocument, PdfError};

/// One print job: an interpreter plus the document it renders into.
///
/// Transport frames are fed through [`process_frame`](Self::process_frame);
/// the end-of-line byte of the host charset is consumed here rather than in
/// the interpreter, because it is only a line terminator while the
/// interpreter is idle; inside escape sequences and graphics runs the same
/// byte is ordinary data.
pub struct PrintSession {
    parser: OkimateParser,
    doc: PdfDocument,
}

impl Default for PrintSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintSession {
    pub fn new() -> Self {
        Self {
            parser: OkimateParser::new(),
            doc: PdfDocument::new(),
        }
    }

    /// Feed one transport frame of print data. `aux1`/`aux2` are the
    /// auxiliary bytes of the frame header.
    pub fn process_frame(&mut self, data: &[u8], aux1: u8, aux2: u8) {
        for &byte in data {
            if byte == ATASCII_EOL && self.parser.is_idle() && !self.parser.color_mode() {
                // Reverse video does not survive the end of a line.
                self.parser.clear_line_modes();
                self.doc.end_line();
            } else {
                self.parser.handle_byte(byte, aux1, aux2, &mut self.doc);
            }
        }
    }

    pub fn document(&self) -> &PdfDocument {
        &self.doc
    }

    /// Flush the interpreter and finalize the document into `out`.
    pub fn finish<W: Write>(mut self, out: W) -> Result<(), PdfError> {
        self.parser.flush(&mut self.doc);
        self.doc.finish(out)
    }
}
