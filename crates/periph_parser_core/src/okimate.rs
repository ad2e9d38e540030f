//! Okimate 10 printer command interpreter.
//!
//! The Okimate 10 has both ESC sequences and direct commands, several of
//! which take one or two trailing argument bytes. The interpreter is a
//! byte-at-a-time state machine over one enumerated state value:
//!
//! - `Idle`: bytes are printable data or direct commands.
//! - `Escape`: the byte after ESC selects an escape command; most complete
//!   immediately, `ESC %` enters the graphics sub-machine.
//! - `Graphics`: bytes are 7-pin graphics data until the end marker. The
//!   repeat command can be invoked from here and hands control back when its
//!   two arguments have arrived.
//! - `Command`: a direct command is collecting its argument bytes; carries
//!   the state to return to, so a repeat invoked inside a graphics run
//!   resumes the run.
//!
//! Color mode (ribbon alignment plus per-line CMY buffering) is recognized
//! and reported but not implemented: the aligned-ribbon marker only arms the
//! flag, and nothing further is buffered.

use crate::{
    font::{FontMode, FontTracker},
    geometry::{self, PageGeometry},
    graphics, ErrorLevel, PageSink, ParseError, PrinterParser,
};

/// End-of-line byte of the host character set. Intercepted by the session
/// layer while the interpreter is idle; inside escape sequences and graphics
/// runs it is ordinary data.
pub const ATASCII_EOL: u8 = 0x9B;

const ESC: u8 = 0x1B;

// Direct commands
const CMD_LINE_ADVANCE: u8 = 0x8A;
const CMD_FORM_FEED: u8 = 0x8C;
const CMD_DOT_TAB: u8 = 0x90;
const CMD_GFX_END: u8 = 0x91;
const CMD_REVERSE_ON: u8 = 0x92;
const CMD_REVERSE_OFF: u8 = 0x93;
const CMD_ALIGN_RIBBON: u8 = 0x99;
const CMD_GFX_REPEAT: u8 = 0x9A;
const CMD_COLOR_EOL: u8 = ATASCII_EOL;

// Escape commands
const ESC_WIDE: u8 = 0x0E;
const ESC_NORMAL: u8 = 0x0F;
const ESC_FINE: u8 = 0x14;
const ESC_INTL_ON: u8 = 0x17;
const ESC_INTL_OFF: u8 = 0x18;
const ESC_GRAPHICS: u8 = 0x25;
const ESC_SIX_LPI: u8 = 0x36;
const ESC_EIGHT_LPI: u8 = 0x38;
const ESC_PERF_SKIP_OFF: u8 = 0x41;
const ESC_PERF_SKIP_ON: u8 = 0x42;
const ESC_LINE_LONG: u8 = 0x4C;
const ESC_LINE_SHORT: u8 = 0x53;

/// Character cell width of the graphics typeface, points.
const GFX_CHAR_WIDTH: f32 = 1.2;

/// Denominator of the fractional-line vertical advance: `0x8A n` moves the
/// baseline down by n/144 inch (n half-points).
const LINE_ADVANCE_UNIT: f32 = 144.0;

/// International glyph set of the host charset: codes 0x00-0x1A map to
/// accented characters while the international flag is on.
const INTL_CHARSET: [u8; 27] = [
    225, 249, 209, 201, 231, 244, 242, 236, 163, 239, 252, 228, 214, 250, 243, 246, 220, 226, 251,
    238, 233, 232, 241, 234, 229, 224, 197,
];

/// Where a completed direct command hands control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Return {
    Idle,
    Graphics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Escape,
    Graphics,
    Command { cmd: u8, return_to: Return },
}

/// Argument bytes collected for the command in flight. Zeroed when a command
/// completes or is abandoned.
#[derive(Debug, Clone, Copy, Default)]
struct ArgAccumulator {
    /// Argument bytes consumed so far.
    ctr: u8,
    arg1: u8,
    arg2: u8,
}

impl ArgAccumulator {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn push(&mut self, byte: u8) {
        self.ctr += 1;
        match self.ctr {
            1 => self.arg1 = byte,
            2 => self.arg2 = byte,
            _ => {}
        }
    }

    /// Assemble the accumulated ASCII-digit bytes into an integer, most
    /// significant digit first. `last` is the byte that terminated the
    /// sequence; it contributes the third digit when it is itself a digit,
    /// otherwise the value accumulated so far is final. Assumes the stored
    /// bytes are digits; the dispatcher only stores bytes it has range
    /// checked.
    fn ascii_to_int(&self, last: u8) -> u16 {
        let stored = [self.arg1, self.arg2];
        let mut n = 0u16;
        for &digit in &stored[..usize::from(self.ctr.min(2))] {
            n = n * 10 + u16::from(digit - b'0');
        }
        if last.is_ascii_digit() {
            n = n * 10 + u16::from(last - b'0');
        }
        n
    }
}

/// Byte-at-a-time interpreter for the Okimate 10 command set.
///
/// All mutable state of one print job lives here; run one instance per job.
pub struct OkimateParser {
    state: State,
    acc: ArgAccumulator,
    font: FontTracker,
    geometry: PageGeometry,
    /// False while a graphics run or dot-column tab owns the output stream.
    text_mode: bool,
    /// Armed by the align-ribbon marker; compositing itself is unimplemented.
    color_mode: bool,
}

impl Default for OkimateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OkimateParser {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            acc: ArgAccumulator::default(),
            font: FontTracker::new(),
            geometry: PageGeometry::default(),
            text_mode: true,
            color_mode: false,
        }
    }

    /// True when no command or graphics run is in progress and the next byte
    /// is interpreted directly.
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// True outside graphics runs and dot-column tabs.
    pub fn is_text_mode(&self) -> bool {
        self.text_mode
    }

    /// True once the align-ribbon marker has armed color mode.
    pub fn color_mode(&self) -> bool {
        self.color_mode
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Abandon any command in progress. The only way to cancel a multi-byte
    /// command mid-sequence.
    pub fn reset(&mut self) {
        self.acc.reset();
        self.state = State::Idle;
    }

    /// Clear the modes that do not survive the end of a line (reverse
    /// video). Called by the session layer when it consumes an EOL.
    pub fn clear_line_modes(&mut self) {
        self.font.clear(FontMode::INVERSE);
    }

    /// Consume exactly one byte of the command stream. `aux1`/`aux2` are the
    /// auxiliary bytes of the enclosing transport frame; no Okimate command
    /// reads them, all arguments arrive in-stream.
    pub fn handle_byte(&mut self, byte: u8, _aux1: u8, _aux2: u8, sink: &mut dyn PageSink) {
        match self.state {
            State::Idle => self.handle_idle(byte, sink),
            State::Escape => self.handle_escape(byte, sink),
            State::Graphics => self.handle_graphics(byte, sink),
            State::Command { cmd, return_to } => self.handle_command(cmd, return_to, byte, sink),
        }
    }

    fn handle_idle(&mut self, byte: u8, sink: &mut dyn PageSink) {
        match byte {
            ESC => {
                // Clear the command record for a fresh sequence.
                self.acc.reset();
                self.state = State::Escape;
            }
            CMD_LINE_ADVANCE | CMD_DOT_TAB => {
                self.acc.reset();
                self.state = State::Command {
                    cmd: byte,
                    return_to: Return::Idle,
                };
            }
            CMD_GFX_REPEAT => {
                // The repeat command always hands control to the graphics
                // sub-machine afterwards, even when invoked directly.
                self.acc.reset();
                self.state = State::Command {
                    cmd: byte,
                    return_to: Return::Graphics,
                };
            }
            CMD_FORM_FEED => {
                sink.end_page();
                sink.new_page();
            }
            CMD_REVERSE_ON => self.font.set(FontMode::INVERSE),
            CMD_REVERSE_OFF => self.font.clear(FontMode::INVERSE),
            CMD_ALIGN_RIBBON => {
                sink.report_error(
                    ParseError::UnimplementedCommand {
                        context: "direct",
                        byte,
                    },
                    ErrorLevel::Info,
                );
                self.color_mode = true;
            }
            CMD_COLOR_EOL => {
                if self.color_mode {
                    sink.report_error(
                        ParseError::UnimplementedCommand {
                            context: "direct",
                            byte,
                        },
                        ErrorLevel::Info,
                    );
                }
            }
            _ => {
                self.font.flush(&mut self.geometry, sink);
                self.put_literal(byte, sink);
            }
        }
    }

    fn handle_escape(&mut self, byte: u8, sink: &mut dyn PageSink) {
        match byte {
            ESC_WIDE => {
                self.font.set(FontMode::EXPANDED);
                self.reset();
            }
            ESC_NORMAL => {
                self.font.clear(FontMode::EXPANDED | FontMode::COMPRESSED);
                self.reset();
            }
            ESC_FINE => {
                // Fine pitch drops wide print; combined with wide it selects
                // the bold 8.25 cpi class.
                self.font.clear(FontMode::EXPANDED);
                self.font.set(FontMode::COMPRESSED);
                self.reset();
            }
            ESC_INTL_ON => {
                self.geometry.intl = true;
                self.reset();
            }
            ESC_INTL_OFF => {
                self.geometry.intl = false;
                self.reset();
            }
            ESC_GRAPHICS => self.enter_graphics(sink),
            ESC_SIX_LPI => {
                self.geometry.line_height = 12.0;
                sink.set_line_height(self.geometry.line_height);
                self.reset();
            }
            ESC_EIGHT_LPI => {
                self.geometry.line_height = 9.0;
                sink.set_line_height(self.geometry.line_height);
                self.reset();
            }
            ESC_PERF_SKIP_OFF => {
                self.geometry.top_margin = 0.0;
                self.geometry.bottom_margin = 0.0;
                sink.set_page_margins(0.0, 0.0);
                self.reset();
            }
            ESC_PERF_SKIP_ON => {
                self.geometry.top_margin = geometry::PERF_SKIP_MARGIN;
                self.geometry.bottom_margin = geometry::PERF_SKIP_MARGIN;
                sink.set_page_margins(geometry::PERF_SKIP_MARGIN, geometry::PERF_SKIP_MARGIN);
                self.reset();
            }
            ESC_LINE_LONG => {
                self.geometry.line_length = geometry::LINE_LONG;
                sink.set_line_length(self.geometry.line_length);
                self.reset();
            }
            ESC_LINE_SHORT => {
                self.geometry.line_length = geometry::LINE_SHORT;
                sink.set_line_length(self.geometry.line_length);
                self.reset();
            }
            _ => {
                sink.report_error(
                    ParseError::UnimplementedCommand {
                        context: "ESC",
                        byte,
                    },
                    ErrorLevel::Info,
                );
                self.reset();
            }
        }
    }

    fn handle_graphics(&mut self, byte: u8, sink: &mut dyn PageSink) {
        match byte {
            CMD_GFX_END => self.exit_graphics(sink),
            CMD_GFX_REPEAT => {
                self.acc.reset();
                self.state = State::Command {
                    cmd: CMD_GFX_REPEAT,
                    return_to: Return::Graphics,
                };
            }
            _ => graphics::emit_pins(byte, sink),
        }
    }

    fn handle_command(&mut self, cmd: u8, return_to: Return, byte: u8, sink: &mut dyn PageSink) {
        match cmd {
            CMD_LINE_ADVANCE => {
                sink.add_rise(-f32::from(byte) / LINE_ADVANCE_UNIT);
                self.reset();
            }
            CMD_DOT_TAB => {
                if byte.is_ascii_digit() && self.acc.ctr < 2 {
                    self.acc.push(byte);
                    return;
                }
                if !byte.is_ascii_digit() {
                    // The terminator is consumed but contributes nothing to
                    // the column value.
                    sink.report_error(
                        ParseError::MalformedArgument {
                            command: "dot tab",
                            byte,
                        },
                        ErrorLevel::Warning,
                    );
                }
                let column = self.acc.ascii_to_int(byte);
                self.dot_tab(column, sink);
            }
            CMD_GFX_REPEAT => {
                self.acc.push(byte);
                if self.acc.ctr >= 2 {
                    let count = self.acc.arg1;
                    let data = self.acc.arg2;
                    for _ in 0..count {
                        graphics::emit_pins(data, sink);
                    }
                    self.acc.reset();
                    self.state = match return_to {
                        Return::Idle => State::Idle,
                        Return::Graphics => State::Graphics,
                    };
                }
            }
            _ => {
                // Unreachable through the dispatch table; kept for forward
                // compatibility with other printer variants.
                sink.report_error(
                    ParseError::UnimplementedCommand {
                        context: "direct",
                        byte: cmd,
                    },
                    ErrorLevel::Info,
                );
                self.reset();
            }
        }
    }

    /// Switch the output stream to the graphics typeface and start consuming
    /// pin data.
    fn enter_graphics(&mut self, sink: &mut dyn PageSink) {
        log::debug!("entering graphics mode");
        self.geometry.char_width = GFX_CHAR_WIDTH;
        sink.close_text_run();
        sink.select_graphics_typeface();
        sink.set_horizontal_scale(100.0);
        sink.set_char_width(self.geometry.char_width);
        sink.open_text_run();
        self.font.invalidate();
        self.text_mode = false;
        self.state = State::Graphics;
    }

    /// Leave graphics mode: re-request the plain black font and force a full
    /// re-emit of the text typeface directives.
    fn exit_graphics(&mut self, sink: &mut dyn PageSink) {
        log::debug!("finished graphics mode");
        self.font.invalidate();
        self.font.set_requested(FontMode::BLACK);
        self.font.flush(&mut self.geometry, sink);
        self.text_mode = true;
        self.reset();
    }

    /// Tab to dot column `column`: switch to the narrow graphics typeface,
    /// emit the blank columns, then restore the font that was committed
    /// before the tab. Columns are 1-based.
    fn dot_tab(&mut self, column: u16, sink: &mut dyn PageSink) {
        self.text_mode = false;
        self.geometry.char_width = GFX_CHAR_WIDTH;
        sink.close_text_run();
        sink.select_graphics_typeface();
        sink.set_horizontal_scale(100.0);
        sink.set_char_width(self.geometry.char_width);
        sink.open_text_run();
        for _ in 1..column {
            sink.put_char(b' ');
        }
        self.font.restore_committed();
        self.font.flush(&mut self.geometry, sink);
        self.text_mode = true;
        self.reset();
    }

    fn put_literal(&mut self, byte: u8, sink: &mut dyn PageSink) {
        if self.geometry.intl && (byte as usize) < INTL_CHARSET.len() {
            sink.put_char(INTL_CHARSET[byte as usize]);
        } else {
            sink.put_char(byte);
        }
    }
}

impl PrinterParser for OkimateParser {
    fn parse(&mut self, input: &[u8], aux1: u8, aux2: u8, sink: &mut dyn PageSink) {
        for &byte in input {
            self.handle_byte(byte, aux1, aux2, sink);
        }
    }

    /// End of job. A graphics run still open is closed so the text typeface
    /// directives end up in the document before it is finalized; a command
    /// still collecting arguments is abandoned.
    fn flush(&mut self, sink: &mut dyn PageSink) {
        match self.state {
            State::Idle => {}
            State::Graphics => self.exit_graphics(sink),
            State::Escape | State::Command { .. } => {
                log::debug!("job ended with a command in progress");
                self.reset();
            }
        }
    }
}
