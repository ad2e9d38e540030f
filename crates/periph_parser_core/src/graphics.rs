//! Expansion of bit-packed graphics bytes into positioned pin marks.
//!
//! A graphics byte is a 7-pin mask: bit 0 is pin 1 (top), bit 6 is pin 7.
//! Each set bit becomes one mark glyph in the graphics typeface, kerned back
//! over the blank column that leads the cell, so all pins of one byte share
//! the same horizontal position.

use crate::PageSink;

/// Number of print-head pins encoded in one graphics byte.
pub(crate) const PIN_COUNT: u8 = 7;

/// Kern between the marks of one cell, in thousandths of an em.
pub(crate) const PIN_KERN: i16 = 100;

/// Expand one graphics byte: a leading blank advance, then one positioned
/// mark per set bit, in ascending pin order.
pub(crate) fn emit_pins(byte: u8, sink: &mut dyn PageSink) {
    sink.put_blank_advance();
    for pin in 0..PIN_COUNT {
        if (byte >> pin) & 0x01 == 0x01 {
            sink.put_mark(PIN_KERN, pin + 1);
        }
    }
}
