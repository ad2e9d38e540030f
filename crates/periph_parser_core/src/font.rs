//! Font and rendering-mode state for the printer interpreters.
//!
//! The printer keeps two copies of its style bitmask: the mask that has been
//! committed to the output stream and the mask that incoming commands have
//! requested. Mode-change markup is only emitted when the two differ, so a
//! run of characters in one style costs a single set of directives.

use bitflags::bitflags;

use crate::{PageGeometry, PageSink};

bitflags! {
    /// Rendering-mode bitmask of the Okimate 10.
    ///
    /// The low two bits select the pitch class (see [`Pitch`]), bit 2 is
    /// reverse video, and the high nibble holds the four CMYK ribbon plane
    /// bits. A plain black text job runs with just [`FontMode::BLACK`] set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FontMode: u8 {
        const COMPRESSED = 0x01;
        const EXPANDED   = 0x02;
        const INVERSE    = 0x04;
        const CYAN       = 0x10;
        const MAGENTA    = 0x20;
        const YELLOW     = 0x40;
        const BLACK      = 0x80;
    }
}

/// Pitch bits within a [`FontMode`] mask.
const PITCH_BITS: u8 = 0x03;

/// Color plane bits within a [`FontMode`] mask.
const PLANE_BITS: u8 = 0xF0;

/// Sentinel for "no font committed yet": forces a full re-emit of typeface,
/// scale and color directives on the next flush. Set when entering or
/// leaving graphics mode.
const INVALID: FontMode = FontMode::from_bits_retain(0xFF);

/// Height of the filled cell drawn behind reverse-video characters, points.
const INVERSE_CELL_HEIGHT: f32 = 7.0;

/// Horizontal character-spacing class. Each class has a fixed glyph scale
/// and a fixed character cell width.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pitch {
    /// 10 characters per inch
    #[default]
    Normal,
    /// 16.5 characters per inch
    Fine,
    /// 5 characters per inch
    Wide,
    /// 8.25 characters per inch
    Bold,
}

impl Pitch {
    /// Decode the pitch class from the low bits of a mode mask. Unused bit
    /// combinations fall back to the normal class.
    pub fn from_mask(bits: u8) -> Self {
        match bits & PITCH_BITS {
            0 => Self::Normal,
            1 => Self::Fine,
            2 => Self::Wide,
            3 => Self::Bold,
            _ => Self::Normal,
        }
    }

    /// Horizontal glyph scale in percent.
    pub fn scale_percent(&self) -> f32 {
        match self {
            Self::Normal => 100.0,
            Self::Fine => 60.606,
            Self::Wide => 200.0,
            Self::Bold => 121.21,
        }
    }

    /// Character cell width in points.
    pub fn char_width(&self) -> f32 {
        match self {
            Self::Normal => 7.2,
            Self::Fine => 72.0 / 16.5,
            Self::Wide => 14.4,
            Self::Bold => 72.0 / 8.25,
        }
    }
}

/// Tracks the committed and the requested mode mask and diffs them into
/// sink directives.
#[derive(Debug, Clone)]
pub struct FontTracker {
    current: FontMode,
    requested: FontMode,
}

impl Default for FontTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FontTracker {
    pub fn new() -> Self {
        Self {
            current: INVALID,
            requested: FontMode::BLACK,
        }
    }

    /// Request additional mode bits. Takes effect on the next flush.
    pub fn set(&mut self, mode: FontMode) {
        self.requested.insert(mode);
    }

    /// Drop requested mode bits. Takes effect on the next flush.
    pub fn clear(&mut self, mode: FontMode) {
        self.requested.remove(mode);
    }

    /// Replace the requested mask wholesale.
    pub fn set_requested(&mut self, mode: FontMode) {
        self.requested = mode;
    }

    /// Forget the committed mask, forcing a full re-emit on the next flush.
    pub fn invalidate(&mut self) {
        self.current = INVALID;
    }

    /// Discard pending requests and re-request the committed mask, then
    /// invalidate it. The next flush re-emits the directives for the font
    /// that was active before a graphics interlude.
    pub fn restore_committed(&mut self) {
        self.requested = self.current;
        self.current = INVALID;
    }

    pub fn requested(&self) -> FontMode {
        self.requested
    }

    /// The mask committed to the output stream, or `None` while invalidated.
    pub fn committed(&self) -> Option<FontMode> {
        if self.current == INVALID {
            None
        } else {
            Some(self.current)
        }
    }

    /// Diff the requested mask against the committed one and emit the
    /// directives for whatever changed, in this order: typeface reset (only
    /// after invalidation), glyph scale and cell width (pitch change), fill
    /// color (plane change, or reverse video switching off), and the filled
    /// character cell when reverse video is on. No-op when nothing changed
    /// and reverse video is off.
    pub fn flush(&mut self, geometry: &mut PageGeometry, sink: &mut dyn PageSink) {
        if self.current == self.requested && !self.requested.contains(FontMode::INVERSE) {
            return;
        }

        sink.close_text_run();

        if self.current == INVALID {
            sink.reset_typeface();
        }

        if (self.current.bits() ^ self.requested.bits()) & PITCH_BITS != 0 {
            let pitch = Pitch::from_mask(self.requested.bits());
            sink.set_horizontal_scale(pitch.scale_percent());
            geometry.char_width = pitch.char_width();
            sink.set_char_width(geometry.char_width);
        }

        let leaving_inverse =
            self.current.contains(FontMode::INVERSE) && !self.requested.contains(FontMode::INVERSE);
        if (self.current.bits() ^ self.requested.bits()) & PLANE_BITS != 0 || leaving_inverse {
            self.emit_plane_color(sink);
        }

        self.current = self.requested;

        if self.current.contains(FontMode::INVERSE) {
            // Paint the cell in the ribbon color, then reset the fill so the
            // glyph itself knocks out of it.
            self.emit_plane_color(sink);
            let (x, y) = sink.pen();
            sink.fill_rect(
                x + geometry.left_margin,
                y,
                geometry.char_width,
                INVERSE_CELL_HEIGHT,
            );
            sink.set_fill_color(0, 0, 0, 0);
        }

        sink.open_text_run();
    }

    fn emit_plane_color(&self, sink: &mut dyn PageSink) {
        let m = self.requested;
        sink.set_fill_color(
            m.contains(FontMode::CYAN) as u8,
            m.contains(FontMode::MAGENTA) as u8,
            m.contains(FontMode::YELLOW) as u8,
            m.contains(FontMode::BLACK) as u8,
        );
    }
}
