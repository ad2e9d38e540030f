//! Page geometry state for one print job.

/// Long (80-column) printable line width in points.
pub const LINE_LONG: f32 = 576.0;

/// Short (64-column) printable line width in points.
pub const LINE_SHORT: f32 = 460.8;

/// Margin reserved at the page top and bottom while perforation skip is on.
pub const PERF_SKIP_MARGIN: f32 = 72.0;

/// Mutable page geometry of a print job. Reset to the printer's power-on
/// defaults when a new document starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    /// Left page margin in points.
    pub left_margin: f32,
    /// Top page margin in points.
    pub top_margin: f32,
    /// Bottom page margin in points.
    pub bottom_margin: f32,
    /// Baseline-to-baseline distance in points.
    pub line_height: f32,
    /// Width of one character cell in points. Mutated by pitch changes.
    pub char_width: f32,
    /// Printable line width in points.
    pub line_length: f32,
    /// International character set enabled.
    pub intl: bool,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // Perforation skip is on at power-on; 6 lines per inch, 10 cpi.
        Self {
            left_margin: 18.0,
            top_margin: PERF_SKIP_MARGIN,
            bottom_margin: PERF_SKIP_MARGIN,
            line_height: 12.0,
            char_width: 7.2,
            line_length: LINE_LONG,
            intl: false,
        }
    }
}
