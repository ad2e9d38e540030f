use periph_parser_core::{FontMode, FontTracker, PageGeometry, PageSink, Pitch};

#[derive(Default)]
struct TestSink {
    calls: Vec<String>,
}

impl PageSink for TestSink {
    fn open_text_run(&mut self) {
        self.calls.push("OpenRun".to_string());
    }

    fn close_text_run(&mut self) {
        self.calls.push("CloseRun".to_string());
    }

    fn reset_typeface(&mut self) {
        self.calls.push("TextFace".to_string());
    }

    fn select_graphics_typeface(&mut self) {
        self.calls.push("GfxFace".to_string());
    }

    fn set_horizontal_scale(&mut self, percent: f32) {
        self.calls.push(format!("Scale: {}", percent));
    }

    fn set_char_width(&mut self, width: f32) {
        self.calls.push(format!("CharWidth: {}", width));
    }

    fn set_fill_color(&mut self, c: u8, m: u8, y: u8, k: u8) {
        self.calls.push(format!("Color: {} {} {} {}", c, m, y, k));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(format!("Rect: {} {} {} {}", x, y, width, height));
    }

    fn put_char(&mut self, _byte: u8) {}
    fn put_blank_advance(&mut self) {}
    fn put_mark(&mut self, _offset: i16, _pin: u8) {}
    fn add_rise(&mut self, _delta: f32) {}
    fn end_line(&mut self) {}
    fn new_page(&mut self) {}
    fn end_page(&mut self) {}
    fn set_line_height(&mut self, _height: f32) {}
    fn set_page_margins(&mut self, _top: f32, _bottom: f32) {}
    fn set_line_length(&mut self, _length: f32) {}
}

#[test]
fn pitch_classes() {
    assert_eq!(Pitch::from_mask(0x80), Pitch::Normal);
    assert_eq!(Pitch::from_mask(0x81), Pitch::Fine);
    assert_eq!(Pitch::from_mask(0x82), Pitch::Wide);
    assert_eq!(Pitch::from_mask(0x83), Pitch::Bold);

    assert_eq!(Pitch::Normal.scale_percent(), 100.0);
    assert_eq!(Pitch::Normal.char_width(), 7.2);
    assert_eq!(Pitch::Wide.scale_percent(), 200.0);
    assert_eq!(Pitch::Wide.char_width(), 14.4);
    assert_eq!(Pitch::Fine.char_width(), 72.0 / 16.5);
    assert_eq!(Pitch::Bold.char_width(), 72.0 / 8.25);
}

#[test]
fn first_flush_emits_everything() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    assert_eq!(tracker.committed(), None);
    tracker.flush(&mut geometry, &mut sink);

    assert_eq!(
        sink.calls,
        vec![
            "CloseRun",
            "TextFace",
            "Scale: 100",
            "CharWidth: 7.2",
            "Color: 0 0 0 1",
            "OpenRun",
        ]
    );
    assert_eq!(tracker.committed(), Some(FontMode::BLACK));
}

#[test]
fn clean_flush_is_a_no_op() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    tracker.flush(&mut geometry, &mut sink);
    sink.calls.clear();
    tracker.flush(&mut geometry, &mut sink);

    assert!(sink.calls.is_empty());
}

#[test]
fn pitch_change_emits_scale_and_width_only() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    tracker.flush(&mut geometry, &mut sink);
    sink.calls.clear();

    tracker.set(FontMode::EXPANDED);
    tracker.flush(&mut geometry, &mut sink);

    assert_eq!(
        sink.calls,
        vec!["CloseRun", "Scale: 200", "CharWidth: 14.4", "OpenRun"]
    );
    assert_eq!(geometry.char_width, 14.4);
}

#[test]
fn plane_change_emits_color_only() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    tracker.flush(&mut geometry, &mut sink);
    sink.calls.clear();

    tracker.set_requested(FontMode::MAGENTA);
    tracker.flush(&mut geometry, &mut sink);

    assert_eq!(sink.calls, vec!["CloseRun", "Color: 0 1 0 0", "OpenRun"]);
}

#[test]
fn invalidate_forces_full_reemit() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    tracker.flush(&mut geometry, &mut sink);
    tracker.invalidate();
    assert_eq!(tracker.committed(), None);
    sink.calls.clear();

    tracker.flush(&mut geometry, &mut sink);

    assert_eq!(
        sink.calls,
        vec![
            "CloseRun",
            "TextFace",
            "Scale: 100",
            "CharWidth: 7.2",
            "Color: 0 0 0 1",
            "OpenRun",
        ]
    );
}

#[test]
fn restore_committed_discards_pending_request() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    tracker.flush(&mut geometry, &mut sink);
    tracker.set(FontMode::COMPRESSED);
    tracker.restore_committed();
    sink.calls.clear();

    tracker.flush(&mut geometry, &mut sink);

    // The pending fine-pitch request is gone; the committed plain font is
    // re-emitted in full.
    assert_eq!(tracker.requested(), FontMode::BLACK);
    assert!(sink.calls.contains(&"Scale: 100".to_string()));
    assert!(sink.calls.contains(&"TextFace".to_string()));
}

#[test]
fn inverse_repaints_cell_on_every_flush() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    tracker.flush(&mut geometry, &mut sink);
    tracker.set(FontMode::INVERSE);
    sink.calls.clear();

    tracker.flush(&mut geometry, &mut sink);
    let first = sink.calls.clone();
    sink.calls.clear();
    tracker.flush(&mut geometry, &mut sink);

    // Same cell directives both times even though the mask is unchanged.
    assert_eq!(sink.calls, first);
    assert!(sink.calls.contains(&"Rect: 18 0 7.2 7".to_string()));
    assert!(sink.calls.contains(&"Color: 0 0 0 0".to_string()));
}

#[test]
fn leaving_inverse_restores_fill_color() {
    let mut tracker = FontTracker::new();
    let mut geometry = PageGeometry::default();
    let mut sink = TestSink::default();

    tracker.flush(&mut geometry, &mut sink);
    tracker.set(FontMode::INVERSE);
    tracker.flush(&mut geometry, &mut sink);
    tracker.clear(FontMode::INVERSE);
    sink.calls.clear();

    tracker.flush(&mut geometry, &mut sink);

    assert_eq!(sink.calls, vec!["CloseRun", "Color: 0 0 0 1", "OpenRun"]);
}
