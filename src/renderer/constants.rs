//! Shared constants for the staff renderer (all in SVG user units).

// ── Canvas ──────────────────────────────────────────────────────────
pub(super) const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub(super) const DEFAULT_CANVAS_HEIGHT: f64 = 300.0;
pub(super) const CANVAS_BOTTOM_PADDING: f64 = 40.0;

// ── Staff ───────────────────────────────────────────────────────────
pub(super) const STAFF_LINE_COUNT: i32 = 5;
pub(super) const LEDGER_LINE_EXTEND: f64 = 5.0;

// ── Staff prefix ────────────────────────────────────────────────────
pub(super) const CLEF_X_OFFSET: f64 = 10.0;
pub(super) const TIME_SIG_X_OFFSET: f64 = 50.0;
pub(super) const TIME_SIG_FONT_SIZE: f64 = 20.0;

// ── Guides ──────────────────────────────────────────────────────────
pub(super) const GUIDE_LEFT_INSET: f64 = 80.0;
pub(super) const GUIDE_RIGHT_INSET: f64 = 20.0;
pub(super) const COLUMN_GUIDE_RIGHT_INSET: f64 = 50.0;
pub(super) const COLUMN_GUIDE_FIXED_WIDTH: f64 = 200.0;
pub(super) const COLUMN_GUIDE_ABOVE_TOP: f64 = 10.0;
pub(super) const COLUMN_GUIDE_BELOW_TOP: f64 = 120.0;

// ── Notes ───────────────────────────────────────────────────────────
pub(super) const NOTEHEAD_RX: f64 = 5.5; // notehead ellipse x-radius
pub(super) const NOTEHEAD_RY: f64 = 4.0; // notehead ellipse y-radius
pub(super) const STEM_LENGTH: f64 = 30.0;
pub(super) const STEM_WIDTH: f64 = 1.2;
pub(super) const ACCIDENTAL_GAP: f64 = 4.0;
pub(super) const ACCIDENTAL_FONT_SIZE: f64 = 14.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const NOTE_COLOR: &str = "#1a1a1a";
pub(super) const STAFF_COLOR: &str = "#555555";
pub(super) const SEMITONE_GUIDE_COLOR: &str = "#e0e0e0";
pub(super) const COLUMN_GUIDE_COLOR: &str = "#f0f0f0";

// ── Strokes ─────────────────────────────────────────────────────────
/// Line style. `class` lets a host style or hide a layer (e.g. the guides).
#[derive(Debug, Clone, Copy)]
pub(super) struct Stroke {
    pub(super) color: &'static str,
    pub(super) width: f64,
    pub(super) class: &'static str,
}

pub(super) const STAFF_STROKE: Stroke = Stroke { color: STAFF_COLOR, width: 0.8, class: "staff-line" };
pub(super) const LEDGER_STROKE: Stroke = Stroke { color: STAFF_COLOR, width: 0.8, class: "ledger-line" };
pub(super) const STEM_STROKE: Stroke = Stroke { color: NOTE_COLOR, width: STEM_WIDTH, class: "stem" };
pub(super) const SEMITONE_GUIDE_STROKE: Stroke = Stroke { color: SEMITONE_GUIDE_COLOR, width: 0.5, class: "semitone-guide" };
pub(super) const COLUMN_GUIDE_STROKE: Stroke = Stroke { color: COLUMN_GUIDE_COLOR, width: 0.5, class: "column-guide" };
