//! Staff lines, clef, time signature, and the snap/column guides.

use crate::config::{GridConfig, PlacementPolicy, SnapPolicy};
use crate::grid::candidate_iter;
use super::constants::*;
use super::svg_builder::SvgBuilder;

/// Vertical geometry of the five-line staff, centred on the middle
/// reference line. Staff lines sit every two grid steps.
#[derive(Debug, Clone, Copy)]
pub(super) struct StaffGeometry {
    pub(super) top_line_y: f64,
    pub(super) bottom_line_y: f64,
    pub(super) line_spacing: f64,
    pub(super) middle_y: f64,
}

impl StaffGeometry {
    pub(super) fn of(config: &GridConfig) -> Self {
        let line_spacing = 2.0 * config.step_px();
        let middle_y = config.middle_line_y();
        let half = (STAFF_LINE_COUNT / 2) as f64 * line_spacing;
        Self {
            top_line_y: middle_y - half,
            bottom_line_y: middle_y + half,
            line_spacing,
            middle_y,
        }
    }

    pub(super) fn is_finite(&self) -> bool {
        self.top_line_y.is_finite() && self.bottom_line_y.is_finite() && self.line_spacing.is_finite()
    }
}

pub(super) fn render_staff_lines(svg: &mut SvgBuilder, x1: f64, x2: f64, staff: &StaffGeometry) {
    for i in 0..STAFF_LINE_COUNT {
        let y = staff.top_line_y + i as f64 * staff.line_spacing;
        svg.line(x1, y, x2, y, STAFF_STROKE);
    }
}

/// Treble clef glyph, sized to the staff height.
pub(super) fn render_treble_clef(svg: &mut SvgBuilder, x: f64, staff: &StaffGeometry) {
    let height = staff.bottom_line_y - staff.top_line_y;
    // the glyph's baseline sits a little below the bottom line
    let baseline = staff.bottom_line_y + staff.line_spacing * 0.6;
    svg.glyph(x, baseline, "\u{1D11E}", height * 1.6, false, "start");
}

pub(super) fn render_time_signature(svg: &mut SvgBuilder, x: f64, staff: &StaffGeometry, beats: u32, beat_type: u32) {
    let upper = staff.middle_y - 2.0;
    let lower = staff.bottom_line_y - 2.0;
    svg.glyph(x, upper, &beats.to_string(), TIME_SIG_FONT_SIZE, true, "middle");
    svg.glyph(x, lower, &beat_type.to_string(), TIME_SIG_FONT_SIZE, true, "middle");
}

/// Faint lines through the odd semitone positions of a chromatic grid,
/// i.e. the ones that fall between staff lines.
pub(super) fn render_semitone_guides(svg: &mut SvgBuilder, config: &GridConfig) {
    if !matches!(config.snap, SnapPolicy::NearestCandidate { .. }) {
        return;
    }
    let x1 = config.staff_left + GUIDE_LEFT_INSET;
    let x2 = config.staff_right() - GUIDE_RIGHT_INSET;
    for candidate in candidate_iter(config).filter(|c| c.semitone_offset % 2 != 0) {
        svg.line(x1, candidate.y, x2, candidate.y, SEMITONE_GUIDE_STROKE);
    }
}

/// Faint verticals where auto-placed columns will land, spanning a fixed
/// band from just above `staff_top`.
pub(super) fn render_column_guides(svg: &mut SvgBuilder, config: &GridConfig) {
    let PlacementPolicy::AutoColumn {
        first_column_offset,
        column_spacing,
        ..
    } = config.placement
    else {
        return;
    };

    let y1 = config.staff_top - COLUMN_GUIDE_ABOVE_TOP;
    let y2 = config.staff_top + COLUMN_GUIDE_BELOW_TOP;

    let first_x = config.staff_left + first_column_offset;
    let limit_x = config.staff_right() - COLUMN_GUIDE_RIGHT_INSET;
    let usable = (config.staff_width - COLUMN_GUIDE_FIXED_WIDTH).max(0.0);
    let max_columns = (usable / column_spacing).floor() as usize + 1;

    for i in 0..max_columns {
        let x = first_x + i as f64 * column_spacing;
        if x < limit_x {
            svg.line(x, y1, x, y2, COLUMN_GUIDE_STROKE);
        }
    }
}
