//! Note, accidental, stem and ledger line rendering.

use crate::error::RenderError;
use crate::model::Note;
use super::constants::*;
use super::staff::StaffGeometry;
use super::svg_builder::SvgBuilder;

/// Draw one note. Nothing is emitted for a note that cannot be placed.
pub(super) fn render_note(svg: &mut SvgBuilder, note: &Note, staff: &StaffGeometry) -> Result<(), RenderError> {
    if !note.x.is_finite() || !note.y.is_finite() {
        return Err(RenderError::NonFiniteNote {
            sequence: note.sequence,
            x: note.x,
            y: note.y,
        });
    }

    render_ledger_lines(svg, note.x, note.y, staff);

    let label = note.pitch_label();
    if label.name.ends_with('#') {
        svg.glyph(
            note.x - NOTEHEAD_RX - ACCIDENTAL_GAP,
            note.y + ACCIDENTAL_FONT_SIZE / 3.0,
            "\u{266F}",
            ACCIDENTAL_FONT_SIZE,
            false,
            "end",
        );
    }

    svg.notehead(note.x, note.y, note.midi_pitch);

    // Stems point up for notes below the middle line, down otherwise.
    if note.y > staff.middle_y {
        let sx = note.x + NOTEHEAD_RX - STEM_WIDTH / 2.0;
        svg.line(sx, note.y, sx, note.y - STEM_LENGTH, STEM_STROKE);
    } else {
        let sx = note.x - NOTEHEAD_RX + STEM_WIDTH / 2.0;
        svg.line(sx, note.y, sx, note.y + STEM_LENGTH, STEM_STROKE);
    }
    Ok(())
}

fn render_ledger_lines(svg: &mut SvgBuilder, x: f64, note_y: f64, staff: &StaffGeometry) {
    let x1 = x - NOTEHEAD_RX - LEDGER_LINE_EXTEND;
    let x2 = x + NOTEHEAD_RX + LEDGER_LINE_EXTEND;

    if note_y < staff.top_line_y {
        let mut y = staff.top_line_y - staff.line_spacing;
        while y >= note_y - 1.0 {
            svg.line(x1, y, x2, y, LEDGER_STROKE);
            y -= staff.line_spacing;
        }
    }

    if note_y > staff.bottom_line_y {
        let mut y = staff.bottom_line_y + staff.line_spacing;
        while y <= note_y + 1.0 {
            svg.line(x1, y, x2, y, LEDGER_STROKE);
            y += staff.line_spacing;
        }
    }
}
