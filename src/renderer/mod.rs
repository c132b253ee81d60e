//! Staff renderer: draws the grid and the placed notes as SVG.
//!
//! Every draw is a full redraw: staff lines, clef, 4/4 signature, guides,
//! then each note. A note that cannot be drawn is skipped with a warning so
//! the rest of the staff still appears.

mod constants;
mod notes;
mod staff;
mod svg_builder;

use tracing::{debug, warn};

use crate::config::GridConfig;
use crate::error::RenderError;
use crate::grid::candidate_iter;
use crate::model::Note;
use constants::*;
use notes::render_note;
use staff::*;
use svg_builder::SvgBuilder;

/// File name used when a drawing is exported without an explicit path.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "chromatic-staff-notation.svg";

/// Something that can show the staff and hand back a vector image of it.
pub trait Renderer {
    /// Redraw the staff and all `notes` from scratch.
    fn draw_staff(&mut self, config: &GridConfig, notes: &[Note]) -> Result<(), RenderError>;

    /// The current drawing as an SVG document; `None` if nothing has been
    /// drawn yet.
    fn export_vector(&self) -> Option<String>;
}

/// Renderer that keeps the latest drawing as an SVG string.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    width: f64,
    height: f64,
    current: Option<String>,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }

    /// Minimum canvas size; the canvas grows to fit the staff if needed.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            current: None,
        }
    }
}

impl Renderer for SvgRenderer {
    fn draw_staff(&mut self, config: &GridConfig, notes: &[Note]) -> Result<(), RenderError> {
        let svg = render_staff_to_svg(config, notes, self.width, self.height)?;
        debug!(notes = notes.len(), bytes = svg.len(), "staff redrawn");
        self.current = Some(svg);
        Ok(())
    }

    fn export_vector(&self) -> Option<String> {
        self.current.clone()
    }
}

/// Render a staff with `notes` into a complete SVG string.
///
/// `width` and `height` are minimums: the canvas is enlarged to contain the
/// staff and the lowest grid line.
pub fn render_staff_to_svg(
    config: &GridConfig,
    notes: &[Note],
    width: f64,
    height: f64,
) -> Result<String, RenderError> {
    let staff = StaffGeometry::of(config);
    if !staff.is_finite() || staff.line_spacing <= 0.0 {
        return Err(RenderError::Geometry(format!(
            "line spacing {} around y {}",
            staff.line_spacing, staff.middle_y
        )));
    }

    let lowest_line = candidate_iter(config)
        .next()
        .map_or(staff.bottom_line_y, |c| c.y)
        .max(staff.bottom_line_y);
    let width = width.max(config.staff_right() + COLUMN_GUIDE_RIGHT_INSET);
    let height = height.max(lowest_line + CANVAS_BOTTOM_PADDING);

    let mut svg = SvgBuilder::new(width, height);
    svg.rect(0.0, 0.0, width, height, "white");

    render_semitone_guides(&mut svg, config);
    render_column_guides(&mut svg, config);
    render_staff_lines(&mut svg, config.staff_left, config.staff_right(), &staff);
    render_treble_clef(&mut svg, config.staff_left + CLEF_X_OFFSET, &staff);
    render_time_signature(&mut svg, config.staff_left + TIME_SIG_X_OFFSET, &staff, 4, 4);

    for note in notes {
        if let Err(e) = render_note(&mut svg, note, &staff) {
            warn!(error = %e, "skipping note");
        }
    }

    Ok(svg.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PitchGridModel;
    use crate::SnapPolicy;

    fn note_at(x: f64, y: f64, midi: i32, sequence: u64) -> Note {
        Note {
            x,
            y,
            grid_index: 0,
            semitone_offset: 0,
            midi_pitch: midi,
            sequence,
            column: sequence as usize,
        }
    }

    #[test]
    fn empty_staff_has_lines_and_no_noteheads() {
        let svg = render_staff_to_svg(&GridConfig::chromatic(), &[], 800.0, 300.0).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("\u{1D11E}"));
        assert!(!svg.contains("<ellipse"));
        assert_eq!(svg.matches(STAFF_COLOR).count(), 5);
    }

    #[test]
    fn chromatic_guides_on_odd_offsets() {
        let svg = render_staff_to_svg(&GridConfig::chromatic(), &[], 800.0, 300.0).unwrap();
        // offsets -7, -5 … 7
        assert_eq!(svg.matches(SEMITONE_GUIDE_COLOR).count(), 8);
        // (700 - 200) / 60 + 1 = 9 columns, all left of 700
        assert_eq!(svg.matches(COLUMN_GUIDE_COLOR).count(), 9);
    }

    #[test]
    fn column_guides_span_fixed_band_from_staff_top() {
        let svg = render_staff_to_svg(&GridConfig::chromatic(), &[], 800.0, 300.0).unwrap();
        let guides: Vec<&str> = svg.lines().filter(|l| l.contains("column-guide")).collect();
        assert_eq!(guides.len(), 9);
        assert!(guides.iter().all(|l| l.contains(r#"y1="40.0""#) && l.contains(r#"y2="170.0""#)));
        assert!(guides[0].contains(r#"x1="170.0""#));
    }

    #[test]
    fn layers_are_classed() {
        let svg = render_staff_to_svg(&GridConfig::chromatic(), &[], 800.0, 300.0).unwrap();
        assert!(svg.contains(r#"class="staffpad""#));
        assert_eq!(svg.matches(r#"class="staff-line""#).count(), 5);
        assert_eq!(svg.matches(r#"class="semitone-guide""#).count(), 8);
    }

    #[test]
    fn diatonic_has_no_guides() {
        let svg = render_staff_to_svg(&GridConfig::diatonic(), &[], 800.0, 300.0).unwrap();
        assert!(!svg.contains(SEMITONE_GUIDE_COLOR));
        assert!(!svg.contains(COLUMN_GUIDE_COLOR));
    }

    #[test]
    fn notes_are_drawn_with_accidentals() {
        let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
        for y in [130.0, 124.0] {
            let position = model.resolve_position(0.0, y);
            model.add_note(0.0, y, &position);
        }
        let svg = render_staff_to_svg(model.config(), model.notes(), 800.0, 300.0).unwrap();
        assert_eq!(svg.matches("<ellipse").count(), 2);
        assert!(svg.contains(r#"data-midi="60""#));
        assert!(svg.contains(r#"data-midi="61""#));
        assert_eq!(svg.matches('\u{266F}').count(), 1);
    }

    #[test]
    fn bad_note_does_not_stop_the_rest() {
        let notes = vec![
            note_at(170.0, 130.0, 60, 0),
            note_at(f64::NAN, 130.0, 60, 1),
            note_at(290.0, 118.0, 62, 2),
        ];
        let svg = render_staff_to_svg(&GridConfig::chromatic(), &notes, 800.0, 300.0).unwrap();
        assert_eq!(svg.matches("<ellipse").count(), 2);
    }

    #[test]
    fn ledger_lines_below_staff() {
        // chromatic staff lines span 106..154 at 12px spacing
        let notes = vec![note_at(200.0, 178.0, 52, 0)];
        let svg = render_staff_to_svg(&GridConfig::chromatic(), &notes, 800.0, 300.0).unwrap();
        // five staff lines plus ledgers at 166 and 178
        assert_eq!(svg.matches(STAFF_COLOR).count(), 7);
    }

    #[test]
    fn canvas_grows_to_fit_grid() {
        let mut config = GridConfig::chromatic();
        config.staff_top = 400.0;
        let svg = render_staff_to_svg(&config, &[], 800.0, 300.0).unwrap();
        assert!(svg.contains(r#"height="568""#));
    }

    #[test]
    fn degenerate_geometry_is_an_error() {
        let mut config = GridConfig::chromatic();
        config.snap = SnapPolicy::NearestCandidate {
            semitone_px: 0.0,
            range: 8,
            middle_line_offset_px: 80.0,
        };
        assert!(matches!(
            render_staff_to_svg(&config, &[], 800.0, 300.0),
            Err(RenderError::Geometry(_))
        ));
    }

    #[test]
    fn export_before_draw_is_none() {
        let mut renderer = SvgRenderer::new();
        assert!(renderer.export_vector().is_none());
        renderer.draw_staff(&GridConfig::chromatic(), &[]).unwrap();
        assert!(renderer.export_vector().is_some());
    }
}
