//! Note model: the placed notes and the grid they were placed on.
//!
//! `PitchGridModel` owns one `GridConfig` and an append-only list of
//! `Note`s. It performs no I/O; [`crate::Sketchpad`] wires it to a renderer
//! and a synthesizer.

use serde::Serialize;
use tracing::debug;

use crate::config::{GridConfig, PlacementPolicy, PlaybackOrderKey};
use crate::error::ConfigError;
use crate::grid::{self, Candidate, GridPosition};
use crate::pitch::{midi_to_frequency, midi_to_pitch_label, PitchLabel};

/// A note placed on the staff. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// Draw x
    pub x: f64,
    /// Draw y (snapped)
    pub y: f64,
    /// Grid index at creation time
    pub grid_index: i32,
    /// Signed semitones from the middle reference line
    pub semitone_offset: i32,
    /// MIDI note number (middle C = 60)
    pub midi_pitch: i32,
    /// Monotonic insertion counter, restarted by a clear
    pub sequence: u64,
    /// Number of notes on the staff when this one was added
    pub column: usize,
}

impl Note {
    /// Equal-tempered frequency, derived from `midi_pitch` on every call.
    pub fn frequency_hz(&self) -> f64 {
        midi_to_frequency(self.midi_pitch)
    }

    pub fn pitch_label(&self) -> PitchLabel {
        midi_to_pitch_label(self.midi_pitch)
    }
}

/// JSON view of a note with its derived values filled in, for hosts that
/// sound or label notes themselves.
#[derive(Debug, Clone, Serialize)]
pub struct NoteJson<'a> {
    #[serde(flatten)]
    pub note: &'a Note,
    pub frequency_hz: f64,
    /// e.g. "C#4"
    pub pitch: String,
    /// e.g. "c#/4"
    pub notation_key: String,
}

impl<'a> From<&'a Note> for NoteJson<'a> {
    fn from(note: &'a Note) -> Self {
        let label = note.pitch_label();
        Self {
            note,
            frequency_hz: note.frequency_hz(),
            pitch: label.to_string(),
            notation_key: label.notation_key(),
        }
    }
}

/// Owns the grid configuration and the ordered note list.
#[derive(Debug, Clone)]
pub struct PitchGridModel {
    config: GridConfig,
    /// Snap targets, built once from `config`
    candidates: Vec<Candidate>,
    notes: Vec<Note>,
    next_sequence: u64,
}

impl PitchGridModel {
    /// Create an empty model. The configuration is validated once here.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            candidates: grid::candidates(&config),
            config,
            notes: Vec::new(),
            next_sequence: 0,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Grid lines a click can snap to, lowest pitch first.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Snap a click onto this model's grid.
    pub fn resolve_position(&self, click_x: f64, click_y: f64) -> GridPosition {
        grid::resolve_in_table(&self.config, &self.candidates, click_x, click_y)
    }

    /// Append a note for a resolved position and return it.
    ///
    /// `click_x` is used directly under click-x placement and ignored under
    /// auto-column placement. `click_y` is only kept for the log; the note
    /// sits on the snapped y of `position`.
    pub fn add_note(&mut self, click_x: f64, click_y: f64, position: &GridPosition) -> &Note {
        let column = self.notes.len();
        let note = Note {
            x: self.place_x(click_x),
            y: position.y,
            grid_index: position.grid_index,
            semitone_offset: self.config.middle_index_offset().saturating_sub(position.grid_index),
            midi_pitch: self.config.index_to_midi(position.grid_index),
            sequence: self.next_sequence,
            column,
        };
        self.next_sequence += 1;

        debug!(
            column,
            midi = note.midi_pitch,
            x = note.x,
            y = note.y,
            click_y,
            "added note {}",
            note.pitch_label()
        );
        self.notes.push(note);
        &self.notes[column]
    }

    /// Remove every note. The grid configuration is untouched.
    pub fn clear_all(&mut self) {
        self.notes.clear();
        self.next_sequence = 0;
    }

    /// Notes in the order they should be heard: a stable sort of the note
    /// list by the configured key. The stored list is not reordered.
    pub fn playback_order(&self) -> Vec<&Note> {
        let mut ordered: Vec<&Note> = self.notes.iter().collect();
        match self.config.playback_order {
            PlaybackOrderKey::InsertionOrder => ordered.sort_by_key(|n| n.sequence),
            PlaybackOrderKey::XPosition => ordered.sort_by(|a, b| a.x.total_cmp(&b.x)),
        }
        ordered
    }

    fn place_x(&self, click_x: f64) -> f64 {
        match self.config.placement {
            PlacementPolicy::ClickX => click_x,
            PlacementPolicy::AutoColumn {
                first_column_offset,
                column_spacing,
                right_margin,
            } => {
                let count = self.notes.len() as f64;
                let first_x = self.config.staff_left + first_column_offset;
                let max_x = self.config.staff_right() - right_margin;
                let x = first_x + count * column_spacing;
                if x > max_x {
                    // Past the right edge the row squeezes instead of wrapping.
                    let compressed = column_spacing.min((max_x - first_x) / (count + 1.0));
                    first_x + count * compressed
                } else {
                    x
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapPolicy;
    use pretty_assertions::assert_eq;

    fn click(model: &mut PitchGridModel, x: f64, y: f64) -> Note {
        let position = model.resolve_position(x, y);
        model.add_note(x, y, &position).clone()
    }

    #[test]
    fn offsets_map_to_midi_in_insertion_order() {
        let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
        let middle = model.config().middle_line_y();
        for offset in [0, 2, -3] {
            click(&mut model, 300.0, middle - offset as f64 * 6.0);
        }
        let pitches: Vec<i32> = model.playback_order().iter().map(|n| n.midi_pitch).collect();
        assert_eq!(pitches, vec![60, 62, 57]);
    }

    #[test]
    fn midi_follows_grid_index() {
        let mut model = PitchGridModel::new(GridConfig::diatonic()).unwrap();
        let note = click(&mut model, 200.0, 50.0);
        assert_eq!(note.grid_index, 0);
        assert_eq!(note.midi_pitch, 64);
        let note = click(&mut model, 200.0, 90.0);
        assert_eq!(note.grid_index, 8);
        assert_eq!(note.midi_pitch, 56);
        assert_eq!(note.semitone_offset, -4);
    }

    #[test]
    fn add_grows_by_one_and_keeps_earlier_notes() {
        let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
        let mut previous: Vec<Note> = Vec::new();
        for i in 0..20 {
            click(&mut model, 300.0, 90.0 + i as f64 * 4.0);
            assert_eq!(model.len(), previous.len() + 1);
            assert_eq!(&model.notes()[..previous.len()], previous.as_slice());
            previous = model.notes().to_vec();
        }
    }

    #[test]
    fn frequency_is_derived() {
        let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
        let middle = model.config().middle_line_y();
        let note = click(&mut model, 0.0, middle);
        assert!((note.frequency_hz() - 261.63).abs() < 0.01);
        assert_eq!(note.pitch_label().to_string(), "C4");
    }

    #[test]
    fn auto_columns_advance_then_compress() {
        let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
        // first_x = 170, max_x = 50 + 700 - 80 = 670
        let xs: Vec<f64> = (0..12).map(|_| click(&mut model, 999.0, 130.0).x).collect();
        assert_eq!(&xs[..9], &[170.0, 230.0, 290.0, 350.0, 410.0, 470.0, 530.0, 590.0, 650.0]);
        // column 9 would be 710 > 670: spacing becomes 500 / 10 = 50
        assert_eq!(xs[9], 620.0);
        // column 10: 500 / 11 per column
        assert!((xs[10] - (170.0 + 10.0 * 500.0 / 11.0)).abs() < 1e-9);
        assert!(xs[11] <= 670.0);
    }

    #[test]
    fn click_x_placement_keeps_click() {
        let mut model = PitchGridModel::new(GridConfig::diatonic()).unwrap();
        assert_eq!(click(&mut model, 321.5, 70.0).x, 321.5);
    }

    #[test]
    fn clear_empties_and_restarts_sequence() {
        let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
        click(&mut model, 0.0, 130.0);
        click(&mut model, 0.0, 124.0);
        let config_before = model.config().clone();
        model.clear_all();
        assert!(model.is_empty());
        assert!(model.playback_order().is_empty());
        assert_eq!(model.config(), &config_before);

        let note = click(&mut model, 0.0, 130.0);
        assert_eq!(note.sequence, 0);
        assert_eq!(note.column, 0);
        assert_eq!(note.x, 170.0);
    }

    #[test]
    fn x_order_is_stable_and_leaves_list_alone() {
        let mut model = PitchGridModel::new(GridConfig::diatonic()).unwrap();
        click(&mut model, 400.0, 60.0);
        click(&mut model, 200.0, 70.0);
        click(&mut model, 400.0, 80.0);
        click(&mut model, 300.0, 90.0);

        let order: Vec<u64> = model.playback_order().iter().map(|n| n.sequence).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);

        let stored: Vec<u64> = model.notes().iter().map(|n| n.sequence).collect();
        assert_eq!(stored, vec![0, 1, 2, 3]);
    }

    #[test]
    fn candidate_table_is_built_once_per_model() {
        let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
        assert_eq!(model.candidates().len(), 17);
        assert_eq!(model.candidates(), grid::candidates(model.config()).as_slice());

        let note = click(&mut model, 300.0, 119.0);
        assert_eq!(note.midi_pitch, 62);
        assert_eq!(model.candidates().len(), 17);
    }

    #[test]
    fn oversized_range_is_rejected_before_any_table_is_built() {
        let mut config = GridConfig::chromatic();
        config.snap = SnapPolicy::NearestCandidate {
            semitone_px: 6.0,
            range: 1_500_000_000,
            middle_line_offset_px: 80.0,
        };
        assert!(matches!(
            PitchGridModel::new(config),
            Err(ConfigError::GridTooLarge { field: "snap.range", .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GridConfig::diatonic();
        config.snap = SnapPolicy::FixedStep { step_px: -1.0, middle_index: 4 };
        assert!(PitchGridModel::new(config).is_err());
    }
}
