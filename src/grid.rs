//! Mapping from pixel coordinates onto the discrete pitch grid.
//!
//! Every input maps to some grid line; nothing here can fail. Whether a
//! click should be mapped at all is decided by [`crate::input`].

use serde::Serialize;

use crate::config::{GridConfig, SnapPolicy};
use crate::pitch::midi_to_frequency;

/// A click snapped onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPosition {
    /// Click x (placement policy may override it when the note is added)
    pub x: f64,
    /// Snapped y, always on a grid line
    pub y: f64,
    /// Steps from the top of the grid
    pub grid_index: i32,
    /// Signed semitones from the middle reference line (positive = higher)
    pub semitone_offset: i32,
}

/// One grid line a click can snap to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub grid_index: i32,
    pub semitone_offset: i32,
    pub y: f64,
    pub midi_pitch: i32,
    pub frequency_hz: f64,
}

/// Every grid line a position can snap to, lowest pitch first.
///
/// For nearest-candidate grids this is the candidate table itself. A
/// fixed-step grid has no lower bound in principle; the lines returned run
/// from index 0 down to twice the middle index, which covers the staff and
/// the same span of ledger positions below the middle as above it.
pub fn candidate_iter(config: &GridConfig) -> impl Iterator<Item = Candidate> + '_ {
    let middle = config.middle_index_offset();
    let (lowest, highest) = match config.snap {
        SnapPolicy::NearestCandidate { range, .. } => (-range, range),
        SnapPolicy::FixedStep { middle_index, .. } => (-middle_index, middle_index),
    };

    (lowest..=highest).map(move |semitone_offset| {
        let grid_index = middle.saturating_sub(semitone_offset);
        let midi_pitch = config.index_to_midi(grid_index);
        Candidate {
            grid_index,
            semitone_offset,
            y: config.index_to_y(grid_index),
            midi_pitch,
            frequency_hz: midi_to_frequency(midi_pitch),
        }
    })
}

/// [`candidate_iter`] collected into a table.
pub fn candidates(config: &GridConfig) -> Vec<Candidate> {
    candidate_iter(config).collect()
}

/// Snap a click to the grid according to the configured snap policy.
pub fn resolve_position(config: &GridConfig, click_x: f64, click_y: f64) -> GridPosition {
    snap(config, candidate_iter(config), click_x, click_y)
}

/// Like [`resolve_position`], scanning a table built earlier by
/// [`candidates`] for the same configuration.
pub fn resolve_in_table(config: &GridConfig, table: &[Candidate], click_x: f64, click_y: f64) -> GridPosition {
    snap(config, table.iter().copied(), click_x, click_y)
}

fn snap<I>(config: &GridConfig, table: I, click_x: f64, click_y: f64) -> GridPosition
where
    I: IntoIterator<Item = Candidate>,
{
    let grid_index = match config.snap {
        SnapPolicy::FixedStep { step_px, .. } => fixed_step_index(config.staff_top, step_px, click_y),
        SnapPolicy::NearestCandidate { .. } => nearest_candidate(table, click_y)
            .map_or(config.middle_index_offset(), |c| c.grid_index),
    };

    GridPosition {
        x: click_x,
        y: config.index_to_y(grid_index),
        grid_index,
        semitone_offset: config.middle_index_offset().saturating_sub(grid_index),
    }
}

fn fixed_step_index(staff_top: f64, step_px: f64, click_y: f64) -> i32 {
    let relative_y = click_y - staff_top;
    let index = (relative_y / step_px).round();
    if index.is_nan() || index <= 0.0 {
        0
    } else {
        // `as` saturates for huge values
        index as i32
    }
}

/// Closest candidate to `click_y`. Ties keep the first candidate in
/// iteration order (the lower pitch).
fn nearest_candidate<I>(table: I, click_y: f64) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut best: Option<(Candidate, f64)> = None;

    for candidate in table {
        let distance = (click_y - candidate.y).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
