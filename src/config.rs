//! Grid configuration: staff geometry and the policies that decide how a
//! click becomes a note.
//!
//! A `GridConfig` is fixed for the lifetime of a model. Every field has a
//! default, so a JSON document only needs to name what it changes:
//!
//! ```
//! use staffpad::GridConfig;
//!
//! let config = GridConfig::from_json_str(r#"{ "staff_top": 80.0 }"#).unwrap();
//! assert_eq!(config.staff_top, 80.0);
//! assert_eq!(config.middle_reference_pitch, 60);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pitch::NoteLength;

/// MIDI number of middle C, the reference line in every preset.
pub const MIDDLE_C: i32 = 60;

/// Largest candidate range or middle index a grid may use: the whole MIDI
/// note span.
pub const MAX_GRID_SPAN: i32 = 127;

// ═══════════════════════════════════════════════════════════════════════
// Policies
// ═══════════════════════════════════════════════════════════════════════

/// How a vertical click coordinate snaps onto the pitch grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapPolicy {
    /// Uniform grid starting at `staff_top`: `index = round(dy / step_px)`,
    /// floored at 0.
    FixedStep {
        /// Pixels between adjacent grid lines (half a staff line spacing
        /// for diatonic staves).
        step_px: f64,
        /// Grid index of the middle reference line.
        middle_index: i32,
    },
    /// A finite table of semitone candidates around the middle line; the
    /// closest one wins.
    NearestCandidate {
        /// Pixels per semitone.
        semitone_px: f64,
        /// Candidates span `-range..=range` semitones.
        range: i32,
        /// Distance from `staff_top` down to the middle reference line.
        middle_line_offset_px: f64,
    },
}

/// Where a new note lands horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// The literal click x.
    ClickX,
    /// Left-to-right columns in insertion order, ignoring click x.
    /// Spacing compresses once the row would run past the right margin.
    AutoColumn {
        /// First column, measured from `staff_left`.
        first_column_offset: f64,
        column_spacing: f64,
        /// Distance from the staff's right edge that columns must not pass.
        right_margin: f64,
    },
}

/// Key used to order notes for audible playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackOrderKey {
    InsertionOrder,
    XPosition,
}

// ═══════════════════════════════════════════════════════════════════════
// Bounds and timing
// ═══════════════════════════════════════════════════════════════════════

/// The interactive rectangle, expressed relative to the staff origin.
///
/// A click is accepted when
/// `staff_left + left_inset <= x <= staff_left + staff_width - right_inset`
/// and `staff_top - above_top <= y <= staff_top + below_top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveBounds {
    pub left_inset: f64,
    pub right_inset: f64,
    pub above_top: f64,
    pub below_top: f64,
}

impl Default for InteractiveBounds {
    fn default() -> Self {
        Self {
            left_inset: 80.0,
            right_inset: 20.0,
            above_top: 20.0,
            below_top: 150.0,
        }
    }
}

/// Sound lengths and spacing used when notes are heard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackTiming {
    /// Seconds between consecutive notes of a played sequence.
    pub interval_seconds: f64,
    /// Length of the preview tone sounded when a note is placed.
    pub click_length: NoteLength,
    /// Length of each tone in a played sequence.
    pub sequence_length: NoteLength,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            interval_seconds: 0.5,
            click_length: NoteLength::Eighth,
            sequence_length: NoteLength::Quarter,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GridConfig
// ═══════════════════════════════════════════════════════════════════════

/// Staff layout plus snapping, placement and playback policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub staff_top: f64,
    pub staff_left: f64,
    pub staff_width: f64,
    /// MIDI pitch of the middle reference line.
    pub middle_reference_pitch: i32,
    pub snap: SnapPolicy,
    pub placement: PlacementPolicy,
    pub playback_order: PlaybackOrderKey,
    pub bounds: InteractiveBounds,
    pub playback: PlaybackTiming,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::chromatic()
    }
}

impl GridConfig {
    /// Chromatic staff: 6px per semitone over ±8 semitones around C4,
    /// notes laid out in auto-advancing columns and replayed in the order
    /// they were added.
    pub fn chromatic() -> Self {
        Self {
            staff_top: 50.0,
            staff_left: 50.0,
            staff_width: 700.0,
            middle_reference_pitch: MIDDLE_C,
            snap: SnapPolicy::NearestCandidate {
                semitone_px: 6.0,
                range: 8,
                middle_line_offset_px: 80.0,
            },
            placement: PlacementPolicy::AutoColumn {
                first_column_offset: 120.0,
                column_spacing: 60.0,
                right_margin: 80.0,
            },
            playback_order: PlaybackOrderKey::InsertionOrder,
            bounds: InteractiveBounds::default(),
            playback: PlaybackTiming::default(),
        }
    }

    /// Diatonic staff: a five-line staff with 10px line spacing snapped at
    /// half-line resolution, notes kept where they were clicked and replayed
    /// left to right.
    pub fn diatonic() -> Self {
        Self {
            staff_top: 50.0,
            staff_left: 50.0,
            staff_width: 700.0,
            middle_reference_pitch: MIDDLE_C,
            snap: SnapPolicy::FixedStep {
                step_px: 5.0,
                middle_index: 4,
            },
            placement: PlacementPolicy::ClickX,
            playback_order: PlaybackOrderKey::XPosition,
            bounds: InteractiveBounds {
                left_inset: 60.0,
                right_inset: 10.0,
                above_top: 30.0,
                below_top: 70.0,
            },
            playback: PlaybackTiming::default(),
        }
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject geometry that would make snapping or layout meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("staff_top", self.staff_top)?;
        finite("staff_left", self.staff_left)?;
        positive("staff_width", self.staff_width)?;

        match self.snap {
            SnapPolicy::FixedStep { step_px, middle_index } => {
                positive("snap.step_px", step_px)?;
                if middle_index < 0 {
                    return Err(ConfigError::NegativeMiddleIndex(middle_index));
                }
                within_span("snap.middle_index", middle_index)?;
            }
            SnapPolicy::NearestCandidate {
                semitone_px,
                range,
                middle_line_offset_px,
            } => {
                positive("snap.semitone_px", semitone_px)?;
                finite("snap.middle_line_offset_px", middle_line_offset_px)?;
                if range < 0 {
                    return Err(ConfigError::NegativeRange(range));
                }
                within_span("snap.range", range)?;
            }
        }

        if let PlacementPolicy::AutoColumn {
            first_column_offset,
            column_spacing,
            right_margin,
        } = self.placement
        {
            finite("placement.first_column_offset", first_column_offset)?;
            positive("placement.column_spacing", column_spacing)?;
            finite("placement.right_margin", right_margin)?;
        }

        let b = &self.bounds;
        finite("bounds.left_inset", b.left_inset)?;
        finite("bounds.right_inset", b.right_inset)?;
        finite("bounds.above_top", b.above_top)?;
        finite("bounds.below_top", b.below_top)?;

        let interval = self.playback.interval_seconds;
        if !interval.is_finite() || interval < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "playback.interval_seconds",
                value: interval,
            });
        }
        Ok(())
    }

    /// Grid index treated as the middle reference line.
    ///
    /// Nearest-candidate grids count indices from the highest candidate, so
    /// the middle line sits `range` steps down.
    pub fn middle_index_offset(&self) -> i32 {
        match self.snap {
            SnapPolicy::FixedStep { middle_index, .. } => middle_index,
            SnapPolicy::NearestCandidate { range, .. } => range,
        }
    }

    /// Pixel distance between adjacent grid indices.
    pub fn step_px(&self) -> f64 {
        match self.snap {
            SnapPolicy::FixedStep { step_px, .. } => step_px,
            SnapPolicy::NearestCandidate { semitone_px, .. } => semitone_px,
        }
    }

    /// Y coordinate of the middle reference line.
    pub fn middle_line_y(&self) -> f64 {
        match self.snap {
            SnapPolicy::FixedStep { step_px, middle_index } => {
                self.staff_top + middle_index as f64 * step_px
            }
            SnapPolicy::NearestCandidate {
                middle_line_offset_px,
                ..
            } => self.staff_top + middle_line_offset_px,
        }
    }

    /// Y coordinate of a grid index.
    pub fn index_to_y(&self, grid_index: i32) -> f64 {
        let steps = f64::from(grid_index) - f64::from(self.middle_index_offset());
        self.middle_line_y() + steps * self.step_px()
    }

    /// MIDI pitch of a grid index.
    pub fn index_to_midi(&self, grid_index: i32) -> i32 {
        self.middle_reference_pitch
            .saturating_add(self.middle_index_offset().saturating_sub(grid_index))
    }

    /// X of the first auto-placed column, if columns are in use.
    pub fn first_column_x(&self) -> Option<f64> {
        match self.placement {
            PlacementPolicy::AutoColumn {
                first_column_offset,
                ..
            } => Some(self.staff_left + first_column_offset),
            PlacementPolicy::ClickX => None,
        }
    }

    /// Right edge of the staff.
    pub fn staff_right(&self) -> f64 {
        self.staff_left + self.staff_width
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn within_span(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value <= MAX_GRID_SPAN {
        Ok(())
    } else {
        Err(ConfigError::GridTooLarge {
            field,
            value,
            max: MAX_GRID_SPAN,
        })
    }
}
