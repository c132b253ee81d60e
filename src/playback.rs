//! Playback schedule: when each placed note should sound.
//!
//! Built from the model's playback order against a reference time taken
//! from the synthesizer clock. Each entry captures its own frequency, so a
//! schedule stays valid after the note list is cleared:
//!   `at_seconds = reference_time + i * interval_seconds`

use serde::Serialize;

use crate::model::PitchGridModel;
use crate::pitch::NoteLength;

/// Timing for a whole played sequence.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackSchedule {
    /// Synthesizer clock value the offsets are measured from
    pub reference_time: f64,
    /// Seconds between consecutive tones
    pub interval_seconds: f64,
    pub tones: Vec<ScheduledTone>,
}

/// One tone of a played sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTone {
    /// Position in the played sequence
    pub index: usize,
    /// Insertion counter of the note this tone came from
    pub sequence: u64,
    pub midi_pitch: i32,
    pub frequency_hz: f64,
    /// Absolute start time on the synthesizer clock
    pub at_seconds: f64,
    pub length: NoteLength,
}

impl PlaybackSchedule {
    /// Schedule every note of `model` in playback order. Returns `None`
    /// when there is nothing to play.
    pub fn build(model: &PitchGridModel, reference_time: f64) -> Option<Self> {
        if model.is_empty() {
            return None;
        }

        let timing = model.config().playback;
        let tones = model
            .playback_order()
            .into_iter()
            .enumerate()
            .map(|(index, note)| ScheduledTone {
                index,
                sequence: note.sequence,
                midi_pitch: note.midi_pitch,
                frequency_hz: note.frequency_hz(),
                at_seconds: reference_time + index as f64 * timing.interval_seconds,
                length: timing.sequence_length,
            })
            .collect();

        Some(Self {
            reference_time,
            interval_seconds: timing.interval_seconds,
            tones,
        })
    }

    /// Clock time at which the last tone starts.
    pub fn last_start(&self) -> f64 {
        self.tones.last().map_or(self.reference_time, |t| t.at_seconds)
    }
}

/// Serialize a schedule to JSON.
pub fn schedule_to_json(schedule: &PlaybackSchedule) -> String {
    serde_json::to_string(schedule).unwrap_or_else(|_| "{}".to_string())
}
