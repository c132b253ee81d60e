//! Pitch arithmetic: MIDI numbers, equal-tempered frequencies, pitch
//! labels, and the symbolic note lengths handed to a synthesizer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Frequency of A4 in Hz.
pub const A4_FREQUENCY: f64 = 440.0;
/// MIDI number of A4.
pub const A4_MIDI: i32 = 69;
pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Chromatic pitch-class names, sharps only.
const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert a MIDI note number to its equal-tempered frequency (A4 = 440 Hz).
///
/// Defined for every integer, including numbers outside 0..=127.
pub fn midi_to_frequency(midi: i32) -> f64 {
    A4_FREQUENCY * 2f64.powf((midi - A4_MIDI) as f64 / SEMITONES_PER_OCTAVE as f64)
}

/// Pitch class and octave of a MIDI note, with 60 = C4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PitchLabel {
    /// Pitch class name: C, C#, D … B
    pub name: &'static str,
    /// Octave number (middle C = 4)
    pub octave: i32,
}

impl PitchLabel {
    /// Lower-case `name/octave` key, the form notation engravers accept
    /// (e.g. `c#/4`).
    pub fn notation_key(&self) -> String {
        format!("{}/{}", self.name.to_ascii_lowercase(), self.octave)
    }
}

impl fmt::Display for PitchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// Label a MIDI note number. Octaves floor toward negative infinity, so
/// MIDI 0 is C-1 and MIDI -1 is B-2.
pub fn midi_to_pitch_label(midi: i32) -> PitchLabel {
    let class = midi.rem_euclid(SEMITONES_PER_OCTAVE) as usize;
    PitchLabel {
        name: PITCH_CLASS_NAMES[class],
        octave: midi.div_euclid(SEMITONES_PER_OCTAVE) - 1,
    }
}

/// Symbolic note length passed to a synthesizer.
///
/// Serialized as its transport token ("8n", "4n" …); the long names are
/// still accepted when reading a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteLength {
    #[serde(rename = "16n", alias = "sixteenth")]
    Sixteenth,
    #[serde(rename = "8n", alias = "eighth")]
    Eighth,
    #[serde(rename = "4n", alias = "quarter")]
    Quarter,
    #[serde(rename = "2n", alias = "half")]
    Half,
    #[serde(rename = "1n", alias = "whole")]
    Whole,
}

impl NoteLength {
    /// Transport notation token ("8n" for an eighth, "4n" for a quarter …).
    pub fn token(self) -> &'static str {
        match self {
            NoteLength::Sixteenth => "16n",
            NoteLength::Eighth => "8n",
            NoteLength::Quarter => "4n",
            NoteLength::Half => "2n",
            NoteLength::Whole => "1n",
        }
    }
}

impl fmt::Display for NoteLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn reference_frequencies() {
        assert!(close(midi_to_frequency(69), 440.0));
        assert!(close(midi_to_frequency(60), 261.63));
        assert!(close(midi_to_frequency(72), 523.25));
        assert!(close(midi_to_frequency(48), 130.81));
    }

    #[test]
    fn frequency_matches_offset_formula() {
        for k in -24..=24 {
            let expected = 440.0 * 2f64.powf((k - 9) as f64 / 12.0);
            assert!((midi_to_frequency(60 + k) - expected).abs() < 1e-9, "k = {k}");
        }
    }

    #[test]
    fn octave_doubles_frequency() {
        for midi in [-30, -1, 0, 21, 60, 108] {
            let ratio = midi_to_frequency(midi + 12) / midi_to_frequency(midi);
            assert!((ratio - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(midi_to_pitch_label(60), PitchLabel { name: "C", octave: 4 });
        assert_eq!(midi_to_pitch_label(61), PitchLabel { name: "C#", octave: 4 });
        assert_eq!(midi_to_pitch_label(72), PitchLabel { name: "C", octave: 5 });
        assert_eq!(midi_to_pitch_label(57), PitchLabel { name: "A", octave: 3 });
        assert_eq!(midi_to_pitch_label(0), PitchLabel { name: "C", octave: -1 });
        assert_eq!(midi_to_pitch_label(-1), PitchLabel { name: "B", octave: -2 });
    }

    #[test]
    fn label_formats() {
        let label = midi_to_pitch_label(66);
        assert_eq!(label.to_string(), "F#4");
        assert_eq!(label.notation_key(), "f#/4");
    }

    #[test]
    fn note_lengths_use_transport_tokens() {
        assert_eq!(NoteLength::Eighth.to_string(), "8n");
        assert_eq!(serde_json::to_string(&NoteLength::Quarter).unwrap(), r#""4n""#);
        assert_eq!(serde_json::from_str::<NoteLength>(r#""16n""#).unwrap(), NoteLength::Sixteenth);
        assert_eq!(serde_json::from_str::<NoteLength>(r#""half""#).unwrap(), NoteLength::Half);
    }
}
