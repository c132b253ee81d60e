//! Pitch-grid properties across both snap policies.

use pretty_assertions::assert_eq;
use staffpad::grid::candidates;
use staffpad::{
    midi_to_frequency, midi_to_pitch_label, resolve_position, GridConfig, PitchGridModel,
    PlacementPolicy, PlaybackOrderKey, SnapPolicy,
};

fn configs() -> Vec<GridConfig> {
    let mut wide = GridConfig::chromatic();
    wide.snap = SnapPolicy::NearestCandidate {
        semitone_px: 4.0,
        range: 24,
        middle_line_offset_px: 120.0,
    };
    vec![GridConfig::chromatic(), GridConfig::diatonic(), wide]
}

#[test]
fn every_note_satisfies_pitch_invariant() {
    for config in configs() {
        let mut model = PitchGridModel::new(config.clone()).unwrap();
        let mut y = -50.0;
        while y < 300.0 {
            let position = model.resolve_position(250.0, y);
            model.add_note(250.0, y, &position);
            y += 1.7;
        }
        let middle = config.middle_index_offset();
        for note in model.notes() {
            assert_eq!(
                note.midi_pitch,
                config.middle_reference_pitch + (middle - note.grid_index)
            );
            assert_eq!(note.semitone_offset, middle - note.grid_index);
            assert_eq!(note.frequency_hz(), midi_to_frequency(note.midi_pitch));
        }
    }
}

#[test]
fn snapped_positions_land_on_grid_lines() {
    for config in configs() {
        let step = config.step_px();
        for i in 0..300 {
            let y = i as f64 * 0.9 - 20.0;
            let pos = resolve_position(&config, 0.0, y);
            assert_eq!(pos.y, config.index_to_y(pos.grid_index));
            let steps = (pos.y - config.middle_line_y()) / step;
            assert!((steps - steps.round()).abs() < 1e-9);
        }
    }
}

#[test]
fn nearest_candidate_matches_brute_force() {
    let config = GridConfig::chromatic();
    let table = candidates(&config);
    for i in 0..500 {
        let y = i as f64 * 0.37;
        let pos = resolve_position(&config, 0.0, y);
        let best = table
            .iter()
            .map(|c| (c.y - y).abs())
            .fold(f64::INFINITY, f64::min);
        assert!(((pos.y - y).abs() - best).abs() < 1e-9, "y = {y}");
    }
}

#[test]
fn custom_reference_pitch_shifts_everything() {
    let mut config = GridConfig::diatonic();
    config.middle_reference_pitch = 71; // B4 on the middle line
    let mut model = PitchGridModel::new(config).unwrap();
    let position = model.resolve_position(200.0, 70.0);
    assert_eq!(model.add_note(200.0, 70.0, &position).midi_pitch, 71);
}

#[test]
fn playback_order_is_stable_under_reordered_inserts() {
    let mut config = GridConfig::diatonic();
    config.playback_order = PlaybackOrderKey::XPosition;
    config.placement = PlacementPolicy::ClickX;

    let clicks = [(300.0, 50.0), (150.0, 60.0), (450.0, 70.0), (220.0, 80.0)];
    let pitches_for = |order: &[(f64, f64)]| {
        let mut model = PitchGridModel::new(config.clone()).unwrap();
        for &(x, y) in order {
            let position = model.resolve_position(x, y);
            model.add_note(x, y, &position);
        }
        model
            .playback_order()
            .iter()
            .map(|n| n.midi_pitch)
            .collect::<Vec<_>>()
    };

    let forward = pitches_for(&clicks);
    let mut swapped = clicks;
    swapped.swap(0, 2);
    assert_eq!(forward, pitches_for(&swapped));
    assert_eq!(forward, vec![62, 58, 64, 60]);
}

#[test]
fn labels_across_octaves() {
    let labels: Vec<String> = (57..=72).map(|m| midi_to_pitch_label(m).to_string()).collect();
    assert_eq!(
        labels,
        vec![
            "A3", "A#3", "B3", "C4", "C#4", "D4", "D#4", "E4", "F4", "F#4", "G4", "G#4", "A4",
            "A#4", "B4", "C5"
        ]
    );
}
