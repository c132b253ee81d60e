//! The sketchpad controller: pointer clicks and the clear / play / export
//! commands, wired to a [`Renderer`] and a [`Synthesizer`].

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::config::GridConfig;
use crate::error::{ConfigError, ExportError};
use crate::input::accepts_click;
use crate::model::{Note, PitchGridModel};
use crate::playback::PlaybackSchedule;
use crate::renderer::{Renderer, DEFAULT_EXPORT_FILE_NAME};
use crate::synth::{AudioGate, AudioMode, Synthesizer};

/// One interactive staff.
pub struct Sketchpad<R, S> {
    model: PitchGridModel,
    renderer: R,
    synth: S,
    audio: AudioGate,
}

impl<R: Renderer, S: Synthesizer> Sketchpad<R, S> {
    /// Validate `config` and draw the empty staff. Audio is started lazily
    /// by the first sound.
    pub fn new(config: GridConfig, renderer: R, synth: S) -> Result<Self, ConfigError> {
        let mut pad = Self {
            model: PitchGridModel::new(config)?,
            renderer,
            synth,
            audio: AudioGate::new(),
        };
        pad.redraw();
        Ok(pad)
    }

    pub fn model(&self) -> &PitchGridModel {
        &self.model
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn synth(&self) -> &S {
        &self.synth
    }

    /// Audio state; `None` until something has tried to make a sound.
    pub fn audio_mode(&self) -> Option<AudioMode> {
        self.audio.mode()
    }

    /// Handle a pointer click. Clicks outside the staff's interactive area
    /// are ignored. Otherwise the note is added, the staff redrawn, and the
    /// note sounded once audio is ready.
    pub async fn click(&mut self, x: f64, y: f64) -> Option<Note> {
        if !accepts_click(self.model.config(), x, y) {
            debug!(x, y, "click outside staff ignored");
            return None;
        }

        let position = self.model.resolve_position(x, y);
        let note = self.model.add_note(x, y, &position).clone();
        self.redraw();

        if self.audio.ensure_ready(&self.synth).await == AudioMode::Ready {
            let length = self.model.config().playback.click_length;
            if let Err(e) = self.synth.trigger(note.frequency_hz(), length, None) {
                error!(error = %e, midi = note.midi_pitch, %length, "failed to sound note");
            }
        }
        Some(note)
    }

    /// Remove all notes and redraw the empty staff.
    pub fn clear(&mut self) {
        let removed = self.model.len();
        self.model.clear_all();
        self.redraw();
        info!(removed, "cleared all notes");
    }

    /// Play every note in playback order, one interval apart, starting now
    /// on the synthesizer clock. Returns how many tones were scheduled.
    ///
    /// Tones carry their own frequency, so clearing or adding notes while a
    /// sequence is still sounding does not disturb it.
    pub async fn play_sequence(&mut self) -> usize {
        if self.model.is_empty() {
            return 0;
        }
        if self.audio.ensure_ready(&self.synth).await == AudioMode::Silent {
            return 0;
        }

        let Some(schedule) = PlaybackSchedule::build(&self.model, self.synth.now()) else {
            return 0;
        };

        let mut scheduled = 0;
        for tone in &schedule.tones {
            match self.synth.trigger(tone.frequency_hz, tone.length, Some(tone.at_seconds)) {
                Ok(()) => scheduled += 1,
                Err(e) => error!(error = %e, index = tone.index, "failed to schedule tone"),
            }
        }
        info!(
            scheduled,
            length = %self.model.config().playback.sequence_length,
            until = schedule.last_start(),
            "playing sequence"
        );
        scheduled
    }

    /// The current drawing as SVG, if one exists.
    pub fn export_svg(&self) -> Option<String> {
        self.renderer.export_vector()
    }

    /// Write the current drawing to `path`. Returns `Ok(false)` when there
    /// is nothing to export.
    pub fn export_to<P: AsRef<Path>>(&self, path: P) -> Result<bool, ExportError> {
        let path = path.as_ref();
        let Some(svg) = self.export_svg() else {
            return Ok(false);
        };
        std::fs::write(path, svg).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), notes = self.model.len(), "exported staff");
        Ok(true)
    }

    /// Write the current drawing into `dir` under the default file name.
    pub fn export_into_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Option<PathBuf>, ExportError> {
        let path = dir.as_ref().join(DEFAULT_EXPORT_FILE_NAME);
        Ok(self.export_to(&path)?.then_some(path))
    }

    fn redraw(&mut self) {
        if let Err(e) = self.renderer.draw_staff(self.model.config(), self.model.notes()) {
            warn!(error = %e, "staff redraw failed");
        }
    }
}
