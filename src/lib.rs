//! staffpad: click-to-compose staff sketchpad core.
//!
//! Maps pointer clicks on a drawn staff onto a discrete pitch grid, keeps
//! the ordered list of placed notes, renders the staff as SVG and produces
//! playback schedules for a synthesizer.
//!
//! # Example
//! ```
//! use staffpad::{GridConfig, PitchGridModel};
//!
//! let mut model = PitchGridModel::new(GridConfig::chromatic()).unwrap();
//! let position = model.resolve_position(300.0, 118.0);
//! let note = model.add_note(300.0, 118.0, &position);
//! assert_eq!(note.midi_pitch, 62);
//! assert_eq!(note.pitch_label().to_string(), "D4");
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod model;
pub mod pitch;
pub mod playback;
pub mod renderer;
pub mod sketchpad;
pub mod synth;

#[cfg(target_os = "android")]
pub mod android;

use serde::Serialize;

pub use config::*;
pub use error::{ConfigError, ExportError, RenderError, SynthError};
pub use grid::{resolve_position, GridPosition};
pub use model::{Note, NoteJson, PitchGridModel};
pub use pitch::{midi_to_frequency, midi_to_pitch_label, NoteLength, PitchLabel};
pub use playback::{schedule_to_json, PlaybackSchedule, ScheduledTone};
pub use renderer::{render_staff_to_svg, Renderer, SvgRenderer};
pub use sketchpad::Sketchpad;
pub use synth::{AudioGate, AudioMode, SilentSynth, Synthesizer};

/// Parse an optional JSON configuration; `None` selects the chromatic
/// preset.
pub fn config_from_json(json: Option<&str>) -> Result<GridConfig, ConfigError> {
    match json {
        Some(text) if !text.trim().is_empty() => GridConfig::from_json_str(text),
        _ => Ok(GridConfig::chromatic()),
    }
}

/// Convert placed notes to a JSON array, derived values included.
pub fn notes_to_json(notes: &[Note]) -> Result<String, serde_json::Error> {
    let view: Vec<NoteJson> = notes.iter().map(NoteJson::from).collect();
    serde_json::to_string(&view)
}

/// What a click would produce, without placing anything.
#[derive(Debug, Clone, Serialize)]
pub struct ClickPreview {
    #[serde(flatten)]
    pub position: GridPosition,
    pub midi_pitch: i32,
    pub frequency_hz: f64,
    pub pitch: String,
}

/// Preview a click on a staff laid out by `config`. `None` when the click
/// falls outside the interactive area.
pub fn preview_click(config: &GridConfig, x: f64, y: f64) -> Option<ClickPreview> {
    if !input::accepts_click(config, x, y) {
        return None;
    }
    let position = resolve_position(config, x, y);
    let midi_pitch = config.index_to_midi(position.grid_index);
    Some(ClickPreview {
        position,
        midi_pitch,
        frequency_hz: midi_to_frequency(midi_pitch),
        pitch: midi_to_pitch_label(midi_pitch).to_string(),
    })
}

/// Render the empty staff for a configuration.
pub fn render_empty_staff(config: &GridConfig) -> Result<String, RenderError> {
    let mut renderer = SvgRenderer::new();
    renderer.draw_staff(config, &[])?;
    Ok(renderer.export_vector().unwrap_or_default())
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI for native and web shells
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// A staff driven through the C API. The host plays sounds itself, using
/// the frequencies in the returned JSON.
pub struct StaffPad {
    model: PitchGridModel,
    renderer: SvgRenderer,
}

impl StaffPad {
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        let mut pad = Self {
            model: PitchGridModel::new(config)?,
            renderer: SvgRenderer::new(),
        };
        pad.redraw();
        Ok(pad)
    }

    pub fn model(&self) -> &PitchGridModel {
        &self.model
    }

    /// Place a note for a click inside the staff; returns it as JSON.
    pub fn click(&mut self, x: f64, y: f64) -> Option<String> {
        if !input::accepts_click(self.model.config(), x, y) {
            return None;
        }
        let position = self.model.resolve_position(x, y);
        let note = self.model.add_note(x, y, &position);
        let json = serde_json::to_string(&NoteJson::from(note)).ok();
        self.redraw();
        json
    }

    pub fn clear(&mut self) {
        self.model.clear_all();
        self.redraw();
    }

    pub fn export_svg(&self) -> Option<String> {
        self.renderer.export_vector()
    }

    fn redraw(&mut self) {
        if let Err(e) = self.renderer.draw_staff(self.model.config(), self.model.notes()) {
            tracing::warn!(error = %e, "staff redraw failed");
        }
    }
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Create a staff. `config_json` may be null for the chromatic preset.
/// Returns null if the configuration is invalid. Free with `staffpad_free`.
///
/// # Safety
/// `config_json` must be null or a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn staffpad_new(config_json: *const c_char) -> *mut StaffPad {
    let json = if config_json.is_null() {
        None
    } else {
        match unsafe { CStr::from_ptr(config_json) }.to_str() {
            Ok(s) => Some(s),
            Err(_) => return std::ptr::null_mut(),
        }
    };

    match config_from_json(json).and_then(StaffPad::new) {
        Ok(pad) => Box::into_raw(Box::new(pad)),
        Err(e) => {
            tracing::warn!(error = %e, "rejected staff configuration");
            std::ptr::null_mut()
        }
    }
}

/// Destroy a staff created by `staffpad_new`.
///
/// # Safety
/// `pad` must be null or a pointer returned by `staffpad_new` that has not
/// been freed.
#[no_mangle]
pub unsafe extern "C" fn staffpad_free(pad: *mut StaffPad) {
    if !pad.is_null() {
        unsafe {
            drop(Box::from_raw(pad));
        }
    }
}

/// Handle a click. Returns the placed note as JSON, or null when the click
/// was outside the staff. Free the string with `staffpad_free_string`.
///
/// # Safety
/// `pad` must be a live pointer returned by `staffpad_new`.
#[no_mangle]
pub unsafe extern "C" fn staffpad_click(pad: *mut StaffPad, x: f64, y: f64) -> *mut c_char {
    let Some(pad) = (unsafe { pad.as_mut() }) else {
        return std::ptr::null_mut();
    };
    pad.click(x, y).map_or(std::ptr::null_mut(), into_c_string)
}

/// Remove every note.
///
/// # Safety
/// `pad` must be null or a live pointer returned by `staffpad_new`.
#[no_mangle]
pub unsafe extern "C" fn staffpad_clear(pad: *mut StaffPad) {
    if let Some(pad) = unsafe { pad.as_mut() } {
        pad.clear();
    }
}

/// All notes in insertion order as a JSON array.
///
/// # Safety
/// `pad` must be null or a live pointer returned by `staffpad_new`.
#[no_mangle]
pub unsafe extern "C" fn staffpad_notes_json(pad: *const StaffPad) -> *mut c_char {
    let Some(pad) = (unsafe { pad.as_ref() }) else {
        return std::ptr::null_mut();
    };
    match notes_to_json(pad.model.notes()) {
        Ok(json) => into_c_string(json),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Playback schedule as JSON, offset from `reference_time` on the host's
/// audio clock. Null when there are no notes.
///
/// # Safety
/// `pad` must be null or a live pointer returned by `staffpad_new`.
#[no_mangle]
pub unsafe extern "C" fn staffpad_schedule_json(pad: *const StaffPad, reference_time: f64) -> *mut c_char {
    let Some(pad) = (unsafe { pad.as_ref() }) else {
        return std::ptr::null_mut();
    };
    match PlaybackSchedule::build(&pad.model, reference_time) {
        Some(schedule) => into_c_string(schedule_to_json(&schedule)),
        None => std::ptr::null_mut(),
    }
}

/// The current drawing as SVG.
///
/// # Safety
/// `pad` must be null or a live pointer returned by `staffpad_new`.
#[no_mangle]
pub unsafe extern "C" fn staffpad_export_svg(pad: *const StaffPad) -> *mut c_char {
    let Some(pad) = (unsafe { pad.as_ref() }) else {
        return std::ptr::null_mut();
    };
    pad.export_svg().map_or(std::ptr::null_mut(), into_c_string)
}

/// Free a string previously returned by a staffpad function.
///
/// # Safety
/// `ptr` must be a string previously returned by a staffpad function, or null.
#[no_mangle]
pub unsafe extern "C" fn staffpad_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
