//! Synthesizer contract and the one-time audio readiness gate.
//!
//! Backends usually need an asynchronous start (an audio context that must
//! be resumed, a device that must open). [`AudioGate`] runs that start at
//! most once; every trigger awaits it, so a note placed before the backend
//! is ready is delayed rather than dropped. A failed start is logged and the
//! gate settles on silence for the rest of the session.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::error::SynthError;
use crate::pitch::NoteLength;

/// A sound backend.
#[allow(async_fn_in_trait)]
pub trait Synthesizer {
    /// Bring the backend up. Called at most once per [`AudioGate`].
    async fn start(&self) -> Result<(), SynthError>;

    /// Current time on the backend's clock, in seconds.
    fn now(&self) -> f64;

    /// Play a tone. `at` is an absolute time on the backend clock; `None`
    /// means immediately.
    fn trigger(&self, frequency_hz: f64, length: NoteLength, at: Option<f64>) -> Result<(), SynthError>;
}

/// Outcome of the readiness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMode {
    Ready,
    /// Start failed; triggers are skipped.
    Silent,
}

/// Awaitable, run-once readiness for a synthesizer.
#[derive(Debug, Default)]
pub struct AudioGate {
    mode: OnceCell<AudioMode>,
}

impl AudioGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `synth` if that has not happened yet and report the mode.
    pub async fn ensure_ready<S: Synthesizer>(&self, synth: &S) -> AudioMode {
        *self
            .mode
            .get_or_init(|| async {
                match synth.start().await {
                    Ok(()) => {
                        info!("audio ready");
                        AudioMode::Ready
                    }
                    Err(e) => {
                        warn!(error = %e, "audio unavailable, continuing silently");
                        AudioMode::Silent
                    }
                }
            })
            .await
    }

    /// Mode once settled; `None` before the first `ensure_ready`.
    pub fn mode(&self) -> Option<AudioMode> {
        self.mode.get().copied()
    }
}

/// A backend that is always ready and never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSynth;

impl Synthesizer for SilentSynth {
    async fn start(&self) -> Result<(), SynthError> {
        Ok(())
    }

    fn now(&self) -> f64 {
        0.0
    }

    fn trigger(&self, _frequency_hz: f64, _length: NoteLength, _at: Option<f64>) -> Result<(), SynthError> {
        Ok(())
    }
}
