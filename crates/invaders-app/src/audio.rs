//! Shoot sound cue.
//!
//! The clip is read and decoded once at startup, so a missing or undecodable
//! file fails before the frame loop starts. Playback has restart semantics:
//! every fire event stops whatever is still playing and starts the clip from
//! the beginning.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace};
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use thiserror::Error;

/// Something that can be (re)triggered once per fire event.
pub trait AudioCue {
    /// Stop any in-progress playback, rewind, and play from the start.
    fn restart(&mut self);
}

/// Errors raised while loading the shoot sound.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read sound file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sound file {path} cannot be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
}

/// An encoded sound held in memory, known to decode.
#[derive(Debug, Clone)]
pub struct SoundClip {
    path: PathBuf,
    bytes: Arc<[u8]>,
    channels: u16,
    sample_rate: u32,
    duration: Option<Duration>,
}

impl SoundClip {
    /// Read a sound file and check that it decodes.
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let bytes = std::fs::read(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, bytes.into())
    }

    fn from_bytes(path: &Path, bytes: Arc<[u8]>) -> Result<Self, AudioError> {
        let decoder = Decoder::new(Cursor::new(bytes.clone())).map_err(|source| {
            AudioError::Decode {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            channels: decoder.channels(),
            sample_rate: decoder.sample_rate(),
            duration: decoder.total_duration(),
            bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// A fresh decoder positioned at the start of the clip.
    fn decoder(&self) -> Option<Decoder<Cursor<Arc<[u8]>>>> {
        Decoder::new(Cursor::new(self.bytes.clone())).ok()
    }
}

/// The default audio output device.
///
/// The stream must outlive every cue playing through it. It stays on the
/// thread that opened it; cues only hold a handle to its mixer.
pub struct AudioOutput {
    stream: OutputStream,
}

impl AudioOutput {
    pub fn open() -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        Ok(Self { stream })
    }

    pub fn mixer(&self) -> &Mixer {
        self.stream.mixer()
    }
}

/// The player's shoot sound, playing through one sink at a time.
pub struct ShootSound {
    clip: SoundClip,
    mixer: Mixer,
    sink: Sink,
    plays: u64,
}

impl ShootSound {
    pub fn new(clip: SoundClip, output: &AudioOutput) -> Self {
        let mixer = output.mixer().clone();
        let sink = Sink::connect_new(&mixer);
        info!(
            "loaded {} ({} Hz, {} ch, {:.0} ms)",
            clip.path().display(),
            clip.sample_rate(),
            clip.channels(),
            clip.duration().unwrap_or_default().as_secs_f64() * 1000.0
        );
        Self {
            clip,
            mixer,
            sink,
            plays: 0,
        }
    }

    /// How many times the cue has been started.
    pub fn plays(&self) -> u64 {
        self.plays
    }

    /// Sources queued on the current sink.
    pub fn queued(&self) -> usize {
        self.sink.len()
    }
}

impl AudioCue for ShootSound {
    fn restart(&mut self) {
        if !self.sink.empty() {
            trace!("cutting off {} mid-playback", self.clip.path().display());
        }
        self.sink.stop();
        self.sink = Sink::connect_new(&self.mixer);

        let Some(source) = self.clip.decoder() else {
            return;
        };
        self.sink.append(source);
        self.plays += 1;
        debug!("playing {} (#{})", self.clip.path().display(), self.plays);
    }
}

/// Cue used when sound is disabled.
#[derive(Debug, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn restart(&mut self) {}
}
