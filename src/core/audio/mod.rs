//=========================================================================
// Audio Cues
//=========================================================================
//
// Fire-and-forget sound triggers.
//
// Gameplay never waits on audio and never sees its failures: a sink
// resolves and plays a cue or logs why it couldn't, then returns.
//
// Cues:
//   BackgroundLoop - started once at launch, loops forever
//   Catch          - one-shot on every caught object
//
// Output:
//   With the `playback` feature, `AssetAudio` decodes and mixes cues on a
//   dedicated audio thread (see `playback`). Without it, cues are only
//   resolved to their files and logged as not played.
//
//=========================================================================

//=== Submodules ==========================================================

#[cfg(feature = "playback")]
mod playback;

//=== External Dependencies ===============================================

use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

#[cfg(feature = "playback")]
use playback::Playback;

//=== AudioCue ============================================================

/// A sound the game asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    BackgroundLoop,
    Catch,
}

impl AudioCue {
    /// Asset file name, relative to the assets directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::BackgroundLoop => "backgroundMusic.mp3",
            Self::Catch => "catchSound.wav",
        }
    }

    pub const fn looping(self) -> bool {
        matches!(self, Self::BackgroundLoop)
    }
}

//=== AudioError ==========================================================

/// Why a cue could not be played.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("sound file unreadable: {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no playable audio track in {}", .0.display())]
    NoTrack(PathBuf),

    #[cfg(feature = "playback")]
    #[error("could not decode {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: symphonia::core::errors::Error,
    },

    #[error("audio output unavailable: {0}")]
    Output(#[source] Box<dyn std::error::Error + Send + Sync>),
}

//=== AudioSink ===========================================================

/// Receiver of audio cues.
///
/// Implementations must not panic or block for long; they run on the
/// logic thread between ticks.
pub trait AudioSink: Send {
    fn play(&mut self, cue: AudioCue);
}

//=== SilentAudio =========================================================

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

//=== AssetAudio ==========================================================

/// Plays cues from files under an assets directory.
///
/// Missing or unreadable files are logged at `warn` and otherwise ignored.
/// The output device is opened on the first cue whose file exists; if that
/// fails the sink logs once and stays silent.
#[derive(Debug)]
pub struct AssetAudio {
    assets_dir: PathBuf,
    #[cfg(feature = "playback")]
    output: OutputState,
}

#[cfg(feature = "playback")]
#[derive(Debug)]
enum OutputState {
    Pending,
    Ready(Playback),
    Unavailable,
}

impl AssetAudio {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            #[cfg(feature = "playback")]
            output: OutputState::Pending,
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Locates the file backing `cue`.
    ///
    /// # Errors
    ///
    /// [`AudioError::NotFound`] if no regular file exists at the path,
    /// [`AudioError::Unreadable`] for any other I/O failure.
    pub fn resolve(&self, cue: AudioCue) -> Result<PathBuf, AudioError> {
        let path = self.assets_dir.join(cue.file_name());
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(AudioError::NotFound(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AudioError::NotFound(path)),
            Err(source) => Err(AudioError::Unreadable { path, source }),
        }
    }
}

impl AudioSink for AssetAudio {
    fn play(&mut self, cue: AudioCue) {
        match self.resolve(cue) {
            Ok(path) => self.output(cue, path),
            Err(e) => warn!(target: "audio", "{}", e),
        }
    }
}

impl AssetAudio {
    #[cfg(not(feature = "playback"))]
    fn output(&mut self, cue: AudioCue, path: PathBuf) {
        log::info!(
            target: "audio",
            "Resolved {:?} to {} (built without `playback`, not played)",
            cue,
            path.display()
        );
    }

    #[cfg(feature = "playback")]
    fn output(&mut self, cue: AudioCue, path: PathBuf) {
        if matches!(self.output, OutputState::Pending) {
            self.output = match Playback::start() {
                Ok(playback) => OutputState::Ready(playback),
                Err(e) => {
                    warn!(target: "audio", "{}; continuing without sound", e);
                    OutputState::Unavailable
                }
            };
        }

        let delivered = match &self.output {
            OutputState::Ready(playback) => playback.play(cue, path),
            OutputState::Pending | OutputState::Unavailable => {
                log::debug!(target: "audio", "No audio output, skipping {:?}", cue);
                return;
            }
        };
        if !delivered {
            warn!(target: "audio", "Audio thread is gone, dropping {:?}", cue);
            self.output = OutputState::Unavailable;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "catch-audio-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn cue_file_names() {
        assert_eq!(AudioCue::BackgroundLoop.file_name(), "backgroundMusic.mp3");
        assert_eq!(AudioCue::Catch.file_name(), "catchSound.wav");
        assert!(AudioCue::BackgroundLoop.looping());
        assert!(!AudioCue::Catch.looping());
    }

    #[test]
    fn resolve_finds_existing_asset() {
        let dir = scratch_dir("found");
        fs::write(dir.join("catchSound.wav"), b"RIFF").unwrap();

        let audio = AssetAudio::new(&dir);
        let path = audio.resolve(AudioCue::Catch).unwrap();
        assert_eq!(path, dir.join("catchSound.wav"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn resolve_reports_missing_asset() {
        let dir = scratch_dir("missing");
        let audio = AssetAudio::new(&dir);

        match audio.resolve(AudioCue::BackgroundLoop) {
            Err(AudioError::NotFound(path)) => {
                assert!(path.ends_with("backgroundMusic.mp3"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn directory_in_place_of_asset_is_not_found() {
        let dir = scratch_dir("isdir");
        fs::create_dir_all(dir.join("catchSound.wav")).unwrap();

        let audio = AssetAudio::new(&dir);
        assert!(matches!(audio.resolve(AudioCue::Catch), Err(AudioError::NotFound(_))));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn play_with_missing_assets_does_not_panic() {
        let mut audio = AssetAudio::new("/definitely/not/a/real/dir");
        audio.play(AudioCue::BackgroundLoop);
        audio.play(AudioCue::Catch);
    }

    #[test]
    fn error_message_names_file() {
        let err = AudioError::NotFound(PathBuf::from("assets/catchSound.wav"));
        assert!(err.to_string().contains("catchSound.wav"));
    }

    #[test]
    fn output_error_carries_cause() {
        let err = AudioError::Output("no output device available".into());
        assert_eq!(err.to_string(), "audio output unavailable: no output device available");
    }
}
