//=========================================================================
// Audio Output
//=========================================================================
//
// Decodes cue files with symphonia and mixes them into the default output
// device with oddio over cpal.
//
// The cpal stream is not `Send` on every host, so it is created and kept
// on a dedicated "audio" thread. `Playback` only holds the channel to it.
//
// Decoded cues are cached per cue; the background loop is restarted (not
// layered) if it is requested again.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

//=== External Crates =====================================================

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, error, info, warn};
use oddio::{Cycle, Frames, FramesSignal, Handle, Mixer, Stop};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

//=== Internal Modules ====================================================

use super::{AudioCue, AudioError};

type StereoFrames = Arc<Frames<[f32; 2]>>;
type LoopHandle = Handle<Stop<Cycle<[f32; 2]>>>;

//=== Playback ============================================================

/// Sending half of the audio thread.
///
/// Dropping it closes the channel; the audio thread then stops the stream
/// and exits.
#[derive(Debug)]
pub(super) struct Playback {
    cues: Sender<(AudioCue, PathBuf)>,
}

impl Playback {
    /// Opens the default output device on a new "audio" thread.
    ///
    /// # Errors
    ///
    /// [`AudioError::Output`] if there is no output device, the stream
    /// cannot be built or started, or the thread cannot be spawned.
    pub(super) fn start() -> Result<Self, AudioError> {
        let (cue_tx, cue_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);

        thread::Builder::new()
            .name("audio".into())
            .spawn(move || match Output::open() {
                Ok(output) => {
                    let _ = ready_tx.send(Ok(()));
                    output.serve(cue_rx);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            })
            .map_err(|e| AudioError::Output(Box::new(e)))?;

        match ready_rx.recv() {
            Ok(result) => result.map(|()| Self { cues: cue_tx }),
            Err(_) => Err(AudioError::Output("audio thread exited during startup".into())),
        }
    }

    /// Queues `cue` for the audio thread. Returns `false` if it is gone.
    pub(super) fn play(&self, cue: AudioCue, path: PathBuf) -> bool {
        self.cues.send((cue, path)).is_ok()
    }
}

//=== Output (audio thread) ===============================================

struct Output {
    _stream: cpal::Stream,
    mixer: Handle<Mixer<[f32; 2]>>,
    decoded: HashMap<AudioCue, StereoFrames>,
    background: Option<LoopHandle>,
}

impl Output {
    fn open() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Output("no output device available".into()))?;
        let sample_rate = device
            .default_output_config()
            .map_err(|e| AudioError::Output(Box::new(e)))?
            .sample_rate();
        let config = cpal::StreamConfig {
            channels: 2,
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };
        info!(
            target: "audio",
            "Using output device {} at {} Hz",
            device.name().unwrap_or_else(|_| "<unnamed>".into()),
            sample_rate.0
        );

        let (mixer_handle, mixer) = oddio::split(Mixer::<[f32; 2]>::new());

        let stream = device
            .build_output_stream(
                &config,
                move |out_flat: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let out_stereo: &mut [[f32; 2]] = oddio::frame_stereo(out_flat);
                    oddio::run(&mixer, sample_rate.0, out_stereo);
                },
                |err| error!(target: "audio", "Output stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::Output(Box::new(e)))?;
        stream.play().map_err(|e| AudioError::Output(Box::new(e)))?;

        Ok(Self {
            _stream: stream,
            mixer: mixer_handle,
            decoded: HashMap::new(),
            background: None,
        })
    }

    /// Plays queued cues until the sending side is dropped.
    fn serve(mut self, cues: Receiver<(AudioCue, PathBuf)>) {
        for (cue, path) in cues.iter() {
            match self.frames_for(cue, &path) {
                Ok(frames) => self.start(cue, frames),
                Err(e) => warn!(target: "audio", "{}", e),
            }
        }
        debug!(target: "audio", "Audio thread exiting");
    }

    fn frames_for(&mut self, cue: AudioCue, path: &Path) -> Result<StereoFrames, AudioError> {
        if let Some(frames) = self.decoded.get(&cue) {
            return Ok(frames.clone());
        }
        let frames = decode_stereo(path)?;
        self.decoded.insert(cue, frames.clone());
        Ok(frames)
    }

    fn start(&mut self, cue: AudioCue, frames: StereoFrames) {
        if cue.looping() {
            if let Some(mut previous) = self.background.take() {
                previous.control::<Stop<_>, _>().stop();
            }
            self.background = Some(self.mixer.control().play(Cycle::new(frames)));
        } else {
            let _ = self.mixer.control().play(FramesSignal::from(frames));
        }
        info!(target: "audio", "Playing {:?} (looping: {})", cue, cue.looping());
    }
}

//=== Decoding ============================================================

/// Decodes a whole file into stereo frames at its native sample rate.
fn decode_stereo(path: &Path) -> Result<StereoFrames, AudioError> {
    let decode_error = |source: SymphoniaError| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| AudioError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(decode_error)?;
    let mut reader = probed.format;

    let track = reader
        .default_track()
        .ok_or_else(|| AudioError::NoTrack(path.to_path_buf()))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AudioError::NoTrack(path.to_path_buf()))?;
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(decode_error)?;

    let mut frames: Vec<[f32; 2]> = Vec::new();
    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            // End of stream
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(decode_error(e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                frames.extend(to_stereo(buffer.samples(), spec.channels.count()));
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                debug!(target: "audio", "Skipping bad packet in {}: {}", path.display(), msg);
            }
            Err(e) => return Err(decode_error(e)),
        }
    }

    debug!(
        target: "audio",
        "Decoded {} ({} frames at {} Hz)",
        path.display(),
        frames.len(),
        sample_rate
    );
    Ok(Frames::from_slice(sample_rate, &frames))
}

/// Interleaved samples to stereo frames. Mono is duplicated, extra
/// channels beyond the first two are dropped.
fn to_stereo(samples: &[f32], channels: usize) -> Vec<[f32; 2]> {
    match channels {
        0 => Vec::new(),
        1 => samples.iter().map(|&s| [s, s]).collect(),
        n => samples.chunks_exact(n).map(|frame| [frame[0], frame[1]]).collect(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_file(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("catch-playback-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    /// 16-bit PCM mono WAV holding `samples`.
    fn mono_wav(rate: u32, samples: &[i16]) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&rate.to_le_bytes());
        bytes.extend_from_slice(&(rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        bytes
    }

    //--- to_stereo --------------------------------------------------------

    #[test]
    fn mono_is_duplicated() {
        assert_eq!(to_stereo(&[0.5, -0.5], 1), vec![[0.5, 0.5], [-0.5, -0.5]]);
    }

    #[test]
    fn stereo_passes_through() {
        assert_eq!(to_stereo(&[0.1, 0.2, 0.3, 0.4], 2), vec![[0.1, 0.2], [0.3, 0.4]]);
    }

    #[test]
    fn extra_channels_are_dropped() {
        assert_eq!(to_stereo(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3), vec![[1.0, 2.0], [4.0, 5.0]]);
    }

    #[test]
    fn zero_channels_yield_nothing() {
        assert!(to_stereo(&[1.0, 2.0], 0).is_empty());
    }

    //--- decode_stereo ----------------------------------------------------

    #[test]
    fn decodes_pcm_wav() {
        let path = scratch_file("tone.wav", &mono_wav(8_000, &[0, 1_000, -1_000, 0, 500, -500, 0, 0]));
        assert!(decode_stereo(&path).is_ok());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let path = scratch_file("garbage.wav", b"definitely not audio");
        assert!(matches!(decode_stereo(&path), Err(AudioError::Decode { .. })));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_unreadable() {
        let path = std::env::temp_dir().join("catch-playback-missing/none.mp3");
        assert!(matches!(decode_stereo(&path), Err(AudioError::Unreadable { .. })));
    }
}
