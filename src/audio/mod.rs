//! Audio output using cpal
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::error::{AudioError, AudioResult};
use crate::sequencer::instrument::Instrument;

pub mod sample;

pub use sample::{Sample, SampleBank};

/// Overlapping hits beyond this drop the oldest voice.
const MAX_VOICES: usize = 32;

/// Anything that can sound an instrument. Fire-and-forget.
pub trait SoundSink {
    fn play(&mut self, instrument: Instrument);
}

struct Voice {
    data: Arc<[f32]>,
    position: usize,
}

impl Voice {
    fn finished(&self) -> bool {
        self.position >= self.data.len()
    }
}

pub struct AudioOutput {
    _stream: Option<cpal::Stream>,
    voices: Arc<Mutex<Vec<Voice>>>,
    bank: SampleBank,
}

impl AudioOutput {
    /// Opens the default output device and resamples `bank` to its rate.
    pub fn new(bank: SampleBank) -> AudioResult<Self> {
        let voices = Arc::new(Mutex::new(Vec::new()));
        let (stream, sample_rate) = Self::setup_audio_stream(Arc::clone(&voices))?;
        info!(sample_rate, "audio output ready");

        Ok(Self {
            _stream: Some(stream),
            voices,
            bank: bank.resampled(sample_rate),
        })
    }

    /// No device: triggers are accepted and dropped.
    pub fn silent() -> Self {
        Self {
            _stream: None,
            voices: Arc::new(Mutex::new(Vec::new())),
            bank: SampleBank::default(),
        }
    }

    pub fn is_silent(&self) -> bool {
        self._stream.is_none()
    }

    fn setup_audio_stream(voices: Arc<Mutex<Vec<Voice>>>) -> AudioResult<(cpal::Stream, u32)> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match voices.lock() {
                    Ok(mut voices) => mix_into(&mut voices, data, channels),
                    Err(_) => data.fill(0.0),
                },
                |err| error!("audio stream error: {}", err),
                None,
            )?,
            other => return Err(AudioError::UnsupportedFormat(other)),
        };

        stream.play()?;
        Ok((stream, sample_rate))
    }
}

impl SoundSink for AudioOutput {
    fn play(&mut self, instrument: Instrument) {
        let Some(sample) = self.bank.get(instrument) else {
            return;
        };
        if let Ok(mut voices) = self.voices.lock() {
            if voices.len() >= MAX_VOICES {
                voices.remove(0);
            }
            voices.push(Voice {
                data: Arc::clone(&sample.data),
                position: 0,
            });
        }
    }
}

/// Sum every active voice into `out`, the same value on each channel.
fn mix_into(voices: &mut Vec<Voice>, out: &mut [f32], channels: usize) {
    for frame in out.chunks_mut(channels.max(1)) {
        let mut sum = 0.0f32;
        for voice in voices.iter_mut() {
            if let Some(&s) = voice.data.get(voice.position) {
                sum += s;
                voice.position += 1;
            }
        }
        frame.fill(sum.clamp(-1.0, 1.0));
    }
    voices.retain(|v| !v.finished());
}

/// Test double that remembers every trigger.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Recorder {
    pub played: Vec<Instrument>,
}

#[cfg(test)]
impl SoundSink for Recorder {
    fn play(&mut self, instrument: Instrument) {
        self.played.push(instrument);
    }
}
