use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{AssetError, AssetResult};
use crate::sequencer::instrument::Instrument;

/// Mono sample data at a known rate
#[derive(Debug, Clone)]
pub struct Sample {
    pub data: Arc<[f32]>,
    pub sample_rate: u32,
}

impl Sample {
    /// Read a WAV file and fold all channels down to mono.
    pub fn load_wav(path: &Path) -> AssetResult<Self> {
        let open_err = |source| AssetError::Open {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = hound::WavReader::open(path).map_err(open_err)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(open_err)?,
            hound::SampleFormat::Int => {
                let max = (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(open_err)?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let data: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        if data.is_empty() {
            return Err(AssetError::Empty(path.to_path_buf()));
        }

        debug!(path = %path.display(), frames = data.len(), rate = spec.sample_rate, "sample loaded");
        Ok(Self {
            data: data.into(),
            sample_rate: spec.sample_rate,
        })
    }

    /// Linear interpolation to `target_rate`.
    pub fn resampled(&self, target_rate: u32) -> Self {
        if self.sample_rate == target_rate || self.data.is_empty() {
            return self.clone();
        }
        let ratio = target_rate as f64 / self.sample_rate as f64;
        let out_len = (self.data.len() as f64 * ratio).ceil() as usize;
        let last = self.data.len() - 1;

        let data: Vec<f32> = (0..out_len)
            .map(|i| {
                let src_pos = i as f64 / ratio;
                let idx = src_pos.floor() as usize;
                if idx >= last {
                    return self.data[last];
                }
                let frac = (src_pos - idx as f64) as f32;
                self.data[idx] * (1.0 - frac) + self.data[idx + 1] * frac
            })
            .collect();

        Self {
            data: data.into(),
            sample_rate: target_rate,
        }
    }
}

/// One sample per instrument
#[derive(Debug, Clone, Default)]
pub struct SampleBank {
    samples: HashMap<Instrument, Sample>,
}

impl SampleBank {
    /// Every instrument's file must be present in `dir`.
    pub fn load(dir: &Path) -> AssetResult<Self> {
        let samples = Instrument::ALL
            .iter()
            .map(|&instrument| {
                Sample::load_wav(&dir.join(instrument.sample_file())).map(|s| (instrument, s))
            })
            .collect::<AssetResult<HashMap<_, _>>>()?;
        Ok(Self { samples })
    }

    pub fn insert(&mut self, instrument: Instrument, sample: Sample) {
        self.samples.insert(instrument, sample);
    }

    pub fn get(&self, instrument: Instrument) -> Option<&Sample> {
        self.samples.get(&instrument)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn resampled(&self, target_rate: u32) -> Self {
        Self {
            samples: self
                .samples
                .iter()
                .map(|(&instrument, sample)| (instrument, sample.resampled(target_rate)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_wav(name: &str, channels: u16, frames: &[i16]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("drumseq-{}-{}.wav", std::process::id(), name));
        let spec = hound::WavSpec {
            channels,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in frames {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_load_stereo_folds_to_mono() {
        let path = temp_wav("stereo", 2, &[16384, 0, -16384, -16384]);
        let sample = Sample::load_wav(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(sample.sample_rate, 22050);
        assert_eq!(sample.data.len(), 2);
        assert!((sample.data[0] - 0.25).abs() < 1e-6);
        assert!((sample.data[1] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file() {
        let err = Sample::load_wav(Path::new("/nonexistent/kick.wav")).unwrap_err();
        assert!(matches!(err, AssetError::Open { .. }));
    }

    #[test]
    fn test_missing_bank_dir() {
        assert!(SampleBank::load(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_resample_doubles_length() {
        let sample = Sample {
            data: vec![0.0, 1.0, 0.0].into(),
            sample_rate: 22050,
        };
        let up = sample.resampled(44100);
        assert_eq!(up.sample_rate, 44100);
        assert_eq!(up.data.len(), 6);
        assert!((up.data[1] - 0.5).abs() < 1e-6);
        assert!((up.data[2] - 1.0).abs() < 1e-6);
    }
}
