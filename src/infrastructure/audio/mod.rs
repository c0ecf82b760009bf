use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("wav codec error: {0}")]
    Wav(#[from] hound::Error),
    #[error("cannot join audio with different formats ({left} vs {right})")]
    FormatMismatch { left: String, right: String },
    #[error("cannot export an empty audio segment")]
    Empty,
}

/// In-memory PCM audio, interleaved, normalized to [-1.0, 1.0].
#[derive(Debug, Clone, Default)]
pub struct AudioSegment {
    spec: Option<WavSpec>,
    samples: Vec<f32>,
}

impl AudioSegment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a WAV file. Integer and float encodings are both accepted.
    pub fn from_file(path: &Path) -> Result<Self, AudioError> {
        let mut reader = WavReader::open(path)?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            SampleFormat::Int => {
                let scale = int_scale(spec.bits_per_sample);
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(Self {
            spec: Some(spec),
            samples,
        })
    }

    /// Silence of `duration_ms` in the given format.
    pub fn silent(duration_ms: u32, spec: WavSpec) -> Self {
        let frames = spec.sample_rate as u64 * duration_ms as u64 / 1000;
        let len = frames as usize * spec.channels as usize;

        Self {
            spec: Some(spec),
            samples: vec![0.0; len],
        }
    }

    pub fn spec(&self) -> Option<WavSpec> {
        self.spec
    }

    pub fn duration_ms(&self) -> u64 {
        match self.spec {
            Some(spec) if spec.sample_rate > 0 && spec.channels > 0 => {
                let frames = self.samples.len() as u64 / spec.channels as u64;
                frames * 1000 / spec.sample_rate as u64
            }
            _ => 0,
        }
    }

    /// Append `other` after this segment. An empty segment adopts the format
    /// of whatever is appended first.
    pub fn append(&mut self, other: AudioSegment) -> Result<(), AudioError> {
        match (self.spec, other.spec) {
            (_, None) => return Ok(()),
            (None, Some(spec)) => self.spec = Some(spec),
            (Some(left), Some(right)) => {
                if left.channels != right.channels || left.sample_rate != right.sample_rate {
                    return Err(AudioError::FormatMismatch {
                        left: describe(&left),
                        right: describe(&right),
                    });
                }
            }
        }

        self.samples.extend(other.samples);
        Ok(())
    }

    /// Write the segment as a WAV file using its own format.
    pub fn export(&self, path: &Path) -> Result<(), AudioError> {
        let spec = self.spec.ok_or(AudioError::Empty)?;
        let mut writer = WavWriter::create(path, spec)?;

        match spec.sample_format {
            SampleFormat::Float => {
                for &sample in &self.samples {
                    writer.write_sample(sample)?;
                }
            }
            SampleFormat::Int => {
                let scale = int_scale(spec.bits_per_sample);
                for &sample in &self.samples {
                    let value = (sample * scale).round().clamp(-scale, scale - 1.0);
                    match spec.bits_per_sample {
                        8 => writer.write_sample(value as i8)?,
                        16 => writer.write_sample(value as i16)?,
                        _ => writer.write_sample(value as i32)?,
                    }
                }
            }
        }

        writer.finalize()?;
        Ok(())
    }
}

fn int_scale(bits_per_sample: u16) -> f32 {
    (1i64 << (bits_per_sample.saturating_sub(1))) as f32
}

fn describe(spec: &WavSpec) -> String {
    format!("{} Hz, {} ch", spec.sample_rate, spec.channels)
}
