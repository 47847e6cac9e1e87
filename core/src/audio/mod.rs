// PCM audio types and WAV container framing

pub mod utils;
pub mod wav;

pub use wav::{encode_wav, write_wav, write_wav_file, WAV_HEADER_LEN};

use crate::{Result, TtsError};
use std::time::Duration;

/// Sample layout of raw little-endian linear PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub channels: u16,
    pub sample_rate_hz: u32,
    pub bits_per_sample: u16,
}

impl Default for PcmFormat {
    /// Mono, 24 kHz, 16-bit: what the Gemini TTS models return.
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate_hz: 24_000,
            bits_per_sample: 16,
        }
    }
}

impl PcmFormat {
    pub const SUPPORTED_BITS: [u16; 4] = [8, 16, 24, 32];

    pub fn new(channels: u16, sample_rate_hz: u32, bits_per_sample: u16) -> Self {
        Self {
            channels,
            sample_rate_hz,
            bits_per_sample,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(TtsError::InvalidFormat("channel count must be >= 1".into()));
        }
        if self.sample_rate_hz == 0 {
            return Err(TtsError::InvalidFormat("sample rate must be > 0".into()));
        }
        if !Self::SUPPORTED_BITS.contains(&self.bits_per_sample) {
            return Err(TtsError::InvalidFormat(format!(
                "unsupported bits per sample: {} (expected 8, 16, 24 or 32)",
                self.bits_per_sample
            )));
        }
        // Header fields: block align is a u16, byte rate a u32
        let block_align = (self.channels as u32)
            .checked_mul(self.bits_per_sample as u32 / 8)
            .filter(|a| *a <= u16::MAX as u32)
            .ok_or_else(|| {
                TtsError::InvalidFormat(format!(
                    "block align for {} channel(s) x {} bits exceeds {}",
                    self.channels,
                    self.bits_per_sample,
                    u16::MAX
                ))
            })?;
        if self.sample_rate_hz.checked_mul(block_align).is_none() {
            return Err(TtsError::InvalidFormat(format!(
                "byte rate for {} Hz x {} bytes per frame exceeds {}",
                self.sample_rate_hz,
                block_align,
                u32::MAX
            )));
        }
        Ok(())
    }

    /// Bytes per frame (one sample for every channel).
    pub fn block_align(&self) -> u32 {
        self.channels as u32 * (self.bits_per_sample as u32 / 8)
    }

    /// Exact for any format that passes [`validate`](Self::validate).
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate_hz.saturating_mul(self.block_align())
    }

    /// Parse a raw-PCM MIME type such as `audio/L16;codec=pcm;rate=24000`.
    ///
    /// Returns `None` for anything that is not `audio/L8|L16|L24|L32`.
    /// Missing `rate`/`channels` parameters take the default values.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let mut parts = mime.split(';').map(str::trim);
        let essence = parts.next()?.to_ascii_lowercase();
        let bits = match essence.strip_prefix("audio/l")?.parse::<u16>().ok()? {
            b if Self::SUPPORTED_BITS.contains(&b) => b,
            _ => return None,
        };

        let mut format = Self {
            bits_per_sample: bits,
            ..Self::default()
        };
        for param in parts {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "rate" => format.sample_rate_hz = value.trim().parse().ok()?,
                "channels" => format.channels = value.trim().parse().ok()?,
                _ => {}
            }
        }
        format.validate().ok()?;
        Some(format)
    }
}

/// Raw PCM samples together with the format they are laid out in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudioBuffer {
    pub format: PcmFormat,
    pub data: Vec<u8>,
}

impl PcmAudioBuffer {
    pub fn new(format: PcmFormat, data: Vec<u8>) -> Self {
        Self { format, data }
    }

    pub fn frame_count(&self) -> usize {
        match self.format.block_align() {
            0 => 0,
            align => self.data.len() / align as usize,
        }
    }

    pub fn duration(&self) -> Duration {
        if self.format.sample_rate_hz == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count() as f64 / self.format.sample_rate_hz as f64)
    }

    /// Frame the buffer as an in-memory WAV file.
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        encode_wav(&self.data, self.format)
    }
}
