//! RIFF/WAVE framing for raw linear PCM.
//!
//! Layout written (all integers little-endian):
//!
//! ```text
//! "RIFF" <riff size u32> "WAVE"
//! "fmt " 16u32 1u16(PCM) <channels u16> <rate u32> <byte rate u32> <block align u16> <bits u16>
//! "data" <data size u32> <pcm bytes> [pad byte if data size is odd]
//! ```
//!
//! The format and payload are validated before anything reaches the sink, and
//! the whole container is handed to the sink in one `write_all`.

use super::PcmFormat;
use crate::{Result, TtsError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of the canonical PCM header (RIFF + fmt + data chunk headers).
pub const WAV_HEADER_LEN: usize = 44;

const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_TAG_PCM: u16 = 1;

fn check_payload(pcm: &[u8], format: &PcmFormat) -> Result<()> {
    format.validate()?;
    let align = format.block_align() as usize;
    if pcm.len() % align != 0 {
        return Err(TtsError::InvalidFormat(format!(
            "PCM length {} is not a multiple of the frame size {} ({} channel(s) x {} bits)",
            pcm.len(),
            align,
            format.channels,
            format.bits_per_sample
        )));
    }
    // RIFF size = 36 + data (+ pad) must fit in a u32
    let padded = pcm.len() as u64 + (pcm.len() as u64 & 1);
    if padded + 36 > u32::MAX as u64 {
        return Err(TtsError::InvalidFormat(format!(
            "PCM length {} exceeds the 4 GiB RIFF limit",
            pcm.len()
        )));
    }
    Ok(())
}

/// Frame `pcm` as a complete WAV byte stream.
pub fn encode_wav(pcm: &[u8], format: PcmFormat) -> Result<Vec<u8>> {
    check_payload(pcm, &format)?;

    let data_size = pcm.len() as u32;
    let pad = (pcm.len() & 1) as u32;
    let riff_size = 36 + data_size + pad;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len() + pad as usize);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt subchunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&FORMAT_TAG_PCM.to_le_bytes());
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate_hz.to_le_bytes());
    out.extend_from_slice(&format.byte_rate().to_le_bytes());
    // fits: validate() bounds block align to u16
    out.extend_from_slice(&(format.block_align() as u16).to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data subchunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(pcm);
    if pad == 1 {
        out.push(0);
    }

    Ok(out)
}

/// Write `pcm` as a WAV container to `dest`.
///
/// Nothing is written when validation fails.
pub fn write_wav<W: Write>(pcm: &[u8], mut dest: W, format: PcmFormat) -> Result<()> {
    let bytes = encode_wav(pcm, format)?;
    dest.write_all(&bytes)?;
    dest.flush()?;
    Ok(())
}

/// Write `pcm` as a WAV file at `path`.
///
/// The bytes go to a sibling `.part` file that is renamed into place once fully
/// written, so `path` either holds a complete container or is left untouched.
pub fn write_wav_file(path: impl AsRef<Path>, pcm: &[u8], format: PcmFormat) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_wav(pcm, format)?;

    let part = part_path(path);
    let written = File::create(&part).and_then(|mut f| {
        f.write_all(&bytes)?;
        f.sync_all()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&part, path)) {
        let _ = fs::remove_file(&part);
        return Err(TtsError::IoError(e));
    }

    debug!(target: "wav", path = ?path, bytes = bytes.len(), "Wrote WAV file");
    Ok(())
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
