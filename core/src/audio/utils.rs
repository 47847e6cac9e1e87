//! Shared audio utilities.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique id for naming per-request output files.
///
/// Nanosecond timestamp plus a process-wide sequence number, so two requests
/// landing in the same clock tick still get distinct names.
pub fn gen_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", nanos, seq)
}

/// File name for a synthesized clip, e.g. `tts_Kore.wav` or `tts_Kore_<id>.wav`.
pub fn output_file_name(voice: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("tts_{}_{}.wav", voice, id),
        None => format!("tts_{}.wav", voice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct() {
        let a = gen_id();
        let b = gen_id();
        assert_ne!(a, b);
    }

    #[test]
    fn file_names() {
        assert_eq!(output_file_name("Kore", None), "tts_Kore.wav");
        assert_eq!(output_file_name("Puck", Some("ab-1")), "tts_Puck_ab-1.wav");
    }
}
