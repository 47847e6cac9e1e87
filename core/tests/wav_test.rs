//! WAV container conformance tests
//!
//! Containers produced by the writer are read back with `hound`, an
//! independent reader, and must report the same format and sample data.

use std::io::Cursor;

use vox_core::audio::{encode_wav, write_wav, write_wav_file, PcmFormat, WAV_HEADER_LEN};
use vox_core::TtsError;

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

fn read_back(bytes: &[u8]) -> hound::WavReader<Cursor<&[u8]>> {
    hound::WavReader::new(Cursor::new(bytes)).expect("hound parses container")
}

#[test]
fn round_trip_through_hound() {
    let cases = [
        PcmFormat::new(1, 24_000, 16),
        PcmFormat::new(2, 44_100, 16),
        PcmFormat::new(1, 8_000, 8),
        PcmFormat::new(2, 48_000, 24),
        PcmFormat::new(1, 16_000, 32),
    ];

    for format in cases {
        let frames = 257;
        let pcm = pattern(frames * format.block_align() as usize);
        let wav = encode_wav(&pcm, format).unwrap();

        let reader = read_back(&wav);
        let spec = reader.spec();
        assert_eq!(spec.channels, format.channels, "{format:?}");
        assert_eq!(spec.sample_rate, format.sample_rate_hz, "{format:?}");
        assert_eq!(spec.bits_per_sample, format.bits_per_sample, "{format:?}");
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(
            reader.len() as usize,
            frames * format.channels as usize,
            "{format:?}"
        );
        assert_eq!(&wav[WAV_HEADER_LEN..WAV_HEADER_LEN + pcm.len()], &pcm[..]);
    }
}

#[test]
fn sixteen_bit_samples_decode_to_input() {
    let samples: Vec<i16> = vec![0, 1, -1, i16::MAX, i16::MIN, 1234, -4321];
    let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let wav = encode_wav(&pcm, PcmFormat::default()).unwrap();

    let mut reader = read_back(&wav);
    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, samples);
}

#[test]
fn odd_length_eight_bit_payload_is_readable() {
    let pcm = pattern(5);
    let wav = encode_wav(&pcm, PcmFormat::new(1, 8_000, 8)).unwrap();
    let reader = read_back(&wav);
    assert_eq!(reader.len(), 5);
}

#[test]
fn misaligned_payload_is_rejected_before_writing() {
    let mut sink = Vec::new();
    let err = write_wav(&pattern(7), &mut sink, PcmFormat::new(2, 24_000, 16)).unwrap_err();
    assert!(matches!(err, TtsError::InvalidFormat(_)));
    assert!(sink.is_empty());
}

#[test]
fn file_writer_leaves_no_file_on_invalid_input() {
    let dir = std::env::temp_dir().join(format!("vox_wav_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("invalid.wav");

    let err = write_wav_file(&path, &pattern(3), PcmFormat::default()).unwrap_err();
    assert!(matches!(err, TtsError::InvalidFormat(_)));
    assert!(!path.exists());
    assert!(!dir.join("invalid.wav.part").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn file_writer_produces_complete_container() {
    let dir = std::env::temp_dir().join(format!("vox_wav_file_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tts_Kore.wav");

    let pcm = pattern(48_000);
    write_wav_file(&path, &pcm, PcmFormat::default()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), WAV_HEADER_LEN + 48_000);
    assert!(!dir.join("tts_Kore.wav.part").exists());
    let reader = read_back(&bytes);
    assert_eq!(reader.spec().sample_rate, 24_000);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn file_writer_reports_unwritable_destination() {
    let path = std::env::temp_dir()
        .join("vox_missing_dir_for_test")
        .join("nested")
        .join("out.wav");
    let err = write_wav_file(&path, &pattern(2), PcmFormat::default()).unwrap_err();
    assert!(matches!(err, TtsError::IoError(_)));
}
