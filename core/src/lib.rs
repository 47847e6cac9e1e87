// Vox Core Library
// Text-to-speech over a generative speech API, framed as WAV

pub mod audio;
pub mod config;
pub mod synth;
pub mod voices;

// Export core types
pub use audio::{encode_wav, write_wav, write_wav_file, PcmAudioBuffer, PcmFormat};
pub use config::{GeminiConfig, OutputConfig, ServerConfig, VoxConfig};
pub use synth::gemini::GeminiClient;
pub use synth::{AudioPayload, InlineAudio, SpeechBackend, SynthesisRequest, Synthesizer};
pub use voices::{Voice, VOICES};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
pub type Result<T> = std::result::Result<T, TtsError>;
