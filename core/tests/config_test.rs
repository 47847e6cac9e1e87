use serial_test::serial;
use std::path::PathBuf;

use vox_core::{TtsError, VoxConfig};

const VARS: [&str; 7] = [
    "GOOGLE_API_KEY",
    "GEMINI_BASE_URL",
    "GEMINI_TTS_MODEL",
    "GEMINI_TIMEOUT_MS",
    "VOX_HOST",
    "VOX_PORT",
    "VOX_OUTPUT_DIR",
];

fn clear_env() {
    for v in VARS {
        std::env::remove_var(v);
    }
}

fn temp_toml(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vox_{}_{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
#[serial]
fn missing_file_uses_env() {
    clear_env();
    std::env::set_var("GOOGLE_API_KEY", "env-key");
    std::env::set_var("VOX_PORT", "9001");
    std::env::set_var("VOX_OUTPUT_DIR", "/tmp/vox-out");

    let cfg = VoxConfig::load_from(std::path::Path::new("/nonexistent/vox.toml"));
    assert_eq!(cfg.gemini.api_key.as_deref(), Some("env-key"));
    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.server.port, 9001);
    assert_eq!(cfg.output.dir, Some(PathBuf::from("/tmp/vox-out")));
    assert!(cfg.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn toml_overrides_env() {
    clear_env();
    std::env::set_var("GOOGLE_API_KEY", "env-key");
    let path = temp_toml(
        "override",
        r#"
        [gemini]
        model = "custom-tts"

        [server]
        host = "0.0.0.0"
        port = 8080
        "#,
    );

    let cfg = VoxConfig::load_from(&path);
    assert_eq!(cfg.gemini.api_key.as_deref(), Some("env-key"));
    assert_eq!(cfg.gemini.model, "custom-tts");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 8080);

    let _ = std::fs::remove_file(&path);
    clear_env();
}

#[test]
#[serial]
fn malformed_toml_falls_back_to_env() {
    clear_env();
    let path = temp_toml("broken", "[server\nport = ");

    let cfg = VoxConfig::load_from(&path);
    assert_eq!(cfg.server.port, 8000);

    let _ = std::fs::remove_file(&path);
}

#[test]
#[serial]
fn validate_fails_fast_without_credential() {
    clear_env();
    let cfg = VoxConfig::from_env();
    assert!(matches!(
        cfg.validate(),
        Err(TtsError::ConfigurationError(_))
    ));
}
