mod prompt;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use vox_core::audio::utils::output_file_name;
use vox_core::audio::write_wav_file;
use vox_core::{GeminiClient, Synthesizer, VoxConfig, VOICES};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they do not interleave with the prompts
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,vox_cli=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Load configuration (defaults + env + optional TOML overlay); fail before prompting
    let cfg = VoxConfig::load();
    cfg.validate()?;
    let synth = Synthesizer::new(Arc::new(GeminiClient::new(cfg.gemini.clone())?));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    prompt::print_voices(&mut out, VOICES)?;
    let voice = prompt::prompt_voice(&mut input, &mut out)?;
    let text = prompt::prompt_text(&mut input, &mut out)?;

    info!(target: "vox_cli", voice = voice.name, model = %cfg.gemini.model, "Generating speech");
    let pcm = synth.synthesize(voice.name, &text).await?;

    let dir = cfg.output.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(output_file_name(voice.name, None));
    write_wav_file(&path, &pcm.data, pcm.format)?;

    writeln!(
        out,
        "\n✅ Saved audio as {} with voice '{}' ({:.1}s)",
        path.display(),
        voice.name,
        pcm.duration().as_secs_f64()
    )?;
    Ok(())
}
