//! Line-oriented prompts for the interactive demo.
//!
//! Generic over the reader/writer so the flow can be driven from tests.

use std::io::{BufRead, Write};

use vox_core::voices::{self, Voice};
use vox_core::{Result, TtsError};

/// Print the numbered voice menu (1-based).
pub fn print_voices<W: Write>(out: &mut W, list: &[Voice]) -> Result<()> {
    writeln!(out, "\nAvailable Voices:")?;
    for (i, v) in list.iter().enumerate() {
        writeln!(out, "{}. {} ({})", i + 1, v.name, v.style)?;
    }
    Ok(())
}

fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(TtsError::InvalidArgument("Unexpected end of input".into()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask for a voice number and resolve it against the catalog.
pub fn prompt_voice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<&'static Voice> {
    let answer = read_line(input, out, "\nChoose a voice (number): ")?;
    let choice: usize = answer.trim().parse().map_err(|_| {
        TtsError::InvalidArgument(format!("'{}' is not a voice number", answer.trim()))
    })?;
    voices::by_menu_index(choice).ok_or_else(|| {
        TtsError::InvalidArgument(format!(
            "Voice number must be between 1 and {}",
            voices::VOICES.len()
        ))
    })
}

/// Ask for the text to speak; empty text is rejected.
pub fn prompt_text<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    let text = read_line(input, out, "Enter the text you want to speak: ")?;
    if text.trim().is_empty() {
        return Err(TtsError::InvalidArgument("Text must not be empty".into()));
    }
    Ok(text)
}
