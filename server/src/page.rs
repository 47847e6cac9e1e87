//! Static HTML page with the voice catalog embedded as JSON.

use vox_core::Voice;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Vox Text-to-Speech</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; }
  textarea { width: 100%; min-height: 8rem; }
  #status { color: #a00; min-height: 1.5em; }
</style>
</head>
<body>
<h1>Vox Text-to-Speech</h1>
<label for="voice">Voice</label>
<select id="voice"></select>
<p><textarea id="text" placeholder="Enter the text you want to speak"></textarea></p>
<button id="speak">Generate</button>
<p id="status"></p>
<audio id="player" controls></audio>
<script id="voices" type="application/json">{{VOICES_JSON}}</script>
<script>
  const voices = JSON.parse(document.getElementById("voices").textContent);
  const select = document.getElementById("voice");
  for (const v of voices) {
    const opt = document.createElement("option");
    opt.value = v.name;
    opt.textContent = v.name + " (" + v.style + ")";
    select.appendChild(opt);
  }
  document.getElementById("speak").addEventListener("click", async () => {
    const status = document.getElementById("status");
    status.textContent = "Generating...";
    const resp = await fetch("/api/tts", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ voice: select.value, text: document.getElementById("text").value }),
    });
    if (!resp.ok) {
      const body = await resp.json().catch(() => ({ error: resp.statusText }));
      status.textContent = body.error;
      return;
    }
    status.textContent = "";
    document.getElementById("player").src = URL.createObjectURL(await resp.blob());
  });
</script>
</body>
</html>
"#;

/// Render the index page for the given voices.
pub fn render_index(voices: &[Voice]) -> String {
    // `</` would let the JSON terminate the script element early
    let json = serde_json::to_string(voices)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");
    INDEX_TEMPLATE.replace("{{VOICES_JSON}}", &json)
}
