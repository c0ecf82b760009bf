use super::speech_model::{ModelLoader, SpeechModel};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use uuid::Uuid;

/// Speech model backed by an external synthesizer executable.
///
/// Each call spawns `{command} --model <file> --speaker <name> --sample_rate <hz>
/// --output_file <wav>` and writes the text to its stdin. The speaker list is
/// read once at load time from `{command} --model <file> --list_speakers`,
/// which must print a JSON array of names.
pub struct CommandSpeechModel {
    command: String,
    model_file: PathBuf,
    scratch_dir: PathBuf,
    speakers: Vec<String>,
}

impl CommandSpeechModel {
    async fn call_synthesizer(&self, text: &str, speaker: &str, sample_rate: u32) -> Result<PathBuf, String> {
        let output_file = self
            .scratch_dir
            .join(format!("synth_{}.wav", Uuid::new_v4().simple()));

        tracing::debug!(
            command = %self.command,
            model = %self.model_file.display(),
            speaker = speaker,
            text_length = text.len(),
            output_file = %output_file.display(),
            "Spawning synthesizer"
        );

        let mut child = Command::new(&self.command)
            .arg("--model")
            .arg(&self.model_file)
            .args(["--speaker", speaker])
            .args(["--sample_rate", &sample_rate.to_string()])
            .arg("--output_file")
            .arg(&output_file)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to spawn {}: {}", self.command, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| format!("failed to write text to synthesizer: {}", e))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| format!("synthesizer did not finish: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                status = %output.status,
                speaker = speaker,
                stderr = %stderr.trim(),
                "Synthesizer exited with failure"
            );
            return Err(format!(
                "synthesizer exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        if !output_file.is_file() {
            return Err(format!(
                "synthesizer reported success but wrote no file at {}",
                output_file.display()
            ));
        }

        Ok(output_file)
    }
}

#[async_trait]
impl SpeechModel for CommandSpeechModel {
    async fn synthesize(
        &self,
        text: &str,
        speaker: &str,
        sample_rate: u32,
    ) -> Result<PathBuf, String> {
        let start_time = std::time::Instant::now();
        let path = self.call_synthesizer(text, speaker, sample_rate).await?;

        tracing::info!(
            speaker = speaker,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            "Synthesizer call completed"
        );

        Ok(path)
    }

    fn speakers(&self) -> Vec<String> {
        self.speakers.clone()
    }
}

/// Loads models for [`CommandSpeechModel`] by asking the synthesizer for the
/// speaker list of the model file.
pub struct CommandModelLoader {
    command: String,
    scratch_dir: PathBuf,
}

impl CommandModelLoader {
    pub fn new(command: String, scratch_dir: PathBuf) -> Self {
        Self {
            command,
            scratch_dir,
        }
    }

    async fn list_speakers(&self, model_file: &Path) -> Result<Vec<String>, String> {
        let output = Command::new(&self.command)
            .arg("--model")
            .arg(model_file)
            .arg("--list_speakers")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| format!("failed to spawn {}: {}", self.command, e))?;

        if !output.status.success() {
            return Err(format!(
                "speaker listing exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        parse_speaker_list(&output.stdout)
    }
}

#[async_trait]
impl ModelLoader for CommandModelLoader {
    async fn load(&self, model_file: &Path) -> Result<Arc<dyn SpeechModel>, String> {
        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| format!("failed to create scratch dir: {}", e))?;

        let speakers = self.list_speakers(model_file).await?;
        tracing::info!(
            model = %model_file.display(),
            speaker_count = speakers.len(),
            "Model loaded into synthesizer"
        );

        Ok(Arc::new(CommandSpeechModel {
            command: self.command.clone(),
            model_file: model_file.to_path_buf(),
            scratch_dir: self.scratch_dir.clone(),
            speakers,
        }))
    }
}

fn parse_speaker_list(stdout: &[u8]) -> Result<Vec<String>, String> {
    serde_json::from_slice::<Vec<String>>(stdout)
        .map_err(|e| format!("invalid speaker list from synthesizer: {}", e))
}
