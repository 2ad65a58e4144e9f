//! Line-based voice stand-in.
//!
//! Each typed line is one utterance: it arrives as a final transcript
//! followed by silence, so short answers still end the turn. Blank lines are
//! silence. End of input closes the transcript channel.
//!
//! Only one reader task runs at a time. `stop_listening` aborts it, and
//! `Lines::next_line` is cancel safe, so a line typed after a timed-out
//! turn stays buffered for the next listen.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::ports::{TranscriptEvent, VoiceError, VoiceIo};

/// Voice over stdin/stdout.
pub type TerminalVoice = LineVoice<BufReader<io::Stdin>, io::Stdout>;

impl TerminalVoice {
    pub fn stdio() -> Self {
        LineVoice::new(BufReader::new(io::stdin()), io::stdout())
    }
}

/// Voice over any line reader and writer.
pub struct LineVoice<R, W> {
    lines: Arc<Mutex<Lines<R>>>,
    reader: Mutex<Option<JoinHandle<()>>>,
    out: Mutex<W>,
    speaker: String,
    prompt: String,
}

impl<R, W> LineVoice<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: Arc::new(Mutex::new(reader.lines())),
            reader: Mutex::new(None),
            out: Mutex::new(writer),
            speaker: "Sparks".to_string(),
            prompt: "You: ".to_string(),
        }
    }

    /// Label printed before each spoken line.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Consumes the voice and returns the writer.
    pub fn into_writer(self) -> W {
        self.out.into_inner()
    }

    async fn abort_reader(&self) {
        if let Some(handle) = self.reader.lock().await.take() {
            handle.abort();
            // Wait for the task to drop its hold on the line reader.
            let _ = handle.await;
        }
    }

    async fn write(&self, text: &str) -> std::io::Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(text.as_bytes()).await?;
        out.flush().await
    }
}

#[async_trait]
impl<R, W> VoiceIo for LineVoice<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send,
{
    async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        self.write(&format!("{}: {}\n", self.speaker, text))
            .await
            .map_err(|e| VoiceError::Synthesis(e.to_string()))
    }

    async fn start_listening(&self) -> Result<mpsc::Receiver<TranscriptEvent>, VoiceError> {
        self.write(&self.prompt)
            .await
            .map_err(|e| VoiceError::Recognition(e.to_string()))?;

        self.abort_reader().await;

        let (tx, rx) = mpsc::channel(4);
        let lines = Arc::clone(&self.lines);

        let handle = tokio::spawn(async move {
            let mut lines = lines.lock().await;
            loop {
                let events = match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => {
                        if tx.send(TranscriptEvent::Silence).await.is_err() {
                            return;
                        }
                        continue;
                    }
                    Ok(Some(line)) => vec![
                        TranscriptEvent::Final(line.trim().to_string()),
                        TranscriptEvent::Silence,
                    ],
                    Ok(None) => Vec::new(),
                    Err(e) => vec![TranscriptEvent::Error(e.to_string())],
                };
                for event in events {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                return;
            }
        });
        *self.reader.lock().await = Some(handle);

        Ok(rx)
    }

    async fn stop_listening(&self) -> Result<(), VoiceError> {
        self.abort_reader().await;
        Ok(())
    }
}
