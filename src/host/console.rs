//! Line-based terminal prompts.
//!
//! Prompts go to the writer (stderr for the CLI, so stdout stays a clean
//! command stream); answers are read one line at a time. End of input
//! dismisses whatever prompt is open.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stderr};

use super::{NoticeLevel, Prompter, QuickPickItem, Validator};
use crate::error::HostError;

/// Prompter over a line reader and a writer.
pub struct ConsolePrompter<R, W> {
    reader: R,
    writer: W,
}

impl ConsolePrompter<BufReader<Stdin>, Stderr> {
    /// Prompts on stderr, answers from stdin.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stderr())
    }
}

impl<R, W> ConsolePrompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a prompter reading from `reader` and writing to `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    async fn write(&mut self, text: &str) -> Result<(), HostError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Next line without its terminator, or `None` at end of input.
    async fn read_line(&mut self) -> Result<Option<String>, HostError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R, W> Prompter for ConsolePrompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn show_notification(
        &mut self,
        level: NoticeLevel,
        message: &str,
    ) -> Result<(), HostError> {
        let prefix = match level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        self.write(&format!("{prefix}: {message}\n")).await
    }

    async fn show_quick_pick(
        &mut self,
        items: &[QuickPickItem],
        placeholder: &str,
    ) -> Result<Option<usize>, HostError> {
        let mut menu = format!("{placeholder}\n");
        for (i, item) in items.iter().enumerate() {
            match &item.description {
                Some(description) => {
                    menu.push_str(&format!("  {}) {}  {}\n", i + 1, item.label, description))
                }
                None => menu.push_str(&format!("  {}) {}\n", i + 1, item.label)),
            }
        }
        self.write(&menu).await?;

        loop {
            self.write("> ").await?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => {
                    let by_label = items
                        .iter()
                        .position(|item| item.label.eq_ignore_ascii_case(answer));
                    if by_label.is_some() {
                        return Ok(by_label);
                    }
                    self.write(&format!("Enter a number between 1 and {}\n", items.len()))
                        .await?;
                }
            }
        }
    }

    async fn show_input_box(
        &mut self,
        prompt: &str,
        initial: Option<&str>,
        validator: Validator<'_>,
    ) -> Result<Option<String>, HostError> {
        loop {
            match initial {
                Some(initial) => self.write(&format!("{prompt} [{initial}]: ")).await?,
                None => self.write(&format!("{prompt}: ")).await?,
            }
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            let text = match initial {
                Some(initial) if line.is_empty() => initial.to_string(),
                _ => line,
            };
            match validator(&text) {
                Some(message) => self.write(&format!("{message}\n")).await?,
                None => return Ok(Some(text)),
            }
        }
    }

    async fn show_confirm(&mut self, message: &str) -> Result<bool, HostError> {
        self.write(&format!("{message} [y/N]: ")).await?;
        let answer = self.read_line().await?.unwrap_or_default();
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}
