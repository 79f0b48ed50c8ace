//! In-memory host that records intents and replays scripted answers.

use std::collections::VecDeque;

use super::{Intent, NoticeLevel, Prompter, QuickPickItem, Validator, Workbench};
use crate::error::HostError;

#[derive(Debug, Clone)]
enum Pick {
    Label(String),
    Cancel,
}

/// Host double for tests and dry runs.
///
/// Intents are appended to [`RecordingHost::intents`]. Prompt answers are
/// consumed in order from the scripted queues; an exhausted queue behaves
/// like the user dismissing the prompt.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Intents issued so far.
    pub intents: Vec<Intent>,
    /// Notifications shown so far.
    pub notifications: Vec<(NoticeLevel, String)>,
    /// Validator messages produced by rejected input.
    pub rejections: Vec<String>,
    /// Placeholders of the quick picks shown so far.
    pub placeholders: Vec<String>,
    reject: Option<String>,
    picks: VecDeque<Pick>,
    inputs: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
}

impl RecordingHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every intent whose key equals `key` with `UnknownCapability`.
    pub fn rejecting(mut self, key: impl Into<String>) -> Self {
        self.reject = Some(key.into());
        self
    }

    /// Queues a quick-pick answer selecting the item labelled `label`.
    pub fn push_pick(&mut self, label: impl Into<String>) -> &mut Self {
        self.picks.push_back(Pick::Label(label.into()));
        self
    }

    /// Queues a dismissed quick pick.
    pub fn push_pick_cancel(&mut self) -> &mut Self {
        self.picks.push_back(Pick::Cancel);
        self
    }

    /// Queues an input-box answer.
    pub fn push_input(&mut self, text: impl Into<String>) -> &mut Self {
        self.inputs.push_back(Some(text.into()));
        self
    }

    /// Queues a dismissed input box.
    pub fn push_input_cancel(&mut self) -> &mut Self {
        self.inputs.push_back(None);
        self
    }

    /// Queues a confirmation answer.
    pub fn push_confirm(&mut self, answer: bool) -> &mut Self {
        self.confirms.push_back(answer);
        self
    }

    /// Drains and returns the recorded intents.
    pub fn take_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }
}

impl Workbench for RecordingHost {
    async fn dispatch(&mut self, intent: Intent) -> Result<(), HostError> {
        let key = intent.key();
        if self.reject.as_deref() == Some(key.as_str()) {
            return Err(HostError::UnknownCapability { capability: key });
        }
        self.intents.push(intent);
        Ok(())
    }
}

impl Prompter for RecordingHost {
    async fn show_notification(
        &mut self,
        level: NoticeLevel,
        message: &str,
    ) -> Result<(), HostError> {
        self.notifications.push((level, message.to_string()));
        Ok(())
    }

    async fn show_quick_pick(
        &mut self,
        items: &[QuickPickItem],
        placeholder: &str,
    ) -> Result<Option<usize>, HostError> {
        self.placeholders.push(placeholder.to_string());
        match self.picks.pop_front() {
            Some(Pick::Label(label)) => Ok(items.iter().position(|item| item.label == label)),
            Some(Pick::Cancel) | None => Ok(None),
        }
    }

    async fn show_input_box(
        &mut self,
        _prompt: &str,
        _initial: Option<&str>,
        validator: Validator<'_>,
    ) -> Result<Option<String>, HostError> {
        while let Some(answer) = self.inputs.pop_front() {
            let Some(text) = answer else {
                return Ok(None);
            };
            match validator(&text) {
                Some(message) => self.rejections.push(message),
                None => return Ok(Some(text)),
            }
        }
        Ok(None)
    }

    async fn show_confirm(&mut self, _message: &str) -> Result<bool, HostError> {
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}
