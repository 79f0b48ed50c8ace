//! Intent resolution and the JSON Lines command stream.
//!
//! A [`CommandTable`] maps intent keys to host command ids. [`DispatchHost`]
//! resolves each intent through it and writes one message per line:
//!
//! ```text
//! {"kind":"setting","key":"workbench.sideBar.location","value":"right"}
//! {"kind":"command","id":"workbench.action.focusSideBar"}
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{Intent, Workbench};
use crate::error::HostError;
use crate::layout::Choice;

/// Host setting that controls which side the primary sidebar docks to.
pub const SIDEBAR_LOCATION_SETTING: &str = "workbench.sideBar.location";

const BUILT_IN_COMMANDS: &[(&str, &str)] = &[
    ("sidebar.position", SIDEBAR_LOCATION_SETTING),
    ("sidebar.focus", "workbench.action.focusSideBar"),
    ("sidebar.view.explorer", "workbench.view.explorer"),
    ("sidebar.view.search", "workbench.view.search"),
    ("sidebar.view.scm", "workbench.view.scm"),
    ("sidebar.view.extensions", "workbench.view.extensions"),
    ("sidebar.view.debug", "workbench.view.debug"),
    ("sidebar.close", "workbench.action.closeSidebar"),
    ("auxiliary.close", "workbench.action.closeAuxiliaryBar"),
    ("auxiliary.mode.agent", "workbench.action.chat.openAgent"),
    ("auxiliary.mode.ask", "workbench.action.chat.openAsk"),
    ("auxiliary.mode.plan", "workbench.action.chat.openPlan"),
    ("panel.focus", "workbench.action.focusPanel"),
    ("panel.view.terminal", "workbench.action.terminal.focus"),
    ("panel.view.problems", "workbench.action.problems.focus"),
    ("panel.view.output", "workbench.action.output.focus"),
    ("panel.view.debug-console", "workbench.debug.action.focusRepl"),
    ("panel.maximize", "workbench.action.toggleMaximizedPanel"),
    ("panel.close", "workbench.action.closePanel"),
];

/// One line of the host command stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HostMessage {
    /// Run a host command.
    Command {
        /// Command id.
        id: String,
    },
    /// Update a host setting.
    Setting {
        /// Setting key.
        key: String,
        /// New value.
        value: String,
    },
}

/// Intent key to host command id mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    commands: BTreeMap<String, String>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self {
            commands: BUILT_IN_COMMANDS
                .iter()
                .map(|(key, id)| (key.to_string(), id.to_string()))
                .collect(),
        }
    }
}

impl CommandTable {
    /// Built-in table with `overrides` applied. An empty override value
    /// removes the mapping.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut table = Self::default();
        for (key, id) in overrides {
            let id = id.trim();
            if id.is_empty() {
                table.commands.remove(key);
            } else {
                table.commands.insert(key.clone(), id.to_string());
            }
        }
        table
    }

    /// Command id for an intent key, if mapped.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.commands.get(key).map(String::as_str)
    }

    /// All mappings, sorted by intent key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolves an intent to the message the host understands.
    ///
    /// Sidebar position becomes a setting update; everything else is a
    /// command invocation.
    pub fn resolve(&self, intent: &Intent) -> Result<HostMessage, HostError> {
        let key = intent.key();
        let id = self
            .get(&key)
            .ok_or_else(|| HostError::UnknownCapability {
                capability: key.clone(),
            })?
            .to_string();

        Ok(match intent {
            Intent::SetSidebarPosition(side) => HostMessage::Setting {
                key: id,
                value: side.as_str().to_string(),
            },
            _ => HostMessage::Command { id },
        })
    }
}

/// Workbench that streams resolved intents as JSON Lines.
///
/// Each intent is followed by `delay` so the host can settle before the next
/// one arrives.
pub struct DispatchHost<W> {
    writer: W,
    table: CommandTable,
    delay: Duration,
}

impl<W: AsyncWrite + Unpin> DispatchHost<W> {
    /// Creates a host writing to `writer`.
    pub fn new(writer: W, table: CommandTable, delay: Duration) -> Self {
        Self {
            writer,
            table,
            delay,
        }
    }

    /// Consumes the host, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: AsyncWrite + Unpin> Workbench for DispatchHost<W> {
    async fn dispatch(&mut self, intent: Intent) -> Result<(), HostError> {
        let message = self.table.resolve(&intent)?;
        let mut line = serde_json::to_vec(&message).map_err(std::io::Error::from)?;
        line.push(b'\n');

        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        tracing::debug!(intent = %intent.key(), ?message, "Dispatched intent");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
