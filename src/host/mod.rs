//! Capability interface consumed from the host UI.
//!
//! The host is split along the two things this crate asks of it:
//! [`Workbench`] changes what is visible, [`Prompter`] talks to the user.
//! Every call is awaited to completion before the next one is issued.
//!
//! Workbench implementations only provide [`Workbench::dispatch`]; the named
//! capability methods are thin wrappers that build the matching [`Intent`].

mod command;
mod console;
mod recording;

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::layout::{AgentMode, Choice, PanelView, Side, SidebarView};

pub use command::{CommandTable, DispatchHost, HostMessage, SIDEBAR_LOCATION_SETTING};
pub use console::ConsolePrompter;
pub use recording::RecordingHost;

/// One state-setting request to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "intent", content = "value", rename_all = "kebab-case")]
pub enum Intent {
    /// Move the primary sidebar to a side.
    SetSidebarPosition(Side),
    /// Give the primary sidebar focus.
    FocusSidebar,
    /// Show a view in the primary sidebar.
    SwitchSidebarView(SidebarView),
    /// Hide the primary sidebar.
    CloseSidebar,
    /// Hide the auxiliary sidebar.
    CloseAuxiliaryPanel,
    /// Open the auxiliary sidebar in a mode.
    SetAuxiliaryMode(AgentMode),
    /// Give the bottom panel focus.
    FocusPanel,
    /// Show a view in the bottom panel.
    SwitchPanelView(PanelView),
    /// Flip the bottom panel between normal and maximized.
    TogglePanelMaximize,
    /// Hide the bottom panel.
    ClosePanel,
}

impl Intent {
    /// Stable key used to look the intent up in a [`CommandTable`].
    pub fn key(&self) -> String {
        match self {
            Intent::SetSidebarPosition(_) => "sidebar.position".to_string(),
            Intent::FocusSidebar => "sidebar.focus".to_string(),
            Intent::SwitchSidebarView(view) => format!("sidebar.view.{}", view.as_str()),
            Intent::CloseSidebar => "sidebar.close".to_string(),
            Intent::CloseAuxiliaryPanel => "auxiliary.close".to_string(),
            Intent::SetAuxiliaryMode(mode) => format!("auxiliary.mode.{}", mode.as_str()),
            Intent::FocusPanel => "panel.focus".to_string(),
            Intent::SwitchPanelView(view) => format!("panel.view.{}", view.as_str()),
            Intent::TogglePanelMaximize => "panel.maximize".to_string(),
            Intent::ClosePanel => "panel.close".to_string(),
        }
    }
}

/// Layout-changing half of the host capability interface.
#[allow(async_fn_in_trait)]
pub trait Workbench {
    /// Issues one intent to the host.
    async fn dispatch(&mut self, intent: Intent) -> Result<(), HostError>;

    /// Sets the host's sidebar-location setting.
    async fn set_sidebar_position(&mut self, side: Side) -> Result<(), HostError> {
        self.dispatch(Intent::SetSidebarPosition(side)).await
    }

    /// Moves focus to the primary sidebar.
    async fn focus_sidebar(&mut self) -> Result<(), HostError> {
        self.dispatch(Intent::FocusSidebar).await
    }

    /// Switches the primary sidebar to `view`.
    async fn switch_sidebar_view(&mut self, view: SidebarView) -> Result<(), HostError> {
        self.dispatch(Intent::SwitchSidebarView(view)).await
    }

    /// Closes the primary sidebar.
    async fn close_sidebar(&mut self) -> Result<(), HostError> {
        self.dispatch(Intent::CloseSidebar).await
    }

    /// Closes the auxiliary sidebar.
    async fn close_auxiliary_panel(&mut self) -> Result<(), HostError> {
        self.dispatch(Intent::CloseAuxiliaryPanel).await
    }

    /// Opens the auxiliary sidebar in `mode`.
    async fn set_auxiliary_mode(&mut self, mode: AgentMode) -> Result<(), HostError> {
        self.dispatch(Intent::SetAuxiliaryMode(mode)).await
    }

    /// Moves focus to the bottom panel.
    async fn focus_panel(&mut self) -> Result<(), HostError> {
        self.dispatch(Intent::FocusPanel).await
    }

    /// Switches the bottom panel to `view`.
    async fn switch_panel_view(&mut self, view: PanelView) -> Result<(), HostError> {
        self.dispatch(Intent::SwitchPanelView(view)).await
    }

    /// Toggles the bottom panel's maximized state.
    async fn toggle_panel_maximize(&mut self) -> Result<(), HostError> {
        self.dispatch(Intent::TogglePanelMaximize).await
    }

    /// Closes the bottom panel.
    async fn close_panel(&mut self) -> Result<(), HostError> {
        self.dispatch(Intent::ClosePanel).await
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational
    Info,
    /// Something was refused or skipped
    Warning,
    /// An action failed
    Error,
}

/// One entry of a quick pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPickItem {
    /// Main text.
    pub label: String,
    /// Secondary text shown beside the label.
    pub description: Option<String>,
}

impl QuickPickItem {
    /// Item with only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input validator: `Some(message)` rejects the input and is shown to the
/// user before re-prompting.
pub type Validator<'a> = &'a dyn Fn(&str) -> Option<String>;

/// User-facing half of the host capability interface.
///
/// `None` / `false` answers mean the user dismissed the prompt.
#[allow(async_fn_in_trait)]
pub trait Prompter {
    /// Shows a transient notification.
    async fn show_notification(&mut self, level: NoticeLevel, message: &str)
        -> Result<(), HostError>;

    /// Lets the user pick one item; returns its index.
    async fn show_quick_pick(
        &mut self,
        items: &[QuickPickItem],
        placeholder: &str,
    ) -> Result<Option<usize>, HostError>;

    /// Asks for free text. Rejected input is re-prompted until accepted or
    /// dismissed.
    async fn show_input_box(
        &mut self,
        prompt: &str,
        initial: Option<&str>,
        validator: Validator<'_>,
    ) -> Result<Option<String>, HostError>;

    /// Asks a yes/no question.
    async fn show_confirm(&mut self, message: &str) -> Result<bool, HostError>;
}

/// Pairs a [`Workbench`] with a [`Prompter`] so one value can serve both.
#[derive(Debug)]
pub struct SplitHost<W, P> {
    /// Receives layout intents.
    pub workbench: W,
    /// Talks to the user.
    pub prompter: P,
}

impl<W, P> SplitHost<W, P> {
    /// Combines `workbench` and `prompter`.
    pub fn new(workbench: W, prompter: P) -> Self {
        Self {
            workbench,
            prompter,
        }
    }
}

impl<W: Workbench, P> Workbench for SplitHost<W, P> {
    async fn dispatch(&mut self, intent: Intent) -> Result<(), HostError> {
        self.workbench.dispatch(intent).await
    }
}

impl<W, P: Prompter> Prompter for SplitHost<W, P> {
    async fn show_notification(
        &mut self,
        level: NoticeLevel,
        message: &str,
    ) -> Result<(), HostError> {
        self.prompter.show_notification(level, message).await
    }

    async fn show_quick_pick(
        &mut self,
        items: &[QuickPickItem],
        placeholder: &str,
    ) -> Result<Option<usize>, HostError> {
        self.prompter.show_quick_pick(items, placeholder).await
    }

    async fn show_input_box(
        &mut self,
        prompt: &str,
        initial: Option<&str>,
        validator: Validator<'_>,
    ) -> Result<Option<String>, HostError> {
        self.prompter.show_input_box(prompt, initial, validator).await
    }

    async fn show_confirm(&mut self, message: &str) -> Result<bool, HostError> {
        self.prompter.show_confirm(message).await
    }
}
