//! Layout application.
//!
//! Translates one [`LayoutConfig`] into an ordered sequence of [`Workbench`]
//! intents. Sub-components are always processed primary sidebar, then
//! auxiliary sidebar, then panel:
//!
//! - the two sidebars write the same sidebar-location setting, so when both
//!   are configured the auxiliary step wins and the primary sidebar ends up
//!   opposite the auxiliary one, whatever position it asked for;
//! - the maximize toggle depends on [`LayoutSessionState::panel_maximized`],
//!   which only this module mutates.
//!
//! There is no un-maximize path. A panel that is already maximized stays
//! maximized when a later layout asks for `maximized: false`; the flag is
//! only cleared by a layout that closes the panel.
//!
//! Failures are not retried or rolled back. The first host error aborts the
//! sequence and is returned unchanged.

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::Workbench;
use crate::layout::{AuxiliarySidebar, LayoutConfig, Panel, PrimarySidebar};

/// Last-known host state carried between applications.
///
/// Persisted per workspace by [`crate::store::LayoutStore::save_session`] so
/// separate invocations share one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSessionState {
    /// Whether this session believes the bottom panel is maximized.
    pub panel_maximized: bool,
}

/// Applies layouts for one UI context.
///
/// Takes `&mut self` per application, so one session never has two
/// applications in flight.
#[derive(Debug, Default)]
pub struct LayoutApplier {
    state: LayoutSessionState,
}

impl LayoutApplier {
    /// Creates an applier with a fresh session (panel not maximized).
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a session from a known state.
    pub fn with_state(state: LayoutSessionState) -> Self {
        Self { state }
    }

    /// Current session state.
    pub fn state(&self) -> LayoutSessionState {
        self.state
    }

    /// Drives `host` to `layout`.
    pub async fn apply<W: Workbench>(
        &mut self,
        host: &mut W,
        layout: &LayoutConfig,
    ) -> Result<(), HostError> {
        tracing::debug!(layout = %layout.name, state = ?self.state, "Applying layout");

        apply_primary_sidebar(host, layout.primary_sidebar.as_ref()).await?;
        apply_auxiliary_sidebar(host, layout.auxiliary_sidebar.as_ref()).await?;
        self.apply_panel(host, layout.panel.as_ref()).await?;

        tracing::info!(layout = %layout.name, "Applied layout");
        Ok(())
    }

    async fn apply_panel<W: Workbench>(
        &mut self,
        host: &mut W,
        panel: Option<&Panel>,
    ) -> Result<(), HostError> {
        let Some(panel) = panel else {
            host.close_panel().await?;
            self.state.panel_maximized = false;
            return Ok(());
        };

        host.focus_panel().await?;
        host.switch_panel_view(panel.view).await?;
        if panel.maximized && !self.state.panel_maximized {
            host.toggle_panel_maximize().await?;
            self.state.panel_maximized = true;
        }
        Ok(())
    }
}

async fn apply_primary_sidebar<W: Workbench>(
    host: &mut W,
    sidebar: Option<&PrimarySidebar>,
) -> Result<(), HostError> {
    match sidebar {
        Some(sidebar) => {
            host.set_sidebar_position(sidebar.position).await?;
            host.focus_sidebar().await?;
            host.switch_sidebar_view(sidebar.view).await
        }
        None => host.close_sidebar().await,
    }
}

async fn apply_auxiliary_sidebar<W: Workbench>(
    host: &mut W,
    auxiliary: Option<&AuxiliarySidebar>,
) -> Result<(), HostError> {
    host.close_auxiliary_panel().await?;
    let Some(auxiliary) = auxiliary else {
        return Ok(());
    };

    // Overrides whatever the primary step set.
    host.set_sidebar_position(auxiliary.position.opposite()).await?;
    host.set_auxiliary_mode(auxiliary.mode).await
}
