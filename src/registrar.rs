//! Per-layout actions.
//!
//! The registrar keeps one invocable action per layout, keyed by
//! [`command_key`]. It holds no reference to the store: callers hand it the
//! current Layout Set through [`CommandRegistrar::resync`] after every load or
//! mutation.

use std::collections::BTreeMap;

use crate::applier::LayoutApplier;
use crate::error::HostError;
use crate::host::Workbench;
use crate::layout::{command_key, LayoutConfig};

/// Prefix of every per-layout action id.
pub const LAYOUT_ACTION_PREFIX: &str = "layoutManager.layout.";

/// Opens the layout quick pick.
pub const SELECT_LAYOUT: &str = "layoutManager.selectLayout";
/// Runs the create wizard.
pub const CREATE_LAYOUT: &str = "layoutManager.createLayout";
/// Opens the edit/delete menu for custom layouts.
pub const MANAGE_LAYOUTS: &str = "layoutManager.manageLayouts";
/// Runs the edit wizard.
pub const EDIT_LAYOUT: &str = "layoutManager.editLayout";

/// Fixed actions, in registration order.
pub const FIXED_ACTIONS: [&str; 4] = [SELECT_LAYOUT, CREATE_LAYOUT, MANAGE_LAYOUTS, EDIT_LAYOUT];

/// Status bar entry descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBarItem {
    /// Text, with an icon reference.
    pub text: &'static str,
    /// Hover text.
    pub tooltip: &'static str,
    /// Action run on click.
    pub action: &'static str,
}

/// The layout switcher shown in the status bar.
pub const STATUS_BAR_ITEM: StatusBarItem = StatusBarItem {
    text: "$(layout) Layouts",
    tooltip: "Switch Layout",
    action: SELECT_LAYOUT,
};

/// Action id for a layout key.
pub fn action_id(key: &str) -> String {
    format!("{LAYOUT_ACTION_PREFIX}{key}")
}

/// Map from action key to layout.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistrar {
    actions: BTreeMap<String, LayoutConfig>,
}

impl CommandRegistrar {
    /// Creates an empty registrar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every registered action and registers `layouts` in order.
    ///
    /// Layouts whose names normalize to the same key overwrite each other;
    /// the last one wins.
    pub fn resync(&mut self, layouts: &[LayoutConfig]) {
        self.actions.clear();
        for layout in layouts {
            let key = layout.key();
            if let Some(previous) = self.actions.insert(key.clone(), layout.clone()) {
                tracing::debug!(
                    key = %key,
                    replaced = %previous.name,
                    by = %layout.name,
                    "Layout action key collision"
                );
            }
        }
        tracing::debug!(count = self.actions.len(), "Registered layout actions");
    }

    /// Number of registered per-layout actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` when no per-layout action is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Layout registered under `key`.
    pub fn get(&self, key: &str) -> Option<&LayoutConfig> {
        self.actions.get(key)
    }

    /// Resolves a layout name, key or full action id.
    pub fn lookup(&self, target: &str) -> Option<&LayoutConfig> {
        let target = target.trim();
        let key = target.strip_prefix(LAYOUT_ACTION_PREFIX).unwrap_or(target);
        self.get(&command_key(key))
    }

    /// Per-layout action ids, sorted by key.
    pub fn layout_actions(&self) -> impl Iterator<Item = (String, &LayoutConfig)> {
        self.actions.iter().map(|(key, layout)| (action_id(key), layout))
    }

    /// Every action id: the fixed ones first, then one per layout.
    pub fn actions(&self) -> Vec<String> {
        FIXED_ACTIONS
            .iter()
            .map(|id| id.to_string())
            .chain(self.actions.keys().map(|key| action_id(key)))
            .collect()
    }

    /// Runs the action for `key`.
    ///
    /// Returns `Ok(None)` when nothing is registered under `key`, otherwise
    /// the layout that was applied.
    pub async fn invoke<W: Workbench>(
        &self,
        key: &str,
        applier: &mut LayoutApplier,
        host: &mut W,
    ) -> Result<Option<&LayoutConfig>, HostError> {
        let Some(layout) = self.lookup(key) else {
            return Ok(None);
        };
        applier.apply(host, layout).await?;
        Ok(Some(layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Intent, RecordingHost};
    use crate::layout::{default_layouts, PanelView, Side, SidebarView};

    #[test]
    fn test_resync_registers_defaults() {
        let mut registrar = CommandRegistrar::new();
        registrar.resync(&default_layouts());
        assert_eq!(registrar.len(), 4);
        assert_eq!(
            registrar.actions(),
            vec![
                "layoutManager.selectLayout",
                "layoutManager.createLayout",
                "layoutManager.manageLayouts",
                "layoutManager.editLayout",
                "layoutManager.layout.agent",
                "layoutManager.layout.editor",
                "layoutManager.layout.git",
                "layoutManager.layout.search",
            ]
        );
    }

    #[test]
    fn test_resync_discards_previous_entries() {
        let mut registrar = CommandRegistrar::new();
        registrar.resync(&default_layouts());
        registrar.resync(&[LayoutConfig::new("Focus")]);
        assert_eq!(registrar.len(), 1);
        assert!(registrar.get("search").is_none());
        assert!(registrar.get("focus").is_some());
    }

    #[test]
    fn test_key_collision_last_wins() {
        let first = LayoutConfig::new("My Layout").with_panel(PanelView::Output, false);
        let second = LayoutConfig::new("my   layout").with_panel(PanelView::Terminal, true);
        let mut registrar = CommandRegistrar::new();
        registrar.resync(&[first, second.clone()]);

        assert_eq!(registrar.len(), 1);
        assert_eq!(registrar.get("my_layout"), Some(&second));
    }

    #[test]
    fn test_lookup_accepts_name_key_or_action_id() {
        let mut registrar = CommandRegistrar::new();
        registrar.resync(&[LayoutConfig::new("Deep Work")]);

        assert!(registrar.lookup("Deep Work").is_some());
        assert!(registrar.lookup("deep_work").is_some());
        assert!(registrar.lookup("layoutManager.layout.deep_work").is_some());
        assert!(registrar.lookup("shallow").is_none());
    }

    #[test]
    fn test_status_bar_item_opens_selector() {
        assert_eq!(STATUS_BAR_ITEM.action, SELECT_LAYOUT);
        assert_eq!(STATUS_BAR_ITEM.text, "$(layout) Layouts");
        assert_eq!(STATUS_BAR_ITEM.tooltip, "Switch Layout");
    }

    #[tokio::test]
    async fn test_invoke_applies_registered_layout() {
        let mut registrar = CommandRegistrar::new();
        registrar.resync(&default_layouts());
        let mut applier = LayoutApplier::new();
        let mut host = RecordingHost::new();

        let applied = registrar
            .invoke("search", &mut applier, &mut host)
            .await
            .expect("invoke failed");
        assert_eq!(applied.map(|l| l.name.as_str()), Some("Search"));
        assert_eq!(
            &host.intents[..3],
            &[
                Intent::SetSidebarPosition(Side::Right),
                Intent::FocusSidebar,
                Intent::SwitchSidebarView(SidebarView::Search),
            ]
        );
    }

    #[tokio::test]
    async fn test_invoke_unknown_key_does_nothing() {
        let registrar = CommandRegistrar::new();
        let mut applier = LayoutApplier::new();
        let mut host = RecordingHost::new();

        let applied = registrar
            .invoke("missing", &mut applier, &mut host)
            .await
            .expect("invoke failed");
        assert!(applied.is_none());
        assert!(host.intents.is_empty());
    }
}
