//! Interactive layout builder.
//!
//! Walks the user through name, primary sidebar, auxiliary sidebar and panel.
//! Dismissing any prompt abandons the whole wizard.

use crate::error::HostError;
use crate::host::{Prompter, QuickPickItem};
use crate::layout::{
    validate_name, AgentMode, AuxiliarySidebar, Choice, LayoutConfig, Panel, PanelView,
    PrimarySidebar, Side,
};

const NONE_LABEL: &str = "None";
const CURRENT: &str = "current";

/// Prompt-driven builder for one layout.
pub struct LayoutWizard<'a> {
    existing: &'a [String],
    original: Option<&'a LayoutConfig>,
}

impl<'a> LayoutWizard<'a> {
    /// Wizard for a new layout. `existing` are the names already taken.
    pub fn create(existing: &'a [String]) -> Self {
        Self {
            existing,
            original: None,
        }
    }

    /// Wizard pre-filled from `original`. Keeping the original name is
    /// allowed.
    pub fn edit(existing: &'a [String], original: &'a LayoutConfig) -> Self {
        Self {
            existing,
            original: Some(original),
        }
    }

    /// Runs every step. Returns `Ok(None)` if the user dismissed a prompt.
    pub async fn run<P: Prompter>(&self, prompter: &mut P) -> Result<Option<LayoutConfig>, HostError> {
        let Some(name) = self.ask_name(prompter).await? else {
            return Ok(None);
        };
        let mut layout = LayoutConfig::new(name);

        let Some(primary) = self.ask_primary_sidebar(prompter).await? else {
            return Ok(None);
        };
        layout.primary_sidebar = primary;

        let primary_side = layout.primary_sidebar.map(|p| p.position);
        let Some(auxiliary) = self.ask_auxiliary_sidebar(prompter, primary_side).await? else {
            return Ok(None);
        };
        layout.auxiliary_sidebar = auxiliary;

        let Some(panel) = self.ask_panel(prompter).await? else {
            return Ok(None);
        };
        layout.panel = panel;

        tracing::debug!(layout = %layout.name, summary = %layout.summary(), "Wizard finished");
        Ok(Some(layout))
    }

    async fn ask_name<P: Prompter>(&self, prompter: &mut P) -> Result<Option<String>, HostError> {
        let excluded = self.original.map(|l| l.name.as_str());
        let validator = |candidate: &str| {
            validate_name(
                candidate,
                self.existing.iter().map(String::as_str),
                excluded,
            )
            .err()
            .map(|e| e.to_string())
        };
        let name = prompter
            .show_input_box("Layout name", excluded, &validator)
            .await?;
        Ok(name.map(|n| n.trim().to_string()))
    }

    /// `Some(None)` means the user chose to close the sidebar.
    async fn ask_primary_sidebar<P: Prompter>(
        &self,
        prompter: &mut P,
    ) -> Result<Option<Option<PrimarySidebar>>, HostError> {
        let current = self.original.and_then(|l| l.primary_sidebar);
        let Some(view) = pick_optional(
            prompter,
            "Primary sidebar view",
            current.map(|p| p.view),
            self.original.is_some(),
        )
        .await?
        else {
            return Ok(None);
        };
        let Some(view) = view else {
            return Ok(Some(None));
        };

        let Some(position) =
            pick(prompter, "Primary sidebar position", current.map(|p| p.position)).await?
        else {
            return Ok(None);
        };
        Ok(Some(Some(PrimarySidebar { view, position })))
    }

    /// The auxiliary sidebar goes opposite the primary one; its side is only
    /// asked for when there is no primary sidebar.
    async fn ask_auxiliary_sidebar<P: Prompter>(
        &self,
        prompter: &mut P,
        primary_side: Option<Side>,
    ) -> Result<Option<Option<AuxiliarySidebar>>, HostError> {
        let current = self.original.and_then(|l| l.auxiliary_sidebar);
        let Some(mode) = pick_optional::<_, AgentMode>(
            prompter,
            "Agent sidebar mode",
            current.map(|a| a.mode),
            self.original.is_some(),
        )
        .await?
        else {
            return Ok(None);
        };
        let Some(mode) = mode else {
            return Ok(Some(None));
        };

        if let Some(primary) = primary_side {
            return Ok(Some(Some(AuxiliarySidebar::opposite_to(primary, mode))));
        }
        let Some(position) =
            pick(prompter, "Agent sidebar position", current.map(|a| a.position)).await?
        else {
            return Ok(None);
        };
        Ok(Some(Some(AuxiliarySidebar { position, mode })))
    }

    async fn ask_panel<P: Prompter>(
        &self,
        prompter: &mut P,
    ) -> Result<Option<Option<Panel>>, HostError> {
        let current = self.original.and_then(|l| l.panel);
        let Some(view) = pick_optional::<_, PanelView>(
            prompter,
            "Panel view",
            current.map(|p| p.view),
            self.original.is_some(),
        )
        .await?
        else {
            return Ok(None);
        };
        let Some(view) = view else {
            return Ok(Some(None));
        };

        let items = [QuickPickItem::new("No"), QuickPickItem::new("Yes")];
        let Some(index) = prompter.show_quick_pick(&items, "Maximize panel?").await? else {
            return Ok(None);
        };
        Ok(Some(Some(Panel {
            view,
            maximized: index == 1,
        })))
    }
}

fn item<C: Choice>(choice: C, current: Option<C>) -> QuickPickItem {
    let item = QuickPickItem::new(choice.label());
    if current == Some(choice) {
        item.with_description(CURRENT)
    } else {
        item
    }
}

/// Picks one option. Outer `None` is a dismissal.
async fn pick<P: Prompter, C: Choice>(
    prompter: &mut P,
    placeholder: &str,
    current: Option<C>,
) -> Result<Option<C>, HostError> {
    let items: Vec<_> = C::ALL.iter().map(|c| item(*c, current)).collect();
    let index = prompter.show_quick_pick(&items, placeholder).await?;
    Ok(index.and_then(|i| C::ALL.get(i).copied()))
}

/// Picks one option or "None". Outer `None` is a dismissal, inner `None`
/// is the "None" entry.
async fn pick_optional<P: Prompter, C: Choice>(
    prompter: &mut P,
    placeholder: &str,
    current: Option<C>,
    editing: bool,
) -> Result<Option<Option<C>>, HostError> {
    let none = QuickPickItem::new(NONE_LABEL);
    let none = if editing && current.is_none() {
        none.with_description(CURRENT)
    } else {
        none
    };
    let items: Vec<_> = std::iter::once(none)
        .chain(C::ALL.iter().map(|c| item(*c, current)))
        .collect();

    Ok(match prompter.show_quick_pick(&items, placeholder).await? {
        None => None,
        Some(0) => Some(None),
        Some(i) => C::ALL.get(i - 1).copied().map(Some),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::layout::SidebarView;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_full_layout() {
        let existing = names(&["Search", "Git"]);
        let mut host = RecordingHost::new();
        host.push_input("  Review ")
            .push_pick("Source Control")
            .push_pick("Left")
            .push_pick("Plan")
            .push_pick("Problems")
            .push_pick("Yes");

        let layout = LayoutWizard::create(&existing)
            .run(&mut host)
            .await
            .expect("wizard failed")
            .expect("wizard cancelled");

        assert_eq!(
            layout,
            LayoutConfig::new("Review")
                .with_primary_sidebar(SidebarView::Scm, Side::Left)
                .with_auxiliary_sidebar(Side::Right, AgentMode::Plan)
                .with_panel(PanelView::Problems, true)
        );
        assert_eq!(
            host.placeholders,
            vec![
                "Primary sidebar view",
                "Primary sidebar position",
                "Agent sidebar mode",
                "Panel view",
                "Maximize panel?",
            ]
        );
    }

    #[tokio::test]
    async fn test_everything_closed() {
        let mut host = RecordingHost::new();
        host.push_input("Zen")
            .push_pick("None")
            .push_pick("None")
            .push_pick("None");

        let layout = LayoutWizard::create(&[])
            .run(&mut host)
            .await
            .expect("wizard failed");
        assert_eq!(layout, Some(LayoutConfig::new("Zen")));
    }

    #[tokio::test]
    async fn test_auxiliary_without_primary_asks_for_side() {
        let mut host = RecordingHost::new();
        host.push_input("Chat")
            .push_pick("None")
            .push_pick("Agent")
            .push_pick("Right")
            .push_pick("None");

        let layout = LayoutWizard::create(&[])
            .run(&mut host)
            .await
            .expect("wizard failed")
            .expect("wizard cancelled");
        assert_eq!(
            layout.auxiliary_sidebar,
            Some(AuxiliarySidebar {
                position: Side::Right,
                mode: AgentMode::Agent
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_names_are_reprompted() {
        let existing = names(&["Search", "Git"]);
        let mut host = RecordingHost::new();
        host.push_input("   ")
            .push_input("GIT")
            .push_input("Focus")
            .push_pick("None")
            .push_pick("None")
            .push_pick("Output")
            .push_pick("No");

        let layout = LayoutWizard::create(&existing)
            .run(&mut host)
            .await
            .expect("wizard failed")
            .expect("wizard cancelled");
        assert_eq!(layout.name, "Focus");
        assert_eq!(
            host.rejections,
            vec![
                "Layout name cannot be empty",
                "A layout named \"GIT\" already exists"
            ]
        );
    }

    #[tokio::test]
    async fn test_cancel_at_any_step() {
        let mut host = RecordingHost::new();
        host.push_input_cancel();
        assert_eq!(LayoutWizard::create(&[]).run(&mut host).await.ok(), Some(None));

        let mut host = RecordingHost::new();
        host.push_input("Half").push_pick("Explorer").push_pick_cancel();
        assert_eq!(LayoutWizard::create(&[]).run(&mut host).await.ok(), Some(None));

        let mut host = RecordingHost::new();
        host.push_input("Late")
            .push_pick("None")
            .push_pick("None")
            .push_pick("Terminal");
        assert_eq!(LayoutWizard::create(&[]).run(&mut host).await.ok(), Some(None));
    }

    #[tokio::test]
    async fn test_edit_keeps_own_name() {
        let existing = names(&["Focus", "Git"]);
        let original = LayoutConfig::new("Focus").with_panel(PanelView::Output, false);
        let mut host = RecordingHost::new();
        host.push_input("Focus")
            .push_pick("Explorer")
            .push_pick("Right")
            .push_pick("None")
            .push_pick("Output")
            .push_pick("No");

        let layout = LayoutWizard::edit(&existing, &original)
            .run(&mut host)
            .await
            .expect("wizard failed")
            .expect("wizard cancelled");
        assert_eq!(layout.name, "Focus");
        assert_eq!(
            layout.primary_sidebar,
            Some(PrimarySidebar {
                view: SidebarView::Explorer,
                position: Side::Right
            })
        );
        assert!(host.rejections.is_empty());
    }
}
