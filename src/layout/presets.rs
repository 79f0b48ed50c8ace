//! Built-in layout preset definitions.
//!
//! Four built-in layouts are compiled in and never persisted:
//! - **Search**: search view in a right-hand sidebar
//! - **Git**: source control on the left, maximized terminal
//! - **Agent**: assistant sidebar on the left in ask mode
//! - **Editor**: file explorer in a right-hand sidebar

use super::model::{same_name, AgentMode, LayoutConfig, PanelView, Side, SidebarView};

/// Names of the built-in layouts, in presentation order.
pub const BUILT_IN_NAMES: [&str; 4] = ["Search", "Git", "Agent", "Editor"];

/// Returns the built-in layouts in presentation order.
pub fn default_layouts() -> Vec<LayoutConfig> {
    vec![
        LayoutConfig::new("Search").with_primary_sidebar(SidebarView::Search, Side::Right),
        LayoutConfig::new("Git")
            .with_primary_sidebar(SidebarView::Scm, Side::Left)
            .with_panel(PanelView::Terminal, true),
        LayoutConfig::new("Agent").with_auxiliary_sidebar(Side::Left, AgentMode::Ask),
        LayoutConfig::new("Editor").with_primary_sidebar(SidebarView::Explorer, Side::Right),
    ]
}

/// Returns `true` if `name` matches a built-in layout (case-insensitive).
pub fn is_built_in(name: &str) -> bool {
    BUILT_IN_NAMES.iter().any(|b| same_name(b, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::model::{AuxiliarySidebar, Panel, PrimarySidebar};

    #[test]
    fn test_default_layout_names() {
        let names: Vec<String> = default_layouts().into_iter().map(|l| l.name).collect();
        assert_eq!(names, BUILT_IN_NAMES);
    }

    #[test]
    fn test_search_layout() {
        let search = &default_layouts()[0];
        assert_eq!(
            search.primary_sidebar,
            Some(PrimarySidebar {
                view: SidebarView::Search,
                position: Side::Right
            })
        );
        assert_eq!(search.auxiliary_sidebar, None);
        assert_eq!(search.panel, None);
    }

    #[test]
    fn test_git_layout() {
        let git = &default_layouts()[1];
        assert_eq!(
            git.primary_sidebar,
            Some(PrimarySidebar {
                view: SidebarView::Scm,
                position: Side::Left
            })
        );
        assert_eq!(git.auxiliary_sidebar, None);
        assert_eq!(
            git.panel,
            Some(Panel {
                view: PanelView::Terminal,
                maximized: true
            })
        );
    }

    #[test]
    fn test_agent_layout() {
        let agent = &default_layouts()[2];
        assert_eq!(agent.primary_sidebar, None);
        assert_eq!(
            agent.auxiliary_sidebar,
            Some(AuxiliarySidebar {
                position: Side::Left,
                mode: AgentMode::Ask
            })
        );
        assert_eq!(agent.panel, None);
    }

    #[test]
    fn test_editor_layout() {
        let editor = &default_layouts()[3];
        assert_eq!(
            editor.primary_sidebar,
            Some(PrimarySidebar {
                view: SidebarView::Explorer,
                position: Side::Right
            })
        );
        assert_eq!(editor.auxiliary_sidebar, None);
        assert_eq!(editor.panel, None);
    }

    #[test]
    fn test_is_built_in() {
        assert!(is_built_in("Git"));
        assert!(is_built_in("git"));
        assert!(is_built_in(" EDITOR "));
        assert!(!is_built_in("Focus"));
        assert!(!is_built_in(""));
    }
}
