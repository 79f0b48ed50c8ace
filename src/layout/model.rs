//! Layout data model and name validation.
//!
//! A [`LayoutConfig`] is a flat composite of three independent, optional
//! sub-configs. An absent sub-config means "closed". The option enums are the
//! only structural constraint; nothing else is checked at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A closed set of options that can be persisted, displayed and picked.
pub trait Choice: Copy + PartialEq + 'static {
    /// Every option in display order.
    const ALL: &'static [Self];

    /// Persisted spelling.
    fn as_str(self) -> &'static str;

    /// Human-readable label for prompts.
    fn label(self) -> &'static str;
}

fn parse_choice<T: Choice>(s: &str) -> Option<T> {
    let s = s.trim();
    T::ALL
        .iter()
        .copied()
        .find(|c| c.as_str().eq_ignore_ascii_case(s))
}

/// Error returned when a string names no known option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    /// What kind of option was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownOption {}

macro_rules! choice_from_str {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_choice(s).ok_or_else(|| UnknownOption {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Which edge of the window a sidebar docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left edge
    Left,
    /// Right edge
    Right,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl Choice for Side {
    const ALL: &'static [Self] = &[Side::Left, Side::Right];

    fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

choice_from_str!(Side, "side");

/// Views the primary sidebar can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarView {
    /// File explorer
    Explorer,
    /// Workspace search
    Search,
    /// Source control
    Scm,
    /// Extensions
    Extensions,
    /// Run and debug
    Debug,
}

impl Choice for SidebarView {
    const ALL: &'static [Self] = &[
        SidebarView::Explorer,
        SidebarView::Search,
        SidebarView::Scm,
        SidebarView::Extensions,
        SidebarView::Debug,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SidebarView::Explorer => "explorer",
            SidebarView::Search => "search",
            SidebarView::Scm => "scm",
            SidebarView::Extensions => "extensions",
            SidebarView::Debug => "debug",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SidebarView::Explorer => "Explorer",
            SidebarView::Search => "Search",
            SidebarView::Scm => "Source Control",
            SidebarView::Extensions => "Extensions",
            SidebarView::Debug => "Run and Debug",
        }
    }
}

choice_from_str!(SidebarView, "sidebar view");

/// Interaction modes of the auxiliary (assistant) sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Autonomous agent
    Agent,
    /// Question answering
    Ask,
    /// Planning
    Plan,
}

impl Choice for AgentMode {
    const ALL: &'static [Self] = &[AgentMode::Agent, AgentMode::Ask, AgentMode::Plan];

    fn as_str(self) -> &'static str {
        match self {
            AgentMode::Agent => "agent",
            AgentMode::Ask => "ask",
            AgentMode::Plan => "plan",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AgentMode::Agent => "Agent",
            AgentMode::Ask => "Ask",
            AgentMode::Plan => "Plan",
        }
    }
}

choice_from_str!(AgentMode, "agent mode");

/// Views the bottom panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelView {
    /// Integrated terminal
    Terminal,
    /// Problems list
    Problems,
    /// Output channels
    Output,
    /// Debug console
    DebugConsole,
}

impl Choice for PanelView {
    const ALL: &'static [Self] = &[
        PanelView::Terminal,
        PanelView::Problems,
        PanelView::Output,
        PanelView::DebugConsole,
    ];

    fn as_str(self) -> &'static str {
        match self {
            PanelView::Terminal => "terminal",
            PanelView::Problems => "problems",
            PanelView::Output => "output",
            PanelView::DebugConsole => "debug-console",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PanelView::Terminal => "Terminal",
            PanelView::Problems => "Problems",
            PanelView::Output => "Output",
            PanelView::DebugConsole => "Debug Console",
        }
    }
}

choice_from_str!(PanelView, "panel view");

/// Primary sidebar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimarySidebar {
    /// View to show.
    pub view: SidebarView,
    /// Side to dock to.
    pub position: Side,
}

/// Auxiliary sidebar configuration.
///
/// `position` is expected to be opposite the primary sidebar of the same
/// layout. Use [`AuxiliarySidebar::opposite_to`] to build one that holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliarySidebar {
    /// Side to dock to.
    pub position: Side,
    /// Interaction mode.
    pub mode: AgentMode,
}

impl AuxiliarySidebar {
    /// Auxiliary sidebar on the side opposite `primary`.
    pub fn opposite_to(primary: Side, mode: AgentMode) -> Self {
        Self {
            position: primary.opposite(),
            mode,
        }
    }
}

/// Bottom panel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// View to show.
    pub view: PanelView,
    /// Whether the panel should fill the editor area.
    #[serde(default)]
    pub maximized: bool,
}

/// A named workspace layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Display label and case-insensitive identifier.
    pub name: String,
    /// Primary sidebar; `None` closes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_sidebar: Option<PrimarySidebar>,
    /// Auxiliary sidebar; `None` closes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_sidebar: Option<AuxiliarySidebar>,
    /// Bottom panel; `None` closes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<Panel>,
}

impl LayoutConfig {
    /// Creates a layout with every sub-component closed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_sidebar: None,
            auxiliary_sidebar: None,
            panel: None,
        }
    }

    /// Sets the primary sidebar.
    pub fn with_primary_sidebar(mut self, view: SidebarView, position: Side) -> Self {
        self.primary_sidebar = Some(PrimarySidebar { view, position });
        self
    }

    /// Sets the auxiliary sidebar.
    pub fn with_auxiliary_sidebar(mut self, position: Side, mode: AgentMode) -> Self {
        self.auxiliary_sidebar = Some(AuxiliarySidebar { position, mode });
        self
    }

    /// Sets the bottom panel.
    pub fn with_panel(mut self, view: PanelView, maximized: bool) -> Self {
        self.panel = Some(Panel { view, maximized });
        self
    }

    /// Action key derived from the name. See [`command_key`].
    pub fn key(&self) -> String {
        command_key(&self.name)
    }

    /// Validates this layout's name against the names already in use.
    pub fn validate<'a, I>(&self, existing: I, excluded: Option<&str>) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        validate_name(&self.name, existing, excluded)
    }

    /// One-line description, e.g. `Sidebar: Search (right) | Agent: closed | Panel: closed`.
    pub fn summary(&self) -> String {
        let sidebar = match self.primary_sidebar {
            Some(s) => format!("Sidebar: {} ({})", s.view.label(), s.position),
            None => "Sidebar: closed".to_string(),
        };
        let auxiliary = match self.auxiliary_sidebar {
            Some(a) => format!("Agent: {} ({})", a.mode.label(), a.position),
            None => "Agent: closed".to_string(),
        };
        let panel = match self.panel {
            Some(p) if p.maximized => format!("Panel: {} (maximized)", p.view.label()),
            Some(p) => format!("Panel: {}", p.view.label()),
            None => "Panel: closed".to_string(),
        };
        format!("{sidebar} | {auxiliary} | {panel}")
    }
}

/// Normalized action key: trimmed, lowercased, whitespace runs become `_`.
///
/// Distinct names can collide (`"My Layout"` and `"my  layout"`).
pub fn command_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Whether two layout names are the same layout: trimmed, compared
/// case-insensitively with full Unicode lowercasing.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Checks a candidate name.
///
/// Fails with [`ValidationError::EmptyName`] when blank, and with
/// [`ValidationError::NameConflict`] when any name in `existing` matches
/// case-insensitively, except a match on `excluded` (the layout being edited).
pub fn validate_name<'a, I>(
    name: &str,
    existing: I,
    excluded: Option<&str>,
) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let conflict = existing
        .into_iter()
        .filter(|other| !excluded.is_some_and(|ex| same_name(ex, other)))
        .any(|other| same_name(other, name));

    if conflict {
        return Err(ValidationError::NameConflict {
            name: name.trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(validate_name("", [], None), Err(ValidationError::EmptyName));
        assert_eq!(
            validate_name("   \t", ["Git"], None),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let err = validate_name("search", ["Search", "Git"], None).expect_err("should conflict");
        assert_eq!(
            err,
            ValidationError::NameConflict {
                name: "search".to_string()
            }
        );
        assert!(validate_name("  GIT ", ["Search", "Git"], None).is_err());
    }

    #[test]
    fn test_editing_keeps_own_name() {
        assert!(validate_name("Focus", ["Focus", "Git"], Some("Focus")).is_ok());
        assert!(validate_name("focus", ["Focus", "Git"], Some("Focus")).is_ok());
        // Renaming onto another layout still conflicts
        assert!(validate_name("Git", ["Focus", "Git"], Some("Focus")).is_err());
    }

    #[test]
    fn test_same_name_folds_non_ascii() {
        assert!(same_name(" Überblick", "ÜBERBLICK "));
        assert!(validate_name("überblick", ["Überblick"], None).is_err());
        assert!(!same_name("Überblick", "Uberblick"));
    }

    #[test]
    fn test_unique_name_accepted() {
        assert!(validate_name("Review", ["Search", "Git"], None).is_ok());
    }

    #[test]
    fn test_command_key_normalizes() {
        assert_eq!(command_key("Search"), "search");
        assert_eq!(command_key("  My   Big\tLayout "), "my_big_layout");
        assert_eq!(command_key("My Layout"), command_key("my  layout"));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_auxiliary_opposite_to_primary() {
        let aux = AuxiliarySidebar::opposite_to(Side::Right, AgentMode::Plan);
        assert_eq!(aux.position, Side::Left);
        assert_eq!(aux.mode, AgentMode::Plan);
    }

    #[test]
    fn test_from_str_accepts_persisted_spelling() {
        assert_eq!("debug-console".parse::<PanelView>(), Ok(PanelView::DebugConsole));
        assert_eq!("SCM".parse::<SidebarView>(), Ok(SidebarView::Scm));
        assert_eq!("plan".parse::<AgentMode>(), Ok(AgentMode::Plan));
        let err = "top".parse::<Side>().expect_err("should fail");
        assert_eq!(err.to_string(), "unknown side: top");
    }

    #[test]
    fn test_serialized_shape() {
        let layout = LayoutConfig::new("Git")
            .with_primary_sidebar(SidebarView::Scm, Side::Left)
            .with_panel(PanelView::DebugConsole, true);
        let json = serde_json::to_value(&layout).expect("serialization failed");
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Git",
                "primarySidebar": {"view": "scm", "position": "left"},
                "panel": {"view": "debug-console", "maximized": true}
            })
        );
    }

    #[test]
    fn test_missing_maximized_defaults_false() {
        let layout: LayoutConfig =
            serde_json::from_str(r#"{"name": "Logs", "panel": {"view": "output"}}"#)
                .expect("deserialization failed");
        assert_eq!(
            layout.panel,
            Some(Panel {
                view: PanelView::Output,
                maximized: false
            })
        );
        assert_eq!(layout.primary_sidebar, None);
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        let result: Result<LayoutConfig, _> = serde_json::from_str(
            r#"{"name": "X", "primarySidebar": {"view": "outline", "position": "left"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_summary() {
        let layout = LayoutConfig::new("Mixed")
            .with_primary_sidebar(SidebarView::Search, Side::Right)
            .with_auxiliary_sidebar(Side::Left, AgentMode::Ask)
            .with_panel(PanelView::Terminal, true);
        assert_eq!(
            layout.summary(),
            "Sidebar: Search (right) | Agent: Ask (left) | Panel: Terminal (maximized)"
        );
        assert_eq!(
            LayoutConfig::new("Bare").summary(),
            "Sidebar: closed | Agent: closed | Panel: closed"
        );
    }
}
