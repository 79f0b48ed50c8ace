//! Layout model and built-in presets.
//!
//! A layout is a named snapshot of desired primary sidebar, auxiliary sidebar
//! and bottom panel state. Four presets ship with the crate; everything else
//! is user-defined and lives in the Layout Set (see [`crate::store`]).

mod model;
mod presets;

pub use model::{
    command_key, same_name, validate_name, AgentMode, AuxiliarySidebar, Choice, LayoutConfig, Panel,
    PanelView, PrimarySidebar, Side, SidebarView, UnknownOption,
};
pub use presets::{default_layouts, is_built_in, BUILT_IN_NAMES};
