//! Workspace layout manager.
//!
//! Named layouts describe which primary sidebar view, auxiliary (agent)
//! sidebar mode and bottom panel view should be visible. Applying a layout
//! drives the host UI through a fixed sequence of intents.
//!
//! # Modules
//!
//! - [`layout`]: the layout model, name validation and the built-in presets
//! - [`store`]: the persisted Layout Set in a workspace settings file
//! - [`applier`]: turns one layout into host intents
//! - [`registrar`]: one invocable action per layout
//! - [`wizard`]: prompt-driven layout builder
//! - [`manager`]: the select/create/manage/edit/delete actions
//! - [`host`]: the capability traits and their implementations
//!
//! # Example
//!
//! ```
//! use layout_manager::applier::LayoutApplier;
//! use layout_manager::host::{Intent, RecordingHost};
//! use layout_manager::layout::{LayoutConfig, PanelView};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> layout_manager::Result<()> {
//! let focus = LayoutConfig::new("Focus").with_panel(PanelView::Output, false);
//! let mut host = RecordingHost::new();
//! LayoutApplier::new().apply(&mut host, &focus).await?;
//! assert_eq!(host.intents[0], Intent::CloseSidebar);
//! # Ok(())
//! # }
//! ```

pub mod applier;
pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod logging;
pub mod manager;
pub mod registrar;
pub mod store;
pub mod wizard;

pub use error::{Error, Result};
