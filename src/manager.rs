//! User-facing layout actions.
//!
//! [`LayoutManager`] ties the store, the registrar and the applier together
//! behind the invocable actions: select, apply, create, manage, edit and
//! delete. Every mutation saves the whole Layout Set and then re-syncs the
//! registrar.
//!
//! The applier resumes the workspace's persisted session and saves it back
//! whenever an application changes it.
//!
//! Built-in layouts can be applied but never edited or deleted. Only custom
//! layouts are ever written back to the store.

use crate::applier::{LayoutApplier, LayoutSessionState};
use crate::error::{ManagerError, Result};
use crate::host::{NoticeLevel, Prompter, QuickPickItem, Workbench};
use crate::layout::{self, LayoutConfig, BUILT_IN_NAMES};
use crate::registrar::CommandRegistrar;
use crate::store::LayoutStore;
use crate::wizard::LayoutWizard;

/// What a manage-layouts run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Managed {
    /// The layout was replaced by this one.
    Edited(LayoutConfig),
    /// The layout with this name was removed.
    Deleted(String),
}

/// Action surface over one workspace's layouts.
#[derive(Debug)]
pub struct LayoutManager {
    store: LayoutStore,
    registrar: CommandRegistrar,
    applier: LayoutApplier,
}

impl LayoutManager {
    /// Creates a manager over `store`, resumes its session and registers
    /// its layouts.
    pub fn load(store: LayoutStore) -> Result<Self> {
        let applier = LayoutApplier::with_state(store.load_session());
        let mut manager = Self {
            store,
            registrar: CommandRegistrar::new(),
            applier,
        };
        manager.resync()?;
        Ok(manager)
    }

    /// The underlying store.
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// The per-layout action registry.
    pub fn registrar(&self) -> &CommandRegistrar {
        &self.registrar
    }

    /// Session state of the applier.
    pub fn session(&self) -> LayoutSessionState {
        self.applier.state()
    }

    /// Re-registers one action per built-in layout and one per custom
    /// layout, built-ins first.
    pub fn resync(&mut self) -> Result<()> {
        let mut layouts = layout::default_layouts();
        layouts.extend(self.store.load_custom()?);
        self.registrar.resync(&layouts);
        Ok(())
    }

    /// Names a new or renamed layout must not reuse.
    fn taken_names(custom: &[LayoutConfig]) -> Vec<String> {
        BUILT_IN_NAMES
            .iter()
            .map(|name| name.to_string())
            .chain(custom.iter().map(|l| l.name.clone()))
            .collect()
    }

    /// Applies the layout registered under a name, key or action id.
    pub async fn apply<H: Workbench + Prompter>(
        &mut self,
        host: &mut H,
        target: &str,
    ) -> Result<LayoutConfig> {
        let before = self.applier.state();
        let invoked = self
            .registrar
            .invoke(target, &mut self.applier, host)
            .await
            .map(|layout| layout.cloned());
        self.persist_session(before)?;
        let layout = invoked?.ok_or_else(|| ManagerError::NotFound(target.trim().to_string()))?;
        host.show_notification(NoticeLevel::Info, &format!("Applied layout: {}", layout.name))
            .await?;
        Ok(layout)
    }

    /// Offers every layout in a quick pick and applies the chosen one.
    pub async fn select_layout<H: Workbench + Prompter>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<LayoutConfig>> {
        let layouts = self.store.load_all()?;
        let items: Vec<_> = layouts
            .iter()
            .map(|l| QuickPickItem::new(&l.name).with_description(l.summary()))
            .collect();

        let Some(index) = host.show_quick_pick(&items, "Select a layout to apply").await? else {
            return Ok(None);
        };
        let Some(layout) = layouts.into_iter().nth(index) else {
            return Ok(None);
        };

        let before = self.applier.state();
        let applied = self.applier.apply(host, &layout).await;
        self.persist_session(before)?;
        applied?;
        host.show_notification(NoticeLevel::Info, &format!("Applied layout: {}", layout.name))
            .await?;
        Ok(Some(layout))
    }

    /// Runs the wizard and appends the result to the Layout Set.
    pub async fn create_layout<P: Prompter>(&mut self, host: &mut P) -> Result<Option<LayoutConfig>> {
        let mut custom = self.store.load_custom()?;
        let taken = Self::taken_names(&custom);

        let Some(layout) = LayoutWizard::create(&taken).run(host).await? else {
            tracing::debug!("Create layout cancelled");
            return Ok(None);
        };

        custom.push(layout.clone());
        self.store.save_all(&custom)?;
        self.resync()?;

        host.show_notification(NoticeLevel::Info, &format!("Created layout: {}", layout.name))
            .await?;
        Ok(Some(layout))
    }

    /// Lets the user pick a layout, then edit or delete it.
    pub async fn manage_layouts<P: Prompter>(&mut self, host: &mut P) -> Result<Option<Managed>> {
        let mut layouts = layout::default_layouts();
        layouts.extend(self.store.load_custom()?);
        let items: Vec<_> = layouts
            .iter()
            .map(|l| {
                let origin = if self.store.is_built_in(&l.name) {
                    "built-in"
                } else {
                    "custom"
                };
                QuickPickItem::new(&l.name).with_description(origin)
            })
            .collect();

        let Some(index) = host.show_quick_pick(&items, "Select a layout to manage").await? else {
            return Ok(None);
        };
        let Some(chosen) = layouts.get(index) else {
            return Ok(None);
        };
        let name = chosen.name.clone();

        if self.store.is_built_in(&name) {
            self.reject_built_in(host, &name).await?;
            return Ok(None);
        }

        let actions = [QuickPickItem::new("Edit"), QuickPickItem::new("Delete")];
        match host.show_quick_pick(&actions, &format!("Manage \"{name}\"")).await? {
            Some(0) => Ok(self.edit_layout(host, &name).await?.map(Managed::Edited)),
            Some(1) => {
                let deleted = self.delete_layout(host, &name, false).await?;
                Ok(deleted.then_some(Managed::Deleted(name)))
            }
            _ => Ok(None),
        }
    }

    /// Runs the wizard pre-filled from the custom layout `name` and replaces
    /// it in place.
    pub async fn edit_layout<P: Prompter>(
        &mut self,
        host: &mut P,
        name: &str,
    ) -> Result<Option<LayoutConfig>> {
        if self.store.is_built_in(name) {
            self.reject_built_in(host, name).await?;
            return Err(ManagerError::BuiltIn(name.trim().to_string()).into());
        }

        let mut custom = self.store.load_custom()?;
        let index = find(&custom, name)?;
        let taken = Self::taken_names(&custom);

        let Some(edited) = LayoutWizard::edit(&taken, &custom[index]).run(host).await? else {
            tracing::debug!(layout = %name, "Edit layout cancelled");
            return Ok(None);
        };

        custom[index] = edited.clone();
        self.store.save_all(&custom)?;
        self.resync()?;

        host.show_notification(NoticeLevel::Info, &format!("Updated layout: {}", edited.name))
            .await?;
        Ok(Some(edited))
    }

    /// Removes the custom layout `name`, asking first unless `confirmed`.
    ///
    /// Returns `false` if the user declined.
    pub async fn delete_layout<P: Prompter>(
        &mut self,
        host: &mut P,
        name: &str,
        confirmed: bool,
    ) -> Result<bool> {
        if self.store.is_built_in(name) {
            self.reject_built_in(host, name).await?;
            return Err(ManagerError::BuiltIn(name.trim().to_string()).into());
        }

        let mut custom = self.store.load_custom()?;
        let index = find(&custom, name)?;
        let removed_name = custom[index].name.clone();

        if !confirmed
            && !host
                .show_confirm(&format!("Delete layout \"{removed_name}\"?"))
                .await?
        {
            return Ok(false);
        }

        custom.remove(index);
        self.store.save_all(&custom)?;
        self.resync()?;

        host.show_notification(NoticeLevel::Info, &format!("Deleted layout: {removed_name}"))
            .await?;
        Ok(true)
    }

    /// Saves the session if an application changed it. Runs even when the
    /// application failed part way, since earlier intents already landed.
    fn persist_session(&self, before: LayoutSessionState) -> Result<()> {
        let after = self.applier.state();
        if after != before {
            self.store.save_session(after)?;
        }
        Ok(())
    }

    async fn reject_built_in<P: Prompter>(&self, host: &mut P, name: &str) -> Result<()> {
        tracing::warn!(layout = %name, "Refused to modify built-in layout");
        let message = ManagerError::BuiltIn(name.trim().to_string()).to_string();
        host.show_notification(NoticeLevel::Warning, &message).await?;
        Ok(())
    }
}

fn find(layouts: &[LayoutConfig], name: &str) -> Result<usize> {
    layouts
        .iter()
        .position(|l| layout::same_name(&l.name, name))
        .ok_or_else(|| ManagerError::NotFound(name.trim().to_string()).into())
}
