/******************************************************************************
 *                                                                            *
 * Stores menu containers as table rows so clients can subscribe to what     *
 * they are shown. `TableHost` implements the menu core's container API on   *
 * top of these tables for the duration of one reducer call.                 *
 *                                                                            *
 ******************************************************************************/

use spacetimedb::{Identity, ReducerContext, Table, Timestamp};
use log;

use anemone::{ContainerHost, ContainerKind};
use crate::models::{MenuItem, MenuKind};

// --- Menu Tables ---

/// One physical menu container. Scratch containers built during a refresh
/// live only within a single reducer call.
#[spacetimedb::table(name = menu_container, public)]
#[derive(Clone, Debug)]
pub struct MenuContainer {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub kind: MenuKind,
    pub size: u32,
    pub title: Option<String>,
}

/// A filled slot of a menu container. Empty slots have no row.
#[spacetimedb::table(name = menu_slot, public)]
#[derive(Clone, Debug)]
pub struct MenuSlot {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    #[index(btree)]
    pub container_id: u64,
    pub slot_index: u32,
    pub item: MenuItem,
}

/// The container each client currently has on screen.
#[spacetimedb::table(name = menu_display, public)]
#[derive(Clone, Debug)]
pub struct MenuDisplay {
    #[primary_key]
    pub viewer: Identity,
    pub container_id: u64,
    pub shown_at: Timestamp,
}

// --- Table Host ---

/// Menu host backed by the module's tables.
pub struct TableHost<'a> {
    ctx: &'a ReducerContext,
    pending_open: Option<String>,
}

impl<'a> TableHost<'a> {
    pub fn new(ctx: &'a ReducerContext) -> Self {
        TableHost { ctx, pending_open: None }
    }

    pub fn ctx(&self) -> &'a ReducerContext {
        self.ctx
    }

    /// Asks for the named menu to replace the current one once the event
    /// being handled has finished.
    pub fn request_open(&mut self, menu: &str) {
        self.pending_open = Some(menu.to_string());
    }

    pub(crate) fn take_pending_open(&mut self) -> Option<String> {
        self.pending_open.take()
    }

    /// Takes the menu off the viewer's screen. Returns the container that was shown.
    pub fn close_display(&self, viewer: &Identity) -> Option<u64> {
        let displays = self.ctx.db.menu_display();
        let shown = displays.viewer().find(viewer)?;
        displays.viewer().delete(viewer);
        log::debug!("[MenuHost] Display of container {} closed for {:?}", shown.container_id, viewer);
        Some(shown.container_id)
    }

    fn find_slot(&self, container_id: u64, slot_index: u32) -> Option<MenuSlot> {
        self.ctx
            .db
            .menu_slot()
            .container_id()
            .filter(&container_id)
            .find(|s| s.slot_index == slot_index)
    }
}

impl<'a> ContainerHost for TableHost<'a> {
    type Viewer = Identity;
    type Container = u64;
    type Content = MenuItem;
    type Owner = &'static str;

    fn allocate(&mut self, kind: ContainerKind, title: Option<&str>) -> u64 {
        let inserted = self.ctx.db.menu_container().insert(MenuContainer {
            id: 0, // auto_inc
            kind: kind.into(),
            size: kind.size() as u32,
            title: title.map(str::to_string),
        });
        log::trace!("[MenuHost] Allocated container {} ({:?})", inserted.id, kind);
        inserted.id
    }

    fn set_slot(&mut self, container: &u64, slot: usize, content: Option<MenuItem>) {
        let Some(row) = self.ctx.db.menu_container().id().find(container) else {
            log::warn!("[MenuHost] set_slot on unknown container {}", container);
            return;
        };
        if slot >= row.size as usize {
            log::warn!(
                "[MenuHost] Slot {} is past the end of container {} (size {})",
                slot, container, row.size
            );
            return;
        }

        let slots = self.ctx.db.menu_slot();
        match (self.find_slot(*container, slot as u32), content) {
            (Some(mut existing), Some(item)) => {
                existing.item = item;
                slots.id().update(existing);
            }
            (Some(existing), None) => {
                slots.id().delete(&existing.id);
            }
            (None, Some(item)) => {
                slots.insert(MenuSlot {
                    id: 0,
                    container_id: *container,
                    slot_index: slot as u32,
                    item,
                });
            }
            (None, None) => {}
        }
    }

    fn slot(&self, container: &u64, slot: usize) -> Option<MenuItem> {
        self.find_slot(*container, slot as u32).map(|s| s.item)
    }

    fn top_container(&self, viewer: &Identity) -> Option<u64> {
        self.ctx.db.menu_display().viewer().find(viewer).map(|d| d.container_id)
    }

    fn show(&mut self, viewer: &Identity, container: &u64) {
        let displays = self.ctx.db.menu_display();
        let display = MenuDisplay {
            viewer: *viewer,
            container_id: *container,
            shown_at: self.ctx.timestamp,
        };
        if displays.viewer().find(viewer).is_some() {
            displays.viewer().update(display);
        } else {
            displays.insert(display);
        }
    }

    /// Deletes the container and every slot row it owns.
    fn discard(&mut self, container: u64) {
        let slots = self.ctx.db.menu_slot();
        let slot_ids: Vec<u64> = slots
            .container_id()
            .filter(&container)
            .map(|s| s.id)
            .collect();
        for id in &slot_ids {
            slots.id().delete(id);
        }
        self.ctx.db.menu_container().id().delete(&container);
        log::trace!("[MenuHost] Discarded container {} ({} slot rows)", container, slot_ids.len());
    }
}
