/******************************************************************************
 *                                                                            *
 * Client-facing menu reducers. Module code keeps no state between reducer   *
 * calls, so every call rebuilds the menu registry, restores the caller's    *
 * view from its `menu_session` row, dispatches the event, and writes the    *
 * resulting view back.                                                      *
 *                                                                            *
 ******************************************************************************/

use spacetimedb::{Identity, ReducerContext, Table};
use log;

use anemone::{Click, ContainerHost, Drag, EventFor, HostEvent, Registry, View};

use crate::catalog_menu::CatalogMenu;
use crate::confirm_menu::ConfirmMenu;
use crate::menu_host::TableHost;
use crate::models::{MenuClick, MenuDrag};

/// Owner name the module registers its menus under.
pub const MODULE_OWNER: &str = "anemone-server";

// --- MenuConfig Table Definition ---
pub const DEFAULT_CATALOG_TITLE: &str = "Item Catalog";

#[spacetimedb::table(name = menu_config, public)]
#[derive(Clone, Debug)]
pub struct MenuConfig {
    #[primary_key]
    pub id: u8, // Singleton table, ID will always be 0
    pub catalog_title: String,
    pub clamp_catalog_pages: bool, // Stop page navigation at the last page with items
}

pub fn init_menu_config(ctx: &ReducerContext) -> Result<(), String> {
    let config_table = ctx.db.menu_config();
    if config_table.iter().count() == 0 {
        log::info!("Initializing MenuConfig table with catalog title '{}'", DEFAULT_CATALOG_TITLE);
        match config_table.try_insert(MenuConfig {
            id: 0,
            catalog_title: DEFAULT_CATALOG_TITLE.to_string(),
            clamp_catalog_pages: true,
        }) {
            Ok(_) => log::info!("MenuConfig table initialized."),
            Err(e) => {
                log::error!("Failed to initialize MenuConfig table: {}", e);
                return Err(format!("Failed to init MenuConfig: {}", e));
            }
        }
    } else {
        log::debug!("MenuConfig table already initialized.");
    }
    Ok(())
}
// --- End MenuConfig Table Definition ---

/// The menu each client has open, and on which page.
#[spacetimedb::table(name = menu_session)]
#[derive(Clone, Debug)]
pub struct MenuSession {
    #[primary_key]
    pub viewer: Identity,
    pub menu: String,
    pub page: i32,
    pub container_id: u64,
}

// --- Registry Lifecycle ---

fn menu_registry<'a>(ctx: &'a ReducerContext) -> Result<Registry<TableHost<'a>>, String> {
    let mut registry = Registry::new(MODULE_OWNER);
    registry.register(CatalogMenu::load(ctx)).map_err(|e| e.to_string())?;
    registry.register_default::<ConfirmMenu>().map_err(|e| e.to_string())?;
    Ok(registry)
}

/// Puts the caller's stored view back into `registry`. Returns the stored
/// session, if there was one.
fn restore_session<'a>(
    ctx: &'a ReducerContext,
    registry: &mut Registry<TableHost<'a>>,
) -> Option<MenuSession> {
    let session = ctx.db.menu_session().viewer().find(&ctx.sender)?;
    let Some(definition) = registry.definition_named(&session.menu) else {
        log::warn!("[Menu] Session for {:?} names unknown menu '{}'", ctx.sender, session.menu);
        return Some(session);
    };
    match View::restore(definition, ctx.sender, session.container_id, session.page) {
        Ok(view) => {
            registry.insert_view(view);
        }
        Err(e) => log::warn!("[Menu] Could not restore '{}' for {:?}: {}", session.menu, ctx.sender, e),
    }
    Some(session)
}

/// Applies what the definition callbacks asked for: a follow-up menu, or
/// closing a menu that is no longer on screen.
fn settle<'a>(
    registry: &mut Registry<TableHost<'a>>,
    host: &mut TableHost<'a>,
    viewer: Identity,
) -> anemone::Result<()> {
    if let Some(menu) = host.take_pending_open() {
        registry.open_named(host, viewer, &menu)?;
    }
    let closed = match registry.view(&viewer) {
        Some(view) if !view.is_open(host) => Some(*view.container()),
        _ => None,
    };
    if let Some(container) = closed {
        registry.dispatch(host, HostEvent::Close { viewer, container: Some(container) })?;
    }
    Ok(())
}

/// Writes the caller's view back to `menu_session`, and releases the
/// previous container when it is no longer used.
fn persist_session<'a>(
    ctx: &'a ReducerContext,
    registry: &Registry<TableHost<'a>>,
    host: &mut TableHost<'a>,
    previous: Option<MenuSession>,
) {
    let viewer = ctx.sender;
    let sessions = ctx.db.menu_session();
    let current = registry.view(&viewer).map(|view| MenuSession {
        viewer,
        menu: view.definition().name().to_string(),
        page: view.page(),
        container_id: *view.container(),
    });
    let current_container = current.as_ref().map(|session| session.container_id);

    match (&previous, current) {
        (Some(_), Some(session)) => {
            sessions.viewer().update(session);
        }
        (None, Some(session)) => {
            sessions.insert(session);
        }
        (Some(_), None) => {
            sessions.viewer().delete(&viewer);
        }
        (None, None) => {}
    }

    if let Some(previous) = previous {
        if current_container != Some(previous.container_id) {
            host.discard(previous.container_id);
        }
    }
    if current_container.is_none() {
        host.close_display(&viewer);
    }
}

/// Runs `handle` against the caller's menus and stores the outcome.
fn with_menus<'a, F>(ctx: &'a ReducerContext, handle: F) -> Result<(), String>
where
    F: FnOnce(&mut Registry<TableHost<'a>>, &mut TableHost<'a>) -> anemone::Result<()>,
{
    let mut host = TableHost::new(ctx);
    let mut registry = menu_registry(ctx)?;
    let previous = restore_session(ctx, &mut registry);

    handle(&mut registry, &mut host).map_err(|e| e.to_string())?;
    settle(&mut registry, &mut host, ctx.sender).map_err(|e| e.to_string())?;

    persist_session(ctx, &registry, &mut host, previous);
    Ok(())
}

fn dispatch<'a>(ctx: &'a ReducerContext, event: EventFor<TableHost<'a>>) -> Result<(), String> {
    with_menus(ctx, |registry, host| registry.dispatch(host, event))
}

// --- Menu Reducers ---

#[spacetimedb::reducer]
pub fn open_menu(ctx: &ReducerContext, menu: String) -> Result<(), String> {
    log::info!("[Menu] {:?} opens '{}'", ctx.sender, menu);
    with_menus(ctx, |registry, host| {
        registry.open_named(host, ctx.sender, &menu).map(|_| ())
    })
}

#[spacetimedb::reducer]
pub fn click_menu_slot(ctx: &ReducerContext, raw_slot: i32, action: MenuClick) -> Result<(), String> {
    dispatch(
        ctx,
        HostEvent::Click(Click { viewer: ctx.sender, raw_slot, action: action.into() }),
    )
}

#[spacetimedb::reducer]
pub fn drag_menu_slots(ctx: &ReducerContext, raw_slots: Vec<i32>, mode: MenuDrag) -> Result<(), String> {
    dispatch(
        ctx,
        HostEvent::Drag(Drag { viewer: ctx.sender, raw_slots, mode: mode.into() }),
    )
}

/// Sent by the client once it has rendered the menu.
#[spacetimedb::reducer]
pub fn menu_opened(ctx: &ReducerContext) -> Result<(), String> {
    dispatch(ctx, HostEvent::Open { viewer: ctx.sender })
}

#[spacetimedb::reducer]
pub fn close_menu(ctx: &ReducerContext) -> Result<(), String> {
    close_viewer_menu(ctx)
}

/// Closes whatever menu the caller has open. Also used on disconnect.
pub fn close_viewer_menu(ctx: &ReducerContext) -> Result<(), String> {
    if ctx.db.menu_session().viewer().find(&ctx.sender).is_none() {
        log::trace!("[Menu] {:?} has no menu to close", ctx.sender);
        return Ok(());
    }
    dispatch(ctx, HostEvent::Close { viewer: ctx.sender, container: None })
}
