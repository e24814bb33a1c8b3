/******************************************************************************
 *                                                                            *
 * SpacetimeDB module serving template-driven menus. Clients open a menu by  *
 * name, report clicks and drags on raw slots, and subscribe to the          *
 * `menu_display`/`menu_slot` tables to render what they are shown.          *
 *                                                                            *
 ******************************************************************************/

use spacetimedb::ReducerContext;
use log;

mod catalog_menu; // Paginated item browser
mod confirm_menu; // Yes/no dialog for the catalog selection
mod items;
mod menu_host; // Menu tables and the table-backed container host
mod menu_sessions; // Menu reducers and per-client view state
mod models;

#[spacetimedb::reducer(init)]
pub fn init_module(ctx: &ReducerContext) -> Result<(), String> {
    log::info!("Initializing module...");

    crate::menu_sessions::init_menu_config(ctx)?;
    crate::items::seed_items(ctx)?;

    log::info!("Module initialization complete.");
    Ok(())
}

// A client that goes away leaves no menu state behind
#[spacetimedb::reducer(client_disconnected)]
pub fn identity_disconnected(ctx: &ReducerContext) {
    if let Err(e) = crate::menu_sessions::close_viewer_menu(ctx) {
        log::error!("[Disconnect] Failed to close menu for {:?}: {}", ctx.sender, e);
    }
}
