/*
 * server/src/catalog_menu.rs
 *
 * Purpose: The item catalog. A paginated 9x4 browser over ItemDefinition
 * rows with previous/next controls on the bottom row. Clicking an item adds
 * it to the viewer's selection; the close button asks for confirmation when
 * anything is selected.
 */

use spacetimedb::{Identity, ReducerContext, Table, Timestamp};
use log;

use anemone::{
    Click, ClickAction, ContainerDefinition, Drag, Items, LogicalIndex, Result, Template, View,
    ViewCx,
};

use crate::confirm_menu::CONFIRM_MENU;
use crate::items::{item_definition as ItemDefinitionTableTrait, ItemDefinition};
use crate::menu_host::TableHost;
use crate::menu_sessions::menu_config as MenuConfigTableTrait;
use crate::menu_sessions::DEFAULT_CATALOG_TITLE;
use crate::models::MenuItem;

pub const CATALOG_MENU: &str = "catalog";

const CATALOG_TEMPLATE: [&str; 4] = [
    "#########",
    "#IIIIIII#",
    "#IIIIIII#",
    "<###X###>",
];

const ITEM: char = 'I';
const PREVIOUS: char = '<';
const NEXT: char = '>';
const CLOSE: char = 'X';

// --- Selection Table ---

/// Items a player picked in the catalog.
#[spacetimedb::table(name = menu_selection, public)]
#[derive(Clone, Debug)]
pub struct MenuSelection {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    #[index(btree)]
    pub viewer: Identity,
    pub item_def_id: u64,
    pub quantity: u32,
    pub selected_at: Timestamp,
}

pub(crate) fn selections_of(ctx: &ReducerContext, viewer: Identity) -> Vec<MenuSelection> {
    ctx.db
        .menu_selection()
        .viewer()
        .filter(&viewer)
        .collect()
}

/// Adds `amount` (or removes it when negative) to the viewer's selection of
/// one item. A quantity reaching zero removes the selection.
fn adjust_selection(ctx: &ReducerContext, viewer: Identity, entry: &ItemDefinition, amount: i64) {
    let selections = ctx.db.menu_selection();
    let existing = selections
        .viewer()
        .filter(&viewer)
        .find(|s| s.item_def_id == entry.id);
    let current = existing.as_ref().map_or(0, |s| s.quantity as i64);
    let quantity = (current + amount).clamp(0, u32::MAX as i64) as u32;

    match existing {
        Some(selection) if quantity == 0 => {
            selections.id().delete(&selection.id);
        }
        Some(mut selection) => {
            selection.quantity = quantity;
            selection.selected_at = ctx.timestamp;
            selections.id().update(selection);
        }
        None if quantity > 0 => {
            selections.insert(MenuSelection {
                id: 0,
                viewer,
                item_def_id: entry.id,
                quantity,
                selected_at: ctx.timestamp,
            });
        }
        None => return,
    }
    log::info!("[Catalog] {:?} now has {} x {} selected", viewer, quantity, entry.name);
}

/// How much a click on a catalog item changes its selected quantity.
/// Shift-clicks move a whole stack, which is one for unstackable items.
fn selection_step(action: ClickAction, entry: &ItemDefinition) -> Option<i64> {
    let stack = if entry.is_stackable { entry.stack_size.max(1) as i64 } else { 1 };
    match action {
        ClickAction::Left => Some(1),
        ClickAction::ShiftLeft => Some(stack),
        ClickAction::Right => Some(-1),
        ClickAction::ShiftRight => Some(-stack),
        _ => None,
    }
}

// --- Catalog Menu ---

pub struct CatalogMenu {
    title: String,
    clamp_pages: bool,
    entries: Vec<ItemDefinition>,
}

impl CatalogMenu {
    /// Snapshots the catalog contents and settings for this reducer call.
    pub fn load(ctx: &ReducerContext) -> Self {
        let config = ctx.db.menu_config().id().find(&0);
        let mut entries: Vec<ItemDefinition> = ctx.db.item_definition().iter().collect();
        entries.sort_by_key(|entry| entry.id);
        CatalogMenu {
            title: config
                .as_ref()
                .map_or_else(|| DEFAULT_CATALOG_TITLE.to_string(), |c| c.catalog_title.clone()),
            clamp_pages: config.map_or(true, |c| c.clamp_catalog_pages),
            entries,
        }
    }

    fn entry(&self, index: &LogicalIndex) -> Option<&ItemDefinition> {
        index
            .occurrence_index()
            .and_then(|occurrence| self.entries.get(occurrence))
    }

    fn entry_item(entry: &ItemDefinition, page: i32) -> MenuItem {
        let id = entry.id;
        let name = entry.name.clone();
        let lore = vec![
            entry.description.clone(),
            format!("{:?}", entry.category),
            format!("Page {}", page + 1),
        ];
        Items::of(MenuItem::icon(&entry.icon_asset_name))
            .modify_stack(move |item| item.item_def_id = Some(id))
            .modify_meta(move |meta| {
                meta.display_name = name.clone();
                meta.lore = lore.clone();
            })
            .build()
    }

    fn control(icon: &str, label: &'static str) -> MenuItem {
        Items::of(MenuItem::icon(icon))
            .modify_meta(move |meta| meta.display_name = label.to_string())
            .build()
    }
}

impl<'a> ContainerDefinition<TableHost<'a>> for CatalogMenu {
    fn template(&self) -> Template {
        Template::new(CATALOG_TEMPLATE)
    }

    fn content_for(&self, index: &LogicalIndex, view: &View<TableHost<'a>>) -> MenuItem {
        match index.symbol() {
            ITEM => match self.entry(index) {
                Some(entry) => Self::entry_item(entry, view.page()),
                None => MenuItem::icon("empty_slot.png"),
            },
            PREVIOUS => Self::control("arrow_left.png", "Previous page"),
            NEXT => Self::control("arrow_right.png", "Next page"),
            CLOSE => Self::control("close.png", "Close"),
            _ => MenuItem::icon("menu_border.png"),
        }
    }

    fn title(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn name(&self) -> &'static str {
        CATALOG_MENU
    }

    fn page_count(&self) -> Option<u32> {
        if !self.clamp_pages {
            return None;
        }
        let per_page = self.template().count_of(ITEM).max(1);
        Some(self.entries.len().div_ceil(per_page).max(1) as u32)
    }

    fn on_click(
        &self,
        index: &LogicalIndex,
        cx: &mut ViewCx<'_, TableHost<'a>>,
        click: &Click<Identity>,
    ) -> Result<()> {
        match index.symbol() {
            ITEM => {
                let Some(entry) = self.entry(index) else {
                    return Ok(());
                };
                let Some(amount) = selection_step(click.action, entry) else {
                    return Ok(());
                };
                let ctx = cx.host().ctx();
                adjust_selection(ctx, click.viewer, entry, amount);
                Ok(())
            }
            PREVIOUS => cx.previous_page(),
            NEXT => cx.next_page(),
            CLOSE => {
                let viewer = click.viewer;
                if selections_of(cx.host().ctx(), viewer).is_empty() {
                    cx.host().close_display(&viewer);
                } else {
                    cx.host().request_open(CONFIRM_MENU);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Dragging across items selects one of each.
    fn on_drag(
        &self,
        indices: &[LogicalIndex],
        cx: &mut ViewCx<'_, TableHost<'a>>,
        drag: &Drag<Identity>,
    ) -> Result<()> {
        let ctx = cx.host().ctx();
        for index in indices.iter().filter(|index| index.symbol() == ITEM) {
            if let Some(entry) = self.entry(index) {
                adjust_selection(ctx, drag.viewer, entry, 1);
            }
        }
        Ok(())
    }

    fn on_close(&self, cx: &mut ViewCx<'_, TableHost<'a>>) -> Result<()> {
        log::debug!("[Catalog] Closed on page {} for {:?}", cx.page(), cx.viewer());
        Ok(())
    }
}
