/*
 * server/src/confirm_menu.rs
 *
 * Purpose: A 3x3 yes/no dialog asking whether to discard the player's
 * catalog selection. "Yes" clears it and closes; "No" goes back to the
 * catalog.
 */

use spacetimedb::Identity;
use log;

use anemone::{Click, ContainerDefinition, Items, LogicalIndex, Result, Template, View, ViewCx};

use crate::catalog_menu::{menu_selection as MenuSelectionTableTrait, selections_of, CATALOG_MENU};
use crate::menu_host::TableHost;
use crate::models::MenuItem;

pub const CONFIRM_MENU: &str = "confirm";

const YES: char = 'Y';
const NO: char = 'N';

#[derive(Default)]
pub struct ConfirmMenu;

impl<'a> ContainerDefinition<TableHost<'a>> for ConfirmMenu {
    fn template(&self) -> Template {
        Template::new(["YYY", "#?#", "NNN"])
    }

    fn content_for(&self, index: &LogicalIndex, _view: &View<TableHost<'a>>) -> MenuItem {
        let (icon, label) = match index.symbol() {
            YES => ("confirm.png", "Clear selection"),
            NO => ("cancel.png", "Keep selection"),
            '?' => ("question.png", "Discard the items you picked?"),
            _ => return MenuItem::icon("menu_border.png"),
        };
        Items::of(MenuItem::icon(icon))
            .modify_meta(move |meta| meta.display_name = label.to_string())
            .build()
    }

    fn title(&self) -> Option<String> {
        Some("Are you sure?".to_string())
    }

    fn name(&self) -> &'static str {
        CONFIRM_MENU
    }

    fn on_click(
        &self,
        index: &LogicalIndex,
        cx: &mut ViewCx<'_, TableHost<'a>>,
        click: &Click<Identity>,
    ) -> Result<()> {
        match index.symbol() {
            YES => {
                let ctx = cx.host().ctx();
                let cleared = selections_of(ctx, click.viewer);
                for selection in &cleared {
                    ctx.db.menu_selection().id().delete(&selection.id);
                }
                log::info!("[Confirm] Cleared {} selections for {:?}", cleared.len(), click.viewer);
                cx.host().close_display(&click.viewer);
            }
            NO => cx.host().request_open(CATALOG_MENU),
            _ => {}
        }
        Ok(())
    }

    fn on_open(&self, cx: &mut ViewCx<'_, TableHost<'a>>) -> Result<()> {
        log::debug!("[Confirm] Client acknowledged dialog for {:?}", cx.viewer());
        Ok(())
    }
}
