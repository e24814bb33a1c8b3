use spacetimedb::SpacetimeType;
use serde::{Serialize, Deserialize};

use anemone::{ClickAction, ContainerKind, DragMode, ItemMeta};

/// How the client clicked a menu slot.
#[derive(SpacetimeType, Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum MenuClick {
    Left,
    Right,
    ShiftLeft,
    ShiftRight,
    Middle,
    DoubleClick,
    Drop,
    NumberKey(u8), // 0-based hotbar slot
}

impl From<MenuClick> for ClickAction {
    fn from(click: MenuClick) -> Self {
        match click {
            MenuClick::Left => ClickAction::Left,
            MenuClick::Right => ClickAction::Right,
            MenuClick::ShiftLeft => ClickAction::ShiftLeft,
            MenuClick::ShiftRight => ClickAction::ShiftRight,
            MenuClick::Middle => ClickAction::Middle,
            MenuClick::DoubleClick => ClickAction::DoubleClick,
            MenuClick::Drop => ClickAction::Drop,
            MenuClick::NumberKey(key) => ClickAction::NumberKey(key),
        }
    }
}

/// How a dragged stack is spread over the covered menu slots.
#[derive(SpacetimeType, Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum MenuDrag {
    Even,
    Single,
}

impl From<MenuDrag> for DragMode {
    fn from(drag: MenuDrag) -> Self {
        match drag {
            MenuDrag::Even => DragMode::Even,
            MenuDrag::Single => DragMode::Single,
        }
    }
}

/// Physical container type of a menu, mirrored for the client so it can pick
/// the right layout.
#[derive(SpacetimeType, Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum MenuKind {
    Grid3x3,
    Chest(u8),  // rows
    Sized(u32), // slots
}

impl From<ContainerKind> for MenuKind {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Grid3x3 => MenuKind::Grid3x3,
            ContainerKind::Chest { rows } => MenuKind::Chest(rows as u8),
            ContainerKind::Sized { slots } => MenuKind::Sized(slots as u32),
        }
    }
}

// --- Menu Slot Content ---

/// Display text shown when hovering a menu item.
#[derive(SpacetimeType, Clone, Debug, PartialEq, Default)]
pub struct MenuItemMeta {
    pub display_name: String,
    pub lore: Vec<String>,
}

/// What a single menu slot shows. Menu items are display-only; they never
/// become inventory items.
#[derive(SpacetimeType, Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub item_def_id: Option<u64>, // Catalog entries link to ItemDefinition
    pub icon_asset_name: String,
    pub quantity: u32,
    pub meta: MenuItemMeta,
}

impl MenuItem {
    /// A plain icon with no name, used for borders and controls.
    pub fn icon(icon_asset_name: &str) -> Self {
        MenuItem {
            item_def_id: None,
            icon_asset_name: icon_asset_name.to_string(),
            quantity: 1,
            meta: MenuItemMeta::default(),
        }
    }
}

impl ItemMeta for MenuItem {
    type Meta = MenuItemMeta;

    fn meta(&self) -> MenuItemMeta {
        self.meta.clone()
    }

    fn set_meta(&mut self, meta: MenuItemMeta) {
        self.meta = meta;
    }
}
