use spacetimedb::{ReducerContext, SpacetimeType, Table};
use log;
use serde::{Deserialize, Serialize};

// --- Item Enums and Structs ---

// Define categories or types for items
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, SpacetimeType)]
pub enum ItemCategory {
    Tool,
    Material,
    Placeable,
    Armor,
    Consumable,
}

/// Catalog entry shown by the item browser menu.
#[spacetimedb::table(name = item_definition, public)]
#[derive(Clone, Debug)]
pub struct ItemDefinition {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: ItemCategory,
    pub icon_asset_name: String, // e.g., "stone_hatchet.png", used by client
    pub is_stackable: bool,
    pub stack_size: u32, // Max number per stack (if stackable)
}

fn definition(
    name: &str,
    description: &str,
    category: ItemCategory,
    icon_asset_name: &str,
    stack_size: u32,
) -> ItemDefinition {
    ItemDefinition {
        id: 0, // auto_inc
        name: name.to_string(),
        description: description.to_string(),
        category,
        icon_asset_name: icon_asset_name.to_string(),
        is_stackable: stack_size > 1,
        stack_size,
    }
}

/// The built-in catalog. Enough entries to span more than one catalog page.
pub fn initial_item_definitions() -> Vec<ItemDefinition> {
    use ItemCategory::*;
    vec![
        definition("Wood", "A sturdy piece of wood.", Material, "wood.png", 1000),
        definition("Stone", "A rough chunk of stone.", Material, "stone.png", 1000),
        definition("Plant Fiber", "Stringy fibers for weaving.", Material, "plant_fiber.png", 1000),
        definition("Cloth", "Woven plant fiber.", Material, "cloth.png", 1000),
        definition("Charcoal", "Burnt wood, useful as fuel.", Material, "charcoal.png", 1000),
        definition("Metal Ore", "Ore that can be smelted.", Material, "metal_ore.png", 1000),
        definition("Stone Hatchet", "Chops trees.", Tool, "stone_hatchet.png", 1),
        definition("Stone Pickaxe", "Breaks rocks.", Tool, "stone_pickaxe.png", 1),
        definition("Rock", "A simple gathering tool.", Tool, "rock_item.png", 1),
        definition("Torch", "Lights up the night.", Tool, "torch.png", 1),
        definition("Camp Fire", "Keeps you warm and cooks food.", Placeable, "campfire.png", 1),
        definition("Wooden Storage Box", "Holds 18 stacks of items.", Placeable, "wooden_storage_box.png", 1),
        definition("Sleeping Bag", "Sets a respawn point.", Placeable, "sleeping_bag.png", 1),
        definition("Stash", "A small hidden container.", Placeable, "stash.png", 1),
        definition("Cloth Hood", "Basic head protection.", Armor, "cloth_hood.png", 1),
        definition("Cloth Shirt", "Basic chest protection.", Armor, "cloth_shirt.png", 1),
        definition("Cloth Pants", "Basic leg protection.", Armor, "cloth_pants.png", 1),
        definition("Cloth Boots", "Basic foot protection.", Armor, "cloth_boots.png", 1),
        definition("Mushroom", "An edible forest mushroom.", Consumable, "mushroom.png", 20),
        definition("Corn", "Raw corn. Better cooked.", Consumable, "corn.png", 20),
        definition("Pumpkin", "A hearty pumpkin.", Consumable, "pumpkin.png", 10),
        definition("Bandage", "Stops bleeding and restores health.", Consumable, "bandage.png", 10),
    ]
}

// --- Item Reducers ---

// Reducer to seed initial item definitions if the table is empty
#[spacetimedb::reducer]
pub fn seed_items(ctx: &ReducerContext) -> Result<(), String> {
    let items = ctx.db.item_definition();
    if items.iter().count() > 0 {
        log::info!("Item definitions already seeded ({}). Skipping.", items.iter().count());
        return Ok(());
    }

    log::info!("Seeding initial item definitions...");

    let mut seeded_count = 0;
    for item_def in initial_item_definitions() {
        match items.try_insert(item_def) {
            Ok(_) => seeded_count += 1,
            Err(e) => log::error!("Failed to insert item definition during seeding: {}", e),
        }
    }

    log::info!("Finished seeding {} item definitions.", seeded_count);
    Ok(())
}
