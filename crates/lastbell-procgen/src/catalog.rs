//! Static catalogs the generator draws from: debris props, wall props and
//! the pickup item table.

use glam::Vec3;
use lastbell_core::enums::{ItemKind, MaterialClass};

/// A debris prop that can be scattered on the corridor floor.
pub struct PropArchetype {
    pub name: &'static str,
    pub half_extents: Vec3,
    pub material: MaterialClass,
    /// Own flavor lines. Empty means the generic object pool is used.
    pub flavor: &'static [&'static str],
}

const fn prop(
    name: &'static str,
    half_extents: Vec3,
    material: MaterialClass,
    flavor: &'static [&'static str],
) -> PropArchetype {
    PropArchetype {
        name,
        half_extents,
        material,
        flavor,
    }
}

pub static PROPS: [PropArchetype; 24] = [
    prop("rusty bucket", Vec3::new(0.3, 0.2, 0.3), MaterialClass::Metal, &[
        "The bottom has rusted through.",
        "Dried paint inside... or blood?",
        "It sounds hollow when kicked.",
    ]),
    prop("broken chair", Vec3::new(0.25, 0.25, 0.25), MaterialClass::Wood, &[
        "Scratch marks on the backrest.",
        "Snapped in half by something huge.",
        "The seat has a strange dent in it.",
    ]),
    prop("old cardboard box", Vec3::new(0.3, 0.25, 0.3), MaterialClass::Wood, &[
        "It reeks of damp and mold.",
        "Something small and dead is dried up inside.",
        "Full of crumpled letters begging for help.",
    ]),
    prop("wad of trash", Vec3::new(0.15, 0.15, 0.15), MaterialClass::Paper, &[]),
    prop("traffic cone", Vec3::new(0.2, 0.3, 0.2), MaterialClass::Plastic, &[
        "It says DO NOT ENTER.",
        "What is this supposed to keep out?",
        "The plastic crumbles at a touch.",
    ]),
    prop("heavy textbook", Vec3::new(0.15, 0.025, 0.2), MaterialClass::Paper, &[
        "Black hairs are pressed between the pages.",
        "The words seem to move when I look away.",
        "Every page is slashed with red ink.",
    ]),
    prop("broken glass", Vec3::new(0.1, 0.1, 0.1), MaterialClass::Glass, &[
        "Careful, it's sharp.",
        "The reflection seems to be smiling.",
        "A piece of a window? Or a mirror?",
    ]),
    prop("empty first aid kit", Vec3::new(0.2, 0.1, 0.15), MaterialClass::Plastic, &[
        "Completely empty. Not even cotton left.",
        "Inside the lid: NOBODY CAN SAVE YOU.",
        "Looted. Only a bloody handprint remains.",
    ]),
    prop("loose pipe", Vec3::new(0.05, 0.6, 0.05), MaterialClass::Metal, &[
        "Heavy enough to fight with. It won't come loose.",
        "Dented, like it hit something.",
        "The end is clogged with hair.",
    ]),
    prop("lost shoe", Vec3::new(0.075, 0.05, 0.15), MaterialClass::Fabric, &[
        "Only the left one.",
        "Small. A student's shoe.",
        "The laces are tied in a dead knot.",
    ]),
    prop("skull model", Vec3::new(0.2, 0.2, 0.2), MaterialClass::Bone, &[
        "From the biology lab... I hope.",
        "Cold and rough to the touch.",
        "The jaw is missing.",
    ]),
    prop("student backpack", Vec3::new(0.3, 0.3, 0.3), MaterialClass::Fabric, &[
        "The zipper is stuck.",
        "Moldy books and a rotten lunch box.",
        "Heavy, like it's full of stones.",
    ]),
    prop("cracked monitor", Vec3::new(0.25, 0.2, 0.05), MaterialClass::Plastic, &[
        "A terrified face is burned into the screen.",
        "Only static.",
        "Is that a bullet hole in the middle?",
    ]),
    prop("chemical bottle", Vec3::new(0.05, 0.125, 0.05), MaterialClass::Glass, &[
        "The label was torn off.",
        "The liquid is an unnatural purple.",
        "Smells like almonds... cyanide?",
    ]),
    prop("broken doll", Vec3::new(0.1, 0.125, 0.1), MaterialClass::Fabric, &[
        "Its eyes were gouged out.",
        "The smile is wrong.",
        "The wind-up key is still turning.",
    ]),
    prop("old radio", Vec3::new(0.2, 0.125, 0.075), MaterialClass::Wood, &[
        "Only hiss.",
        "Blood on the dial.",
        "Sometimes a voice comes through. Calling for help?",
    ]),
    prop("broken fan", Vec3::new(0.25, 0.05, 0.25), MaterialClass::Metal, &[
        "A blade is chipped, like it cut something hard.",
        "The plug is snapped off.",
        "Wrapped in hair.",
    ]),
    prop("red umbrella", Vec3::new(0.1, 0.4, 0.1), MaterialClass::Fabric, &[
        "Opening umbrellas indoors invites ghosts.",
        "The tip is sharp.",
        "Strange talismans are drawn on the canopy.",
    ]),
    prop("soaked mop", Vec3::new(0.05, 0.6, 0.05), MaterialClass::Fabric, &[
        "The water is red.",
        "It smells like fish.",
        "The mop head looks like a wig.",
    ]),
    prop("slashed painting", Vec3::new(0.25, 0.35, 0.02), MaterialClass::Paper, &[
        "The face has been scraped off.",
        "It looks like the principal's portrait.",
        "Anything hidden behind it? No.",
    ]),
    prop("rusty trophy", Vec3::new(0.1, 0.15, 0.1), MaterialClass::Metal, &[
        "First place... what did it cost?",
        "Engraved: TO THE MOST OBEDIENT STUDENT.",
        "It's full of teeth.",
    ]),
    prop("rotary phone", Vec3::new(0.15, 0.1, 0.15), MaterialClass::Plastic, &[
        "The cord has been cut.",
        "Only a dial tone...",
        "It rings at midnight.",
    ]),
    prop("old television", Vec3::new(0.25, 0.2, 0.2), MaterialClass::Emissive, &[
        "Nothing but snow on the screen.",
        "A shrill noise when I get close.",
        "Sometimes a face flashes by.",
    ]),
    prop("mannequin head", Vec3::new(0.2, 0.2, 0.2), MaterialClass::Plastic, &[
        "Its eyes... are they moving?",
        "Painted with grotesque makeup.",
    ]),
];

/// Decoration mounted on a corridor wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallProp {
    FireExtinguisher,
    Poster,
    /// Also a collision box.
    VendingMachine,
}

impl WallProp {
    /// Map a uniform roll to a wall prop, or nothing.
    pub fn roll(r: f32) -> Option<WallProp> {
        if r < 0.15 {
            Some(WallProp::FireExtinguisher)
        } else if r < 0.30 {
            Some(WallProp::Poster)
        } else if r < 0.40 {
            Some(WallProp::VendingMachine)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WallProp::FireExtinguisher => "fire extinguisher",
            WallProp::Poster => "poster",
            WallProp::VendingMachine => "vending machine",
        }
    }

    pub fn flavor(self) -> &'static str {
        match self {
            WallProp::FireExtinguisher => "Expired long ago. The nozzle is rusted shut.",
            WallProp::Poster => "A school festival poster... dated twenty years ago.",
            WallProp::VendingMachine => "Only empty cans inside. There's blood on the buttons.",
        }
    }

    pub fn half_extents(self) -> Vec3 {
        match self {
            WallProp::FireExtinguisher => Vec3::new(0.15, 0.3, 0.15),
            WallProp::Poster => Vec3::new(0.02, 0.6, 0.4),
            WallProp::VendingMachine => Vec3::new(0.6, 1.1, 0.5),
        }
    }

    /// Center height above the floor.
    pub fn height(self) -> f32 {
        match self {
            WallProp::FireExtinguisher => 1.2,
            WallProp::Poster => 2.0,
            WallProp::VendingMachine => 1.1,
        }
    }

    /// Distance from the wall plane to the prop center.
    pub fn inset(self) -> f32 {
        match self {
            WallProp::FireExtinguisher => 0.2,
            WallProp::Poster => 0.05,
            WallProp::VendingMachine => 0.6,
        }
    }

    pub fn material(self) -> MaterialClass {
        match self {
            WallProp::FireExtinguisher => MaterialClass::Metal,
            WallProp::Poster => MaterialClass::Paper,
            WallProp::VendingMachine => MaterialClass::Metal,
        }
    }
}

/// Cumulative pickup weights. The last entry catches the remainder.
pub const ITEM_TABLE: [(f32, ItemKind); 11] = [
    (0.25, ItemKind::Battery),
    (0.35, ItemKind::Bandage),
    (0.45, ItemKind::Pills),
    (0.55, ItemKind::Alcohol),
    (0.65, ItemKind::Cloth),
    (0.75, ItemKind::Herb),
    (0.85, ItemKind::Water),
    (0.90, ItemKind::Metal),
    (0.94, ItemKind::Tape),
    (0.98, ItemKind::Wire),
    (1.00, ItemKind::Key),
];

/// Map a uniform roll in [0, 1) to a pickup item.
pub fn roll_item(r: f32) -> ItemKind {
    ITEM_TABLE
        .iter()
        .find(|(threshold, _)| r < *threshold)
        .map(|(_, item)| *item)
        .unwrap_or(ItemKind::Key)
}
