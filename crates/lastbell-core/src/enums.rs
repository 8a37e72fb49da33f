//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Ghost archetype. Hallucinations are the only non-hostile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostKind {
    /// Red shadow that always chases.
    Shadow,
    /// Ceiling crawler, faster when lit.
    Crawler,
    /// Statue that only moves while unobserved.
    Mannequin,
    /// Wanders until it notices the player, then screams.
    Screamer,
    /// Slow drifting spirit.
    Phantom,
    /// Sanity-induced jump scare. Harmless apart from the fright.
    Hallucination,
}

impl GhostKind {
    /// Kinds the level generator may roll when a segment spawns a ghost.
    pub const HOSTILE: [GhostKind; 5] = [
        GhostKind::Shadow,
        GhostKind::Crawler,
        GhostKind::Mannequin,
        GhostKind::Screamer,
        GhostKind::Phantom,
    ];

    pub fn is_hostile(self) -> bool {
        self != GhostKind::Hallucination
    }
}

/// Ghost behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostState {
    #[default]
    Idle,
    Wandering,
    Chasing,
    Screaming,
    /// Stunned by a consumable, or (for the mannequin) observed.
    Frozen,
}

/// Top-level game phase. `Dead` and `Escaped` are terminal until restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Puzzle,
    Hacking,
    Reading,
    Hiding,
    ElevatorRide,
    Paused,
    Dead,
    Escaped,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Dead | GamePhase::Escaped)
    }

    pub fn is_modal(self) -> bool {
        matches!(
            self,
            GamePhase::Puzzle | GamePhase::Hacking | GamePhase::Reading
        )
    }
}

/// How the player moved this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    #[default]
    Idle,
    Walk,
    Run,
    Crouch,
}

/// Every item the player can pick up, craft or use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Battery,
    Key,
    Bandage,
    Pills,
    Alcohol,
    Cloth,
    Herb,
    Water,
    Metal,
    Tape,
    Wire,
    Molotov,
    HerbalMedkit,
    Adrenaline,
    Emp,
    Stim,
    Armor,
}

impl ItemKind {
    /// What picking this item up does.
    pub fn pickup_effect(self) -> PickupEffect {
        match self {
            ItemKind::Battery => PickupEffect::RefillBattery,
            ItemKind::Bandage => PickupEffect::Bandage,
            ItemKind::Pills => PickupEffect::Sedate,
            _ => PickupEffect::Stash,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ItemKind::Battery => "Battery",
            ItemKind::Key => "Rusty Key",
            ItemKind::Bandage => "Bandage",
            ItemKind::Pills => "Sedative Pills",
            ItemKind::Alcohol => "Rubbing Alcohol",
            ItemKind::Cloth => "Cloth Scrap",
            ItemKind::Herb => "Green Herb",
            ItemKind::Water => "Bottled Water",
            ItemKind::Metal => "Scrap Metal",
            ItemKind::Tape => "Duct Tape",
            ItemKind::Wire => "Circuit Wire",
            ItemKind::Molotov => "Molotov",
            ItemKind::HerbalMedkit => "Herbal Medkit",
            ItemKind::Adrenaline => "Adrenaline",
            ItemKind::Emp => "EMP Device",
            ItemKind::Stim => "Stimulant",
            ItemKind::Armor => "Scrap Armor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ItemKind::Battery => "A standard 9V battery. Recharges the flashlight.",
            ItemKind::Key => "An old rusted key. Maybe it opens something?",
            ItemKind::Bandage => "A clean bandage. Stops bleeding and restores a little health.",
            ItemKind::Pills => "Unlabeled pills with a calming effect. Restores sanity.",
            ItemKind::Alcohol => "Medical alcohol. Flammable. Crafting material.",
            ItemKind::Cloth => "A torn rag. Crafting material.",
            ItemKind::Herb => "A strange green herb with a fresh smell. Crafting material.",
            ItemKind::Water => "Mineral water. Crafting material.",
            ItemKind::Metal => "Sharp scrap metal. Crafting material.",
            ItemKind::Tape => "Heavy duty tape. Crafting material.",
            ItemKind::Wire => "Electronic wiring. Crafting material.",
            ItemKind::Molotov => "A homemade firebomb. Stuns a nearby ghost for 5 seconds.",
            ItemKind::HerbalMedkit => "A herbal first aid kit. Restores 50 health.",
            ItemKind::Adrenaline => "Emergency adrenaline. Restores all stamina and some sanity.",
            ItemKind::Emp => "An electromagnetic pulse. Paralyzes every ghost nearby for 10 seconds.",
            ItemKind::Stim => "A powerful stimulant. Unlimited stamina for 30 seconds.",
            ItemKind::Armor => "Makeshift armor from scrap. Grants 50 extra health.",
        }
    }
}

/// Immediate result of picking an item up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupEffect {
    RefillBattery,
    Bandage,
    Sedate,
    Stash,
}

/// Named status conditions layered on top of the meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusEffect {
    /// Periodic health loss until bandaged.
    Bleeding,
    /// Unlimited stamina while the timer runs.
    Stimulated,
}

/// Sound cues forwarded to the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Click,
    Scream,
    Breath,
}

/// Achievement identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementId {
    FirstSteps,
    DeepDiver,
    Survivor,
    Alchemist,
    GhostHunter,
    TechSavvy,
    MasterMind,
    Hoarder,
    IronWill,
    NearDeath,
}

/// Coarse geometry class for renderer placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeClass {
    Floor,
    Ceiling,
    Wall,
    Door,
    Locker,
    Desk,
    Blackboard,
    Terminal,
    ElevatorFrame,
    ElevatorDoor,
    WallProp,
    Prop,
    Note,
    Pickup,
    Table,
}

/// Coarse material class for renderer placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialClass {
    CorridorFloor,
    CorridorWall,
    Ceiling,
    RoomFloor,
    RoomWall,
    Wood,
    Metal,
    Paper,
    Glass,
    Bone,
    Plastic,
    Fabric,
    Chalkboard,
    Emissive,
}

/// What ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Caught by a ghost of this kind.
    Ghost(GhostKind),
    /// Health drained by bleeding.
    BledOut,
}

impl DeathCause {
    pub fn message(self) -> &'static str {
        match self {
            DeathCause::Ghost(GhostKind::Shadow) => "The red shadow tore you apart.",
            DeathCause::Ghost(GhostKind::Crawler) => "Something dropped from the ceiling.",
            DeathCause::Ghost(GhostKind::Mannequin) => "You looked away.",
            DeathCause::Ghost(GhostKind::Screamer) => "The scream was the last thing you heard.",
            DeathCause::Ghost(GhostKind::Phantom) => "The phantom passed through you.",
            DeathCause::Ghost(GhostKind::Hallucination) => "Your mind gave out.",
            DeathCause::BledOut => "You bled out in the dark.",
        }
    }
}
