//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ghost world and every piece of run state,
//! processes player commands, runs the per-tick stages in a fixed order, and
//! produces `GameStateSnapshot`s. Completely headless, so runs can be driven
//! from tests and tools.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lastbell_core::commands::{InputIntent, PlayerCommand};
use lastbell_core::config::{ConfigError, GameConfig};
use lastbell_core::constants::*;
use lastbell_core::content::{ContentTables, HackChallenge, MathPuzzle};
use lastbell_core::enums::*;
use lastbell_core::events::{GameEvent, SceneCommand};
use lastbell_core::state::GameStateSnapshot;
use lastbell_core::stats::RunStats;
use lastbell_core::types::{InteractableId, SimTime};

use crate::achievements::AchievementTracker;
use crate::crafting::{recipe_for, try_craft, Inventory};
use crate::deck::ContentDeck;
use crate::deferred::{DeferredAction, DeferredQueue};
use crate::interaction::InteractableKind;
use crate::level::Level;
use crate::modal::ActiveModal;
use crate::outbox::Outbox;
use crate::player::Player;
use crate::status::StatusEffects;
use crate::systems;
use crate::systems::sanity::SanityFx;
use crate::vitals::{Flashlight, MeterContext, Meters};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    pub game: GameConfig,
    pub content: ContentTables,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Default tuning and content with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.content.validate()
    }
}

/// The simulation engine. Owns the ECS world and all run state.
pub struct SimulationEngine {
    config: GameConfig,
    content: ContentTables,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    /// Bumped on every restart. Deferred entries from older runs are dropped.
    epoch: u32,

    player: Player,
    meters: Meters,
    flashlight: Flashlight,
    status: StatusEffects,
    level: Level,
    inventory: Inventory,
    stats: RunStats,
    achievements: AchievementTracker,

    deferred: DeferredQueue,
    puzzle_deck: ContentDeck<MathPuzzle>,
    hack_deck: ContentDeck<HackChallenge>,
    modal: Option<ActiveModal>,
    sanity_fx: SanityFx,
    hover: Option<InteractableId>,
    next_ghost_id: u32,

    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    outbox: Outbox,
}

impl SimulationEngine {
    /// Create a new engine and start a run. `config` is expected to have
    /// passed [`SimConfig::validate`].
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let max_segments = config.game.max_segments;
        let mut engine = Self {
            puzzle_deck: ContentDeck::new(config.content.puzzles.clone()),
            hack_deck: ContentDeck::new(config.content.hacks.clone()),
            config: config.game,
            content: config.content,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            epoch: 0,
            player: Player::at_origin(),
            meters: Meters::default(),
            flashlight: Flashlight::new(),
            status: StatusEffects::new(),
            level: Level::new(max_segments),
            inventory: Inventory::new(),
            stats: RunStats::new(),
            achievements: AchievementTracker::new(),
            deferred: DeferredQueue::new(),
            modal: None,
            sanity_fx: SanityFx::default(),
            hover: None,
            next_ghost_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            outbox: Outbox::new(),
        };
        engine.start_run();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, input: InputIntent) -> GameStateSnapshot {
        self.process_commands();

        if input.pause {
            self.toggle_pause();
        }

        match self.phase {
            GamePhase::Playing => {
                self.run_playing(&input);
                self.time.advance(DT);
            }
            GamePhase::Hiding => {
                self.run_hiding(&input);
                self.time.advance(DT);
            }
            GamePhase::ElevatorRide => {
                self.drain_deferred();
                self.time.advance(DT);
            }
            _ => {}
        }

        self.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn floor(&self) -> u32 {
        self.stats.floor
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn meters(&self) -> &Meters {
        &self.meters
    }

    pub fn flashlight(&self) -> &Flashlight {
        &self.flashlight
    }

    pub fn status(&self) -> &StatusEffects {
        &self.status
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn achievements(&self) -> &AchievementTracker {
        &self.achievements
    }

    pub fn modal(&self) -> Option<&ActiveModal> {
        self.modal.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Spawn a ghost at an explicit position (for testing).
    #[cfg(test)]
    pub fn spawn_test_ghost(&mut self, kind: GhostKind, position: Vec3) -> lastbell_core::types::GhostId {
        let id = lastbell_core::types::GhostId(self.next_ghost_id);
        self.next_ghost_id += 1;
        crate::world_setup::spawn_ghost_at(&mut self.world, id, kind, position, self.player.position);
        id
    }

    #[cfg(test)]
    pub fn meters_mut(&mut self) -> &mut Meters {
        &mut self.meters
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    #[cfg(test)]
    pub fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }

    #[cfg(test)]
    pub fn status_mut(&mut self) -> &mut StatusEffects {
        &mut self.status
    }

    #[cfg(test)]
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// Activate an interactable directly, bypassing the aim ray (for testing).
    #[cfg(test)]
    pub fn activate_for_test(&mut self, id: InteractableId) {
        self.activate(id);
    }

    /// Start a fresh run on B1.
    fn start_run(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.world.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Playing;
        self.player = Player::at_origin();
        self.meters = Meters::default();
        self.flashlight = Flashlight::new();
        self.status = StatusEffects::new();
        self.level = Level::new(self.config.max_segments);
        self.inventory.clear();
        self.stats = RunStats::new();
        self.achievements = AchievementTracker::new();
        self.deferred.clear();
        self.puzzle_deck = ContentDeck::new(self.content.puzzles.clone());
        self.hack_deck = ContentDeck::new(self.content.hacks.clone());
        self.modal = None;
        self.sanity_fx = SanityFx::default();
        self.hover = None;
        self.next_ghost_id = 0;
        self.despawn_buffer.clear();

        self.outbox = Outbox::new();
        self.outbox.scene(SceneCommand::ClearAll);
        self.extend_level(true, true);
        self.extend_level(true, false);
        self.extend_level(false, false);
        log::info!("run {} started", self.epoch);
    }

    fn extend_level(&mut self, safe: bool, tutorial: bool) {
        systems::level_gen::extend(
            &mut self.level,
            &mut self.rng,
            &self.config,
            &self.content,
            safe,
            tutorial,
            &mut self.outbox,
        );
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Craft { result } => {
                if self.accepts_inventory_commands() {
                    self.craft(result);
                }
            }
            PlayerCommand::UseItem { item } => {
                if self.accepts_inventory_commands() {
                    self.use_item(item);
                }
            }
            PlayerCommand::SubmitPuzzleAnswer { answer } => self.submit_puzzle_answer(&answer),
            PlayerCommand::SubmitHackAnswer { answer } => self.submit_hack_answer(&answer),
            PlayerCommand::CloseModal => {
                if self.phase.is_modal() {
                    self.close_modal();
                }
            }
            PlayerCommand::ExitHiding => {
                if self.phase == GamePhase::Hiding {
                    self.exit_hiding();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
            PlayerCommand::Restart => self.start_run(),
        }
    }

    fn accepts_inventory_commands(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::Playing | GamePhase::Paused | GamePhase::Hiding
        )
    }

    fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Full tick while exploring.
    fn run_playing(&mut self, input: &InputIntent) {
        let dt = DT;

        // 1. Deferred effects
        self.drain_deferred();

        // 2. Player input and movement
        if input.toggle_flashlight {
            self.toggle_flashlight();
        }
        let occluders = self.level.occluders();
        systems::movement::run(
            &mut self.player,
            input,
            &self.config,
            &occluders,
            self.meters.stamina,
            self.meters.sanity,
            &mut self.rng,
            dt,
        );

        // 3-4. Meters and status effects
        self.run_vitals(false, dt);

        // 5. Level generation (extend if needed)
        self.run_level_gen();

        // 6. Ghost AI
        self.run_ghosts(dt);

        // 7. Door interpolation
        systems::doors::run(&mut self.level, dt);

        // 8. Sanity side effects
        systems::sanity::run(
            &mut self.sanity_fx,
            self.meters.sanity,
            &mut self.stats,
            &mut self.world,
            &mut self.next_ghost_id,
            &self.player,
            &self.content,
            &mut self.rng,
            &mut self.outbox,
            dt,
        );

        // 9. Interaction hit-test and activation
        self.update_interaction(input);

        // 10. Achievements
        self.evaluate_achievements();

        // 11. Death
        self.enforce_death();
    }

    /// Reduced tick inside a locker.
    fn run_hiding(&mut self, input: &InputIntent) {
        let dt = DT;
        systems::movement::look(&mut self.player, input);
        self.run_vitals(true, dt);
        self.run_level_gen();
        self.run_ghosts(dt);
        self.hover = None;
        self.enforce_death();
    }

    fn run_vitals(&mut self, hidden: bool, dt: f32) {
        let ctx = MeterContext {
            dt,
            flashlight_on: self.flashlight.on,
            ghost_nearby: systems::ghost_ai::any_within(
                &self.world,
                self.player.position,
                self.config.ghost_proximity_radius,
            ),
            movement: self.player.movement,
            hidden,
            stimulated: self.status.has(StatusEffect::Stimulated),
        };
        systems::meters::run(
            &mut self.meters,
            &mut self.flashlight,
            &ctx,
            &self.config,
            &mut self.rng,
            &mut self.outbox,
        );
        systems::status::run(
            &mut self.status,
            &mut self.meters,
            &self.content,
            &mut self.rng,
            &mut self.outbox,
            dt,
        );
    }

    fn run_level_gen(&mut self) {
        systems::level_gen::run(
            &mut self.level,
            &mut self.world,
            &mut self.next_ghost_id,
            &self.player,
            self.stats.floor,
            self.meters.sanity,
            &self.config,
            &self.content,
            &mut self.rng,
            &mut self.outbox,
        );
    }

    fn run_ghosts(&mut self, dt: f32) {
        systems::ghost_ai::run(
            &mut self.world,
            &mut self.player,
            &mut self.meters,
            &mut self.status,
            self.flashlight.on,
            &mut self.rng,
            &mut self.outbox,
            &mut self.despawn_buffer,
            dt,
        );
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn drain_deferred(&mut self) {
        let due = self.deferred.drain_due(self.time.elapsed_secs, self.epoch);
        for action in due {
            match action {
                DeferredAction::RestoreFlashlight { generation } => {
                    if self.flashlight.generation == generation && self.meters.battery > 0.0 {
                        self.flashlight.set(true);
                    } else {
                        log::debug!("flashlight restore superseded");
                    }
                }
                DeferredAction::CompleteElevatorRide => self.complete_elevator_ride(),
            }
        }
    }

    fn toggle_flashlight(&mut self) {
        if self.flashlight.toggle(self.meters.battery) {
            self.outbox.cue(SoundCue::Click);
        } else {
            log::debug!("flashlight toggle refused: battery empty");
        }
    }

    fn update_interaction(&mut self, input: &InputIntent) {
        let occluders = self.level.occluders();
        self.hover = self.level.registry.query(
            self.player.position,
            self.player.facing.forward(),
            self.config.interact_distance,
            occluders.iter(),
        );
        if input.interact && self.player.interact_cooldown <= 0.0 {
            if let Some(id) = self.hover {
                self.activate(id);
            }
        }
    }

    /// Dispatch on the interactable's kind. Stale ids are ignored.
    fn activate(&mut self, id: InteractableId) {
        let Some(target) = self.level.registry.get(id) else {
            log::debug!("ignoring activation of stale interactable {:?}", id);
            return;
        };
        let kind = target.kind.clone();
        self.outbox.cue(SoundCue::Click);
        self.player.interact_cooldown = INTERACTION_COOLDOWN_SECS;

        match kind {
            InteractableKind::Pickup(item) => {
                self.pick_up(item);
                self.level.remove_interactable(id);
                self.outbox.scene(SceneCommand::RemoveProp { object: id });
            }
            InteractableKind::Door(door_id) => {
                if let Some(door) = self.level.doors.get_mut(&door_id) {
                    let open = door.toggle();
                    self.outbox
                        .toast(if open { "The door opened" } else { "The door closed" });
                }
            }
            InteractableKind::Locker { hide_at } => self.enter_hiding(hide_at),
            InteractableKind::Puzzle => {
                if let Some(puzzle) = self.puzzle_deck.draw(&mut self.rng) {
                    self.open_modal(ActiveModal::Puzzle(puzzle));
                }
            }
            InteractableKind::Computer => {
                if let Some(hack) = self.hack_deck.draw(&mut self.rng) {
                    self.open_modal(ActiveModal::Hacking(hack));
                }
            }
            InteractableKind::Note(text) => self.open_modal(ActiveModal::Reading(text)),
            InteractableKind::Flavor(text) => self.outbox.monologue(text, FLAVOR_MONOLOGUE_SECS),
            InteractableKind::ElevatorCall => {
                let threshold = self.config.elevator_threshold;
                if self.stats.puzzles_solved >= threshold {
                    self.begin_elevator_ride();
                } else {
                    self.outbox.toast(format!(
                        "Elevator locked ({}/{})",
                        self.stats.puzzles_solved, threshold
                    ));
                }
            }
        }
    }

    fn pick_up(&mut self, item: ItemKind) {
        match item.pickup_effect() {
            PickupEffect::RefillBattery => {
                self.meters.battery = METER_MAX;
                self.outbox.toast("Battery replaced (100%)");
            }
            PickupEffect::Bandage => {
                self.status.clear(StatusEffect::Bleeding);
                self.meters.heal(BANDAGE_HEAL);
                self.outbox.toast("Bandage applied: bleeding stopped");
            }
            PickupEffect::Sedate => {
                self.meters.add_sanity(PILLS_SANITY);
                self.outbox.toast("Sedative swallowed: sanity restored");
            }
            PickupEffect::Stash => {
                self.inventory.push(item);
                self.outbox.toast(format!("Picked up: {}", item.display_name()));
            }
        }
    }

    fn enter_hiding(&mut self, hide_at: Vec3) {
        self.player.hide_return = Some(self.player.position);
        self.player.position = hide_at;
        self.player.movement = MovementMode::Idle;
        self.flashlight.set(false);
        self.hover = None;
        self.phase = GamePhase::Hiding;
        self.outbox.toast("Hidden (flashlight off)");
    }

    fn exit_hiding(&mut self) {
        if let Some(position) = self.player.hide_return.take() {
            self.player.position = position;
        }
        self.phase = GamePhase::Playing;
    }

    fn open_modal(&mut self, modal: ActiveModal) {
        let phase = modal.phase();
        self.phase = phase;
        self.modal = Some(modal);
        self.hover = None;
        self.outbox.push(GameEvent::ModalOpened { phase });
    }

    fn close_modal(&mut self) {
        if let Some(modal) = self.modal.take() {
            self.outbox.push(GameEvent::ModalClosed {
                phase: modal.phase(),
            });
        }
        self.phase = GamePhase::Playing;
    }

    fn submit_puzzle_answer(&mut self, answer: &str) {
        let Some(ActiveModal::Puzzle(puzzle)) = &self.modal else {
            log::debug!("puzzle answer with no puzzle open");
            return;
        };
        self.outbox.cue(SoundCue::Click);
        if answer.trim() == puzzle.answer {
            self.stats.puzzles_solved += 1;
            self.stats.puzzles_solved_total += 1;
            self.close_modal();
            self.outbox.toast("Correct!");
        } else {
            self.outbox.toast("Wrong!");
        }
    }

    fn submit_hack_answer(&mut self, answer: &str) {
        let Some(ActiveModal::Hacking(hack)) = &self.modal else {
            log::debug!("hack answer with no terminal open");
            return;
        };
        self.outbox.cue(SoundCue::Click);
        if answer == hack.answer {
            let threshold = self.config.elevator_threshold;
            self.stats.puzzles_solved = (self.stats.puzzles_solved + HACK_PROGRESS).min(threshold);
            self.stats.puzzles_solved_total += 1;
            self.close_modal();
            self.outbox.toast("System breached! (+2 progress)");
        } else {
            self.close_modal();
            self.outbox.toast("Hack failed - security lockout");
        }
    }

    fn craft(&mut self, result: ItemKind) {
        let Some(recipe) = recipe_for(result) else {
            log::debug!("no recipe produces {:?}", result);
            return;
        };
        if try_craft(&mut self.inventory, recipe) {
            self.stats.crafted_count += 1;
            self.outbox.toast(format!("Crafted: {}", recipe.name));
            self.outbox.cue(SoundCue::Click);
        } else {
            self.outbox.toast("Missing materials!");
        }
    }

    fn use_item(&mut self, item: ItemKind) {
        if !self.inventory.contains(item) {
            log::debug!("use of {:?} not in inventory", item);
            return;
        }
        let eye = self.player.position;

        let consumed = match item {
            ItemKind::Molotov => {
                let hit = systems::ghost_ai::stun_within(
                    &mut self.world,
                    eye,
                    MOLOTOV_RADIUS,
                    MOLOTOV_STUN_SECS,
                    true,
                );
                if hit > 0 {
                    self.stats.ghost_stunned = true;
                    self.outbox.toast("Molotov thrown! The ghost is stunned!");
                    true
                } else {
                    self.outbox.toast("No target nearby!");
                    false
                }
            }
            ItemKind::Emp => {
                let hit = systems::ghost_ai::stun_within(
                    &mut self.world,
                    eye,
                    EMP_RADIUS,
                    EMP_STUN_SECS,
                    false,
                );
                if hit > 0 {
                    self.stats.emp_used = true;
                    if self.flashlight.on {
                        self.flashlight.set(false);
                        self.deferred.schedule(
                            self.time.elapsed_secs + EMP_FLASHLIGHT_OUTAGE_SECS as f64,
                            self.epoch,
                            DeferredAction::RestoreFlashlight {
                                generation: self.flashlight.generation,
                            },
                        );
                    }
                    self.outbox
                        .toast("EMP triggered! Every spirit nearby is paralyzed.");
                } else {
                    self.outbox.toast("EMP triggered... but nothing responded.");
                }
                true
            }
            ItemKind::HerbalMedkit => {
                if self.meters.health < NEAR_DEATH_HEALTH {
                    self.stats.healed_near_death = true;
                }
                self.meters.heal(MEDKIT_HEAL);
                self.status.clear(StatusEffect::Bleeding);
                self.outbox.toast("Herbal medkit applied: health restored");
                true
            }
            ItemKind::Adrenaline => {
                self.meters.stamina = METER_MAX;
                self.meters.add_sanity(ADRENALINE_SANITY);
                self.outbox.toast("Adrenaline injected: stamina full");
                true
            }
            ItemKind::Stim => {
                self.status
                    .apply_timed(StatusEffect::Stimulated, STIM_DURATION_SECS);
                self.outbox
                    .toast("Stimulant injected: unlimited stamina for 30s!");
                true
            }
            ItemKind::Armor => {
                self.meters.equip_armor();
                self.outbox.toast("Scrap armor equipped: +50 health");
                true
            }
            other => {
                self.outbox
                    .toast(format!("{} cannot be used", other.display_name()));
                false
            }
        };

        if consumed {
            self.inventory.remove_first(item);
        }
    }

    fn begin_elevator_ride(&mut self) {
        self.phase = GamePhase::ElevatorRide;
        self.hover = None;
        self.deferred.schedule(
            self.time.elapsed_secs + ELEVATOR_RIDE_SECS as f64,
            self.epoch,
            DeferredAction::CompleteElevatorRide,
        );
        log::info!("elevator leaving B{}", self.stats.floor);
    }

    fn complete_elevator_ride(&mut self) {
        let next = self.stats.floor + 1;
        if next > self.config.final_floor {
            self.phase = GamePhase::Escaped;
            self.outbox.push(GameEvent::Escaped {
                floor: self.stats.floor,
            });
            log::info!("escaped from B{}", self.stats.floor);
            return;
        }

        self.stats.floor = next;
        self.stats.puzzles_solved = 0;
        self.player.position = Vec3::new(0.0, EYE_HEIGHT, 0.0);
        self.player.hide_return = None;
        self.world.clear();
        self.level.clear();
        self.hover = None;
        self.outbox.scene(SceneCommand::ClearAll);
        self.extend_level(true, false);
        self.extend_level(false, false);

        self.outbox.toast(format!("Arrived at B{}", next));
        let line = if next >= GHOST_MIN_FLOOR {
            "The air turned cold... they're coming."
        } else {
            "It's safe here... for now."
        };
        self.outbox.monologue(line, ARRIVAL_MONOLOGUE_SECS);
        self.outbox.push(GameEvent::FloorReached { floor: next });
        self.phase = GamePhase::Playing;
        log::info!("arrived at B{}", next);
    }

    fn evaluate_achievements(&mut self) {
        self.stats.inventory_len = self.inventory.len();
        for achievement in self.achievements.evaluate(&self.stats) {
            log::info!("achievement unlocked: {:?}", achievement.id);
            self.outbox.push(GameEvent::AchievementUnlocked {
                id: achievement.id,
                title: achievement.title.to_string(),
                icon: achievement.icon.to_string(),
            });
            self.outbox.cue(SoundCue::Click);
        }
    }

    /// Last stage of every tick. Emits exactly one death per run.
    fn enforce_death(&mut self) {
        if self.phase.is_terminal() || self.meters.health > 0.0 {
            return;
        }
        let cause = self.meters.pending_death.unwrap_or(DeathCause::BledOut);
        self.meters.health = 0.0;
        self.phase = GamePhase::Dead;
        self.modal = None;
        self.hover = None;
        self.outbox.push(GameEvent::Death { cause });
        log::info!("player died on B{}: {}", self.stats.floor, cause.message());
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let (events, scene) = self.outbox.take();
        let source = systems::snapshot::SnapshotSource {
            world: &self.world,
            time: self.time,
            phase: self.phase,
            player: &self.player,
            meters: &self.meters,
            flashlight: &self.flashlight,
            status: &self.status,
            inventory: &self.inventory,
            level: &self.level,
            hover: self.hover,
            modal: self.modal.as_ref(),
            stats: &self.stats,
            elevator_threshold: self.config.elevator_threshold,
            achievements: &self.achievements,
        };
        systems::snapshot::build_snapshot(&source, events, scene)
    }
}
