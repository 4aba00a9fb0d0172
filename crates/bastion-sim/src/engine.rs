//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the grid, the wave scheduler
//! and the injected collaborators. It processes player commands between
//! ticks, runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use bastion_core::catalog::Catalog;
use bastion_core::commands::PlayerCommand;
use bastion_core::components::TowerState;
use bastion_core::config::LevelConfig;
use bastion_core::constants::MAX_TIME_SCALE;
use bastion_core::enums::{GamePhase, ScenarioId, TowerKind, TowerPhase, WavePhase};
use bastion_core::error::{ConfigError, PlacementError, RepairError};
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::{CellCoord, Countdown, SimTime, TowerHandle};
use bastion_grid::Grid;

use crate::collaborators::{Collaborators, Currency, PlayerLives, ScoreSink};
use crate::registry;
use crate::scenario;
use crate::systems;
use crate::systems::wave_spawner::WaveScheduler;
use crate::world_setup::{self, WorldSpawner};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Enemy and tower stats.
    pub catalog: Catalog,
    /// Whether tower-attacking enemies can also damage and destroy towers.
    pub destructible_towers: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            catalog: Catalog::default(),
            destructible_towers: false,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,

    catalog: Catalog,
    destructible_towers: bool,
    selected_scenario: ScenarioId,
    /// Level loaded from outside, preferred over the selected scenario.
    custom_level: Option<LevelConfig>,
    /// Scenario behind the running level, `None` for a custom level.
    active_scenario: Option<ScenarioId>,
    level: Option<LevelConfig>,
    grid: Option<Grid>,
    waves: WaveScheduler,
    collaborators: Collaborators,
}

impl SimulationEngine {
    /// Create a new simulation engine with the default collaborators.
    pub fn new(config: SimConfig) -> Self {
        Self::with_collaborators(config, Collaborators::default())
    }

    /// Create a new simulation engine reporting to the given collaborators.
    pub fn with_collaborators(config: SimConfig, collaborators: Collaborators) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            catalog: config.catalog,
            destructible_towers: config.destructible_towers,
            selected_scenario: ScenarioId::default(),
            custom_level: None,
            active_scenario: None,
            level: None,
            grid: None,
            waves: WaveScheduler::default(),
            collaborators,
        }
    }

    /// Use `level` for the next `StartLevel` instead of a built-in scenario.
    pub fn load_level(&mut self, level: LevelConfig) -> Result<(), ConfigError> {
        level.validate()?;
        self.custom_level = Some(level);
        Ok(())
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
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.active_scenario,
            self.time_scale,
            &self.waves,
            &self.collaborators,
            events,
        )
    }

    /// Tear down whatever is running and start `level`.
    pub fn start_level(&mut self, level: LevelConfig) -> Result<(), ConfigError> {
        self.begin(level, None)
    }

    /// Tear down whatever is running and start a built-in scenario.
    pub fn start_scenario(&mut self, scenario: ScenarioId) -> Result<(), ConfigError> {
        self.selected_scenario = scenario;
        self.begin(scenario::build_level(scenario), Some(scenario))
    }

    /// Buy a tower and put it on `cell`.
    pub fn place_tower(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<TowerHandle, PlacementError> {
        if !matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
            return Err(PlacementError::NoActiveLevel);
        }
        let grid = self.grid.as_mut().ok_or(PlacementError::NoActiveLevel)?;
        grid.check_placement(cell)?;
        let stats = self
            .catalog
            .tower(kind)
            .map_err(|_| PlacementError::UnknownTowerKind(kind))?;

        let currency = &mut self.collaborators.currency;
        if !currency.spend(stats.cost) {
            return Err(PlacementError::InsufficientFunds {
                cost: stats.cost,
                balance: currency.balance(),
            });
        }
        grid.place_tower(cell);

        let position = grid.cell_to_world(cell);
        let entity = world_setup::spawn_tower(&mut self.world, kind, stats, cell, position);
        let tower = registry::tower_handle(entity);
        debug!(?tower, ?kind, ?cell, "tower placed");
        self.events.push(GameEvent::TowerPlaced { tower, kind, cell });
        self.events.push(GameEvent::CurrencyChanged {
            balance: currency.balance(),
        });
        Ok(tower)
    }

    /// Pay to restore a destroyed tower to full health.
    pub fn repair_tower(&mut self, tower: TowerHandle) -> Result<(), RepairError> {
        let entity =
            registry::resolve_tower(&self.world, tower).ok_or(RepairError::NoSuchTower(tower))?;
        let state = *self
            .world
            .get::<&TowerState>(entity)
            .map_err(|_| RepairError::NoSuchTower(tower))?;
        if !state.is_destroyed() {
            return Err(RepairError::NotDestroyed(tower));
        }
        let stats = self
            .catalog
            .tower(state.kind)
            .map_err(|_| RepairError::NotRepairable(tower))?;
        if !stats.repairable {
            return Err(RepairError::NotRepairable(tower));
        }

        let currency = &mut self.collaborators.currency;
        if !currency.spend(stats.repair_cost) {
            return Err(RepairError::InsufficientFunds {
                cost: stats.repair_cost,
                balance: currency.balance(),
            });
        }

        if let Ok(mut slot) = self.world.get::<&mut TowerState>(entity) {
            slot.health = slot.max_health;
            slot.phase = TowerPhase::Idle;
            slot.target = None;
            slot.stun = Countdown::expired();
            slot.cooldown = Countdown::from_secs(stats.fire_interval_secs());
        }
        debug!(?tower, "tower repaired");
        self.events.push(GameEvent::TowerRepaired { tower });
        self.events.push(GameEvent::TowerHealthChanged {
            tower,
            current: state.max_health,
            max: state.max_health,
        });
        self.events.push(GameEvent::CurrencyChanged {
            balance: currency.balance(),
        });
        Ok(())
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The grid of the running level.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// The running level's configuration.
    pub fn level(&self) -> Option<&LevelConfig> {
        self.level.as_ref()
    }

    pub fn wave_scheduler(&self) -> &WaveScheduler {
        &self.waves
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Spawn an enemy at `position` walking straight along +x (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        kind: bastion_core::enums::EnemyKind,
        position: glam::DVec3,
    ) -> bastion_core::types::EnemyHandle {
        let stats = self
            .catalog
            .enemy(kind)
            .expect("test catalog has the enemy kind")
            .clone();
        let path: std::sync::Arc<[glam::DVec3]> =
            vec![position, position + glam::DVec3::new(100.0, 0.0, 0.0)].into();
        let entity = world_setup::spawn_enemy(&mut self.world, kind, &stats, path);
        registry::enemy_handle(entity)
    }

    /// Get a mutable reference to the ECS world (for testing).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn begin(
        &mut self,
        level: LevelConfig,
        scenario: Option<ScenarioId>,
    ) -> Result<(), ConfigError> {
        level.validate()?;
        self.catalog.validate()?;
        self.teardown();

        let grid = Grid::build(&level);
        self.collaborators.currency.reset(level.starting_currency);
        self.collaborators.lives.reset(level.starting_lives);
        self.collaborators.score.reset();
        self.waves.initialize(
            level.waves.clone(),
            level.time_between_waves_secs,
            &mut self.events,
        );
        info!(
            level = level.level_number,
            name = %level.name,
            waves = level.waves.len(),
            "level started"
        );
        self.events.push(GameEvent::CurrencyChanged {
            balance: self.collaborators.currency.balance(),
        });
        self.events.push(GameEvent::LivesChanged {
            remaining: self.collaborators.lives.lives(),
        });

        self.grid = Some(grid);
        self.level = Some(level);
        self.active_scenario = scenario;
        self.phase = GamePhase::Active;
        self.time = SimTime::default();
        Ok(())
    }

    /// Destroy every entity and cancel every pending timer.
    fn teardown(&mut self) {
        self.world.clear();
        self.waves = WaveScheduler::default();
        self.grid = None;
        self.despawn_buffer.clear();
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
            PlayerCommand::SelectScenario { scenario } => {
                if matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
                    warn!(?scenario, "cannot change scenario during a level");
                    return;
                }
                self.selected_scenario = scenario;
                self.custom_level = None;
            }
            PlayerCommand::StartLevel => {
                if matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
                    return;
                }
                let result = match self.custom_level.clone() {
                    Some(level) => self.start_level(level),
                    None => self.start_scenario(self.selected_scenario),
                };
                if let Err(err) = result {
                    warn!(%err, "failed to start level");
                }
            }
            PlayerCommand::RestartLevel => {
                let Some(level) = self.level.clone() else {
                    warn!("no level to restart");
                    return;
                };
                if let Err(err) = self.begin(level, self.active_scenario) {
                    warn!(%err, "failed to restart level");
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.teardown();
                self.level = None;
                self.active_scenario = None;
                self.phase = GamePhase::MainMenu;
                self.time = SimTime::default();
            }
            PlayerCommand::PlaceTower { kind, x, z } => {
                if let Err(err) = self.place_tower(kind, CellCoord::new(x, z)) {
                    warn!(?kind, x, z, %err, "tower placement rejected");
                }
            }
            PlayerCommand::RepairTower { tower } => {
                if let Err(err) = self.repair_tower(tower) {
                    warn!(?tower, %err, "tower repair rejected");
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();

        // 1. Wave spawning
        if let Some(grid) = self.grid.as_ref() {
            let mut spawner = WorldSpawner {
                world: &mut self.world,
                grid,
                catalog: &self.catalog,
                rng: &mut self.rng,
            };
            self.waves.run(
                &mut spawner,
                self.collaborators.score.as_mut(),
                &mut self.events,
            );
        }
        // 2. Tower-attacking enemies
        systems::enemy_behavior::run(&mut self.world, self.destructible_towers, &mut self.events);
        // 3. Enemy movement and status timers
        let exits = systems::enemy_movement::run(
            &mut self.world,
            dt,
            &mut self.collaborators,
            &mut self.events,
        );
        self.resolve_enemies(exits);
        // 4. Tower targeting and fire
        let killed = systems::towers::run(
            &mut self.world,
            &mut self.rng,
            &mut self.collaborators,
            &mut self.events,
        );
        self.resolve_enemies(killed);
        // 5. Projectile flight and impact
        let killed = systems::projectiles::run(
            &mut self.world,
            dt,
            &mut self.collaborators,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        self.resolve_enemies(killed);
        // 6. Cleanup (exited, finished dying)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.check_outcome();
    }

    fn resolve_enemies(&mut self, count: u32) {
        self.waves
            .on_enemies_resolved(count, self.collaborators.score.as_mut(), &mut self.events);
    }

    /// Defeat takes precedence over victory within the same tick.
    fn check_outcome(&mut self) {
        if self.collaborators.lives.is_game_over() {
            info!(score = self.collaborators.score.score(), "level lost");
            self.phase = GamePhase::Defeat;
            self.events.push(GameEvent::LevelCompleted { victory: false });
        } else if self.waves.phase() == WavePhase::AllComplete {
            info!(score = self.collaborators.score.score(), "level won");
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::LevelCompleted { victory: true });
        }
    }
}
