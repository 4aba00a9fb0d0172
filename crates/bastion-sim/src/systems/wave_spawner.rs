//! Wave scheduler: inter-wave countdowns, group-by-group spawning, and
//! wave completion.
//!
//! Every delay is a tick countdown advanced by [`WaveScheduler::run`], so
//! tearing the scheduler down (resetting it to default) cancels everything
//! pending. A wave completes once its remaining-enemy counter is zero *and*
//! spawning has finished, whichever happens last, and exactly once.

use tracing::{debug, info, warn};

use bastion_core::config::WaveDefinition;
use bastion_core::constants::COUNTDOWN_STEP_SECS;
use bastion_core::enums::{EnemyKind, WavePhase};
use bastion_core::error::SpawnError;
use bastion_core::events::GameEvent;
use bastion_core::state::WaveView;
use bastion_core::types::{Countdown, EnemyHandle};

use crate::collaborators::ScoreSink;

/// Creates enemies on the scheduler's behalf.
pub trait EnemySpawner {
    fn spawn(&mut self, kind: EnemyKind) -> Result<EnemyHandle, SpawnError>;
}

/// Position within the current wave's spawn sequence.
#[derive(Debug, Clone, Copy)]
struct SpawnCursor {
    group: usize,
    spawned_in_group: u32,
    /// Delay before the next step of the sequence.
    wait: Countdown,
}

#[derive(Debug, Clone, Default)]
pub struct WaveScheduler {
    waves: Vec<WaveDefinition>,
    time_between_waves_secs: f64,
    phase: WavePhase,
    /// Index of the current wave; `None` before the first.
    current: Option<usize>,
    countdown: Countdown,
    countdown_step: Countdown,
    /// `Some` while the current wave is still spawning.
    cursor: Option<SpawnCursor>,
    enemies_remaining: u32,
    /// Set once the current wave's completion has been reported.
    completed: bool,
}

impl WaveScheduler {
    /// Reset to before the first wave and begin the first countdown.
    pub fn initialize(
        &mut self,
        waves: Vec<WaveDefinition>,
        time_between_waves_secs: f64,
        events: &mut Vec<GameEvent>,
    ) {
        *self = Self {
            waves,
            time_between_waves_secs,
            ..Self::default()
        };
        self.start_countdown(events);
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Index of the current wave, if one has started.
    pub fn current_wave(&self) -> Option<usize> {
        self.current
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.enemies_remaining
    }

    pub fn is_spawning(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn is_last_wave(&self) -> bool {
        self.current.is_some_and(|i| i + 1 >= self.waves.len())
    }

    /// The wave after the current one, if any.
    pub fn upcoming_wave(&self) -> Option<&WaveDefinition> {
        let next = self.current.map_or(0, |i| i + 1);
        self.waves.get(next)
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            phase: self.phase,
            current_wave: self.current.map_or(0, |i| i as u32 + 1),
            total_waves: self.waves.len() as u32,
            enemies_remaining: self.enemies_remaining,
            spawning: self.is_spawning(),
            countdown_secs: if self.phase == WavePhase::CountingDown {
                self.countdown.remaining_secs()
            } else {
                0.0
            },
        }
    }

    /// Advance one tick.
    pub fn run(
        &mut self,
        spawner: &mut dyn EnemySpawner,
        score: &mut dyn ScoreSink,
        events: &mut Vec<GameEvent>,
    ) {
        match self.phase {
            WavePhase::CountingDown => self.tick_countdown(spawner, score, events),
            WavePhase::Spawning => {
                let due = self.cursor.as_mut().is_some_and(|c| c.wait.tick());
                if due {
                    self.advance_spawning(spawner, score, events);
                }
            }
            WavePhase::Idle | WavePhase::AllComplete => {}
        }
    }

    /// Count `count` enemies of the current wave as resolved (dead or
    /// leaked).
    pub fn on_enemies_resolved(
        &mut self,
        count: u32,
        score: &mut dyn ScoreSink,
        events: &mut Vec<GameEvent>,
    ) {
        if count == 0 {
            return;
        }
        self.enemies_remaining = self.enemies_remaining.saturating_sub(count);
        self.try_complete_wave(score, events);
    }

    fn start_countdown(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = WavePhase::CountingDown;
        self.countdown = Countdown::from_secs(self.time_between_waves_secs);
        self.countdown_step = Countdown::from_secs(COUNTDOWN_STEP_SECS);
        events.push(GameEvent::CountdownTick {
            remaining_secs: self.countdown.remaining_secs(),
        });
    }

    fn tick_countdown(
        &mut self,
        spawner: &mut dyn EnemySpawner,
        score: &mut dyn ScoreSink,
        events: &mut Vec<GameEvent>,
    ) {
        if self.countdown.tick() {
            self.start_next_wave(spawner, score, events);
            return;
        }
        if self.countdown_step.tick() {
            self.countdown_step = Countdown::from_secs(COUNTDOWN_STEP_SECS);
            events.push(GameEvent::CountdownTick {
                remaining_secs: self.countdown.remaining_secs(),
            });
        }
    }

    fn start_next_wave(
        &mut self,
        spawner: &mut dyn EnemySpawner,
        score: &mut dyn ScoreSink,
        events: &mut Vec<GameEvent>,
    ) {
        let next = self.current.map_or(0, |i| i + 1);
        let Some(wave) = self.waves.get(next) else {
            self.finish_all(events);
            return;
        };

        self.current = Some(next);
        self.phase = WavePhase::Spawning;
        self.enemies_remaining = wave.total_enemy_count();
        self.completed = false;
        self.cursor = Some(SpawnCursor {
            group: 0,
            spawned_in_group: 0,
            wait: Countdown::expired(),
        });
        info!(
            wave = next + 1,
            enemies = self.enemies_remaining,
            "wave started"
        );
        events.push(GameEvent::WaveStarted {
            index: next as u32,
            definition: wave.clone(),
        });

        // The first enemy appears on the tick the wave starts.
        self.advance_spawning(spawner, score, events);
    }

    /// Run spawn steps until one leaves a non-zero delay or the sequence
    /// ends. Called only when the cursor's wait has run out.
    fn advance_spawning(
        &mut self,
        spawner: &mut dyn EnemySpawner,
        score: &mut dyn ScoreSink,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(wave_index) = self.current else {
            return;
        };
        loop {
            let Some(mut cursor) = self.cursor else {
                return;
            };
            let Some(wave) = self.waves.get(wave_index) else {
                return;
            };

            match wave.groups.get(cursor.group) {
                None => {
                    self.cursor = None;
                    debug!(wave = wave_index + 1, "wave finished spawning");
                    self.try_complete_wave(score, events);
                    return;
                }
                Some(group) if cursor.spawned_in_group < group.count => {
                    let kind = group.enemy_kind;
                    cursor.spawned_in_group += 1;
                    cursor.wait = Countdown::from_secs(group.spawn_delay_secs);
                    self.cursor = Some(cursor);
                    self.spawn_one(kind, spawner, events);
                }
                Some(_) => {
                    cursor.group += 1;
                    cursor.spawned_in_group = 0;
                    cursor.wait = Countdown::from_secs(wave.delay_between_groups_secs);
                    self.cursor = Some(cursor);
                }
            }

            if !cursor.wait.is_expired() {
                return;
            }
        }
    }

    fn spawn_one(
        &mut self,
        kind: EnemyKind,
        spawner: &mut dyn EnemySpawner,
        events: &mut Vec<GameEvent>,
    ) {
        match spawner.spawn(kind) {
            Ok(enemy) => {
                debug!(?enemy, ?kind, "enemy spawned");
                events.push(GameEvent::EnemySpawned { enemy, kind });
            }
            Err(err) => {
                warn!(?kind, %err, "spawn failed, counting enemy as resolved");
                self.enemies_remaining = self.enemies_remaining.saturating_sub(1);
            }
        }
    }

    /// Report the current wave complete if nothing remains and spawning is
    /// over. Safe to call any number of times.
    fn try_complete_wave(&mut self, score: &mut dyn ScoreSink, events: &mut Vec<GameEvent>) {
        if self.phase != WavePhase::Spawning
            || self.completed
            || self.is_spawning()
            || self.enemies_remaining > 0
        {
            return;
        }
        let Some(index) = self.current else {
            return;
        };
        self.completed = true;
        info!(wave = index + 1, "wave completed");
        events.push(GameEvent::WaveCompleted {
            index: index as u32,
        });
        score.on_wave_completed(index as u32);

        if self.is_last_wave() {
            self.finish_all(events);
        } else {
            self.start_countdown(events);
        }
    }

    fn finish_all(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = WavePhase::AllComplete;
        self.cursor = None;
        info!("all waves completed");
        events.push(GameEvent::AllWavesCompleted);
    }
}
