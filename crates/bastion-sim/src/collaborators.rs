//! External collaborators the simulation reports to: currency, lives, score.
//!
//! The engine owns one of each, injected at construction. Default
//! implementations keep plain counters.

use bastion_core::constants::{STARTING_CURRENCY, STARTING_LIVES, WAVE_BONUS_BASE, WAVE_BONUS_PER_INDEX};
use bastion_core::enums::EnemyKind;

/// Player currency. Spent on towers and repairs, paid out as bounties.
pub trait Currency: Send {
    fn balance(&self) -> u32;

    fn can_afford(&self, cost: u32) -> bool {
        self.balance() >= cost
    }

    /// Deduct `cost`. Returns false, changing nothing, if it is unaffordable.
    fn spend(&mut self, cost: u32) -> bool;

    fn add(&mut self, amount: u32);

    /// Set the balance at level start.
    fn reset(&mut self, balance: u32);
}

/// Player lives. Reaching zero ends the level in defeat.
pub trait PlayerLives: Send {
    fn lives(&self) -> u32;

    /// Remove `amount` lives (clamped at zero) and return what is left.
    fn reduce_lives(&mut self, amount: u32) -> u32;

    fn reset(&mut self, lives: u32);

    fn is_game_over(&self) -> bool {
        self.lives() == 0
    }
}

/// Receives score-worthy events. Never read back by the simulation except
/// for display.
pub trait ScoreSink: Send {
    fn on_enemy_defeated(&mut self, kind: EnemyKind, value: u32);

    fn on_wave_completed(&mut self, wave_index: u32);

    fn score(&self) -> u32;

    fn reset(&mut self);
}

#[derive(Debug, Clone)]
pub struct Treasury {
    balance: u32,
}

impl Treasury {
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }
}

impl Default for Treasury {
    fn default() -> Self {
        Self::new(STARTING_CURRENCY)
    }
}

impl Currency for Treasury {
    fn balance(&self) -> u32 {
        self.balance
    }

    fn spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.balance -= cost;
        true
    }

    fn add(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    fn reset(&mut self, balance: u32) {
        self.balance = balance;
    }
}

#[derive(Debug, Clone)]
pub struct LifePool {
    lives: u32,
}

impl LifePool {
    pub fn new(lives: u32) -> Self {
        Self { lives }
    }
}

impl Default for LifePool {
    fn default() -> Self {
        Self::new(STARTING_LIVES)
    }
}

impl PlayerLives for LifePool {
    fn lives(&self) -> u32 {
        self.lives
    }

    fn reduce_lives(&mut self, amount: u32) -> u32 {
        self.lives = self.lives.saturating_sub(amount);
        self.lives
    }

    fn reset(&mut self, lives: u32) {
        self.lives = lives;
    }
}

/// Running score: enemy values plus a bonus per completed wave.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    score: u32,
    enemies_defeated: u32,
    waves_completed: u32,
}

impl ScoreBoard {
    pub fn enemies_defeated(&self) -> u32 {
        self.enemies_defeated
    }

    pub fn waves_completed(&self) -> u32 {
        self.waves_completed
    }
}

impl ScoreSink for ScoreBoard {
    fn on_enemy_defeated(&mut self, _kind: EnemyKind, value: u32) {
        self.enemies_defeated += 1;
        self.score = self.score.saturating_add(value);
    }

    fn on_wave_completed(&mut self, wave_index: u32) {
        self.waves_completed += 1;
        let bonus = WAVE_BONUS_BASE + WAVE_BONUS_PER_INDEX * wave_index;
        self.score = self.score.saturating_add(bonus);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The collaborators one match reports to.
pub struct Collaborators {
    pub currency: Box<dyn Currency>,
    pub lives: Box<dyn PlayerLives>,
    pub score: Box<dyn ScoreSink>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            currency: Box::new(Treasury::default()),
            lives: Box::new(LifePool::default()),
            score: Box::new(ScoreBoard::default()),
        }
    }
}
