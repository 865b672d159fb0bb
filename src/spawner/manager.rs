//! Wave bookkeeping: which spawners exist, how many enemies may still enter
//! the arena, and when the next wave is due.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

/// What a spawner is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SpawnerKind {
    /// Releases timed waves and takes part in the wave budget
    Wave,
    /// Placed once with the arena; deaths do not touch the budget
    Placed,
}

/// Records where an entity came from, checked when it dies.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedFrom(pub SpawnerKind);

/// A spawn point in the arena.
#[derive(Component, Debug, Clone)]
pub struct Spawner {
    pub kind: SpawnerKind,
    /// Enemy types (EnemyRegistry keys) this spawner can produce
    pub enemy_types: Vec<String>,
    /// Horizontal scatter radius so a wave does not stack on one point
    pub scatter: f32,
}

impl Spawner {
    /// Pick a random enemy type from this spawner's list.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.enemy_types.choose(rng).map(String::as_str)
    }

    /// Random horizontal offset inside the scatter radius.
    pub fn scatter_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        if self.scatter <= 0.0 {
            return Vec3::ZERO;
        }
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let radius = rng.gen_range(0.0..self.scatter);
        Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
    }
}

/// One wave to release: `count` enemies from `spawner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePlan {
    pub spawner: Entity,
    pub count: u32,
}

/// Wave budget shared by all wave spawners.
#[derive(Resource, Debug)]
pub struct WaveSpawner {
    pub max_in_scene: u32,
    pub available: u32,
    pub can_spawn: bool,
    pub spawners: Vec<Entity>,
    /// Delay between the budget filling up and the wave arriving
    pub delay: Duration,
    pub timer: Option<Timer>,
}

impl Default for WaveSpawner {
    fn default() -> Self {
        Self::new(4, Duration::from_secs(5))
    }
}

impl WaveSpawner {
    pub fn new(max_in_scene: u32, delay: Duration) -> Self {
        Self {
            max_in_scene,
            available: max_in_scene,
            can_spawn: false,
            spawners: Vec::new(),
            delay,
            timer: None,
        }
    }

    pub fn add_spawner(&mut self, spawner: Entity) {
        if !self.spawners.contains(&spawner) {
            self.spawners.push(spawner);
        }
    }

    /// Forget all spawners and refill the budget (new arena).
    pub fn reset(&mut self) {
        self.spawners.clear();
        self.available = self.max_in_scene;
        self.can_spawn = false;
        self.timer = None;
    }

    /// A wave enemy died; return its slot and maybe schedule the next wave.
    pub fn increment_available(&mut self) {
        if self.available < self.max_in_scene {
            self.available += 1;
        }

        self.check_can_spawn();
    }

    /// Give back slots of a planned wave that never spawned.
    pub fn refund(&mut self, slots: u32) {
        if slots == 0 {
            return;
        }

        self.available = (self.available + slots).min(self.max_in_scene);
        self.check_can_spawn();
    }

    /// Once every slot is free, allow a wave and start the delay timer.
    pub fn check_can_spawn(&mut self) {
        if self.available == self.max_in_scene {
            self.can_spawn = true;
            self.timer = Some(Timer::new(self.delay, TimerMode::Once));
        }
    }

    /// Advance the delay timer. Returns true on the frame it runs out.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };

        timer.tick(delta);
        if timer.finished() {
            self.timer = None;
            return true;
        }
        false
    }

    /// Decide the next wave, consuming budget.
    ///
    /// Shuffles the spawner list and releases 1..=max enemies from the
    /// first spawner. Returns None when there is nowhere to spawn or a
    /// wave is not allowed yet.
    pub fn plan_wave<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<WavePlan> {
        if self.spawners.is_empty() || !self.can_spawn {
            return None;
        }

        self.spawners.shuffle(rng);

        let count = rng.gen_range(1..=self.max_in_scene);
        self.available = self.available.saturating_sub(count);
        self.can_spawn = false;

        Some(WavePlan {
            spawner: self.spawners[0],
            count,
        })
    }
}
