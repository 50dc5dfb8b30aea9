//! Player state owned by the world.

use std::time::Duration;

use glam::IVec2;
use maze_chase_core::PowerState;

use crate::mover::Mover;

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) mover: Mover,
    pub(crate) points: u32,
    pub(crate) lives: u32,
    pub(crate) alive: bool,
    pub(crate) power: PowerState,
    power_elapsed: Duration,
    spawn: IVec2,
}

impl Player {
    pub(crate) fn new(spawn: IVec2, speed: i32, lives: u32) -> Self {
        Self {
            mover: Mover::new(spawn, speed),
            points: 0,
            lives,
            alive: true,
            power: PowerState::Normal,
            power_elapsed: Duration::ZERO,
            spawn,
        }
    }

    pub(crate) fn add_points(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    pub(crate) fn power_up(&mut self) {
        self.power = PowerState::PoweredUp;
        self.power_elapsed = Duration::ZERO;
    }

    /// Accumulates power-up time. Returns `true` on the tick the power runs out.
    pub(crate) fn tick_power(&mut self, dt: Duration, limit: Duration) -> bool {
        if self.power != PowerState::PoweredUp {
            return false;
        }
        self.power_elapsed = self.power_elapsed.saturating_add(dt);
        if self.power_elapsed >= limit {
            self.power = PowerState::Normal;
            self.power_elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    /// Marks the player dead, costing one life and `penalty` points.
    pub(crate) fn kill(&mut self, penalty: u32) {
        self.lives = self.lives.saturating_sub(1);
        self.points = self.points.saturating_sub(penalty);
        self.alive = false;
    }

    pub(crate) fn respawn(&mut self) {
        self.mover.place(self.spawn);
        self.alive = true;
    }
}
