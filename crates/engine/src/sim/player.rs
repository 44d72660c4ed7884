use super::config::PhysicsTuning;
use super::geometry::{Rect, Vec2};
use super::input::InputIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeState {
    Alive,
    Dead { respawn_in_seconds: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub facing: Facing,
    pub jump_held: bool,
    pub jump_elapsed: f32,
    pub life: LifeState,
}

impl Player {
    pub fn spawn_at(position: Vec2, tuning: &PhysicsTuning) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            grounded: false,
            facing: Facing::Right,
            jump_held: false,
            jump_elapsed: 0.0,
            life: LifeState::Alive,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.life, LifeState::Alive)
    }

    /// One explicit-Euler step: input, jump, gravity, then position. No sub-stepping.
    pub(crate) fn integrate(
        &mut self,
        input: InputIntent,
        gravity: f32,
        tuning: &PhysicsTuning,
        dt: f32,
    ) {
        if input.left {
            self.velocity.x = -tuning.run_speed;
            self.facing = Facing::Left;
        } else if input.right {
            self.velocity.x = tuning.run_speed;
            self.facing = Facing::Right;
        } else {
            self.velocity.x *= tuning.friction_factor;
        }

        if input.jump && self.grounded {
            self.velocity.y = tuning.jump_velocity;
            self.grounded = false;
            self.jump_held = true;
            self.jump_elapsed = 0.0;
        }

        if input.jump && self.jump_held && self.jump_elapsed < tuning.jump_hold_seconds {
            self.velocity.y += tuning.jump_hold_boost * dt;
            self.jump_elapsed += dt;
        }

        if !input.jump {
            self.jump_held = false;
        }

        self.velocity.y = (self.velocity.y + gravity * dt).min(tuning.terminal_fall_speed);

        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
    }

    /// Returns false when the player was already dead.
    pub(crate) fn kill(&mut self, delay_seconds: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.life = LifeState::Dead {
            respawn_in_seconds: delay_seconds,
        };
        self.velocity = Vec2::ZERO;
        true
    }

    /// Returns true once the death timer has run out.
    pub(crate) fn count_down(&mut self, dt: f32) -> bool {
        match &mut self.life {
            LifeState::Alive => false,
            LifeState::Dead { respawn_in_seconds } => {
                *respawn_in_seconds -= dt;
                *respawn_in_seconds <= 0.0
            }
        }
    }
}
