use tracing::debug;

use crate::level::{PlatformDesc, PlatformKind};

use super::config::PhysicsTuning;
use super::geometry::{Rect, Vec2};
use super::player::Player;

/// Stable handle into the level's platform list and the runtime side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformIndex(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingState {
    pub position: Vec2,
    /// Index of the waypoint the platform last reached.
    pub waypoint: usize,
    pub direction: PathDirection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrumbleState {
    Solid,
    Crumbling { elapsed_ms: f32 },
    Gone { elapsed_ms: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformState {
    Fixed,
    Moving(MovingState),
    Crumble(CrumbleState),
}

impl PlatformState {
    fn initial(def: &PlatformDesc) -> Self {
        match &def.kind {
            PlatformKind::Moving { path, .. } => match path.first() {
                Some(start) => PlatformState::Moving(MovingState {
                    position: *start,
                    waypoint: 0,
                    direction: PathDirection::Forward,
                }),
                None => PlatformState::Fixed,
            },
            PlatformKind::Crumbling { .. } => PlatformState::Crumble(CrumbleState::Solid),
            PlatformKind::Normal | PlatformKind::Bounce { .. } => PlatformState::Fixed,
        }
    }

    pub fn is_solid(&self) -> bool {
        !matches!(self, PlatformState::Crumble(CrumbleState::Gone { .. }))
    }

    pub fn current_rect(&self, def: &PlatformDesc) -> Rect {
        match self {
            PlatformState::Moving(moving) => def.rect.at(moving.position),
            PlatformState::Fixed | PlatformState::Crumble(_) => def.rect,
        }
    }
}

/// Runtime behaviour state for every platform, parallel to `LevelDesc::platforms`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformStates {
    states: Vec<PlatformState>,
}

impl PlatformStates {
    pub fn new(defs: &[PlatformDesc]) -> Self {
        Self {
            states: defs.iter().map(PlatformState::initial).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: PlatformIndex) -> Option<&PlatformState> {
        self.states.get(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlatformIndex, &PlatformState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(index, state)| (PlatformIndex(index), state))
    }

    /// Solid → Crumbling on landing. Any other state is left alone.
    pub(crate) fn start_crumble(&mut self, index: PlatformIndex) {
        let Some(state) = self.states.get_mut(index.0) else {
            return;
        };
        if matches!(state, PlatformState::Crumble(CrumbleState::Solid)) {
            *state = PlatformState::Crumble(CrumbleState::Crumbling { elapsed_ms: 0.0 });
            debug!(platform = index.0, "platform_crumble_started");
        }
    }

    /// Advances every platform by `dt`. `rider` is the live, grounded player, if any; it is
    /// carried by moving platforms it stands on.
    pub(crate) fn advance(
        &mut self,
        defs: &[PlatformDesc],
        tuning: &PhysicsTuning,
        dt: f32,
        mut rider: Option<&mut Player>,
    ) {
        for (index, (def, state)) in defs.iter().zip(self.states.iter_mut()).enumerate() {
            match (&def.kind, state) {
                (PlatformKind::Moving { path, speed }, PlatformState::Moving(moving)) => {
                    let speed = speed.unwrap_or(tuning.default_moving_speed);
                    let delta = advance_moving(moving, path, speed * dt);
                    if let Some(player) = rider.as_deref_mut() {
                        let rect = def.rect.at(moving.position);
                        if stands_on(player, &rect, tuning) {
                            player.position.x += delta.x;
                            player.position.y += delta.y;
                        }
                    }
                }
                (
                    PlatformKind::Crumbling {
                        crumble_delay_ms,
                        respawn_time_ms,
                    },
                    PlatformState::Crumble(crumble),
                ) => {
                    let delay_ms = crumble_delay_ms.unwrap_or(tuning.default_crumble_delay_ms);
                    let respawn_ms = respawn_time_ms.unwrap_or(0.0);
                    let before = *crumble;
                    *crumble = advance_crumble(before, delay_ms, respawn_ms, dt * 1000.0);
                    match (before, *crumble) {
                        (CrumbleState::Crumbling { .. }, CrumbleState::Gone { .. }) => {
                            debug!(platform = index, id = %def.id, "platform_crumbled");
                        }
                        (CrumbleState::Gone { .. }, CrumbleState::Solid) => {
                            debug!(platform = index, id = %def.id, "platform_restored");
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }
}

/// Ping-pong traversal. Returns the displacement applied this step.
fn advance_moving(moving: &mut MovingState, path: &[Vec2], step: f32) -> Vec2 {
    if path.len() < 2 {
        return Vec2::ZERO;
    }
    let target_index = match moving.direction {
        PathDirection::Forward => moving.waypoint + 1,
        PathDirection::Backward => match moving.waypoint.checked_sub(1) {
            Some(index) => index,
            None => return Vec2::ZERO,
        },
    };
    let Some(target) = path.get(target_index).copied() else {
        return Vec2::ZERO;
    };

    let previous = moving.position;
    let to_target = Vec2::new(target.x - previous.x, target.y - previous.y);
    let distance = to_target.length();

    if distance <= step {
        moving.position = target;
        moving.waypoint = target_index;
        if target_index >= path.len() - 1 {
            moving.direction = PathDirection::Backward;
        } else if target_index == 0 {
            moving.direction = PathDirection::Forward;
        }
    } else {
        moving.position.x += to_target.x / distance * step;
        moving.position.y += to_target.y / distance * step;
    }

    Vec2::new(
        moving.position.x - previous.x,
        moving.position.y - previous.y,
    )
}

fn advance_crumble(
    state: CrumbleState,
    delay_ms: f32,
    respawn_ms: f32,
    step_ms: f32,
) -> CrumbleState {
    match state {
        CrumbleState::Solid => CrumbleState::Solid,
        CrumbleState::Crumbling { elapsed_ms } => {
            let elapsed_ms = elapsed_ms + step_ms;
            if elapsed_ms >= delay_ms {
                CrumbleState::Gone { elapsed_ms: 0.0 }
            } else {
                CrumbleState::Crumbling { elapsed_ms }
            }
        }
        CrumbleState::Gone { elapsed_ms } => {
            // A zero respawn time means the platform stays gone.
            if respawn_ms <= 0.0 {
                return state;
            }
            let elapsed_ms = elapsed_ms + step_ms;
            if elapsed_ms >= respawn_ms {
                CrumbleState::Solid
            } else {
                CrumbleState::Gone { elapsed_ms }
            }
        }
    }
}

fn stands_on(player: &Player, platform: &Rect, tuning: &PhysicsTuning) -> bool {
    let feet = player.rect();
    let bottom = feet.bottom();
    bottom >= platform.top() - tuning.carry_tolerance_above
        && bottom <= platform.top() + tuning.carry_tolerance_below
        && feet.overlaps_horizontally(platform)
}
