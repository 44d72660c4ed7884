use crate::level::{CollectibleDesc, HazardDesc};

use super::geometry::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectibleIndex(pub usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollectibleState {
    #[default]
    Available,
    Collected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pickup {
    pub index: CollectibleIndex,
    pub value: u32,
}

/// Marks every available collectible within `radius` of `center` as collected and reports it.
/// Already collected entries are never reported again.
pub(crate) fn collect_pickups(
    center: Vec2,
    radius: f32,
    defs: &[CollectibleDesc],
    states: &mut [CollectibleState],
) -> Vec<Pickup> {
    let radius_sq = radius * radius;
    let mut pickups = Vec::new();
    for (index, (def, state)) in defs.iter().zip(states.iter_mut()).enumerate() {
        if *state == CollectibleState::Collected {
            continue;
        }
        if center.distance_squared(def.pos) < radius_sq {
            *state = CollectibleState::Collected;
            pickups.push(Pickup {
                index: CollectibleIndex(index),
                value: def.value,
            });
        }
    }
    pickups
}

pub(crate) fn first_hazard_hit<'a>(body: &Rect, hazards: &'a [HazardDesc]) -> Option<&'a HazardDesc> {
    hazards.iter().find(|hazard| body.overlaps(&hazard.rect))
}

pub(crate) fn touches_goal(body: &Rect, goal: &Rect) -> bool {
    body.overlaps(goal)
}

/// True once the body has fallen past the bottom of the world by more than `margin`.
pub(crate) fn fell_out_of_world(body: &Rect, world_height: f32, margin: f32) -> bool {
    body.y > world_height + margin
}
