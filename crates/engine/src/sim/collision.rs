use crate::level::{PlatformDesc, PlatformKind};

use super::config::PhysicsTuning;
use super::geometry::Rect;
use super::platforms::{PlatformIndex, PlatformStates};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Correction {
    LandOnTop,
    HeadBump,
    PushToLeftEdge,
    PushToRightEdge,
}

/// Picks the correction for an overlapping pair. Vertical wins when its penetration is
/// strictly smaller; ties go horizontal.
pub(crate) fn choose_correction(player: &Rect, platform: &Rect) -> Correction {
    let overlap_left = player.right() - platform.left();
    let overlap_right = platform.right() - player.left();
    let overlap_top = player.bottom() - platform.top();
    let overlap_bottom = platform.bottom() - player.top();

    if overlap_top.min(overlap_bottom) < overlap_left.min(overlap_right) {
        if overlap_top < overlap_bottom {
            Correction::LandOnTop
        } else {
            Correction::HeadBump
        }
    } else if overlap_left < overlap_right {
        Correction::PushToLeftEdge
    } else {
        Correction::PushToRightEdge
    }
}

/// Upper bound on ordered passes per tick. Corner pockets settle in two.
const MAX_RESOLVE_PASSES: usize = 4;

/// Resolves the player against every solid platform in level-list order. Each correction is
/// applied before the next platform is tested, so list order is the tie-break between
/// simultaneous contacts. The ordered pass repeats while it still corrects something, so a push
/// from a later platform cannot leave the body inside an earlier one.
pub(crate) fn resolve_player(
    player: &mut Player,
    defs: &[PlatformDesc],
    platforms: &mut PlatformStates,
    tuning: &PhysicsTuning,
) {
    player.grounded = false;

    for _ in 0..MAX_RESOLVE_PASSES {
        if !resolve_pass(player, defs, platforms, tuning) {
            break;
        }
    }
}

/// One ordered pass. Returns whether any platform needed a correction.
fn resolve_pass(
    player: &mut Player,
    defs: &[PlatformDesc],
    platforms: &mut PlatformStates,
    tuning: &PhysicsTuning,
) -> bool {
    let mut corrected = false;

    for (index, def) in defs.iter().enumerate() {
        let index = PlatformIndex(index);
        let Some(state) = platforms.get(index) else {
            continue;
        };
        if !state.is_solid() {
            continue;
        }
        let platform = state.current_rect(def);
        let body = player.rect();
        if !body.overlaps(&platform) {
            continue;
        }
        corrected = true;

        match choose_correction(&body, &platform) {
            Correction::LandOnTop => {
                player.position.y = platform.top() - player.size.y;
                player.velocity.y = 0.0;
                player.grounded = true;
                player.jump_elapsed = 0.0;

                match def.kind {
                    PlatformKind::Bounce { bounce_multiplier } => {
                        let multiplier =
                            bounce_multiplier.unwrap_or(tuning.default_bounce_multiplier);
                        player.velocity.y = tuning.jump_velocity * multiplier;
                        player.grounded = false;
                    }
                    PlatformKind::Crumbling { .. } => platforms.start_crumble(index),
                    PlatformKind::Normal | PlatformKind::Moving { .. } => {}
                }
            }
            Correction::HeadBump => {
                player.position.y = platform.bottom();
                player.velocity.y = 0.0;
            }
            Correction::PushToLeftEdge => {
                player.position.x = platform.left() - player.size.x;
                player.velocity.x = 0.0;
            }
            Correction::PushToRightEdge => {
                player.position.x = platform.right();
                player.velocity.x = 0.0;
            }
        }
    }

    corrected
}
