//! Deterministic fixed-timestep simulation: platform behaviours, player integration, collision
//! resolution, detection, death/respawn and the follow camera. Nothing in here can fail; level
//! data is trusted once it reaches [`Engine::new`].

mod camera;
mod collision;
mod config;
mod detector;
mod engine;
mod events;
mod geometry;
mod input;
mod platforms;
mod player;

pub use camera::Camera;
pub use config::{CameraConfig, EngineConfig, PhysicsTuning};
pub use detector::{CollectibleIndex, CollectibleState};
pub use engine::{CollectibleView, Engine, PlatformView};
pub use events::{EventSink, GameEvent, Stats};
pub use geometry::{Rect, Vec2};
pub use input::{InputAction, InputIntent};
pub use platforms::{
    CrumbleState, MovingState, PathDirection, PlatformIndex, PlatformState, PlatformStates,
};
pub use player::{Facing, LifeState, Player};

#[cfg(test)]
mod tests;
