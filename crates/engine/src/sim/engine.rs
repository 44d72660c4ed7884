use tracing::{debug, trace};

use crate::level::{CollectibleDesc, HazardKind, LevelDesc, PlatformDesc};

use super::camera::Camera;
use super::collision::resolve_player;
use super::config::EngineConfig;
use super::detector::{
    collect_pickups, fell_out_of_world, first_hazard_hit, touches_goal, CollectibleIndex,
    CollectibleState,
};
use super::events::{EventSink, GameEvent, Stats};
use super::geometry::Rect;
use super::input::InputIntent;
use super::platforms::{PlatformIndex, PlatformState, PlatformStates};
use super::player::Player;

/// Read-only view of one platform for renderers and debugging.
#[derive(Debug, Clone, Copy)]
pub struct PlatformView<'a> {
    pub index: PlatformIndex,
    pub def: &'a PlatformDesc,
    pub state: &'a PlatformState,
    pub rect: Rect,
    pub solid: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CollectibleView<'a> {
    pub index: CollectibleIndex,
    pub def: &'a CollectibleDesc,
    pub state: CollectibleState,
}

/// Fixed-timestep platformer simulation for one level.
///
/// The engine owns the level, the runtime side tables, the player, the camera and the
/// accumulated stats. [`Engine::tick`] is the only mutating entrypoint; everything else is a
/// read-only view meant to be consumed between ticks.
#[derive(Debug)]
pub struct Engine<S> {
    level: LevelDesc,
    config: EngineConfig,
    platforms: PlatformStates,
    collectibles: Vec<CollectibleState>,
    player: Player,
    camera: Camera,
    stats: Stats,
    ticks: u64,
    sink: S,
}

impl<S: EventSink> Engine<S> {
    pub fn new(level: LevelDesc, sink: S) -> Self {
        Self::with_config(level, EngineConfig::default(), sink)
    }

    pub fn with_config(level: LevelDesc, config: EngineConfig, sink: S) -> Self {
        let platforms = PlatformStates::new(&level.platforms);
        let collectibles = vec![CollectibleState::Available; level.collectibles.len()];
        let player = Player::spawn_at(level.spawn, &config.physics);
        let camera = Camera::centered_on(player.center(), level.world_size(), &config.camera);
        debug!(
            level_number = level.level_number,
            theme = %level.theme,
            platforms = level.platforms.len(),
            hazards = level.hazards.len(),
            collectibles = level.collectibles.len(),
            "engine_created"
        );
        Self {
            level,
            config,
            platforms,
            collectibles,
            player,
            camera,
            stats: Stats::default(),
            ticks: 0,
            sink,
        }
    }

    /// Advances the simulation by exactly one step of `dt` seconds. `dt` is not validated.
    pub fn tick(&mut self, dt: f32, input: InputIntent) {
        self.ticks = self.ticks.saturating_add(1);

        let rider = (self.player.is_alive() && self.player.grounded).then_some(&mut self.player);
        self.platforms
            .advance(&self.level.platforms, &self.config.physics, dt, rider);

        if self.player.is_alive() {
            self.step_alive(dt, input);
        } else if self.player.count_down(dt) {
            self.respawn();
        }
    }

    fn step_alive(&mut self, dt: f32, input: InputIntent) {
        let physics = &self.config.physics;
        self.stats.time_elapsed += dt;

        self.player
            .integrate(input, self.level.world.gravity, physics, dt);
        resolve_player(
            &mut self.player,
            &self.level.platforms,
            &mut self.platforms,
            physics,
        );
        trace!(
            tick = self.ticks,
            x = self.player.position.x,
            y = self.player.position.y,
            vx = self.player.velocity.x,
            vy = self.player.velocity.y,
            grounded = self.player.grounded,
            "player_resolved"
        );

        self.run_detector();

        self.camera.update(
            self.player.center(),
            self.level.world_size(),
            &self.config.camera,
            dt,
        );

        if fell_out_of_world(
            &self.player.rect(),
            self.level.world.height,
            self.config.physics.out_of_world_margin,
        ) {
            self.kill_player("fell_out_of_world");
        }
    }

    fn run_detector(&mut self) {
        let pickups = collect_pickups(
            self.player.center(),
            self.config.physics.pickup_radius,
            &self.level.collectibles,
            &mut self.collectibles,
        );
        for pickup in pickups {
            self.stats.coins = self.stats.coins.saturating_add(1);
            self.stats.score = self.stats.score.saturating_add(u64::from(pickup.value));
            debug!(
                collectible = pickup.index.0,
                value = pickup.value,
                score = self.stats.score,
                "collectible_picked_up"
            );
            self.sink.emit(GameEvent::Coin {
                value: pickup.value,
            });
        }

        let body = self.player.rect();
        if let Some(hazard) = first_hazard_hit(&body, &self.level.hazards) {
            let cause = match hazard.kind {
                HazardKind::Spikes => "spikes",
                HazardKind::Lava => "lava",
            };
            self.kill_player(cause);
        }

        if touches_goal(&body, &self.level.goal) {
            self.sink.emit(GameEvent::GoalReached);
        }
    }

    fn kill_player(&mut self, cause: &'static str) {
        if self
            .player
            .kill(self.config.physics.death_delay_seconds)
        {
            debug!(
                cause,
                x = self.player.position.x,
                y = self.player.position.y,
                "player_died"
            );
            self.sink.emit(GameEvent::PlayerDied);
        }
    }

    fn respawn(&mut self) {
        self.player = Player::spawn_at(self.level.spawn, &self.config.physics);
        self.stats.deaths = self.stats.deaths.saturating_add(1);
        self.camera.snap_to(
            self.player.center(),
            self.level.world_size(),
            &self.config.camera,
        );
        debug!(deaths = self.stats.deaths, "player_respawned");
    }

    pub fn level(&self) -> &LevelDesc {
        &self.level
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn platform_states(&self) -> &PlatformStates {
        &self.platforms
    }

    pub fn platforms(&self) -> impl Iterator<Item = PlatformView<'_>> {
        self.level
            .platforms
            .iter()
            .zip(self.platforms.iter())
            .map(|(def, (index, state))| PlatformView {
                index,
                def,
                state,
                rect: state.current_rect(def),
                solid: state.is_solid(),
            })
    }

    pub fn collectibles(&self) -> impl Iterator<Item = CollectibleView<'_>> {
        self.level
            .collectibles
            .iter()
            .zip(self.collectibles.iter())
            .enumerate()
            .map(|(index, (def, state))| CollectibleView {
                index: CollectibleIndex(index),
                def,
                state: *state,
            })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
