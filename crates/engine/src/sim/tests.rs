use super::*;
use crate::level::{
    fallback_level, CollectibleDesc, CollectibleKind, HazardDesc, HazardKind, LevelDesc,
    PlatformDesc, PlatformKind, WorldDesc,
};

const DT: f32 = 1.0 / 60.0;

fn right() -> InputIntent {
    InputIntent::none().with_action_down(InputAction::MoveRight, true)
}

fn left() -> InputIntent {
    InputIntent::none().with_action_down(InputAction::MoveLeft, true)
}

fn ground() -> PlatformDesc {
    PlatformDesc {
        id: "ground".to_string(),
        rect: Rect::new(0.0, 760.0, 3000.0, 40.0),
        kind: PlatformKind::Normal,
    }
}

fn level_with(spawn: Vec2, platforms: Vec<PlatformDesc>) -> LevelDesc {
    LevelDesc {
        level_number: 1,
        theme: "test".to_string(),
        world: WorldDesc {
            width: 3000.0,
            height: 800.0,
            gravity: 2200.0,
        },
        spawn,
        goal: Rect::new(2800.0, 620.0, 40.0, 60.0),
        platforms,
        hazards: Vec::new(),
        collectibles: Vec::new(),
        decor: Vec::new(),
    }
}

fn engine_for(level: LevelDesc) -> Engine<Vec<GameEvent>> {
    Engine::new(level, Vec::new())
}

fn count_events(engine: &Engine<Vec<GameEvent>>, wanted: GameEvent) -> usize {
    engine
        .sink()
        .iter()
        .filter(|event| **event == wanted)
        .count()
}

fn assert_no_solid_overlap(engine: &Engine<Vec<GameEvent>>, tick: usize) {
    let body = engine.player().rect();
    for view in engine.platforms().filter(|view| view.solid) {
        assert!(
            !body.overlaps(&view.rect),
            "tick {tick}: player {body:?} overlaps platform {} at {:?}",
            view.def.id,
            view.rect
        );
    }
}

#[test]
fn holding_right_on_flat_ground_runs_at_full_speed() {
    let mut engine = engine_for(level_with(Vec2::new(80.0, 650.0), vec![ground()]));

    for _ in 0..60 {
        engine.tick(DT, right());
    }

    let player = engine.player();
    assert!((player.position.x - 300.0).abs() < 0.5, "x = {}", player.position.x);
    assert!(player.grounded);
    assert_eq!(player.position.y, 736.0);
    assert_eq!(player.facing, Facing::Right);
}

#[test]
fn landing_on_bounce_platform_launches_in_the_same_tick() {
    let spring = PlatformDesc {
        id: "spring".to_string(),
        rect: Rect::new(800.0, 640.0, 120.0, 20.0),
        kind: PlatformKind::Bounce {
            bounce_multiplier: Some(1.8),
        },
    };
    let mut engine = engine_for(level_with(Vec2::new(810.0, 600.0), vec![spring]));

    let mut launched = false;
    for _ in 0..60 {
        engine.tick(DT, InputIntent::none());
        if engine.player().velocity.y < 0.0 {
            launched = true;
            break;
        }
    }

    assert!(launched, "player never touched the spring");
    let player = engine.player();
    assert!((player.velocity.y - -864.0).abs() < 1e-3);
    assert!(!player.grounded);
    assert_eq!(player.position.y, 616.0);
}

#[test]
fn moving_platform_reaches_far_waypoint_after_two_seconds() {
    let lift = PlatformDesc {
        id: "lift".to_string(),
        rect: Rect::new(1350.0, 500.0, 120.0, 20.0),
        kind: PlatformKind::Moving {
            path: vec![Vec2::new(1350.0, 500.0), Vec2::new(1350.0, 620.0)],
            speed: Some(60.0),
        },
    };
    let mut engine = engine_for(level_with(Vec2::new(80.0, 736.0), vec![ground(), lift]));

    for _ in 0..120 {
        engine.tick(DT, InputIntent::none());
    }

    let view = engine
        .platforms()
        .find(|view| view.def.id == "lift")
        .expect("lift view");
    assert_eq!(view.rect.y, 620.0);
    match view.state {
        PlatformState::Moving(moving) => {
            assert_eq!(moving.direction, PathDirection::Backward);
            assert_eq!(moving.waypoint, 1);
        }
        other => panic!("expected moving state, got {other:?}"),
    }

    engine.tick(DT, InputIntent::none());
    let view = engine.platforms().nth(1).expect("lift view");
    assert!(view.rect.y < 620.0 && view.rect.y > 618.5);
}

#[test]
fn grounded_player_rides_horizontal_platform() {
    let carrier = PlatformDesc {
        id: "carrier".to_string(),
        rect: Rect::new(200.0, 600.0, 120.0, 20.0),
        kind: PlatformKind::Moving {
            path: vec![Vec2::new(200.0, 600.0), Vec2::new(400.0, 600.0)],
            speed: Some(60.0),
        },
    };
    let mut engine = engine_for(level_with(Vec2::new(220.0, 576.0), vec![carrier]));

    // The first tick lands the player; every later tick carries it.
    for _ in 0..61 {
        engine.tick(DT, InputIntent::none());
    }

    let player = engine.player();
    assert!(player.grounded);
    assert!((player.position.x - 280.0).abs() < 1e-2, "x = {}", player.position.x);
    assert_eq!(player.position.y, 576.0);
}

#[test]
fn standing_on_crumbling_platform_drops_player_after_delay() {
    let brittle = PlatformDesc {
        id: "brittle".to_string(),
        rect: Rect::new(0.0, 600.0, 200.0, 20.0),
        kind: PlatformKind::Crumbling {
            crumble_delay_ms: Some(500.0),
            respawn_time_ms: Some(3000.0),
        },
    };
    let mut engine = engine_for(level_with(Vec2::new(50.0, 576.0), vec![brittle, ground()]));

    engine.tick(DT, InputIntent::none());
    assert!(engine.player().grounded);
    assert!(matches!(
        engine.platform_states().get(PlatformIndex(0)),
        Some(PlatformState::Crumble(CrumbleState::Crumbling { .. }))
    ));

    for _ in 0..35 {
        engine.tick(DT, InputIntent::none());
    }
    let view = engine.platforms().next().expect("brittle view");
    assert!(!view.solid);

    for _ in 0..60 {
        engine.tick(DT, InputIntent::none());
    }
    assert_eq!(engine.player().position.y, 736.0);
    assert!(engine.player().grounded);
}

#[test]
fn dead_player_is_frozen_until_respawn() {
    let lift = PlatformDesc {
        id: "lift".to_string(),
        rect: Rect::new(1000.0, 500.0, 120.0, 20.0),
        kind: PlatformKind::Moving {
            path: vec![Vec2::new(1000.0, 500.0), Vec2::new(1300.0, 500.0)],
            speed: Some(60.0),
        },
    };
    let mut level = level_with(Vec2::new(100.0, 700.0), vec![ground(), lift]);
    level.hazards.push(HazardDesc {
        id: "spikes".to_string(),
        kind: HazardKind::Spikes,
        rect: Rect::new(80.0, 740.0, 80.0, 20.0),
    });
    let mut engine = engine_for(level);

    for _ in 0..60 {
        engine.tick(DT, right());
        if !engine.player().is_alive() {
            break;
        }
    }
    assert!(!engine.player().is_alive());
    assert_eq!(count_events(&engine, GameEvent::PlayerDied), 1);
    assert_eq!(engine.player().velocity, Vec2::ZERO);

    let frozen_position = engine.player().position;
    let frozen_camera = *engine.camera();
    let frozen_time = engine.stats().time_elapsed;
    let lift_before = engine.platforms().nth(1).expect("lift").rect;

    let mut dead_ticks = 0;
    while !engine.player().is_alive() {
        assert!(dead_ticks < 70, "respawn never happened");
        assert_eq!(engine.player().position, frozen_position);
        assert_eq!(engine.player().velocity, Vec2::ZERO);
        assert_eq!(*engine.camera(), frozen_camera);
        assert_eq!(engine.stats().deaths, 0);
        engine.tick(DT, right());
        dead_ticks += 1;
    }
    assert!((59..=61).contains(&dead_ticks), "dead for {dead_ticks} ticks");

    let lift_after = engine.platforms().nth(1).expect("lift").rect;
    assert!(lift_after.x > lift_before.x);

    let player = engine.player();
    assert_eq!(player.position, Vec2::new(100.0, 700.0));
    assert_eq!(player.velocity, Vec2::ZERO);
    assert_eq!(engine.stats().deaths, 1);
    assert_eq!(engine.stats().time_elapsed, frozen_time);
    assert_eq!(count_events(&engine, GameEvent::PlayerDied), 1);

    let camera = engine.camera();
    assert_eq!(camera.position, camera.target);
    assert_eq!(camera.position, Vec2::new(0.0, 530.0));
}

#[test]
fn falling_out_of_the_world_kills_once() {
    let far_ledge = PlatformDesc {
        id: "ledge".to_string(),
        rect: Rect::new(2000.0, 700.0, 100.0, 20.0),
        kind: PlatformKind::Normal,
    };
    let mut engine = engine_for(level_with(Vec2::new(80.0, 650.0), vec![far_ledge]));

    for _ in 0..120 {
        engine.tick(DT, InputIntent::none());
        if !engine.player().is_alive() {
            break;
        }
    }

    assert!(!engine.player().is_alive());
    assert!(engine.player().position.y > 850.0);
    assert_eq!(engine.sink().as_slice(), &[GameEvent::PlayerDied]);
}

#[test]
fn collectible_pays_out_once() {
    let mut level = level_with(Vec2::new(80.0, 736.0), vec![ground()]);
    level.collectibles.push(CollectibleDesc {
        id: "gem".to_string(),
        kind: CollectibleKind::Gem,
        pos: Vec2::new(150.0, 748.0),
        value: 50,
    });
    let mut engine = engine_for(level);

    for pass in 0..3 {
        let input = if pass % 2 == 0 { right() } else { left() };
        for _ in 0..30 {
            engine.tick(DT, input);
        }
    }

    assert_eq!(engine.stats().coins, 1);
    assert_eq!(engine.stats().score, 50);
    assert_eq!(count_events(&engine, GameEvent::Coin { value: 50 }), 1);
    let view = engine.collectibles().next().expect("gem view");
    assert_eq!(view.state, CollectibleState::Collected);
}

#[test]
fn goal_overlap_is_reported_every_tick() {
    let mut level = level_with(Vec2::new(80.0, 736.0), vec![ground()]);
    level.goal = Rect::new(70.0, 700.0, 40.0, 60.0);
    let mut engine = engine_for(level);

    for _ in 0..10 {
        engine.tick(DT, InputIntent::none());
    }

    assert_eq!(count_events(&engine, GameEvent::GoalReached), 10);
    assert!(engine.player().is_alive());
}

#[test]
fn goal_is_still_reported_on_the_tick_a_hazard_kills() {
    let mut level = level_with(Vec2::new(80.0, 736.0), vec![ground()]);
    level.goal = Rect::new(70.0, 700.0, 40.0, 60.0);
    level.hazards.push(HazardDesc {
        id: "spikes".to_string(),
        kind: HazardKind::Spikes,
        rect: Rect::new(70.0, 740.0, 40.0, 20.0),
    });
    let mut engine = engine_for(level);

    engine.tick(DT, InputIntent::none());

    assert_eq!(
        engine.sink().as_slice(),
        &[GameEvent::PlayerDied, GameEvent::GoalReached]
    );
    assert!(!engine.player().is_alive());

    engine.tick(DT, InputIntent::none());
    assert_eq!(engine.sink().len(), 2);
}

#[test]
fn wall_and_step_corner_never_leaves_player_inside_the_step() {
    let step = PlatformDesc {
        id: "step".to_string(),
        rect: Rect::new(125.0, 150.0, 200.0, 50.0),
        kind: PlatformKind::Normal,
    };
    let wall = PlatformDesc {
        id: "wall".to_string(),
        rect: Rect::new(100.0, 0.0, 20.0, 200.0),
        kind: PlatformKind::Normal,
    };
    let mut engine = engine_for(level_with(Vec2::new(130.0, 0.3), vec![step, wall, ground()]));

    for tick in 0..120usize {
        engine.tick(DT, left());
        assert_no_solid_overlap(&engine, tick);
    }

    let player = engine.player();
    assert!(player.grounded);
    assert_eq!(player.position, Vec2::new(120.0, 126.0));
}

#[test]
fn closure_sink_sees_events_during_tick() {
    let mut level = level_with(Vec2::new(80.0, 736.0), vec![ground()]);
    level.collectibles.push(CollectibleDesc {
        id: "coin".to_string(),
        kind: CollectibleKind::Coin,
        pos: Vec2::new(88.0, 748.0),
        value: 10,
    });

    let mut total = 0u32;
    {
        let mut engine = Engine::new(level, |event: GameEvent| {
            if let GameEvent::Coin { value } = event {
                total += value;
            }
        });
        engine.tick(DT, InputIntent::none());
        assert_eq!(engine.stats().coins, 1);
    }
    assert_eq!(total, 10);
}

#[test]
fn fallback_run_keeps_invariants() {
    let level = fallback_level();
    let world_max = Vec2::new(
        level.world.width - CameraConfig::default().view_width,
        level.world.height - CameraConfig::default().view_height,
    );
    let mut engine = engine_for(level);
    let mut previous_deaths = 0;
    let mut previous_coins = 0;

    for tick in 0..3000usize {
        let phase = tick % 90;
        let input = InputIntent {
            left: (60..70).contains(&phase),
            right: phase < 60,
            jump: (phase % 45) < 12,
        };
        engine.tick(DT, input);

        let camera = engine.camera();
        assert!(camera.target.x >= 0.0 && camera.target.x <= world_max.x);
        assert!(camera.target.y >= 0.0 && camera.target.y <= world_max.y);
        assert!(camera.position.x >= 0.0 && camera.position.x <= world_max.x);
        assert!(camera.position.y >= 0.0 && camera.position.y <= world_max.y);

        if engine.player().is_alive() {
            assert_no_solid_overlap(&engine, tick);
        }

        let stats = engine.stats();
        assert!(stats.deaths >= previous_deaths && stats.deaths <= previous_deaths + 1);
        assert!(stats.coins >= previous_coins);
        previous_deaths = stats.deaths;
        previous_coins = stats.coins;
    }

    let coin_events = engine
        .sink()
        .iter()
        .filter(|event| matches!(event, GameEvent::Coin { .. }))
        .count();
    assert_eq!(coin_events, engine.stats().coins as usize);
    assert!(engine.stats().coins as usize <= engine.level().collectibles.len());
}
