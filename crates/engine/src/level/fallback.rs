use crate::sim::{Rect, Vec2};

use super::types::{
    CollectibleDesc, CollectibleKind, DecorDesc, DecorLayer, DecorSize, HazardDesc, HazardKind,
    LevelDesc, PlatformDesc, PlatformKind, WorldDesc, DEFAULT_THEME,
};

pub fn fallback_level() -> LevelDesc {
    LevelDesc {
        level_number: 1,
        theme: DEFAULT_THEME.to_string(),
        world: WorldDesc {
            width: 3000.0,
            height: 800.0,
            gravity: 2200.0,
        },
        spawn: Vec2::new(80.0, 650.0),
        goal: Rect::new(2800.0, 620.0, 40.0, 60.0),
        platforms: vec![
            platform("ground", (0.0, 760.0, 3000.0, 40.0), PlatformKind::Normal),
            platform("p1", (300.0, 660.0, 160.0, 20.0), PlatformKind::Normal),
            platform("p2", (550.0, 580.0, 140.0, 20.0), PlatformKind::Normal),
            platform(
                "p3",
                (800.0, 640.0, 120.0, 20.0),
                PlatformKind::Bounce {
                    bounce_multiplier: Some(1.8),
                },
            ),
            platform("p4", (1050.0, 560.0, 180.0, 20.0), PlatformKind::Normal),
            platform(
                "p5",
                (1350.0, 500.0, 120.0, 20.0),
                PlatformKind::Moving {
                    path: vec![Vec2::new(1350.0, 500.0), Vec2::new(1350.0, 620.0)],
                    speed: Some(60.0),
                },
            ),
            platform("p6", (1600.0, 620.0, 200.0, 20.0), PlatformKind::Normal),
            platform(
                "p7",
                (1900.0, 580.0, 140.0, 20.0),
                PlatformKind::Crumbling {
                    crumble_delay_ms: Some(500.0),
                    respawn_time_ms: Some(3000.0),
                },
            ),
            platform("p8", (2150.0, 640.0, 160.0, 20.0), PlatformKind::Normal),
            platform("p9", (2450.0, 600.0, 200.0, 20.0), PlatformKind::Normal),
        ],
        hazards: vec![
            HazardDesc {
                id: "h1".to_string(),
                kind: HazardKind::Spikes,
                rect: Rect::new(700.0, 740.0, 80.0, 20.0),
            },
            HazardDesc {
                id: "h2".to_string(),
                kind: HazardKind::Lava,
                rect: Rect::new(1800.0, 740.0, 100.0, 20.0),
            },
        ],
        collectibles: vec![
            collectible("c1", CollectibleKind::Coin, (400.0, 630.0), 10),
            collectible("c2", CollectibleKind::Coin, (600.0, 550.0), 10),
            collectible("c3", CollectibleKind::Coin, (1100.0, 530.0), 10),
            collectible("c4", CollectibleKind::Gem, (1650.0, 580.0), 50),
            collectible("c5", CollectibleKind::Coin, (2200.0, 610.0), 10),
        ],
        decor: vec![
            decor("d1", DecorLayer::Far, "cloud", (200.0, 100.0), (120.0, 60.0), 0.2, 0.5),
            decor("d2", DecorLayer::Far, "cloud", (900.0, 150.0), (100.0, 50.0), 0.2, 0.4),
            decor("d3", DecorLayer::Mid, "bush", (500.0, 730.0), (60.0, 30.0), 0.6, 0.8),
            decor("d4", DecorLayer::Near, "rock", (1500.0, 735.0), (40.0, 25.0), 0.9, 1.0),
        ],
    }
}

fn platform(id: &str, (x, y, w, h): (f32, f32, f32, f32), kind: PlatformKind) -> PlatformDesc {
    PlatformDesc {
        id: id.to_string(),
        rect: Rect::new(x, y, w, h),
        kind,
    }
}

fn collectible(id: &str, kind: CollectibleKind, (x, y): (f32, f32), value: u32) -> CollectibleDesc {
    CollectibleDesc {
        id: id.to_string(),
        kind,
        pos: Vec2::new(x, y),
        value,
    }
}

fn decor(
    id: &str,
    layer: DecorLayer,
    kind: &str,
    (x, y): (f32, f32),
    (w, h): (f32, f32),
    parallax: f32,
    opacity: f32,
) -> DecorDesc {
    DecorDesc {
        id: id.to_string(),
        layer,
        kind: kind.to_string(),
        pos: Vec2::new(x, y),
        size: DecorSize { w, h },
        parallax,
        opacity,
    }
}
