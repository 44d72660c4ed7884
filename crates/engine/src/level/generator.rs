use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::sim::{Rect, Vec2};

use super::fallback::fallback_level;
use super::loader::{parse_json_at_path, LevelLoadError};
use super::types::{
    points_from_number, CollectibleDesc, CollectibleKind, DecorDesc, DecorLayer, DecorSize,
    HazardDesc, HazardKind, LevelDesc, PlatformDesc, PlatformKind, WorldDesc, DEFAULT_THEME,
};

pub const MIN_PLATFORM_COUNT: usize = 5;
pub const MIN_WORLD_WIDTH: f32 = 1000.0;

const DEFAULT_WORLD_WIDTH: f32 = 3000.0;
const DEFAULT_WORLD_HEIGHT: f32 = 800.0;
const DEFAULT_GRAVITY: f32 = 2200.0;
const DEFAULT_SPAWN: Vec2 = Vec2::new(80.0, 650.0);
const GOAL_INSET_FROM_RIGHT: f32 = 200.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedLevel {
    pub theme: Option<String>,
    pub level_number: Option<u32>,
    pub world: Option<GeneratedWorld>,
    pub spawn: Option<GeneratedPoint>,
    pub goal: Option<GeneratedRect>,
    pub platforms: Vec<GeneratedPlatform>,
    pub hazards: Vec<GeneratedHazard>,
    pub collectibles: Vec<GeneratedCollectible>,
    pub decor: Vec<GeneratedDecor>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedWorld {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub gravity: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedPoint {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedRect {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedPlatform {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
    pub path_points: Option<Vec<Vec2>>,
    pub speed: Option<f32>,
    pub crumble_delay: Option<f32>,
    pub respawn_time: Option<f32>,
    pub bounce_multiplier: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedHazard {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedCollectible {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedDecor {
    pub id: Option<String>,
    pub layer: Option<String>,
    pub kind: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
    pub parallax: Option<f32>,
    pub opacity: Option<f32>,
}

impl GeneratedLevel {
    pub fn from_json(raw: &str) -> Result<Self, LevelLoadError> {
        parse_json_at_path(raw)
            .map_err(|(json_path, source)| LevelLoadError::Parse { json_path, source })
    }

    pub fn normalize(self) -> LevelDesc {
        let world_in = self.world.unwrap_or_default();
        let world = WorldDesc {
            width: world_in.width.unwrap_or(DEFAULT_WORLD_WIDTH),
            height: world_in.height.unwrap_or(DEFAULT_WORLD_HEIGHT),
            gravity: world_in.gravity.unwrap_or(DEFAULT_GRAVITY),
        };

        let spawn_in = self.spawn.unwrap_or_default();
        let spawn = Vec2::new(
            spawn_in.x.unwrap_or(DEFAULT_SPAWN.x),
            spawn_in.y.unwrap_or(DEFAULT_SPAWN.y),
        );

        let goal_in = self.goal.unwrap_or_default();
        let goal = Rect::new(
            goal_in.x.unwrap_or(world.width - GOAL_INSET_FROM_RIGHT),
            goal_in.y.unwrap_or(620.0),
            goal_in.w.unwrap_or(40.0),
            goal_in.h.unwrap_or(60.0),
        );

        LevelDesc {
            level_number: self.level_number.unwrap_or(1),
            theme: self.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
            world,
            spawn,
            goal,
            platforms: self
                .platforms
                .into_iter()
                .enumerate()
                .map(|(index, raw)| raw.normalize(index))
                .collect(),
            hazards: self
                .hazards
                .into_iter()
                .enumerate()
                .map(|(index, raw)| raw.normalize(index))
                .collect(),
            collectibles: self
                .collectibles
                .into_iter()
                .enumerate()
                .map(|(index, raw)| raw.normalize(index))
                .collect(),
            decor: self
                .decor
                .into_iter()
                .enumerate()
                .map(|(index, raw)| raw.normalize(index))
                .collect(),
        }
    }
}

impl GeneratedPlatform {
    fn normalize(self, index: usize) -> PlatformDesc {
        let kind = match self.kind.as_deref() {
            Some("moving") => PlatformKind::Moving {
                path: self.path_points.unwrap_or_default(),
                speed: self.speed,
            },
            Some("crumbling") => PlatformKind::Crumbling {
                crumble_delay_ms: self.crumble_delay,
                respawn_time_ms: self.respawn_time,
            },
            Some("bounce") => PlatformKind::Bounce {
                bounce_multiplier: self.bounce_multiplier,
            },
            _ => PlatformKind::Normal,
        };
        PlatformDesc {
            id: self.id.unwrap_or_else(|| format!("p{index}")),
            rect: Rect::new(
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0),
                self.w.unwrap_or(100.0),
                self.h.unwrap_or(20.0),
            ),
            kind,
        }
    }
}

impl GeneratedHazard {
    fn normalize(self, index: usize) -> HazardDesc {
        HazardDesc {
            id: self.id.unwrap_or_else(|| format!("h{index}")),
            kind: match self.kind.as_deref() {
                Some("lava") => HazardKind::Lava,
                _ => HazardKind::Spikes,
            },
            rect: Rect::new(
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0),
                self.w.unwrap_or(60.0),
                self.h.unwrap_or(20.0),
            ),
        }
    }
}

impl GeneratedCollectible {
    fn normalize(self, index: usize) -> CollectibleDesc {
        CollectibleDesc {
            id: self.id.unwrap_or_else(|| format!("c{index}")),
            kind: match self.kind.as_deref() {
                Some("gem") => CollectibleKind::Gem,
                _ => CollectibleKind::Coin,
            },
            pos: Vec2::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0)),
            value: self.value.map(points_from_number).unwrap_or(10),
        }
    }
}

impl GeneratedDecor {
    fn normalize(self, index: usize) -> DecorDesc {
        DecorDesc {
            id: self.id.unwrap_or_else(|| format!("d{index}")),
            layer: match self.layer.as_deref() {
                Some("far") => DecorLayer::Far,
                Some("near") => DecorLayer::Near,
                _ => DecorLayer::Mid,
            },
            kind: self.kind.unwrap_or_else(|| "bush".to_string()),
            pos: Vec2::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0)),
            size: DecorSize {
                w: self.w.unwrap_or(60.0),
                h: self.h.unwrap_or(40.0),
            },
            parallax: self.parallax.unwrap_or(0.5),
            opacity: self.opacity.unwrap_or(1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelValidationError {
    #[error("level has {actual} platforms, at least {required} are required")]
    TooFewPlatforms { actual: usize, required: usize },
    #[error("world width {actual} must be greater than {minimum}")]
    WorldTooNarrow { actual: f32, minimum: f32 },
}

pub fn validate_level(level: &LevelDesc) -> Result<(), LevelValidationError> {
    if level.platforms.len() < MIN_PLATFORM_COUNT {
        return Err(LevelValidationError::TooFewPlatforms {
            actual: level.platforms.len(),
            required: MIN_PLATFORM_COUNT,
        });
    }
    if level.world.width <= MIN_WORLD_WIDTH {
        return Err(LevelValidationError::WorldTooNarrow {
            actual: level.world.width,
            minimum: MIN_WORLD_WIDTH,
        });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum GeneratedLevelError {
    #[error("generated level is not valid json: {0}")]
    Parse(#[source] LevelLoadError),
    #[error("generated level rejected: {0}")]
    Invalid(#[source] LevelValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSource {
    Generated,
    Fallback { reason: String },
}

impl LevelSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LevelSource::Fallback { .. })
    }
}

pub fn normalize_generated_level(raw: &str) -> Result<LevelDesc, GeneratedLevelError> {
    let generated = GeneratedLevel::from_json(raw).map_err(GeneratedLevelError::Parse)?;
    let level = generated.normalize();
    validate_level(&level).map_err(GeneratedLevelError::Invalid)?;
    Ok(level)
}

/// Like [`normalize_generated_level`], but never fails: rejected output is replaced by the
/// built-in level tagged with the requested theme and level number.
pub fn resolve_generated_level(
    raw: &str,
    theme: &str,
    level_number: u32,
) -> (LevelDesc, LevelSource) {
    match normalize_generated_level(raw) {
        Ok(level) => {
            info!(
                level_number = level.level_number,
                theme = %level.theme,
                platforms = level.platforms.len(),
                "generated_level_accepted"
            );
            (level, LevelSource::Generated)
        }
        Err(error) => {
            warn!(error = %error, theme, level_number, "generated_level_rejected_using_fallback");
            let mut level = fallback_level();
            level.theme = theme.to_string();
            level.level_number = level_number;
            (
                level,
                LevelSource::Fallback {
                    reason: error.to_string(),
                },
            )
        }
    }
}
