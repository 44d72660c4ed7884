use serde::{Deserialize, Deserializer, Serialize};

use crate::sim::{Rect, Vec2};

pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDesc {
    #[serde(default = "default_level_number")]
    pub level_number: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    pub world: WorldDesc,
    pub spawn: Vec2,
    pub goal: Rect,
    pub platforms: Vec<PlatformDesc>,
    #[serde(default)]
    pub hazards: Vec<HazardDesc>,
    #[serde(default)]
    pub collectibles: Vec<CollectibleDesc>,
    #[serde(default)]
    pub decor: Vec<DecorDesc>,
}

impl LevelDesc {
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world.width, self.world.height)
    }
}

fn default_level_number() -> u32 {
    1
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldDesc {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDesc {
    pub id: String,
    pub rect: Rect,
    #[serde(flatten)]
    pub kind: PlatformKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlatformKind {
    Normal,
    Moving {
        #[serde(default)]
        path: Vec<Vec2>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed: Option<f32>,
    },
    Crumbling {
        #[serde(
            default,
            rename = "crumbleDelay",
            skip_serializing_if = "Option::is_none"
        )]
        crumble_delay_ms: Option<f32>,
        #[serde(
            default,
            rename = "respawnTime",
            skip_serializing_if = "Option::is_none"
        )]
        respawn_time_ms: Option<f32>,
    },
    Bounce {
        #[serde(
            default,
            rename = "bounceMultiplier",
            skip_serializing_if = "Option::is_none"
        )]
        bounce_multiplier: Option<f32>,
    },
}

impl PlatformKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            PlatformKind::Normal => "normal",
            PlatformKind::Moving { .. } => "moving",
            PlatformKind::Crumbling { .. } => "crumbling",
            PlatformKind::Bounce { .. } => "bounce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Spikes,
    Lava,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDesc {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HazardKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleKind {
    Coin,
    Gem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleDesc {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CollectibleKind,
    pub pos: Vec2,
    #[serde(deserialize_with = "deserialize_points")]
    pub value: u32,
}

pub(crate) fn points_from_number(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

fn deserialize_points<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(points_from_number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorLayer {
    Far,
    Mid,
    Near,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecorSize {
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorDesc {
    pub id: String,
    pub layer: DecorLayer,
    pub kind: String,
    pub pos: Vec2,
    pub size: DecorSize,
    pub parallax: f32,
    pub opacity: f32,
}
