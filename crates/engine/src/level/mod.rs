mod atomic_io;
mod fallback;
mod generator;
mod hashing;
mod loader;
mod types;

pub use atomic_io::{write_level_json, write_text_atomic, LevelExportError};
pub use fallback::fallback_level;
pub use generator::{
    normalize_generated_level, resolve_generated_level, validate_level, GeneratedCollectible,
    GeneratedDecor, GeneratedHazard, GeneratedLevel, GeneratedLevelError, GeneratedPlatform,
    GeneratedPoint, GeneratedRect, GeneratedWorld, LevelSource, LevelValidationError,
    MIN_PLATFORM_COUNT, MIN_WORLD_WIDTH,
};
pub use hashing::level_fingerprint;
pub use loader::{parse_level_json, read_level_file, LevelLoadError};
pub use types::{
    CollectibleDesc, CollectibleKind, DecorDesc, DecorLayer, DecorSize, HazardDesc, HazardKind,
    LevelDesc, PlatformDesc, PlatformKind, WorldDesc, DEFAULT_THEME,
};
