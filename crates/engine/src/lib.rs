pub mod level;
pub mod sim;

pub use level::{
    fallback_level, level_fingerprint, parse_level_json, read_level_file,
    resolve_generated_level, write_level_json, LevelDesc, LevelExportError, LevelLoadError,
    LevelSource, LevelValidationError,
};
pub use sim::{
    Camera, EngineConfig, Engine, EventSink, GameEvent, InputAction, InputIntent, Player, Rect,
    Stats, Vec2,
};
