use serde::Serialize;
use tracing::info;
use traverse_engine::{GameEvent, Stats};

/// What the caller would be showing. The engine never changes this; it only reports events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Screen {
    Playing,
    LevelComplete(Stats),
    GameOver(Stats),
}

#[derive(Debug, Clone)]
pub(crate) struct Session {
    screen: Screen,
    death_limit: u32,
}

impl Session {
    pub(crate) fn new(death_limit: u32) -> Self {
        Self {
            screen: Screen::Playing,
            death_limit,
        }
    }

    pub(crate) fn screen(&self) -> Screen {
        self.screen
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }

    /// Applies one engine event. `stats` is the snapshot taken right after the tick that emitted
    /// it, so a death is seen before its respawn has been counted.
    pub(crate) fn observe(&mut self, event: GameEvent, stats: &Stats) {
        if !self.is_playing() {
            return;
        }
        match event {
            GameEvent::GoalReached => {
                info!(
                    score = stats.score,
                    coins = stats.coins,
                    deaths = stats.deaths,
                    time_elapsed = stats.time_elapsed,
                    "level_complete"
                );
                self.screen = Screen::LevelComplete(*stats);
            }
            GameEvent::PlayerDied if stats.deaths >= self.death_limit => {
                info!(
                    deaths = stats.deaths,
                    death_limit = self.death_limit,
                    "game_over"
                );
                self.screen = Screen::GameOver(*stats);
            }
            GameEvent::PlayerDied | GameEvent::Coin { .. } => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Outcome {
    LevelComplete,
    GameOver,
    OutOfTicks,
}

impl Outcome {
    pub(crate) fn from_screen(screen: Screen) -> Self {
        match screen {
            Screen::Playing => Outcome::OutOfTicks,
            Screen::LevelComplete(_) => Outcome::LevelComplete,
            Screen::GameOver(_) => Outcome::GameOver,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) outcome: Outcome,
    pub(crate) ticks: u64,
    pub(crate) frames: u64,
    pub(crate) theme: String,
    pub(crate) level_number: u32,
    pub(crate) level_sha256: String,
    /// `None` when the built-in level was played.
    pub(crate) level_path: Option<String>,
    pub(crate) stats: Stats,
    pub(crate) collected: usize,
    pub(crate) collectible_total: usize,
}

impl RunSummary {
    pub(crate) fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|error| format!("encode run summary: {error}"))
    }
}
