use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Coin { value: u32 },
    GoalReached,
    PlayerDied,
}

/// Receives events synchronously from inside `Engine::tick`. Implementations must not call
/// back into the engine.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(GameEvent),
{
    fn emit(&mut self, event: GameEvent) {
        self(event)
    }
}

/// Queue form: the caller drains it between ticks.
impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Accumulated over the engine's lifetime; never reset by respawns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub score: u64,
    pub coins: u32,
    pub deaths: u32,
    /// Seconds spent alive.
    pub time_elapsed: f32,
}
