use std::env;
use std::time::Duration;

use tracing::warn;
use tracing_subscriber::EnvFilter;

pub(crate) const FRAME_MS_ENV_VAR: &str = "TRAVERSE_FRAME_MS";
pub(crate) const DEATH_LIMIT_ENV_VAR: &str = "TRAVERSE_DEATH_LIMIT";

/// Knobs for the headless fixed-timestep driver.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunConfig {
    pub(crate) target_tps: u32,
    pub(crate) max_frame_delta: Duration,
    pub(crate) max_ticks_per_frame: u32,
    /// Wall time each simulated presentation frame feeds into the accumulator.
    pub(crate) frame_interval: Duration,
    /// Deaths already taken when a further death ends the session.
    pub(crate) death_limit: u32,
    pub(crate) max_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            frame_interval: Duration::from_millis(16),
            death_limit: 5,
            max_ticks: 60 * 60 * 5,
        }
    }
}

impl RunConfig {
    pub(crate) fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            frame_interval: Duration::from_millis(resolve_env_u64(
                FRAME_MS_ENV_VAR,
                defaults.frame_interval.as_millis() as u64,
            )),
            death_limit: resolve_env_u64(DEATH_LIMIT_ENV_VAR, u64::from(defaults.death_limit))
                .try_into()
                .unwrap_or(u32::MAX),
            ..defaults
        }
    }
}

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn resolve_env_u64(env_var: &'static str, fallback: u64) -> u64 {
    match env::var(env_var) {
        Ok(value) => parse_u64_or(env_var, &value, fallback),
        Err(env::VarError::NotPresent) => fallback,
        Err(err) => {
            warn!(
                env_var,
                error = %err,
                "unable to read env var; falling back to default"
            );
            fallback
        }
    }
}

fn parse_u64_or(env_var: &'static str, value: &str, fallback: u64) -> u64 {
    match value.trim().parse::<u64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(
                env_var,
                value,
                fallback,
                "invalid env var value; falling back to default"
            );
            fallback
        }
    }
}
