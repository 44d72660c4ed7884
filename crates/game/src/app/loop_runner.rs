use std::time::Duration;

use tracing::{debug, info, warn};
use traverse_engine::{Engine, GameEvent};

use super::bootstrap::RunConfig;
use super::replay::ReplayScript;
use super::session::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RunReport {
    pub(crate) ticks: u64,
    pub(crate) frames: u64,
    pub(crate) dropped_backlog: Duration,
}

/// Drives `engine` with a simulated presentation clock: every frame feeds `frame_interval` into
/// a fixed-timestep accumulator. Stops when the session leaves `Playing` or `max_ticks` is hit.
pub(crate) fn run_headless(
    engine: &mut Engine<Vec<GameEvent>>,
    script: &ReplayScript,
    session: &mut Session,
    config: &RunConfig,
) -> RunReport {
    let target_tps = config.target_tps.max(1);
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let frame_interval = normalize_non_zero_duration(config.frame_interval, fixed_dt);

    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        frame_interval_ms = frame_interval.as_millis() as u64,
        max_ticks = config.max_ticks,
        script_spans = script.spans.len(),
        "loop_config"
    );

    let mut report = RunReport::default();
    let mut accumulator = Duration::ZERO;

    while session.is_playing() && report.ticks < config.max_ticks {
        report.frames = report.frames.saturating_add(1);
        accumulator = accumulator.saturating_add(clamp_frame_delta(frame_interval, max_frame_delta));

        let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
        for _ in 0..step_plan.ticks_to_run {
            if !session.is_playing() || report.ticks >= config.max_ticks {
                break;
            }
            engine.tick(fixed_dt_seconds, script.intent_at(report.ticks));
            report.ticks += 1;

            let stats = *engine.stats();
            for event in engine.sink_mut().drain(..) {
                session.observe(event, &stats);
            }

            if report.ticks % u64::from(target_tps) == 0 {
                let player = engine.player();
                debug!(
                    tick = report.ticks,
                    x = player.position.x,
                    y = player.position.y,
                    alive = player.is_alive(),
                    score = stats.score,
                    "run_progress"
                );
            }
        }
        accumulator = step_plan.remaining_accumulator;

        if step_plan.dropped_backlog > Duration::ZERO {
            report.dropped_backlog = report
                .dropped_backlog
                .saturating_add(step_plan.dropped_backlog);
            warn!(
                dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                max_ticks_per_frame, "sim_clamp_triggered"
            );
        }
    }

    info!(
        ticks = report.ticks,
        frames = report.frames,
        dropped_backlog_ms = report.dropped_backlog.as_millis() as u64,
        screen = ?session.screen(),
        "run_finished"
    );
    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

/// Splits the accumulator into whole ticks, capped per frame. Whatever is still at least one
/// tick long after the cap is dropped rather than carried into the next frame.
fn plan_sim_steps(
    accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let due = accumulator.as_nanos() / fixed_dt.as_nanos().max(1);
    let ticks_to_run = u32::try_from(due)
        .unwrap_or(u32::MAX)
        .min(max_ticks_per_frame);
    let leftover = accumulator.saturating_sub(fixed_dt.saturating_mul(ticks_to_run));

    if leftover >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: leftover,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: leftover,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use traverse_engine::{fallback_level, Vec2};

    use super::*;
    use crate::app::replay::parse_replay_script;
    use crate::app::session::{Outcome, Screen};

    fn test_config(max_ticks: u64) -> RunConfig {
        RunConfig {
            max_ticks,
            ..RunConfig::default()
        }
    }

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(600), max_frame_delta),
            max_frame_delta
        );
    }

    fn sixty_hz() -> Duration {
        Duration::from_secs_f64(1.0 / 60.0)
    }

    #[test]
    fn plan_sim_steps_keeps_sub_tick_remainder() {
        let fixed_dt = sixty_hz();
        let result = plan_sim_steps(fixed_dt * 3 + Duration::from_millis(4), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(4));
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_drops_whole_ticks_past_the_cap() {
        let fixed_dt = sixty_hz();
        let result = plan_sim_steps(fixed_dt * 8 + Duration::from_millis(5), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 5);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, fixed_dt * 3 + Duration::from_millis(5));
    }

    #[test]
    fn plan_sim_steps_waits_for_a_full_tick() {
        let fixed_dt = sixty_hz();
        let result = plan_sim_steps(Duration::from_millis(16), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 0);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(16));
    }

    #[test]
    fn idle_run_stops_at_tick_budget() {
        let mut engine = Engine::new(fallback_level(), Vec::new());
        let mut session = Session::new(5);
        let report = run_headless(
            &mut engine,
            &ReplayScript::default(),
            &mut session,
            &test_config(120),
        );

        assert_eq!(report.ticks, 120);
        assert!(report.frames >= 120);
        assert_eq!(report.dropped_backlog, Duration::ZERO);
        assert_eq!(Outcome::from_screen(session.screen()), Outcome::OutOfTicks);
        assert!(engine.sink().is_empty());
        assert_eq!(engine.ticks(), 120);
    }

    #[test]
    fn slow_frames_are_clamped_and_backlog_dropped() {
        let mut engine = Engine::new(fallback_level(), Vec::new());
        let mut session = Session::new(5);
        let config = RunConfig {
            frame_interval: Duration::from_millis(1000),
            ..test_config(20)
        };
        let report = run_headless(&mut engine, &ReplayScript::default(), &mut session, &config);

        assert_eq!(report.ticks, 20);
        assert_eq!(report.frames, 4);
        assert!(report.dropped_backlog > Duration::ZERO);
    }

    #[test]
    fn reaching_the_goal_ends_the_run() {
        let mut level = fallback_level();
        level.spawn = Vec2::new(2810.0, 640.0);
        let mut engine = Engine::new(level, Vec::new());
        let mut session = Session::new(5);
        let report = run_headless(
            &mut engine,
            &ReplayScript::default(),
            &mut session,
            &test_config(600),
        );

        assert_eq!(report.ticks, 1);
        assert!(matches!(session.screen(), Screen::LevelComplete(_)));
    }

    #[test]
    fn repeated_deaths_end_in_game_over() {
        let mut level = fallback_level();
        level.spawn = Vec2::new(710.0, 700.0);
        let mut engine = Engine::new(level, Vec::new());
        let mut session = Session::new(1);
        let script = parse_replay_script("0 600 none").expect("script");
        let report = run_headless(&mut engine, &script, &mut session, &test_config(600));

        match session.screen() {
            Screen::GameOver(stats) => assert_eq!(stats.deaths, 1),
            other => panic!("expected game over, got {other:?}"),
        }
        assert!(report.ticks < 200);
        assert_eq!(engine.stats().deaths, 1);
    }
}
