use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;
use traverse_engine::level::{
    fallback_level, level_fingerprint, read_level_file, resolve_generated_level,
    write_level_json, write_text_atomic, LevelDesc, LevelSource,
};
use traverse_engine::sim::{CollectibleState, Engine, EngineConfig};

use super::bootstrap::RunConfig;
use super::cli::{usage_text, Command, LevelChoice, PlayOptions};
use super::loop_runner::run_headless;
use super::replay::{parse_replay_script, ReplayScript};
use super::session::{Outcome, RunSummary, Session};

pub(crate) fn run_command<W: Write>(command: Command, stdout: &mut W) -> Result<(), String> {
    match command {
        Command::Help => write_line(stdout, &usage_text()),
        Command::Play(options) => play(options, stdout),
        Command::Normalize {
            input,
            theme,
            level_number,
            out,
        } => {
            let raw = fs::read_to_string(&input)
                .map_err(|error| format!("read generated level '{}': {error}", input.display()))?;
            let (level, source) = resolve_generated_level(&raw, &theme, level_number);
            if let LevelSource::Fallback { reason } = &source {
                write_line(stdout, &format!("fallback: {reason}"))?;
            }
            match out {
                Some(out) => {
                    write_level_json(&out, &level).map_err(|error| error.to_string())?;
                    write_line(stdout, &format!("sha256 {}", fingerprint(&level)?))
                }
                None => {
                    let text = serde_json::to_string_pretty(&level)
                        .map_err(|error| format!("encode level json: {error}"))?;
                    write_line(stdout, &text)
                }
            }
        }
        Command::ExportFallback { out } => {
            let level = fallback_level();
            write_level_json(&out, &level).map_err(|error| error.to_string())?;
            write_line(stdout, &format!("sha256 {}", fingerprint(&level)?))
        }
        Command::Fingerprint { input } => {
            let level = read_level_file(&input).map_err(|error| error.to_string())?;
            write_line(
                stdout,
                &format!("{}  {}", fingerprint(&level)?, input.display()),
            )
        }
    }
}

fn play<W: Write>(options: PlayOptions, stdout: &mut W) -> Result<(), String> {
    let (level, level_path) = match &options.level {
        LevelChoice::File(path) => (
            read_level_file(path).map_err(|error| error.to_string())?,
            Some(path.display().to_string()),
        ),
        LevelChoice::Fallback => (fallback_level(), None),
    };
    let level_sha256 = fingerprint(&level)?;

    let script = match &options.script {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|error| format!("read replay script '{}': {error}", path.display()))?;
            parse_replay_script(&content)?
        }
        None => ReplayScript::default(),
    };
    script.check_level(&level_sha256)?;

    let engine_config = match &options.config {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::default(),
    };

    let mut run_config = RunConfig::from_env();
    if let Some(max_ticks) = options.max_ticks {
        run_config.max_ticks = max_ticks;
    }

    info!(
        theme = %level.theme,
        level_number = level.level_number,
        level_sha256 = %level_sha256,
        script_last_tick = script.last_input_tick(),
        death_limit = run_config.death_limit,
        "play_started"
    );

    let mut engine = Engine::with_config(level, engine_config, Vec::new());
    let mut session = Session::new(run_config.death_limit);
    let report = run_headless(&mut engine, &script, &mut session, &run_config);

    let summary = RunSummary {
        outcome: Outcome::from_screen(session.screen()),
        ticks: report.ticks,
        frames: report.frames,
        theme: engine.level().theme.clone(),
        level_number: engine.level().level_number,
        level_sha256,
        level_path,
        stats: *engine.stats(),
        collected: engine
            .collectibles()
            .filter(|view| view.state == CollectibleState::Collected)
            .count(),
        collectible_total: engine.level().collectibles.len(),
    };
    let text = summary.to_json()?;
    if let Some(path) = &options.summary_out {
        write_text_atomic(path, &text)
            .map_err(|error| format!("write summary '{}': {error}", path.display()))?;
    }
    stdout
        .write_all(text.as_bytes())
        .map_err(|error| format!("write stdout: {error}"))
}

fn load_engine_config(path: &Path) -> Result<EngineConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read engine config '{}': {error}", path.display()))?;
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    match serde_path_to_error::deserialize::<_, EngineConfig>(&mut deserializer) {
        Ok(config) => Ok(config),
        Err(error) => {
            let json_path = error.path().to_string();
            let source = error.into_inner();
            if json_path.is_empty() || json_path == "." {
                Err(format!("parse engine config: {source}"))
            } else {
                Err(format!("parse engine config at {json_path}: {source}"))
            }
        }
    }
}

fn fingerprint(level: &LevelDesc) -> Result<String, String> {
    level_fingerprint(level).map_err(|error| format!("fingerprint level: {error}"))
}

fn write_line<W: Write>(stdout: &mut W, line: &str) -> Result<(), String> {
    writeln!(stdout, "{line}").map_err(|error| format!("write stdout: {error}"))
}
