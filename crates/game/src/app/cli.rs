use std::path::PathBuf;

use traverse_engine::level::DEFAULT_THEME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LevelChoice {
    File(PathBuf),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayOptions {
    pub(crate) level: LevelChoice,
    pub(crate) script: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) max_ticks: Option<u64>,
    pub(crate) summary_out: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Play(PlayOptions),
    Normalize {
        input: PathBuf,
        theme: String,
        level_number: u32,
        out: Option<PathBuf>,
    },
    ExportFallback {
        out: PathBuf,
    },
    Fingerprint {
        input: PathBuf,
    },
}

pub(crate) fn parse_command(args: &[String]) -> Result<Command, String> {
    let Some(command) = args.first() else {
        return Err(usage_text());
    };
    let command_args = &args[1..];

    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "play" => parse_play(command_args).map(Command::Play),
        "normalize" => parse_normalize(command_args),
        "export-fallback" => match command_args {
            [out] => Ok(Command::ExportFallback {
                out: PathBuf::from(out),
            }),
            _ => Err("export-fallback requires exactly one output path".to_string()),
        },
        "fingerprint" => match command_args {
            [input] => Ok(Command::Fingerprint {
                input: PathBuf::from(input),
            }),
            _ => Err("fingerprint requires exactly one level path".to_string()),
        },
        other => Err(format!("unknown subcommand '{other}'\n\n{}", usage_text())),
    }
}

fn parse_play(args: &[String]) -> Result<PlayOptions, String> {
    let mut level = None;
    let mut script = None;
    let mut config = None;
    let mut max_ticks = None;
    let mut summary_out = None;

    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--fallback" => {
                set_level(&mut level, LevelChoice::Fallback)?;
                index += 1;
            }
            "--script" => {
                script = Some(PathBuf::from(flag_value(args, index, "--script")?));
                index += 2;
            }
            "--config" => {
                config = Some(PathBuf::from(flag_value(args, index, "--config")?));
                index += 2;
            }
            "--max-ticks" => {
                let value = flag_value(args, index, "--max-ticks")?;
                max_ticks = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid --max-ticks value '{value}' (expected u64)"))?,
                );
                index += 2;
            }
            "--summary-out" => {
                summary_out = Some(PathBuf::from(flag_value(args, index, "--summary-out")?));
                index += 2;
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown play argument '{flag}'"));
            }
            path => {
                set_level(&mut level, LevelChoice::File(PathBuf::from(path)))?;
                index += 1;
            }
        }
    }

    Ok(PlayOptions {
        level: level.ok_or_else(|| "play requires <level.json> or --fallback".to_string())?,
        script,
        config,
        max_ticks,
        summary_out,
    })
}

fn parse_normalize(args: &[String]) -> Result<Command, String> {
    let mut input = None;
    let mut theme = DEFAULT_THEME.to_string();
    let mut level_number = 1u32;
    let mut out = None;

    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--theme" => {
                theme = flag_value(args, index, "--theme")?.to_string();
                index += 2;
            }
            "--level" => {
                let value = flag_value(args, index, "--level")?;
                level_number = value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid --level value '{value}' (expected u32)"))?;
                index += 2;
            }
            "--out" => {
                out = Some(PathBuf::from(flag_value(args, index, "--out")?));
                index += 2;
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown normalize argument '{flag}'"));
            }
            path => {
                if input.is_some() {
                    return Err(format!("unexpected extra argument '{path}'"));
                }
                input = Some(PathBuf::from(path));
                index += 1;
            }
        }
    }

    Ok(Command::Normalize {
        input: input.ok_or_else(|| "normalize requires a generated level path".to_string())?,
        theme,
        level_number,
        out,
    })
}

fn flag_value<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str, String> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn set_level(slot: &mut Option<LevelChoice>, choice: LevelChoice) -> Result<(), String> {
    if slot.is_some() {
        return Err("play accepts a single level source".to_string());
    }
    *slot = Some(choice);
    Ok(())
}

pub(crate) fn usage_text() -> String {
    [
        "traverse - headless platformer simulation runner",
        "",
        "Usage:",
        "  traverse play (<level.json> | --fallback) [--script <file>] [--config <file>] [--max-ticks <u64>] [--summary-out <file>]",
        "  traverse normalize <generated.json> [--theme <name>] [--level <u32>] [--out <file>]",
        "  traverse export-fallback <file>",
        "  traverse fingerprint <level.json>",
        "",
        "Environment:",
        "  TRAVERSE_FRAME_MS     simulated presentation frame interval (default 16)",
        "  TRAVERSE_DEATH_LIMIT  deaths before the next one ends the run (default 5)",
        "  RUST_LOG              tracing filter (default info)",
    ]
    .join("\n")
}
