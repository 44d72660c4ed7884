use traverse_engine::{InputAction, InputIntent};

const LEVEL_HASH_DIRECTIVE: &str = "level-sha256";

/// Keys held for ticks `start_tick..end_tick` (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InputSpan {
    pub(crate) start_tick: u64,
    pub(crate) end_tick: u64,
    pub(crate) intent: InputIntent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ReplayScript {
    pub(crate) level_sha256: Option<String>,
    pub(crate) spans: Vec<InputSpan>,
}

impl ReplayScript {
    /// Overlapping spans OR their keys together.
    pub(crate) fn intent_at(&self, tick: u64) -> InputIntent {
        self.spans
            .iter()
            .filter(|span| span.start_tick <= tick && tick < span.end_tick)
            .fold(InputIntent::none(), |intent, span| intent.merged(span.intent))
    }

    pub(crate) fn last_input_tick(&self) -> u64 {
        self.spans
            .iter()
            .map(|span| span.end_tick)
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn check_level(&self, fingerprint: &str) -> Result<(), String> {
        match &self.level_sha256 {
            Some(expected) if !expected.eq_ignore_ascii_case(fingerprint) => Err(format!(
                "replay was recorded for level {expected}, loaded level is {fingerprint}"
            )),
            _ => Ok(()),
        }
    }
}

pub(crate) fn parse_replay_script(content: &str) -> Result<ReplayScript, String> {
    let mut script = ReplayScript::default();
    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields = trimmed.split_whitespace().collect::<Vec<_>>();
        if fields[0] == LEVEL_HASH_DIRECTIVE {
            let [_, hash] = fields.as_slice() else {
                return Err(format!(
                    "line {line_number}: expected '{LEVEL_HASH_DIRECTIVE} <hex>'"
                ));
            };
            if script.level_sha256.is_some() {
                return Err(format!(
                    "line {line_number}: duplicate {LEVEL_HASH_DIRECTIVE} directive"
                ));
            }
            script.level_sha256 = Some(hash.to_ascii_lowercase());
            continue;
        }

        let [start, end, keys] = fields.as_slice() else {
            return Err(format!(
                "line {line_number}: expected '<start_tick> <end_tick> <keys>', got '{trimmed}'"
            ));
        };
        let start_tick = parse_tick(start, line_number)?;
        let end_tick = parse_tick(end, line_number)?;
        if end_tick <= start_tick {
            return Err(format!(
                "line {line_number}: end tick {end_tick} must be after start tick {start_tick}"
            ));
        }
        script.spans.push(InputSpan {
            start_tick,
            end_tick,
            intent: parse_keys(keys, line_number)?,
        });
    }
    Ok(script)
}

fn parse_tick(raw: &str, line_number: usize) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|_| format!("line {line_number}: invalid tick '{raw}' (expected u64)"))
}

fn parse_keys(raw: &str, line_number: usize) -> Result<InputIntent, String> {
    if raw.eq_ignore_ascii_case("none") {
        return Ok(InputIntent::none());
    }
    let mut intent = InputIntent::none();
    for token in raw.split('+') {
        let action = InputAction::from_token(token).ok_or_else(|| {
            format!("line {line_number}: unknown key '{token}' (expected left, right, jump or none)")
        })?;
        intent = intent.with_action_down(action, true);
    }
    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spans_directive_and_comments() {
        let content = r#"
            # run right, hop over the spikes
            level-sha256 ABCDEF01
            0 120 right

            40 52 jump+right
            130 140 none
        "#;
        let script = parse_replay_script(content).expect("script");
        assert_eq!(script.level_sha256.as_deref(), Some("abcdef01"));
        assert_eq!(script.spans.len(), 3);
        assert_eq!(script.last_input_tick(), 140);

        let both = script.intent_at(45);
        assert!(both.right && both.jump && !both.left);
        assert_eq!(
            script.intent_at(52),
            InputIntent::none().with_action_down(InputAction::MoveRight, true)
        );
        assert_eq!(script.intent_at(120), InputIntent::none());
        assert_eq!(script.intent_at(135), InputIntent::none());
    }

    #[test]
    fn rejects_malformed_lines_with_line_numbers() {
        let error = parse_replay_script("0 10 right\n5 x left").expect_err("bad tick");
        assert!(error.starts_with("line 2:"), "{error}");

        let error = parse_replay_script("10 10 left").expect_err("empty span");
        assert!(error.contains("must be after"), "{error}");

        let error = parse_replay_script("0 10 dash").expect_err("bad key");
        assert!(error.contains("unknown key 'dash'"), "{error}");

        let error = parse_replay_script("0 10").expect_err("missing keys");
        assert!(error.starts_with("line 1:"), "{error}");

        let error =
            parse_replay_script("level-sha256 aa\nlevel-sha256 bb").expect_err("duplicate");
        assert!(error.contains("duplicate"), "{error}");
    }

    #[test]
    fn level_check_is_case_insensitive_and_optional() {
        let unpinned = ReplayScript::default();
        assert!(unpinned.check_level("anything").is_ok());

        let pinned = parse_replay_script("level-sha256 ABC").expect("script");
        assert!(pinned.check_level("abc").is_ok());
        assert!(pinned.check_level("abd").is_err());
    }
}
