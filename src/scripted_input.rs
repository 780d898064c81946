//! Frame scripts for headless replays.
//!
//! One frame group per line: `<dt> <keys> [xN]`. Keys are `wasd` to move,
//! `^` to run, `e` interact, `i` inventory, `m` meditate, `>` advance
//! dialogue, `1`-`9` describe an item and `.` for no input. `xN` repeats
//! the frame N times. Blank lines and `#` comments are skipped.

use std::{fs, path::Path};

use tracing::debug;

use crate::{
    error::{GameError, GameResult},
    input::{Action, InputFrame},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ScriptFrame {
    pub dt: f64,
    pub input: InputFrame,
}

#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: Vec<ScriptFrame>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> GameResult<Self> {
        let mut frames = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (frame, repeat) = parse_line(trimmed).map_err(|reason| GameError::Script {
                line: idx + 1,
                reason,
            })?;
            frames.extend(std::iter::repeat_n(frame, repeat));
        }
        debug!(frames = frames.len(), "script parsed");
        Ok(Self { frames, cursor: 0 })
    }

    pub fn next_frame(&mut self) -> Option<&ScriptFrame> {
        let frame = self.frames.get(self.cursor)?;
        self.cursor += 1;
        Some(frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total simulated seconds.
    pub fn duration(&self) -> f64 {
        self.frames.iter().map(|f| f.dt).sum()
    }
}

fn parse_line(line: &str) -> Result<(ScriptFrame, usize), String> {
    let mut parts = line.split_whitespace();
    let dt_text = parts.next().ok_or("missing frame delta")?;
    let dt: f64 = dt_text
        .parse()
        .map_err(|_| format!("bad frame delta `{dt_text}`"))?;
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!("frame delta {dt} out of range"));
    }
    let keys = parts.next().ok_or("missing keys")?;
    let repeat = match parts.next() {
        Some(count) => count
            .strip_prefix('x')
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| format!("bad repeat `{count}`"))?,
        None => 1,
    };
    if let Some(extra) = parts.next() {
        return Err(format!("unexpected `{extra}`"));
    }

    let mut input = InputFrame::idle();
    for key in keys.chars() {
        match key {
            'w' | 'W' => input.intent.up = true,
            's' | 'S' => input.intent.down = true,
            'a' | 'A' => input.intent.left = true,
            'd' | 'D' => input.intent.right = true,
            '^' => input.intent.run = true,
            'e' | 'E' => input.actions.push(Action::Interact),
            'i' | 'I' => input.actions.push(Action::ToggleInventory),
            'm' | 'M' => input.actions.push(Action::Meditate),
            '>' => input.actions.push(Action::AdvanceDialogue),
            '1'..='9' => {
                let slot = key as usize - '1' as usize;
                input.actions.push(Action::DescribeItem(slot));
            }
            '.' => {}
            other => return Err(format!("unknown key `{other}`")),
        }
    }
    Ok((ScriptFrame { dt, input }, repeat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_repeats_and_comments() {
        let script = ScriptedInput::parse(
            "# walk then look around\n\n0.5 d^ x4\n0.25 e\n0.25 >3\n",
        )
        .unwrap();
        assert_eq!(script.len(), 6);
        assert_eq!(script.duration(), 2.5);
        let mut script = script;
        let first = script.next_frame().cloned().unwrap();
        assert!(first.input.intent.right && first.input.intent.run);
        let last = script.frames.last().unwrap();
        assert_eq!(
            last.input.actions.as_slice(),
            &[Action::AdvanceDialogue, Action::DescribeItem(2)]
        );
    }

    #[test]
    fn test_reports_line_of_bad_key() {
        let err = ScriptedInput::parse("0.1 .\n\n0.1 wz\n").unwrap_err();
        match err {
            GameError::Script { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains('z'));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejects_negative_delta_and_bad_repeat() {
        assert!(ScriptedInput::parse("-0.1 .").is_err());
        assert!(ScriptedInput::parse("0.1 . 4").is_err());
        assert!(ScriptedInput::parse("0.1").is_err());
    }

    #[test]
    fn test_runs_out() {
        let mut script = ScriptedInput::parse("0.1 . x2").unwrap();
        assert!(script.next_frame().is_some());
        assert!(script.next_frame().is_some());
        assert!(script.next_frame().is_none());
    }
}
