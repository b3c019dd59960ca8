use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use anyhow::{bail, Context, Result};
use fountain_core::Action;
use fountain_system_session::ActionSource;
use log::debug;

const ACTION_PROMPT: &str =
    "Please enter next direction (north, south, east, west) or e to activate...";

/// Classifies a raw token into an action, ignoring case and surrounding spaces.
pub(crate) fn parse_action(token: &str) -> Option<Action> {
    match token.trim().to_ascii_lowercase().as_str() {
        "north" | "n" | "up" => Some(Action::North),
        "south" | "s" | "down" => Some(Action::South),
        "east" | "right" => Some(Action::East),
        "west" | "w" | "left" => Some(Action::West),
        "activate" | "e" | "a" => Some(Action::Activate),
        _ => None,
    }
}

/// Asks for a number in `min..=max` until one is entered.
pub(crate) fn prompt_map_size<R, W>(input: &mut R, prompt: &mut W, min: u32, max: u32) -> Result<u32>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(prompt, "Please choose cavern size ({min}-{max}): ")?;
    prompt.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        let read = input
            .read_line(&mut line)
            .context("failed to read the cavern size")?;
        if read == 0 {
            bail!("input closed before a cavern size was chosen");
        }

        match line.trim().parse::<u32>() {
            Ok(size) if (min..=max).contains(&size) => return Ok(size),
            _ => writeln!(prompt, "Please enter a number between {min}-{max}")?,
        }
    }
}

/// Reads one action per line, asking again after unrecognised input.
#[derive(Debug)]
pub(crate) struct LineActions<R, W> {
    input: R,
    prompt: W,
    line: String,
}

impl<R, W> LineActions<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, prompt: W) -> Self {
        Self {
            input,
            prompt,
            line: String::new(),
        }
    }
}

impl<R, W> ActionSource for LineActions<R, W>
where
    R: BufRead,
    W: Write,
{
    type Error = anyhow::Error;

    fn next_action(&mut self) -> Result<Action> {
        loop {
            writeln!(self.prompt, "{ACTION_PROMPT}")?;
            self.prompt.flush()?;

            self.line.clear();
            let read = self
                .input
                .read_line(&mut self.line)
                .context("failed to read the next action")?;
            if read == 0 {
                bail!("input closed before the game ended");
            }

            if let Some(action) = parse_action(&self.line) {
                return Ok(action);
            }
            debug!("ignoring unrecognised input {:?}", self.line.trim());
        }
    }
}

/// Replays a fixed list of actions supplied on the command line.
#[derive(Debug)]
pub(crate) struct ScriptedActions {
    actions: VecDeque<Action>,
}

impl ScriptedActions {
    /// Parses whitespace- or comma-separated action tokens.
    pub(crate) fn parse(script: &str) -> Result<Self> {
        let actions = script
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                parse_action(token).with_context(|| format!("unknown action '{token}' in script"))
            })
            .collect::<Result<VecDeque<_>>>()?;
        Ok(Self { actions })
    }
}

impl ActionSource for ScriptedActions {
    type Error = anyhow::Error;

    fn next_action(&mut self) -> Result<Action> {
        match self.actions.pop_front() {
            Some(action) => Ok(action),
            None => bail!("script ran out of actions before the game ended"),
        }
    }
}
