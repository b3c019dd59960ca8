use std::io::Write;

use anyhow::Result;
use fountain_core::{Coord, GameStatus};
use fountain_system_senses::Sense;
use fountain_system_session::{OutcomeSink, TurnReport};
use serde::Serialize;

/// Writes plain-text narration for a human player.
#[derive(Debug)]
pub(crate) struct TextSink<W> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> OutcomeSink for TextSink<W> {
    type Error = anyhow::Error;

    fn turn_started(&mut self, position: Coord, senses: &[Sense]) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "You are in the room at {position}.")?;
        for sense in senses {
            writeln!(self.out, "{}", sense.message())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn turn_resolved(&mut self, report: &TurnReport) -> Result<()> {
        if report.outcome.has_message() {
            writeln!(self.out, "{}", report.outcome.message)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn game_finished(&mut self, status: GameStatus) -> Result<()> {
        if let Some(narration) = status.narration() {
            writeln!(self.out)?;
            writeln!(self.out, "{narration}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Writes one JSON object per line for scripted consumers.
#[derive(Debug)]
pub(crate) struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, record: &JsonRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum JsonRecord<'a> {
    TurnStarted {
        position: Coord,
        senses: Vec<&'static str>,
    },
    TurnResolved {
        #[serde(flatten)]
        report: &'a TurnReport,
    },
    GameFinished {
        status: GameStatus,
        narration: Option<&'static str>,
    },
}

impl<W: Write> OutcomeSink for JsonSink<W> {
    type Error = anyhow::Error;

    fn turn_started(&mut self, position: Coord, senses: &[Sense]) -> Result<()> {
        self.emit(&JsonRecord::TurnStarted {
            position,
            senses: senses.iter().map(|sense| sense.message()).collect(),
        })
    }

    fn turn_resolved(&mut self, report: &TurnReport) -> Result<()> {
        self.emit(&JsonRecord::TurnResolved { report })
    }

    fn game_finished(&mut self, status: GameStatus) -> Result<()> {
        self.emit(&JsonRecord::GameFinished {
            status,
            narration: status.narration(),
        })
    }
}
