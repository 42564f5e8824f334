use crate::output::traits::{MatchResult, MatchSink, OutputResult};
use crate::FetchError;
use std::io::{self, Stdout, Write};

/// Prints one line per match, and one human-readable line per fetch error
///
/// Each line is flushed as soon as it is written so results show up while
/// a long crawl is still running.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    writer: W,
}

impl ConsoleSink<Stdout> {
    /// A sink writing to the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Gives the underlying writer back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MatchSink for ConsoleSink<W> {
    fn on_match(&mut self, result: &MatchResult) -> OutputResult<()> {
        writeln!(self.writer, "{}", result.location)?;
        self.writer.flush()?;
        Ok(())
    }

    fn on_fetch_error(&mut self, error: &FetchError) -> OutputResult<()> {
        writeln!(self.writer, "{}", error)?;
        self.writer.flush()?;
        Ok(())
    }
}
