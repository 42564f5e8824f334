use crate::output::traits::{MatchResult, MatchSink, OutputResult};
use crate::FetchError;

/// A fetch failure as recorded by [`CollectingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFetch {
    pub location: String,
    pub message: String,
}

/// Keeps every match and fetch failure in memory, in the order reported
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub matches: Vec<MatchResult>,
    pub errors: Vec<FailedFetch>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The matched locations, in the order they were reported
    pub fn locations(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.location.as_str()).collect()
    }
}

impl MatchSink for CollectingSink {
    fn on_match(&mut self, result: &MatchResult) -> OutputResult<()> {
        self.matches.push(result.clone());
        Ok(())
    }

    fn on_fetch_error(&mut self, error: &FetchError) -> OutputResult<()> {
        self.errors.push(FailedFetch {
            location: error.location.clone(),
            message: error.to_string(),
        });
        Ok(())
    }
}
