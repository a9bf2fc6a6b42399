use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 64;

/// Where in the fallback chain an entry was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Config,
    Aggregated,
    FallbackMode,
    ById,
    Static,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Aggregated => "aggregated",
            Stage::FallbackMode => "fallback-mode",
            Stage::ById => "by-id",
            Stage::Static => "static",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEntry {
    pub at: DateTime<Utc>,
    pub stage: Stage,
    pub message: String,
    #[serde(skip)]
    pub offline: bool,
}

impl std::fmt::Display for DiagnosticEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.at.to_rfc3339(),
            self.stage.as_str(),
            self.message
        )
    }
}

/// Bounded record of what a single resolution did, kept for the
/// troubleshooting panel. Oldest entries are evicted once full.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticLog {
    entries: VecDeque<DiagnosticEntry>,
    #[serde(skip)]
    capacity: usize,
    dropped: usize,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DiagnosticLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn record(&mut self, stage: Stage, message: impl Into<String>) {
        self.push(stage, message.into(), false);
    }

    /// Records an entry that marks the service as unreachable.
    pub fn record_offline(&mut self, stage: Stage, message: impl Into<String>) {
        self.push(stage, message.into(), true);
    }

    fn push(&mut self, stage: Stage, message: String, offline: bool) {
        tracing::debug!(stage = stage.as_str(), offline, "{message}");

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries.push_back(DiagnosticEntry {
            at: Utc::now(),
            stage,
            message,
            offline,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &DiagnosticEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn mentions_offline(&self) -> bool {
        self.entries.iter().any(|e| e.offline)
    }
}
