//! JSON-lines replay source.
//!
//! Plays scraped frames back from a file, one JSON object per line. Blank
//! lines are skipped; frames that omit blind sizes inherit the configured
//! table defaults. A malformed line is a hard error carrying its line
//! number — a replay with garbage in it should fail loudly, not drift.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use tracing::info;

use super::FrameSource;
use crate::config::TableConfig;
use crate::types::TableState;

#[derive(Debug)]
pub struct ReplaySource {
    name: String,
    lines: Vec<(usize, String)>,
    cursor: usize,
    defaults: TableConfig,
}

impl ReplaySource {
    pub fn from_file<P: AsRef<Path>>(path: P, defaults: TableConfig) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay file {}", path.display()))?;
        let lines: Vec<(usize, String)> = raw
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, line.to_string()))
            .collect();
        info!(
            file = %path.display(),
            frames = lines.len(),
            "replay source loaded"
        );
        Ok(Self {
            name: format!("replay:{}", path.display()),
            lines,
            cursor: 0,
            defaults,
        })
    }

    /// Frames written without blind sizes read back as zeroes; fill those
    /// from the configured table defaults.
    fn apply_defaults(&self, mut table: TableState) -> TableState {
        if table.sblind <= 0.0 {
            table.sblind = self.defaults.sblind;
        }
        if table.bblind <= 0.0 {
            table.bblind = self.defaults.bblind;
        }
        if table.ante <= 0.0 {
            table.ante = self.defaults.ante;
        }
        table
    }
}

#[async_trait]
impl FrameSource for ReplaySource {
    async fn next_frame(&mut self) -> Result<Option<TableState>> {
        let Some((line_no, line)) = self.lines.get(self.cursor) else {
            return Ok(None);
        };
        let table: TableState = serde_json::from_str(line)
            .with_context(|| format!("Malformed frame at {} line {line_no}", self.name))?;
        self.cursor += 1;
        Ok(Some(self.apply_defaults(table)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
