//! Frame acquisition — where table snapshots come from.

pub mod replay;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::TableState;

/// A source of scraped table snapshots, polled by the binary's frame loop.
#[async_trait]
pub trait FrameSource: Send {
    /// The next frame, or `None` once the source is exhausted.
    async fn next_frame(&mut self) -> Result<Option<TableState>>;

    /// Source identity for logs.
    fn name(&self) -> &str;
}
