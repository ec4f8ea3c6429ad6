//! Line-oriented hand-history text recorder.
//!
//! Appends one timestamped line per recorded event to a log file. Each
//! recorder carries a session id so interleaved sittings can be told apart
//! in the same file. Write errors are logged and swallowed — recording must
//! never stall the engine.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

use super::HandHistory;

/// Writes hand-history events as timestamped text lines.
#[derive(Debug)]
pub struct TextRecorder {
    session_id: Uuid,
    path: PathBuf,
    file: Mutex<File>,
}

impl TextRecorder {
    /// Open (or create) the history file in append mode and write a
    /// session header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open history file: {}", path.display()))?;

        let recorder = Self {
            session_id: Uuid::new_v4(),
            path,
            file: Mutex::new(file),
        };
        recorder.write_line(&format!("session {} opened", recorder.session_id));
        info!(
            path = %recorder.path.display(),
            session = %recorder.session_id,
            "Hand-history recorder ready"
        );
        Ok(recorder)
    }

    /// The session identity stamped on this recorder's lines.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn write_line(&self, message: &str) {
        let line = format!(
            "{} [{}] {}\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            self.session_id,
            message,
        );
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            error!(error = %e, path = %self.path.display(), "History write failed");
        }
    }
}

impl HandHistory for TextRecorder {
    fn begin_hand(&self, hand_no: Option<u64>) {
        match hand_no {
            Some(n) => self.write_line(&format!("hand #{n} begins")),
            None => self.write_line("hand begins"),
        }
    }

    fn posts_small_blind(&self, chair: usize) {
        self.write_line(&format!("seat {chair} posts small blind"));
    }

    fn posts_big_blind(&self, chair: usize) {
        self.write_line(&format!("seat {chair} posts big blind"));
    }

    fn posts_ante(&self, chair: usize) {
        self.write_line(&format!("seat {chair} posts ante"));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
