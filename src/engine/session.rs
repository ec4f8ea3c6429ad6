//! Per-frame session driver.
//!
//! Owns the registry and the hand-history sink, compares each incoming
//! frame against the previous one to detect table boundaries, and turns
//! those boundaries into lifecycle broadcasts:
//!
//! - table identity changed (or first frame) -> connection
//! - hand number changed, else dealer moved  -> hand reset
//! - board-card count changed within a hand  -> new round
//! - every frame                             -> heartbeat
//! - hero to act                             -> my turn
//!
//! After the broadcasts the configured watch list is evaluated through the
//! public lookup surface and folded into a per-frame report.

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info};

use super::registry::EngineRegistry;
use crate::config::DebugConfig;
use crate::history::HandHistory;
use crate::providers::{SymbolContext, SymbolScope};
use crate::types::TableState;

// ---------------------------------------------------------------------------
// Frame report
// ---------------------------------------------------------------------------

/// What one processed frame triggered, plus the watch-list values.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: u64,
    pub timestamp: DateTime<Utc>,
    pub connection: bool,
    pub hand_reset: bool,
    pub new_round: bool,
    pub my_turn: bool,
    pub watch: Vec<(String, Option<f64>)>,
}

impl FrameReport {
    /// True when any boundary event fired for this frame.
    pub fn eventful(&self) -> bool {
        self.connection || self.hand_reset || self.new_round || self.my_turn
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}", self.frame)?;
        let mut events: Vec<&str> = Vec::new();
        if self.connection {
            events.push("connection");
        }
        if self.hand_reset {
            events.push("hand-reset");
        }
        if self.new_round {
            events.push("new-round");
        }
        if self.my_turn {
            events.push("my-turn");
        }
        if !events.is_empty() {
            write!(f, " [{}]", events.join(" "))?;
        }
        for (name, value) in &self.watch {
            match value {
                Some(v) => write!(f, " {name}={v}")?,
                None => write!(f, " {name}=?")?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    registry: EngineRegistry,
    history: Box<dyn HandHistory>,
    debug: DebugConfig,
    watch: Vec<String>,
    last: Option<TableState>,
    frames: u64,
    hands: u64,
    connections: u64,
}

impl Session {
    pub fn new(
        mut registry: EngineRegistry,
        history: Box<dyn HandHistory>,
        debug: DebugConfig,
        watch: Vec<String>,
    ) -> Self {
        registry.init_on_startup();
        info!(symbols = %registry.describe_all(), "engine symbol table");
        Self {
            registry,
            history,
            debug,
            watch,
            last: None,
            frames: 0,
            hands: 0,
            connections: 0,
        }
    }

    /// Feed one scraped frame through the engine.
    pub fn process_frame(&mut self, table: &TableState) -> FrameReport {
        self.frames += 1;

        let connection = self
            .last
            .as_ref()
            .map_or(true, |last| last.table_id != table.table_id);
        let hand_reset = connection
            || self.last.as_ref().is_some_and(|last| {
                match (last.hand_no, table.hand_no) {
                    (Some(prev), Some(now)) => now != prev,
                    // No usable hand number: fall back to button movement.
                    _ => table.dealer != last.dealer,
                }
            });
        let new_round = !hand_reset
            && self
                .last
                .as_ref()
                .is_some_and(|last| last.board_cards != table.board_cards);

        let ctx = SymbolContext {
            table,
            history: self.history.as_ref(),
            debug: &self.debug,
        };

        if connection {
            self.connections += 1;
            info!(table = %table.table_id, "connected to table");
            self.registry.broadcast_connection();
        }
        if hand_reset {
            self.hands += 1;
            debug!(hand = ?table.hand_no, dealer = table.dealer, "hand boundary");
            self.registry.broadcast_hand_reset();
            self.history.begin_hand(table.hand_no);
        }
        if new_round {
            debug!(board = table.board_cards, "betting round boundary");
            self.registry.broadcast_new_round();
        }

        self.registry.broadcast_heartbeat(&ctx);

        let my_turn = table.hero_to_act;
        if my_turn {
            self.registry.broadcast_my_turn();
        }

        let mut watch = Vec::with_capacity(self.watch.len());
        for name in &self.watch {
            let value = self.registry.evaluate(name, &ctx);
            watch.push((name.clone(), value));
        }

        self.last = Some(table.clone());
        FrameReport {
            frame: self.frames,
            timestamp: Utc::now(),
            connection,
            hand_reset,
            new_round,
            my_turn,
            watch,
        }
    }

    /// Look up a symbol against the most recent frame. `None` before the
    /// first frame has been processed.
    pub fn evaluate(&mut self, name: &str) -> Option<f64> {
        let table = self.last.as_ref()?;
        let ctx = SymbolContext {
            table,
            history: self.history.as_ref(),
            debug: &self.debug,
        };
        self.registry.evaluate(name, &ctx)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn hands(&self) -> u64 {
        self.hands
    }

    pub fn connections(&self) -> u64 {
        self.connections
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
