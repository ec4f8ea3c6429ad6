//! Blind-posting detector.
//!
//! A pure observer: contributes no symbols, but watches the first eligible
//! frame of each hand and classifies every posted wager as small blind, big
//! blind or ante, reporting each to the hand-history sink. The scan runs at
//! most once per hand; joining a table mid-hand forfeits the scan entirely
//! rather than guessing.

use std::fmt;
use tracing::debug;

use super::{Evaluation, SymbolContext, SymbolProvider, SymbolScope};

// ---------------------------------------------------------------------------
// Detection phases
// ---------------------------------------------------------------------------

/// Where the detector stands within the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectPhase {
    /// No cards out yet; the scan has not run.
    WaitingForBlinds,
    /// Mid-scan. Only ever observable from inside a heartbeat.
    Scanning,
    /// Postings classified (or forfeited) for this hand.
    Done,
}

impl fmt::Display for DetectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectPhase::WaitingForBlinds => write!(f, "waiting-for-blinds"),
            DetectPhase::Scanning => write!(f, "scanning"),
            DetectPhase::Done => write!(f, "done"),
        }
    }
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

pub struct BlindDetector {
    phase: DetectPhase,
}

impl BlindDetector {
    pub fn new() -> Self {
        Self {
            phase: DetectPhase::WaitingForBlinds,
        }
    }

    pub fn phase(&self) -> DetectPhase {
        self.phase
    }

    /// One clockwise pass over the wagers, starting at the seat after the
    /// dealer and ending on the dealer seat itself.
    fn scan(&mut self, ctx: &SymbolContext) {
        let table = ctx.table;
        let sblind = table.sblind;
        let mut small_seen = false;
        let mut big_seen = false;

        for chair in table.clockwise_from_dealer() {
            let wager = table.wager(chair);
            if wager <= 0.0 {
                continue;
            }
            if small_seen && big_seen {
                if wager <= sblind {
                    if ctx.debug.blind_posting {
                        debug!(chair, wager, "classified as ante");
                    }
                    ctx.history.posts_ante(chair);
                }
                // Larger wagers after both blinds are early raises; they
                // belong to the betting record, not the posting record.
            } else if small_seen {
                // Whatever follows the small blind is the big blind.
                if ctx.debug.blind_posting {
                    debug!(chair, wager, "classified as big blind");
                }
                ctx.history.posts_big_blind(chair);
                big_seen = true;
            } else if wager <= sblind {
                if ctx.debug.blind_posting {
                    debug!(chair, wager, "classified as small blind");
                }
                ctx.history.posts_small_blind(chair);
                small_seen = true;
            } else {
                // First wager already exceeds the small blind: the small
                // blind is dead or skipped and this chair posted the big.
                if ctx.debug.blind_posting {
                    debug!(chair, wager, "classified as big blind, small blind missing");
                }
                ctx.history.posts_big_blind(chair);
                small_seen = true;
                big_seen = true;
            }
        }
    }
}

impl Default for BlindDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider for BlindDetector {
    fn name(&self) -> &'static str {
        "blinds"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        // Heartbeat ordering guarantees both are up to date for this frame.
        &["players", "betround"]
    }

    fn on_hand_reset(&mut self) {
        self.phase = DetectPhase::WaitingForBlinds;
    }

    fn on_heartbeat(&mut self, ctx: &SymbolContext, scope: &mut dyn SymbolScope) {
        if self.phase == DetectPhase::Done {
            return;
        }
        let round = scope.evaluate("betround", ctx).unwrap_or(1.0);
        if round > 1.0 {
            // Joined mid-hand: the preflop wagers are long gone, so this
            // hand yields no classifications at all.
            if ctx.debug.blind_posting {
                debug!(betround = round, "mid-hand join, blind scan forfeited");
            }
            self.phase = DetectPhase::Done;
            return;
        }
        let dealt = scope.evaluate("nplayersdealt", ctx).unwrap_or(0.0);
        if dealt < 1.0 {
            return;
        }
        self.phase = DetectPhase::Scanning;
        self.scan(ctx);
        self.phase = DetectPhase::Done;
        if ctx.debug.blind_posting {
            debug!(phase = %self.phase, "blind scan complete");
        }
    }

    fn evaluate(
        &mut self,
        _name: &str,
        _ctx: &SymbolContext,
        _scope: &mut dyn SymbolScope,
    ) -> Evaluation {
        Evaluation::NotMine
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
