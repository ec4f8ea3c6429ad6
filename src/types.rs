//! Shared types for the RAILBIRD agent.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that table, provider,
//! and engine modules can depend on them without circular references.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// One chair of a scraped table snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seat {
    /// Whether a player is sitting in this chair.
    #[serde(default)]
    pub occupied: bool,
    /// Whether the player currently holds cards.
    #[serde(default)]
    pub dealt: bool,
    /// The wager currently in front of the seat (this betting round).
    #[serde(default)]
    pub wager: f64,
    /// Remaining chip stack.
    #[serde(default)]
    pub stack: f64,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.occupied {
            return write!(f, "empty");
        }
        write!(
            f,
            "{} bet={:.2} stack={:.2}",
            if self.dealt { "dealt" } else { "idle" },
            self.wager,
            self.stack,
        )
    }
}

impl Seat {
    /// A seated player currently holding cards, with the given wager.
    pub fn dealt_with_wager(wager: f64, stack: f64) -> Self {
        Seat {
            occupied: true,
            dealt: true,
            wager,
            stack,
        }
    }
}

// ---------------------------------------------------------------------------
// Table snapshot
// ---------------------------------------------------------------------------

/// One scraped table snapshot — the unit of input to the session driver.
///
/// Consecutive frames are compared to detect connection changes (table
/// identity), hand boundaries (hand number, else dealer movement), and
/// betting-round changes (board-card count).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    /// Identity of the table we are connected to.
    pub table_id: String,
    /// Hand number as reported by the site, when the scraper can read it.
    #[serde(default)]
    pub hand_no: Option<u64>,
    /// Chair index of the dealer button.
    #[serde(default)]
    pub dealer: usize,
    /// All chairs, in clockwise seating order.
    #[serde(default)]
    pub seats: Vec<Seat>,
    /// Number of community cards on the board (0, 3, 4 or 5).
    #[serde(default)]
    pub board_cards: u8,
    /// Configured small-blind size for this table.
    #[serde(default)]
    pub sblind: f64,
    /// Configured big-blind size for this table.
    #[serde(default)]
    pub bblind: f64,
    /// Configured ante size for this table (0 when the table has none).
    #[serde(default)]
    pub ante: f64,
    /// Whether it is the hero's turn to act in this frame.
    #[serde(default)]
    pub hero_to_act: bool,
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] hand={} dealer={} chairs={} board={} blinds={:.2}/{:.2}",
            self.table_id,
            self.hand_no
                .map_or_else(|| "?".to_string(), |n| n.to_string()),
            self.dealer,
            self.seats.len(),
            self.board_cards,
            self.sblind,
            self.bblind,
        )
    }
}

impl TableState {
    /// Number of chairs at the table.
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Current wager in front of a chair. Out-of-range chairs read as 0.
    pub fn wager(&self, chair: usize) -> f64 {
        self.seats.get(chair).map_or(0.0, |s| s.wager)
    }

    /// Chairs visited clockwise, starting at the seat after the dealer and
    /// ending at the dealer seat itself (wraps modulo the chair count).
    pub fn clockwise_from_dealer(&self) -> impl Iterator<Item = usize> + '_ {
        let chairs = self.seats.len();
        (1..=chairs).map(move |step| (self.dealer + step) % chairs)
    }

    /// Helper to build a test table with sensible defaults: six chairs,
    /// dealer at chair 0, blinds 1/2, nobody dealt yet.
    #[cfg(test)]
    pub fn sample() -> Self {
        TableState {
            table_id: "table-001".to_string(),
            hand_no: Some(1),
            dealer: 0,
            seats: vec![Seat::default(); 6],
            board_cards: 0,
            sblind: 1.0,
            bblind: 2.0,
            ante: 0.0,
            hero_to_act: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Betting round
// ---------------------------------------------------------------------------

/// The current betting round, derived from the board-card count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BetRound {
    Preflop,
    Flop,
    Turn,
    River,
}

impl BetRound {
    /// Derive the round from the number of community cards.
    /// Unexpected counts clamp to the nearest round below.
    pub fn from_board_cards(count: u8) -> Self {
        match count {
            0..=2 => BetRound::Preflop,
            3 => BetRound::Flop,
            4 => BetRound::Turn,
            _ => BetRound::River,
        }
    }

    /// Numeric value of the round: preflop=1 … river=4.
    pub fn number(&self) -> u8 {
        match self {
            BetRound::Preflop => 1,
            BetRound::Flop => 2,
            BetRound::Turn => 3,
            BetRound::River => 4,
        }
    }
}

impl fmt::Display for BetRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetRound::Preflop => write!(f, "preflop"),
            BetRound::Flop => write!(f, "flop"),
            BetRound::Turn => write!(f, "turn"),
            BetRound::River => write!(f, "river"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for RAILBIRD.
///
/// All of these are startup/configuration errors: the registry refuses to
/// build, and `main` aborts. Malformed symbol input at runtime is never an
/// error — providers recover locally with a sentinel value.
#[derive(Debug, thiserror::Error)]
pub enum RailbirdError {
    #[error("Duplicate provider name: {0}")]
    DuplicateProvider(String),

    #[error("Provider '{provider}' depends on unknown provider '{dependency}'")]
    UnknownDependency {
        provider: String,
        dependency: String,
    },

    #[error("Dependency cycle among providers: {0}")]
    DependencyCycle(String),

    #[error("Symbol '{symbol}' claimed by both '{first}' and '{second}'")]
    DuplicateSymbol {
        symbol: String,
        first: String,
        second: String,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
