//! Symbol providers.
//!
//! Defines the `SymbolProvider` trait — the capability every engine module
//! implements — and provides implementations for:
//! - memory — the `me_*` store/recall command interpreter
//! - betround — current betting round from the board-card count
//! - players — seated/playing/dealt chair facts
//! - facts — instantaneous snapshot pass-throughs (dealer, chairs, limits)
//! - blinds — the blind-posting detector feeding the hand-history sink

pub mod betround;
pub mod blinds;
pub mod facts;
pub mod memory;
pub mod players;

use crate::config::DebugConfig;
use crate::history::HandHistory;
use crate::types::TableState;

/// The defined "unset" sentinel: the value of a symbol that has never been
/// stored, the result of a failed numeric literal, and the evaluation result
/// of commands that exist only for their side effect.
pub const UNSET_VALUE: f64 = 0.0;

// ---------------------------------------------------------------------------
// Evaluation outcome
// ---------------------------------------------------------------------------

/// Outcome of asking a provider to evaluate a symbol name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// The provider owns the name and computed a value.
    Value(f64),
    /// The name's prefix is not owned by this provider. Silent — control
    /// passes to no one; the public lookup surface reports "not found".
    NotMine,
    /// The prefix is owned but the command failed structural parsing.
    /// Exactly one user-facing diagnostic has already been raised; the
    /// public lookup surface collapses this to "not found".
    Malformed,
}

// ---------------------------------------------------------------------------
// Evaluation context & lookup scope
// ---------------------------------------------------------------------------

/// Everything a provider may read while evaluating or updating: the current
/// table snapshot, the hand-history sink, and the per-family debug toggles.
pub struct SymbolContext<'a> {
    pub table: &'a TableState,
    pub history: &'a dyn HandHistory,
    pub debug: &'a DebugConfig,
}

/// A lookup scope for resolving sibling symbols.
///
/// During dispatch the registry hands itself to the active provider as the
/// scope, with the active provider's own slot vacated — so nested expressions
/// can reach every other provider, and a re-entrant query for the active
/// provider's own symbols resolves to `None`.
pub trait SymbolScope {
    fn evaluate(&mut self, name: &str, ctx: &SymbolContext) -> Option<f64>;
}

/// A scope with no providers behind it: every lookup misses. Useful when a
/// provider is evaluated in isolation.
pub struct EmptyScope;

impl SymbolScope for EmptyScope {
    fn evaluate(&mut self, _name: &str, _ctx: &SymbolContext) -> Option<f64> {
        None
    }
}

// ---------------------------------------------------------------------------
// Provider capability contract
// ---------------------------------------------------------------------------

/// Abstraction over symbol-engine modules.
///
/// Implementors expose named, lazily-computed numeric facts about the game
/// through `evaluate`, and keep their internal state current through the
/// lifecycle hooks the session driver broadcasts in dependency order.
///
/// Evaluation is *not* guaranteed pure: a provider's doc comment states
/// whether `evaluate` mutates shared state (the memory interpreter does).
/// Callers must not re-evaluate speculatively.
pub trait SymbolProvider: Send {
    /// Unique provider identifier — the registry key, and the name other
    /// providers use in `depends_on`.
    fn name(&self) -> &'static str;

    /// Declared owned names. Entries ending in `_` are name-prefix families
    /// (`"me_"`); other entries are exact symbol names (`"betround"`).
    /// Used for dispatch as well as diagnostics.
    fn symbols(&self) -> &'static [&'static str] {
        &[]
    }

    /// Names of providers whose heartbeat must run before this one's.
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    /// Human/debug description of the owned names. Never used for dispatch.
    fn describe(&self) -> String {
        self.symbols().join(" ")
    }

    /// Called once when the engine starts, before any frame.
    fn init_on_startup(&mut self) {}

    /// Called when a new table connection is detected.
    fn on_connection(&mut self) {}

    /// Called once per hand boundary, never mid-hand.
    fn on_hand_reset(&mut self) {}

    /// Called when the betting round advances within a hand.
    fn on_new_round(&mut self) {}

    /// Called when the hero is to act in the current frame.
    fn on_my_turn(&mut self) {}

    /// Called once per frame, in dependency order. Providers with per-hand
    /// work pending execute it here and may flip an internal "done" flag.
    fn on_heartbeat(&mut self, ctx: &SymbolContext, scope: &mut dyn SymbolScope) {
        let _ = (ctx, scope);
    }

    /// Attempt to compute `name`. Returns `NotMine` for any name whose
    /// prefix this provider does not own.
    fn evaluate(
        &mut self,
        name: &str,
        ctx: &SymbolContext,
        scope: &mut dyn SymbolScope,
    ) -> Evaluation {
        let _ = (name, ctx, scope);
        Evaluation::NotMine
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
