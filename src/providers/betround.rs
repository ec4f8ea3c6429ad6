//! Betting-round tracker.
//!
//! Folds the board-card count of each frame into a [`BetRound`] and exposes
//! it as the `betround` symbol (1 = preflop .. 4 = river). Other providers
//! lean on this instead of re-deriving the street themselves.

use tracing::debug;

use super::{Evaluation, SymbolContext, SymbolProvider, SymbolScope};
use crate::types::BetRound;

pub struct BetroundCalculator {
    round: BetRound,
}

impl BetroundCalculator {
    pub fn new() -> Self {
        Self {
            round: BetRound::Preflop,
        }
    }

    pub fn round(&self) -> BetRound {
        self.round
    }
}

impl Default for BetroundCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider for BetroundCalculator {
    fn name(&self) -> &'static str {
        "betround"
    }

    fn symbols(&self) -> &'static [&'static str] {
        &["betround"]
    }

    fn on_hand_reset(&mut self) {
        self.round = BetRound::Preflop;
    }

    fn on_heartbeat(&mut self, ctx: &SymbolContext, _scope: &mut dyn SymbolScope) {
        let seen = BetRound::from_board_cards(ctx.table.board_cards);
        if seen != self.round {
            debug!(from = %self.round, to = %seen, "betting round advanced");
            self.round = seen;
        }
    }

    fn evaluate(
        &mut self,
        name: &str,
        _ctx: &SymbolContext,
        _scope: &mut dyn SymbolScope,
    ) -> Evaluation {
        match name {
            "betround" => Evaluation::Value(f64::from(self.round.number())),
            _ => Evaluation::NotMine,
        }
    }
}
